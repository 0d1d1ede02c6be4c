//! Encoded bcrypt hashes
//!
//! Value objects for the `$<version>$<cost>$<salt><digest>` format stored
//! by password databases.

pub mod model;
pub mod version;

pub use model::{EncodedHash, DIGEST_LEN, MAX_COST, MIN_COST, SALT_LEN};
pub use version::BcryptVersion;
