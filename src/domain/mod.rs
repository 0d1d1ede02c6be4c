pub mod hash;

// Re-export commonly used types
pub use hash::{BcryptVersion, EncodedHash};

// Re-export errors from support for convenience
pub use crate::support::errors::{MalformedReason, VerificationError};
