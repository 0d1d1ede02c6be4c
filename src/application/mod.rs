pub mod offload;
pub mod verifier;

pub use offload::verify_blocking_offload;
pub use verifier::{verify, SecretLengthPolicy, Verifier, MAX_SECRET_LEN};
