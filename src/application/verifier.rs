//! bcrypt hash verification
//!
//! Parsing is done here so callers get a typed [`VerificationError`]; the
//! `2^cost` key schedule and the constant-time digest comparison are left
//! to the `bcrypt` crate.

use bcrypt::verify as bcrypt_verify;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::hash::EncodedHash;
use crate::support::errors::{MalformedReason, VerificationError};

/// Bytes of secret the Blowfish key schedule consumes.
pub const MAX_SECRET_LEN: usize = 72;

/// What to do with secrets longer than [`MAX_SECRET_LEN`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecretLengthPolicy {
    /// Ignore trailing bytes, like stock bcrypt implementations do.
    #[default]
    Truncate,
    /// Fail with [`VerificationError::SecretTooLong`] before hashing.
    Reject,
}

/// Verifies secrets against encoded bcrypt hashes under one
/// [`SecretLengthPolicy`].
///
/// Holds no mutable state, so one value can be shared freely across
/// threads. Outcomes are returned, never logged; only the parsed version
/// and cost are emitted at `debug` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct Verifier {
    policy: SecretLengthPolicy,
}

impl Verifier {
    pub fn new(policy: SecretLengthPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> SecretLengthPolicy {
        self.policy
    }

    /// Check `secret` against `encoded_hash`.
    ///
    /// # Returns
    /// * `Ok(())` - the secret matches
    /// * `Err(VerificationError::Mismatch)` - the hash is valid, the secret is wrong
    /// * `Err(_)` - the hash could not be used, or the secret breaks the length policy
    pub fn verify<S: AsRef<[u8]>>(
        &self,
        encoded_hash: &str,
        secret: S,
    ) -> Result<(), VerificationError> {
        let secret = secret.as_ref();
        let hash = EncodedHash::parse(encoded_hash)?;

        if self.policy == SecretLengthPolicy::Reject && secret.len() > MAX_SECRET_LEN {
            return Err(VerificationError::SecretTooLong { len: secret.len() });
        }

        debug!(
            version = %hash.version(),
            cost = hash.cost(),
            "Verifying secret against bcrypt hash"
        );
        compare(&hash, secret)
    }
}

/// Check `secret` against `encoded_hash` with the default
/// [`SecretLengthPolicy::Truncate`] policy.
pub fn verify<S: AsRef<[u8]>>(encoded_hash: &str, secret: S) -> Result<(), VerificationError> {
    let hash = EncodedHash::parse(encoded_hash)?;
    compare(&hash, secret.as_ref())
}

fn compare(hash: &EncodedHash<'_>, secret: &[u8]) -> Result<(), VerificationError> {
    match bcrypt_verify(secret, hash.as_str()) {
        Ok(true) => Ok(()),
        Ok(false) => Err(VerificationError::Mismatch),
        Err(_) => Err(VerificationError::MalformedHash(MalformedReason::Rejected)),
    }
}
