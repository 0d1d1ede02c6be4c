use std::path::PathBuf;

use thiserror::Error;

/// Which part of the encoded hash grammar was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    /// Wrong total length or wrong number of `$`-separated fields.
    Layout,
    /// Version slot is empty, too long or not `<digit>[a-z]`.
    Version,
    /// Cost is not two ASCII digits.
    CostFormat,
    /// Cost parsed but lies outside the algorithm's bounds.
    CostOutOfRange(u32),
    /// Salt or digest contains characters outside the bcrypt alphabet,
    /// or non-canonical trailing bits.
    Encoding,
    /// The hashing primitive refused a hash that passed parsing.
    Rejected,
}

impl std::fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Layout => write!(f, "unexpected field layout"),
            Self::Version => write!(f, "invalid version tag"),
            Self::CostFormat => write!(f, "cost must be two digits"),
            Self::CostOutOfRange(cost) => write!(f, "cost {} out of range", cost),
            Self::Encoding => write!(f, "invalid salt or digest encoding"),
            Self::Rejected => write!(f, "rejected by bcrypt"),
        }
    }
}

/// Outcome taxonomy of a single verification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    #[error("hash and secret do not match")]
    Mismatch,

    #[error("malformed hash: {0}")]
    MalformedHash(MalformedReason),

    #[error("unsupported bcrypt version: {0}")]
    UnsupportedVersion(String),

    #[error("secret is {len} bytes, longer than the 72 bytes bcrypt uses")]
    SecretTooLong { len: usize },
}

impl VerificationError {
    /// The computation ran and the secret is simply wrong.
    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::Mismatch)
    }

    /// The stored hash itself is unusable; retrying with another secret
    /// won't help.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedHash(_) | Self::UnsupportedVersion(_))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Verification(#[from] VerificationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Verification timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Verification task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}

impl AppError {
    /// The verification error this wraps, if any.
    pub fn verification(&self) -> Option<&VerificationError> {
        match self {
            Self::Verification(err) => Some(err),
            _ => None,
        }
    }
}
