//! # bcrypt-verifier
//!
//! Checks candidate secrets against stored bcrypt hashes
//! (`$2a$`, `$2b$`, `$2y$`) and reports a typed outcome.
//!
//! ## Architecture
//!
//! - **domain**: the encoded hash grammar and version tags
//! - **application**: verification (sync and offloaded to tokio's blocking pool)
//! - **support**: error types
//! - **config**: TOML configuration
//! - **runner**: tracing setup and the one-shot check used by the binary
//!
//! ```rust
//! use bcrypt_verifier::{verify, VerificationError};
//!
//! let hash = "$2a$05$CCCCCCCCCCCCCCCCCCCCC.E5YPO9kmyuRGyh0XouQYb4YMJKvyOeW";
//! assert_eq!(verify(hash, "U*U"), Ok(()));
//! assert_eq!(verify(hash, "U*V"), Err(VerificationError::Mismatch));
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod runner;
pub mod support;

pub use config::{default_config_path, AppConfig};

// Re-export the verification surface
pub use application::{verify, verify_blocking_offload, SecretLengthPolicy, Verifier};
pub use domain::{BcryptVersion, EncodedHash};
pub use support::errors::{AppError, ConfigError, MalformedReason, VerificationError};
