//! One-shot verification runner used by the binary.
//!
//! Turns the configured hash/secret pair into a printable [`Report`] with an
//! exit code, so the binary stays a thin shell around config loading.

use tracing::info;

use crate::application::offload::verify_blocking_offload;
use crate::config::{AppConfig, LoggingConfig};
use crate::support::errors::{AppError, ConfigError, VerificationError};

/// Exit status for a matching secret.
pub const EXIT_MATCH: u8 = 0;
/// Exit status for a well-formed hash that doesn't match.
pub const EXIT_MISMATCH: u8 = 1;
/// Exit status for everything else (bad hash, bad secret, timeout).
pub const EXIT_ERROR: u8 = 2;

/// Human-readable outcome of a check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub message: String,
    pub exit_code: u8,
}

impl Report {
    pub fn from_result(result: &Result<(), AppError>) -> Self {
        let (message, exit_code) = match result {
            Ok(()) => ("Match!".to_string(), EXIT_MATCH),
            Err(AppError::Verification(err)) => match err {
                VerificationError::Mismatch => (format!("Mismatch: {}", err), EXIT_MISMATCH),
                VerificationError::MalformedHash(_) => {
                    (format!("Malformed hash: {}", err), EXIT_ERROR)
                }
                VerificationError::UnsupportedVersion(_) => {
                    (format!("Unsupported version: {}", err), EXIT_ERROR)
                }
                VerificationError::SecretTooLong { .. } => {
                    (format!("Secret rejected: {}", err), EXIT_ERROR)
                }
            },
            Err(err) => (format!("Error: {}", err), EXIT_ERROR),
        };
        Self { message, exit_code }
    }

    /// Report for a config file that could not be used.
    pub fn config_error(err: ConfigError) -> Self {
        Self::from_result(&Err(err.into()))
    }

    pub fn is_match(&self) -> bool {
        self.exit_code == EXIT_MATCH
    }
}

/// Verify `config.check` with the configured policy and timeout.
pub async fn run_check(config: &AppConfig) -> Report {
    let verifier = config.verifier.build();
    info!(
        policy = ?verifier.policy(),
        timeout = ?config.verifier.timeout(),
        "Checking configured bcrypt hash"
    );

    let result = verify_blocking_offload(
        verifier,
        config.check.hash.clone(),
        config.check.secret.as_bytes().to_vec(),
        config.verifier.timeout(),
    )
    .await;

    let report = Report::from_result(&result);
    info!(exit_code = report.exit_code, "Check finished");
    report
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `config.level`.
pub fn init_tracing(config: &LoggingConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.level));

    match config.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
