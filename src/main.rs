//! bcrypt-verifier
//!
//! Checks one secret against one bcrypt hash and prints the outcome.
//! Reads configuration from TOML file (~/.config/bcrypt-verifier/config.toml,
//! or the path in BCRYPT_VERIFIER_CONFIG).

use std::process::ExitCode;

use tracing::{error, info, warn};

use bcrypt_verifier::config::{config_path_from_env, AppConfig, LoggingConfig};
use bcrypt_verifier::runner::{init_tracing, run_check, Report, EXIT_ERROR};

#[tokio::main]
async fn main() -> ExitCode {
    // ── Load configuration ─────────────────────────────────────
    let config_path = config_path_from_env();
    let mut config = match AppConfig::load_or_default(&config_path) {
        Ok(cfg) => {
            init_tracing(&cfg.logging);
            if config_path.exists() {
                info!("Configuration loaded from {}", config_path.display());
            } else {
                warn!("No config at {}. Using defaults.", config_path.display());
            }
            cfg
        }
        Err(e) => {
            init_tracing(&LoggingConfig::default());
            error!("Failed to load config: {}", e);
            let report = Report::config_error(e);
            println!("{}", report.message);
            return ExitCode::from(report.exit_code);
        }
    };
    config.apply_env_overrides();

    if config.check.hash.is_empty() {
        error!("No hash configured (set check.hash or BCRYPT_VERIFIER_HASH)");
        return ExitCode::from(EXIT_ERROR);
    }

    // ── Verify ─────────────────────────────────────────────────
    let report = run_check(&config).await;
    println!("{}", report.message);
    ExitCode::from(report.exit_code)
}
