//! Running verifications off the async executor
//!
//! A bcrypt check burns CPU for milliseconds to seconds, which would stall
//! every other task on a tokio worker. [`verify_blocking_offload`] moves it
//! onto the blocking pool.

use std::time::Duration;

use tracing::warn;

use super::verifier::Verifier;
use crate::support::errors::AppError;

/// Verify on tokio's blocking pool, optionally giving up after `timeout`.
///
/// The bcrypt computation has no cancellation point: on timeout this only
/// stops waiting, the blocking thread runs to completion and its result is
/// dropped.
pub async fn verify_blocking_offload(
    verifier: Verifier,
    encoded_hash: String,
    secret: Vec<u8>,
    timeout: Option<Duration>,
) -> Result<(), AppError> {
    let task = tokio::task::spawn_blocking(move || verifier.verify(&encoded_hash, &secret));

    let joined = match timeout {
        Some(limit) => match tokio::time::timeout(limit, task).await {
            Ok(joined) => joined,
            Err(_) => {
                warn!("bcrypt verification did not finish within {:?}", limit);
                return Err(AppError::Timeout(limit));
            }
        },
        None => task.await,
    };

    Ok(joined??)
}
