//! Tracing subscriber initialization.

use scrivener_error::ConfigError;
use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// Reads the filter from `RUST_LOG`, defaulting to `info`. With `json` set,
/// events are emitted as JSON lines instead of the human-readable format.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(json: bool) -> Result<(), ConfigError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let result = if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init()
    };

    result.map_err(|e| ConfigError::new(format!("Failed to install tracing subscriber: {}", e)))?;
    tracing::debug!(json, "Tracing subscriber installed");
    Ok(())
}
