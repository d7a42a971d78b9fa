//! Client configuration.

use serde::Deserialize;
use scrivener_error::ConfigError;
use std::path::PathBuf;
use tracing::debug;

/// Server used when nothing else is configured.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";

/// Settings for the command-line client.
///
/// Sources, lowest precedence first:
/// 1. built-in defaults
/// 2. `<config dir>/scrivener/scrivener.toml`
/// 3. `./scrivener.toml`
/// 4. `SCRIVENER_*` environment variables (`SCRIVENER_SERVER_URL`)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, derive_getters::Getters)]
pub struct ClientConfig {
    /// Base URL of the Scrivener server
    server_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Path of the per-user config file, if the platform has a config dir.
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("scrivener").join("scrivener.toml"))
    }

    /// Load from defaults, config files, and environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("server_url", DEFAULT_SERVER_URL)
            .map_err(|e| ConfigError::new(e.to_string()))?;

        if let Some(path) = Self::user_config_path() {
            debug!(path = %path.display(), "Checking user config file");
            builder = builder.add_source(config::File::from(path).required(false));
        }

        let settings = builder
            .add_source(config::File::with_name("scrivener").required(false))
            .add_source(config::Environment::with_prefix("SCRIVENER"))
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to load client config: {}", e)))?;

        settings
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Invalid client config: {}", e)))
    }

    /// Replace the server URL.
    pub fn with_server_url(mut self, server_url: impl Into<String>) -> Self {
        self.server_url = server_url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_local_server() {
        assert_eq!(ClientConfig::default().server_url(), DEFAULT_SERVER_URL);
    }

    #[test]
    fn test_override_server_url() {
        let config = ClientConfig::default().with_server_url("http://example.test:8080");
        assert_eq!(config.server_url(), "http://example.test:8080");
    }
}
