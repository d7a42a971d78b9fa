//! Server configuration.

use derive_getters::Getters;
use scrivener_error::ConfigError;
use std::net::SocketAddr;
use std::time::Duration;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Default maximum PostgreSQL pool size.
pub const DEFAULT_POOL_SIZE: u32 = 10;

/// Configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct ServerConfig {
    /// Address to listen on
    #[builder(default = "default_bind_addr()")]
    bind_addr: SocketAddr,
    /// PostgreSQL URL; `None` selects the in-memory store
    #[builder(default)]
    database_url: Option<String>,
    /// Maximum pooled connections
    #[builder(default = "DEFAULT_POOL_SIZE")]
    pool_size: u32,
    /// Longest wait between two fragments before the stream is failed
    #[builder(default)]
    fragment_timeout: Option<Duration>,
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3000))
}

impl ServerConfig {
    /// Returns a builder with defaults for every field.
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Create config from environment variables
    ///
    /// Reads:
    /// - `SCRIVENER_BIND_ADDR` (default: "0.0.0.0:3000")
    /// - `DATABASE_URL` (optional)
    /// - `SCRIVENER_DB_POOL_SIZE` (default: 10)
    /// - `SCRIVENER_FRAGMENT_TIMEOUT_SECS` (optional)
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = std::env::var("SCRIVENER_BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::new(format!("SCRIVENER_BIND_ADDR: {}", e)))?;

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let pool_size = match std::env::var("SCRIVENER_DB_POOL_SIZE") {
            Ok(value) => value
                .parse::<u32>()
                .map_err(|e| ConfigError::new(format!("SCRIVENER_DB_POOL_SIZE: {}", e)))?,
            Err(_) => DEFAULT_POOL_SIZE,
        };

        let fragment_timeout = match std::env::var("SCRIVENER_FRAGMENT_TIMEOUT_SECS") {
            Ok(value) => parse_fragment_timeout(&value)?,
            Err(_) => None,
        };

        Self::builder()
            .bind_addr(bind_addr)
            .database_url(database_url)
            .pool_size(pool_size)
            .fragment_timeout(fragment_timeout)
            .build()
            .map_err(|e| ConfigError::new(e.to_string()))
    }
}

/// Parse an idle window in whole seconds. Zero disables the timeout.
fn parse_fragment_timeout(value: &str) -> Result<Option<Duration>, ConfigError> {
    let secs = value
        .trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::new(format!("SCRIVENER_FRAGMENT_TIMEOUT_SECS: {}", e)))?;
    Ok((secs > 0).then(|| Duration::from_secs(secs)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = ServerConfig::builder().build().unwrap();
        assert_eq!(config.bind_addr().port(), 3000);
        assert_eq!(*config.pool_size(), DEFAULT_POOL_SIZE);
        assert!(config.database_url().is_none());
        assert!(config.fragment_timeout().is_none());
    }

    #[test]
    fn test_zero_fragment_timeout_disables_it() {
        assert_eq!(parse_fragment_timeout("0").unwrap(), None);
        assert_eq!(
            parse_fragment_timeout(" 30 ").unwrap(),
            Some(Duration::from_secs(30))
        );
        assert!(parse_fragment_timeout("soon").is_err());
    }
}
