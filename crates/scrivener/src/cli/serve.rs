//! `serve` command handler.

use super::ServeArgs;
use scrivener_error::{ConfigError, ScrivenerResult};
use scrivener_models::GeminiClient;
use scrivener_server::{ServerConfig, serve};
use std::sync::Arc;
use tracing::info;

/// Handle the `serve` command
pub async fn handle_serve_command(args: ServeArgs) -> ScrivenerResult<()> {
    let env = ServerConfig::from_env()?;
    let config = ServerConfig::builder()
        .bind_addr(args.bind.unwrap_or(*env.bind_addr()))
        .database_url(args.database_url.or_else(|| env.database_url().clone()))
        .pool_size(*env.pool_size())
        .fragment_timeout(*env.fragment_timeout())
        .build()
        .map_err(|e| ConfigError::new(e.to_string()))?;

    let generator = GeminiClient::from_env()?;
    info!(model = generator.model_name(), "Starting Scrivener server");

    serve(config, Arc::new(generator)).await
}
