//! Server startup.

use crate::config::ServerConfig;
use crate::router::create_router;
use crate::state::AppState;
use scrivener_database::{InMemoryGenerationStore, PgGenerationStore};
use scrivener_error::{HttpError, ScrivenerResult};
use scrivener_interface::{GenerationStore, TextGenerator};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Select the record store: PostgreSQL when a URL is configured, otherwise
/// an in-memory store.
///
/// # Errors
///
/// Returns an error if PostgreSQL is configured but unreachable or its
/// migrations fail.
#[instrument(skip_all)]
pub async fn build_store(config: &ServerConfig) -> ScrivenerResult<Arc<dyn GenerationStore>> {
    match config.database_url() {
        Some(url) => {
            let store = PgGenerationStore::connect(url, *config.pool_size()).await?;
            info!("Using PostgreSQL generation store");
            Ok(Arc::new(store))
        }
        None => {
            warn!("DATABASE_URL not set, generations are kept in memory");
            Ok(Arc::new(InMemoryGenerationStore::new()))
        }
    }
}

/// Bind and serve until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the store cannot be built, the address cannot be
/// bound, or the server fails.
#[instrument(skip_all, fields(bind_addr = %config.bind_addr()))]
pub async fn serve(config: ServerConfig, generator: Arc<dyn TextGenerator>) -> ScrivenerResult<()> {
    let store = build_store(&config).await?;
    let state = AppState::new(generator, store).with_fragment_timeout(*config.fragment_timeout());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(*config.bind_addr())
        .await
        .map_err(|e| HttpError::new(format!("Failed to bind {}: {}", config.bind_addr(), e)))?;
    info!(addr = %config.bind_addr(), "Scrivener server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| HttpError::new(e.to_string()))?;

    info!("Scrivener server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
