//! HTTP surface for Scrivener.
//!
//! - `POST /api/generate` streams generated text as a chunked `text/plain` body
//! - `/api/generations` persists, lists, bookmarks and deletes records
//! - `GET /health` reports liveness
//!
//! # Example
//!
//! ```no_run
//! use scrivener_server::{ServerConfig, serve};
//! use std::sync::Arc;
//! # use scrivener_interface::TextGenerator;
//! # async fn run(generator: Arc<dyn TextGenerator>) -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! serve(config, generator).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod generate;
mod generations;
mod router;
mod server;
mod state;

pub use config::{ServerConfig, ServerConfigBuilder};
pub use router::create_router;
pub use server::{build_store, serve};
pub use state::AppState;
