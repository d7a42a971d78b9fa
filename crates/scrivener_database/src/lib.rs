//! PostgreSQL integration for Scrivener.
//!
//! Persists generation records in the `generations` table:
//! - [`PgGenerationStore`] - diesel-backed store over an r2d2 pool
//! - [`InMemoryGenerationStore`] - process-local store for tests and
//!   database-less runs
//!
//! Both implement [`scrivener_interface::GenerationStore`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod connection;
mod memory_store;
mod models;
mod pg_store;
pub mod schema;

pub use connection::{DbPool, create_pool, establish_connection, run_migrations};
pub use memory_store::InMemoryGenerationStore;
pub use models::{GenerationRow, NewGenerationRow, NewGenerationRowBuilder};
pub use pg_store::PgGenerationStore;
pub use scrivener_error::{DatabaseError, DatabaseErrorKind, DatabaseResult};
