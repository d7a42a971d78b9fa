//! Scrivener: a streaming AI writing assistant.
//!
//! A user picks a writing mode, submits a prompt, and watches generated text
//! arrive fragment by fragment. Results can be saved, bookmarked, browsed,
//! and exported.
//!
//! This crate re-exports the workspace crates:
//! - [`scrivener_core`] - modes, records, token estimation
//! - [`scrivener_models`] - Gemini and scripted generators
//! - [`scrivener_database`] - PostgreSQL and in-memory stores
//! - [`scrivener_server`] - axum routes
//! - [`scrivener_client`] - stream consumer and session workbench

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub use scrivener_client::{
    ClientConfig, ExportFormat, GenerationClient, GenerationRun, RunStatus, StoreClient,
    Utf8StreamDecoder, Workbench,
};
pub use scrivener_core::{
    BookmarkUpdate, GenerationRecord, GenerationRequest, NewGeneration, OutputStats,
    StreamFragment, TEMPERATURE, WritingMode, estimate_tokens, init_tracing,
    resolve_system_prompt,
};
pub use scrivener_database::{InMemoryGenerationStore, PgGenerationStore};
pub use scrivener_error::{
    ConfigError, DatabaseError, DatabaseErrorKind, HttpError, ProviderError, ProviderErrorKind,
    ScrivenerError, ScrivenerErrorKind, ScrivenerResult, TransportError, TransportErrorKind,
    ValidationError,
};
pub use scrivener_interface::{FragmentStream, GenerationStore, TextGenerator};
pub use scrivener_models::{GeminiClient, GeminiConfig, ScriptedFailure, ScriptedGenerator};
pub use scrivener_server::{AppState, ServerConfig, create_router, serve};
