//! Core data types for the Scrivener writing assistant.
//!
//! This crate provides the foundation types shared by the server, the
//! stream consumer and the record store: writing modes and their system
//! instructions, generation requests, persisted records, and the token
//! estimator used on both the persistence and session-accounting paths.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod mode;
mod observability;
mod record;
mod request;
mod stats;
mod tokens;

pub use mode::{WritingMode, resolve_system_prompt};
pub use observability::init_tracing;
pub use record::{BookmarkUpdate, GenerationRecord, GenerationRecordBuilder, NewGeneration};
pub use request::{GenerationRequest, StreamFragment, TEMPERATURE};
pub use stats::OutputStats;
pub use tokens::estimate_tokens;
