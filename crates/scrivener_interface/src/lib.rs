//! Trait definitions for the Scrivener writing assistant.
//!
//! Two seams separate the streaming pipeline from its collaborators:
//! - [`TextGenerator`] - opens a model stream and yields ordered fragments
//! - [`GenerationStore`] - CRUD over persisted generation records

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod generator;
mod store;

pub use generator::{FragmentStream, TextGenerator};
pub use store::GenerationStore;
