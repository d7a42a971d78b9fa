//! Model provider integrations for Scrivener.
//!
//! - [`GeminiClient`] streams generations from Gemini through `gemini-rust`.
//! - [`ScriptedGenerator`] replays a fixed fragment script, for tests and
//!   offline runs.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod gemini;
mod scripted;

pub use gemini::{GeminiClient, GeminiConfig, GeminiConfigBuilder};
pub use scripted::{ScriptedFailure, ScriptedGenerator};
