//! Client side of Scrivener.
//!
//! - [`GenerationClient`] consumes `/api/generate` incrementally
//! - [`Utf8StreamDecoder`] turns arbitrary byte chunks into whole characters
//! - [`GenerationRun`] holds one run's buffer and terminal state
//! - [`StoreClient`] talks to `/api/generations`
//! - [`Workbench`] ties them into a session with bookmarks and export

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod consumer;
mod decoder;
mod export;
mod run;
mod store;
mod workbench;

pub use config::{ClientConfig, DEFAULT_SERVER_URL};
pub use consumer::GenerationClient;
pub use decoder::Utf8StreamDecoder;
pub use export::{ExportFormat, export_record, record_file_name};
pub use run::{GenerationRun, RunStatus};
pub use store::StoreClient;
pub use workbench::Workbench;
