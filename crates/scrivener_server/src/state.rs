//! Shared router state.

use scrivener_interface::{GenerationStore, TextGenerator};
use std::sync::Arc;
use std::time::Duration;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// Text producer for `/api/generate`.
    pub generator: Arc<dyn TextGenerator>,
    /// Record store for `/api/generations`.
    pub store: Arc<dyn GenerationStore>,
    /// Optional idle timeout between fragments.
    pub fragment_timeout: Option<Duration>,
}

impl AppState {
    /// Creates state with no fragment timeout.
    pub fn new(generator: Arc<dyn TextGenerator>, store: Arc<dyn GenerationStore>) -> Self {
        Self {
            generator,
            store,
            fragment_timeout: None,
        }
    }

    /// Fail a stream when no fragment arrives within `timeout`.
    pub fn with_fragment_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.fragment_timeout = timeout;
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("generator", &self.generator.provider_name())
            .field("fragment_timeout", &self.fragment_timeout)
            .finish()
    }
}
