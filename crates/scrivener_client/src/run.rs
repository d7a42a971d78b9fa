//! Per-run state for one generation.

use derive_getters::Getters;
use scrivener_core::{GenerationRequest, OutputStats, estimate_tokens};
use scrivener_error::TransportError;

/// Lifecycle of a run. `Completed` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum RunStatus {
    /// Fragments are still arriving
    Streaming,
    /// The stream ended cleanly
    Completed,
    /// The stream failed; output holds whatever arrived first
    Failed,
}

/// Buffer and outcome of a single generation.
///
/// A fresh run is created for every generate or regenerate; the previous one
/// is replaced, never reset in place.
#[derive(Debug, Clone, Getters)]
pub struct GenerationRun {
    /// The submitted request
    request: GenerationRequest,
    /// Text accumulated so far, in arrival order
    output: String,
    /// Current status
    status: RunStatus,
    /// Failure cause, when `status` is `Failed`
    error: Option<TransportError>,
}

impl GenerationRun {
    /// Start a run in the `Streaming` state with an empty buffer.
    pub fn new(request: GenerationRequest) -> Self {
        Self {
            request,
            output: String::new(),
            status: RunStatus::Streaming,
            error: None,
        }
    }

    /// Append decoded text. Ignored once the run is terminal.
    pub fn append(&mut self, text: &str) {
        if self.status == RunStatus::Streaming {
            self.output.push_str(text);
        }
    }

    /// Mark the run as cleanly finished.
    pub fn complete(&mut self) {
        if self.status == RunStatus::Streaming {
            self.status = RunStatus::Completed;
        }
    }

    /// Mark the run as failed, keeping the partial output.
    pub fn fail(&mut self, error: TransportError) {
        if self.status == RunStatus::Streaming {
            self.status = RunStatus::Failed;
            self.error = Some(error);
        }
    }

    /// Whether the run ended cleanly.
    pub fn is_completed(&self) -> bool {
        self.status == RunStatus::Completed
    }

    /// Statistics of the current output.
    pub fn stats(&self) -> OutputStats {
        OutputStats::of(&self.output)
    }

    /// Token estimate of prompt plus output, as stored and as counted per session.
    pub fn tokens_used(&self) -> u32 {
        estimate_tokens(&format!("{}{}", self.request.prompt(), self.output))
    }
}
