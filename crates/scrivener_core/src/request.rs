//! Generation request and fragment types.

use crate::WritingMode;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Sampling temperature used for every generation.
pub const TEMPERATURE: f32 = 0.7;

/// A prompt submitted for generation in a given mode.
///
/// The wire form is `{ "prompt": ..., "mode": ... }`. The mode travels as a
/// free string; resolution to a [`WritingMode`] never fails.
///
/// # Examples
///
/// ```
/// use scrivener_core::{GenerationRequest, WritingMode};
///
/// let request = GenerationRequest::new("haiku", "Announce the launch");
/// assert_eq!(request.writing_mode(), WritingMode::Email);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GenerationRequest {
    /// Writing mode identifier
    #[serde(default)]
    mode: String,
    /// User prompt
    prompt: String,
}

impl GenerationRequest {
    /// Creates a new request.
    pub fn new(mode: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            mode: mode.into(),
            prompt: prompt.into(),
        }
    }

    /// Resolve the mode identifier.
    pub fn writing_mode(&self) -> WritingMode {
        WritingMode::from_identifier(&self.mode)
    }

    /// The system instruction for this request's mode.
    pub fn system_instruction(&self) -> &'static str {
        self.writing_mode().system_instruction()
    }
}

/// One chunk of generated text.
///
/// Fragments carry no meaning on their own; only their in-order
/// concatenation does.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("{}", _0)]
pub struct StreamFragment(String);

impl StreamFragment {
    /// Wrap generated text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The fragment text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the fragment carries no text.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Unwrap into the underlying string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for StreamFragment {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for StreamFragment {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}
