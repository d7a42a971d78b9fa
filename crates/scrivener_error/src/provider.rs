//! Model provider error types.

/// Provider-specific error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ProviderErrorKind {
    /// API key not found in environment
    #[display("GOOGLE_GENERATIVE_AI_API_KEY (or GEMINI_API_KEY) environment variable not set")]
    MissingApiKey,
    /// Failed to reach the provider
    #[display("Provider connection failed: {}", _0)]
    Connection(String),
    /// Provider answered with a non-success status
    #[display("HTTP {} error: {}", status_code, message)]
    HttpError {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },
    /// Provider sent a payload that could not be decoded
    #[display("Invalid provider payload: {}", _0)]
    InvalidPayload(String),
    /// Stream failed after it was opened
    #[display("Stream interrupted: {}", _0)]
    StreamInterrupted(String),
    /// No fragment arrived within the configured idle window
    #[display("No fragment received within {} seconds", _0)]
    IdleTimeout(u64),
}

impl ProviderErrorKind {
    /// Whether the provider rejected our credentials.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            ProviderErrorKind::MissingApiKey
                | ProviderErrorKind::HttpError {
                    status_code: 401 | 403,
                    ..
                }
        )
    }
}

/// Provider error with source location tracking.
///
/// # Examples
///
/// ```
/// use scrivener_error::{ProviderError, ProviderErrorKind};
///
/// let err = ProviderError::new(ProviderErrorKind::MissingApiKey);
/// assert!(format!("{}", err).contains("GEMINI_API_KEY"));
/// assert!(err.kind.is_auth_failure());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Provider Error: {} at line {} in {}", kind, line, file)]
pub struct ProviderError {
    /// The kind of error that occurred
    pub kind: ProviderErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ProviderError {
    /// Create a new ProviderError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ProviderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;
