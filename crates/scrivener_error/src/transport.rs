//! Client-side transport errors.

/// Transport failure conditions observed by the stream consumer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum TransportErrorKind {
    /// Request could not be sent
    #[display("Request failed: {}", _0)]
    Request(String),
    /// Server answered with a non-success status
    #[display("Server returned {}: {}", status_code, body)]
    Status {
        /// HTTP status code
        status_code: u16,
        /// Response body, as text
        body: String,
    },
    /// Body stream ended abnormally after it was opened
    #[display("Stream closed abnormally: {}", _0)]
    AbnormalClose(String),
    /// Response body could not be decoded
    #[display("Response decoding failed: {}", _0)]
    Decode(String),
    /// Another generation is already streaming
    #[display("A generation is already in progress")]
    Busy,
    /// Local file I/O failed
    #[display("I/O error: {}", _0)]
    Io(String),
}

/// Transport error with source location tracking.
///
/// # Examples
///
/// ```
/// use scrivener_error::{TransportError, TransportErrorKind};
///
/// let err = TransportError::new(TransportErrorKind::Busy);
/// assert!(format!("{}", err).contains("already in progress"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Transport Error: {} at line {} in {}", kind, line, file)]
pub struct TransportError {
    /// The kind of error that occurred
    pub kind: TransportErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl TransportError {
    /// Create a new TransportError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: TransportErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
