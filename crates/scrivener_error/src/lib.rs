//! Error types for the Scrivener writing assistant.
//!
//! Every error carries the source location where it was created, following a
//! `{ kind, line, file }` layout. Crate-specific errors convert into the
//! aggregate [`ScrivenerError`] through [`ScrivenerErrorKind`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod database;
mod http;
mod provider;
mod transport;
mod validation;

pub use config::ConfigError;
pub use database::{DatabaseError, DatabaseErrorKind, DatabaseResult};
pub use http::HttpError;
pub use provider::{ProviderError, ProviderErrorKind, ProviderResult};
pub use transport::{TransportError, TransportErrorKind};
pub use validation::ValidationError;

/// Crate-level error variants.
#[derive(Debug, derive_more::From)]
pub enum ScrivenerErrorKind {
    /// Request failed boundary validation
    Validation(ValidationError),
    /// Model provider failure
    Provider(ProviderError),
    /// Client-side transport failure
    Transport(TransportError),
    /// Generation record store failure
    Database(DatabaseError),
    /// Configuration error
    Config(ConfigError),
    /// HTTP error
    Http(HttpError),
}

impl std::fmt::Display for ScrivenerErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScrivenerErrorKind::Validation(e) => write!(f, "{}", e),
            ScrivenerErrorKind::Provider(e) => write!(f, "{}", e),
            ScrivenerErrorKind::Transport(e) => write!(f, "{}", e),
            ScrivenerErrorKind::Database(e) => write!(f, "{}", e),
            ScrivenerErrorKind::Config(e) => write!(f, "{}", e),
            ScrivenerErrorKind::Http(e) => write!(f, "{}", e),
        }
    }
}

/// Scrivener error with kind discrimination.
///
/// # Examples
///
/// ```
/// use scrivener_error::{ScrivenerError, ScrivenerErrorKind, ValidationError};
///
/// let err: ScrivenerError = ValidationError::new("Missing required fields").into();
/// assert!(matches!(err.kind(), ScrivenerErrorKind::Validation(_)));
/// ```
#[derive(Debug)]
pub struct ScrivenerError(Box<ScrivenerErrorKind>);

impl ScrivenerError {
    /// Create a new error from a kind.
    pub fn new(kind: ScrivenerErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ScrivenerErrorKind {
        &self.0
    }

    /// Consume the error, returning the kind.
    pub fn into_kind(self) -> ScrivenerErrorKind {
        *self.0
    }
}

impl std::fmt::Display for ScrivenerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Scrivener Error: {}", self.0)
    }
}

impl std::error::Error for ScrivenerError {}

// Generic From implementation for any type that converts to ScrivenerErrorKind
impl<T> From<T> for ScrivenerError
where
    T: Into<ScrivenerErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Scrivener operations.
pub type ScrivenerResult<T> = std::result::Result<T, ScrivenerError>;
