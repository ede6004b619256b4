//! # Errors
//!
//! Error type shared by the store, the query pipeline and the gateway.
//!
//! Every error carries an [`ErrorKind`]: user errors are caused by the
//! input of a request or invocation, internal errors are everything else.
//! Callers decide how to surface an error from its kind alone.

use thiserror::Error;

/// Result type for library operations
pub type GolResult<T> = Result<T, GolError>;

/// Who is at fault for an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input: format, geometry, query or library contents
    User,
    /// Failure unrelated to the input
    Internal,
}

/// Errors raised while opening a library or running a query
#[derive(Debug, Error)]
pub enum GolError {
    // ==================
    // User Errors
    // ==================
    /// Output format not recognised
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Malformed bounding box
    #[error("Invalid bounding box: {0}")]
    InvalidBox(String),

    /// Malformed polygon
    #[error("Invalid polygon: {0}")]
    InvalidPolygon(String),

    /// GOQL syntax error
    #[error("Invalid query at position {position}: {message}")]
    InvalidQuery { position: usize, message: String },

    /// Library file missing or unreadable as a library
    #[error("Invalid library: {0}")]
    InvalidLibrary(String),

    /// Feature reference not present in the library
    #[error("Feature not found: {0}")]
    FeatureNotFound(String),

    /// Rejected configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ==================
    // Internal Errors
    // ==================
    /// I/O failure while writing or reading output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Anything else
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GolError {
    /// Create a query syntax error
    pub fn invalid_query(position: usize, message: impl Into<String>) -> Self {
        Self::InvalidQuery {
            position,
            message: message.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            GolError::InvalidFormat(_)
            | GolError::InvalidBox(_)
            | GolError::InvalidPolygon(_)
            | GolError::InvalidQuery { .. }
            | GolError::InvalidLibrary(_)
            | GolError::FeatureNotFound(_)
            | GolError::InvalidConfig(_) => ErrorKind::User,
            GolError::Io(_) | GolError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Whether the error was caused by user input
    pub fn is_user_error(&self) -> bool {
        self.kind() == ErrorKind::User
    }
}
