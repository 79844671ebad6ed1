//! Error types shared by the pipeline and the mount helper.
//!
//! # Design Decisions
//! - Construction errors (`MountError`) are fatal to application setup
//! - Request errors (`HandlerError`) pass through mounts untouched
//! - The HTTP adapter is the only place errors become responses

use axum::http::StatusCode;

/// Boxed error raised by a middleware.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error raised while constructing a mount point.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MountError {
    /// The prefix does not begin with `/`.
    #[error("mount path must begin with \"/\", got {0:?}")]
    InvalidPrefix(String),
}

/// Error raised by a middleware while handling a request.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// Abort the request with an explicit HTTP status.
    #[error("{status}: {message}")]
    Status { status: StatusCode, message: String },

    /// Any other failure; rendered as 500.
    #[error(transparent)]
    Other(#[from] BoxError),
}

impl HandlerError {
    /// Abort with `status`, using its canonical reason as the message.
    pub fn status(status: StatusCode) -> Self {
        Self::Status {
            status,
            message: status.canonical_reason().unwrap_or("").to_string(),
        }
    }

    /// Abort with `status` and a custom message.
    pub fn with_message(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Wrap an arbitrary error.
    pub fn other(err: impl Into<BoxError>) -> Self {
        Self::Other(err.into())
    }

    /// The HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            HandlerError::Status { status, .. } => *status,
            HandlerError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
