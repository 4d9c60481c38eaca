//! Client error types.

use std::path::PathBuf;

use aud_core::CoreError;
use thiserror::Error;

/// Errors surfaced by [`crate::ApiClient`] operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Input rejected before any network call.
    #[error("validation error: {0}")]
    Validation(String),

    /// The backend could not be reached.
    #[error("cannot reach the extraction service: {0}")]
    Transport(#[source] reqwest::Error),

    /// The request deadline elapsed.
    #[error("request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    /// Non-success status other than 401.
    #[error("API error ({status}): {message}")]
    Http {
        /// HTTP status code returned by the backend.
        status: u16,
        /// `detail`/`message` from the body, or the status line.
        message: String,
    },

    /// The backend rejected the credentials. The session has been cleared.
    #[error("unauthorized: the server rejected the current credentials")]
    Unauthorized,

    /// Response body did not match the expected schema.
    #[error("invalid response: {0}")]
    Decode(String),

    #[error("invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ApiError {
    /// Classify a failure to send a request or read its body.
    pub(crate) fn from_transport(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout(error)
        } else {
            Self::Transport(error)
        }
    }

    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::InconsistentBatch { .. } => Self::Decode(error.to_string()),
            CoreError::Validation(message) => Self::Validation(message),
            CoreError::IncompleteCredentials(_) => Self::Validation(error.to_string()),
        }
    }
}
