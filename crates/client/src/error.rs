use torreblanca_core::error::CoreError;
use torreblanca_core::types::DbId;

/// Errors from the records/events HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("Error {operation}: {status} {reason}")]
    Transport {
        /// What the client was doing, e.g. `"creating record"`.
        operation: &'static str,
        /// HTTP status code.
        status: u16,
        /// Reason phrase for the status.
        reason: String,
    },

    /// The requested record does not exist (HTTP 404).
    #[error("Record {id} not found: 404 Not Found")]
    NotFound { id: DbId },

    /// The response body was not the expected JSON shape.
    #[error("Invalid response body: {0}")]
    Parse(String),

    /// The payload failed client-side checks before submission.
    #[error("Invalid record data: {0}")]
    Validation(String),
}

impl ClientError {
    /// HTTP status carried by the error, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => Some(*status),
            Self::NotFound { .. } => Some(404),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            Self::Parse(_) | Self::Validation(_) => None,
        }
    }
}

impl From<CoreError> for ClientError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => Self::Validation(msg),
            CoreError::Parse(msg) => Self::Parse(msg),
        }
    }
}
