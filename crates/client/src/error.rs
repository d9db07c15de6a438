//! Client error types.

use graha_core::realization::RealizationError;
use graha_shared::error::AppError;
use thiserror::Error;

/// Errors raised by the data layer.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Core validation rejected the input before any network call.
    #[error(transparent)]
    Validation(#[from] RealizationError),

    /// The referenced resource no longer exists server-side.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The remote API rejected the request.
    #[error("API error: {0}")]
    Api(String),

    /// The request failed to complete; the write may not have applied.
    #[error("Network error: {0}")]
    Network(String),

    /// The response payload did not match the expected shape.
    #[error("Malformed response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Returns true if retrying the operation may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Validation(inner) => inner.into(),
            ClientError::NotFound(msg) => Self::NotFound(msg),
            ClientError::Api(msg) => Self::Api(msg),
            ClientError::Network(msg) => Self::Network(msg),
            ClientError::Decode(msg) => Self::Internal(msg),
        }
    }
}
