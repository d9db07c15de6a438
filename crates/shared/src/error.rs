//! Application-wide error types.

use thiserror::Error;

use crate::types::Money;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error taxonomy surfaced at the UI boundary.
///
/// Every core and client error maps into one of these variants. Errors are
/// returned to the caller, never logged and swallowed.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required field is missing or an amount is invalid.
    /// Rejected before any network call.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The funding account cannot cover the requested amount.
    /// Rejected before submission.
    #[error(
        "Insufficient balance on {account_name}: available {available}, required {required}"
    )]
    InsufficientBalance {
        /// Name of the funding account that was checked.
        account_name: String,
        /// Balance currently available on the account.
        available: Money,
        /// Amount the operation requires.
        required: Money,
    },

    /// The referenced milestone, item or realization no longer exists.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The request failed to complete; the write may not have applied.
    #[error("Network error: {0}")]
    Network(String),

    /// The remote API rejected the request.
    #[error("API error: {0}")]
    Api(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the stable error code for API/UI consumers.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Network(_) => "NETWORK_ERROR",
            Self::Api(_) => "API_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true if retrying the operation may succeed.
    ///
    /// Only transport failures are retryable; validation, balance and
    /// not-found failures are deterministic.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}
