//! Realization error types.

use graha_shared::error::AppError;
use graha_shared::types::Money;
use thiserror::Error;

/// Errors raised while validating or recording a realization.
#[derive(Debug, Error)]
pub enum RealizationError {
    /// Amount must be strictly positive.
    #[error("Amount must be greater than zero")]
    InvalidAmount,

    /// Every realization must be classified against an expense account.
    #[error("Expense account is required")]
    MissingExpenseAccount,

    /// RAB-linked realizations must carry a progress contribution.
    #[error("Progress is required for RAB-linked realizations")]
    MissingProgress,

    /// Additional costs must carry an explicit category.
    #[error("Cost category is required")]
    MissingCategory,

    /// The referenced expense account is not an operational expense account.
    #[error("Account must be an operational EXPENSE account")]
    InvalidExpenseAccount,

    /// The referenced funding account is not a cash/bank account.
    #[error("Source account must be an active CASH_AND_BANK account")]
    InvalidFundingAccount,

    /// A funding account was referenced but could not be resolved.
    #[error("Source account not found")]
    UnknownFundingAccount,

    /// The funding account cannot cover the requested amount.
    #[error(
        "Insufficient balance on {account_name}: available {available}, required {required}"
    )]
    InsufficientBalance {
        /// Name of the funding account.
        account_name: String,
        /// Balance currently available.
        available: Money,
        /// Amount required by the operation.
        required: Money,
    },
}

impl RealizationError {
    /// Shortfall of an insufficient-balance failure; zero for other errors.
    #[must_use]
    pub fn shortfall(&self) -> Money {
        match self {
            Self::InsufficientBalance {
                available, required, ..
            } => *required - *available,
            _ => Money::ZERO,
        }
    }
}

impl From<RealizationError> for AppError {
    fn from(err: RealizationError) -> Self {
        match err {
            RealizationError::InsufficientBalance {
                account_name,
                available,
                required,
            } => Self::InsufficientBalance {
                account_name,
                available,
                required,
            },
            other => Self::Validation(other.to_string()),
        }
    }
}
