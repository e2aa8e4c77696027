//! Expense workflow errors.

use spendflow_shared::AppError;
use thiserror::Error;

use super::types::ExpenseState;
use crate::store::StoreError;

/// Errors that can occur during expense operations.
#[derive(Debug, Error)]
pub enum ExpenseError {
    /// Submission input was rejected.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A decision was refused under strict transitions.
    #[error("Expense {reference} cannot move from {from} to {to}")]
    InvalidTransition {
        /// Reference of the offending record.
        reference: String,
        /// Its current state.
        from: ExpenseState,
        /// The requested state.
        to: ExpenseState,
    },

    /// The ledger could not be read or written.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ExpenseError> for AppError {
    fn from(err: ExpenseError) -> Self {
        match err {
            ExpenseError::Validation(msg) => Self::Validation(msg),
            e @ ExpenseError::InvalidTransition { .. } => Self::BusinessRule(e.to_string()),
            ExpenseError::Store(e) => e.into(),
        }
    }
}
