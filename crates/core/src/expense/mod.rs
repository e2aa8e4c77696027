//! Expense submission and the approval workflow.
//!
//! - [`types`] - Expense records, states and submission input
//! - [`ledger`] - The stored collection of expenses
//! - [`workflow`] - Submission, conversion preview and decisions
//! - [`reference`] - `EXP/NNNN` reference generation

pub mod error;
pub mod ledger;
pub mod reference;
pub mod types;
pub mod workflow;

#[cfg(test)]
mod workflow_props;

pub use error::ExpenseError;
pub use ledger::{ExpenseLedger, MAX_REFERENCE_ATTEMPTS};
pub use reference::{RandomReferences, ReferenceGenerator};
pub use types::{Decision, Expense, ExpenseDate, ExpenseState, NewExpense, ValidatedExpense};
pub use workflow::ExpenseWorkflow;
