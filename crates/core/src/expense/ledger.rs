//! The expense ledger: append-only except for each record's `state`.

use std::sync::Arc;

use tracing::warn;

use super::error::ExpenseError;
use super::reference::ReferenceGenerator;
use super::types::{Expense, ExpenseState};
use crate::store::{Collection, Repository, StoreError};

/// Attempts made to find an unused reference before accepting a collision.
pub const MAX_REFERENCE_ATTEMPTS: usize = 32;

/// Stored expense records.
pub struct ExpenseLedger {
    expenses: Collection<Expense>,
}

impl ExpenseLedger {
    /// Creates a ledger over `repository`.
    pub fn new(repository: Arc<dyn Repository<Expense>>) -> Self {
        Self {
            expenses: Collection::new(repository),
        }
    }

    /// Appends a record as-is.
    pub async fn append(&self, expense: Expense) -> Result<Expense, StoreError> {
        let stored = expense.clone();
        self.expenses
            .mutate(move |expenses| {
                expenses.push(stored);
                Ok::<_, StoreError>(())
            })
            .await?;
        Ok(expense)
    }

    /// Appends a record, re-rolling its reference while it collides with a
    /// stored one.
    ///
    /// Gives up after [`MAX_REFERENCE_ATTEMPTS`] and keeps the last draw.
    pub async fn append_with_unique_reference(
        &self,
        mut expense: Expense,
        references: &dyn ReferenceGenerator,
    ) -> Result<Expense, StoreError> {
        self.expenses
            .mutate(|expenses| {
                let mut attempts = 1;
                while expenses.iter().any(|e| e.reference == expense.reference) {
                    if attempts >= MAX_REFERENCE_ATTEMPTS {
                        warn!(reference = %expense.reference, "No free expense reference, keeping duplicate");
                        break;
                    }
                    expense.reference = references.next_reference();
                    attempts += 1;
                }
                expenses.push(expense.clone());
                Ok::<_, StoreError>(expense)
            })
            .await
    }

    /// Every record, most recently appended first.
    pub async fn newest_first(&self) -> Result<Vec<Expense>, StoreError> {
        let mut expenses = self.expenses.load().await?;
        expenses.reverse();
        Ok(expenses)
    }

    /// Records still waiting for a decision, in insertion order.
    pub async fn pending(&self) -> Result<Vec<Expense>, StoreError> {
        let expenses = self.expenses.load().await?;
        Ok(expenses
            .into_iter()
            .filter(|e| e.state == ExpenseState::Pending)
            .collect())
    }

    /// Sets `state` on every record carrying `reference` and returns how many
    /// matched.
    ///
    /// With `strict` set, any matching record that cannot take the edge
    /// aborts the whole update and nothing is written.
    pub async fn set_state(
        &self,
        reference: &str,
        to: ExpenseState,
        strict: bool,
    ) -> Result<usize, ExpenseError> {
        self.expenses
            .mutate(|expenses| {
                if strict
                    && let Some(blocked) = expenses
                        .iter()
                        .find(|e| e.reference == reference && !e.state.can_transition_to(to))
                {
                    return Err(ExpenseError::InvalidTransition {
                        reference: reference.to_string(),
                        from: blocked.state,
                        to,
                    });
                }

                let mut matched = 0;
                for expense in expenses.iter_mut().filter(|e| e.reference == reference) {
                    expense.state = to;
                    matched += 1;
                }
                Ok(matched)
            })
            .await
    }
}
