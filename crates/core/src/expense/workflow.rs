//! Expense submission, conversion preview and the approval queue.
//!
//! Every operation receives the acting [`Session`] explicitly. Conversion
//! problems degrade to a `null` company amount or a
//! [`Conversion::Unavailable`] result; only validation and storage failures
//! surface as errors.

use std::sync::Arc;

use rust_decimal::Decimal;
use spendflow_shared::types::money::to_money_scale;
use spendflow_shared::{CurrencyCode, WorkflowConfig};
use tracing::{info, warn};

use super::error::ExpenseError;
use super::ledger::ExpenseLedger;
use super::reference::{RandomReferences, ReferenceGenerator};
use super::types::{Decision, Expense, ExpenseState, NewExpense};
use crate::currency::{Conversion, ConversionService};
use crate::directory::{Session, UserDirectory};
use crate::store::Repository;

/// Orchestrates the expense lifecycle.
pub struct ExpenseWorkflow {
    ledger: ExpenseLedger,
    conversions: Arc<ConversionService>,
    directory: Arc<UserDirectory>,
    references: Arc<dyn ReferenceGenerator>,
    config: WorkflowConfig,
}

impl ExpenseWorkflow {
    /// Creates a workflow with random references.
    pub fn new(
        repository: Arc<dyn Repository<Expense>>,
        conversions: Arc<ConversionService>,
        directory: Arc<UserDirectory>,
        config: WorkflowConfig,
    ) -> Self {
        Self {
            ledger: ExpenseLedger::new(repository),
            conversions,
            directory,
            references: Arc::new(RandomReferences),
            config,
        }
    }

    /// Replaces the reference generator.
    #[must_use]
    pub fn with_references(mut self, references: Arc<dyn ReferenceGenerator>) -> Self {
        self.references = references;
        self
    }

    /// Submits a new pending expense for `session`.
    ///
    /// The company amount is the input amount when the currencies match
    /// (no rate lookup), the converted amount otherwise, or `None` when the
    /// rate could not be obtained.
    pub async fn submit_expense(
        &self,
        input: NewExpense,
        session: &Session,
    ) -> Result<Expense, ExpenseError> {
        let input = input.validate()?;
        let company_currency = session.company_currency();

        let company_amount = if input.currency == company_currency {
            Some(to_money_scale(input.amount))
        } else {
            match self
                .conversions
                .convert(input.amount, &input.currency, &company_currency)
                .await
            {
                Conversion::Available { converted, .. } => Some(converted),
                Conversion::Unavailable(reason) => {
                    warn!(
                        currency = %input.currency,
                        company_currency = %company_currency,
                        reason = reason.message(),
                        "Storing expense without company amount"
                    );
                    None
                }
            }
        };

        let expense = Expense {
            reference: self.references.next_reference(),
            date: input.date.into(),
            amount: to_money_scale(input.amount),
            currency: input.currency,
            company_amount,
            category: input.category,
            description: input.description,
            employee: session.email.clone(),
            state: ExpenseState::Pending,
        };

        let expense = if self.config.unique_refs {
            self.ledger
                .append_with_unique_reference(expense, self.references.as_ref())
                .await?
        } else {
            self.ledger.append(expense).await?
        };

        info!(
            reference = %expense.reference,
            employee = %expense.employee,
            amount = %expense.amount,
            currency = %expense.currency,
            "Expense submitted"
        );
        Ok(expense)
    }

    /// Previews a conversion without storing anything.
    pub async fn preview_conversion(
        &self,
        amount: Decimal,
        base: &CurrencyCode,
        target: &CurrencyCode,
    ) -> Conversion {
        self.conversions.convert(amount, base, target).await
    }

    /// Every expense, newest first.
    pub async fn list_expenses(&self) -> Result<Vec<Expense>, ExpenseError> {
        Ok(self.ledger.newest_first().await?)
    }

    /// Expenses waiting for a decision.
    ///
    /// Lists every pending expense unless company scoping is enabled, in
    /// which case only expenses submitted by members of the session's
    /// company are returned.
    pub async fn list_pending_approvals(
        &self,
        session: &Session,
    ) -> Result<Vec<Expense>, ExpenseError> {
        let pending = self.ledger.pending().await?;
        if !self.config.company_scoped_approvals {
            return Ok(pending);
        }

        let Some(company) = session.company_name() else {
            return Ok(Vec::new());
        };
        let members = self.directory.emails_in_company(company).await?;
        Ok(pending
            .into_iter()
            .filter(|e| members.contains(&e.employee))
            .collect())
    }

    /// Applies `decision` to every expense carrying `reference`.
    ///
    /// Returns how many records matched; an unknown reference matches none.
    pub async fn decide_expense(
        &self,
        reference: &str,
        decision: Decision,
    ) -> Result<usize, ExpenseError> {
        let to = ExpenseState::from(decision);
        let matched = self
            .ledger
            .set_state(reference, to, self.config.strict_transitions)
            .await?;

        info!(reference, state = %to, matched, "Expense decided");
        Ok(matched)
    }
}
