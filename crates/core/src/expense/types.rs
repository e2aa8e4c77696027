//! Expense domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use spendflow_shared::CurrencyCode;
use spendflow_shared::types::money::to_money_scale;
use std::fmt;

use super::error::ExpenseError;

/// Approval state of an expense.
///
/// Expenses start `Pending`. The intended edges are `Pending -> Approved`
/// and `Pending -> Rejected`; see [`ExpenseState::can_transition_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseState {
    /// Waiting for a decision.
    Pending,
    /// Approved by a reviewer.
    Approved,
    /// Rejected by a reviewer.
    Rejected,
}

impl ExpenseState {
    /// Returns the string representation of the state.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Returns true if the edge is allowed under strict transitions.
    #[must_use]
    pub fn can_transition_to(&self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::Pending, Self::Approved | Self::Rejected)
        )
    }
}

impl fmt::Display for ExpenseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A reviewer's verdict on an expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    /// Move to `approved`.
    Approved,
    /// Move to `rejected`.
    Rejected,
}

impl From<Decision> for ExpenseState {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Approved => Self::Approved,
            Decision::Rejected => Self::Rejected,
        }
    }
}

/// Date of a stored expense.
///
/// Records written by older clients may hold an empty or free-form date.
/// Those are kept verbatim so the collection stays readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExpenseDate {
    /// A calendar date, `YYYY-MM-DD`.
    Day(NaiveDate),
    /// Anything else, as stored.
    Unparsed(String),
}

impl Default for ExpenseDate {
    fn default() -> Self {
        Self::Unparsed(String::new())
    }
}

impl From<NaiveDate> for ExpenseDate {
    fn from(date: NaiveDate) -> Self {
        Self::Day(date)
    }
}

/// A stored expense record.
///
/// Field names match the persisted JSON layout (`ref`, `desc`,
/// `companyAmount`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// `EXP/NNNN`. Not guaranteed unique.
    #[serde(rename = "ref")]
    pub reference: String,
    /// Date the expense was incurred.
    #[serde(default)]
    pub date: ExpenseDate,
    /// Amount in `currency`, two decimal places.
    pub amount: Decimal,
    /// Currency the expense was paid in.
    pub currency: CurrencyCode,
    /// Amount in the company currency, `None` when conversion failed.
    pub company_amount: Option<Decimal>,
    /// Expense category.
    #[serde(default)]
    pub category: String,
    /// Free-form description.
    #[serde(rename = "desc", default)]
    pub description: String,
    /// Email of the submitting user.
    pub employee: String,
    /// Approval state.
    pub state: ExpenseState,
}

/// Raw submission input.
#[derive(Debug, Clone, Deserialize)]
pub struct NewExpense {
    /// Amount as entered.
    pub amount: Decimal,
    /// Currency code as entered; trimmed and upper-cased on validation.
    pub currency: String,
    /// Date the expense was incurred.
    pub date: NaiveDate,
    /// Expense category.
    #[serde(default)]
    pub category: String,
    /// Free-form description.
    #[serde(default, alias = "desc")]
    pub description: String,
}

/// Submission input that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedExpense {
    /// Amount as entered, full precision.
    pub amount: Decimal,
    /// Normalised currency code.
    pub currency: CurrencyCode,
    /// Date the expense was incurred.
    pub date: NaiveDate,
    /// Trimmed category.
    pub category: String,
    /// Description as entered.
    pub description: String,
}

impl NewExpense {
    /// Validates the input.
    ///
    /// The amount must still be positive once rounded to two decimal places.
    pub fn validate(self) -> Result<ValidatedExpense, ExpenseError> {
        if to_money_scale(self.amount) <= Decimal::ZERO {
            return Err(ExpenseError::Validation(format!(
                "amount must be positive, got {}",
                self.amount
            )));
        }

        let currency = CurrencyCode::parse(&self.currency)
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        Ok(ValidatedExpense {
            amount: self.amount,
            currency,
            date: self.date,
            category: self.category.trim().to_string(),
            description: self.description,
        })
    }
}
