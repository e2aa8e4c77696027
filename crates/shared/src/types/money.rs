//! Currency codes and two-decimal money rounding.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts wrap `rust_decimal::Decimal` and are stored with exactly two
//! decimal places.

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of decimal places every stored amount carries.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Currency code used whenever none can be determined.
pub const DEFAULT_CURRENCY: &str = "USD";

/// An ISO-4217-like currency code ("USD", "EUR", "INR").
///
/// Codes are trimmed and upper-cased on construction. The set is open:
/// whatever the country directory or rate service reports is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

/// Error returned when a currency code cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CurrencyCodeError {
    /// The code was empty after trimming.
    #[error("currency code is required")]
    Empty,
    /// The code contained something other than ASCII letters or digits.
    #[error("invalid currency code '{0}'")]
    Invalid(String),
}

impl CurrencyCode {
    /// Parses and normalises a currency code.
    pub fn parse(raw: &str) -> Result<Self, CurrencyCodeError> {
        let code = raw.trim().to_uppercase();
        if code.is_empty() {
            return Err(CurrencyCodeError::Empty);
        }
        if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CurrencyCodeError::Invalid(raw.to_string()));
        }
        Ok(Self(code))
    }

    /// The fallback code, `USD`.
    #[must_use]
    pub fn fallback() -> Self {
        Self(DEFAULT_CURRENCY.to_string())
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = CurrencyCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Rounds to two decimal places, half away from zero, and fixes the scale
/// at exactly two so `100` renders as `100.00`.
#[must_use]
pub fn to_money_scale(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_DECIMAL_PLACES);
    rounded
}

/// Converts `amount` with `rate` and rounds the product to money scale.
///
/// Returns `None` when the product does not fit in a `Decimal`.
#[must_use]
pub fn convert_to_money_scale(amount: Decimal, rate: Decimal) -> Option<Decimal> {
    amount.checked_mul(rate).map(to_money_scale)
}
