//! Exchange rate tables and the port that fetches them.

use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use spendflow_shared::CurrencyCode;

use super::error::ServiceError;

/// Rates for one base currency, keyed by target code.
///
/// `1 base = rate target`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateTable {
    rates: HashMap<String, Decimal>,
}

impl RateTable {
    /// Creates a table from `(target code, rate)` pairs.
    pub fn new<I, K>(rates: I) -> Self
    where
        I: IntoIterator<Item = (K, Decimal)>,
        K: Into<String>,
    {
        Self {
            rates: rates
                .into_iter()
                .map(|(code, rate)| (code.into().to_uppercase(), rate))
                .collect(),
        }
    }

    /// Returns the rate to `target`.
    ///
    /// Zero and negative rates count as missing.
    #[must_use]
    pub fn rate_for(&self, target: &CurrencyCode) -> Option<Decimal> {
        self.rates
            .get(target.as_str())
            .copied()
            .filter(|rate| *rate > Decimal::ZERO)
    }
}

/// Port for the external exchange rate service.
///
/// Every call fetches fresh rates; implementations must not cache.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetches the current rates for `base`.
    async fn latest_rates(&self, base: &CurrencyCode) -> Result<RateTable, ServiceError>;
}
