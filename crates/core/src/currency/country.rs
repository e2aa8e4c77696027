//! Country directory lookups: default currency per country and the
//! sorted country list used to populate choice lists.

use std::sync::Arc;

use async_trait::async_trait;
use spendflow_shared::CurrencyCode;
use tracing::{debug, warn};

use super::error::ServiceError;

/// Sentinel list returned when the directory cannot be fetched.
pub const COUNTRIES_UNAVAILABLE: &str = "Unable to load";

/// One entry of the external country directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryRecord {
    /// Common (short) name, e.g. "India".
    pub common_name: String,
    /// Currency codes in the order the directory listed them.
    pub currency_codes: Vec<String>,
}

impl CountryRecord {
    /// Creates a record.
    pub fn new<I, S>(common_name: impl Into<String>, currency_codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            common_name: common_name.into(),
            currency_codes: currency_codes.into_iter().map(Into::into).collect(),
        }
    }
}

/// Port for the external country directory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CountryDirectory: Send + Sync {
    /// Fetches every country in service order.
    async fn fetch_countries(&self) -> Result<Vec<CountryRecord>, ServiceError>;
}

/// Resolves countries to currencies.
pub struct CurrencyLookup {
    directory: Arc<dyn CountryDirectory>,
}

impl CurrencyLookup {
    /// Creates a lookup over `directory`.
    pub fn new(directory: Arc<dyn CountryDirectory>) -> Self {
        Self { directory }
    }

    /// Resolves a country name fragment to its first currency code.
    ///
    /// Matching is a case-insensitive substring test against the common
    /// name, first match in service order. Falls back to `USD` when nothing
    /// matches, the match lists no currencies, or the directory is
    /// unreachable.
    pub async fn resolve_currency(&self, fragment: &str) -> CurrencyCode {
        let countries = match self.directory.fetch_countries().await {
            Ok(countries) => countries,
            Err(e) => {
                warn!(
                    service = e.service(),
                    error = %e,
                    fragment,
                    "Country directory unavailable, defaulting currency"
                );
                return CurrencyCode::fallback();
            }
        };

        let needle = fragment.to_lowercase();
        let resolved = countries
            .iter()
            .find(|c| c.common_name.to_lowercase().contains(&needle))
            .and_then(|c| c.currency_codes.first())
            .and_then(|code| CurrencyCode::parse(code).ok())
            .unwrap_or_else(CurrencyCode::fallback);

        debug!(fragment, currency = %resolved, "Resolved country currency");
        resolved
    }

    /// Lists country common names sorted ascending.
    ///
    /// Returns `["Unable to load"]` when the directory is unreachable.
    pub async fn list_countries(&self) -> Vec<String> {
        match self.directory.fetch_countries().await {
            Ok(countries) => {
                let mut names: Vec<String> =
                    countries.into_iter().map(|c| c.common_name).collect();
                names.sort();
                names
            }
            Err(e) => {
                warn!(service = e.service(), error = %e, "Country directory unavailable");
                vec![COUNTRIES_UNAVAILABLE.to_string()]
            }
        }
    }
}
