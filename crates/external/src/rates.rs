//! ExchangeRate-API client.

use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use spendflow_core::currency::{RateProvider, RateTable, ServiceError};
use spendflow_shared::CurrencyCode;

use crate::client::get_json;

const SERVICE: &str = "exchange-rates";

#[derive(Debug, Deserialize)]
struct LatestRates {
    rates: HashMap<String, Decimal>,
}

/// Rate provider backed by `api.exchangerate-api.com`.
#[derive(Debug, Clone)]
pub struct ExchangeRateApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ExchangeRateApiClient {
    /// Creates a client; the base currency code is appended to `base_url`.
    #[must_use]
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    fn url_for(&self, base: &CurrencyCode) -> String {
        format!("{}{}", self.base_url, base)
    }
}

#[async_trait]
impl RateProvider for ExchangeRateApiClient {
    async fn latest_rates(&self, base: &CurrencyCode) -> Result<RateTable, ServiceError> {
        let latest: LatestRates = get_json(&self.http, SERVICE, &self.url_for(base)).await?;
        Ok(RateTable::new(latest.rates))
    }
}
