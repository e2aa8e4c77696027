//! REST Countries client.

use async_trait::async_trait;
use serde::Deserialize;
use spendflow_core::currency::{CountryDirectory, CountryRecord, ServiceError};

use crate::client::get_json;

const SERVICE: &str = "countries";

#[derive(Debug, Default, Deserialize)]
struct CountryName {
    #[serde(default)]
    common: String,
}

#[derive(Debug, Deserialize)]
struct CountryDto {
    #[serde(default)]
    name: CountryName,
    #[serde(default)]
    currencies: Option<serde_json::Map<String, serde_json::Value>>,
}

impl From<CountryDto> for CountryRecord {
    fn from(dto: CountryDto) -> Self {
        Self::new(
            dto.name.common,
            dto.currencies.unwrap_or_default().into_iter().map(|(code, _)| code),
        )
    }
}

/// Country directory backed by `restcountries.com`.
#[derive(Debug, Clone)]
pub struct RestCountriesClient {
    http: reqwest::Client,
    url: String,
}

impl RestCountriesClient {
    /// Creates a client that fetches the full directory from `url`.
    #[must_use]
    pub fn new(http: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }
}

#[async_trait]
impl CountryDirectory for RestCountriesClient {
    async fn fetch_countries(&self) -> Result<Vec<CountryRecord>, ServiceError> {
        let countries: Vec<CountryDto> = get_json(&self.http, SERVICE, &self.url).await?;
        Ok(countries.into_iter().map(CountryRecord::from).collect())
    }
}
