//! HTTP adapters for the external lookup services.
//!
//! - [`RestCountriesClient`] implements the country directory port
//! - [`ExchangeRateApiClient`] implements the exchange rate port
//!
//! Neither client retries or caches; every call is a fresh GET with the
//! configured timeout.

pub mod client;
pub mod countries;
pub mod rates;

pub use client::{ClientSetupError, build_http_client};
pub use countries::RestCountriesClient;
pub use rates::ExchangeRateApiClient;
