//! Multi-currency handling: country currency lookup and exchange rates.

pub mod country;
pub mod error;
pub mod exchange;
pub mod service;

#[cfg(test)]
mod props;

pub use country::{COUNTRIES_UNAVAILABLE, CountryDirectory, CountryRecord, CurrencyLookup};
pub use error::ServiceError;
pub use exchange::{RateProvider, RateTable};
pub use service::{Conversion, ConversionService, ConversionUnavailable};
