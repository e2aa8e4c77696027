//! Currency conversion against the live exchange rate service.
//!
//! Conversions round half away from zero to two decimal places. A failed
//! or incomplete rate lookup never raises: it yields
//! [`Conversion::Unavailable`] and the caller decides what to show.

use std::sync::Arc;

use rust_decimal::Decimal;
use spendflow_shared::CurrencyCode;
use spendflow_shared::types::money::convert_to_money_scale;
use tracing::warn;

use super::error::ServiceError;
use super::exchange::RateProvider;

/// Why a conversion could not be computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionUnavailable {
    /// The rate service could not be reached or answered garbage.
    ServiceUnavailable(ServiceError),
    /// The rate service answered but had no usable rate for the target.
    RateNotFound {
        /// Base currency that was queried.
        base: CurrencyCode,
        /// Target currency that was missing.
        target: CurrencyCode,
    },
    /// `amount * rate` does not fit in a `Decimal`.
    OutOfRange {
        /// Amount that was converted.
        amount: Decimal,
        /// Rate that was applied.
        rate: Decimal,
    },
}

impl ConversionUnavailable {
    /// Short user-facing message.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::ServiceUnavailable(_) | Self::OutOfRange { .. } => "Conversion failed",
            Self::RateNotFound { .. } => "Rate not found",
        }
    }
}

/// Outcome of converting an amount between two currencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conversion {
    /// The converted amount and the raw rate applied.
    Available {
        /// `amount * rate`, two decimal places.
        converted: Decimal,
        /// Rate as returned by the service.
        rate: Decimal,
    },
    /// No conversion could be computed.
    Unavailable(ConversionUnavailable),
}

impl Conversion {
    /// The converted amount, if available.
    #[must_use]
    pub const fn converted(&self) -> Option<Decimal> {
        match self {
            Self::Available { converted, .. } => Some(*converted),
            Self::Unavailable(_) => None,
        }
    }
}

/// Converts amounts using freshly fetched rates.
pub struct ConversionService {
    rates: Arc<dyn RateProvider>,
}

impl ConversionService {
    /// Creates a service over `rates`.
    pub fn new(rates: Arc<dyn RateProvider>) -> Self {
        Self { rates }
    }

    /// Converts `amount` from `base` to `target`.
    ///
    /// Always calls the rate service, even when `base == target`.
    pub async fn convert(
        &self,
        amount: Decimal,
        base: &CurrencyCode,
        target: &CurrencyCode,
    ) -> Conversion {
        let table = match self.rates.latest_rates(base).await {
            Ok(table) => table,
            Err(e) => {
                warn!(
                    service = e.service(),
                    error = %e,
                    %base,
                    %target,
                    "Exchange rate lookup failed"
                );
                return Conversion::Unavailable(ConversionUnavailable::ServiceUnavailable(e));
            }
        };

        let Some(rate) = table.rate_for(target) else {
            warn!(%base, %target, "Exchange rate missing from response");
            return Conversion::Unavailable(ConversionUnavailable::RateNotFound {
                base: base.clone(),
                target: target.clone(),
            });
        };

        match convert_to_money_scale(amount, rate) {
            Some(converted) => Conversion::Available { converted, rate },
            None => {
                warn!(%amount, %rate, %base, %target, "Converted amount out of range");
                Conversion::Unavailable(ConversionUnavailable::OutOfRange { amount, rate })
            }
        }
    }
}
