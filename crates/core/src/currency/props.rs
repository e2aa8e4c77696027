//! Property-based tests for currency conversion.

use proptest::prelude::*;
use rust_decimal::Decimal;
use spendflow_shared::types::money::{MONEY_DECIMAL_PLACES, convert_to_money_scale};
use spendflow_shared::CurrencyCode;

use super::exchange::RateTable;

/// Strategy to generate positive decimal amounts (0.01 to 1,000,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate positive exchange rates (0.0001 to 10000.0000).
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Converted amounts always carry exactly two decimal places.
    #[test]
    fn prop_converted_scale_is_two(
        amount in positive_amount(),
        rate in positive_rate(),
    ) {
        let result = convert_to_money_scale(amount, rate).unwrap();
        prop_assert_eq!(result.scale(), MONEY_DECIMAL_PLACES);
    }

    /// The rounding error never exceeds half a cent.
    #[test]
    fn prop_rounding_error_bounded(
        amount in positive_amount(),
        rate in positive_rate(),
    ) {
        let exact = amount * rate;
        let rounded = convert_to_money_scale(amount, rate).unwrap();
        prop_assert!((exact - rounded).abs() <= Decimal::new(5, 3));
    }

    /// A unit rate returns the amount unchanged.
    #[test]
    fn prop_unit_rate_preserves_amount(amount in positive_amount()) {
        prop_assert_eq!(convert_to_money_scale(amount, Decimal::ONE), Some(amount));
    }

    /// Every positive rate in a table is retrievable by its code.
    #[test]
    fn prop_rate_table_lookup(code in "[A-Z]{3}", rate in positive_rate()) {
        let table = RateTable::new([(code.clone(), rate)]);
        let target = CurrencyCode::parse(&code).unwrap();
        prop_assert_eq!(table.rate_for(&target), Some(rate));
    }
}
