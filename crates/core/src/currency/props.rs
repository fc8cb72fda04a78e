//! Property-based tests for rates and price formatting.

use proptest::prelude::*;
use rust_decimal::Decimal;

use pricewise_shared::Currency;

use super::formatter::{PriceFormatter, Quantity};
use super::rates::RateTable;
use super::resolver::CountryCurrencyMap;

/// Strategy to generate base prices (0.01 to 1,000,000.00).
fn base_price() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate positive rates (0.0001 to 10000.0000).
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

fn any_currency() -> impl Strategy<Value = Currency> {
    prop::sample::select(Currency::ALL.to_vec())
}

/// Strategy to generate a rate table with a random subset of currencies.
fn rate_table() -> impl Strategy<Value = RateTable> {
    prop::collection::vec((any_currency(), positive_rate()), 0..12).prop_map(RateTable::from_rates)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every rate in a table is positive and the base is always 1.
    #[test]
    fn prop_table_rates_positive_base_one(table in rate_table()) {
        prop_assert_eq!(table.rate_for(Currency::BASE), Decimal::ONE);
        for (_, rate) in table.iter() {
            prop_assert!(rate > Decimal::ZERO);
        }
    }

    /// Conversion into the base currency returns the base price unchanged.
    #[test]
    fn prop_convert_base_is_identity(price in base_price(), table in rate_table()) {
        let formatter = PriceFormatter::new(price, &table);
        prop_assert_eq!(formatter.convert(Currency::BASE), price);
    }

    /// Converted amounts never carry more than two decimals.
    #[test]
    fn prop_convert_has_two_decimals(
        price in base_price(),
        table in rate_table(),
        currency in any_currency(),
    ) {
        let converted = PriceFormatter::new(price, &table).convert(currency);
        let scaled = converted * Decimal::from(100);
        prop_assert_eq!(scaled, scaled.round());
    }

    /// Formatted output is symbol + digits + '.' + two digits, nothing else.
    #[test]
    fn prop_format_layout(
        price in base_price(),
        table in rate_table(),
        currency in any_currency(),
    ) {
        let formatter = PriceFormatter::new(price, &table);
        let text = formatter.unit_price(currency);
        let symbol = PriceFormatter::symbol_for(currency.code());

        prop_assert!(text.starts_with(symbol));
        let number = &text[symbol.len()..];
        prop_assert!(!number.contains(' '));
        prop_assert!(!number.contains(','));
        let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
        prop_assert!(whole.chars().all(|c| c.is_ascii_digit()));
        prop_assert_eq!(fraction.len(), 2);
    }

    /// A single item's projected total equals the unit price.
    #[test]
    fn prop_projected_total_of_one_is_unit_price(
        price in base_price(),
        table in rate_table(),
        currency in any_currency(),
    ) {
        let formatter = PriceFormatter::new(price, &table);
        prop_assert_eq!(
            formatter.projected_total(currency, Quantity::ONE),
            formatter.unit_price(currency)
        );
    }

    /// Parsed quantities are never below 1.
    #[test]
    fn prop_quantity_at_least_one(input in ".{0,12}") {
        prop_assert!(Quantity::parse(&input).get() >= 1);
    }

    /// Both country tables are total.
    #[test]
    fn prop_country_tables_total(country in "[A-Z]{0,3}") {
        let full = CountryCurrencyMap::full().currency_for(&country);
        let simple = CountryCurrencyMap::simple().currency_for(&country);
        prop_assert!(Currency::ALL.contains(&full));
        prop_assert!(Currency::ALL.contains(&simple));
    }
}
