//! Price conversion and display formatting.
//!
//! Layout is fixed: symbol immediately followed by the amount with two
//! decimals, no space and no thousands grouping, for every currency.

use rust_decimal::Decimal;

use pricewise_shared::Currency;

use super::conversion::{PRICE_DECIMALS, convert_amount, round_price};
use super::rates::RateTable;

static SYMBOLS: [(Currency, &str); 11] = [
    (Currency::Aed, "د.إ"),
    (Currency::Aud, "$"),
    (Currency::Usd, "$"),
    (Currency::Eur, "€"),
    (Currency::Gbp, "£"),
    (Currency::Inr, "₹"),
    (Currency::Cad, "C$"),
    (Currency::Sgd, "S$"),
    (Currency::Sar, "﷼"),
    (Currency::Chf, "CHF"),
    (Currency::Jpy, "¥"),
];

/// Number of items being priced. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Quantity(u32);

impl Quantity {
    /// A single item.
    pub const ONE: Self = Self(1);

    /// Creates a quantity, clamping 0 to 1.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        if value == 0 { Self::ONE } else { Self(value) }
    }

    /// Parses an input field value.
    ///
    /// Anything that is not a whole number of at least 1 (empty, text, zero,
    /// negative, fractional) yields 1.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        input.trim().parse::<u32>().map_or(Self::ONE, Self::new)
    }

    /// The quantity as an integer.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

/// Converts the base price and renders it for display.
#[derive(Debug, Clone, Copy)]
pub struct PriceFormatter<'a> {
    base_price: Decimal,
    rates: &'a RateTable,
}

impl<'a> PriceFormatter<'a> {
    /// Creates a formatter for `base_price` (in the base currency).
    #[must_use]
    pub const fn new(base_price: Decimal, rates: &'a RateTable) -> Self {
        Self { base_price, rates }
    }

    /// Base price converted into `currency`, rounded to two decimals.
    #[must_use]
    pub fn convert(&self, currency: Currency) -> Decimal {
        convert_amount(self.base_price, self.rates.rate_for(currency))
    }

    /// Display symbol for `code`; unknown codes are their own symbol.
    #[must_use]
    pub fn symbol_for(code: &str) -> &str {
        code.parse::<Currency>()
            .ok()
            .and_then(|currency| SYMBOLS.iter().find(|(c, _)| *c == currency))
            .map_or(code, |(_, symbol)| *symbol)
    }

    /// Renders `amount` with the symbol for `code` as a prefix.
    #[must_use]
    pub fn format(amount: Decimal, code: &str) -> String {
        let mut amount = round_price(amount);
        amount.rescale(PRICE_DECIMALS);
        format!("{}{amount}", Self::symbol_for(code))
    }

    /// Formatted unit price in `currency`.
    #[must_use]
    pub fn unit_price(&self, currency: Currency) -> String {
        Self::format(self.convert(currency), currency.code())
    }

    /// Formatted total for `quantity` items in `currency`.
    ///
    /// The unit price is rounded before multiplying, and the total is rounded
    /// again. A total too large for a `Decimal` shows the unit price.
    #[must_use]
    pub fn projected_total(&self, currency: Currency, quantity: Quantity) -> String {
        let unit = self.convert(currency);
        let total = unit
            .checked_mul(Decimal::from(quantity.get()))
            .map_or(unit, round_price);
        Self::format(total, currency.code())
    }

    /// Label for a currency option: `"<code> (<symbol>)"`.
    #[must_use]
    pub fn option_label(currency: Currency) -> String {
        format!("{} ({})", currency.code(), Self::symbol_for(currency.code()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case("", 1)]
    #[case("abc", 1)]
    #[case("0", 1)]
    #[case("-3", 1)]
    #[case("2.5", 1)]
    #[case("5", 5)]
    #[case(" 12 ", 12)]
    fn test_quantity_parse(#[case] input: &str, #[case] expected: u32) {
        assert_eq!(Quantity::parse(input).get(), expected);
    }

    #[test]
    fn test_quantity_new_clamps_zero() {
        assert_eq!(Quantity::new(0), Quantity::ONE);
        assert_eq!(Quantity::default(), Quantity::ONE);
    }

    #[rstest]
    #[case("AUD", "$")]
    #[case("GBP", "£")]
    #[case("EUR", "€")]
    #[case("CHF", "CHF")]
    #[case("eur", "€")]
    #[case("NZD", "NZD")]
    #[case("", "")]
    fn test_symbol_for(#[case] code: &str, #[case] expected: &str) {
        assert_eq!(PriceFormatter::symbol_for(code), expected);
    }

    #[test]
    fn test_every_currency_has_a_symbol() {
        for currency in Currency::ALL {
            assert!(SYMBOLS.iter().any(|(c, _)| *c == currency));
        }
    }

    #[test]
    fn test_identity_conversion_and_format() {
        let rates = RateTable::identity();
        let formatter = PriceFormatter::new(dec!(2.50), &rates);

        assert_eq!(formatter.convert(Currency::Aud), dec!(2.50));
        assert_eq!(PriceFormatter::format(dec!(2.50), "AUD"), "$2.50");
        assert_eq!(formatter.unit_price(Currency::Aud), "$2.50");
    }

    #[test]
    fn test_convert_base_is_exact() {
        let rates = RateTable::from_rates([(Currency::Eur, dec!(0.25))]);
        let formatter = PriceFormatter::new(dec!(2.50), &rates);
        assert_eq!(formatter.convert(Currency::BASE), dec!(2.50));
    }

    #[test]
    fn test_convert_rounds_half_up() {
        let rates = RateTable::from_rates([(Currency::Eur, dec!(0.25))]);
        let formatter = PriceFormatter::new(dec!(2.50), &rates);

        assert_eq!(formatter.convert(Currency::Eur), dec!(0.63));
        assert_eq!(formatter.unit_price(Currency::Eur), "€0.63");
    }

    #[test]
    fn test_format_pads_and_never_groups() {
        assert_eq!(PriceFormatter::format(dec!(3), "GBP"), "£3.00");
        assert_eq!(PriceFormatter::format(dec!(1234567.5), "USD"), "$1234567.50");
        assert_eq!(PriceFormatter::format(dec!(12.345), "CHF"), "CHF12.35");
        assert_eq!(PriceFormatter::format(dec!(9.99), "XYZ"), "XYZ9.99");
    }

    #[test]
    fn test_projected_total_rounds_unit_first() {
        // unit: 2.50 * 0.2723 = 0.68075 -> 0.68; total 0.68 * 3 = 2.04
        let rates = RateTable::from_rates([(Currency::Usd, dec!(0.2723))]);
        let formatter = PriceFormatter::new(dec!(2.50), &rates);

        assert_eq!(
            formatter.projected_total(Currency::Usd, Quantity::new(3)),
            "$2.04"
        );
    }

    #[test]
    fn test_projected_total_for_one_matches_unit_price() {
        let rates = RateTable::from_rates([(Currency::Gbp, dec!(0.2141))]);
        let formatter = PriceFormatter::new(dec!(2.50), &rates);

        for currency in Currency::ALL {
            assert_eq!(
                formatter.projected_total(currency, Quantity::ONE),
                PriceFormatter::format(formatter.convert(currency), currency.code())
            );
        }
    }

    #[test]
    fn test_oversized_values_do_not_panic() {
        let rates = RateTable::from_rates([(Currency::Eur, Decimal::MAX)]);
        let formatter = PriceFormatter::new(dec!(2.50), &rates);
        assert_eq!(formatter.unit_price(Currency::Eur), "€2.50");

        let identity = RateTable::identity();
        let formatter = PriceFormatter::new(Decimal::MAX, &identity);
        let total = formatter.projected_total(Currency::Usd, Quantity::new(u32::MAX));
        assert_eq!(total, formatter.unit_price(Currency::Usd));
    }

    #[test]
    fn test_option_label() {
        assert_eq!(PriceFormatter::option_label(Currency::Gbp), "GBP (£)");
        assert_eq!(PriceFormatter::option_label(Currency::Chf), "CHF (CHF)");
    }
}
