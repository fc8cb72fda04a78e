//! Per-page pricing state.

use rust_decimal::Decimal;

use pricewise_shared::Currency;

use crate::currency::{PriceFormatter, RateTable};

/// Base price, rate table and active currency for one page.
#[derive(Debug, Clone)]
pub struct PricingSession {
    base_price: Decimal,
    rates: RateTable,
    currency: Currency,
}

impl PricingSession {
    /// Starts a session on identity rates in the base currency.
    #[must_use]
    pub fn new(base_price: Decimal) -> Self {
        Self {
            base_price,
            rates: RateTable::identity(),
            currency: Currency::BASE,
        }
    }

    /// Replaces the rate table.
    #[must_use]
    pub fn with_rates(mut self, rates: RateTable) -> Self {
        self.rates = rates;
        self
    }

    /// Base price in the base currency.
    #[must_use]
    pub const fn base_price(&self) -> Decimal {
        self.base_price
    }

    /// Active currency.
    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.currency
    }

    /// Switches the active currency.
    pub fn set_currency(&mut self, currency: Currency) {
        self.currency = currency;
    }

    /// Current rate table.
    #[must_use]
    pub const fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Mutable rate table, for refreshing.
    pub fn rates_mut(&mut self) -> &mut RateTable {
        &mut self.rates
    }

    /// Formatter bound to this session's price and rates.
    #[must_use]
    pub const fn formatter(&self) -> PriceFormatter<'_> {
        PriceFormatter::new(self.base_price, &self.rates)
    }
}
