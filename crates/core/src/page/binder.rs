//! Keeps page elements and the checkout session in sync with the active currency.

use std::sync::Arc;

use tracing::{debug, info};

use pricewise_shared::{Currency, PageSelectors};

use super::checkout::SessionCurrencySetter;
use super::document::Document;
use super::session::PricingSession;
use crate::currency::conversion::PRICE_DECIMALS;
use crate::currency::preference::save_preference;
use crate::currency::{
    CurrencyResolver, GeoLocator, PreferenceStore, PriceFormatter, Quantity, RateSource,
};

/// Binds prices on one page.
///
/// Missing elements are skipped; none of the binder's operations can fail.
pub struct PageBinder<D, C> {
    document: D,
    checkout: C,
    preferences: Arc<dyn PreferenceStore>,
    resolver: CurrencyResolver,
    selectors: PageSelectors,
    session: PricingSession,
}

impl<D: Document, C: SessionCurrencySetter> PageBinder<D, C> {
    /// Creates a binder with the full country table and default selectors.
    pub fn new(
        document: D,
        checkout: C,
        preferences: Arc<dyn PreferenceStore>,
        session: PricingSession,
    ) -> Self {
        Self {
            document,
            checkout,
            preferences,
            resolver: CurrencyResolver::default(),
            selectors: PageSelectors::default(),
            session,
        }
    }

    /// Uses `resolver` for the initial load.
    #[must_use]
    pub fn with_resolver(mut self, resolver: CurrencyResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Uses `selectors` to find page elements.
    #[must_use]
    pub fn with_selectors(mut self, selectors: PageSelectors) -> Self {
        self.selectors = selectors;
        self
    }

    /// Initial page load: fetch rates, resolve the currency, fill the
    /// currency select and write every price.
    pub async fn load(&mut self, rates: &dyn RateSource, locator: &dyn GeoLocator) -> Currency {
        let outcome = self.session.rates_mut().refresh(rates).await;
        let currency = self
            .resolver
            .resolve(self.preferences.as_ref(), locator)
            .await;

        self.populate_currency_options();
        self.apply(currency);

        info!(currency = %currency, rates = ?outcome, "Bound page prices");
        currency
    }

    /// Change handler for the currency select.
    ///
    /// Unsupported values fall back to the base currency. Rates are not
    /// refetched and resolution is not rerun.
    pub fn select_currency(&mut self, value: &str) -> Currency {
        let currency = Currency::parse_or_base(value);
        save_preference(self.preferences.as_ref(), currency);
        self.apply(currency);

        debug!(selected = %value, currency = %currency, "Currency changed");
        currency
    }

    /// Input handler for the quantity field: rewrites the projected total.
    pub fn quantity_changed(&mut self) {
        self.write_projected_total(self.session.currency());
    }

    /// Writes every price for `currency` and switches the checkout session.
    pub fn apply(&mut self, currency: Currency) {
        self.session.set_currency(currency);

        let formatter = self.session.formatter();
        let unit_price = formatter.unit_price(currency);
        let mut unit_amount = formatter.convert(currency);
        unit_amount.rescale(PRICE_DECIMALS);
        let unit_amount = unit_amount.to_string();

        for element in self.document.elements_by_class(&self.selectors.price_display) {
            self.document.set_text(element, &unit_price);
        }
        for element in self.document.elements_by_class(&self.selectors.currency_label) {
            self.document.set_text(element, currency.code());
        }
        for element in self.document.elements_by_class(&self.selectors.add_to_cart) {
            self.document
                .set_attribute(element, &self.selectors.price_attribute, &unit_amount);
        }

        self.write_projected_total(currency);
        self.checkout.set_currency(currency.code());

        if let Some(select) = self.document.element_by_id(&self.selectors.currency_select) {
            self.document.set_value(select, currency.code());
        }
    }

    /// Fills the currency select once, one option per supported currency.
    fn populate_currency_options(&mut self) {
        let Some(select) = self.document.element_by_id(&self.selectors.currency_select) else {
            return;
        };
        if self.document.option_count(select) > 0 {
            return;
        }
        for currency in Currency::ALL {
            self.document.append_option(
                select,
                currency.code(),
                &PriceFormatter::option_label(currency),
            );
        }
    }

    fn write_projected_total(&mut self, currency: Currency) {
        let Some(projected) = self.document.element_by_id(&self.selectors.projected_total) else {
            return;
        };
        let quantity = self.quantity();
        let total = self.session.formatter().projected_total(currency, quantity);
        self.document.set_text(projected, &total);
    }

    fn quantity(&self) -> Quantity {
        self.document
            .element_by_id(&self.selectors.quantity_input)
            .and_then(|input| self.document.value(input))
            .map_or(Quantity::ONE, |raw| Quantity::parse(&raw))
    }

    /// The bound document.
    pub const fn document(&self) -> &D {
        &self.document
    }

    /// Mutable access to the document, e.g. to simulate user input.
    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    /// The checkout session setter.
    pub const fn checkout(&self) -> &C {
        &self.checkout
    }

    /// Pricing state.
    pub const fn session(&self) -> &PricingSession {
        &self.session
    }
}
