//! Checkout widget seam.

/// Sets the currency of the checkout widget's session.
///
/// Receives the uppercase ISO code.
pub trait SessionCurrencySetter {
    /// Switches the checkout session to `code`.
    fn set_currency(&mut self, code: &str);
}

/// Used when no checkout widget is present on the page.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSessionCurrency;

impl SessionCurrencySetter for NoopSessionCurrency {
    fn set_currency(&mut self, _code: &str) {}
}
