//! Page binding: writes converted prices into a document and the checkout widget.
//!
//! The binder talks to the page through two seams:
//!
//! - [`Document`] - element lookups by id/class and text/value/attribute writes
//! - [`SessionCurrencySetter`] - the checkout widget's session currency
//!
//! ```text
//! load:    RateTable::refresh -> CurrencyResolver::resolve -> populate select -> apply
//! change:  persist preference -> apply
//! ```

mod binder;
mod checkout;
mod document;
mod session;

pub use binder::PageBinder;
pub use checkout::{NoopSessionCurrency, SessionCurrencySetter};
pub use document::{Document, Element, ElementRef, MemoryDocument, SelectOption};
pub use session::PricingSession;
