//! Core pricing logic for Pricewise.
//!
//! This crate contains pure logic with ZERO HTTP dependencies. External
//! services, storage, the page and the checkout widget are reached through
//! traits implemented elsewhere (or by the in-memory types provided here).
//!
//! # Modules
//!
//! - `currency` - Exchange rates, currency resolution and price formatting
//! - `page` - Binding converted prices into a document and checkout session

pub mod currency;
pub mod page;

pub use currency::{
    CountryCurrencyMap, CurrencyResolver, LookupError, PriceFormatter, Quantity, RateTable,
};
pub use page::{PageBinder, PricingSession};
