//! Currency resolution, exchange rates and price formatting.

pub mod conversion;
pub mod error;
pub mod formatter;
pub mod preference;
pub mod rates;
pub mod resolver;

#[cfg(test)]
mod props;

pub use conversion::{convert_amount, round_price};
pub use error::{LookupError, StoreError};
pub use formatter::{PriceFormatter, Quantity};
pub use preference::{MemoryPreferenceStore, PREFERENCE_KEY, PreferenceStore};
pub use rates::{MAX_RATE, RateSnapshot, RateSource, RateTable, RefreshOutcome};
pub use resolver::{CountryCurrencyMap, CurrencyResolver, GeoLocation, GeoLocator};
