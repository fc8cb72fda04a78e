//! Remote collaborators: HTTP lookup services and persistent preference storage.
//!
//! This crate provides:
//! - `ExchangeRateApi` - rate service client implementing `RateSource`
//! - `IpGeoApi` - geo-IP client implementing `GeoLocator`
//! - `FilePreferenceStore` - JSON file implementing `PreferenceStore`

pub mod geo;
pub mod http;
pub mod preference_file;
pub mod rates;

pub use geo::IpGeoApi;
pub use http::build_client;
pub use preference_file::FilePreferenceStore;
pub use rates::ExchangeRateApi;

use pricewise_shared::{AppResult, config::ServicesConfig};

/// Both lookup clients, sharing one HTTP connection pool.
#[derive(Debug, Clone)]
pub struct LookupServices {
    /// Exchange rate service.
    pub rates: ExchangeRateApi,
    /// Geo-IP service.
    pub geo: IpGeoApi,
}

impl LookupServices {
    /// Builds both clients from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &ServicesConfig) -> AppResult<Self> {
        let client = build_client(config)?;
        Ok(Self {
            rates: ExchangeRateApi::new(client.clone(), &config.rates_url),
            geo: IpGeoApi::new(client, &config.geo_url),
        })
    }
}
