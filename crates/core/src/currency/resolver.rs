//! Active currency resolution.
//!
//! Precedence: stored preference, then geo-IP lookup through a country table,
//! then the base currency. Resolution always yields a supported currency.

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use pricewise_shared::{CountryTable, Currency};

use super::error::LookupError;
use super::preference::{PreferenceStore, load_preference, save_preference};

/// Result of a geo-IP lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoLocation {
    /// ISO 3166-1 alpha-2 country code.
    pub country_code: String,
    /// Currency the service associates with the country, if reported.
    pub currency: Option<String>,
}

/// A service that locates the current visitor.
#[async_trait]
pub trait GeoLocator: Send + Sync {
    /// Looks up the visitor's location.
    async fn locate(&self) -> Result<GeoLocation, LookupError>;
}

const EURO_COUNTRIES: [&str; 20] = [
    "AT", "BE", "CY", "DE", "EE", "ES", "FI", "FR", "GR", "HR", "IE", "IT", "LT", "LU", "LV", "MT",
    "NL", "PT", "SI", "SK",
];

/// Total mapping from country code to currency.
///
/// Countries without an entry map to the base currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryCurrencyMap {
    entries: HashMap<String, Currency>,
}

impl CountryCurrencyMap {
    /// Map with no entries: every country resolves to the base currency.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Only AUD is distinguished; everything else is the base currency.
    #[must_use]
    pub fn simple() -> Self {
        Self::empty().with_entry("AU", Currency::Aud)
    }

    /// Table covering every supported currency.
    #[must_use]
    pub fn full() -> Self {
        let mut map = Self::empty()
            .with_entry("AE", Currency::Aed)
            .with_entry("AU", Currency::Aud)
            .with_entry("US", Currency::Usd)
            .with_entry("GB", Currency::Gbp)
            .with_entry("IN", Currency::Inr)
            .with_entry("CA", Currency::Cad)
            .with_entry("SG", Currency::Sgd)
            .with_entry("SA", Currency::Sar)
            .with_entry("CH", Currency::Chf)
            .with_entry("LI", Currency::Chf)
            .with_entry("JP", Currency::Jpy);
        for country in EURO_COUNTRIES {
            map = map.with_entry(country, Currency::Eur);
        }
        map
    }

    /// Map selected by configuration.
    #[must_use]
    pub fn from_table(table: CountryTable) -> Self {
        match table {
            CountryTable::Full => Self::full(),
            CountryTable::Simple => Self::simple(),
        }
    }

    /// Adds or replaces the currency for `country`.
    #[must_use]
    pub fn with_entry(mut self, country: &str, currency: Currency) -> Self {
        self.entries.insert(country.trim().to_uppercase(), currency);
        self
    }

    /// Currency for `country`, or the base currency when unmapped.
    #[must_use]
    pub fn currency_for(&self, country: &str) -> Currency {
        self.entries
            .get(&country.trim().to_uppercase())
            .copied()
            .unwrap_or(Currency::BASE)
    }

    /// Currency for a geo lookup result.
    ///
    /// A mapped country decides. Otherwise the currency reported by the
    /// service is used when this table can produce it, so territories that
    /// share a mapped currency resolve the same way as its home country.
    #[must_use]
    pub fn currency_for_location(&self, location: &GeoLocation) -> Currency {
        if let Some(currency) = self.entries.get(&location.country_code.trim().to_uppercase()) {
            return *currency;
        }
        location
            .currency
            .as_deref()
            .and_then(|code| code.parse::<Currency>().ok())
            .filter(|reported| self.entries.values().any(|c| c == reported))
            .unwrap_or(Currency::BASE)
    }

    /// Number of mapped countries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no country is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Determines the currency for the current session.
#[derive(Debug, Clone)]
pub struct CurrencyResolver {
    countries: CountryCurrencyMap,
}

impl CurrencyResolver {
    /// Creates a resolver using the given country table.
    #[must_use]
    pub const fn new(countries: CountryCurrencyMap) -> Self {
        Self { countries }
    }

    /// Country table in use.
    #[must_use]
    pub const fn countries(&self) -> &CountryCurrencyMap {
        &self.countries
    }

    /// Resolves the active currency.
    ///
    /// A stored preference wins without any network call. Otherwise the
    /// locator is consulted once and the outcome (or the base currency on
    /// failure) is persisted.
    pub async fn resolve(
        &self,
        preferences: &dyn PreferenceStore,
        locator: &dyn GeoLocator,
    ) -> Currency {
        if let Some(stored) = load_preference(preferences) {
            return match stored.parse::<Currency>() {
                Ok(currency) => {
                    debug!(currency = %currency, "Using stored currency preference");
                    currency
                }
                Err(_) => {
                    warn!(
                        stored = %stored,
                        "Stored preference is not supported, using base currency"
                    );
                    save_preference(preferences, Currency::BASE);
                    Currency::BASE
                }
            };
        }

        let currency = match locator.locate().await {
            Ok(location) => {
                let currency = self.countries.currency_for_location(&location);
                info!(
                    country = %location.country_code,
                    currency = %currency,
                    "Resolved currency from geo lookup"
                );
                currency
            }
            Err(err) => {
                warn!(error = %err, "Geo lookup failed, using base currency");
                Currency::BASE
            }
        };

        save_preference(preferences, currency);
        currency
    }
}

impl Default for CurrencyResolver {
    fn default() -> Self {
        Self::new(CountryCurrencyMap::full())
    }
}
