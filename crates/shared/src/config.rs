//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
///
/// Every section has defaults, so an empty environment loads a working
/// configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Pricing configuration.
    #[serde(default)]
    pub pricing: PricingConfig,
    /// External lookup services.
    #[serde(default)]
    pub services: ServicesConfig,
    /// Currency resolution configuration.
    #[serde(default)]
    pub resolver: ResolverConfig,
    /// Preference storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Page element selectors.
    #[serde(default)]
    pub page: PageSelectors,
}

/// Pricing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PricingConfig {
    /// Canonical unit price in the base currency.
    #[serde(default = "default_base_price")]
    pub base_price: Decimal,
}

fn default_base_price() -> Decimal {
    Decimal::new(250, 2)
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            base_price: default_base_price(),
        }
    }
}

/// External lookup service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServicesConfig {
    /// Rate service base URL; the base currency code is appended as a path segment.
    #[serde(default = "default_rates_url")]
    pub rates_url: String,
    /// Geo-IP lookup URL.
    #[serde(default = "default_geo_url")]
    pub geo_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_rates_url() -> String {
    "https://open.er-api.com/v6/latest".to_string()
}

fn default_geo_url() -> String {
    "https://ipapi.co/json/".to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            rates_url: default_rates_url(),
            geo_url: default_geo_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Which country-to-currency table the resolver uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountryTable {
    /// Full table covering every supported currency.
    #[default]
    Full,
    /// Only AUD is distinguished, everything else is the base currency.
    Simple,
}

/// Currency resolution configuration.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ResolverConfig {
    /// Country table selection.
    #[serde(default)]
    pub country_table: CountryTable,
}

/// Preference storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// File holding the persisted preference.
    #[serde(default = "default_preference_path")]
    pub preference_path: String,
}

fn default_preference_path() -> String {
    ".pricewise/preferences.json".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            preference_path: default_preference_path(),
        }
    }
}

/// Element ids and classes the page binder looks up.
#[derive(Debug, Clone, Deserialize)]
pub struct PageSelectors {
    /// Id of the currency select control.
    #[serde(default = "default_currency_select")]
    pub currency_select: String,
    /// Id of the projected total element.
    #[serde(default = "default_projected_total")]
    pub projected_total: String,
    /// Id of the quantity input.
    #[serde(default = "default_quantity_input")]
    pub quantity_input: String,
    /// Class of unit price displays.
    #[serde(default = "default_price_display")]
    pub price_display: String,
    /// Class of elements showing the active currency code.
    #[serde(default = "default_currency_label")]
    pub currency_label: String,
    /// Class of checkout add-to-cart buttons.
    #[serde(default = "default_add_to_cart")]
    pub add_to_cart: String,
    /// Attribute on add-to-cart buttons carrying the unit price.
    #[serde(default = "default_price_attribute")]
    pub price_attribute: String,
}

fn default_currency_select() -> String {
    "currency-select".to_string()
}

fn default_projected_total() -> String {
    "projected".to_string()
}

fn default_quantity_input() -> String {
    "qty-input".to_string()
}

fn default_price_display() -> String {
    "price-display".to_string()
}

fn default_currency_label() -> String {
    "currency-symbol".to_string()
}

fn default_add_to_cart() -> String {
    "snipcart-add-item".to_string()
}

fn default_price_attribute() -> String {
    "data-item-price".to_string()
}

impl Default for PageSelectors {
    fn default() -> Self {
        Self {
            currency_select: default_currency_select(),
            projected_total: default_projected_total(),
            quantity_input: default_quantity_input(),
            price_display: default_price_display(),
            currency_label: default_currency_label(),
            add_to_cart: default_add_to_cart(),
            price_attribute: default_price_attribute(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or the base price
    /// is not positive.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let settings = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("PRICEWISE").separator("__"))
            .build()?;

        let loaded: Self = settings.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Checks values that deserialize fine but cannot be priced.
    ///
    /// # Errors
    ///
    /// Returns an error if the base price is zero or negative.
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.pricing.base_price <= Decimal::ZERO {
            return Err(config::ConfigError::Message(format!(
                "pricing.base_price must be positive, got {}",
                self.pricing.base_price
            )));
        }
        Ok(())
    }
}
