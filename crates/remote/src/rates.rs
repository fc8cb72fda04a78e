//! Exchange rate service client.
//!
//! Expects an open.er-api.com style payload:
//!
//! ```json
//! {"result": "success", "base_code": "AED", "time_last_update_unix": 1700000000,
//!  "rates": {"AED": 1, "EUR": 0.25}}
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use pricewise_core::currency::{RateSnapshot, RateSource};
use pricewise_core::LookupError;
use pricewise_shared::Currency;

use crate::http::get_body;

mod api {
    use super::{Decimal, Deserialize, HashMap};

    #[derive(Deserialize, Debug)]
    pub struct Response {
        pub result: String,
        pub base_code: Option<String>,
        pub time_last_update_unix: Option<i64>,
        #[serde(rename = "error-type")]
        pub error_type: Option<String>,
        #[serde(default)]
        pub rates: HashMap<String, Decimal>,
    }
}

/// Interprets a rate service body requested for `requested` base.
///
/// # Errors
///
/// Returns an error if the body is not JSON, reports failure, or names an
/// unsupported base currency.
pub fn parse_rates(body: &str, requested: Currency) -> Result<RateSnapshot, LookupError> {
    let response: api::Response =
        serde_json::from_str(body).map_err(|e| LookupError::malformed(e.to_string()))?;

    if response.result != "success" {
        let reason = response.error_type.unwrap_or(response.result);
        return Err(LookupError::unsuccessful(reason));
    }

    let base = match response.base_code.as_deref() {
        Some(code) => code
            .parse::<Currency>()
            .map_err(|_| LookupError::malformed(format!("unsupported base currency {code}")))?,
        None => requested,
    };

    Ok(RateSnapshot {
        base,
        rates: response.rates,
        as_of: response
            .time_last_update_unix
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0)),
    })
}

/// Client for the exchange rate service.
#[derive(Debug, Clone)]
pub struct ExchangeRateApi {
    client: Client,
    base_url: String,
}

impl ExchangeRateApi {
    /// Creates a client; the base currency is appended to `base_url` as a path segment.
    #[must_use]
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// URL queried for `base`.
    #[must_use]
    pub fn url_for(&self, base: Currency) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), base.code())
    }
}

#[async_trait]
impl RateSource for ExchangeRateApi {
    async fn fetch_rates(&self, base: Currency) -> Result<RateSnapshot, LookupError> {
        let url = self.url_for(base);
        debug!(url = %url, "Fetching exchange rates");
        let body = get_body(&self.client, &url).await?;
        parse_rates(&body, base)
    }
}
