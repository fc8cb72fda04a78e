//! Geo-IP lookup client (ipapi.co style payload).

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use pricewise_core::currency::{GeoLocation, GeoLocator};
use pricewise_core::LookupError;

use crate::http::get_body;

mod api {
    use super::Deserialize;

    #[derive(Deserialize, Debug)]
    pub struct Response {
        pub country_code: Option<String>,
        pub currency: Option<String>,
        #[serde(default)]
        pub error: bool,
        pub reason: Option<String>,
    }
}

/// Interprets a geo service body.
///
/// # Errors
///
/// Returns an error if the body is not JSON, flags an error, or has no country code.
pub fn parse_location(body: &str) -> Result<GeoLocation, LookupError> {
    let response: api::Response =
        serde_json::from_str(body).map_err(|e| LookupError::malformed(e.to_string()))?;

    if response.error {
        return Err(LookupError::unsuccessful(
            response.reason.unwrap_or_else(|| "unknown".to_string()),
        ));
    }

    let country_code = response
        .country_code
        .map(|c| c.trim().to_uppercase())
        .filter(|c| !c.is_empty())
        .ok_or_else(|| LookupError::malformed("missing country_code"))?;

    Ok(GeoLocation {
        country_code,
        currency: response.currency,
    })
}

/// Client for the geo-IP service.
#[derive(Debug, Clone)]
pub struct IpGeoApi {
    client: Client,
    url: String,
}

impl IpGeoApi {
    /// Creates a client querying `url`.
    #[must_use]
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl GeoLocator for IpGeoApi {
    async fn locate(&self) -> Result<GeoLocation, LookupError> {
        debug!(url = %self.url, "Looking up visitor location");
        let body = get_body(&self.client, &self.url).await?;
        parse_location(&body)
    }
}
