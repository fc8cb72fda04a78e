//! Shared HTTP client construction and error mapping.

use std::time::Duration;

use reqwest::{Client, Response};

use pricewise_core::LookupError;
use pricewise_shared::{AppError, AppResult, config::ServicesConfig};

/// Builds the HTTP client used by every lookup, with the configured timeout.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialised.
pub fn build_client(config: &ServicesConfig) -> AppResult<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(concat!("pricewise/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| AppError::Internal(format!("failed to build HTTP client: {e}")))
}

/// Maps a transport-level failure.
pub(crate) fn lookup_error(err: &reqwest::Error) -> LookupError {
    if err.is_timeout() {
        LookupError::Timeout
    } else if err.is_decode() {
        LookupError::malformed(err.to_string())
    } else {
        LookupError::network(err.to_string())
    }
}

/// Sends a GET and returns the body of a successful response.
pub(crate) async fn get_body(client: &Client, url: &str) -> Result<String, LookupError> {
    let response: Response = client
        .get(url)
        .send()
        .await
        .map_err(|e| lookup_error(&e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(LookupError::HttpStatus(status.as_u16()));
    }

    response.text().await.map_err(|e| lookup_error(&e))
}
