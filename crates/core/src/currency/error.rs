//! Lookup and preference storage error types.

use thiserror::Error;

use pricewise_shared::AppError;

/// Failure of an external lookup (rate service or geo-IP service).
///
/// These never reach the shopper: callers degrade to identity rates or the
/// base currency and log the error.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Service could not be reached.
    #[error("service unreachable: {0}")]
    Network(String),

    /// Request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// Service answered with a non-success HTTP status.
    #[error("service returned HTTP {0}")]
    HttpStatus(u16),

    /// Service answered but reported failure in its payload.
    #[error("service reported failure: {0}")]
    Unsuccessful(String),

    /// Response body could not be interpreted.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl LookupError {
    /// Create a network error.
    #[must_use]
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create an unsuccessful payload error.
    #[must_use]
    pub fn unsuccessful(msg: impl Into<String>) -> Self {
        Self::Unsuccessful(msg.into())
    }

    /// Create a malformed response error.
    #[must_use]
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }
}

impl From<LookupError> for AppError {
    fn from(err: LookupError) -> Self {
        Self::ExternalService(err.to_string())
    }
}

/// Preference storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backing storage could not be read or written.
    #[error("preference storage unavailable: {0}")]
    Unavailable(String),

    /// Stored data could not be decoded.
    #[error("preference data is corrupt: {0}")]
    Corrupt(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::Storage(err.to_string())
    }
}
