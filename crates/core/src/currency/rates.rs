//! Exchange rate table relative to the base currency.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use pricewise_shared::Currency;

use super::error::LookupError;

/// Rates as reported by a rate service, before validation.
#[derive(Debug, Clone)]
pub struct RateSnapshot {
    /// Currency the rates are quoted against.
    pub base: Currency,
    /// Code to multiplier, as returned by the service (may include unsupported codes).
    pub rates: HashMap<String, Decimal>,
    /// When the service last updated these rates, if reported.
    pub as_of: Option<DateTime<Utc>>,
}

/// A service that quotes exchange rates against a base currency.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Fetches every rate the service knows, quoted against `base`.
    async fn fetch_rates(&self, base: Currency) -> Result<RateSnapshot, LookupError>;
}

/// Largest multiplier accepted from a rate service.
pub const MAX_RATE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Result of a [`RateTable::refresh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Live rates were installed for this many supported currencies.
    Live {
        /// Number of supported currencies with a rate.
        currencies: usize,
    },
    /// The lookup failed and the identity table was installed.
    Fallback,
}

/// Multipliers from the base currency into each supported currency.
///
/// The base currency always maps to 1 and every rate is positive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateTable {
    rates: BTreeMap<Currency, Decimal>,
}

impl Default for RateTable {
    fn default() -> Self {
        Self::identity()
    }
}

impl RateTable {
    /// Table mapping every supported currency to 1.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            rates: Currency::ALL.into_iter().map(|c| (c, Decimal::ONE)).collect(),
        }
    }

    /// Builds a table from explicit rates.
    ///
    /// Non-positive rates and rates above [`MAX_RATE`] are dropped, and the
    /// base currency is pinned to 1.
    #[must_use]
    pub fn from_rates(rates: impl IntoIterator<Item = (Currency, Decimal)>) -> Self {
        let mut rates: BTreeMap<Currency, Decimal> = rates
            .into_iter()
            .filter(|(currency, rate)| {
                let usable = rate.is_sign_positive() && !rate.is_zero() && *rate <= MAX_RATE;
                if !usable {
                    debug!(currency = %currency, rate = %rate, "Dropping unusable rate");
                }
                usable
            })
            .collect();
        rates.insert(Currency::BASE, Decimal::ONE);
        Self { rates }
    }

    /// Builds a table from a service snapshot, keeping only supported codes.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot is quoted against another base currency.
    pub fn from_snapshot(snapshot: &RateSnapshot) -> Result<Self, LookupError> {
        if !snapshot.base.is_base() {
            return Err(LookupError::malformed(format!(
                "rates quoted against {} instead of {}",
                snapshot.base,
                Currency::BASE
            )));
        }

        let supported = snapshot
            .rates
            .iter()
            .filter_map(|(code, rate)| code.parse::<Currency>().ok().map(|c| (c, *rate)));
        Ok(Self::from_rates(supported))
    }

    /// Rate for `currency`, or 1 if the table has no entry.
    #[must_use]
    pub fn rate_for(&self, currency: Currency) -> Decimal {
        self.rates.get(&currency).copied().unwrap_or(Decimal::ONE)
    }

    /// Rate for `currency` if the table has an entry.
    #[must_use]
    pub fn get(&self, currency: Currency) -> Option<Decimal> {
        self.rates.get(&currency).copied()
    }

    /// Number of currencies with an entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Returns true if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Iterates entries in currency order.
    pub fn iter(&self) -> impl Iterator<Item = (Currency, Decimal)> + '_ {
        self.rates.iter().map(|(c, r)| (*c, *r))
    }

    /// Replaces the table with fresh rates from `source`.
    ///
    /// Makes exactly one attempt. Any failure installs the identity table, so
    /// the table is always usable afterwards.
    pub async fn refresh(&mut self, source: &dyn RateSource) -> RefreshOutcome {
        let fetched = source
            .fetch_rates(Currency::BASE)
            .await
            .and_then(|snapshot| Self::from_snapshot(&snapshot).map(|t| (t, snapshot.as_of)));

        match fetched {
            Ok((table, as_of)) => {
                debug!(
                    currencies = table.len(),
                    as_of = ?as_of,
                    "Installed live exchange rates"
                );
                *self = table;
                RefreshOutcome::Live {
                    currencies: self.len(),
                }
            }
            Err(err) => {
                warn!(error = %err, "Rate lookup failed, using identity rates");
                *self = Self::identity();
                RefreshOutcome::Fallback
            }
        }
    }
}
