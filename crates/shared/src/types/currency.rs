//! Supported currency codes.
//!
//! The storefront prices everything in a single base currency (AED) and can
//! display a closed set of other currencies. Anything outside that set is
//! treated as the base currency.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// ISO 4217 currency codes the storefront can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// UAE Dirham (base currency)
    Aed,
    /// Australian Dollar
    Aud,
    /// US Dollar
    Usd,
    /// Euro
    Eur,
    /// British Pound
    Gbp,
    /// Indian Rupee
    Inr,
    /// Canadian Dollar
    Cad,
    /// Singapore Dollar
    Sgd,
    /// Saudi Riyal
    Sar,
    /// Swiss Franc
    Chf,
    /// Japanese Yen
    Jpy,
}

impl Currency {
    /// Currency the canonical price is defined in.
    pub const BASE: Self = Self::Aed;

    /// Every supported currency, base first, in display order.
    pub const ALL: [Self; 11] = [
        Self::Aed,
        Self::Aud,
        Self::Usd,
        Self::Eur,
        Self::Gbp,
        Self::Inr,
        Self::Cad,
        Self::Sgd,
        Self::Sar,
        Self::Chf,
        Self::Jpy,
    ];

    /// Uppercase ISO code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Aed => "AED",
            Self::Aud => "AUD",
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Inr => "INR",
            Self::Cad => "CAD",
            Self::Sgd => "SGD",
            Self::Sar => "SAR",
            Self::Chf => "CHF",
            Self::Jpy => "JPY",
        }
    }

    /// Returns true for the base currency.
    #[must_use]
    pub fn is_base(self) -> bool {
        self == Self::BASE
    }

    /// Parses a code, falling back to the base currency when it is not supported.
    #[must_use]
    pub fn parse_or_base(code: &str) -> Self {
        code.parse().unwrap_or(Self::BASE)
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Currency {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|c| c.code() == code)
            .ok_or_else(|| AppError::Validation(format!("Unsupported currency: {s}")))
    }
}
