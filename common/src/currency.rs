//! Currency codes and their display grouping.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Currency code, fiat (ISO 4217) or crypto ticker.
///
/// Codes are trimmed and uppercased on construction, so `" btc"` and `"BTC"`
/// name the same currency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String")]
pub struct Currency(String);

impl Currency {
    /// Create a new currency from code.
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_uppercase())
    }

    /// Get the currency code.
    pub fn code(&self) -> &str {
        &self.0
    }

    /// Whether the code is blank.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Common currencies
    pub fn usd() -> Self {
        Self::new("USD")
    }

    pub fn eur() -> Self {
        Self::new("EUR")
    }

    pub fn jpy() -> Self {
        Self::new("JPY")
    }

    pub fn btc() -> Self {
        Self::new("BTC")
    }

    pub fn eth() -> Self {
        Self::new("ETH")
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Currency {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Currency {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Display grouping of a currency.
///
/// Only used to split listings into "Fiat Currencies" and
/// "Cryptocurrencies"; conversion never looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurrencyClass {
    Fiat,
    Crypto,
}

impl CurrencyClass {
    /// Heading used when listing currencies of this class.
    pub fn label(&self) -> &'static str {
        match self {
            CurrencyClass::Fiat => "Fiat Currencies",
            CurrencyClass::Crypto => "Cryptocurrencies",
        }
    }
}

impl fmt::Display for CurrencyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrencyClass::Fiat => write!(f, "fiat"),
            CurrencyClass::Crypto => write!(f, "crypto"),
        }
    }
}
