//! Conversion and rate table error types.

use ratebridge_common::Currency;
use thiserror::Error;

/// Errors returned by a conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// Amount missing, non-numeric, zero, negative or out of range.
    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),

    /// Currency code not present in the rate table.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(Currency),
}

impl ConversionError {
    /// Get error code for front ends and logs.
    pub fn error_code(&self) -> &'static str {
        match self {
            ConversionError::InvalidAmount(_) => "INVALID_AMOUNT",
            ConversionError::UnknownCurrency(_) => "UNKNOWN_CURRENCY",
        }
    }

    /// Title and description to show the user.
    pub fn user_message(&self) -> UserMessage {
        match self {
            ConversionError::InvalidAmount(_) => UserMessage {
                title: "Invalid amount",
                description: "Please enter a valid positive number".to_string(),
            },
            ConversionError::UnknownCurrency(code) => UserMessage {
                title: "Unknown currency",
                description: format!("{} is not a supported currency", display_code(code)),
            },
        }
    }
}

fn display_code(code: &Currency) -> &str {
    if code.is_empty() {
        "(empty)"
    } else {
        code.code()
    }
}

/// User facing rendering of an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserMessage {
    pub title: &'static str,
    pub description: String,
}

/// Errors raised while building or loading a rate table.
#[derive(Debug, Error)]
pub enum RateTableError {
    /// Blank currency code.
    #[error("Rate table contains an empty currency code")]
    EmptyCode,

    /// Same code listed twice.
    #[error("Duplicate currency in rate table: {0}")]
    DuplicateCurrency(Currency),

    /// Zero or negative rate.
    #[error("Rate for {currency} must be positive, got {rate}")]
    NonPositiveRate { currency: Currency, rate: String },

    /// Reference currency missing from the table.
    #[error("Reference currency {0} is not in the rate table")]
    MissingReference(Currency),

    /// Reference currency quoted at something other than 1.
    #[error("Reference currency {currency} must have rate 1, got {rate}")]
    ReferenceNotUnit { currency: Currency, rate: String },

    /// Precision policy names a code the table does not carry.
    #[error("Precision policy references {0}, which is not in the rate table")]
    UnlistedPrecisionCode(Currency),

    /// Same code placed in two precision tiers.
    #[error("Currency {0} appears in more than one precision tier")]
    DuplicatePrecisionCode(Currency),

    /// Rate table file could not be read.
    #[error("Failed to read rate table {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Rate table document is malformed.
    #[error("Malformed rate table document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for conversions.
pub type FxResult<T> = Result<T, ConversionError>;
