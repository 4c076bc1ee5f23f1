//! Currency conversion request and result types.

use std::fmt;
use std::str::FromStr;

use ratebridge_common::Currency;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::error::{ConversionError, FxResult};

/// Request to convert an amount between two currencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    /// Amount to convert, in `from` units.
    pub amount: Decimal,
    /// Source currency.
    pub from: Currency,
    /// Target currency.
    pub to: Currency,
}

impl ConversionRequest {
    /// Create a new conversion request.
    pub fn new(amount: Decimal, from: impl Into<Currency>, to: impl Into<Currency>) -> Self {
        Self {
            amount,
            from: from.into(),
            to: to.into(),
        }
    }

    /// Build a request from raw user input.
    ///
    /// Accepts plain decimals (`"12.5"`) and scientific notation (`"1e3"`).
    /// Positivity is checked by the engine, not here.
    pub fn parse(amount: &str, from: &str, to: &str) -> FxResult<Self> {
        Ok(Self::new(parse_amount(amount)?, from, to))
    }

    /// Same request with source and target exchanged.
    pub fn swapped(self) -> Self {
        Self {
            amount: self.amount,
            from: self.to,
            to: self.from,
        }
    }
}

/// Parse an amount typed by a user. Digit separators are rejected.
pub fn parse_amount(input: &str) -> FxResult<Decimal> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.contains('_') {
        return Err(ConversionError::InvalidAmount(input.to_string()));
    }

    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| ConversionError::InvalidAmount(input.to_string()))
}

/// Outcome of a conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionResult {
    /// Amount that was converted.
    pub amount: Decimal,
    /// Source currency.
    pub from: Currency,
    /// Target currency.
    pub to: Currency,
    /// Converted amount, unrounded.
    pub value: Decimal,
    /// Decimal places to render `value` with.
    pub display_precision: u32,
}

impl ConversionResult {
    /// `value` rounded half away from zero to `display_precision` places.
    pub fn rounded(&self) -> Decimal {
        self.value
            .round_dp_with_strategy(self.display_precision, RoundingStrategy::MidpointAwayFromZero)
    }

    /// `value` as fixed-point text with exactly `display_precision` places.
    pub fn formatted(&self) -> String {
        format!("{:.*}", self.display_precision as usize, self.rounded())
    }
}

impl fmt::Display for ConversionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} = {} {}", self.amount, self.from, self.formatted(), self.to)
    }
}
