//! Main conversion engine implementation.

use ratebridge_common::Currency;
use rust_decimal::Decimal;
use tracing::{info, instrument};

use crate::config::{EngineConfig, RateTableDocument};
use crate::conversion::{ConversionRequest, ConversionResult};
use crate::error::{ConversionError, FxResult, RateTableError};
use crate::precision::PrecisionPolicy;
use crate::rate_table::RateTable;

/// Cross-rate conversion over a fixed rate table.
///
/// Every conversion pivots through the table's reference currency:
/// `amount / rate[from] * rate[to]`. The engine holds no mutable state, so
/// one instance can be shared freely across threads.
#[derive(Debug, Clone)]
pub struct ConversionEngine {
    table: RateTable,
    precision: PrecisionPolicy,
}

impl ConversionEngine {
    /// Create an engine, checking that the precision policy only names
    /// currencies the table carries.
    pub fn new(table: RateTable, precision: PrecisionPolicy) -> Result<Self, RateTableError> {
        precision.validate_against(&table)?;
        Ok(Self { table, precision })
    }

    /// Engine over the built-in demo rates.
    pub fn builtin() -> Self {
        Self {
            table: RateTable::builtin(),
            precision: PrecisionPolicy::builtin(),
        }
    }

    /// Engine from configuration: the configured rates file if any,
    /// otherwise the built-in rates.
    #[instrument(skip(config), fields(rates_file = ?config.rates_file))]
    pub fn from_config(config: &EngineConfig) -> Result<Self, RateTableError> {
        let engine = match &config.rates_file {
            Some(path) => RateTableDocument::load(path)?.into_engine()?,
            None => Self::builtin(),
        };

        info!(
            reference = %engine.table.reference(),
            currencies = engine.table.len(),
            tiers = engine.precision.tiers.len(),
            "Rate table loaded"
        );

        Ok(engine)
    }

    /// Convert an amount from one currency to another.
    pub fn convert(&self, request: &ConversionRequest) -> FxResult<ConversionResult> {
        if request.amount <= Decimal::ZERO {
            return Err(ConversionError::InvalidAmount(request.amount.to_string()));
        }

        let from_rate = self.lookup(&request.from)?;
        let to_rate = self.lookup(&request.to)?;

        let value = request
            .amount
            .checked_div(from_rate)
            .filter(|in_reference| keeps_precision(*in_reference))
            .and_then(|in_reference| in_reference.checked_mul(to_rate))
            .filter(|value| keeps_precision(*value))
            .ok_or_else(|| ConversionError::InvalidAmount(request.amount.to_string()))?;

        Ok(ConversionResult {
            amount: request.amount,
            from: request.from.clone(),
            to: request.to.clone(),
            value,
            display_precision: self.display_precision(&request.to),
        })
    }

    /// Decimal places used to render amounts of `currency`.
    pub fn display_precision(&self, currency: &Currency) -> u32 {
        self.precision.places_for(currency)
    }

    /// The rate table.
    pub fn rates(&self) -> &RateTable {
        &self.table
    }

    /// The precision policy.
    pub fn precision(&self) -> &PrecisionPolicy {
        &self.precision
    }

    fn lookup(&self, currency: &Currency) -> FxResult<Decimal> {
        self.table
            .rate(currency)
            .ok_or_else(|| ConversionError::UnknownCurrency(currency.clone()))
    }
}

/// Most fractional digits a `Decimal` holds; results are rounded there.
const MAX_SCALE: u32 = 28;

/// Significant digits a result rounded at [`MAX_SCALE`] must still carry.
const MIN_SIGNIFICANT_DIGITS: u32 = 12;

/// Whether a non-zero intermediate or result survived rounding with enough
/// significant digits to stay within 1e-9 of the exact value.
fn keeps_precision(value: Decimal) -> bool {
    if value.is_zero() {
        return false;
    }
    value.scale() < MAX_SCALE
        || value.mantissa().unsigned_abs() >= 10u128.pow(MIN_SIGNIFICANT_DIGITS - 1)
}

impl Default for ConversionEngine {
    fn default() -> Self {
        Self::builtin()
    }
}
