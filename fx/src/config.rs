//! Engine configuration and the rate table file format.

use std::path::{Path, PathBuf};

use ratebridge_common::{Currency, CurrencyClass};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::ConversionEngine;
use crate::error::RateTableError;
use crate::precision::PrecisionPolicy;
use crate::rate_table::{RateTable, RateTableBuilder};

/// Longest presentation pause a front end may request.
pub const MAX_DELAY_MS: u64 = 10_000;

/// Configuration shared by RateBridge front ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Rate table document to load instead of the built-in rates.
    pub rates_file: Option<PathBuf>,
    /// Emit logs as JSON.
    pub log_json: bool,
    /// Pause before showing a result, in milliseconds. Presentation only.
    pub delay_ms: u64,
}

impl EngineConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup("RATEBRIDGE_RATES_FILE") {
            if !path.trim().is_empty() {
                config.rates_file = Some(PathBuf::from(path));
            }
        }

        if let Some(json) = lookup("RATEBRIDGE_LOG_JSON") {
            config.log_json = matches!(json.trim().to_lowercase().as_str(), "1" | "true" | "yes");
        }

        if let Some(delay) = lookup("RATEBRIDGE_DELAY_MS") {
            if let Ok(delay) = delay.trim().parse() {
                config.delay_ms = delay;
            }
        }

        config
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.delay_ms > MAX_DELAY_MS {
            return Err(format!(
                "Delay of {}ms exceeds maximum {}ms",
                self.delay_ms, MAX_DELAY_MS
            ));
        }

        if let Some(path) = &self.rates_file {
            if path.as_os_str().is_empty() {
                return Err("Rates file path cannot be empty".to_string());
            }
        }

        Ok(())
    }
}

/// One currency row of a rate table document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateRow {
    pub code: Currency,
    pub rate: Decimal,
}

/// On-disk rate table.
///
/// Rows are lists rather than maps so that a repeated code is reported
/// instead of silently overwritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTableDocument {
    /// Currency every rate is quoted against.
    pub reference: Currency,
    #[serde(default)]
    pub fiat: Vec<RateRow>,
    #[serde(default)]
    pub crypto: Vec<RateRow>,
    /// Display precision; the built-in policy when absent.
    #[serde(default)]
    pub precision: Option<PrecisionPolicy>,
}

impl RateTableDocument {
    /// Read a document from a JSON file.
    pub fn load(path: &Path) -> Result<Self, RateTableError> {
        let contents = std::fs::read_to_string(path).map_err(|source| RateTableError::Io {
            path: path.display().to_string(),
            source,
        })?;

        debug!(path = %path.display(), bytes = contents.len(), "Read rate table document");

        Self::from_json(&contents)
    }

    /// Parse a document from JSON text.
    pub fn from_json(json: &str) -> Result<Self, RateTableError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate the rows into a rate table.
    pub fn to_table(&self) -> Result<RateTable, RateTableError> {
        let rows = self
            .fiat
            .iter()
            .map(|row| (row, CurrencyClass::Fiat))
            .chain(self.crypto.iter().map(|row| (row, CurrencyClass::Crypto)));

        rows.fold(
            RateTableBuilder::new(self.reference.clone()),
            |builder, (row, class)| builder.rate(row.code.clone(), row.rate, class),
        )
        .build()
    }

    /// Build an engine from this document.
    pub fn into_engine(self) -> Result<ConversionEngine, RateTableError> {
        let table = self.to_table()?;
        ConversionEngine::new(table, self.precision.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversion::ConversionRequest;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    const SMALL_TABLE: &str = r#"{
        "reference": "usd",
        "fiat": [
            { "code": "USD", "rate": "1" },
            { "code": "EUR", "rate": "0.92" }
        ],
        "crypto": [
            { "code": "BTC", "rate": 0.000016 }
        ],
        "precision": {
            "default_places": 3,
            "tiers": [{ "places": 8, "codes": ["btc"] }]
        }
    }"#;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.rates_file, None);
    }

    #[test]
    fn test_config_from_env() {
        let config = EngineConfig::from_lookup(lookup(&[
            ("RATEBRIDGE_RATES_FILE", "/etc/ratebridge/rates.json"),
            ("RATEBRIDGE_LOG_JSON", "true"),
            ("RATEBRIDGE_DELAY_MS", "800"),
        ]));

        assert_eq!(config.rates_file, Some(PathBuf::from("/etc/ratebridge/rates.json")));
        assert!(config.log_json);
        assert_eq!(config.delay_ms, 800);
    }

    #[test]
    fn test_config_ignores_bad_values() {
        let config = EngineConfig::from_lookup(lookup(&[
            ("RATEBRIDGE_RATES_FILE", "  "),
            ("RATEBRIDGE_DELAY_MS", "soon"),
        ]));

        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_invalid_config() {
        let config = EngineConfig {
            delay_ms: MAX_DELAY_MS + 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_document_into_engine() {
        let engine = RateTableDocument::from_json(SMALL_TABLE)
            .unwrap()
            .into_engine()
            .unwrap();

        assert_eq!(engine.rates().reference(), &Currency::usd());
        assert_eq!(engine.rates().rate(&Currency::btc()), Some(dec!(0.000016)));

        let result = engine
            .convert(&ConversionRequest::new(dec!(1000), "USD", "BTC"))
            .unwrap();
        assert_eq!(result.formatted(), "0.01600000");

        let result = engine
            .convert(&ConversionRequest::new(dec!(1), "USD", "EUR"))
            .unwrap();
        assert_eq!(result.formatted(), "0.920");
    }

    #[test]
    fn test_document_without_precision_uses_builtin() {
        let json = r#"{
            "reference": "USD",
            "fiat": [{ "code": "USD", "rate": "1" }, { "code": "EUR", "rate": "0.92" }]
        }"#;

        // Built-in tiers name BTC, which this table lacks.
        let result = RateTableDocument::from_json(json).unwrap().into_engine();
        assert!(matches!(result, Err(RateTableError::UnlistedPrecisionCode(_))));
    }

    #[test]
    fn test_document_precision_listing_krw_is_rejected() {
        let json = r#"{
            "reference": "USD",
            "fiat": [{ "code": "USD", "rate": "1" }, { "code": "JPY", "rate": "149.75" }],
            "precision": { "tiers": [{ "places": 2, "codes": ["JPY", "KRW"] }] }
        }"#;

        let result = RateTableDocument::from_json(json).unwrap().into_engine();
        assert!(matches!(
            result,
            Err(RateTableError::UnlistedPrecisionCode(code)) if code.code() == "KRW"
        ));
    }

    #[test]
    fn test_duplicate_across_groups_rejected() {
        let json = r#"{
            "reference": "USD",
            "fiat": [{ "code": "USD", "rate": "1" }],
            "crypto": [{ "code": "usd", "rate": "1" }],
            "precision": { "tiers": [] }
        }"#;

        let result = RateTableDocument::from_json(json).unwrap().to_table();
        assert!(matches!(result, Err(RateTableError::DuplicateCurrency(_))));
    }

    #[test]
    fn test_malformed_document() {
        let result = RateTableDocument::from_json("{ \"fiat\": [] }");
        assert!(matches!(result, Err(RateTableError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = RateTableDocument::load(Path::new("/nonexistent/ratebridge/rates.json"));
        assert!(matches!(result, Err(RateTableError::Io { .. })));
    }
}
