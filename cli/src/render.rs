//! Text rendering for the converter commands.

use std::fmt::Write;

use ratebridge_common::CurrencyClass;
use ratebridge_fx::{ConversionEngine, ConversionResult};

pub const DISCLAIMER: &str = "Exchange rates are for demonstration purposes only";

/// Result line followed by the disclaimer.
pub fn conversion(result: &ConversionResult) -> String {
    format!("{result}\n{DISCLAIMER}")
}

/// Result as pretty JSON, with the formatted value alongside the raw one.
pub fn conversion_json(result: &ConversionResult) -> serde_json::Result<String> {
    let mut value = serde_json::to_value(result)?;
    if let Some(object) = value.as_object_mut() {
        object.insert("formatted".to_string(), result.formatted().into());
    }
    serde_json::to_string_pretty(&value)
}

/// Rate listing, fiat first then crypto.
pub fn rates(engine: &ConversionEngine) -> String {
    let table = engine.rates();
    let mut out = format!("Rates per 1 {}\n", table.reference());

    for class in [CurrencyClass::Fiat, CurrencyClass::Crypto] {
        let _ = writeln!(out, "\n{}", class.label());
        for entry in table.currencies(class) {
            let _ = writeln!(
                out,
                "  {:<6}{:>14}  ({} dp)",
                entry.currency.code(),
                entry.rate.to_string(),
                engine.display_precision(&entry.currency)
            );
        }
    }

    out
}
