//! Display precision policy.

use std::collections::HashSet;

use ratebridge_common::Currency;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RateTableError;
use crate::rate_table::RateTable;

/// Places used when no tier matches.
pub const DEFAULT_DISPLAY_PLACES: u32 = 4;

/// A set of currencies rendered with the same number of decimal places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrecisionTier {
    /// Decimal places for these currencies.
    pub places: u32,
    /// Currencies in this tier.
    pub codes: Vec<Currency>,
}

impl PrecisionTier {
    /// Create a new tier.
    pub fn new(places: u32, codes: impl IntoIterator<Item = Currency>) -> Self {
        Self {
            places,
            codes: codes.into_iter().collect(),
        }
    }

    fn contains(&self, currency: &Currency) -> bool {
        self.codes.iter().any(|c| c == currency)
    }
}

/// Ordered precision tiers; the first tier holding a currency wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrecisionPolicy {
    #[serde(default)]
    pub tiers: Vec<PrecisionTier>,
    #[serde(default = "default_places")]
    pub default_places: u32,
}

fn default_places() -> u32 {
    DEFAULT_DISPLAY_PLACES
}

impl PrecisionPolicy {
    /// Policy with no tiers: everything renders with `default_places`.
    pub fn flat(default_places: u32) -> Self {
        Self {
            tiers: Vec::new(),
            default_places,
        }
    }

    /// Add a tier after the existing ones.
    pub fn with_tier(mut self, tier: PrecisionTier) -> Self {
        self.tiers.push(tier);
        self
    }

    /// Built-in policy: BTC to satoshis, the other large-cap coins to 6
    /// places, whole-unit fiat to 2, everything else to 4.
    pub fn builtin() -> Self {
        Self::flat(DEFAULT_DISPLAY_PLACES)
            .with_tier(PrecisionTier::new(8, [Currency::btc()]))
            .with_tier(PrecisionTier::new(6, [Currency::eth(), Currency::new("SOL")]))
            .with_tier(PrecisionTier::new(2, [Currency::jpy(), Currency::new("INR")]))
    }

    /// Decimal places for a currency.
    pub fn places_for(&self, currency: &Currency) -> u32 {
        self.tiers
            .iter()
            .find(|tier| tier.contains(currency))
            .map(|tier| tier.places)
            .unwrap_or(self.default_places)
    }

    /// Check that every tier code is in `table` and listed only once.
    pub fn validate_against(&self, table: &RateTable) -> Result<(), RateTableError> {
        let mut seen = HashSet::new();

        for tier in &self.tiers {
            debug!(places = tier.places, codes = tier.codes.len(), "Checking precision tier");

            for code in &tier.codes {
                if !table.contains(code) {
                    return Err(RateTableError::UnlistedPrecisionCode(code.clone()));
                }
                if !seen.insert(code) {
                    return Err(RateTableError::DuplicatePrecisionCode(code.clone()));
                }
            }
        }

        Ok(())
    }
}

impl Default for PrecisionPolicy {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratebridge_common::CurrencyClass;
    use rust_decimal_macros::dec;

    #[test]
    fn test_builtin_places() {
        let policy = PrecisionPolicy::builtin();

        assert_eq!(policy.places_for(&Currency::btc()), 8);
        assert_eq!(policy.places_for(&Currency::eth()), 6);
        assert_eq!(policy.places_for(&Currency::new("SOL")), 6);
        assert_eq!(policy.places_for(&Currency::jpy()), 2);
        assert_eq!(policy.places_for(&Currency::new("INR")), 2);
        assert_eq!(policy.places_for(&Currency::eur()), 4);
        assert_eq!(policy.places_for(&Currency::new("ALGO")), 4);
    }

    #[test]
    fn test_first_tier_wins() {
        let policy = PrecisionPolicy::flat(3)
            .with_tier(PrecisionTier::new(1, [Currency::eur()]))
            .with_tier(PrecisionTier::new(5, [Currency::eur(), Currency::usd()]));

        assert_eq!(policy.places_for(&Currency::eur()), 1);
        assert_eq!(policy.places_for(&Currency::usd()), 5);
        assert_eq!(policy.places_for(&Currency::jpy()), 3);
    }

    #[test]
    fn test_builtin_matches_builtin_table() {
        let table = RateTable::builtin();
        assert!(PrecisionPolicy::builtin().validate_against(&table).is_ok());
    }

    #[test]
    fn test_unlisted_code_rejected() {
        let table = RateTable::builtin();
        let policy = PrecisionPolicy::builtin()
            .with_tier(PrecisionTier::new(2, [Currency::new("KRW")]));

        let result = policy.validate_against(&table);

        assert!(matches!(
            result,
            Err(RateTableError::UnlistedPrecisionCode(code)) if code.code() == "KRW"
        ));
    }

    #[test]
    fn test_duplicate_code_rejected() {
        let table = RateTable::builder(Currency::usd())
            .rate(Currency::usd(), dec!(1), CurrencyClass::Fiat)
            .rate(Currency::eur(), dec!(0.92), CurrencyClass::Fiat)
            .build()
            .unwrap();
        let policy = PrecisionPolicy::flat(4)
            .with_tier(PrecisionTier::new(2, [Currency::eur()]))
            .with_tier(PrecisionTier::new(6, [Currency::eur()]));

        assert!(matches!(
            policy.validate_against(&table),
            Err(RateTableError::DuplicatePrecisionCode(_))
        ));
    }
}
