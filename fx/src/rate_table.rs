//! Static rate table keyed by currency code.

use std::collections::HashMap;

use ratebridge_common::{Currency, CurrencyClass};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::error::RateTableError;

/// One row of the rate table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateEntry {
    /// Currency code.
    pub currency: Currency,
    /// Units of `currency` per one unit of the reference currency.
    pub rate: Decimal,
    /// Display grouping.
    pub class: CurrencyClass,
}

/// Immutable mapping from currency to its rate against the reference
/// currency.
///
/// Built once through [`RateTableBuilder`], which enforces unique codes,
/// positive rates and a reference currency quoted at exactly 1.
#[derive(Debug, Clone)]
pub struct RateTable {
    reference: Currency,
    entries: Vec<RateEntry>,
    index: HashMap<Currency, usize>,
}

impl RateTable {
    /// Start building a table around `reference`.
    pub fn builder(reference: Currency) -> RateTableBuilder {
        RateTableBuilder::new(reference)
    }

    /// Demo rates against USD.
    pub fn builtin() -> Self {
        builtin_rates().build_unchecked()
    }

    /// The pivot currency all rates are quoted against.
    pub fn reference(&self) -> &Currency {
        &self.reference
    }

    /// Rate for a currency.
    pub fn rate(&self, currency: &Currency) -> Option<Decimal> {
        self.entry(currency).map(|e| e.rate)
    }

    /// Full entry for a currency.
    pub fn entry(&self, currency: &Currency) -> Option<&RateEntry> {
        self.index.get(currency).map(|&i| &self.entries[i])
    }

    /// Whether the table carries a currency.
    pub fn contains(&self, currency: &Currency) -> bool {
        self.index.contains_key(currency)
    }

    /// Entries of one class, in the order they were added.
    pub fn currencies(&self, class: CurrencyClass) -> impl Iterator<Item = &RateEntry> {
        self.entries.iter().filter(move |e| e.class == class)
    }

    /// All entries in the order they were added.
    pub fn entries(&self) -> &[RateEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Rows behind [`RateTable::builtin`]; a unit test checks they pass
/// [`RateTableBuilder::build`].
fn builtin_rates() -> RateTableBuilder {
    RateTableBuilder::new(Currency::usd())
        .fiat("USD", dec!(1))
        .fiat("EUR", dec!(0.92))
        .fiat("GBP", dec!(0.79))
        .fiat("JPY", dec!(149.75))
        .fiat("CAD", dec!(1.36))
        .fiat("AUD", dec!(1.53))
        .fiat("CNY", dec!(7.21))
        .fiat("INR", dec!(83.51))
        .crypto("BTC", dec!(0.000016))
        .crypto("ETH", dec!(0.00031))
        .crypto("SOL", dec!(0.0071))
        .crypto("ALGO", dec!(1.13))
        .crypto("CEL", dec!(0.89))
        .crypto("XTZ", dec!(2.43))
}

/// Builder for [`RateTable`].
pub struct RateTableBuilder {
    reference: Currency,
    entries: Vec<RateEntry>,
}

impl RateTableBuilder {
    /// Create a new builder.
    pub fn new(reference: Currency) -> Self {
        Self {
            reference,
            entries: Vec::new(),
        }
    }

    /// Add a rate.
    pub fn rate(mut self, currency: Currency, rate: Decimal, class: CurrencyClass) -> Self {
        self.entries.push(RateEntry {
            currency,
            rate,
            class,
        });
        self
    }

    /// Add a fiat rate.
    pub fn fiat(self, code: &str, rate: Decimal) -> Self {
        self.rate(Currency::new(code), rate, CurrencyClass::Fiat)
    }

    /// Add a crypto rate.
    pub fn crypto(self, code: &str, rate: Decimal) -> Self {
        self.rate(Currency::new(code), rate, CurrencyClass::Crypto)
    }

    /// Validate and freeze the table.
    pub fn build(self) -> Result<RateTable, RateTableError> {
        let mut index = HashMap::with_capacity(self.entries.len());

        for (i, entry) in self.entries.iter().enumerate() {
            if entry.currency.is_empty() {
                return Err(RateTableError::EmptyCode);
            }
            if entry.rate <= Decimal::ZERO {
                return Err(RateTableError::NonPositiveRate {
                    currency: entry.currency.clone(),
                    rate: entry.rate.to_string(),
                });
            }
            if index.insert(entry.currency.clone(), i).is_some() {
                return Err(RateTableError::DuplicateCurrency(entry.currency.clone()));
            }
        }

        match index.get(&self.reference) {
            None => return Err(RateTableError::MissingReference(self.reference)),
            Some(&i) if self.entries[i].rate != Decimal::ONE => {
                return Err(RateTableError::ReferenceNotUnit {
                    currency: self.reference,
                    rate: self.entries[i].rate.to_string(),
                });
            }
            Some(_) => {}
        }

        Ok(RateTable {
            reference: self.reference,
            entries: self.entries,
            index,
        })
    }

    /// Freeze rows already known to be valid.
    fn build_unchecked(self) -> RateTable {
        let index = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.currency.clone(), i))
            .collect();

        RateTable {
            reference: self.reference,
            entries: self.entries,
            index,
        }
    }
}
