//! RateBridge FX Engine
//!
//! Converts amounts between fiat and crypto currencies using a fixed rate
//! table quoted against a single reference currency.
//!
//! # Features
//!
//! - Cross-rate conversion through the reference currency
//! - Per-currency display precision
//! - Rate tables loaded from JSON and validated once at startup
//!
//! # Example
//!
//! ```rust
//! use ratebridge_fx::{ConversionEngine, ConversionRequest};
//!
//! let engine = ConversionEngine::builtin();
//! let request = ConversionRequest::parse("1000", "usd", "btc")?;
//! let result = engine.convert(&request)?;
//!
//! assert_eq!(result.formatted(), "0.01600000");
//! # Ok::<(), ratebridge_fx::ConversionError>(())
//! ```

pub mod config;
pub mod conversion;
pub mod engine;
pub mod error;
pub mod precision;
pub mod rate_table;

pub use config::{EngineConfig, RateTableDocument};
pub use conversion::{ConversionRequest, ConversionResult};
pub use engine::ConversionEngine;
pub use error::{ConversionError, FxResult, RateTableError, UserMessage};
pub use precision::{PrecisionPolicy, PrecisionTier};
pub use rate_table::{RateEntry, RateTable, RateTableBuilder};
