//! RateBridge Common Types
//!
//! Currency types shared by the conversion engine and its front ends.

pub mod currency;

pub use currency::*;
