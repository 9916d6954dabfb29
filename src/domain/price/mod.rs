//! Price domain — per-product price series.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod wire;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single price observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Unix seconds.
    pub timestamp: i64,
    pub price: Decimal,
}

impl PricePoint {
    pub fn new(timestamp: i64, price: Decimal) -> Self {
        Self { timestamp, price }
    }
}

/// One product's observations. `prices` is in source order, not necessarily sorted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSeries {
    pub product_name: String,
    pub prices: Vec<PricePoint>,
}

impl ProductSeries {
    pub fn new(product_name: impl Into<String>, prices: Vec<PricePoint>) -> Self {
        Self {
            product_name: product_name.into(),
            prices,
        }
    }

    /// Most recent observation by timestamp.
    pub fn latest(&self) -> Option<&PricePoint> {
        self.prices.iter().max_by_key(|p| p.timestamp)
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

// ─── Validation ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum PriceValidationError {
    /// The price is NaN, infinite, or out of `Decimal` range.
    InvalidPrice(f64),
}

impl fmt::Display for PriceValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceValidationError::InvalidPrice(p) => write!(f, "Invalid price: {}", p),
        }
    }
}

impl std::error::Error for PriceValidationError {}
