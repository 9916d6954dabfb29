//! Product domain — per-category best offers shown in the product table.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod state;
pub mod wire;

use crate::shared::fmt::Currency;
use crate::shared::{serde_util, CategoryId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use state::{ProductListState, ProductLoadOutcome};

/// The cheapest known offer for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub category_id: CategoryId,
    pub category: String,
    pub name: String,
    pub url: String,
    pub shop: String,
    pub price: Decimal,
    #[serde(with = "serde_util::timestamp_secs")]
    pub updated: DateTime<Utc>,
}

impl Product {
    pub fn display_price(&self, currency: &Currency) -> String {
        currency.display(&self.price)
    }

    /// "time elapsed from now" for the product's last price update.
    pub fn updated_ago(&self, now: DateTime<Utc>) -> String {
        crate::shared::fmt::from_now(self.updated, now)
    }
}

// ─── Validation ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ProductValidationError {
    InvalidPrice(f64),
    InvalidTimestamp(i64),
    MissingName,
}

impl fmt::Display for ProductValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductValidationError::InvalidPrice(p) => write!(f, "Invalid price: {}", p),
            ProductValidationError::InvalidTimestamp(t) => write!(f, "Invalid timestamp: {}", t),
            ProductValidationError::MissingName => write!(f, "Missing product name"),
        }
    }
}

impl std::error::Error for ProductValidationError {}
