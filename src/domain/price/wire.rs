//! Wire types for price responses (`/api/v1/price`).

use serde::{Deserialize, Serialize};

/// One observation as sent by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceResponse {
    /// Unix seconds.
    pub timestamp: i64,
    pub price: f64,
}

/// One product's price history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPricesResponse {
    pub product: String,
    #[serde(default)]
    pub prices: Vec<PriceResponse>,
}

/// REST response for a price listing, with or without a category filter.
///
/// `products` is `null` when `ok` is false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricesResponse {
    pub ok: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub products: Option<Vec<ProductPricesResponse>>,
}

impl PricesResponse {
    pub fn ok(products: Vec<ProductPricesResponse>) -> Self {
        Self {
            ok: true,
            message: None,
            products: Some(products),
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: Some(message.into()),
            products: None,
        }
    }
}
