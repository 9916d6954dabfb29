//! Wire types for the product listing (`/api/v1/product`).

use crate::shared::CategoryId;
use serde::{Deserialize, Serialize};

/// Cheapest offer in a category at the latest crawl.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductResponse {
    pub category_id: CategoryId,
    pub category: String,
    pub product: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub shop: String,
    pub price: f64,
    /// Unix seconds.
    pub updated: i64,
}

/// REST response for the product listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductsResponse {
    pub ok: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub products: Option<Vec<ProductResponse>>,
}

impl ProductsResponse {
    pub fn ok(products: Vec<ProductResponse>) -> Self {
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
