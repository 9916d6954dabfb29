//! Conversion: ProductResponse → Product (TryFrom + validation).

use super::wire::{ProductResponse, ProductsResponse};
use super::{Product, ProductValidationError};
use crate::domain::{Reply, UNKNOWN_SERVER_ERROR};
use crate::shared::from_unix_seconds;
use rust_decimal::Decimal;

impl TryFrom<ProductResponse> for Product {
    type Error = ProductValidationError;

    fn try_from(source: ProductResponse) -> Result<Self, Self::Error> {
        if source.product.trim().is_empty() {
            return Err(ProductValidationError::MissingName);
        }
        let price = Decimal::try_from(source.price)
            .map_err(|_| ProductValidationError::InvalidPrice(source.price))?;
        let updated = from_unix_seconds(source.updated)
            .ok_or(ProductValidationError::InvalidTimestamp(source.updated))?;

        Ok(Product {
            category_id: source.category_id,
            category: source.category,
            name: source.product,
            url: source.url,
            shop: source.shop,
            price,
            updated,
        })
    }
}

impl From<ProductsResponse> for Reply<Vec<Product>> {
    fn from(resp: ProductsResponse) -> Self {
        if !resp.ok {
            return Reply::SoftError(
                resp.message
                    .unwrap_or_else(|| UNKNOWN_SERVER_ERROR.to_string()),
            );
        }

        let mut products = Vec::new();
        for raw in resp.products.unwrap_or_default() {
            let category_id = raw.category_id;
            match Product::try_from(raw) {
                Ok(product) => products.push(product),
                Err(err) => {
                    tracing::warn!(%category_id, "Dropping product: {}", err);
                }
            }
        }
        Reply::Ok(products)
    }
}
