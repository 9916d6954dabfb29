//! Conversions from wire types to domain types for price series.

use super::wire::{PriceResponse, PricesResponse, ProductPricesResponse};
use super::{PricePoint, PriceValidationError, ProductSeries};
use crate::domain::{Reply, UNKNOWN_SERVER_ERROR};
use rust_decimal::Decimal;

impl TryFrom<PriceResponse> for PricePoint {
    type Error = PriceValidationError;

    fn try_from(p: PriceResponse) -> Result<Self, Self::Error> {
        let price =
            Decimal::try_from(p.price).map_err(|_| PriceValidationError::InvalidPrice(p.price))?;
        Ok(PricePoint::new(p.timestamp, price))
    }
}

impl From<ProductPricesResponse> for ProductSeries {
    fn from(source: ProductPricesResponse) -> Self {
        let product_name = source.product;
        let prices = source
            .prices
            .into_iter()
            .filter_map(|p| match PricePoint::try_from(p) {
                Ok(point) => Some(point),
                Err(err) => {
                    tracing::warn!(product = %product_name, "Dropping price point: {}", err);
                    None
                }
            })
            .collect();

        ProductSeries {
            product_name,
            prices,
        }
    }
}

impl From<PricesResponse> for Reply<Vec<ProductSeries>> {
    fn from(resp: PricesResponse) -> Self {
        if !resp.ok {
            return Reply::SoftError(
                resp.message
                    .unwrap_or_else(|| UNKNOWN_SERVER_ERROR.to_string()),
            );
        }

        Reply::Ok(
            resp.products
                .unwrap_or_default()
                .into_iter()
                .map(ProductSeries::from)
                .collect(),
        )
    }
}
