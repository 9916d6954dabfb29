//! Prices sub-client — price history per category, or for every product.

use crate::client::PricewatchClient;
use crate::domain::price::ProductSeries;
use crate::domain::Reply;
use crate::error::SdkError;
use crate::shared::CategoryId;

/// Sub-client for price history queries.
pub struct Prices<'a> {
    pub(crate) client: &'a PricewatchClient,
}

impl<'a> Prices<'a> {
    /// Price series of every product in `category`.
    pub async fn category(&self, category: CategoryId) -> Result<Reply<Vec<ProductSeries>>, SdkError> {
        let resp = self.client.http.get_category_prices(category).await?;
        Ok(resp.into())
    }

    /// Price series of every product (the table-only view).
    pub async fn all(&self) -> Result<Reply<Vec<ProductSeries>>, SdkError> {
        let resp = self.client.http.get_all_prices().await?;
        Ok(resp.into())
    }
}
