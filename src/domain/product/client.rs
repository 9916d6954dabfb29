//! Products sub-client — the per-category best-offer listing.

use crate::client::PricewatchClient;
use crate::domain::product::Product;
use crate::domain::Reply;
use crate::error::SdkError;

pub struct Products<'a> {
    pub(crate) client: &'a PricewatchClient,
}

impl<'a> Products<'a> {
    /// Fetch and convert the product listing. Not sorted; the view state sorts.
    pub async fn get(&self) -> Result<Reply<Vec<Product>>, SdkError> {
        let resp = self.client.http.get_products().await?;
        Ok(resp.into())
    }
}
