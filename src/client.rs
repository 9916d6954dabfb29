//! High-level client — `PricewatchClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder and the accessor methods.

use crate::app::PriceSource;
use crate::domain::price::client::Prices;
use crate::domain::price::wire::PricesResponse;
use crate::domain::product::client::Products;
use crate::domain::product::wire::ProductsResponse;
use crate::error::SdkError;
use crate::http::{PricewatchHttp, RetryPolicy};
use crate::shared::CategoryId;

use std::future::Future;

// Re-export sub-client types for convenience.
pub use crate::domain::price::client::Prices as PricesClient;
pub use crate::domain::product::client::Products as ProductsClient;

/// The primary entry point for talking to a Pricewatch server.
///
/// Provides nested sub-client accessors: `client.products()`, `client.prices()`.
#[derive(Clone)]
pub struct PricewatchClient {
    pub(crate) http: PricewatchHttp,
}

impl PricewatchClient {
    pub fn builder() -> PricewatchClientBuilder {
        PricewatchClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn products(&self) -> Products<'_> {
        Products { client: self }
    }

    pub fn prices(&self) -> Prices<'_> {
        Prices { client: self }
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }
}

impl PriceSource for PricewatchClient {
    fn fetch_products(&self) -> impl Future<Output = Result<ProductsResponse, SdkError>> {
        async move { Ok(self.http.get_products().await?) }
    }

    fn fetch_category_prices(
        &self,
        category: CategoryId,
    ) -> impl Future<Output = Result<PricesResponse, SdkError>> {
        async move { Ok(self.http.get_category_prices(category).await?) }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct PricewatchClientBuilder {
    base_url: String,
    retry: RetryPolicy,
}

impl Default for PricewatchClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            retry: RetryPolicy::default(),
        }
    }
}

impl PricewatchClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn build(self) -> Result<PricewatchClient, SdkError> {
        if self.base_url.trim().is_empty() {
            return Err(SdkError::Validation("base_url must not be empty".to_string()));
        }
        Ok(PricewatchClient {
            http: PricewatchHttp::new(&self.base_url, self.retry)?,
        })
    }
}
