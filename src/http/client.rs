//! Low-level HTTP client — `PricewatchHttp`.
//!
//! One method per API endpoint. Returns wire types (conversion to domain types
//! happens in the view state). Internal to the SDK — `PricewatchClient` wraps this.

use crate::domain::price::wire::PricesResponse;
use crate::domain::product::wire::ProductsResponse;
use crate::error::HttpError;
use crate::http::retry::{RetryConfig, RetryPolicy};
use crate::network::API_PREFIX;
use crate::shared::CategoryId;

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Low-level HTTP client for the Pricewatch REST API.
#[derive(Clone)]
pub struct PricewatchHttp {
    base_url: String,
    client: Client,
    retry: RetryPolicy,
}

impl PricewatchHttp {
    pub fn new(base_url: &str, retry: RetryPolicy) -> Result<Self, HttpError> {
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder
                .timeout(Duration::from_secs(30))
                .pool_max_idle_per_host(4);
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
            retry,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Products ─────────────────────────────────────────────────────────

    pub async fn get_products(&self) -> Result<ProductsResponse, HttpError> {
        let url = format!("{}{}/product", self.base_url, API_PREFIX);
        self.get(&url).await
    }

    // ── Prices ───────────────────────────────────────────────────────────

    pub async fn get_category_prices(
        &self,
        category: CategoryId,
    ) -> Result<PricesResponse, HttpError> {
        let url = format!("{}{}/price?category={}", self.base_url, API_PREFIX, category);
        self.get(&url).await
    }

    pub async fn get_all_prices(&self) -> Result<PricesResponse, HttpError> {
        let url = format!("{}{}/price", self.base_url, API_PREFIX);
        self.get(&url).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        let config = match &self.retry {
            RetryPolicy::None => return self.fetch(url).await,
            RetryPolicy::Idempotent => RetryConfig::idempotent(),
            RetryPolicy::Custom(c) => c.clone(),
        };

        let mut attempt = 0;
        loop {
            let err = match self.fetch::<T>(url).await {
                Ok(resp) => return Ok(resp),
                Err(err) => err,
            };

            if !is_retryable(&err, &config) {
                return Err(err);
            }
            if attempt >= config.max_retries {
                return Err(HttpError::MaxRetriesExceeded {
                    attempts: attempt + 1,
                    last_error: err.to_string(),
                });
            }

            let delay = match &err {
                HttpError::RateLimited {
                    retry_after_ms: Some(ms),
                } => Duration::from_millis(*ms),
                _ => config.delay_for_attempt(attempt),
            };
            tracing::debug!(
                attempt = attempt + 1,
                max = config.max_retries,
                delay_ms = delay.as_millis() as u64,
                "Retrying GET {}: {}",
                url,
                err
            );
            futures_timer::Delay::new(delay).await;
            attempt += 1;
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        let resp = self
            .client
            .get(url)
            .header("Content-Type", "application/json")
            .send()
            .await?;
        let status = resp.status();

        if status.is_success() {
            return Ok(resp.json::<T>().await?);
        }

        let status_code = status.as_u16();
        let body = resp.text().await.unwrap_or_default();

        Err(match status_code {
            404 => HttpError::NotFound(body),
            429 => HttpError::RateLimited {
                retry_after_ms: None,
            },
            400..=499 => HttpError::BadRequest(body),
            _ => HttpError::ServerError {
                status: status_code,
                body,
            },
        })
    }
}

fn is_retryable(err: &HttpError, config: &RetryConfig) -> bool {
    match err {
        HttpError::ServerError { status, .. } => config.retryable_statuses.contains(status),
        HttpError::RateLimited { .. } => config.retryable_statuses.contains(&429),
        HttpError::Timeout => true,
        HttpError::Reqwest(re) => {
            #[cfg(not(target_arch = "wasm32"))]
            let retryable = re.is_connect() || re.is_timeout() || re.is_request();
            #[cfg(target_arch = "wasm32")]
            let retryable = re.is_timeout() || re.is_request();
            retryable
        }
        _ => false,
    }
}
