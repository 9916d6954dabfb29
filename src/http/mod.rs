//! HTTP client layer — `PricewatchHttp` with a configurable retry policy.

pub mod client;
pub mod retry;

pub use client::PricewatchHttp;
pub use retry::{RetryConfig, RetryPolicy};
