//! Network defaults for the Pricewatch SDK.

/// Default REST API base URL (the price server binds `localhost:8080`).
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Path prefix shared by every REST endpoint.
pub const API_PREFIX: &str = "/api/v1";
