//! # Pricewatch
//!
//! Client-side view state for a product price dashboard: a table of the best
//! offer per category, a multi-series price chart and a message panel.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core** — Domain models, time-series alignment, formatting (always available, WASM-safe)
//! 2. **View state** — `AppViewState` over any `PriceSource`
//! 3. **HTTP API** — `PricewatchHttp` with retry policies
//! 4. **High-Level Client** — `PricewatchClient` with nested sub-clients
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pricewatch::prelude::*;
//!
//! let client = PricewatchClient::builder()
//!     .base_url("http://localhost:8080")
//!     .build()?;
//!
//! let view = AppViewState::new(client, ViewConfig::default());
//! view.load_products().await;
//! view.select_category(CategoryId::new(3)).await;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes, load tracking, observers, formatting.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Unified error types.
pub mod error;

/// Network URL constants.
pub mod network;

// ── Layer 2: View state ──────────────────────────────────────────────────────

/// `AppViewState` and the `PriceSource` it loads from.
pub mod app;

// ── Layer 3: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with retry policies.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `PricewatchClient` — the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared
    pub use crate::shared::fmt::Currency;
    pub use crate::shared::{
        CategoryId, LoadState, LoadTicket, RequestTracker, StaleResponsePolicy, SubscriptionId,
    };

    // Domain types
    pub use crate::domain::chart::{
        align, AlignPolicy, AlignedRow, AlignedSeries, ChartFigure, ChartLoadOutcome, ChartMatrix,
        ChartOptions, ChartSink, ChartViewState, FigureAction, Legend,
    };
    pub use crate::domain::message::{Message, MessageQueue, Severity};
    pub use crate::domain::price::{PricePoint, ProductSeries};
    pub use crate::domain::product::{Product, ProductListState, ProductLoadOutcome};
    pub use crate::domain::Reply;

    // View state
    pub use crate::app::{AppViewState, PriceSource, ViewConfig, ViewEvent};

    // Errors
    pub use crate::error::{HttpError, SdkError};

    // Client
    #[cfg(feature = "http")]
    pub use crate::client::PricewatchClient;
    #[cfg(feature = "http")]
    pub use crate::http::{RetryConfig, RetryPolicy};
}
