//! Integration tests for `AppViewState` over an in-memory price source.
//!
//! Fetches can be held open on a `Notify` gate so overlapping loads are
//! deterministic on tokio's current-thread test runtime.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use tokio::sync::Notify;

use pricewatch::app::{AppViewState, PriceSource, ViewConfig};
use pricewatch::domain::chart::{
    AlignPolicy, AlignedRow, ChartFigure, ChartLoadOutcome, ChartOptions, ChartSink,
    FigureAction,
};
use pricewatch::domain::message::Severity;
use pricewatch::domain::price::wire::{PriceResponse, PricesResponse, ProductPricesResponse};
use pricewatch::domain::product::wire::{ProductResponse, ProductsResponse};
use pricewatch::domain::product::ProductLoadOutcome;
use pricewatch::error::{HttpError, SdkError};
use pricewatch::shared::{CategoryId, LoadState, StaleResponsePolicy};

// ── Fixtures ─────────────────────────────────────────────────────────────────

/// Scripted backend. Product replies are served in order; `None` or an empty
/// script is a transport failure.
#[derive(Default)]
struct MemorySource {
    product_replies: Mutex<VecDeque<Option<ProductsResponse>>>,
    prices: HashMap<i64, PricesResponse>,
    product_gate: Option<Notify>,
    gated_category: Option<(i64, Notify)>,
    product_calls: AtomicUsize,
    price_calls: AtomicUsize,
}

impl MemorySource {
    fn reply_products(self, resp: ProductsResponse) -> Self {
        self.push_product_reply(Some(resp));
        self
    }

    fn fail_products(self) -> Self {
        self.push_product_reply(None);
        self
    }

    fn push_product_reply(&self, reply: Option<ProductsResponse>) {
        self.product_replies.lock().unwrap().push_back(reply);
    }

    fn with_prices(mut self, category: i64, resp: PricesResponse) -> Self {
        self.prices.insert(category, resp);
        self
    }

    fn gate_products(mut self) -> Self {
        self.product_gate = Some(Notify::new());
        self
    }

    fn gate_category(mut self, category: i64) -> Self {
        self.gated_category = Some((category, Notify::new()));
        self
    }

    fn release_products(&self) {
        if let Some(gate) = &self.product_gate {
            gate.notify_one();
        }
    }

    fn release_category(&self) {
        if let Some((_, gate)) = &self.gated_category {
            gate.notify_one();
        }
    }
}

impl PriceSource for MemorySource {
    async fn fetch_products(&self) -> Result<ProductsResponse, SdkError> {
        self.product_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.product_gate {
            gate.notified().await;
        }
        let reply = self.product_replies.lock().unwrap().pop_front().flatten();
        reply.ok_or(SdkError::Http(HttpError::ServerError {
            status: 502,
            body: "bad gateway".to_string(),
        }))
    }

    async fn fetch_category_prices(
        &self,
        category: CategoryId,
    ) -> Result<PricesResponse, SdkError> {
        self.price_calls.fetch_add(1, Ordering::SeqCst);
        if let Some((gated, gate)) = &self.gated_category {
            if *gated == category.get() {
                gate.notified().await;
            }
        }
        self.prices
            .get(&category.get())
            .cloned()
            .ok_or(SdkError::Http(HttpError::Timeout))
    }
}

fn product(category: &str, name: &str, price: f64) -> ProductResponse {
    ProductResponse {
        category_id: CategoryId::new(1),
        category: category.to_string(),
        product: name.to_string(),
        url: format!("https://shop.example/{name}"),
        shop: "example".to_string(),
        price,
        updated: 1_700_000_000,
    }
}

fn history(name: &str, points: &[(i64, f64)]) -> ProductPricesResponse {
    ProductPricesResponse {
        product: name.to_string(),
        prices: points
            .iter()
            .map(|&(timestamp, price)| PriceResponse { timestamp, price })
            .collect(),
    }
}

fn dec(value: i64) -> Option<Decimal> {
    Some(Decimal::from(value))
}

fn at(seconds: i64) -> chrono::DateTime<Utc> {
    Utc.timestamp_opt(seconds, 0).unwrap()
}

#[derive(Default)]
struct RecordingSink {
    calls: Vec<&'static str>,
    last_rows: usize,
}

impl ChartSink for RecordingSink {
    fn render(&mut self, matrix: &[AlignedRow], _options: &ChartOptions) {
        self.calls.push("render");
        self.last_rows = matrix.len();
    }

    fn update(&mut self, matrix: &[AlignedRow], _options: &ChartOptions) {
        self.calls.push("update");
        self.last_rows = matrix.len();
    }

    fn destroy(&mut self) {
        self.calls.push("destroy");
        self.last_rows = 0;
    }
}

// ── Products ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_products_load_and_sort() {
    let source = MemorySource::default().reply_products(ProductsResponse::ok(vec![
        product("tea", "green", 310.0),
        product("coffee", "arabica", 1234.5),
        product("tea", "black", 250.0),
    ]));
    let app = AppViewState::new(source, ViewConfig::default());

    assert_eq!(app.product_load_state().await, LoadState::Idle);
    assert!(!app.is_table_visible().await);

    let outcome = app.load_products().await;
    assert_eq!(outcome, ProductLoadOutcome::Loaded(3));

    let products = app.products().await;
    let order: Vec<_> = products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(order, ["arabica", "green", "black"]);
    assert_eq!(app.format_price(&products[0].price), "RUB 1,234.50");
    assert!(app.is_table_visible().await);
    assert!(app.is_refresh_available().await);
    assert!(!app.has_messages().await);

    let loaded = app.last_loaded().await.expect("load time recorded");
    let later = loaded + chrono::Duration::minutes(5);
    assert_eq!(
        app.time_since_update_at(later).await.as_deref(),
        Some("5 minutes ago")
    );
}

#[tokio::test]
async fn test_soft_error_warns_and_keeps_products() {
    let source = MemorySource::default()
        .reply_products(ProductsResponse::ok(vec![product("tea", "green", 300.0)]))
        .reply_products(ProductsResponse::err("Database is being updated"));
    let app = AppViewState::new(source, ViewConfig::default());

    app.load_products().await;
    let before = app.products().await;
    let loaded_at = app.last_loaded().await;

    let outcome = app.load_products().await;
    assert_eq!(outcome, ProductLoadOutcome::SoftError);

    let messages = app.messages().await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].severity, Severity::Warning);
    assert_eq!(messages[0].body, "Database is being updated");
    assert_eq!(app.products().await, before);
    assert_eq!(app.last_loaded().await, loaded_at);
    assert!(!app.is_products_loading().await);
    assert_eq!(app.product_load_state().await, LoadState::Failed);
}

#[tokio::test]
async fn test_transport_failure_queues_one_error() {
    let source = MemorySource::default().fail_products();
    let app = AppViewState::new(source, ViewConfig::default());

    let outcome = app.load_products().await;
    assert_eq!(outcome, ProductLoadOutcome::TransportFailure);

    let messages = app.messages().await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].severity, Severity::Error);
    assert_eq!(messages[0].header, "Product price");
    assert_eq!(messages[0].body, "Failed to load products");
    assert!(!app.is_products_loading().await);
    assert!(app.last_loaded().await.is_none());
    assert!(!app.is_table_visible().await);
}

#[tokio::test]
async fn test_failures_accumulate_until_dismissed() {
    let source = MemorySource::default().fail_products().fail_products();
    let app = AppViewState::new(source, ViewConfig::default());

    app.load_products().await;
    app.refresh_products().await;
    assert_eq!(app.messages().await.len(), 2);

    app.dismiss_message(0).await;
    assert_eq!(app.messages().await.len(), 1);

    app.clear_messages().await;
    assert!(!app.has_messages().await);
}

#[tokio::test]
async fn test_refresh_while_loading_is_noop() {
    let source = MemorySource::default()
        .gate_products()
        .reply_products(ProductsResponse::ok(vec![product("tea", "green", 1.0)]));
    let app = AppViewState::new(source, ViewConfig::default());

    let probe = async {
        tokio::task::yield_now().await;
        assert!(app.is_products_loading().await);
        assert!(!app.is_refresh_available().await);
        assert_eq!(app.refresh_products().await, None);
        app.source().release_products();
    };
    let (outcome, ()) = tokio::join!(app.load_products(), probe);

    assert_eq!(outcome, ProductLoadOutcome::Loaded(1));
    assert_eq!(app.source().product_calls.load(Ordering::SeqCst), 1);
    assert!(app.is_refresh_available().await);
}

// ── Chart ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_two_products_align_end_to_end() {
    let source = MemorySource::default().with_prices(
        4,
        PricesResponse::ok(vec![
            history("A", &[(100, 5.0), (200, 6.0)]),
            history("B", &[(150, 9.0)]),
        ]),
    );
    let app = AppViewState::new(source, ViewConfig::default());

    let outcome = app.select_category(CategoryId::new(4)).await;
    assert_eq!(outcome, ChartLoadOutcome::Loaded(3));

    let data = app.chart_data().await;
    assert_eq!(data.labels, ["Update time", "A", "B"]);
    assert_eq!(
        data.matrix,
        vec![
            AlignedRow {
                timestamp: at(100),
                values: vec![dec(5), None],
            },
            AlignedRow {
                timestamp: at(150),
                values: vec![dec(5), dec(9)],
            },
            AlignedRow {
                timestamp: at(200),
                values: vec![dec(6), dec(9)],
            },
        ]
    );
    assert_eq!(
        serde_json::to_value(&data.matrix[1]).unwrap(),
        serde_json::json!([150000, 5.0, 9.0])
    );

    let options = app.chart_options().await;
    assert_eq!(options.labels, data.labels);
    assert!(app.is_chart_visible().await);
    assert_eq!(app.chart_load_state().await, LoadState::Loaded);
}

#[tokio::test]
async fn test_sparse_policy_leaves_gaps() {
    let source = MemorySource::default().with_prices(
        4,
        PricesResponse::ok(vec![
            history("A", &[(100, 5.0), (200, 6.0)]),
            history("B", &[(150, 9.0)]),
        ]),
    );
    let config = ViewConfig::default().with_align_policy(AlignPolicy::Sparse);
    let app = AppViewState::new(source, config);

    app.select_category(CategoryId::new(4)).await;
    let data = app.chart_data().await;
    assert_eq!(data.matrix[1].values, vec![None, dec(9)]);
    assert_eq!(data.matrix[2].values, vec![dec(6), None]);
}

#[tokio::test]
async fn test_single_point_chart_stays_hidden() {
    let source = MemorySource::default()
        .with_prices(1, PricesResponse::ok(vec![history("A", &[(100, 5.0)])]));
    let app = AppViewState::new(source, ViewConfig::default());

    let outcome = app.select_category(CategoryId::new(1)).await;
    assert_eq!(outcome, ChartLoadOutcome::Loaded(1));
    assert!(!app.is_chart_visible().await);
}

#[tokio::test]
async fn test_chart_transport_failure_keeps_previous_chart() {
    let source = MemorySource::default().with_prices(
        1,
        PricesResponse::ok(vec![history("A", &[(100, 5.0), (200, 6.0)])]),
    );
    let app = AppViewState::new(source, ViewConfig::default());
    app.select_category(CategoryId::new(1)).await;

    // Category 2 has no scripted reply: the fetch times out.
    let outcome = app.select_category(CategoryId::new(2)).await;
    assert_eq!(outcome, ChartLoadOutcome::TransportFailure);
    assert!(app.is_chart_visible().await);
    assert_eq!(app.chart_load_state().await, LoadState::Failed);

    let messages = app.messages().await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].severity, Severity::Error);
    assert_eq!(messages[0].header, "Price history");
}

#[tokio::test]
async fn test_chart_load_runs_alongside_product_load() {
    let source = MemorySource::default()
        .gate_products()
        .reply_products(ProductsResponse::ok(vec![product("tea", "green", 1.0)]))
        .with_prices(
            7,
            PricesResponse::ok(vec![history("A", &[(100, 5.0), (200, 6.0)])]),
        );
    let app = AppViewState::new(source, ViewConfig::default());

    let probe = async {
        tokio::task::yield_now().await;
        let outcome = app.select_category(CategoryId::new(7)).await;
        assert_eq!(outcome, ChartLoadOutcome::Loaded(2));
        assert!(app.is_chart_visible().await);
        assert!(app.is_products_loading().await);
        app.source().release_products();
    };
    let (outcome, ()) = tokio::join!(app.load_products(), probe);

    assert_eq!(outcome, ProductLoadOutcome::Loaded(1));
    assert!(!app.is_products_loading().await);
    assert!(!app.is_chart_loading().await);
}

#[tokio::test]
async fn test_superseded_category_is_discarded() {
    let source = MemorySource::default()
        .gate_category(1)
        .with_prices(1, PricesResponse::ok(vec![history("old", &[(1, 1.0), (2, 1.0)])]))
        .with_prices(2, PricesResponse::ok(vec![history("new", &[(1, 2.0), (2, 2.0)])]));
    let app = AppViewState::new(source, ViewConfig::default());

    let probe = async {
        tokio::task::yield_now().await;
        assert!(app.is_chart_loading().await);
        let outcome = app.select_category(CategoryId::new(2)).await;
        assert_eq!(outcome, ChartLoadOutcome::Loaded(2));
        assert!(!app.is_chart_loading().await);
        app.source().release_category();
    };
    let (first, ()) = tokio::join!(app.select_category(CategoryId::new(1)), probe);

    assert_eq!(first, ChartLoadOutcome::Discarded);
    assert_eq!(app.chart_data().await.labels, ["Update time", "new"]);
    assert_eq!(app.selected_category().await, Some(CategoryId::new(2)));
    assert!(!app.is_chart_loading().await);
    assert_eq!(app.source().price_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_last_response_wins_applies_late_reply() {
    let source = MemorySource::default()
        .gate_category(1)
        .with_prices(1, PricesResponse::ok(vec![history("old", &[(1, 1.0), (2, 1.0)])]))
        .with_prices(2, PricesResponse::ok(vec![history("new", &[(1, 2.0), (2, 2.0)])]));
    let config = ViewConfig::default().with_stale_policy(StaleResponsePolicy::LastResponseWins);
    let app = AppViewState::new(source, config);

    let probe = async {
        tokio::task::yield_now().await;
        app.select_category(CategoryId::new(2)).await;
        app.source().release_category();
    };
    let (first, ()) = tokio::join!(app.select_category(CategoryId::new(1)), probe);

    assert_eq!(first, ChartLoadOutcome::Loaded(2));
    assert_eq!(app.chart_data().await.labels, ["Update time", "old"]);
    assert!(!app.is_chart_loading().await);
}

#[tokio::test]
async fn test_figure_follows_chart_lifecycle() {
    let source = MemorySource::default()
        .with_prices(1, PricesResponse::ok(vec![history("A", &[(1, 1.0), (2, 2.0)])]))
        .with_prices(2, PricesResponse::ok(vec![history("B", &[(1, 1.0), (2, 2.0), (3, 3.0)])]));
    let app = AppViewState::new(source, ViewConfig::default());
    let mut figure = ChartFigure::new(RecordingSink::default());

    assert_eq!(app.sync_figure(&mut figure).await, FigureAction::None);

    app.select_category(CategoryId::new(1)).await;
    assert_eq!(app.sync_figure(&mut figure).await, FigureAction::Rendered);

    app.select_category(CategoryId::new(2)).await;
    assert_eq!(app.sync_figure(&mut figure).await, FigureAction::Updated);
    assert_eq!(figure.sink().last_rows, 3);

    app.hide_chart().await;
    assert_eq!(app.sync_figure(&mut figure).await, FigureAction::Destroyed);
    assert_eq!(app.sync_figure(&mut figure).await, FigureAction::None);

    assert_eq!(
        figure.into_sink().calls,
        vec!["render", "update", "destroy"]
    );
}
