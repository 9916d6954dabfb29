//! Application view state — the product table, the price chart and the shared
//! message panel, driven by a [`PriceSource`].
//!
//! Each resource has its own load tracker. A chart load started by a category
//! selection runs alongside a product load; the only state both flows write is
//! the message queue. The lock is never held across a fetch.

use crate::domain::chart::{
    AlignPolicy, AlignedSeries, ChartFigure, ChartLoadOutcome, ChartOptions, ChartSink,
    ChartViewState, FigureAction,
};
use crate::domain::message::{Message, MessageQueue};
use crate::domain::price::wire::PricesResponse;
use crate::domain::product::wire::ProductsResponse;
use crate::domain::product::{Product, ProductListState, ProductLoadOutcome};
use crate::error::SdkError;
use crate::shared::fmt::Currency;
use crate::shared::{CategoryId, LoadState, LoadTicket, StaleResponsePolicy, SubscriptionId, Subscribers};

use async_lock::RwLock;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::future::Future;

// ─── PriceSource ─────────────────────────────────────────────────────────────

/// Where the view state gets its data. `PricewatchClient` talks to the REST API;
/// tests and offline builds plug in their own.
///
/// Any `Err` is a transport failure. `ok: false` replies come back as `Ok`.
pub trait PriceSource {
    fn fetch_products(&self) -> impl Future<Output = Result<ProductsResponse, SdkError>>;

    fn fetch_category_prices(
        &self,
        category: CategoryId,
    ) -> impl Future<Output = Result<PricesResponse, SdkError>>;
}

// ─── ViewConfig ──────────────────────────────────────────────────────────────

/// Presentation and load settings, fixed for the lifetime of an [`AppViewState`].
#[derive(Debug, Clone, Default)]
pub struct ViewConfig {
    pub currency: Currency,
    pub chart_options: ChartOptions,
    pub align_policy: AlignPolicy,
    pub stale_policy: StaleResponsePolicy,
}

impl ViewConfig {
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_chart_options(mut self, options: ChartOptions) -> Self {
        self.chart_options = options;
        self
    }

    pub fn with_align_policy(mut self, policy: AlignPolicy) -> Self {
        self.align_policy = policy;
        self
    }

    pub fn with_stale_policy(mut self, policy: StaleResponsePolicy) -> Self {
        self.stale_policy = policy;
        self
    }
}

// ─── ViewEvent ───────────────────────────────────────────────────────────────

/// Change notifications for the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    ProductsChanged { loading: bool, count: usize },
    ChartChanged { loading: bool, visible: bool },
    MessagesChanged { count: usize },
}

// ─── AppViewState ────────────────────────────────────────────────────────────

struct ViewInner {
    products: ProductListState,
    chart: ChartViewState,
    messages: MessageQueue,
}

/// Top-level view state of the dashboard.
///
/// Callbacks are plain closures and the state is meant for one UI thread
/// (`spawn_local` on WASM, a current-thread runtime natively).
pub struct AppViewState<S> {
    source: S,
    currency: Currency,
    inner: RwLock<ViewInner>,
    observers: RwLock<Subscribers<ViewEvent>>,
}

impl<S: PriceSource> AppViewState<S> {
    pub fn new(source: S, config: ViewConfig) -> Self {
        let chart = ChartViewState::new(config.chart_options, config.align_policy)
            .with_stale_policy(config.stale_policy);
        Self {
            source,
            currency: config.currency,
            inner: RwLock::new(ViewInner {
                products: ProductListState::new(config.stale_policy),
                chart,
                messages: MessageQueue::new(),
            }),
            observers: RwLock::new(Subscribers::new()),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    // ── Products ─────────────────────────────────────────────────────────

    /// Load the product table. Previous rows stay visible until the reply lands.
    pub async fn load_products(&self) -> ProductLoadOutcome {
        let ticket = {
            let mut inner = self.inner.write().await;
            inner.products.begin_load()
        };
        self.finish_products(ticket).await
    }

    /// Reload the product table unless a load is already in flight.
    ///
    /// Returns `None` when the request was ignored.
    pub async fn refresh_products(&self) -> Option<ProductLoadOutcome> {
        let ticket = {
            let mut inner = self.inner.write().await;
            inner.products.begin_refresh()
        }?;
        Some(self.finish_products(ticket).await)
    }

    async fn finish_products(&self, ticket: LoadTicket) -> ProductLoadOutcome {
        self.emit_products().await;

        let result = self.source.fetch_products().await.map(Into::into);

        let (outcome, queued) = {
            let mut inner = self.inner.write().await;
            let ViewInner {
                products, messages, ..
            } = &mut *inner;
            let before = messages.len();
            let outcome = products.finish_load(ticket, result, Utc::now(), messages);
            (outcome, messages.len() != before)
        };

        if outcome != ProductLoadOutcome::Discarded {
            self.emit_products().await;
        }
        if queued {
            self.emit_messages().await;
        }
        outcome
    }

    pub async fn products(&self) -> Vec<Product> {
        self.inner.read().await.products.products().to_vec()
    }

    pub async fn product_load_state(&self) -> LoadState {
        self.inner.read().await.products.load_state()
    }

    pub async fn is_products_loading(&self) -> bool {
        self.inner.read().await.products.is_loading()
    }

    pub async fn is_refresh_available(&self) -> bool {
        self.inner.read().await.products.is_refresh_available()
    }

    pub async fn is_table_visible(&self) -> bool {
        self.inner.read().await.products.is_table_visible()
    }

    pub async fn last_loaded(&self) -> Option<DateTime<Utc>> {
        self.inner.read().await.products.last_loaded()
    }

    /// Age of the product table, computed on each call.
    pub async fn time_since_update(&self) -> Option<String> {
        self.time_since_update_at(Utc::now()).await
    }

    pub async fn time_since_update_at(&self, now: DateTime<Utc>) -> Option<String> {
        self.inner.read().await.products.time_since_update(now)
    }

    /// `"RUB 1,234.50"` for the configured currency.
    pub fn format_price(&self, amount: &Decimal) -> String {
        self.currency.display(amount)
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    // ── Chart ────────────────────────────────────────────────────────────

    /// Select a category and load its price history into the chart.
    ///
    /// Accepted while an earlier selection is still loading.
    pub async fn select_category(&self, category: CategoryId) -> ChartLoadOutcome {
        let ticket = {
            let mut inner = self.inner.write().await;
            inner.chart.begin_load(category)
        };
        self.emit_chart().await;

        let result = self
            .source
            .fetch_category_prices(category)
            .await
            .map(Into::into);

        let (outcome, queued) = {
            let mut inner = self.inner.write().await;
            let ViewInner { chart, messages, .. } = &mut *inner;
            let before = messages.len();
            let outcome = chart.finish_load(ticket, result, messages);
            (outcome, messages.len() != before)
        };

        if outcome != ChartLoadOutcome::Discarded {
            self.emit_chart().await;
        }
        if queued {
            self.emit_messages().await;
        }
        outcome
    }

    pub async fn hide_chart(&self) {
        self.inner.write().await.chart.hide();
        self.emit_chart().await;
    }

    pub async fn selected_category(&self) -> Option<CategoryId> {
        self.inner.read().await.chart.category()
    }

    pub async fn chart_data(&self) -> AlignedSeries {
        self.inner.read().await.chart.data().clone()
    }

    pub async fn chart_options(&self) -> ChartOptions {
        self.inner.read().await.chart.options().clone()
    }

    pub async fn chart_load_state(&self) -> LoadState {
        self.inner.read().await.chart.load_state()
    }

    pub async fn is_chart_loading(&self) -> bool {
        self.inner.read().await.chart.is_loading()
    }

    pub async fn is_chart_visible(&self) -> bool {
        self.inner.read().await.chart.is_visible()
    }

    /// Bring a rendered figure in line with the current chart state.
    pub async fn sync_figure<K: ChartSink>(&self, figure: &mut ChartFigure<K>) -> FigureAction {
        let inner = self.inner.read().await;
        figure.sync(&inner.chart)
    }

    // ── Messages ─────────────────────────────────────────────────────────

    pub async fn messages(&self) -> Vec<Message> {
        self.inner.read().await.messages.messages().to_vec()
    }

    pub async fn has_messages(&self) -> bool {
        self.inner.read().await.messages.has_messages()
    }

    pub async fn push_message(&self, message: Message) {
        self.inner.write().await.messages.push(message);
        self.emit_messages().await;
    }

    pub async fn dismiss_message(&self, index: usize) -> Option<Message> {
        let removed = self.inner.write().await.messages.dismiss(index);
        if removed.is_some() {
            self.emit_messages().await;
        }
        removed
    }

    pub async fn clear_messages(&self) {
        self.inner.write().await.messages.clear();
        self.emit_messages().await;
    }

    // ── Observers ────────────────────────────────────────────────────────

    pub async fn subscribe(&self, on_event: impl Fn(&ViewEvent) + 'static) -> SubscriptionId {
        self.observers.write().await.subscribe(on_event)
    }

    pub async fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observers.write().await.unsubscribe(id)
    }

    async fn emit_products(&self) {
        let event = {
            let inner = self.inner.read().await;
            ViewEvent::ProductsChanged {
                loading: inner.products.is_loading(),
                count: inner.products.products().len(),
            }
        };
        self.observers.read().await.notify(&event);
    }

    async fn emit_chart(&self) {
        let event = {
            let inner = self.inner.read().await;
            ViewEvent::ChartChanged {
                loading: inner.chart.is_loading(),
                visible: inner.chart.is_visible(),
            }
        };
        self.observers.read().await.notify(&event);
    }

    async fn emit_messages(&self) {
        let count = self.inner.read().await.messages.len();
        self.observers
            .read()
            .await
            .notify(&ViewEvent::MessagesChanged { count });
    }
}
