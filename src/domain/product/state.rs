//! Product list state — app-owned, SDK-provided load logic.

use super::Product;
use crate::domain::message::{Message, MessageQueue};
use crate::domain::Reply;
use crate::error::SdkError;
use crate::shared::{LoadState, LoadTicket, RequestTracker, StaleResponsePolicy};
use chrono::{DateTime, Utc};

/// Header attached to every product-list notice.
pub const PRODUCT_MESSAGE_HEADER: &str = "Product price";

/// Body of the notice pushed on a transport failure.
pub const PRODUCT_LOAD_FAILED: &str = "Failed to load products";

/// What a finished product load did to the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductLoadOutcome {
    /// List replaced with this many products.
    Loaded(usize),
    /// Server answered `ok: false`; a warning was queued.
    SoftError,
    /// Request never produced a response; an error was queued.
    TransportFailure,
    /// Response belonged to a superseded request and was ignored.
    Discarded,
}

/// The product table: latest list, load flag, last successful load time.
///
/// The app owns instances of this type. The SDK provides the load transitions;
/// the fetch itself happens between [`begin_load`](Self::begin_load) and
/// [`finish_load`](Self::finish_load).
#[derive(Debug, Clone, Default)]
pub struct ProductListState {
    products: Vec<Product>,
    requests: RequestTracker,
    last_loaded: Option<DateTime<Utc>>,
}

impl ProductListState {
    pub fn new(policy: StaleResponsePolicy) -> Self {
        Self {
            products: Vec::new(),
            requests: RequestTracker::new(policy),
            last_loaded: None,
        }
    }

    /// Products sorted by category name.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn load_state(&self) -> LoadState {
        self.requests.state()
    }

    pub fn is_loading(&self) -> bool {
        self.requests.is_loading()
    }

    pub fn is_refresh_available(&self) -> bool {
        !self.is_loading()
    }

    pub fn is_table_visible(&self) -> bool {
        !self.products.is_empty()
    }

    pub fn last_loaded(&self) -> Option<DateTime<Utc>> {
        self.last_loaded
    }

    /// Human-readable age of the last successful load, e.g. `"5 minutes ago"`.
    pub fn time_since_update(&self, now: DateTime<Utc>) -> Option<String> {
        self.last_loaded
            .map(|at| crate::shared::fmt::from_now(at, now))
    }

    /// Mark the list as loading. The current products stay visible.
    pub fn begin_load(&mut self) -> LoadTicket {
        let ticket = self.requests.begin();
        tracing::debug!(generation = ticket.generation(), "Product load started");
        ticket
    }

    /// Like [`begin_load`](Self::begin_load), but refuses while a load is in flight.
    pub fn begin_refresh(&mut self) -> Option<LoadTicket> {
        if self.is_loading() {
            tracing::debug!("Product refresh ignored, load already in flight");
            return None;
        }
        Some(self.begin_load())
    }

    /// Apply the outcome of the request behind `ticket`.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Reply<Vec<Product>>, SdkError>,
        now: DateTime<Utc>,
        messages: &mut MessageQueue,
    ) -> ProductLoadOutcome {
        if !self.requests.accepts(ticket) {
            tracing::debug!(
                generation = ticket.generation(),
                "Discarding stale product response"
            );
            return ProductLoadOutcome::Discarded;
        }

        match result {
            Ok(Reply::Ok(mut products)) => {
                products.sort_by(|a, b| a.category.cmp(&b.category));
                let count = products.len();
                self.products = products;
                self.last_loaded = Some(now);
                self.requests.settle(ticket, true);
                ProductLoadOutcome::Loaded(count)
            }
            Ok(Reply::SoftError(text)) => {
                tracing::warn!("Product list rejected by server: {}", text);
                messages.push(Message::warn(text, PRODUCT_MESSAGE_HEADER));
                self.requests.settle(ticket, false);
                ProductLoadOutcome::SoftError
            }
            Err(err) => {
                tracing::warn!("Product list request failed: {}", err);
                messages.push(Message::error(PRODUCT_LOAD_FAILED, PRODUCT_MESSAGE_HEADER));
                self.requests.settle(ticket, false);
                ProductLoadOutcome::TransportFailure
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::message::Severity;
    use crate::error::HttpError;
    use crate::shared::CategoryId;
    use rust_decimal::Decimal;

    fn product(category: &str, name: &str) -> Product {
        Product {
            category_id: CategoryId::new(1),
            category: category.to_string(),
            name: name.to_string(),
            url: String::new(),
            shop: "shop".to_string(),
            price: Decimal::new(100, 0),
            updated: DateTime::<Utc>::from_timestamp(100, 0).unwrap(),
        }
    }

    fn now() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_success_sorts_by_category_stably() {
        let mut state = ProductListState::default();
        let mut messages = MessageQueue::new();
        let ticket = state.begin_load();
        assert!(state.is_loading());
        assert!(!state.is_refresh_available());

        let outcome = state.finish_load(
            ticket,
            Ok(Reply::Ok(vec![
                product("Phones", "p1"),
                product("Laptops", "l1"),
                product("Phones", "p2"),
                product("Laptops", "l2"),
            ])),
            now(),
            &mut messages,
        );

        assert_eq!(outcome, ProductLoadOutcome::Loaded(4));
        let names: Vec<_> = state.products().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["l1", "l2", "p1", "p2"]);
        assert!(!state.is_loading());
        assert_eq!(state.load_state(), LoadState::Loaded);
        assert_eq!(state.last_loaded(), Some(now()));
        assert!(state.is_table_visible());
        assert!(messages.is_empty());
    }

    #[test]
    fn test_soft_error_keeps_products_and_timestamp() {
        let mut state = ProductListState::default();
        let mut messages = MessageQueue::new();
        let t = state.begin_load();
        state.finish_load(t, Ok(Reply::Ok(vec![product("A", "a")])), now(), &mut messages);

        let t = state.begin_refresh().unwrap();
        let later = now() + chrono::Duration::hours(1);
        let outcome = state.finish_load(
            t,
            Ok(Reply::SoftError("bad category".to_string())),
            later,
            &mut messages,
        );

        assert_eq!(outcome, ProductLoadOutcome::SoftError);
        assert_eq!(state.products().len(), 1);
        assert_eq!(state.last_loaded(), Some(now()));
        assert!(!state.is_loading());
        assert_eq!(state.load_state(), LoadState::Failed);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages.messages()[0].severity, Severity::Warning);
        assert_eq!(messages.messages()[0].body, "bad category");
    }

    #[test]
    fn test_transport_failure_queues_error() {
        let mut state = ProductListState::default();
        let mut messages = MessageQueue::new();
        let t = state.begin_load();
        let outcome = state.finish_load(
            t,
            Err(SdkError::Http(HttpError::Timeout)),
            now(),
            &mut messages,
        );

        assert_eq!(outcome, ProductLoadOutcome::TransportFailure);
        assert!(!state.is_loading());
        assert_eq!(messages.len(), 1);
        let m = &messages.messages()[0];
        assert!(m.is_error());
        assert_eq!(m.header, PRODUCT_MESSAGE_HEADER);
        assert!(state.last_loaded().is_none());
    }

    #[test]
    fn test_refresh_while_loading_is_noop() {
        let mut state = ProductListState::default();
        let first = state.begin_load();
        assert!(state.begin_refresh().is_none());
        assert!(state.is_loading());

        let mut messages = MessageQueue::new();
        state.finish_load(first, Ok(Reply::Ok(vec![])), now(), &mut messages);
        assert!(state.begin_refresh().is_some());
    }

    #[test]
    fn test_stale_response_discarded() {
        let mut state = ProductListState::new(StaleResponsePolicy::LastRequestWins);
        let mut messages = MessageQueue::new();
        let old = state.begin_load();
        let new = state.begin_load();

        let outcome = state.finish_load(
            old,
            Ok(Reply::Ok(vec![product("Old", "o")])),
            now(),
            &mut messages,
        );
        assert_eq!(outcome, ProductLoadOutcome::Discarded);
        assert!(state.products().is_empty());
        assert!(state.is_loading());

        state.finish_load(new, Ok(Reply::Ok(vec![product("New", "n")])), now(), &mut messages);
        assert_eq!(state.products()[0].name, "n");
        assert!(!state.is_loading());
    }

    #[test]
    fn test_time_since_update() {
        let mut state = ProductListState::default();
        assert!(state.time_since_update(now()).is_none());
        let mut messages = MessageQueue::new();
        let t = state.begin_load();
        state.finish_load(t, Ok(Reply::Ok(vec![])), now(), &mut messages);
        let later = now() + chrono::Duration::minutes(5);
        assert_eq!(state.time_since_update(later).as_deref(), Some("5 minutes ago"));
        assert!(!state.is_table_visible());
    }
}
