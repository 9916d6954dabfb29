//! Chart view state — aligned data, options, visibility.

use super::align::{align_with, AlignPolicy};
use super::options::ChartOptions;
use super::{AlignedRow, AlignedSeries};
use crate::domain::message::{Message, MessageQueue};
use crate::domain::price::ProductSeries;
use crate::domain::Reply;
use crate::error::SdkError;
use crate::shared::{
    CategoryId, LoadState, LoadTicket, RequestTracker, StaleResponsePolicy, SubscriptionId,
    Subscribers,
};

/// Header attached to every price-history notice.
pub const CHART_MESSAGE_HEADER: &str = "Price history";

/// Body of the notice pushed on a transport failure.
pub const CHART_LOAD_FAILED: &str = "Failed to load price history";

/// Fired after every chart mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartEvent {
    /// New data was aligned in.
    Updated { rows: usize, visible: bool },
    /// The matrix was cleared.
    Hidden,
}

/// What a finished price-history load did to the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartLoadOutcome {
    /// Matrix replaced; this many rows.
    Loaded(usize),
    SoftError,
    TransportFailure,
    /// Superseded by a later category selection.
    Discarded,
}

/// Owns the aligned matrix and the options handed to the renderer.
///
/// The chart is visible only with at least two rows; a single point is not a
/// series worth drawing.
#[derive(Debug, Default)]
pub struct ChartViewState {
    data: AlignedSeries,
    options: ChartOptions,
    policy: AlignPolicy,
    requests: RequestTracker,
    category: Option<CategoryId>,
    observers: Subscribers<ChartEvent>,
}

impl ChartViewState {
    pub fn new(options: ChartOptions, policy: AlignPolicy) -> Self {
        Self {
            data: AlignedSeries::empty(),
            options,
            policy,
            requests: RequestTracker::default(),
            category: None,
            observers: Subscribers::new(),
        }
    }

    pub fn with_stale_policy(mut self, policy: StaleResponsePolicy) -> Self {
        self.requests = RequestTracker::new(policy);
        self
    }

    /// Align `series`, replace the matrix and label set, notify observers.
    pub fn set_data(&mut self, series: &[ProductSeries]) {
        self.data = align_with(series, self.policy);
        self.options.labels = self.data.labels.clone();

        let rows = self.data.matrix.len();
        tracing::debug!(rows, series = series.len(), "Chart data aligned");
        self.observers.notify(&ChartEvent::Updated {
            rows,
            visible: self.is_visible(),
        });
    }

    /// Clear the matrix. Observers should tear the figure down.
    pub fn hide(&mut self) {
        self.data.matrix.clear();
        self.observers.notify(&ChartEvent::Hidden);
    }

    pub fn is_visible(&self) -> bool {
        self.data.matrix.len() > 1
    }

    pub fn data(&self) -> &AlignedSeries {
        &self.data
    }

    pub fn labels(&self) -> &[String] {
        &self.data.labels
    }

    pub fn matrix(&self) -> &[AlignedRow] {
        &self.data.matrix
    }

    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    pub fn policy(&self) -> AlignPolicy {
        self.policy
    }

    pub fn load_state(&self) -> LoadState {
        self.requests.state()
    }

    pub fn is_loading(&self) -> bool {
        self.requests.is_loading()
    }

    /// Category of the most recent selection.
    pub fn category(&self) -> Option<CategoryId> {
        self.category
    }

    /// Start loading the history of `category`. Allowed while another load is
    /// in flight; the older one is superseded.
    pub fn begin_load(&mut self, category: CategoryId) -> LoadTicket {
        let ticket = self.requests.begin();
        self.category = Some(category);
        tracing::debug!(
            generation = ticket.generation(),
            category = %category,
            "Price history load started"
        );
        ticket
    }

    /// Apply the outcome of the request behind `ticket`.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Reply<Vec<ProductSeries>>, SdkError>,
        messages: &mut MessageQueue,
    ) -> ChartLoadOutcome {
        if !self.requests.accepts(ticket) {
            tracing::debug!(
                generation = ticket.generation(),
                "Discarding stale price history response"
            );
            return ChartLoadOutcome::Discarded;
        }

        match result {
            Ok(Reply::Ok(series)) => {
                self.requests.settle(ticket, true);
                self.set_data(&series);
                ChartLoadOutcome::Loaded(self.data.matrix.len())
            }
            Ok(Reply::SoftError(text)) => {
                tracing::warn!("Price history rejected by server: {}", text);
                messages.push(Message::warn(text, CHART_MESSAGE_HEADER));
                self.requests.settle(ticket, false);
                ChartLoadOutcome::SoftError
            }
            Err(err) => {
                tracing::warn!("Price history request failed: {}", err);
                messages.push(Message::error(CHART_LOAD_FAILED, CHART_MESSAGE_HEADER));
                self.requests.settle(ticket, false);
                ChartLoadOutcome::TransportFailure
            }
        }
    }

    pub fn subscribe(&mut self, on_event: impl Fn(&ChartEvent) + 'static) -> SubscriptionId {
        self.observers.subscribe(on_event)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }
}
