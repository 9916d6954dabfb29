//! Chart domain — aligned multi-series matrix, options, view state, rendering.

pub mod align;
pub mod figure;
pub mod options;
pub mod state;

use chrono::{DateTime, Utc};
use rust_decimal::prelude::*;
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

pub use align::{align, align_with, AlignPolicy, UPDATE_TIME_LABEL};
pub use figure::{ChartFigure, ChartSink, FigureAction};
pub use options::{ChartOptions, Legend};
pub use state::{
    ChartEvent, ChartLoadOutcome, ChartViewState, CHART_LOAD_FAILED, CHART_MESSAGE_HEADER,
};

/// One matrix row: the x-axis time followed by one value per series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedRow {
    pub timestamp: DateTime<Utc>,
    pub values: Vec<Option<Decimal>>,
}

impl AlignedRow {
    pub fn value(&self, series: usize) -> Option<Decimal> {
        self.values.get(series).copied().flatten()
    }
}

/// Serializes as `[epoch_ms, v0, v1, …]` with `null` gaps, the row layout
/// JavaScript charting libraries take directly.
impl Serialize for AlignedRow {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.values.len() + 1))?;
        seq.serialize_element(&self.timestamp.timestamp_millis())?;
        for value in &self.values {
            seq.serialize_element(&value.and_then(|v| v.to_f64()))?;
        }
        seq.end()
    }
}

/// Rows ordered by timestamp, ties in input order.
pub type ChartMatrix = Vec<AlignedRow>;

/// Output of the aligner: column labels plus the matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlignedSeries {
    /// `["Update time", product_0, …]`.
    pub labels: Vec<String>,
    pub matrix: ChartMatrix,
}

impl AlignedSeries {
    /// Labels only; the state of an empty chart.
    pub fn empty() -> Self {
        Self {
            labels: vec![UPDATE_TIME_LABEL.to_string()],
            matrix: Vec::new(),
        }
    }

    /// Number of value columns (excludes the time column).
    pub fn series_count(&self) -> usize {
        self.labels.len().saturating_sub(1)
    }
}

impl Default for AlignedSeries {
    fn default() -> Self {
        Self::empty()
    }
}
