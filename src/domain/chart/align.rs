//! Time-series alignment: N independent price series → one timestamp-ordered matrix.
//!
//! Every observation becomes its own row. Two series reporting the same timestamp
//! produce two rows with that timestamp, in the order the series were given.

use super::{AlignedRow, AlignedSeries};
use crate::domain::price::{PricePoint, ProductSeries};
use crate::shared::from_unix_seconds;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Label of the fixed first (x-axis) column.
pub const UPDATE_TIME_LABEL: &str = "Update time";

/// How columns other than the observing series are filled on each row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignPolicy {
    /// Hold each column's last emitted value (step rendering).
    #[default]
    CarryForward,
    /// Leave every other column `null`.
    Sparse,
}

/// Align with the default [`AlignPolicy::CarryForward`] policy.
pub fn align(series: &[ProductSeries]) -> AlignedSeries {
    align_with(series, AlignPolicy::CarryForward)
}

/// Build labels and the aligned matrix for `series`.
///
/// Pure: the carry-forward state is rebuilt on every call.
pub fn align_with(series: &[ProductSeries], policy: AlignPolicy) -> AlignedSeries {
    let mut labels = Vec::with_capacity(series.len() + 1);
    labels.push(UPDATE_TIME_LABEL.to_string());
    labels.extend(series.iter().map(|s| s.product_name.clone()));

    let mut points: Vec<(usize, &PricePoint)> = series
        .iter()
        .enumerate()
        .flat_map(|(index, s)| s.prices.iter().map(move |p| (index, p)))
        .collect();
    // sort_by_key is stable: equal timestamps keep flattening order.
    points.sort_by_key(|(_, p)| p.timestamp);

    let mut last_seen: Vec<Option<Decimal>> = vec![None; series.len()];
    let matrix = points
        .into_iter()
        .map(|(index, point)| {
            let values = match policy {
                AlignPolicy::CarryForward => {
                    last_seen[index] = Some(point.price);
                    last_seen.clone()
                }
                AlignPolicy::Sparse => {
                    let mut row = vec![None; series.len()];
                    row[index] = Some(point.price);
                    row
                }
            };
            AlignedRow {
                timestamp: to_datetime(point.timestamp),
                values,
            }
        })
        .collect();

    AlignedSeries { labels, matrix }
}

/// Out-of-range seconds clamp to chrono's bounds so every point keeps its row.
fn to_datetime(seconds: i64) -> DateTime<Utc> {
    from_unix_seconds(seconds).unwrap_or(if seconds < 0 {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    })
}
