//! Chart rendering options.
//!
//! A fixed set of named hints handed to the chart sink. None of them affect the
//! aligned data; they only steer how the renderer draws it. Field names serialize
//! in camelCase so the struct can be passed straight to a JavaScript renderer.

use serde::{Deserialize, Serialize};

/// When the legend is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Legend {
    #[default]
    Always,
    Follow,
    OnMouseOver,
    Never,
}

/// Rendering hints for the price-history chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartOptions {
    /// Figure width in pixels; `None` fills the container.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Figure height in pixels; `None` fills the container.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Draw lines across `null` gaps. Default `true`.
    pub connect_separated_points: bool,
    /// Mark points that sit next to a gap. Default `true`.
    pub draw_gap_edge_points: bool,
    /// Step rendering, matching carry-forward alignment. Default `true`.
    pub step_plot: bool,
    /// Column labels, replaced on every data update.
    pub labels: Vec<String>,
    pub legend: Legend,
    /// Radius of the highlighted point. Default `3`.
    pub highlight_circle_size: u32,
    /// One legend line per series. Default `true`.
    pub labels_separate_lines: bool,
    /// How far past the data edges the user may pan.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pan_edge_fraction: Option<f64>,
    pub show_labels_on_highlight: bool,
    /// Border drawn around each line. Default `0`.
    pub stroke_border_width: f64,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            connect_separated_points: true,
            draw_gap_edge_points: true,
            step_plot: true,
            labels: Vec::new(),
            legend: Legend::Always,
            highlight_circle_size: 3,
            labels_separate_lines: true,
            pan_edge_fraction: None,
            show_labels_on_highlight: true,
            stroke_border_width: 0.0,
        }
    }
}

impl ChartOptions {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_legend(mut self, legend: Legend) -> Self {
        self.legend = legend;
        self
    }

    pub fn with_step_plot(mut self, step_plot: bool) -> Self {
        self.step_plot = step_plot;
        self
    }

    pub fn with_pan_edge_fraction(mut self, fraction: f64) -> Self {
        self.pan_edge_fraction = Some(fraction);
        self
    }
}
