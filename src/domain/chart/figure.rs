//! Bridge between [`ChartViewState`] and a concrete chart renderer.

use super::options::ChartOptions;
use super::state::ChartViewState;
use super::AlignedRow;

/// A chart-rendering backend (a JS charting library, a TUI canvas, a test double).
pub trait ChartSink {
    /// Create the figure.
    fn render(&mut self, matrix: &[AlignedRow], options: &ChartOptions);
    /// Redraw an existing figure with new data.
    fn update(&mut self, matrix: &[AlignedRow], options: &ChartOptions);
    /// Tear the figure down.
    fn destroy(&mut self);
}

/// What [`ChartFigure::sync`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FigureAction {
    None,
    Rendered,
    Updated,
    Destroyed,
}

/// Owns a sink and the figure lifecycle.
///
/// The figure is created lazily, the first time the state becomes visible, then
/// updated in place. When the state stops being visible the figure is destroyed
/// rather than drawn empty.
#[derive(Debug)]
pub struct ChartFigure<S> {
    sink: S,
    created: bool,
}

impl<S: ChartSink> ChartFigure<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            created: false,
        }
    }

    /// Bring the figure in line with `state`.
    pub fn sync(&mut self, state: &ChartViewState) -> FigureAction {
        match (state.is_visible(), self.created) {
            (false, false) => FigureAction::None,
            (false, true) => {
                self.sink.destroy();
                self.created = false;
                FigureAction::Destroyed
            }
            (true, true) => {
                self.sink.update(state.matrix(), state.options());
                FigureAction::Updated
            }
            (true, false) => {
                self.sink.render(state.matrix(), state.options());
                self.created = true;
                FigureAction::Rendered
            }
        }
    }

    pub fn is_created(&self) -> bool {
        self.created
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
