mod primitives;
mod recording;

pub use primitives::{Color, FillRule, Path, PathCommand, TextMetrics};
pub use recording::{CanvasCommand, RecordingCanvas};

use crate::error::ChartResult;

/// Clip set operation applied by [`Canvas::clip_path`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipOp {
    /// Restrict the clip region to its intersection with the path.
    Intersect,
    /// Remove the path area from the clip region.
    Difference,
}

/// Stroke parameters for outlined shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub width: f64,
    pub color: Color,
    /// `Some([on, off])` draws a dashed outline.
    pub dash: Option<[f64; 2]>,
}

/// Contract implemented by any drawing surface a chart paints on.
///
/// Charts draw immediate-mode: they clip, transform and fill during one
/// paint pass, so backends expose the surface operations directly instead
/// of consuming a pre-materialized scene.
///
/// `draw_text` places the top-left corner of the line at `(x, y)`;
/// `measure_text` must agree with the metrics `draw_text` uses.
pub trait Canvas {
    fn clear(&mut self, color: Color) -> ChartResult<()>;

    fn fill_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
        antialias: bool,
    ) -> ChartResult<()>;

    fn fill_path(&mut self, path: &Path, color: Color, antialias: bool) -> ChartResult<()>;

    fn stroke_round_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        corner_radius: f64,
        style: StrokeStyle,
    ) -> ChartResult<()>;

    fn draw_text(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
    ) -> ChartResult<()>;

    fn measure_text(&mut self, text: &str, font_size_px: f64) -> TextMetrics;

    fn translate(&mut self, dx: f64, dy: f64);

    fn rotate_degrees(&mut self, degrees: f64);

    /// Pushes the current transform and clip state.
    fn save(&mut self) -> ChartResult<()>;

    /// Pops back to the most recently saved state.
    fn restore(&mut self) -> ChartResult<()>;

    /// Drops any transform left behind by earlier draw calls.
    fn reset_transform(&mut self);

    fn clip_path(&mut self, path: &Path, op: ClipOp, antialias: bool) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::CairoCanvas;
