use crate::error::ChartResult;
use crate::render::{Canvas, ClipOp, Color, Path, StrokeStyle, TextMetrics};

/// One recorded [`Canvas`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasCommand {
    Clear {
        color: Color,
    },
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    },
    FillPath {
        path: Path,
        color: Color,
    },
    StrokeRoundRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        corner_radius: f64,
        style: StrokeStyle,
    },
    DrawText {
        text: String,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
    },
    Translate {
        dx: f64,
        dy: f64,
    },
    RotateDegrees {
        degrees: f64,
    },
    Save,
    Restore,
    ResetTransform,
    ClipPath {
        path: Path,
        op: ClipOp,
    },
}

/// Headless canvas used by tests and headless chart usage.
///
/// It records every draw call in order and still validates colors and
/// paths, so tests can catch invalid geometry before a real backend is
/// introduced. Text metrics are deterministic: each char advances
/// `0.6 * font_size`, line height equals the font size.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<CanvasCommand>,
}

impl RecordingCanvas {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn commands(&self) -> &[CanvasCommand] {
        &self.commands
    }

    pub fn reset(&mut self) {
        self.commands.clear();
    }

    /// Filled paths with their colors, in draw order.
    #[must_use]
    pub fn filled_paths(&self) -> Vec<(&Path, Color)> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                CanvasCommand::FillPath { path, color } => Some((path, *color)),
                _ => None,
            })
            .collect()
    }

    /// Filled rectangles as `(x, y, width, height, color)`, in draw order.
    #[must_use]
    pub fn filled_rects(&self) -> Vec<(f64, f64, f64, f64, Color)> {
        self.commands
            .iter()
            .filter_map(|command| match *command {
                CanvasCommand::FillRect {
                    x,
                    y,
                    width,
                    height,
                    color,
                } => Some((x, y, width, height, color)),
                _ => None,
            })
            .collect()
    }

    /// Drawn text strings, in draw order.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                CanvasCommand::DrawText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.commands.push(CanvasCommand::Clear { color });
        Ok(())
    }

    fn fill_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
        _antialias: bool,
    ) -> ChartResult<()> {
        color.validate()?;
        self.commands.push(CanvasCommand::FillRect {
            x,
            y,
            width,
            height,
            color,
        });
        Ok(())
    }

    fn fill_path(&mut self, path: &Path, color: Color, _antialias: bool) -> ChartResult<()> {
        path.validate()?;
        color.validate()?;
        self.commands.push(CanvasCommand::FillPath {
            path: path.clone(),
            color,
        });
        Ok(())
    }

    fn stroke_round_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        corner_radius: f64,
        style: StrokeStyle,
    ) -> ChartResult<()> {
        style.color.validate()?;
        self.commands.push(CanvasCommand::StrokeRoundRect {
            x,
            y,
            width,
            height,
            corner_radius,
            style,
        });
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
    ) -> ChartResult<()> {
        color.validate()?;
        self.commands.push(CanvasCommand::DrawText {
            text: text.to_owned(),
            x,
            y,
            font_size_px,
            color,
        });
        Ok(())
    }

    fn measure_text(&mut self, text: &str, font_size_px: f64) -> TextMetrics {
        TextMetrics {
            width: text.chars().count() as f64 * font_size_px * 0.6,
            height: font_size_px,
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.commands.push(CanvasCommand::Translate { dx, dy });
    }

    fn rotate_degrees(&mut self, degrees: f64) {
        self.commands.push(CanvasCommand::RotateDegrees { degrees });
    }

    fn save(&mut self) -> ChartResult<()> {
        self.commands.push(CanvasCommand::Save);
        Ok(())
    }

    fn restore(&mut self) -> ChartResult<()> {
        self.commands.push(CanvasCommand::Restore);
        Ok(())
    }

    fn reset_transform(&mut self) {
        self.commands.push(CanvasCommand::ResetTransform);
    }

    fn clip_path(&mut self, path: &Path, op: ClipOp, _antialias: bool) -> ChartResult<()> {
        path.validate()?;
        self.commands.push(CanvasCommand::ClipPath {
            path: path.clone(),
            op,
        });
        Ok(())
    }
}
