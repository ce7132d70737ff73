use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const GRAY: Self = Self::rgb(0.5, 0.5, 0.5);
    pub const DARK_GRAY: Self = Self::rgb(0.66, 0.66, 0.66);
    pub const LIGHT_GRAY: Self = Self::rgb(0.83, 0.83, 0.83);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Returns the same color with its alpha channel replaced.
    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Returns the same color with its alpha channel scaled by `factor`.
    #[must_use]
    pub fn scaled_alpha(self, factor: f64) -> Self {
        self.with_alpha(self.alpha * factor)
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Fill rule applied when a path is filled or used as a clip region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillRule {
    Winding,
    #[default]
    EvenOdd,
}

/// One command of a vector path in local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    /// Circular endpoint arc from the current point to `(x, y)`.
    ///
    /// An endpoint arc cannot represent a full turn; full circles use
    /// [`PathCommand::Circle`].
    ArcTo {
        radius: f64,
        large_arc: bool,
        clockwise: bool,
        x: f64,
        y: f64,
    },
    /// Full circle as its own subpath.
    Circle {
        cx: f64,
        cy: f64,
        radius: f64,
    },
    Close,
}

/// Vector path built from straight segments and circular arcs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    commands: SmallVec<[PathCommand; 8]>,
    fill_rule: FillRule,
}

impl Path {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    #[must_use]
    pub fn fill_rule(&self) -> FillRule {
        self.fill_rule
    }

    pub fn set_fill_rule(&mut self, rule: FillRule) {
        self.fill_rule = rule;
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(PathCommand::MoveTo { x, y });
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(PathCommand::LineTo { x, y });
    }

    pub fn arc_to(&mut self, radius: f64, large_arc: bool, clockwise: bool, x: f64, y: f64) {
        self.commands.push(PathCommand::ArcTo {
            radius,
            large_arc,
            clockwise,
            x,
            y,
        });
    }

    pub fn add_circle(&mut self, cx: f64, cy: f64, radius: f64) {
        self.commands.push(PathCommand::Circle { cx, cy, radius });
    }

    pub fn close(&mut self) {
        self.commands.push(PathCommand::Close);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn validate(&self) -> ChartResult<()> {
        for command in &self.commands {
            let finite = match *command {
                PathCommand::MoveTo { x, y } | PathCommand::LineTo { x, y } => {
                    x.is_finite() && y.is_finite()
                }
                PathCommand::ArcTo { radius, x, y, .. } => {
                    radius.is_finite() && radius >= 0.0 && x.is_finite() && y.is_finite()
                }
                PathCommand::Circle { cx, cy, radius } => {
                    cx.is_finite() && cy.is_finite() && radius.is_finite() && radius >= 0.0
                }
                PathCommand::Close => true,
            };
            if !finite {
                return Err(ChartError::InvalidData(
                    "path coordinates must be finite and radii non-negative".to_owned(),
                ));
            }
        }
        Ok(())
    }
}

/// Measured extents of a single line of text.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
}
