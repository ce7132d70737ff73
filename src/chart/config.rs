use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Where the legend (description area) is placed relative to the chart.
///
/// `Top` and `Bottom` are accepted but currently produce no legend
/// layout; `None` suppresses the legend and gives the chart body the
/// full surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DescriptionArea {
    #[default]
    None,
    Left,
    Right,
    LeftAndRight,
    Top,
    Bottom,
}

impl DescriptionArea {
    /// Whether this placement currently lays out legend rows.
    #[must_use]
    pub fn has_legend(self) -> bool {
        matches!(self, Self::Left | Self::Right | Self::LeftAndRight)
    }
}

/// Shared chart configuration.
///
/// Serializable so host applications can persist/load chart setup
/// without inventing their own ad-hoc format. Every field is
/// hot-reloadable; setting a new config requests a redraw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default)]
    pub description_position: DescriptionArea,
    /// Space set aside for one legend column, in pixels.
    #[serde(default = "default_description_space")]
    pub description_space: f64,
    /// Padding of the whole element, in pixels.
    #[serde(default = "default_padding")]
    pub padding: f64,
    /// Rotation of the chart body. Does not rotate the legend.
    #[serde(default)]
    pub rotation_degrees: f64,
    #[serde(default = "default_background_color")]
    pub background_color: Color,
    #[serde(default = "default_antialias")]
    pub antialias: bool,
    /// Fractional digits shown for legend values, e.g. 2 renders `5.22`.
    #[serde(default)]
    pub fractional_digits: usize,
    /// Whether legend values display the animated value while a value
    /// change is in flight.
    #[serde(default)]
    pub animate_visible_values: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            description_position: DescriptionArea::default(),
            description_space: default_description_space(),
            padding: default_padding(),
            rotation_degrees: 0.0,
            background_color: default_background_color(),
            antialias: default_antialias(),
            fractional_digits: 0,
            animate_visible_values: false,
        }
    }
}

impl ChartConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_description_position(mut self, position: DescriptionArea) -> Self {
        self.description_position = position;
        self
    }

    #[must_use]
    pub fn with_description_space(mut self, space: f64) -> Self {
        self.description_space = space;
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn with_rotation_degrees(mut self, degrees: f64) -> Self {
        self.rotation_degrees = degrees;
        self
    }

    #[must_use]
    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    #[must_use]
    pub fn with_antialias(mut self, antialias: bool) -> Self {
        self.antialias = antialias;
        self
    }

    #[must_use]
    pub fn with_fractional_digits(mut self, digits: usize) -> Self {
        self.fractional_digits = digits;
        self
    }

    #[must_use]
    pub fn with_animate_visible_values(mut self, animate: bool) -> Self {
        self.animate_visible_values = animate;
        self
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_description_space() -> f64 {
    175.0
}

fn default_padding() -> f64 {
    20.0
}

fn default_background_color() -> Color {
    Color::WHITE
}

fn default_antialias() -> bool {
    true
}
