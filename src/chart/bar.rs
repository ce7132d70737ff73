use std::rc::Rc;
use std::time::Duration;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::chart::config::{ChartConfig, DescriptionArea};
use crate::chart::core::ChartCore;
use crate::core::figure_list::FigureCollection;
use crate::error::ChartResult;
use crate::render::Canvas;

/// Edge the bars grow from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BarOrientation {
    /// Bars grow upward from the bottom edge; horizontal layout axis.
    #[default]
    Up,
    /// Bars grow downward from the top edge; horizontal layout axis.
    Down,
    /// Bars grow leftward from the right edge; vertical layout axis.
    Left,
    /// Bars grow rightward from the left edge; vertical layout axis.
    Right,
}

/// Bar-specific configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BarConfig {
    /// Gap inset on both sides of each bar, in pixels.
    #[serde(default)]
    pub bar_padding: f64,
    #[serde(default)]
    pub orientation: BarOrientation,
}

/// Bar renderer over a shared [`ChartCore`].
#[derive(Debug)]
pub struct BarChart {
    core: ChartCore,
    config: BarConfig,
}

impl Default for BarChart {
    fn default() -> Self {
        Self::new(ChartConfig::default(), BarConfig::default())
    }
}

impl BarChart {
    #[must_use]
    pub fn new(chart_config: ChartConfig, config: BarConfig) -> Self {
        Self {
            core: ChartCore::new(chart_config),
            config,
        }
    }

    #[must_use]
    pub fn core(&self) -> &ChartCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut ChartCore {
        &mut self.core
    }

    #[must_use]
    pub fn bar_config(&self) -> &BarConfig {
        &self.config
    }

    pub fn set_bar_config(&mut self, config: BarConfig) {
        self.config = config;
        self.core.request_redraw(false);
    }

    pub fn set_figures(&mut self, figures: Option<Rc<dyn FigureCollection>>) {
        self.core.set_figures(figures);
    }

    pub fn advance(&mut self, dt: Duration) {
        self.core.advance(dt);
    }

    /// Paints one frame: background, bars, legend overlay.
    pub fn draw(&self, canvas: &mut dyn Canvas, width: f64, height: f64) -> ChartResult<()> {
        canvas.clear(self.core.config().background_color)?;
        self.draw_bars(canvas, width, height)?;
        canvas.reset_transform();
        self.core.draw_legend(canvas, width, height)
    }

    fn draw_bars(&self, canvas: &mut dyn Canvas, width: f64, height: f64) -> ChartResult<()> {
        let config = self.core.config();
        let padding = config.padding;
        let space = config.description_space;

        // Legend space cuts the layout span; the rotation pivots at the
        // remaining content center.
        let (span_cut, start_x, pivot_x, pivot_y) = match config.description_position {
            DescriptionArea::LeftAndRight => (
                width - 2.0 * padding - 2.0 * space,
                space,
                width / 2.0,
                height / 2.0,
            ),
            DescriptionArea::Left => {
                let cut = width - 2.0 * padding - space;
                (cut, space, cut / 2.0 + space, height / 2.0)
            }
            DescriptionArea::Right => {
                let cut = width - 2.0 * padding - space;
                (cut, 0.0, cut / 2.0, height / 2.0)
            }
            DescriptionArea::None | DescriptionArea::Top | DescriptionArea::Bottom => {
                (width - 2.0 * padding, 0.0, width / 2.0, height / 2.0)
            }
        };

        if config.rotation_degrees != 0.0 {
            canvas.translate(pivot_x, pivot_y);
            canvas.rotate_degrees(config.rotation_degrees);
            canvas.translate(-pivot_x, -pivot_y);
        }

        let accesses = self.core.figure_accesses();
        if accesses.is_empty() {
            return Ok(());
        }

        let max_value = accesses
            .iter()
            .map(|access| OrderedFloat(access.animated_value()))
            .max()
            .map_or(0.0, |max| max.0);

        let count = accesses.len() as f64;
        let bar_padding = self.config.bar_padding;
        let vertical = matches!(self.config.orientation, BarOrientation::Up | BarOrientation::Down);

        let thickness = if vertical {
            span_cut / count
        } else {
            (height - 2.0 * padding) / count
        };
        let available_extent = if vertical {
            height - 2.0 * padding
        } else {
            span_cut
        };

        for (index, access) in accesses.iter().enumerate() {
            // An all-zero set degenerates to zero-extent bars instead of
            // dividing by the zero maximum.
            let fraction = if max_value > 0.0 {
                access.animated_value() / max_value
            } else {
                0.0
            };
            let extent = available_extent * fraction;
            let offset = index as f64 * thickness;

            let (x, y, w, h) = match self.config.orientation {
                BarOrientation::Up => (
                    start_x + padding + bar_padding + offset,
                    height - padding - extent,
                    thickness - 2.0 * bar_padding,
                    extent,
                ),
                BarOrientation::Down => (
                    start_x + padding + bar_padding + offset,
                    padding,
                    thickness - 2.0 * bar_padding,
                    extent,
                ),
                BarOrientation::Left => (
                    span_cut - padding - extent,
                    padding + offset,
                    extent,
                    thickness - 2.0 * bar_padding,
                ),
                BarOrientation::Right => (
                    start_x + padding,
                    padding + offset,
                    extent,
                    thickness - 2.0 * bar_padding,
                ),
            };

            canvas.fill_rect(x, y, w, h, access.color(), config.antialias)?;
        }

        Ok(())
    }
}
