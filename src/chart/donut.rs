use std::f64::consts::TAU;
use std::rc::Rc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::chart::config::{ChartConfig, DescriptionArea};
use crate::chart::core::ChartCore;
use crate::core::animation::{AnimationTask, Easing};
use crate::core::figure_access::FigureAccess;
use crate::core::figure_list::FigureCollection;
use crate::core::geometry::{circle_path, pie_path, polygon_path};
use crate::error::ChartResult;
use crate::render::{Canvas, ClipOp, Color};

const FULL_CIRCLE_DEGREES: f64 = 360.0;

/// Donut-specific configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonutConfig {
    /// Angular span of the donut in degrees, 0–360.
    #[serde(default = "default_full_angle_degrees")]
    pub full_angle_degrees: f64,
    /// Fill used when the figure collection is missing or empty.
    #[serde(default = "default_placeholder_color")]
    pub placeholder_color: Color,
    /// Radius of the donut hole as a proportion of the outer radius,
    /// 0–1 (0 draws a full pie).
    #[serde(default = "default_inner_circle_proportion")]
    pub inner_circle_proportion: f64,
    /// Duration of the hole-size animation in milliseconds; 0 applies
    /// changes instantly.
    #[serde(default)]
    pub inner_circle_animation_ms: u64,
    /// Trace the outer and inner shapes as polygons instead of circles.
    #[serde(default)]
    pub polygon: bool,
    #[serde(default = "default_outer_corners")]
    pub outer_corners: i32,
    #[serde(default = "default_inner_corners")]
    pub inner_corners: i32,
}

impl Default for DonutConfig {
    fn default() -> Self {
        Self {
            full_angle_degrees: default_full_angle_degrees(),
            placeholder_color: default_placeholder_color(),
            inner_circle_proportion: default_inner_circle_proportion(),
            inner_circle_animation_ms: 0,
            polygon: false,
            outer_corners: default_outer_corners(),
            inner_corners: default_inner_corners(),
        }
    }
}

/// Donut/pie renderer over a shared [`ChartCore`].
#[derive(Debug)]
pub struct DonutChart {
    core: ChartCore,
    config: DonutConfig,
    inner_proportion_animated: f64,
    inner_animation: Option<AnimationTask>,
}

impl Default for DonutChart {
    fn default() -> Self {
        Self::new(ChartConfig::default(), DonutConfig::default())
    }
}

impl DonutChart {
    #[must_use]
    pub fn new(chart_config: ChartConfig, config: DonutConfig) -> Self {
        let inner = config.inner_circle_proportion.clamp(0.0, 1.0);
        Self {
            core: ChartCore::new(chart_config),
            config,
            inner_proportion_animated: inner,
            inner_animation: None,
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
    pub fn donut_config(&self) -> &DonutConfig {
        &self.config
    }

    pub fn set_donut_config(&mut self, config: DonutConfig) {
        let target = config.inner_circle_proportion.clamp(0.0, 1.0);
        self.config = config;
        self.set_inner_circle_proportion(target);
    }

    pub fn set_figures(&mut self, figures: Option<Rc<dyn FigureCollection>>) {
        self.core.set_figures(figures);
    }

    /// Sets the hole size, clamped to [0, 1].
    ///
    /// With a configured animation duration the change tweens from the
    /// currently drawn proportion; with duration 0 it applies instantly.
    pub fn set_inner_circle_proportion(&mut self, proportion: f64) {
        let target = proportion.clamp(0.0, 1.0);
        self.config.inner_circle_proportion = target;

        let duration = Duration::from_millis(self.config.inner_circle_animation_ms);
        if duration.is_zero() {
            self.inner_proportion_animated = target;
            self.inner_animation = None;
        } else {
            self.inner_animation = Some(AnimationTask::new(
                self.inner_proportion_animated,
                target,
                duration,
                Easing::CubicInOut,
            ));
        }
        self.core.request_redraw(false);
    }

    /// The hole proportion currently drawn (follows the animation).
    #[must_use]
    pub fn inner_circle_proportion_animated(&self) -> f64 {
        self.inner_proportion_animated
    }

    pub fn advance(&mut self, dt: Duration) {
        self.core.advance(dt);

        let mut progressed = false;
        let mut finished = false;
        if let Some(task) = &mut self.inner_animation {
            self.inner_proportion_animated = task.advance(dt);
            progressed = true;
            finished = task.finished();
        }
        if finished {
            self.inner_animation = None;
        }
        if progressed {
            self.core.request_redraw(false);
        }
    }

    /// Current angular span of the donut in radians: the configured full
    /// angle scaled by the opening progress.
    #[must_use]
    pub fn current_angle(&self) -> f64 {
        self.config.full_angle_degrees.clamp(0.0, FULL_CIRCLE_DEGREES) / FULL_CIRCLE_DEGREES
            * TAU
            * self.core.opened_proportion()
    }

    /// Paints one frame: background, donut body, legend overlay.
    pub fn draw(&self, canvas: &mut dyn Canvas, width: f64, height: f64) -> ChartResult<()> {
        canvas.clear(self.core.config().background_color)?;
        self.draw_donut(canvas, width, height)?;
        canvas.reset_transform();
        self.core.draw_legend(canvas, width, height)
    }

    fn draw_donut(&self, canvas: &mut dyn Canvas, width: f64, height: f64) -> ChartResult<()> {
        let config = self.core.config();
        let antialias = config.antialias;
        let padding = config.padding;
        let space = config.description_space;

        // The center shifts away from a single-sided legend; a two-sided
        // legend leaves it centered with a smaller radius.
        let (radius, center_x, center_y) = match config.description_position {
            DescriptionArea::LeftAndRight => (
                (width / 2.0 - padding - space).min(height / 2.0 - padding),
                width / 2.0,
                height / 2.0,
            ),
            DescriptionArea::Left => (
                (width / 2.0 - padding - space / 2.0).min(height / 2.0 - padding),
                space / 2.0 + width / 2.0,
                height / 2.0,
            ),
            DescriptionArea::Right => (
                (width / 2.0 - padding - space / 2.0).min(height / 2.0 - padding),
                width / 2.0 - space / 2.0,
                height / 2.0,
            ),
            DescriptionArea::None | DescriptionArea::Top | DescriptionArea::Bottom => (
                (width / 2.0 - padding).min(height / 2.0 - padding),
                width / 2.0,
                height / 2.0,
            ),
        };

        canvas.save()?;
        canvas.translate(center_x, center_y);
        if config.rotation_degrees != 0.0 {
            canvas.rotate_degrees(config.rotation_degrees);
        }

        let inner_radius = self.inner_proportion_animated * radius;
        if self.config.polygon {
            canvas.clip_path(
                &polygon_path(inner_radius, self.config.inner_corners),
                ClipOp::Difference,
                antialias,
            )?;
            canvas.clip_path(
                &polygon_path(radius, self.config.outer_corners),
                ClipOp::Intersect,
                antialias,
            )?;
        } else {
            canvas.clip_path(&circle_path(inner_radius), ClipOp::Difference, antialias)?;
            canvas.clip_path(&circle_path(radius), ClipOp::Intersect, antialias)?;
        }

        let span = self.current_angle();
        let accesses = self.core.figure_accesses();

        if accesses.is_empty() {
            canvas.fill_path(
                &pie_path(radius, 0.0, span),
                self.config.placeholder_color,
                antialias,
            )?;
            canvas.restore()?;
            return Ok(());
        }

        let mut value_sum: f64 = accesses.iter().map(FigureAccess::animated_value).sum();
        if value_sum == 0.0 {
            value_sum = 1.0;
        }

        // Each figure claims its share of the span, in collection order.
        let mut position = 0.0;
        for access in accesses.iter() {
            let portion = access.animated_value() / value_sum;
            let path = pie_path(radius, position * span, (position + portion) * span);
            canvas.fill_path(&path, access.color(), antialias)?;
            position += portion;
        }

        canvas.restore()
    }
}

fn default_full_angle_degrees() -> f64 {
    FULL_CIRCLE_DEGREES
}

fn default_placeholder_color() -> Color {
    Color::GRAY
}

fn default_inner_circle_proportion() -> f64 {
    0.45
}

fn default_outer_corners() -> i32 {
    7
}

fn default_inner_corners() -> i32 {
    5
}
