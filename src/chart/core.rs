use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::chart::config::{ChartConfig, DescriptionArea};
use crate::core::animation::{AnimationTask, Easing};
use crate::core::figure::{FigureField, FigureId};
use crate::core::figure_access::{FieldChangeSink, FigureAccess};
use crate::core::figure_list::{FigureCollection, FigureListChange};
use crate::core::{FigureAccessCollection, Subscription};
use crate::error::ChartResult;
use crate::render::{Canvas, Color, StrokeStyle};

/// Base duration of the whole-chart open/close animation; the actual
/// duration scales with the proportion left to cover.
const OPEN_CLOSE_BASE: Duration = Duration::from_millis(2000);

/// Duration of the per-figure entrance fade-in and removal fade-out.
const ENTRANCE_DURATION: Duration = Duration::from_millis(500);

/// Duration of the value-delta animation after a figure value change.
const VALUE_DELTA_DURATION: Duration = Duration::from_millis(500);

/// Minimum clock time between two honored redraw requests (one frame at
/// 60 Hz). Forced requests bypass this.
const MIN_REDRAW_INTERVAL: Duration = Duration::from_millis(16);

/// Padding between the legend box and its rows.
const DESCRIPTION_PADDING: f64 = 12.0;

/// Line-height multiplier between legend rows.
const DESCRIPTION_SPACING: f64 = 2.0;

const LEGEND_FONT_SIZE: f64 = 20.0;

const LEGEND_TEXT_GAP: f64 = 3.0;
const LEGEND_VALUE_GAP: f64 = 9.0;

enum ChartEvent {
    Field(FigureId, FigureField),
    List(FigureListChange),
}

type EventQueue = Rc<RefCell<VecDeque<ChartEvent>>>;

/// Shared chart state: figure lifecycle, open/close animation, redraw
/// throttling and the legend overlay.
///
/// Renderers ([`crate::chart::DonutChart`], [`crate::chart::BarChart`])
/// own one core each and read its access collection during paint; all
/// mutation happens here, driven by host notifications and
/// [`ChartCore::advance`].
pub struct ChartCore {
    config: ChartConfig,

    figures: Option<Rc<dyn FigureCollection>>,
    list_subscription: Option<Subscription>,
    accesses: FigureAccessCollection,

    opened_proportion: f64,
    open_close: Option<AnimationTask>,
    reopen_after_close: bool,

    events: EventQueue,
    field_sink: FieldChangeSink,

    clock: Duration,
    last_redraw: Option<Duration>,
    pending_repaint: bool,
    repaint_count: u64,
}

impl ChartCore {
    /// Creates a collapsed core and starts the opening animation.
    #[must_use]
    pub fn new(config: ChartConfig) -> Self {
        let events: EventQueue = Rc::new(RefCell::new(VecDeque::new()));
        let sink_events = Rc::clone(&events);
        let field_sink: FieldChangeSink = Rc::new(move |id, field| {
            sink_events
                .borrow_mut()
                .push_back(ChartEvent::Field(id, field));
        });

        Self {
            config,
            figures: None,
            list_subscription: None,
            accesses: FigureAccessCollection::new(),
            opened_proportion: 0.0,
            open_close: Some(AnimationTask::new(
                0.0,
                1.0,
                OPEN_CLOSE_BASE,
                Easing::CubicInOut,
            )),
            reopen_after_close: false,
            events,
            field_sink,
            clock: Duration::ZERO,
            last_redraw: None,
            pending_repaint: true,
            repaint_count: 0,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ChartConfig) {
        self.config = config;
        self.request_redraw(false);
    }

    /// Whole-chart opening progress: 0 collapsed, 1 fully shown.
    #[must_use]
    pub fn opened_proportion(&self) -> f64 {
        self.opened_proportion
    }

    #[must_use]
    pub fn figure_accesses(&self) -> &FigureAccessCollection {
        &self.accesses
    }

    /// Replaces the whole figure collection.
    ///
    /// Cancels any in-flight open/close animation; a visible chart closes
    /// first and reopens with the new figures, a collapsed chart rebuilds
    /// and opens directly.
    pub fn set_figures(&mut self, figures: Option<Rc<dyn FigureCollection>>) {
        if let Some(mut subscription) = self.list_subscription.take() {
            subscription.unsubscribe();
        }

        self.open_close = None;
        self.reopen_after_close = false;
        self.figures = figures;

        if self.opened_proportion != 0.0 {
            debug!(
                opened = self.opened_proportion,
                "closing chart before reopening with new figures"
            );
            let duration = OPEN_CLOSE_BASE.mul_f64(self.opened_proportion);
            self.open_close = Some(AnimationTask::new(
                self.opened_proportion,
                0.0,
                duration,
                Easing::CubicInOut,
            ));
            self.reopen_after_close = true;
        } else {
            self.rebuild_and_open();
        }

        self.request_redraw(false);
    }

    /// Discards the current accesses, rebuilds them from the figure
    /// collection and starts the opening animation.
    fn rebuild_and_open(&mut self) {
        self.reopen_after_close = false;

        for access in self.accesses.iter_mut() {
            access.unsubscribe();
        }
        self.accesses = FigureAccessCollection::new();

        if let Some(figures) = &self.figures {
            // The opening animation already provides the visual
            // transition, so the accesses start fully entered.
            for figure in figures.snapshot() {
                let access = FigureAccess::new(figure, false, &self.field_sink);
                if !self.accesses.insert(access) {
                    warn!("figure collection contains a duplicate identity; entry skipped");
                }
            }

            let events = Rc::clone(&self.events);
            self.list_subscription = figures.subscribe(Rc::new(move |change| {
                events
                    .borrow_mut()
                    .push_back(ChartEvent::List(change.clone()));
            }));
        }

        let duration = OPEN_CLOSE_BASE.mul_f64(1.0 - self.opened_proportion);
        self.open_close = Some(AnimationTask::new(
            self.opened_proportion,
            1.0,
            duration,
            Easing::CubicInOut,
        ));
    }

    /// Advances the chart clock by one host frame tick: drains queued
    /// figure/collection notifications, steps every live animation and
    /// requests (throttled) repaints.
    pub fn advance(&mut self, dt: Duration) {
        self.clock += dt;

        loop {
            let event = self.events.borrow_mut().pop_front();
            let Some(event) = event else { break };
            self.handle_event(event);
        }

        let mut open_close_progressed = false;
        let mut open_close_finished = false;
        if let Some(task) = &mut self.open_close {
            self.opened_proportion = task.advance(dt);
            open_close_progressed = true;
            open_close_finished = task.finished();
        }
        if open_close_finished {
            self.open_close = None;
            if self.reopen_after_close {
                self.rebuild_and_open();
            }
        }

        let mut access_progressed = false;
        let mut finished_removals: Vec<FigureId> = Vec::new();
        for access in self.accesses.iter_mut() {
            if access.advance(dt) {
                access_progressed = true;
            }
            if access.removal_finished() {
                finished_removals.push(access.id());
            }
        }

        // A fully faded-out access leaves the collection now; the forced
        // redraw avoids a stale final frame.
        for id in finished_removals {
            let _ = self.accesses.remove(id);
            self.request_redraw(true);
        }

        if open_close_progressed || access_progressed {
            self.request_redraw(false);
        }
    }

    fn handle_event(&mut self, event: ChartEvent) {
        match event {
            ChartEvent::Field(id, field) => {
                if let Some(access) = self.accesses.get_mut(id) {
                    if access.apply_field_change(field) {
                        access.begin_value_animation(VALUE_DELTA_DURATION);
                    }
                    self.request_redraw(false);
                }
            }
            ChartEvent::List(FigureListChange::Added(figures)) => {
                for figure in figures {
                    let mut access = FigureAccess::new(figure, true, &self.field_sink);
                    access.begin_entrance(ENTRANCE_DURATION);
                    if !self.accesses.insert(access) {
                        warn!("ignoring add notification for an already tracked figure");
                    }
                }
                self.request_redraw(false);
            }
            ChartEvent::List(FigureListChange::Removed(figures)) => {
                for figure in figures {
                    // Unknown figures are a no-op; tracked ones fade out
                    // and stay rendered until the fade completes.
                    if let Some(access) = self.accesses.get_mut_by_source(&figure) {
                        access.unsubscribe();
                        access.begin_removal(ENTRANCE_DURATION);
                    }
                }
                self.request_redraw(false);
            }
            ChartEvent::List(change) => {
                // Moved/Replaced/Reset carry no animation; hosts that
                // need one swap the whole collection instead.
                debug!(?change, "list change accepted without animation");
            }
        }
    }

    /// Requests a repaint; returns whether the request was honored.
    ///
    /// Requests inside the throttle window are dropped unless `force` is
    /// set.
    pub fn request_redraw(&mut self, force: bool) -> bool {
        let due = match self.last_redraw {
            None => true,
            Some(last) => self.clock.saturating_sub(last) >= MIN_REDRAW_INTERVAL,
        };
        if !(force || due) {
            return false;
        }
        self.last_redraw = Some(self.clock);
        self.pending_repaint = true;
        self.repaint_count += 1;
        true
    }

    /// Consumes the pending-repaint flag; the host paints when this
    /// returns `true`.
    pub fn take_pending_repaint(&mut self) -> bool {
        std::mem::replace(&mut self.pending_repaint, false)
    }

    /// Number of honored redraw requests so far.
    #[must_use]
    pub fn repaint_count(&self) -> u64 {
        self.repaint_count
    }

    /// Draws the legend overlay for the current accesses.
    pub fn draw_legend(
        &self,
        canvas: &mut dyn Canvas,
        width: f64,
        height: f64,
    ) -> ChartResult<()> {
        if self.accesses.is_empty() || !self.config.description_position.has_legend() {
            return Ok(());
        }

        // One shared row height keeps swatches and lines aligned.
        let mut row_height: f64 = 0.0;
        for access in self.accesses.iter() {
            if !access.description().trim().is_empty() {
                let metrics = canvas.measure_text(access.description(), LEGEND_FONT_SIZE);
                row_height = row_height.max(metrics.height);
            }
        }

        self.draw_legend_background(canvas, width, height, row_height)?;

        let config = &self.config;
        let count = self.accesses.len();
        let row_step = row_height * DESCRIPTION_SPACING;
        let drawable = height - 2.0 * config.padding;

        for (index, access) in self.accesses.iter().enumerate() {
            let description = access.description();
            if description.is_empty() {
                continue;
            }
            let metrics = canvas.measure_text(description, LEGEND_FONT_SIZE);

            let (x_offset, y_offset, row) = match config.description_position {
                DescriptionArea::LeftAndRight => {
                    // First half top-aligned on the right, second half
                    // bottom-aligned on the left so the columns center
                    // against each other.
                    let first_half = index < count.div_ceil(2);
                    let row = if first_half {
                        index
                    } else {
                        index - count % 2 - count / 2
                    };
                    let left_height =
                        ((count / 2) as f64 * row_step + DESCRIPTION_PADDING).min(drawable);
                    if first_half {
                        (
                            width - config.padding - config.description_space
                                + DESCRIPTION_PADDING,
                            config.padding + DESCRIPTION_PADDING,
                            row,
                        )
                    } else {
                        (
                            config.padding + DESCRIPTION_PADDING,
                            config.padding + DESCRIPTION_PADDING + (drawable - left_height),
                            row,
                        )
                    }
                }
                DescriptionArea::Right => (
                    width - config.padding - config.description_space + DESCRIPTION_PADDING,
                    config.padding + DESCRIPTION_PADDING,
                    index,
                ),
                DescriptionArea::Left => (
                    config.padding + DESCRIPTION_PADDING,
                    config.padding + DESCRIPTION_PADDING,
                    index,
                ),
                _ => continue,
            };

            let swatch_x = x_offset;
            let swatch_y = y_offset + row_step * row as f64;
            canvas.fill_rect(
                swatch_x,
                swatch_y,
                row_height,
                row_height,
                access.color(),
                config.antialias,
            )?;

            canvas.draw_text(
                description,
                swatch_x + row_height + LEGEND_TEXT_GAP,
                swatch_y,
                LEGEND_FONT_SIZE,
                Color::BLACK,
            )?;

            let shown = if config.animate_visible_values {
                access.animated_value()
            } else {
                access.value()
            };
            let value_text = format!("{shown:.digits$}", digits = config.fractional_digits);
            canvas.draw_text(
                &value_text,
                swatch_x + row_height + metrics.width + LEGEND_VALUE_GAP,
                swatch_y,
                LEGEND_FONT_SIZE,
                Color::BLACK,
            )?;
        }

        Ok(())
    }

    fn draw_legend_background(
        &self,
        canvas: &mut dyn Canvas,
        width: f64,
        height: f64,
        row_height: f64,
    ) -> ChartResult<()> {
        let config = &self.config;
        let style = StrokeStyle {
            width: 4.0,
            color: Color::DARK_GRAY,
            dash: Some([10.0, 10.0]),
        };
        let count = self.accesses.len();
        let row_step = row_height * DESCRIPTION_SPACING;
        let drawable = height - 2.0 * config.padding;

        match config.description_position {
            DescriptionArea::LeftAndRight => {
                let right_rows = count.div_ceil(2) as f64;
                let left_rows = (count / 2) as f64;
                let right_height = (right_rows * row_step + DESCRIPTION_PADDING).min(drawable);
                let left_height = (left_rows * row_step + DESCRIPTION_PADDING).min(drawable);

                canvas.stroke_round_rect(
                    width - config.padding - config.description_space,
                    config.padding,
                    config.description_space,
                    right_height,
                    3.0,
                    style,
                )?;
                canvas.stroke_round_rect(
                    config.padding,
                    config.padding + (drawable - left_height),
                    config.description_space,
                    left_height,
                    3.0,
                    style,
                )?;
            }
            DescriptionArea::Right => {
                canvas.stroke_round_rect(
                    width - config.padding - config.description_space,
                    config.padding,
                    config.description_space,
                    (count as f64 * row_step + DESCRIPTION_PADDING).min(drawable),
                    3.0,
                    style,
                )?;
            }
            DescriptionArea::Left => {
                canvas.stroke_round_rect(
                    config.padding,
                    config.padding,
                    config.description_space,
                    (count as f64 * row_step + DESCRIPTION_PADDING).min(drawable),
                    3.0,
                    style,
                )?;
            }
            _ => {}
        }

        Ok(())
    }
}

impl std::fmt::Debug for ChartCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartCore")
            .field("config", &self.config)
            .field("accesses", &self.accesses.len())
            .field("opened_proportion", &self.opened_proportion)
            .field("clock", &self.clock)
            .finish()
    }
}
