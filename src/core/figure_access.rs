//! Per-figure adapter buffering field values and animation progress.

use std::rc::Rc;
use std::time::Duration;

use tracing::debug;

use crate::core::animation::{AnimationTask, Easing};
use crate::core::figure::{FigureField, FigureId, FigureRef, Subscription};
use crate::render::Color;

/// Callback a chart hands to each access so field notifications arrive
/// tagged with the figure's identity.
pub type FieldChangeSink = Rc<dyn Fn(FigureId, FigureField)>;

/// Internal adapter around one host figure.
///
/// Buffers the last-read field values and carries the two animation
/// scalars renderers combine into the drawn value:
/// `animated_value = value * value_delta_proportion * entrance`.
pub struct FigureAccess {
    id: FigureId,
    source: Option<FigureRef>,
    subscription: Option<Subscription>,

    value: f64,
    description: String,
    color: Color,

    entrance: f64,
    value_delta_proportion: f64,

    entrance_animation: Option<AnimationTask>,
    value_animation: Option<AnimationTask>,
    removing: bool,
}

impl std::fmt::Debug for FigureAccess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FigureAccess")
            .field("id", &self.id)
            .field("source", &self.source.as_ref().map(|_| "..."))
            .field("subscription", &self.subscription)
            .field("value", &self.value)
            .field("description", &self.description)
            .field("color", &self.color)
            .field("entrance", &self.entrance)
            .field("value_delta_proportion", &self.value_delta_proportion)
            .field("entrance_animation", &self.entrance_animation)
            .field("value_animation", &self.value_animation)
            .field("removing", &self.removing)
            .finish()
    }
}

impl FigureAccess {
    /// Wraps `source`, buffers its fields and subscribes to its change
    /// notifications when it offers any.
    ///
    /// `ease_in_value` starts the entrance at 0 (figure added to a live
    /// collection, to be faded in); a full-collection rebuild passes
    /// `false` since the chart's own opening animation provides the
    /// transition.
    pub(crate) fn new(source: FigureRef, ease_in_value: bool, on_field: &FieldChangeSink) -> Self {
        let id = FigureId::of(&source);

        let sink = Rc::clone(on_field);
        let subscription = source.subscribe(Rc::new(move |field| sink(id, field)));

        Self {
            id,
            value: source.value(),
            description: source.description(),
            color: source.color(),
            source: Some(source),
            subscription,
            entrance: if ease_in_value { 0.0 } else { 1.0 },
            value_delta_proportion: 1.0,
            entrance_animation: None,
            value_animation: None,
            removing: false,
        }
    }

    #[must_use]
    pub fn id(&self) -> FigureId {
        self.id
    }

    /// Last observed raw value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Buffered color, alpha attenuated by the entrance progress.
    #[must_use]
    pub fn color(&self) -> Color {
        self.color.scaled_alpha(self.entrance)
    }

    #[must_use]
    pub fn entrance(&self) -> f64 {
        self.entrance
    }

    #[must_use]
    pub fn value_delta_proportion(&self) -> f64 {
        self.value_delta_proportion
    }

    /// The value renderers draw when smooth transitions are wanted.
    #[must_use]
    pub fn animated_value(&self) -> f64 {
        self.value * self.value_delta_proportion * self.entrance
    }

    /// Whether a removal fade-out is in progress or has finished.
    #[must_use]
    pub fn is_removing(&self) -> bool {
        self.removing
    }

    /// Re-reads the changed field from the source.
    ///
    /// Returns `true` when the chart should animate the value-delta
    /// proportion back to 1. A new value of exactly 0 snaps instead: the
    /// old-value/new-value proportion is undefined there, so the buffered
    /// value drops to 0 with no delta animation.
    pub(crate) fn apply_field_change(&mut self, field: FigureField) -> bool {
        let Some(source) = &self.source else {
            return false;
        };
        match field {
            FigureField::Value => {
                let new_value = source.value();
                if new_value == 0.0 {
                    debug!(figure = ?self.id, "figure value snapped to zero");
                    self.value = 0.0;
                    self.value_delta_proportion = 1.0;
                    self.value_animation = None;
                    return false;
                }
                self.value_delta_proportion = self.animated_value() / new_value;
                self.value = new_value;
                true
            }
            FigureField::Description => {
                self.description = source.description();
                false
            }
            FigureField::Color => {
                self.color = source.color();
                false
            }
        }
    }

    pub(crate) fn begin_entrance(&mut self, duration: Duration) {
        self.entrance_animation = Some(AnimationTask::new(
            0.0,
            1.0,
            duration,
            Easing::CubicInOut,
        ));
    }

    /// Starts the fade-out; replaces any running entrance animation.
    pub(crate) fn begin_removal(&mut self, duration: Duration) {
        self.removing = true;
        self.entrance_animation = Some(AnimationTask::new(
            self.entrance,
            0.0,
            duration,
            Easing::CubicInOut,
        ));
    }

    pub(crate) fn begin_value_animation(&mut self, duration: Duration) {
        self.value_animation = Some(AnimationTask::new(
            self.value_delta_proportion,
            1.0,
            duration,
            Easing::CubicInOut,
        ));
    }

    /// Steps the animations; returns whether anything progressed.
    pub(crate) fn advance(&mut self, dt: Duration) -> bool {
        let mut progressed = false;
        if let Some(task) = &mut self.entrance_animation {
            self.entrance = task.advance(dt);
            if task.finished() {
                self.entrance_animation = None;
            }
            progressed = true;
        }
        if let Some(task) = &mut self.value_animation {
            self.value_delta_proportion = task.advance(dt);
            if task.finished() {
                self.value_animation = None;
            }
            progressed = true;
        }
        progressed
    }

    /// True once the fade-out has run to completion; the owning chart
    /// then drops the access from its collection.
    pub(crate) fn removal_finished(&self) -> bool {
        self.removing && self.entrance_animation.is_none()
    }

    /// Detaches from change notifications and releases the source.
    /// Idempotent.
    pub(crate) fn unsubscribe(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
        self.source = None;
    }
}
