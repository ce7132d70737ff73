//! Cooperative animation primitives.
//!
//! Animations are plain state advanced by the host's frame scheduler;
//! replacing the `Option<AnimationTask>` slot that owns a task is how a
//! running animation is cancelled, so a given scalar never has two
//! writers.

use std::time::Duration;

/// Easing curve applied over normalized animation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    #[default]
    CubicInOut,
}

impl Easing {
    /// Maps normalized time `t` in [0, 1] to eased progress.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// One in-flight tween of a single `f64`.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationTask {
    from: f64,
    to: f64,
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
}

impl AnimationTask {
    #[must_use]
    pub fn new(from: f64, to: f64, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            easing,
        }
    }

    /// Advances the task and returns the current value.
    ///
    /// Zero-duration tasks finish on the first call, at the end value.
    pub fn advance(&mut self, dt: Duration) -> f64 {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        self.value()
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        if self.finished() {
            return self.to;
        }
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * self.easing.apply(t)
    }

    #[must_use]
    pub fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}
