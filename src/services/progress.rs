//! Load progress tracking and the progress bar animation.
//!
//! The bar follows each new fraction with a 150 ms linear transition from
//! wherever it currently is. It is removed outright once progress reaches 1.

use std::time::{Duration, Instant};

/// Length of one progress transition.
pub const PROGRESS_ANIMATION: Duration = Duration::from_millis(150);

/// Fraction reported once the new document is parsed (`readyState`
/// "interactive"); the engine reports nothing finer.
pub const READY_PROGRESS: f64 = 0.5;

/// A single linear transition between two fractions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressAnimation {
    from: f64,
    to: f64,
    start: Instant,
    duration: Duration,
}

impl ProgressAnimation {
    pub fn new(from: f64, to: f64, start: Instant) -> Self {
        Self {
            from,
            to,
            start,
            duration: PROGRESS_ANIMATION,
        }
    }

    /// Interpolated value at `now`, clamped to the transition end points.
    pub fn value_at(&self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.start);
        if self.duration.is_zero() || elapsed >= self.duration {
            return self.to;
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * t
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.duration
    }

    pub fn target(&self) -> f64 {
        self.to
    }
}

/// LoadProgress plus the animated bar that renders it.
#[derive(Debug, Clone)]
pub struct ProgressIndicator {
    progress: f64,
    animation: Option<ProgressAnimation>,
}

impl ProgressIndicator {
    pub fn new() -> Self {
        Self {
            progress: 0.0,
            animation: None,
        }
    }

    /// Sets a new fraction and starts a transition from the bar's current width.
    pub fn set(&mut self, fraction: f64, now: Instant) {
        let target = clamp_fraction(fraction);
        let from = self.displayed(now);
        self.progress = target;
        self.animation = Some(ProgressAnimation::new(from, target, now));
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// The bar is part of the layout only while progress is below 1.
    pub fn is_visible(&self) -> bool {
        self.progress < 1.0
    }

    /// Width of the bar at `now`, as a fraction of the full width.
    pub fn displayed(&self, now: Instant) -> f64 {
        match &self.animation {
            Some(animation) => animation.value_at(now),
            None => self.progress,
        }
    }

    /// True while a transition is still running and the bar is shown.
    pub fn is_animating(&self, now: Instant) -> bool {
        self.is_visible()
            && self
                .animation
                .as_ref()
                .is_some_and(|animation| !animation.is_finished(now))
    }
}

impl Default for ProgressIndicator {
    fn default() -> Self {
        Self::new()
    }
}

fn clamp_fraction(fraction: f64) -> f64 {
    if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    }
}
