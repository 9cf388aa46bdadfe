use std::cell::Cell;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::NormalizedRange;

/// Time source for animations, in milliseconds.
///
/// Animations never read time themselves; the selector samples the clock once
/// per operation and passes `now_ms` down so one frame sees one instant.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Monotonic wall clock anchored at construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1_000.0
    }
}

/// Deterministic clock advanced explicitly by the host or by tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: Cell<f64>,
}

impl ManualClock {
    #[must_use]
    pub fn new(start_ms: f64) -> Self {
        Self {
            now_ms: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, delta_ms: f64) {
        self.now_ms.set(self.now_ms.get() + delta_ms);
    }

    pub fn set(&self, now_ms: f64) {
        self.now_ms.set(now_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now_ms.get()
    }
}

/// Linear tween between two scalars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    start_value: f64,
    end_value: f64,
    start_ms: f64,
    duration_ms: f64,
}

impl Animation {
    /// Starts a tween at `now_ms`. Non-positive durations finish immediately.
    #[must_use]
    pub fn create(from: f64, to: f64, duration_ms: f64, now_ms: f64) -> Self {
        Self {
            start_value: from,
            end_value: to,
            start_ms: now_ms,
            duration_ms: duration_ms.max(0.0),
        }
    }

    /// An already finished animation resting at `value`.
    #[must_use]
    pub fn fixed(value: f64) -> Self {
        Self::create(value, value, 0.0, 0.0)
    }

    #[must_use]
    pub fn value(self, now_ms: f64) -> f64 {
        if self.is_finished(now_ms) {
            return self.end_value;
        }
        let progress = ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0);
        self.start_value + (self.end_value - self.start_value) * progress
    }

    #[must_use]
    pub fn is_finished(self, now_ms: f64) -> bool {
        self.duration_ms <= 0.0 || now_ms - self.start_ms >= self.duration_ms
    }

    #[must_use]
    pub fn target(self) -> f64 {
        self.end_value
    }

    #[must_use]
    pub fn duration_ms(self) -> f64 {
        self.duration_ms
    }
}

/// Pair of tweens producing the displayed range each frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimatedRange {
    pub from: Animation,
    pub to: Animation,
}

impl AnimatedRange {
    /// Tweens from `start` (the previously displayed range) to `target`.
    #[must_use]
    pub fn create(
        start: NormalizedRange,
        target: NormalizedRange,
        duration_ms: f64,
        now_ms: f64,
    ) -> Self {
        Self {
            from: Animation::create(start.from, target.from, duration_ms, now_ms),
            to: Animation::create(start.to, target.to, duration_ms, now_ms),
        }
    }

    #[must_use]
    pub fn displayed(self, now_ms: f64) -> NormalizedRange {
        NormalizedRange {
            from: self.from.value(now_ms),
            to: self.to.value(now_ms),
        }
    }

    #[must_use]
    pub fn target(self) -> NormalizedRange {
        NormalizedRange {
            from: self.from.target(),
            to: self.to.target(),
        }
    }

    #[must_use]
    pub fn is_finished(self, now_ms: f64) -> bool {
        self.from.is_finished(now_ms) && self.to.is_finished(now_ms)
    }
}
