//! Frame-stepped value interpolation with easing.
//!
//! A [`Tween`] is a pure state machine: every call to [`Tween::next_frame`]
//! yields the value for one frame. Who calls it, and when, is up to the
//! frame scheduler driving the gauge.

use serde::{Deserialize, Serialize};

/// Frames per second assumed when converting a duration to frames.
pub const FRAME_RATE: f64 = 60.0;

/// Duration used when a caller passes zero, a negative or a non-finite one.
pub const DEFAULT_DURATION: f64 = 1.0;

// =============================================================================
// Easing Functions
// =============================================================================

/// Easing curves for value transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    /// Linear interpolation (no easing)
    Linear,
    /// Quadratic ease in and out
    EaseInOut,
    /// Cubic ease in
    CubicIn,
    /// Cubic ease out
    CubicOut,
    /// Cubic ease in and out, piecewise at the midpoint
    #[default]
    CubicInOut,
}

impl Easing {
    /// Apply easing function to a normalized time value (0.0 to 1.0).
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseInOut => Self::ease_in_out_quad(t),
            Self::CubicIn => t * t * t,
            Self::CubicOut => 1.0 - (1.0 - t).powi(3),
            Self::CubicInOut => Self::ease_in_out_cubic(t),
        }
    }

    fn ease_in_out_quad(t: f64) -> f64 {
        if t < 0.5 {
            2.0 * t * t
        } else {
            1.0 - (-2.0f64).mul_add(t, 2.0).powi(2) / 2.0
        }
    }

    fn ease_in_out_cubic(t: f64) -> f64 {
        if t < 0.5 {
            4.0 * t * t * t
        } else {
            1.0 - (-2.0f64).mul_add(t, 2.0).powi(3) / 2.0
        }
    }
}

// =============================================================================
// Tween
// =============================================================================

/// One step of a [`Tween`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Interpolated value
    pub value: f64,
    /// 1-based frame number
    pub iteration: u32,
    /// Whether this is the final frame
    pub last: bool,
}

/// Interpolates from `start` to `end` over `60 * duration` frames.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    start: f64,
    end: f64,
    iterations: f64,
    iteration: u32,
    easing: Easing,
    finished: bool,
}

/// Clean up a caller-supplied duration in seconds.
#[must_use]
pub fn sanitize_duration(duration: f64) -> f64 {
    if duration.is_finite() && duration > 0.0 {
        duration
    } else {
        DEFAULT_DURATION
    }
}

impl Tween {
    /// Create a tween lasting `duration` seconds.
    #[must_use]
    pub fn new(start: f64, end: f64, duration: f64) -> Self {
        Self {
            start,
            end,
            iterations: FRAME_RATE * sanitize_duration(duration),
            iteration: 0,
            easing: Easing::default(),
            finished: false,
        }
    }

    /// Set easing function.
    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Nominal number of frames.
    #[must_use]
    pub fn iterations(&self) -> f64 {
        self.iterations
    }

    /// Target value.
    #[must_use]
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Whether the final frame has been produced.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Produce the next frame, or `None` once finished.
    ///
    /// The final frame is the first whose progress reaches 1; when the frame
    /// count is fractional it lands one frame past the nominal end, and its
    /// value is exactly `end`.
    pub fn next_frame(&mut self) -> Option<Frame> {
        if self.finished {
            return None;
        }

        self.iteration += 1;
        let progress = f64::from(self.iteration) / self.iterations;
        let last = progress >= 1.0;
        let value = if last {
            self.end
        } else {
            (self.end - self.start).mul_add(self.easing.apply(progress), self.start)
        };
        self.finished = last;

        Some(Frame {
            value,
            iteration: self.iteration,
            last,
        })
    }
}

impl Iterator for Tween {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        self.next_frame()
    }
}
