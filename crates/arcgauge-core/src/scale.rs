//! Threshold color scales for value-dependent gauge colors.

use serde::{Deserialize, Serialize};

/// Green used below the first threshold of the dashboard presets.
pub const GREEN: &str = "#2ECC40";
/// Yellow used between the dashboard thresholds.
pub const YELLOW: &str = "#FFDC00";
/// Red used past the last dashboard threshold.
pub const RED: &str = "#FF4136";

/// One step of a [`ThresholdScale`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    /// Ratios strictly below this use `color`
    pub below: f64,
    /// CSS color
    pub color: String,
}

impl Stop {
    /// Create a new stop.
    #[must_use]
    pub fn new(below: f64, color: impl Into<String>) -> Self {
        Self {
            below,
            color: color.into(),
        }
    }
}

/// Maps `value / reference` onto the first stop whose bound it falls below.
///
/// ```
/// use arcgauge_core::ThresholdScale;
///
/// let scale = ThresholdScale::resource_usage();
/// assert_eq!(scale.color_for(10.0, 100.0), "#2ECC40");
/// assert_eq!(scale.color_for(95.0, 100.0), "#FF4136");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdScale {
    /// Fixed reference value; `None` uses the gauge maximum
    #[serde(default)]
    pub reference: Option<f64>,
    /// Stops in ascending order
    pub stops: Vec<Stop>,
    /// Color when no stop matches
    pub otherwise: String,
    /// Color for a zero value against a zero reference
    #[serde(default)]
    pub idle: Option<String>,
}

impl ThresholdScale {
    /// Create a scale with the given fallback color and no stops.
    #[must_use]
    pub fn new(otherwise: impl Into<String>) -> Self {
        Self {
            reference: None,
            stops: Vec::new(),
            otherwise: otherwise.into(),
            idle: None,
        }
    }

    /// Add a stop. Stops are kept sorted by bound.
    #[must_use]
    pub fn stop(mut self, below: f64, color: impl Into<String>) -> Self {
        self.stops.push(Stop::new(below, color));
        self.stops.sort_by(|a, b| a.below.total_cmp(&b.below));
        self
    }

    /// Use a fixed reference instead of the gauge maximum.
    #[must_use]
    pub fn reference(mut self, reference: f64) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Color for a zero value when the reference is zero.
    #[must_use]
    pub fn idle(mut self, color: impl Into<String>) -> Self {
        self.idle = Some(color.into());
        self
    }

    /// Resource usage against the gauge maximum.
    #[must_use]
    pub fn resource_usage() -> Self {
        Self::new(RED).stop(0.5, GREEN).stop(0.9, YELLOW)
    }

    /// Average wait time in seconds against one minute.
    #[must_use]
    pub fn wait_time() -> Self {
        Self::new(RED).reference(60.0).stop(0.2, GREEN).stop(0.7, YELLOW)
    }

    /// Waiting requests against the number of available resources.
    #[must_use]
    pub fn wait_count(available: f64) -> Self {
        Self::new(RED)
            .reference(available)
            .idle("black")
            .stop(0.15, GREEN)
            .stop(0.33, YELLOW)
    }

    /// Color for `value`, using `max` when no fixed reference is set.
    #[must_use]
    pub fn color_for(&self, value: f64, max: f64) -> String {
        let reference = self.reference.unwrap_or(max);
        if reference == 0.0 {
            return match (&self.idle, value == 0.0) {
                (Some(idle), true) => idle.clone(),
                _ => self.otherwise.clone(),
            };
        }

        let ratio = value / reference;
        self.stops
            .iter()
            .find(|s| ratio < s.below)
            .map_or_else(|| self.otherwise.clone(), |s| s.color.clone())
    }
}
