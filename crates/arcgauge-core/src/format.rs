//! Label text and value colors.

use crate::geometry::fmt_num;
use crate::scale::ThresholdScale;
use crate::value::safe_percentage;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// Round half up, as the label presets display values.
fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

/// A caller-supplied label function.
#[derive(Clone)]
pub struct LabelFn(Rc<dyn Fn(f64) -> String>);

impl LabelFn {
    /// Wrap a closure.
    pub fn new(f: impl Fn(f64) -> String + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Call the function.
    #[must_use]
    pub fn call(&self, value: f64) -> String {
        (self.0)(value)
    }
}

impl fmt::Debug for LabelFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LabelFn(..)")
    }
}

// Identity, not behaviour.
impl PartialEq for LabelFn {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// A caller-supplied color function returning a CSS color.
#[derive(Clone)]
pub struct ColorFn(Rc<dyn Fn(f64) -> String>);

impl ColorFn {
    /// Wrap a closure.
    pub fn new(f: impl Fn(f64) -> String + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Call the function.
    #[must_use]
    pub fn call(&self, value: f64) -> String {
        (self.0)(value)
    }
}

impl fmt::Debug for ColorFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ColorFn(..)")
    }
}

impl PartialEq for ColorFn {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// How the centered label renders a value.
///
/// Custom functions cannot be serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "camelCase")]
pub enum Label {
    /// Nearest integer, e.g. `42`
    #[default]
    Rounded,
    /// Nearest integer over the current maximum, e.g. `3 / 8`
    OutOfMax,
    /// Rounded percentage of the range, e.g. `75%`
    Percent,
    /// Fixed number of decimals, e.g. `1.25`
    Fixed {
        /// Digits after the decimal point
        decimals: usize,
    },
    /// Caller-supplied function
    #[serde(skip)]
    Custom(LabelFn),
}

impl Label {
    /// Label from a closure.
    pub fn custom(f: impl Fn(f64) -> String + 'static) -> Self {
        Self::Custom(LabelFn::new(f))
    }

    /// Text for `value` within the live `[min, max]` range.
    #[must_use]
    pub fn render(&self, value: f64, min: f64, max: f64) -> String {
        match self {
            Self::Rounded => fmt_num(round_half_up(value)),
            Self::OutOfMax => format!("{} / {}", fmt_num(round_half_up(value)), fmt_num(max)),
            Self::Percent => {
                format!("{}%", fmt_num(round_half_up(safe_percentage(value, min, max))))
            }
            Self::Fixed { decimals } => format!("{value:.prec$}", prec = *decimals),
            Self::Custom(f) => f.call(value),
        }
    }
}

/// How the value arc is colored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Colorizer {
    /// Threshold scale over a reference value
    Thresholds(ThresholdScale),
    /// Caller-supplied function
    #[serde(skip)]
    Custom(ColorFn),
}

impl Colorizer {
    /// Colorizer from a closure.
    pub fn custom(f: impl Fn(f64) -> String + 'static) -> Self {
        Self::Custom(ColorFn::new(f))
    }

    /// CSS color for `value` given the live maximum.
    #[must_use]
    pub fn color(&self, value: f64, max: f64) -> String {
        match self {
            Self::Thresholds(scale) => scale.color_for(value, max),
            Self::Custom(f) => f.call(value),
        }
    }
}

impl From<ThresholdScale> for Colorizer {
    fn from(scale: ThresholdScale) -> Self {
        Self::Thresholds(scale)
    }
}
