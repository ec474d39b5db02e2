//! Gauge configuration: partial [`GaugeConfig`] resolved into [`GaugeOptions`].

use crate::animation::{Easing, DEFAULT_DURATION};
use crate::error::Result;
use crate::format::{Colorizer, Label};
use crate::scale::ThresholdScale;
use crate::value::is_degenerate;
use serde::{Deserialize, Serialize};

/// Default dial radius in viewbox units.
pub const DEFAULT_DIAL_RADIUS: f64 = 40.0;
/// Default start angle in degrees.
pub const DEFAULT_START_ANGLE: f64 = 135.0;
/// Default end angle in degrees.
pub const DEFAULT_END_ANGLE: f64 = 45.0;

/// Fully populated gauge configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GaugeOptions {
    /// Angle where the dial starts, in degrees
    pub dial_start_angle: f64,
    /// Angle where the dial ends, in degrees; less than the start angle
    pub dial_end_angle: f64,
    /// Radius of both arcs
    pub dial_radius: f64,
    /// Lower domain bound
    pub min: f64,
    /// Upper domain bound
    pub max: f64,
    /// Initial value
    pub value: f64,
    /// Label text for the current value
    pub label: Label,
    /// Value-dependent color of the value arc
    pub color: Option<Colorizer>,
    /// Whether the label is written
    pub show_value: bool,
    /// CSS class of the root `<svg>`
    pub gauge_class: String,
    /// CSS class of the background dial
    pub dial_class: String,
    /// CSS class of the value arc
    pub value_dial_class: String,
    /// CSS class of the label text
    pub value_class: String,
    /// Whether [`crate::Gauge::update`] animates
    pub animated: bool,
    /// Animation duration in seconds
    pub animation_duration: f64,
    /// Easing curve for animated transitions
    pub easing: Easing,
}

impl Default for GaugeOptions {
    fn default() -> Self {
        Self {
            dial_start_angle: DEFAULT_START_ANGLE,
            dial_end_angle: DEFAULT_END_ANGLE,
            dial_radius: DEFAULT_DIAL_RADIUS,
            min: 0.0,
            max: 100.0,
            value: 0.0,
            label: Label::Rounded,
            color: None,
            show_value: true,
            gauge_class: "gauge".to_string(),
            dial_class: "dial".to_string(),
            value_dial_class: "value".to_string(),
            value_class: "value-text".to_string(),
            animated: false,
            animation_duration: DEFAULT_DURATION,
            easing: Easing::CubicInOut,
        }
    }
}

/// Something [`GaugeConfig::resolve`] had to repair or could not.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolveWarning {
    /// The start angle was not greater than the end angle; they were swapped.
    SwappedAngles {
        /// Start angle as configured
        start: f64,
        /// End angle as configured
        end: f64,
    },
    /// `max` is not greater than `min`; values render at the start angle.
    DegenerateRange {
        /// Configured lower bound
        min: f64,
        /// Configured upper bound
        max: f64,
    },
}

/// Resolved options plus anything resolution repaired.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    /// The full configuration
    pub options: GaugeOptions,
    /// Non-fatal problems found
    pub warnings: Vec<ResolveWarning>,
}

/// Partial configuration; unset fields take the defaults.
///
/// Deserializes from the same camelCase keys a JavaScript options object
/// uses:
///
/// ```
/// use arcgauge_core::GaugeConfig;
///
/// let config = GaugeConfig::from_json(r#"{"max": 8, "dialStartAngle": 180, "dialEndAngle": 0}"#).unwrap();
/// let options = config.resolve().options;
/// assert_eq!(options.max, 8.0);
/// assert_eq!(options.dial_radius, 40.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GaugeConfig {
    /// See [`GaugeOptions::dial_start_angle`]
    pub dial_start_angle: Option<f64>,
    /// See [`GaugeOptions::dial_end_angle`]
    pub dial_end_angle: Option<f64>,
    /// See [`GaugeOptions::dial_radius`]
    pub dial_radius: Option<f64>,
    /// See [`GaugeOptions::min`]
    pub min: Option<f64>,
    /// See [`GaugeOptions::max`]
    pub max: Option<f64>,
    /// See [`GaugeOptions::value`]
    pub value: Option<f64>,
    /// See [`GaugeOptions::label`]
    pub label: Option<Label>,
    /// See [`GaugeOptions::color`]
    pub color: Option<Colorizer>,
    /// See [`GaugeOptions::show_value`]
    pub show_value: Option<bool>,
    /// See [`GaugeOptions::gauge_class`]
    pub gauge_class: Option<String>,
    /// See [`GaugeOptions::dial_class`]
    pub dial_class: Option<String>,
    /// See [`GaugeOptions::value_dial_class`]
    pub value_dial_class: Option<String>,
    /// See [`GaugeOptions::value_class`]
    pub value_class: Option<String>,
    /// See [`GaugeOptions::animated`]
    pub animated: Option<bool>,
    /// See [`GaugeOptions::animation_duration`]
    pub animation_duration: Option<f64>,
    /// See [`GaugeOptions::easing`]
    pub easing: Option<Easing>,
}

impl GaugeConfig {
    /// Empty configuration (all defaults).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON options object.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a YAML options document.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Set the dial angles.
    #[must_use]
    pub fn angles(mut self, start: f64, end: f64) -> Self {
        self.dial_start_angle = Some(start);
        self.dial_end_angle = Some(end);
        self
    }

    /// Set the dial radius.
    #[must_use]
    pub fn dial_radius(mut self, radius: f64) -> Self {
        self.dial_radius = Some(radius);
        self
    }

    /// Set the domain bounds.
    #[must_use]
    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    /// Set the upper bound.
    #[must_use]
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Set the initial value.
    #[must_use]
    pub fn value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    /// Set the label style.
    #[must_use]
    pub fn label(mut self, label: Label) -> Self {
        self.label = Some(label);
        self
    }

    /// Label from a closure.
    #[must_use]
    pub fn label_fn(self, f: impl Fn(f64) -> String + 'static) -> Self {
        self.label(Label::custom(f))
    }

    /// Set the value color.
    #[must_use]
    pub fn color(mut self, color: impl Into<Colorizer>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Value color from a closure.
    #[must_use]
    pub fn color_fn(self, f: impl Fn(f64) -> String + 'static) -> Self {
        self.color(Colorizer::custom(f))
    }

    /// Value color from a threshold scale.
    #[must_use]
    pub fn thresholds(self, scale: ThresholdScale) -> Self {
        self.color(scale)
    }

    /// Set whether the label is shown.
    #[must_use]
    pub fn show_value(mut self, show: bool) -> Self {
        self.show_value = Some(show);
        self
    }

    /// Set the CSS class of the root element.
    #[must_use]
    pub fn gauge_class(mut self, class: impl Into<String>) -> Self {
        self.gauge_class = Some(class.into());
        self
    }

    /// Set the CSS class of the dial.
    #[must_use]
    pub fn dial_class(mut self, class: impl Into<String>) -> Self {
        self.dial_class = Some(class.into());
        self
    }

    /// Set the CSS class of the value arc.
    #[must_use]
    pub fn value_dial_class(mut self, class: impl Into<String>) -> Self {
        self.value_dial_class = Some(class.into());
        self
    }

    /// Set the CSS class of the label.
    #[must_use]
    pub fn value_class(mut self, class: impl Into<String>) -> Self {
        self.value_class = Some(class.into());
        self
    }

    /// Animate [`crate::Gauge::update`] over `duration` seconds.
    #[must_use]
    pub fn animated(mut self, duration: f64) -> Self {
        self.animated = Some(true);
        self.animation_duration = Some(duration);
        self
    }

    /// Set the easing curve.
    #[must_use]
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }

    /// Layer this configuration over the defaults and repair angle order.
    #[must_use]
    pub fn resolve(self) -> Resolved {
        let defaults = GaugeOptions::default();
        let mut options = GaugeOptions {
            dial_start_angle: self.dial_start_angle.unwrap_or(defaults.dial_start_angle),
            dial_end_angle: self.dial_end_angle.unwrap_or(defaults.dial_end_angle),
            dial_radius: self.dial_radius.unwrap_or(defaults.dial_radius),
            min: self.min.unwrap_or(defaults.min),
            max: self.max.unwrap_or(defaults.max),
            value: self.value.unwrap_or(defaults.value),
            label: self.label.unwrap_or(defaults.label),
            color: self.color.or(defaults.color),
            show_value: self.show_value.unwrap_or(defaults.show_value),
            gauge_class: self.gauge_class.unwrap_or(defaults.gauge_class),
            dial_class: self.dial_class.unwrap_or(defaults.dial_class),
            value_dial_class: self.value_dial_class.unwrap_or(defaults.value_dial_class),
            value_class: self.value_class.unwrap_or(defaults.value_class),
            animated: self.animated.unwrap_or(defaults.animated),
            animation_duration: self
                .animation_duration
                .unwrap_or(defaults.animation_duration),
            easing: self.easing.unwrap_or(defaults.easing),
        };

        let mut warnings = Vec::new();

        if options.dial_start_angle <= options.dial_end_angle {
            tracing::warn!(
                start = options.dial_start_angle,
                end = options.dial_end_angle,
                "gauge start angle not greater than end angle, swapping"
            );
            warnings.push(ResolveWarning::SwappedAngles {
                start: options.dial_start_angle,
                end: options.dial_end_angle,
            });
            std::mem::swap(&mut options.dial_start_angle, &mut options.dial_end_angle);
        }

        if is_degenerate(options.min, options.max) {
            tracing::warn!(
                min = options.min,
                max = options.max,
                "gauge range is empty, value arc stays at the start angle"
            );
            warnings.push(ResolveWarning::DegenerateRange {
                min: options.min,
                max: options.max,
            });
        }

        Resolved { options, warnings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let Resolved { options, warnings } = GaugeConfig::new().resolve();
        assert!(warnings.is_empty());
        assert_eq!(options, GaugeOptions::default());
        assert_eq!(options.dial_radius, 40.0);
        assert_eq!(options.dial_start_angle, 135.0);
        assert_eq!(options.dial_end_angle, 45.0);
        assert_eq!((options.min, options.max, options.value), (0.0, 100.0, 0.0));
        assert!(options.show_value);
        assert_eq!(options.label, Label::Rounded);
        assert_eq!(options.color, None);
    }

    #[test]
    fn test_caller_values_override_defaults() {
        let options = GaugeConfig::new()
            .range(-10.0, 10.0)
            .dial_radius(30.0)
            .gauge_class("cpu")
            .show_value(false)
            .resolve()
            .options;
        assert_eq!(options.min, -10.0);
        assert_eq!(options.max, 10.0);
        assert_eq!(options.dial_radius, 30.0);
        assert_eq!(options.gauge_class, "cpu");
        assert!(!options.show_value);
        assert_eq!(options.dial_class, "dial");
    }

    #[test]
    fn test_reversed_angles_are_swapped() {
        let swapped = GaugeConfig::new().angles(45.0, 135.0).resolve();
        let normal = GaugeConfig::new().angles(135.0, 45.0).resolve();
        assert_eq!(swapped.options, normal.options);
        assert_eq!(
            swapped.warnings,
            vec![ResolveWarning::SwappedAngles {
                start: 45.0,
                end: 135.0
            }]
        );
        assert!(normal.warnings.is_empty());
    }

    #[test]
    fn test_equal_angles_warn() {
        let resolved = GaugeConfig::new().angles(90.0, 90.0).resolve();
        assert_eq!(resolved.warnings.len(), 1);
        assert_eq!(resolved.options.dial_start_angle, 90.0);
    }

    #[test]
    fn test_degenerate_range_warns() {
        let resolved = GaugeConfig::new().range(5.0, 5.0).resolve();
        assert_eq!(
            resolved.warnings,
            vec![ResolveWarning::DegenerateRange { min: 5.0, max: 5.0 }]
        );
    }

    #[test]
    fn test_from_json_camel_case() {
        let config = GaugeConfig::from_json(
            r#"{
                "dialStartAngle": 180,
                "dialEndAngle": 0,
                "max": 8,
                "showValue": false,
                "valueDialClass": "fill",
                "label": {"style": "outOfMax"},
                "color": {"kind": "thresholds", "stops": [{"below": 0.5, "color": "green"}], "otherwise": "red"},
                "animated": true,
                "animationDuration": 0.5,
                "easing": "linear"
            }"#,
        )
        .unwrap();
        let options = config.resolve().options;
        assert_eq!(options.dial_start_angle, 180.0);
        assert_eq!(options.max, 8.0);
        assert!(!options.show_value);
        assert_eq!(options.value_dial_class, "fill");
        assert_eq!(options.label, Label::OutOfMax);
        assert!(options.color.is_some());
        assert!(options.animated);
        assert_eq!(options.animation_duration, 0.5);
        assert_eq!(options.easing, Easing::Linear);
    }

    #[test]
    fn test_from_json_ignores_unknown_keys() {
        let config = GaugeConfig::from_json(r#"{"valueLabelClass": "x", "max": 3}"#).unwrap();
        assert_eq!(config.max, Some(3.0));
    }

    #[test]
    fn test_from_yaml() {
        let yaml = "
dialRadius: 45
min: 0
max: 60
label:
  style: fixed
  decimals: 1
color:
  kind: thresholds
  reference: 60
  stops:
    - below: 0.2
      color: '#2ECC40'
  otherwise: '#FF4136'
";
        let options = GaugeConfig::from_yaml(yaml).unwrap().resolve().options;
        assert_eq!(options.dial_radius, 45.0);
        assert_eq!(options.max, 60.0);
        assert_eq!(options.label, Label::Fixed { decimals: 1 });
        let color = options.color.unwrap();
        assert_eq!(color.color(6.0, 1.0), "#2ECC40");
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(GaugeConfig::from_json("{\"max\": \"lots\"}").is_err());
    }

    #[test]
    fn test_options_json_uses_camel_case() {
        let json = serde_json::to_value(GaugeOptions::default()).unwrap();
        assert_eq!(json["dialStartAngle"], 135.0);
        assert_eq!(json["valueClass"], "value-text");
        assert_eq!(json["label"]["style"], "rounded");
    }
}
