//! Mapping from domain values to percentages and swept angles.

/// Clamp `value` into `[min, max]`.
///
/// Unlike [`f64::clamp`] this never panics on an inverted range; the upper
/// bound is checked first. NaN maps to `min`.
#[must_use]
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        min
    } else if value > max {
        max
    } else if value < min {
        min
    } else {
        value
    }
}

/// Position of `value` inside `[min, max]` as a percentage.
///
/// No special-casing: a degenerate range yields a non-finite result. Use
/// [`safe_percentage`] where that must not leak into rendering.
#[must_use]
pub fn percentage(value: f64, min: f64, max: f64) -> f64 {
    100.0 * (value - min) / (max - min)
}

/// [`percentage`], mapped to `0.0` when the range is degenerate.
#[must_use]
pub fn safe_percentage(value: f64, min: f64, max: f64) -> f64 {
    if is_degenerate(min, max) {
        return 0.0;
    }
    let pct = percentage(value, min, max);
    if pct.is_finite() {
        pct
    } else {
        0.0
    }
}

/// Whether `[min, max]` cannot be mapped onto the dial.
#[must_use]
#[allow(clippy::neg_cmp_op_on_partial_ord)] // NaN bounds are degenerate too
pub fn is_degenerate(min: f64, max: f64) -> bool {
    !(max > min) || !(max - min).is_finite()
}

/// Angular span swept from `min` to `max` (the major arc between the angles).
#[must_use]
pub fn dial_span(start_angle: f64, end_angle: f64) -> f64 {
    360.0 - (start_angle - end_angle).abs()
}

/// Angle swept for a percentage of `span`.
#[must_use]
pub fn sweep_angle(percentage: f64, span: f64) -> f64 {
    percentage * span / 100.0
}
