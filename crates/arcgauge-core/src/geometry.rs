//! Dial geometry: polar to cartesian conversion and SVG arc paths.
//!
//! Angles are in degrees. 0° points along the positive X axis and angles
//! grow clockwise, because the SVG coordinate space grows downward in Y.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Center of the local `0 0 100 100` viewbox.
pub const CENTER_X: f64 = 50.0;
/// Center of the local `0 0 100 100` viewbox.
pub const CENTER_Y: f64 = 50.0;

/// A point in the local viewbox coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Start and end points of a dial arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialCoords {
    /// Where the arc begins
    pub start: Coord,
    /// Where the arc ends
    pub end: Coord,
}

/// Round to three decimal places, folding negative zero into zero.
fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0 + 0.0
}

/// Cartesian coordinates for a point on a circle.
#[must_use]
pub fn cartesian(cx: f64, cy: f64, radius: f64, angle: f64) -> Coord {
    let rad = angle.to_radians();
    Coord {
        x: round3(radius.mul_add(rad.cos(), cx)),
        y: round3(radius.mul_add(rad.sin(), cy)),
    }
}

/// Start and end points of an arc around the viewbox center.
#[must_use]
pub fn dial_coords(radius: f64, start_angle: f64, end_angle: f64) -> DialCoords {
    DialCoords {
        start: cartesian(CENTER_X, CENTER_Y, radius, start_angle),
        end: cartesian(CENTER_X, CENTER_Y, radius, end_angle),
    }
}

/// Large-arc flag for a swept angle: the long way round only past 180°.
#[must_use]
pub fn large_arc_flag(sweep: f64) -> u8 {
    if sweep <= 180.0 {
        0
    } else {
        1
    }
}

/// Format a number the way SVG path data expects it.
///
/// Integral values print without a fractional part (`50`, not `50.0`).
#[must_use]
pub fn fmt_num(v: f64) -> String {
    format!("{}", v + 0.0)
}

/// SVG path data for a clockwise circular arc.
///
/// `large_arc` defaults to `1` when `None`.
#[must_use]
pub fn arc_path(radius: f64, start_angle: f64, end_angle: f64, large_arc: Option<u8>) -> String {
    let DialCoords { start, end } = dial_coords(radius, start_angle, end_angle);
    let flag = large_arc.unwrap_or(1);
    let r = fmt_num(radius);

    let mut d = String::with_capacity(48);
    let _ = write!(
        d,
        "M {} {} A {r} {r} 0 {flag} 1 {} {}",
        fmt_num(start.x),
        fmt_num(start.y),
        fmt_num(end.x),
        fmt_num(end.y),
    );
    d
}
