//! Core of the arcgauge SVG gauge widget.
//!
//! This crate has no browser dependency:
//! - Geometry and value mapping: [`geometry`], [`value`]
//! - Configuration: [`GaugeConfig`] resolved into [`GaugeOptions`]
//! - Labels and colors: [`Label`], [`Colorizer`], [`ThresholdScale`]
//! - The widget itself: [`Gauge`], writing to any [`Surface`]
//! - Animation: [`Tween`] driven by a [`FrameScheduler`]
//! - Monitoring presets: [`DashboardGauges`]

mod animation;
mod dashboard;
mod error;
mod format;
mod gauge;
pub mod geometry;
mod options;
mod render;
mod scale;
mod scheduler;
mod surface;
pub mod value;

pub use animation::{sanitize_duration, Easing, Frame, Tween, DEFAULT_DURATION, FRAME_RATE};
pub use dashboard::{
    DashboardGauges, DashboardMounts, Envelope, MonitoringStats, MAX_WAIT_SECS, REFRESH_INTERVAL,
};
pub use error::{GaugeError, Result};
pub use format::{ColorFn, Colorizer, Label, LabelFn};
pub use gauge::{render_svg, Gauge};
pub use options::{
    GaugeConfig, GaugeOptions, ResolveWarning, Resolved, DEFAULT_DIAL_RADIUS, DEFAULT_END_ANGLE,
    DEFAULT_START_ANGLE,
};
pub use render::{color_style, RenderHandles, VIEW_BOX};
pub use scale::{Stop, ThresholdScale, GREEN, RED, YELLOW};
pub use scheduler::{FrameCallback, FrameHandle, FrameScheduler, ManualScheduler};
pub use surface::{Element, NodeId, Surface, SvgDocument, SVG_NS};
