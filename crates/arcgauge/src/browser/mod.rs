//! Browser runtime for arcgauge.
//!
//! Bridges the gauge engine to the DOM, the browser's frame clock and
//! the developer console.

// WASM-only modules
#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod frame;
#[cfg(target_arch = "wasm32")]
pub mod widget;

// Cross-platform modules
pub mod logging;
pub mod options;

#[cfg(target_arch = "wasm32")]
pub use dom::DomSurface;
#[cfg(target_arch = "wasm32")]
pub use frame::AnimationFrameScheduler;
pub use logging::{ConsoleLayer, LogSink};
pub use options::{options_json, parse_config};
#[cfg(target_arch = "wasm32")]
pub use widget::{DashboardWidget, GaugeWidget};
