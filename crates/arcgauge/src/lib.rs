//! arcgauge: SVG arc gauges for the browser.
//!
//! Re-exports [`arcgauge_core`] and adds the DOM surface, the
//! `requestAnimationFrame` scheduler and the JavaScript bindings.
//!
//! # Browser Usage (WASM)
//!
//! ```javascript
//! import init, { GaugeWidget, initLogging } from './arcgauge.js';
//!
//! async function main() {
//!     await init();
//!     initLogging('warn');
//!     const gauge = new GaugeWidget('cpu', '{"max": 8, "label": {"style": "outOfMax"}}');
//!     gauge.setValueAnimated(5, 1);
//! }
//! ```

pub use arcgauge_core::*;

pub mod browser;

#[cfg(target_arch = "wasm32")]
pub use browser::{AnimationFrameScheduler, DashboardWidget, DomSurface, GaugeWidget};

pub use browser::{options_json, parse_config, ConsoleLayer, LogSink};
