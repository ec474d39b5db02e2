//! Forwards `tracing` events to the browser console.
//!
//! [`ConsoleLayer`] formats each event as one line and hands it to a
//! [`LogSink`]. In the browser the sink is the developer console; tests
//! plug in their own.

use std::fmt::{self, Write as _};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Metadata, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

/// Destination for formatted log lines.
pub trait LogSink: 'static {
    /// Write one line at `level`.
    fn write(&self, level: Level, line: &str);
}

/// A `tracing` layer that writes events at or above `max_level` to a sink.
#[derive(Debug)]
pub struct ConsoleLayer<K> {
    sink: K,
    max_level: Level,
}

impl<K: LogSink> ConsoleLayer<K> {
    /// Create a layer writing to `sink`.
    pub fn new(sink: K, max_level: Level) -> Self {
        Self { sink, max_level }
    }
}

impl<S, K> Layer<S> for ConsoleLayer<K>
where
    S: Subscriber,
    K: LogSink,
{
    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        *metadata.level() <= self.max_level
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);
        self.sink.write(*meta.level(), &visitor.finish(meta.target()));
    }
}

/// Collects the message first, then `key=value` pairs in field order.
#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: String,
}

impl LineVisitor {
    fn finish(self, target: &str) -> String {
        let mut line = format!("{target}: {}", self.message);
        line.push_str(&self.fields);
        line
    }
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            let _ = write!(self.fields, " {}={value}", field.name());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            let _ = write!(self.fields, " {}={value:?}", field.name());
        }
    }
}

/// Parse a level name such as `"warn"`; unknown names fall back to `WARN`.
#[must_use]
pub fn level_from_str(name: &str) -> Level {
    name.trim().parse().unwrap_or(Level::WARN)
}

#[cfg(target_arch = "wasm32")]
mod console {
    use super::{ConsoleLayer, LogSink};
    use tracing::Level;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::Registry;
    use wasm_bindgen::prelude::*;
    use web_sys::console;

    /// The browser developer console.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct Console;

    impl LogSink for Console {
        fn write(&self, level: Level, line: &str) {
            let line = JsValue::from_str(line);
            match level {
                Level::ERROR => console::error_1(&line),
                Level::WARN => console::warn_1(&line),
                Level::INFO => console::info_1(&line),
                _ => console::debug_1(&line),
            }
        }
    }

    /// Route gauge logs to the console, e.g. `initLogging("debug")`.
    ///
    /// Only the first call installs the subscriber.
    #[wasm_bindgen(js_name = initLogging)]
    pub fn init_logging(level: &str) {
        let level = super::level_from_str(level);
        let subscriber = Registry::default().with(ConsoleLayer::new(Console, level));
        if tracing::subscriber::set_global_default(subscriber).is_ok() {
            tracing::debug!(%level, "console logging installed");
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use console::{init_logging, Console};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::Registry;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<(Level, String)>>>);

    impl LogSink for Capture {
        fn write(&self, level: Level, line: &str) {
            self.0.lock().unwrap().push((level, line.to_string()));
        }
    }

    fn capture(max_level: Level, f: impl FnOnce()) -> Vec<(Level, String)> {
        let sink = Capture::default();
        let subscriber = Registry::default().with(ConsoleLayer::new(sink.clone(), max_level));
        tracing::subscriber::with_default(subscriber, f);
        let lines = sink.0.lock().unwrap().clone();
        lines
    }

    #[test]
    fn test_formats_message_and_fields() {
        let lines = capture(Level::DEBUG, || {
            tracing::warn!(target: "gauge", start = 45.0, end = 135.0, "angles swapped");
        });
        assert_eq!(
            lines,
            vec![(
                Level::WARN,
                "gauge: angles swapped start=45.0 end=135.0".to_string()
            )]
        );
    }

    #[test]
    fn test_filters_below_max_level() {
        let lines = capture(Level::WARN, || {
            tracing::debug!("hidden");
            tracing::info!("hidden too");
            tracing::error!("shown");
        });
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].0, Level::ERROR);
    }

    #[test]
    fn test_gauge_warning_reaches_sink() {
        let lines = capture(Level::WARN, || {
            let _ = arcgauge_core::GaugeConfig::new().angles(10.0, 20.0).resolve();
        });
        assert_eq!(lines.len(), 1);
        assert!(lines[0].1.contains("swapping"));
        assert!(lines[0].1.contains("start=10.0"));
    }

    #[test]
    fn test_level_from_str() {
        assert_eq!(level_from_str("debug"), Level::DEBUG);
        assert_eq!(level_from_str(" ERROR "), Level::ERROR);
        assert_eq!(level_from_str("loud"), Level::WARN);
    }
}
