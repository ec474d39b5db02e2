//! JavaScript bindings.

use super::dom::DomSurface;
use super::frame::AnimationFrameScheduler;
use super::options::{options_json, parse_config};
use arcgauge_core::{
    DashboardGauges, DashboardMounts, Gauge, GaugeConfig, GaugeError, MonitoringStats,
};
use std::rc::Rc;
use wasm_bindgen::prelude::*;

fn to_js(err: GaugeError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Wrap a JavaScript `(value) => string` function.
fn js_string_fn(f: js_sys::Function) -> impl Fn(f64) -> String + 'static {
    move |value| match f.call1(&JsValue::NULL, &JsValue::from_f64(value)) {
        Ok(out) => out.as_string().unwrap_or_else(|| format!("{out:?}")),
        Err(err) => {
            tracing::warn!(?err, "gauge callback threw");
            String::new()
        }
    }
}

/// An SVG gauge mounted into a DOM element.
#[wasm_bindgen]
pub struct GaugeWidget {
    gauge: Gauge<DomSurface>,
}

#[wasm_bindgen]
impl GaugeWidget {
    /// Mount a gauge into the element with id `element_id`.
    ///
    /// `options` is a JSON options object; `label` and `color` are
    /// optional `(value) => string` functions that override it.
    #[wasm_bindgen(constructor)]
    pub fn new(
        element_id: &str,
        options: Option<String>,
        label: Option<js_sys::Function>,
        color: Option<js_sys::Function>,
    ) -> Result<GaugeWidget, JsValue> {
        console_error_panic_hook::set_once();

        let mut config = parse_config(options.as_deref().unwrap_or_default()).map_err(to_js)?;
        if let Some(f) = label {
            config = config.label_fn(js_string_fn(f));
        }
        if let Some(f) = color {
            config = config.color_fn(js_string_fn(f));
        }
        mount(element_id, config).map(|gauge| Self { gauge })
    }

    /// Set the value immediately.
    #[wasm_bindgen(js_name = setValue)]
    pub fn set_value(&self, value: f64) -> Result<(), JsValue> {
        self.gauge.set_value(value).map_err(to_js)
    }

    /// Animate to `value` over `duration` seconds (default 1).
    #[wasm_bindgen(js_name = setValueAnimated)]
    pub fn set_value_animated(&self, value: f64, duration: Option<f64>) -> Result<(), JsValue> {
        self.gauge
            .set_value_animated(value, duration.unwrap_or_default())
            .map_err(to_js)
    }

    /// Change the maximum.
    #[wasm_bindgen(js_name = setMaxValue)]
    pub fn set_max_value(&self, max: f64) -> Result<(), JsValue> {
        self.gauge.set_max_value(max).map_err(to_js)
    }

    /// Set the value, animated if the options say so.
    pub fn update(&self, value: f64) -> Result<(), JsValue> {
        self.gauge.update(value).map_err(to_js)
    }

    /// Current value.
    #[wasm_bindgen(js_name = getValue)]
    pub fn get_value(&self) -> f64 {
        self.gauge.get_value()
    }

    /// Options as a JSON string.
    #[wasm_bindgen(js_name = getOptions)]
    pub fn get_options(&self) -> Result<String, JsValue> {
        options_json(&self.gauge.get_options()).map_err(to_js)
    }

    /// Whether an animation is running.
    #[wasm_bindgen(js_name = isAnimating)]
    pub fn is_animating(&self) -> bool {
        self.gauge.is_animating()
    }

    /// Stop a running animation where it is.
    #[wasm_bindgen(js_name = cancelAnimation)]
    pub fn cancel_animation(&self) -> bool {
        self.gauge.cancel_animation()
    }
}

fn mount(element_id: &str, config: GaugeConfig) -> Result<Gauge<DomSurface>, JsValue> {
    let surface = DomSurface::from_window().map_err(to_js)?;
    let mount = surface.element_by_id(element_id).map_err(to_js)?;
    let scheduler = Rc::new(AnimationFrameScheduler::from_window().map_err(to_js)?);
    Gauge::new(surface, &mount, config, scheduler).map_err(to_js)
}

/// Resource monitoring gauges fed from stats responses.
#[wasm_bindgen]
pub struct DashboardWidget {
    gauges: DashboardGauges<DomSurface>,
}

#[wasm_bindgen]
impl DashboardWidget {
    /// Mount the usage, wait time and waiting gauges by element id.
    #[wasm_bindgen(constructor)]
    pub fn new(usage_id: &str, wait_time_id: &str, waiting_id: &str) -> Result<DashboardWidget, JsValue> {
        console_error_panic_hook::set_once();

        let surface = DomSurface::from_window().map_err(to_js)?;
        let mounts = DashboardMounts {
            usage: surface.element_by_id(usage_id).map_err(to_js)?,
            wait_time: surface.element_by_id(wait_time_id).map_err(to_js)?,
            waiting: surface.element_by_id(waiting_id).map_err(to_js)?,
        };
        let scheduler = Rc::new(AnimationFrameScheduler::from_window().map_err(to_js)?);
        let gauges = DashboardGauges::new(&surface, &mounts, scheduler).map_err(to_js)?;
        Ok(Self { gauges })
    }

    /// Apply a `{"result": {...}}` stats response body.
    #[wasm_bindgen(js_name = applyResponse)]
    pub fn apply_response(&self, body: &str) -> Result<(), JsValue> {
        let stats = MonitoringStats::from_response(body).map_err(to_js)?;
        self.gauges.apply(&stats).map_err(to_js)
    }

    /// Suggested polling interval in milliseconds.
    #[wasm_bindgen(js_name = refreshIntervalMs)]
    pub fn refresh_interval_ms() -> u32 {
        arcgauge_core::REFRESH_INTERVAL.as_millis() as u32
    }
}
