//! JSON options as they cross the JavaScript boundary.

use arcgauge_core::{Colorizer, GaugeConfig, GaugeOptions, Label, Result};
use serde_json::{json, Value};

/// Parse an options object passed from JavaScript.
///
/// An empty string, `null` or `undefined` means all defaults.
pub fn parse_config(json: &str) -> Result<GaugeConfig> {
    let json = json.trim();
    if json.is_empty() || json == "null" || json == "undefined" {
        return Ok(GaugeConfig::new());
    }
    GaugeConfig::from_json(json)
}

/// Serialize options for JavaScript.
///
/// Caller-supplied label and color functions cannot cross as JSON; they
/// show up as `{"style": "custom"}` and `{"kind": "custom"}`.
pub fn options_json(options: &GaugeOptions) -> Result<String> {
    let mut plain = options.clone();
    let custom_label = matches!(plain.label, Label::Custom(_));
    let custom_color = matches!(plain.color, Some(Colorizer::Custom(_)));
    if custom_label {
        plain.label = Label::default();
    }
    if custom_color {
        plain.color = None;
    }

    let mut value = serde_json::to_value(&plain)?;
    if let Value::Object(map) = &mut value {
        if custom_label {
            map.insert("label".into(), json!({ "style": "custom" }));
        }
        if custom_color {
            map.insert("color".into(), json!({ "kind": "custom" }));
        }
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcgauge_core::ThresholdScale;

    #[test]
    fn test_parse_empty_means_defaults() {
        for input in ["", "  ", "null", "undefined"] {
            assert_eq!(parse_config(input).unwrap(), GaugeConfig::new());
        }
    }

    #[test]
    fn test_parse_options_object() {
        let config = parse_config(r#"{"max": 8, "gaugeClass": "cpu"}"#).unwrap();
        assert_eq!(config.max, Some(8.0));
        assert_eq!(config.gauge_class.as_deref(), Some("cpu"));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_config("{not json").is_err());
    }

    #[test]
    fn test_options_json_plain() {
        let options = GaugeConfig::new()
            .thresholds(ThresholdScale::resource_usage())
            .resolve()
            .options;
        let json: Value = serde_json::from_str(&options_json(&options).unwrap()).unwrap();
        assert_eq!(json["max"], 100.0);
        assert_eq!(json["label"]["style"], "rounded");
        assert_eq!(json["color"]["kind"], "thresholds");
        assert_eq!(json["color"]["otherwise"], "#FF4136");
    }

    #[test]
    fn test_options_json_custom_functions() {
        let options = GaugeConfig::new()
            .label_fn(|v| format!("{v}!"))
            .color_fn(|_| "blue".into())
            .resolve()
            .options;
        let json: Value = serde_json::from_str(&options_json(&options).unwrap()).unwrap();
        assert_eq!(json["label"], json!({ "style": "custom" }));
        assert_eq!(json["color"], json!({ "kind": "custom" }));
        assert_eq!(json["dialRadius"], 40.0);
    }

    #[test]
    fn test_options_json_parses_back() {
        let options = GaugeConfig::new().range(5.0, 50.0).resolve().options;
        let text = options_json(&options).unwrap();
        let again = parse_config(&text).unwrap().resolve().options;
        assert_eq!(again, options);
    }
}
