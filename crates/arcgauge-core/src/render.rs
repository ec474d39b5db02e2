//! Builds the static SVG tree of a gauge.

use crate::error::Result;
use crate::geometry::{arc_path, fmt_num, large_arc_flag, CENTER_X, CENTER_Y};
use crate::options::GaugeOptions;
use crate::surface::Surface;
use crate::value::{dial_span, sweep_angle};

/// Local coordinate space of every gauge.
pub const VIEW_BOX: &str = "0 0 100 100";

/// The two nodes a gauge keeps writing to after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderHandles<N> {
    /// Centered label text
    pub value_text: N,
    /// Arc encoding the current value
    pub value_path: N,
}

fn element<S: Surface>(
    surface: &mut S,
    name: &str,
    attrs: &[(&str, String)],
    children: &[&S::Node],
) -> Result<S::Node> {
    let node = surface.create_element(name)?;
    for (k, v) in attrs {
        surface.set_attribute(&node, k, v)?;
    }
    for child in children {
        surface.append_child(&node, child)?;
    }
    Ok(node)
}

/// Build dial, label and value arc under `mount`.
///
/// The value arc starts as a zero-length arc at the start angle.
pub(crate) fn build<S: Surface>(
    surface: &mut S,
    mount: &S::Node,
    opts: &GaugeOptions,
) -> Result<RenderHandles<S::Node>> {
    let value_text = element(
        surface,
        "text",
        &[
            ("x", fmt_num(CENTER_X)),
            ("y", fmt_num(CENTER_Y)),
            ("fill", "#999".into()),
            ("class", opts.value_class.clone()),
            ("font-size", "100%".into()),
            ("font-family", "sans-serif".into()),
            ("font-weight", "normal".into()),
            ("text-anchor", "middle".into()),
            ("alignment-baseline", "middle".into()),
        ],
        &[],
    )?;

    let value_path = element(
        surface,
        "path",
        &[
            ("class", opts.value_dial_class.clone()),
            ("fill", "none".into()),
            ("stroke", "#666".into()),
            ("stroke-width", "2.5".into()),
            (
                "d",
                arc_path(
                    opts.dial_radius,
                    opts.dial_start_angle,
                    opts.dial_start_angle,
                    None,
                ),
            ),
        ],
        &[],
    )?;

    let full_sweep = sweep_angle(100.0, dial_span(opts.dial_start_angle, opts.dial_end_angle));
    let dial = element(
        surface,
        "path",
        &[
            ("class", opts.dial_class.clone()),
            ("fill", "none".into()),
            ("stroke", "#eee".into()),
            ("stroke-width", "2".into()),
            (
                "d",
                arc_path(
                    opts.dial_radius,
                    opts.dial_start_angle,
                    opts.dial_end_angle,
                    Some(large_arc_flag(full_sweep)),
                ),
            ),
        ],
        &[],
    )?;

    let root = element(
        surface,
        "svg",
        &[
            ("viewBox", VIEW_BOX.into()),
            ("class", opts.gauge_class.clone()),
        ],
        &[&dial, &value_text, &value_path],
    )?;
    surface.append_child(mount, &root)?;

    Ok(RenderHandles {
        value_text,
        value_path,
    })
}

/// Inline style for a colored value arc with a stroke transition.
#[must_use]
pub fn color_style(color: &str, duration_secs: f64) -> String {
    let transition = format!("stroke {}ms ease", fmt_num(duration_secs * 1000.0));
    [
        format!("stroke: {color}"),
        format!("-webkit-transition: {transition}"),
        format!("-moz-transition: {transition}"),
        format!("transition: {transition}"),
    ]
    .join(";")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::GaugeConfig;
    use crate::surface::SvgDocument;

    fn build_default() -> (SvgDocument, crate::surface::NodeId, RenderHandles<crate::surface::NodeId>) {
        let mut doc = SvgDocument::new();
        let mount = doc.mount_point();
        let opts = GaugeConfig::new().resolve().options;
        let handles = build(&mut doc, &mount, &opts).unwrap();
        (doc, mount, handles)
    }

    #[test]
    fn test_tree_shape() {
        let (doc, mount, handles) = build_default();
        let roots = doc.children(mount);
        assert_eq!(roots.len(), 1);
        let root = roots[0];
        assert_eq!(doc.element(root).unwrap().name, "svg");
        assert_eq!(doc.attribute(root, "viewBox"), Some("0 0 100 100"));
        assert_eq!(doc.attribute(root, "class"), Some("gauge"));

        let children = doc.children(root);
        assert_eq!(children.len(), 3);
        assert_eq!(doc.attribute(children[0], "class"), Some("dial"));
        assert_eq!(children[1], handles.value_text);
        assert_eq!(children[2], handles.value_path);
    }

    #[test]
    fn test_dial_spans_full_sweep() {
        let (doc, mount, _) = build_default();
        let root = doc.children(mount)[0];
        let dial = doc.children(root)[0];
        assert_eq!(
            doc.attribute(dial, "d"),
            Some("M 21.716 78.284 A 40 40 0 1 1 78.284 78.284")
        );
        assert_eq!(doc.attribute(dial, "stroke"), Some("#eee"));
    }

    #[test]
    fn test_value_arc_starts_empty() {
        let (doc, _, handles) = build_default();
        assert_eq!(
            doc.attribute(handles.value_path, "d"),
            Some("M 21.716 78.284 A 40 40 0 1 1 21.716 78.284")
        );
        assert_eq!(doc.attribute(handles.value_path, "class"), Some("value"));
        assert_eq!(doc.attribute(handles.value_path, "stroke-width"), Some("2.5"));
    }

    #[test]
    fn test_label_centered() {
        let (doc, _, handles) = build_default();
        let t = handles.value_text;
        assert_eq!(doc.attribute(t, "x"), Some("50"));
        assert_eq!(doc.attribute(t, "y"), Some("50"));
        assert_eq!(doc.attribute(t, "text-anchor"), Some("middle"));
        assert_eq!(doc.attribute(t, "alignment-baseline"), Some("middle"));
        assert_eq!(doc.attribute(t, "class"), Some("value-text"));
        assert_eq!(doc.text(t), None);
    }

    #[test]
    fn test_small_dial_uses_small_arc_flag() {
        let mut doc = SvgDocument::new();
        let mount = doc.mount_point();
        // 360 - |300 - 60| = 120, the short way round
        let opts = GaugeConfig::new().angles(300.0, 60.0).resolve().options;
        build(&mut doc, &mount, &opts).unwrap();
        let root = doc.children(mount)[0];
        let dial = doc.children(root)[0];
        assert!(doc.attribute(dial, "d").unwrap().contains(" 0 0 1 "));
    }

    #[test]
    fn test_color_style() {
        assert_eq!(
            color_style("#FF4136", 0.5),
            "stroke: #FF4136;-webkit-transition: stroke 500ms ease;-moz-transition: stroke 500ms ease;transition: stroke 500ms ease"
        );
        assert!(color_style("red", 0.0).contains("stroke 0ms ease"));
    }
}
