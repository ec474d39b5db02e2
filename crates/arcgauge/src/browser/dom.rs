//! DOM-backed rendering surface.

use arcgauge_core::{GaugeError, Result, Surface, SVG_NS};
use wasm_bindgen::JsValue;
use web_sys::{window, Document, Element};

fn js_error(err: JsValue) -> GaugeError {
    GaugeError::Surface(format!("{err:?}"))
}

/// Creates SVG elements in a document.
#[derive(Debug, Clone)]
pub struct DomSurface {
    document: Document,
}

impl DomSurface {
    /// Wrap a document.
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// The document of the current window.
    pub fn from_window() -> Result<Self> {
        window()
            .and_then(|w| w.document())
            .map(Self::new)
            .ok_or_else(|| GaugeError::Surface("No document".into()))
    }

    /// Look up a mount element by id.
    pub fn element_by_id(&self, id: &str) -> Result<Element> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| GaugeError::MissingMount(id.to_string()))
    }
}

impl Surface for DomSurface {
    type Node = Element;

    fn create_element(&mut self, name: &str) -> Result<Element> {
        self.document
            .create_element_ns(Some(SVG_NS), name)
            .map_err(js_error)
    }

    fn set_attribute(&mut self, node: &Element, name: &str, value: &str) -> Result<()> {
        node.set_attribute(name, value).map_err(js_error)
    }

    fn set_text(&mut self, node: &Element, text: &str) -> Result<()> {
        node.set_text_content(Some(text));
        Ok(())
    }

    fn append_child(&mut self, parent: &Element, child: &Element) -> Result<()> {
        parent.append_child(child).map(drop).map_err(js_error)
    }
}
