//! Rendering surface port and an in-memory SVG document.
//!
//! The gauge builds its graphic through a [`Surface`]. The browser crate
//! implements it over the DOM; [`SvgDocument`] keeps the tree in memory,
//! which is what tests inspect and what server-side rendering serializes.

use crate::error::{GaugeError, Result};
use std::cell::RefCell;
use std::fmt::Write as _;
use std::rc::Rc;

/// The SVG namespace.
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Element tree the gauge writes to.
pub trait Surface {
    /// Handle to an element.
    type Node: Clone;

    /// Create a detached SVG element.
    fn create_element(&mut self, name: &str) -> Result<Self::Node>;

    /// Set (or replace) an attribute.
    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str) -> Result<()>;

    /// Replace the text content.
    fn set_text(&mut self, node: &Self::Node, text: &str) -> Result<()>;

    /// Append `child` as the last child of `parent`.
    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<()>;
}

/// A surface shared between several gauges.
impl<T: Surface> Surface for Rc<RefCell<T>> {
    type Node = T::Node;

    fn create_element(&mut self, name: &str) -> Result<Self::Node> {
        self.borrow_mut().create_element(name)
    }

    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str) -> Result<()> {
        self.borrow_mut().set_attribute(node, name, value)
    }

    fn set_text(&mut self, node: &Self::Node, text: &str) -> Result<()> {
        self.borrow_mut().set_text(node, text)
    }

    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<()> {
        self.borrow_mut().append_child(parent, child)
    }
}

/// Index of an element in an [`SvgDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// An element of an [`SvgDocument`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Tag name
    pub name: String,
    /// Attributes in insertion order
    pub attributes: Vec<(String, String)>,
    /// Text content
    pub text: Option<String>,
    /// Child elements
    pub children: Vec<NodeId>,
}

impl Element {
    /// Value of an attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// In-memory element tree.
///
/// ```
/// use arcgauge_core::{Surface, SvgDocument};
///
/// let mut doc = SvgDocument::new();
/// let root = doc.create_element("svg").unwrap();
/// doc.set_attribute(&root, "viewBox", "0 0 100 100").unwrap();
/// assert_eq!(
///     doc.to_markup(root),
///     r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"/>"#
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct SvgDocument {
    nodes: Vec<Element>,
    writes: usize,
}

impl SvgDocument {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a container element to mount gauges into.
    pub fn mount_point(&mut self) -> NodeId {
        self.push("div")
    }

    fn push(&mut self, name: &str) -> NodeId {
        self.nodes.push(Element {
            name: name.to_string(),
            ..Element::default()
        });
        NodeId(self.nodes.len() - 1)
    }

    fn get_mut(&mut self, id: NodeId) -> Result<&mut Element> {
        self.nodes.get_mut(id.0).ok_or(GaugeError::UnknownNode(id.0))
    }

    /// Element by id.
    #[must_use]
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.nodes.get(id.0)
    }

    /// Attribute of an element.
    #[must_use]
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.attribute(name)
    }

    /// Text content of an element.
    #[must_use]
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.element(id)?.text.as_deref()
    }

    /// Children of an element.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.element(id)
            .map(|e| e.children.as_slice())
            .unwrap_or_default()
    }

    /// Number of mutating calls (attributes, text, appends) made so far.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Serialize the subtree rooted at `id`.
    #[must_use]
    pub fn to_markup(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_markup(id, &mut out);
        out
    }

    fn write_markup(&self, id: NodeId, out: &mut String) {
        let Some(el) = self.element(id) else {
            return;
        };

        let _ = write!(out, "<{}", el.name);
        if el.name == "svg" && el.attribute("xmlns").is_none() {
            let _ = write!(out, " xmlns=\"{SVG_NS}\"");
        }
        for (k, v) in &el.attributes {
            let _ = write!(out, " {k}=\"{}\"", escape(v));
        }

        if el.text.is_none() && el.children.is_empty() {
            out.push_str("/>");
            return;
        }

        out.push('>');
        if let Some(text) = &el.text {
            out.push_str(&escape(text));
        }
        for child in &el.children {
            self.write_markup(*child, out);
        }
        let _ = write!(out, "</{}>", el.name);
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

impl Surface for SvgDocument {
    type Node = NodeId;

    fn create_element(&mut self, name: &str) -> Result<NodeId> {
        Ok(self.push(name))
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) -> Result<()> {
        let el = self.get_mut(*node)?;
        match el.attributes.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => el.attributes.push((name.to_string(), value.to_string())),
        }
        self.writes += 1;
        Ok(())
    }

    fn set_text(&mut self, node: &NodeId, text: &str) -> Result<()> {
        self.get_mut(*node)?.text = Some(text.to_string());
        self.writes += 1;
        Ok(())
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<()> {
        if self.element(*child).is_none() {
            return Err(GaugeError::UnknownNode(child.0));
        }
        self.get_mut(*parent)?.children.push(*child);
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_attribute_replaces() {
        let mut doc = SvgDocument::new();
        let node = doc.create_element("path").unwrap();
        doc.set_attribute(&node, "d", "M 0 0").unwrap();
        doc.set_attribute(&node, "d", "M 1 1").unwrap();
        assert_eq!(doc.attribute(node, "d"), Some("M 1 1"));
        assert_eq!(doc.element(node).unwrap().attributes.len(), 1);
        assert_eq!(doc.writes(), 2);
    }

    #[test]
    fn test_set_text() {
        let mut doc = SvgDocument::new();
        let node = doc.create_element("text").unwrap();
        assert_eq!(doc.text(node), None);
        doc.set_text(&node, "42").unwrap();
        assert_eq!(doc.text(node), Some("42"));
    }

    #[test]
    fn test_append_child_unknown_node() {
        let mut doc = SvgDocument::new();
        let parent = doc.mount_point();
        let err = doc.append_child(&parent, &NodeId(99)).unwrap_err();
        assert!(matches!(err, GaugeError::UnknownNode(99)));
    }

    #[test]
    fn test_markup_nesting_and_escaping() {
        let mut doc = SvgDocument::new();
        let root = doc.create_element("svg").unwrap();
        let text = doc.create_element("text").unwrap();
        doc.set_attribute(&text, "class", "a\"b").unwrap();
        doc.set_text(&text, "1 < 2 & 3").unwrap();
        doc.append_child(&root, &text).unwrap();

        assert_eq!(
            doc.to_markup(root),
            "<svg xmlns=\"http://www.w3.org/2000/svg\"><text class=\"a&quot;b\">1 &lt; 2 &amp; 3</text></svg>"
        );
    }

    #[test]
    fn test_shared_document() {
        let shared = Rc::new(RefCell::new(SvgDocument::new()));
        let mut a = shared.clone();
        let mut b = shared.clone();
        let x = a.create_element("g").unwrap();
        b.set_attribute(&x, "id", "x").unwrap();
        assert_eq!(shared.borrow().attribute(x, "id"), Some("x"));
        assert_eq!(shared.borrow().writes(), 1);
    }

    #[test]
    fn test_children() {
        let mut doc = SvgDocument::new();
        let mount = doc.mount_point();
        let a = doc.create_element("g").unwrap();
        let b = doc.create_element("g").unwrap();
        doc.append_child(&mount, &a).unwrap();
        doc.append_child(&mount, &b).unwrap();
        assert_eq!(doc.children(mount), &[a, b]);
        assert!(doc.children(NodeId(42)).is_empty());
    }
}
