//! The abstract SVG element tree produced by rendering.
//!
//! Renderers build [`Element`] values with a small builder API modelled on
//! the `svg` crate (`set` / `add`), and the exporter serializes the finished
//! tree. Keeping the tree abstract lets tests inspect ids, attributes and
//! children directly instead of parsing markup.
//!
//! # Example
//!
//! ```
//! # use wavelane_core::element::{Element, translate};
//! let lane = Element::new("g")
//!     .set("id", "wavelane_0_0")
//!     .set("transform", translate(0.0, Some(5.0)))
//!     .add(Element::new("use").set("href", "#pclk"));
//!
//! assert_eq!(lane.attr("transform"), Some("translate(0,5)"));
//! assert_eq!(lane.children().len(), 1);
//! ```

use std::fmt;

use indexmap::IndexMap;

/// An attribute value, already formatted for output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Value(String);

impl Value {
    /// Returns the formatted value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self(format_number(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self(value.to_string())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self(value.to_string())
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Self(value.to_string())
    }
}

/// Formats a coordinate with the shortest representation.
///
/// Integral values print without a fractional part and negative zero
/// prints as `0`.
///
/// ```
/// # use wavelane_core::element::format_number;
/// assert_eq!(format_number(60.0), "60");
/// assert_eq!(format_number(100.5), "100.5");
/// assert_eq!(format_number(-0.0), "0");
/// ```
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}

/// Builds a `translate(...)` transform.
///
/// A missing `y` produces the single-argument form.
pub fn translate(x: f64, y: Option<f64>) -> String {
    match y {
        Some(y) => format!("translate({},{})", format_number(x), format_number(y)),
        None => format!("translate({})", format_number(x)),
    }
}

/// Builds a `rotate(...)` transform.
pub fn rotate(degrees: f64) -> String {
    format!("rotate({})", format_number(degrees))
}

/// A child of an [`Element`].
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    /// Pre-rendered markup inserted verbatim (skin glyph definitions).
    Raw(String),
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// An SVG element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: String,
    attrs: IndexMap<String, Value>,
    children: Vec<Node>,
}

impl Element {
    /// Creates an empty element with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Sets an attribute (builder style). Setting an existing attribute
    /// replaces its value in place.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.assign(name, value);
        self
    }

    /// Sets an attribute.
    pub fn assign(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.attrs.insert(name.into(), value.into());
    }

    /// Appends a child (builder style).
    pub fn add(mut self, child: impl Into<Node>) -> Self {
        self.append(child);
        self
    }

    /// Appends a child.
    pub fn append(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    /// Appends a text child (builder style).
    pub fn add_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Returns the tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns the value of an attribute.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(Value::as_str)
    }

    /// Returns all attributes in insertion order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the children.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Returns the element children, skipping text.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    /// Returns `true` when the element has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns this element and all element descendants in document order.
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(element) = stack.pop() {
            out.push(element);
            let children: Vec<&Element> = element.child_elements().collect();
            stack.extend(children.into_iter().rev());
        }
        out
    }

    /// Finds the first element (including self) with the given `id`.
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        self.descendants()
            .into_iter()
            .find(|element| element.attr("id") == Some(id))
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) => out.push_str(&element.text_content()),
                Node::Raw(_) => {}
            }
        }
        out
    }
}
