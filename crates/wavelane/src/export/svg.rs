//! SVG serialization of rendered element trees.

use log::{debug, trace};
use svg::{
    Node as _,
    node::{Blob, Text, element as svg_element},
};

use wavelane_core::{
    color::Color,
    element::{Element, Node},
};

use super::{Error, Exporter};

/// Builder for [`Svg`] exporters.
#[derive(Debug, Default)]
pub struct SvgBuilder {
    background_color: Option<Color>,
}

impl SvgBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paints a full-size rectangle of `color` behind the diagram.
    pub fn with_background_color(mut self, color: Option<Color>) -> Self {
        self.background_color = color;
        self
    }

    pub fn build(self) -> Svg {
        Svg {
            background_color: self.background_color,
        }
    }
}

/// Serializes an [`Element`] tree through the `svg` crate.
#[derive(Debug)]
pub struct Svg {
    background_color: Option<Color>,
}

impl Svg {
    fn convert_children(&self, target: &mut impl svg::Node, children: &[Node]) {
        for child in children {
            match child {
                Node::Element(element) => target.append(self.convert_element(element)),
                Node::Text(text) => target.append(Text::new(text.as_str())),
                Node::Raw(markup) => target.append(Blob::new(markup.as_str())),
            }
        }
    }

    fn convert_element(&self, element: &Element) -> svg_element::Element {
        let mut node = svg_element::Element::new(element.tag());
        for (name, value) in element.attrs() {
            node.assign(name, value);
        }
        self.convert_children(&mut node, element.children());
        node
    }

    fn background(&self) -> Option<svg_element::Rectangle> {
        self.background_color.map(|color| {
            svg_element::Rectangle::new()
                .set("width", "100%")
                .set("height", "100%")
                .set("fill", color.to_string())
        })
    }
}

impl Exporter for Svg {
    fn export_document(&self, root: &Element) -> Result<String, Error> {
        if root.tag() != "svg" {
            return Err(Error::Render(format!(
                "document root must be <svg>, found <{}>",
                root.tag()
            )));
        }

        let mut doc = svg::Document::new();
        for (name, value) in root.attrs() {
            doc.assign(name, value);
        }
        if let Some(background) = self.background() {
            doc.append(background);
        }
        self.convert_children(&mut doc, root.children());

        let output = doc.to_string();
        debug!(bytes = output.len(); "SVG document serialized");
        trace!(output; "SVG output");

        Ok(output)
    }
}
