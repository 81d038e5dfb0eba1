//! Skins: cell metrics and styling of the glyph catalog.
//!
//! A skin fixes the size of one brick cell and the CSS applied to the
//! rendered diagram. Glyph artwork (the `<g id="pclk">` style definitions
//! referenced by bricks) is supplied externally and embedded verbatim by the
//! exporter; the skin itself only contributes the arrow markers used by arcs.

use log::warn;

use crate::element::Element;

/// Size and label anchors of one brick cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    xs: f64,
    ys: f64,
    xlabel: f64,
    ym: f64,
}

impl CellMetrics {
    /// Creates cell metrics from width, height, label x-offset and label
    /// baseline.
    pub const fn new(xs: f64, ys: f64, xlabel: f64, ym: f64) -> Self {
        Self { xs, ys, xlabel, ym }
    }

    /// Width of one brick cell.
    pub fn xs(self) -> f64 {
        self.xs
    }

    /// Height of one brick cell.
    pub fn ys(self) -> f64 {
        self.ys
    }

    /// Horizontal offset of data and event labels inside a cell.
    pub fn xlabel(self) -> f64 {
        self.xlabel
    }

    /// Baseline of lane titles and data labels.
    pub fn ym(self) -> f64 {
        self.ym
    }
}

/// A named skin.
#[derive(Debug)]
pub struct Skin {
    name: &'static str,
    metrics: CellMetrics,
    style: &'static str,
}

static DEFAULT_SKIN: Skin = Skin {
    name: "default",
    metrics: CellMetrics::new(20.0, 20.0, 6.0, 15.0),
    style: DEFAULT_STYLE,
};

const DEFAULT_STYLE: &str = "\
text{font-size:11pt;font-style:normal;font-variant:normal;font-weight:normal;font-stretch:normal;text-align:center;fill-opacity:1;font-family:Helvetica}\
.muted{fill:#aaa}.warning{fill:#f6b900}.error{fill:#f60000}.info{fill:#0041c4}\
.success{fill:#00ab00}.h1{font-size:33pt;font-weight:bold}\
.h2{font-size:27pt;font-weight:bold}.h3{font-size:20pt;font-weight:bold}\
.h4{font-size:14pt;font-weight:bold}.h5{font-size:11pt;font-weight:bold}\
.h6{font-size:8pt;font-weight:bold}\
.s1{fill:none;stroke:#000;stroke-width:1;stroke-linecap:round;stroke-linejoin:miter;stroke-miterlimit:4;stroke-opacity:1;stroke-dasharray:none}\
.s2{fill:none;stroke:#000;stroke-width:0.5;stroke-linecap:round;stroke-linejoin:miter;stroke-miterlimit:4;stroke-opacity:1;stroke-dasharray:none}\
.s3{color:#000;fill:none;stroke:#000;stroke-width:1;stroke-linecap:round;stroke-linejoin:miter;stroke-miterlimit:4;stroke-opacity:1;stroke-dasharray:1, 3;stroke-dashoffset:0;marker:none;visibility:visible;display:inline;overflow:visible;enable-background:accumulate}\
.s4{color:#000;fill:none;stroke:#000;stroke-width:1;stroke-linecap:round;stroke-linejoin:miter;stroke-miterlimit:4;stroke-opacity:1;stroke-dasharray:none;stroke-dashoffset:0;marker:none;visibility:visible;display:inline;overflow:visible}\
.s5{fill:#fff;stroke:none}\
.s6{color:#000;fill:#ffffb4;fill-opacity:1;fill-rule:nonzero;stroke:none;stroke-width:1px;marker:none;visibility:visible;display:inline;overflow:visible;enable-background:accumulate}\
.s7{color:#000;fill:#ffe0b9;fill-opacity:1;fill-rule:nonzero;stroke:none;stroke-width:1px;marker:none;visibility:visible;display:inline;overflow:visible;enable-background:accumulate}\
.s8{color:#000;fill:#b9e0ff;fill-opacity:1;fill-rule:nonzero;stroke:none;stroke-width:1px;marker:none;visibility:visible;display:inline;overflow:visible;enable-background:accumulate}\
.s9{fill:#000;fill-opacity:1;stroke:none}\
.s10{color:#000;fill:#fff;fill-opacity:1;fill-rule:nonzero;stroke:none;stroke-width:1px;marker:none;visibility:visible;display:inline;overflow:visible;enable-background:accumulate}\
.s11{fill:#0041c4;fill-opacity:1;stroke:none}\
.s12{fill:none;stroke:#0041c4;stroke-width:1;stroke-linecap:round;stroke-linejoin:miter;stroke-miterlimit:4;stroke-opacity:1;stroke-dasharray:none}";

impl Skin {
    /// Returns the skin registered under `name`.
    ///
    /// Unknown names fall back to the default skin with a warning.
    pub fn lookup(name: &str) -> &'static Skin {
        if name == DEFAULT_SKIN.name {
            return &DEFAULT_SKIN;
        }
        warn!(skin = name; "Unknown skin, using default");
        &DEFAULT_SKIN
    }

    /// The built-in default skin.
    pub fn default_skin() -> &'static Skin {
        &DEFAULT_SKIN
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn metrics(&self) -> CellMetrics {
        self.metrics
    }

    /// CSS applied to the whole diagram.
    pub fn style(&self) -> &str {
        self.style
    }

    /// The arrowhead and arrowtail markers referenced by arc styles.
    pub fn marker_defs(&self) -> Vec<Element> {
        vec![
            marker("arrowhead", "0 -4 11 8", 15, "M0 -4 11 0 0 4z"),
            marker("arrowtail", "-11 -4 11 8", -15, "M0 -4 -11 0 0 4z"),
        ]
    }
}

fn marker(id: &str, view_box: &str, ref_x: i32, d: &str) -> Element {
    Element::new("marker")
        .set("id", id)
        .set("style", "fill:#0041c4")
        .set("markerHeight", 7)
        .set("markerWidth", 10)
        .set("markerUnits", "strokeWidth")
        .set("viewBox", view_box)
        .set("refX", ref_x)
        .set("refY", 0)
        .set("orient", "auto")
        .add(Element::new("path").set("d", d))
}
