//! Rendering of a laid out diagram into an [`Element`] tree.
//!
//! [`Renderer::render`] runs the walker and wave compiler once, then hands
//! the shared [`LayoutContext`] to each sub-renderer:
//!
//! - `lanes`: lane titles, bricks and bus value labels
//! - `marks`: cycle marks, captions and tick labels
//! - `arcs`: event connectors between lanes
//! - `gaps`: gap glyphs over `|`
//! - `groups`: group brackets and titles
//! - `labels`: inline lane labels

mod arcs;
mod gaps;
mod groups;
mod labels;
mod lanes;
mod marks;

use log::{debug, info, trace};

use wavelane_core::{
    element::{Element, Node, translate},
    semantic::Diagram,
    skin::Skin,
};

use crate::{error::RenderError, layout, layout::LayoutContext, wave};

/// A `text` element that keeps whitespace, with its content in a `tspan`.
fn preserved_text(content: impl Into<String>) -> Element {
    Element::new("text")
        .set("xml:space", "preserve")
        .add(Element::new("tspan").add_text(content))
}

/// Renders diagrams into element trees.
///
/// A renderer only holds options; each [`Renderer::render`] call lays out
/// the diagram from scratch, so one renderer can be shared across diagrams.
///
/// # Examples
///
/// ```
/// use wavelane::{
///     Renderer,
///     semantic::{Diagram, Group, Lane, SignalNode},
/// };
///
/// let diagram = Diagram::new(Group::new(
///     None,
///     vec![SignalNode::Lane(Lane::new("clk", "p.."))],
/// ));
///
/// let root = Renderer::new().render(&diagram, 0).unwrap();
/// assert_eq!(root.attr("id"), Some("svgcontent_0"));
/// assert!(root.find_by_id("wavelane_0_0").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    strict: bool,
    glyph_defs: Option<String>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// In strict mode the lane label layer is not drawn.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets glyph definitions embedded verbatim into the `<defs>` of the
    /// first diagram.
    pub fn with_glyph_defs(mut self, defs: impl Into<String>) -> Self {
        self.glyph_defs = Some(defs.into());
        self
    }

    /// Renders `diagram` as the `index`-th diagram of a page.
    ///
    /// Only diagram `0` carries the skin style and definitions; later
    /// diagrams reference them by id.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::MissingEventReference`] when an edge names an
    /// event that no lane defines.
    pub fn render(&self, diagram: &Diagram, index: usize) -> Result<Element, RenderError> {
        info!(index, skin = diagram.skin(); "Rendering diagram");

        let skin = Skin::lookup(diagram.skin());
        let mut context = LayoutContext::new(skin.metrics(), diagram);

        let walk = layout::walk(diagram.signal());
        let rows = walk.rows();

        let bricks: Vec<_> = rows
            .iter()
            .map(|row| {
                context.enter_lane(row.lane());
                row.lane().map_or_else(Vec::new, |lane| {
                    wave::compile_lane(lane.wave(), context.stretch(), context.phase())
                })
            })
            .collect();
        let xmax = bricks.iter().map(Vec::len).max().unwrap_or(0);
        context.set_xmax(xmax);

        let xg = lanes::title_column_width(&context, rows);
        debug!(rows = rows.len(), groups = walk.groups().len(), xmax, xg; "Diagram laid out");

        let mut lanes_group = Element::new("g").set("id", format!("lanes_{index}")).set(
            "transform",
            translate(xg + 0.5, Some(context.yh0() + context.yh1() + 0.5)),
        );
        if !self.strict {
            lanes_group.append(labels::render(&mut context, rows, index));
        }
        lanes_group.append(marks::render(&context, diagram, rows.len(), index));
        for lane in lanes::render(&context, rows, &bricks, index) {
            lanes_group.append(lane);
        }
        lanes_group.append(arcs::render(&mut context, rows, diagram.edges(), index)?);
        lanes_group.append(gaps::render(&mut context, rows, index));

        let mut groups_group = Element::new("g").set("id", format!("groups_{index}"));
        for group in groups::render(&context, walk.groups(), index) {
            groups_group.append(group);
        }

        let width = xg + context.xs() * (xmax as f64 + 1.0);
        let height = rows.len() as f64 * context.yo()
            + context.yh0()
            + context.yh1()
            + context.yf0()
            + context.yf1();

        let mut root = Element::new("svg")
            .set("id", format!("svgcontent_{index}"))
            .set("class", "WaveDrom")
            .set("overflow", "hidden")
            .set("width", width)
            .set("height", height)
            .set("viewBox", format!("0 0 {width} {height}"));

        if index == 0 {
            root.append(Element::new("style").add_text(skin.style()));

            let mut defs = Element::new("defs");
            for marker in skin.marker_defs() {
                defs.append(marker);
            }
            if let Some(glyphs) = &self.glyph_defs {
                defs.append(Node::Raw(glyphs.clone()));
            }
            root.append(defs);
        }

        root.append(
            Element::new("g")
                .set("id", format!("waves_{index}"))
                .add(lanes_group)
                .add(groups_group),
        );

        info!(width, height; "Diagram rendered");
        trace!(root:?; "Rendered element tree");

        Ok(root)
    }
}

#[cfg(test)]
mod tests {
    use wavelane_core::semantic::{
        ArcMarkers, ArcPath, ArcShape, Axis, Caption, EdgeSpec, Group, LabelToken, Lane, LaneLabel,
        SignalNode,
    };

    use super::*;

    fn diagram(children: Vec<SignalNode>) -> Diagram {
        Diagram::new(Group::new(None, children))
    }

    #[test]
    fn test_preserved_text() {
        let text = preserved_text("a  b");
        assert_eq!(text.attr("xml:space"), Some("preserve"));
        let tspan = text.child_elements().next().unwrap();
        assert_eq!(tspan.tag(), "tspan");
        assert_eq!(tspan.text_content(), "a  b");
    }

    #[test]
    fn test_empty_diagram() {
        let root = Renderer::new().render(&diagram(vec![]), 0).unwrap();

        // one cell of title column plus one spare cell
        assert_eq!(root.attr("width"), Some("40"));
        assert_eq!(root.attr("height"), Some("0"));
        assert_eq!(root.attr("viewBox"), Some("0 0 40 0"));

        let lanes = root.find_by_id("lanes_0").unwrap();
        let ids: Vec<_> = lanes.child_elements().filter_map(|e| e.attr("id")).collect();
        assert_eq!(ids, ["labels_0", "gmarks_0", "wavearcs_0", "wavegaps_0"]);
        assert!(root.find_by_id("groups_0").unwrap().is_empty());
    }

    #[test]
    fn test_document_layout() {
        let diagram = diagram(vec![
            SignalNode::Lane(Lane::new("clk", "p...")),
            SignalNode::Lane(Lane::new("a", "x=.x").with_data(vec!["a".to_string()])),
        ])
        .with_head(Axis::new(Some(Caption::Plain("T".to_string())), None, None));

        let root = Renderer::new().render(&diagram, 0).unwrap();

        // 4 cycles, 8 bricks; "clk" at depth 10 needs a two cell title column
        assert_eq!(root.attr("width"), Some("220"));
        // two rows plus a caption
        assert_eq!(root.attr("height"), Some("106"));

        let lanes = root.find_by_id("lanes_0").unwrap();
        assert_eq!(lanes.attr("transform"), Some("translate(40.5,46.5)"));

        let children: Vec<_> = root.child_elements().map(Element::tag).collect();
        assert_eq!(children, ["style", "defs", "g"]);

        let ids: Vec<_> = lanes.child_elements().filter_map(|e| e.attr("id")).collect();
        assert_eq!(
            ids,
            [
                "labels_0",
                "gmarks_0",
                "wavelane_0_0",
                "wavelane_1_0",
                "wavearcs_0",
                "wavegaps_0",
            ]
        );
    }

    #[test]
    fn test_later_diagrams_skip_defs() {
        let root = Renderer::new()
            .with_glyph_defs("<g id=\"pclk\"/>")
            .render(&diagram(vec![SignalNode::Lane(Lane::new("a", "01"))]), 2)
            .unwrap();

        assert_eq!(root.attr("id"), Some("svgcontent_2"));
        let children: Vec<_> = root.child_elements().map(Element::tag).collect();
        assert_eq!(children, ["g"]);
        assert!(root.find_by_id("waves_2").is_some());
    }

    #[test]
    fn test_glyph_defs_embedded_raw() {
        let root = Renderer::new()
            .with_glyph_defs("<g id=\"pclk\"/>")
            .render(&diagram(vec![]), 0)
            .unwrap();

        let defs = root.child_elements().find(|e| e.tag() == "defs").unwrap();
        assert_eq!(defs.child_elements().count(), 2);
        assert!(
            defs.children()
                .iter()
                .any(|node| *node == Node::Raw("<g id=\"pclk\"/>".to_string()))
        );
    }

    #[test]
    fn test_strict_mode_drops_lane_labels() {
        let lane = Lane::new("a", "01").with_label(LaneLabel::new(vec![LabelToken::Text {
            text: "A".to_string(),
            offset: 0.0,
        }]));
        let diagram = diagram(vec![SignalNode::Lane(lane)]);

        let relaxed = Renderer::new().render(&diagram, 0).unwrap();
        assert!(relaxed.find_by_id("labels_0_0").is_some());

        let strict = Renderer::new().with_strict(true).render(&diagram, 0).unwrap();
        assert!(strict.find_by_id("labels_0").is_none());
    }

    #[test]
    fn test_missing_event_fails() {
        let diagram = diagram(vec![SignalNode::Lane(Lane::new("a", "01").with_node(".a"))])
            .with_edges(vec![EdgeSpec::new(
                'a',
                'b',
                ArcShape::new(ArcPath::Straight, ArcMarkers::End),
                None,
            )]);
        let err = Renderer::new().render(&diagram, 0).unwrap_err();
        assert!(matches!(err, RenderError::MissingEventReference { name: 'b' }));
    }
}
