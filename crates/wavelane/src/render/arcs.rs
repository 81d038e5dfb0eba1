//! Event nodes and the arcs connecting them.
//!
//! Lanes name points in time through their `node` string; every edge then
//! draws a connector between two named events:
//!
//! ```text
//!   node: ".a..b"      edge: "a~>b setup"
//! ```

use indexmap::IndexMap;
use log::debug;

use wavelane_core::{
    element::{Element, format_number, translate},
    geometry::Point,
    semantic::{ArcMarkers, ArcPath, EdgeSpec},
    text::text_width,
};

use crate::{
    error::RenderError,
    layout::{FlatRow, LayoutContext},
};

const PLAIN_STYLE: &str = "fill:none;stroke:#00F;stroke-width:1";
const ARROW_STYLE: &str = "marker-end:url(#arrowhead);stroke:#0041c4;stroke-width:1;fill:none";
const DOUBLE_ARROW_STYLE: &str = "marker-end:url(#arrowhead);marker-start:url(#arrowtail);stroke:#0041c4;stroke-width:1;fill:none";

const LABEL_FONT_SIZE: f64 = 8.0;

/// Named event positions in first-seen order.
type Events = IndexMap<char, Point>;

/// Resolves event coordinates from the lanes' `node` strings.
fn collect_events(context: &mut LayoutContext, rows: &[FlatRow<'_>]) -> Events {
    let mut events = Events::new();

    for row in rows {
        context.enter_lane(row.lane());
        let Some(node) = row.lane().and_then(|lane| lane.node()) else {
            continue;
        };

        let y = (row.row() as f64 * context.yo() + context.y0() + context.ys() / 2.0).trunc();
        let mut pos = 0.0;
        let mut step = 1.0;
        for name in node.chars() {
            match name {
                '<' => step = 0.25,
                '>' => step = 1.0,
                _ => {
                    if name != '.' {
                        events.insert(name, Point::new(context.cycle_x(pos), y));
                    }
                    pos += step;
                }
            }
        }
    }

    events
}

/// Path data and label anchor of one connector.
fn arc_geometry(path: ArcPath, from: Point, to: Point) -> (String, Point) {
    let delta = to.sub_point(from);
    let (dx, dy) = (delta.x(), delta.y());
    let (fx, fy) = (format_number(from.x()), format_number(from.y()));
    let n = format_number;

    let d = match path {
        ArcPath::Straight => format!("M {fx},{fy} {},{}", n(to.x()), n(to.y())),
        ArcPath::Curve => format!(
            "M {fx},{fy} c {},0 {},{} {},{}",
            n(0.7 * dx),
            n(0.3 * dx),
            n(dy),
            n(dx),
            n(dy)
        ),
        ArcPath::CurveOut => format!(
            "M {fx},{fy} c {},0 {},{} {},{}",
            n(0.7 * dx),
            n(dx),
            n(dy),
            n(dx),
            n(dy)
        ),
        ArcPath::CurveIn => format!(
            "M {fx},{fy} c 0,0 {},{} {},{}",
            n(0.3 * dx),
            n(dy),
            n(dx),
            n(dy)
        ),
        ArcPath::HorizontalVertical => format!("m {fx},{fy} {},0 0,{}", n(dx), n(dy)),
        ArcPath::VerticalHorizontal => format!("m {fx},{fy} 0,{} {},0", n(dy), n(dx)),
        ArcPath::Step => format!(
            "m {fx},{fy} {},0 0,{} {},0",
            n(dx / 2.0),
            n(dy),
            n(dx / 2.0)
        ),
    };

    let middle = from.midpoint(to);
    let label = match path {
        ArcPath::CurveOut => middle.with_x(from.lerp_x(to, 0.75)),
        ArcPath::CurveIn => middle.with_x(from.lerp_x(to, 0.25)),
        ArcPath::HorizontalVertical => middle.with_x(to.x()),
        ArcPath::VerticalHorizontal => middle.with_x(from.x()),
        ArcPath::Straight | ArcPath::Curve | ArcPath::Step => middle,
    };

    (d, label)
}

fn arc_style(markers: ArcMarkers) -> &'static str {
    match markers {
        ArcMarkers::None => PLAIN_STYLE,
        ArcMarkers::End => ARROW_STYLE,
        ArcMarkers::Both => DOUBLE_ARROW_STYLE,
    }
}

/// A label on an opaque white background centred on `at`.
fn label(at: Point, text: &str) -> Element {
    let width = text_width(text, LABEL_FONT_SIZE) + 2.0;

    Element::new("g")
        .set("transform", translate(at.x(), Some(at.y())))
        .add(
            Element::new("rect")
                .set("x", (-width / 2.0).trunc())
                .set("y", -5)
                .set("width", width)
                .set("height", 10)
                .set("style", "fill:#FFF;"),
        )
        .add(
            Element::new("text")
                .set("style", "font-size:8px;")
                .set("text-anchor", "middle")
                .set("y", 3)
                .add(Element::new("tspan").add_text(text)),
        )
}

/// Renders the `wavearcs_<index>` group.
///
/// # Errors
///
/// Returns [`RenderError::MissingEventReference`] when an edge names an
/// event that no lane defines.
pub(super) fn render(
    context: &mut LayoutContext,
    rows: &[FlatRow<'_>],
    edges: &[EdgeSpec],
    index: usize,
) -> Result<Element, RenderError> {
    let events = collect_events(context, rows);
    debug!(events = events.len(), edges = edges.len(); "Resolved arc events");

    let mut group = Element::new("g").set("id", format!("wavearcs_{index}"));

    for edge in edges {
        let lookup = |name: char| {
            events
                .get(&name)
                .copied()
                .ok_or(RenderError::MissingEventReference { name })
        };
        let from = lookup(edge.from())?;
        let to = lookup(edge.to())?;

        let shape = edge.shape();
        let (d, anchor) = arc_geometry(shape.path(), from, to);
        group.append(
            Element::new("path")
                .set("id", format!("gmark_{}_{}", edge.from(), edge.to()))
                .set("d", d)
                .set("style", arc_style(shape.markers())),
        );

        if let Some(text) = edge.label().filter(|text| !text.is_empty()) {
            group.append(label(anchor, text));
        }
    }

    for (&name, &at) in &events {
        if (name.is_lowercase() || name.is_ascii_digit()) && at.x() > 0.0 {
            group.append(label(at, &name.to_string()));
        }
    }

    Ok(group)
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use wavelane_core::{
        semantic::{ArcShape, Diagram, Group, Lane, SignalNode},
        skin::Skin,
    };

    use super::*;
    use crate::layout;

    fn render_arcs(root: &Group, edges: &[EdgeSpec]) -> Result<Element, RenderError> {
        let diagram = Diagram::new(Group::default());
        let mut context = LayoutContext::new(Skin::default_skin().metrics(), &diagram);
        let walk = layout::walk(root);
        render(&mut context, walk.rows(), edges, 0)
    }

    fn two_lanes() -> Group {
        Group::new(
            None,
            vec![
                SignalNode::Lane(Lane::new("A", "01..0").with_node(".a..b")),
                SignalNode::Lane(Lane::new("B", "0.1.0").with_node("..c..")),
            ],
        )
    }

    #[test]
    fn test_event_positions() {
        let diagram = Diagram::new(Group::default());
        let mut context = LayoutContext::new(Skin::default_skin().metrics(), &diagram);
        let root = Group::new(
            None,
            vec![
                SignalNode::Spacer,
                SignalNode::Lane(Lane::new("A", "0").with_node("a<bc>d").with_period(2.0)),
            ],
        );
        let walk = layout::walk(&root);
        let events = collect_events(&mut context, walk.rows());

        let keys: Vec<char> = events.keys().copied().collect();
        assert_eq!(keys, ['a', 'b', 'c', 'd']);
        // pos 0, 1, 1.25, 1.5 with period 2
        let xs: Vec<f64> = events.values().map(|p| p.x()).collect();
        assert_eq!(xs, [6.0, 86.0, 106.0, 126.0]);
        assert_approx_eq!(f64, events[&'a'].y(), 45.0);
    }

    #[test]
    fn test_duplicate_event_keeps_order() {
        let root = Group::new(
            None,
            vec![
                SignalNode::Lane(Lane::new("A", "0").with_node("ab")),
                SignalNode::Lane(Lane::new("B", "0").with_node("a")),
            ],
        );
        let walk = layout::walk(&root);
        let diagram = Diagram::new(Group::default());
        let mut context = LayoutContext::new(Skin::default_skin().metrics(), &diagram);
        let events = collect_events(&mut context, walk.rows());

        assert_eq!(events.keys().copied().collect::<Vec<_>>(), ['a', 'b']);
        assert_approx_eq!(f64, events[&'a'].y(), 45.0);
    }

    #[test]
    fn test_single_arc_with_label() {
        let edge = EdgeSpec::new(
            'a',
            'c',
            "~>".parse().unwrap(),
            Some("setup".to_string()),
        );
        let group = render_arcs(&two_lanes(), &[edge]).unwrap();

        let path = group.find_by_id("gmark_a_c").unwrap();
        // a = (46, 15), c = (86, 45)
        assert_eq!(path.attr("d"), Some("M 46,15 c 28,0 12,30 40,30"));
        assert_eq!(path.attr("style"), Some(ARROW_STYLE));

        let labels: Vec<_> = group
            .child_elements()
            .filter(|e| e.tag() == "g")
            .map(|e| (e.attr("transform").unwrap(), e.text_content()))
            .collect();
        // the arc label, then one implicit label per lowercase event
        assert_eq!(
            labels,
            [
                ("translate(66,30)", "setup".to_string()),
                ("translate(46,15)", "a".to_string()),
                ("translate(166,15)", "b".to_string()),
                ("translate(86,45)", "c".to_string()),
            ]
        );
    }

    #[test]
    fn test_without_edges_only_event_labels() {
        let group = render_arcs(&two_lanes(), &[]).unwrap();
        assert_eq!(group.attr("id"), Some("wavearcs_0"));
        assert!(group.child_elements().all(|e| e.tag() == "g"));
        assert_eq!(group.children().len(), 3);
    }

    #[test]
    fn test_implicit_labels_skip_uppercase_and_origin() {
        let root = Group::new(
            None,
            vec![SignalNode::Lane(
                Lane::new("A", "0").with_node("A1").with_phase(0.15),
            )],
        );
        // 'A' is uppercase; '1' sits at x = int(20 * (2 - 0.3) + 6) = 40
        let group = render_arcs(&root, &[]).unwrap();
        assert_eq!(group.children().len(), 1);
        assert_eq!(group.text_content(), "1");

        let root = Group::new(
            None,
            vec![SignalNode::Lane(Lane::new("A", "0").with_node("a").with_phase(1.0))],
        );
        let group = render_arcs(&root, &[]).unwrap();
        assert!(group.is_empty());
    }

    #[test]
    fn test_missing_event() {
        let edge = EdgeSpec::new('a', 'z', ArcShape::default(), None);
        let err = render_arcs(&two_lanes(), &[edge]).unwrap_err();
        assert!(matches!(err, RenderError::MissingEventReference { name: 'z' }));
    }

    #[test]
    fn test_arc_paths() {
        let from = Point::new(10.0, 20.0);
        let to = Point::new(50.0, 60.0);
        let cases = [
            ("-", "M 10,20 50,60", 30.0),
            ("-~", "M 10,20 c 28,0 40,40 40,40", 40.0),
            ("~-", "M 10,20 c 0,0 12,40 40,40", 20.0),
            ("-|", "m 10,20 40,0 0,40", 50.0),
            ("|-", "m 10,20 0,40 40,0", 10.0),
            ("-|-", "m 10,20 20,0 0,40 20,0", 30.0),
        ];

        for (shape, expected, label_x) in cases {
            let shape: ArcShape = shape.parse().unwrap();
            let (d, anchor) = arc_geometry(shape.path(), from, to);
            assert_eq!(d, expected, "shape {shape}");
            assert_approx_eq!(f64, anchor.x(), label_x);
            assert_approx_eq!(f64, anchor.y(), 40.0);
        }
    }

    #[test]
    fn test_label_box() {
        let element = label(Point::new(10.0, 20.0), "a");
        let rect = element.child_elements().next().unwrap();
        // text_width("a", 8) = 5.92, plus 2
        assert_eq!(rect.attr("x"), Some("-3"));
        assert_eq!(rect.attr("width"), Some("7.92"));
        assert_eq!(rect.attr("style"), Some("fill:#FFF;"));
    }
}
