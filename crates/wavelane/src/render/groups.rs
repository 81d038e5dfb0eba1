//! Group brackets and their rotated titles.

use wavelane_core::element::{Element, rotate, translate};

use super::preserved_text;
use crate::layout::{GroupBox, LayoutContext};

const BRACKET_STYLE: &str = "stroke:#0041c4;stroke-width:1;fill:none";

/// Renders the bracket (and title, when named) of every group box.
pub(super) fn render(context: &LayoutContext, groups: &[GroupBox], index: usize) -> Vec<Element> {
    let yo = context.yo();
    let head = context.head_height();
    let mut elements = Vec::new();

    for (i, group) in groups.iter().enumerate() {
        let top = group.y() as f64;
        let height = group.height() as f64;

        let d = format!(
            "m {},{} c -3,0 -5,2 -5,5 l 0,{} c 0,3 2,5 5,5",
            group.x() + 0.5,
            top * yo + 3.5 + head,
            (height * yo - 16.0).trunc()
        );
        elements.push(
            Element::new("path")
                .set("id", format!("group_{i}_{index}"))
                .set("d", d)
                .set("style", BRACKET_STYLE),
        );

        let Some(name) = group.name() else {
            continue;
        };
        let x = (group.x() - 10.0).trunc();
        let y = (yo * (top + height / 2.0) + head).trunc();
        elements.push(
            Element::new("g")
                .set("transform", translate(x, Some(y)))
                .add(
                    Element::new("g").set("transform", rotate(270.0)).add(
                        preserved_text(name)
                            .set("text-anchor", "middle")
                            .set("class", "info"),
                    ),
                ),
        );
    }

    elements
}

#[cfg(test)]
mod tests {
    use wavelane_core::{
        semantic::{Axis, Caption, Diagram, Group, Lane, SignalNode},
        skin::Skin,
    };

    use super::*;
    use crate::layout;

    fn lanes(count: usize) -> Vec<SignalNode> {
        (0..count)
            .map(|i| SignalNode::Lane(Lane::new(format!("s{i}"), "01")))
            .collect()
    }

    #[test]
    fn test_named_group() {
        let root = Group::new(
            None,
            vec![SignalNode::Group(Group::new(Some("bus".to_string()), lanes(3)))],
        );
        let walk = layout::walk(&root);
        let diagram = Diagram::new(Group::default());
        let context = LayoutContext::new(Skin::default_skin().metrics(), &diagram);

        let elements = render(&context, walk.groups(), 0);
        assert_eq!(elements.len(), 2);

        let bracket = &elements[0];
        assert_eq!(bracket.attr("id"), Some("group_0_0"));
        assert_eq!(
            bracket.attr("d"),
            Some("m 35.5,3.5 c -3,0 -5,2 -5,5 l 0,74 c 0,3 2,5 5,5")
        );

        let title = &elements[1];
        assert_eq!(title.attr("transform"), Some("translate(25,45)"));
        let rotated = title.child_elements().next().unwrap();
        assert_eq!(rotated.attr("transform"), Some("rotate(270)"));
        assert_eq!(rotated.text_content(), "bus");
    }

    #[test]
    fn test_anonymous_group_has_no_title() {
        let root = Group::new(
            None,
            vec![
                SignalNode::Lane(Lane::new("clk", "p")),
                SignalNode::Group(Group::new(None, lanes(2))),
            ],
        );
        let walk = layout::walk(&root);
        let diagram = Diagram::new(Group::default()).with_head(Axis::new(
            Some(Caption::Plain("title".to_string())),
            None,
            None,
        ));
        let context = LayoutContext::new(Skin::default_skin().metrics(), &diagram);

        let elements = render(&context, walk.groups(), 1);
        assert_eq!(elements.len(), 1);
        // row 1 below a 46 high caption
        assert_eq!(
            elements[0].attr("d"),
            Some("m 20.5,79.5 c -3,0 -5,2 -5,5 l 0,44 c 0,3 2,5 5,5")
        );
        assert_eq!(elements[0].attr("id"), Some("group_0_1"));
    }
}
