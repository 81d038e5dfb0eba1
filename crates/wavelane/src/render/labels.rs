//! Inline lane labels from the lane `label` field.

use wavelane_core::{
    element::{Element, translate},
    semantic::LabelToken,
};

use crate::layout::{FlatRow, LayoutContext};

/// Approximate advance of one label character.
const CHAR_WIDTH: f64 = 7.0;

/// Renders the `labels_<index>` group with one `labels_<row>_<index>` group
/// per row.
pub(super) fn render(context: &mut LayoutContext, rows: &[FlatRow<'_>], index: usize) -> Element {
    let mut group = Element::new("g").set("id", format!("labels_{index}"));

    for row in rows {
        context.enter_lane(row.lane());

        let mut row_group = Element::new("g")
            .set("id", format!("labels_{}_{index}", row.row()))
            .set("transform", translate(0.0, Some(context.row_y(row.row()))));

        let tokens = row
            .lane()
            .and_then(|lane| lane.label())
            .map_or(&[][..], |label| label.tokens());
        let y = (context.ys() / 2.0).trunc();

        let mut pos = 0.0;
        for token in tokens {
            if let LabelToken::Text { text, offset } = token {
                let x = context.cycle_x(pos + offset);
                let width = text.chars().count() as f64 * CHAR_WIDTH;

                row_group.append(
                    Element::new("rect")
                        .set("x", x - width / 2.0)
                        .set("y", y - 5.0)
                        .set("width", width)
                        .set("height", 8)
                        .set("style", "fill:#FFF;"),
                );
                row_group.append(
                    Element::new("text")
                        .set("x", x)
                        .set("y", y + 2.0)
                        .set("style", "font-size:8px;")
                        .set("text-anchor", "middle")
                        .add_text(text.as_str()),
                );
            }
            pos += 1.0;
        }

        group.append(row_group);
    }

    group
}
