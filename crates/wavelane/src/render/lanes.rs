//! Lane rows: titles, brick uses and bus value labels.

use wavelane_core::{
    brick::Brick,
    element::{Element, translate},
    text::text_width,
};

use super::preserved_text;
use crate::layout::{FlatRow, LayoutContext};

/// Font size of lane titles.
const TITLE_FONT_SIZE: f64 = 11.0;

/// Renders one `wavelane_<row>_<index>` group per row.
///
/// `bricks[i]` holds the compiled bricks of `rows[i]`.
pub(super) fn render(
    context: &LayoutContext,
    rows: &[FlatRow<'_>],
    bricks: &[Vec<Brick>],
    index: usize,
) -> Vec<Element> {
    rows.iter()
        .zip(bricks)
        .map(|(row, bricks)| render_row(context, row, bricks, index))
        .collect()
}

fn render_row(context: &LayoutContext, row: &FlatRow<'_>, bricks: &[Brick], index: usize) -> Element {
    let mut group = Element::new("g")
        .set("id", format!("wavelane_{}_{index}", row.row()))
        .set("transform", translate(0.0, Some(context.row_y(row.row()))));

    let name = row.lane().map_or("", |lane| lane.name().trim());
    if !name.is_empty() {
        group.append(
            preserved_text(name)
                .set("x", context.tgo())
                .set("y", context.ym())
                .set("text-anchor", "end")
                .set("class", "info"),
        );
    }

    let phase = row.lane().map_or(0.0, |lane| lane.phase());
    let mut draw = Element::new("g")
        .set("id", format!("wavelane_draw_{}_{index}", row.row()))
        .set("transform", translate(phase_offset(phase) * context.xs(), Some(0.0)));

    for (i, brick) in bricks.iter().enumerate() {
        draw.append(
            Element::new("use")
                .set("href", format!("#{brick}"))
                .set("transform", translate(i as f64 * context.xs(), None)),
        );
    }

    let data = row.lane().map_or(&[][..], |lane| lane.data());
    for (marker, value) in data_markers(bricks).into_iter().zip(data) {
        draw.append(
            preserved_text(value)
                .set("x", marker.trunc() * context.xs() + context.xlabel())
                .set("y", context.ym())
                .set("text-anchor", "middle"),
        );
    }

    group.add(draw)
}

/// Horizontal shift, in cells, that aligns a phased lane to the grid.
fn phase_offset(phase: f64) -> f64 {
    if phase > 0.0 {
        (2.0 * phase).ceil() - 2.0 * phase
    } else {
        -2.0 * phase
    }
}

/// Centres of the runs of steady bus-value bricks, in cells.
fn data_markers(bricks: &[Brick]) -> Vec<f64> {
    let mut markers = Vec::new();
    let mut run = 0usize;

    for (i, brick) in bricks.iter().enumerate() {
        if brick.data_value().is_some() {
            run += 1;
        } else if run > 0 {
            markers.push(i as f64 - (run as f64 + 1.0) / 2.0);
            run = 0;
        }
    }
    if run > 0 {
        markers.push(bricks.len() as f64 - (run as f64 + 1.0) / 2.0);
    }

    markers
}

/// Width of the title column left of the lanes, rounded up to whole cells.
pub(super) fn title_column_width(context: &LayoutContext, rows: &[FlatRow<'_>]) -> f64 {
    let widest = rows
        .iter()
        .map(|row| {
            let name = row.lane().map_or("", |lane| lane.name().trim());
            text_width(name, TITLE_FONT_SIZE) + row.depth()
        })
        .fold(0.0, f64::max);

    ((widest - context.tgo()) / context.xs()).ceil() * context.xs()
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use wavelane_core::{
        semantic::{Diagram, Group, Lane, SignalNode},
        skin::Skin,
    };

    use super::*;
    use crate::{layout, wave::compile_lane};

    fn context() -> LayoutContext {
        LayoutContext::new(
            Skin::default_skin().metrics(),
            &Diagram::new(Group::default()),
        )
    }

    #[test]
    fn test_data_markers() {
        let bricks = compile_lane("x=.3x", 0.0, 0.0);
        // xxx xxx xmv-2 vvv-2 vvv-2 vvv-2 vmv-2-3 vvv-3 vmx-3 xxx
        assert_eq!(data_markers(&bricks), vec![4.0, 7.0]);
        assert_eq!(data_markers(&compile_lane("=", 0.0, 0.0)), vec![0.5]);
        assert!(data_markers(&compile_lane("01", 0.0, 0.0)).is_empty());
    }

    #[test]
    fn test_phase_offset() {
        assert_approx_eq!(f64, phase_offset(0.0), 0.0);
        assert_approx_eq!(f64, phase_offset(0.25), 0.5);
        assert_approx_eq!(f64, phase_offset(0.5), 0.0);
        assert_approx_eq!(f64, phase_offset(-0.5), 1.0);
    }

    #[test]
    fn test_lane_group() {
        let lane = Lane::new("data", "x=3").with_data(vec![
            "a".to_string(),
            "b".to_string(),
            "unused".to_string(),
        ]);
        let root = Group::new(None, vec![SignalNode::Spacer, SignalNode::Lane(lane)]);
        let walk = layout::walk(&root);
        let bricks = vec![Vec::new(), compile_lane("x=3", 0.0, 0.0)];

        let groups = render(&context(), walk.rows(), &bricks, 0);
        assert_eq!(groups.len(), 2);

        let spacer = &groups[0];
        assert_eq!(spacer.attr("id"), Some("wavelane_0_0"));
        assert_eq!(spacer.attr("transform"), Some("translate(0,5)"));
        assert!(spacer.find_by_id("wavelane_draw_0_0").unwrap().is_empty());

        let lane = &groups[1];
        assert_eq!(lane.attr("transform"), Some("translate(0,35)"));
        let title = lane.child_elements().next().unwrap();
        assert_eq!(title.attr("text-anchor"), Some("end"));
        assert_eq!(title.text_content(), "data");

        let draw = lane.find_by_id("wavelane_draw_1_0").unwrap();
        let uses: Vec<_> = draw
            .child_elements()
            .filter(|e| e.tag() == "use")
            .map(|e| e.attr("href").unwrap())
            .collect();
        assert_eq!(uses, ["#xxx", "#xxx", "#xmv-2", "#vvv-2", "#vmv-2-3", "#vvv-3"]);
        assert_eq!(
            draw.child_elements().nth(2).unwrap().attr("transform"),
            Some("translate(40)")
        );

        let labels: Vec<_> = draw
            .child_elements()
            .filter(|e| e.tag() == "text")
            .map(|e| (e.attr("x").unwrap().to_string(), e.text_content()))
            .collect();
        assert_eq!(
            labels,
            [
                ("66".to_string(), "a".to_string()),
                ("106".to_string(), "b".to_string())
            ]
        );
    }

    #[test]
    fn test_title_column_width() {
        let root = Group::new(None, vec![SignalNode::Lane(Lane::new("clk", "p"))]);
        let walk = layout::walk(&root);
        // text_width("clk", 11) = 18.04, plus 10 depth and 10 title gap, rounded up
        assert_approx_eq!(f64, title_column_width(&context(), walk.rows()), 40.0);
        assert_approx_eq!(f64, title_column_width(&context(), &[]), 20.0);
    }
}
