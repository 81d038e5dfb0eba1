//! Gap glyphs drawn over `|` markers.

use wavelane_core::element::{Element, translate};

use crate::layout::{FlatRow, LayoutContext};

/// Renders the `wavegaps_<index>` group with one `wavegap_<row>_<index>`
/// group per row.
pub(super) fn render(context: &mut LayoutContext, rows: &[FlatRow<'_>], index: usize) -> Element {
    let mut group = Element::new("g").set("id", format!("wavegaps_{index}"));

    for row in rows {
        context.enter_lane(row.lane());

        let mut lane_group = Element::new("g")
            .set("id", format!("wavegap_{}_{index}", row.row()))
            .set("transform", translate(0.0, Some(context.row_y(row.row()))));

        if let Some(lane) = row.lane() {
            for x in gap_positions(context, lane.wave()) {
                lane_group.append(
                    Element::new("use")
                        .set("href", "#gap")
                        .set("transform", translate(x, None)),
                );
            }
        }

        group.append(lane_group);
    }

    group
}

/// x positions of the gaps of the current lane.
fn gap_positions(context: &LayoutContext, wave: &str) -> Vec<f64> {
    let period = context.period();
    let hscale = context.hscale();
    let phase = (2.0 * context.phase()).trunc();

    let mut positions = Vec::new();
    let mut subcycle = false;
    let mut pos = 0.0;

    for c in wave.chars() {
        match c {
            '<' => subcycle = true,
            '>' => subcycle = false,
            _ => {
                pos += if subcycle { period } else { 2.0 * period };
                if c == '|' {
                    let cycles = if subcycle { pos } else { pos - period };
                    positions.push(context.xs() * (cycles * hscale - phase));
                }
            }
        }
    }

    positions
}
