//! Vertical cycle marks, captions and tick/tock labels.

use wavelane_core::{
    element::Element,
    semantic::{Axis, Caption, Diagram, TickSpec},
};

use super::preserved_text;
use crate::layout::LayoutContext;

const MARK_STYLE: &str = "stroke:#888;stroke-width:0.5;stroke-dasharray:1,3";

/// Caption baseline above the lanes, with and without a tick row.
const HEAD_CAPTION_Y: (f64, f64) = (-33.0, -13.0);
/// Caption offset below the last row, with and without a tick row.
const FOOT_CAPTION_DY: (f64, f64) = (45.0, 25.0);
const HEAD_TICK_Y: f64 = -5.0;
const FOOT_TICK_DY: f64 = 15.0;

/// Renders the `gmarks_<index>` group for a diagram of `rows` rows.
pub(super) fn render(
    context: &LayoutContext,
    diagram: &Diagram,
    rows: usize,
    index: usize,
) -> Element {
    let hscale = context.hscale();
    let mstep = 2.0 * hscale;
    let mmstep = mstep * context.xs();
    let marks = (context.xmax() as f64 / mstep).trunc() as usize;
    let gy = rows as f64 * context.yo();

    let mut group = Element::new("g").set("id", format!("gmarks_{index}"));

    for i in 0..=marks {
        group.append(
            Element::new("path")
                .set("id", format!("gmark_{i}_{index}"))
                .set("d", format!("m {},0 0,{gy}", i as f64 * mmstep))
                .set("style", MARK_STYLE),
        );
    }

    let caption_x = context.xmax() as f64 * context.xs() / 2.0;
    let head = diagram.head();
    let foot = diagram.foot();

    if let Some(caption) = head.and_then(Axis::text) {
        let y = if context.yh0() > 0.0 {
            HEAD_CAPTION_Y.0
        } else {
            HEAD_CAPTION_Y.1
        };
        group.append(caption_text(caption, caption_x, y));
    }
    if let Some(caption) = foot.and_then(Axis::text) {
        let dy = if context.yf0() > 0.0 {
            FOOT_CAPTION_DY.0
        } else {
            FOOT_CAPTION_DY.1
        };
        group.append(caption_text(caption, caption_x, gy + dy));
    }

    let rows_y = [(head, HEAD_TICK_Y), (foot, gy + FOOT_TICK_DY)];
    for (axis, y) in rows_y {
        let Some(axis) = axis else {
            continue;
        };
        if let Some(tick) = axis.tick() {
            tick_labels(&mut group, tick, 0.0, mmstep, y, marks + 1);
        }
        if let Some(tock) = axis.tock() {
            tick_labels(&mut group, tock, mmstep / 2.0, mmstep, y, marks);
        }
    }

    group
}

fn caption_text(caption: &Caption, x: f64, y: f64) -> Element {
    let text = match caption {
        Caption::Plain(text) => preserved_text(text.as_str()),
        Caption::Rich(markup) => Element::new("text")
            .set("xml:space", "preserve")
            .add(markup.clone()),
    };
    text.set("x", x)
        .set("y", y)
        .set("text-anchor", "middle")
        .set("fill", "#000")
}

fn tick_labels(group: &mut Element, spec: &TickSpec, x: f64, dx: f64, y: f64, count: usize) {
    for i in 0..count {
        let Some(label) = spec.label(i) else {
            break;
        };
        group.append(
            Element::new("text")
                .set("x", i as f64 * dx + x)
                .set("y", y)
                .set("text-anchor", "middle")
                .set("class", "muted")
                .set("xml:space", "preserve")
                .add_text(label),
        );
    }
}

#[cfg(test)]
mod tests {
    use wavelane_core::{semantic::Group, skin::Skin};

    use super::*;

    fn render_marks(diagram: &Diagram, xmax: usize, rows: usize) -> Element {
        let mut context = LayoutContext::new(Skin::default_skin().metrics(), diagram);
        context.set_xmax(xmax);
        render(&context, diagram, rows, 0)
    }

    /// `x,y:content` of every text element.
    fn texts(group: &Element) -> Vec<String> {
        group
            .child_elements()
            .filter(|e| e.tag() == "text")
            .map(|e| {
                format!(
                    "{},{}:{}",
                    e.attr("x").unwrap_or_default(),
                    e.attr("y").unwrap_or_default(),
                    e.text_content()
                )
            })
            .collect()
    }

    #[test]
    fn test_mark_paths() {
        let diagram = Diagram::new(Group::default());
        let group = render_marks(&diagram, 8, 2);

        assert_eq!(group.attr("id"), Some("gmarks_0"));
        let paths: Vec<_> = group
            .child_elements()
            .map(|e| (e.attr("id").unwrap(), e.attr("d").unwrap()))
            .collect();
        assert_eq!(
            paths,
            [
                ("gmark_0_0", "m 0,0 0,60"),
                ("gmark_1_0", "m 40,0 0,60"),
                ("gmark_2_0", "m 80,0 0,60"),
                ("gmark_3_0", "m 120,0 0,60"),
                ("gmark_4_0", "m 160,0 0,60"),
            ]
        );
    }

    #[test]
    fn test_marks_scale_with_hscale() {
        let diagram = Diagram::new(Group::default()).with_hscale(2);
        let group = render_marks(&diagram, 8, 1);
        let paths: Vec<_> = group.child_elements().filter_map(|e| e.attr("d")).collect();
        assert_eq!(paths, ["m 0,0 0,30", "m 80,0 0,30", "m 160,0 0,30"]);
    }

    #[test]
    fn test_captions_and_ticks() {
        let diagram = Diagram::new(Group::default())
            .with_head(Axis::new(
                Some(Caption::Plain("Head".to_string())),
                Some(TickSpec::Sequence { offset: 0 }),
                None,
            ))
            .with_foot(Axis::new(
                Some(Caption::Plain("Foot".to_string())),
                None,
                Some(TickSpec::Literal(vec!["a".to_string()])),
            ));
        let group = render_marks(&diagram, 4, 1);

        assert_eq!(
            texts(&group),
            [
                "40,-33:Head",
                "40,75:Foot",
                "0,-5:0",
                "40,-5:1",
                "80,-5:2",
                "20,45:a",
            ]
        );
    }

    #[test]
    fn test_caption_without_ticks() {
        let diagram = Diagram::new(Group::default()).with_head(Axis::new(
            Some(Caption::Plain("Title".to_string())),
            None,
            None,
        ));
        let group = render_marks(&diagram, 2, 3);
        let caption = group.child_elements().find(|e| e.tag() == "text").unwrap();
        assert_eq!(caption.attr("y"), Some("-13"));
        assert_eq!(caption.attr("fill"), Some("#000"));
    }
}
