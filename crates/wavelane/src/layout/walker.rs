//! Flattening of the signal tree into rows and group boxes.

use log::debug;

use wavelane_core::semantic::{Group, Lane, SignalNode};

/// Indentation added by a named group.
const NAMED_INDENT: f64 = 25.0;
/// Indentation added by an anonymous group.
const ANONYMOUS_INDENT: f64 = 10.0;

/// One drawn row: a lane, or a spacer when `lane` is `None`.
#[derive(Debug, Clone, Copy)]
pub struct FlatRow<'a> {
    row: usize,
    depth: f64,
    lane: Option<&'a Lane>,
}

impl<'a> FlatRow<'a> {
    /// Row index from the top.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Horizontal indentation of the row's title, from group nesting.
    pub fn depth(&self) -> f64 {
        self.depth
    }

    pub fn lane(&self) -> Option<&'a Lane> {
        self.lane
    }
}

/// The extent of a nested group, in rows.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupBox {
    name: Option<String>,
    x: f64,
    y: usize,
    height: usize,
}

impl GroupBox {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Indentation inside the group, where its bracket is drawn.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// First row of the group.
    pub fn y(&self) -> usize {
        self.y
    }

    /// Number of rows the group spans.
    pub fn height(&self) -> usize {
        self.height
    }
}

/// The result of walking a signal tree.
#[derive(Debug, Default)]
pub struct Walk<'a> {
    rows: Vec<FlatRow<'a>>,
    groups: Vec<GroupBox>,
}

impl<'a> Walk<'a> {
    pub fn rows(&self) -> &[FlatRow<'a>] {
        &self.rows
    }

    /// Group boxes, inner groups before the groups containing them.
    pub fn groups(&self) -> &[GroupBox] {
        &self.groups
    }

    fn visit(&mut self, group: &'a Group, x: f64) -> f64 {
        let x = x + if group.name().is_some() {
            NAMED_INDENT
        } else {
            ANONYMOUS_INDENT
        };

        for child in group.children() {
            match child {
                SignalNode::Lane(lane) => self.push_row(x, Some(lane)),
                SignalNode::Spacer => self.push_row(x, None),
                SignalNode::Group(inner) => {
                    let top = self.rows.len();
                    let inner_x = self.visit(inner, x);
                    self.groups.push(GroupBox {
                        name: inner.name().map(str::to_string),
                        x: inner_x,
                        y: top,
                        height: self.rows.len() - top,
                    });
                }
            }
        }

        x
    }

    fn push_row(&mut self, depth: f64, lane: Option<&'a Lane>) {
        self.rows.push(FlatRow {
            row: self.rows.len(),
            depth,
            lane,
        });
    }
}

/// Flattens `root` into rows and group boxes.
///
/// The root is indented like any other group but records no box.
pub fn walk(root: &Group) -> Walk<'_> {
    let mut walk = Walk::default();
    walk.visit(root, 0.0);
    debug!(rows = walk.rows.len(), groups = walk.groups.len(); "Signal tree flattened");
    walk
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn lane(name: &str) -> SignalNode {
        SignalNode::Lane(Lane::new(name, "01"))
    }

    #[test]
    fn test_flat_group() {
        let root = Group::new(
            None,
            vec![SignalNode::Group(Group::new(
                Some("bus".to_string()),
                vec![lane("a"), lane("b"), lane("c")],
            ))],
        );
        let walk = walk(&root);

        assert_eq!(walk.rows().len(), 3);
        assert_eq!(walk.groups().len(), 1);
        let group = &walk.groups()[0];
        assert_eq!(group.height(), 3);
        assert_eq!(group.y(), 0);
        assert_eq!(group.name(), Some("bus"));
        assert_approx_eq!(f64, group.x(), 35.0);
    }

    #[test]
    fn test_nested_groups() {
        let ctrl = Group::new(Some("ctrl".to_string()), vec![lane("write"), lane("read")]);
        let master = Group::new(
            Some("Master".to_string()),
            vec![SignalNode::Group(ctrl), lane("addr")],
        );
        let root = Group::new(None, vec![lane("clk"), SignalNode::Group(master)]);
        let walk = walk(&root);

        assert_eq!(walk.rows().len(), 4);
        let [inner, outer] = walk.groups() else {
            panic!("Expected two group boxes");
        };
        assert_eq!(inner.name(), Some("ctrl"));
        assert_eq!(inner.height(), 2);
        assert_eq!(inner.y(), 1);
        assert_eq!(outer.name(), Some("Master"));
        assert_eq!(outer.height(), 3);
        assert_eq!(outer.y(), 1);
        assert!(inner.x() > outer.x());

        let depths: Vec<f64> = walk.rows().iter().map(FlatRow::depth).collect();
        assert_eq!(depths, vec![10.0, 60.0, 60.0, 35.0]);
    }

    #[test]
    fn test_spacers_and_anonymous_groups() {
        let root = Group::new(
            Some("top".to_string()),
            vec![
                lane("a"),
                SignalNode::Spacer,
                SignalNode::Group(Group::new(None, vec![SignalNode::Spacer, lane("b")])),
            ],
        );
        let walk = walk(&root);

        let rows = walk.rows();
        assert_eq!(rows.len(), 4);
        assert!(rows[1].lane().is_none());
        assert_eq!(rows[3].row(), 3);
        assert_eq!(rows[3].lane().map(Lane::name), Some("b"));
        assert_approx_eq!(f64, rows[3].depth(), 35.0);

        let group = &walk.groups()[0];
        assert_eq!(group.name(), None);
        assert_eq!((group.y(), group.height()), (2, 2));
    }

    #[test]
    fn test_empty_tree() {
        let group = Group::default();
        let walk = walk(&group);
        assert!(walk.rows().is_empty());
        assert!(walk.groups().is_empty());
    }
}
