//! Layout of the signal tree.
//!
//! Layout happens once per render: [`walk`] flattens the nested signal tree
//! into rows and group boxes, and a fresh [`LayoutContext`] carries the
//! geometry every renderer agrees on.

mod context;
mod walker;

pub use context::LayoutContext;
pub use walker::{FlatRow, GroupBox, Walk, walk};
