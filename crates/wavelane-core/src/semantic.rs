//! Semantic diagram model types.
//!
//! These types are the normalized form of a timing diagram description after
//! loading. Every polymorphic input field has already been resolved into a
//! tagged union, so layout and rendering never inspect raw JSON.
//!
//! # Pipeline Position
//!
//! ```text
//! JSON Source
//!     ↓ loader (wavelane-parser)
//! Semantic Model (these types)
//!     ↓ walker + wave compiler
//! Flat rows, group boxes, bricks
//!     ↓ renderers
//! Element tree
//!     ↓ export
//! SVG
//! ```
//!
//! # Organization
//!
//! - [`diagram`] - The root [`Diagram`] with axis annotations and edges
//! - [`signal`] - The signal tree: [`SignalNode`], [`Lane`], [`Group`]

pub mod diagram;
pub mod signal;

pub use diagram::*;
pub use signal::*;
