//! Export of rendered diagrams.
//!
//! The renderer produces an abstract [`Element`] tree; exporters turn that
//! tree into an output format. This is the last stage of the pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! JSON Source
//!     ↓ parse
//! Semantic Model
//!     ↓ walk + compile
//! Flat rows and bricks
//!     ↓ render
//! Element tree
//!     ↓ export (this module)
//! SVG text
//! ```
//!
//! # Available Backends
//!
//! - [`svg`]: SVG markup via [`svg::SvgBuilder`] and [`svg::Svg`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`], which converts into
//! [`WavelaneError::Export`] at the crate boundary.
//!
//! [`WavelaneError::Export`]: crate::WavelaneError::Export

/// SVG export backend.
pub mod svg;

use wavelane_core::element::Element;

/// Abstraction for diagram export backends.
pub trait Exporter {
    /// Serializes a rendered diagram rooted at an `<svg>` element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the tree cannot be represented in the
    /// target format.
    fn export_document(&self, root: &Element) -> Result<String, Error>;
}

/// Errors that can occur during diagram export.
#[derive(Debug)]
pub enum Error {
    /// A conversion failure described by `message`.
    Render(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
