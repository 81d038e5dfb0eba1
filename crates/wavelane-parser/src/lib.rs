//! # Wavelane Parser
//!
//! Loader for WaveJSON timing diagram descriptions. This crate turns source
//! text into the normalized [`wavelane_core::semantic::Diagram`], reporting
//! problems as [`error::Diagnostic`]s.
//!
//! ## Usage
//!
//! ```
//! # use wavelane_parser::{parse, error::ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"{
//!         "signal": [
//!             { "name": "clk", "wave": "p....." },
//!             { "name": "dat", "wave": "x.34.x", "data": "A B" }
//!         ]
//!     }"#;
//!
//!     let diagram = parse(source)?;
//!     assert_eq!(diagram.signal().children().len(), 2);
//!     Ok(())
//! }
//! ```

mod annotation;
pub mod error;
mod loader;
mod rich_text;
mod span;

pub use span::Span;

use log::warn;
use wavelane_core::semantic::Diagram;

/// Parse source text into a semantic diagram.
///
/// The pipeline is:
///
/// 1. **Decode** - Parse the JSON text (syntax errors carry a source span)
/// 2. **Normalize** - Resolve groups, lanes, ticks and captions
/// 3. **Annotate** - Parse edge specs and lane labels
///
/// Warnings about skipped or adjusted input are logged; use
/// [`parse_with_warnings`] to receive them instead.
///
/// # Errors
///
/// Returns a [`error::ParseError`] holding every error found when the
/// input is not a renderable timing diagram.
pub fn parse(source: &str) -> Result<Diagram, error::ParseError> {
    let (diagram, warnings) = parse_with_warnings(source)?;
    for warning in &warnings {
        warn!(code = warning.code().to_string(); "{}", warning.message());
    }
    Ok(diagram)
}

/// Like [`parse`], but returns the warnings next to the diagram.
///
/// ```
/// # use wavelane_parser::{error::ErrorCode, parse_with_warnings};
/// let source = r#"{ "signal": [], "config": { "hbounds": [0, 4] } }"#;
/// let (_, warnings) = parse_with_warnings(source).unwrap();
/// assert_eq!(warnings[0].code(), ErrorCode::W100);
/// ```
///
/// # Errors
///
/// As for [`parse`].
pub fn parse_with_warnings(
    source: &str,
) -> Result<(Diagram, Vec<error::Diagnostic>), error::ParseError> {
    loader::load(source)
}
