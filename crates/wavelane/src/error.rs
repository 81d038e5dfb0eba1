//! Error types for Wavelane operations.
//!
//! [`WavelaneError`] wraps every failure of the parse, render and export
//! pipeline; [`RenderError`] covers problems found while laying out a
//! parsed diagram.

use std::io;

use thiserror::Error;

use wavelane_parser::error::ParseError;

/// Errors raised while rendering a parsed diagram.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    /// An edge names an event that no lane's `node` string defines.
    #[error("Edge references undefined event `{name}`")]
    MissingEventReference { name: char },
}

/// The main error type for Wavelane operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the source text next to the structured
/// diagnostics so callers can render annotated snippets.
#[derive(Debug, Error)]
pub enum WavelaneError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<crate::export::Error> for WavelaneError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl WavelaneError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
