//! Diagnostics reported while loading a WaveJSON document.
//!
//! Every [`Diagnostic`] carries an [`ErrorCode`]. The code decides the
//! [`Severity`]: `E` codes reject the document, `W` codes describe input
//! that was dropped or adjusted so that rendering can go ahead.
//!
//! Errors are returned together as a [`ParseError`]; warnings come back next
//! to the diagram from [`crate::parse_with_warnings`].
//!
//! ```
//! # use wavelane_parser::error::{Diagnostic, ErrorCode, Severity};
//! # use wavelane_parser::Span;
//! let diag = Diagnostic::new(ErrorCode::E103, "`signal[0].wave` must be a string")
//!     .with_label(Span::new(24..25), "found a number")
//!     .with_help("write the wave as \"01.x\"");
//!
//! assert_eq!(diag.severity(), Severity::Error);
//! ```

mod code;
mod collector;
mod diagnostic;
mod parse_error;

pub(crate) use collector::DiagnosticCollector;

pub use code::{ErrorCode, Severity};
pub use diagnostic::{Diagnostic, Label};
pub use parse_error::ParseError;
