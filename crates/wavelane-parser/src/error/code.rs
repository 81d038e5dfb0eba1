//! Diagnostic codes.
//!
//! - `E0xx` JSON syntax
//! - `E1xx` document structure
//! - `E2xx` edge and rich text annotations
//! - `Wxxx` recoverable input, mirrored on the error ranges

use std::fmt;

/// Whether a diagnostic stops the document from loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn is_error(self) -> bool {
        self == Severity::Error
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The input is not well-formed JSON.
    E001,
    /// The input ended inside a JSON value.
    E002,

    /// The top-level value is not an object.
    E100,
    /// There is no `signal` entry.
    E101,
    /// A `reg` or `assign` document.
    E102,
    /// A field holds a JSON value of the wrong type.
    E103,
    /// A field has the right type but an unusable value.
    E104,

    /// An `edge` entry without the `<from><shape><to> [label]` form.
    E200,
    /// A JsonML caption that is not `[tag, {attrs}?, ...children]`.
    E201,

    /// A config setting that is ignored or clamped.
    W100,
    /// A lane setting that is clamped.
    W101,
    /// A `tick` or `tock` value that produces no labels.
    W102,
    /// An edge connector that is not one of the known shapes.
    W200,
}

impl ErrorCode {
    pub fn severity(self) -> Severity {
        match self {
            ErrorCode::W100 | ErrorCode::W101 | ErrorCode::W102 | ErrorCode::W200 => {
                Severity::Warning
            }
            _ => Severity::Error,
        }
    }

    /// Short description shown next to the code in documentation.
    pub fn description(self) -> &'static str {
        match self {
            ErrorCode::E001 => "invalid JSON",
            ErrorCode::E002 => "unexpected end of input",
            ErrorCode::E100 => "document is not an object",
            ErrorCode::E101 => "missing signal list",
            ErrorCode::E102 => "unsupported diagram kind",
            ErrorCode::E103 => "invalid field type",
            ErrorCode::E104 => "invalid field value",
            ErrorCode::E200 => "malformed edge",
            ErrorCode::E201 => "malformed rich text",
            ErrorCode::W100 => "config setting adjusted",
            ErrorCode::W101 => "lane setting adjusted",
            ErrorCode::W102 => "axis labels skipped",
            ErrorCode::W200 => "unknown arc shape",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Derived Debug is exactly the code name
        fmt::Debug::fmt(self, f)
    }
}
