//! Accumulates diagnostics over one loader pass so that every malformed
//! lane and edge is reported at once.

use crate::error::{Diagnostic, ParseError};

#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    errors: Vec<Diagnostic>,
    warnings: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.errors.push(diagnostic);
        } else {
            self.warnings.push(diagnostic);
        }
    }

    /// Fails with every error when there is at least one; otherwise hands
    /// back the warnings.
    pub fn finish(self) -> Result<Vec<Diagnostic>, ParseError> {
        if self.errors.is_empty() {
            Ok(self.warnings)
        } else {
            Err(ParseError::new(self.errors))
        }
    }
}
