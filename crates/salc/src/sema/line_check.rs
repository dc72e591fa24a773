//! Line uniqueness pass
//!
//! Scans the flat line sequence once and flags every line number that
//! appears more than once.

use std::collections::BTreeSet;

use super::Diagnostic;
use crate::ast::Program;

/// Result of the line uniqueness pass
#[derive(Debug, Clone)]
pub struct LineCheck {
    /// True iff every line number is distinct
    pub ok: bool,
    /// The distinct offending line numbers
    pub duplicates: BTreeSet<u32>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Check that no two lines share a line number
///
/// Each offending number yields exactly one finding no matter how often it
/// repeats, anchored at the first repeated occurrence. Never fails; it only
/// classifies the input.
pub fn check_line_uniqueness(program: &Program) -> LineCheck {
    let mut seen = BTreeSet::new();
    let mut duplicates = BTreeSet::new();
    let mut diagnostics = Vec::new();

    for line in &program.lines {
        if !seen.insert(line.line_number) && duplicates.insert(line.line_number) {
            diagnostics.push(Diagnostic::DuplicateLine {
                line_number: line.line_number,
                span: line.span,
            });
        }
    }

    LineCheck {
        ok: duplicates.is_empty(),
        duplicates,
        diagnostics,
    }
}
