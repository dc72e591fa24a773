//! Variable initialization pass
//!
//! Two phases over the immutable program: build a binding table mapping each
//! identifier to its binding line number, then walk every line's expression
//! tree and flag uses whose binding line is not strictly earlier than the
//! using line. The table is complete before any use is examined.

use std::collections::{HashMap, HashSet};

use super::Diagnostic;
use crate::ast::{Expr, ExprKind, Name, Program};
use crate::common::Span;

/// Which assignment fixes an identifier's binding line when it is assigned
/// more than once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BindingPolicy {
    /// The first textual assignment wins; reassignment does not move the
    /// binding line
    #[default]
    FirstAssignment,
    /// Every assignment overwrites the binding line
    LastAssignment,
}

/// Result of the variable initialization pass
#[derive(Debug, Clone)]
pub struct InitCheck {
    pub diagnostics: Vec<Diagnostic>,
}

impl InitCheck {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Check that every variable use is strictly after its binding line
///
/// A use of `v` on line `n` with binding line `b` is flagged iff `b >= n`:
/// self-references and forward references are violations, only
/// strictly-backward references pass. A use with no binding anywhere in the
/// program is reported as [`Diagnostic::UnboundVariable`].
///
/// A line whose entire right-hand side is a single variable reference
/// (`x = y`) contributes no uses; only references nested inside a function
/// argument list count. Each `(identifier, line)` pair is reported at most
/// once per pass.
pub fn check_var_init(program: &Program, policy: BindingPolicy) -> InitCheck {
    let bindings = build_bindings(program, policy);

    let mut diagnostics = Vec::new();
    for line in &program.lines {
        let mut uses = Vec::new();
        if let ExprKind::Function { args, .. } = &line.expr.kind {
            for arg in args {
                collect_uses(arg, &mut uses);
            }
        }
        // Integer literals and bare-alias lines (`x = y`) contribute no uses.

        let mut reported: HashSet<Name> = HashSet::new();
        for (name, span) in uses {
            if !reported.insert(name) {
                continue;
            }
            match bindings.get(&name) {
                Some(&binding) if binding >= line.line_number => {
                    diagnostics.push(Diagnostic::UseBeforeInit {
                        identifier: program.name(name).to_string(),
                        line_number: line.line_number,
                        span,
                    });
                }
                Some(_) => {}
                None => {
                    diagnostics.push(Diagnostic::UnboundVariable {
                        identifier: program.name(name).to_string(),
                        line_number: line.line_number,
                        span,
                    });
                }
            }
        }
    }

    InitCheck { diagnostics }
}

/// Map each assigned identifier to its binding line number
fn build_bindings(program: &Program, policy: BindingPolicy) -> HashMap<Name, u32> {
    let mut bindings = HashMap::new();
    for line in &program.lines {
        match policy {
            BindingPolicy::FirstAssignment => {
                bindings.entry(line.identifier).or_insert(line.line_number);
            }
            BindingPolicy::LastAssignment => {
                bindings.insert(line.identifier, line.line_number);
            }
        }
    }
    bindings
}

/// Collect every variable referenced in an expression subtree, depth-first,
/// left-to-right
fn collect_uses(expr: &Expr, out: &mut Vec<(Name, Span)>) {
    match &expr.kind {
        ExprKind::Integer(_) => {}
        ExprKind::Variable(name) => out.push((*name, expr.span)),
        ExprKind::Function { args, .. } => {
            for arg in args {
                collect_uses(arg, out);
            }
        }
    }
}
