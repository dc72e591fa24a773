//! Semantic analysis passes
//!
//! Two independent passes run in sequence over the same immutable program:
//! line uniqueness first, then variable initialization. Whether the second
//! pass runs when the first fails is an orchestration policy, not a property
//! of either pass; both build all of their state fresh per call.

mod diagnostic;
mod line_check;
mod var_init;

pub use diagnostic::Diagnostic;
pub use line_check::{LineCheck, check_line_uniqueness};
pub use var_init::{BindingPolicy, InitCheck, check_var_init};

use crate::ast::Program;

/// Whether the initialization pass runs when duplicate lines exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PassGating {
    /// Skip the initialization pass on duplicate line numbers, since
    /// line-number comparisons are unreliable in that case
    #[default]
    SkipInitOnDuplicates,
    /// Run both passes unconditionally
    RunAlways,
}

/// Analysis configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalysisOptions {
    pub binding_policy: BindingPolicy,
    pub gating: PassGating,
}

/// Combined result of one analysis run
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// Verdict of the line uniqueness pass
    pub lines_ok: bool,
    /// True when gating suppressed the initialization pass
    pub init_skipped: bool,
    /// All findings, uniqueness findings first
    pub diagnostics: Vec<Diagnostic>,
}

impl AnalysisReport {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Run both analysis passes over a program
pub fn analyze(program: &Program, options: &AnalysisOptions) -> AnalysisReport {
    let lines = check_line_uniqueness(program);
    let mut diagnostics = lines.diagnostics;

    let skip_init = !lines.ok && options.gating == PassGating::SkipInitOnDuplicates;
    if !skip_init {
        let init = check_var_init(program, options.binding_policy);
        diagnostics.extend(init.diagnostics);
    }

    AnalysisReport {
        lines_ok: lines.ok,
        init_skipped: skip_init,
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> Program {
        Parser::new(source).unwrap().parse().unwrap()
    }

    #[test]
    fn test_clean_program_reports_nothing() {
        let program = parse("1 x = 3  2 y = add(x, 7)  3 w = y");
        let report = analyze(&program, &AnalysisOptions::default());

        assert!(report.lines_ok);
        assert!(!report.init_skipped);
        assert!(report.is_clean());
    }

    #[test]
    fn test_duplicates_gate_init_pass_by_default() {
        // Line 2 repeats and line 1 has a forward reference; with the
        // default gating only the duplicate surfaces.
        let program = parse("1 y = f(x)  2 a = 1  2 b = 2  3 x = 4");
        let report = analyze(&program, &AnalysisOptions::default());

        assert!(!report.lines_ok);
        assert!(report.init_skipped);
        assert_eq!(report.diagnostics.len(), 1);
        assert!(matches!(
            report.diagnostics[0],
            Diagnostic::DuplicateLine { line_number: 2, .. }
        ));
    }

    #[test]
    fn test_run_always_reports_both_kinds() {
        let program = parse("1 y = f(x)  2 a = 1  2 b = 2  3 x = 4");
        let options = AnalysisOptions {
            gating: PassGating::RunAlways,
            ..AnalysisOptions::default()
        };
        let report = analyze(&program, &options);

        assert!(!report.lines_ok);
        assert!(!report.init_skipped);
        assert_eq!(report.diagnostics.len(), 2);
        assert!(matches!(
            report.diagnostics[1],
            Diagnostic::UseBeforeInit { line_number: 1, .. }
        ));
    }

    #[test]
    fn test_analysis_is_repeatable() {
        // No state leaks between runs: analyzing the same program twice
        // yields identical reports.
        let program = parse("1 y = f(x)  2 x = 3  2 z = 4");
        let options = AnalysisOptions {
            gating: PassGating::RunAlways,
            ..AnalysisOptions::default()
        };

        let first = analyze(&program, &options);
        let second = analyze(&program, &options);
        assert_eq!(first.diagnostics, second.diagnostics);
        assert_eq!(first.lines_ok, second.lines_ok);
    }
}
