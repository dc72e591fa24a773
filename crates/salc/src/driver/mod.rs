//! Analysis pipeline orchestration
//!
//! Glue between the front-end and the analysis passes: lex, parse, analyze,
//! and hand findings to the reporter. Used by the CLI and usable directly
//! as a library entry point.

use crate::common::{CompileResult, DiagnosticReporter};
use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::sema::{self, AnalysisOptions, AnalysisReport};

/// Configuration options for one pipeline run
#[derive(Debug, Clone, Default)]
pub struct AnalyzeConfig {
    pub options: AnalysisOptions,
    pub dump_tokens: bool,
    pub dump_ast: bool,
    pub verbose: bool,
}

/// Pipeline context providing access to diagnostics and file info
pub struct AnalyzeContext<'a> {
    pub filename: String,
    pub file_id: usize,
    pub reporter: &'a DiagnosticReporter,
}

impl<'a> AnalyzeContext<'a> {
    pub fn new(filename: String, file_id: usize, reporter: &'a DiagnosticReporter) -> Self {
        Self {
            filename,
            file_id,
            reporter,
        }
    }
}

/// Run the full pipeline over one source file
///
/// Front-end errors are reported and returned as `Err`; analysis findings
/// are reported and returned inside the [`AnalysisReport`].
pub fn analyze_source(
    source: &str,
    ctx: &AnalyzeContext,
    config: &AnalyzeConfig,
) -> CompileResult<AnalysisReport> {
    // Phase 1: Lexing (optional token dump)
    if config.dump_tokens {
        let lexer = Lexer::new(source);
        match lexer.tokenize_all() {
            Ok(tokens) => {
                eprintln!("=== Tokens ===");
                for token in &tokens {
                    eprintln!("{:?}", token);
                }
                eprintln!("=== End Tokens ===\n");
            }
            Err(e) => {
                ctx.reporter.report_error(ctx.file_id, &e);
                return Err(e);
            }
        }
    }

    // Phase 2: Parsing
    if config.verbose {
        eprintln!("Parsing {}...", ctx.filename);
    }

    let parser = match Parser::new(source) {
        Ok(p) => p,
        Err(e) => {
            ctx.reporter.report_error(ctx.file_id, &e);
            return Err(e);
        }
    };

    let program = match parser.parse() {
        Ok(program) => program,
        Err(e) => {
            ctx.reporter.report_error(ctx.file_id, &e);
            return Err(e);
        }
    };

    if config.dump_ast {
        eprintln!("=== AST ===");
        eprintln!("{:#?}", program);
        eprintln!("=== End AST ===\n");
    }

    // Phase 3: Analysis
    if config.verbose {
        eprintln!("Analyzing...");
    }

    let report = sema::analyze(&program, &config.options);

    for finding in &report.diagnostics {
        ctx.reporter.report_finding(ctx.file_id, finding);
    }

    if config.verbose && report.init_skipped {
        eprintln!("note: initialization check skipped due to duplicate line numbers");
    }

    Ok(report)
}
