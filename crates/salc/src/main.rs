//! SAL Analyzer - semantic checker for the SAL single-assignment language
//!
//! Usage: salc [OPTIONS] <input>

use anyhow::Context;
use clap::{Parser as ClapParser, ValueEnum};
use sal_analyzer::common::DiagnosticReporter;
use sal_analyzer::driver::{AnalyzeConfig, AnalyzeContext, analyze_source};
use sal_analyzer::sema::{AnalysisOptions, BindingPolicy, PassGating};
use std::fs;
use std::path::PathBuf;
use std::process;

/// Binding line policy for reassigned identifiers
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Default)]
enum BindingPolicyArg {
    /// The first textual assignment fixes the binding line
    #[default]
    First,
    /// The last assignment fixes the binding line
    Last,
}

/// Whether the initialization check runs on duplicate line numbers
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Default)]
enum GatingArg {
    /// Skip the initialization check when duplicate lines exist
    #[default]
    Gated,
    /// Run both checks unconditionally
    Always,
}

#[derive(ClapParser, Debug)]
#[command(name = "salc")]
#[command(version)]
#[command(about = "Semantic analyzer for the SAL single-assignment language", long_about = None)]
struct Args {
    /// Input source file (.sal)
    #[arg(required = true)]
    input: PathBuf,

    /// Binding line policy for reassigned identifiers
    #[arg(short, long, value_enum, default_value = "first")]
    binding_policy: BindingPolicyArg,

    /// Pass gating when duplicate line numbers exist
    #[arg(short, long, value_enum, default_value = "gated")]
    gating: GatingArg,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Dump tokens (for debugging)
    #[arg(long)]
    dump_tokens: bool,

    /// Dump AST (for debugging)
    #[arg(long)]
    dump_ast: bool,
}

fn main() {
    let args = Args::parse();

    match run(&args) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("error: {:#}", e);
            process::exit(1);
        }
    }
}

fn run(args: &Args) -> anyhow::Result<bool> {
    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let filename = args.input.display().to_string();

    let mut reporter = DiagnosticReporter::new();
    let file_id = reporter.add_file(&filename, &source);

    let config = AnalyzeConfig {
        options: AnalysisOptions {
            binding_policy: match args.binding_policy {
                BindingPolicyArg::First => BindingPolicy::FirstAssignment,
                BindingPolicyArg::Last => BindingPolicy::LastAssignment,
            },
            gating: match args.gating {
                GatingArg::Gated => PassGating::SkipInitOnDuplicates,
                GatingArg::Always => PassGating::RunAlways,
            },
        },
        dump_tokens: args.dump_tokens,
        dump_ast: args.dump_ast,
        verbose: args.verbose,
    };

    let ctx = AnalyzeContext::new(filename, file_id, &reporter);
    let report = match analyze_source(&source, &ctx, &config) {
        Ok(report) => report,
        // Already rendered through the reporter; just fail the process.
        Err(_) => return Ok(false),
    };

    if args.verbose && report.is_clean() {
        eprintln!("{}: no findings", ctx.filename);
    }

    Ok(report.is_clean())
}
