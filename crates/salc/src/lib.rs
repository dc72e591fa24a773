//! SAL Analyzer - semantic analysis for a minimal single-assignment language
//!
//! A SAL program is an ordered collection of numbered lines, each binding
//! one identifier to the result of an expression. This library parses such
//! programs and validates two properties before any downstream use:
//! no two lines share a line number, and no variable is referenced at or
//! before the line that assigns it.
//!
//! ## Architecture
//!
//! The analyzer is organized into:
//! - **Lexer** (`lexer/`): logos-based tokenizer
//! - **Parser** (`parser/`): recursive descent parser producing the AST
//! - **AST** (`ast/`): program, line, and expression tree definitions
//! - **Sema** (`sema/`): the two analysis passes and their findings
//! - **Driver** (`driver/`): source-to-report pipeline glue
//! - **Common** (`common/`): shared infrastructure (errors, spans)

pub mod ast;
pub mod common;
pub mod driver;
pub mod lexer;
pub mod parser;
pub mod sema;

// Re-exports for convenience
pub use common::{CompileError, CompileResult, DiagnosticReporter, Span};
pub use sema::{
    AnalysisOptions, AnalysisReport, BindingPolicy, Diagnostic, PassGating, analyze,
};
