//! # clite
//!
//! clite is an interpreter for a small, statically typed C-like language.
//! Programs declare global variables and functions, and run by calling
//! `int main()`, whose result becomes the process exit code. The language
//! has `int`, `float` and `string` scalars, multi-dimensional arrays, the
//! usual C operators and control flow, and a fixed set of built-in I/O
//! functions.
//!
//! Source text goes through the lexeme stream, the recursive-descent parser
//! and finally the tree-walking evaluator.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::{self, BufRead, Write};

use crate::{
    ast::Program,
    error::ParseError,
    interpreter::{evaluator::core::Interpreter, parser::core::parse_program},
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` enum and related types that represent the
/// syntactic structure of source code as a tree. The AST is built by the parser
/// and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches metadata (such as source locations) to AST nodes for error
///   reporting.
/// - Enables extensible and robust handling of parsed code.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing, parsing, or
/// evaluating code. It standardizes error reporting and carries detailed
/// information about failures, including error kinds, descriptions, and source
/// locations for debugging and user feedback.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches line numbers and detailed messages for context.
/// - Supports integration with standard error handling traits and reporting
///   utilities.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, scope management, value
/// representations and evaluation to provide a complete runtime for source
/// programs.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Provides entry points for parsing and evaluating user code.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for safe numeric conversion and helpers.
///
/// This module provides reusable helpers and conversion routines that are used
/// throughout the interpreter, parser, and evaluator. These include safe
/// conversions between integer and floating-point types, and any
/// general-purpose functions not specific to a single phase.
///
/// # Responsibilities
/// - Safely convert between `i64`, `usize`, and `f64` without silent data
///   loss.
/// - Provide general utility functions used in multiple modules.
pub mod util;

pub use error::Error;

/// Lexes and parses a program without running it.
///
/// # Errors
/// Returns the first lexical or syntax error.
///
/// # Examples
/// ```
/// let program = clite::parse("int main() { return 0; }").unwrap();
/// assert_eq!(program.items.len(), 1);
///
/// assert!(clite::parse("int main() { return 0 }").is_err());
/// ```
pub fn parse(source: &str) -> Result<Program, ParseError> {
    parse_program(source)
}

/// Runs a program against the process's standard input and output.
///
/// Returns the value `main` returned.
///
/// # Errors
/// Returns an error if parsing fails or the program raises a runtime error.
pub fn run(source: &str) -> Result<i64, Error> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout().lock();
    run_with_io(source, &mut input, &mut output)
}

/// Runs a program against the given streams.
///
/// Returns the value `main` returned. Output written before a runtime error
/// is still flushed to `output`.
///
/// # Errors
/// Returns an error if parsing fails or the program raises a runtime error.
///
/// # Examples
/// ```
/// use std::io::Cursor;
///
/// let source = "int main() { int n = inputi(); printi(n * 2); return n; }";
/// let mut input = Cursor::new("21");
/// let mut output = Vec::new();
///
/// let code = clite::run_with_io(source, &mut input, &mut output).unwrap();
/// assert_eq!(code, 21);
/// assert_eq!(String::from_utf8(output).unwrap(), "42\n");
///
/// // 'x' is not declared
/// let mut output = Vec::new();
/// let res = clite::run_with_io("int main() { return x; }", &mut input, &mut output);
/// assert!(res.is_err());
/// ```
pub fn run_with_io(source: &str,
                   input: &mut dyn BufRead,
                   output: &mut dyn Write)
                   -> Result<i64, Error> {
    let program = parse(source)?;
    let mut interpreter = Interpreter::new(input, output);
    Ok(interpreter.run(&program)?)
}
