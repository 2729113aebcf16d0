/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST, executes statements, evaluates
/// expressions and calls functions. It is the core execution engine of the
/// interpreter.
///
/// # Responsibilities
/// - Evaluates AST nodes, performing all supported operations.
/// - Handles variables, functions, loops and non-local control flow.
/// - Reports runtime errors such as type mismatches or invalid indices.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads the raw source text and produces a stream of
/// tokens, each corresponding to meaningful language elements such as numbers,
/// identifiers, operators, delimiters, and keywords. This is the first stage of
/// interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into lexemes with type and source
///   location.
/// - Discards whitespace and comments.
/// - Buffers lexemes so the parser can look arbitrarily far ahead.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and constructs
/// an AST that represents the syntactic structure of expressions and
/// statements. This enables later phases to analyze and execute user code.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (expressions, statements).
/// - Validates correct grammar and syntax, reporting errors with location info.
/// - Supports declarations, control flow, casts, calls, and more.
pub mod parser;
/// The scope module resolves names to values.
///
/// A chain of frames maps names to variables and functions. Blocks push
/// frames and function calls start isolated chains that only share the
/// root frame.
pub mod scope;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares the value types used during execution: integers,
/// floating-point numbers, strings, arrays, void and function references. It
/// also provides conversion between the numeric types and the structural
/// checks arrays need.
///
/// # Responsibilities
/// - Defines the `Value` enum and all supported value variants.
/// - Implements coercion, truthiness and display.
/// - Builds, shapes and indexes arrays.
pub mod value;
