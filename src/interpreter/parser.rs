/// Parser entry points and the program-level grammar.
///
/// Contains the shared result type, the expression entry point, and the
/// top-level loop that separates function declarations from globals.
pub mod core;

/// Binary operator parsing.
///
/// One function per precedence level, from logical operators down to
/// multiplication. Every level is left-associative.
pub mod binary;

/// Unary and primary expression parsing.
///
/// Prefix operators, literals, casts, parenthesized expressions, initializer
/// lists, variable references and calls.
pub mod unary;

/// Statement parsing.
///
/// Control flow, declarations, assignments and call statements.
pub mod statement;

/// Block parsing.
pub mod block;

/// Function declaration parsing.
///
/// Return type, name, typed parameter list and body.
pub mod function;

/// Utility functions shared by the parser submodules.
///
/// Lexeme matching, identifiers, type keywords and comma-separated lists.
pub mod utils;
