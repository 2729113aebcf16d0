/// Binary operator evaluation logic.
///
/// One table per operator family, each deciding by operand types. Mixed int
/// and float arithmetic promotes to float.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements negation, logical NOT and bitwise complement.
pub mod unary;

/// Cast evaluation.
pub mod cast;

/// Core evaluation logic and interpreter state.
///
/// Contains the `Interpreter`, the `Flow` signals, program entry, and the
/// statement and expression dispatch.
pub mod core;

/// Evaluation of `for`, `while` and `do`-`while` loops.
///
/// Loops consume `break` and `continue` and pass `return` through.
pub mod loops;

/// Variable and function declarations.
pub mod declaration;

/// Plain, compound and indexed assignment.
pub mod assignment;

/// Utility functions for evaluation.
///
/// Provides helpers and reusable routines shared by evaluation logic.
pub mod utils;

/// Function evaluation.
///
/// Handles user-defined and built-in function calls, argument checking, and
/// return value checking.
pub mod function;
