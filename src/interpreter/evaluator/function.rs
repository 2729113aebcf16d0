/// Built-in function table.
///
/// Declares the name, signature and implementation of every built-in
/// installed in the root frame.
pub mod builtin;
/// Function call evaluation.
///
/// Argument checking, call frames, return signals and return type checks.
pub mod core;
/// The `input*` built-ins.
///
/// Read whitespace-delimited tokens or whole lines from the input stream.
pub mod input;
/// The `print*` built-ins.
///
/// Write a value and a newline to the output stream.
pub mod print;
