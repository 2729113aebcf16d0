/// Lexical errors.
///
/// Raised by the lexeme stream when the source contains a character that does
/// not start any lexeme, or an integer literal that does not fit in an `int`.
pub mod lex_error;
/// Parsing errors.
///
/// Defines the errors the parser can raise while building the syntax tree,
/// including lexical errors met while filling its lookahead.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation. Every
/// runtime error carries the lexeme it was raised at, when one is available.
pub mod runtime_error;

pub use lex_error::LexError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
use thiserror::Error;

/// Any failure that halts interpretation of a program.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// The program could not be lexed or parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The program failed while running.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl From<LexError> for Error {
    fn from(error: LexError) -> Self {
        Self::Parse(ParseError::Lexical(error))
    }
}
