use thiserror::Error;

use crate::{error::LexError, interpreter::lexer::Lexeme};

/// Represents all errors that can occur during lexing or parsing.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    /// The lexeme stream failed to produce the next lexeme.
    #[error(transparent)]
    Lexical(#[from] LexError),
    /// Found a lexeme whose category does not fit the grammar at this point.
    #[error("Error near {found}: unexpected {}, expected {expected}", found.token)]
    UnexpectedLexeme {
        /// The lexeme encountered.
        found:    Lexeme,
        /// What the parser was looking for.
        expected: String,
    },
}

impl ParseError {
    /// Returns the lexeme the error was raised at, if the error came from the
    /// parser rather than the lexer.
    #[must_use]
    pub const fn lexeme(&self) -> Option<&Lexeme> {
        match self {
            Self::Lexical(_) => None,
            Self::UnexpectedLexeme { found, .. } => Some(found),
        }
    }
}
