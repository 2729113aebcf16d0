use thiserror::Error;

/// Represents all errors the lexer can produce.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    /// A character that starts no valid lexeme.
    #[error("Error at {line}:{column}: unrecognized character '{character}'")]
    UnrecognizedCharacter {
        /// The offending source text.
        character: String,
        /// 1-based line of the character.
        line:      usize,
        /// 1-based column of the character.
        column:    usize,
    },
    /// An integer literal too large for an `int`.
    #[error("Error at {line}:{column}: integer literal {literal} is out of range")]
    IntegerOutOfRange {
        /// The literal as written.
        literal: String,
        /// 1-based line of the literal.
        line:    usize,
        /// 1-based column of the literal.
        column:  usize,
    },
}
