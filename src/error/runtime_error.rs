use thiserror::Error;

use crate::interpreter::lexer::Lexeme;

/// Represents all errors that can occur during evaluation.
///
/// Every variant carries a short description and, when it is known, the lexeme
/// the failure was detected at.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeError {
    /// A name was read or assigned without being declared in any visible frame.
    #[error("Error {}: identifier not found: {details}", origin(.lexeme.as_ref()))]
    IdentifierNotFound {
        /// What was being looked up.
        details: String,
        /// Where the error was raised.
        lexeme:  Option<Lexeme>,
    },
    /// A name was declared twice in the same frame.
    #[error("Error {}: duplicate identifier: {details}", origin(.lexeme.as_ref()))]
    DuplicateIdentifier {
        /// The duplicated name.
        details: String,
        /// Where the error was raised.
        lexeme:  Option<Lexeme>,
    },
    /// An operator, declaration, assignment or return saw a value of the wrong
    /// type.
    #[error("Error {}: mismatched type: {details}", origin(.lexeme.as_ref()))]
    MismatchedType {
        /// Details about the type mismatch.
        details: String,
        /// Where the error was raised.
        lexeme:  Option<Lexeme>,
    },
    /// A call passed the wrong number or types of arguments.
    #[error("Error {}: mismatched arguments: {details}", origin(.lexeme.as_ref()))]
    MismatchedArguments {
        /// Details about the mismatch.
        details: String,
        /// Where the error was raised.
        lexeme:  Option<Lexeme>,
    },
    /// An index fell outside an array, or a declared dimension was not
    /// positive.
    #[error("Error {}: out of bounds: {details}", origin(.lexeme.as_ref()))]
    OutOfBounds {
        /// Details about the offending index or dimension.
        details: String,
        /// Where the error was raised.
        lexeme:  Option<Lexeme>,
    },
    /// `break` or `continue` escaped a function body.
    #[error("Error {}: break or continue without loop", origin(.lexeme.as_ref()))]
    BreakOrContinueWithoutLoop {
        /// The offending `break` or `continue`.
        lexeme: Option<Lexeme>,
    },
    /// No zero-argument `int main()` is declared.
    #[error("Error {}: invalid main: {details}", origin(.lexeme.as_ref()))]
    InvalidMain {
        /// Why `main` was rejected.
        details: String,
        /// Where the error was raised.
        lexeme:  Option<Lexeme>,
    },
    /// A function was declared with an array return type.
    #[error("Error {}: array as function return: {details}", origin(.lexeme.as_ref()))]
    ArrayAsFunctionReturn {
        /// The function name.
        details: String,
        /// Where the error was raised.
        lexeme:  Option<Lexeme>,
    },
    /// Integer or float division or modulo by zero.
    #[error("Error {}: division by zero", origin(.lexeme.as_ref()))]
    DivisionByZero {
        /// The offending operator.
        lexeme: Option<Lexeme>,
    },
    /// A built-in could not read from or write to its stream.
    #[error("Error {}: input/output failure: {details}", origin(.lexeme.as_ref()))]
    Io {
        /// What went wrong.
        details: String,
        /// Where the error was raised.
        lexeme:  Option<Lexeme>,
    },
}

impl RuntimeError {
    /// Returns the lexeme the error was raised at, if one is known.
    #[must_use]
    pub const fn lexeme(&self) -> Option<&Lexeme> {
        match self {
            Self::IdentifierNotFound { lexeme, .. }
            | Self::DuplicateIdentifier { lexeme, .. }
            | Self::MismatchedType { lexeme, .. }
            | Self::MismatchedArguments { lexeme, .. }
            | Self::OutOfBounds { lexeme, .. }
            | Self::BreakOrContinueWithoutLoop { lexeme }
            | Self::InvalidMain { lexeme, .. }
            | Self::ArrayAsFunctionReturn { lexeme, .. }
            | Self::DivisionByZero { lexeme }
            | Self::Io { lexeme, .. } => lexeme.as_ref(),
        }
    }

    /// Attaches `lexeme` to an error raised without position information.
    ///
    /// Errors that already carry a lexeme are returned unchanged, so the
    /// innermost position wins.
    #[must_use]
    pub fn at(mut self, at: &Lexeme) -> Self {
        let slot = match &mut self {
            Self::IdentifierNotFound { lexeme, .. }
            | Self::DuplicateIdentifier { lexeme, .. }
            | Self::MismatchedType { lexeme, .. }
            | Self::MismatchedArguments { lexeme, .. }
            | Self::OutOfBounds { lexeme, .. }
            | Self::BreakOrContinueWithoutLoop { lexeme }
            | Self::InvalidMain { lexeme, .. }
            | Self::ArrayAsFunctionReturn { lexeme, .. }
            | Self::DivisionByZero { lexeme }
            | Self::Io { lexeme, .. } => lexeme,
        };
        if slot.is_none() {
            *slot = Some(at.clone());
        }
        self
    }
}

fn origin(lexeme: Option<&Lexeme>) -> String {
    lexeme.map_or_else(|| "at unknown position".to_string(), |lexeme| format!("near {lexeme}"))
}
