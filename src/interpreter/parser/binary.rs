use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::{LexemeStream, Token},
        parser::{core::ParseResult, unary::parse_unary},
    },
};

/// Parses logical expressions.
///
/// Handles left-associative binary operators: `&&` and `||`. Both share the
/// lowest precedence level.
///
/// The rule is: `logical := bitwise (("&&" | "||") bitwise)*`
///
/// # Parameters
/// - `lexemes`: Lexeme stream positioned at the start of the expression.
///
/// # Returns
/// An `Expr::Binary` tree, or the single operand if no operator follows.
pub fn parse_logical(lexemes: &mut LexemeStream<'_>) -> ParseResult<Expr> {
    parse_level(lexemes, parse_bitwise, |op| {
        matches!(op, BinaryOperator::And | BinaryOperator::Or)
    })
}

/// Parses bitwise expressions: `&`, `|`, `^`, `<<` and `>>`.
///
/// All five operators share one level, just above the logical operators.
///
/// The rule is: `bitwise := relational (("&" | "|" | "^" | "<<" | ">>")
/// relational)*`
pub fn parse_bitwise(lexemes: &mut LexemeStream<'_>) -> ParseResult<Expr> {
    parse_level(lexemes, parse_relational, |op| {
        matches!(op,
                 BinaryOperator::BitAnd
                 | BinaryOperator::BitOr
                 | BinaryOperator::BitXor
                 | BinaryOperator::ShiftLeft
                 | BinaryOperator::ShiftRight)
    })
}

/// Parses equality and ordering comparisons.
///
/// The rule is: `relational := additive (("==" | "!=" | "<" | "<=" | ">" |
/// ">=") additive)*`
pub fn parse_relational(lexemes: &mut LexemeStream<'_>) -> ParseResult<Expr> {
    parse_level(lexemes, parse_additive, is_relational_op)
}

/// Parses addition and subtraction expressions.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
pub fn parse_additive(lexemes: &mut LexemeStream<'_>) -> ParseResult<Expr> {
    parse_level(lexemes, parse_multiplicative, |op| {
        matches!(op, BinaryOperator::Add | BinaryOperator::Sub)
    })
}

/// Parses multiplication-level expressions: `*`, `/` and `%`.
///
/// The rule is: `multiplicative := unary (("*" | "/" | "%") unary)*`
pub fn parse_multiplicative(lexemes: &mut LexemeStream<'_>) -> ParseResult<Expr> {
    parse_level(lexemes, parse_unary, |op| {
        matches!(op, BinaryOperator::Mul | BinaryOperator::Div | BinaryOperator::Mod)
    })
}

/// Parses one left-associative precedence level.
///
/// Operands come from `operand`, the next tighter level. The loop keeps going
/// while the current lexeme maps to an operator accepted by `accepts`.
fn parse_level(lexemes: &mut LexemeStream<'_>,
               operand: fn(&mut LexemeStream<'_>) -> ParseResult<Expr>,
               accepts: impl Fn(BinaryOperator) -> bool)
               -> ParseResult<Expr> {
    let mut left = operand(lexemes)?;
    loop {
        if let Some(op) = token_to_binary_operator(&lexemes.peek(0)?.token)
           && accepts(op)
        {
            let lexeme = lexemes.advance()?;
            let right = operand(lexemes)?;
            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  lexeme };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Maps a lexeme category to the binary operator it spells, if any.
///
/// # Example
/// ```
/// use clite::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::ShiftLeft), Some(BinaryOperator::ShiftLeft));
/// assert_eq!(token_to_binary_operator(&Token::Assign), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    Some(match token {
             Token::Plus => BinaryOperator::Add,
             Token::Minus => BinaryOperator::Sub,
             Token::Star => BinaryOperator::Mul,
             Token::Slash => BinaryOperator::Div,
             Token::Percent => BinaryOperator::Mod,
             Token::Ampersand => BinaryOperator::BitAnd,
             Token::Pipe => BinaryOperator::BitOr,
             Token::Caret => BinaryOperator::BitXor,
             Token::ShiftLeft => BinaryOperator::ShiftLeft,
             Token::ShiftRight => BinaryOperator::ShiftRight,
             Token::AndAnd => BinaryOperator::And,
             Token::OrOr => BinaryOperator::Or,
             Token::EqualEqual => BinaryOperator::Equal,
             Token::NotEqual => BinaryOperator::NotEqual,
             Token::Less => BinaryOperator::Less,
             Token::LessEqual => BinaryOperator::LessEqual,
             Token::Greater => BinaryOperator::Greater,
             Token::GreaterEqual => BinaryOperator::GreaterEqual,
             _ => return None,
         })
}

/// Determines whether a binary operator belongs to the relational class.
///
/// # Example
/// ```
/// use clite::{ast::BinaryOperator, interpreter::parser::binary::is_relational_op};
///
/// assert!(is_relational_op(BinaryOperator::LessEqual));
/// assert!(!is_relational_op(BinaryOperator::And));
/// ```
#[must_use]
pub const fn is_relational_op(op: BinaryOperator) -> bool {
    matches!(op,
             BinaryOperator::Equal
             | BinaryOperator::NotEqual
             | BinaryOperator::Less
             | BinaryOperator::LessEqual
             | BinaryOperator::Greater
             | BinaryOperator::GreaterEqual)
}
