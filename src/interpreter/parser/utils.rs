use std::mem::discriminant;

use crate::{
    ast::{Expr, TypeName},
    error::ParseError,
    interpreter::{
        lexer::{Lexeme, LexemeStream, Token},
        parser::core::{ParseResult, parse_expression},
    },
};

/// Builds the error raised when `found` does not fit the grammar.
pub(in crate::interpreter::parser) fn unexpected(found: Lexeme, expected: impl Into<String>)
                                                 -> ParseError {
    ParseError::UnexpectedLexeme { found,
                                   expected: expected.into() }
}

/// Returns `true` if the lexeme `n` positions ahead has the same category as
/// `expected`. Literal payloads are ignored.
pub(in crate::interpreter::parser) fn peek_is(lexemes: &mut LexemeStream<'_>,
                                              n: usize,
                                              expected: &Token)
                                              -> ParseResult<bool> {
    Ok(discriminant(&lexemes.peek(n)?.token) == discriminant(expected))
}

/// Consumes the current lexeme if its category matches `expected`.
///
/// This is the parser's one-token `eat`: on a match the lexeme is returned
/// and the stream advances; otherwise nothing is consumed and an error naming
/// the unexpected lexeme is returned.
///
/// # Errors
/// `UnexpectedLexeme` if the current lexeme is of another category.
pub(in crate::interpreter::parser) fn eat(lexemes: &mut LexemeStream<'_>,
                                          expected: &Token)
                                          -> ParseResult<Lexeme> {
    if peek_is(lexemes, 0, expected)? {
        return Ok(lexemes.advance()?);
    }
    Err(unexpected(lexemes.advance()?, expected.to_string()))
}

/// Parses a plain identifier and returns its name with the lexeme.
///
/// # Errors
/// `UnexpectedLexeme` if the current lexeme is not an identifier.
pub(in crate::interpreter::parser) fn parse_identifier(lexemes: &mut LexemeStream<'_>)
                                                       -> ParseResult<(String, Lexeme)> {
    let lexeme = lexemes.advance()?;
    match &lexeme.token {
        Token::Identifier(name) => Ok((name.clone(), lexeme)),
        _ => Err(unexpected(lexeme, "identifier")),
    }
}

/// Maps a type keyword to its [`TypeName`], or `None` for any other token.
#[must_use]
pub const fn token_to_type(token: &Token) -> Option<TypeName> {
    match token {
        Token::Int => Some(TypeName::Int),
        Token::Float => Some(TypeName::Float),
        Token::String => Some(TypeName::String),
        Token::Void => Some(TypeName::Void),
        _ => None,
    }
}

/// Parses one of `int`, `float` or `string`.
///
/// # Errors
/// `UnexpectedLexeme` for any other lexeme, including `void`.
pub(in crate::interpreter::parser) fn parse_value_type(lexemes: &mut LexemeStream<'_>)
                                                       -> ParseResult<(TypeName, Lexeme)> {
    let lexeme = lexemes.advance()?;
    match token_to_type(&lexeme.token) {
        Some(ty) if ty != TypeName::Void => Ok((ty, lexeme)),
        _ => Err(unexpected(lexeme, "'int', 'float' or 'string'")),
    }
}

/// Parses a comma-separated list of items until a closing token.
///
/// An immediately encountered closing token produces an empty list. The
/// closing token is consumed.
///
/// Grammar (simplified): `list := (item ("," item)*)? closing`
///
/// # Parameters
/// - `lexemes`: Stream positioned at the first item or closing token.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token that terminates the list (e.g., `)` or `}`).
///
/// # Errors
/// Propagates item errors, and reports anything other than `,` or `closing`
/// after an item.
pub(in crate::interpreter::parser) fn parse_comma_separated<T>(
    lexemes: &mut LexemeStream<'_>,
    parse_item: impl Fn(&mut LexemeStream<'_>) -> ParseResult<T>,
    closing: &Token)
    -> ParseResult<Vec<T>> {
    let mut items = Vec::new();
    if peek_is(lexemes, 0, closing)? {
        lexemes.advance()?;
        return Ok(items);
    }
    loop {
        items.push(parse_item(lexemes)?);
        let lexeme = lexemes.advance()?;
        match &lexeme.token {
            Token::Comma => {},
            token if token == closing => break,
            _ => return Err(unexpected(lexeme, format!("',' or {closing}"))),
        }
    }
    Ok(items)
}

/// Parses any number of `[expr]` or `[]` subscripts.
///
/// Empty brackets produce `None`.
pub(in crate::interpreter::parser) fn parse_subscripts(lexemes: &mut LexemeStream<'_>)
                                                       -> ParseResult<Vec<Option<Expr>>> {
    let mut indices = Vec::new();
    while peek_is(lexemes, 0, &Token::LBracket)? {
        lexemes.advance()?;
        if peek_is(lexemes, 0, &Token::RBracket)? {
            indices.push(None);
        } else {
            indices.push(Some(parse_expression(lexemes)?));
        }
        eat(lexemes, &Token::RBracket)?;
    }
    Ok(indices)
}

/// Returns the offset just past a run of bracket groups starting `start`
/// lexemes ahead, so callers can look beyond `name[...][...]`.
pub(in crate::interpreter::parser) fn skip_bracket_groups(lexemes: &mut LexemeStream<'_>,
                                                          start: usize)
                                                          -> ParseResult<usize> {
    let mut offset = start;
    while peek_is(lexemes, offset, &Token::LBracket)? {
        let mut depth = 0usize;
        loop {
            match lexemes.peek(offset)?.token {
                Token::LBracket => depth += 1,
                Token::RBracket => depth -= 1,
                Token::Eof => return Ok(offset),
                _ => {},
            }
            offset += 1;
            if depth == 0 {
                break;
            }
        }
    }
    Ok(offset)
}
