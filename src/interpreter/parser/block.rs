use crate::{
    ast::Block,
    interpreter::{
        lexer::{LexemeStream, Token},
        parser::{
            core::ParseResult,
            statement::parse_statement,
            utils::{eat, peek_is, unexpected},
        },
    },
};

/// Parses a block delimited by braces.
///
/// A block consists of zero or more statements. Parsing continues until a
/// closing `}` is encountered; running into the end of input first is an
/// error reported at the end-of-input lexeme.
///
/// Grammar: `block := "{" statement* "}"`
///
/// # Parameters
/// - `lexemes`: Lexeme stream positioned at the opening brace.
///
/// # Returns
/// A [`Block`] holding all parsed statements and the opening brace.
pub fn parse_block(lexemes: &mut LexemeStream<'_>) -> ParseResult<Block> {
    let lexeme = eat(lexemes, &Token::LBrace)?;
    let mut statements = Vec::new();

    loop {
        if peek_is(lexemes, 0, &Token::RBrace)? {
            lexemes.advance()?;
            break;
        }
        if peek_is(lexemes, 0, &Token::Eof)? {
            return Err(unexpected(lexemes.advance()?, Token::RBrace.to_string()));
        }
        statements.push(parse_statement(lexemes)?);
    }

    Ok(Block { statements, lexeme })
}
