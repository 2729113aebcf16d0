use crate::{
    ast::{Call, Expr, Literal, UnaryOperator, VariableRef},
    interpreter::{
        lexer::{LexemeStream, Token},
        parser::{
            core::{ParseResult, parse_expression},
            utils::{
                eat, parse_comma_separated, parse_identifier, parse_subscripts, parse_value_type,
                peek_is, token_to_type, unexpected,
            },
        },
    },
};

/// Parses a unary expression.
///
/// Prefix operators `-`, `~` and `!` apply to the unary expression that
/// follows them, so `--x` and `!-x` nest. Anything else is a primary.
///
/// Grammar: `unary := ("-" | "~" | "!") unary | primary`
///
/// # Errors
/// Propagates errors from the operand.
pub fn parse_unary(lexemes: &mut LexemeStream<'_>) -> ParseResult<Expr> {
    let op = match lexemes.peek(0)?.token {
        Token::Minus => UnaryOperator::Negate,
        Token::Tilde => UnaryOperator::BitNot,
        Token::Bang => UnaryOperator::Not,
        _ => return parse_primary(lexemes),
    };
    let lexeme = lexemes.advance()?;
    let operand = parse_unary(lexemes)?;

    Ok(Expr::Unary { op,
                     operand: Box::new(operand),
                     lexeme })
}

/// Parses a primary expression.
///
/// Primary expressions include:
/// - int, float and string literals,
/// - casts `(type) unary`, recognised by a type keyword right after `(`,
/// - parenthesized expressions,
/// - initializer lists `{ ... }`,
/// - function calls `name(args)`,
/// - variable references with optional subscripts.
///
/// # Errors
/// `UnexpectedLexeme` if the current lexeme cannot start an expression.
pub fn parse_primary(lexemes: &mut LexemeStream<'_>) -> ParseResult<Expr> {
    let value = match &lexemes.peek(0)?.token {
        Token::IntLiteral(v) => Some(Literal::Int(*v)),
        Token::FloatLiteral(v) => Some(Literal::Float(*v)),
        Token::StringLiteral(s) => Some(Literal::Str(s.clone())),
        _ => None,
    };
    if let Some(value) = value {
        let lexeme = lexemes.advance()?;
        return Ok(Expr::Literal { value, lexeme });
    }

    match lexemes.peek(0)?.token {
        Token::LParen => {
            if token_to_type(&lexemes.peek(1)?.token).is_some() {
                parse_cast(lexemes)
            } else {
                lexemes.advance()?;
                let inner = parse_expression(lexemes)?;
                eat(lexemes, &Token::RParen)?;
                Ok(inner)
            }
        },
        Token::LBrace => parse_initializer_list(lexemes),
        Token::Identifier(_) => {
            if peek_is(lexemes, 1, &Token::LParen)? {
                Ok(Expr::Call(parse_call(lexemes)?))
            } else {
                Ok(Expr::Variable(parse_variable(lexemes)?))
            }
        },
        _ => Err(unexpected(lexemes.advance()?, "expression")),
    }
}

/// Parses a cast `(type) operand`.
///
/// The operand is a unary expression, so `(int) x + 1` casts only `x`.
/// `void` is rejected as a cast target.
fn parse_cast(lexemes: &mut LexemeStream<'_>) -> ParseResult<Expr> {
    let lexeme = eat(lexemes, &Token::LParen)?;
    let (target, _) = parse_value_type(lexemes)?;
    eat(lexemes, &Token::RParen)?;
    let operand = parse_unary(lexemes)?;

    Ok(Expr::Cast { target,
                    operand: Box::new(operand),
                    lexeme })
}

/// Parses an initializer list of the form `{ expr1, expr2, ..., exprN }`.
///
/// Elements are arbitrary expressions, including nested lists.
///
/// Grammar: `list := "{" (expression ("," expression)*)? "}"`
///
/// # Errors
/// Propagates element errors and reports a missing `}`.
pub fn parse_initializer_list(lexemes: &mut LexemeStream<'_>) -> ParseResult<Expr> {
    let lexeme = eat(lexemes, &Token::LBrace)?;
    let elements = parse_comma_separated(lexemes, parse_expression, &Token::RBrace)?;

    Ok(Expr::InitializerList { elements, lexeme })
}

/// Parses a variable reference: an identifier followed by any number of
/// `[index]` or `[]` subscripts.
///
/// # Errors
/// `UnexpectedLexeme` if the current lexeme is not an identifier.
pub fn parse_variable(lexemes: &mut LexemeStream<'_>) -> ParseResult<VariableRef> {
    let (name, lexeme) = parse_identifier(lexemes)?;
    let indices = parse_subscripts(lexemes)?;

    Ok(VariableRef { name,
                     indices,
                     lexeme })
}

/// Parses a function call `name(arg, ...)`.
///
/// # Errors
/// Reports a missing `(` or `)` and propagates argument errors.
pub fn parse_call(lexemes: &mut LexemeStream<'_>) -> ParseResult<Call> {
    let (name, lexeme) = parse_identifier(lexemes)?;
    eat(lexemes, &Token::LParen)?;
    let arguments = parse_comma_separated(lexemes, parse_expression, &Token::RParen)?;

    Ok(Call { name,
              arguments,
              lexeme })
}
