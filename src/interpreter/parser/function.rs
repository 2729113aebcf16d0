use crate::{
    ast::{FunctionBody, FunctionDecl, Parameter},
    interpreter::{
        lexer::{LexemeStream, Token},
        parser::{
            block::parse_block,
            core::ParseResult,
            unary::parse_variable,
            utils::{eat, parse_comma_separated, parse_value_type, token_to_type, unexpected},
        },
    },
};

/// Parses a function declaration.
///
/// Syntax:
/// ```text
///     type name(type param, type list[], ...) { body }
/// ```
/// The return type may be `void`. Subscripts written after the name are
/// counted into `return_dims` so the evaluator can reject them with a precise
/// error instead of a generic syntax error.
///
/// # Errors
/// Reports a malformed signature and propagates body errors.
pub fn parse_function(lexemes: &mut LexemeStream<'_>) -> ParseResult<FunctionDecl> {
    let type_lexeme = lexemes.advance()?;
    let Some(return_type) = token_to_type(&type_lexeme.token) else {
        return Err(unexpected(type_lexeme, "return type"));
    };
    let name = parse_variable(lexemes)?;

    eat(lexemes, &Token::LParen)?;
    let parameters = parse_comma_separated(lexemes, parse_parameter, &Token::RParen)?;
    let body = parse_block(lexemes)?;

    Ok(FunctionDecl { return_type,
                      name: name.name,
                      return_dims: name.indices.len(),
                      parameters,
                      body: FunctionBody::Block(body),
                      lexeme: name.lexeme })
}

/// Parses one `type name[]...` parameter.
///
/// Any expression written inside a parameter's brackets is parsed and
/// ignored; only the number of dimensions is kept.
fn parse_parameter(lexemes: &mut LexemeStream<'_>) -> ParseResult<Parameter> {
    let (ty, _) = parse_value_type(lexemes)?;
    let variable = parse_variable(lexemes)?;

    Ok(Parameter { ty,
                   name: variable.name,
                   dims: variable.indices.len(),
                   lexeme: variable.lexeme })
}
