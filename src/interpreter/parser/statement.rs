use crate::{
    ast::{AssignOperator, BinaryOperator, Declaration, Expr, Statement},
    interpreter::{
        lexer::{LexemeStream, Token},
        parser::{
            block::parse_block,
            core::{ParseResult, parse_expression},
            unary::{parse_call, parse_variable},
            utils::{eat, parse_value_type, peek_is, unexpected},
        },
    },
};

/// Parses a single statement.
///
/// Control-flow statements start with their keyword; a `{` starts a block; a
/// lone `;` is an empty statement. Everything else is a simple statement
/// (declaration, assignment or call) terminated by `;`.
///
/// Grammar:
/// ```text
/// statement := block | if | for | while | do_while
///            | "break" ";" | "continue" ";" | "return" expression? ";"
///            | ";" | simple ";"
/// ```
///
/// # Errors
/// Propagates errors from the specific statement parser.
pub fn parse_statement(lexemes: &mut LexemeStream<'_>) -> ParseResult<Statement> {
    match lexemes.peek(0)?.token {
        Token::LBrace => Ok(Statement::Block(parse_block(lexemes)?)),
        Token::If => parse_if(lexemes),
        Token::For => parse_for(lexemes),
        Token::While => parse_while(lexemes),
        Token::Do => parse_do_while(lexemes),
        Token::Break => {
            let lexeme = lexemes.advance()?;
            eat(lexemes, &Token::Semicolon)?;
            Ok(Statement::Break(lexeme))
        },
        Token::Continue => {
            let lexeme = lexemes.advance()?;
            eat(lexemes, &Token::Semicolon)?;
            Ok(Statement::Continue(lexeme))
        },
        Token::Return => parse_return(lexemes),
        Token::Semicolon => {
            lexemes.advance()?;
            Ok(Statement::Empty)
        },
        _ => {
            let statement = parse_simple_statement(lexemes)?;
            eat(lexemes, &Token::Semicolon)?;
            Ok(statement)
        },
    }
}

/// Parses a declaration, assignment or call without its trailing `;`.
///
/// These are the statements allowed in the init and increment clauses of a
/// `for` loop. An identifier followed by `(` is a call, any other identifier
/// starts an assignment, and a value type keyword starts a declaration.
///
/// # Errors
/// `UnexpectedLexeme` if the current lexeme starts none of the three.
pub fn parse_simple_statement(lexemes: &mut LexemeStream<'_>) -> ParseResult<Statement> {
    if peek_is(lexemes, 0, &Token::Identifier(String::new()))? {
        return if peek_is(lexemes, 1, &Token::LParen)? {
            Ok(Statement::Call(parse_call(lexemes)?))
        } else {
            parse_assignment(lexemes)
        };
    }
    if lexemes.peek(0)?.token.is_value_type() {
        return Ok(Statement::Declaration(parse_declaration(lexemes)?));
    }
    Err(unexpected(lexemes.advance()?, "statement"))
}

/// Parses `type name[dims] (= expression)?` without the trailing `;`.
///
/// Dimension subscripts may be empty (`int a[] = {1, 2};`) when an
/// initializer supplies the size.
///
/// # Errors
/// Reports a missing type keyword, identifier, or `=` before the initializer.
pub fn parse_declaration(lexemes: &mut LexemeStream<'_>) -> ParseResult<Declaration> {
    let (ty, _) = parse_value_type(lexemes)?;
    let target = parse_variable(lexemes)?;
    let initializer = if peek_is(lexemes, 0, &Token::Assign)? {
        lexemes.advance()?;
        Some(parse_expression(lexemes)?)
    } else {
        None
    };

    Ok(Declaration { ty,
                     target,
                     initializer })
}

/// Parses `target op expression` where `op` is `=` or a compound assignment.
fn parse_assignment(lexemes: &mut LexemeStream<'_>) -> ParseResult<Statement> {
    let target = parse_variable(lexemes)?;
    let lexeme = lexemes.advance()?;
    let Some(op) = token_to_assign_operator(&lexeme.token) else {
        return Err(unexpected(lexeme, "assignment operator"));
    };
    let value = parse_expression(lexemes)?;

    Ok(Statement::Assignment { target,
                               op,
                               value,
                               lexeme })
}

/// Maps an assignment lexeme to its operator.
#[must_use]
pub const fn token_to_assign_operator(token: &Token) -> Option<AssignOperator> {
    let op = match token {
        Token::Assign => return Some(AssignOperator::Assign),
        Token::PlusAssign => BinaryOperator::Add,
        Token::MinusAssign => BinaryOperator::Sub,
        Token::StarAssign => BinaryOperator::Mul,
        Token::SlashAssign => BinaryOperator::Div,
        Token::PercentAssign => BinaryOperator::Mod,
        Token::AmpersandAssign => BinaryOperator::BitAnd,
        Token::PipeAssign => BinaryOperator::BitOr,
        Token::CaretAssign => BinaryOperator::BitXor,
        Token::ShiftLeftAssign => BinaryOperator::ShiftLeft,
        Token::ShiftRightAssign => BinaryOperator::ShiftRight,
        _ => return None,
    };
    Some(AssignOperator::Compound(op))
}

/// Parses an `if` statement with any number of `else if` branches and an
/// optional `else`.
///
/// Syntax:
/// ```text
///     if (<condition>) <statement>
///     else if (<condition>) <statement>
///     else <statement>
/// ```
///
/// # Errors
/// Reports missing parentheses and propagates branch errors.
pub fn parse_if(lexemes: &mut LexemeStream<'_>) -> ParseResult<Statement> {
    let lexeme = eat(lexemes, &Token::If)?;
    let mut branches = vec![parse_conditional_branch(lexemes)?];
    let mut otherwise = None;

    while peek_is(lexemes, 0, &Token::Else)? {
        lexemes.advance()?;
        if peek_is(lexemes, 0, &Token::If)? {
            lexemes.advance()?;
            branches.push(parse_conditional_branch(lexemes)?);
        } else {
            otherwise = Some(Box::new(parse_statement(lexemes)?));
            break;
        }
    }

    Ok(Statement::If { branches,
                       otherwise,
                       lexeme })
}

fn parse_conditional_branch(lexemes: &mut LexemeStream<'_>)
                            -> ParseResult<(Expr, Statement)> {
    let condition = parse_parenthesized(lexemes)?;
    let body = parse_statement(lexemes)?;
    Ok((condition, body))
}

fn parse_parenthesized(lexemes: &mut LexemeStream<'_>) -> ParseResult<Expr> {
    eat(lexemes, &Token::LParen)?;
    let expr = parse_expression(lexemes)?;
    eat(lexemes, &Token::RParen)?;
    Ok(expr)
}

/// Parses `for (init; condition; increment) body`.
///
/// The init and increment clauses are simple statements and may be left
/// empty; the condition is required.
///
/// # Errors
/// Reports a malformed header and propagates clause and body errors.
pub fn parse_for(lexemes: &mut LexemeStream<'_>) -> ParseResult<Statement> {
    let lexeme = eat(lexemes, &Token::For)?;
    eat(lexemes, &Token::LParen)?;

    let init = if peek_is(lexemes, 0, &Token::Semicolon)? {
        None
    } else {
        Some(Box::new(parse_simple_statement(lexemes)?))
    };
    eat(lexemes, &Token::Semicolon)?;

    let condition = parse_expression(lexemes)?;
    eat(lexemes, &Token::Semicolon)?;

    let increment = if peek_is(lexemes, 0, &Token::RParen)? {
        None
    } else {
        Some(Box::new(parse_simple_statement(lexemes)?))
    };
    eat(lexemes, &Token::RParen)?;

    let body = parse_statement(lexemes)?;

    Ok(Statement::For { init,
                        condition,
                        increment,
                        body: Box::new(body),
                        lexeme })
}

/// Parses `while (condition) body`.
pub fn parse_while(lexemes: &mut LexemeStream<'_>) -> ParseResult<Statement> {
    let lexeme = eat(lexemes, &Token::While)?;
    let condition = parse_parenthesized(lexemes)?;
    let body = parse_statement(lexemes)?;

    Ok(Statement::While { condition,
                          body: Box::new(body),
                          lexeme })
}

/// Parses `do body while (condition);`.
pub fn parse_do_while(lexemes: &mut LexemeStream<'_>) -> ParseResult<Statement> {
    let lexeme = eat(lexemes, &Token::Do)?;
    let body = parse_statement(lexemes)?;
    eat(lexemes, &Token::While)?;
    let condition = parse_parenthesized(lexemes)?;
    eat(lexemes, &Token::Semicolon)?;

    Ok(Statement::DoWhile { body: Box::new(body),
                            condition,
                            lexeme })
}

/// Parses `return;` or `return expression;`.
fn parse_return(lexemes: &mut LexemeStream<'_>) -> ParseResult<Statement> {
    let lexeme = eat(lexemes, &Token::Return)?;
    let value = if peek_is(lexemes, 0, &Token::Semicolon)? {
        None
    } else {
        Some(parse_expression(lexemes)?)
    };
    eat(lexemes, &Token::Semicolon)?;

    Ok(Statement::Return { value, lexeme })
}
