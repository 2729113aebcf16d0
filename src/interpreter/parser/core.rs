use log::debug;

use crate::{
    ast::{Expr, Item, Program},
    error::ParseError,
    interpreter::{
        lexer::{LexemeStream, Token},
        parser::{
            binary::parse_logical,
            function::parse_function,
            statement::parse_declaration,
            utils::{eat, peek_is, skip_bracket_groups},
        },
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a full expression.
///
/// This is the entry point for expression parsing.
/// It begins at the lowest-precedence level, the logical operators, and
/// recursively descends through the precedence hierarchy.
///
/// Grammar: `expression := logical`
///
/// # Parameters
/// - `lexemes`: Lexeme stream positioned at the first lexeme of the
///   expression.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression(lexemes: &mut LexemeStream<'_>) -> ParseResult<Expr> {
    parse_logical(lexemes)
}

/// Parses a whole program.
///
/// A program is a sequence of function declarations and global variable
/// declarations. Both start with a type keyword and a name; the lexeme after
/// the name (and after any `[...]` groups) decides which one follows: `(`
/// starts a function.
///
/// Grammar: `program := (function | declaration ";")* EOF`
///
/// # Errors
/// Returns the first lexical or syntax error met. Parsing is all-or-nothing.
///
/// # Example
/// ```
/// use clite::{ast::Item, interpreter::parser::core::parse_program};
///
/// let program = parse_program("int g = 1; int main() { return g; }").unwrap();
/// assert!(matches!(program.items[0], Item::Global(_)));
/// assert!(matches!(program.items[1], Item::Function(_)));
/// ```
pub fn parse_program(source: &str) -> ParseResult<Program> {
    let mut lexemes = LexemeStream::new(source);
    let mut items = Vec::new();

    while !peek_is(&mut lexemes, 0, &Token::Eof)? {
        let after_name = skip_bracket_groups(&mut lexemes, 2)?;
        if peek_is(&mut lexemes, after_name, &Token::LParen)? {
            items.push(Item::Function(parse_function(&mut lexemes)?));
        } else {
            items.push(Item::Global(parse_declaration(&mut lexemes)?));
            eat(&mut lexemes, &Token::Semicolon)?;
        }
    }

    debug!("parsed {} top-level items", items.len());
    Ok(Program { items })
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;
    use crate::ast::{BinaryOperator, Literal, Statement, TypeName, UnaryOperator};

    fn expression(source: &str) -> Expr {
        let mut lexemes = LexemeStream::new(source);
        let expr = parse_expression(&mut lexemes).unwrap();
        assert_eq!(lexemes.peek(0).unwrap().token, Token::Eof);
        expr
    }

    fn int(expr: &Expr) -> i64 {
        match expr {
            Expr::Literal { value: Literal::Int(v), .. } => *v,
            other => panic!("expected int literal, found {other:?}"),
        }
    }

    fn binary(expr: &Expr) -> (&Expr, BinaryOperator, &Expr) {
        match expr {
            Expr::Binary { left, op, right, .. } => (left, *op, right),
            other => panic!("expected binary expression, found {other:?}"),
        }
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let expr = expression("1 + 2 * 3");
        let (left, op, right) = binary(&expr);
        assert_eq!((int(left), op), (1, BinaryOperator::Add));
        let (l, op, r) = binary(right);
        assert_eq!((int(l), op, int(r)), (2, BinaryOperator::Mul, 3));
    }

    #[test]
    fn same_level_is_left_associative() {
        let expr = expression("8 - 4 - 2");
        let (left, op, right) = binary(&expr);
        assert_eq!((op, int(right)), (BinaryOperator::Sub, 2));
        let (l, _, r) = binary(left);
        assert_eq!((int(l), int(r)), (8, 4));
    }

    #[test]
    fn logical_is_lowest_then_bitwise_then_relational() {
        let expr = expression("1 < 2 & 3 || 4");
        let (left, op, _) = binary(&expr);
        assert_eq!(op, BinaryOperator::Or);
        let (relational, op, _) = binary(left);
        assert_eq!(op, BinaryOperator::BitAnd);
        assert_eq!(binary(relational).1, BinaryOperator::Less);
    }

    #[test]
    fn cast_is_told_apart_from_grouping() {
        assert!(matches!(expression("(float) 3"),
                         Expr::Cast { target: TypeName::Float, .. }));
        assert!(matches!(expression("(x) - 3"),
                         Expr::Binary { op: BinaryOperator::Sub, .. }));
    }

    #[test]
    fn unary_applies_to_the_following_primary() {
        let expr = expression("-a[1] * 2");
        let (left, op, _) = binary(&expr);
        assert_eq!(op, BinaryOperator::Mul);
        assert!(matches!(left, Expr::Unary { op: UnaryOperator::Negate, .. }));
    }

    #[test]
    fn subscripts_and_calls() {
        match expression("grid[i + 1][]") {
            Expr::Variable(var) => {
                assert_eq!(var.name, "grid");
                assert!(var.indices[0].is_some());
                assert!(var.indices[1].is_none());
            },
            other => panic!("unexpected {other:?}"),
        }
        match expression("add(1, f(2))") {
            Expr::Call(call) => assert_eq!(call.arguments.len(), 2),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn program_separates_functions_from_globals() {
        let program = parse_program(indoc! {"
            int counter = 0;
            float table[2][3];
            int f[](int a) { return a; }
            void bump(int by, int list[]) { counter += by; }
            int main() { bump(1, {1}); return counter; }
        "})
        .unwrap();
        assert_eq!(program.items.len(), 5);
        assert!(matches!(program.items[1], Item::Global(_)));
        match &program.items[2] {
            Item::Function(function) => assert_eq!(function.return_dims, 1),
            other => panic!("unexpected {other:?}"),
        }
        match &program.items[3] {
            Item::Function(function) => {
                assert_eq!(function.parameters[1].dims, 1);
                assert_eq!(function.return_type, TypeName::Void);
            },
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn statements_cover_control_flow() {
        let program = parse_program(indoc! {"
            int main() {
                int i;
                for (i = 0; i < 3; i += 1) { if (i == 1) continue; else break; }
                while (i) i -= 1;
                do { ; } while (0);
                return;
            }
        "})
        .unwrap();
        let Item::Function(main) = &program.items[0] else {
            panic!("expected a function");
        };
        let crate::ast::FunctionBody::Block(body) = &main.body else {
            panic!("expected a block body");
        };
        assert!(matches!(body.statements[0], Statement::Declaration(_)));
        assert!(matches!(body.statements[1], Statement::For { .. }));
        assert!(matches!(body.statements[2], Statement::While { .. }));
        assert!(matches!(body.statements[3], Statement::DoWhile { .. }));
        assert!(matches!(body.statements[4], Statement::Return { value: None, .. }));
    }

    #[test]
    fn reparsing_is_deterministic() {
        let source = "int a[2] = {1, 2}; int main() { a[0] <<= (int) 2.5; return a[0]; }";
        assert_eq!(parse_program(source).unwrap(), parse_program(source).unwrap());
    }

    #[test]
    fn errors_name_the_unexpected_lexeme() {
        let err = parse_program("int main() { return 1 }").unwrap_err();
        let found = err.lexeme().unwrap();
        assert_eq!(found.literal, "}");
        assert_eq!((found.line, found.column), (1, 23));

        let err = parse_program("int main() { x + 1; }").unwrap_err();
        assert_eq!(err.lexeme().unwrap().literal, "+");

        assert!(matches!(parse_program("int x = 1 $ 2;").unwrap_err(), ParseError::Lexical(_)));
    }
}
