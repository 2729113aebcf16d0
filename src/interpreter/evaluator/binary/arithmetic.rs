use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            binary::core::{numeric_pair, unsupported},
            core::{EvalResult, Interpreter},
        },
        value::core::Value,
    },
};

fn division_by_zero() -> RuntimeError {
    RuntimeError::DivisionByZero { lexeme: None }
}

impl Interpreter<'_> {
    /// Evaluates `+`, `-`, `*`, `/` and `%`.
    ///
    /// Int arithmetic wraps on overflow. Int `/` truncates toward zero,
    /// while `%` is floored: a non-zero remainder has the divisor's sign.
    /// `%` is defined for ints only. Strings support `+` only, as
    /// concatenation.
    ///
    /// # Errors
    /// `DivisionByZero` for a zero divisor of either numeric type,
    /// `MismatchedType` for any other operand pair.
    pub fn eval_arithmetic(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
        match (left, right) {
            (Value::Int(a), Value::Int(b)) => int_arithmetic(op, *a, *b),
            (Value::Str(a), Value::Str(b)) if op == BinaryOperator::Add => {
                Ok(Value::Str(format!("{a}{b}")))
            },
            _ => match numeric_pair(left, right) {
                Some((a, b)) if op != BinaryOperator::Mod => float_arithmetic(op, a, b),
                _ => Err(unsupported(op, left, right)),
            },
        }
    }
}

fn int_arithmetic(op: BinaryOperator, a: i64, b: i64) -> EvalResult<Value> {
    let result = match op {
        BinaryOperator::Add => a.wrapping_add(b),
        BinaryOperator::Sub => a.wrapping_sub(b),
        BinaryOperator::Mul => a.wrapping_mul(b),
        BinaryOperator::Div | BinaryOperator::Mod if b == 0 => return Err(division_by_zero()),
        BinaryOperator::Div => a.wrapping_div(b),
        BinaryOperator::Mod => floored_rem(a, b),
        _ => return Err(unsupported(op, &Value::Int(a), &Value::Int(b))),
    };
    Ok(Value::Int(result))
}

/// Remainder whose sign follows the divisor, so `-7 % 2 == 1`.
const fn floored_rem(a: i64, b: i64) -> i64 {
    let r = a.wrapping_rem(b);
    if r != 0 && (r < 0) != (b < 0) {
        r + b
    } else {
        r
    }
}

fn float_arithmetic(op: BinaryOperator, a: f64, b: f64) -> EvalResult<Value> {
    let result = match op {
        BinaryOperator::Add => a + b,
        BinaryOperator::Sub => a - b,
        BinaryOperator::Mul => a * b,
        BinaryOperator::Div if b == 0.0 => return Err(division_by_zero()),
        BinaryOperator::Div => a / b,
        _ => return Err(unsupported(op, &Value::Float(a), &Value::Float(b))),
    };
    Ok(Value::Float(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arith(op: BinaryOperator, left: Value, right: Value) -> EvalResult<Value> {
        Interpreter::eval_arithmetic(op, &left, &right)
    }

    #[test]
    fn int_division_truncates_toward_zero() {
        assert_eq!(arith(BinaryOperator::Div, Value::Int(-7), Value::Int(2)).unwrap(),
                   Value::Int(-3));
        assert_eq!(arith(BinaryOperator::Div, Value::Int(7), Value::Int(-2)).unwrap(),
                   Value::Int(-3));
    }

    #[test]
    fn remainder_takes_the_sign_of_the_divisor() {
        let rem = |a, b| arith(BinaryOperator::Mod, Value::Int(a), Value::Int(b)).unwrap();

        assert_eq!(rem(-7, 2), Value::Int(1));
        assert_eq!(rem(7, -2), Value::Int(-1));
        assert_eq!(rem(-7, -2), Value::Int(-1));
        assert_eq!(rem(7, 2), Value::Int(1));
        assert_eq!(rem(-6, 3), Value::Int(0));
        assert_eq!(rem(i64::MIN, -1), Value::Int(0));
    }

    #[test]
    fn mixed_operands_promote_to_float() {
        assert_eq!(arith(BinaryOperator::Mul, Value::Int(3), Value::Float(0.5)).unwrap(),
                   Value::Float(1.5));
        assert_eq!(arith(BinaryOperator::Div, Value::Float(1.0), Value::Int(4)).unwrap(),
                   Value::Float(0.25));
    }

    #[test]
    fn zero_divisors_are_errors() {
        assert!(matches!(arith(BinaryOperator::Div, Value::Int(1), Value::Int(0)),
                         Err(RuntimeError::DivisionByZero { .. })));
        assert!(matches!(arith(BinaryOperator::Mod, Value::Int(1), Value::Int(0)),
                         Err(RuntimeError::DivisionByZero { .. })));
        assert!(matches!(arith(BinaryOperator::Div, Value::Float(1.0), Value::Int(0)),
                         Err(RuntimeError::DivisionByZero { .. })));
    }

    #[test]
    fn overflow_wraps() {
        assert_eq!(arith(BinaryOperator::Add, Value::Int(i64::MAX), Value::Int(1)).unwrap(),
                   Value::Int(i64::MIN));
    }

    #[test]
    fn strings_only_concatenate() {
        assert_eq!(arith(BinaryOperator::Add, Value::from("ab"), Value::from("c")).unwrap(),
                   Value::from("abc"));
        assert!(matches!(arith(BinaryOperator::Sub, Value::from("a"), Value::from("b")),
                         Err(RuntimeError::MismatchedType { .. })));
        assert!(arith(BinaryOperator::Add, Value::from("a"), Value::Int(1)).is_err());
        assert!(arith(BinaryOperator::Mod, Value::Float(5.0), Value::Int(2)).is_err());
    }
}
