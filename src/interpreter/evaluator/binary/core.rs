use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::core::{Value, mismatch},
    },
    util::num::int_to_float,
};

impl Interpreter<'_> {
    /// Evaluates a binary operation between two values.
    ///
    /// The operator selects a table (arithmetic, bitwise, comparison or
    /// logic) and the table decides by operand types. There is no fallback:
    /// a pair the table does not list is a type mismatch. When an arithmetic
    /// operator mixes an int and a float, the int is promoted and the result
    /// is a float. Comparison and logical operators yield an int `0` or `1`.
    ///
    /// # Errors
    /// `MismatchedType` for an operand pair the operator does not accept,
    /// `DivisionByZero` and `OutOfBounds` from the arithmetic and shift
    /// tables.
    ///
    /// # Example
    /// ```
    /// use clite::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    /// };
    ///
    /// let sum = Interpreter::eval_binary(BinaryOperator::Add, &Value::Int(1), &Value::Float(0.5));
    /// assert_eq!(sum.unwrap(), Value::Float(1.5));
    ///
    /// let less = Interpreter::eval_binary(BinaryOperator::Less, &Value::Int(1), &Value::Int(2));
    /// assert_eq!(less.unwrap(), Value::Int(1));
    /// ```
    pub fn eval_binary(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
        use BinaryOperator::{
            Add, And, BitAnd, BitOr, BitXor, Div, Equal, Greater, GreaterEqual, Less, LessEqual,
            Mod, Mul, NotEqual, Or, ShiftLeft, ShiftRight, Sub,
        };

        match op {
            Add | Sub | Mul | Div | Mod => Self::eval_arithmetic(op, left, right),
            BitAnd | BitOr | BitXor | ShiftLeft | ShiftRight => {
                Self::eval_bitwise(op, left, right)
            },
            Equal | NotEqual | Less | LessEqual | Greater | GreaterEqual => {
                Self::eval_comparison(op, left, right)
            },
            And | Or => Self::eval_logic(op, left, right),
        }
    }
}

/// Both operands as floats, when both are numeric.
pub(super) fn numeric_pair(left: &Value, right: &Value) -> Option<(f64, f64)> {
    match (left, right) {
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            Some((as_float(left), as_float(right)))
        },
        _ => None,
    }
}

fn as_float(value: &Value) -> f64 {
    match value {
        Value::Int(n) => int_to_float(*n),
        Value::Float(r) => *r,
        _ => f64::NAN,
    }
}

/// The error for an operand pair missing from an operator's table.
pub(super) fn unsupported(op: BinaryOperator, left: &Value, right: &Value) -> RuntimeError {
    mismatch(format!("operator '{op}' is not defined for {} and {}",
                     left.describe(),
                     right.describe()))
}
