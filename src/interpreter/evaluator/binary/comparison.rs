use std::cmp::Ordering;

use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::{
            binary::core::{numeric_pair, unsupported},
            core::{EvalResult, Interpreter},
        },
        value::core::Value,
    },
};

/// Maps an operator and the ordering of its operands to the result.
///
/// `None` means the operands are unordered (a NaN is involved); only `!=`
/// holds then.
const fn holds(op: BinaryOperator, ordering: Option<Ordering>) -> bool {
    use BinaryOperator::{Equal, Greater, GreaterEqual, Less, LessEqual, NotEqual};

    match ordering {
        None => matches!(op, NotEqual),
        Some(ordering) => match op {
            Equal => ordering.is_eq(),
            NotEqual => ordering.is_ne(),
            Less => ordering.is_lt(),
            LessEqual => ordering.is_le(),
            Greater => ordering.is_gt(),
            GreaterEqual => ordering.is_ge(),
            _ => false,
        },
    }
}

impl Interpreter<'_> {
    /// Evaluates a comparison of the form `Value <Operator> Value`.
    ///
    /// Two ints compare exactly; an int compared with a float is promoted.
    /// Strings support `==` and `!=` only. The result is an int `1` or `0`.
    ///
    /// # Errors
    /// `MismatchedType` for any other operand pair, including a relational
    /// operator on strings.
    ///
    /// # Example
    /// ```
    /// use clite::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    /// };
    ///
    /// let result = Interpreter::eval_comparison(BinaryOperator::GreaterEqual,
    ///                                           &Value::Int(3),
    ///                                           &Value::Float(3.0));
    /// assert_eq!(result.unwrap(), Value::Int(1));
    /// ```
    pub fn eval_comparison(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
        let ordering = match (left, right) {
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Str(a), Value::Str(b))
                if matches!(op, BinaryOperator::Equal | BinaryOperator::NotEqual) =>
            {
                Some(a.cmp(b))
            },
            _ => {
                let Some((a, b)) = numeric_pair(left, right) else {
                    return Err(unsupported(op, left, right));
                };
                a.partial_cmp(&b)
            },
        };
        Ok(Value::from(holds(op, ordering)))
    }
}
