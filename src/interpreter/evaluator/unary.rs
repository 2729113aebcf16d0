use crate::{
    ast::UnaryOperator,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::core::{Value, mismatch},
    },
};

impl Interpreter<'_> {
    /// Evaluates a unary operation on a value.
    ///
    /// Supported operators:
    /// - `Negate`: arithmetic negation of an int (wrapping) or a float.
    /// - `Not`: logical negation of an int or a float, yielding `0` or `1`.
    /// - `BitNot`: bitwise complement of an int.
    ///
    /// # Errors
    /// `MismatchedType` for any other operand type.
    ///
    /// # Example
    /// ```
    /// use clite::{
    ///     ast::UnaryOperator,
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    /// };
    ///
    /// let v = Interpreter::eval_unary(UnaryOperator::Negate, &Value::Float(2.5)).unwrap();
    /// assert_eq!(v, Value::Float(-2.5));
    ///
    /// let v = Interpreter::eval_unary(UnaryOperator::Not, &Value::Int(7)).unwrap();
    /// assert_eq!(v, Value::Int(0));
    ///
    /// assert!(Interpreter::eval_unary(UnaryOperator::BitNot, &Value::Float(1.0)).is_err());
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: &Value) -> EvalResult<Value> {
        match (op, value) {
            (UnaryOperator::Negate, Value::Int(n)) => Ok(Value::Int(n.wrapping_neg())),
            (UnaryOperator::Negate, Value::Float(r)) => Ok(Value::Float(-r)),
            (UnaryOperator::Not, Value::Int(n)) => Ok(Value::from(*n == 0)),
            (UnaryOperator::Not, Value::Float(r)) => Ok(Value::from(*r == 0.0)),
            (UnaryOperator::BitNot, Value::Int(n)) => Ok(Value::Int(!n)),
            _ => Err(mismatch(format!("operator '{op}' is not defined for {}",
                                      value.describe()))),
        }
    }
}
