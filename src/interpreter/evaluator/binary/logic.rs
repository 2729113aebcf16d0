use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::{
            binary::core::unsupported,
            core::{EvalResult, Interpreter},
        },
        value::core::Value,
    },
};

impl Interpreter<'_> {
    /// Evaluates `&&` and `||`.
    ///
    /// Both operands are already evaluated; there is no short-circuit.
    /// Numbers are true when non-zero.
    ///
    /// # Errors
    /// `MismatchedType` if either operand is not numeric.
    ///
    /// # Example
    /// ```
    /// use clite::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    /// };
    ///
    /// let result = Interpreter::eval_logic(BinaryOperator::Or, &Value::Int(0), &Value::Float(0.5));
    /// assert_eq!(result.unwrap(), Value::Int(1));
    /// ```
    pub fn eval_logic(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
        let (Ok(a), Ok(b)) = (left.is_truthy(), right.is_truthy()) else {
            return Err(unsupported(op, left, right));
        };

        match op {
            BinaryOperator::And => Ok(Value::from(a && b)),
            BinaryOperator::Or => Ok(Value::from(a || b)),
            _ => Err(unsupported(op, left, right)),
        }
    }
}
