use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            binary::core::unsupported,
            core::{EvalResult, Interpreter},
        },
        value::core::Value,
    },
    util::num::shift_amount,
};

impl Interpreter<'_> {
    /// Evaluates `&`, `|`, `^`, `<<` and `>>` on two ints.
    ///
    /// `>>` is an arithmetic shift, so negative values keep their sign.
    ///
    /// # Errors
    /// `OutOfBounds` for a shift count outside `0..64`, `MismatchedType` if
    /// either operand is not an int.
    ///
    /// # Example
    /// ```
    /// use clite::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    /// };
    ///
    /// let v = Interpreter::eval_bitwise(BinaryOperator::ShiftLeft, &Value::Int(1), &Value::Int(4));
    /// assert_eq!(v.unwrap(), Value::Int(16));
    /// ```
    pub fn eval_bitwise(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
        let (Value::Int(a), Value::Int(b)) = (left, right) else {
            return Err(unsupported(op, left, right));
        };
        let shift = || {
            shift_amount(*b).ok_or_else(|| RuntimeError::OutOfBounds {
                                details: format!("shift count {b} outside 0..64"),
                                lexeme:  None,
                            })
        };

        let result = match op {
            BinaryOperator::BitAnd => a & b,
            BinaryOperator::BitOr => a | b,
            BinaryOperator::BitXor => a ^ b,
            BinaryOperator::ShiftLeft => a.wrapping_shl(shift()?),
            BinaryOperator::ShiftRight => a.wrapping_shr(shift()?),
            _ => return Err(unsupported(op, left, right)),
        };
        Ok(Value::Int(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shifts_are_range_checked() {
        let shr = Interpreter::eval_bitwise(BinaryOperator::ShiftRight,
                                            &Value::Int(-16),
                                            &Value::Int(2));
        assert_eq!(shr.unwrap(), Value::Int(-4));

        for count in [-1, 64] {
            assert!(matches!(Interpreter::eval_bitwise(BinaryOperator::ShiftLeft,
                                                       &Value::Int(1),
                                                       &Value::Int(count)),
                             Err(RuntimeError::OutOfBounds { .. })));
        }
    }

    #[test]
    fn floats_have_no_bitwise_operators() {
        assert!(matches!(Interpreter::eval_bitwise(BinaryOperator::BitAnd,
                                                   &Value::Float(1.0),
                                                   &Value::Int(1)),
                         Err(RuntimeError::MismatchedType { .. })));
    }
}
