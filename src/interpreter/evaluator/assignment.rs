use crate::{
    ast::{AssignOperator, Expr, VariableRef},
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::core::{Value, mismatch},
    },
};

impl Interpreter<'_> {
    /// Executes `target op value`.
    ///
    /// The new value is converted to the type the slot already holds, so
    /// assignment never changes a variable's type. Indexed targets are
    /// updated in place and must select a single element.
    ///
    /// # Errors
    /// `IdentifierNotFound` for an undeclared target, indexing errors, and
    /// `MismatchedType` if the operator or the conversion is not defined for
    /// the slot and the value.
    pub fn exec_assignment(&mut self,
                           target: &VariableRef,
                           op: AssignOperator,
                           value: &Expr)
                           -> EvalResult<()> {
        let rhs = self.eval(value)?;

        if target.indices.is_empty() {
            let current = self.scopes
                              .lookup(&target.name)
                              .map_err(|e| e.at(&target.lexeme))?;
            let updated = assigned_value(current, op, rhs)?;
            return self.scopes.assign(&target.name, updated);
        }

        let indices = self.eval_indices(&target.indices)?;
        let slot = self.scopes
                       .lookup_mut(&target.name)
                       .and_then(|array| array.at_path_mut(&indices))
                       .map_err(|e| e.at(&target.lexeme))?;
        *slot = assigned_value(slot, op, rhs)?;
        Ok(())
    }
}

/// Computes the value stored by `op` into a slot currently holding
/// `current`.
///
/// A compound operator is applied to the slot and `rhs` first, so mixed
/// numeric operands promote as in any binary expression; the result is then
/// converted back to the slot's type.
///
/// # Errors
/// `MismatchedType` if `current` is not a scalar, the operator does not
/// apply, or the result cannot be stored back in `current`'s type.
///
/// # Example
/// ```
/// use clite::{
///     ast::{AssignOperator, BinaryOperator},
///     interpreter::{evaluator::assignment::assigned_value, value::core::Value},
/// };
///
/// let add = AssignOperator::Compound(BinaryOperator::Add);
/// assert_eq!(assigned_value(&Value::Int(5), add, Value::Float(0.5)).unwrap(),
///            Value::Int(5));
/// assert_eq!(assigned_value(&Value::Float(1.0), AssignOperator::Assign, Value::Int(2)).unwrap(),
///            Value::Float(2.0));
/// assert!(assigned_value(&Value::from("a"), add, Value::Int(1)).is_err());
/// ```
pub fn assigned_value(current: &Value, op: AssignOperator, rhs: Value) -> EvalResult<Value> {
    let Some(ty) = current.type_name().filter(|_| current.is_scalar()) else {
        return Err(mismatch(format!("cannot assign to {}", current.describe())));
    };
    let value = match op {
        AssignOperator::Assign => rhs,
        AssignOperator::Compound(op) => Interpreter::eval_binary(op, current, &rhs)?,
    };
    value.coerce_to(ty)
}
