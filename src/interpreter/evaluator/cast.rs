use crate::{
    ast::TypeName,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::core::{Value, mismatch},
    },
    util::num::{float_to_int, int_to_float},
};

impl Interpreter<'_> {
    /// Evaluates `(target) value`.
    ///
    /// Casts convert between the three scalar types. Numbers convert like
    /// assignment does (a float truncates toward zero), numbers print to
    /// their decimal text, and a string parses its trimmed text as a number.
    ///
    /// # Errors
    /// `MismatchedType` for a string that does not parse, a float outside the
    /// int range, or a non-scalar operand.
    ///
    /// # Example
    /// ```
    /// use clite::{
    ///     ast::TypeName,
    ///     interpreter::{evaluator::core::Interpreter, value::core::Value},
    /// };
    ///
    /// assert_eq!(Interpreter::eval_cast(TypeName::Int, Value::from(" 42 ")).unwrap(),
    ///            Value::Int(42));
    /// assert_eq!(Interpreter::eval_cast(TypeName::String, Value::Float(1.5)).unwrap(),
    ///            Value::from("1.5"));
    /// assert!(Interpreter::eval_cast(TypeName::Float, Value::from("pi")).is_err());
    /// ```
    pub fn eval_cast(target: TypeName, value: Value) -> EvalResult<Value> {
        let unparsable = |text: &str| mismatch(format!("cannot cast '{text}' to {target}"));

        match (target, value) {
            (TypeName::Int, Value::Int(n)) => Ok(Value::Int(n)),
            (TypeName::Int, Value::Float(r)) => {
                float_to_int(r).map(Value::Int)
                               .ok_or_else(|| mismatch(format!("{r} does not fit in an int")))
            },
            (TypeName::Int, Value::Str(s)) => {
                s.trim().parse().map(Value::Int).map_err(|_| unparsable(&s))
            },
            (TypeName::Float, Value::Int(n)) => Ok(Value::Float(int_to_float(n))),
            (TypeName::Float, Value::Float(r)) => Ok(Value::Float(r)),
            (TypeName::Float, Value::Str(s)) => {
                s.trim().parse().map(Value::Float).map_err(|_| unparsable(&s))
            },
            (TypeName::String, value @ (Value::Int(_) | Value::Float(_))) => {
                Ok(Value::Str(value.to_string()))
            },
            (TypeName::String, Value::Str(s)) => Ok(Value::Str(s)),
            (_, value) => Err(mismatch(format!("cannot cast {} to {target}", value.describe()))),
        }
    }
}
