use crate::{
    ast::{Expr, VariableRef},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
};

impl Interpreter<'_> {
    /// Runs `body` inside a freshly pushed frame.
    ///
    /// The frame is popped on every exit path, including errors and
    /// non-local flow signals, so the chain depth is the same afterwards.
    ///
    /// # Example
    /// ```
    /// use std::io::{Cursor, sink};
    ///
    /// use clite::interpreter::{evaluator::core::Interpreter, value::core::Value};
    ///
    /// let mut input = Cursor::new(Vec::new());
    /// let mut output = sink();
    /// let mut interpreter = Interpreter::new(&mut input, &mut output);
    /// let before = interpreter.scopes.depth();
    ///
    /// let seen = interpreter.in_new_scope(|this| {
    ///                           this.scopes.declare("x", Value::Int(1))?;
    ///                           Ok(this.scopes.depth())
    ///                       });
    ///
    /// assert_eq!(seen.unwrap(), before + 1);
    /// assert_eq!(interpreter.scopes.depth(), before);
    /// assert!(interpreter.scopes.lookup("x").is_err());
    /// ```
    pub fn in_new_scope<T>(&mut self,
                           body: impl FnOnce(&mut Self) -> EvalResult<T>)
                           -> EvalResult<T> {
        self.scopes.push();
        let result = body(self);
        self.scopes.pop();
        result
    }

    /// Evaluates a condition: any non-zero int or float is true.
    ///
    /// # Errors
    /// `MismatchedType` if the condition is not numeric.
    pub fn condition(&mut self, expr: &Expr) -> EvalResult<bool> {
        self.eval(expr)?
            .is_truthy()
            .map_err(|e| e.at(expr.lexeme()))
    }

    /// Evaluates subscripts used to read or write an element.
    ///
    /// # Errors
    /// `OutOfBounds` for an empty subscript, `MismatchedType` for an index
    /// that is not an int.
    pub fn eval_indices(&mut self, indices: &[Option<Expr>]) -> EvalResult<Vec<i64>> {
        indices.iter()
               .map(|index| match index {
                   Some(expr) => {
                       self.eval(expr)?
                           .as_int("array index")
                           .map_err(|e| e.at(expr.lexeme()))
                   },
                   None => Err(RuntimeError::OutOfBounds { details: "missing array index".into(),
                                                           lexeme:  None, }),
               })
               .collect()
    }

    /// Reads a variable, or the element or sub-array its subscripts select.
    ///
    /// The result is a copy; arrays are values.
    ///
    /// # Errors
    /// `IdentifierNotFound` for an undeclared name, plus any indexing error.
    pub fn read_variable(&mut self, variable: &VariableRef) -> EvalResult<Value> {
        let indices = self.eval_indices(&variable.indices)?;
        self.scopes
            .lookup(&variable.name)?
            .at_path(&indices)
            .cloned()
            .map_err(|e| e.at(&variable.lexeme))
    }
}
