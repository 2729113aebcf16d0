use std::rc::Rc;

use log::trace;

use crate::{
    ast::{Call, FunctionBody, FunctionDecl, Parameter, TypeName},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Flow, Interpreter},
            function::builtin::run_builtin,
        },
        value::core::Value,
    },
};

impl Interpreter<'_> {
    /// Evaluates a function call.
    ///
    /// The callee is looked up like any other name. Arguments are evaluated
    /// left to right in the caller's scope and then checked against the
    /// parameters; nothing in the callee runs unless every argument fits.
    ///
    /// # Errors
    /// - `IdentifierNotFound` for an undeclared callee.
    /// - `MismatchedType` if the name is bound to something other than a
    ///   function, or the result does not match the declared return type.
    /// - `MismatchedArguments` for a wrong argument count or type.
    /// - Anything raised while running the body.
    pub fn call_function(&mut self, call: &Call) -> EvalResult<Value> {
        let callee = match self.scopes.lookup(&call.name).map_err(|e| e.at(&call.lexeme))? {
            Value::Function(function) => Rc::clone(function),
            other => {
                return Err(RuntimeError::MismatchedType { details: format!("'{}' is {}, not a \
                                                                            function",
                                                                           call.name,
                                                                           other.describe()),
                                                          lexeme:  Some(call.lexeme.clone()), });
            },
        };

        let arguments = call.arguments
                            .iter()
                            .map(|argument| self.eval(argument))
                            .collect::<EvalResult<Vec<_>>>()?;
        check_arguments(&callee, &arguments).map_err(|e| e.at(&call.lexeme))?;

        self.invoke(&callee, arguments).map_err(|e| e.at(&call.lexeme))
    }

    /// Runs `function` with already checked arguments in an isolated frame.
    ///
    /// The callee sees the root frame and its own parameters only. The frame
    /// is dropped and the caller's chain restored on every exit path.
    ///
    /// # Errors
    /// - `BreakOrContinueWithoutLoop` if a `break` or `continue` escapes the
    ///   body.
    /// - `MismatchedType` if the result does not match the return type.
    /// - Anything raised while running the body.
    pub fn invoke(&mut self, function: &FunctionDecl, arguments: Vec<Value>) -> EvalResult<Value> {
        trace!("calling '{}' with {} argument(s)", function.name, arguments.len());

        self.scopes.enter_call();
        let flow = self.run_body(function, arguments);
        self.scopes.exit_call();

        let result = match flow? {
            Flow::Normal => Value::Void,
            Flow::Return(value, _) => value,
            Flow::Break(lexeme) | Flow::Continue(lexeme) => {
                return Err(RuntimeError::BreakOrContinueWithoutLoop { lexeme: Some(lexeme) });
            },
        };
        trace!("'{}' returned {}", function.name, result.describe());

        check_return(function, result)
    }

    fn run_body(&mut self, function: &FunctionDecl, arguments: Vec<Value>) -> EvalResult<Flow> {
        for (parameter, argument) in function.parameters.iter().zip(arguments) {
            self.scopes
                .declare(&parameter.name, argument)
                .map_err(|e| e.at(&parameter.lexeme))?;
        }

        match &function.body {
            FunctionBody::Block(block) => self.exec_block(&block.statements),
            FunctionBody::Builtin(name) => run_builtin(name, &self.scopes, &mut self.streams),
        }
    }
}

/// Describes the argument a parameter accepts, e.g. `int` or `float[][]`.
fn expected(parameter: &Parameter) -> String {
    match parameter.ty {
        TypeName::Array => "an array".to_string(),
        ty => format!("{ty}{}", "[]".repeat(parameter.dims)),
    }
}

/// Returns `true` if `argument` can be bound to `parameter` as is.
///
/// Scalars must have exactly the parameter's type. Arrays must have exactly
/// the declared number of dimensions and leaf type; their lengths are free.
fn accepts(parameter: &Parameter, argument: &Value) -> bool {
    match (parameter.ty, argument) {
        (TypeName::Array, value) => matches!(value, Value::Array(_)),
        (ty, Value::Array(_)) => {
            parameter.dims > 0
            && argument.shape().len() == parameter.dims
            && argument.leaf_type() == Some(ty)
        },
        (ty, value) => parameter.dims == 0 && value.is_scalar() && value.type_name() == Some(ty),
    }
}

/// Checks the argument count and every argument's type.
///
/// # Errors
/// `MismatchedArguments` naming the first problem.
pub fn check_arguments(function: &FunctionDecl, arguments: &[Value]) -> EvalResult<()> {
    let mismatched = |details: String| RuntimeError::MismatchedArguments { details,
                                                                           lexeme: None };

    if arguments.len() != function.parameters.len() {
        return Err(mismatched(format!("'{}' takes {} argument(s), found {}",
                                      function.name,
                                      function.parameters.len(),
                                      arguments.len())));
    }
    for (parameter, argument) in function.parameters.iter().zip(arguments) {
        if !accepts(parameter, argument) {
            return Err(mismatched(format!("parameter '{}' of '{}' expects {}, found {}",
                                          parameter.name,
                                          function.name,
                                          expected(parameter),
                                          argument.describe())));
        }
    }
    Ok(())
}

/// Checks a call's result against the declared return type.
///
/// A `void` function must produce no value; any other function must return
/// a scalar of exactly its declared type.
///
/// # Errors
/// `MismatchedType` if the result does not match.
pub fn check_return(function: &FunctionDecl, result: Value) -> EvalResult<Value> {
    let matches = match function.return_type {
        TypeName::Void => result == Value::Void,
        ty => result.is_scalar() && result.type_name() == Some(ty),
    };
    if !matches {
        return Err(RuntimeError::MismatchedType { details: format!("'{}' must return {}, \
                                                                    returned {}",
                                                                   function.name,
                                                                   function.return_type,
                                                                   result.describe()),
                                                  lexeme:  None, });
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::Lexeme;

    fn parameter(ty: TypeName, dims: usize) -> Parameter {
        Parameter { ty,
                    name: "p".into(),
                    dims,
                    lexeme: Lexeme::default() }
    }

    #[test]
    fn scalars_must_match_exactly() {
        assert!(accepts(&parameter(TypeName::Int, 0), &Value::Int(1)));
        assert!(!accepts(&parameter(TypeName::Float, 0), &Value::Int(1)));
        assert!(!accepts(&parameter(TypeName::Int, 0), &Value::Array(vec![Value::Int(1)])));
    }

    #[test]
    fn arrays_match_dimensions_and_leaf_type() {
        let row = Value::Array(vec![Value::Int(1), Value::Int(2)]);
        let grid = Value::Array(vec![row.clone(), row.clone()]);

        assert!(accepts(&parameter(TypeName::Int, 1), &row));
        assert!(accepts(&parameter(TypeName::Int, 2), &grid));
        assert!(!accepts(&parameter(TypeName::Int, 1), &grid));
        assert!(!accepts(&parameter(TypeName::Float, 1), &row));
        assert!(accepts(&parameter(TypeName::Array, 0), &grid));
        assert!(!accepts(&parameter(TypeName::Array, 0), &Value::Int(1)));
        assert_eq!(expected(&parameter(TypeName::Float, 2)), "float[][]");
    }
}
