use std::rc::Rc;

use crate::{
    ast::{Declaration, Expr, FunctionDecl},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Interpreter},
            function::builtin::is_builtin,
        },
        value::core::Value,
    },
    util::num::dimension,
};

impl Interpreter<'_> {
    /// Declares a variable in the innermost frame.
    ///
    /// A scalar takes its initializer converted to the declared type, or the
    /// type's default. An array takes its initializer, which must match the
    /// declared dimensions and leaf type exactly, or is filled with the
    /// default. Unsized dimensions (`a[]`) are taken from the initializer.
    ///
    /// # Errors
    /// - `OutOfBounds` for a dimension that is not positive, or an unsized
    ///   dimension without an initializer.
    /// - `MismatchedType` if the initializer does not fit the declaration.
    /// - `DuplicateIdentifier` if the frame already declares the name.
    pub fn exec_declaration(&mut self, declaration: &Declaration) -> EvalResult<()> {
        let target = &declaration.target;
        let value = self.declared_value(declaration)
                        .map_err(|e| e.at(&target.lexeme))?;
        self.scopes
            .declare(&target.name, value)
            .map_err(|e| e.at(&target.lexeme))
    }

    /// Computes the initial value of a declared variable.
    fn declared_value(&mut self, declaration: &Declaration) -> EvalResult<Value> {
        let target = &declaration.target;
        let dims = self.eval_dimensions(&target.indices)?;
        let initial = declaration.initializer
                                 .as_ref()
                                 .map(|expr| self.eval(expr))
                                 .transpose()?;

        if dims.is_empty() {
            match initial {
                Some(value) => value.coerce_to(declaration.ty),
                None => Ok(Value::default_for(declaration.ty)),
            }
        } else {
            match initial {
                Some(value) => {
                    value.conform_to(declaration.ty, &dims)?;
                    Ok(value)
                },
                None => {
                    let sizes = dims.into_iter().collect::<Option<Vec<_>>>().ok_or_else(|| {
                        RuntimeError::OutOfBounds {
                            details: format!("array '{}' needs a size or an initializer",
                                             target.name),
                            lexeme:  None,
                        }
                    })?;
                    Value::filled(&sizes, &Value::default_for(declaration.ty))
                },
            }
        }
    }

    /// Evaluates declared dimensions. `None` marks an unsized dimension.
    fn eval_dimensions(&mut self, indices: &[Option<Expr>]) -> EvalResult<Vec<Option<usize>>> {
        indices.iter()
               .map(|index| {
                   let Some(expr) = index else {
                       return Ok(None);
                   };
                   let size = self.eval(expr)?
                                  .as_int("array dimension")
                                  .map_err(|e| e.at(expr.lexeme()))?;
                   dimension(size).map(Some).ok_or_else(|| RuntimeError::OutOfBounds {
                       details: format!("array dimension must be positive, found {size}"),
                       lexeme:  Some(expr.lexeme().clone()),
                   })
               })
               .collect()
    }

    /// Declares a function in the innermost frame.
    ///
    /// # Errors
    /// `ArrayAsFunctionReturn` if the declared return type has dimensions,
    /// `DuplicateIdentifier` if the name is taken, including by a built-in.
    pub fn declare_function(&mut self, function: &FunctionDecl) -> EvalResult<()> {
        if function.return_dims > 0 {
            return Err(RuntimeError::ArrayAsFunctionReturn {
                details: format!("'{}' is declared to return an array", function.name),
                lexeme:  Some(function.lexeme.clone()),
            });
        }
        if is_builtin(&function.name) {
            return Err(RuntimeError::DuplicateIdentifier {
                details: format!("'{}' is a built-in function", function.name),
                lexeme:  Some(function.lexeme.clone()),
            });
        }
        self.scopes
            .declare(&function.name, Value::Function(Rc::new(function.clone())))
            .map_err(|e| e.at(&function.lexeme))
    }
}
