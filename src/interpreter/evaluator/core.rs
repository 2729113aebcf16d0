use std::{
    io::{BufRead, Write},
    rc::Rc,
};

use log::debug;

use crate::{
    ast::{Expr, FunctionDecl, Item, Literal, Program, Statement, TypeName},
    error::RuntimeError,
    interpreter::{
        evaluator::function::builtin::builtin_declarations,
        lexer::Lexeme,
        scope::ScopeChain,
        value::core::Value,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// How a statement finished.
///
/// `Break`, `Continue` and `Return` unwind through enclosing statements until
/// a loop (for the first two) or a call boundary (for `Return`) consumes
/// them. Each carries the lexeme of the statement that raised it; a return
/// raised by a built-in has no source position.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    Normal,
    Break(Lexeme),
    Continue(Lexeme),
    Return(Value, Option<Lexeme>),
}

/// The byte streams the built-in I/O functions read from and write to.
pub struct Streams<'io> {
    pub input:  &'io mut dyn BufRead,
    pub output: &'io mut dyn Write,
}

/// Stores the runtime state of one program run.
///
/// ## Usage
///
/// An `Interpreter` is created once per run with the streams the program
/// talks to. [`Interpreter::run`] declares every top-level item in the root
/// frame, then calls `main`. Statement and expression evaluation is split
/// across the sibling modules (`loops`, `declaration`, `assignment`,
/// `function`), each adding methods to this type.
pub struct Interpreter<'io> {
    /// Name resolution for variables, functions and built-ins.
    pub scopes:  ScopeChain,
    pub streams: Streams<'io>,
}

impl<'io> Interpreter<'io> {
    /// Creates an interpreter whose root frame holds only the built-ins.
    ///
    /// # Example
    /// ```
    /// use std::io::{Cursor, sink};
    ///
    /// use clite::interpreter::{evaluator::core::Interpreter, value::core::Value};
    ///
    /// let mut input = Cursor::new(Vec::new());
    /// let mut output = sink();
    /// let interpreter = Interpreter::new(&mut input, &mut output);
    ///
    /// assert!(matches!(interpreter.scopes.lookup("printi"), Ok(Value::Function(_))));
    /// ```
    pub fn new(input: &'io mut dyn BufRead, output: &'io mut dyn Write) -> Self {
        let mut scopes = ScopeChain::new();
        for function in builtin_declarations() {
            let name = function.name.clone();
            scopes.define_global(&name, Value::Function(Rc::new(function)));
        }

        Self { scopes,
               streams: Streams { input, output } }
    }

    /// Runs a parsed program and returns the value produced by `main`.
    ///
    /// Top-level functions and globals are declared in source order, so a
    /// global initializer may only call functions declared above it. Output
    /// is flushed whether or not the program succeeds.
    ///
    /// # Errors
    /// Any runtime error raised while declaring items or running `main`, and
    /// `InvalidMain` if there is no `int main()` to call.
    pub fn run(&mut self, program: &Program) -> EvalResult<i64> {
        let result = self.run_items(program);
        let flushed = self.streams.output.flush().map_err(|e| RuntimeError::Io {
                                                      details: e.to_string(),
                                                      lexeme:  None,
                                                  });
        let code = result?;
        flushed?;
        debug!("main returned {code}");
        Ok(code)
    }

    fn run_items(&mut self, program: &Program) -> EvalResult<i64> {
        for item in &program.items {
            match item {
                Item::Function(function) => self.declare_function(function)?,
                Item::Global(declaration) => self.exec_declaration(declaration)?,
            }
        }

        let main = self.entry_point()?;
        debug!("invoking main");
        match self.invoke(&main, Vec::new())? {
            Value::Int(code) => Ok(code),
            other => Err(RuntimeError::InvalidMain { details: format!("main returned {}",
                                                                      other.describe()),
                                                     lexeme:  Some(main.lexeme.clone()), }),
        }
    }

    /// Looks up `main` and checks that it is `int main()`.
    fn entry_point(&self) -> EvalResult<Rc<FunctionDecl>> {
        let invalid = |details: &str, lexeme: Option<&Lexeme>| RuntimeError::InvalidMain {
            details: details.to_string(),
            lexeme:  lexeme.cloned(),
        };

        let main = match self.scopes.lookup("main") {
            Ok(Value::Function(function)) => Rc::clone(function),
            Ok(_) => return Err(invalid("'main' is not a function", None)),
            Err(_) => return Err(invalid("no 'main' function declared", None)),
        };
        if main.return_type != TypeName::Int {
            return Err(invalid("'main' must return int", Some(&main.lexeme)));
        }
        if !main.parameters.is_empty() {
            return Err(invalid("'main' must not take parameters", Some(&main.lexeme)));
        }
        Ok(main)
    }

    /// Executes a single statement.
    ///
    /// Statements never produce a value; they either complete normally or
    /// raise one of the non-local [`Flow`] signals.
    ///
    /// # Errors
    /// Any runtime error raised by the statement or its subexpressions.
    pub fn exec(&mut self, statement: &Statement) -> EvalResult<Flow> {
        match statement {
            Statement::Empty => Ok(Flow::Normal),
            Statement::Declaration(declaration) => {
                self.exec_declaration(declaration)?;
                Ok(Flow::Normal)
            },
            Statement::Assignment { target,
                                    op,
                                    value,
                                    lexeme, } => {
                self.exec_assignment(target, *op, value)
                    .map_err(|e| e.at(lexeme))?;
                Ok(Flow::Normal)
            },
            Statement::Call(call) => {
                self.call_function(call)?;
                Ok(Flow::Normal)
            },
            Statement::Block(block) => self.exec_block(&block.statements),
            Statement::If { branches,
                            otherwise,
                            .. } => self.exec_if(branches, otherwise.as_deref()),
            Statement::For { init,
                             condition,
                             increment,
                             body,
                             .. } => {
                self.exec_for(init.as_deref(), condition, increment.as_deref(), body)
            },
            Statement::While { condition, body, .. } => self.exec_while(condition, body),
            Statement::DoWhile { body, condition, .. } => self.exec_do_while(body, condition),
            Statement::Break(lexeme) => Ok(Flow::Break(lexeme.clone())),
            Statement::Continue(lexeme) => Ok(Flow::Continue(lexeme.clone())),
            Statement::Return { value, lexeme } => {
                let value = match value {
                    Some(expr) => self.eval(expr)?,
                    None => Value::Void,
                };
                Ok(Flow::Return(value, Some(lexeme.clone())))
            },
        }
    }

    /// Executes statements in a fresh frame, stopping at the first signal.
    ///
    /// # Errors
    /// The first runtime error raised by a statement.
    pub fn exec_block(&mut self, statements: &[Statement]) -> EvalResult<Flow> {
        self.in_new_scope(|this| {
                for statement in statements {
                    let flow = this.exec(statement)?;
                    if flow != Flow::Normal {
                        return Ok(flow);
                    }
                }
                Ok(Flow::Normal)
            })
    }

    /// Runs the body of the first branch whose condition holds, or the
    /// `else` branch if none does.
    fn exec_if(&mut self,
               branches: &[(Expr, Statement)],
               otherwise: Option<&Statement>)
               -> EvalResult<Flow> {
        for (condition, body) in branches {
            if self.condition(condition)? {
                return self.in_new_scope(|this| this.exec(body));
            }
        }
        match otherwise {
            Some(body) => self.in_new_scope(|this| this.exec(body)),
            None => Ok(Flow::Normal),
        }
    }

    /// Evaluates an expression to a value.
    ///
    /// Errors raised without a position are attributed to the innermost
    /// expression that failed.
    ///
    /// # Errors
    /// Any runtime error raised by the expression.
    pub fn eval(&mut self, expr: &Expr) -> EvalResult<Value> {
        self.eval_expr(expr).map_err(|e| e.at(expr.lexeme()))
    }

    fn eval_expr(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(match value {
                                                  Literal::Int(v) => Value::Int(*v),
                                                  Literal::Float(v) => Value::Float(*v),
                                                  Literal::Str(s) => Value::Str(s.clone()),
                                              }),
            Expr::InitializerList { elements, .. } => {
                let values = elements.iter()
                                     .map(|element| self.eval(element))
                                     .collect::<EvalResult<Vec<_>>>()?;
                Value::array_from(values)
            },
            Expr::Variable(variable) => self.read_variable(variable),
            Expr::Unary { op, operand, .. } => {
                let value = self.eval(operand)?;
                Self::eval_unary(*op, &value)
            },
            Expr::Binary { left, op, right, .. } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                Self::eval_binary(*op, &left, &right)
            },
            Expr::Cast { target, operand, .. } => {
                let value = self.eval(operand)?;
                Self::eval_cast(*target, value)
            },
            Expr::Call(call) => self.call_function(call),
        }
    }
}
