use crate::{
    ast::{Expr, Statement},
    interpreter::evaluator::core::{EvalResult, Flow, Interpreter},
};

/// What a loop does after one run of its body.
enum Step {
    Next,
    Exit(Flow),
}

/// Consumes the `break` and `continue` signals that belong to a loop and
/// passes `return` through.
fn step(flow: Flow) -> Step {
    match flow {
        Flow::Normal | Flow::Continue(_) => Step::Next,
        Flow::Break(_) => Step::Exit(Flow::Normal),
        flow @ Flow::Return(..) => Step::Exit(flow),
    }
}

impl Interpreter<'_> {
    /// Executes `for (init; condition; increment) body`.
    ///
    /// The loop gets one frame for its header, so a variable declared in
    /// `init` is visible to the condition, the increment and the body, and
    /// disappears when the loop ends. Each run of the body gets its own
    /// frame on top. `continue` still runs the increment.
    ///
    /// # Errors
    /// Propagates errors from any clause or the body.
    pub fn exec_for(&mut self,
                    init: Option<&Statement>,
                    condition: &Expr,
                    increment: Option<&Statement>,
                    body: &Statement)
                    -> EvalResult<Flow> {
        self.in_new_scope(|this| {
                if let Some(init) = init {
                    this.exec(init)?;
                }
                while this.condition(condition)? {
                    if let Step::Exit(flow) = step(this.in_new_scope(|this| this.exec(body))?) {
                        return Ok(flow);
                    }
                    if let Some(increment) = increment {
                        this.exec(increment)?;
                    }
                }
                Ok(Flow::Normal)
            })
    }

    /// Executes `while (condition) body`.
    ///
    /// # Errors
    /// Propagates errors from the condition or the body.
    pub fn exec_while(&mut self, condition: &Expr, body: &Statement) -> EvalResult<Flow> {
        while self.condition(condition)? {
            if let Step::Exit(flow) = step(self.in_new_scope(|this| this.exec(body))?) {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal)
    }

    /// Executes `do body while (condition);`. The body always runs once
    /// before the first check.
    ///
    /// # Errors
    /// Propagates errors from the condition or the body.
    pub fn exec_do_while(&mut self, body: &Statement, condition: &Expr) -> EvalResult<Flow> {
        loop {
            if let Step::Exit(flow) = step(self.in_new_scope(|this| this.exec(body))?) {
                return Ok(flow);
            }
            if !self.condition(condition)? {
                return Ok(Flow::Normal);
            }
        }
    }
}
