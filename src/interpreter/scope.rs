use std::collections::HashMap;

use log::trace;

use crate::{error::RuntimeError, interpreter::value::core::Value};

/// One mapping layer of the scope chain.
pub type Frame = HashMap<String, Value>;

/// The chain of frames used for name resolution.
///
/// Frame 0 is the root: it holds built-ins, top-level functions and globals
/// and lives as long as the chain. Blocks and loops push frames on top of the
/// current chain. A function call starts a fresh chain that sees only its own
/// frames and the root; `call_bases` remembers where each active call's
/// frames begin so the caller's locals stay hidden until the call returns.
#[derive(Debug)]
pub struct ScopeChain {
    frames:     Vec<Frame>,
    call_bases: Vec<usize>,
}

impl Default for ScopeChain {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(name: &str) -> RuntimeError {
    RuntimeError::IdentifierNotFound { details: format!("'{name}' is not declared"),
                                       lexeme:  None, }
}

impl ScopeChain {
    /// Creates a chain holding only the empty root frame.
    #[must_use]
    pub fn new() -> Self {
        Self { frames:     vec![Frame::new()],
               call_bases: Vec::new(), }
    }

    /// Index of the lowest frame belonging to the active chain, root excluded.
    fn base(&self) -> usize {
        self.call_bases.last().copied().unwrap_or(1)
    }

    /// Indices of the visible frames, innermost first, ending at the root.
    fn visible(&self) -> impl Iterator<Item = usize> {
        (self.base()..self.frames.len()).rev().chain(std::iter::once(0))
    }

    /// Finds the innermost visible binding of `name`.
    ///
    /// # Errors
    /// `IdentifierNotFound` if no visible frame declares `name`.
    pub fn lookup(&self, name: &str) -> Result<&Value, RuntimeError> {
        self.visible()
            .find_map(|index| self.frames[index].get(name))
            .ok_or_else(|| not_found(name))
    }

    /// Mutable counterpart of [`ScopeChain::lookup`], used for in-place
    /// element assignment.
    ///
    /// # Errors
    /// `IdentifierNotFound` if no visible frame declares `name`.
    pub fn lookup_mut(&mut self, name: &str) -> Result<&mut Value, RuntimeError> {
        let index = self.visible()
                        .find(|&index| self.frames[index].contains_key(name))
                        .ok_or_else(|| not_found(name))?;
        self.frames[index].get_mut(name).ok_or_else(|| not_found(name))
    }

    /// Replaces the innermost visible binding of `name`. Never creates a new
    /// binding.
    ///
    /// # Errors
    /// `IdentifierNotFound` if no visible frame declares `name`.
    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), RuntimeError> {
        *self.lookup_mut(name)? = value;
        Ok(())
    }

    /// Binds `name` in the innermost frame. Shadowing an outer binding is
    /// allowed.
    ///
    /// # Errors
    /// `DuplicateIdentifier` if the innermost frame already binds `name`.
    pub fn declare(&mut self, name: &str, value: Value) -> Result<(), RuntimeError> {
        let frame = self.frames.last_mut().ok_or_else(|| not_found(name))?;
        if frame.contains_key(name) {
            return Err(RuntimeError::DuplicateIdentifier { details: format!("'{name}' is \
                                                                             already declared \
                                                                             in this scope"),
                                                           lexeme:  None, });
        }
        frame.insert(name.to_string(), value);
        Ok(())
    }

    /// Binds `name` in the root frame, replacing any earlier binding. Used to
    /// install the built-ins before user declarations run.
    pub fn define_global(&mut self, name: &str, value: Value) {
        if let Some(root) = self.frames.first_mut() {
            root.insert(name.to_string(), value);
        }
    }

    /// Opens a new innermost frame.
    pub fn push(&mut self) {
        self.frames.push(Frame::new());
        trace!("pushed frame {}", self.frames.len());
    }

    /// Discards the innermost frame. The root frame and the frames of an
    /// enclosing call are never removed.
    pub fn pop(&mut self) {
        let floor = self.call_bases.last().map_or(1, |base| base + 1);
        if self.frames.len() > floor {
            self.frames.pop();
            trace!("popped to frame {}", self.frames.len());
        }
    }

    /// Starts an isolated chain for a function call: the callee sees the root
    /// and one fresh frame for its parameters.
    pub fn enter_call(&mut self) {
        self.call_bases.push(self.frames.len());
        self.frames.push(Frame::new());
        trace!("entered call frame at depth {}", self.frames.len());
    }

    /// Drops every frame of the innermost call and restores the caller's chain.
    pub fn exit_call(&mut self) {
        if let Some(base) = self.call_bases.pop() {
            self.frames.truncate(base);
        }
        trace!("returned to depth {}", self.frames.len());
    }

    /// Number of frames currently alive, root included.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assign_to_undeclared_name_fails() {
        let mut scopes = ScopeChain::new();
        scopes.push();
        assert!(matches!(scopes.assign("x", Value::Int(1)),
                         Err(RuntimeError::IdentifierNotFound { .. })));
    }

    #[test]
    fn declare_twice_in_one_frame_fails_but_shadowing_works() {
        let mut scopes = ScopeChain::new();
        scopes.declare("x", Value::Int(1)).unwrap();
        assert!(matches!(scopes.declare("x", Value::Int(2)),
                         Err(RuntimeError::DuplicateIdentifier { .. })));

        scopes.push();
        scopes.declare("x", Value::Int(3)).unwrap();
        assert_eq!(scopes.lookup("x").unwrap(), &Value::Int(3));
        scopes.pop();
        assert_eq!(scopes.lookup("x").unwrap(), &Value::Int(1));
    }

    #[test]
    fn assign_updates_the_innermost_binding_in_place() {
        let mut scopes = ScopeChain::new();
        scopes.declare("x", Value::Int(1)).unwrap();
        scopes.push();
        scopes.assign("x", Value::Int(5)).unwrap();
        scopes.pop();
        assert_eq!(scopes.lookup("x").unwrap(), &Value::Int(5));
    }

    #[test]
    fn calls_hide_caller_locals_but_not_globals() {
        let mut scopes = ScopeChain::new();
        scopes.declare("global", Value::Int(1)).unwrap();
        scopes.push();
        scopes.declare("local", Value::Int(2)).unwrap();

        scopes.enter_call();
        assert!(scopes.lookup("global").is_ok());
        assert!(matches!(scopes.lookup("local"), Err(RuntimeError::IdentifierNotFound { .. })));
        scopes.declare("local", Value::Int(3)).unwrap();
        scopes.push();
        scopes.exit_call();

        assert_eq!(scopes.lookup("local").unwrap(), &Value::Int(2));
        assert_eq!(scopes.depth(), 2);
    }

    #[test]
    fn pop_never_removes_root_or_crosses_a_call() {
        let mut scopes = ScopeChain::new();
        scopes.declare("x", Value::Int(1)).unwrap();
        scopes.pop();
        assert_eq!(scopes.depth(), 1);
        assert!(scopes.lookup("x").is_ok());

        scopes.enter_call();
        scopes.pop();
        assert_eq!(scopes.depth(), 2);
    }
}
