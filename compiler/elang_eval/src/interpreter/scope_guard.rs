//! RAII guard for function call scopes.
//!
//! [`ScopedInterpreter`] pushes a scope and switches to the callee's module;
//! dropping it pops the scope, releases the scope's arena, and switches back.
//! This runs on every exit path: fall-through, `return`, and errors
//! propagated with `?`.

use std::ops::{Deref, DerefMut};
use std::rc::Rc;

use elang_ir::{ArenaId, SharedModule};

use super::Interpreter;
use crate::FunctionRecord;

/// Access the interpreter through this guard; it derefs to [`Interpreter`].
pub struct ScopedInterpreter<'guard> {
    interpreter: &'guard mut Interpreter,
    /// Caller's module, swapped back in on drop.
    caller_module: SharedModule,
}

impl Drop for ScopedInterpreter<'_> {
    fn drop(&mut self) {
        if let Some(scope) = self.interpreter.env.pop_scope() {
            self.interpreter.heap.release(scope.arena());
        }
        std::mem::swap(&mut self.interpreter.module, &mut self.caller_module);
    }
}

impl Deref for ScopedInterpreter<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl Interpreter {
    /// Enter `function` in a new scope owning `arena`.
    pub fn scoped_call(&mut self, arena: ArenaId, function: FunctionRecord) -> ScopedInterpreter<'_> {
        let callee_module = Rc::clone(&function.module);
        self.env.push_scope(arena, Some(function));
        let caller_module = std::mem::replace(&mut self.module, callee_module);
        ScopedInterpreter {
            interpreter: self,
            caller_module,
        }
    }

    /// Run `f` inside a call scope; the scope is gone when this returns.
    pub fn with_call_scope<T, F>(&mut self, arena: ArenaId, function: FunctionRecord, f: F) -> T
    where
        F: FnOnce(&mut ScopedInterpreter<'_>) -> T,
    {
        let mut scoped = self.scoped_call(arena, function);
        f(&mut scoped)
    }
}
