//! Environment for variable and function scoping.
//!
//! Scopes form a stack: the root scope at the bottom, one scope per active
//! function call above it. A scope's parent is the scope directly below it,
//! so lookups walk from the top of the stack down to the root. `if` and
//! `while` bodies run in the current scope and push nothing.
//!
//! Names are [`StrView`]s and compare by content, so every lookup takes the
//! [`Heap`] that resolves them.

use std::rc::Rc;

use elang_ir::{ArenaId, FunctionDecl, FunctionId, Heap, Mutability, SharedModule, StrView, ValueType};
use tracing::debug;

use crate::Value;


/// Error returned by [`Environment::assign`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignError {
    /// Variable exists but was declared `const`.
    Immutable,
    /// Variable not found in any scope.
    Undefined,
    /// New value's type differs from the variable's.
    TypeMismatch {
        expected: ValueType,
        found: ValueType,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Variable {
    pub name: StrView,
    pub value: Value,
    /// Type fixed at declaration.
    pub ty: ValueType,
    pub mutability: Mutability,
}

/// A declared function: the module that holds its body, and its id there.
#[derive(Clone, Debug)]
pub struct FunctionRecord {
    pub module: SharedModule,
    pub id: FunctionId,
    /// File the declaration was read from, when known.
    pub origin: Option<Rc<str>>,
}

impl FunctionRecord {
    pub fn new(module: SharedModule, id: FunctionId) -> Self {
        FunctionRecord {
            module,
            id,
            origin: None,
        }
    }

    #[must_use]
    pub fn with_origin(mut self, origin: Option<Rc<str>>) -> Self {
        self.origin = origin;
        self
    }

    pub fn decl(&self) -> &FunctionDecl {
        self.module.function(self.id)
    }

    pub fn name(&self) -> StrView {
        self.decl().name
    }
}

/// One frame of the environment.
#[derive(Debug)]
pub struct Scope {
    arena: ArenaId,
    variables: Vec<Variable>,
    functions: Vec<FunctionRecord>,
    function: Option<FunctionRecord>,
}

impl Scope {
    pub fn new(arena: ArenaId, function: Option<FunctionRecord>) -> Self {
        Scope {
            arena,
            variables: Vec::new(),
            functions: Vec::new(),
            function,
        }
    }

    /// Arena owned by this scope.
    #[inline]
    pub fn arena(&self) -> ArenaId {
        self.arena
    }

    /// Function whose body is running in this scope, if any.
    #[inline]
    pub fn function(&self) -> Option<&FunctionRecord> {
        self.function.as_ref()
    }

    /// Variables in declaration order.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Functions in declaration order.
    pub fn functions(&self) -> &[FunctionRecord] {
        &self.functions
    }

    fn find_variable(&self, heap: &Heap, name: &str) -> Option<usize> {
        self.variables
            .iter()
            .position(|var| heap.text(var.name) == Some(name))
    }

    fn find_function(&self, heap: &Heap, name: &str) -> Option<&FunctionRecord> {
        self.functions
            .iter()
            .find(|func| heap.text(func.name()) == Some(name))
    }
}

/// The scope stack.
pub struct Environment {
    root: Scope,
    frames: Vec<Scope>,
}

impl Environment {
    /// Create an environment whose root scope owns `root_arena`.
    pub fn new(root_arena: ArenaId) -> Self {
        Environment {
            root: Scope::new(root_arena, None),
            frames: Vec::new(),
        }
    }

    /// Push a scope for a function call.
    pub fn push_scope(&mut self, arena: ArenaId, function: Option<FunctionRecord>) {
        self.frames.push(Scope::new(arena, function));
        debug!(depth = self.depth(), arena = arena.index(), "push scope");
    }

    /// Pop the innermost call scope, handing it back so its arena can be
    /// released. The root scope is never popped.
    pub fn pop_scope(&mut self) -> Option<Scope> {
        let scope = self.frames.pop()?;
        debug!(depth = self.depth(), arena = scope.arena.index(), "pop scope");
        Some(scope)
    }

    /// Number of call scopes above the root.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn current(&self) -> &Scope {
        self.frames.last().unwrap_or(&self.root)
    }

    #[inline]
    fn current_mut(&mut self) -> &mut Scope {
        self.frames.last_mut().unwrap_or(&mut self.root)
    }

    pub fn root(&self) -> &Scope {
        &self.root
    }

    /// Scopes from innermost to root.
    pub fn chain(&self) -> impl Iterator<Item = &Scope> {
        self.frames.iter().rev().chain(std::iter::once(&self.root))
    }

    pub fn lookup(&self, heap: &Heap, name: &str) -> Option<&Variable> {
        self.chain().find_map(|scope| {
            scope
                .find_variable(heap, name)
                .map(|index| &scope.variables[index])
        })
    }

    /// Whether a variable named `name` is visible from the current scope.
    pub fn is_declared(&self, heap: &Heap, name: &str) -> bool {
        self.lookup(heap, name).is_some()
    }

    /// Add a variable to the current scope. Conflict checks are the caller's.
    pub fn define(&mut self, variable: Variable) {
        self.current_mut().variables.push(variable);
    }

    /// Update the nearest variable named `name`.
    pub fn assign(&mut self, heap: &Heap, name: &str, value: Value) -> Result<(), AssignError> {
        let scopes = self.frames.iter_mut().rev().chain(std::iter::once(&mut self.root));
        for scope in scopes {
            let Some(index) = scope.find_variable(heap, name) else {
                continue;
            };
            let var = &mut scope.variables[index];
            if !var.mutability.is_mutable() {
                return Err(AssignError::Immutable);
            }
            if var.ty != value.ty() {
                return Err(AssignError::TypeMismatch {
                    expected: var.ty,
                    found: value.ty(),
                });
            }
            var.value = value;
            return Ok(());
        }
        Err(AssignError::Undefined)
    }

    /// Nearest function named `name`.
    pub fn lookup_function(&self, heap: &Heap, name: &str) -> Option<&FunctionRecord> {
        self.chain().find_map(|scope| scope.find_function(heap, name))
    }

    /// Add a function to the current scope. Conflict checks are the caller's.
    pub fn define_function(&mut self, function: FunctionRecord) {
        self.current_mut().functions.push(function);
    }

    /// Function whose body owns the current scope.
    pub fn current_function(&self) -> Option<&FunctionRecord> {
        self.current().function()
    }
}
