//! Tree-walking interpreter.
//!
//! [`Interpreter::eval`] dispatches on the node kind. Statement sequences
//! stop at the first `return`, whose value travels up as
//! [`Outcome::Return`] until the enclosing call turns it into the call's
//! result.

mod builder;
mod function_call;
mod import;
mod scope_guard;


use std::rc::Rc;

use elang_ir::{
    FunctionId, Heap, Module, Mutability, Node, NodeId, NodeKind, NodeRange, SharedModule,
    StrView, ValueType,
};
use elang_stack::ensure_sufficient_stack;
use tracing::{debug, trace};

use crate::errors::{dangling_view, name_conflict, unknown_identifier};
use crate::ffi::NativeDispatcher;
use crate::operators::{evaluate_arithmetic, evaluate_condition, evaluate_negation};
use crate::{
    AssignError, Environment, EvalError, EvalErrorKind, EvalResult, FunctionRecord, Outcome,
    SharedPrintHandler, Value, Variable,
};

pub use builder::InterpreterBuilder;
pub use scope_guard::ScopedInterpreter;

/// How a program finished.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Completion {
    /// Ran to the end of the file.
    Finished,
    /// Stopped by `exit(code)`.
    Exit(i32),
}

/// Evaluates elang programs.
///
/// Declarations accumulate in the root scope, so feeding several sources to
/// one interpreter behaves like importing them in order.
pub struct Interpreter {
    pub(crate) heap: Heap,
    pub(crate) env: Environment,
    /// Module whose node ids are being evaluated.
    pub(crate) module: SharedModule,
    pub(crate) print_handler: SharedPrintHandler,
    pub(crate) natives: NativeDispatcher,
    pub(crate) builtins: bool,
    pub(crate) region_size: usize,
    /// File whose statements are running, when known.
    pub(crate) origin: Option<Rc<str>>,
}

impl Interpreter {
    /// Interpreter with default settings: stdout output, builtins on, no
    /// native library.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    /// Value of a visible variable, for embedders.
    pub fn variable(&self, name: &str) -> Option<Value> {
        self.env.lookup(&self.heap, name).map(|var| var.value)
    }

    /// Lex, parse, and run `source` in the root scope.
    pub fn eval_source(&mut self, source: &str) -> Result<Completion, EvalError> {
        let module = self.load(source)?;
        self.run(module)
    }

    /// Run an already loaded module in the root scope.
    pub fn run(&mut self, module: SharedModule) -> Result<Completion, EvalError> {
        match self.exec_module(module) {
            Ok(_) => Ok(Completion::Finished),
            Err(err) => match err.exit_code() {
                Some(code) => {
                    debug!(code, "exit requested");
                    Ok(Completion::Exit(code))
                }
                None => Err(err),
            },
        }
    }

    /// Copy `source` into the current scope's arena and parse it.
    pub fn load(&mut self, source: &str) -> Result<SharedModule, EvalError> {
        let tokens = elang_lexer::lex(source)?;
        let arena = self.env.current().arena();
        let origin = self.heap.alloc_str(arena, source).ok_or_else(dangling_view)?;
        let module = elang_parse::parse(&tokens, source, origin)?;
        Ok(Rc::new(module))
    }

    /// Evaluate a module's statements in the current scope.
    ///
    /// Returns the value of a `return` reached at the module's top level,
    /// which is only legal when the current scope belongs to a function.
    pub(crate) fn exec_module(&mut self, module: SharedModule) -> Result<Option<Value>, EvalError> {
        let saved = std::mem::replace(&mut self.module, Rc::clone(&module));
        let result = self.exec_statements(module.items());
        self.module = saved;
        result
    }

    pub(crate) fn exec_block(&mut self, body: Option<NodeRange>) -> Result<Option<Value>, EvalError> {
        let module = Rc::clone(&self.module);
        self.exec_statements(module.body(body))
    }

    fn exec_statements(&mut self, stmts: &[NodeId]) -> Result<Option<Value>, EvalError> {
        for &stmt in stmts {
            if let Outcome::Return(value) = self.eval(stmt)? {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    /// Evaluate one node of the current module.
    pub fn eval(&mut self, id: NodeId) -> EvalResult {
        ensure_sufficient_stack(|| {
            let node = *self.module.node(id);
            trace!(line = node.line, "eval");
            self.eval_node(node).map_err(|err| err.or_line(node.line))
        })
    }

    fn eval_node(&mut self, node: Node) -> EvalResult {
        match node.kind {
            NodeKind::Eof => Ok(Outcome::Void),
            NodeKind::Number(n) => Ok(Outcome::Value(Value::Int(n))),
            NodeKind::Str(view) => Ok(Outcome::Value(Value::Str(view))),
            NodeKind::Bool(b) => Ok(Outcome::Value(Value::Bool(b))),
            NodeKind::Identifier(name) => {
                let text = self.heap.text(name).ok_or_else(dangling_view)?;
                let var = self
                    .env
                    .lookup(&self.heap, text)
                    .ok_or_else(|| unknown_identifier(text))?;
                Ok(Outcome::Value(var.value))
            }
            NodeKind::Negate(operand) => {
                let value = self.eval_operand(operand, || EvalErrorKind::NonIntegerOperand {
                    found: ValueType::Void,
                })?;
                evaluate_negation(value).map(Outcome::Value)
            }
            NodeKind::Arithmetic { op, lhs, rhs } => {
                let void = || EvalErrorKind::NonIntegerOperand {
                    found: ValueType::Void,
                };
                let lhs = self.eval_operand(lhs, void)?;
                let rhs = self.eval_operand(rhs, void)?;
                evaluate_arithmetic(op, lhs, rhs).map(Outcome::Value)
            }
            NodeKind::Condition { op, lhs, rhs } => {
                // Both sides are always evaluated; `and`/`or` do not short-circuit.
                let void = || EvalErrorKind::InvalidComparison { op };
                let lhs = self.eval_operand(lhs, void)?;
                let rhs = self.eval_operand(rhs, void)?;
                let result = evaluate_condition(op, lhs, rhs, &self.heap)?;
                Ok(Outcome::Value(Value::Bool(result)))
            }
            NodeKind::Declaration {
                name,
                init,
                mutability,
                declared,
            } => self.eval_declaration(name, init, mutability, declared),
            NodeKind::Assignment { name, value } => self.eval_assignment(name, value),
            NodeKind::FunctionDecl(id) => self.declare_function(id),
            NodeKind::Call { callee, args } => self.eval_call(callee, args),
            NodeKind::If {
                condition,
                then_body,
                else_body,
            } => {
                let branch = if self.eval_condition(condition)? {
                    then_body
                } else {
                    else_body
                };
                Ok(self.exec_block(branch)?.map_or(Outcome::Void, Outcome::Return))
            }
            NodeKind::While { condition, body } => {
                while self.eval_condition(condition)? {
                    if let Some(value) = self.exec_block(body)? {
                        return Ok(Outcome::Return(value));
                    }
                }
                Ok(Outcome::Void)
            }
            NodeKind::Return(value) => self.eval_return(value),
            NodeKind::Import(path) => self.eval_import(path),
        }
    }

    /// Evaluate a node that must produce a value; `on_void` names the error
    /// when it does not.
    pub(crate) fn eval_operand(
        &mut self,
        id: NodeId,
        on_void: impl FnOnce() -> EvalErrorKind,
    ) -> Result<Value, EvalError> {
        match self.eval(id)? {
            Outcome::Value(value) | Outcome::Return(value) => Ok(value),
            Outcome::Void => Err(on_void().into()),
        }
    }

    /// `if`/`while` condition.
    fn eval_condition(&mut self, id: NodeId) -> Result<bool, EvalError> {
        let value = self.eval_operand(id, || EvalErrorKind::ConditionNotBool {
            found: ValueType::Void,
        })?;
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(EvalErrorKind::ConditionNotBool { found: other.ty() }.into()),
        }
    }

    fn eval_declaration(
        &mut self,
        name: StrView,
        init: NodeId,
        mutability: Mutability,
        declared: ValueType,
    ) -> EvalResult {
        let text = self.heap.text(name).ok_or_else(dangling_view)?;
        if self.env.is_declared(&self.heap, text) {
            return Err(name_conflict(text));
        }

        let value = self.eval_operand(init, || EvalErrorKind::VoidAssignment)?;
        // An unannotated declaration takes the initializer's type.
        if declared != ValueType::Void && value.ty() != declared {
            return Err(EvalErrorKind::TypeConflict {
                declared,
                found: value.ty(),
            }
            .into());
        }

        self.env.define(Variable {
            name,
            value,
            ty: value.ty(),
            mutability,
        });
        Ok(Outcome::Void)
    }

    fn eval_assignment(&mut self, name: StrView, value: NodeId) -> EvalResult {
        let text = self.heap.text(name).ok_or_else(dangling_view)?;
        match self.env.lookup(&self.heap, text) {
            None => return Err(unknown_identifier(text)),
            Some(var) if !var.mutability.is_mutable() => {
                return Err(EvalErrorKind::ConstReassignment {
                    name: text.to_string(),
                }
                .into());
            }
            Some(_) => {}
        }

        let value = self.eval_operand(value, || EvalErrorKind::VoidAssignment)?;
        let text = self.heap.text(name).ok_or_else(dangling_view)?;
        self.env
            .assign(&self.heap, text, value)
            .map_err(|err| match err {
                AssignError::Immutable => EvalErrorKind::ConstReassignment {
                    name: text.to_string(),
                }
                .into(),
                AssignError::Undefined => unknown_identifier(text),
                AssignError::TypeMismatch { expected, found } => {
                    EvalErrorKind::AssignmentTypeChange { expected, found }.into()
                }
            })?;
        Ok(Outcome::Void)
    }

    fn declare_function(&mut self, id: FunctionId) -> EvalResult {
        let module = Rc::clone(&self.module);
        let decl = module.function(id);
        let name = self.heap.text(decl.name).ok_or_else(dangling_view)?;
        if self.env.lookup_function(&self.heap, name).is_some() {
            return Err(name_conflict(name));
        }
        for (index, param) in decl.params.iter().enumerate() {
            let param_name = self.heap.text(param.name).ok_or_else(dangling_view)?;
            let duplicate = decl.params[..index]
                .iter()
                .any(|earlier| self.heap.text(earlier.name) == Some(param_name));
            if duplicate {
                return Err(name_conflict(param_name));
            }
        }

        debug!(name, params = decl.params.len(), is_extern = decl.is_extern, "declare function");
        let record = FunctionRecord::new(module, id).with_origin(self.origin.clone());
        self.env.define_function(record);
        Ok(Outcome::Void)
    }

    fn eval_return(&mut self, value: NodeId) -> EvalResult {
        let Some(expected) = self
            .env
            .current_function()
            .map(|function| function.decl().return_type)
        else {
            return Err(EvalErrorKind::ReturnOutsideFunction.into());
        };

        let value = self.eval_operand(value, || EvalErrorKind::VoidReturn)?;
        if value.ty() != expected {
            return Err(EvalErrorKind::InvalidReturnValue {
                expected,
                found: value.ty(),
            }
            .into());
        }
        Ok(Outcome::Return(value))
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Interpreter::new()
    }
}

/// Placeholder module for an interpreter that has not loaded anything.
pub(crate) fn empty_module() -> SharedModule {
    Rc::new(Module::new())
}
