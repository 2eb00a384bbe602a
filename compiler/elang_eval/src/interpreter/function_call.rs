//! Function calls: user functions, builtins, native functions.
//!
//! Resolution order for a call `f(args)`:
//! 1. the nearest user function named `f` in the scope chain;
//! 2. the builtin `f`, unless builtins are disabled;
//! 3. the native library.

use std::rc::Rc;

use elang_ir::{Mutability, NodeRange, StrView, ValueType};

use super::Interpreter;
use crate::builtins::Builtin;
use crate::errors::{
    argument_type_mismatch, dangling_view, unknown_identifier, wrong_argument_count,
};
use crate::ffi::{NativeHost, NativeReturn, NativeValue};
use crate::{EvalError, EvalErrorKind, EvalResult, FunctionRecord, Outcome, Value, Variable};

impl Interpreter {
    pub(crate) fn eval_call(&mut self, callee: StrView, args: NodeRange) -> EvalResult {
        let name = self.heap.text(callee).ok_or_else(dangling_view)?;
        if let Some(function) = self.env.lookup_function(&self.heap, name).cloned() {
            return self.call_function(&function, args);
        }

        let name = name.to_string();
        let values = self.eval_args(args)?;
        self.call_external(&name, &values)
    }

    /// Arguments are evaluated left to right in the caller's scope.
    fn eval_args(&mut self, args: NodeRange) -> Result<Vec<Value>, EvalError> {
        let module = Rc::clone(&self.module);
        module
            .list(args)
            .iter()
            .map(|&arg| self.eval_operand(arg, || EvalErrorKind::VoidArgument))
            .collect()
    }

    fn call_function(&mut self, function: &FunctionRecord, args: NodeRange) -> EvalResult {
        let decl = function.decl();
        if decl.params.len() != args.len() {
            return Err(wrong_argument_count(decl.params.len(), args.len()));
        }
        let values = self.eval_args(args)?;
        for (param, value) in decl.params.iter().zip(&values) {
            // A `void` parameter accepts any value, like an unannotated declaration.
            if param.ty != ValueType::Void && value.ty() != param.ty {
                return Err(argument_type_mismatch(param.ty, value.ty()));
            }
        }

        if decl.is_extern {
            let name = self.heap.text(decl.name).ok_or_else(dangling_view)?.to_string();
            let outcome = self.call_external(&name, &values)?;
            return check_extern_result(decl.return_type, outcome);
        }

        let arena = self.heap.create(self.region_size);
        let returned = self.with_call_scope(arena, function.clone(), |scoped| {
            for (param, value) in decl.params.iter().zip(values) {
                scoped.env.define(Variable {
                    name: param.name,
                    value,
                    ty: value.ty(),
                    mutability: Mutability::Mutable,
                });
            }
            scoped.exec_block(decl.body)
        });
        // Lines inside the body belong to the file that declared it.
        let returned = returned.map_err(|err| match &function.origin {
            Some(origin) => err.or_path(origin),
            None => err,
        })?;

        match (returned, decl.return_type) {
            (Some(value), _) => Ok(Outcome::Value(value)),
            (None, ValueType::Void) => Ok(Outcome::Void),
            (None, expected) => Err(EvalErrorKind::MissingReturn { expected }.into()),
        }
    }

    /// Builtins, then the native library.
    pub(crate) fn call_external(&mut self, name: &str, values: &[Value]) -> EvalResult {
        if self.builtins {
            if let Some(builtin) = Builtin::lookup(name) {
                return builtin.call(values, &self.heap, &self.print_handler);
            }
        }
        self.call_native(name, values)
    }

    fn call_native(&mut self, name: &str, values: &[Value]) -> EvalResult {
        let mut args = Vec::with_capacity(values.len());
        for value in values {
            args.push(match *value {
                Value::Int(n) => NativeValue::int(n),
                Value::Bool(b) => NativeValue::boolean(b),
                Value::Str(view) => {
                    let text = self.heap.text(view).ok_or_else(dangling_view)?;
                    NativeValue::from_bytes(text.as_bytes())
                }
            });
        }

        let root = self.env.root().arena();
        let mut host = NativeHost::new(root, self.env.depth());
        let Some(result) = self.natives.call(name, &args, &mut host)? else {
            return Err(unknown_identifier(name));
        };

        let value = match result {
            NativeReturn::Void => return Ok(Outcome::Void),
            NativeReturn::Int(n) => Value::Int(n),
            NativeReturn::Bool(b) => Value::Bool(b),
            // Copied into the root arena so it outlives every call scope.
            NativeReturn::Str(text) => {
                Value::Str(self.heap.alloc_str(root, &text).ok_or_else(dangling_view)?)
            }
        };
        Ok(Outcome::Value(value))
    }
}

/// An extern function's result must match its declared return type.
fn check_extern_result(expected: ValueType, outcome: Outcome) -> EvalResult {
    match outcome {
        Outcome::Void if expected == ValueType::Void => Ok(Outcome::Void),
        Outcome::Void => Err(EvalErrorKind::InvalidReturnValue {
            expected,
            found: ValueType::Void,
        }
        .into()),
        Outcome::Value(value) | Outcome::Return(value) if value.ty() == expected => {
            Ok(Outcome::Value(value))
        }
        Outcome::Value(value) | Outcome::Return(value) => Err(EvalErrorKind::InvalidReturnValue {
            expected,
            found: value.ty(),
        }
        .into()),
    }
}
