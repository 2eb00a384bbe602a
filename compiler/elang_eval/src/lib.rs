#![deny(clippy::arithmetic_side_effects)]
//! Tree-walking interpreter for elang.
//!
//! # Architecture
//!
//! - [`Environment`]: a stack of scopes. Every scope owns an arena in the
//!   interpreter's [`Heap`](elang_ir::Heap); popping the scope releases it.
//! - [`Interpreter`]: dispatches on [`NodeKind`](elang_ir::NodeKind), walking
//!   one [`Module`](elang_ir::Module) at a time. Calls into functions declared
//!   by an imported file switch to that file's module for the duration.
//! - Calls resolve against user functions first, then the builtin `print` and
//!   `exit`, then the native library loaded through [`NativeLoader`].
//!
//! Every failure is an [`EvalError`] returned up the call chain; nothing here
//! terminates the process.

mod builtins;
mod environment;
pub mod errors;
pub mod ffi;
pub mod interpreter;
mod operators;
mod print_handler;
mod value;

pub use environment::{AssignError, Environment, FunctionRecord, Scope, Variable};
pub use errors::{EvalError, EvalErrorKind, EvalResult, Outcome};
pub use ffi::{
    DylibLoader, FfiError, NativeFn, NativeFunctionDef, NativeHost, NativeLibrary, NativeLoader,
    NativeResult, NativeStack, NativeTag, NativeValue, ModInit, ENTRY_POINT,
};
pub use interpreter::{Completion, Interpreter, InterpreterBuilder};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use value::Value;
