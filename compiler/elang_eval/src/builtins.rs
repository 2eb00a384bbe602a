//! Functions the interpreter provides itself.
//!
//! Builtins are matched by name and argument count ahead of the native
//! library. A name that is not a builtin falls through to the library.

use elang_ir::{Heap, ValueType};

use crate::errors::{argument_type_mismatch, dangling_view, wrong_argument_count};
use crate::{EvalError, EvalErrorKind, Outcome, PrintHandlerImpl, Value};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) enum Builtin {
    /// `print(value)`: the value and a newline.
    Print,
    /// `exit(code)`: stop with the given status.
    Exit,
}

impl Builtin {
    pub(crate) fn lookup(name: &str) -> Option<Builtin> {
        match name {
            "print" => Some(Builtin::Print),
            "exit" => Some(Builtin::Exit),
            _ => None,
        }
    }

    pub(crate) fn arity(self) -> usize {
        match self {
            Builtin::Print | Builtin::Exit => 1,
        }
    }

    pub(crate) fn call(
        self,
        args: &[Value],
        heap: &Heap,
        out: &PrintHandlerImpl,
    ) -> Result<Outcome, EvalError> {
        let [arg] = args else {
            return Err(wrong_argument_count(self.arity(), args.len()));
        };
        match self {
            Builtin::Print => {
                let text = arg.display(heap).ok_or_else(dangling_view)?;
                out.println(&text);
                Ok(Outcome::Void)
            }
            Builtin::Exit => {
                let Value::Int(code) = *arg else {
                    return Err(argument_type_mismatch(ValueType::Int, arg.ty()));
                };
                // Statuses outside the platform range become a generic failure.
                let code = i32::try_from(code).unwrap_or(1);
                Err(EvalErrorKind::ExitRequested { code }.into())
            }
        }
    }
}
