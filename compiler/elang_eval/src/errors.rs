//! Evaluation errors.
//!
//! `EvalErrorKind` is the typed category; its `Display` is the short message
//! users see. Details (names, types) go into diagnostic notes, mirroring the
//! lexer and parser errors.
//!
//! Errors are created without a location. The evaluator fills in the line of
//! the innermost node that failed. The file path comes from the function
//! whose body failed, or from the `import` that was running.

use elang_diagnostic::{Diagnostic, ErrorCode};
use elang_ir::{CondOp, ValueType};
use elang_lexer::LexError;
use elang_parse::ParseError;

use crate::ffi::FfiError;
use crate::Value;

#[cfg(test)]
mod tests;

/// What evaluating a node produced.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Outcome {
    /// No value: a statement, or a call to a function without a return type.
    Void,
    Value(Value),
    /// A `return` statement fired; unwinds to the enclosing call.
    Return(Value),
}

/// Result of evaluating a node.
pub type EvalResult = Result<Outcome, EvalError>;

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{kind}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Line of the node that failed.
    pub line: Option<u32>,
    /// Imported file the error was raised in. `None` for the main file.
    pub path: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum EvalErrorKind {
    #[error("{0}")]
    Lex(LexError),
    #[error("{0}")]
    Parse(ParseError),

    // Names
    #[error("unknown identifier")]
    UnknownIdentifier { name: String },
    #[error("name conflict")]
    NameConflict { name: String },

    // Bindings
    #[error("type conflict")]
    TypeConflict {
        declared: ValueType,
        found: ValueType,
    },
    #[error("cannot assign a void type to a variable")]
    VoidAssignment,
    #[error("cannot reassign a constant")]
    ConstReassignment { name: String },
    #[error("cannot assign a variable a value of different type")]
    AssignmentTypeChange {
        expected: ValueType,
        found: ValueType,
    },

    // Calls
    #[error("wrong amount of arguments provided")]
    WrongArgumentCount { expected: usize, found: usize },
    #[error("argument type does not match parameter type")]
    ArgumentTypeMismatch {
        expected: ValueType,
        found: ValueType,
    },
    #[error("cannot pass a void value as an argument")]
    VoidArgument,
    #[error("cannot return outside of function")]
    ReturnOutsideFunction,
    #[error("invalid return value")]
    InvalidReturnValue {
        expected: ValueType,
        found: ValueType,
    },
    #[error("cannot return a void type")]
    VoidReturn,
    #[error("no return statement found inside function")]
    MissingReturn { expected: ValueType },

    // Operators
    #[error("cannot compare two values of different types")]
    ComparisonTypeMismatch { lhs: ValueType, rhs: ValueType },
    #[error("invalid comparison")]
    InvalidComparison { op: CondOp },
    #[error("condition must be a boolean")]
    ConditionNotBool { found: ValueType },
    #[error("division by zero")]
    DivisionByZero,
    #[error("modulo by zero")]
    ModuloByZero,
    #[error("integer overflow in {operation}")]
    IntegerOverflow { operation: &'static str },
    #[error("arithmetic requires integer operands")]
    NonIntegerOperand { found: ValueType },

    // Memory and files
    #[error("failed to read file")]
    ReadFile { path: String, reason: String },
    #[error("dangling string view")]
    DanglingView,

    // Native library
    #[error("failed to open library")]
    OpenLibrary { path: String, reason: String },
    #[error("failed to retrieve function pointer")]
    EntryPointMissing { symbol: String, reason: String },
    #[error("unknown identifier")]
    UnknownNative { name: String },
    #[error("wrong amount of arguments provided")]
    NativeArity {
        name: String,
        expected: usize,
        found: usize,
    },
    #[error("invalid value returned by native function")]
    MalformedNative { name: String, reason: String },

    /// `exit(code)` was called. Not a failure; the interpreter turns it into
    /// [`Completion::Exit`](crate::Completion::Exit) at the top level.
    #[error("exit requested with status {code}")]
    ExitRequested { code: i32 },
}

impl EvalErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            EvalErrorKind::Lex(err) => err.kind.code(),
            EvalErrorKind::Parse(err) => err.kind.code(),
            EvalErrorKind::UnknownIdentifier { .. } => ErrorCode::E6001,
            EvalErrorKind::NameConflict { .. } => ErrorCode::E6002,
            EvalErrorKind::TypeConflict { .. } => ErrorCode::E6003,
            EvalErrorKind::VoidAssignment => ErrorCode::E6004,
            EvalErrorKind::ConstReassignment { .. } => ErrorCode::E6005,
            EvalErrorKind::AssignmentTypeChange { .. } => ErrorCode::E6006,
            EvalErrorKind::WrongArgumentCount { .. } => ErrorCode::E6007,
            EvalErrorKind::ReturnOutsideFunction => ErrorCode::E6008,
            EvalErrorKind::InvalidReturnValue { .. } => ErrorCode::E6009,
            EvalErrorKind::VoidReturn => ErrorCode::E6010,
            EvalErrorKind::MissingReturn { .. } => ErrorCode::E6011,
            EvalErrorKind::ComparisonTypeMismatch { .. } => ErrorCode::E6012,
            EvalErrorKind::InvalidComparison { .. } => ErrorCode::E6013,
            EvalErrorKind::ConditionNotBool { .. } => ErrorCode::E6014,
            EvalErrorKind::DivisionByZero => ErrorCode::E6015,
            EvalErrorKind::ModuloByZero => ErrorCode::E6016,
            EvalErrorKind::IntegerOverflow { .. } => ErrorCode::E6017,
            EvalErrorKind::ReadFile { .. } => ErrorCode::E6018,
            EvalErrorKind::DanglingView => ErrorCode::E6019,
            EvalErrorKind::NonIntegerOperand { .. } => ErrorCode::E6020,
            EvalErrorKind::ArgumentTypeMismatch { .. } => ErrorCode::E6021,
            EvalErrorKind::VoidArgument => ErrorCode::E6022,
            EvalErrorKind::ExitRequested { .. } => ErrorCode::E6023,
            EvalErrorKind::OpenLibrary { .. } => ErrorCode::E3001,
            EvalErrorKind::EntryPointMissing { .. } => ErrorCode::E3002,
            EvalErrorKind::UnknownNative { .. } => ErrorCode::E3003,
            EvalErrorKind::NativeArity { .. } => ErrorCode::E3004,
            EvalErrorKind::MalformedNative { .. } => ErrorCode::E3005,
        }
    }

    /// Secondary detail shown under the message.
    fn note(&self) -> Option<String> {
        match self {
            EvalErrorKind::UnknownIdentifier { name } => {
                Some(format!("`{name}` is not declared in any enclosing scope"))
            }
            EvalErrorKind::NameConflict { name } => {
                Some(format!("`{name}` is already declared in a visible scope"))
            }
            EvalErrorKind::ConstReassignment { name } => {
                Some(format!("`{name}` was declared with `const`"))
            }
            EvalErrorKind::TypeConflict { declared, found } => {
                Some(format!("declared `{declared}`, initializer is `{found}`"))
            }
            EvalErrorKind::AssignmentTypeChange { expected, found }
            | EvalErrorKind::ArgumentTypeMismatch { expected, found }
            | EvalErrorKind::InvalidReturnValue { expected, found } => {
                Some(format!("expected `{expected}`, found `{found}`"))
            }
            EvalErrorKind::WrongArgumentCount { expected, found } => {
                Some(format!("expected {expected}, found {found}"))
            }
            EvalErrorKind::NativeArity {
                name,
                expected,
                found,
            } => Some(format!(
                "native `{name}` takes {expected}, {found} provided"
            )),
            EvalErrorKind::MissingReturn { expected } => {
                Some(format!("function must return `{expected}`"))
            }
            EvalErrorKind::ComparisonTypeMismatch { lhs, rhs } => {
                Some(format!("left is `{lhs}`, right is `{rhs}`"))
            }
            EvalErrorKind::InvalidComparison { op } => {
                Some(format!("operands do not support `{}`", op.symbol()))
            }
            EvalErrorKind::ConditionNotBool { found } | EvalErrorKind::NonIntegerOperand { found } => {
                Some(format!("found `{found}`"))
            }
            EvalErrorKind::ReadFile { path, reason } | EvalErrorKind::OpenLibrary { path, reason } => {
                Some(format!("{path}: {reason}"))
            }
            EvalErrorKind::EntryPointMissing { symbol, reason } => {
                Some(format!("`{symbol}`: {reason}"))
            }
            EvalErrorKind::UnknownNative { name } => {
                Some(format!("`{name}` is not exported by the native library"))
            }
            EvalErrorKind::MalformedNative { name, reason } => Some(format!("`{name}`: {reason}")),
            EvalErrorKind::Lex(_)
            | EvalErrorKind::Parse(_)
            | EvalErrorKind::VoidAssignment
            | EvalErrorKind::VoidArgument
            | EvalErrorKind::ReturnOutsideFunction
            | EvalErrorKind::VoidReturn
            | EvalErrorKind::DivisionByZero
            | EvalErrorKind::ModuloByZero
            | EvalErrorKind::IntegerOverflow { .. }
            | EvalErrorKind::DanglingView
            | EvalErrorKind::ExitRequested { .. } => None,
        }
    }
}

impl EvalError {
    pub fn new(kind: EvalErrorKind) -> Self {
        EvalError {
            kind,
            line: None,
            path: None,
        }
    }

    /// Record `line` unless an inner node already did.
    #[must_use]
    pub fn or_line(mut self, line: u32) -> Self {
        if self.line.is_none() {
            self.line = Some(line);
        }
        self
    }

    /// Record `path` unless an inner call or import already did.
    #[must_use]
    pub fn or_path(mut self, path: &str) -> Self {
        if self.path.is_none() {
            self.path = Some(path.to_string());
        }
        self
    }

    /// Status requested by `exit`, if this is an exit request.
    pub fn exit_code(&self) -> Option<i32> {
        match self.kind {
            EvalErrorKind::ExitRequested { code } => Some(code),
            _ => None,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = match &self.kind {
            EvalErrorKind::Lex(err) => err.to_diagnostic(),
            EvalErrorKind::Parse(err) => err.to_diagnostic(),
            kind => {
                let diag = Diagnostic::error(kind.code()).with_message(kind.to_string());
                let diag = match self.line {
                    Some(line) => diag.with_line(line),
                    None => diag,
                };
                match kind.note() {
                    Some(note) => diag.with_note(note),
                    None => diag,
                }
            }
        };
        match &self.path {
            Some(path) => diag.with_path(path.clone()),
            None => diag,
        }
    }
}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        EvalError::new(kind)
    }
}

impl From<LexError> for EvalError {
    fn from(err: LexError) -> Self {
        EvalError::new(EvalErrorKind::Lex(err))
    }
}

impl From<ParseError> for EvalError {
    fn from(err: ParseError) -> Self {
        EvalError::new(EvalErrorKind::Parse(err))
    }
}

impl From<FfiError> for EvalError {
    fn from(err: FfiError) -> Self {
        let kind = match err {
            FfiError::Open { path, reason } => EvalErrorKind::OpenLibrary { path, reason },
            FfiError::MissingSymbol { symbol, reason } => {
                EvalErrorKind::EntryPointMissing { symbol, reason }
            }
        };
        EvalError::new(kind)
    }
}

// Factories

pub fn unknown_identifier(name: &str) -> EvalError {
    EvalErrorKind::UnknownIdentifier {
        name: name.to_string(),
    }
    .into()
}

pub fn name_conflict(name: &str) -> EvalError {
    EvalErrorKind::NameConflict {
        name: name.to_string(),
    }
    .into()
}

pub fn dangling_view() -> EvalError {
    EvalErrorKind::DanglingView.into()
}

pub fn wrong_argument_count(expected: usize, found: usize) -> EvalError {
    EvalErrorKind::WrongArgumentCount { expected, found }.into()
}

pub fn argument_type_mismatch(expected: ValueType, found: ValueType) -> EvalError {
    EvalErrorKind::ArgumentTypeMismatch { expected, found }.into()
}

pub fn integer_overflow(operation: &'static str) -> EvalError {
    EvalErrorKind::IntegerOverflow { operation }.into()
}
