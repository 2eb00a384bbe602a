//! Lexer errors.
//!
//! Lexing stops at the first error; there is no recovery.

use elang_diagnostic::{Diagnostic, ErrorCode};
use elang_ir::Span;


/// A lexer error with its location.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
#[error("{kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    /// Offending text.
    pub span: Span,
    /// 1-based line of the offending text.
    pub line: u32,
}

/// What went wrong while lexing.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum LexErrorKind {
    /// A character that starts no token.
    #[error("unknown token")]
    UnknownToken,
    /// A string literal reached a newline or the end of input.
    #[error("missing quotation mark")]
    UnterminatedString,
    /// Spans are 32-bit.
    #[error("source file exceeds {} bytes", u32::MAX)]
    SourceTooLarge,
}

impl LexErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            LexErrorKind::UnknownToken => ErrorCode::E1001,
            LexErrorKind::UnterminatedString => ErrorCode::E1002,
            LexErrorKind::SourceTooLarge => ErrorCode::E1003,
        }
    }
}

impl LexError {
    pub fn new(kind: LexErrorKind, span: Span, line: u32) -> Self {
        LexError { kind, span, line }
    }

    /// Convert to a diagnostic for reporting.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.kind.code())
            .with_message(self.kind.to_string())
            .with_line(self.line);
        match self.kind {
            LexErrorKind::UnterminatedString => {
                diag.with_note("string literals must close on the line they start")
            }
            LexErrorKind::UnknownToken | LexErrorKind::SourceTooLarge => diag,
        }
    }
}
