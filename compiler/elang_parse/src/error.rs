//! Parse error types.
//!
//! Parsing stops at the first error. Each error records what was found and,
//! for `expect` failures, what was wanted; the user-facing message keeps the
//! short wording and the details go into a diagnostic note.

use elang_diagnostic::{Diagnostic, ErrorCode};
use elang_ir::{Span, TokenKind};


#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
#[error("{kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
    pub line: u32,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum ParseErrorKind {
    /// A specific token was required.
    #[error("unexpected token")]
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
    },
    /// No expression can start with this token.
    #[error("syntax error")]
    SyntaxError { found: TokenKind },
    /// No statement can start with this token.
    #[error("unknown statement")]
    UnknownStatement { found: TokenKind },
    /// Type annotation is not one of `int`, `string`, `bool`, `void`.
    #[error("invalid type name")]
    InvalidTypeName { found: TokenKind },
    /// Input ended inside a construct.
    #[error("unexpected end of file")]
    UnexpectedEof,
    /// Number literal does not fit in 64 bits.
    #[error("integer literal out of range")]
    IntegerOutOfRange,
    /// `fun extern` declares a signature only.
    #[error("extern function cannot have a body")]
    ExternWithBody,
}

impl ParseErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            ParseErrorKind::UnexpectedToken { .. } => ErrorCode::E2001,
            ParseErrorKind::SyntaxError { .. } | ParseErrorKind::ExternWithBody => {
                ErrorCode::E2002
            }
            ParseErrorKind::UnknownStatement { .. } => ErrorCode::E2003,
            ParseErrorKind::InvalidTypeName { .. } => ErrorCode::E2004,
            ParseErrorKind::UnexpectedEof => ErrorCode::E2005,
            ParseErrorKind::IntegerOutOfRange => ErrorCode::E2006,
        }
    }
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span, line: u32) -> Self {
        ParseError { kind, span, line }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.kind.code())
            .with_message(self.kind.to_string())
            .with_line(self.line);
        match &self.kind {
            ParseErrorKind::UnexpectedToken { expected, found } => {
                diag.with_note(format!("expected `{expected}`, found `{found}`"))
            }
            ParseErrorKind::SyntaxError { found } => {
                diag.with_note(format!("expected an expression, found `{found}`"))
            }
            ParseErrorKind::UnknownStatement { found } => {
                diag.with_note(format!("`{found}` cannot start a statement"))
            }
            ParseErrorKind::InvalidTypeName { found } => diag.with_note(format!(
                "expected one of `int`, `string`, `bool`, `void`, found `{found}`"
            )),
            ParseErrorKind::UnexpectedEof
            | ParseErrorKind::IntegerOutOfRange
            | ParseErrorKind::ExternWithBody => diag,
        }
    }
}
