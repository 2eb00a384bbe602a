use std::fmt;

use crate::ErrorCode;

#[cfg(test)]
mod tests;

/// Which phase a diagnostic belongs to, as shown to users.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCategory {
    Lexer,
    Parser,
    Runtime,
}

impl ErrorCategory {
    /// Category implied by an error code's phase.
    pub fn of(code: ErrorCode) -> Self {
        if code.is_lexer_error() {
            ErrorCategory::Lexer
        } else if code.is_parser_error() {
            ErrorCategory::Parser
        } else {
            ErrorCategory::Runtime
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCategory::Lexer => "Lexer error",
            ErrorCategory::Parser => "Parser error",
            ErrorCategory::Runtime => "Runtime error",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fatal error ready for reporting.
///
/// Every phase error converts into one of these; only the driver decides how
/// to print it.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub category: ErrorCategory,
    pub message: String,
    /// 1-based source line, when the phase tracked one.
    pub line: Option<u32>,
    /// File the error was raised in.
    pub path: Option<String>,
    pub notes: Vec<String>,
}

impl Diagnostic {
    /// Create a diagnostic; the category follows from the code.
    pub fn error(code: ErrorCode) -> Self {
        Diagnostic {
            code,
            category: ErrorCategory::of(code),
            message: String::new(),
            line: None,
            path: None,
            notes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    #[must_use]
    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    /// Set the path unless an inner phase already recorded a more precise one.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        if self.path.is_none() {
            self.path = Some(path.into());
        }
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Header line: `<Category> on line <N>: <message>`.
    pub fn headline(&self) -> String {
        match self.line {
            Some(line) => format!("{} on line {line}: {}", self.category, self.message),
            None => format!("{}: {}", self.category, self.message),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.headline(), self.code)
    }
}

impl std::error::Error for Diagnostic {}
