//! Command handlers for the `elang` binary.
//!
//! Handlers return their result instead of printing diagnostics or exiting,
//! so the binary decides how to report and the tests can inspect them.

mod debug;
mod run;

use std::fs;
use std::path::Path;

use elang_diagnostic::Diagnostic;
use elang_eval::{EvalError, EvalErrorKind};

pub use debug::{lex_file, parse_file};
pub use run::run_file;

/// Read a whole source file.
pub(crate) fn read_file(path: &Path) -> Result<String, Diagnostic> {
    let display = path.display().to_string();
    fs::read_to_string(path).map_err(|err| {
        EvalError::new(EvalErrorKind::ReadFile {
            path: display.clone(),
            reason: err.to_string(),
        })
        .or_path(&display)
        .to_diagnostic()
    })
}
