//! The `run` command: read, lex, parse, and evaluate a file.

use std::path::Path;

use elang_diagnostic::Diagnostic;
use elang_eval::{Completion, SharedPrintHandler};
use tracing::debug;

use super::read_file;
use crate::Config;

/// Run `path` with the settings in `config`, sending `print` output to
/// `output`.
///
/// Errors come back as a diagnostic located in the file that raised them;
/// an `exit(code)` call is a successful [`Completion::Exit`].
pub fn run_file(
    path: &Path,
    config: &Config,
    output: SharedPrintHandler,
) -> Result<Completion, Diagnostic> {
    let source = read_file(path)?;
    let shown = path.display().to_string();
    debug!(path = %shown, bytes = source.len(), "run");

    let mut interpreter = config
        .interpreter()
        .source_path(&shown)
        .print_handler(output)
        .build();
    interpreter
        .eval_source(&source)
        .map_err(|err| err.or_path(&shown).to_diagnostic())
}
