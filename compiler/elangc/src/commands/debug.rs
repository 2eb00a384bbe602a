//! Debug commands: `lex` and `parse` for inspecting the front end.

use std::fmt::Write;
use std::path::Path;

use elang_diagnostic::Diagnostic;
use elang_ir::{dump_module, Heap, DEFAULT_REGION_SIZE};

use super::read_file;

/// Token stream of `path`, one token per line.
pub fn lex_file(path: &Path) -> Result<String, Diagnostic> {
    let source = read_file(path)?;
    let display = path.display().to_string();
    let tokens = elang_lexer::lex(&source).map_err(|err| err.to_diagnostic().with_path(&display))?;

    let mut out = format!("Tokens for '{display}' ({} tokens):\n", tokens.len());
    for token in &tokens {
        let _ = writeln!(
            out,
            "  {:?} {:?} @ line {}, {}",
            token.kind,
            token.text(&source),
            token.line,
            token.span
        );
    }
    Ok(out)
}

/// Syntax tree of `path`, in the indented dump format.
pub fn parse_file(path: &Path) -> Result<String, Diagnostic> {
    let source = read_file(path)?;
    let display = path.display().to_string();
    let tokens = elang_lexer::lex(&source).map_err(|err| err.to_diagnostic().with_path(&display))?;

    let mut heap = Heap::new();
    let arena = heap.create(DEFAULT_REGION_SIZE);
    let Some(origin) = heap.alloc_str(arena, &source) else {
        return Err(elang_eval::errors::dangling_view().to_diagnostic());
    };
    let module = elang_parse::parse(&tokens, &source, origin)
        .map_err(|err| err.to_diagnostic().with_path(&display))?;

    Ok(format!("Syntax tree for '{display}':\n{}", dump_module(&module, &heap)))
}
