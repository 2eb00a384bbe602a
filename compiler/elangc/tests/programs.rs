//! Whole-program tests through the driver commands.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use elang_diagnostic::{ErrorCategory, ErrorCode};
use elang_eval::{buffer_handler, Completion};
use elangc::{lex_file, parse_file, run_file, Config};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

struct Project {
    dir: TempDir,
}

impl Project {
    fn new() -> Self {
        match tempfile::tempdir() {
            Ok(dir) => Project { dir },
            Err(err) => panic!("failed to create a temp dir: {err}"),
        }
    }

    fn file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Err(err) = fs::write(&path, contents) {
            panic!("failed to write {}: {err}", path.display());
        }
        path
    }
}

fn config(args: &[&str]) -> Config {
    match Config::from_args(args.iter().map(ToString::to_string), |_| None) {
        Ok(config) => config,
        Err(err) => panic!("bad arguments: {err}"),
    }
}

#[test]
fn test_run_program() {
    let project = Project::new();
    let main = project.file(
        "main.e",
        "\
fun fib(n :: int) :: int {
  if n < 2 { return n }
  return fib(n - 1) + fib(n - 2)
}
var i = 0
while i < 8 {
  print(fib(i))
  i = i + 1
}
",
    );

    let out = buffer_handler();
    let result = run_file(&main, &config(&["run", "main.e"]), Arc::clone(&out));
    assert_eq!(result, Ok(Completion::Finished));
    assert_eq!(out.output(), "0\n1\n1\n2\n3\n5\n8\n13\n");
}

#[test]
fn test_runtime_error_diagnostic() {
    let project = Project::new();
    let main = project.file("main.e", "const x = 5\nprint(x)\nx = 6\nprint(x)");

    let out = buffer_handler();
    let Err(diag) = run_file(&main, &config(&["main.e"]), Arc::clone(&out)) else {
        panic!("reassigning a constant must fail");
    };
    assert_eq!(diag.category, ErrorCategory::Runtime);
    assert_eq!(diag.code, ErrorCode::E6005);
    assert_eq!(diag.headline(), "Runtime error on line 3: cannot reassign a constant");
    assert_eq!(diag.path, Some(main.display().to_string()));
    assert_eq!(out.output(), "5\n");
}

#[test]
fn test_error_in_import_names_the_imported_file() {
    let project = Project::new();
    let lib = project.file("lib.e", "fun half(n :: int) :: int {\n  return n / 0\n}");
    let main = project.file(
        "main.e",
        &format!("import \"{}\"\nprint(half(4))", lib.display()),
    );

    let Err(diag) = run_file(&main, &config(&["main.e"]), buffer_handler()) else {
        panic!("division by zero must fail");
    };
    assert_eq!(diag.headline(), "Runtime error on line 2: division by zero");
    assert_eq!(diag.path, Some(lib.display().to_string()));
}

#[test]
fn test_exit_code() {
    let project = Project::new();
    let main = project.file("main.e", "print(\"bye\")\nexit(42)\nprint(\"unreachable\")");

    let out = buffer_handler();
    let result = run_file(&main, &config(&["main.e"]), Arc::clone(&out));
    assert_eq!(result, Ok(Completion::Exit(42)));
    assert_eq!(out.output(), "bye\n");
}

#[test]
fn test_no_builtins_flag() {
    let project = Project::new();
    let main = project.file("main.e", "print(1)");

    let Err(diag) = run_file(&main, &config(&["--no-builtins", "main.e"]), buffer_handler())
    else {
        panic!("print should be unknown");
    };
    assert_eq!(diag.code, ErrorCode::E6001);
    assert_eq!(diag.headline(), "Runtime error on line 1: unknown identifier");
}

#[test]
fn test_missing_native_library() {
    let project = Project::new();
    let main = project.file("main.e", "var n = nativething(1)");
    let missing = project.dir.path().join("libmissing.so");
    let native = format!("--native={}", missing.display());

    let Err(diag) = run_file(&main, &config(&[&native, "main.e"]), buffer_handler()) else {
        panic!("opening a missing library must fail");
    };
    assert_eq!(diag.code, ErrorCode::E3001);
    assert_eq!(diag.headline(), "Runtime error on line 1: failed to open library");
}

#[test]
fn test_missing_file() {
    let project = Project::new();
    let path = project.dir.path().join("absent.e");

    let Err(diag) = run_file(&path, &config(&["absent.e"]), buffer_handler()) else {
        panic!("reading a missing file must fail");
    };
    assert_eq!(diag.code, ErrorCode::E6018);
    assert_eq!(diag.path, Some(path.display().to_string()));
}

#[test]
fn test_lex_dump() {
    let project = Project::new();
    let main = project.file("main.e", "var x = 1\nprint(x)");

    let Ok(dump) = lex_file(&main) else {
        panic!("lexing should succeed");
    };
    let lines: Vec<&str> = dump.lines().collect();
    assert!(lines[0].ends_with("(9 tokens):"));
    assert!(lines[1].starts_with("  Var \"var\" @ line 1"));
    assert!(lines[5].starts_with("  Identifier \"print\" @ line 2"));
}

#[test]
fn test_lex_error() {
    let project = Project::new();
    let main = project.file("main.e", "var ok = 1\nvar s = \"open");

    let Err(diag) = lex_file(&main) else {
        panic!("unterminated string must fail");
    };
    assert_eq!(diag.category, ErrorCategory::Lexer);
    assert_eq!(diag.line, Some(2));
    assert_eq!(diag.path, Some(main.display().to_string()));
}

#[test]
fn test_parse_dump_and_error() {
    let project = Project::new();
    let main = project.file("main.e", "var x = 1 + 2");
    let Ok(dump) = parse_file(&main) else {
        panic!("parsing should succeed");
    };
    assert_eq!(
        dump.lines().skip(1).collect::<Vec<_>>(),
        vec![
            "Declaration var x :: void @1",
            "  Arithmetic + @1",
            "    Number 1 @1",
            "    Number 2 @1",
            "Eof @1",
        ]
    );

    let broken = project.file("broken.e", "var x = 1\nwhile x {\n");
    let Err(diag) = parse_file(&broken) else {
        panic!("unterminated block must fail");
    };
    assert_eq!(diag.category, ErrorCategory::Parser);
    assert_eq!(diag.headline(), "Parser error on line 3: unexpected end of file");
}
