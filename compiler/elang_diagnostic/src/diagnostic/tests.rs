use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_diagnostic_builder() {
    let diag = Diagnostic::error(ErrorCode::E6001)
        .with_message("unknown identifier")
        .with_line(7)
        .with_path("main.e")
        .with_note("`y` is not declared in any visible scope");

    assert_eq!(diag.code, ErrorCode::E6001);
    assert_eq!(diag.category, ErrorCategory::Runtime);
    assert_eq!(diag.line, Some(7));
    assert_eq!(diag.path.as_deref(), Some("main.e"));
    assert_eq!(diag.notes.len(), 1);
}

#[test]
fn test_category_follows_code() {
    assert_eq!(ErrorCategory::of(ErrorCode::E1002), ErrorCategory::Lexer);
    assert_eq!(ErrorCategory::of(ErrorCode::E2003), ErrorCategory::Parser);
    assert_eq!(ErrorCategory::of(ErrorCode::E3001), ErrorCategory::Runtime);
    assert_eq!(ErrorCategory::of(ErrorCode::E6015), ErrorCategory::Runtime);
}

#[test]
fn test_headline_with_and_without_line() {
    let with_line = Diagnostic::error(ErrorCode::E1001)
        .with_message("unknown token")
        .with_line(3);
    assert_eq!(with_line.headline(), "Lexer error on line 3: unknown token");

    let without = Diagnostic::error(ErrorCode::E3001).with_message("failed to open library");
    assert_eq!(without.headline(), "Runtime error: failed to open library");
}

#[test]
fn test_inner_path_wins() {
    let diag = Diagnostic::error(ErrorCode::E2001)
        .with_path("lib.e")
        .with_path("main.e");
    assert_eq!(diag.path.as_deref(), Some("lib.e"));
}

#[test]
fn test_display_includes_code() {
    let diag = Diagnostic::error(ErrorCode::E6005)
        .with_message("cannot reassign a constant")
        .with_line(2);
    assert_eq!(
        diag.to_string(),
        "Runtime error on line 2: cannot reassign a constant [E6005]"
    );
}
