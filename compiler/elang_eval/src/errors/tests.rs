use super::*;
use elang_diagnostic::ErrorCategory;
use elang_ir::Span;
use elang_lexer::LexErrorKind;
use pretty_assertions::assert_eq;

#[test]
fn test_messages_use_short_wording() {
    assert_eq!(
        EvalErrorKind::ConstReassignment { name: "x".into() }.to_string(),
        "cannot reassign a constant"
    );
    assert_eq!(
        EvalErrorKind::IntegerOverflow {
            operation: "multiplication"
        }
        .to_string(),
        "integer overflow in multiplication"
    );
    assert_eq!(
        EvalErrorKind::MissingReturn {
            expected: ValueType::Int
        }
        .to_string(),
        "no return statement found inside function"
    );
}

#[test]
fn test_innermost_line_and_path_win() {
    let err = unknown_identifier("y").or_line(4).or_line(9);
    assert_eq!(err.line, Some(4));

    let err = err.or_path("inner.e").or_path("outer.e");
    assert_eq!(err.path.as_deref(), Some("inner.e"));
}

#[test]
fn test_runtime_diagnostic() {
    let diag = name_conflict("x").or_line(3).to_diagnostic();
    assert_eq!(diag.category, ErrorCategory::Runtime);
    assert_eq!(diag.code, ErrorCode::E6002);
    assert_eq!(diag.headline(), "Runtime error on line 3: name conflict");
    assert_eq!(
        diag.notes,
        vec!["`x` is already declared in a visible scope".to_string()]
    );
}

#[test]
fn test_wrapped_lex_error_keeps_its_category_and_line() {
    let lex = LexError::new(LexErrorKind::UnknownToken, Span::new(0, 1), 7);
    let err = EvalError::from(lex).or_line(2).or_path("lib.e");
    let diag = err.to_diagnostic();

    assert_eq!(diag.category, ErrorCategory::Lexer);
    assert_eq!(diag.line, Some(7));
    assert_eq!(diag.path.as_deref(), Some("lib.e"));
}

#[test]
fn test_ffi_errors_convert() {
    let err = EvalError::from(FfiError::MissingSymbol {
        symbol: "e_mod_init".into(),
        reason: "undefined symbol".into(),
    });
    assert_eq!(err.kind.code(), ErrorCode::E3002);
    assert_eq!(err.to_string(), "failed to retrieve function pointer");
    assert_eq!(err.to_diagnostic().category, ErrorCategory::Runtime);
}

#[test]
fn test_exit_code() {
    let err = EvalError::new(EvalErrorKind::ExitRequested { code: 2 });
    assert_eq!(err.exit_code(), Some(2));
    assert_eq!(dangling_view().exit_code(), None);
}
