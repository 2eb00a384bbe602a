use std::cell::Cell;
use std::path::Path;
use std::ptr;
use std::rc::Rc;
use std::sync::Arc;

use elang_diagnostic::ErrorCode;
use elang_ir::ValueType;
use pretty_assertions::assert_eq;

use super::*;
use crate::{
    buffer_handler, Completion, EvalError, EvalErrorKind, Interpreter, InterpreterBuilder,
    SharedPrintHandler,
};

unsafe fn args<'a>(stack: *mut NativeStack) -> &'a mut NativeStack {
    // SAFETY: the dispatcher passes a valid, exclusive stack.
    unsafe { &mut *stack }
}

unsafe extern "C" fn add(_host: *mut NativeHost, stack: *mut NativeStack) -> NativeResult {
    let stack = unsafe { args(stack) };
    let (Some(b), Some(a)) = (stack.pop(), stack.pop()) else {
        return NativeResult::void();
    };
    NativeResult::value(NativeValue::int(a.int.wrapping_add(b.int)))
}

unsafe extern "C" fn sub(_host: *mut NativeHost, stack: *mut NativeStack) -> NativeResult {
    let stack = unsafe { args(stack) };
    let (Some(b), Some(a)) = (stack.pop(), stack.pop()) else {
        return NativeResult::void();
    };
    NativeResult::value(NativeValue::int(a.int.wrapping_sub(b.int)))
}

unsafe extern "C" fn greeting(_host: *mut NativeHost, _stack: *mut NativeStack) -> NativeResult {
    NativeResult::value(NativeValue::string("hello from native"))
}

unsafe extern "C" fn len(_host: *mut NativeHost, stack: *mut NativeStack) -> NativeResult {
    let stack = unsafe { args(stack) };
    let Some(text) = stack.pop() else {
        return NativeResult::void();
    };
    let bytes = unsafe { text.bytes() }.unwrap_or_default();
    NativeResult::value(NativeValue::int(i64::try_from(bytes.len()).unwrap_or(-1)))
}

unsafe extern "C" fn is_even(_host: *mut NativeHost, stack: *mut NativeStack) -> NativeResult {
    let stack = unsafe { args(stack) };
    let Some(n) = stack.pop() else {
        return NativeResult::void();
    };
    NativeResult::value(NativeValue::boolean(n.int.rem_euclid(2) == 0))
}

unsafe extern "C" fn depth(host: *mut NativeHost, _stack: *mut NativeStack) -> NativeResult {
    let depth = unsafe { (*host).scope_depth() };
    NativeResult::value(NativeValue::int(i64::try_from(depth).unwrap_or(-1)))
}

unsafe extern "C" fn noop(_host: *mut NativeHost, _stack: *mut NativeStack) -> NativeResult {
    NativeResult::void()
}

unsafe extern "C" fn print(_host: *mut NativeHost, _stack: *mut NativeStack) -> NativeResult {
    NativeResult::void()
}

unsafe extern "C" fn bad_tag(_host: *mut NativeHost, _stack: *mut NativeStack) -> NativeResult {
    NativeResult::value(NativeValue {
        tag: 9,
        ..NativeValue::int(0)
    })
}

static NOT_UTF8: &[u8] = &[0xff, 0xfe];

unsafe extern "C" fn bad_utf8(_host: *mut NativeHost, _stack: *mut NativeStack) -> NativeResult {
    NativeResult::value(NativeValue::from_bytes(NOT_UTF8))
}

const fn def(name: &'static str, func: NativeFn, num_args: usize) -> NativeFunctionDef {
    NativeFunctionDef {
        name: name.as_ptr(),
        name_len: name.len(),
        func,
        num_args,
    }
}

struct SyncTable([NativeFunctionDef; 11]);

// SAFETY: every row points at static names and functions.
unsafe impl Sync for SyncTable {}

static TABLE: SyncTable = SyncTable([
    def("add", add, 2),
    def("sub", sub, 2),
    def("greeting", greeting, 0),
    def("len", len, 1),
    def("iseven", is_even, 1),
    def("depth", depth, 0),
    def("noop", noop, 0),
    def("print", print, 1),
    def("badtag", bad_tag, 0),
    def("badutf", bad_utf8, 0),
    // Shadowed by the first `add`.
    def("add", sub, 2),
]);

unsafe extern "C" fn mod_init(count: *mut usize) -> *const NativeFunctionDef {
    unsafe { *count = TABLE.0.len() };
    TABLE.0.as_ptr()
}

unsafe extern "C" fn empty_init(count: *mut usize) -> *const NativeFunctionDef {
    unsafe { *count = 0 };
    ptr::null()
}

unsafe extern "C" fn null_init(count: *mut usize) -> *const NativeFunctionDef {
    unsafe { *count = 3 };
    ptr::null()
}

#[derive(Copy, Clone)]
enum Mode {
    Table(ModInit),
    FailOpen,
    NoEntryPoint,
}

#[derive(Clone)]
struct MockLoader {
    mode: Mode,
    opens: Rc<Cell<usize>>,
}

impl MockLoader {
    fn new(mode: Mode) -> Self {
        MockLoader {
            mode,
            opens: Rc::new(Cell::new(0)),
        }
    }
}

struct MockLibrary {
    mode: Mode,
}

impl NativeLoader for MockLoader {
    fn open(&self, path: &Path) -> Result<Box<dyn NativeLibrary>, FfiError> {
        self.opens.set(self.opens.get().saturating_add(1));
        match self.mode {
            Mode::FailOpen => Err(FfiError::Open {
                path: path.display().to_string(),
                reason: "cannot open shared object file".into(),
            }),
            mode => Ok(Box::new(MockLibrary { mode })),
        }
    }
}

impl NativeLibrary for MockLibrary {
    fn resolve(&self, symbol: &str) -> Result<ModInit, FfiError> {
        match self.mode {
            Mode::Table(init) if symbol == ENTRY_POINT => Ok(init),
            _ => Err(FfiError::MissingSymbol {
                symbol: symbol.to_string(),
                reason: "undefined symbol".into(),
            }),
        }
    }
}

fn interpreter_with(loader: MockLoader, builtins: bool) -> (Interpreter, SharedPrintHandler) {
    let out = buffer_handler();
    let interpreter = InterpreterBuilder::new()
        .print_handler(Arc::clone(&out))
        .native_library("libmock.so")
        .loader(loader)
        .builtins(builtins)
        .build();
    (interpreter, out)
}

fn run_native(source: &str) -> (Result<Completion, EvalError>, String) {
    let (mut interpreter, out) = interpreter_with(MockLoader::new(Mode::Table(mod_init)), true);
    let result = interpreter.eval_source(source);
    (result, out.output())
}

fn native_output(source: &str) -> String {
    let (result, output) = run_native(source);
    assert_eq!(result, Ok(Completion::Finished));
    output
}

fn native_error(source: &str) -> EvalError {
    match run_native(source).0 {
        Ok(completion) => panic!("expected an error, finished with {completion:?}"),
        Err(err) => err,
    }
}

#[test]
fn test_native_calls() {
    let source = "\
print(add(2, 3))
print(sub(10, 3))
print(greeting())
print(len(\"four\"))
if iseven(4) { print(\"even\") }";
    assert_eq!(native_output(source), "5\n7\nhello from native\n4\neven\n");
}

#[test]
fn test_native_string_outlives_call_scope() {
    let source = "\
fun wrap() :: string {
  return greeting()
}
var w = wrap()
print(w)";
    assert_eq!(native_output(source), "hello from native\n");
}

#[test]
fn test_extern_declarations() {
    let source = "\
fun extern add(a :: int, b :: int) :: int {}
fun extern noop() {}
noop()
print(add(4, 5))";
    assert_eq!(native_output(source), "9\n");

    assert_eq!(
        native_error("fun extern add(a :: int, b :: int) :: int {}\nadd(\"x\", 1)").kind,
        EvalErrorKind::ArgumentTypeMismatch {
            expected: ValueType::Int,
            found: ValueType::String,
        }
    );
    assert_eq!(
        native_error("fun extern greeting() :: int {}\ngreeting()").kind,
        EvalErrorKind::InvalidReturnValue {
            expected: ValueType::Int,
            found: ValueType::String,
        }
    );
    assert_eq!(
        native_error("fun extern noop() :: bool {}\nnoop()").kind,
        EvalErrorKind::InvalidReturnValue {
            expected: ValueType::Bool,
            found: ValueType::Void,
        }
    );
}

#[test]
fn test_unknown_native() {
    let err = native_error("\nmissing()");
    assert_eq!(
        err.kind,
        EvalErrorKind::UnknownNative {
            name: "missing".into()
        }
    );
    assert_eq!(err.line, Some(2));
    assert_eq!(err.kind.code(), ErrorCode::E3003);
}

#[test]
fn test_native_arity() {
    assert_eq!(
        native_error("add(1)").kind,
        EvalErrorKind::NativeArity {
            name: "add".into(),
            expected: 2,
            found: 1,
        }
    );
}

#[test]
fn test_void_native_result_cannot_be_stored() {
    assert_eq!(
        native_error("var v = noop()").kind,
        EvalErrorKind::VoidAssignment
    );
}

#[test]
fn test_malformed_results() {
    assert!(matches!(
        native_error("badtag()").kind,
        EvalErrorKind::MalformedNative { name, .. } if name == "badtag"
    ));
    assert!(matches!(
        native_error("var s = badutf()").kind,
        EvalErrorKind::MalformedNative { name, .. } if name == "badutf"
    ));
}

#[test]
fn test_scope_depth_is_reported() {
    let source = "\
print(depth())
fun nested() :: int {
  return depth()
}
print(nested())";
    assert_eq!(native_output(source), "0\n1\n");
}

#[test]
fn test_library_is_opened_once_and_lazily() {
    let loader = MockLoader::new(Mode::Table(mod_init));
    let opens = Rc::clone(&loader.opens);
    let (mut interpreter, out) = interpreter_with(loader, true);

    assert_eq!(interpreter.eval_source("print(1)"), Ok(Completion::Finished));
    assert_eq!(opens.get(), 0);

    let source = "print(add(1, 1))\nprint(add(2, 2))\nnoop()";
    assert_eq!(interpreter.eval_source(source), Ok(Completion::Finished));
    assert_eq!(opens.get(), 1);
    assert_eq!(out.output(), "1\n2\n4\n");
}

#[test]
fn test_builtins_take_precedence() {
    let (mut with_builtins, out) = interpreter_with(MockLoader::new(Mode::Table(mod_init)), true);
    assert_eq!(with_builtins.eval_source("print(7)"), Ok(Completion::Finished));
    assert_eq!(out.output(), "7\n");

    let (mut without, out) = interpreter_with(MockLoader::new(Mode::Table(mod_init)), false);
    assert_eq!(without.eval_source("print(7)"), Ok(Completion::Finished));
    assert_eq!(out.output(), "");
    assert!(matches!(
        without.eval_source("exit(1)").map_err(|err| err.kind),
        Err(EvalErrorKind::UnknownNative { name }) if name == "exit"
    ));
}

#[test]
fn test_open_failure() {
    let (mut interpreter, _) = interpreter_with(MockLoader::new(Mode::FailOpen), true);
    let Err(err) = interpreter.eval_source("add(1, 2)") else {
        panic!("open should fail");
    };
    assert!(matches!(err.kind, EvalErrorKind::OpenLibrary { ref path, .. } if path == "libmock.so"));
    assert_eq!(err.kind.code(), ErrorCode::E3001);
}

#[test]
fn test_missing_entry_point() {
    let (mut interpreter, _) = interpreter_with(MockLoader::new(Mode::NoEntryPoint), true);
    let Err(err) = interpreter.eval_source("add(1, 2)") else {
        panic!("resolve should fail");
    };
    assert!(matches!(
        err.kind,
        EvalErrorKind::EntryPointMissing { ref symbol, .. } if symbol == ENTRY_POINT
    ));
}

#[test]
fn test_empty_and_null_tables() {
    let (mut interpreter, _) = interpreter_with(MockLoader::new(Mode::Table(empty_init)), true);
    assert_eq!(
        interpreter.eval_source("add(1, 2)").map_err(|err| err.kind),
        Err(EvalErrorKind::UnknownNative { name: "add".into() })
    );

    let (mut interpreter, _) = interpreter_with(MockLoader::new(Mode::Table(null_init)), true);
    assert!(matches!(
        interpreter.eval_source("add(1, 2)").map_err(|err| err.kind),
        Err(EvalErrorKind::MalformedNative { name, .. }) if name == ENTRY_POINT
    ));
}

#[test]
fn test_stack_pops_last_argument_first() {
    let values = [NativeValue::int(1), NativeValue::boolean(true), NativeValue::string("s")];
    let mut stack = NativeStack::new(&values);
    assert_eq!(stack.len(), 3);

    assert_eq!(stack.pop().and_then(|v| v.tag()), Some(NativeTag::String));
    assert_eq!(stack.pop().map(|v| v.boolean), Some(true));
    assert_eq!(stack.pop().map(|v| v.int), Some(1));
    assert!(stack.pop().is_none());
    assert!(stack.is_empty());
}

#[test]
fn test_value_bytes() {
    let text = NativeValue::string("abc");
    assert_eq!(unsafe { text.bytes() }, Some(&b"abc"[..]));
    assert_eq!(unsafe { NativeValue::string("").bytes() }, Some(&b""[..]));
    assert_eq!(unsafe { NativeValue::int(3).bytes() }, None);
    assert_eq!(NativeTag::from_raw(2), Some(NativeTag::Bool));
    assert_eq!(NativeTag::from_raw(7), None);
}
