//! Name lookup and invocation of native functions.

use std::path::{Path, PathBuf};
use std::slice;

use rustc_hash::FxHashMap;
use tracing::debug;

use super::abi::{
    NativeFn, NativeFunctionDef, NativeHost, NativeResult, NativeStack, NativeTag, NativeValue,
    ENTRY_POINT,
};
use super::loader::{NativeLibrary, NativeLoader};
use crate::{EvalError, EvalErrorKind};

#[derive(Copy, Clone)]
struct NativeEntry {
    func: NativeFn,
    num_args: usize,
}

/// A native result after validation, owning any returned text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum NativeReturn {
    Void,
    Int(i64),
    Bool(bool),
    Str(String),
}

struct NativeTable {
    functions: FxHashMap<String, NativeEntry>,
    /// Keeps every `func` pointer mapped.
    _library: Box<dyn NativeLibrary>,
}

/// Dispatches calls to the configured native library.
///
/// The library is opened on the first native call and its table is kept for
/// the life of the interpreter.
pub(crate) struct NativeDispatcher {
    loader: Box<dyn NativeLoader>,
    path: Option<PathBuf>,
    table: Option<NativeTable>,
}

impl NativeDispatcher {
    pub(crate) fn new(loader: Box<dyn NativeLoader>, path: Option<PathBuf>) -> Self {
        NativeDispatcher {
            loader,
            path,
            table: None,
        }
    }

    /// Call `name` with `args` in push order.
    ///
    /// `Ok(None)` means no library is configured at all. A returned string
    /// is copied out before this returns.
    pub(crate) fn call(
        &mut self,
        name: &str,
        args: &[NativeValue],
        host: &mut NativeHost,
    ) -> Result<Option<NativeReturn>, EvalError> {
        let Some(table) = self.table()? else {
            return Ok(None);
        };
        let Some(entry) = table.functions.get(name).copied() else {
            return Err(EvalErrorKind::UnknownNative {
                name: name.to_string(),
            }
            .into());
        };
        if entry.num_args != args.len() {
            return Err(EvalErrorKind::NativeArity {
                name: name.to_string(),
                expected: entry.num_args,
                found: args.len(),
            }
            .into());
        }

        debug!(name, args = args.len(), "native call");
        let mut stack = NativeStack::new(args);
        // SAFETY: `func` came from the library's table and the library is
        // still loaded; the stack and host outlive the call.
        let result = unsafe { (entry.func)(host, &mut stack) };
        convert_result(name, result).map(Some)
    }

    fn table(&mut self) -> Result<Option<&NativeTable>, EvalError> {
        let Some(path) = &self.path else {
            return Ok(None);
        };
        if self.table.is_none() {
            self.table = Some(load_table(self.loader.as_ref(), path)?);
        }
        Ok(self.table.as_ref())
    }
}

fn load_table(loader: &dyn NativeLoader, path: &Path) -> Result<NativeTable, EvalError> {
    let library = loader.open(path)?;
    let init = library.resolve(ENTRY_POINT)?;

    let mut count = 0usize;
    // SAFETY: `init` is the library's entry point; it only writes `count`.
    let defs = unsafe { init(&mut count) };
    let defs: &[NativeFunctionDef] = if count == 0 {
        &[]
    } else if defs.is_null() {
        return Err(malformed_table("entry point returned a null table"));
    } else {
        // SAFETY: the entry point promises `count` rows at `defs`.
        unsafe { slice::from_raw_parts(defs, count) }
    };

    let mut functions = FxHashMap::default();
    for def in defs {
        if def.name.is_null() {
            return Err(malformed_table("function table row without a name"));
        }
        // SAFETY: each row's name points to `name_len` bytes owned by the
        // library.
        let name = unsafe { slice::from_raw_parts(def.name, def.name_len) };
        let name = String::from_utf8_lossy(name).into_owned();
        // First row wins, as a linear scan would.
        functions.entry(name).or_insert(NativeEntry {
            func: def.func,
            num_args: def.num_args,
        });
    }
    debug!(path = %path.display(), functions = functions.len(), "loaded native table");

    Ok(NativeTable {
        functions,
        _library: library,
    })
}

fn convert_result(name: &str, result: NativeResult) -> Result<NativeReturn, EvalError> {
    if result.is_void {
        return Ok(NativeReturn::Void);
    }
    let value = result.value;
    match value.tag() {
        Some(NativeTag::Int) => Ok(NativeReturn::Int(value.int)),
        Some(NativeTag::Bool) => Ok(NativeReturn::Bool(value.boolean)),
        Some(NativeTag::String) => {
            // SAFETY: a native string result stays valid until its call
            // returns, which is now.
            let Some(bytes) = (unsafe { value.bytes() }) else {
                return Err(malformed(name, "string result with a null pointer"));
            };
            let text = std::str::from_utf8(bytes)
                .map_err(|_| malformed(name, "string result is not valid UTF-8"))?;
            Ok(NativeReturn::Str(text.to_string()))
        }
        None => Err(malformed(name, &format!("unknown value tag {}", value.tag))),
    }
}

fn malformed(name: &str, reason: &str) -> EvalError {
    EvalErrorKind::MalformedNative {
        name: name.to_string(),
        reason: reason.to_string(),
    }
    .into()
}

fn malformed_table(reason: &str) -> EvalError {
    malformed(ENTRY_POINT, reason)
}
