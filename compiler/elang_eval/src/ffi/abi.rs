//! C ABI shared with native libraries.

use std::ptr;

use elang_ir::ArenaId;

/// Symbol every native library exports.
pub const ENTRY_POINT: &str = "e_mod_init";

/// Entry point: writes the table length through `num_functions` and returns
/// the table.
pub type ModInit = unsafe extern "C" fn(num_functions: *mut usize) -> *const NativeFunctionDef;

/// A native function. Arguments are popped from `args`, last argument first.
pub type NativeFn = unsafe extern "C" fn(host: *mut NativeHost, args: *mut NativeStack) -> NativeResult;

/// One row of a library's function table.
#[repr(C)]
#[derive(Copy, Clone)]
pub struct NativeFunctionDef {
    pub name: *const u8,
    pub name_len: usize,
    pub func: NativeFn,
    pub num_args: usize,
}

/// Discriminant of a [`NativeValue`].
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum NativeTag {
    Int = 0,
    String = 1,
    Bool = 2,
}

impl NativeTag {
    pub const fn raw(self) -> u32 {
        self as u32
    }

    pub fn from_raw(raw: u32) -> Option<NativeTag> {
        match raw {
            0 => Some(NativeTag::Int),
            1 => Some(NativeTag::String),
            2 => Some(NativeTag::Bool),
            _ => None,
        }
    }
}

/// A value crossing the native boundary.
///
/// String arguments point into interpreter memory and are valid only until
/// the native function returns. String results must stay valid until the
/// call returns; the interpreter copies them before doing anything else.
#[repr(C)]
#[derive(Copy, Clone, Debug)]
pub struct NativeValue {
    pub tag: u32,
    pub int: i64,
    pub boolean: bool,
    pub str_ptr: *const u8,
    pub str_len: usize,
}

impl NativeValue {
    pub const fn int(value: i64) -> Self {
        NativeValue {
            tag: NativeTag::Int.raw(),
            int: value,
            boolean: false,
            str_ptr: ptr::null(),
            str_len: 0,
        }
    }

    pub const fn boolean(value: bool) -> Self {
        NativeValue {
            tag: NativeTag::Bool.raw(),
            int: 0,
            boolean: value,
            str_ptr: ptr::null(),
            str_len: 0,
        }
    }

    /// Borrow `text` without copying.
    pub const fn string(text: &'static str) -> Self {
        Self::from_bytes(text.as_bytes())
    }

    pub(crate) const fn from_bytes(bytes: &[u8]) -> Self {
        NativeValue {
            tag: NativeTag::String.raw(),
            int: 0,
            boolean: false,
            str_ptr: bytes.as_ptr(),
            str_len: bytes.len(),
        }
    }

    pub fn tag(&self) -> Option<NativeTag> {
        NativeTag::from_raw(self.tag)
    }

    /// Bytes of a string value.
    ///
    /// # Safety
    /// For a string value, `str_ptr` must point to `str_len` readable bytes
    /// that stay valid for `'a`.
    pub unsafe fn bytes<'a>(&self) -> Option<&'a [u8]> {
        if self.tag() != Some(NativeTag::String) {
            return None;
        }
        if self.str_len == 0 {
            return Some(&[]);
        }
        if self.str_ptr.is_null() {
            return None;
        }
        // SAFETY: upheld by the caller.
        Some(unsafe { std::slice::from_raw_parts(self.str_ptr, self.str_len) })
    }
}

/// Evaluated call arguments, pushed in call order.
#[repr(C)]
pub struct NativeStack {
    values: *const NativeValue,
    len: usize,
}

impl NativeStack {
    pub(crate) fn new(values: &[NativeValue]) -> Self {
        NativeStack {
            values: values.as_ptr(),
            len: values.len(),
        }
    }

    /// Arguments not yet popped.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Pop the most recently pushed argument.
    pub fn pop(&mut self) -> Option<NativeValue> {
        let top = self.len.checked_sub(1)?;
        self.len = top;
        // SAFETY: the stack was built over a slice of at least `top + 1`
        // values that outlives the native call.
        Some(unsafe { *self.values.add(top) })
    }
}

/// What a native function hands back.
#[repr(C)]
#[derive(Copy, Clone, Debug)]
pub struct NativeResult {
    pub value: NativeValue,
    pub is_void: bool,
}

impl NativeResult {
    pub const fn value(value: NativeValue) -> Self {
        NativeResult {
            value,
            is_void: false,
        }
    }

    pub const fn void() -> Self {
        NativeResult {
            value: NativeValue::int(0),
            is_void: true,
        }
    }
}

/// Calling context given to native functions: the evaluation arena and the
/// depth of the calling scope.
#[repr(C)]
pub struct NativeHost {
    arena: ArenaId,
    scope_depth: usize,
}

impl NativeHost {
    pub(crate) fn new(arena: ArenaId, scope_depth: usize) -> Self {
        NativeHost { arena, scope_depth }
    }

    pub fn arena(&self) -> ArenaId {
        self.arena
    }

    /// Number of scopes between the caller and the root, 0 at top level.
    pub fn scope_depth(&self) -> usize {
        self.scope_depth
    }
}
