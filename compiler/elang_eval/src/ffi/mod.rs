//! Native function interface.
//!
//! A native library exports one entry point, [`ENTRY_POINT`], that writes the
//! number of functions it provides and returns a table of
//! [`NativeFunctionDef`]s. A call that matches no user function or builtin is
//! looked up in that table by name, its argument count is checked, and the
//! function is invoked with the evaluated arguments on a [`NativeStack`].
//!
//! Loading goes through [`NativeLoader`] so the dispatcher never touches a
//! platform API directly; [`DylibLoader`] is the `libloading` implementation.

#![allow(unsafe_code, reason = "native calls and library loading cross the C ABI")]

mod abi;
mod dispatcher;
mod loader;

#[cfg(test)]
mod tests;

pub use abi::{
    ModInit, NativeFn, NativeFunctionDef, NativeHost, NativeResult, NativeStack, NativeTag,
    NativeValue, ENTRY_POINT,
};
pub(crate) use dispatcher::{NativeDispatcher, NativeReturn};
pub use loader::{DylibLoader, FfiError, NativeLibrary, NativeLoader};
