//! `InterpreterBuilder` for configuring an [`Interpreter`].

use std::path::PathBuf;
use std::rc::Rc;

use elang_ir::{Heap, DEFAULT_REGION_SIZE};

use super::{empty_module, Interpreter};
use crate::ffi::{DylibLoader, NativeDispatcher, NativeLoader};
use crate::{stdout_handler, Environment, SharedPrintHandler};

pub struct InterpreterBuilder {
    print_handler: Option<SharedPrintHandler>,
    native_library: Option<PathBuf>,
    loader: Option<Box<dyn NativeLoader>>,
    builtins: bool,
    region_size: usize,
    source_path: Option<Rc<str>>,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        InterpreterBuilder {
            print_handler: None,
            native_library: None,
            loader: None,
            builtins: true,
            region_size: DEFAULT_REGION_SIZE,
            source_path: None,
        }
    }

    /// Where `print` writes. Defaults to stdout.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Shared library consulted for calls no user function or builtin
    /// handles. Opened on first use.
    #[must_use]
    pub fn native_library(mut self, path: impl Into<PathBuf>) -> Self {
        self.native_library = Some(path.into());
        self
    }

    /// Replace the `libloading` loader, e.g. with an in-process table.
    #[must_use]
    pub fn loader(mut self, loader: impl NativeLoader + 'static) -> Self {
        self.loader = Some(Box::new(loader));
        self
    }

    /// Enable or disable the `print` and `exit` builtins.
    #[must_use]
    pub fn builtins(mut self, enabled: bool) -> Self {
        self.builtins = enabled;
        self
    }

    /// Region size of every scope arena, in bytes.
    #[must_use]
    pub fn region_size(mut self, bytes: usize) -> Self {
        self.region_size = bytes.max(1);
        self
    }

    /// Path of the file fed to [`Interpreter::eval_source`]. Errors raised
    /// in its functions carry it even when called from an imported file.
    #[must_use]
    pub fn source_path(mut self, path: &str) -> Self {
        self.source_path = Some(Rc::from(path));
        self
    }

    pub fn build(self) -> Interpreter {
        let mut heap = Heap::new();
        let root = heap.create(self.region_size);
        let loader = self
            .loader
            .unwrap_or_else(|| Box::new(DylibLoader) as Box<dyn NativeLoader>);

        Interpreter {
            heap,
            env: Environment::new(root),
            module: empty_module(),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            natives: NativeDispatcher::new(loader, self.native_library),
            builtins: self.builtins,
            region_size: self.region_size,
            origin: self.source_path,
        }
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
