//! Opening native libraries.

use std::path::Path;

use libloading::Library;
use tracing::debug;

use super::abi::ModInit;

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum FfiError {
    #[error("failed to open library '{path}': {reason}")]
    Open { path: String, reason: String },
    #[error("failed to resolve symbol '{symbol}': {reason}")]
    MissingSymbol { symbol: String, reason: String },
}

/// Opens native libraries by path.
pub trait NativeLoader {
    fn open(&self, path: &Path) -> Result<Box<dyn NativeLibrary>, FfiError>;
}

/// An opened library. Resolved entry points stay callable for as long as the
/// library value is alive.
pub trait NativeLibrary {
    fn resolve(&self, symbol: &str) -> Result<ModInit, FfiError>;
}

/// Loads shared objects with `libloading`.
#[derive(Copy, Clone, Default, Debug)]
pub struct DylibLoader;

struct Dylib {
    library: Library,
}

impl NativeLoader for DylibLoader {
    fn open(&self, path: &Path) -> Result<Box<dyn NativeLibrary>, FfiError> {
        // SAFETY: running a library's initializers is inherent to loading it;
        // the path comes from the user's configuration.
        let library = unsafe { Library::new(path) }.map_err(|err| FfiError::Open {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;
        debug!(path = %path.display(), "opened native library");
        Ok(Box::new(Dylib { library }))
    }
}

impl NativeLibrary for Dylib {
    fn resolve(&self, symbol: &str) -> Result<ModInit, FfiError> {
        // SAFETY: the entry point is declared with the `ModInit` signature by
        // contract; the returned pointer is only used while `self` is alive.
        let init = unsafe { self.library.get::<ModInit>(symbol.as_bytes()) }.map_err(|err| {
            FfiError::MissingSymbol {
                symbol: symbol.to_string(),
                reason: err.to_string(),
            }
        })?;
        Ok(*init)
    }
}
