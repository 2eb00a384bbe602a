//! `import "path"`.
//!
//! The file is read relative to the process's working directory, loaded into
//! the importing scope's arena, and evaluated in that same scope, so its
//! declarations become the importer's.

use std::fs;
use std::rc::Rc;

use elang_ir::StrView;
use tracing::debug;

use super::Interpreter;
use crate::errors::dangling_view;
use crate::{EvalError, EvalErrorKind, EvalResult, Outcome};

impl Interpreter {
    pub(crate) fn eval_import(&mut self, path: StrView) -> EvalResult {
        let path = self.heap.text(path).ok_or_else(dangling_view)?.to_string();
        debug!(path, depth = self.env.depth(), "import");

        let source = fs::read_to_string(&path).map_err(|err| {
            EvalError::new(EvalErrorKind::ReadFile {
                path: path.clone(),
                reason: err.to_string(),
            })
        })?;

        let origin = Some(Rc::from(path.as_str()));
        let importer = std::mem::replace(&mut self.origin, origin);
        let returned = self
            .load(&source)
            .and_then(|module| self.exec_module(module));
        self.origin = importer;
        let returned = returned.map_err(|err| err.or_path(&path))?;
        Ok(returned.map_or(Outcome::Void, Outcome::Return))
    }
}
