//! elang driver.
//!
//! ```text
//! file ──► lex ──► parse ──► evaluate
//!            │        │
//!            ▼        ▼
//!        elang lex  elang parse
//! ```
//!
//! The `elang` binary is a thin shell over this library: it resolves a
//! [`Config`], dispatches to a command handler, and renders any
//! [`Diagnostic`](elang_diagnostic::Diagnostic) to stderr.

pub mod commands;
mod config;
pub mod tracing_setup;

pub use commands::{lex_file, parse_file, run_file};
pub use config::{Command, Config, ConfigError, NATIVE_LIB_ENV, REGION_SIZE_ENV};
