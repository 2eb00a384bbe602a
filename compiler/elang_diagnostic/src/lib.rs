//! Diagnostic system for elang.
//!
//! Every phase reports exactly one fatal error. Each converts into a
//! [`Diagnostic`] carrying:
//! - an error code for searchability
//! - a category matching the phase (`Lexer error`, `Parser error`, `Runtime error`)
//! - a message, the source line when tracked, and the file path
//!
//! Only the driver turns a diagnostic into output, through an emitter.

mod diagnostic;
pub mod emitter;
mod error_code;

pub use diagnostic::{Diagnostic, ErrorCategory};
pub use error_code::ErrorCode;
