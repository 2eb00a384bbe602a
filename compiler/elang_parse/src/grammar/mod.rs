//! Grammar productions.
//!
//! Each module extends `Parser` with methods for one part of the syntax:
//!
//! - [`expr`]: the five expression tiers, from factor up to condition
//! - [`stmt`]: statements, blocks, and function declarations

mod expr;
mod stmt;
