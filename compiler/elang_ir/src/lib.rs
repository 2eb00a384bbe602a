//! elang IR - core data structures shared by every phase.
//!
//! This crate contains:
//! - `Arena`: a monotonic bump allocator over a chain of byte regions
//! - `Heap`: the registry of live arenas, addressed by generational `ArenaId`
//! - `StrView`: a copyable (arena, offset, length) view into arena memory
//! - `Span`, `Token`, `TokenKind`, `TokenList` for lexer output
//! - `Module`: the flat AST store produced by the parser
//!
//! # Design Philosophy
//!
//! - **No raw pointers**: arena allocations are handed out as `ArenaSlice`
//!   handles and resolved through the arena that produced them.
//! - **Flatten the tree**: AST children are `NodeId` indices into the
//!   module's node vector, statement blocks are `NodeRange`s.
//! - **Release is bulk-only**: nothing is freed individually; an arena is
//!   dropped as a whole when its owning scope ends.

mod arena;
pub mod ast;
mod heap;
mod span;
mod str_view;
mod token;

pub use arena::{Arena, ArenaSlice, DEFAULT_REGION_SIZE};
pub use ast::{
    dump_module, ArithOp, CondOp, FunctionDecl, FunctionId, Module, Mutability, Node, NodeId, NodeKind,
    NodeRange, Param, SharedModule, ValueType,
};
pub use heap::{ArenaId, Heap};
pub use span::{Span, SpanError};
pub use str_view::StrView;
pub use token::{Token, TokenKind, TokenList};
