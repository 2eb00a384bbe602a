//! Flat AST storage.
//!
//! A parsed file is a [`Module`]: every node lives in one `Vec<Node>` and
//! refers to its children by [`NodeId`]. Statement sequences (blocks, call
//! arguments) are contiguous runs in a shared `lists` vector addressed by
//! [`NodeRange`]. Function declarations sit in their own table so scopes can
//! hold cheap [`FunctionId`] handles.
//!
//! Identifiers and literals are [`StrView`]s into the arena that holds the
//! source text, so a module is only meaningful while that arena is alive.

mod dump;

use std::fmt;
use std::rc::Rc;

use crate::StrView;

pub use dump::dump_module;

/// Index of a node in [`Module::nodes`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a function in [`Module::functions`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct FunctionId(u32);

impl FunctionId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A run of node ids in [`Module::lists`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct NodeRange {
    start: u32,
    len: u32,
}

impl NodeRange {
    pub const EMPTY: NodeRange = NodeRange { start: 0, len: 0 };

    #[inline]
    pub const fn len(self) -> usize {
        self.len as usize
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.len == 0
    }
}

/// Runtime type tag of a value, as written in type annotations.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ValueType {
    Int,
    String,
    Bool,
    /// No value. As a declared variable type it means "any type".
    Void,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueType::Int => "int",
            ValueType::String => "string",
            ValueType::Bool => "bool",
            ValueType::Void => "void",
        })
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl ArithOp {
    pub fn symbol(self) -> &'static str {
        match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
            ArithOp::Mod => "%",
        }
    }

    /// Operation name used in overflow messages.
    pub fn name(self) -> &'static str {
        match self {
            ArithOp::Add => "addition",
            ArithOp::Sub => "subtraction",
            ArithOp::Mul => "multiplication",
            ArithOp::Div => "division",
            ArithOp::Mod => "modulo",
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CondOp {
    And,
    Or,
    Eq,
    Lt,
    Gt,
}

impl CondOp {
    pub fn symbol(self) -> &'static str {
        match self {
            CondOp::And => "and",
            CondOp::Or => "or",
            CondOp::Eq => "==",
            CondOp::Lt => "<",
            CondOp::Gt => ">",
        }
    }
}

/// Whether a variable may be reassigned.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Mutability {
    /// `var`
    Mutable,
    /// `const`
    Immutable,
}

impl Mutability {
    #[inline]
    pub fn is_mutable(self) -> bool {
        matches!(self, Mutability::Mutable)
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Param {
    pub name: StrView,
    pub ty: ValueType,
}

/// `fun [extern] name(params) [:: return_type] { body }`
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct FunctionDecl {
    pub name: StrView,
    pub params: Vec<Param>,
    /// `None` for `{}`.
    pub body: Option<NodeRange>,
    pub return_type: ValueType,
    pub is_extern: bool,
    pub line: u32,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum NodeKind {
    Eof,
    Number(i64),
    Str(StrView),
    Bool(bool),
    Identifier(StrView),
    Negate(NodeId),
    Arithmetic {
        op: ArithOp,
        lhs: NodeId,
        rhs: NodeId,
    },
    Condition {
        op: CondOp,
        lhs: NodeId,
        rhs: NodeId,
    },
    Declaration {
        name: StrView,
        init: NodeId,
        mutability: Mutability,
        /// [`ValueType::Void`] when no annotation was written.
        declared: ValueType,
    },
    Assignment {
        name: StrView,
        value: NodeId,
    },
    FunctionDecl(FunctionId),
    Call {
        callee: StrView,
        args: NodeRange,
    },
    If {
        condition: NodeId,
        then_body: Option<NodeRange>,
        else_body: Option<NodeRange>,
    },
    While {
        condition: NodeId,
        body: Option<NodeRange>,
    },
    Return(NodeId),
    /// Path with the surrounding quotes stripped.
    Import(StrView),
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Node {
    pub kind: NodeKind,
    pub line: u32,
}

/// One parsed source file.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Module {
    nodes: Vec<Node>,
    lists: Vec<NodeId>,
    functions: Vec<FunctionDecl>,
    items: Vec<NodeId>,
}

/// Modules are shared between the scope that declared a function and every
/// call of it.
pub type SharedModule = Rc<Module>;

impl Module {
    pub fn new() -> Self {
        Module::default()
    }

    /// Store a node and return its id.
    pub fn alloc(&mut self, kind: NodeKind, line: u32) -> NodeId {
        let id = NodeId(to_u32(self.nodes.len()));
        self.nodes.push(Node { kind, line });
        id
    }

    /// Store a sequence of node ids contiguously.
    pub fn alloc_list(&mut self, ids: &[NodeId]) -> NodeRange {
        if ids.is_empty() {
            return NodeRange::EMPTY;
        }
        let start = to_u32(self.lists.len());
        self.lists.extend_from_slice(ids);
        NodeRange {
            start,
            len: to_u32(ids.len()),
        }
    }

    /// Store a block body. An empty block is stored as no body at all.
    pub fn alloc_body(&mut self, ids: &[NodeId]) -> Option<NodeRange> {
        if ids.is_empty() {
            None
        } else {
            Some(self.alloc_list(ids))
        }
    }

    pub fn alloc_function(&mut self, decl: FunctionDecl) -> FunctionId {
        let id = FunctionId(to_u32(self.functions.len()));
        self.functions.push(decl);
        id
    }

    /// Append a top-level statement.
    pub fn push_item(&mut self, id: NodeId) {
        self.items.push(id);
    }

    /// # Panics
    /// Panics if `id` was not allocated by this module.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn list(&self, range: NodeRange) -> &[NodeId] {
        let start = range.start as usize;
        &self.lists[start..start + range.len()]
    }

    /// Statements of a body; absent and empty bodies look the same.
    #[inline]
    pub fn body(&self, body: Option<NodeRange>) -> &[NodeId] {
        body.map_or(&[], |range| self.list(range))
    }

    /// # Panics
    /// Panics if `id` was not allocated by this module.
    #[inline]
    pub fn function(&self, id: FunctionId) -> &FunctionDecl {
        &self.functions[id.index()]
    }

    /// Top-level statements in source order, ending with an `Eof` node.
    #[inline]
    pub fn items(&self) -> &[NodeId] {
        &self.items
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

fn to_u32(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}
