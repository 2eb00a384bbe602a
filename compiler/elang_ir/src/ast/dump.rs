//! Indented text rendering of a module, used by `elang parse`.

use std::fmt::Write;

use super::{Module, NodeId, NodeKind, NodeRange};
use crate::{Heap, StrView};

/// Render `module` as an indented tree, one node per line.
///
/// Names whose arena is gone render as `<dangling>`.
pub fn dump_module(module: &Module, heap: &Heap) -> String {
    let mut printer = Printer {
        module,
        heap,
        out: String::new(),
    };
    for &item in module.items() {
        printer.node(item, 0);
    }
    printer.out
}

struct Printer<'a> {
    module: &'a Module,
    heap: &'a Heap,
    out: String,
}

impl Printer<'_> {
    fn text(&self, view: StrView) -> &str {
        self.heap.text(view).unwrap_or("<dangling>")
    }

    fn line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.out.push_str("  ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn body(&mut self, label: &str, body: Option<NodeRange>, depth: usize) {
        match body {
            None => self.line(depth, &format!("{label}: <empty>")),
            Some(range) => {
                self.line(depth, &format!("{label}:"));
                let module = self.module;
                for &id in module.list(range) {
                    self.node(id, depth + 1);
                }
            }
        }
    }

    fn node(&mut self, id: NodeId, depth: usize) {
        let node = *self.module.node(id);
        let line = node.line;
        match node.kind {
            NodeKind::Eof => self.line(depth, &format!("Eof @{line}")),
            NodeKind::Number(n) => self.line(depth, &format!("Number {n} @{line}")),
            NodeKind::Str(view) => {
                let text = format!("Str {:?} @{line}", self.text(view));
                self.line(depth, &text);
            }
            NodeKind::Bool(b) => self.line(depth, &format!("Bool {b} @{line}")),
            NodeKind::Identifier(view) => {
                let text = format!("Identifier {} @{line}", self.text(view));
                self.line(depth, &text);
            }
            NodeKind::Negate(operand) => {
                self.line(depth, &format!("Negate @{line}"));
                self.node(operand, depth + 1);
            }
            NodeKind::Arithmetic { op, lhs, rhs } => {
                self.line(depth, &format!("Arithmetic {} @{line}", op.symbol()));
                self.node(lhs, depth + 1);
                self.node(rhs, depth + 1);
            }
            NodeKind::Condition { op, lhs, rhs } => {
                self.line(depth, &format!("Condition {} @{line}", op.symbol()));
                self.node(lhs, depth + 1);
                self.node(rhs, depth + 1);
            }
            NodeKind::Declaration {
                name,
                init,
                mutability,
                declared,
            } => {
                let keyword = if mutability.is_mutable() { "var" } else { "const" };
                let text = format!(
                    "Declaration {keyword} {} :: {declared} @{line}",
                    self.text(name)
                );
                self.line(depth, &text);
                self.node(init, depth + 1);
            }
            NodeKind::Assignment { name, value } => {
                let text = format!("Assignment {} @{line}", self.text(name));
                self.line(depth, &text);
                self.node(value, depth + 1);
            }
            NodeKind::FunctionDecl(function) => {
                let module = self.module;
                let decl = module.function(function);
                let mut header = String::from("Function ");
                if decl.is_extern {
                    header.push_str("extern ");
                }
                header.push_str(self.text(decl.name));
                header.push('(');
                for (i, param) in decl.params.iter().enumerate() {
                    if i > 0 {
                        header.push_str(", ");
                    }
                    let _ = write!(header, "{} :: {}", self.text(param.name), param.ty);
                }
                let _ = write!(header, ") :: {} @{line}", decl.return_type);
                self.line(depth, &header);
                self.body("body", decl.body, depth + 1);
            }
            NodeKind::Call { callee, args } => {
                let text = format!("Call {} @{line}", self.text(callee));
                self.line(depth, &text);
                let module = self.module;
                for &arg in module.list(args) {
                    self.node(arg, depth + 1);
                }
            }
            NodeKind::If {
                condition,
                then_body,
                else_body,
            } => {
                self.line(depth, &format!("If @{line}"));
                self.node(condition, depth + 1);
                self.body("then", then_body, depth + 1);
                if else_body.is_some() {
                    self.body("else", else_body, depth + 1);
                }
            }
            NodeKind::While { condition, body } => {
                self.line(depth, &format!("While @{line}"));
                self.node(condition, depth + 1);
                self.body("body", body, depth + 1);
            }
            NodeKind::Return(value) => {
                self.line(depth, &format!("Return @{line}"));
                self.node(value, depth + 1);
            }
            NodeKind::Import(path) => {
                let text = format!("Import {:?} @{line}", self.text(path));
                self.line(depth, &text);
            }
        }
    }
}
