//! Runtime values.

use std::borrow::Cow;

use elang_ir::{Heap, StrView, ValueType};

/// A value held by a variable or produced by an expression.
///
/// There is no void variant: a call that produces nothing yields
/// [`Outcome::Void`](crate::Outcome::Void) instead, so void can never reach a
/// variable.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Value {
    Int(i64),
    /// Text living in some scope's arena.
    Str(StrView),
    Bool(bool),
}

impl Value {
    pub fn ty(self) -> ValueType {
        match self {
            Value::Int(_) => ValueType::Int,
            Value::Str(_) => ValueType::String,
            Value::Bool(_) => ValueType::Bool,
        }
    }

    /// Text as `print` shows it, or `None` if a string's arena is gone.
    pub fn display(self, heap: &Heap) -> Option<Cow<'_, str>> {
        match self {
            Value::Int(n) => Some(Cow::Owned(n.to_string())),
            Value::Bool(b) => Some(Cow::Borrowed(if b { "true" } else { "false" })),
            Value::Str(view) => heap.text(view).map(Cow::Borrowed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_types() {
        assert_eq!(Value::Int(1).ty(), ValueType::Int);
        assert_eq!(Value::Bool(false).ty(), ValueType::Bool);
    }

    #[test]
    fn test_display() {
        let mut heap = Heap::new();
        let arena = heap.create(16);
        let Some(view) = heap.alloc_str(arena, "hello") else {
            panic!("arena should be live");
        };

        assert_eq!(Value::Int(-7).display(&heap).as_deref(), Some("-7"));
        assert_eq!(Value::Bool(true).display(&heap).as_deref(), Some("true"));
        assert_eq!(Value::Str(view).display(&heap).as_deref(), Some("hello"));

        heap.release(arena);
        assert_eq!(Value::Str(view).display(&heap), None);
    }
}
