//! Non-owning string views.

use crate::{ArenaId, ArenaSlice};

/// A window onto text stored in one of a [`Heap`](crate::Heap)'s arenas.
///
/// Views are `Copy` and own nothing; the arena owns the bytes. A view is only
/// meaningful while its arena is alive. Resolve it with
/// [`Heap::text`](crate::Heap::text), which returns `None` once the arena has
/// been released. Equality of content goes through
/// [`Heap::views_equal`](crate::Heap::views_equal); the derived `PartialEq`
/// compares identity.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct StrView {
    arena: ArenaId,
    slice: ArenaSlice,
}

impl StrView {
    #[inline]
    pub const fn new(arena: ArenaId, slice: ArenaSlice) -> Self {
        StrView { arena, slice }
    }

    #[inline]
    pub const fn arena(self) -> ArenaId {
        self.arena
    }

    #[inline]
    pub const fn arena_slice(self) -> ArenaSlice {
        self.slice
    }

    /// Length in bytes.
    #[inline]
    pub const fn len(self) -> usize {
        self.slice.len()
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.slice.is_empty()
    }

    /// Sub-view of `len` bytes starting at byte `index`. No bytes are copied.
    #[inline]
    #[must_use]
    pub fn slice(self, index: usize, len: usize) -> StrView {
        StrView {
            arena: self.arena,
            slice: self.slice.subslice(index, len),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Heap;

    #[test]
    fn test_sub_view_shares_storage() {
        let mut heap = Heap::new();
        let id = heap.create(64);
        let Some(view) = heap.alloc_str(id, "var answer = 42") else {
            panic!("arena should be live");
        };
        let name = view.slice(4, 6);

        assert_eq!(heap.text(name), Some("answer"));
        assert_eq!(name.arena(), view.arena());
        assert_eq!(name.len(), 6);
        assert_eq!(heap.arena(id).map(crate::Arena::allocated_bytes), Some(15));
    }

    #[test]
    fn test_empty_view() {
        let mut heap = Heap::new();
        let id = heap.create(8);
        let Some(view) = heap.alloc_str(id, "") else {
            panic!("arena should be live");
        };
        assert!(view.is_empty());
        assert_eq!(heap.text(view), Some(""));
    }
}
