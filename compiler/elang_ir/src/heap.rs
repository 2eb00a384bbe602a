//! Registry of live arenas.
//!
//! Every scope of a running program owns one arena. The heap hands out
//! generational [`ArenaId`]s so that a [`StrView`] outliving its arena is
//! detected on resolution instead of reading released memory: once an arena
//! is released its slot's generation moves on, and every id minted for the
//! old generation stops resolving.

#[cfg(test)]
mod tests;

use tracing::debug;

use crate::{Arena, StrView};

/// Generational handle to an arena owned by a [`Heap`].
///
/// `repr(C)` so it can be handed to native code inside a host record.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(C)]
pub struct ArenaId {
    index: u32,
    generation: u32,
}

impl ArenaId {
    /// Slot index, for diagnostics.
    #[inline]
    pub const fn index(self) -> u32 {
        self.index
    }
}

struct Slot {
    generation: u32,
    arena: Option<Arena>,
}

/// Owner of every arena in an evaluation.
#[derive(Default)]
pub struct Heap {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl Heap {
    pub fn new() -> Self {
        Heap::default()
    }

    /// Create a fresh arena with the given region size.
    pub fn create(&mut self, region_size: usize) -> ArenaId {
        self.insert(Arena::new(region_size))
    }

    /// Take ownership of an existing arena.
    pub fn insert(&mut self, arena: Arena) -> ArenaId {
        let id = if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.arena = Some(arena);
            ArenaId {
                index,
                generation: slot.generation,
            }
        } else {
            let index = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
            self.slots.push(Slot {
                generation: 0,
                arena: Some(arena),
            });
            ArenaId {
                index,
                generation: 0,
            }
        };
        debug!(arena = id.index, generation = id.generation, "heap: arena acquired");
        id
    }

    /// Release an arena and everything allocated from it.
    ///
    /// Returns `false` if `id` was already released.
    pub fn release(&mut self, id: ArenaId) -> bool {
        let Some(slot) = self.slot_mut(id) else {
            return false;
        };
        let Some(arena) = slot.arena.take() else {
            return false;
        };
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        debug!(arena = id.index, regions = arena.region_count(), "heap: arena released");
        arena.free();
        true
    }

    /// Check whether `id` still names a live arena.
    pub fn is_live(&self, id: ArenaId) -> bool {
        self.arena(id).is_some()
    }

    pub fn arena(&self, id: ArenaId) -> Option<&Arena> {
        self.slot(id)?.arena.as_ref()
    }

    pub fn arena_mut(&mut self, id: ArenaId) -> Option<&mut Arena> {
        self.slot_mut(id)?.arena.as_mut()
    }

    /// Copy `text` into the arena `id` and return a view of the copy.
    pub fn alloc_str(&mut self, id: ArenaId, text: &str) -> Option<StrView> {
        let slice = self.arena_mut(id)?.alloc_str(text);
        Some(StrView::new(id, slice))
    }

    /// Resolve a view to its text, or `None` if its arena was released.
    pub fn text(&self, view: StrView) -> Option<&str> {
        self.arena(view.arena())?.get_str(view.arena_slice())
    }

    /// Compare two views by content.
    ///
    /// `None` if either view is dangling.
    pub fn views_equal(&self, a: StrView, b: StrView) -> Option<bool> {
        Some(self.text(a)? == self.text(b)?)
    }

    /// Number of arenas currently alive.
    pub fn live_arenas(&self) -> usize {
        self.slots.iter().filter(|s| s.arena.is_some()).count()
    }

    fn slot(&self, id: ArenaId) -> Option<&Slot> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
    }

    fn slot_mut(&mut self, id: ArenaId) -> Option<&mut Slot> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
    }
}

impl std::fmt::Debug for Heap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Heap")
            .field("slots", &self.slots.len())
            .field("live", &self.live_arenas())
            .finish()
    }
}
