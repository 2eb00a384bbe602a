//! Monotonic bump allocator over a chain of byte regions.
//!
//! Every allocation is a bump of the current region's `used` counter. When a
//! request does not fit in what is left of the current region, a new region
//! of `max(region_size, requested)` bytes is appended and becomes current.
//! Earlier regions are never allocated from again and are never shrunk,
//! compacted, or reused; everything is released together when the arena is
//! dropped.
//!
//! Allocations are returned as [`ArenaSlice`] handles rather than pointers.
//! A handle stays resolvable, with unchanged contents, for as long as the
//! arena that produced it is alive.

#[cfg(test)]
mod tests;

use tracing::trace;

/// Default region size in bytes for scope arenas.
pub const DEFAULT_REGION_SIZE: usize = 2048;

/// Handle to a run of bytes inside an [`Arena`].
///
/// Copyable and cheap; it owns nothing. Resolve it with [`Arena::get`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct ArenaSlice {
    region: usize,
    offset: usize,
    len: usize,
}

impl ArenaSlice {
    /// Length of the slice in bytes.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Check if the slice is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Narrow this slice to `len` bytes starting at `index`, without copying.
    ///
    /// The requested window is clamped to the bounds of `self`.
    #[inline]
    #[must_use]
    pub fn subslice(self, index: usize, len: usize) -> ArenaSlice {
        debug_assert!(
            index.saturating_add(len) <= self.len,
            "subslice {index}+{len} out of bounds (len {})",
            self.len
        );
        let index = index.min(self.len);
        let len = len.min(self.len - index);
        ArenaSlice {
            region: self.region,
            offset: self.offset + index,
            len,
        }
    }
}

/// One contiguous block of arena memory.
struct Region {
    buf: Box<[u8]>,
    used: usize,
}

impl Region {
    fn new(size: usize) -> Self {
        Region {
            buf: vec![0; size].into_boxed_slice(),
            used: 0,
        }
    }

    #[inline]
    fn remaining(&self) -> usize {
        self.buf.len() - self.used
    }
}

/// Bump allocator owning a chain of regions.
///
/// The current region is always the last one in the chain.
pub struct Arena {
    regions: Vec<Region>,
    region_size: usize,
}

impl Arena {
    /// Create an arena whose first region holds `initial_capacity` bytes.
    ///
    /// `initial_capacity` is also the default size of every region appended
    /// later (a zero capacity is bumped to one byte).
    pub fn new(initial_capacity: usize) -> Self {
        let region_size = initial_capacity.max(1);
        Arena {
            regions: vec![Region::new(region_size)],
            region_size,
        }
    }

    /// Allocate `size` zeroed bytes.
    ///
    /// Never fails short of the process running out of memory, in which case
    /// the global allocator aborts.
    pub fn alloc(&mut self, size: usize) -> ArenaSlice {
        let fits = self
            .regions
            .last()
            .is_some_and(|region| region.remaining() >= size);

        if !fits {
            let new_size = self.region_size.max(size);
            trace!(
                requested = size,
                region_size = new_size,
                regions = self.regions.len() + 1,
                "arena: appending region"
            );
            self.regions.push(Region::new(new_size));
        }

        let region = self.regions.len() - 1;
        let current = &mut self.regions[region];
        let offset = current.used;
        current.used += size;

        ArenaSlice {
            region,
            offset,
            len: size,
        }
    }

    /// Copy `bytes` into the arena.
    pub fn alloc_bytes(&mut self, bytes: &[u8]) -> ArenaSlice {
        let slice = self.alloc(bytes.len());
        if let Some(dest) = self.get_mut(slice) {
            dest.copy_from_slice(bytes);
        }
        slice
    }

    /// Copy `text` into the arena.
    #[inline]
    pub fn alloc_str(&mut self, text: &str) -> ArenaSlice {
        self.alloc_bytes(text.as_bytes())
    }

    /// Resolve a handle to its bytes.
    ///
    /// Returns `None` if the handle was not produced by this arena.
    pub fn get(&self, slice: ArenaSlice) -> Option<&[u8]> {
        let region = self.regions.get(slice.region)?;
        let end = slice.offset.checked_add(slice.len)?;
        if end > region.used {
            return None;
        }
        region.buf.get(slice.offset..end)
    }

    /// Resolve a handle to its bytes, mutably.
    pub fn get_mut(&mut self, slice: ArenaSlice) -> Option<&mut [u8]> {
        let region = self.regions.get_mut(slice.region)?;
        let end = slice.offset.checked_add(slice.len)?;
        if end > region.used {
            return None;
        }
        region.buf.get_mut(slice.offset..end)
    }

    /// Resolve a handle to text.
    ///
    /// Returns `None` for foreign handles or bytes that are not UTF-8.
    pub fn get_str(&self, slice: ArenaSlice) -> Option<&str> {
        std::str::from_utf8(self.get(slice)?).ok()
    }

    /// Number of regions in the chain.
    #[inline]
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    /// Bytes handed out so far, across all regions.
    pub fn allocated_bytes(&self) -> usize {
        self.regions.iter().map(|r| r.used).sum()
    }

    /// Total bytes reserved, across all regions.
    pub fn capacity(&self) -> usize {
        self.regions.iter().map(|r| r.buf.len()).sum()
    }

    /// Default size of newly appended regions.
    #[inline]
    pub fn region_size(&self) -> usize {
        self.region_size
    }

    /// Release every region at once.
    ///
    /// Consuming `self` guarantees no handle can be resolved against this
    /// arena afterwards.
    pub fn free(self) {
        trace!(
            regions = self.regions.len(),
            bytes = self.capacity(),
            "arena: released"
        );
        drop(self);
    }
}

impl Default for Arena {
    fn default() -> Self {
        Arena::new(DEFAULT_REGION_SIZE)
    }
}

impl std::fmt::Debug for Arena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arena")
            .field("regions", &self.regions.len())
            .field("allocated", &self.allocated_bytes())
            .field("capacity", &self.capacity())
            .finish()
    }
}
