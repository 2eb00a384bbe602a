use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn test_alloc_bumps_current_region() {
    let mut arena = Arena::new(16);
    let a = arena.alloc(4);
    let b = arena.alloc(8);

    assert_eq!(arena.region_count(), 1);
    assert_eq!(arena.allocated_bytes(), 12);
    assert_eq!(a.len(), 4);
    assert_eq!(b.len(), 8);
    assert_ne!(a, b);
}

#[test]
fn test_alloc_exact_fit_stays_in_region() {
    let mut arena = Arena::new(8);
    arena.alloc(3);
    arena.alloc(5);
    assert_eq!(arena.region_count(), 1);
    assert_eq!(arena.capacity(), 8);
}

#[test]
fn test_overflow_appends_default_sized_region() {
    let mut arena = Arena::new(8);
    arena.alloc(6);
    arena.alloc(4);

    assert_eq!(arena.region_count(), 2);
    assert_eq!(arena.capacity(), 16);
}

#[test]
fn test_oversized_request_gets_its_own_region() {
    let mut arena = Arena::new(8);
    let big = arena.alloc(100);

    assert_eq!(arena.region_count(), 2);
    assert_eq!(arena.capacity(), 108);
    assert_eq!(arena.get(big).map(<[u8]>::len), Some(100));
}

#[test]
fn test_earlier_regions_are_not_reused() {
    let mut arena = Arena::new(8);
    arena.alloc(6);
    arena.alloc(8);
    // Two bytes are left in the first region, but it is no longer current.
    arena.alloc(2);

    assert_eq!(arena.region_count(), 3);
    assert_eq!(arena.allocated_bytes(), 16);
}

#[test]
fn test_alloc_str_roundtrip() {
    let mut arena = Arena::default();
    let hello = arena.alloc_str("hello");
    let world = arena.alloc_str("world");

    assert_eq!(arena.get_str(hello), Some("hello"));
    assert_eq!(arena.get_str(world), Some("world"));
    assert_eq!(arena.region_size(), DEFAULT_REGION_SIZE);
}

#[test]
fn test_get_mut_writes_through() {
    let mut arena = Arena::new(4);
    let slice = arena.alloc(3);
    if let Some(bytes) = arena.get_mut(slice) {
        bytes.copy_from_slice(b"abc");
    }
    assert_eq!(arena.get(slice), Some(&b"abc"[..]));
}

#[test]
fn test_foreign_handle_does_not_resolve() {
    let mut big = Arena::new(64);
    let slice = big.alloc(32);
    let small = Arena::new(4);

    assert_eq!(small.get(slice), None);
}

#[test]
fn test_subslice_narrows_without_copy() {
    let mut arena = Arena::new(32);
    let slice = arena.alloc_str("import \"lib.e\"");
    let inner = slice.subslice(8, 5);

    assert_eq!(arena.get_str(inner), Some("lib.e"));
    assert_eq!(arena.allocated_bytes(), 14);
}

#[test]
fn test_zero_capacity_is_usable() {
    let mut arena = Arena::new(0);
    let slice = arena.alloc_str("x");
    assert_eq!(arena.get_str(slice), Some("x"));
}

#[test]
fn test_free_consumes_arena() {
    let mut arena = Arena::new(8);
    arena.alloc(20);
    arena.free();
}

proptest! {
    #[test]
    fn prop_allocations_survive_growth(
        chunks in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..40), 1..64),
        region_size in 1usize..32,
    ) {
        let mut arena = Arena::new(region_size);
        let handles: Vec<_> = chunks.iter().map(|c| arena.alloc_bytes(c)).collect();

        for (handle, chunk) in handles.iter().zip(&chunks) {
            prop_assert_eq!(arena.get(*handle), Some(chunk.as_slice()));
        }
        prop_assert_eq!(
            arena.allocated_bytes(),
            chunks.iter().map(Vec::len).sum::<usize>()
        );
    }
}
