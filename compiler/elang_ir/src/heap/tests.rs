use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_create_and_resolve() {
    let mut heap = Heap::new();
    let id = heap.create(32);
    let view = heap.alloc_str(id, "elang");

    assert_eq!(view.and_then(|v| heap.text(v)), Some("elang"));
    assert_eq!(heap.live_arenas(), 1);
}

#[test]
fn test_release_invalidates_views() {
    let mut heap = Heap::new();
    let id = heap.create(32);
    let view = heap.alloc_str(id, "gone");

    assert!(heap.release(id));
    assert!(!heap.is_live(id));
    assert_eq!(view.and_then(|v| heap.text(v)), None);
    assert_eq!(heap.live_arenas(), 0);
}

#[test]
fn test_double_release_is_rejected() {
    let mut heap = Heap::new();
    let id = heap.create(8);
    assert!(heap.release(id));
    assert!(!heap.release(id));
}

#[test]
fn test_reused_slot_does_not_resurrect_old_ids() {
    let mut heap = Heap::new();
    let old = heap.create(8);
    let stale = heap.alloc_str(old, "old");
    heap.release(old);

    let new = heap.create(8);
    let fresh = heap.alloc_str(new, "new");

    assert_eq!(old.index(), new.index());
    assert_ne!(old, new);
    assert_eq!(stale.and_then(|v| heap.text(v)), None);
    assert_eq!(fresh.and_then(|v| heap.text(v)), Some("new"));
    assert_eq!(heap.alloc_str(old, "x"), None);
}

#[test]
fn test_views_equal_compares_content() {
    let mut heap = Heap::new();
    let a = heap.create(16);
    let b = heap.create(16);
    let left = heap.alloc_str(a, "same");
    let right = heap.alloc_str(b, "same");
    let other = heap.alloc_str(b, "diff");

    let (Some(left), Some(right), Some(other)) = (left, right, other) else {
        panic!("allocation into live arenas failed");
    };
    assert_eq!(heap.views_equal(left, right), Some(true));
    assert_eq!(heap.views_equal(left, other), Some(false));

    heap.release(a);
    assert_eq!(heap.views_equal(left, right), None);
}

#[test]
fn test_stack_like_release_order() {
    let mut heap = Heap::new();
    let root = heap.create(8);
    let child = heap.create(8);
    let grandchild = heap.create(8);

    heap.release(grandchild);
    heap.release(child);
    assert!(heap.is_live(root));
    assert_eq!(heap.live_arenas(), 1);
}
