//! Allocation accounting: updates allocate O(1), no-ops allocate nothing.

use crate::{PersistentMap, Zone};

/// Re-adding an existing binding returns the receiver without
/// allocating.
#[test]
fn idempotent_add_allocates_nothing() {
    let zone = Zone::new();
    let map: PersistentMap<u32, i32> = PersistentMap::with_default(&zone, 0).add(1, 1);
    let before = zone.allocated_bytes();
    let same = map.add(1, 1);
    assert_eq!(zone.allocated_bytes(), before);
    assert!(same == map);
}

/// Adding a binding that already equals the default is a no-op.
#[test]
fn default_add_on_unbound_key_allocates_nothing() {
    let zone = Zone::new();
    let map: PersistentMap<u32, i32> = PersistentMap::with_default(&zone, 0).add(1, 1);
    let before = zone.allocated_bytes();
    let same = map.add(2, 0);
    assert_eq!(zone.allocated_bytes(), before);
    assert!(same == map);
}

/// A single add into a large map allocates a bounded amount, not O(n).
#[test]
fn single_add_allocates_o1() {
    let zone = Zone::new();
    let mut map: PersistentMap<u64, u64> = PersistentMap::with_default(&zone, 0);
    for i in 0_u64..10_000 {
        map.set(i, i);
    }
    let before = zone.allocated_bytes();
    let _bigger = map.add(999_999, 1);
    let delta = zone.allocated_bytes() - before;
    // One node plus a path of at most 32 slots; generous bound for
    // chunk rounding.
    assert!(delta < 4096, "single add allocated {delta} bytes");
}

/// Copying a handle allocates nothing.
#[test]
fn handle_copy_allocates_nothing() {
    let zone = Zone::new();
    let mut map: PersistentMap<u64, u64> = PersistentMap::with_default(&zone, 0);
    for i in 0_u64..1000 {
        map.set(i, i);
    }
    let before = zone.allocated_bytes();
    let copy = map;
    assert_eq!(zone.allocated_bytes(), before);
    assert!(copy == map);
}

/// Iteration allocates nothing.
#[test]
fn iteration_allocates_nothing() {
    let zone = Zone::new();
    let mut map: PersistentMap<u64, u64> = PersistentMap::with_default(&zone, 0);
    for i in 0_u64..1000 {
        map.set(i, i + 1);
    }
    let before = zone.allocated_bytes();
    let total: u64 = map.iter().map(|(_, v)| *v).sum();
    assert_eq!(zone.allocated_bytes(), before);
    assert_eq!(total, (1..=1000).sum::<u64>());
}
