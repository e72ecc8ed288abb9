use crate::{PersistentMap, Zone};

/// `add` leaves the receiver untouched.
#[test]
fn old_map_keeps_old_value() {
    let zone = Zone::new();
    let first: PersistentMap<u32, i32> = PersistentMap::with_default(&zone, 0).add(1, 1);
    let second = first.add(1, 2);
    assert_eq!(*second.get(&1), 2);
    assert_eq!(*first.get(&1), 1);
}

/// `set` rebinds the handle but not other handles.
#[test]
fn set_does_not_affect_copies() {
    let zone = Zone::new();
    let mut map: PersistentMap<u32, i32> = PersistentMap::with_default(&zone, 0);
    map.set(1, 10);
    let snapshot = map;
    map.set(1, 20);
    map.set(2, 30);
    assert_eq!(*snapshot.get(&1), 10);
    assert_eq!(*snapshot.get(&2), 0);
    assert_eq!(*map.get(&1), 20);
}

/// Every intermediate map along a derivation chain stays valid.
#[test]
fn derivation_chain() {
    let zone = Zone::new();
    let mut maps = vec![PersistentMap::<u64, u64>::with_default(&zone, 0)];
    for i in 0_u64..100 {
        let next = maps.last().unwrap().add(i, i + 1);
        maps.push(next);
    }
    for (n, map) in maps.iter().enumerate() {
        for i in 0_u64..100 {
            let expected = if (i as usize) < n { i + 1 } else { 0 };
            assert_eq!(*map.get(&i), expected, "map {n}, key {i}");
        }
    }
}

/// Overwriting through a long chain never disturbs earlier maps.
#[test]
fn overwrite_chain() {
    let zone = Zone::new();
    let base: PersistentMap<u32, u32> = PersistentMap::with_default(&zone, 0).add(7, 1);
    let mut maps = vec![base];
    for v in 2_u32..20 {
        let next = maps.last().unwrap().add(7, v);
        maps.push(next);
    }
    for (n, map) in maps.iter().enumerate() {
        assert_eq!(*map.get(&7), n as u32 + 1);
    }
}

/// Unbinding in a derived map leaves the original bound.
#[test]
fn unbind_is_persistent() {
    let zone = Zone::new();
    let bound: PersistentMap<u32, i32> = PersistentMap::with_default(&zone, 0).add(3, 33);
    let unbound = bound.add(3, 0);
    assert_eq!(*bound.get(&3), 33);
    assert_eq!(*unbound.get(&3), 0);
    assert_eq!(unbound.iter().count(), 0);
}
