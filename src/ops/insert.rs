//! Insertion — allocates one focused record carrying the re-rooted path.

use crate::hash::{HashValue, HASH_BITS};
use crate::node::{Entry, FocusedTree};
use crate::ops::find;
use crate::zone::Zone;

/// Binds `key` to `value` in the tree rooted at `root`.
///
/// Returns the root of the updated tree, or `None` when `key` is
/// already bound to `value` and the receiver can be reused as is.
/// Otherwise exactly one record is allocated, plus a new overflow slice
/// when `key` collides with a different key at the full hash width.
pub(crate) fn add_entry<'z, K, V>(
    zone: &'z Zone,
    root: Option<&'z FocusedTree<'z, K, V>>,
    def_value: &'z V,
    hash: HashValue,
    key: K,
    value: V,
) -> Option<&'z FocusedTree<'z, K, V>>
where
    K: Ord + Clone,
    V: PartialEq + Clone,
{
    let mut path = [None; HASH_BITS];
    let (old, length) = find::find_hash_with_path(root, hash, &mut path);
    if *find::focused_value(old, &key, def_value) == value {
        return None;
    }
    let overflow = build_overflow(zone, old, &key, &value);
    Some(zone.alloc(FocusedTree {
        entry: Entry { key, value },
        hash,
        overflow,
        path: zone.alloc_slice(path[..length].iter().copied()),
    }))
}

/// Builds the collision bindings for a record replacing `old`.
///
/// Absent unless `old` holds a key other than `key` at the same hash,
/// either as its focused entry or in an existing overflow. Otherwise
/// the bindings are copied, `key` is bound, and the slice is kept in
/// key order so lookups can bisect and iteration stays sorted.
fn build_overflow<'z, K, V>(
    zone: &'z Zone,
    old: Option<&'z FocusedTree<'z, K, V>>,
    key: &K,
    value: &V,
) -> Option<&'z [Entry<K, V>]>
where
    K: Ord + Clone,
    V: Clone,
{
    let old = old?;
    if old.overflow.is_none() && old.entry.key == *key {
        return None;
    }
    let mut entries: Vec<Entry<K, V>> = match old.overflow {
        Some(existing) => existing.to_vec(),
        None => vec![old.entry.clone()],
    };
    match entries.binary_search_by(|e| e.key.cmp(key)) {
        Ok(i) => entries[i].value = value.clone(),
        Err(i) => entries.insert(
            i,
            Entry {
                key: key.clone(),
                value: value.clone(),
            },
        ),
    }
    Some(zone.alloc_slice(entries))
}
