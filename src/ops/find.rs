//! Lookup operations — hash search, path recording, leftmost descent.

use crate::hash::{Bit, HashValue, HASH_BITS};
use crate::node::FocusedTree;

/// Finds the record whose focused leaf carries `hash`.
///
/// Walks the focused path of each record, jumping directly to the first
/// level at which the two hashes disagree and descending through the
/// off-path slot there.
pub(crate) fn find_hash<'z, K, V>(
    root: Option<&'z FocusedTree<'z, K, V>>,
    hash: HashValue,
) -> Option<&'z FocusedTree<'z, K, V>> {
    let mut tree = root;
    while let Some(t) = tree {
        if t.hash == hash {
            return Some(t);
        }
        tree = t.path_slot(t.hash.common_prefix(hash));
    }
    None
}

/// As [`find_hash`], but also records, level by level, the off-path
/// subtrees that a focused path rooted at `hash` must carry to
/// represent the same tree.
///
/// At a level where the searched hash agrees with the current record's
/// hash, the abandoned subtree is that record's own off-path slot; at
/// the first level where they disagree, it is the record itself (its
/// whole remaining spine lies across that bit). When a matching record
/// is found its remaining slots are copied through. Returns the record
/// (absent if no leaf carries `hash`) and the number of slots written.
pub(crate) fn find_hash_with_path<'z, K, V>(
    root: Option<&'z FocusedTree<'z, K, V>>,
    hash: HashValue,
    path: &mut [Option<&'z FocusedTree<'z, K, V>>; HASH_BITS],
) -> (Option<&'z FocusedTree<'z, K, V>>, usize) {
    let mut tree = root;
    let mut level = 0;
    while let Some(t) = tree {
        if t.hash == hash {
            while level < t.path.len() {
                path[level] = t.path[level];
                level += 1;
            }
            return (Some(t), level);
        }
        while hash.bit(level) == t.hash.bit(level) {
            path[level] = t.path_slot(level);
            level += 1;
        }
        path[level] = Some(t);
        tree = t.path_slot(level);
        level += 1;
    }
    (None, level)
}

/// Loads the value bound to `key` from the focused leaf of `tree`.
pub(crate) fn focused_value<'z, K: Ord, V>(
    tree: Option<&'z FocusedTree<'z, K, V>>,
    key: &K,
    def_value: &'z V,
) -> &'z V {
    let Some(tree) = tree else {
        return def_value;
    };
    if let Some(entries) = tree.overflow {
        match entries.binary_search_by(|e| e.key.cmp(key)) {
            Ok(i) => &entries[i].value,
            Err(_) => def_value,
        }
    } else if tree.entry.key == *key {
        &tree.entry.value
    } else {
        def_value
    }
}

/// Descends to the leftmost leaf reachable from `start` at depth
/// `level`, recording the not-taken sibling of every step into `path`.
///
/// Outputs the leaf's depth through `level`. A level with neither child
/// cannot occur: the focused record itself is always one of the two.
pub(crate) fn find_leftmost<'z, K, V>(
    start: &'z FocusedTree<'z, K, V>,
    level: &mut usize,
    path: &mut [Option<&'z FocusedTree<'z, K, V>>; HASH_BITS],
) -> &'z FocusedTree<'z, K, V> {
    let mut current = start;
    while *level < current.path.len() {
        if let Some(child) = current.child(*level, Bit::Left) {
            path[*level] = current.child(*level, Bit::Right);
            current = child;
        } else if let Some(child) = current.child(*level, Bit::Right) {
            path[*level] = current.child(*level, Bit::Left);
            current = child;
        } else {
            unreachable!("focused tree level with both subtrees absent");
        }
        *level += 1;
    }
    current
}
