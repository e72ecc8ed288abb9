//! Iterators over persistent maps.
//!
//! Both iterators are plain value cursors: cheap to copy, allocation
//! free, and valid for as long as the zone the map was built in.

use std::cmp::Ordering;
use std::iter::FusedIterator;

use crate::hash::{Bit, HASH_BITS};
use crate::node::{Entry, FocusedTree};
use crate::ops::find::find_leftmost;

/// Cursor over the non-default entries of one tree, in `(hash, key)`
/// order.
///
/// Holds the current record, its depth, and the off-path siblings still
/// to be visited at every level above it — the explicit form of a DFS
/// stack. Inside a collision class, `overflow_pos` walks the ordered
/// overflow slice.
pub(crate) struct Cursor<'z, K, V> {
    current: Option<&'z FocusedTree<'z, K, V>>,
    level: usize,
    overflow_pos: usize,
    path: [Option<&'z FocusedTree<'z, K, V>>; HASH_BITS],
    def_value: &'z V,
}

// Manual impls — a cursor is copyable regardless of `K` and `V`.
impl<K, V> Clone for Cursor<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Cursor<'_, K, V> {}

impl<'z, K, V> Cursor<'z, K, V> {
    /// The exhausted cursor.
    pub(crate) fn end(def_value: &'z V) -> Self {
        Self {
            current: None,
            level: 0,
            overflow_pos: 0,
            path: [None; HASH_BITS],
            def_value,
        }
    }

    /// Cursor at the first non-default entry of `tree`.
    pub(crate) fn begin(tree: &'z FocusedTree<'z, K, V>, def_value: &'z V) -> Self
    where
        V: PartialEq,
    {
        let mut cursor = Self::end(def_value);
        cursor.current = Some(find_leftmost(tree, &mut cursor.level, &mut cursor.path));
        if cursor.entry().is_some_and(|e| e.value == *def_value) {
            cursor.advance();
        }
        cursor
    }

    /// The entry under the cursor, `None` at end.
    #[inline]
    pub(crate) fn entry(&self) -> Option<&'z Entry<K, V>> {
        self.current.map(|c| entry_of(c, self.overflow_pos))
    }

    /// Moves to the next non-default entry, or to end.
    ///
    /// Steps within the collision class first; otherwise pops to the
    /// deepest level where the focused hash went left and an off-path
    /// sibling remains, then descends to that sibling's leftmost leaf.
    /// Default-valued entries are skipped.
    pub(crate) fn advance(&mut self)
    where
        V: PartialEq,
    {
        loop {
            let Some(current) = self.current else {
                // Already past the end.
                return;
            };
            if let Some(entries) = current.overflow {
                self.overflow_pos += 1;
                if self.overflow_pos < entries.len() {
                    if entries[self.overflow_pos].value != *self.def_value {
                        return;
                    }
                    continue;
                }
            }
            let mut level = self.level;
            let sibling = loop {
                if level == 0 {
                    *self = Self::end(self.def_value);
                    return;
                }
                level -= 1;
                if current.hash.bit(level) == Bit::Left {
                    if let Some(sibling) = self.path[level] {
                        break sibling;
                    }
                }
            };
            self.level = level + 1;
            self.overflow_pos = 0;
            self.current = Some(find_leftmost(sibling, &mut self.level, &mut self.path));
            if self.entry().is_some_and(|e| e.value != *self.def_value) {
                return;
            }
        }
    }

    /// Total order on cursors: end sorts after everything, non-end
    /// cursors compare by `(hash, key)`.
    pub(crate) fn compare(&self, other: &Self) -> Ordering
    where
        K: Ord,
    {
        match (self.current, other.current) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => a.hash.cmp(&b.hash).then_with(|| {
                entry_of(a, self.overflow_pos)
                    .key
                    .cmp(&entry_of(b, other.overflow_pos).key)
            }),
        }
    }
}

/// The entry `node` presents at overflow position `pos`.
#[inline]
fn entry_of<'z, K, V>(node: &'z FocusedTree<'z, K, V>, pos: usize) -> &'z Entry<K, V> {
    match node.overflow {
        Some(entries) => &entries[pos],
        None => &node.entry,
    }
}

/// Iterator over the non-default entries of a map, in `(hash, key)`
/// order.
///
/// Returned by [`PersistentMap::iter`](crate::PersistentMap::iter).
/// Items borrow from the zone, not from the map handle, so they outlive
/// the handle that produced them.
pub struct Iter<'z, K, V> {
    cursor: Cursor<'z, K, V>,
}

// Manual impls — an iterator is copyable regardless of `K` and `V`.
impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Iter<'_, K, V> {}

impl<'z, K, V> Iter<'z, K, V> {
    pub(crate) fn new(tree: Option<&'z FocusedTree<'z, K, V>>, def_value: &'z V) -> Self
    where
        V: PartialEq,
    {
        let cursor = match tree {
            Some(tree) => Cursor::begin(tree, def_value),
            None => Cursor::end(def_value),
        };
        Self { cursor }
    }
}

impl<'z, K, V: PartialEq> Iterator for Iter<'z, K, V> {
    type Item = (&'z K, &'z V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.cursor.entry()?;
        self.cursor.advance();
        Some((&entry.key, &entry.value))
    }
}

impl<K, V: PartialEq> FusedIterator for Iter<'_, K, V> {}

/// Lock-step iterator over two maps.
///
/// Returned by [`PersistentMap::zip`](crate::PersistentMap::zip).
/// Yields `(key, left value, right value)` for every key bound to a
/// non-default value on at least one side; a side that does not bind
/// the key contributes its default. Keys arrive in `(hash, key)` order.
pub struct Zip<'z, K, V> {
    left: Cursor<'z, K, V>,
    right: Cursor<'z, K, V>,
}

impl<K, V> Clone for Zip<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Zip<'_, K, V> {}

impl<'z, K, V> Zip<'z, K, V> {
    pub(crate) fn new(
        left_tree: Option<&'z FocusedTree<'z, K, V>>,
        left_def: &'z V,
        right_tree: Option<&'z FocusedTree<'z, K, V>>,
        right_def: &'z V,
    ) -> Self
    where
        V: PartialEq,
    {
        let begin = |tree, def| match tree {
            Some(tree) => Cursor::begin(tree, def),
            None => Cursor::end(def),
        };
        Self {
            left: begin(left_tree, left_def),
            right: begin(right_tree, right_def),
        }
    }
}

impl<'z, K: Ord, V: PartialEq> Iterator for Zip<'z, K, V> {
    type Item = (&'z K, &'z V, &'z V);

    fn next(&mut self) -> Option<Self::Item> {
        match self.left.compare(&self.right) {
            Ordering::Equal => match (self.left.entry(), self.right.entry()) {
                (Some(l), Some(r)) => {
                    self.left.advance();
                    self.right.advance();
                    Some((&l.key, &l.value, &r.value))
                }
                // Both ends.
                _ => None,
            },
            Ordering::Less => {
                let l = self.left.entry()?;
                self.left.advance();
                Some((&l.key, &l.value, self.right.def_value))
            }
            Ordering::Greater => {
                let r = self.right.entry()?;
                self.right.advance();
                Some((&r.key, self.left.def_value, &r.value))
            }
        }
    }
}

impl<K: Ord, V: PartialEq> FusedIterator for Zip<'_, K, V> {}
