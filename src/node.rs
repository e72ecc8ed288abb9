//! Focused tree nodes.

use std::fmt;

use crate::hash::{Bit, HashValue};

/// A key-value pair.
#[derive(Clone)]
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
}

/// A hash tree with one focused path to a specific leaf.
///
/// For the focused leaf the record stores key, value and key hash. In a
/// conventional tree the nodes of a root-to-leaf path form a linked
/// list whose outward pointers leave the path; here only those outward
/// pointers are stored, as `path`, the way a DFS stack would hold them.
/// The hash bits of the focused leaf say for each level whether the
/// stored sibling lies to the left or to the right.
///
/// Because the path nodes have no explicit representation, one record
/// stands for every node on its path: the intended level is always
/// clear from the referencing context. A reference stored in a map
/// handle means the root; a reference found at `path[i]` of another
/// record means the subtree at level `i + 1`.
pub(crate) struct FocusedTree<'z, K, V> {
    /// The focused leaf.
    pub(crate) entry: Entry<K, V>,
    /// Hash of the focused key.
    pub(crate) hash: HashValue,
    /// All bindings whose keys share `hash`, in key order, including
    /// the focused entry itself. Present only when a collision exists.
    pub(crate) overflow: Option<&'z [Entry<K, V>]>,
    /// Off-path sibling per level above the focused leaf. `path[i]`
    /// lies on the opposite side of the leaf hash's bit `i`; a `None`
    /// slot is an empty subtree. The slice length is the depth at
    /// which the focused path terminates.
    pub(crate) path: &'z [Option<&'z FocusedTree<'z, K, V>>],
}

impl<'z, K, V> FocusedTree<'z, K, V> {
    /// Returns the child of the node this record represents at `level`,
    /// on the `bit` side.
    ///
    /// On the focused side the child is this record itself, viewed one
    /// level lower; on the off-path side it is the stored sibling.
    #[inline]
    pub(crate) fn child(&'z self, level: usize, bit: Bit) -> Option<&'z Self> {
        if self.hash.bit(level) == bit {
            Some(self)
        } else {
            self.path_slot(level)
        }
    }

    /// Returns the off-path subtree at `level`, absent when the slot is
    /// empty or beyond the stored path.
    #[inline]
    pub(crate) fn path_slot(&self, level: usize) -> Option<&'z Self> {
        self.path.get(level).copied().flatten()
    }
}

// Manual impl — avoids false `K: Debug, V: Debug` bounds.
impl<K, V> fmt::Debug for FocusedTree<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusedTree")
            .field("hash", &self.hash)
            .field("length", &self.path.len())
            .field("overflow", &self.overflow.map(<[_]>::len))
            .finish_non_exhaustive()
    }
}
