//! The persistent map handle.

use std::fmt;
use std::marker::PhantomData;
use std::ptr;

use crate::hash::{DefaultKeyHasher, HashValue, KeyHasher};
use crate::iter::{Iter, Zip};
use crate::node::FocusedTree;
use crate::ops::{find, insert};
use crate::zone::Zone;

/// Persistent map over hash trees with focused paths.
///
/// Conceptually the map is total: every key is bound, initially to the
/// default value chosen at construction, and a key is unbound by
/// writing the default back. [`add`](Self::add) returns a new map and
/// leaves the receiver intact; [`set`](Self::set) is the in-place
/// spelling. Distinct handles share the tree and the [`Zone`] it lives
/// in, and the handle itself is three pointers — copying it copies no
/// tree structure.
///
/// `get` and `add` are `O(W)` with `W` the hash width, iteration is
/// amortized `O(1)` per step, zipping and equality are `O(n)` in the
/// entries that differ from the defaults.
///
/// The hasher `H` is a stateless type parameter so that any two maps of
/// the same type agree on every key's position; see [`KeyHasher`] for
/// the distribution its output must provide.
pub struct PersistentMap<'z, K, V, H = DefaultKeyHasher> {
    tree: Option<&'z FocusedTree<'z, K, V>>,
    def_value: &'z V,
    zone: &'z Zone,
    hasher: PhantomData<H>,
}

// Manual impls — a handle is copyable regardless of `K`, `V`, `H`.
impl<K, V, H> Clone for PersistentMap<'_, K, V, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V, H> Copy for PersistentMap<'_, K, V, H> {}

// ---------------------------------------------------------------------------
// Construction & accessors — no trait bounds
// ---------------------------------------------------------------------------

impl<'z, K, V, H> PersistentMap<'z, K, V, H> {
    /// Creates an empty map in `zone` with `V::default()` as the
    /// default value.
    #[must_use]
    pub fn new(zone: &'z Zone) -> Self
    where
        V: Default,
    {
        Self::with_default(zone, V::default())
    }

    /// Creates an empty map in `zone`; every key is bound to
    /// `def_value`.
    #[must_use]
    pub fn with_default(zone: &'z Zone, def_value: V) -> Self {
        Self {
            tree: None,
            def_value: zone.alloc(def_value),
            zone,
            hasher: PhantomData,
        }
    }

    /// Returns the default value.
    #[must_use]
    pub fn default_value(&self) -> &'z V {
        self.def_value
    }

    /// Depth of the most recently added leaf — 0 for an empty map.
    ///
    /// A cheap estimate for the size of the tree.
    #[must_use]
    pub fn last_depth(&self) -> usize {
        self.tree.map_or(0, |t| t.path.len())
    }
}

// ---------------------------------------------------------------------------
// Keyed operations — K: Ord, H: KeyHasher
// ---------------------------------------------------------------------------

impl<'z, K, V, H> PersistentMap<'z, K, V, H>
where
    K: Ord,
    H: KeyHasher<K> + Default,
{
    fn hash_of(key: &K) -> HashValue {
        HashValue::new(H::default().hash_key(key))
    }

    /// Returns the value bound to `key`.
    ///
    /// The reference borrows from the zone, not from this handle, so it
    /// stays valid after the handle is dropped or reassigned.
    #[must_use]
    pub fn get(&self, key: &K) -> &'z V {
        let tree = find::find_hash(self.tree, Self::hash_of(key));
        find::focused_value(tree, key, self.def_value)
    }

    /// Returns a map identical to this one except that `key` is bound
    /// to `value`.
    ///
    /// When `key` is already bound to `value` the receiver is returned
    /// unchanged and nothing is allocated; otherwise exactly one node
    /// is allocated, plus a fresh collision slice when `key` collides
    /// with a different key at the full hash width.
    #[must_use]
    pub fn add(&self, key: K, value: V) -> Self
    where
        K: Clone,
        V: PartialEq + Clone,
    {
        let hash = Self::hash_of(&key);
        match insert::add_entry(self.zone, self.tree, self.def_value, hash, key, value) {
            Some(tree) => Self {
                tree: Some(tree),
                ..*self
            },
            None => *self,
        }
    }

    /// Binds `key` to `value` in place.
    ///
    /// Equivalent to `*self = self.add(key, value)`; other handles
    /// still see the previous root.
    pub fn set(&mut self, key: K, value: V)
    where
        K: Clone,
        V: PartialEq + Clone,
    {
        *self = self.add(key, value);
    }
}

// ---------------------------------------------------------------------------
// Iteration
// ---------------------------------------------------------------------------

impl<'z, K, V, H> PersistentMap<'z, K, V, H> {
    /// Iterates over the non-default entries in `(hash, key)` order.
    #[must_use]
    pub fn iter(&self) -> Iter<'z, K, V>
    where
        V: PartialEq,
    {
        Iter::new(self.tree, self.def_value)
    }

    /// Traverses this map and `other` in lock step.
    ///
    /// Yields `(key, value here, value there)` for every key bound to a
    /// non-default value in at least one of the two maps; the side not
    /// binding the key contributes its own default, so the two maps may
    /// have different defaults.
    #[must_use]
    pub fn zip(&self, other: &Self) -> Zip<'z, K, V>
    where
        V: PartialEq,
    {
        Zip::new(self.tree, self.def_value, other.tree, other.def_value)
    }
}

impl<'m, 'z, K, V: PartialEq, H> IntoIterator for &'m PersistentMap<'z, K, V, H> {
    type Item = (&'z K, &'z V);
    type IntoIter = Iter<'z, K, V>;

    fn into_iter(self) -> Iter<'z, K, V> {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// Comparison & formatting
// ---------------------------------------------------------------------------

impl<K: Ord, V: PartialEq, H> PartialEq for PersistentMap<'_, K, V, H> {
    /// Two maps are equal when their defaults are equal and they bind
    /// every key to equal values.
    ///
    /// Pointer-equal roots short-circuit to `true`; otherwise the cost
    /// is linear in the entries differing from the defaults.
    fn eq(&self, other: &Self) -> bool {
        if *self.def_value != *other.def_value {
            return false;
        }
        match (self.tree, other.tree) {
            (Some(a), Some(b)) if ptr::eq(a, b) => true,
            _ => self.zip(other).all(|(_, va, vb)| va == vb),
        }
    }
}

impl<K, V, H> fmt::Debug for PersistentMap<'_, K, V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistentMap")
            .field("last_depth", &self.last_depth())
            .finish_non_exhaustive()
    }
}

impl<K, V, H> fmt::Display for PersistentMap<'_, K, V, H>
where
    K: fmt::Display,
    V: fmt::Display + PartialEq,
{
    /// Renders `{k1: v1, k2: v2}` in iteration order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        let mut first = true;
        for (key, value) in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{key}: {value}")?;
        }
        f.write_str("}")
    }
}
