//! Persistent map based on hash trees with focused paths.
//!
//! [`PersistentMap`] is a functional map: every update produces a new
//! logical map while sharing structure with its predecessors, so any
//! number of intermediate maps can coexist, be compared, and be joined.
//! The map is conceptually total — every key starts out bound to a
//! caller-chosen default value, and a key is unbound by writing the
//! default back. Iteration yields exactly the non-default entries, in
//! the lexicographic order of `(hash, key)`.
//!
//! The tree is binary, addressed by the bits of a 32-bit key hash from
//! the most significant bit down. Instead of materializing every inner
//! node, each update flattens the spine of the newly added leaf into a
//! single **focused** record that stores the off-path sibling at every
//! level. A single update therefore allocates one node regardless of
//! depth, while older maps keep seeing the old spine.
//!
//! # Key properties
//!
//! - **Persistence**: updates never touch published nodes
//! - **O(1) handle copy**: a map is three pointers, `Copy` for any `K`, `V`
//! - **One node per update**: the whole spine is a single record
//! - **Zone allocation**: all nodes live in a caller-supplied [`Zone`]
//!   and are released together when it drops
//!
//! # Example
//!
//! ```
//! use focus_map::{PersistentMap, Zone};
//!
//! let zone = Zone::new();
//! let empty: PersistentMap<u32, u32> = PersistentMap::with_default(&zone, 0);
//! let one = empty.add(1, 10);
//! let two = one.add(2, 20);
//!
//! assert_eq!(*two.get(&1), 10);
//! assert_eq!(*two.get(&2), 20);
//! assert_eq!(*one.get(&2), 0); // older maps are unaffected
//! ```
//!
//! # References
//!
//! - Bagwell, 2001 — "Ideal Hash Trees"
//! - Okasaki, 1998 — "Purely Functional Data Structures"

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod iter;
pub mod zone;

mod hash;
mod map;
mod node;
mod ops;

#[cfg(test)]
mod tests;

pub use hash::{DefaultKeyHasher, KeyHasher};
pub use map::PersistentMap;
pub use zone::Zone;
