//! Hash containers tuned for the engine's key shapes.
//!
//! [`HashMap`]/[`HashSet`] use a fixed-seed `foldhash` state for arbitrary
//! keys (component id slices, archetype signatures). [`SparseHashMap`]/
//! [`SparseHashSet`] use a pass-through hasher for keys that are already
//! small dense integers and need no mixing at all.

mod hasher;

pub use hasher::{FixedHashState, FixedHasher, NoOpHashState, NoOpHasher};

pub use hashbrown;
pub use hashbrown::hash_map;

/// A `hashbrown` map with a fixed-seed high-quality hasher.
pub type HashMap<K, V> = hashbrown::HashMap<K, V, FixedHashState>;

/// A `hashbrown` set with a fixed-seed high-quality hasher.
pub type HashSet<T> = hashbrown::HashSet<T, FixedHashState>;

/// A `hashbrown` map keyed by dense integer ids; hashing is a pass-through.
pub type SparseHashMap<K, V> = hashbrown::HashMap<K, V, NoOpHashState>;

/// A `hashbrown` set keyed by dense integer ids; hashing is a pass-through.
pub type SparseHashSet<T> = hashbrown::HashSet<T, NoOpHashState>;
