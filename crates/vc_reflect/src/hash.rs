//! Hash containers with a fixed hasher.
//!
//! Registry lookups and caches do not need DoS resistance, the
//! [`FixedState`] of `foldhash` keeps them fast and deterministic.

use core::any::TypeId;

pub use foldhash::fast::FixedState;

/// A [`hashbrown::HashMap`] with [`FixedState`].
pub type HashMap<K, V> = hashbrown::HashMap<K, V, FixedState>;

/// A [`hashbrown::HashSet`] with [`FixedState`].
pub type HashSet<T> = hashbrown::HashSet<T, FixedState>;

/// A map keyed by [`TypeId`].
pub type TypeIdMap<V> = HashMap<TypeId, V>;

/// Creates an empty [`HashMap`], usable in `static` items.
#[inline]
pub const fn new_map<K, V>() -> HashMap<K, V> {
    hashbrown::HashMap::with_hasher(FixedState::with_seed(0))
}
