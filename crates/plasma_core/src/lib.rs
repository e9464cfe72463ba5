//! Core memory types for the Plasma runtime.
//!
//! This crate contains the allocation primitives that are independent of the
//! object model:
//! - `Handle` - typed `(page, slot)` index into a paged heap
//! - `Heap` / `Page` - slab allocator with a free-chunk stack
//! - `FastHashMap` / `FastHashSet` - deterministic hashbrown aliases

pub mod handle;
pub mod memory;

pub use handle::Handle;
pub use memory::{DEFAULT_PAGE_CAPACITY, Heap, HeapStats, Page};

use std::hash::Hash;

pub type FastHashMap<K, V> = hashbrown::HashMap<K, V, ahash::RandomState>;
pub type FastHashSet<K> = hashbrown::HashSet<K, ahash::RandomState>;

pub fn fast_hasher() -> ahash::RandomState {
    ahash::RandomState::with_seeds(0, 0, 0, 0)
}

pub fn fast_map_new<K: Eq + Hash, V>() -> FastHashMap<K, V> {
    FastHashMap::with_hasher(fast_hasher())
}

pub fn fast_set_new<K: Eq + Hash>() -> FastHashSet<K> {
    FastHashSet::with_hasher(fast_hasher())
}
