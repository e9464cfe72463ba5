//! Typed arena indices.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Reference to a record stored in a [`Heap`](crate::Heap).
///
/// A handle names a page and a slot inside it. It does not own the record and
/// may dangle once the slot is deallocated; heaps report such lookups as `None`.
pub struct Handle<T> {
    page: u32,
    slot: u32,
    _record: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    pub(crate) fn new(page: usize, slot: usize) -> Self {
        Self {
            page: page as u32,
            slot: slot as u32,
            _record: PhantomData,
        }
    }

    #[inline]
    pub fn page(self) -> usize {
        self.page as usize
    }

    #[inline]
    pub fn slot(self) -> usize {
        self.slot as usize
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.page == other.page && self.slot == other.slot
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.page.hash(state);
        self.slot.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({}:{})", self.page, self.slot)
    }
}
