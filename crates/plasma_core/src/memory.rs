//! Paged slab allocator.
//!
//! A [`Heap`] hands out fixed records from pages of homogeneous storage. Free
//! slots live on a single stack shared by all pages, so allocation and
//! deallocation are O(1). The heap never grows on its own: the owner decides
//! when to add a page (usually after a collection failed to free anything).

use crate::{FastHashMap, Handle, fast_map_new};

/// Capacity of the first page of a freshly constructed heap.
pub const DEFAULT_PAGE_CAPACITY: usize = 250;

/// One page of records.
pub struct Page<T> {
    capacity: usize,
    live: usize,
    occupied: Vec<bool>,
    records: Vec<T>,
}

impl<T: Default> Page<T> {
    fn new(capacity: usize) -> Self {
        let mut records = Vec::with_capacity(capacity);
        records.resize_with(capacity, T::default);
        Self {
            capacity,
            live: 0,
            occupied: vec![false; capacity],
            records,
        }
    }
}

impl<T> Page<T> {
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of allocated records in this page.
    #[inline]
    pub fn live(&self) -> usize {
        self.live
    }
}

/// Occupancy snapshot of a heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeapStats {
    pub pages: usize,
    pub capacity: usize,
    pub live: usize,
    pub free: usize,
}

pub struct Heap<T> {
    pages: FastHashMap<usize, Page<T>>,
    available: Vec<Handle<T>>,
    next_page: usize,
}

impl<T: Default> Heap<T> {
    /// Create a heap with one page of `initial_capacity` slots, all free.
    pub fn new(initial_capacity: usize) -> Self {
        let mut heap = Self {
            pages: fast_map_new(),
            available: Vec::new(),
            next_page: 0,
        };
        heap.new_page(initial_capacity);
        heap
    }

    /// Add a page and push every one of its slots onto the free stack.
    ///
    /// Slots are pushed in reverse so that the lowest slot is handed out first.
    pub fn new_page(&mut self, capacity: usize) -> usize {
        let capacity = capacity.max(1);
        let index = self.next_page;
        self.next_page += 1;
        self.pages.insert(index, Page::new(capacity));
        self.available.reserve(capacity);
        for slot in (0..capacity).rev() {
            self.available.push(Handle::new(index, slot));
        }
        log::debug!("heap: new page {index} with {capacity} slots");
        index
    }

    /// Take one free slot. Returns `None` when the free stack is exhausted.
    pub fn allocate(&mut self) -> Option<Handle<T>> {
        let handle = self.available.pop()?;
        let page = self.pages.get_mut(&handle.page())?;
        page.occupied[handle.slot()] = true;
        page.live += 1;
        Some(handle)
    }

    /// Reset the record behind `handle` and return its slot to the free stack.
    ///
    /// Returns `false` when the handle is dangling or already free.
    pub fn deallocate(&mut self, handle: Handle<T>) -> bool {
        let Some(page) = self.pages.get_mut(&handle.page()) else {
            return false;
        };
        let slot = handle.slot();
        if slot >= page.capacity || !page.occupied[slot] {
            return false;
        }
        page.records[slot] = T::default();
        page.occupied[slot] = false;
        page.live -= 1;
        self.available.push(handle);
        true
    }

    /// Drop pages that hold no live record, keeping at least one page.
    ///
    /// Returns the number of pages removed.
    pub fn remove_empty_pages(&mut self) -> usize {
        let mut empty: Vec<usize> = self
            .pages
            .iter()
            .filter(|(_, page)| page.live == 0)
            .map(|(index, _)| *index)
            .collect();
        if empty.len() == self.pages.len() {
            // Keep the largest page around so the heap stays usable.
            let keep = self
                .pages
                .iter()
                .max_by_key(|(index, page)| (page.capacity, usize::MAX - **index))
                .map(|(index, _)| *index);
            empty.retain(|index| Some(*index) != keep);
        }
        if empty.is_empty() {
            return 0;
        }
        for index in &empty {
            self.pages.remove(index);
        }
        self.available.retain(|handle| !empty.contains(&handle.page()));
        log::debug!("heap: removed {} empty page(s)", empty.len());
        empty.len()
    }
}

impl<T> Heap<T> {
    /// True when no free slot is left.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.available.is_empty()
    }

    #[inline]
    pub fn available(&self) -> usize {
        self.available.len()
    }

    /// Capacity of the largest page; growth doubles this value.
    pub fn max_page_capacity(&self) -> usize {
        self.pages.values().map(Page::capacity).max().unwrap_or(0)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn page(&self, index: usize) -> Option<&Page<T>> {
        self.pages.get(&index)
    }

    pub fn is_allocated(&self, handle: Handle<T>) -> bool {
        self.pages
            .get(&handle.page())
            .and_then(|page| page.occupied.get(handle.slot()).copied())
            .unwrap_or(false)
    }

    pub fn get(&self, handle: Handle<T>) -> Option<&T> {
        let page = self.pages.get(&handle.page())?;
        if !*page.occupied.get(handle.slot())? {
            return None;
        }
        page.records.get(handle.slot())
    }

    pub fn get_mut(&mut self, handle: Handle<T>) -> Option<&mut T> {
        let page = self.pages.get_mut(&handle.page())?;
        if !*page.occupied.get(handle.slot())? {
            return None;
        }
        page.records.get_mut(handle.slot())
    }

    /// Handles of every allocated record, in page then slot order.
    pub fn allocated(&self) -> Vec<Handle<T>> {
        let mut indices: Vec<usize> = self.pages.keys().copied().collect();
        indices.sort_unstable();
        let mut result = Vec::with_capacity(self.live());
        for index in indices {
            let page = &self.pages[&index];
            for (slot, occupied) in page.occupied.iter().enumerate() {
                if *occupied {
                    result.push(Handle::new(index, slot));
                }
            }
        }
        result
    }

    pub fn live(&self) -> usize {
        self.pages.values().map(Page::live).sum()
    }

    pub fn capacity(&self) -> usize {
        self.pages.values().map(Page::capacity).sum()
    }

    pub fn stats(&self) -> HeapStats {
        HeapStats {
            pages: self.pages.len(),
            capacity: self.capacity(),
            live: self.live(),
            free: self.available.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_is_fully_available() {
        let heap: Heap<u64> = Heap::new(DEFAULT_PAGE_CAPACITY);
        assert_eq!(heap.available(), DEFAULT_PAGE_CAPACITY);
        assert_eq!(heap.max_page_capacity(), DEFAULT_PAGE_CAPACITY);
        assert_eq!(heap.live(), 0);
    }

    #[test]
    fn lowest_slot_is_handed_out_first() {
        let mut heap: Heap<u8> = Heap::new(4);
        let first = heap.allocate().unwrap();
        assert_eq!((first.page(), first.slot()), (0, 0));
    }

    #[test]
    fn deallocate_resets_record() {
        let mut heap: Heap<String> = Heap::new(2);
        let h = heap.allocate().unwrap();
        heap.get_mut(h).unwrap().push_str("payload");
        assert!(heap.deallocate(h));
        assert!(heap.get(h).is_none());
        let again = heap.allocate().unwrap();
        assert_eq!(again, h);
        assert_eq!(heap.get(again).unwrap(), "");
    }

    #[test]
    fn double_free_is_rejected() {
        let mut heap: Heap<u8> = Heap::new(2);
        let h = heap.allocate().unwrap();
        assert!(heap.deallocate(h));
        assert!(!heap.deallocate(h));
        assert_eq!(heap.available(), 2);
    }

    #[test]
    fn empty_pages_are_removed_but_one_is_kept() {
        let mut heap: Heap<u8> = Heap::new(2);
        heap.new_page(4);
        assert_eq!(heap.remove_empty_pages(), 1);
        assert_eq!(heap.page_count(), 1);
        assert_eq!(heap.max_page_capacity(), 4);
        assert_eq!(heap.available(), 4);
    }
}
