//! Runtime configuration and result types.

use plasma_core::DEFAULT_PAGE_CAPACITY;

/// Result of executing a program through [`VirtualMachine::run`](crate::VirtualMachine::run).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecResult {
    /// `ToString` of the program's result, unless it was `None`.
    pub value: Option<String>,
    /// Everything the program wrote through `print`/`println`.
    pub output: String,
}

/// Runtime configuration options.
#[derive(Clone, Copy, Debug)]
pub struct RuntimeConfig {
    /// Slots in the first page of each heap.
    pub initial_page_capacity: usize,
    /// When false the context never collects and grows on exhaustion.
    pub gc_enabled: bool,
    /// Drop empty pages after a sweep.
    pub shrink_heaps: bool,
    pub max_call_depth: usize,
    pub hash_seed: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            initial_page_capacity: DEFAULT_PAGE_CAPACITY,
            gc_enabled: true,
            shrink_heaps: true,
            max_call_depth: 512,
            hash_seed: 0x5eed_1234_abcd_0001,
        }
    }
}

impl RuntimeConfig {
    pub fn with_initial_page_capacity(mut self, capacity: usize) -> Self {
        self.initial_page_capacity = capacity.max(1);
        self
    }

    pub fn with_gc(mut self, enabled: bool) -> Self {
        self.gc_enabled = enabled;
        self
    }

    pub fn with_shrink_heaps(mut self, shrink: bool) -> Self {
        self.shrink_heaps = shrink;
        self
    }

    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    pub fn with_hash_seed(mut self, seed: u64) -> Self {
        self.hash_seed = seed;
        self
    }
}
