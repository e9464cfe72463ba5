use indexmap::IndexMap;
use plasma_core::Handle;

use super::ValueRef;

pub type SymbolTableRef = Handle<SymbolTable>;

/// Insertion-ordered namespace with an optional parent.
///
/// `count` is the number of holders keeping the table alive: child tables
/// naming it as parent, scope-stack entries and the value owning it. The
/// collector frees a table once the count reaches zero.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    pub parent: Option<SymbolTableRef>,
    symbols: IndexMap<String, ValueRef, ahash::RandomState>,
    pub count: usize,
    pub is_set: bool,
}

impl SymbolTable {
    pub fn new(parent: Option<SymbolTableRef>) -> Self {
        Self {
            parent,
            is_set: true,
            ..Self::default()
        }
    }

    /// Local lookup; does not consult the parent.
    #[inline]
    pub fn get_self(&self, name: &str) -> Option<ValueRef> {
        self.symbols.get(name).copied()
    }

    pub fn set(&mut self, name: &str, value: ValueRef) {
        if let Some(slot) = self.symbols.get_mut(name) {
            *slot = value;
        } else {
            self.symbols.insert(name.to_string(), value);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.symbols.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = ValueRef> + '_ {
        self.symbols.values().copied()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
