//! Mark-and-sweep collection over the context heaps.

use plasma_core::{FastHashSet, fast_set_new};

use crate::Context;
use crate::core::{SymbolTableRef, ValueRef};

/// Outcome of one collection cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollectionStats {
    pub values_freed: usize,
    pub tables_freed: usize,
    pub values_live: usize,
    pub tables_live: usize,
}

impl Context {
    /// Run a full collection: mark from the roots, sweep values, then release
    /// every symbol table left without holders.
    pub fn collect(&mut self) -> CollectionStats {
        self.mark_all();
        let values_freed = self.sweep_values();
        let tables_freed = self.sweep_tables();
        if self.config.shrink_heaps {
            self.values.remove_empty_pages();
            self.tables.remove_empty_pages();
        }
        let stats = CollectionStats {
            values_freed,
            tables_freed,
            values_live: self.values.live(),
            tables_live: self.tables.live(),
        };
        log::debug!(
            "gc: freed {} values, {} tables; live {} values in {} pages, {} tables in {} pages",
            stats.values_freed,
            stats.tables_freed,
            stats.values_live,
            self.values.page_count(),
            stats.tables_live,
            self.tables.page_count(),
        );
        stats
    }

    fn mark_all(&mut self) {
        let mut pending: Vec<ValueRef> =
            Vec::with_capacity(self.stack.len() + self.protected.len() + 8);
        let mut visited: FastHashSet<SymbolTableRef> = fast_set_new();

        pending.extend(self.last_value);
        pending.extend(self.stack.iter().copied());
        pending.extend(self.protected.iter().copied());
        pending.extend([
            self.singletons.true_,
            self.singletons.false_,
            self.singletons.none,
        ]);
        for index in 0..self.scopes.len() {
            let scope = self.scopes[index];
            self.mark_table_chain(scope, &mut pending, &mut visited);
        }

        while let Some(handle) = pending.pop() {
            let Some(value) = self.values.get_mut(handle) else {
                continue;
            };
            if value.marked || !value.is_set {
                continue;
            }
            value.marked = true;

            pending.extend(value.self_);
            pending.extend(value.content.iter().copied());
            for entry in value.key_values.values().flatten() {
                pending.push(entry.key);
                pending.push(entry.value);
            }
            pending.extend(value.type_);
            pending.extend(value.sub_types.iter().copied());
            pending.extend(value.source);

            let symbols = value.symbols;
            if let Some(symbols) = symbols {
                self.mark_table_chain(symbols, &mut pending, &mut visited);
            }
        }
    }

    /// Queue the bindings of `table` and of every ancestor.
    fn mark_table_chain(
        &self,
        table: SymbolTableRef,
        pending: &mut Vec<ValueRef>,
        visited: &mut FastHashSet<SymbolTableRef>,
    ) {
        let mut current = Some(table);
        while let Some(handle) = current {
            if !visited.insert(handle) {
                break;
            }
            let Some(entry) = self.tables.get(handle) else {
                break;
            };
            pending.extend(entry.values());
            current = entry.parent;
        }
    }

    fn sweep_values(&mut self) -> usize {
        let mut freed = 0;
        for handle in self.values.allocated() {
            let Some(value) = self.values.get_mut(handle) else {
                continue;
            };
            if value.marked {
                value.marked = false;
                continue;
            }
            let symbols = value.symbols;
            if self.values.deallocate(handle) {
                freed += 1;
            }
            if let Some(table) = symbols {
                self.release_table(table);
            }
        }
        freed
    }

    /// Free tables without holders until a pass frees nothing.
    fn sweep_tables(&mut self) -> usize {
        let mut total = 0;
        loop {
            let mut freed = 0;
            for handle in self.tables.allocated() {
                let Some(table) = self.tables.get(handle) else {
                    continue;
                };
                if table.count > 0 {
                    continue;
                }
                let parent = table.parent;
                if self.tables.deallocate(handle) {
                    freed += 1;
                }
                if let Some(parent) = parent {
                    self.release_table(parent);
                }
            }
            if freed == 0 {
                break;
            }
            total += freed;
        }
        total
    }

    fn release_table(&mut self, table: SymbolTableRef) {
        if let Some(entry) = self.tables.get_mut(table) {
            entry.count = entry.count.saturating_sub(1);
        }
    }
}
