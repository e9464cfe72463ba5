//! Execution context: the heaps, stacks and scopes of one evaluation.

use std::io::{self, BufRead, Write};

use plasma_core::{Heap, HeapStats};
use plasma_ir::{Body, Bytecode};

use crate::config::RuntimeConfig;
use crate::core::{Hashing, SymbolTable, SymbolTableRef, TypeTag, Value, ValueRef};
use crate::errors;

/// Host byte streams used by the I/O built-ins.
pub struct Streams {
    pub stdin: Box<dyn BufRead>,
    pub stdout: Box<dyn Write>,
    pub stderr: Box<dyn Write>,
}

impl Default for Streams {
    fn default() -> Self {
        Self {
            stdin: Box::new(io::BufReader::new(io::stdin())),
            stdout: Box::new(io::stdout()),
            stderr: Box::new(io::stderr()),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Singletons {
    pub(crate) true_: ValueRef,
    pub(crate) false_: ValueRef,
    pub(crate) none: ValueRef,
}

pub struct Context {
    pub(crate) values: Heap<Value>,
    pub(crate) tables: Heap<SymbolTable>,
    pub(crate) stack: Vec<ValueRef>,
    pub(crate) scopes: Vec<SymbolTableRef>,
    pub(crate) master: SymbolTableRef,
    pub(crate) last_value: Option<ValueRef>,
    /// Temporaries rooted for the duration of the current instruction or call.
    pub(crate) protected: Vec<ValueRef>,
    pub(crate) singletons: Singletons,
    /// Set while built-ins are bootstrapped: no collection, direct growth.
    pub(crate) bootstrapping: bool,
    pub(crate) config: RuntimeConfig,
    pub(crate) next_id: u64,
    pub(crate) depth: usize,
    pub(crate) hashing: Hashing,
    pub(crate) streams: Streams,
    pub(crate) output: String,
    dangling_value: Value,
    dangling_table: SymbolTable,
}

impl Context {
    pub fn new(config: RuntimeConfig) -> Self {
        Self::with_streams(config, Streams::default(), 1)
    }

    /// Create a context whose value ids start at `first_id`.
    pub fn with_streams(config: RuntimeConfig, streams: Streams, first_id: u64) -> Self {
        let capacity = config.initial_page_capacity.max(1);
        let mut values: Heap<Value> = Heap::new(capacity);
        let mut tables: Heap<SymbolTable> = Heap::new(capacity);
        let master = grow_and_allocate(&mut tables);
        let singletons = Singletons {
            true_: grow_and_allocate(&mut values),
            false_: grow_and_allocate(&mut values),
            none: grow_and_allocate(&mut values),
        };
        let mut ctx = Self {
            values,
            tables,
            stack: Vec::new(),
            scopes: Vec::new(),
            master,
            last_value: None,
            protected: Vec::new(),
            singletons,
            bootstrapping: true,
            config,
            next_id: first_id,
            depth: 0,
            hashing: Hashing::new(config.hash_seed),
            streams,
            output: String::new(),
            dangling_value: Value::default(),
            dangling_table: SymbolTable::default(),
        };
        *ctx.table_mut(master) = SymbolTable::new(None);
        ctx.push_scope(master);
        crate::builtins::install(&mut ctx);
        ctx.bootstrapping = false;
        ctx.protected.clear();
        log::debug!(
            "context ready: {} values, {} tables",
            ctx.values.live(),
            ctx.tables.live()
        );
        ctx
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Run a body in the current scope.
    pub fn execute(&mut self, code: impl Into<Body>) -> Result<ValueRef, ValueRef> {
        let mut bytecode = Bytecode::new(code);
        crate::vm::execute(self, &mut bytecode)
    }

    // Heap access

    /// Record behind `handle`. A dangling handle reads as an unset value.
    #[inline]
    pub fn value(&self, handle: ValueRef) -> &Value {
        match self.values.get(handle) {
            Some(value) => value,
            None => &self.dangling_value,
        }
    }

    #[inline]
    pub fn value_mut(&mut self, handle: ValueRef) -> &mut Value {
        match self.values.get_mut(handle) {
            Some(value) => value,
            None => {
                log::warn!("write through dangling value handle {handle:?}");
                self.dangling_value = Value::default();
                &mut self.dangling_value
            }
        }
    }

    #[inline]
    pub fn table(&self, handle: SymbolTableRef) -> &SymbolTable {
        match self.tables.get(handle) {
            Some(table) => table,
            None => &self.dangling_table,
        }
    }

    #[inline]
    pub fn table_mut(&mut self, handle: SymbolTableRef) -> &mut SymbolTable {
        match self.tables.get_mut(handle) {
            Some(table) => table,
            None => {
                log::warn!("write through dangling table handle {handle:?}");
                self.dangling_table = SymbolTable::default();
                &mut self.dangling_table
            }
        }
    }

    pub fn is_live(&self, handle: ValueRef) -> bool {
        self.values.get(handle).is_some_and(|value| value.is_set)
    }

    pub fn value_stats(&self) -> HeapStats {
        self.values.stats()
    }

    pub fn table_stats(&self) -> HeapStats {
        self.tables.stats()
    }

    #[inline]
    pub(crate) fn collecting(&self) -> bool {
        !self.bootstrapping && self.config.gc_enabled
    }

    /// Allocate and initialise a value. The new value is protected until the
    /// enclosing protected frame is restored.
    pub(crate) fn allocate_value(&mut self, tag: TypeTag, type_name: &str) -> ValueRef {
        let handle = loop {
            if let Some(handle) = self.values.allocate() {
                break handle;
            }
            if self.collecting() {
                self.collect();
                if !self.values.is_empty() {
                    continue;
                }
            }
            let capacity = self.values.max_page_capacity().max(1) * 2;
            self.values.new_page(capacity);
        };
        let id = self.next_id;
        self.next_id += 1;
        let value = Value::new(id, tag, type_name);
        *self.value_mut(handle) = value;
        self.protected.push(handle);
        handle
    }

    /// Allocate a table with no holders. The caller attaches it at once.
    pub(crate) fn allocate_table(&mut self, parent: Option<SymbolTableRef>) -> SymbolTableRef {
        let handle = loop {
            if let Some(handle) = self.tables.allocate() {
                break handle;
            }
            if self.collecting() {
                self.collect();
                if !self.tables.is_empty() {
                    continue;
                }
            }
            let capacity = self.tables.max_page_capacity().max(1) * 2;
            self.tables.new_page(capacity);
        };
        *self.table_mut(handle) = SymbolTable::new(parent);
        if let Some(parent) = parent {
            self.table_mut(parent).count += 1;
        }
        handle
    }

    /// The value's own table, allocated on first use.
    pub fn ensure_symbols(&mut self, value: ValueRef) -> SymbolTableRef {
        if let Some(table) = self.value(value).symbols {
            return table;
        }
        let table = self.allocate_table(None);
        self.table_mut(table).count += 1;
        self.value_mut(value).symbols = Some(table);
        table
    }

    /// Re-point `table` at `parent`, moving the parent's holder count.
    pub(crate) fn set_parent(&mut self, table: SymbolTableRef, parent: Option<SymbolTableRef>) {
        let old = self.table(table).parent;
        if old == parent {
            return;
        }
        if let Some(parent) = parent {
            self.table_mut(parent).count += 1;
        }
        if let Some(old) = old {
            let old = self.table_mut(old);
            old.count = old.count.saturating_sub(1);
        }
        self.table_mut(table).parent = parent;
    }

    // Scopes

    pub fn master(&self) -> SymbolTableRef {
        self.master
    }

    pub fn current_scope(&self) -> SymbolTableRef {
        self.scopes.last().copied().unwrap_or(self.master)
    }

    pub fn push_scope(&mut self, table: SymbolTableRef) {
        self.table_mut(table).count += 1;
        self.scopes.push(table);
    }

    /// Pop the innermost scope. The master scope is never popped.
    pub fn pop_scope(&mut self) -> Option<SymbolTableRef> {
        if self.scopes.len() <= 1 {
            return None;
        }
        let table = self.scopes.pop()?;
        let entry = self.table_mut(table);
        entry.count = entry.count.saturating_sub(1);
        Some(table)
    }

    pub fn scope_depth(&self) -> usize {
        self.scopes.len()
    }

    /// Look `name` up in `table` and its ancestors.
    pub fn lookup(&self, table: SymbolTableRef, name: &str) -> Option<ValueRef> {
        let mut current = Some(table);
        let mut steps = 0usize;
        while let Some(handle) = current {
            let entry = self.table(handle);
            if let Some(value) = entry.get_self(name) {
                return Some(value);
            }
            current = entry.parent;
            steps += 1;
            if steps > self.tables.capacity() {
                break;
            }
        }
        None
    }

    pub fn bind(&mut self, table: SymbolTableRef, name: &str, value: ValueRef) {
        self.table_mut(table).set(name, value);
    }

    pub fn bind_master(&mut self, name: &str, value: ValueRef) {
        let master = self.master;
        self.bind(master, name, value);
    }

    // Operand stack

    pub fn push(&mut self, value: ValueRef) {
        self.stack.push(value);
    }

    pub fn pop(&mut self) -> Result<ValueRef, ValueRef> {
        match self.stack.pop() {
            Some(value) => Ok(value),
            None => Err(errors::runtime_error(self, errors::messages::STACK_UNDERFLOW)),
        }
    }

    /// Pop and keep the value alive until the current instruction ends.
    pub(crate) fn pop_protected(&mut self) -> Result<ValueRef, ValueRef> {
        let value = self.pop()?;
        self.protect(value);
        Ok(value)
    }

    pub fn peek(&self) -> Option<ValueRef> {
        self.stack.last().copied()
    }

    pub fn stack_len(&self) -> usize {
        self.stack.len()
    }

    pub fn last_value(&self) -> Option<ValueRef> {
        self.last_value
    }

    pub fn set_last_value(&mut self, value: ValueRef) {
        self.last_value = Some(value);
    }

    // Protected values

    pub fn protect(&mut self, value: ValueRef) {
        self.protected.push(value);
    }

    #[inline]
    pub fn protected_frame(&self) -> usize {
        self.protected.len()
    }

    #[inline]
    pub fn restore_protected(&mut self, frame: usize) {
        self.protected.truncate(frame);
    }

    /// Everything `print` and `println` wrote so far.
    pub fn output(&self) -> &str {
        &self.output
    }

    pub(crate) fn write_out(&mut self, text: &str) {
        self.output.push_str(text);
        if let Err(err) = self.streams.stdout.write_all(text.as_bytes()) {
            log::warn!("stdout write failed: {err}");
        }
    }

    pub(crate) fn flush_out(&mut self) {
        if let Err(err) = self.streams.stdout.flush() {
            log::warn!("stdout flush failed: {err}");
        }
    }

    pub(crate) fn into_parts(self) -> (Streams, u64) {
        (self.streams, self.next_id)
    }
}

/// Allocation for the records created before the context exists.
fn grow_and_allocate<T: Default>(heap: &mut Heap<T>) -> plasma_core::Handle<T> {
    loop {
        if let Some(handle) = heap.allocate() {
            return handle;
        }
        let capacity = heap.max_page_capacity().max(1) * 2;
        heap.new_page(capacity);
    }
}
