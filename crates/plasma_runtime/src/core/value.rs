//! The runtime object record.

use std::fmt;

use indexmap::IndexMap;
use plasma_core::Handle;
use plasma_ir::Body;
use smallvec::SmallVec;

use super::SymbolTableRef;
use crate::Context;

pub type ValueRef = Handle<Value>;

/// Native method body: `(context, self, arguments)`.
pub type NativeCallback = fn(&mut Context, ValueRef, &[ValueRef]) -> Result<ValueRef, ValueRef>;

/// Native type constructor, run on a freshly created object.
pub type NativeConstructor = fn(&mut Context, ValueRef) -> Result<(), ValueRef>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum TypeTag {
    Array,
    Boolean,
    Bytes,
    Float,
    Function,
    HashTable,
    Integer,
    Iterator,
    Module,
    NoneType,
    #[default]
    Object,
    String,
    Tuple,
    Type,
}

/// Number of arguments a callable accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    Variadic,
}

impl Arity {
    pub fn accepts(self, received: usize) -> bool {
        match self {
            Arity::Exact(expected) => expected == received,
            Arity::Variadic => true,
        }
    }
}

#[derive(Clone, Copy)]
pub struct NativeMethod {
    pub arity: Arity,
    pub callback: NativeCallback,
}

impl NativeMethod {
    pub const fn new(arity: usize, callback: NativeCallback) -> Self {
        Self {
            arity: Arity::Exact(arity),
            callback,
        }
    }

    pub const fn variadic(callback: NativeCallback) -> Self {
        Self {
            arity: Arity::Variadic,
            callback,
        }
    }
}

impl fmt::Debug for NativeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeMethod").field("arity", &self.arity).finish_non_exhaustive()
    }
}

/// Static method table consulted when a name is missing from a value's own
/// symbols. `names` lists everything `lookup` answers for.
#[derive(Clone, Copy)]
pub struct MethodTable {
    pub names: &'static [&'static str],
    pub lookup: fn(&str) -> Option<NativeMethod>,
}

impl fmt::Debug for MethodTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodTable").field("names", &self.names.len()).finish()
    }
}

#[derive(Clone, Debug)]
pub enum Callable {
    Native(NativeMethod),
    Bytecode { arity: usize, body: Body },
}

impl Callable {
    pub fn arity(&self) -> Arity {
        match self {
            Callable::Native(method) => method.arity,
            Callable::Bytecode { arity, .. } => Arity::Exact(*arity),
        }
    }
}

#[derive(Clone)]
pub enum Constructor {
    Native(NativeConstructor),
    Bytecode(Body),
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constructor::Native(_) => f.write_str("Constructor::Native"),
            Constructor::Bytecode(body) => write!(f, "Constructor::Bytecode({})", body.len()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyValue {
    pub key: ValueRef,
    pub value: ValueRef,
}

/// Hash buckets of a hash table, in insertion order.
pub type KeyValues = IndexMap<i64, Vec<KeyValue>, ahash::RandomState>;

#[derive(Clone, Debug, Default)]
pub struct Value {
    pub id: u64,
    pub tag: TypeTag,
    pub type_name: String,
    pub name: String,

    pub integer: i64,
    pub floating: f64,
    pub boolean: bool,
    pub string: String,
    pub bytes: Vec<u8>,
    pub content: Vec<ValueRef>,
    pub key_values: KeyValues,

    pub hash: Option<i64>,

    pub self_: Option<ValueRef>,
    pub type_: Option<ValueRef>,
    pub sub_types: Vec<ValueRef>,
    pub source: Option<ValueRef>,

    pub callable: Option<Callable>,
    pub constructor: Option<Constructor>,
    pub symbols: Option<SymbolTableRef>,
    pub on_demand: SmallVec<[MethodTable; 4]>,

    pub marked: bool,
    pub is_set: bool,
    pub built_in: bool,
}

impl Value {
    pub fn new(id: u64, tag: TypeTag, type_name: &str) -> Self {
        Self {
            id,
            tag,
            type_name: type_name.to_string(),
            is_set: true,
            ..Self::default()
        }
    }

    /// Search the on-demand tables, most recently installed first.
    pub fn on_demand_method(&self, name: &str) -> Option<NativeMethod> {
        self.on_demand.iter().rev().find_map(|table| (table.lookup)(name))
    }

    /// Number of entries in `key_values`.
    pub fn entry_count(&self) -> usize {
        self.key_values.values().map(Vec::len).sum()
    }

    /// Keys of `key_values` in insertion order.
    pub fn keys(&self) -> Vec<ValueRef> {
        self.key_values
            .values()
            .flat_map(|bucket| bucket.iter().map(|entry| entry.key))
            .collect()
    }

    pub fn entries(&self) -> Vec<KeyValue> {
        self.key_values.values().flatten().copied().collect()
    }

    pub fn is(&self, tag: TypeTag) -> bool {
        self.tag == tag
    }
}
