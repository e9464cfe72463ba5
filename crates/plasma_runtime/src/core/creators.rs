use plasma_ir::Body;

use super::{
    Callable, Constructor, MethodTable, NativeMethod, SymbolTableRef, TypeTag, ValueRef, names,
};
use crate::Context;
use crate::methods;

impl Context {
    fn new_builtin(&mut self, tag: TypeTag, type_name: &str, tables: &[MethodTable]) -> ValueRef {
        let handle = self.allocate_value(tag, type_name);
        let built_in = self.bootstrapping;
        let value = self.value_mut(handle);
        value.built_in = built_in;
        value.on_demand.push(methods::object::TABLE);
        value.on_demand.extend(tables.iter().copied());
        handle
    }

    pub fn new_object(&mut self) -> ValueRef {
        self.new_builtin(TypeTag::Object, names::OBJECT, &[])
    }

    pub fn new_integer(&mut self, integer: i64) -> ValueRef {
        let handle = self.new_builtin(TypeTag::Integer, names::INTEGER, &[methods::integer::TABLE]);
        self.value_mut(handle).integer = integer;
        handle
    }

    pub fn new_float(&mut self, floating: f64) -> ValueRef {
        let handle = self.new_builtin(TypeTag::Float, names::FLOAT, &[methods::float::TABLE]);
        self.value_mut(handle).floating = floating;
        handle
    }

    pub fn new_string(&mut self, string: impl Into<String>) -> ValueRef {
        let handle = self.new_builtin(TypeTag::String, names::STRING, &[methods::string::TABLE]);
        self.value_mut(handle).string = string.into();
        handle
    }

    pub fn new_bytes(&mut self, bytes: Vec<u8>) -> ValueRef {
        let handle = self.new_builtin(TypeTag::Bytes, names::BYTES, &[methods::bytes::TABLE]);
        self.value_mut(handle).bytes = bytes;
        handle
    }

    pub fn new_array(&mut self, content: Vec<ValueRef>) -> ValueRef {
        let handle = self.new_builtin(TypeTag::Array, names::ARRAY, &[methods::array::TABLE]);
        self.value_mut(handle).content = content;
        handle
    }

    pub fn new_tuple(&mut self, content: Vec<ValueRef>) -> ValueRef {
        let handle = self.new_builtin(TypeTag::Tuple, names::TUPLE, &[methods::tuple::TABLE]);
        self.value_mut(handle).content = content;
        handle
    }

    pub fn new_hash_table(&mut self) -> ValueRef {
        self.new_builtin(TypeTag::HashTable, names::HASH_TABLE, &[methods::hash_table::TABLE])
    }

    /// Iterator with only the default behaviour (`HasNext` false).
    pub fn new_iterator(&mut self) -> ValueRef {
        self.new_builtin(TypeTag::Iterator, names::ITERATOR, &[methods::iterator::TABLE])
    }

    /// Iterator over a collection; the cursor starts at zero.
    pub(crate) fn new_collection_iterator(&mut self, source: ValueRef, table: MethodTable) -> ValueRef {
        let handle = self.new_builtin(
            TypeTag::Iterator,
            names::ITERATOR,
            &[methods::iterator::TABLE, table],
        );
        let value = self.value_mut(handle);
        value.source = Some(source);
        value.integer = 0;
        handle
    }

    pub fn new_native_function(
        &mut self,
        name: &str,
        method: NativeMethod,
        self_: Option<ValueRef>,
    ) -> ValueRef {
        self.new_function(name, Callable::Native(method), self_)
    }

    pub fn new_function(&mut self, name: &str, callable: Callable, self_: Option<ValueRef>) -> ValueRef {
        let handle = self.new_builtin(TypeTag::Function, names::FUNCTION, &[methods::function::TABLE]);
        let value = self.value_mut(handle);
        value.name = name.to_string();
        value.callable = Some(callable);
        value.self_ = self_;
        handle
    }

    /// Bytecode function closing over `scope`.
    pub fn new_bytecode_function(
        &mut self,
        name: &str,
        arity: usize,
        body: Body,
        self_: Option<ValueRef>,
        scope: SymbolTableRef,
    ) -> ValueRef {
        let function = self.new_function(name, Callable::Bytecode { arity, body }, self_);
        self.attach_table(function, Some(scope));
        function
    }

    /// Give `value` its own table with `parent`.
    fn attach_table(&mut self, value: ValueRef, parent: Option<SymbolTableRef>) -> SymbolTableRef {
        let table = self.allocate_table(parent);
        self.table_mut(table).count += 1;
        self.value_mut(value).symbols = Some(table);
        table
    }

    /// A type whose defining scope is `scope`.
    pub fn new_type(
        &mut self,
        name: &str,
        bases: Vec<ValueRef>,
        constructor: Option<Constructor>,
        scope: Option<SymbolTableRef>,
    ) -> ValueRef {
        let handle = self.new_builtin(TypeTag::Type, names::TYPE, &[methods::type_::TABLE]);
        let value = self.value_mut(handle);
        value.name = name.to_string();
        value.sub_types = bases;
        value.constructor = constructor;
        if scope.is_some() {
            self.attach_table(handle, scope);
        }
        handle
    }

    pub fn new_module(&mut self, name: &str, scope: SymbolTableRef) -> ValueRef {
        let handle = self.new_builtin(TypeTag::Module, names::MODULE, &[]);
        self.value_mut(handle).name = name.to_string();
        self.attach_table(handle, Some(scope));
        handle
    }

    #[inline]
    pub fn get_true(&self) -> ValueRef {
        self.singletons.true_
    }

    #[inline]
    pub fn get_false(&self) -> ValueRef {
        self.singletons.false_
    }

    #[inline]
    pub fn get_none(&self) -> ValueRef {
        self.singletons.none
    }

    #[inline]
    pub fn get_boolean(&self, value: bool) -> ValueRef {
        if value { self.get_true() } else { self.get_false() }
    }
}
