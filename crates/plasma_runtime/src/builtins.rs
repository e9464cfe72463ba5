//! Master-scope bootstrap: singletons, built-in types and functions.

use std::io::BufRead;

use crate::core::{self, Constructor, MethodTable, NativeMethod, TypeTag, Value, ValueRef, names};
use crate::methods::{
    array, boolean, bytes, callable, error, float, hash_table, integer, iterator, none, object, string, tuple,
};
use crate::{Context, errors, protocol};

const FUNCTIONS: &[(&str, NativeMethod)] = &[
    (names::PRINT, NativeMethod::new(1, print)),
    (names::PRINTLN, NativeMethod::new(1, println)),
    (names::INPUT, NativeMethod::new(1, input)),
    (names::ID, NativeMethod::new(1, id)),
    (names::HASH_FN, NativeMethod::new(1, hash)),
    (names::DIR, NativeMethod::new(1, dir)),
    (names::LEN, NativeMethod::new(1, len)),
];

pub(crate) fn install(ctx: &mut Context) {
    let singletons = ctx.singletons;
    init_singleton(ctx, singletons.true_, TypeTag::Boolean, names::BOOL, boolean::TABLE);
    ctx.value_mut(singletons.true_).boolean = true;
    init_singleton(ctx, singletons.false_, TypeTag::Boolean, names::BOOL, boolean::TABLE);
    init_singleton(ctx, singletons.none, TypeTag::NoneType, names::NONE_TYPE, none::TABLE);

    let object_type = ctx.new_type(names::OBJECT, Vec::new(), None, None);
    ctx.bind_master(names::OBJECT, object_type);
    let types: [(&str, Option<Constructor>); 14] = [
        (names::TYPE, None),
        (names::FUNCTION, None),
        (names::CALLABLE, native(callable_constructor)),
        (names::STRING, native(string_constructor)),
        (names::BOOL, native(bool_constructor)),
        (names::TUPLE, native(tuple_constructor)),
        (names::INTEGER, native(integer_constructor)),
        (names::FLOAT, native(float_constructor)),
        (names::ARRAY, native(array_constructor)),
        (names::NONE_TYPE, native(none_constructor)),
        (names::BYTES, native(bytes_constructor)),
        (names::HASH_TABLE, native(hash_table_constructor)),
        (names::ITERATOR, native(iterator_constructor)),
        (names::MODULE, None),
    ];
    for (name, constructor) in types {
        let type_ = ctx.new_type(name, vec![object_type], constructor, None);
        ctx.bind_master(name, type_);
    }

    let runtime_error = ctx.new_type(
        names::RUNTIME_ERROR,
        vec![object_type],
        native(error_constructor),
        None,
    );
    ctx.bind_master(names::RUNTIME_ERROR, runtime_error);
    for name in names::ERROR_TYPES {
        let type_ = ctx.new_type(name, vec![runtime_error], None, None);
        ctx.bind_master(name, type_);
    }

    ctx.bind_master(names::TRUE, singletons.true_);
    ctx.bind_master(names::FALSE, singletons.false_);
    ctx.bind_master(names::NONE, singletons.none);

    for (name, method) in FUNCTIONS {
        let function = ctx.new_native_function(name, *method, None);
        ctx.bind_master(name, function);
    }
    log::trace!("installed {} built-in functions", FUNCTIONS.len());
}

/// The singleton records exist before any allocation; give them their
/// identity here.
fn init_singleton(ctx: &mut Context, handle: ValueRef, tag: TypeTag, type_name: &str, table: MethodTable) {
    let id = ctx.next_id;
    ctx.next_id += 1;
    let mut value = Value::new(id, tag, type_name);
    value.built_in = true;
    value.on_demand.push(object::TABLE);
    value.on_demand.push(table);
    *ctx.value_mut(handle) = value;
}

fn native(constructor: crate::core::NativeConstructor) -> Option<Constructor> {
    Some(Constructor::Native(constructor))
}

fn adopt(ctx: &mut Context, object: ValueRef, tag: Option<TypeTag>, table: MethodTable) {
    let value = ctx.value_mut(object);
    if let Some(tag) = tag {
        value.tag = tag;
    }
    value.on_demand.push(table);
}

macro_rules! constructors {
    ($($function:ident => $tag:expr, $table:expr;)*) => {
        $(
            fn $function(ctx: &mut Context, object: ValueRef) -> Result<(), ValueRef> {
                adopt(ctx, object, $tag, $table);
                Ok(())
            }
        )*
    };
}

constructors! {
    callable_constructor => None, callable::TABLE;
    string_constructor => Some(TypeTag::String), string::TABLE;
    bool_constructor => Some(TypeTag::Boolean), boolean::TABLE;
    tuple_constructor => Some(TypeTag::Tuple), tuple::TABLE;
    integer_constructor => Some(TypeTag::Integer), integer::TABLE;
    float_constructor => Some(TypeTag::Float), float::TABLE;
    array_constructor => Some(TypeTag::Array), array::TABLE;
    none_constructor => Some(TypeTag::NoneType), none::TABLE;
    bytes_constructor => Some(TypeTag::Bytes), bytes::TABLE;
    hash_table_constructor => Some(TypeTag::HashTable), hash_table::TABLE;
    iterator_constructor => Some(TypeTag::Iterator), iterator::TABLE;
    error_constructor => None, error::TABLE;
}

fn print(ctx: &mut Context, _this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let text = protocol::to_string(ctx, arguments[0])?;
    ctx.write_out(&text);
    Ok(ctx.get_none())
}

fn println(ctx: &mut Context, _this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let mut text = protocol::to_string(ctx, arguments[0])?;
    text.push('\n');
    ctx.write_out(&text);
    Ok(ctx.get_none())
}

fn input(ctx: &mut Context, _this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let prompt = protocol::to_string(ctx, arguments[0])?;
    ctx.write_out(&prompt);
    ctx.flush_out();
    let mut line = String::new();
    if let Err(err) = ctx.streams.stdin.read_line(&mut line) {
        log::warn!("stdin read failed: {err}");
        return Err(errors::runtime_error(ctx, &format!("Could not read input: {err}")));
    }
    Ok(ctx.new_string(line.trim_end_matches(['\n', '\r'])))
}

fn id(ctx: &mut Context, _this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let id = i64::try_from(ctx.value(arguments[0]).id).unwrap_or(i64::MAX);
    Ok(ctx.new_integer(id))
}

fn hash(ctx: &mut Context, _this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let hash = protocol::calculate_hash(ctx, arguments[0])?;
    Ok(ctx.new_integer(hash))
}

fn dir(ctx: &mut Context, _this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let names = core::dir(ctx, arguments[0]);
    let content: Vec<ValueRef> = names.into_iter().map(|name| ctx.new_string(name)).collect();
    Ok(ctx.new_tuple(content))
}

fn len(ctx: &mut Context, _this: ValueRef, arguments: &[ValueRef]) -> Result<ValueRef, ValueRef> {
    let value = ctx.value(arguments[0]);
    let length = match value.tag {
        TypeTag::Array | TypeTag::Tuple => value.content.len(),
        TypeTag::String => value.string.chars().count(),
        TypeTag::Bytes => value.bytes.len(),
        TypeTag::HashTable => value.entry_count(),
        _ => {
            let length = protocol::call_method(ctx, arguments[0], names::LENGTH, &[])?;
            if ctx.value(length).tag != TypeTag::Integer {
                return Err(errors::invalid_type(ctx, length, names::INTEGER));
            }
            return Ok(length);
        }
    };
    Ok(ctx.new_integer(i64::try_from(length).unwrap_or(i64::MAX)))
}
