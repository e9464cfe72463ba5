use crate::Context;

pub(crate) fn new_string(ctx: &mut Context, value: &str) {
    let string = ctx.new_string(value);
    ctx.set_last_value(string);
}

pub(crate) fn new_integer(ctx: &mut Context, value: i64) {
    let integer = ctx.new_integer(value);
    ctx.set_last_value(integer);
}

pub(crate) fn new_float(ctx: &mut Context, value: f64) {
    let float = ctx.new_float(value);
    ctx.set_last_value(float);
}

pub(crate) fn new_bytes(ctx: &mut Context, value: &[u8]) {
    let bytes = ctx.new_bytes(value.to_vec());
    ctx.set_last_value(bytes);
}

pub(crate) fn get_boolean(ctx: &mut Context, value: bool) {
    let boolean = ctx.get_boolean(value);
    ctx.set_last_value(boolean);
}

pub(crate) fn get_none(ctx: &mut Context) {
    let none = ctx.get_none();
    ctx.set_last_value(none);
}
