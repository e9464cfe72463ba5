use plasma_ir::{BinaryOperator, UnaryOperator};

use crate::core::{ValueRef, names};
use crate::{Context, protocol};

pub(crate) fn unary_method(op: UnaryOperator) -> &'static str {
    match op {
        UnaryOperator::NegateBits => names::NEG_BITS,
        UnaryOperator::Negate => names::NEGATE,
        UnaryOperator::Negative => names::NEGATIVE,
    }
}

/// Method names for `op`: the left-hand one and its right-hand twin.
pub(crate) fn binary_methods(op: BinaryOperator) -> (&'static str, &'static str) {
    use BinaryOperator::*;
    match op {
        Add => (names::ADD, names::RIGHT_ADD),
        Sub => (names::SUB, names::RIGHT_SUB),
        Mul => (names::MUL, names::RIGHT_MUL),
        Div => (names::DIV, names::RIGHT_DIV),
        FloorDiv => (names::FLOOR_DIV, names::RIGHT_FLOOR_DIV),
        Mod => (names::MOD, names::RIGHT_MOD),
        Pow => (names::POW, names::RIGHT_POW),
        BitXor => (names::BIT_XOR, names::RIGHT_BIT_XOR),
        BitAnd => (names::BIT_AND, names::RIGHT_BIT_AND),
        BitOr => (names::BIT_OR, names::RIGHT_BIT_OR),
        BitLeft => (names::BIT_LEFT, names::RIGHT_BIT_LEFT),
        BitRight => (names::BIT_RIGHT, names::RIGHT_BIT_RIGHT),
        And => (names::AND, names::RIGHT_AND),
        Or => (names::OR, names::RIGHT_OR),
        Xor => (names::XOR, names::RIGHT_XOR),
        Equals => (names::EQUALS, names::RIGHT_EQUALS),
        NotEquals => (names::NOT_EQUALS, names::RIGHT_NOT_EQUALS),
        GreaterThan => (names::GREATER_THAN, names::RIGHT_GREATER_THAN),
        LessThan => (names::LESS_THAN, names::RIGHT_LESS_THAN),
        GreaterThanOrEqual => (names::GREATER_THAN_OR_EQUAL, names::RIGHT_GREATER_THAN_OR_EQUAL),
        LessThanOrEqual => (names::LESS_THAN_OR_EQUAL, names::RIGHT_LESS_THAN_OR_EQUAL),
        Contains => (names::CONTAINS, names::RIGHT_CONTAINS),
    }
}

pub(crate) fn unary(ctx: &mut Context, op: UnaryOperator) -> Result<(), ValueRef> {
    let target = ctx.pop_protected()?;
    let result = protocol::call_method(ctx, target, unary_method(op), &[])?;
    ctx.set_last_value(result);
    Ok(())
}

/// `left in right` asks the element first (`left.RightContains(right)`),
/// then the container (`right.Contains(left)`).
pub(crate) fn binary(ctx: &mut Context, op: BinaryOperator) -> Result<(), ValueRef> {
    let left = ctx.pop_protected()?;
    let right = ctx.pop_protected()?;
    let (name, right_name) = binary_methods(op);
    let result = match op {
        BinaryOperator::Contains => protocol::binary_operation(ctx, left, right, right_name, name)?,
        _ => protocol::binary_operation(ctx, left, right, name, right_name)?,
    };
    ctx.set_last_value(result);
    Ok(())
}
