//! Arithmetic and comparison shared by Integer and Float.
//!
//! Integer with Integer stays Integer, except `/` which always yields a
//! Float. Anything involving a Float is computed in floating point. `//`
//! floors and keeps the left operand's type. `%` and the bit operators take
//! Integers only. Dividing by zero raises `DivisionByZeroError`.

use std::cmp::Ordering;

use crate::core::{TypeTag, ValueRef, names};
use crate::{Context, errors};

const NUMBER_TYPES: &str = "Integer, Float";

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    fn as_f64(self) -> f64 {
        match self {
            Number::Integer(integer) => integer as f64,
            Number::Float(floating) => floating,
        }
    }

    fn is_zero(self) -> bool {
        match self {
            Number::Integer(integer) => integer == 0,
            Number::Float(floating) => floating == 0.0,
        }
    }
}

pub(crate) fn expect_number(ctx: &mut Context, value: ValueRef) -> Result<Number, ValueRef> {
    let (tag, integer, floating) = {
        let record = ctx.value(value);
        (record.tag, record.integer, record.floating)
    };
    match tag {
        TypeTag::Integer => Ok(Number::Integer(integer)),
        TypeTag::Float => Ok(Number::Float(floating)),
        _ => Err(errors::invalid_type(ctx, value, NUMBER_TYPES)),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Arithmetic {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
    BitXor,
    BitAnd,
    BitOr,
    BitLeft,
    BitRight,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Comparison {
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
}

pub(crate) fn arithmetic(
    ctx: &mut Context,
    op: Arithmetic,
    left: ValueRef,
    right: ValueRef,
) -> Result<ValueRef, ValueRef> {
    let a = expect_number(ctx, left)?;
    let b = expect_number(ctx, right)?;
    if matches!(op, Arithmetic::Div | Arithmetic::FloorDiv | Arithmetic::Mod) && b.is_zero() {
        return Err(errors::division_by_zero(ctx));
    }
    let result = match (op, a, b) {
        (Arithmetic::Add, Number::Integer(a), Number::Integer(b)) => Number::Integer(a.wrapping_add(b)),
        (Arithmetic::Sub, Number::Integer(a), Number::Integer(b)) => Number::Integer(a.wrapping_sub(b)),
        (Arithmetic::Mul, Number::Integer(a), Number::Integer(b)) => Number::Integer(a.wrapping_mul(b)),
        (Arithmetic::Add, a, b) => Number::Float(a.as_f64() + b.as_f64()),
        (Arithmetic::Sub, a, b) => Number::Float(a.as_f64() - b.as_f64()),
        (Arithmetic::Mul, a, b) => Number::Float(a.as_f64() * b.as_f64()),
        (Arithmetic::Div, a, b) => Number::Float(a.as_f64() / b.as_f64()),
        (Arithmetic::FloorDiv, Number::Integer(a), Number::Integer(b)) => Number::Integer(floor_div(a, b)),
        (Arithmetic::FloorDiv, Number::Integer(_), b) => {
            Number::Integer((a.as_f64() / b.as_f64()).floor() as i64)
        }
        (Arithmetic::FloorDiv, Number::Float(a), b) => Number::Float((a / b.as_f64()).floor()),
        (Arithmetic::Pow, Number::Integer(a), Number::Integer(b)) => match u32::try_from(b) {
            Ok(exponent) => Number::Integer(a.wrapping_pow(exponent)),
            Err(_) => Number::Float((a as f64).powf(b as f64)),
        },
        (Arithmetic::Pow, a, b) => Number::Float(a.as_f64().powf(b.as_f64())),
        (op, Number::Integer(a), Number::Integer(b)) => Number::Integer(bitwise(op, a, b)),
        (_, Number::Float(_), _) => return Err(errors::invalid_type(ctx, left, names::INTEGER)),
        (_, _, Number::Float(_)) => return Err(errors::invalid_type(ctx, right, names::INTEGER)),
    };
    Ok(match result {
        Number::Integer(integer) => ctx.new_integer(integer),
        Number::Float(floating) => ctx.new_float(floating),
    })
}

/// Integer-only operators: `%` truncates toward zero, shifts use the low
/// six bits of the amount.
fn bitwise(op: Arithmetic, a: i64, b: i64) -> i64 {
    match op {
        Arithmetic::Mod => a.wrapping_rem(b),
        Arithmetic::BitXor => a ^ b,
        Arithmetic::BitAnd => a & b,
        Arithmetic::BitOr => a | b,
        Arithmetic::BitLeft => a.wrapping_shl(b as u32),
        Arithmetic::BitRight => a.wrapping_shr(b as u32),
        _ => 0,
    }
}

fn floor_div(a: i64, b: i64) -> i64 {
    let quotient = a.wrapping_div(b);
    if a.wrapping_rem(b) != 0 && ((a < 0) != (b < 0)) {
        quotient - 1
    } else {
        quotient
    }
}

pub(crate) fn compare(
    ctx: &mut Context,
    op: Comparison,
    left: ValueRef,
    right: ValueRef,
) -> Result<ValueRef, ValueRef> {
    let a = expect_number(ctx, left)?;
    let b = expect_number(ctx, right)?;
    let ordering = match (a, b) {
        (Number::Integer(a), Number::Integer(b)) => Some(a.cmp(&b)),
        (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
    };
    let result = match op {
        Comparison::Equals => ordering == Some(Ordering::Equal),
        Comparison::NotEquals => ordering != Some(Ordering::Equal),
        Comparison::GreaterThan => ordering == Some(Ordering::Greater),
        Comparison::LessThan => ordering == Some(Ordering::Less),
        Comparison::GreaterThanOrEqual => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
        Comparison::LessThanOrEqual => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
    };
    Ok(ctx.get_boolean(result))
}

/// Callbacks for the operator methods. The `right_` variants receive the
/// left operand as their argument.
macro_rules! operator_methods {
    ($($function:ident($op:expr) => $left:ident, $right:ident;)*) => {
        $(
            pub(crate) fn $left(
                ctx: &mut Context,
                this: ValueRef,
                arguments: &[ValueRef],
            ) -> Result<ValueRef, ValueRef> {
                $function(ctx, $op, this, arguments[0])
            }

            pub(crate) fn $right(
                ctx: &mut Context,
                this: ValueRef,
                arguments: &[ValueRef],
            ) -> Result<ValueRef, ValueRef> {
                $function(ctx, $op, arguments[0], this)
            }
        )*
    };
}

operator_methods! {
    arithmetic(Arithmetic::Add) => add, right_add;
    arithmetic(Arithmetic::Sub) => sub, right_sub;
    arithmetic(Arithmetic::Mul) => mul, right_mul;
    arithmetic(Arithmetic::Div) => div, right_div;
    arithmetic(Arithmetic::FloorDiv) => floor_divide, right_floor_divide;
    arithmetic(Arithmetic::Mod) => modulo, right_modulo;
    arithmetic(Arithmetic::Pow) => pow, right_pow;
    arithmetic(Arithmetic::BitXor) => bit_xor, right_bit_xor;
    arithmetic(Arithmetic::BitAnd) => bit_and, right_bit_and;
    arithmetic(Arithmetic::BitOr) => bit_or, right_bit_or;
    arithmetic(Arithmetic::BitLeft) => bit_left, right_bit_left;
    arithmetic(Arithmetic::BitRight) => bit_right, right_bit_right;
    compare(Comparison::Equals) => equals, right_equals;
    compare(Comparison::NotEquals) => not_equals, right_not_equals;
    compare(Comparison::GreaterThan) => greater_than, right_greater_than;
    compare(Comparison::LessThan) => less_than, right_less_than;
    compare(Comparison::GreaterThanOrEqual) => greater_than_or_equal, right_greater_than_or_equal;
    compare(Comparison::LessThanOrEqual) => less_than_or_equal, right_less_than_or_equal;
}

#[cfg(test)]
mod tests {
    use super::floor_div;

    #[test]
    fn floor_division_rounds_toward_negative_infinity() {
        assert_eq!(floor_div(7, 2), 3);
        assert_eq!(floor_div(-7, 2), -4);
        assert_eq!(floor_div(7, -2), -4);
        assert_eq!(floor_div(-8, 2), -4);
        assert_eq!(floor_div(i64::MIN, -1), i64::MIN);
    }
}
