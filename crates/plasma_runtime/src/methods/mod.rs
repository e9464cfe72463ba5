//! Native method tables of the built-in types.
//!
//! Each table answers a fixed vocabulary of names with a native method.
//! Values carry the tables of their type in `on_demand`; looking a name up
//! binds the method to the value on first use.

pub(crate) mod common;

pub(crate) mod array;
pub(crate) mod boolean;
pub(crate) mod bytes;
pub(crate) mod callable;
pub(crate) mod error;
pub(crate) mod float;
pub(crate) mod function;
pub(crate) mod hash_table;
pub(crate) mod integer;
pub(crate) mod iterator;
pub(crate) mod none;
pub(crate) mod number;
pub(crate) mod object;
pub(crate) mod string;
pub(crate) mod tuple;
pub(crate) mod type_;
