//! Opcode handlers, grouped by instruction family.

pub(super) mod access;
pub(super) mod assign;
pub(super) mod collections;
pub(super) mod control;
pub(super) mod definitions;
pub(super) mod literals;
pub(super) mod operators;
pub(super) mod try_;
