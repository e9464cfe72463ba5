//! Plasma virtual machine runtime.
//!
//! A [`Context`] owns the value and symbol-table heaps of one evaluation and
//! runs [`plasma_ir`] bytecode against them. [`VirtualMachine`] is the host
//! entry point: it validates code, runs it in a fresh context and reports the
//! result.

#![allow(clippy::collapsible_if)]
#![allow(clippy::new_without_default)]
#![allow(clippy::too_many_arguments)]

mod builtins;
pub mod config;
pub mod context;
pub mod core;
pub mod errors;
mod gc;
mod methods;
pub mod protocol;
pub mod vm;

pub use config::{ExecResult, RuntimeConfig};
pub use context::{Context, Streams};
pub use core::{
    Arity, Callable, Constructor, KeyValue, MethodTable, NativeMethod, SymbolTable, SymbolTableRef, TypeTag, Value,
    ValueRef,
};
pub use errors::ExecutionError;
pub use gc::CollectionStats;
pub use vm::{ControlFlow, VirtualMachine, call_function, construct_object, execute};
