#![allow(dead_code)]

use std::io::{self, Cursor};

use plasma_ir::{Assembler, BinaryOperator};
use plasma_runtime::{ExecResult, ExecutionError, RuntimeConfig, VirtualMachine};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Machine with in-memory streams; `stdin` feeds `input`.
pub fn machine(config: RuntimeConfig, stdin: &str) -> VirtualMachine {
    VirtualMachine::with_streams(
        config,
        Cursor::new(stdin.as_bytes().to_vec()),
        io::sink(),
        io::sink(),
    )
}

pub fn run_with(config: RuntimeConfig, code: Assembler) -> Result<ExecResult, ExecutionError> {
    init_logging();
    machine(config, "").run(code.finish())
}

pub fn run(code: Assembler) -> ExecResult {
    match run_with(RuntimeConfig::default(), code) {
        Ok(result) => result,
        Err(err) => panic!("program failed: {err}"),
    }
}

/// String form of the program's result.
pub fn value_of(code: Assembler) -> String {
    run(code).value.unwrap_or_else(|| "None".to_string())
}

/// Type name and message of the error that escaped the program.
pub fn uncaught(code: Assembler) -> (String, String) {
    match run_with(RuntimeConfig::default(), code) {
        Err(ExecutionError::Uncaught { type_name, message }) => (type_name, message),
        other => panic!("expected an uncaught error, got {other:?}"),
    }
}

/// `callee(arguments...)`: arguments go on the stack last-to-first, the
/// callee on top.
pub fn call(callee: Assembler, arguments: Vec<Assembler>) -> Assembler {
    let count = arguments.len();
    let mut code = Assembler::new();
    for argument in arguments.into_iter().rev() {
        code = code.append(argument).push();
    }
    code.append(callee).push().call(count)
}

pub fn call_named(name: &str, arguments: Vec<Assembler>) -> Assembler {
    call(Assembler::new().identifier(name), arguments)
}

/// `left op right`: the right operand is pushed first.
pub fn binary(left: Assembler, op: BinaryOperator, right: Assembler) -> Assembler {
    right.push().append(left).push().binary(op)
}

/// `receiver.name(arguments...)`.
pub fn method(receiver: Assembler, name: &str, arguments: Vec<Assembler>) -> Assembler {
    call(receiver.push().select(name), arguments)
}

/// `source[index]`.
pub fn index(source: Assembler, index: Assembler) -> Assembler {
    source.push().append(index).push().index()
}

/// `name = value`.
pub fn assign(name: &str, value: Assembler) -> Assembler {
    value.push().assign(name)
}

pub fn int(value: i64) -> Assembler {
    Assembler::new().integer(value)
}

pub fn string(value: &str) -> Assembler {
    Assembler::new().string(value)
}

pub fn ident(name: &str) -> Assembler {
    Assembler::new().identifier(name)
}

/// Array literal of the given element expressions.
pub fn array(elements: Vec<Assembler>) -> Assembler {
    sequence(elements).array_of()
}

pub fn tuple(elements: Vec<Assembler>) -> Assembler {
    sequence(elements).tuple_of()
}

/// Hash literal; entries are given as (key, value).
pub fn hash(entries: Vec<(Assembler, Assembler)>) -> Assembler {
    let count = entries.len();
    let mut code = Assembler::new();
    for (key, value) in entries.into_iter().rev() {
        code = code.append(value).push().append(key).push();
    }
    code.hash(count)
}

/// Elements pushed so that element 0 is popped first.
pub struct Sequence {
    code: Assembler,
    count: usize,
}

impl Sequence {
    fn array_of(self) -> Assembler {
        self.code.array(self.count)
    }

    fn tuple_of(self) -> Assembler {
        self.code.tuple(self.count)
    }
}

fn sequence(elements: Vec<Assembler>) -> Sequence {
    let count = elements.len();
    let mut code = Assembler::new();
    for element in elements.into_iter().rev() {
        code = code.append(element).push();
    }
    Sequence { code, count }
}
