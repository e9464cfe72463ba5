mod common;

use common::*;
use plasma_ir::{Assembler, BinaryOperator::*};
use plasma_runtime::{Context, RuntimeConfig};

#[test]
fn integer_plus_float_is_float() {
    assert_eq!(value_of(binary(int(1), Add, Assembler::new().float(2.5))), "3.5");
    assert_eq!(value_of(binary(int(7), Div, int(2))), "3.5");
    assert_eq!(value_of(binary(int(-7), FloorDiv, int(2))), "-4");
    assert_eq!(value_of(binary(int(1), Equals, Assembler::new().float(1.0))), "True");
}

#[test]
fn division_by_zero_raises() {
    let (type_name, _) = uncaught(binary(int(1), Div, int(0)));
    assert_eq!(type_name, "DivisionByZeroError");

    let code = Assembler::new()
        .try_(
            binary(int(1), Mod, int(0)),
            vec![Assembler::except(
                vec![ident("RuntimeError")],
                Some("e"),
                assign("result", string("caught")),
            )],
            None,
            None,
        )
        .identifier("result");
    assert_eq!(value_of(code), "caught");
}

#[test]
fn slices_are_half_open_and_clamp_to_empty() {
    let code = assign(
        "xs",
        array(vec![int(10), int(20), int(30), int(40)]),
    )
    .append(tuple(vec![
        index(ident("xs"), tuple(vec![int(1), int(3)])),
        index(ident("xs"), tuple(vec![int(3), int(1)])),
        index(ident("xs"), int(-1)),
    ]));
    assert_eq!(value_of(code), "([20, 30], [], 40)");

    let (type_name, message) = uncaught(index(array(vec![int(1)]), int(4)));
    assert_eq!(type_name, "IndexOutOfRangeError");
    assert_eq!(message, "Index 4 out of range for length 1");
}

#[test]
fn slice_ends_normalise_like_indices() {
    let xs = || array(vec![int(1), int(2), int(3)]);
    assert_eq!(value_of(index(xs(), tuple(vec![int(0), int(-1)]))), "[1, 2]");
    assert_eq!(value_of(index(string("abc"), tuple(vec![int(-3), int(2)]))), "ab");

    let (type_name, message) = uncaught(index(xs(), tuple(vec![int(0), int(3)])));
    assert_eq!(type_name, "IndexOutOfRangeError");
    assert_eq!(message, "Index 3 out of range for length 3");
}

#[test]
fn repeat_reverses_on_negative_counts() {
    assert_eq!(value_of(binary(array(vec![int(1), int(2)]), Mul, int(-2))), "[2, 1, 2, 1]");
    assert_eq!(value_of(binary(string("ab"), Mul, int(3))), "ababab");
    // Integer.Mul rejects the string, String.RightMul takes over.
    assert_eq!(value_of(binary(int(2), Mul, string("ab"))), "abab");
}

#[test]
fn oversized_repeat_raises_instead_of_allocating() {
    let (type_name, message) = uncaught(binary(array(vec![int(1)]), Mul, int(i64::MAX)));
    assert_eq!(type_name, "RuntimeError");
    assert_eq!(message, "Repeated sequence is too large");

    let (type_name, _) = uncaught(binary(string("ab"), Mul, int(i64::MIN)));
    assert_eq!(type_name, "RuntimeError");
    let (type_name, _) = uncaught(binary(Assembler::new().bytes(vec![7u8]), Mul, int(i64::MAX)));
    assert_eq!(type_name, "RuntimeError");

    assert_eq!(value_of(binary(array(vec![]), Mul, int(i64::MAX))), "[]");
    assert_eq!(value_of(binary(string(""), Mul, int(i64::MAX))), "");
}

#[test]
fn equal_keys_collapse_into_one_entry() {
    let code = assign(
        "h",
        hash(vec![(int(1), string("a")), (int(1), string("b"))]),
    )
    .append(tuple(vec![call_named("len", vec![ident("h")]), index(ident("h"), int(1))]));
    assert_eq!(value_of(code), "(1, b)");

    let (type_name, _) = uncaught(hash(vec![(array(vec![]), int(1))]));
    assert_eq!(type_name, "UnhashableTypeError");
}

/// A class whose instances claim equality with anything through
/// `RightEquals` only.
fn permissive_class() -> Assembler {
    Assembler::new().class(
        "Anything",
        0,
        Assembler::new().method(
            "RightEquals",
            &["other"],
            Assembler::new().get_true().push().return_(1),
        ),
    )
}

#[test]
fn user_right_equals_decides_in_both_orders() {
    let code = permissive_class()
        .append(assign("a", call_named("Anything", vec![])))
        .append(tuple(vec![
            binary(ident("a"), Equals, int(1)),
            binary(int(1), Equals, ident("a")),
            binary(ident("a"), NotEquals, int(1)),
        ]));
    assert_eq!(value_of(code), "(True, True, False)");
}

fn counter_program() -> Assembler {
    // cell[0] = cell[0] + 1; return cell[0]
    let increment = binary(index(ident("cell"), int(0)), Add, int(1))
        .push()
        .identifier("cell")
        .push()
        .integer(0)
        .push()
        .assign_index()
        .append(index(ident("cell"), int(0)))
        .push()
        .return_(1);
    let make_counter = assign("cell", array(vec![int(0)]))
        .function("increment", &[], increment)
        .identifier("increment")
        .push()
        .return_(1);
    Assembler::new()
        .function("make_counter", &[], make_counter)
        .append(assign("counter", call_named("make_counter", vec![])))
        .append(assign("other", call_named("make_counter", vec![])))
        .append(call_named("counter", vec![]))
        .append(call_named("counter", vec![]))
        .append(call_named("other", vec![]))
        .append(tuple(vec![call_named("counter", vec![]), call_named("other", vec![])]))
}

#[test]
fn closures_keep_their_defining_scope() {
    assert_eq!(value_of(counter_program()), "(3, 2)");
}

#[test]
fn closures_survive_collection_under_small_pages() {
    let config = RuntimeConfig::default().with_initial_page_capacity(4);
    let result = run_with(config, counter_program()).unwrap();
    assert_eq!(result.value.as_deref(), Some("(3, 2)"));
}

#[test]
fn finally_runs_exactly_once() {
    let body = Assembler::new().try_(
        int(1).push().return_(1),
        vec![],
        None,
        Some(call_named("print", vec![string("finally")])),
    );
    let code = Assembler::new()
        .function("f", &[], body)
        .append(call_named("f", vec![]));
    let result = run(code);
    assert_eq!(result.value.as_deref(), Some("1"));
    assert_eq!(result.output, "finally");

    let raise = call_named("RuntimeError", vec![string("boom")]).push().raise();
    let code = Assembler::new().try_(
        raise,
        vec![Assembler::except(
            vec![ident("RuntimeError")],
            Some("e"),
            call_named("println", vec![ident("e")]),
        )],
        None,
        Some(call_named("println", vec![string("done")])),
    );
    assert_eq!(run(code).output, "RuntimeError: boom\ndone\n");
}

#[test]
fn finally_runs_once_before_a_reraised_error_escapes() {
    init_logging();
    let raise = call_named("RuntimeError", vec![string("boom")]).push().raise();
    let code = Assembler::new().try_(
        raise,
        vec![Assembler::except(
            vec![ident("RuntimeError")],
            Some("e"),
            ident("e").push().raise(),
        )],
        None,
        Some(call_named("print", vec![string("F")])),
    );
    let mut ctx = Context::new(RuntimeConfig::default());
    let error = ctx.execute(code.finish()).unwrap_err();
    assert_eq!(ctx.value(error).string, "boom");
    assert_eq!(ctx.output(), "F");
}

#[test]
fn except_matches_base_types() {
    let code = Assembler::new()
        .try_(
            call_named("hash", vec![array(vec![])]),
            vec![
                Assembler::except(vec![ident("KeyNotFoundError")], None, assign("r", string("key"))),
                Assembler::except(vec![ident("RuntimeError")], None, assign("r", string("runtime"))),
            ],
            None,
            None,
        )
        .identifier("r");
    assert_eq!(value_of(code), "runtime");
}

#[test]
fn wrong_argument_count_is_rejected() {
    let code = Assembler::new()
        .function("f", &["a"], ident("a").push().return_(1))
        .append(call_named("f", vec![]));
    let (type_name, message) = uncaught(code);
    assert_eq!(type_name, "InvalidNumberOfArgumentsError");
    assert_eq!(message, "Expecting 1 but received 0");
}

#[test]
fn recursion_depth_is_bounded() {
    let code = Assembler::new()
        .function("f", &[], call_named("f", vec![]).push().return_(1))
        .append(call_named("f", vec![]));
    let config = RuntimeConfig::default().with_max_call_depth(32);
    match run_with(config, code) {
        Err(plasma_runtime::ExecutionError::Uncaught { type_name, message }) => {
            assert_eq!(type_name, "RuntimeError");
            assert_eq!(message, "Maximum call depth exceeded");
        }
        other => panic!("expected depth error, got {other:?}"),
    }
}

/// `f(n)` returns `f(n - 1)` until `n` reaches zero.
fn countdown(depth: i64) -> Assembler {
    let body = Assembler::new().if_(
        binary(ident("n"), Equals, int(0)),
        int(0).push().return_(1),
        Some(call_named("f", vec![binary(ident("n"), Sub, int(1))]).push().return_(1)),
    );
    Assembler::new()
        .function("f", &["n"], body)
        .append(call_named("f", vec![int(depth)]))
}

#[test]
fn recursion_close_to_the_default_limit_succeeds() {
    let limit = RuntimeConfig::default().max_call_depth;
    let depth = i64::try_from(limit).unwrap() - 16;
    assert_eq!(value_of(countdown(depth)), "0");
}

#[test]
fn recursion_past_the_default_limit_raises() {
    let limit = RuntimeConfig::default().max_call_depth;
    let (type_name, message) = uncaught(countdown(i64::try_from(limit).unwrap() * 4));
    assert_eq!(type_name, "RuntimeError");
    assert_eq!(message, "Maximum call depth exceeded");
}

#[test]
fn hash_table_keys_iterate_in_insertion_order() {
    let entries = hash(vec![
        (string("c"), int(1)),
        (string("a"), int(2)),
        (string("b"), int(3)),
    ]);
    let code = assign("seen", string(""))
        .append(entries)
        .push()
        .for_(&["k"], assign("seen", binary(ident("seen"), Add, ident("k"))))
        .identifier("seen");
    assert_eq!(value_of(code), "cab");
}

#[test]
fn for_sums_hash_table_values() {
    let body = assign(
        "total",
        binary(index(ident("h"), ident("k")), Add, ident("total")),
    );
    let code = assign("total", int(0))
        .append(assign(
            "h",
            hash(vec![
                (string("a"), int(1)),
                (string("b"), int(2)),
                (string("c"), int(3)),
            ]),
        ))
        .identifier("h")
        .push()
        .for_(&["k"], body)
        .identifier("total");
    assert_eq!(value_of(code), "6");
}

#[test]
fn for_unpacks_several_receivers() {
    let body = assign(
        "total",
        binary(binary(ident("k"), Mul, ident("v")), Add, ident("total")),
    );
    let pairs = array(vec![tuple(vec![int(1), int(2)]), tuple(vec![int(3), int(4)])]);
    let code = assign("total", int(0))
        .append(pairs)
        .push()
        .for_(&["k", "v"], body)
        .identifier("total");
    assert_eq!(value_of(code), "14");
}

#[test]
fn generators_map_lazily() {
    let body = assign("total", binary(ident("y"), Add, ident("total")));
    let code = assign("total", int(0))
        .append(array(vec![int(1), int(2), int(3)]))
        .push()
        .generator(&["x"], binary(ident("x"), Mul, int(10)).push().return_(1))
        .push()
        .for_(&["y"], body)
        .identifier("total");
    assert_eq!(value_of(code), "60");
}

#[test]
fn while_stops_on_break() {
    let body = assign("i", binary(ident("i"), Add, int(1))).if_(
        binary(ident("i"), Equals, int(5)),
        Assembler::new().break_(),
        None,
    );
    let code = assign("i", int(0))
        .while_(Assembler::new().get_true(), body)
        .identifier("i");
    assert_eq!(value_of(code), "5");
}

#[test]
fn switch_picks_the_first_equal_target() {
    let code = int(2)
        .push()
        .switch(
            vec![
                (vec![int(1)], assign("r", string("one"))),
                (vec![int(2), int(3)], assign("r", string("two or three"))),
            ],
            Some(assign("r", string("other"))),
        )
        .identifier("r");
    assert_eq!(value_of(code), "two or three");
}

#[test]
fn initialize_receives_constructor_arguments() {
    let initialize = ident("x").push().identifier("self").push().assign_selector("x");
    let code = Assembler::new()
        .class("Point", 0, Assembler::new().method("Initialize", &["x"], initialize))
        .append(assign("p", call_named("Point", vec![int(3)])))
        .identifier("p")
        .push()
        .select("x");
    assert_eq!(value_of(code), "3");
}

#[test]
fn built_in_values_refuse_new_attributes() {
    let code = int(1).push().identifier("Object").push().assign_selector("extra");
    let (type_name, _) = uncaught(code);
    assert_eq!(type_name, "BuiltInSymbolProtectionError");
}

#[test]
fn modules_expose_their_bindings() {
    let code = Assembler::new()
        .module("m", assign("x", int(7)))
        .identifier("m")
        .push()
        .select("x");
    assert_eq!(value_of(code), "7");
}

#[test]
fn interface_bodies_only_define_methods() {
    let code = Assembler::new().interface("I", 0, int(1));
    let (type_name, message) = uncaught(code);
    assert_eq!(type_name, "RuntimeError");
    assert_eq!(message, "Interface bodies may only define methods");
}

#[test]
fn print_writes_to_stdout() {
    let code = call_named("println", vec![string("hello")])
        .append(call_named("print", vec![int(42)]));
    let result = run(code);
    assert_eq!(result.output, "hello\n42");
    assert_eq!(result.value, None);
}

#[test]
fn input_reads_one_line() {
    init_logging();
    let code = call_named("input", vec![string("name? ")]);
    let mut vm = machine(RuntimeConfig::default(), "alice\nbob\n");
    let result = vm.run(code.finish()).unwrap();
    assert_eq!(result.value.as_deref(), Some("alice"));
    assert_eq!(result.output, "name? ");
}

#[test]
fn dir_lists_on_demand_names() {
    let code = binary(string("Add"), Contains, call_named("dir", vec![int(1)]));
    assert_eq!(value_of(code), "True");
}

#[test]
fn string_conversions() {
    assert_eq!(value_of(method(string("0x1F"), "ToInteger", vec![])), "31");
    assert_eq!(value_of(method(string("1_000"), "ToInteger", vec![])), "1000");
    let (type_name, _) = uncaught(method(string("twelve"), "ToInteger", vec![]));
    assert_eq!(type_name, "IntegerParsingError");
}
