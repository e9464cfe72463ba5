mod common;

use common::*;
use plasma_ir::{Assembler, BinaryOperator::*};
use plasma_runtime::{Context, RuntimeConfig, core};

#[test]
fn unreachable_values_and_cycles_are_freed() {
    init_logging();
    let mut ctx = Context::new(RuntimeConfig::default());
    let frame = ctx.protected_frame();

    let kept = ctx.new_string("kept");
    ctx.bind_master("kept", kept);
    let garbage = ctx.new_array(Vec::new());
    let cycle = ctx.new_object();
    core::set(&mut ctx, cycle, "me", cycle);
    let tables_before = ctx.table_stats().live;

    ctx.restore_protected(frame);
    let stats = ctx.collect();

    assert!(ctx.is_live(kept));
    assert!(!ctx.is_live(garbage));
    assert!(!ctx.is_live(cycle));
    assert!(stats.values_freed >= 2);
    assert!(stats.tables_freed >= 1);
    assert!(ctx.table_stats().live < tables_before);
}

#[test]
fn bound_cycles_survive_until_unbound() {
    init_logging();
    let mut ctx = Context::new(RuntimeConfig::default());
    let frame = ctx.protected_frame();
    let cycle = ctx.new_object();
    core::set(&mut ctx, cycle, "me", cycle);
    ctx.bind_master("cycle", cycle);
    ctx.restore_protected(frame);

    ctx.collect();
    assert!(ctx.is_live(cycle));
    assert_eq!(core::get(&mut ctx, cycle, "me"), Ok(cycle));

    let none = ctx.get_none();
    ctx.bind_master("cycle", none);
    ctx.collect();
    assert!(!ctx.is_live(cycle));
}

#[test]
fn finished_call_tables_are_reclaimed() {
    init_logging();
    let mut ctx = Context::new(RuntimeConfig::default());
    let define = Assembler::new().function("f", &["x"], ident("x").push().return_(1));
    ctx.execute(define.finish()).unwrap();
    ctx.collect();
    let before = ctx.table_stats().live;

    let calls = assign("i", int(0)).while_(
        binary(ident("i"), LessThan, int(200)),
        assign("i", call_named("f", vec![binary(ident("i"), Add, int(1))])),
    );
    let result = ctx.execute(calls.append(ident("i")).finish()).unwrap();
    assert_eq!(ctx.value(result).integer, 200);

    // The counter picked up its own symbols while the loop compared it.
    ctx.execute(assign("i", Assembler::new().get_none()).finish()).unwrap();
    ctx.collect();
    assert_eq!(ctx.table_stats().live, before);
}

#[test]
fn protected_values_survive_collection() {
    init_logging();
    let mut ctx = Context::new(RuntimeConfig::default());
    let temporary = ctx.new_tuple(Vec::new());
    ctx.collect();
    assert!(ctx.is_live(temporary));
}

#[test]
fn bound_containers_keep_their_elements() {
    init_logging();
    let mut ctx = Context::new(RuntimeConfig::default());
    let frame = ctx.protected_frame();
    let element = ctx.new_integer(9);
    let holder = ctx.new_array(vec![element]);
    ctx.bind_master("holder", holder);
    ctx.restore_protected(frame);

    ctx.collect();
    assert!(ctx.is_live(holder));
    assert!(ctx.is_live(element));
}

#[test]
fn builtins_survive_repeated_collection() {
    init_logging();
    let mut ctx = Context::new(RuntimeConfig::default());
    ctx.collect();
    ctx.collect();
    let result = ctx
        .execute(call_named("len", vec![string("four")]).finish())
        .unwrap();
    assert_eq!(ctx.value(result).integer, 4);
}

/// A loop that allocates garbage every pass on a heap that starts with a
/// handful of slots.
#[test]
fn allocation_heavy_loop_under_small_pages() {
    let body = assign("i", binary(ident("i"), Add, int(1)))
        .append(assign("scratch", tuple(vec![ident("i"), string("x"), array(vec![ident("i")])])));
    let code = assign("i", int(0))
        .while_(binary(ident("i"), LessThan, int(300)), body)
        .append(index(ident("scratch"), int(2)));

    let config = RuntimeConfig::default().with_initial_page_capacity(2);
    let result = run_with(config, code).unwrap();
    assert_eq!(result.value.as_deref(), Some("[300]"));
}

#[test]
fn disabled_collection_only_grows() {
    let code = assign("i", int(0)).while_(
        binary(ident("i"), LessThan, int(50)),
        assign("i", binary(ident("i"), Add, int(1))),
    );
    let config = RuntimeConfig::default()
        .with_initial_page_capacity(2)
        .with_gc(false);
    let result = run_with(config, code.append(Assembler::new().identifier("i"))).unwrap();
    assert_eq!(result.value.as_deref(), Some("50"));
}
