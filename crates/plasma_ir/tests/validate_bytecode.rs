use plasma_ir::{
    Assembler, BinaryOperator, Bytecode, BytecodeError, FunctionInformation, Instruction, Opcode,
    Operand, OperandKind, validate,
};
use proptest::prelude::*;

#[test]
fn assembled_function_validates() {
    let code = Assembler::new()
        .function(
            "add",
            &["a", "b"],
            Assembler::new()
                .identifier("b")
                .push()
                .identifier("a")
                .push()
                .binary(BinaryOperator::Add)
                .push()
                .return_(1),
        )
        .finish();
    assert_eq!(code[0].opcode, Opcode::NewFunction);
    assert_eq!(code[1].opcode, Opcode::LoadFunctionArguments);
    match &code[0].operand {
        Operand::Function(info) => {
            assert_eq!(info.arg_count, 2);
            assert_eq!(info.body_length, code.len() - 1);
        }
        other => panic!("unexpected operand {other:?}"),
    }
    validate(&code).unwrap();
}

#[test]
fn operand_mismatch_is_reported() {
    let code = vec![Instruction::new(Opcode::NewInteger, Operand::String("1".into()))];
    assert_eq!(
        validate(&code),
        Err(BytecodeError::OperandMismatch {
            index: 0,
            opcode: Opcode::NewInteger,
            expected: OperandKind::Integer,
            found: OperandKind::String,
        })
    );
}

#[test]
fn jump_targets_must_stay_in_range() {
    let ok = Assembler::new().jump(1).nop().finish();
    validate(&ok).unwrap();

    let forward = Assembler::new().jump(2).nop().finish();
    assert!(matches!(
        validate(&forward),
        Err(BytecodeError::JumpOutOfRange { index: 0, target: 3, len: 2 })
    ));

    let backward = Assembler::new().nop().rjump(3).finish();
    assert!(matches!(
        validate(&backward),
        Err(BytecodeError::JumpOutOfRange { index: 1, target: -1, .. })
    ));
}

#[test]
fn truncated_definition_is_reported() {
    let code = vec![Instruction::new(
        Opcode::NewFunction,
        Operand::Function(FunctionInformation {
            name: "f".into(),
            body_length: 4,
            arg_count: 0,
        }),
    )];
    assert!(matches!(
        validate(&code),
        Err(BytecodeError::TruncatedBody { index: 0, length: 4, remaining: 0 })
    ));
}

#[test]
fn argument_count_must_match_loaded_names() {
    let code = vec![
        Instruction::new(
            Opcode::NewFunction,
            Operand::Function(FunctionInformation {
                name: "f".into(),
                body_length: 1,
                arg_count: 2,
            }),
        ),
        Instruction::new(Opcode::LoadFunctionArguments, Operand::Names(vec!["x".into()])),
    ];
    assert!(matches!(
        validate(&code),
        Err(BytecodeError::ArgumentCountMismatch { declared: 2, loaded: 1, .. })
    ));
}

#[test]
fn nested_blocks_are_checked() {
    let code = Assembler::new()
        .nop()
        .if_(
            Assembler::new().get_true(),
            Assembler::new().jump(5),
            None,
        )
        .finish();
    let err = validate(&code).unwrap_err();
    match err {
        BytecodeError::Nested { index, source } => {
            assert_eq!(index, 1);
            assert!(matches!(*source, BytecodeError::JumpOutOfRange { .. }));
        }
        other => panic!("unexpected error {other:?}"),
    }
    let rendered = validate(&code).unwrap_err().to_string();
    assert!(rendered.starts_with("in nested block of instruction 1"));
}

#[test]
fn try_blocks_check_every_clause() {
    let bad = Assembler::new().emit(Opcode::Return, Operand::None);
    let code = Assembler::new()
        .try_(
            Assembler::new().nop(),
            vec![Assembler::except(vec![], Some("e"), Assembler::new().nop())],
            None,
            Some(bad),
        )
        .finish();
    assert!(matches!(validate(&code), Err(BytecodeError::Nested { .. })));
}

#[test]
fn bytecode_cursor_walks_assembled_code() {
    let mut bc = Bytecode::new(Assembler::new().integer(1).push().pop().finish());
    assert_eq!(bc.len(), 3);
    assert_eq!(bc.next().map(|i| i.opcode), Some(Opcode::NewInteger));
    assert_eq!(bc.peek().map(|i| i.opcode), Some(Opcode::Push));
    bc.jump(1);
    assert_eq!(bc.remaining(), 1);
}

#[test]
fn line_numbers_follow_the_builder() {
    let code = Assembler::new().line(3).nop().line(7).nop().finish();
    assert_eq!(code[0].line, 3);
    assert_eq!(code[1].line, 7);
}

proptest! {
    #[test]
    fn straight_line_literals_always_validate(values in proptest::collection::vec(any::<i64>(), 0..40)) {
        let mut asm = Assembler::new();
        for v in &values {
            asm = asm.integer(*v).push();
        }
        let code = asm.array(values.len()).finish();
        prop_assert!(validate(&code).is_ok());
        prop_assert_eq!(code.len(), values.len() * 2 + 1);
    }

    #[test]
    fn forward_jumps_validate_iff_in_range(len in 1usize..20, offset in 0usize..40) {
        let mut asm = Assembler::new().jump(offset);
        for _ in 1..len {
            asm = asm.nop();
        }
        let code = asm.finish();
        let in_range = offset < len;
        prop_assert_eq!(validate(&code).is_ok(), in_range);
    }
}
