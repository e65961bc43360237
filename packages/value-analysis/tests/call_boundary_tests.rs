//! Call-boundary soundness: the private transform needs both conjuncts of
//! the decision rule.

mod common;

use common::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use value_analysis::features::memory_domain::classify_call;
use value_analysis::shared::models::{Chunk, FunctionBuilder, NodeId, Symbol};
use value_analysis::{
    AbstractMemoryState, AbstractPointer, AbstractValue, CallKind, ReadOnlyGlobals,
};

#[test]
fn test_private_call_keeps_local_contents() {
    let f = FunctionBuilder::new("caller")
        .node(0, int_const(1, 4, 1))
        .node(1, store_stack(Chunk::Int32, 0, 1, 2))
        .node(2, call(9, &[1], 2, 3))
        .node(3, load_stack(Chunk::Int32, 0, 3, 4))
        .node(4, ret())
        .build();
    let analysis = analyze(&f);

    assert_value_at(&analysis, 4, 3, AbstractValue::Int(4));
    assert_value_at(&analysis, 4, 2, AbstractValue::Ifptr(AbstractPointer::NonStack));
}

#[test]
fn test_escaped_frame_forces_public_call() {
    // The frame address is published through a global before an argument-free call
    let f = FunctionBuilder::new("leaky")
        .node(0, int_const(1, 4, 1))
        .node(1, store_stack(Chunk::Int32, 0, 1, 2))
        .node(2, addr_stack(2, 0, 3))
        .node(
            3,
            value_analysis::shared::models::Instruction::Store {
                chunk: Chunk::PTR,
                addr: value_analysis::shared::models::Addressing::Global(Symbol(5), 0),
                args: vec![],
                src: value_analysis::shared::models::Reg(2),
                succ: NodeId(4),
            },
        )
        .node(4, call(9, &[], 3, 5))
        .node(5, ret())
        .build();
    let (analysis, romem) = analyze_with(&f, &[], &Default::default());

    assert_value_at(&analysis, 5, 3, AbstractValue::Top);
    assert_eq!(
        analysis.load_at(NodeId(5), Chunk::Int32, AbstractPointer::StackAt(0), &romem),
        AbstractValue::Top
    );
}

fn memory_with_nonstack(escape: AbstractPointer) -> AbstractMemoryState {
    let mut mem = AbstractMemoryState::function_entry();
    mem.store(Chunk::PTR, AbstractPointer::GlobalAt(Symbol(1), 0), AbstractValue::ptr(escape));
    mem
}

proptest! {
    #[test]
    fn prop_private_only_when_both_conjuncts_hold(
        args in proptest::collection::vec(arb_value(), 0..4),
        escape in arb_pointer(),
    ) {
        let mem = memory_with_nonstack(escape);
        let args_ok = args.iter().all(|v| v.provenance().le(&AbstractPointer::NonStack));
        let mem_ok = mem.nonstack().le(&AbstractPointer::NonStack);

        let kind = classify_call(&args, &mem);
        prop_assert_eq!(kind == CallKind::Private, args_ok && mem_ok);
    }

    #[test]
    fn prop_private_call_preserves_frame(
        ofs in 0i64..8,
        v in arb_value(),
    ) {
        let mut mem = AbstractMemoryState::function_entry();
        mem.store(Chunk::Int64, AbstractPointer::StackAt(ofs * 8), v);
        let before = mem.load(Chunk::Int64, AbstractPointer::StackAt(ofs * 8), &ReadOnlyGlobals::default());
        let after = mem.after_call(CallKind::Private);
        prop_assert_eq!(
            after.load(Chunk::Int64, AbstractPointer::StackAt(ofs * 8), &ReadOnlyGlobals::default()),
            before
        );
        prop_assert!(after.tracked_globals().next().is_none());
    }
}
