//! Proptest strategies for the value lattices

use proptest::prelude::*;
use value_analysis::shared::models::{Chunk, Symbol};
use value_analysis::{AbstractMemoryState, AbstractPointer, AbstractValue, NumKind};

pub fn arb_pointer() -> impl Strategy<Value = AbstractPointer> {
    let sym = (0u32..3).prop_map(Symbol);
    let ofs = -2i64..3;
    prop_oneof![
        Just(AbstractPointer::Bottom),
        ofs.clone().prop_map(|o| AbstractPointer::StackAt(o * 4)),
        (sym.clone(), ofs).prop_map(|(s, o)| AbstractPointer::GlobalAt(s, o * 4)),
        Just(AbstractPointer::AnyStack),
        sym.prop_map(AbstractPointer::AnyOffsetOf),
        Just(AbstractPointer::AnyGlobal),
        Just(AbstractPointer::NonStack),
        Just(AbstractPointer::Top),
    ]
}

pub fn arb_kind() -> impl Strategy<Value = NumKind> {
    prop_oneof![
        Just(NumKind::Int),
        Just(NumKind::Long),
        Just(NumKind::Single),
        Just(NumKind::Float),
    ]
}

/// Values in canonical form (no `Ptr(Bottom)`, no `Ifptr(Top)`)
pub fn arb_value() -> impl Strategy<Value = AbstractValue> {
    prop_oneof![
        Just(AbstractValue::Bottom),
        (-3i32..4).prop_map(AbstractValue::Int),
        (-3i64..4).prop_map(AbstractValue::Long),
        prop_oneof![Just(0.5f32), Just(-1.0), Just(f32::NAN)].prop_map(AbstractValue::single),
        prop_oneof![Just(0.5f64), Just(2.0), Just(f64::NAN)].prop_map(AbstractValue::float),
        arb_kind().prop_map(AbstractValue::Num),
        arb_pointer().prop_map(AbstractValue::ptr),
        arb_pointer().prop_map(AbstractValue::ifptr),
        Just(AbstractValue::Top),
    ]
}

pub fn arb_chunk() -> impl Strategy<Value = Chunk> {
    prop_oneof![
        Just(Chunk::Int8Signed),
        Just(Chunk::Int8Unsigned),
        Just(Chunk::Int16Signed),
        Just(Chunk::Int16Unsigned),
        Just(Chunk::Int32),
        Just(Chunk::Int64),
        Just(Chunk::Float32),
        Just(Chunk::Float64),
        Just(Chunk::Any32),
        Just(Chunk::Any64),
    ]
}

/// A memory state with some history behind it
pub fn arb_memory() -> impl Strategy<Value = AbstractMemoryState> {
    proptest::collection::vec((arb_chunk(), arb_pointer(), arb_value()), 0..6).prop_map(|stores| {
        let mut mem = AbstractMemoryState::function_entry();
        for (chunk, addr, v) in stores {
            mem.store(chunk, addr, v);
        }
        mem
    })
}
