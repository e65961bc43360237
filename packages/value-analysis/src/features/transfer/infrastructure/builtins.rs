//! Builtin calls.
//!
//! Opaque runtime functions go through the call decision rule. Volatile
//! accesses, block copies and annotations have their own rules.

use crate::config::{BuiltinConfig, PointerFloor};
use crate::features::memory_domain::{call_result, classify_call, AbstractMemoryState};
use crate::features::readonly_globals::ReadOnlyGlobals;
use crate::features::transfer::domain::RegisterFile;
use crate::features::value_domain::{AbstractPointer, AbstractValue};
use crate::shared::models::{Builtin, BuiltinArg, Reg};

pub fn floor_pointer(floor: PointerFloor) -> AbstractPointer {
    match floor {
        PointerFloor::Glob => AbstractPointer::AnyGlobal,
        PointerFloor::Nonstack => AbstractPointer::NonStack,
        PointerFloor::Top => AbstractPointer::Top,
    }
}

pub fn eval_builtin_arg(
    arg: &BuiltinArg,
    regs: &RegisterFile,
    mem: &AbstractMemoryState,
    romem: &ReadOnlyGlobals,
) -> AbstractValue {
    match *arg {
        BuiltinArg::Reg(r) => regs.get(r),
        BuiltinArg::Int(n) => AbstractValue::Int(n),
        BuiltinArg::Long(n) => AbstractValue::Long(n),
        BuiltinArg::AddrStack(ofs) => AbstractValue::Ptr(AbstractPointer::StackAt(ofs)),
        BuiltinArg::AddrGlobal(s, ofs) => AbstractValue::Ptr(AbstractPointer::GlobalAt(s, ofs)),
        BuiltinArg::LoadStack(chunk, ofs) => mem.load(chunk, AbstractPointer::StackAt(ofs), romem),
        BuiltinArg::LoadGlobal(chunk, s, ofs) => {
            mem.load(chunk, AbstractPointer::GlobalAt(s, ofs), romem)
        }
    }
}

/// Effect of a builtin on registers and memory
pub fn transfer_builtin(
    builtin: &Builtin,
    args: &[BuiltinArg],
    dest: Option<Reg>,
    regs: &RegisterFile,
    mem: &AbstractMemoryState,
    romem: &ReadOnlyGlobals,
    config: &BuiltinConfig,
) -> (RegisterFile, AbstractMemoryState) {
    let vals: Vec<AbstractValue> = args
        .iter()
        .map(|a| eval_builtin_arg(a, regs, mem, romem))
        .collect();
    let arg = |i: usize| vals.get(i).copied().unwrap_or(AbstractValue::Top);

    let (result, mem_out) = match builtin {
        Builtin::External { .. } => {
            let kind = classify_call(&vals, mem);
            (call_result(kind), mem.after_call(kind))
        }
        Builtin::VolatileLoad(chunk) => {
            let loaded = mem.load(*chunk, arg(0).address_class(), romem);
            let floor = AbstractValue::ifptr(floor_pointer(config.volatile_load_floor)).normalize(*chunk);
            (loaded.join(&floor), mem.clone())
        }
        Builtin::VolatileStore(chunk) => {
            let mut stored = mem.clone();
            stored.store(*chunk, arg(0).address_class(), arg(1));
            (AbstractValue::Top, stored.join(mem))
        }
        Builtin::Memcpy { size, .. } => {
            let mut copied = mem.clone();
            if *size > 0 {
                copied.copy(arg(0).address_class(), arg(1).address_class(), *size, romem);
            }
            (AbstractValue::Top, copied)
        }
        Builtin::Annotation { .. } | Builtin::AnnotationValue { .. } | Builtin::Debug { .. } => {
            (AbstractValue::Top, mem.clone())
        }
    };

    let mut regs_out = regs.clone();
    if let Some(d) = dest {
        regs_out.set(d, result);
    }
    (regs_out, mem_out)
}
