//! Choosing how much memory knowledge survives an opaque call.

use super::memory::AbstractMemoryState;
use crate::features::value_domain::{AbstractPointer, AbstractValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    /// No pointer into the current frame is reachable by the callee
    Private,
    /// The callee may read or write anything, the frame included
    Public,
}

/// A call is private iff every argument and everything already reachable
/// from outside the frame excludes the frame.
pub fn classify_call(args: &[AbstractValue], mem: &AbstractMemoryState) -> CallKind {
    let args_confined = args
        .iter()
        .all(|v| v.provenance().le(&AbstractPointer::NonStack));
    let memory_confined = mem.nonstack().le(&AbstractPointer::NonStack);
    if args_confined && memory_confined {
        CallKind::Private
    } else {
        CallKind::Public
    }
}

impl AbstractMemoryState {
    /// Memory after a call of the given kind
    pub fn after_call(&self, kind: CallKind) -> Self {
        match kind {
            CallKind::Private => self.after_private_call(),
            CallKind::Public => self.after_public_call(),
        }
    }
}

/// Abstract result of a call of the given kind
pub fn call_result(kind: CallKind) -> AbstractValue {
    match kind {
        CallKind::Private => AbstractValue::Ifptr(AbstractPointer::NonStack),
        CallKind::Public => AbstractValue::Top,
    }
}
