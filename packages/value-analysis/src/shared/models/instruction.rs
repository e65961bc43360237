//! Instruction view consumed by the transfer function.

use super::chunk::Chunk;
use super::ids::{NodeId, Reg, Symbol};
use super::ops::{Addressing, Condition, Operation};
use serde::{Deserialize, Serialize};

/// Call target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Callee {
    Direct(Symbol),
    Indirect(Reg),
}

/// Argument of a builtin call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuiltinArg {
    Reg(Reg),
    Int(i32),
    Long(i64),
    AddrStack(i64),
    AddrGlobal(Symbol, i64),
    LoadStack(Chunk, i64),
    LoadGlobal(Chunk, Symbol, i64),
}

/// Builtin operation kinds
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Builtin {
    /// Opaque runtime function, handled like a call
    External { name: String },
    /// `dest := *(chunk*)arg0`, volatile
    VolatileLoad(Chunk),
    /// `*(chunk*)arg0 := arg1`, volatile
    VolatileStore(Chunk),
    /// `memcpy(arg0, arg1, size)`
    Memcpy { size: i64, align: i64 },
    /// Annotation without result
    Annotation { text: String },
    /// Annotation observing its first argument
    AnnotationValue { text: String },
    /// Debug-info marker
    Debug { kind: u32 },
}

/// One node of the control-flow graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Instruction {
    Nop {
        succ: NodeId,
    },
    Op {
        op: Operation,
        args: Vec<Reg>,
        dest: Reg,
        succ: NodeId,
    },
    Load {
        chunk: Chunk,
        addr: Addressing,
        args: Vec<Reg>,
        dest: Reg,
        succ: NodeId,
    },
    Store {
        chunk: Chunk,
        addr: Addressing,
        args: Vec<Reg>,
        src: Reg,
        succ: NodeId,
    },
    Call {
        callee: Callee,
        args: Vec<Reg>,
        dest: Reg,
        succ: NodeId,
    },
    TailCall {
        callee: Callee,
        args: Vec<Reg>,
    },
    Builtin {
        builtin: Builtin,
        args: Vec<BuiltinArg>,
        dest: Option<Reg>,
        succ: NodeId,
    },
    Cond {
        cond: Condition,
        args: Vec<Reg>,
        ifso: NodeId,
        ifnot: NodeId,
    },
    JumpTable {
        arg: Reg,
        targets: Vec<NodeId>,
    },
    Return {
        arg: Option<Reg>,
    },
}

impl Instruction {
    /// Successors in the order the instruction lists them (duplicates kept)
    pub fn successors(&self) -> Vec<NodeId> {
        match self {
            Instruction::Nop { succ }
            | Instruction::Op { succ, .. }
            | Instruction::Load { succ, .. }
            | Instruction::Store { succ, .. }
            | Instruction::Call { succ, .. }
            | Instruction::Builtin { succ, .. } => vec![*succ],
            Instruction::Cond { ifso, ifnot, .. } => vec![*ifso, *ifnot],
            Instruction::JumpTable { targets, .. } => targets.clone(),
            Instruction::TailCall { .. } | Instruction::Return { .. } => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_successors() {
        let cond = Instruction::Cond {
            cond: Condition::CmpImm(crate::shared::models::Comparison::Eq, 0),
            args: vec![Reg(1)],
            ifso: NodeId(2),
            ifnot: NodeId(3),
        };
        assert_eq!(cond.successors(), vec![NodeId(2), NodeId(3)]);

        let ret = Instruction::Return { arg: None };
        assert!(ret.successors().is_empty());

        let table = Instruction::JumpTable {
            arg: Reg(0),
            targets: vec![NodeId(4), NodeId(4), NodeId(5)],
        };
        assert_eq!(table.successors().len(), 3);
    }
}
