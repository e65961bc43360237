//! Ports for the transfer function
//!
//! What the analyser needs from the surrounding compiler: the graph with its
//! instructions, and (optionally) which registers die after each node.

use rustc_hash::FxHashSet;

use crate::features::solver::SuccessorGraph;
use crate::shared::models::{DeadRegisters, Function, Instruction, NodeId, Reg};

/// Control-flow graph with one instruction per node
pub trait ControlFlowGraph: SuccessorGraph {
    fn entry(&self) -> NodeId;

    /// Parameter registers, live on entry
    fn params(&self) -> &[Reg];

    /// `None` for a node without an instruction
    fn instruction_at(&self, node: NodeId) -> Option<&Instruction>;
}

/// Liveness information computed elsewhere
pub trait LivenessOracle {
    /// Registers dead immediately after `node`; `None` means nothing is known
    /// dead there
    fn registers_dead_after(&self, node: NodeId) -> Option<&FxHashSet<Reg>>;
}

/// Oracle for callers without liveness information
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLiveness;

impl LivenessOracle for NoLiveness {
    fn registers_dead_after(&self, _node: NodeId) -> Option<&FxHashSet<Reg>> {
        None
    }
}

impl LivenessOracle for DeadRegisters {
    fn registers_dead_after(&self, node: NodeId) -> Option<&FxHashSet<Reg>> {
        self.dead_after(node)
    }
}

impl SuccessorGraph for Function {
    fn node_count(&self) -> usize {
        Function::node_count(self)
    }

    fn successors(&self, node: NodeId) -> Vec<NodeId> {
        self.instruction(node)
            .map(Instruction::successors)
            .unwrap_or_default()
    }
}

impl ControlFlowGraph for Function {
    fn entry(&self) -> NodeId {
        self.entry
    }

    fn params(&self) -> &[Reg] {
        &self.params
    }

    fn instruction_at(&self, node: NodeId) -> Option<&Instruction> {
        self.instruction(node)
    }
}
