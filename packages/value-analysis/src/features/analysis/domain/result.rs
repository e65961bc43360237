//! Per-function analysis result and the queries later passes make on it.

use crate::features::memory_domain::AbstractMemoryState;
use crate::features::readonly_globals::ReadOnlyGlobals;
use crate::features::solver::{Solution, SolverStats};
use crate::features::transfer::NodeState;
use crate::features::value_domain::{AbstractPointer, AbstractValue};
use crate::shared::models::{Chunk, NodeId, Reg};

/// Entry state of every node of one function at the fixpoint
#[derive(Debug, Clone)]
pub struct FunctionAnalysis {
    solution: Solution<NodeState>,
}

impl FunctionAnalysis {
    pub(crate) fn new(solution: Solution<NodeState>) -> Self {
        Self { solution }
    }

    pub fn state_at(&self, node: NodeId) -> Option<&NodeState> {
        self.solution.state(node)
    }

    /// Value of `reg` on entry to `node`. Bottom for unreachable nodes.
    pub fn value_at(&self, node: NodeId, reg: Reg) -> AbstractValue {
        self.state_at(node)
            .and_then(NodeState::regs)
            .map_or(AbstractValue::Bottom, |regs| regs.get(reg))
    }

    /// Class of every pointer `reg` may hold on entry to `node`
    pub fn pointer_class_at(&self, node: NodeId, reg: Reg) -> AbstractPointer {
        self.value_at(node, reg).provenance()
    }

    /// `None` when the node is unreachable
    pub fn memory_state_at(&self, node: NodeId) -> Option<&AbstractMemoryState> {
        self.state_at(node).and_then(NodeState::mem)
    }

    pub fn is_reachable(&self, node: NodeId) -> bool {
        self.state_at(node).is_some_and(NodeState::is_reachable)
    }

    /// What a load of `chunk` through `addr` would read on entry to `node`
    pub fn load_at(
        &self,
        node: NodeId,
        chunk: Chunk,
        addr: AbstractPointer,
        romem: &ReadOnlyGlobals,
    ) -> AbstractValue {
        self.memory_state_at(node)
            .map_or(AbstractValue::Bottom, |mem| mem.load(chunk, addr, romem))
    }

    pub fn node_count(&self) -> usize {
        self.solution.len()
    }

    pub fn stats(&self) -> SolverStats {
        self.solution.stats()
    }

    /// The safety valve fired and every node holds Top
    pub fn gave_up(&self) -> bool {
        self.solution.stats().gave_up
    }
}
