use crate::features::memory_domain::AbstractMemoryState;
use crate::shared::lattice::Lattice;
use crate::shared::models::Reg;

use super::registers::RegisterFile;

/// Abstract state on entry to a node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NodeState {
    /// Node not reachable
    #[default]
    Bottom,
    Live {
        regs: RegisterFile,
        mem: AbstractMemoryState,
    },
}

impl NodeState {
    pub fn live(regs: RegisterFile, mem: AbstractMemoryState) -> Self {
        NodeState::Live { regs, mem }
    }

    /// State on function entry
    pub fn entry(params: &[Reg]) -> Self {
        Self::live(RegisterFile::entry(params), AbstractMemoryState::function_entry())
    }

    pub fn regs(&self) -> Option<&RegisterFile> {
        match self {
            NodeState::Bottom => None,
            NodeState::Live { regs, .. } => Some(regs),
        }
    }

    pub fn mem(&self) -> Option<&AbstractMemoryState> {
        match self {
            NodeState::Bottom => None,
            NodeState::Live { mem, .. } => Some(mem),
        }
    }

    pub fn is_reachable(&self) -> bool {
        matches!(self, NodeState::Live { .. })
    }

    /// Drop the given registers
    pub fn without<'a>(self, dead: impl IntoIterator<Item = &'a Reg>) -> Self {
        match self {
            NodeState::Bottom => NodeState::Bottom,
            NodeState::Live { mut regs, mem } => {
                regs.kill(dead);
                NodeState::Live { regs, mem }
            }
        }
    }
}

impl Lattice for NodeState {
    fn bottom() -> Self {
        NodeState::Bottom
    }

    fn top() -> Self {
        Self::live(RegisterFile::top(), AbstractMemoryState::top())
    }

    fn join(&self, other: &Self) -> Self {
        match (self, other) {
            (NodeState::Bottom, s) | (s, NodeState::Bottom) => s.clone(),
            (NodeState::Live { regs: r1, mem: m1 }, NodeState::Live { regs: r2, mem: m2 }) => {
                Self::live(r1.join(r2), m1.join(m2))
            }
        }
    }

    fn is_bottom(&self) -> bool {
        matches!(self, NodeState::Bottom)
    }
}
