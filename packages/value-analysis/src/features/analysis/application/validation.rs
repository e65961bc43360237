//! Structural checks run before solving, so that the transfer function can
//! stay total.

use crate::errors::{AnalysisError, Result};
use crate::features::transfer::ControlFlowGraph;
use crate::shared::models::{Builtin, Instruction, NodeId};

pub fn validate_graph<G: ControlFlowGraph + ?Sized>(graph: &G) -> Result<()> {
    let count = graph.node_count();
    let entry = graph.entry();
    if entry.index() >= count {
        return Err(AnalysisError::MissingEntry { entry });
    }

    for i in 0..count {
        let node = NodeId(i as u32);
        let Some(instr) = graph.instruction_at(node) else {
            continue;
        };
        if let Some(successor) = instr.successors().into_iter().find(|s| s.index() >= count) {
            return Err(AnalysisError::DanglingSuccessor { node, successor });
        }
        if let Instruction::Builtin {
            builtin: Builtin::Memcpy { size, .. },
            ..
        } = instr
        {
            if *size < 0 {
                return Err(AnalysisError::UnsupportedWidth { width: *size });
            }
        }
    }
    Ok(())
}
