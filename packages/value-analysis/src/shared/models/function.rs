//! Arena-backed function representation and liveness tables.

use super::ids::{NodeId, Reg};
use super::instruction::Instruction;
use super::globals::GlobalDef;
use rustc_hash::{FxHashMap, FxHashSet};

/// A function body: an arena of instruction slots addressed by `NodeId`.
///
/// A slot may be empty; edges into an empty slot are structurally
/// unreachable.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: String,
    pub entry: NodeId,
    pub params: Vec<Reg>,
    nodes: Vec<Option<Instruction>>,
}

impl Function {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn instruction(&self, node: NodeId) -> Option<&Instruction> {
        self.nodes.get(node.index()).and_then(Option::as_ref)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.nodes.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Instruction)> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|ins| (NodeId(i as u32), ins)))
    }
}

/// Builder for `Function`
#[derive(Debug, Default)]
pub struct FunctionBuilder {
    name: String,
    entry: NodeId,
    params: Vec<Reg>,
    nodes: Vec<Option<Instruction>>,
}

impl FunctionBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn entry(mut self, entry: NodeId) -> Self {
        self.entry = entry;
        self
    }

    pub fn params(mut self, params: Vec<Reg>) -> Self {
        self.params = params;
        self
    }

    /// Place an instruction at a fixed node id, growing the arena as needed
    pub fn node(mut self, id: u32, instr: Instruction) -> Self {
        let idx = id as usize;
        if self.nodes.len() <= idx {
            self.nodes.resize(idx + 1, None);
        }
        self.nodes[idx] = Some(instr);
        self
    }

    /// Reserve an empty slot (an edge target without instruction)
    pub fn empty(mut self, id: u32) -> Self {
        let idx = id as usize;
        if self.nodes.len() <= idx {
            self.nodes.resize(idx + 1, None);
        }
        self
    }

    pub fn build(self) -> Function {
        Function {
            name: self.name,
            entry: self.entry,
            params: self.params,
            nodes: self.nodes,
        }
    }
}

/// Whole compilation unit
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub globals: Vec<GlobalDef>,
    pub functions: Vec<Function>,
}

/// Registers dead immediately after each node, as computed by a liveness pass
#[derive(Debug, Clone, Default)]
pub struct DeadRegisters {
    dead: FxHashMap<NodeId, FxHashSet<Reg>>,
}

impl DeadRegisters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_dead(&mut self, node: NodeId, regs: impl IntoIterator<Item = Reg>) {
        self.dead.entry(node).or_default().extend(regs);
    }

    pub fn dead_after(&self, node: NodeId) -> Option<&FxHashSet<Reg>> {
        self.dead.get(&node)
    }
}
