use rustc_hash::FxHashMap;

use crate::features::memory_domain::BlockContent;
use crate::shared::models::Symbol;

/// Frozen contents of the read-only globals of a program.
///
/// Absence of a symbol only means "not tracked".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadOnlyGlobals {
    blocks: FxHashMap<Symbol, BlockContent>,
}

impl ReadOnlyGlobals {
    pub(crate) fn from_blocks(blocks: FxHashMap<Symbol, BlockContent>) -> Self {
        Self { blocks }
    }

    pub fn get(&self, symbol: Symbol) -> Option<&BlockContent> {
        self.blocks.get(&symbol)
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        self.blocks.contains_key(&symbol)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.blocks.keys().copied()
    }
}
