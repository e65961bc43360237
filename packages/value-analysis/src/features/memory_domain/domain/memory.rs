//! Partitioned abstract memory.
//!
//! ```text
//! Memory ::= Stack × Globals × NonStack × Top
//!
//! Stack    : BlockContent             the current frame only
//! Globals  : Symbol → BlockContent    globals with tracked contents
//! NonStack : AbstractPointer          every other block, collectively
//! Top      : AbstractPointer          NonStack ⊔ what escaped the frame
//! ```
//!
//! An untracked global reads from the read-only table when it is there, and
//! as `Ifptr(nonstack)` otherwise.

use rustc_hash::FxHashMap;

use super::block::BlockContent;
use crate::features::readonly_globals::ReadOnlyGlobals;
use crate::features::value_domain::{AbstractPointer, AbstractValue};
use crate::shared::models::{Chunk, Symbol};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbstractMemoryState {
    stack: BlockContent,
    globals: FxHashMap<Symbol, BlockContent>,
    nonstack: AbstractPointer,
    top: AbstractPointer,
}

impl AbstractMemoryState {
    /// Memory on entry to a function: a fresh empty frame, nothing known about
    /// the rest, and nothing pointing into the frame yet.
    pub fn function_entry() -> Self {
        Self {
            stack: BlockContent::new(AbstractPointer::Bottom),
            globals: FxHashMap::default(),
            nonstack: AbstractPointer::NonStack,
            top: AbstractPointer::NonStack,
        }
    }

    /// No knowledge about any block, the frame included
    pub fn top() -> Self {
        Self {
            stack: BlockContent::new(AbstractPointer::Top),
            globals: FxHashMap::default(),
            nonstack: AbstractPointer::Top,
            top: AbstractPointer::Top,
        }
    }

    pub fn stack(&self) -> &BlockContent {
        &self.stack
    }

    pub fn global(&self, symbol: Symbol) -> Option<&BlockContent> {
        self.globals.get(&symbol)
    }

    pub fn tracked_globals(&self) -> impl Iterator<Item = (Symbol, &BlockContent)> {
        self.globals.iter().map(|(s, b)| (*s, b))
    }

    pub fn nonstack(&self) -> AbstractPointer {
        self.nonstack
    }

    pub fn top_summary(&self) -> AbstractPointer {
        self.top
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Loads
    // ═══════════════════════════════════════════════════════════════════════

    /// Block holding the contents of `symbol`, if anything specific is known
    fn global_block<'a>(&'a self, symbol: Symbol, romem: &'a ReadOnlyGlobals) -> Option<&'a BlockContent> {
        self.globals.get(&symbol).or_else(|| romem.get(symbol))
    }

    pub fn load(&self, chunk: Chunk, addr: AbstractPointer, romem: &ReadOnlyGlobals) -> AbstractValue {
        use AbstractPointer::*;
        match addr {
            Bottom => AbstractValue::Bottom,
            StackAt(ofs) => self.stack.load(chunk, ofs),
            AnyStack => self.stack.load_anywhere(chunk),
            GlobalAt(s, ofs) => match self.global_block(s, romem) {
                Some(block) => block.load(chunk, ofs),
                None => AbstractValue::ifptr(self.nonstack).normalize(chunk),
            },
            AnyOffsetOf(s) => match self.global_block(s, romem) {
                Some(block) => block.load_anywhere(chunk),
                None => AbstractValue::ifptr(self.nonstack).normalize(chunk),
            },
            AnyGlobal | NonStack => AbstractValue::ifptr(self.nonstack).normalize(chunk),
            Top => AbstractValue::ifptr(self.top).normalize(chunk),
        }
    }

    /// Provenance of any byte readable through `addr`
    pub fn load_bytes(&self, addr: AbstractPointer, romem: &ReadOnlyGlobals) -> AbstractPointer {
        use AbstractPointer::*;
        match addr {
            Bottom => Bottom,
            StackAt(_) | AnyStack => self.stack.summary(),
            GlobalAt(s, _) | AnyOffsetOf(s) => self
                .global_block(s, romem)
                .map_or(self.nonstack, BlockContent::summary),
            AnyGlobal | NonStack => self.nonstack,
            Top => self.top,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Stores
    // ═══════════════════════════════════════════════════════════════════════

    /// Write something with provenance `prov` through `addr`.
    ///
    /// `exact` performs the update when the address names a single location
    /// of a single block. Every other class forgets the contents it may reach.
    fn write(
        &mut self,
        addr: AbstractPointer,
        prov: AbstractPointer,
        exact: impl FnOnce(&mut BlockContent, i64),
    ) {
        use AbstractPointer::*;
        match addr {
            Bottom => return,
            StackAt(ofs) => exact(&mut self.stack, ofs),
            AnyStack => self.stack.store_anywhere(prov),
            GlobalAt(s, ofs) => {
                let nonstack = self.nonstack;
                let block = self
                    .globals
                    .entry(s)
                    .or_insert_with(|| BlockContent::new(nonstack));
                exact(block, ofs);
                self.nonstack = self.nonstack.join(&prov);
            }
            AnyOffsetOf(s) => {
                let nonstack = self.nonstack;
                self.globals
                    .entry(s)
                    .or_insert_with(|| BlockContent::new(nonstack))
                    .store_anywhere(prov);
                self.nonstack = self.nonstack.join(&prov);
            }
            AnyGlobal | NonStack => {
                self.globals.clear();
                self.nonstack = self.nonstack.join(&prov);
            }
            Top => {
                self.stack.store_anywhere(prov);
                self.globals.clear();
                self.nonstack = Top;
                self.top = Top;
                return;
            }
        }
        self.top = self.top.join(&prov);
    }

    pub fn store(&mut self, chunk: Chunk, addr: AbstractPointer, value: AbstractValue) {
        self.write(addr, value.provenance(), |block, ofs| block.store(chunk, ofs, value));
    }

    /// Overwrite `size` bytes at `addr` with unknown bytes of provenance `prov`
    pub fn store_bytes(&mut self, addr: AbstractPointer, size: i64, prov: AbstractPointer) {
        self.write(addr, prov, |block, ofs| block.invalidate(ofs, size, prov));
    }

    /// Copy `size` bytes from `src` to `dst`.
    ///
    /// Tracked cells are carried over when both ends are exact locations;
    /// otherwise the destination just receives the source's provenance.
    pub fn copy(
        &mut self,
        dst: AbstractPointer,
        src: AbstractPointer,
        size: i64,
        romem: &ReadOnlyGlobals,
    ) {
        let prov = self.load_bytes(src, romem);
        let cells = match src {
            AbstractPointer::StackAt(ofs) => self.stack.cells_within(ofs, size),
            AbstractPointer::GlobalAt(s, ofs) => self
                .global_block(s, romem)
                .map(|block| block.cells_within(ofs, size))
                .unwrap_or_default(),
            _ => Vec::new(),
        };
        self.write(dst, prov, |block, ofs| {
            block.invalidate(ofs, size, prov);
            // a cell past the end of the offset range stays covered by the summary
            for (rel, cell) in cells {
                if let Some(target) = ofs.checked_add(rel) {
                    block.store(cell.chunk, target, cell.value);
                }
            }
        });
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Lattice
    // ═══════════════════════════════════════════════════════════════════════

    /// Globals tracked on only one side fall back to the (joined) summary
    pub fn join(&self, other: &Self) -> Self {
        let globals = self
            .globals
            .iter()
            .filter_map(|(s, a)| other.globals.get(s).map(|b| (*s, a.join(b))))
            .collect();
        Self {
            stack: self.stack.join(&other.stack),
            globals,
            nonstack: self.nonstack.join(&other.nonstack),
            top: self.top.join(&other.top),
        }
    }

    pub fn le(&self, other: &Self) -> bool {
        self.join(other) == *other
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Call boundaries
    // ═══════════════════════════════════════════════════════════════════════

    /// Memory after a call that may have seen the current frame
    pub fn after_public_call(&self) -> Self {
        Self::top()
    }

    /// Memory after a call that provably could not reach the current frame
    pub fn after_private_call(&self) -> Self {
        let escaped = self.stack.summary().join(&AbstractPointer::NonStack);
        Self {
            stack: self.stack.clone(),
            globals: FxHashMap::default(),
            nonstack: escaped,
            top: escaped,
        }
    }
}

impl Default for AbstractMemoryState {
    fn default() -> Self {
        Self::function_entry()
    }
}
