//! Abstract contents of a single memory block.
//!
//! ```text
//! BlockContent ::= Cells × Summary
//!
//! Cells   = offset → (chunk, value)     exact knowledge, non-overlapping
//! Summary = AbstractPointer             upper bound on the provenance of
//!                                       every byte in the block
//! ```
//!
//! A byte not covered by a cell reads as `Ifptr(summary)`: some number, or a
//! pointer no less precise than the summary.

use std::collections::BTreeMap;

use crate::features::value_domain::{AbstractPointer, AbstractValue};
use crate::shared::models::Chunk;

/// One tracked memory cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub chunk: Chunk,
    pub value: AbstractValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockContent {
    cells: BTreeMap<i64, Cell>,
    summary: AbstractPointer,
}

impl BlockContent {
    /// A block with no tracked cells whose bytes all read as `Ifptr(summary)`
    pub fn new(summary: AbstractPointer) -> Self {
        Self {
            cells: BTreeMap::new(),
            summary,
        }
    }

    pub fn summary(&self) -> AbstractPointer {
        self.summary
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn cell(&self, ofs: i64) -> Option<&Cell> {
        self.cells.get(&ofs)
    }

    pub fn cells(&self) -> impl Iterator<Item = (i64, &Cell)> {
        self.cells.iter().map(|(ofs, c)| (*ofs, c))
    }

    fn unknown(&self, chunk: Chunk) -> AbstractValue {
        AbstractValue::ifptr(self.summary).normalize(chunk)
    }

    /// Read `chunk` at a known offset.
    ///
    /// Only a cell written at exactly this offset with the same width is
    /// trusted; any other overlap falls back to the summary.
    pub fn load(&self, chunk: Chunk, ofs: i64) -> AbstractValue {
        match self.cells.get(&ofs) {
            Some(cell) if cell.chunk.size() == chunk.size() => cell.value.normalize(chunk),
            _ => self.unknown(chunk),
        }
    }

    /// Read `chunk` at an unknown offset
    pub fn load_anywhere(&self, chunk: Chunk) -> AbstractValue {
        self.unknown(chunk)
    }

    /// Strong update of the cell at `ofs`
    pub fn store(&mut self, chunk: Chunk, ofs: i64, value: AbstractValue) {
        self.invalidate(ofs, chunk.size(), value.provenance());
        self.cells.insert(
            ofs,
            Cell {
                chunk,
                value: value.normalize(chunk),
            },
        );
    }

    /// Store at an unknown offset: any cell may be partially overwritten, so
    /// all of them are forgotten.
    pub fn store_anywhere(&mut self, prov: AbstractPointer) {
        self.cells.clear();
        self.summary = self.summary.join(&prov);
    }

    /// Forget every cell overlapping `[ofs, ofs + size)`
    pub fn invalidate(&mut self, ofs: i64, size: i64, prov: AbstractPointer) {
        let lo = ofs.saturating_sub(Chunk::MAX_SIZE - 1);
        let hi = ofs.saturating_add(size);
        let doomed: Vec<i64> = self
            .cells
            .range(lo..hi)
            .filter(|(start, cell)| start.saturating_add(cell.chunk.size()) > ofs)
            .map(|(start, _)| *start)
            .collect();
        for start in doomed {
            self.cells.remove(&start);
        }
        self.summary = self.summary.join(&prov);
    }

    /// Cells lying entirely inside `[ofs, ofs + size)`, keyed relative to `ofs`
    pub fn cells_within(&self, ofs: i64, size: i64) -> Vec<(i64, Cell)> {
        let end = ofs.saturating_add(size);
        self.cells
            .range(ofs..end)
            .filter(|(start, cell)| start.saturating_add(cell.chunk.size()) <= end)
            .map(|(start, cell)| (start - ofs, *cell))
            .collect()
    }

    /// Least upper bound. Cells survive only when both sides agree on their
    /// offset and width.
    pub fn join(&self, other: &Self) -> Self {
        let cells = self
            .cells
            .iter()
            .filter_map(|(ofs, a)| {
                let b = other.cells.get(ofs)?;
                (a.chunk == b.chunk).then(|| {
                    (
                        *ofs,
                        Cell {
                            chunk: a.chunk,
                            value: a.value.join(&b.value),
                        },
                    )
                })
            })
            .collect();
        Self {
            cells,
            summary: self.summary.join(&other.summary),
        }
    }

    pub fn le(&self, other: &Self) -> bool {
        self.join(other) == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::value_domain::NumKind;
    use crate::shared::models::Symbol;
    use AbstractValue::*;

    #[test]
    fn test_strong_store_then_load() {
        let mut b = BlockContent::new(AbstractPointer::Bottom);
        b.store(Chunk::Int32, 8, Int(42));
        assert_eq!(b.load(Chunk::Int32, 8), Int(42));
        assert_eq!(b.load(Chunk::Int32, 12), Num(NumKind::Int));
    }

    #[test]
    fn test_width_mismatch_falls_back_to_summary() {
        let mut b = BlockContent::new(AbstractPointer::Bottom);
        b.store(Chunk::Int32, 0, Int(-1));
        assert_eq!(b.load(Chunk::Int8Signed, 0), Num(NumKind::Int));
        assert_eq!(b.load(Chunk::Float32, 0), Num(NumKind::Single));
    }

    #[test]
    fn test_overlapping_store_evicts() {
        let mut b = BlockContent::new(AbstractPointer::Bottom);
        b.store(Chunk::Int64, 0, Long(7));
        b.store(Chunk::Int32, 8, Int(1));
        b.store(Chunk::Int32, 4, Int(9));
        assert!(b.cell(0).is_none());
        assert_eq!(b.load(Chunk::Int32, 8), Int(1));
        assert_eq!(b.load(Chunk::Int32, 4), Int(9));
    }

    #[test]
    fn test_store_anywhere_forgets_cells() {
        let g = AbstractPointer::GlobalAt(Symbol(1), 0);
        let mut b = BlockContent::new(AbstractPointer::Bottom);
        b.store(Chunk::Int32, 0, Int(1));
        b.store_anywhere(g);
        assert_eq!(b.cell_count(), 0);
        assert_eq!(b.summary(), g);
        assert_eq!(b.load(Chunk::Int64, 0), Ifptr(g));
    }

    #[test]
    fn test_summary_tracks_stored_pointers() {
        let mut b = BlockContent::new(AbstractPointer::Bottom);
        b.store(Chunk::Int64, 0, Ptr(AbstractPointer::StackAt(16)));
        assert_eq!(b.summary(), AbstractPointer::StackAt(16));
        assert_eq!(b.load(Chunk::Int64, 0), Ptr(AbstractPointer::StackAt(16)));
    }

    #[test]
    fn test_join_keeps_agreeing_cells() {
        let mut a = BlockContent::new(AbstractPointer::Bottom);
        let mut b = BlockContent::new(AbstractPointer::Bottom);
        a.store(Chunk::Int32, 0, Int(1));
        b.store(Chunk::Int32, 0, Int(2));
        a.store(Chunk::Int32, 4, Int(3));
        b.store(Chunk::Float32, 4, AbstractValue::single(1.0));

        let j = a.join(&b);
        assert_eq!(j.load(Chunk::Int32, 0), Num(NumKind::Int));
        assert!(j.cell(4).is_none());
        assert!(a.le(&j));
        assert!(b.le(&j));
    }

    #[test]
    fn test_cells_within() {
        let mut b = BlockContent::new(AbstractPointer::Bottom);
        b.store(Chunk::Int32, 0, Int(1));
        b.store(Chunk::Int32, 4, Int(2));
        b.store(Chunk::Int32, 8, Int(3));
        let inside = b.cells_within(4, 6);
        assert_eq!(inside.len(), 1);
        assert_eq!(inside[0].0, 0);
        assert_eq!(inside[0].1.value, Int(2));
    }
}
