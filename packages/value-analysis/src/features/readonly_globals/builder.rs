//! Folding global initializers into block contents.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use super::table::ReadOnlyGlobals;
use crate::config::ReadOnlyConfig;
use crate::errors::{AnalysisError, Result};
use crate::features::memory_domain::BlockContent;
use crate::features::value_domain::{AbstractPointer, AbstractValue, NumKind};
use crate::shared::models::{Chunk, GlobalDef, InitData};

/// Build the table from every global definition of the program.
///
/// A global is tracked when it is read-only, not volatile, and its
/// initializer is definitive. Initializer lists are checked for every
/// global, tracked or not.
pub fn build_readonly_globals(defs: &[GlobalDef], config: &ReadOnlyConfig) -> Result<ReadOnlyGlobals> {
    let mut seen = FxHashSet::default();
    let mut blocks = FxHashMap::default();

    for def in defs {
        if !seen.insert(def.symbol) {
            return Err(AnalysisError::malformed(def.symbol, "symbol defined twice"));
        }
        check_initializer(def)?;

        if !def.readonly {
            debug!(symbol = %def.symbol, name = %def.name, "skipping writable global");
            continue;
        }
        if def.volatile {
            debug!(symbol = %def.symbol, name = %def.name, "skipping volatile global");
            continue;
        }
        if !def.has_definitive_initializer() {
            debug!(symbol = %def.symbol, name = %def.name, "skipping global without definitive initializer");
            continue;
        }

        blocks.insert(def.symbol, fold_initializer(&def.init, config));
    }

    debug!(tracked = blocks.len(), total = defs.len(), "read-only global table built");
    Ok(ReadOnlyGlobals::from_blocks(blocks))
}

/// Padding must be non-negative and the laid-out items must fit in `i64`,
/// so folding can advance the offset without overflow.
fn check_initializer(def: &GlobalDef) -> Result<()> {
    for item in &def.init {
        if let InitData::Space(n) = item {
            if *n < 0 {
                return Err(AnalysisError::malformed(def.symbol, format!("negative space {}", n)));
            }
        }
    }
    if def.init_size().is_none() {
        return Err(AnalysisError::malformed(def.symbol, "initializer size overflows"));
    }
    Ok(())
}

fn fold_initializer(init: &[InitData], config: &ReadOnlyConfig) -> BlockContent {
    let mut block = BlockContent::new(AbstractPointer::Bottom);
    let mut ofs = 0i64;
    for item in init {
        let stored = match *item {
            InitData::Int8(n) => Some((Chunk::Int8Unsigned, AbstractValue::Int(n))),
            InitData::Int16(n) => Some((Chunk::Int16Unsigned, AbstractValue::Int(n))),
            InitData::Int32(n) => Some((Chunk::Int32, AbstractValue::Int(n))),
            InitData::Int64(n) => Some((Chunk::Int64, AbstractValue::Long(n))),
            InitData::Float32(f) if config.propagate_float_constants => {
                Some((Chunk::Float32, AbstractValue::single(f)))
            }
            InitData::Float32(_) => Some((Chunk::Float32, AbstractValue::Num(NumKind::Single))),
            InitData::Float64(f) if config.propagate_float_constants => {
                Some((Chunk::Float64, AbstractValue::float(f)))
            }
            InitData::Float64(_) => Some((Chunk::Float64, AbstractValue::Num(NumKind::Float))),
            InitData::AddrOf(s, o) => Some((Chunk::PTR, AbstractValue::Ptr(AbstractPointer::GlobalAt(s, o)))),
            InitData::Space(_) => None,
        };
        if let Some((chunk, value)) = stored {
            block.store(chunk, ofs, value);
        }
        ofs += item.size();
    }
    block
}
