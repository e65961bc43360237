//! Global variable definitions as supplied by the front end.

use super::ids::Symbol;
use serde::{Deserialize, Serialize};

/// One initializer item, laid out left to right from offset 0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InitData {
    Int8(i32),
    Int16(i32),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    /// Zero-filled padding of the given byte length
    Space(i64),
    /// Address of a symbol plus byte offset
    AddrOf(Symbol, i64),
}

impl InitData {
    /// Byte length occupied by this item
    pub fn size(&self) -> i64 {
        match self {
            InitData::Int8(_) => 1,
            InitData::Int16(_) => 2,
            InitData::Int32(_) | InitData::Float32(_) => 4,
            InitData::Int64(_) | InitData::Float64(_) | InitData::AddrOf(..) => 8,
            InitData::Space(n) => (*n).max(0),
        }
    }
}

/// Global variable definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalDef {
    pub symbol: Symbol,
    pub name: String,
    pub readonly: bool,
    pub volatile: bool,
    /// Empty for an external declaration
    pub init: Vec<InitData>,
}

impl GlobalDef {
    pub fn new(symbol: Symbol, name: impl Into<String>) -> Self {
        Self {
            symbol,
            name: name.into(),
            readonly: false,
            volatile: false,
            init: Vec::new(),
        }
    }

    pub fn readonly(mut self, v: bool) -> Self {
        self.readonly = v;
        self
    }

    pub fn volatile(mut self, v: bool) -> Self {
        self.volatile = v;
        self
    }

    pub fn with_init(mut self, init: Vec<InitData>) -> Self {
        self.init = init;
        self
    }

    /// The initializer fixes the content for the whole program: it is neither
    /// an external declaration nor a lone size placeholder that another unit
    /// may define.
    pub fn has_definitive_initializer(&self) -> bool {
        !matches!(self.init.as_slice(), [] | [InitData::Space(_)])
    }

    /// Total byte size of the initializer, `None` when it does not fit in `i64`
    pub fn init_size(&self) -> Option<i64> {
        self.init
            .iter()
            .try_fold(0i64, |total, item| total.checked_add(item.size()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definitive_initializer() {
        let g = GlobalDef::new(Symbol(1), "g");
        assert!(!g.has_definitive_initializer());

        let g = g.with_init(vec![InitData::Space(16)]);
        assert!(!g.has_definitive_initializer());

        let g = g.with_init(vec![InitData::Int32(1), InitData::Space(4)]);
        assert!(g.has_definitive_initializer());
        assert_eq!(g.init_size(), Some(8));

        let g = g.with_init(vec![InitData::Space(i64::MAX), InitData::Int8(0)]);
        assert_eq!(g.init_size(), None);
    }
}
