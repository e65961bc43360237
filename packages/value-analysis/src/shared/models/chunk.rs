//! Memory access widths ("chunks")

use serde::{Deserialize, Serialize};

/// Width and interpretation of a single memory access
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Chunk {
    Int8Signed,
    Int8Unsigned,
    Int16Signed,
    Int16Unsigned,
    Int32,
    Int64,
    Float32,
    Float64,
    /// 32-bit access of any type
    Any32,
    /// 64-bit access of any type (pointers included)
    Any64,
}

impl Chunk {
    /// Pointer-sized access on the 64-bit targets this analysis models
    pub const PTR: Chunk = Chunk::Int64;

    /// Number of bytes accessed
    pub fn size(self) -> i64 {
        match self {
            Chunk::Int8Signed | Chunk::Int8Unsigned => 1,
            Chunk::Int16Signed | Chunk::Int16Unsigned => 2,
            Chunk::Int32 | Chunk::Float32 | Chunk::Any32 => 4,
            Chunk::Int64 | Chunk::Float64 | Chunk::Any64 => 8,
        }
    }

    /// Integer chunk of the given byte width, if any
    pub fn int_of_size(size: i64) -> Option<Chunk> {
        match size {
            1 => Some(Chunk::Int8Unsigned),
            2 => Some(Chunk::Int16Unsigned),
            4 => Some(Chunk::Int32),
            8 => Some(Chunk::Int64),
            _ => None,
        }
    }

    /// Largest width of any chunk, used to find cells overlapping an access
    pub const MAX_SIZE: i64 = 8;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizes() {
        assert_eq!(Chunk::Int8Signed.size(), 1);
        assert_eq!(Chunk::Int16Unsigned.size(), 2);
        assert_eq!(Chunk::Any32.size(), 4);
        assert_eq!(Chunk::PTR.size(), 8);
    }

    #[test]
    fn test_int_of_size() {
        assert_eq!(Chunk::int_of_size(4), Some(Chunk::Int32));
        assert_eq!(Chunk::int_of_size(3), None);
    }
}
