//! Abstract values held by registers and memory cells.

use super::pointer::AbstractPointer;
use crate::shared::lattice::Lattice;
use crate::shared::models::Chunk;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar kind, used to keep the width of an unknown number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumKind {
    Int,
    Long,
    Single,
    Float,
}

/// Abstract value lattice.
///
/// Float constants are kept as bit patterns so that equality (and therefore
/// fixpoint detection) is reflexive for NaNs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbstractValue {
    Bottom,
    Int(i32),
    Long(i64),
    /// `f32` bit pattern
    Single(u32),
    /// `f64` bit pattern
    Float(u64),
    /// Unknown number of the given kind
    Num(NumKind),
    /// Definitely a pointer of the given class
    Ptr(AbstractPointer),
    /// A number, or a pointer of the given class
    Ifptr(AbstractPointer),
    Top,
}

use AbstractValue::*;

impl AbstractValue {
    pub fn single(f: f32) -> Self {
        Single(f.to_bits())
    }

    pub fn float(f: f64) -> Self {
        Float(f.to_bits())
    }

    /// `Ptr`, canonicalising the empty pointer set to `Bottom`
    pub fn ptr(p: AbstractPointer) -> Self {
        if p.is_bottom() {
            Bottom
        } else {
            Ptr(p)
        }
    }

    /// `Ifptr`, canonicalising "number or any pointer" to `Top`
    pub fn ifptr(p: AbstractPointer) -> Self {
        if p == AbstractPointer::Top {
            Top
        } else {
            Ifptr(p)
        }
    }

    /// Some number of the given kind, or a number/pointer mix when `prov`
    /// says pointers may flow into it
    pub fn unknown(kind: NumKind, prov: AbstractPointer) -> Self {
        if prov.is_bottom() {
            Num(kind)
        } else {
            Self::ifptr(prov.widen())
        }
    }

    pub fn as_single(&self) -> Option<f32> {
        match self {
            Single(bits) => Some(f32::from_bits(*bits)),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Float(bits) => Some(f64::from_bits(*bits)),
            _ => None,
        }
    }

    pub fn is_bottom(&self) -> bool {
        matches!(self, Bottom)
    }

    /// Kind of a scalar value, `None` for pointers, Bottom and Top
    pub fn kind(&self) -> Option<NumKind> {
        match self {
            Int(_) | Num(NumKind::Int) => Some(NumKind::Int),
            Long(_) | Num(NumKind::Long) => Some(NumKind::Long),
            Single(_) | Num(NumKind::Single) => Some(NumKind::Single),
            Float(_) | Num(NumKind::Float) => Some(NumKind::Float),
            _ => None,
        }
    }

    /// Class of every pointer the value may be
    pub fn provenance(&self) -> AbstractPointer {
        match self {
            Ptr(p) | Ifptr(p) => *p,
            Top => AbstractPointer::Top,
            _ => AbstractPointer::Bottom,
        }
    }

    /// Pointer class to use when the value serves as a memory address.
    ///
    /// A value that cannot be a pointer yet is not Bottom (a plain number
    /// used as an address) resolves to nothing and is treated as `Top`.
    pub fn address_class(&self) -> AbstractPointer {
        match self {
            Bottom => AbstractPointer::Bottom,
            Ptr(p) => *p,
            v => {
                let p = v.provenance();
                if p.is_bottom() {
                    AbstractPointer::Top
                } else {
                    p
                }
            }
        }
    }

    pub fn join(&self, other: &Self) -> Self {
        match (*self, *other) {
            (Bottom, v) | (v, Bottom) => v,
            (Top, _) | (_, Top) => Top,
            (Ptr(p), Ptr(q)) => Ptr(p.join(&q)),
            (Ptr(p) | Ifptr(p), Ptr(q) | Ifptr(q)) => Self::ifptr(p.join(&q)),
            (Ptr(p) | Ifptr(p), _) | (_, Ptr(p) | Ifptr(p)) => Self::ifptr(p),
            (a, b) if a == b => a,
            (a, b) => match (a.kind(), b.kind()) {
                (Some(k1), Some(k2)) if k1 == k2 => Num(k1),
                _ => Ifptr(AbstractPointer::Bottom),
            },
        }
    }

    /// `self ⊑ other`
    pub fn le(&self, other: &Self) -> bool {
        self.join(other) == *other
    }

    /// The value as read back through `chunk`: truncated / sign-extended
    /// when known, degraded to an unknown of the chunk's width otherwise.
    pub fn normalize(&self, chunk: Chunk) -> Self {
        match chunk {
            Chunk::Int8Signed => self.int_cast(|n| n as i8 as i32),
            Chunk::Int8Unsigned => self.int_cast(|n| n as u8 as i32),
            Chunk::Int16Signed => self.int_cast(|n| n as i16 as i32),
            Chunk::Int16Unsigned => self.int_cast(|n| n as u16 as i32),
            Chunk::Int32 => self.int_cast(|n| n),
            Chunk::Int64 => match self {
                Ifptr(p) if p.is_bottom() => Num(NumKind::Long),
                Bottom | Top | Long(_) | Num(NumKind::Long) | Ptr(_) | Ifptr(_) => *self,
                _ => Num(NumKind::Long),
            },
            Chunk::Float32 => match self {
                Bottom | Single(_) | Num(NumKind::Single) => *self,
                _ => Num(NumKind::Single),
            },
            Chunk::Float64 => match self {
                Bottom | Float(_) | Num(NumKind::Float) => *self,
                _ => Num(NumKind::Float),
            },
            Chunk::Any32 => match self {
                Bottom | Top | Int(_) | Single(_) | Num(NumKind::Int) | Num(NumKind::Single) => {
                    *self
                }
                Ptr(p) | Ifptr(p) => Self::ifptr(p.widen()),
                _ => Ifptr(AbstractPointer::Bottom),
            },
            Chunk::Any64 => *self,
        }
    }

    fn int_cast(&self, f: impl Fn(i32) -> i32) -> Self {
        match self {
            Bottom | Top => *self,
            Int(n) => Int(f(*n)),
            Ptr(p) | Ifptr(p) if !p.is_bottom() => Self::ifptr(p.widen()),
            _ => Num(NumKind::Int),
        }
    }
}

impl Lattice for AbstractValue {
    fn bottom() -> Self {
        Bottom
    }

    fn top() -> Self {
        Top
    }

    fn join(&self, other: &Self) -> Self {
        AbstractValue::join(self, other)
    }

    fn le(&self, other: &Self) -> bool {
        AbstractValue::le(self, other)
    }
}

impl Default for AbstractValue {
    fn default() -> Self {
        Bottom
    }
}

impl fmt::Display for AbstractValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bottom => write!(f, "⊥"),
            Int(n) => write!(f, "{}_i", n),
            Long(n) => write!(f, "{}_l", n),
            Single(_) => write!(f, "{}_fs", self.as_single().unwrap_or_default()),
            Float(_) => write!(f, "{}_f", self.as_float().unwrap_or_default()),
            Num(k) => write!(f, "?{:?}", k),
            Ptr(p) => write!(f, "ptr({})", p),
            Ifptr(p) => write!(f, "num|ptr({})", p),
            Top => write!(f, "⊤"),
        }
    }
}
