//! Abstract pointers: which block(s) and offset(s) a pointer may reference.
//!
//! ```text
//!                      Top
//!                    /     \
//!              NonStack     AnyStack
//!                 |            |
//!             AnyGlobal     StackAt(ofs)
//!                 |            \
//!           AnyOffsetOf(s)      \
//!                 |              \
//!          GlobalAt(s, ofs)       |
//!                    \           /
//!                       Bottom
//! ```
//!
//! Exact facts about the same base collapse to the offset-widened fact for
//! that base; facts about different bases collapse to the lowest common
//! class. The stack side and the non-stack side only meet at `Top`.

use crate::shared::lattice::Lattice;
use crate::shared::models::Symbol;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbstractPointer {
    /// No pointer at all
    Bottom,
    /// Current stack frame at a known byte offset
    StackAt(i64),
    /// Global symbol at a known byte offset
    GlobalAt(Symbol, i64),
    /// Current stack frame, unknown offset
    AnyStack,
    /// Global symbol, unknown offset
    AnyOffsetOf(Symbol),
    /// Any global symbol
    AnyGlobal,
    /// Any block except the current stack frame
    NonStack,
    /// Any block
    Top,
}

use AbstractPointer::*;

impl AbstractPointer {
    pub fn join(&self, other: &Self) -> Self {
        match (*self, *other) {
            (Bottom, p) | (p, Bottom) => p,
            (Top, _) | (_, Top) => Top,
            (StackAt(a), StackAt(b)) => {
                if a == b {
                    StackAt(a)
                } else {
                    AnyStack
                }
            }
            (StackAt(_) | AnyStack, StackAt(_) | AnyStack) => AnyStack,
            (StackAt(_) | AnyStack, _) | (_, StackAt(_) | AnyStack) => Top,
            (GlobalAt(s, a), GlobalAt(t, b)) => {
                if s != t {
                    AnyGlobal
                } else if a == b {
                    GlobalAt(s, a)
                } else {
                    AnyOffsetOf(s)
                }
            }
            (GlobalAt(s, _) | AnyOffsetOf(s), GlobalAt(t, _) | AnyOffsetOf(t)) => {
                if s == t {
                    AnyOffsetOf(s)
                } else {
                    AnyGlobal
                }
            }
            (NonStack, _) | (_, NonStack) => NonStack,
            _ => AnyGlobal,
        }
    }

    /// `self ⊑ other`
    pub fn le(&self, other: &Self) -> bool {
        match (self, other) {
            (Bottom, _) | (_, Top) => true,
            (StackAt(a), StackAt(b)) => a == b,
            (StackAt(_) | AnyStack, AnyStack) => true,
            (GlobalAt(s, a), GlobalAt(t, b)) => s == t && a == b,
            (GlobalAt(s, _) | AnyOffsetOf(s), AnyOffsetOf(t)) => s == t,
            (GlobalAt(..) | AnyOffsetOf(_) | AnyGlobal, AnyGlobal) => true,
            (GlobalAt(..) | AnyOffsetOf(_) | AnyGlobal | NonStack, NonStack) => true,
            _ => false,
        }
    }

    pub fn is_bottom(&self) -> bool {
        matches!(self, Bottom)
    }

    /// Single known location
    pub fn is_exact(&self) -> bool {
        matches!(self, StackAt(_) | GlobalAt(..))
    }

    /// The pointer cannot reference the current stack frame
    pub fn excludes_stack(&self) -> bool {
        self.le(&NonStack)
    }

    /// Forget the offset, keep the base
    pub fn widen(&self) -> Self {
        match *self {
            StackAt(_) => AnyStack,
            GlobalAt(s, _) => AnyOffsetOf(s),
            p => p,
        }
    }

    /// Move an exact pointer by a known byte delta
    pub fn shift(&self, delta: i64) -> Self {
        match *self {
            StackAt(o) => StackAt(o.wrapping_add(delta)),
            GlobalAt(s, o) => GlobalAt(s, o.wrapping_add(delta)),
            p => p,
        }
    }

    /// The two pointers can never denote the same address
    pub fn disjoint(&self, other: &Self) -> bool {
        match (*self, *other) {
            (Bottom, _) | (_, Bottom) => true,
            (StackAt(a), StackAt(b)) => a != b,
            (StackAt(_) | AnyStack, GlobalAt(..) | AnyOffsetOf(_) | AnyGlobal | NonStack)
            | (GlobalAt(..) | AnyOffsetOf(_) | AnyGlobal | NonStack, StackAt(_) | AnyStack) => {
                true
            }
            (GlobalAt(s, a), GlobalAt(t, b)) => s != t || a != b,
            (GlobalAt(s, _) | AnyOffsetOf(s), GlobalAt(t, _) | AnyOffsetOf(t)) => s != t,
            _ => false,
        }
    }
}

impl Lattice for AbstractPointer {
    fn bottom() -> Self {
        Bottom
    }

    fn top() -> Self {
        Top
    }

    fn join(&self, other: &Self) -> Self {
        AbstractPointer::join(self, other)
    }

    fn le(&self, other: &Self) -> bool {
        AbstractPointer::le(self, other)
    }
}

impl Default for AbstractPointer {
    fn default() -> Self {
        Bottom
    }
}

impl fmt::Display for AbstractPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bottom => write!(f, "⊥_p"),
            StackAt(o) => write!(f, "stack+{}", o),
            GlobalAt(s, o) => write!(f, "{}+{}", s, o),
            AnyStack => write!(f, "stack+?"),
            AnyOffsetOf(s) => write!(f, "{}+?", s),
            AnyGlobal => write!(f, "glob"),
            NonStack => write!(f, "nonstack"),
            Top => write!(f, "⊤_p"),
        }
    }
}
