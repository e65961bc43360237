//! Operators, conditions and addressing modes of the analysed IR.
//!
//! These are closed sets: the abstract evaluator in `value_domain` matches on
//! every variant.

use super::ids::Symbol;
use serde::{Deserialize, Serialize};

/// Pure register-to-register operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    /// `dest := arg0`
    Move,
    IntConst(i32),
    LongConst(i64),
    SingleConst(f32),
    FloatConst(f64),
    /// Address of a global symbol plus byte offset
    AddrSymbol(Symbol, i64),
    /// Address of the current stack frame plus byte offset
    AddrStack(i64),
    Unary(UnaryOp),
    Binary(BinaryOp),
    /// `dest := arg0 + imm` on 64-bit values (pointer arithmetic)
    AddImmLong(i64),
    /// Materialise a condition as 0 / 1
    Cmp(Condition),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    Neg,
    Not,
    Cast8Signed,
    Cast8Unsigned,
    Cast16Signed,
    Cast16Unsigned,
    Negl,
    Notl,
    Negf,
    Absf,
    Negfs,
    Absfs,
    LongOfInt,
    LongOfIntU,
    IntOfLong,
    FloatOfSingle,
    SingleOfFloat,
    IntOfFloat,
    FloatOfInt,
    LongOfFloat,
    FloatOfLong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    // 32-bit integers
    Add,
    Sub,
    Mul,
    Divs,
    Divu,
    Mods,
    Modu,
    And,
    Or,
    Xor,
    Shl,
    Shr,
    Shru,
    // 64-bit integers (and pointers)
    Addl,
    Subl,
    Mull,
    Divls,
    Divlu,
    Modls,
    Modlu,
    Andl,
    Orl,
    Xorl,
    Shll,
    Shrl,
    Shrlu,
    // 64-bit floats
    Addf,
    Subf,
    Mulf,
    Divf,
    // 32-bit floats
    Addfs,
    Subfs,
    Mulfs,
    Divfs,
}

/// Relational operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comparison {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Comparison {
    pub fn negate(self) -> Self {
        match self {
            Comparison::Eq => Comparison::Ne,
            Comparison::Ne => Comparison::Eq,
            Comparison::Lt => Comparison::Ge,
            Comparison::Le => Comparison::Gt,
            Comparison::Gt => Comparison::Le,
            Comparison::Ge => Comparison::Lt,
        }
    }

    pub fn holds<T: PartialOrd>(self, a: T, b: T) -> bool {
        match self {
            Comparison::Eq => a == b,
            Comparison::Ne => a != b,
            Comparison::Lt => a < b,
            Comparison::Le => a <= b,
            Comparison::Gt => a > b,
            Comparison::Ge => a >= b,
        }
    }
}

/// Branch / comparison condition over one or two registers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Condition {
    /// Signed 32-bit comparison of two registers
    Cmp(Comparison),
    /// Unsigned 32-bit comparison of two registers
    Cmpu(Comparison),
    /// Signed 32-bit comparison against an immediate
    CmpImm(Comparison, i32),
    /// Signed 64-bit comparison of two registers
    Cmpl(Comparison),
    /// Unsigned 64-bit comparison of two registers (pointer comparisons)
    Cmplu(Comparison),
    /// Unsigned 64-bit comparison against an immediate
    CmpluImm(Comparison, i64),
    /// 64-bit float comparison
    Cmpf(Comparison),
    /// Negated 64-bit float comparison (true on unordered)
    NotCmpf(Comparison),
    /// 32-bit float comparison
    Cmpfs(Comparison),
    /// `(arg0 & mask) == 0`
    MaskZero(i32),
    /// `(arg0 & mask) != 0`
    MaskNotZero(i32),
}

impl Condition {
    /// Number of register arguments the condition reads
    pub fn arity(&self) -> usize {
        match self {
            Condition::CmpImm(..)
            | Condition::CmpluImm(..)
            | Condition::MaskZero(_)
            | Condition::MaskNotZero(_) => 1,
            _ => 2,
        }
    }
}

/// Address computation of a load/store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Addressing {
    /// `arg0 + ofs`
    Indexed(i64),
    /// `arg0 + arg1`
    Indexed2,
    /// `&symbol + ofs`
    Global(Symbol, i64),
    /// `stack_pointer + ofs`
    Stack(i64),
}
