use std::fmt;

use rustc_hash::FxHashMap;

use crate::features::value_domain::{AbstractPointer, AbstractValue};
use crate::shared::models::Reg;

/// Total map from registers to abstract values.
///
/// Registers without an entry hold `unmapped`, which is Bottom (never
/// written) or Top (after a state of no knowledge). Entries equal to
/// `unmapped` are never stored, so derived equality is structural.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterFile {
    values: FxHashMap<Reg, AbstractValue>,
    unmapped: AbstractValue,
}

impl RegisterFile {
    /// Every register Bottom
    pub fn new() -> Self {
        Self {
            values: FxHashMap::default(),
            unmapped: AbstractValue::Bottom,
        }
    }

    /// Every register Top
    pub fn top() -> Self {
        Self {
            values: FxHashMap::default(),
            unmapped: AbstractValue::Top,
        }
    }

    /// Registers on function entry: parameters may be any number or any
    /// pointer not into the new frame.
    pub fn entry(params: &[Reg]) -> Self {
        let mut regs = Self::new();
        for p in params {
            regs.set(*p, AbstractValue::Ifptr(AbstractPointer::NonStack));
        }
        regs
    }

    pub fn get(&self, reg: Reg) -> AbstractValue {
        self.values.get(&reg).copied().unwrap_or(self.unmapped)
    }

    pub fn get_all(&self, regs: &[Reg]) -> Vec<AbstractValue> {
        regs.iter().map(|r| self.get(*r)).collect()
    }

    pub fn set(&mut self, reg: Reg, value: AbstractValue) {
        if value == self.unmapped {
            self.values.remove(&reg);
        } else {
            self.values.insert(reg, value);
        }
    }

    /// Forget the given registers (they become Bottom)
    pub fn kill<'a>(&mut self, regs: impl IntoIterator<Item = &'a Reg>) {
        for r in regs {
            self.set(*r, AbstractValue::Bottom);
        }
    }

    pub fn join(&self, other: &Self) -> Self {
        let mut out = Self {
            values: FxHashMap::default(),
            unmapped: self.unmapped.join(&other.unmapped),
        };
        for reg in self.values.keys().chain(other.values.keys()) {
            out.set(*reg, self.get(*reg).join(&other.get(*reg)));
        }
        out
    }

    pub fn le(&self, other: &Self) -> bool {
        self.join(other) == *other
    }

    /// Registers holding something other than the default
    pub fn mapped(&self) -> impl Iterator<Item = (Reg, AbstractValue)> + '_ {
        self.values.iter().map(|(r, v)| (*r, *v))
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RegisterFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut regs: Vec<_> = self.mapped().collect();
        regs.sort_by_key(|(r, _)| *r);
        write!(f, "{{")?;
        for (i, (r, v)) in regs.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", r, v)?;
        }
        write!(f, "; else {}}}", self.unmapped)
    }
}
