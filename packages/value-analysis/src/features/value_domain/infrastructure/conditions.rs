//! Abstract evaluation of branch conditions.

use crate::features::value_domain::domain::AbstractValue;
use crate::shared::models::{Comparison, Condition};

use AbstractValue::*;

/// Outcome of evaluating a condition over abstract arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbstractBool {
    /// Some argument is unreachable (Bottom); neither edge can be taken
    Contradiction,
    True,
    False,
    /// Either outcome possible
    Either,
}

impl AbstractBool {
    fn of(b: bool) -> Self {
        if b {
            AbstractBool::True
        } else {
            AbstractBool::False
        }
    }

    pub fn negate(self) -> Self {
        match self {
            AbstractBool::True => AbstractBool::False,
            AbstractBool::False => AbstractBool::True,
            other => other,
        }
    }

    pub fn may_be_true(self) -> bool {
        matches!(self, AbstractBool::True | AbstractBool::Either)
    }

    pub fn may_be_false(self) -> bool {
        matches!(self, AbstractBool::False | AbstractBool::Either)
    }
}

pub fn eval_condition(cond: &Condition, args: &[AbstractValue]) -> AbstractBool {
    let arg = |i: usize| args.get(i).copied().unwrap_or(Top);
    if (0..cond.arity()).any(|i| arg(i).is_bottom()) {
        return AbstractBool::Contradiction;
    }
    match *cond {
        Condition::Cmp(c) => match (arg(0), arg(1)) {
            (Int(x), Int(y)) => AbstractBool::of(c.holds(x, y)),
            _ => AbstractBool::Either,
        },
        Condition::Cmpu(c) => match (arg(0), arg(1)) {
            (Int(x), Int(y)) => AbstractBool::of(c.holds(x as u32, y as u32)),
            _ => AbstractBool::Either,
        },
        Condition::CmpImm(c, n) => match arg(0) {
            Int(x) => AbstractBool::of(c.holds(x, n)),
            _ => AbstractBool::Either,
        },
        Condition::Cmpl(c) => match (arg(0), arg(1)) {
            (Long(x), Long(y)) => AbstractBool::of(c.holds(x, y)),
            _ => AbstractBool::Either,
        },
        Condition::Cmplu(c) => unsigned_long(c, arg(0), arg(1)),
        Condition::CmpluImm(c, n) => unsigned_long(c, arg(0), Long(n)),
        Condition::Cmpf(c) => float_cmp(c, arg(0), arg(1)),
        Condition::NotCmpf(c) => float_cmp(c, arg(0), arg(1)).negate(),
        Condition::Cmpfs(c) => match (arg(0).as_single(), arg(1).as_single()) {
            (Some(x), Some(y)) => AbstractBool::of(c.holds(x, y)),
            _ => AbstractBool::Either,
        },
        Condition::MaskZero(m) => match arg(0) {
            Int(x) => AbstractBool::of(x & m == 0),
            _ => AbstractBool::Either,
        },
        Condition::MaskNotZero(m) => match arg(0) {
            Int(x) => AbstractBool::of(x & m != 0),
            _ => AbstractBool::Either,
        },
    }
}

/// Unsigned 64-bit compare. Equality between pointers that cannot alias,
/// or between a pointer and null, is decided.
fn unsigned_long(c: Comparison, a: AbstractValue, b: AbstractValue) -> AbstractBool {
    match (a, b) {
        (Long(x), Long(y)) => AbstractBool::of(c.holds(x as u64, y as u64)),
        (Ptr(p), Ptr(q)) if p.disjoint(&q) => pointer_inequality(c),
        (Ptr(_), Long(0)) | (Long(0), Ptr(_)) => pointer_inequality(c),
        _ => AbstractBool::Either,
    }
}

fn pointer_inequality(c: Comparison) -> AbstractBool {
    match c {
        Comparison::Eq => AbstractBool::False,
        Comparison::Ne => AbstractBool::True,
        _ => AbstractBool::Either,
    }
}

fn float_cmp(c: Comparison, a: AbstractValue, b: AbstractValue) -> AbstractBool {
    match (a.as_float(), b.as_float()) {
        (Some(x), Some(y)) => AbstractBool::of(c.holds(x, y)),
        _ => AbstractBool::Either,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::value_domain::domain::{AbstractPointer, NumKind};
    use crate::shared::models::Symbol;

    #[test]
    fn test_known_integers() {
        let c = Condition::Cmp(Comparison::Lt);
        assert_eq!(eval_condition(&c, &[Int(1), Int(2)]), AbstractBool::True);
        assert_eq!(eval_condition(&c, &[Int(2), Int(1)]), AbstractBool::False);
        let u = Condition::Cmpu(Comparison::Lt);
        assert_eq!(eval_condition(&u, &[Int(-1), Int(2)]), AbstractBool::False);
    }

    #[test]
    fn test_bottom_argument_is_contradiction() {
        let c = Condition::CmpImm(Comparison::Eq, 0);
        assert_eq!(eval_condition(&c, &[Bottom]), AbstractBool::Contradiction);
    }

    #[test]
    fn test_unknown_is_either() {
        let c = Condition::CmpImm(Comparison::Eq, 0);
        assert_eq!(eval_condition(&c, &[Num(NumKind::Int)]), AbstractBool::Either);
        assert_eq!(eval_condition(&c, &[]), AbstractBool::Either);
    }

    #[test]
    fn test_pointer_equality_folding() {
        let s = Ptr(AbstractPointer::StackAt(0));
        let g = Ptr(AbstractPointer::GlobalAt(Symbol(1), 0));
        let eq = Condition::Cmplu(Comparison::Eq);
        assert_eq!(eval_condition(&eq, &[s, g]), AbstractBool::False);
        assert_eq!(eval_condition(&eq, &[s, s]), AbstractBool::Either);

        let null = Condition::CmpluImm(Comparison::Ne, 0);
        assert_eq!(eval_condition(&null, &[g]), AbstractBool::True);
    }

    #[test]
    fn test_negated_float_compare() {
        let nan = AbstractValue::float(f64::NAN);
        let one = AbstractValue::float(1.0);
        assert_eq!(eval_condition(&Condition::Cmpf(Comparison::Lt), &[nan, one]), AbstractBool::False);
        assert_eq!(eval_condition(&Condition::NotCmpf(Comparison::Lt), &[nan, one]), AbstractBool::True);
    }

    #[test]
    fn test_mask() {
        assert_eq!(eval_condition(&Condition::MaskZero(4), &[Int(3)]), AbstractBool::True);
        assert_eq!(eval_condition(&Condition::MaskNotZero(4), &[Int(3)]), AbstractBool::False);
    }
}
