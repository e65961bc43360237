//! Abstract semantics of operations.
//!
//! All-known operands fold to the exact result. Pointer plus/minus a known
//! constant refines the pointer's offset. Everything else degrades to an
//! unknown of the result width that keeps whatever pointer provenance the
//! operands carried.

use super::conditions::{eval_condition, AbstractBool};
use crate::features::value_domain::domain::{AbstractPointer, AbstractValue, NumKind};
use crate::shared::models::{BinaryOp, Operation, UnaryOp};

use AbstractValue::*;

/// Evaluate `op` over already-evaluated argument values.
///
/// Missing arguments evaluate as Top.
pub fn eval_operation(op: &Operation, args: &[AbstractValue]) -> AbstractValue {
    let arg = |i: usize| args.get(i).copied().unwrap_or(Top);
    match op {
        Operation::Move => arg(0),
        Operation::IntConst(n) => Int(*n),
        Operation::LongConst(n) => Long(*n),
        Operation::SingleConst(f) => AbstractValue::single(*f),
        Operation::FloatConst(f) => AbstractValue::float(*f),
        Operation::AddrSymbol(s, ofs) => Ptr(AbstractPointer::GlobalAt(*s, *ofs)),
        Operation::AddrStack(ofs) => Ptr(AbstractPointer::StackAt(*ofs)),
        Operation::Unary(u) => eval_unary(*u, arg(0)),
        Operation::Binary(b) => eval_binary(*b, arg(0), arg(1)),
        Operation::AddImmLong(n) => add_offset(arg(0), Long(*n), NumKind::Long),
        Operation::Cmp(cond) => match eval_condition(cond, args) {
            AbstractBool::Contradiction => Bottom,
            AbstractBool::True => Int(1),
            AbstractBool::False => Int(0),
            AbstractBool::Either => Num(NumKind::Int),
        },
    }
}

pub fn eval_unary(op: UnaryOp, v: AbstractValue) -> AbstractValue {
    match op {
        UnaryOp::Neg => int_unop(v, |n| n.wrapping_neg()),
        UnaryOp::Not => int_unop(v, |n| !n),
        UnaryOp::Cast8Signed => int_unop(v, |n| n as i8 as i32),
        UnaryOp::Cast8Unsigned => int_unop(v, |n| n as u8 as i32),
        UnaryOp::Cast16Signed => int_unop(v, |n| n as i16 as i32),
        UnaryOp::Cast16Unsigned => int_unop(v, |n| n as u16 as i32),
        UnaryOp::Negl => long_unop(v, |n| n.wrapping_neg()),
        UnaryOp::Notl => long_unop(v, |n| !n),
        UnaryOp::Negf => float_unop(v, |x| -x),
        UnaryOp::Absf => float_unop(v, f64::abs),
        UnaryOp::Negfs => single_unop(v, |x| -x),
        UnaryOp::Absfs => single_unop(v, f32::abs),
        UnaryOp::LongOfInt => match v {
            Int(n) => Long(n as i64),
            _ => degrade(v, NumKind::Long),
        },
        UnaryOp::LongOfIntU => match v {
            Int(n) => Long(n as u32 as i64),
            _ => degrade(v, NumKind::Long),
        },
        UnaryOp::IntOfLong => match v {
            Long(n) => Int(n as i32),
            _ => degrade(v, NumKind::Int),
        },
        UnaryOp::FloatOfSingle => match v.as_single() {
            Some(x) => AbstractValue::float(x as f64),
            None => scalar_degrade(v, NumKind::Float),
        },
        UnaryOp::SingleOfFloat => match v.as_float() {
            Some(x) => AbstractValue::single(x as f32),
            None => scalar_degrade(v, NumKind::Single),
        },
        UnaryOp::IntOfFloat => match v.as_float() {
            Some(x) if x.is_finite() && x > i32::MIN as f64 - 1.0 && x < i32::MAX as f64 + 1.0 => {
                Int(x as i32)
            }
            _ => scalar_degrade(v, NumKind::Int),
        },
        UnaryOp::FloatOfInt => match v {
            Int(n) => AbstractValue::float(n as f64),
            _ => scalar_degrade(v, NumKind::Float),
        },
        UnaryOp::LongOfFloat => match v.as_float() {
            Some(x) if x.is_finite() && x >= -9.223_372_036_854_775_808e18 && x < 9.223_372_036_854_775_808e18 => {
                Long(x as i64)
            }
            _ => scalar_degrade(v, NumKind::Long),
        },
        UnaryOp::FloatOfLong => match v {
            Long(n) => AbstractValue::float(n as f64),
            _ => scalar_degrade(v, NumKind::Float),
        },
    }
}

pub fn eval_binary(op: BinaryOp, a: AbstractValue, b: AbstractValue) -> AbstractValue {
    match op {
        BinaryOp::Add => add_offset(a, b, NumKind::Int),
        BinaryOp::Sub => sub_offset(a, b, NumKind::Int),
        BinaryOp::Mul => int_binop(a, b, |x, y| Some(x.wrapping_mul(y))),
        BinaryOp::Divs => int_binop(a, b, |x, y| x.checked_div(y)),
        BinaryOp::Divu => int_binop(a, b, |x, y| (x as u32).checked_div(y as u32).map(|r| r as i32)),
        BinaryOp::Mods => int_binop(a, b, |x, y| x.checked_rem(y)),
        BinaryOp::Modu => int_binop(a, b, |x, y| (x as u32).checked_rem(y as u32).map(|r| r as i32)),
        BinaryOp::And => int_binop(a, b, |x, y| Some(x & y)),
        BinaryOp::Or => int_binop(a, b, |x, y| Some(x | y)),
        BinaryOp::Xor => int_binop(a, b, |x, y| Some(x ^ y)),
        BinaryOp::Shl => int_binop(a, b, |x, y| (y as u32).lt(&32).then(|| x << y)),
        BinaryOp::Shr => int_binop(a, b, |x, y| (y as u32).lt(&32).then(|| x >> y)),
        BinaryOp::Shru => int_binop(a, b, |x, y| (y as u32).lt(&32).then(|| ((x as u32) >> y) as i32)),
        BinaryOp::Addl => add_offset(a, b, NumKind::Long),
        BinaryOp::Subl => sub_offset(a, b, NumKind::Long),
        BinaryOp::Mull => long_binop(a, b, |x, y| Some(x.wrapping_mul(y))),
        BinaryOp::Divls => long_binop(a, b, |x, y| x.checked_div(y)),
        BinaryOp::Divlu => long_binop(a, b, |x, y| (x as u64).checked_div(y as u64).map(|r| r as i64)),
        BinaryOp::Modls => long_binop(a, b, |x, y| x.checked_rem(y)),
        BinaryOp::Modlu => long_binop(a, b, |x, y| (x as u64).checked_rem(y as u64).map(|r| r as i64)),
        BinaryOp::Andl => long_binop(a, b, |x, y| Some(x & y)),
        BinaryOp::Orl => long_binop(a, b, |x, y| Some(x | y)),
        BinaryOp::Xorl => long_binop(a, b, |x, y| Some(x ^ y)),
        BinaryOp::Shll => long_shift(a, b, |x, y| x << y),
        BinaryOp::Shrl => long_shift(a, b, |x, y| x >> y),
        BinaryOp::Shrlu => long_shift(a, b, |x, y| ((x as u64) >> y) as i64),
        BinaryOp::Addf => float_binop(a, b, |x, y| x + y),
        BinaryOp::Subf => float_binop(a, b, |x, y| x - y),
        BinaryOp::Mulf => float_binop(a, b, |x, y| x * y),
        BinaryOp::Divf => float_binop(a, b, |x, y| x / y),
        BinaryOp::Addfs => single_binop(a, b, |x, y| x + y),
        BinaryOp::Subfs => single_binop(a, b, |x, y| x - y),
        BinaryOp::Mulfs => single_binop(a, b, |x, y| x * y),
        BinaryOp::Divfs => single_binop(a, b, |x, y| x / y),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Pointer arithmetic
// ═══════════════════════════════════════════════════════════════════════════

fn known_offset(v: AbstractValue) -> Option<i64> {
    match v {
        Int(n) => Some(n as i64),
        Long(n) => Some(n),
        _ => None,
    }
}

/// A value with no pointer in it (but not Bottom)
fn is_plain_number(v: AbstractValue) -> bool {
    !v.is_bottom() && v.provenance().is_bottom()
}

fn add_offset(a: AbstractValue, b: AbstractValue, kind: NumKind) -> AbstractValue {
    match (a, b) {
        (Bottom, _) | (_, Bottom) => Bottom,
        (Ptr(p), n) | (n, Ptr(p)) if is_plain_number(n) => match known_offset(n) {
            Some(delta) => Ptr(p.shift(delta)),
            None => Ptr(p.widen()),
        },
        _ => match kind {
            NumKind::Int => int_binop(a, b, |x, y| Some(x.wrapping_add(y))),
            _ => long_binop(a, b, |x, y| Some(x.wrapping_add(y))),
        },
    }
}

fn sub_offset(a: AbstractValue, b: AbstractValue, kind: NumKind) -> AbstractValue {
    match (a, b) {
        (Bottom, _) | (_, Bottom) => Bottom,
        (Ptr(p), n) if is_plain_number(n) => match known_offset(n) {
            Some(delta) => Ptr(p.shift(delta.wrapping_neg())),
            None => Ptr(p.widen()),
        },
        (Ptr(AbstractPointer::StackAt(x)), Ptr(AbstractPointer::StackAt(y))) if kind == NumKind::Long => {
            Long(x.wrapping_sub(y))
        }
        (Ptr(AbstractPointer::GlobalAt(s, x)), Ptr(AbstractPointer::GlobalAt(t, y)))
            if s == t && kind == NumKind::Long =>
        {
            Long(x.wrapping_sub(y))
        }
        _ => match kind {
            NumKind::Int => int_binop(a, b, |x, y| Some(x.wrapping_sub(y))),
            _ => long_binop(a, b, |x, y| Some(x.wrapping_sub(y))),
        },
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Generic folding helpers
// ═══════════════════════════════════════════════════════════════════════════

/// Unknown result of an integer operation: keeps provenance
fn degrade(v: AbstractValue, kind: NumKind) -> AbstractValue {
    match v {
        Bottom => Bottom,
        _ => AbstractValue::unknown(kind, v.provenance()),
    }
}

/// Unknown result of a float operation: pointers never survive
fn scalar_degrade(v: AbstractValue, kind: NumKind) -> AbstractValue {
    match v {
        Bottom => Bottom,
        _ => Num(kind),
    }
}

fn degrade2(a: AbstractValue, b: AbstractValue, kind: NumKind) -> AbstractValue {
    AbstractValue::unknown(kind, a.provenance().join(&b.provenance()))
}

fn int_unop(v: AbstractValue, f: impl Fn(i32) -> i32) -> AbstractValue {
    match v {
        Int(n) => Int(f(n)),
        _ => degrade(v, NumKind::Int),
    }
}

fn long_unop(v: AbstractValue, f: impl Fn(i64) -> i64) -> AbstractValue {
    match v {
        Long(n) => Long(f(n)),
        _ => degrade(v, NumKind::Long),
    }
}

fn float_unop(v: AbstractValue, f: impl Fn(f64) -> f64) -> AbstractValue {
    match v.as_float() {
        Some(x) => AbstractValue::float(f(x)),
        None => scalar_degrade(v, NumKind::Float),
    }
}

fn single_unop(v: AbstractValue, f: impl Fn(f32) -> f32) -> AbstractValue {
    match v.as_single() {
        Some(x) => AbstractValue::single(f(x)),
        None => scalar_degrade(v, NumKind::Single),
    }
}

fn int_binop(a: AbstractValue, b: AbstractValue, f: impl Fn(i32, i32) -> Option<i32>) -> AbstractValue {
    match (a, b) {
        (Bottom, _) | (_, Bottom) => Bottom,
        (Int(x), Int(y)) => f(x, y).map(Int).unwrap_or(Num(NumKind::Int)),
        _ => degrade2(a, b, NumKind::Int),
    }
}

fn long_binop(a: AbstractValue, b: AbstractValue, f: impl Fn(i64, i64) -> Option<i64>) -> AbstractValue {
    match (a, b) {
        (Bottom, _) | (_, Bottom) => Bottom,
        (Long(x), Long(y)) => f(x, y).map(Long).unwrap_or(Num(NumKind::Long)),
        _ => degrade2(a, b, NumKind::Long),
    }
}

/// 64-bit shifts take a 32-bit amount
fn long_shift(a: AbstractValue, b: AbstractValue, f: impl Fn(i64, u32) -> i64) -> AbstractValue {
    match (a, b) {
        (Bottom, _) | (_, Bottom) => Bottom,
        (Long(x), Int(y)) if (y as u32) < 64 => Long(f(x, y as u32)),
        (Long(_), Int(_)) => Num(NumKind::Long),
        _ => degrade2(a, b, NumKind::Long),
    }
}

fn float_binop(a: AbstractValue, b: AbstractValue, f: impl Fn(f64, f64) -> f64) -> AbstractValue {
    match (a, b) {
        (Bottom, _) | (_, Bottom) => Bottom,
        _ => match (a.as_float(), b.as_float()) {
            (Some(x), Some(y)) => AbstractValue::float(f(x, y)),
            _ => Num(NumKind::Float),
        },
    }
}

fn single_binop(a: AbstractValue, b: AbstractValue, f: impl Fn(f32, f32) -> f32) -> AbstractValue {
    match (a, b) {
        (Bottom, _) | (_, Bottom) => Bottom,
        _ => match (a.as_single(), b.as_single()) {
            (Some(x), Some(y)) => AbstractValue::single(f(x, y)),
            _ => Num(NumKind::Single),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::{Comparison, Condition, Symbol};

    #[test]
    fn test_constant_folding() {
        assert_eq!(eval_binary(BinaryOp::Add, Int(5), Int(3)), Int(8));
        assert_eq!(eval_binary(BinaryOp::Mull, Long(6), Long(7)), Long(42));
        assert_eq!(eval_binary(BinaryOp::Shru, Int(-1), Int(28)), Int(15));
        assert_eq!(eval_unary(UnaryOp::Cast8Signed, Int(0x80)), Int(-128));
        assert_eq!(
            eval_binary(BinaryOp::Addf, AbstractValue::float(1.5), AbstractValue::float(2.0)),
            AbstractValue::float(3.5)
        );
    }

    #[test]
    fn test_undefined_results_are_unknown() {
        assert_eq!(eval_binary(BinaryOp::Divs, Int(1), Int(0)), Num(NumKind::Int));
        assert_eq!(eval_binary(BinaryOp::Divs, Int(i32::MIN), Int(-1)), Num(NumKind::Int));
        assert_eq!(eval_binary(BinaryOp::Shl, Int(1), Int(40)), Num(NumKind::Int));
        assert_eq!(eval_unary(UnaryOp::IntOfFloat, AbstractValue::float(1e20)), Num(NumKind::Int));
    }

    #[test]
    fn test_unknown_operand() {
        assert_eq!(eval_binary(BinaryOp::Add, Int(0), Num(NumKind::Int)), Num(NumKind::Int));
        assert_eq!(eval_binary(BinaryOp::Add, Int(0), Top), Top);
        assert_eq!(eval_binary(BinaryOp::Add, Bottom, Int(1)), Bottom);
    }

    #[test]
    fn test_pointer_offset_arithmetic() {
        let p = Ptr(AbstractPointer::StackAt(8));
        assert_eq!(eval_binary(BinaryOp::Addl, p, Long(8)), Ptr(AbstractPointer::StackAt(16)));
        assert_eq!(eval_binary(BinaryOp::Addl, Long(-8), p), Ptr(AbstractPointer::StackAt(0)));
        assert_eq!(eval_binary(BinaryOp::Subl, p, Long(4)), Ptr(AbstractPointer::StackAt(4)));
        assert_eq!(eval_binary(BinaryOp::Addl, p, Num(NumKind::Long)), Ptr(AbstractPointer::AnyStack));
        assert_eq!(
            eval_operation(&Operation::AddImmLong(4), &[Ptr(AbstractPointer::GlobalAt(Symbol(1), 0))]),
            Ptr(AbstractPointer::GlobalAt(Symbol(1), 4))
        );
    }

    #[test]
    fn test_pointer_difference() {
        let a = Ptr(AbstractPointer::StackAt(24));
        let b = Ptr(AbstractPointer::StackAt(8));
        assert_eq!(eval_binary(BinaryOp::Subl, a, b), Long(16));

        let g = Ptr(AbstractPointer::GlobalAt(Symbol(1), 0));
        assert_eq!(eval_binary(BinaryOp::Subl, a, g), AbstractValue::Top);
    }

    #[test]
    fn test_masking_pointer_keeps_provenance() {
        let p = Ptr(AbstractPointer::GlobalAt(Symbol(2), 12));
        assert_eq!(
            eval_binary(BinaryOp::Andl, p, Long(!7)),
            Ifptr(AbstractPointer::AnyOffsetOf(Symbol(2)))
        );
    }

    #[test]
    fn test_cmp_operation() {
        let cmp = Operation::Cmp(Condition::CmpImm(Comparison::Lt, 10));
        assert_eq!(eval_operation(&cmp, &[Int(3)]), Int(1));
        assert_eq!(eval_operation(&cmp, &[Int(30)]), Int(0));
        assert_eq!(eval_operation(&cmp, &[Num(NumKind::Int)]), Num(NumKind::Int));
        assert_eq!(eval_operation(&cmp, &[Bottom]), Bottom);
    }

    #[test]
    fn test_missing_argument_is_top() {
        assert_eq!(eval_operation(&Operation::Move, &[]), Top);
    }
}
