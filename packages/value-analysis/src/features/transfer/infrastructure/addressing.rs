use crate::features::value_domain::infrastructure::eval_binary;
use crate::features::value_domain::{AbstractPointer, AbstractValue};
use crate::shared::models::{Addressing, BinaryOp};

/// Value of the address computed by an addressing mode
pub fn eval_addressing(addr: &Addressing, args: &[AbstractValue]) -> AbstractValue {
    let arg = |i: usize| args.get(i).copied().unwrap_or(AbstractValue::Top);
    match *addr {
        Addressing::Indexed(ofs) => eval_binary(BinaryOp::Addl, arg(0), AbstractValue::Long(ofs)),
        Addressing::Indexed2 => eval_binary(BinaryOp::Addl, arg(0), arg(1)),
        Addressing::Global(s, ofs) => AbstractValue::Ptr(AbstractPointer::GlobalAt(s, ofs)),
        Addressing::Stack(ofs) => AbstractValue::Ptr(AbstractPointer::StackAt(ofs)),
    }
}
