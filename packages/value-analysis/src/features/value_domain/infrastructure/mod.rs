//! Operator and condition semantics over abstract values

pub mod conditions;
pub mod operators;

pub use conditions::{eval_condition, AbstractBool};
pub use operators::{eval_binary, eval_operation, eval_unary};
