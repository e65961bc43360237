//! Value domain
//!
//! Abstract pointers and abstract values, plus the abstract semantics of the
//! machine operations and branch conditions that compute them.

pub mod domain;
pub mod infrastructure;

pub use domain::{AbstractPointer, AbstractValue, NumKind};
pub use infrastructure::{eval_condition, eval_operation, AbstractBool};
