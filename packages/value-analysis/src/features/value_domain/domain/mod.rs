pub mod pointer;
pub mod value;

pub use pointer::AbstractPointer;
pub use value::{AbstractValue, NumKind};
