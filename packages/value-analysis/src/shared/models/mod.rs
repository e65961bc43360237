//! Shared models
//!
//! The intermediate representation the analysis consumes. Building and
//! decoding it belongs to the surrounding compiler; these types only fix
//! the shape of what the analyser reads.

mod chunk;
mod function;
mod globals;
mod ids;
mod instruction;
mod ops;

pub use chunk::Chunk;
pub use function::{DeadRegisters, Function, FunctionBuilder, Program};
pub use globals::{GlobalDef, InitData};
pub use ids::{NodeId, Reg, Symbol};
pub use instruction::{Builtin, BuiltinArg, Callee, Instruction};
pub use ops::{Addressing, BinaryOp, Comparison, Condition, Operation, UnaryOp};
