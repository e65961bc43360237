pub mod addressing;
pub mod builtins;
pub mod transfer;

pub use addressing::eval_addressing;
pub use builtins::{eval_builtin_arg, floor_pointer, transfer_builtin};
pub use transfer::TransferFunction;
