pub mod block;
pub mod calls;
pub mod memory;

pub use block::{BlockContent, Cell};
pub use calls::{call_result, classify_call, CallKind};
pub use memory::AbstractMemoryState;
