pub mod registers;
pub mod state;

pub use registers::RegisterFile;
pub use state::NodeState;
