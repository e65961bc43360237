//! Per-successor state lattice
//!
//! The outgoing fact of one node: a state per successor, or Top. Branches
//! and jump tables hand different successors different states, plain
//! instructions hand their single successor one state.

pub mod per_successor;

pub use per_successor::Fiber;
