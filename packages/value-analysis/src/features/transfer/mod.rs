//! Transfer function
//!
//! Register and node states, the graph and liveness ports, and the
//! per-instruction semantics producing a state for each successor.

pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use domain::{NodeState, RegisterFile};
pub use infrastructure::TransferFunction;
pub use ports::{ControlFlowGraph, LivenessOracle, NoLiveness};
