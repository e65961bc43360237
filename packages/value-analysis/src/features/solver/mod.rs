//! Forward worklist fixpoint solver
//!
//! Generic over the state lattice and the transfer function; the graph is
//! only consulted for node count and, when a transfer returns Top, for the
//! successor list.

pub mod worklist;

pub use worklist::{FixpointSolver, Solution, SolverStats, SuccessorGraph};
