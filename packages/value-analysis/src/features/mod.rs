//! Feature modules
//!
//! Leaves first: values, memory, the read-only table, the transfer function,
//! the per-successor lattice, the solver, and the drivers tying them together.
//! Each feature contains some of:
//! - domain/         - Lattice types and their operations
//! - ports/          - Interfaces to the surrounding compiler (traits)
//! - application/    - Drivers
//! - infrastructure/ - Instruction-level semantics

pub mod analysis;
pub mod fiber;
pub mod memory_domain;
pub mod readonly_globals;
pub mod solver;
pub mod transfer;
pub mod value_domain;
