//! Common test utilities for value-analysis
//!
//! Instruction builders, analysis shortcuts, proptest strategies and
//! domain-specific assertions shared by the integration tests.

#![allow(dead_code)]

mod assertions;
mod builders;
mod strategies;

// Re-export all utilities
pub use assertions::*;
pub use builders::*;
pub use strategies::*;
