//! Shared module - Common types
//!
//! Types shared across all features. No analysis logic lives here.

pub mod lattice;
pub mod models;

pub use lattice::Lattice;
pub use models::*;
