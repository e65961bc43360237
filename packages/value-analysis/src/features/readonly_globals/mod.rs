//! Read-only global table
//!
//! Contents of immutable globals, folded from their initializers once per
//! program and shared by every function analysis.

pub mod builder;
pub mod table;

pub use builder::build_readonly_globals;
pub use table::ReadOnlyGlobals;
