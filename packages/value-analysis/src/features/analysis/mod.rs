//! Analysis drivers
//!
//! Per-function analysis to fixpoint, the queries on its result, and the
//! whole-program driver that shares one read-only table across functions.

pub mod application;
pub mod domain;

pub use application::{validate_graph, FunctionAnalyzer, ProgramAnalysis, ProgramAnalyzer};
pub use domain::FunctionAnalysis;
