/*
 * Value Analysis - Flow-Sensitive Abstract Interpretation for a Compiler Backend
 *
 * Feature-First Architecture:
 * - shared/      : IR view consumed by the analyser (ids, chunks, ops, instructions)
 * - features/    : Vertical slices (values → memory → read-only globals → transfer → fiber → solver → drivers)
 * - config/      : Precision/performance knobs (presets + YAML)
 *
 * Guarantees:
 * - Sound: results never underestimate what a register or memory cell may hold
 * - Total: imprecision is Top, never an error; only malformed input fails
 * - Bounded: the solver gives up with Top everywhere past a re-enqueue bound
 */

// Crate-level lint configuration
#![allow(clippy::too_many_arguments)] // Builtin transfer threads the whole state through
#![allow(clippy::should_implement_trait)] // from_str naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models and the lattice interface
pub mod shared;

/// Feature modules
pub mod features;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{AnalysisConfig, ConfigError, Preset};
pub use errors::{AnalysisError, Result};
pub use features::analysis::{FunctionAnalysis, FunctionAnalyzer, ProgramAnalysis, ProgramAnalyzer};
pub use features::fiber::Fiber;
pub use features::memory_domain::{AbstractMemoryState, BlockContent, CallKind};
pub use features::readonly_globals::{build_readonly_globals, ReadOnlyGlobals};
pub use features::solver::{FixpointSolver, Solution, SolverStats, SuccessorGraph};
pub use features::transfer::{
    ControlFlowGraph, LivenessOracle, NoLiveness, NodeState, RegisterFile, TransferFunction,
};
pub use features::value_domain::{AbstractBool, AbstractPointer, AbstractValue, NumKind};
pub use shared::Lattice;
