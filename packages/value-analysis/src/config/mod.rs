//! Configuration System
//!
//! Two tiers:
//! - Preset: one-liner defaults (`AnalysisConfig::from_preset(Preset::Fast)`)
//! - YAML: versioned file with per-section overrides
//!
//! # Examples
//!
//! ```rust,ignore
//! use value_analysis::config::{AnalysisConfig, Preset};
//!
//! let config = AnalysisConfig::from_preset(Preset::Balanced)
//!     .solver(|c| c.max_requeue_per_node(128));
//!
//! let config = AnalysisConfig::from_yaml("analysis.yaml")?;
//! ```

pub mod analysis_config;
pub mod error;
pub mod io;
pub mod preset;

// Re-exports
pub use analysis_config::{AnalysisConfig, BuiltinConfig, PointerFloor, ReadOnlyConfig, SolverConfig};
pub use error::{ConfigError, ConfigResult};
pub use io::{ConfigFileV1, ConfigOverrides};
pub use preset::Preset;
