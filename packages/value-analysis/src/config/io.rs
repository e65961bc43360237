//! Configuration file schema (YAML v1)

use super::analysis_config::{BuiltinConfig, ReadOnlyConfig, SolverConfig};
use serde::{Deserialize, Serialize};

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileV1 {
    /// Schema version (always 1 for v1)
    #[serde(default)]
    pub version: Option<u32>,

    /// Base preset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,

    /// Fine-grained overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<ConfigOverrides>,
}

/// Configuration overrides
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solver: Option<SolverConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readonly: Option<ReadOnlyConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub builtins: Option<BuiltinConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liveness_trim: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel: Option<bool>,
}
