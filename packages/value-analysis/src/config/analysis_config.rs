//! Analysis configuration
//!
//! Precision/performance knobs of the analyser. None of them affect
//! soundness: every setting yields a conservative result.

use super::error::{ConfigError, ConfigResult};
use super::io::{ConfigFileV1, ConfigOverrides};
use super::preset::Preset;
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════
// Solver
// ═══════════════════════════════════════════════════════════════════════════

/// Fixpoint solver settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    /// Times a single node may be re-enqueued before the solver gives up and
    /// returns the all-Top result (1..=1000000)
    pub max_requeue_per_node: usize,
}

impl SolverConfig {
    pub fn from_preset(preset: Preset) -> Self {
        let max_requeue_per_node = match preset {
            Preset::Fast => 8,
            Preset::Balanced => 64,
            Preset::Thorough => 1024,
        };
        Self {
            max_requeue_per_node,
        }
    }

    /// Builder: Set re-enqueue bound
    pub fn max_requeue_per_node(mut self, v: usize) -> Self {
        self.max_requeue_per_node = v;
        self
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_requeue_per_node == 0 || self.max_requeue_per_node > 1_000_000 {
            return Err(ConfigError::range_with_hint(
                "max_requeue_per_node",
                self.max_requeue_per_node,
                1,
                1_000_000,
                "The solver needs at least one visit per node",
            ));
        }
        Ok(())
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Balanced)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Read-only globals
// ═══════════════════════════════════════════════════════════════════════════

/// Read-only global table settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReadOnlyConfig {
    /// Keep float initializers as known constants; when off they are recorded
    /// as unknown floats to bound table size
    pub propagate_float_constants: bool,
}

impl ReadOnlyConfig {
    pub fn from_preset(preset: Preset) -> Self {
        Self {
            propagate_float_constants: !matches!(preset, Preset::Fast),
        }
    }

    /// Builder: Set float propagation
    pub fn propagate_float_constants(mut self, v: bool) -> Self {
        self.propagate_float_constants = v;
        self
    }
}

impl Default for ReadOnlyConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Balanced)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Builtins
// ═══════════════════════════════════════════════════════════════════════════

/// Lowest precision a volatile load result may claim for pointer provenance.
///
/// Never more precise than "any global": a volatile location may be changed
/// by the environment to any global address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerFloor {
    Glob,
    Nonstack,
    Top,
}

/// Builtin handling settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuiltinConfig {
    pub volatile_load_floor: PointerFloor,
}

impl BuiltinConfig {
    /// Builder: Set volatile load floor
    pub fn volatile_load_floor(mut self, v: PointerFloor) -> Self {
        self.volatile_load_floor = v;
        self
    }
}

impl Default for BuiltinConfig {
    fn default() -> Self {
        Self {
            volatile_load_floor: PointerFloor::Glob,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Top-level
// ═══════════════════════════════════════════════════════════════════════════

/// Complete analyser configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    pub preset: Preset,
    pub solver: SolverConfig,
    pub readonly: ReadOnlyConfig,
    pub builtins: BuiltinConfig,
    /// Drop registers that are dead after each node from its outgoing states
    pub liveness_trim: bool,
    /// Analyse functions of a program on the rayon pool
    pub parallel: bool,
}

impl AnalysisConfig {
    pub fn from_preset(preset: Preset) -> Self {
        Self {
            preset,
            solver: SolverConfig::from_preset(preset),
            readonly: ReadOnlyConfig::from_preset(preset),
            builtins: BuiltinConfig::default(),
            liveness_trim: true,
            parallel: !matches!(preset, Preset::Fast),
        }
    }

    /// Builder: Override solver settings
    pub fn solver(mut self, f: impl FnOnce(SolverConfig) -> SolverConfig) -> Self {
        self.solver = f(self.solver);
        self
    }

    /// Builder: Override read-only table settings
    pub fn readonly(mut self, f: impl FnOnce(ReadOnlyConfig) -> ReadOnlyConfig) -> Self {
        self.readonly = f(self.readonly);
        self
    }

    /// Builder: Override builtin settings
    pub fn builtins(mut self, f: impl FnOnce(BuiltinConfig) -> BuiltinConfig) -> Self {
        self.builtins = f(self.builtins);
        self
    }

    /// Builder: Set liveness trimming
    pub fn liveness_trim(mut self, v: bool) -> Self {
        self.liveness_trim = v;
        self
    }

    /// Builder: Set parallel program analysis
    pub fn parallel(mut self, v: bool) -> Self {
        self.parallel = v;
        self
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.solver.validate()
    }

    /// Load and validate a YAML configuration file
    pub fn from_yaml(path: impl AsRef<std::path::Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate YAML configuration text
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let file: ConfigFileV1 = serde_yaml::from_str(content)?;

        match file.version {
            None => return Err(ConfigError::MissingVersion),
            Some(1) => {}
            Some(found) => {
                return Err(ConfigError::UnsupportedVersion {
                    found,
                    supported: vec![1],
                })
            }
        }

        let preset = match file.preset {
            Some(name) => Preset::from_str(&name).map_err(|_| ConfigError::UnknownPreset(name))?,
            None => Preset::default(),
        };

        let mut config = Self::from_preset(preset);
        if let Some(overrides) = file.overrides {
            if let Some(solver) = overrides.solver {
                config.solver = solver;
            }
            if let Some(readonly) = overrides.readonly {
                config.readonly = readonly;
            }
            if let Some(builtins) = overrides.builtins {
                config.builtins = builtins;
            }
            if let Some(v) = overrides.liveness_trim {
                config.liveness_trim = v;
            }
            if let Some(v) = overrides.parallel {
                config.parallel = v;
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML schema v1
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let file = ConfigFileV1 {
            version: Some(1),
            preset: Some(self.preset.as_str().to_string()),
            overrides: Some(ConfigOverrides {
                solver: Some(self.solver.clone()),
                readonly: Some(self.readonly.clone()),
                builtins: Some(self.builtins.clone()),
                liveness_trim: Some(self.liveness_trim),
                parallel: Some(self.parallel),
            }),
        };
        Ok(serde_yaml::to_string(&file)?)
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Balanced)
    }
}
