//! Whole-program driver: one read-only table, every function analysed.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::info;

use super::function_analyzer::FunctionAnalyzer;
use crate::config::AnalysisConfig;
use crate::errors::Result;
use crate::features::analysis::domain::FunctionAnalysis;
use crate::features::readonly_globals::{build_readonly_globals, ReadOnlyGlobals};
use crate::features::transfer::NoLiveness;
use crate::shared::models::{DeadRegisters, Function, Program};

/// Results for a whole program
#[derive(Debug, Clone)]
pub struct ProgramAnalysis {
    romem: ReadOnlyGlobals,
    functions: Vec<(String, FunctionAnalysis)>,
}

impl ProgramAnalysis {
    pub fn readonly_globals(&self) -> &ReadOnlyGlobals {
        &self.romem
    }

    /// First function with the given name
    pub fn function(&self, name: &str) -> Option<&FunctionAnalysis> {
        self.functions
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, a)| a)
    }

    /// Results in program order
    pub fn functions(&self) -> impl Iterator<Item = (&str, &FunctionAnalysis)> {
        self.functions.iter().map(|(n, a)| (n.as_str(), a))
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

pub struct ProgramAnalyzer {
    config: AnalysisConfig,
}

impl ProgramAnalyzer {
    /// Fails when the configuration is out of range
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyse every function of `program`.
    ///
    /// `liveness[i]` belongs to `program.functions[i]`; functions past the end
    /// of the slice are analysed without liveness trimming.
    pub fn analyze(&self, program: &Program, liveness: &[DeadRegisters]) -> Result<ProgramAnalysis> {
        let romem = build_readonly_globals(&program.globals, &self.config.readonly)?;
        info!(
            functions = program.functions.len(),
            readonly_globals = romem.len(),
            "analysing program"
        );

        let analyzer = FunctionAnalyzer::new(&romem, &self.config);
        let run = |(i, f): (usize, &Function)| -> Result<(String, FunctionAnalysis)> {
            let result = match liveness.get(i) {
                Some(dead) => analyzer.analyze(f, dead)?,
                None => analyzer.analyze(f, &NoLiveness)?,
            };
            Ok((f.name.clone(), result))
        };

        #[cfg(feature = "parallel")]
        let functions = if self.config.parallel {
            program
                .functions
                .par_iter()
                .enumerate()
                .map(run)
                .collect::<Result<Vec<_>>>()?
        } else {
            program
                .functions
                .iter()
                .enumerate()
                .map(run)
                .collect::<Result<Vec<_>>>()?
        };

        #[cfg(not(feature = "parallel"))]
        let functions = program
            .functions
            .iter()
            .enumerate()
            .map(run)
            .collect::<Result<Vec<_>>>()?;

        Ok(ProgramAnalysis { romem, functions })
    }
}
