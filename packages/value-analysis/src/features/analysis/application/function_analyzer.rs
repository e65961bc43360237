//! Analysing one function to fixpoint.

use tracing::debug;

use super::validation::validate_graph;
use crate::config::AnalysisConfig;
use crate::errors::Result;
use crate::features::analysis::domain::FunctionAnalysis;
use crate::features::readonly_globals::ReadOnlyGlobals;
use crate::features::solver::FixpointSolver;
use crate::features::transfer::{ControlFlowGraph, LivenessOracle, NodeState, TransferFunction};

/// Runs the value analysis over single functions, sharing one read-only
/// global table.
#[derive(Debug, Clone, Copy)]
pub struct FunctionAnalyzer<'a> {
    romem: &'a ReadOnlyGlobals,
    config: &'a AnalysisConfig,
}

impl<'a> FunctionAnalyzer<'a> {
    pub fn new(romem: &'a ReadOnlyGlobals, config: &'a AnalysisConfig) -> Self {
        Self { romem, config }
    }

    /// Fails on an out-of-range configuration or a structurally broken graph
    pub fn analyze<G, V>(&self, graph: &G, liveness: &V) -> Result<FunctionAnalysis>
    where
        G: ControlFlowGraph + ?Sized,
        V: LivenessOracle + ?Sized,
    {
        self.config.validate()?;
        validate_graph(graph)?;

        let transfer = TransferFunction::new(graph, liveness, self.romem, self.config);
        let solution = FixpointSolver::with_config(graph, &self.config.solver).solve(
            graph.entry(),
            NodeState::entry(graph.params()),
            |node, state| transfer.transfer(node, state),
        )?;

        let stats = solution.stats();
        debug!(
            nodes = solution.len(),
            iterations = stats.iterations,
            gave_up = stats.gave_up,
            "function analysed"
        );
        Ok(FunctionAnalysis::new(solution))
    }
}
