//! Kildall-style forward propagation over per-successor facts.
//!
//! ```text
//! state[entry] = entry_state, state[n] = ⊥ otherwise
//! pending = {entry}
//! while pending ≠ ∅:
//!     n = min(pending)
//!     for (s, out) in transfer(n, state[n]):
//!         if state[s] ⊔ out ≠ state[s]:
//!             state[s] = state[s] ⊔ out
//!             pending ∪= {s}
//! ```
//!
//! States only grow. A node enqueued more often than the configured bound
//! aborts the run and every node gets Top.

use std::collections::BTreeSet;

use tracing::{debug, trace, warn};

use crate::config::SolverConfig;
use crate::errors::{AnalysisError, Result};
use crate::features::fiber::Fiber;
use crate::shared::lattice::Lattice;
use crate::shared::models::NodeId;

/// Graph shape as the solver needs it
pub trait SuccessorGraph {
    /// Nodes are `0..node_count()`
    fn node_count(&self) -> usize;

    fn successors(&self, node: NodeId) -> Vec<NodeId>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverStats {
    /// Transfer function evaluations
    pub iterations: usize,
    /// Highest number of times any single node was enqueued
    pub max_enqueue_count: usize,
    /// Safety valve fired; the solution is all Top
    pub gave_up: bool,
}

/// Entry state of every node at the fixpoint
#[derive(Debug, Clone)]
pub struct Solution<L> {
    states: Vec<L>,
    stats: SolverStats,
}

impl<L: Lattice> Solution<L> {
    fn all_top(node_count: usize, stats: SolverStats) -> Self {
        Self {
            states: vec![L::top(); node_count],
            stats,
        }
    }

    pub fn state(&self, node: NodeId) -> Option<&L> {
        self.states.get(node.index())
    }

    pub fn states(&self) -> impl Iterator<Item = (NodeId, &L)> {
        self.states
            .iter()
            .enumerate()
            .map(|(i, s)| (NodeId(i as u32), s))
    }

    pub fn stats(&self) -> SolverStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

pub struct FixpointSolver<'g, G: ?Sized> {
    graph: &'g G,
    max_requeue_per_node: usize,
}

impl<'g, G: SuccessorGraph + ?Sized> FixpointSolver<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        Self {
            graph,
            max_requeue_per_node: SolverConfig::default().max_requeue_per_node,
        }
    }

    pub fn with_config(graph: &'g G, config: &SolverConfig) -> Self {
        Self::new(graph).with_max_requeue(config.max_requeue_per_node)
    }

    /// Create solver with custom safety-valve bound
    pub fn with_max_requeue(mut self, bound: usize) -> Self {
        self.max_requeue_per_node = bound;
        self
    }

    /// Run to fixpoint from `entry`.
    ///
    /// Fails only on structural defects: an entry or successor outside the
    /// graph.
    pub fn solve<L, F>(&self, entry: NodeId, entry_state: L, mut transfer: F) -> Result<Solution<L>>
    where
        L: Lattice,
        F: FnMut(NodeId, &L) -> Fiber<L>,
    {
        let node_count = self.graph.node_count();
        if entry.index() >= node_count {
            return Err(AnalysisError::MissingEntry { entry });
        }

        debug!(nodes = node_count, entry = %entry, "fixpoint solver starting");

        let mut states = vec![L::bottom(); node_count];
        states[entry.index()] = entry_state;
        let mut enqueued = vec![0usize; node_count];
        let mut pending = BTreeSet::new();
        pending.insert(entry);
        enqueued[entry.index()] = 1;

        let mut stats = SolverStats {
            max_enqueue_count: 1,
            ..SolverStats::default()
        };

        while let Some(node) = pending.pop_first() {
            stats.iterations += 1;
            trace!(node = %node, iteration = stats.iterations, "processing node");

            let outgoing: Vec<(NodeId, L)> = match transfer(node, &states[node.index()]) {
                Fiber::Top => self
                    .graph
                    .successors(node)
                    .into_iter()
                    .map(|s| (s, L::top()))
                    .collect(),
                Fiber::Facts(map) => map.into_iter().collect(),
            };

            for (succ, incoming) in outgoing {
                let slot = states
                    .get_mut(succ.index())
                    .ok_or(AnalysisError::DanglingSuccessor { node, successor: succ })?;
                let joined = slot.join(&incoming);
                if joined == *slot {
                    continue;
                }
                *slot = joined;

                if pending.insert(succ) {
                    let count = &mut enqueued[succ.index()];
                    *count += 1;
                    stats.max_enqueue_count = stats.max_enqueue_count.max(*count);
                    if *count > self.max_requeue_per_node {
                        warn!(
                            node = %succ,
                            bound = self.max_requeue_per_node,
                            "node re-enqueued past bound, giving up with Top everywhere"
                        );
                        stats.gave_up = true;
                        return Ok(Solution::all_top(node_count, stats));
                    }
                }
            }
        }

        debug!(
            iterations = stats.iterations,
            max_enqueue = stats.max_enqueue_count,
            "fixpoint reached"
        );
        Ok(Solution { states, stats })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Adjacency-list graph
    struct Adj(Vec<Vec<u32>>);

    impl SuccessorGraph for Adj {
        fn node_count(&self) -> usize {
            self.0.len()
        }
        fn successors(&self, node: NodeId) -> Vec<NodeId> {
            self.0[node.index()].iter().copied().map(NodeId).collect()
        }
    }

    /// Saturating counter lattice: 0 is bottom, `u8::MAX` top
    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Max(u8);

    impl Lattice for Max {
        fn bottom() -> Self {
            Max(0)
        }
        fn top() -> Self {
            Max(u8::MAX)
        }
        fn join(&self, other: &Self) -> Self {
            Max(self.0.max(other.0))
        }
    }

    fn propagate(graph: &Adj) -> impl FnMut(NodeId, &Max) -> Fiber<Max> + '_ {
        move |node, state| {
            let mut f = Fiber::empty();
            for s in graph.successors(node) {
                f.add(s, Max(state.0.saturating_add(1).min(10)));
            }
            f
        }
    }

    #[test]
    fn test_straight_line() {
        let g = Adj(vec![vec![1], vec![2], vec![]]);
        let sol = FixpointSolver::new(&g).solve(NodeId(0), Max(1), propagate(&g)).unwrap();
        assert_eq!(sol.state(NodeId(2)), Some(&Max(3)));
        assert!(!sol.stats().gave_up);
    }

    #[test]
    fn test_loop_converges() {
        let g = Adj(vec![vec![1], vec![1, 2], vec![]]);
        let sol = FixpointSolver::new(&g).solve(NodeId(0), Max(1), propagate(&g)).unwrap();
        assert_eq!(sol.state(NodeId(1)), Some(&Max(10)));
        assert_eq!(sol.state(NodeId(2)), Some(&Max(10)));
    }

    #[test]
    fn test_unreachable_stays_bottom() {
        let g = Adj(vec![vec![], vec![0]]);
        let sol = FixpointSolver::new(&g).solve(NodeId(0), Max(1), propagate(&g)).unwrap();
        assert_eq!(sol.state(NodeId(1)), Some(&Max(0)));
    }

    #[test]
    fn test_top_fiber_reaches_graph_successors() {
        let g = Adj(vec![vec![1], vec![]]);
        let sol = FixpointSolver::new(&g)
            .solve(NodeId(0), Max(1), |_, _| Fiber::Top)
            .unwrap();
        assert_eq!(sol.state(NodeId(1)), Some(&Max(u8::MAX)));
    }

    #[test]
    fn test_safety_valve() {
        let g = Adj(vec![vec![1], vec![1, 2], vec![]]);
        let sol = FixpointSolver::new(&g)
            .with_max_requeue(3)
            .solve(NodeId(0), Max(1), propagate(&g))
            .unwrap();
        assert!(sol.stats().gave_up);
        assert!(sol.states().all(|(_, s)| *s == Max(u8::MAX)));
    }

    #[test]
    fn test_structural_defects() {
        let g = Adj(vec![vec![]]);
        let err = FixpointSolver::new(&g)
            .solve(NodeId(4), Max(1), propagate(&g))
            .unwrap_err();
        assert!(matches!(err, AnalysisError::MissingEntry { .. }));

        let err = FixpointSolver::new(&g)
            .solve(NodeId(0), Max(1), |_, _| Fiber::single(NodeId(7), Max(1)))
            .unwrap_err();
        assert!(matches!(err, AnalysisError::DanglingSuccessor { .. }));
    }
}
