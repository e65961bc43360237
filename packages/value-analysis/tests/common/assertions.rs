//! Custom assertions for analysis results

use value_analysis::shared::models::{NodeId, Reg};
use value_analysis::{AbstractValue, FunctionAnalysis, Lattice};

/// Assert the exact abstract value of a register on entry to a node
pub fn assert_value_at(analysis: &FunctionAnalysis, node: u32, reg: u32, expected: AbstractValue) {
    let actual = analysis.value_at(NodeId(node), Reg(reg));
    assert_eq!(
        actual, expected,
        "r{reg} at n{node}: expected {expected}, got {actual}"
    );
}

/// Assert `lower ⊑ actual`
pub fn assert_covers<L: Lattice + std::fmt::Debug>(actual: &L, lower: &L) {
    assert!(
        lower.le(actual),
        "expected {:?} to cover {:?}",
        actual,
        lower
    );
}

pub fn assert_unreachable(analysis: &FunctionAnalysis, node: u32) {
    assert!(
        !analysis.is_reachable(NodeId(node)),
        "expected n{node} unreachable, found {:?}",
        analysis.state_at(NodeId(node))
    );
}

pub fn assert_reachable(analysis: &FunctionAnalysis, node: u32) {
    assert!(analysis.is_reachable(NodeId(node)), "expected n{node} reachable");
}
