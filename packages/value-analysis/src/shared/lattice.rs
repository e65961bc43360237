//! Join-semilattice interface shared by the solver and the per-successor map.

/// A join-semilattice with explicit least and greatest elements
pub trait Lattice: Clone + PartialEq {
    /// Least element (unreachable / no information yet)
    fn bottom() -> Self;

    /// Greatest element (no knowledge at all)
    fn top() -> Self;

    /// Least upper bound: `self ⊔ other`
    fn join(&self, other: &Self) -> Self;

    /// Partial order `self ⊑ other`, consistent with `join`
    fn le(&self, other: &Self) -> bool {
        self.join(other) == *other
    }

    fn is_bottom(&self) -> bool {
        *self == Self::bottom()
    }
}
