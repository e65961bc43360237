use std::collections::BTreeMap;

use crate::shared::lattice::Lattice;
use crate::shared::models::NodeId;

/// Outgoing fact of a node, keyed by successor.
///
/// A successor without an entry receives Bottom. `Top` gives every
/// successor the top state.
#[derive(Debug, Clone)]
pub enum Fiber<L> {
    Top,
    Facts(BTreeMap<NodeId, L>),
}

impl<L: Lattice> Fiber<L> {
    /// No successor reachable
    pub fn empty() -> Self {
        Fiber::Facts(BTreeMap::new())
    }

    pub fn single(node: NodeId, state: L) -> Self {
        let mut fiber = Self::empty();
        fiber.add(node, state);
        fiber
    }

    pub fn is_top(&self) -> bool {
        matches!(self, Fiber::Top)
    }

    /// Join `state` into the entry for `node`
    pub fn add(&mut self, node: NodeId, state: L) {
        if let Fiber::Facts(map) = self {
            match map.get_mut(&node) {
                Some(existing) => *existing = existing.join(&state),
                None => {
                    map.insert(node, state);
                }
            }
        }
    }

    /// Record `state` for `node` unless it already has an entry
    pub fn add_first(&mut self, node: NodeId, state: L) {
        if let Fiber::Facts(map) = self {
            map.entry(node).or_insert(state);
        }
    }

    pub fn get(&self, node: NodeId) -> L {
        match self {
            Fiber::Top => L::top(),
            Fiber::Facts(map) => map.get(&node).cloned().unwrap_or_else(L::bottom),
        }
    }

    /// Explicit entries, in increasing node id. Empty for `Top`.
    pub fn entries(&self) -> impl Iterator<Item = (NodeId, &L)> {
        let map = match self {
            Fiber::Top => None,
            Fiber::Facts(map) => Some(map),
        };
        map.into_iter().flat_map(|m| m.iter().map(|(n, s)| (*n, s)))
    }

    /// Apply `f` to every explicit entry
    pub fn map(self, mut f: impl FnMut(NodeId, L) -> L) -> Self {
        match self {
            Fiber::Top => Fiber::Top,
            Fiber::Facts(map) => Fiber::Facts(map.into_iter().map(|(n, s)| (n, f(n, s))).collect()),
        }
    }

    fn non_bottom(map: &BTreeMap<NodeId, L>) -> impl Iterator<Item = (&NodeId, &L)> {
        map.iter().filter(|(_, s)| !s.is_bottom())
    }
}

impl<L: Lattice> Default for Fiber<L> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Structural equality where an explicit Bottom entry equals a missing one
impl<L: Lattice> PartialEq for Fiber<L> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Fiber::Top, Fiber::Top) => true,
            (Fiber::Facts(a), Fiber::Facts(b)) => Self::non_bottom(a).eq(Self::non_bottom(b)),
            _ => false,
        }
    }
}

impl<L: Lattice> Lattice for Fiber<L> {
    fn bottom() -> Self {
        Self::empty()
    }

    fn top() -> Self {
        Fiber::Top
    }

    fn join(&self, other: &Self) -> Self {
        match (self, other) {
            (Fiber::Top, _) | (_, Fiber::Top) => Fiber::Top,
            (Fiber::Facts(a), Fiber::Facts(b)) => {
                let mut out = a.clone();
                for (node, state) in b {
                    match out.get_mut(node) {
                        Some(existing) => *existing = existing.join(state),
                        None => {
                            out.insert(*node, state.clone());
                        }
                    }
                }
                Fiber::Facts(out)
            }
        }
    }
}
