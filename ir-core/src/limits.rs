// SPDX-License-Identifier: LGPL-3.0-only

//! Optional soft caps construction code may consult before growing a tree.
//!
//! The substrate's own invariants in [`crate::node`] are unconditional and do
//! not consult [`GraphLimits`] directly; this type exists for collaborators
//! that want to bound graph size while building one, the same way the
//! original BDA code carried small plain-data config alongside a graph
//! (`CFGNodeData`, `SamplingBias`) instead of an external config file.

/// Soft caps on the number of children or edges a single node may accumulate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphLimits {
    pub max_children: Option<usize>,
    pub max_edges: Option<usize>,
}

impl GraphLimits {
    /// No caps at all.
    pub fn unbounded() -> GraphLimits {
        GraphLimits::default()
    }

    pub fn with_max_children(mut self, max_children: usize) -> GraphLimits {
        self.max_children = Some(max_children);
        self
    }

    pub fn with_max_edges(mut self, max_edges: usize) -> GraphLimits {
        self.max_edges = Some(max_edges);
        self
    }

    /// Whether one more child can be added given `current` already present.
    pub fn allows_child(&self, current: usize) -> bool {
        self.max_children.map_or(true, |max| current < max)
    }

    /// Whether one more edge can be added given `current` already present.
    pub fn allows_edge(&self, current: usize) -> bool {
        self.max_edges.map_or(true, |max| current < max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbounded_allows_anything() {
        let limits = GraphLimits::unbounded();
        assert!(limits.allows_child(1_000_000));
        assert!(limits.allows_edge(1_000_000));
    }

    #[test]
    fn max_children_is_exclusive_of_the_cap() {
        let limits = GraphLimits::unbounded().with_max_children(2);
        assert!(limits.allows_child(0));
        assert!(limits.allows_child(1));
        assert!(!limits.allows_child(2));
    }
}
