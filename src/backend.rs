//! Backend abstraction over graph representations
//!
//! The engine's public surface is a small capability set; any backend that
//! honors it (and the CSR invariants on its own storage) can stand in for
//! [`CsrGraph`] behind an embedder.

use std::path::Path;

use crate::algorithms::{bfs_edges, critical_node};
use crate::storage::{CsrGraph, NodeId};

/// The operation surface every graph backend provides
///
/// One instance per graph, owned by a single logical caller. `load`
/// populates the instance in place and is best-effort: failures are logged
/// and leave the instance empty. All other operations are read-only.
pub trait GraphBackend {
    /// Populate the instance from a file, preferring the binary cache
    fn load(&mut self, path: &Path);

    /// Number of nodes
    fn num_nodes(&self) -> usize;

    /// Number of directed edges
    fn num_edges(&self) -> usize;

    /// Node with the highest out-degree, ties to the lowest id
    fn critical_node(&self) -> Option<NodeId>;

    /// Bounded BFS reporting every examined edge
    fn bfs_edges(&self, start: NodeId, depth: u32) -> Vec<(u32, u32)>;
}

impl GraphBackend for CsrGraph {
    fn load(&mut self, path: &Path) {
        CsrGraph::load(self, path);
    }

    fn num_nodes(&self) -> usize {
        CsrGraph::num_nodes(self)
    }

    fn num_edges(&self) -> usize {
        CsrGraph::num_edges(self)
    }

    fn critical_node(&self) -> Option<NodeId> {
        critical_node(self)
    }

    fn bfs_edges(&self, start: NodeId, depth: u32) -> Vec<(u32, u32)> {
        bfs_edges(self, start, depth)
    }
}
