//! Bounded breadth-first traversal over CSR
//!
//! The traversal reports edges rather than nodes: its output feeds
//! visualization, where cross and back edges are rendered alongside the BFS
//! tree.

use std::collections::VecDeque;

use crate::storage::CsrGraph;
use crate::NodeId;

const UNVISITED: u32 = u32::MAX;

/// Breadth-first traversal from `start`; `depth` is the last level expanded
///
/// Returns every edge examined, in examination order. Each dequeued node at
/// level `depth` or below contributes its full CSR neighbor slice, so edges
/// into already-visited nodes appear too; only enqueueing is deduplicated.
/// A start node outside the graph yields an empty result.
///
/// Two calls with the same arguments on the same graph return the same
/// sequence.
///
/// # Example
///
/// ```
/// use veloz_graph::{bfs_edges, CsrGraph, NodeId};
///
/// let edges = vec![
///     (NodeId(0), NodeId(1)),
///     (NodeId(1), NodeId(2)),
///     (NodeId(2), NodeId(0)),
/// ];
/// let graph = CsrGraph::from_edge_list(&edges).unwrap();
///
/// assert_eq!(bfs_edges(&graph, NodeId(0), 10), vec![(0, 1), (1, 2), (2, 0)]);
/// ```
#[must_use]
pub fn bfs_edges(graph: &CsrGraph, start: NodeId, depth: u32) -> Vec<(u32, u32)> {
    let num_nodes = graph.num_nodes();
    if (start.0 as usize) >= num_nodes {
        return Vec::new();
    }

    let mut edges = Vec::new();
    let mut level = vec![UNVISITED; num_nodes];
    let mut queue = VecDeque::new();

    level[start.0 as usize] = 0;
    queue.push_back(start.0);

    while let Some(u) = queue.pop_front() {
        let u_level = level[u as usize];
        if u_level > depth {
            continue;
        }

        // outgoing_neighbors cannot fail here: only in-range ids are enqueued
        for &v in graph.outgoing_neighbors(NodeId(u)).unwrap_or(&[]) {
            edges.push((u, v));
            if level[v as usize] == UNVISITED {
                level[v as usize] = u_level + 1;
                queue.push_back(v);
            }
        }
    }

    edges
}
