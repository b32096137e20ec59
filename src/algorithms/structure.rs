//! Degree-based structural queries
//!
//! The critical node is the vertex with the highest out-degree; in social
//! and web graphs it is the natural starting point for a traversal, so the
//! stats bundle hands it to the embedder together with the graph dimensions.

use crate::storage::CsrGraph;
use crate::NodeId;

/// Summary of a loaded graph, cheap enough to recompute per query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphStats {
    /// Number of nodes
    pub num_nodes: usize,
    /// Number of directed edges
    pub num_edges: usize,
    /// Vertex with the highest out-degree, if the graph is non-empty
    pub critical_node: Option<NodeId>,
    /// Out-degree of the critical node (0 on an empty graph)
    pub max_out_degree: u32,
}

/// Find the node with the highest out-degree
///
/// Ties go to the lowest node id. Returns `None` on an empty graph. Runs in
/// O(`num_nodes`) over `row_offsets` with no allocation.
///
/// # Example
///
/// ```
/// use veloz_graph::{critical_node, CsrGraph, NodeId};
///
/// let edges = vec![
///     (NodeId(0), NodeId(1)),
///     (NodeId(2), NodeId(0)),
///     (NodeId(2), NodeId(1)),
/// ];
/// let graph = CsrGraph::from_edge_list(&edges).unwrap();
///
/// assert_eq!(critical_node(&graph), Some(NodeId(2)));
/// ```
#[must_use]
pub fn critical_node(graph: &CsrGraph) -> Option<NodeId> {
    let (row_offsets, _) = graph.csr_components();
    let mut best: Option<(u32, u32)> = None;

    #[allow(clippy::cast_possible_truncation)] // node ids fit u32 by construction
    for (node, window) in row_offsets.windows(2).enumerate() {
        let degree = window[1] - window[0];
        // strict comparison keeps the lowest id on ties
        if best.map_or(true, |(_, max)| degree > max) {
            best = Some((node as u32, degree));
        }
    }

    best.map(|(node, _)| NodeId(node))
}

/// Compute the stats bundle for a graph
#[must_use]
pub fn stats(graph: &CsrGraph) -> GraphStats {
    let (row_offsets, _) = graph.csr_components();
    let max_out_degree = row_offsets
        .windows(2)
        .map(|window| window[1] - window[0])
        .max()
        .unwrap_or(0);

    GraphStats {
        num_nodes: graph.num_nodes(),
        num_edges: graph.num_edges(),
        critical_node: critical_node(graph),
        max_out_degree,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_critical_node_empty_graph() {
        let graph = CsrGraph::new();
        assert_eq!(critical_node(&graph), None);
    }

    #[test]
    fn test_critical_node_simple() {
        let edges = vec![
            (NodeId(0), NodeId(1)),
            (NodeId(1), NodeId(2)),
            (NodeId(1), NodeId(3)),
            (NodeId(1), NodeId(0)),
        ];
        let graph = CsrGraph::from_edge_list(&edges).unwrap();
        assert_eq!(critical_node(&graph), Some(NodeId(1)));
    }

    #[test]
    fn test_critical_node_tie_goes_to_lowest_id() {
        // Nodes 0 and 2 both have out-degree 1
        let edges = vec![(NodeId(2), NodeId(1)), (NodeId(0), NodeId(1))];
        let graph = CsrGraph::from_edge_list(&edges).unwrap();
        assert_eq!(critical_node(&graph), Some(NodeId(0)));
    }

    #[test]
    fn test_critical_node_counts_duplicates() {
        // Multi-edges raise the degree
        let edges = vec![
            (NodeId(0), NodeId(1)),
            (NodeId(1), NodeId(0)),
            (NodeId(1), NodeId(0)),
        ];
        let graph = CsrGraph::from_edge_list(&edges).unwrap();
        assert_eq!(critical_node(&graph), Some(NodeId(1)));
    }

    #[test]
    fn test_critical_node_dominates_all_degrees() {
        let edges = vec![
            (NodeId(0), NodeId(1)),
            (NodeId(0), NodeId(2)),
            (NodeId(3), NodeId(0)),
        ];
        let graph = CsrGraph::from_edge_list(&edges).unwrap();

        let best = critical_node(&graph).unwrap();
        let best_degree = graph.out_degree(best).unwrap();
        for node in 0..graph.num_nodes() {
            #[allow(clippy::cast_possible_truncation)]
            let degree = graph.out_degree(NodeId(node as u32)).unwrap();
            assert!(best_degree >= degree);
        }
    }

    #[test]
    fn test_stats() {
        let edges = vec![
            (NodeId(0), NodeId(1)),
            (NodeId(0), NodeId(2)),
            (NodeId(1), NodeId(2)),
        ];
        let graph = CsrGraph::from_edge_list(&edges).unwrap();

        let stats = stats(&graph);
        assert_eq!(stats.num_nodes, 3);
        assert_eq!(stats.num_edges, 3);
        assert_eq!(stats.critical_node, Some(NodeId(0)));
        assert_eq!(stats.max_out_degree, 2);
    }

    #[test]
    fn test_stats_empty_graph() {
        let stats = stats(&CsrGraph::new());
        assert_eq!(stats.num_nodes, 0);
        assert_eq!(stats.num_edges, 0);
        assert_eq!(stats.critical_node, None);
        assert_eq!(stats.max_out_degree, 0);
    }
}
