//! CSR (Compressed Sparse Row) graph representation
//!
//! # CSR Format
//!
//! ```text
//! Graph: 0 → 1, 0 → 2, 1 → 2
//!
//! CSR:
//!   row_offsets: [0, 2, 3, 3]  // Node 0: edges [0..2), Node 1: [2..3), Node 2: [3..3)
//!   col_indices: [1, 2, 2]     // Edge 0 → node 1, edge 1 → node 2, edge 2 → node 2
//! ```
//!
//! Neighbors of a node appear in `col_indices` in the order their edges
//! appeared in the input. Duplicate edges and self-loops are kept as given.

use anyhow::{anyhow, ensure, Result};

use crate::storage::edge_list::EdgeSource;

/// Node identifier (zero-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// CSR (Compressed Sparse Row) graph
///
/// Optimized for:
/// - O(1) access to outgoing edges (two array lookups)
/// - Cache-friendly sequential scans over `col_indices`
/// - Exact-size allocations: no growth after construction
///
/// Once built, the graph is immutable for the rest of its lifetime.
///
/// # Example
///
/// ```
/// use veloz_graph::{CsrGraph, NodeId};
///
/// let edges = vec![(NodeId(0), NodeId(1)), (NodeId(0), NodeId(2))];
/// let graph = CsrGraph::from_edge_list(&edges).unwrap();
///
/// let neighbors = graph.outgoing_neighbors(NodeId(0)).unwrap();
/// assert_eq!(neighbors, &[1, 2]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrGraph {
    /// Row offsets: node i's edges start at `row_offsets`[i]
    /// Length: `num_nodes` + 1
    row_offsets: Vec<u32>,

    /// Column indices (edge targets)
    /// Length: `num_edges`
    col_indices: Vec<u32>,

    /// Number of nodes
    num_nodes: usize,
}

impl CsrGraph {
    /// Create new empty graph
    #[must_use]
    pub fn new() -> Self {
        Self {
            row_offsets: vec![0],
            col_indices: Vec::new(),
            num_nodes: 0,
        }
    }

    /// Build a graph from an in-memory edge list
    ///
    /// Node count is derived from the highest node id seen; nodes without
    /// incident edges in `[0, max_id]` get empty rows. Edge order within a
    /// row matches slice order, duplicates included.
    ///
    /// # Errors
    ///
    /// Returns an error if a node id or the edge count exceeds the `u32`
    /// range of the CSR arrays.
    pub fn from_edge_list(edges: &[(NodeId, NodeId)]) -> Result<Self> {
        Self::from_edge_source(&mut SliceEdges::new(edges))
    }

    /// Build a graph from a rewindable edge stream in three passes
    ///
    /// 1. Dimension pass: count edges, find the maximum node id.
    /// 2. Histogram pass: per-node out-degree counts, folded into
    ///    `row_offsets` as an exclusive prefix sum.
    /// 3. Scatter pass: place each target into `col_indices` through a
    ///    cursor copy of `row_offsets`, preserving input order.
    ///
    /// No intermediate adjacency lists are built; auxiliary memory is one
    /// `u32` per node and both output arrays are allocated to exact size.
    ///
    /// # Errors
    ///
    /// Returns an error if the stream fails to read or rewind, or if a
    /// node id or the edge count exceeds the `u32` range.
    pub fn from_edge_source<S: EdgeSource>(source: &mut S) -> Result<Self> {
        // Pass 1: dimensions
        let mut max_id: Option<u32> = None;
        let mut num_edges: u64 = 0;
        while let Some((u, v)) = source.next_edge()? {
            let pair_max = u.max(v);
            max_id = Some(max_id.map_or(pair_max, |m| m.max(pair_max)));
            num_edges += 1;
        }
        ensure!(
            num_edges <= u64::from(u32::MAX),
            "edge count {num_edges} exceeds u32 offset range"
        );
        let num_nodes = match max_id {
            None => return Ok(Self::new()),
            Some(m) => {
                ensure!(m < u32::MAX, "node id {m} exhausts the u32 id space");
                m as usize + 1
            }
        };

        // Pass 2: histogram + exclusive prefix sum
        source.rewind()?;
        let mut counts = vec![0u32; num_nodes];
        while let Some((u, _)) = source.next_edge()? {
            counts[u as usize] += 1;
        }
        let mut row_offsets = Vec::with_capacity(num_nodes + 1);
        let mut offset = 0u32;
        row_offsets.push(offset);
        for count in &counts {
            offset += count;
            row_offsets.push(offset);
        }

        // Pass 3: scatter in input order
        source.rewind()?;
        let mut cursor = row_offsets.clone();
        #[allow(clippy::cast_possible_truncation)] // checked against u32::MAX above
        let mut col_indices = vec![0u32; num_edges as usize];
        while let Some((u, v)) = source.next_edge()? {
            let slot = cursor[u as usize];
            col_indices[slot as usize] = v;
            cursor[u as usize] = slot + 1;
        }
        debug_assert!(cursor[..num_nodes]
            .iter()
            .zip(&row_offsets[1..])
            .all(|(c, r)| c == r));

        Ok(Self {
            row_offsets,
            col_indices,
            num_nodes,
        })
    }

    /// Reassemble a graph from raw CSR arrays, checking the invariants
    ///
    /// Used by the cache codec; any inconsistency is an error, never a
    /// partially constructed graph.
    pub(crate) fn from_parts(
        row_offsets: Vec<u32>,
        col_indices: Vec<u32>,
        num_nodes: usize,
    ) -> Result<Self> {
        let graph = Self {
            row_offsets,
            col_indices,
            num_nodes,
        };
        graph.validate()?;
        Ok(graph)
    }

    /// Check the CSR structural invariants
    ///
    /// - `row_offsets` has `num_nodes + 1` entries, starts at 0, is
    ///   non-decreasing, and ends at `num_edges`
    /// - every column index is a valid node id
    ///
    /// Construction enforces these; `validate` re-checks state that came
    /// from outside, e.g. a cache file.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first violated invariant.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.row_offsets.len() == self.num_nodes + 1,
            "row_offsets has {} entries, expected {}",
            self.row_offsets.len(),
            self.num_nodes + 1
        );
        ensure!(
            self.row_offsets[0] == 0,
            "row_offsets must start at 0, found {}",
            self.row_offsets[0]
        );
        ensure!(
            self.row_offsets.windows(2).all(|w| w[0] <= w[1]),
            "row_offsets is not monotonically non-decreasing"
        );
        let last = *self
            .row_offsets
            .last()
            .ok_or_else(|| anyhow!("row_offsets is empty"))?;
        ensure!(
            last as usize == self.col_indices.len(),
            "row_offsets ends at {last} but col_indices has {} entries",
            self.col_indices.len()
        );
        if let Some(&bad) = self
            .col_indices
            .iter()
            .find(|&&v| v as usize >= self.num_nodes)
        {
            return Err(anyhow!(
                "column index {bad} out of range for {} nodes",
                self.num_nodes
            ));
        }
        Ok(())
    }

    /// Get outgoing neighbors of a node, in input edge order
    ///
    /// # Errors
    ///
    /// Returns an error if the node id is out of bounds
    pub fn outgoing_neighbors(&self, node: NodeId) -> Result<&[u32]> {
        ensure!(
            (node.0 as usize) < self.num_nodes,
            "node id {} out of bounds",
            node.0
        );

        let idx = node.0 as usize;
        let start = self.row_offsets[idx] as usize;
        let end = self.row_offsets[idx + 1] as usize;

        Ok(&self.col_indices[start..end])
    }

    /// Get the out-degree of a node
    ///
    /// # Errors
    ///
    /// Returns an error if the node id is out of bounds
    pub fn out_degree(&self, node: NodeId) -> Result<u32> {
        ensure!(
            (node.0 as usize) < self.num_nodes,
            "node id {} out of bounds",
            node.0
        );

        let idx = node.0 as usize;
        Ok(self.row_offsets[idx + 1] - self.row_offsets[idx])
    }

    /// Get number of nodes
    #[must_use]
    pub const fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Get number of edges
    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.col_indices.len()
    }

    /// Get the raw CSR arrays
    #[must_use]
    pub fn csr_components(&self) -> (&[u32], &[u32]) {
        (&self.row_offsets, &self.col_indices)
    }
}

impl Default for CsrGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Adapter that replays an edge slice through the three-pass builder
struct SliceEdges<'a> {
    edges: &'a [(NodeId, NodeId)],
    pos: usize,
}

impl<'a> SliceEdges<'a> {
    fn new(edges: &'a [(NodeId, NodeId)]) -> Self {
        Self { edges, pos: 0 }
    }
}

impl EdgeSource for SliceEdges<'_> {
    fn next_edge(&mut self) -> Result<Option<(u32, u32)>> {
        let edge = self.edges.get(self.pos).map(|&(u, v)| (u.0, v.0));
        self.pos += 1;
        Ok(edge)
    }

    fn rewind(&mut self) -> Result<()> {
        self.pos = 0;
        Ok(())
    }
}
