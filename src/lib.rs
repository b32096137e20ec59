//! veloz-graph: in-memory CSR engine for large sparse directed graphs
//!
//! # Overview
//!
//! veloz-graph ingests edge-list text dumps (SNAP-style, millions of edges),
//! holds them in a cache-friendly CSR (Compressed Sparse Row) layout, and
//! answers structural queries at interactive latencies. A binary sidecar
//! cache (`<source>.bin`) amortizes text parsing across sessions.
//!
//! # Quick Start
//!
//! ```no_run
//! use veloz_graph::{bfs_edges, critical_node, CsrGraph};
//!
//! # fn example() -> veloz_graph::Result<()> {
//! // Cache-first load: parses the text dump once, then reloads the
//! // sidecar in later sessions
//! let graph = CsrGraph::from_file("web-Google.txt")?;
//!
//! println!("{} nodes, {} edges", graph.num_nodes(), graph.num_edges());
//!
//! // Hub vertex and a shallow neighborhood around it, for rendering
//! if let Some(hub) = critical_node(&graph) {
//!     let edges = bfs_edges(&graph, hub, 2);
//!     println!("{} edges within 2 hops of node {}", edges.len(), hub.0);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Storage**: CSR arrays built in three passes over the edge stream,
//!   with no intermediate adjacency lists
//! - **Persistence**: flat little-endian binary sidecar, trusted only after
//!   structural validation
//! - **Algorithms**: critical-node scan and depth-bounded BFS that reports
//!   every examined edge
//!
//! The engine performs no internal threading and no async I/O; a graph
//! instance belongs to one logical caller at a time.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod algorithms;
pub mod backend;
pub mod storage;

// Re-export core types
pub use algorithms::{bfs_edges, critical_node, stats, GraphStats};
pub use backend::GraphBackend;
pub use storage::{cache_path, CacheError, CsrGraph, EdgeListReader, EdgeSource, NodeId};

// Error type
pub use anyhow::{Error, Result};
