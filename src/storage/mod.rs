//! Graph storage layer
//!
//! CSR (Compressed Sparse Row) representation, edge-list text ingestion, and
//! the binary sidecar cache.

pub mod cache;
pub mod csr;
pub mod edge_list;

pub use cache::{cache_path, CacheError};
pub use csr::{CsrGraph, NodeId};
pub use edge_list::{EdgeListReader, EdgeSource};
