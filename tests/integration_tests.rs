//! Integration tests for veloz-graph
//!
//! Drives real files through the cache-first load path: text parsing,
//! sidecar round-trips, corruption fall-through, and the query surface on
//! the resulting graphs.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;
use veloz_graph::{bfs_edges, cache_path, critical_node, stats, CsrGraph, NodeId};

fn write_edge_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_comments_only_file_loads_empty_graph() {
    let dir = tempdir().unwrap();
    let path = write_edge_file(dir.path(), "empty.txt", "# comment\n");

    let graph = CsrGraph::from_file(&path).unwrap();

    assert_eq!(graph.num_nodes(), 0);
    assert_eq!(graph.num_edges(), 0);
    assert_eq!(graph.csr_components().0, &[0]);
    assert_eq!(graph.csr_components().1.len(), 0);
    assert_eq!(critical_node(&graph), None);
    assert_eq!(bfs_edges(&graph, NodeId(0), 5), vec![]);
}

#[test]
fn test_triangle() {
    let dir = tempdir().unwrap();
    let path = write_edge_file(dir.path(), "triangle.txt", "0 1\n1 2\n2 0\n");

    let graph = CsrGraph::from_file(&path).unwrap();

    assert_eq!(graph.num_nodes(), 3);
    assert_eq!(graph.num_edges(), 3);
    assert_eq!(graph.csr_components().0, &[0, 1, 2, 3]);
    assert_eq!(graph.csr_components().1, &[1, 2, 0]);
    assert_eq!(critical_node(&graph), Some(NodeId(0)));
    assert_eq!(bfs_edges(&graph, NodeId(0), 10), vec![(0, 1), (1, 2), (2, 0)]);
}

#[test]
fn test_bfs_depth_cap_on_chain() {
    let dir = tempdir().unwrap();
    let path = write_edge_file(dir.path(), "chain.txt", "0 1\n1 2\n2 3\n3 4\n");

    let graph = CsrGraph::from_file(&path).unwrap();

    // Node 3 sits at level 3 > depth, so edge (3, 4) is never examined
    assert_eq!(bfs_edges(&graph, NodeId(0), 2), vec![(0, 1), (1, 2), (2, 3)]);
}

#[test]
fn test_sparse_high_id() {
    let dir = tempdir().unwrap();
    let path = write_edge_file(dir.path(), "sparse.txt", "0 1000\n");

    let graph = CsrGraph::from_file(&path).unwrap();

    assert_eq!(graph.num_nodes(), 1001);
    assert_eq!(graph.num_edges(), 1);
    assert_eq!(critical_node(&graph), Some(NodeId(0)));
    for node in 1..=1000u32 {
        assert_eq!(graph.out_degree(NodeId(node)).unwrap(), 0);
    }
}

#[test]
fn test_multigraph_duplicates_preserved() {
    let dir = tempdir().unwrap();
    let path = write_edge_file(dir.path(), "multi.txt", "0 1\n0 1\n0 2\n");

    let graph = CsrGraph::from_file(&path).unwrap();

    assert_eq!(graph.csr_components().1, &[1, 1, 2]);
}

#[test]
fn test_cache_round_trip_survives_source_deletion() {
    let dir = tempdir().unwrap();
    let path = write_edge_file(dir.path(), "triangle.txt", "0 1\n1 2\n2 0\n");

    let first = CsrGraph::from_file(&path).unwrap();

    // The first load leaves a sidecar behind
    let sidecar = cache_path(&path);
    assert!(sidecar.exists());

    // Reload purely from cache
    fs::remove_file(&path).unwrap();
    let second = CsrGraph::from_file(&path).unwrap();

    assert_eq!(second.csr_components(), first.csr_components());
    assert_eq!(critical_node(&second), critical_node(&first));
    assert_eq!(
        bfs_edges(&second, NodeId(0), 10),
        bfs_edges(&first, NodeId(0), 10)
    );
}

#[test]
fn test_corrupt_cache_falls_through_to_text() {
    let dir = tempdir().unwrap();
    let path = write_edge_file(dir.path(), "g.txt", "0 1\n1 0\n");

    let first = CsrGraph::from_file(&path).unwrap();

    // Clobber the sidecar; the loader must fall back to the text source
    let sidecar = cache_path(&path);
    fs::write(&sidecar, b"garbage").unwrap();

    let second = CsrGraph::from_file(&path).unwrap();
    assert_eq!(second, first);

    // And the fall-through rewrites a usable cache
    let reread = CsrGraph::read_cache(&sidecar).unwrap();
    assert_eq!(reread, first);
}

#[test]
fn test_stale_cache_is_rebuilt_from_text() {
    let dir = tempdir().unwrap();
    let path = write_edge_file(dir.path(), "g.txt", "0 1\n");

    let first = CsrGraph::from_file(&path).unwrap();
    assert_eq!(first.num_edges(), 1);

    // tmpfs and ext4 keep sub-second mtimes; the pause orders the files
    std::thread::sleep(std::time::Duration::from_millis(50));
    fs::write(&path, "0 1\n1 2\n").unwrap();

    let second = CsrGraph::from_file(&path).unwrap();
    assert_eq!(second.num_edges(), 2);
    assert_eq!(second.num_nodes(), 3);
}

#[test]
fn test_load_on_missing_file_leaves_graph_empty() {
    let dir = tempdir().unwrap();

    let mut graph = CsrGraph::new();
    graph.load(dir.path().join("absent.txt"));

    assert_eq!(graph.num_nodes(), 0);
    assert_eq!(graph.num_edges(), 0);
}

#[test]
fn test_load_on_malformed_file_leaves_graph_empty() {
    let dir = tempdir().unwrap();
    let path = write_edge_file(dir.path(), "bad.txt", "0 1\nnot numbers\n");

    let mut graph = CsrGraph::new();
    graph.load(&path);

    assert_eq!(graph.num_nodes(), 0);
    assert_eq!(graph.num_edges(), 0);

    // A failed parse must not leave a sidecar behind
    assert!(!cache_path(&path).exists());
}

#[test]
fn test_load_populates_in_place() {
    let dir = tempdir().unwrap();
    let path = write_edge_file(dir.path(), "g.txt", "# SNAP-ish header\n0 1\n0 2\n");

    let mut graph = CsrGraph::new();
    graph.load(&path);

    assert_eq!(graph.num_nodes(), 3);
    assert_eq!(graph.num_edges(), 2);

    let summary = stats(&graph);
    assert_eq!(summary.critical_node, Some(NodeId(0)));
    assert_eq!(summary.max_out_degree, 2);
}

#[test]
fn test_larger_chain_end_to_end() {
    let dir = tempdir().unwrap();
    let mut contents = String::from("# chain\n");
    for i in 0..1000 {
        contents.push_str(&format!("{} {}\n", i, i + 1));
    }
    let path = write_edge_file(dir.path(), "chain.txt", &contents);

    let graph = CsrGraph::from_file(&path).unwrap();

    assert_eq!(graph.num_nodes(), 1001);
    assert_eq!(graph.num_edges(), 1000);
    assert_eq!(graph.outgoing_neighbors(NodeId(0)).unwrap(), &[1]);
    assert_eq!(graph.outgoing_neighbors(NodeId(999)).unwrap(), &[1000]);

    // Levels 0..=10 expand, one edge each down the chain
    assert_eq!(bfs_edges(&graph, NodeId(0), 10).len(), 11);
}
