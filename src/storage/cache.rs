//! Binary sidecar cache for graph persistence
//!
//! Parsing a multi-million-edge text dump takes seconds; replaying the
//! finished CSR arrays from disk takes milliseconds. The cache lives next to
//! the source as `<source>.bin` and mirrors the in-memory layout.
//!
//! # Format (all integers little-endian `u32`)
//!
//! | Offset | Size            | Field         |
//! |--------|-----------------|---------------|
//! | 0      | 4               | magic `VGRF`  |
//! | 4      | 4               | format version|
//! | 8      | 4               | `num_nodes`   |
//! | 12     | 4               | `num_edges`   |
//! | 16     | 4·(num_nodes+1) | `row_offsets` |
//! | ...    | 4·num_edges     | `col_indices` |
//!
//! The cache is an optimization, never a contract: any read failure is
//! reported as a miss and the loader falls back to the text source.

use anyhow::{Context, Result};
use log::{info, warn};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;

use super::CsrGraph;

const MAGIC: &[u8; 4] = b"VGRF";
const FORMAT_VERSION: u32 = 1;

/// Ways a cache file can fail structural checks
///
/// I/O errors are reported through `anyhow` directly; these variants cover
/// files that read fine but do not hold a usable payload.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The file does not start with the cache magic bytes
    #[error("not a graph cache (bad magic bytes)")]
    BadMagic,

    /// The file was written by an incompatible codec revision
    #[error("unsupported cache format version {0}")]
    UnsupportedVersion(u32),

    /// The file length does not match the header's declared dimensions
    #[error("cache size mismatch: header implies {expected} bytes, file has {actual}")]
    SizeMismatch {
        /// Byte length the header implies
        expected: u64,
        /// Actual file length
        actual: u64,
    },
}

/// Derive the sidecar path for a source file
///
/// Appends `.bin` to the complete file name: `web-Google.txt` caches to
/// `web-Google.txt.bin`.
#[must_use]
pub fn cache_path<P: AsRef<Path>>(source: P) -> PathBuf {
    let mut path = source.as_ref().as_os_str().to_os_string();
    path.push(".bin");
    PathBuf::from(path)
}

impl CsrGraph {
    /// Load a graph, preferring the binary cache over the text source
    ///
    /// Reads `<path>.bin` when it exists, parses cleanly, and is not older
    /// than the source; otherwise parses the text file and writes the cache
    /// back for the next session. A cache write failure is logged and
    /// swallowed.
    ///
    /// # Errors
    ///
    /// Returns an error only when neither the cache nor the text source
    /// yields a graph.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let source = path.as_ref();
        let cache = cache_path(source);

        if cache.exists() && !cache_is_stale(source, &cache) {
            match Self::read_cache(&cache) {
                Ok(graph) => {
                    info!(
                        "cache hit: {} ({} nodes, {} edges)",
                        cache.display(),
                        graph.num_nodes(),
                        graph.num_edges()
                    );
                    return Ok(graph);
                }
                Err(err) => {
                    warn!("ignoring unreadable cache {}: {err:#}", cache.display());
                }
            }
        }

        info!("parsing edge list {}", source.display());
        let graph = Self::from_edge_list_file(source)?;
        if let Err(err) = graph.write_cache(&cache) {
            warn!("failed to write cache {}: {err:#}", cache.display());
        }
        Ok(graph)
    }

    /// Load a graph in place, logging failures instead of returning them
    ///
    /// The embedder-facing entry point: on any failure the instance is left
    /// empty, a diagnostic goes to the log, and the host process is never
    /// taken down.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) {
        match Self::from_file(&path) {
            Ok(graph) => *self = graph,
            Err(err) => {
                warn!(
                    "failed to load graph from {}: {err:#}",
                    path.as_ref().display()
                );
                *self = Self::new();
            }
        }
    }

    /// Write the CSR arrays to a cache file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn write_cache<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("failed to create cache {}", path.display()))?;
        let mut writer = BufWriter::new(file);

        let num_nodes =
            u32::try_from(self.num_nodes()).context("node count exceeds cache u32 range")?;
        let num_edges =
            u32::try_from(self.num_edges()).context("edge count exceeds cache u32 range")?;

        writer.write_all(MAGIC)?;
        writer.write_all(&FORMAT_VERSION.to_le_bytes())?;
        writer.write_all(&num_nodes.to_le_bytes())?;
        writer.write_all(&num_edges.to_le_bytes())?;

        let (row_offsets, col_indices) = self.csr_components();
        write_u32_slice(&mut writer, row_offsets)?;
        write_u32_slice(&mut writer, col_indices)?;

        writer
            .flush()
            .with_context(|| format!("failed to flush cache {}", path.display()))?;
        Ok(())
    }

    /// Read a graph back from a cache file
    ///
    /// The header is checked against the actual file length before any
    /// array is allocated, and the resulting graph must pass
    /// [`CsrGraph::validate`]. A file that fails either check is corrupt,
    /// not a graph.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failure, bad magic or version, a size
    /// mismatch, or CSR invariant violations.
    pub fn read_cache<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("failed to open cache {}", path.display()))?;
        let file_len = file.metadata()?.len();
        let mut reader = BufReader::new(file);

        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;
        if magic != *MAGIC {
            return Err(CacheError::BadMagic.into());
        }
        let version = read_u32(&mut reader)?;
        if version != FORMAT_VERSION {
            return Err(CacheError::UnsupportedVersion(version).into());
        }

        let num_nodes = read_u32(&mut reader)? as usize;
        let num_edges = read_u32(&mut reader)? as usize;

        // Reject short or padded files before trusting the header's sizes.
        let expected = 16 + 4 * (num_nodes as u64 + 1) + 4 * num_edges as u64;
        if file_len != expected {
            return Err(CacheError::SizeMismatch {
                expected,
                actual: file_len,
            }
            .into());
        }

        let row_offsets = read_u32_vec(&mut reader, num_nodes + 1)?;
        let col_indices = read_u32_vec(&mut reader, num_edges)?;

        Self::from_parts(row_offsets, col_indices, num_nodes)
            .with_context(|| format!("cache {} holds an inconsistent graph", path.display()))
    }
}

/// A cache older than its source is a miss; a cache without a source
/// (text dump deleted after the first load) is trusted.
fn cache_is_stale(source: &Path, cache: &Path) -> bool {
    match (mtime(source), mtime(cache)) {
        (Some(source_mtime), Some(cache_mtime)) => cache_mtime < source_mtime,
        _ => false,
    }
}

fn mtime(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|meta| meta.modified()).ok()
}

fn write_u32_slice<W: Write>(writer: &mut W, values: &[u32]) -> Result<()> {
    for value in values {
        writer.write_all(&value.to_le_bytes())?;
    }
    Ok(())
}

fn read_u32<R: Read>(reader: &mut R) -> Result<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

fn read_u32_vec<R: Read>(reader: &mut R, len: usize) -> Result<Vec<u32>> {
    let mut bytes = vec![0u8; len * 4];
    reader.read_exact(&mut bytes)?;
    Ok(bytes
        .chunks_exact(4)
        .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect())
}
