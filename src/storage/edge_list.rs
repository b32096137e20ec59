//! Edge-list text input (SNAP-style dumps)
//!
//! # Format
//!
//! ```text
//! # Directed graph: web-Google.txt
//! # Nodes: 875713 Edges: 5105039
//! 0 11342
//! 0 824020
//! ...
//! ```
//!
//! A leading block of `#` comment lines is skipped once; everything after it
//! is whitespace-separated decimal node-id tokens, two per edge. Pairs may
//! span line breaks. A `#` past the comment block is a parse error, not a
//! comment.

use anyhow::{bail, Context, Result};
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::Path;

use crate::storage::CsrGraph;

/// A rewindable stream of `(source, target)` edges
///
/// The CSR builder traverses its input three times; implementors must
/// reproduce the same edge sequence after every [`rewind`](EdgeSource::rewind).
pub trait EdgeSource {
    /// Yield the next edge, or `None` at a clean end of stream
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failure or malformed input.
    fn next_edge(&mut self) -> Result<Option<(u32, u32)>>;

    /// Return the cursor to the first edge
    ///
    /// # Errors
    ///
    /// Returns an error if repositioning the underlying stream fails.
    fn rewind(&mut self) -> Result<()>;
}

/// Buffered reader for edge-list text files
///
/// Opening the file consumes the leading comment block and remembers the
/// byte offset right after it (the data-start position), so rewinding is a
/// seek rather than a reopen. The file stays open for the reader's lifetime
/// and is released on drop, on every exit path.
pub struct EdgeListReader {
    reader: BufReader<File>,
    /// Byte offset of the first data line
    data_start: u64,
    /// Tokens parsed from the current line, drained front to back
    tokens: VecDeque<u32>,
    line: String,
}

impl EdgeListReader {
    /// Open an edge-list file and position the cursor at data-start
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file =
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
        let mut reader = BufReader::new(file);

        // Skip the leading comment block; data-start is the offset of the
        // first line whose first non-whitespace character is not '#'.
        let mut data_start = 0u64;
        let mut line = String::new();
        loop {
            line.clear();
            let consumed = reader
                .read_line(&mut line)
                .with_context(|| format!("failed to read {}", path.display()))?;
            if consumed == 0 {
                break;
            }
            if line.trim_start().starts_with('#') {
                data_start += consumed as u64;
            } else {
                break;
            }
        }
        reader.seek(SeekFrom::Start(data_start))?;

        Ok(Self {
            reader,
            data_start,
            tokens: VecDeque::new(),
            line: String::new(),
        })
    }

    /// Byte offset of the first data line
    #[must_use]
    pub fn data_start(&self) -> u64 {
        self.data_start
    }

    fn next_token(&mut self) -> Result<Option<u32>> {
        loop {
            if let Some(token) = self.tokens.pop_front() {
                return Ok(Some(token));
            }
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            for raw in self.line.split_whitespace() {
                let id: u32 = raw
                    .parse()
                    .with_context(|| format!("invalid node id {raw:?} in edge list"))?;
                self.tokens.push_back(id);
            }
        }
    }
}

impl EdgeSource for EdgeListReader {
    fn next_edge(&mut self) -> Result<Option<(u32, u32)>> {
        let Some(u) = self.next_token()? else {
            return Ok(None);
        };
        let Some(v) = self.next_token()? else {
            bail!("truncated edge pair at end of stream");
        };
        Ok(Some((u, v)))
    }

    fn rewind(&mut self) -> Result<()> {
        self.tokens.clear();
        self.reader.seek(SeekFrom::Start(self.data_start))?;
        Ok(())
    }
}

impl CsrGraph {
    /// Build a graph from an edge-list text file
    ///
    /// Runs the three-pass CSR construction over the file, rewinding
    /// between passes. The cache sidecar is not consulted; see
    /// [`CsrGraph::from_file`] for the cache-first load path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or contains malformed
    /// edge data.
    pub fn from_edge_list_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut reader = EdgeListReader::open(path)?;
        Self::from_edge_source(&mut reader)
    }
}
