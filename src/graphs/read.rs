/*
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Boundary adapters for the textual graph-description format.
//!
//! A graph file starts with a header line containing a format tag
//! (case-insensitive), followed by the vertex count and the edge count, one
//! per line. A `COO` body then contains one `"<source> <destination>"` line
//! per edge; a `CSR` or `CSC` body contains one line per vertex, in
//! increasing order, starting with the vertex index itself (a consistency
//! check) followed by its neighbors (destinations for CSR, sources for CSC).
//!
//! The `CSC-CSR` tag marks a file whose leading adjacency section can be read
//! as either grouping; [`GraphFormat::CscCsr`] reads it as compressed sparse
//! rows.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::str::FromStr;

use super::{CooMatrix, CscMatrix, CsrMatrix, FormatError, SparseMatrix};

/// The format tag of a graph file, selecting the encoding to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum GraphFormat {
    /// Coordinate list ([`CooMatrix`]).
    Coo,
    /// Compressed sparse rows ([`CsrMatrix`]).
    Csr,
    /// Compressed sparse columns ([`CscMatrix`]).
    Csc,
    /// Dual-format file, read as compressed sparse rows.
    CscCsr,
}

impl GraphFormat {
    /// Returns whether a header tag is acceptable for this format.
    fn accepts(&self, tag: &str) -> bool {
        match self {
            GraphFormat::Coo => tag.eq_ignore_ascii_case("COO"),
            GraphFormat::Csr => {
                tag.eq_ignore_ascii_case("CSR") || tag.eq_ignore_ascii_case("CSC-CSR")
            }
            GraphFormat::Csc => {
                tag.eq_ignore_ascii_case("CSC") || tag.eq_ignore_ascii_case("CSC-CSR")
            }
            GraphFormat::CscCsr => tag.eq_ignore_ascii_case("CSC-CSR"),
        }
    }

    /// Returns a description of the acceptable header tags, for error
    /// messages.
    fn expected(&self) -> &'static str {
        match self {
            GraphFormat::Coo => "\"COO\"",
            GraphFormat::Csr => "\"CSR\" or \"CSC-CSR\"",
            GraphFormat::Csc => "\"CSC\" or \"CSC-CSR\"",
            GraphFormat::CscCsr => "\"CSC-CSR\"",
        }
    }
}

impl FromStr for GraphFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("COO") {
            Ok(GraphFormat::Coo)
        } else if s.eq_ignore_ascii_case("CSR") {
            Ok(GraphFormat::Csr)
        } else if s.eq_ignore_ascii_case("CSC") {
            Ok(GraphFormat::Csc)
        } else if s.eq_ignore_ascii_case("CSC-CSR") {
            Ok(GraphFormat::CscCsr)
        } else {
            Err(FormatError::Header {
                got: s.into(),
                expected: "\"COO\", \"CSR\", \"CSC\", or \"CSC-CSR\"",
            })
        }
    }
}

impl std::fmt::Display for GraphFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            GraphFormat::Coo => "COO",
            GraphFormat::Csr => "CSR",
            GraphFormat::Csc => "CSC",
            GraphFormat::CscCsr => "CSC-CSR",
        })
    }
}

/// Errors raised while reading a graph file: either the description is
/// malformed or the underlying read failed.
#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Line-by-line reader keeping track of the current line number for error
/// reporting.
struct LineReader<R> {
    lines: io::Lines<R>,
    line: usize,
}

impl<R: BufRead> LineReader<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
        }
    }

    fn next_line(&mut self) -> Result<String, ReadError> {
        self.line += 1;
        match self.lines.next() {
            Some(line) => Ok(line?),
            None => Err(FormatError::Truncated.into()),
        }
    }

    fn next_count(&mut self) -> Result<usize, ReadError> {
        let line = self.next_line()?;
        Ok(parse_index(line.trim(), self.line)?)
    }
}

fn parse_index(token: &str, line: usize) -> Result<usize, FormatError> {
    token.parse().map_err(|_| FormatError::Integer {
        line,
        token: token.into(),
    })
}

/// Reads a graph description from a reader and builds the matrix encoding
/// selected by `format`.
pub fn read_graph(format: GraphFormat, reader: impl BufRead) -> Result<SparseMatrix, ReadError> {
    let mut rd = LineReader::new(reader);

    let header = rd.next_line()?;
    let tag = header.trim();
    if !format.accepts(tag) {
        return Err(FormatError::Header {
            got: tag.into(),
            expected: format.expected(),
        }
        .into());
    }

    let num_vertices = rd.next_count()?;
    let num_edges = rd.next_count()?;

    match format {
        GraphFormat::Coo => {
            let mut source = Vec::with_capacity(num_edges);
            let mut destination = Vec::with_capacity(num_edges);
            for _ in 0..num_edges {
                let line = rd.next_line()?;
                let mut tokens = line.split_whitespace();
                let (Some(s), Some(t)) = (tokens.next(), tokens.next()) else {
                    return Err(FormatError::ArcPair { line: rd.line }.into());
                };
                source.push(parse_index(s, rd.line)?);
                destination.push(parse_index(t, rd.line)?);
            }
            Ok(CooMatrix::new(num_vertices, source, destination)?.into())
        }
        GraphFormat::Csr | GraphFormat::CscCsr => {
            let (offsets, neighbors) = read_adjacency(&mut rd, num_vertices, num_edges)?;
            Ok(CsrMatrix::new(num_vertices, offsets, neighbors)?.into())
        }
        GraphFormat::Csc => {
            let (offsets, neighbors) = read_adjacency(&mut rd, num_vertices, num_edges)?;
            Ok(CscMatrix::new(num_vertices, offsets, neighbors)?.into())
        }
    }
}

/// Reads the per-vertex adjacency body shared by the CSR and CSC formats,
/// returning the offset and neighbor arrays.
fn read_adjacency<R: BufRead>(
    rd: &mut LineReader<R>,
    num_vertices: usize,
    num_edges: usize,
) -> Result<(Vec<usize>, Vec<usize>), ReadError> {
    let mut offsets = Vec::with_capacity(num_vertices + 1);
    offsets.push(0);
    let mut neighbors = Vec::with_capacity(num_edges);

    for v in 0..num_vertices {
        let line = rd.next_line()?;
        let mut tokens = line.split_whitespace();
        let got = parse_index(tokens.next().unwrap_or(""), rd.line)?;
        if got != v {
            return Err(FormatError::VertexIndex {
                line: rd.line,
                got,
                expected: v,
            }
            .into());
        }
        for token in tokens {
            neighbors.push(parse_index(token, rd.line)?);
        }
        offsets.push(neighbors.len());
    }

    if neighbors.len() != num_edges {
        return Err(FormatError::EdgeCount {
            declared: num_edges,
            found: neighbors.len(),
        }
        .into());
    }

    Ok((offsets, neighbors))
}

/// Opens a graph file and reads it with [`read_graph`].
pub fn read_graph_file(
    format: GraphFormat,
    path: impl AsRef<Path>,
) -> Result<SparseMatrix, ReadError> {
    let file = File::open(path)?;
    read_graph(format, BufReader::new(file))
}

/// Writes a rank vector as one `"<vertex_index> <rank_value>"` line per
/// vertex, in vertex-index order.
pub fn write_ranks(mut writer: impl Write, rank: &[f64]) -> io::Result<()> {
    for (vertex, value) in rank.iter().enumerate() {
        writeln!(writer, "{} {}", vertex, value)?;
    }
    Ok(())
}
