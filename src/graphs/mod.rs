/*
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Sparse encodings of the adjacency matrix of a directed graph.
//!
//! The edge relation is a multiset of (source, destination) pairs; duplicates
//! and self-loops are permitted, and duplicates contribute additively to the
//! weight transfer. The three encodings store the same relation with
//! different groupings:
//!
//! - [`CooMatrix`]: a flat list of pairs, in arbitrary order;
//! - [`CsrMatrix`]: destinations grouped by source, with an offset array;
//! - [`CscMatrix`]: sources grouped by destination, with an offset array.
//!
//! [`SparseMatrix`] is the closed sum of the three: the variant set is fixed
//! and exhaustive, so the per-encoding traversal logic is dispatched by a
//! `match` that the compiler checks for exhaustiveness.
//!
//! All encodings are immutable once constructed, and all structural
//! validation happens at construction time: a [`FormatError`] from a
//! constructor means no usable matrix was built, while a successfully built
//! matrix can be iterated upon without further checks.

mod coo;
mod csc;
mod csr;
mod read;

pub use coo::CooMatrix;
pub use csc::CscMatrix;
pub use csr::CsrMatrix;
pub use read::{read_graph, read_graph_file, write_ranks, GraphFormat, ReadError};

/// Errors raised by malformed graph descriptions, either while parsing the
/// textual format or while validating backing arrays at construction time.
#[derive(thiserror::Error, Debug)]
pub enum FormatError {
    #[error("Premature end of file")]
    Truncated,

    #[error("Wrong header, got {got:?} while expecting {expected}")]
    Header { got: String, expected: &'static str },

    #[error("Invalid integer {token:?} at line {line}")]
    Integer { line: usize, token: String },

    #[error("Expected \"<source> <destination>\" at line {line}")]
    ArcPair { line: usize },

    #[error("Vertex index mismatch at line {line}: got {got}, expecting {expected}")]
    VertexIndex {
        line: usize,
        got: usize,
        expected: usize,
    },

    #[error("Vertex index {index} out of range for {num_vertices} vertices")]
    OutOfRange { index: usize, num_vertices: usize },

    #[error("Header declares {declared} edges but the body contains {found}")]
    EdgeCount { declared: usize, found: usize },

    #[error("Offset array of length {len} does not match {num_vertices} vertices")]
    OffsetLen { len: usize, num_vertices: usize },

    #[error("Offset array is not non-decreasing at position {pos}")]
    OffsetOrder { pos: usize },

    #[error("Last offset is {last} but there are {num_edges} edges")]
    OffsetEnd { last: usize, num_edges: usize },

    #[error("Source and destination arrays have different lengths ({sources} vs. {destinations})")]
    ArcLen {
        sources: usize,
        destinations: usize,
    },
}

/// Validates an offset array against the number of vertices and edges it
/// indexes: length `num_vertices + 1`, non-decreasing, last entry equal to
/// `num_edges`.
pub(crate) fn check_offsets(
    offsets: &[usize],
    num_vertices: usize,
    num_edges: usize,
) -> Result<(), FormatError> {
    if offsets.len() != num_vertices + 1 {
        return Err(FormatError::OffsetLen {
            len: offsets.len(),
            num_vertices,
        });
    }
    for (pos, pair) in offsets.windows(2).enumerate() {
        if pair[0] > pair[1] {
            return Err(FormatError::OffsetOrder { pos: pos + 1 });
        }
    }
    let last = *offsets.last().unwrap_or(&0);
    if last != num_edges {
        return Err(FormatError::OffsetEnd { last, num_edges });
    }
    Ok(())
}

/// Validates that every vertex index in a slice is smaller than
/// `num_vertices`.
pub(crate) fn check_vertices(vertices: &[usize], num_vertices: usize) -> Result<(), FormatError> {
    for &index in vertices {
        if index >= num_vertices {
            return Err(FormatError::OutOfRange {
                index,
                num_vertices,
            });
        }
    }
    Ok(())
}

/// The adjacency matrix of a directed graph in one of three sparse
/// encodings.
///
/// All variants expose the same capability set: [out-degree
/// computation](Self::out_degrees) and the [single-iteration weight
/// transfer](Self::step). For the same edge relation the encodings produce
/// identical out-degree vectors and mathematically equivalent transfers; the
/// floating-point rounding path differs with the traversal order, but the
/// steady state reached by the [driver](crate::rank::PowerIteration) agrees
/// across encodings well within the convergence tolerance.
#[derive(Debug, Clone)]
pub enum SparseMatrix {
    Coo(CooMatrix),
    Csr(CsrMatrix),
    Csc(CscMatrix),
}

impl SparseMatrix {
    /// Returns the number of vertices.
    pub fn num_vertices(&self) -> usize {
        match self {
            SparseMatrix::Coo(m) => m.num_vertices(),
            SparseMatrix::Csr(m) => m.num_vertices(),
            SparseMatrix::Csc(m) => m.num_vertices(),
        }
    }

    /// Returns the number of edges, counting multiplicities.
    pub fn num_edges(&self) -> usize {
        match self {
            SparseMatrix::Coo(m) => m.num_edges(),
            SparseMatrix::Csr(m) => m.num_edges(),
            SparseMatrix::Csc(m) => m.num_edges(),
        }
    }

    /// Computes the out-degree of every vertex.
    ///
    /// The result depends only on the edge relation, not on the encoding.
    pub fn out_degrees(&self) -> Box<[usize]> {
        let mut outdeg = vec![0; self.num_vertices()].into_boxed_slice();
        match self {
            SparseMatrix::Coo(m) => m.out_degrees(&mut outdeg),
            SparseMatrix::Csr(m) => m.out_degrees(&mut outdeg),
            SparseMatrix::Csc(m) => m.out_degrees(&mut outdeg),
        }
        outdeg
    }

    /// Performs one iteration's weight transfer.
    ///
    /// For every edge (*s*, *t*) of the relation, adds `damping * rank[s] /
    /// outdeg[s]` to `accum[t]`: each vertex pushes its current rank, divided
    /// evenly among its outgoing edges, to each of its successors. If
    /// `outdeg[s]` is zero—possible only if `outdeg` was not computed from
    /// this matrix, since the edge itself is an outgoing edge of *s*—the
    /// contribution `damping * rank[s]` is added undivided.
    ///
    /// `accum` is not cleared: contributions are added to whatever it
    /// contains, so callers must zero it between iterations.
    ///
    /// # Panics
    ///
    /// Panics if the lengths of `rank`, `accum`, or `outdeg` differ from the
    /// number of vertices.
    pub fn step(&self, damping: f64, rank: &[f64], accum: &mut [f64], outdeg: &[usize]) {
        let n = self.num_vertices();
        assert_eq!(rank.len(), n, "rank vector length mismatch");
        assert_eq!(accum.len(), n, "accumulator length mismatch");
        assert_eq!(outdeg.len(), n, "out-degree vector length mismatch");
        match self {
            SparseMatrix::Coo(m) => m.step(damping, rank, accum, outdeg),
            SparseMatrix::Csr(m) => m.step(damping, rank, accum),
            SparseMatrix::Csc(m) => m.step(damping, rank, accum, outdeg),
        }
    }

    /// Returns the edge relation as a list of (source, destination) pairs.
    ///
    /// The order depends on the encoding, but the multiset of pairs is the
    /// canonical relation shared by all encodings.
    pub fn arcs(&self) -> Vec<(usize, usize)> {
        match self {
            SparseMatrix::Coo(m) => m.arcs().collect(),
            SparseMatrix::Csr(m) => m.arcs().collect(),
            SparseMatrix::Csc(m) => m.arcs().collect(),
        }
    }
}

impl From<CooMatrix> for SparseMatrix {
    fn from(m: CooMatrix) -> Self {
        SparseMatrix::Coo(m)
    }
}

impl From<CsrMatrix> for SparseMatrix {
    fn from(m: CsrMatrix) -> Self {
        SparseMatrix::Csr(m)
    }
}

impl From<CscMatrix> for SparseMatrix {
    fn from(m: CscMatrix) -> Self {
        SparseMatrix::Csc(m)
    }
}
