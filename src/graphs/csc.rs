/*
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{check_offsets, check_vertices, FormatError};

/// A sparse matrix in compressed sparse columns (CSC) format.
///
/// Edges are grouped by destination vertex, symmetrically to
/// [`CsrMatrix`](super::CsrMatrix): `col_offset[v] .. col_offset[v + 1]`
/// delimits the block of `row` holding the sources of vertex `v`'s incoming
/// edges.
///
/// Since the incoming block of a vertex says nothing about its out-degree,
/// the weight transfer needs the precomputed out-degree vector.
#[derive(Debug, Clone)]
pub struct CscMatrix {
    col_offset: Box<[usize]>,
    row: Box<[usize]>,
}

impl CscMatrix {
    /// Creates a new CSC matrix from an offset array and a source array.
    ///
    /// `col_offset` must have length `num_vertices + 1`, be non-decreasing,
    /// and end with `row.len()`; every source must be smaller than
    /// `num_vertices`.
    pub fn new(
        num_vertices: usize,
        col_offset: Vec<usize>,
        row: Vec<usize>,
    ) -> Result<Self, FormatError> {
        check_offsets(&col_offset, num_vertices, row.len())?;
        check_vertices(&row, num_vertices)?;
        Ok(unsafe { Self::from_parts(col_offset.into(), row.into()) })
    }

    /// Creates a new CSC matrix from an unsorted edge list by counting sort
    /// on the destination vertex.
    ///
    /// Multiplicities are preserved; the relative order of edges with the
    /// same destination is the order of the input list.
    pub fn from_arcs(num_vertices: usize, arcs: &[(usize, usize)]) -> Result<Self, FormatError> {
        let mut col_offset = vec![0; num_vertices + 1];
        for &(s, t) in arcs {
            if s >= num_vertices {
                return Err(FormatError::OutOfRange {
                    index: s,
                    num_vertices,
                });
            }
            if t >= num_vertices {
                return Err(FormatError::OutOfRange {
                    index: t,
                    num_vertices,
                });
            }
            col_offset[t + 1] += 1;
        }
        for v in 0..num_vertices {
            col_offset[v + 1] += col_offset[v];
        }
        let mut row = vec![0; arcs.len()];
        let mut cursor = col_offset.clone();
        for &(s, t) in arcs {
            row[cursor[t]] = s;
            cursor[t] += 1;
        }
        Ok(unsafe { Self::from_parts(col_offset.into(), row.into()) })
    }

    /// Creates a new CSC matrix from the given backing arrays without
    /// validation.
    ///
    /// # Safety
    /// The offset array must be non-decreasing, have one entry per vertex
    /// plus a final entry equal to `row.len()`, and every source must be a
    /// valid vertex index.
    pub unsafe fn from_parts(col_offset: Box<[usize]>, row: Box<[usize]>) -> Self {
        Self { col_offset, row }
    }

    /// Returns the number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.col_offset.len() - 1
    }

    /// Returns the number of edges, counting multiplicities.
    pub fn num_edges(&self) -> usize {
        self.row.len()
    }

    /// Returns the sources of the incoming edges of `vertex`.
    pub fn predecessors(&self, vertex: usize) -> &[usize] {
        &self.row[self.col_offset[vertex]..self.col_offset[vertex + 1]]
    }

    /// Returns an iterator over the (source, destination) pairs, grouped by
    /// destination.
    pub fn arcs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.num_vertices())
            .flat_map(move |v| self.predecessors(v).iter().map(move |&s| (s, v)))
    }

    pub(crate) fn out_degrees(&self, outdeg: &mut [usize]) {
        for &s in &self.row {
            outdeg[s] += 1;
        }
    }

    /// Weight transfer by destination blocks: each vertex gathers the
    /// contributions of its predecessors, so every accumulator slot is
    /// written by exactly one block.
    pub(crate) fn step(&self, damping: f64, rank: &[f64], accum: &mut [f64], outdeg: &[usize]) {
        for v in 0..self.num_vertices() {
            for &s in self.predecessors(v) {
                if outdeg[s] != 0 {
                    accum[v] += damping * rank[s] / outdeg[s] as f64;
                } else {
                    accum[v] += damping * rank[s];
                }
            }
        }
    }
}
