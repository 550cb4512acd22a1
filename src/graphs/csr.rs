/*
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{check_offsets, check_vertices, FormatError};

/// A sparse matrix in compressed sparse rows (CSR) format.
///
/// Edges are grouped by source vertex: `row_offset[v] .. row_offset[v + 1]`
/// delimits the block of `col` holding the destinations of vertex `v`'s
/// outgoing edges. The offset array has one entry per vertex plus a final
/// entry equal to the number of edges.
///
/// During the weight transfer the out-degree of a vertex is the length of its
/// block, so this encoding needs no separate out-degree vector.
#[derive(Debug, Clone)]
pub struct CsrMatrix {
    row_offset: Box<[usize]>,
    col: Box<[usize]>,
}

impl CsrMatrix {
    /// Creates a new CSR matrix from an offset array and a destination array.
    ///
    /// `row_offset` must have length `num_vertices + 1`, be non-decreasing,
    /// and end with `col.len()`; every destination must be smaller than
    /// `num_vertices`.
    pub fn new(
        num_vertices: usize,
        row_offset: Vec<usize>,
        col: Vec<usize>,
    ) -> Result<Self, FormatError> {
        check_offsets(&row_offset, num_vertices, col.len())?;
        check_vertices(&col, num_vertices)?;
        Ok(unsafe { Self::from_parts(row_offset.into(), col.into()) })
    }

    /// Creates a new CSR matrix from an unsorted edge list by counting sort
    /// on the source vertex.
    ///
    /// Multiplicities are preserved; the relative order of edges with the
    /// same source is the order of the input list.
    pub fn from_arcs(num_vertices: usize, arcs: &[(usize, usize)]) -> Result<Self, FormatError> {
        let mut row_offset = vec![0; num_vertices + 1];
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
            row_offset[s + 1] += 1;
        }
        for v in 0..num_vertices {
            row_offset[v + 1] += row_offset[v];
        }
        let mut col = vec![0; arcs.len()];
        let mut cursor = row_offset.clone();
        for &(s, t) in arcs {
            col[cursor[s]] = t;
            cursor[s] += 1;
        }
        Ok(unsafe { Self::from_parts(row_offset.into(), col.into()) })
    }

    /// Creates a new CSR matrix from the given backing arrays without
    /// validation.
    ///
    /// # Safety
    /// The offset array must be non-decreasing, have one entry per vertex
    /// plus a final entry equal to `col.len()`, and every destination must be
    /// a valid vertex index.
    pub unsafe fn from_parts(row_offset: Box<[usize]>, col: Box<[usize]>) -> Self {
        Self { row_offset, col }
    }

    /// Returns the number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.row_offset.len() - 1
    }

    /// Returns the number of edges, counting multiplicities.
    pub fn num_edges(&self) -> usize {
        self.col.len()
    }

    /// Returns the destinations of the outgoing edges of `vertex`.
    pub fn successors(&self, vertex: usize) -> &[usize] {
        &self.col[self.row_offset[vertex]..self.row_offset[vertex + 1]]
    }

    /// Returns an iterator over the (source, destination) pairs, grouped by
    /// source.
    pub fn arcs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.num_vertices())
            .flat_map(move |v| self.successors(v).iter().map(move |&t| (v, t)))
    }

    pub(crate) fn out_degrees(&self, outdeg: &mut [usize]) {
        for (v, d) in outdeg.iter_mut().enumerate() {
            *d += self.row_offset[v + 1] - self.row_offset[v];
        }
    }

    /// Weight transfer by source blocks: the out-degree is the block length,
    /// so the per-vertex contribution is computed once and scattered to the
    /// block's destinations. Empty blocks (dangling vertices) transfer
    /// nothing.
    pub(crate) fn step(&self, damping: f64, rank: &[f64], accum: &mut [f64]) {
        for v in 0..self.num_vertices() {
            let block = self.successors(v);
            if block.is_empty() {
                continue;
            }
            let contribution = damping * rank[v] / block.len() as f64;
            for &t in block {
                accum[t] += contribution;
            }
        }
    }
}
