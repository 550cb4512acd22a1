/*
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{check_vertices, FormatError};

/// A sparse matrix in coordinate (COO) format.
///
/// The edge relation is stored as two parallel arrays of sources and
/// destinations, in arbitrary order. This is the cheapest encoding to build
/// from an unsorted edge list, at the price of one indirection per edge
/// during the weight transfer.
#[derive(Debug, Clone)]
pub struct CooMatrix {
    num_vertices: usize,
    source: Box<[usize]>,
    destination: Box<[usize]>,
}

impl CooMatrix {
    /// Creates a new COO matrix from parallel source and destination arrays.
    ///
    /// The arrays must have the same length, and every index must be smaller
    /// than `num_vertices`.
    pub fn new(
        num_vertices: usize,
        source: Vec<usize>,
        destination: Vec<usize>,
    ) -> Result<Self, FormatError> {
        if source.len() != destination.len() {
            return Err(FormatError::ArcLen {
                sources: source.len(),
                destinations: destination.len(),
            });
        }
        check_vertices(&source, num_vertices)?;
        check_vertices(&destination, num_vertices)?;
        Ok(unsafe { Self::from_parts(num_vertices, source.into(), destination.into()) })
    }

    /// Creates a new COO matrix from the given backing arrays without
    /// validation.
    ///
    /// # Safety
    /// The arrays must have the same length and every index must be smaller
    /// than `num_vertices`.
    pub unsafe fn from_parts(
        num_vertices: usize,
        source: Box<[usize]>,
        destination: Box<[usize]>,
    ) -> Self {
        Self {
            num_vertices,
            source,
            destination,
        }
    }

    /// Returns the number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    /// Returns the number of edges, counting multiplicities.
    pub fn num_edges(&self) -> usize {
        self.source.len()
    }

    /// Returns an iterator over the (source, destination) pairs, in storage
    /// order.
    pub fn arcs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.source
            .iter()
            .copied()
            .zip(self.destination.iter().copied())
    }

    pub(crate) fn out_degrees(&self, outdeg: &mut [usize]) {
        for &s in &self.source {
            outdeg[s] += 1;
        }
    }

    /// Weight transfer over the flat edge list: a single pass, one
    /// contribution per edge, flowing from the source side to the destination
    /// side.
    pub(crate) fn step(&self, damping: f64, rank: &[f64], accum: &mut [f64], outdeg: &[usize]) {
        for (&s, &t) in self.source.iter().zip(self.destination.iter()) {
            if outdeg[s] != 0 {
                accum[t] += damping * rank[s] / outdeg[s] as f64;
            } else {
                accum[t] += damping * rank[s];
            }
        }
    }
}
