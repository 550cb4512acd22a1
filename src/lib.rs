/*
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! PageRank by power iteration over sparse adjacency matrices.
//!
//! This crate computes the PageRank vector of a directed graph by repeated
//! application of the weight-transfer step of a [sparse
//! matrix](graphs::SparseMatrix), which is a closed sum of three
//! interchangeable encodings of the same edge relation: [coordinate
//! list](graphs::CooMatrix), [compressed sparse rows](graphs::CsrMatrix)
//! (edges grouped by source), and [compressed sparse
//! columns](graphs::CscMatrix) (edges grouped by destination). The
//! [driver](rank::PowerIteration) depends only on the shared contract of the
//! sum type, so the steady state it converges to does not depend on the
//! encoding.
//!
//! The computation is single-threaded and deterministic: running twice on the
//! same input produces bit-for-bit identical rank vectors. Accumulations that
//! affect convergence testing and normalization use [compensated
//! summation](utils).
//!
//! # Examples
//!
//! ```
//! use sparse_rank::graphs::{CooMatrix, SparseMatrix};
//! use sparse_rank::rank::PowerIteration;
//!
//! // 3-cycle: 0 → 1 → 2 → 0
//! let matrix: SparseMatrix =
//!     CooMatrix::new(3, vec![0, 1, 2], vec![1, 2, 0])?.into();
//!
//! let mut pr = PowerIteration::new(&matrix);
//! let outcome = pr.run();
//!
//! assert!(outcome.is_converged());
//! for &r in pr.rank() {
//!     assert!((r - 1.0 / 3.0).abs() < 1E-7);
//! }
//! # Ok::<(), sparse_rank::graphs::FormatError>(())
//! ```

#[cfg(feature = "cli")]
pub mod cli;
pub mod graphs;
pub mod rank;
pub mod utils;

pub mod prelude {
    pub use crate::graphs::{
        CooMatrix, CscMatrix, CsrMatrix, FormatError, GraphFormat, ReadError, SparseMatrix,
    };
    pub use crate::rank::{Outcome, PowerIteration};
}
