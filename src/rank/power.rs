/*
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Sequential power-iteration PageRank.
//!
//! # The formula
//!
//! Let *P* be the row-normalized adjacency matrix of the graph (with zero
//! rows for dangling vertices), **v** the uniform teleport vector (1/*n* in
//! every coordinate), and *d* the damping factor. The rank vector **x** is
//! the stationary distribution of the random-surfer chain: with probability
//! *d* the surfer follows an outgoing edge chosen uniformly, and with
//! probability 1 − *d* (or always, from a dangling vertex) it teleports to a
//! vertex drawn from **v**.
//!
//! # The iteration
//!
//! Each iteration applies the weight transfer of the
//! [matrix](SparseMatrix::step), producing
//!
//! > **y** = *d* **x** *P*,
//!
//! and then folds the teleport share and the dangling leakage into one
//! uniform correction: since ‖**y**‖₁ falls short of 1 by exactly the mass
//! the transfer did not move (the (1 − *d*) teleport share plus the rank held
//! by dangling vertices, scaled by *d*), adding *w* **v** with *w* = 1 −
//! ‖**y**‖₁ restores ‖**y**‖₁ = 1 and distributes both corrections at once.
//!
//! The iteration stops when the ℓ₁ distance between successive rank vectors
//! falls below the [tolerance](PowerIteration::tolerance), or when the
//! [iteration budget](PowerIteration::max_iter) is exhausted; the two
//! terminations are distinguished by the returned [`Outcome`]. Norms and
//! distances are computed with [compensated summation](crate::utils).
//!
//! The computation is single-threaded: for a given input, the sequence of
//! rank vectors is reproducible bit for bit across runs.

use dsi_progress_logger::{no_logging, ProgressLog};

use crate::graphs::SparseMatrix;
use crate::utils::{kahan_sum, l1_diff};

/// Default damping factor.
pub const DEFAULT_DAMPING: f64 = 0.85;
/// Default convergence tolerance on the ℓ₁ distance between successive rank
/// vectors.
pub const DEFAULT_TOLERANCE: f64 = 1E-7;
/// Default iteration budget.
pub const DEFAULT_MAX_ITER: usize = 100;

/// The terminal state of a power-iteration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The ℓ₁ distance between successive rank vectors fell below the
    /// tolerance.
    Converged { iterations: usize },
    /// The iteration budget was exhausted before the tolerance was met. The
    /// rank vector is still a valid best-effort result; callers decide
    /// whether to treat this as an error.
    Exhausted { iterations: usize },
}

impl Outcome {
    /// Returns whether the run converged within the iteration budget.
    pub fn is_converged(&self) -> bool {
        matches!(self, Outcome::Converged { .. })
    }
}

/// Computes PageRank by sequential power iteration.
///
/// The struct is configured via setters and then executed via
/// [`run`](Self::run). After completion the rank vector is available via the
/// [`rank`](Self::rank) method; the final residual and iteration count via
/// [`delta`](Self::delta) and [`iterations`](Self::iterations).
///
/// The matrix encoding is immaterial: all three [`SparseMatrix`] variants
/// drive the iteration to the same steady state.
///
/// # Examples
///
/// Default PageRank (*d* = 0.85, tolerance 10⁻⁷) on a small graph:
///
/// ```
/// use sparse_rank::graphs::{CsrMatrix, SparseMatrix};
/// use sparse_rank::rank::PowerIteration;
///
/// // 0 → 1, 0 → 2, 1 → 2, 2 → 0
/// let matrix: SparseMatrix =
///     CsrMatrix::from_arcs(3, &[(0, 1), (0, 2), (1, 2), (2, 0)])?.into();
///
/// let mut pr = PowerIteration::new(&matrix);
/// let outcome = pr.run();
///
/// assert!(outcome.is_converged());
/// assert!((pr.rank().iter().sum::<f64>() - 1.0).abs() < 1E-9);
/// // Vertex 2 receives edges from both other vertices
/// assert!(pr.rank()[2] > pr.rank()[0]);
/// assert!(pr.rank()[2] > pr.rank()[1]);
/// # Ok::<(), sparse_rank::graphs::FormatError>(())
/// ```
pub struct PowerIteration<'a> {
    matrix: &'a SparseMatrix,
    damping: f64,
    tolerance: f64,
    max_iter: usize,

    rank: Box<[f64]>,
    delta: f64,
    iteration: usize,
}

impl std::fmt::Debug for PowerIteration<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PowerIteration")
            .field("damping", &self.damping)
            .field("tolerance", &self.tolerance)
            .field("max_iter", &self.max_iter)
            .field("delta", &self.delta)
            .field("iteration", &self.iteration)
            .finish_non_exhaustive()
    }
}

impl<'a> PowerIteration<'a> {
    /// Creates a new PageRank computation over the given matrix, with the
    /// default damping factor, tolerance, and iteration budget.
    pub fn new(matrix: &'a SparseMatrix) -> Self {
        let rank = vec![0.0; matrix.num_vertices()].into_boxed_slice();
        Self {
            matrix,
            damping: DEFAULT_DAMPING,
            tolerance: DEFAULT_TOLERANCE,
            max_iter: DEFAULT_MAX_ITER,
            rank,
            delta: f64::INFINITY,
            iteration: 0,
        }
    }

    /// Sets the damping factor *d*.
    ///
    /// # Panics
    ///
    /// Panics if `damping` is not in the interval [0 . . 1).
    pub fn damping(&mut self, damping: f64) -> &mut Self {
        assert!(
            // Note that 0.0..1.0 is [0.0..1.0) in mathematical notation
            (0.0..1.0).contains(&damping),
            "The damping factor must be in [0 . . 1), got {damping}"
        );
        self.damping = damping;
        self
    }

    /// Sets the convergence tolerance on the ℓ₁ distance between successive
    /// rank vectors.
    ///
    /// # Panics
    ///
    /// Panics if `tolerance` is not positive.
    pub fn tolerance(&mut self, tolerance: f64) -> &mut Self {
        assert!(
            tolerance > 0.0,
            "The tolerance must be positive, got {tolerance}"
        );
        self.tolerance = tolerance;
        self
    }

    /// Sets the iteration budget.
    ///
    /// # Panics
    ///
    /// Panics if `max_iter` is zero.
    pub fn max_iter(&mut self, max_iter: usize) -> &mut Self {
        assert!(max_iter > 0, "The iteration budget must be positive");
        self.max_iter = max_iter;
        self
    }

    /// Returns the rank vector.
    ///
    /// After calling [`run`](Self::run), this contains the computed PageRank
    /// values.
    pub fn rank(&self) -> &[f64] {
        &self.rank
    }

    /// Returns the number of iterations performed by the last call to
    /// [`run`](Self::run).
    pub fn iterations(&self) -> usize {
        self.iteration
    }

    /// Returns the ℓ₁ distance between the last two rank vectors.
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Runs the computation until convergence or exhaustion of the iteration
    /// budget.
    pub fn run(&mut self) -> Outcome {
        self.run_with_logging(no_logging![])
    }

    /// Runs the computation until convergence or exhaustion of the iteration
    /// budget, logging progress.
    ///
    /// `pl` is used for iteration-level progress; its options are preserved,
    /// making it possible to customize the log. Pass
    /// [`no_logging![]`](dsi_progress_logger::no_logging) to silence it.
    pub fn run_with_logging(&mut self, pl: &mut impl ProgressLog) -> Outcome {
        let n = self.matrix.num_vertices();
        self.iteration = 0;
        if n == 0 {
            self.delta = 0.0;
            return Outcome::Converged { iterations: 0 };
        }

        log::info!("Damping factor: {}", self.damping);
        log::info!("Tolerance: {}", self.tolerance);
        log::info!("Iteration budget: {}", self.max_iter);

        let inv_n = 1.0 / n as f64;

        // Uniform teleport vector; never mutated after this point.
        let teleport = vec![inv_n; n].into_boxed_slice();
        self.rank.fill(inv_n);

        pl.info(format_args!("Computing out-degrees..."));
        let outdeg = self.matrix.out_degrees();
        let dangling = outdeg.iter().filter(|&&d| d == 0).count();
        log::info!("{} dangling vertices", dangling);

        let mut accum = vec![0.0; n].into_boxed_slice();

        pl.item_name("iteration");
        pl.expected_updates(None);
        pl.start(format!("Computing PageRank (damping={})...", self.damping));

        loop {
            accum.fill(0.0);
            self.matrix
                .step(self.damping, &self.rank, &mut accum, &outdeg);

            // Mass not moved by the transfer: the (1 - d) teleport share plus
            // the rank held by dangling vertices, scaled by d. Redistributing
            // it uniformly restores a unit norm.
            let deficit = 1.0 - kahan_sum(&accum);
            for (y, v) in accum.iter_mut().zip(teleport.iter()) {
                *y += deficit * v;
            }

            self.delta = l1_diff(&self.rank, &accum);
            std::mem::swap(&mut self.rank, &mut accum);
            self.iteration += 1;

            log::info!(
                "Iteration {}: delta = {} norm = {}",
                self.iteration,
                self.delta,
                kahan_sum(&self.rank)
            );
            pl.update_and_display();

            if self.delta <= self.tolerance {
                pl.done();
                return Outcome::Converged {
                    iterations: self.iteration,
                };
            }
            if self.iteration >= self.max_iter {
                pl.done();
                return Outcome::Exhausted {
                    iterations: self.iteration,
                };
            }
        }
    }
}
