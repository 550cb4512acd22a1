/*
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use sparse_rank::graphs::{CooMatrix, CscMatrix, CsrMatrix, SparseMatrix};
use sparse_rank::rank::{Outcome, PowerIteration};

/// Builds the three encodings of the same edge relation.
fn encodings(n: usize, arcs: &[(usize, usize)]) -> [SparseMatrix; 3] {
    let (source, destination): (Vec<_>, Vec<_>) = arcs.iter().copied().unzip();
    [
        CooMatrix::new(n, source, destination).unwrap().into(),
        CsrMatrix::from_arcs(n, arcs).unwrap().into(),
        CscMatrix::from_arcs(n, arcs).unwrap().into(),
    ]
}

fn random_arcs(n: usize, m: usize, rng: &mut SmallRng) -> Vec<(usize, usize)> {
    (0..m)
        .map(|_| (rng.random_range(0..n), rng.random_range(0..n)))
        .collect()
}

/// Returns the ℓ∞ distance (maximum absolute difference) between two vectors.
fn l_inf_distance(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

/// Independent reference implementation working directly on the edge list:
/// scatter, uniform redistribution of the missing mass, naive summation.
/// Iterates to a much tighter threshold than the driver under test.
fn oracle(n: usize, arcs: &[(usize, usize)], damping: f64) -> Vec<f64> {
    let mut outdeg = vec![0usize; n];
    for &(s, _) in arcs {
        outdeg[s] += 1;
    }
    let mut x = vec![1.0 / n as f64; n];
    loop {
        let mut y = vec![0.0; n];
        for &(s, t) in arcs {
            y[t] += damping * x[s] / outdeg[s] as f64;
        }
        let w = 1.0 - y.iter().sum::<f64>();
        for y_i in &mut y {
            *y_i += w / n as f64;
        }
        let delta: f64 = x.iter().zip(y.iter()).map(|(a, b)| (a - b).abs()).sum();
        x = y;
        if delta <= 1E-14 {
            return x;
        }
    }
}

/// Single edge 0 → 1: the expected ranks come from solving the 2×2 system
/// x = d·M·x + (1 − d)/n by hand, with the dangling vertex 1 patched by a
/// uniform column. Eliminating x₁ = (1 + d)·x₀ yields x₀ = 1/(2 + d).
#[test]
fn test_two_vertices_single_edge() {
    let d = 0.85;
    let expected = [1.0 / (2.0 + d), (1.0 + d) / (2.0 + d)];

    for matrix in encodings(2, &[(0, 1)]) {
        let mut pr = PowerIteration::new(&matrix);
        pr.tolerance(1E-12).max_iter(10_000);
        let outcome = pr.run();

        assert!(outcome.is_converged(), "{matrix:?}");
        assert!(l_inf_distance(pr.rank(), &expected) < 1E-9);
        assert!(pr.rank()[1] > pr.rank()[0]);
    }
}

/// A 3-cycle is vertex-transitive, so the stationary distribution is uniform.
/// Default settings must reach the default tolerance within the default
/// budget.
#[test]
fn test_three_cycle_uniform() {
    for matrix in encodings(3, &[(0, 1), (1, 2), (2, 0)]) {
        let mut pr = PowerIteration::new(&matrix);
        let outcome = pr.run();

        assert!(outcome.is_converged(), "{matrix:?}");
        for &r in pr.rank() {
            assert!((r - 1.0 / 3.0).abs() < 1E-9);
        }
    }
}

/// Vertex 2 has no outgoing edges; its rank must be redistributed through the
/// teleport step and the distribution must still sum to one.
#[test]
fn test_dangling_vertex() {
    for matrix in encodings(3, &[(0, 1), (0, 2), (1, 2)]) {
        let mut pr = PowerIteration::new(&matrix);
        let outcome = pr.run();

        assert!(outcome.is_converged(), "{matrix:?}");
        assert!((pr.rank().iter().sum::<f64>() - 1.0).abs() < 1E-12);
        for &r in pr.rank() {
            assert!(r >= 0.0);
        }
        // Vertex 2 receives two edges and gives back nothing
        assert!(pr.rank()[2] > pr.rank()[1]);
    }
}

/// Stops the iteration after every possible number of steps and checks that
/// the rank vector sums to one at each of them, dangling vertices included.
#[test]
fn test_mass_conservation_every_iteration() {
    let mut rng = SmallRng::seed_from_u64(3);
    let n = 30;
    let mut arcs = random_arcs(n, 90, &mut rng);
    // Force a couple of dangling vertices
    arcs.retain(|&(s, _)| s != 0 && s != 1);

    for matrix in encodings(n, &arcs) {
        for budget in 1..=20 {
            let mut pr = PowerIteration::new(&matrix);
            pr.tolerance(f64::MIN_POSITIVE).max_iter(budget);
            let outcome = pr.run();

            assert_eq!(outcome, Outcome::Exhausted { iterations: budget });
            assert!(
                (pr.rank().iter().sum::<f64>() - 1.0).abs() < 1E-12,
                "budget {budget}"
            );
            for &r in pr.rank() {
                assert!(r >= 0.0);
            }
        }
    }
}

/// Runs the three encodings to convergence on the same random graphs: the
/// steady states must agree well within the convergence tolerance even
/// though the intermediate rounding paths differ.
#[test]
fn test_cross_encoding_equivalence() {
    let mut rng = SmallRng::seed_from_u64(4);
    for &(n, m, seed) in &[(10, 30, 0u64), (100, 400, 1), (500, 3000, 2)] {
        let mut rng_graph = SmallRng::seed_from_u64(seed);
        let mut arcs = random_arcs(n, m, &mut rng_graph);
        // A random dangling vertex
        let dangling = rng.random_range(0..n);
        arcs.retain(|&(s, _)| s != dangling);

        let matrices = encodings(n, &arcs);
        let mut ranks = Vec::new();
        for matrix in &matrices {
            let mut pr = PowerIteration::new(matrix);
            pr.tolerance(1E-12).max_iter(10_000);
            assert!(pr.run().is_converged());
            ranks.push(pr.rank().to_vec());
        }
        for rank in &ranks[1..] {
            assert!(
                l_inf_distance(&ranks[0], rank) < 1E-9,
                "n={n} m={m}: ℓ∞={}",
                l_inf_distance(&ranks[0], rank)
            );
        }
    }
}

/// Cross-validates the driver against the independent edge-list reference on
/// random graphs with dangling vertices.
#[test]
fn test_against_reference() {
    for &(n, m, seed) in &[(10, 30, 5u64), (50, 200, 6), (200, 1000, 7)] {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut arcs = random_arcs(n, m, &mut rng);
        arcs.retain(|&(s, _)| s != 0);

        for &damping in &[0.25, 0.50, 0.85] {
            let expected = oracle(n, &arcs, damping);
            for matrix in encodings(n, &arcs) {
                let mut pr = PowerIteration::new(&matrix);
                pr.damping(damping).tolerance(1E-13).max_iter(10_000);
                assert!(pr.run().is_converged());
                assert!(
                    l_inf_distance(&expected, pr.rank()) < 1E-8,
                    "n={n} damping={damping}: ℓ∞={}",
                    l_inf_distance(&expected, pr.rank())
                );
            }
        }
    }
}

#[test]
fn test_exhaustion_is_nonfatal() {
    let matrix: SparseMatrix = CsrMatrix::from_arcs(2, &[(0, 1)]).unwrap().into();
    let mut pr = PowerIteration::new(&matrix);
    pr.tolerance(1E-15).max_iter(1);
    let outcome = pr.run();

    assert_eq!(outcome, Outcome::Exhausted { iterations: 1 });
    assert!(!outcome.is_converged());
    assert_eq!(pr.iterations(), 1);
    // The best-effort result is still a distribution
    assert!((pr.rank().iter().sum::<f64>() - 1.0).abs() < 1E-12);
}

#[test]
fn test_empty_graph() {
    let matrix: SparseMatrix = CooMatrix::new(0, vec![], vec![]).unwrap().into();
    let mut pr = PowerIteration::new(&matrix);
    let outcome = pr.run();

    assert_eq!(outcome, Outcome::Converged { iterations: 0 });
    assert!(pr.rank().is_empty());
}

#[test]
fn test_single_vertex_no_edges() {
    let matrix: SparseMatrix = CooMatrix::new(1, vec![], vec![]).unwrap().into();
    let mut pr = PowerIteration::new(&matrix);
    let outcome = pr.run();

    assert!(outcome.is_converged());
    assert!((pr.rank()[0] - 1.0).abs() < 1E-12);
}

#[test]
#[should_panic(expected = "damping factor")]
fn test_damping_out_of_range() {
    let matrix: SparseMatrix = CooMatrix::new(1, vec![], vec![]).unwrap().into();
    PowerIteration::new(&matrix).damping(1.0);
}

#[test]
#[should_panic(expected = "tolerance")]
fn test_nonpositive_tolerance() {
    let matrix: SparseMatrix = CooMatrix::new(1, vec![], vec![]).unwrap().into();
    PowerIteration::new(&matrix).tolerance(0.0);
}
