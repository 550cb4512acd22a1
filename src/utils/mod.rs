/*
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Compensated reducers over dense vectors.
//!
//! Both the normalization of the rank vector and the convergence metric are
//! sums over all vertices; naive sequential addition lets rounding error grow
//! with the number of terms. These reducers use Kahan-style compensated
//! summation (via [`KahanSum`]), which bounds the error to a constant number
//! of ulps independently of the length, at the price of a few extra
//! floating-point operations per term.
//!
//! Both reducers are deterministic given the input order. They are not
//! guaranteed to match naive summation bit for bit.

use kahan::KahanSum;

/// Returns the sum of the elements of a slice, computed with compensated
/// summation.
pub fn kahan_sum(a: &[f64]) -> f64 {
    let mut sum = KahanSum::<f64>::new();
    for &x in a {
        sum += x;
    }
    sum.sum()
}

/// Returns the ℓ₁ distance between two slices, that is, the sum of
/// `|b[i] - a[i]|`, computed with compensated summation.
///
/// # Panics
///
/// Panics if the slices have different lengths.
pub fn l1_diff(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "vector length mismatch");
    let mut sum = KahanSum::<f64>::new();
    for (&x, &y) in a.iter().zip(b.iter()) {
        sum += (y - x).abs();
    }
    sum.sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kahan_sum_recovers_lost_bits() {
        // One unit followed by a million terms each below half an ulp of 1.0:
        // naive left-to-right addition returns exactly 1.0, while the
        // compensated sum recovers the 1E-10 tail.
        let mut v = vec![1.0];
        v.extend(std::iter::repeat(1E-16).take(1_000_000));

        let naive: f64 = v.iter().sum();
        assert_eq!(naive, 1.0);

        let compensated = kahan_sum(&v);
        let exact = 1.0 + 1E-10;
        assert!((compensated - exact).abs() < 1E-15);
    }

    #[test]
    fn test_kahan_sum_empty() {
        assert_eq!(kahan_sum(&[]), 0.0);
    }

    #[test]
    fn test_l1_diff() {
        let a = [0.25, 0.25, 0.5];
        let b = [0.5, 0.25, 0.25];
        assert_eq!(l1_diff(&a, &b), 0.5);
        assert_eq!(l1_diff(&a, &a), 0.0);
    }

    #[test]
    #[should_panic(expected = "length mismatch")]
    fn test_l1_diff_length_mismatch() {
        l1_diff(&[0.0], &[0.0, 1.0]);
    }
}
