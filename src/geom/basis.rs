//! Blending functions shared by the curve and surface evaluators.
//!
//! - [`bernstein`] weights control points of Bezier forms.
//! - [`cox_de_boor`] is the recursive B-spline basis used by B-spline and NURBS
//!   forms. It is not memoized; cost grows exponentially with the degree.

use super::core::Tolerance;

/// Binomial coefficient `C(n, k)` as `f64`, computed iteratively.
///
/// Exact for the degrees of interactive editing; high degrees (64+ control
/// rows) lose low-order bits to `f64` rounding instead of overflowing.
///
/// Returns 0 when `k > n`.
#[must_use]
pub fn binomial_coefficient(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }

    let k = k.min(n - k);
    let mut result = 1.0;
    for i in 0..k {
        // The running value is C(n, i + 1).
        result = result * (n - i) as f64 / (i + 1) as f64;
    }
    result
}

/// Bernstein polynomial `B(n, i, t) = C(n,i) · t^i · (1−t)^(n−i)`.
///
/// Returns 0 when `i > n`.
#[must_use]
pub fn bernstein(n: usize, i: usize, t: f64) -> f64 {
    if i > n {
        return 0.0;
    }
    binomial_coefficient(n, i) * t.powi(i as i32) * (1.0 - t).powi((n - i) as i32)
}

/// Index of the last knot span with non-zero length, i.e. the last `i` with
/// `knots[i] < knots[i + 1]`.
fn last_nonempty_span(knots: &[f64]) -> Option<usize> {
    (0..knots.len().saturating_sub(1))
        .rev()
        .find(|&i| knots[i] < knots[i + 1])
}

/// Cox–de Boor B-spline basis function `N(i, k, u)` over `knots`.
///
/// The degree-0 case uses half-open spans `[knots[i], knots[i+1])`; at the
/// final knot value the last non-empty span is closed so the basis still sums
/// to one at `u = 1`. Terms whose knot difference is below
/// [`Tolerance::BASIS_DENOMINATOR`] are dropped, which handles the repeated
/// knots of clamped vectors.
///
/// Callers must keep `i + k + 1 < knots.len()`.
#[must_use]
pub fn cox_de_boor(i: usize, k: usize, u: f64, knots: &[f64]) -> f64 {
    if k == 0 {
        if knots[i] <= u && u < knots[i + 1] {
            return 1.0;
        }
        let Some(&last) = knots.last() else {
            return 0.0;
        };
        if u >= last && last_nonempty_span(knots) == Some(i) {
            return 1.0;
        }
        return 0.0;
    }

    let tol = Tolerance::BASIS_DENOMINATOR;
    let mut result = 0.0;

    // Left term: (u - k_i) / (k_{i+k} - k_i) * N(i, k-1)
    let denom1 = knots[i + k] - knots[i];
    if denom1.abs() > tol.eps {
        result += (u - knots[i]) / denom1 * cox_de_boor(i, k - 1, u, knots);
    }

    // Right term: (k_{i+k+1} - u) / (k_{i+k+1} - k_{i+1}) * N(i+1, k-1)
    let denom2 = knots[i + k + 1] - knots[i + 1];
    if denom2.abs() > tol.eps {
        result += (knots[i + k + 1] - u) / denom2 * cox_de_boor(i + 1, k - 1, u, knots);
    }

    result
}

/// All `count` basis values `N(0..count, degree, u)` at one parameter.
///
/// Identical to calling [`cox_de_boor`] for each index; the surface evaluator
/// uses it to evaluate each axis once per sample instead of once per term.
#[must_use]
pub fn basis_row(count: usize, degree: usize, u: f64, knots: &[f64]) -> Vec<f64> {
    (0..count).map(|i| cox_de_boor(i, degree, u, knots)).collect()
}

/// All `n + 1` Bernstein values `B(n, 0..=n, t)`.
#[must_use]
pub fn bernstein_row(n: usize, t: f64) -> Vec<f64> {
    (0..=n).map(|i| bernstein(n, i, t)).collect()
}
