/// Builds a clamped, piecewise-uniform knot vector of length
/// `count + degree + 1` on `[0, 1]`.
///
/// The first and last `degree + 1` knots are 0 and 1; the interior knots are
/// evenly spaced strictly between them. `count == 0` or `degree == 0` yields the
/// fallback `[0.0, 1.0]`.
#[must_use]
pub fn clamped_knot_vector(count: usize, degree: usize) -> Vec<f64> {
    if count == 0 || degree < 1 {
        return vec![0.0, 1.0];
    }

    let p = degree;
    let knot_count = count + p + 1;
    let mut knots = vec![0.0; knot_count];

    // When count <= degree the clamped ends overlap and the ones win, keeping
    // the vector non-decreasing.
    for knot in knots.iter_mut().take(p + 1) {
        *knot = 0.0;
    }
    for knot in knots.iter_mut().rev().take(p + 1) {
        *knot = 1.0;
    }

    let interior = knot_count.saturating_sub(2 * (p + 1));
    for i in 0..interior {
        knots[p + 1 + i] = (i + 1) as f64 / (interior + 1) as f64;
    }

    knots
}

/// Clamps a requested degree to what `count` control points can support:
/// at most `count - 1`, at least 1.
#[must_use]
pub fn clamp_degree(requested: usize, count: usize) -> usize {
    let clamped = requested.min(count.saturating_sub(1)).max(1);
    if clamped != requested {
        log::trace!("degree {requested} clamped to {clamped} for {count} control points");
    }
    clamped
}
