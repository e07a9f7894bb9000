//! Curve evaluators: Bezier (de Casteljau), B-spline and NURBS polylines.
//!
//! All evaluators are pure: they borrow the control points, allocate a fresh
//! sample vector and keep no state between calls. Degenerate input degrades
//! instead of failing:
//!
//! - no control points produce no samples,
//! - degrees are clamped to `count - 1` and floored at 1,
//! - a near-zero rational denominator falls back to the unweighted blend.
//!
//! B-spline and NURBS polylines sample the half-open range `[0, 1)` and then
//! append the last control point, so the polyline always ends exactly on it.

use serde::Serialize;

use super::basis::cox_de_boor;
use super::core::{Point3, Tolerance, Vec3, sample_parameter};
use super::knots::{clamp_degree, clamped_knot_vector};

/// Curve form selected by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[repr(u8)]
pub enum CurveKind {
    #[default]
    Bezier = 0,
    BSpline = 1,
    Nurbs = 2,
}

impl CurveKind {
    pub const ALL: [Self; 3] = [Self::Bezier, Self::BSpline, Self::Nurbs];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bezier => "Bezier",
            Self::BSpline => "B-spline",
            Self::Nurbs => "NURBS",
        }
    }

    /// Whether evaluation reads per-point weights.
    #[must_use]
    pub const fn is_rational(self) -> bool {
        matches!(self, Self::Nurbs)
    }
}

impl TryFrom<u8> for CurveKind {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Bezier),
            1 => Ok(Self::BSpline),
            2 => Ok(Self::Nurbs),
            other => Err(other),
        }
    }
}

/// Degree and sample count for curve evaluation.
///
/// The defaults (cubic, 100 samples) are what the editor evaluates every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveSampling {
    /// Requested degree; ignored by Bezier curves, clamped by the others.
    pub degree: usize,
    /// Number of parameter steps.
    pub samples: usize,
}

impl CurveSampling {
    #[must_use]
    pub const fn new(degree: usize, samples: usize) -> Self {
        Self { degree, samples }
    }
}

impl Default for CurveSampling {
    fn default() -> Self {
        Self {
            degree: 3,
            samples: 100,
        }
    }
}

/// Collapses `work` in place with de Casteljau's scheme and returns the point
/// at `t`. `work` must not be empty.
fn de_casteljau(work: &mut [Point3], t: f64) -> Point3 {
    let m = work.len();
    for level in 1..m {
        for j in 0..m - level {
            work[j] = work[j].lerp(work[j + 1], t);
        }
    }
    work[0]
}

/// Point on the Bezier curve defined by `points` at `t`, or `None` when there
/// are no control points.
#[must_use]
pub fn bezier_point_at(points: &[Point3], t: f64) -> Option<Point3> {
    if points.is_empty() {
        return None;
    }
    let mut work = points.to_vec();
    Some(de_casteljau(&mut work, t))
}

/// Samples a Bezier curve at `num_samples + 1` uniform parameters
/// `t = i / num_samples`.
///
/// A single control point is returned once, without sampling.
#[must_use]
pub fn evaluate_bezier_curve(points: &[Point3], num_samples: usize) -> Vec<Point3> {
    match points {
        [] => Vec::new(),
        [single] => vec![*single],
        _ => {
            let mut work = Vec::with_capacity(points.len());
            (0..=num_samples)
                .map(|i| {
                    work.clear();
                    work.extend_from_slice(points);
                    de_casteljau(&mut work, sample_parameter(i, num_samples))
                })
                .collect()
        }
    }
}

fn blend(points: &[Point3], degree: usize, knots: &[f64], u: f64) -> Vec3 {
    let mut acc = Vec3::ZERO;
    for (i, point) in points.iter().enumerate() {
        let basis = cox_de_boor(i, degree, u, knots);
        acc += basis * point.to_vec3();
    }
    acc
}

/// Point on a non-rational B-spline at `u`.
///
/// `knots` must hold `points.len() + degree + 1` values.
#[must_use]
pub fn bspline_point_at(points: &[Point3], degree: usize, knots: &[f64], u: f64) -> Point3 {
    blend(points, degree, knots, u).into()
}

/// Point on a NURBS curve at `u`.
///
/// When the weighted basis sum is within [`Tolerance::RATIONAL_DENOMINATOR`] of
/// zero the sample falls back to the unweighted blend.
#[must_use]
pub fn nurbs_point_at(
    points: &[Point3],
    weights: &[f64],
    degree: usize,
    knots: &[f64],
    u: f64,
) -> Point3 {
    let mut numerator = Vec3::ZERO;
    let mut denominator = 0.0;
    for (i, point) in points.iter().enumerate() {
        let basis = cox_de_boor(i, degree, u, knots);
        let w = weights[i];
        numerator += (w * basis) * point.to_vec3();
        denominator += w * basis;
    }

    if denominator.abs() > Tolerance::RATIONAL_DENOMINATOR.eps {
        (numerator / denominator).into()
    } else {
        log::debug!("degenerate rational denominator {denominator} at u={u}, using unweighted blend");
        bspline_point_at(points, degree, knots, u)
    }
}

/// Samples a clamped B-spline at `u = s / num_samples` for `s` in
/// `0..num_samples`, then appends the last control point.
///
/// Fewer than two control points are returned unchanged.
#[must_use]
pub fn evaluate_bspline_curve(points: &[Point3], degree: usize, num_samples: usize) -> Vec<Point3> {
    let Some((&last, _)) = points.split_last() else {
        return Vec::new();
    };
    if points.len() < 2 {
        return points.to_vec();
    }

    let degree = clamp_degree(degree, points.len());
    let knots = clamped_knot_vector(points.len(), degree);

    let mut curve = Vec::with_capacity(num_samples + 1);
    curve.extend((0..num_samples).map(|s| {
        bspline_point_at(points, degree, &knots, sample_parameter(s, num_samples))
    }));
    curve.push(last);
    curve
}

/// Rational counterpart of [`evaluate_bspline_curve`].
///
/// `weights` must hold exactly one positive weight per control point; keeping
/// the two sequences in sync is the caller's job (the editor refills weights
/// with `1.0` whenever the point count changes).
#[must_use]
pub fn evaluate_nurbs_curve(
    points: &[Point3],
    weights: &[f64],
    degree: usize,
    num_samples: usize,
) -> Vec<Point3> {
    debug_assert_eq!(
        points.len(),
        weights.len(),
        "nurbs curve needs one weight per control point"
    );

    let Some((&last, _)) = points.split_last() else {
        return Vec::new();
    };
    if points.len() < 2 {
        return points.to_vec();
    }

    let degree = clamp_degree(degree, points.len());
    let knots = clamped_knot_vector(points.len(), degree);

    let mut curve = Vec::with_capacity(num_samples + 1);
    curve.extend((0..num_samples).map(|s| {
        nurbs_point_at(points, weights, degree, &knots, sample_parameter(s, num_samples))
    }));
    curve.push(last);
    curve
}

/// Dispatches to the evaluator for `kind`. `weights` is only read for
/// [`CurveKind::Nurbs`].
#[must_use]
pub fn evaluate_curve(
    kind: CurveKind,
    points: &[Point3],
    weights: &[f64],
    sampling: CurveSampling,
) -> Vec<Point3> {
    match kind {
        CurveKind::Bezier => evaluate_bezier_curve(points, sampling.samples),
        CurveKind::BSpline => evaluate_bspline_curve(points, sampling.degree, sampling.samples),
        CurveKind::Nurbs => {
            evaluate_nurbs_curve(points, weights, sampling.degree, sampling.samples)
        }
    }
}
