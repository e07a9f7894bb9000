//! Tensor-product surface evaluators.
//!
//! Each evaluator samples the inclusive grid `u = i / u_samples`,
//! `v = j / v_samples` and returns `(u_samples + 1) * (v_samples + 1)` points in
//! row-major order (outer loop over `u`, inner over `v`), ready for
//! [`generate_surface_indices`](super::triangulation::generate_surface_indices).
//!
//! Rows of the [`ControlGrid`] run along `u`, columns along `v`. An empty grid
//! yields an empty sample vector in every mode. Per-axis basis values are
//! evaluated once per sample parameter and reused across the other axis.
//!
//! With the `parallel` feature, `u` rows are sampled on the rayon pool; the
//! output order is the same as the sequential path.

use serde::Serialize;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::basis::{basis_row, bernstein_row};
use super::core::{Point3, Tolerance, Vec3, sample_parameter};
use super::grid::ControlGrid;
use super::knots::{clamp_degree, clamped_knot_vector};

/// Surface form selected by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[repr(u8)]
pub enum SurfaceKind {
    #[default]
    Bezier = 0,
    BSpline = 1,
    Nurbs = 2,
}

impl SurfaceKind {
    pub const ALL: [Self; 3] = [Self::Bezier, Self::BSpline, Self::Nurbs];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bezier => "Bezier",
            Self::BSpline => "B-spline",
            Self::Nurbs => "NURBS",
        }
    }
}

impl TryFrom<u8> for SurfaceKind {
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

/// Per-axis degrees and sample counts for surface evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSampling {
    pub degree_u: usize,
    pub degree_v: usize,
    pub u_samples: usize,
    pub v_samples: usize,
}

impl SurfaceSampling {
    #[must_use]
    pub const fn new(degree_u: usize, degree_v: usize, u_samples: usize, v_samples: usize) -> Self {
        Self {
            degree_u,
            degree_v,
            u_samples,
            v_samples,
        }
    }

    /// Number of points an evaluator produces for this sampling.
    #[must_use]
    pub const fn point_count(self) -> usize {
        (self.u_samples + 1) * (self.v_samples + 1)
    }
}

impl Default for SurfaceSampling {
    fn default() -> Self {
        Self::new(3, 3, 30, 30)
    }
}

#[cfg(feature = "parallel")]
fn sample_rows<F>(u_samples: usize, row: F) -> Vec<Point3>
where
    F: Fn(usize) -> Vec<Point3> + Sync + Send,
{
    let rows: Vec<Vec<Point3>> = (0..=u_samples).into_par_iter().map(row).collect();
    rows.into_iter().flatten().collect()
}

#[cfg(not(feature = "parallel"))]
fn sample_rows<F>(u_samples: usize, row: F) -> Vec<Point3>
where
    F: Fn(usize) -> Vec<Point3>,
{
    (0..=u_samples).flat_map(row).collect()
}

fn tensor_blend(grid: &ControlGrid<Point3>, basis_u: &[f64], basis_v: &[f64]) -> Vec3 {
    let mut acc = Vec3::ZERO;
    for (k, row) in grid.iter_rows().enumerate() {
        let bu = basis_u[k];
        for (l, point) in row.iter().enumerate() {
            acc += (bu * basis_v[l]) * point.to_vec3();
        }
    }
    acc
}

fn rational_tensor_blend(
    grid: &ControlGrid<Point3>,
    weights: &ControlGrid<f64>,
    basis_u: &[f64],
    basis_v: &[f64],
) -> Point3 {
    let mut numerator = Vec3::ZERO;
    let mut denominator = 0.0;
    for (k, (row, row_weights)) in grid.iter_rows().zip(weights.iter_rows()).enumerate() {
        let bu = basis_u[k];
        for (l, (point, w)) in row.iter().zip(row_weights).enumerate() {
            let weight = w * bu * basis_v[l];
            numerator += weight * point.to_vec3();
            denominator += weight;
        }
    }

    if denominator.abs() > Tolerance::RATIONAL_DENOMINATOR.eps {
        (numerator / denominator).into()
    } else {
        log::debug!("degenerate rational surface denominator {denominator}, using unweighted blend");
        tensor_blend(grid, basis_u, basis_v).into()
    }
}

/// Samples a Bezier surface of degree `(rows - 1, cols - 1)`.
#[must_use]
pub fn evaluate_bezier_surface(
    grid: &ControlGrid<Point3>,
    u_samples: usize,
    v_samples: usize,
) -> Vec<Point3> {
    if grid.is_empty() {
        return Vec::new();
    }

    let n = grid.rows() - 1;
    let m = grid.cols() - 1;
    let v_basis: Vec<Vec<f64>> = (0..=v_samples)
        .map(|j| bernstein_row(m, sample_parameter(j, v_samples)))
        .collect();

    sample_rows(u_samples, |i| {
        let u_basis = bernstein_row(n, sample_parameter(i, u_samples));
        v_basis
            .iter()
            .map(|bv| Point3::from(tensor_blend(grid, &u_basis, bv)))
            .collect()
    })
}

struct AxisKnots {
    count: usize,
    degree: usize,
    knots: Vec<f64>,
}

impl AxisKnots {
    fn new(count: usize, requested_degree: usize) -> Self {
        let degree = clamp_degree(requested_degree, count);
        Self {
            count,
            degree,
            knots: clamped_knot_vector(count, degree),
        }
    }

    fn basis(&self, t: f64) -> Vec<f64> {
        basis_row(self.count, self.degree, t, &self.knots)
    }
}

/// Samples a clamped B-spline surface. Each axis gets its own knot vector and
/// its degree is clamped to that axis' control point count.
#[must_use]
pub fn evaluate_bspline_surface(
    grid: &ControlGrid<Point3>,
    degree_u: usize,
    degree_v: usize,
    u_samples: usize,
    v_samples: usize,
) -> Vec<Point3> {
    if grid.is_empty() {
        return Vec::new();
    }

    let axis_u = AxisKnots::new(grid.rows(), degree_u);
    let axis_v = AxisKnots::new(grid.cols(), degree_v);
    let v_basis: Vec<Vec<f64>> = (0..=v_samples)
        .map(|j| axis_v.basis(sample_parameter(j, v_samples)))
        .collect();

    sample_rows(u_samples, |i| {
        let u_basis = axis_u.basis(sample_parameter(i, u_samples));
        v_basis
            .iter()
            .map(|bv| Point3::from(tensor_blend(grid, &u_basis, bv)))
            .collect()
    })
}

/// Samples a NURBS surface.
///
/// `weights` must have exactly the control grid's dimensions; otherwise the
/// result is empty.
#[must_use]
pub fn evaluate_nurbs_surface(
    grid: &ControlGrid<Point3>,
    weights: &ControlGrid<f64>,
    degree_u: usize,
    degree_v: usize,
    u_samples: usize,
    v_samples: usize,
) -> Vec<Point3> {
    if grid.is_empty() {
        return Vec::new();
    }
    if grid.dims() != weights.dims() {
        log::debug!(
            "nurbs surface weight grid {:?} does not match control grid {:?}",
            weights.dims(),
            grid.dims()
        );
        return Vec::new();
    }

    let axis_u = AxisKnots::new(grid.rows(), degree_u);
    let axis_v = AxisKnots::new(grid.cols(), degree_v);
    let v_basis: Vec<Vec<f64>> = (0..=v_samples)
        .map(|j| axis_v.basis(sample_parameter(j, v_samples)))
        .collect();

    sample_rows(u_samples, |i| {
        let u_basis = axis_u.basis(sample_parameter(i, u_samples));
        v_basis
            .iter()
            .map(|bv| rational_tensor_blend(grid, weights, &u_basis, bv))
            .collect()
    })
}

/// Dispatches to the evaluator for `kind`. `weights` is only read for
/// [`SurfaceKind::Nurbs`].
#[must_use]
pub fn evaluate_surface(
    kind: SurfaceKind,
    grid: &ControlGrid<Point3>,
    weights: &ControlGrid<f64>,
    sampling: SurfaceSampling,
) -> Vec<Point3> {
    let SurfaceSampling {
        degree_u,
        degree_v,
        u_samples,
        v_samples,
    } = sampling;
    match kind {
        SurfaceKind::Bezier => evaluate_bezier_surface(grid, u_samples, v_samples),
        SurfaceKind::BSpline => {
            evaluate_bspline_surface(grid, degree_u, degree_v, u_samples, v_samples)
        }
        SurfaceKind::Nurbs => {
            evaluate_nurbs_surface(grid, weights, degree_u, degree_v, u_samples, v_samples)
        }
    }
}
