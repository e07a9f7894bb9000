//! Editing state for one curve and one surface.
//!
//! The evaluators in [`crate::geom`] are pure; the editors own the control
//! points, their weights and the selected kind, and keep the weight sequences
//! the same shape as the points they belong to.

use crate::geom::{
    ControlGrid, CurveKind, CurveSampling, GeomMetrics, GridError, Point3, SurfaceKind,
    SurfaceMesh, SurfaceSampling, TimingBucket, evaluate_curve, generate_surface_indices,
    mesh_surface_with_metrics,
};

/// Screen-space radius used to pick an existing control point instead of
/// adding a new one.
pub const PICK_RADIUS: f64 = 0.05;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EditorError {
    #[error("control point {index} is out of range for {len} points")]
    PointIndexOutOfRange { index: usize, len: usize },
    #[error("grid cell ({row}, {col}) is out of range for a {rows}x{cols} grid")]
    GridIndexOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    #[error("control point has non-finite coordinates")]
    NonFinitePoint,
    #[error("weight {0} must be finite and greater than zero")]
    InvalidWeight(f64),
    #[error("unknown kind {0}, expected 0 (Bezier), 1 (B-spline) or 2 (NURBS)")]
    UnknownKind(u8),
    #[error(transparent)]
    Grid(#[from] GridError),
}

fn check_point(point: Point3) -> Result<Point3, EditorError> {
    if point.is_finite() {
        Ok(point)
    } else {
        Err(EditorError::NonFinitePoint)
    }
}

fn check_weight(weight: f64) -> Result<f64, EditorError> {
    if weight.is_finite() && weight > 0.0 {
        Ok(weight)
    } else {
        Err(EditorError::InvalidWeight(weight))
    }
}

/// Control polygon plus per-point weights for a single editable curve.
#[derive(Debug, Clone, Default)]
pub struct CurveEditor {
    points: Vec<Point3>,
    weights: Vec<f64>,
    kind: CurveKind,
    sampling: CurveSampling,
}

impl CurveEditor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_sampling(sampling: CurveSampling) -> Self {
        Self {
            sampling,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn kind(&self) -> CurveKind {
        self.kind
    }

    /// Switches the curve form. Changing the kind resets every weight to 1.0.
    pub fn set_kind(&mut self, kind: CurveKind) {
        if kind != self.kind {
            log::debug!("curve kind {} -> {}, weights reset", self.kind.name(), kind.name());
            self.kind = kind;
            self.weights.fill(1.0);
        }
    }

    /// [`set_kind`](Self::set_kind) from a UI combo index (0, 1 or 2).
    pub fn set_kind_index(&mut self, index: u8) -> Result<(), EditorError> {
        let kind = CurveKind::try_from(index).map_err(EditorError::UnknownKind)?;
        self.set_kind(kind);
        Ok(())
    }

    #[must_use]
    pub fn sampling(&self) -> CurveSampling {
        self.sampling
    }

    pub fn set_sampling(&mut self, sampling: CurveSampling) {
        self.sampling = sampling;
    }

    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Appends a control point with weight 1.0 and returns its index.
    pub fn add_point(&mut self, point: Point3) -> Result<usize, EditorError> {
        self.points.push(check_point(point)?);
        self.weights.push(1.0);
        Ok(self.points.len() - 1)
    }

    pub fn move_point(&mut self, index: usize, point: Point3) -> Result<(), EditorError> {
        let point = check_point(point)?;
        let len = self.points.len();
        let slot = self
            .points
            .get_mut(index)
            .ok_or(EditorError::PointIndexOutOfRange { index, len })?;
        *slot = point;
        Ok(())
    }

    /// Removes a control point together with its weight.
    pub fn remove_point(&mut self, index: usize) -> Result<Point3, EditorError> {
        let len = self.points.len();
        if index >= len {
            return Err(EditorError::PointIndexOutOfRange { index, len });
        }
        if index < self.weights.len() {
            self.weights.remove(index);
        }
        Ok(self.points.remove(index))
    }

    pub fn set_weight(&mut self, index: usize, weight: f64) -> Result<(), EditorError> {
        let weight = check_weight(weight)?;
        let len = self.points.len();
        let slot = self
            .weights
            .get_mut(index)
            .ok_or(EditorError::PointIndexOutOfRange { index, len })?;
        *slot = weight;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.weights.clear();
    }

    /// Index of the first control point within `radius` of `position` in the
    /// XY plane.
    #[must_use]
    pub fn pick_point(&self, position: Point3, radius: f64) -> Option<usize> {
        let target = Point3::from_xy(position.x, position.y);
        self.points
            .iter()
            .position(|p| Point3::from_xy(p.x, p.y).distance_to(target) < radius)
    }

    /// A click at `position`: returns the picked point if one lies within
    /// [`PICK_RADIUS`], otherwise adds a new point there.
    pub fn press(&mut self, position: Point3) -> Result<usize, EditorError> {
        match self.pick_point(position, PICK_RADIUS) {
            Some(index) => Ok(index),
            None => self.add_point(position),
        }
    }

    fn sync_weights(&mut self) {
        if self.weights.len() != self.points.len() {
            log::debug!(
                "resyncing {} weights to {} control points",
                self.weights.len(),
                self.points.len()
            );
            self.weights = vec![1.0; self.points.len()];
        }
    }

    /// Samples the curve with the current kind and sampling.
    pub fn evaluate(&mut self) -> Vec<Point3> {
        let mut metrics = GeomMetrics::default();
        self.evaluate_with_metrics(&mut metrics)
    }

    pub fn evaluate_with_metrics(&mut self, metrics: &mut GeomMetrics) -> Vec<Point3> {
        if self.kind.is_rational() {
            self.sync_weights();
        }
        let (kind, sampling) = (self.kind, self.sampling);
        metrics.time(TimingBucket::CurveEvaluation, || {
            evaluate_curve(kind, &self.points, &self.weights, sampling)
        })
    }
}

/// Control grid plus weight grid for a single editable surface.
#[derive(Debug, Clone, Default)]
pub struct SurfaceEditor {
    grid: ControlGrid<Point3>,
    weights: ControlGrid<f64>,
    kind: SurfaceKind,
    sampling: SurfaceSampling,
}

impl SurfaceEditor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_sampling(sampling: SurfaceSampling) -> Self {
        Self {
            sampling,
            ..Self::default()
        }
    }

    /// A `rows x cols` grid spread over the unit square in XY, for a starting
    /// patch.
    #[must_use]
    pub fn planar(rows: usize, cols: usize) -> Self {
        let span = |n: usize, i: usize| if n > 1 { i as f64 / (n - 1) as f64 } else { 0.0 };
        let grid = ControlGrid::from_fn(rows, cols, |r, c| {
            Point3::from_xy(span(rows, r), span(cols, c))
        });
        Self {
            weights: ControlGrid::filled(rows, cols, 1.0),
            grid,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn grid(&self) -> &ControlGrid<Point3> {
        &self.grid
    }

    #[must_use]
    pub fn weights(&self) -> &ControlGrid<f64> {
        &self.weights
    }

    #[must_use]
    pub fn kind(&self) -> SurfaceKind {
        self.kind
    }

    /// Switches the surface form. Changing the kind resets every weight to 1.0.
    pub fn set_kind(&mut self, kind: SurfaceKind) {
        if kind != self.kind {
            log::debug!("surface kind {} -> {}, weights reset", self.kind.name(), kind.name());
            self.kind = kind;
            self.weights = ControlGrid::filled(self.grid.rows(), self.grid.cols(), 1.0);
        }
    }

    pub fn set_kind_index(&mut self, index: u8) -> Result<(), EditorError> {
        let kind = SurfaceKind::try_from(index).map_err(EditorError::UnknownKind)?;
        self.set_kind(kind);
        Ok(())
    }

    #[must_use]
    pub fn sampling(&self) -> SurfaceSampling {
        self.sampling
    }

    pub fn set_sampling(&mut self, sampling: SurfaceSampling) {
        self.sampling = sampling;
    }

    /// Replaces the control grid. Weights survive only if the shape is unchanged.
    pub fn set_grid(&mut self, grid: ControlGrid<Point3>) -> Result<(), EditorError> {
        if !grid.as_slice().iter().all(|p| p.is_finite()) {
            return Err(EditorError::NonFinitePoint);
        }
        if grid.dims() != self.weights.dims() {
            log::debug!(
                "control grid reshaped {:?} -> {:?}, weights reset",
                self.weights.dims(),
                grid.dims()
            );
            self.weights = ControlGrid::filled(grid.rows(), grid.cols(), 1.0);
        }
        self.grid = grid;
        Ok(())
    }

    /// [`set_grid`](Self::set_grid) from packed `[x, y, z, ...]` coordinates in
    /// row-major order.
    pub fn set_grid_flat(&mut self, rows: usize, cols: usize, coords: &[f64]) -> Result<(), EditorError> {
        if coords.len() != rows * cols * 3 {
            return Err(GridError::SizeMismatch {
                rows,
                cols,
                len: coords.len() / 3,
            }
            .into());
        }
        let points = coords
            .chunks_exact(3)
            .map(|c| Point3::new(c[0], c[1], c[2]))
            .collect();
        self.set_grid(ControlGrid::new(rows, cols, points)?)
    }

    fn out_of_range(&self, row: usize, col: usize) -> EditorError {
        EditorError::GridIndexOutOfRange {
            row,
            col,
            rows: self.grid.rows(),
            cols: self.grid.cols(),
        }
    }

    pub fn move_point(&mut self, row: usize, col: usize, point: Point3) -> Result<(), EditorError> {
        let point = check_point(point)?;
        let err = self.out_of_range(row, col);
        let slot = self.grid.get_mut(row, col).ok_or(err)?;
        *slot = point;
        Ok(())
    }

    pub fn set_weight(&mut self, row: usize, col: usize, weight: f64) -> Result<(), EditorError> {
        let weight = check_weight(weight)?;
        let err = self.out_of_range(row, col);
        let slot = self.weights.get_mut(row, col).ok_or(err)?;
        *slot = weight;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.grid = ControlGrid::empty();
        self.weights = ControlGrid::empty();
    }

    /// Samples and triangulates the surface.
    #[must_use]
    pub fn evaluate(&self) -> SurfaceMesh {
        let mut metrics = GeomMetrics::default();
        self.evaluate_with_metrics(&mut metrics)
    }

    #[must_use]
    pub fn evaluate_with_metrics(&self, metrics: &mut GeomMetrics) -> SurfaceMesh {
        mesh_surface_with_metrics(self.kind, &self.grid, &self.weights, self.sampling, metrics)
    }

    /// Triangle list of [`evaluate`](Self::evaluate)'s mesh. It depends only on
    /// the sampling, so the surface itself is not evaluated.
    #[must_use]
    pub fn indices(&self) -> Vec<u32> {
        if self.grid.is_empty() {
            return Vec::new();
        }
        generate_surface_indices(self.sampling.u_samples, self.sampling.v_samples)
    }
}
