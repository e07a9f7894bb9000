use super::core::Point3;
use super::grid::ControlGrid;
use super::metrics::{GeomMetrics, TimingBucket};
use super::surface::{SurfaceKind, SurfaceSampling, evaluate_surface};
use super::triangulation::generate_surface_indices;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MeshError {
    #[error("mesh indices are not a triangle list (len {0} % 3 != 0)")]
    NotTriangleList(usize),
    #[error("mesh has invalid vertex coordinates (NaN/Inf) at vertex {0}")]
    InvalidVertex(usize),
    #[error("mesh index {index} is out of bounds for {vertex_count} vertices")]
    IndexOutOfBounds { index: u32, vertex_count: usize },
}

/// A sampled surface ready for upload: row-major positions plus a triangle
/// list indexing into them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SurfaceMesh {
    pub positions: Vec<[f64; 3]>,
    pub indices: Vec<u32>,
}

impl SurfaceMesh {
    #[must_use]
    pub fn new(positions: Vec<[f64; 3]>, indices: Vec<u32>) -> Self {
        Self { positions, indices }
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn validate(&self) -> Result<(), MeshError> {
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::NotTriangleList(self.indices.len()));
        }
        if let Some(bad) = self
            .positions
            .iter()
            .position(|p| !p.iter().all(|c| c.is_finite()))
        {
            return Err(MeshError::InvalidVertex(bad));
        }
        let vertex_count = self.positions.len();
        if let Some(&index) = self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(MeshError::IndexOutOfBounds {
                index,
                vertex_count,
            });
        }
        Ok(())
    }

    /// The position buffer as `[x0, y0, z0, x1, y1, z1, ...]`, the layout the
    /// wasm adapter hands to JS.
    #[must_use]
    pub fn positions_flat(&self) -> &[f64] {
        self.positions.as_flattened()
    }
}

/// Packs points into `[x0, y0, z0, x1, ...]`.
#[must_use]
pub fn flatten_points(points: &[Point3]) -> Vec<f64> {
    let mut flat = Vec::with_capacity(points.len() * 3);
    for p in points {
        flat.extend_from_slice(&[p.x, p.y, p.z]);
    }
    flat
}

/// Samples the surface and triangulates the sample grid.
///
/// An empty sample set (empty control grid, or mismatched NURBS weights)
/// yields an empty mesh with no indices.
#[must_use]
pub fn mesh_surface(
    kind: SurfaceKind,
    grid: &ControlGrid<Point3>,
    weights: &ControlGrid<f64>,
    sampling: SurfaceSampling,
) -> SurfaceMesh {
    let mut metrics = GeomMetrics::default();
    mesh_surface_with_metrics(kind, grid, weights, sampling, &mut metrics)
}

#[must_use]
pub fn mesh_surface_with_metrics(
    kind: SurfaceKind,
    grid: &ControlGrid<Point3>,
    weights: &ControlGrid<f64>,
    sampling: SurfaceSampling,
    metrics: &mut GeomMetrics,
) -> SurfaceMesh {
    let points = metrics.time(TimingBucket::SurfaceEvaluation, || {
        evaluate_surface(kind, grid, weights, sampling)
    });
    if points.is_empty() {
        return SurfaceMesh::default();
    }

    let indices = metrics.time(TimingBucket::Triangulation, || {
        generate_surface_indices(sampling.u_samples, sampling.v_samples)
    });
    let positions = points.into_iter().map(Point3::to_array).collect();

    SurfaceMesh::new(positions, indices)
}
