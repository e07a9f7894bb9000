mod basis;
mod core;
mod curve;
mod grid;
mod knots;
mod mesh;
mod metrics;
mod surface;
mod triangulation;

pub use basis::{basis_row, bernstein, bernstein_row, binomial_coefficient, cox_de_boor};
pub use core::{Point3, Tolerance, Vec3, sample_parameter};
pub use curve::{
    CurveKind, CurveSampling, bezier_point_at, bspline_point_at, evaluate_bezier_curve,
    evaluate_bspline_curve, evaluate_curve, evaluate_nurbs_curve, nurbs_point_at,
};
pub use grid::{ControlGrid, GridError};
pub use knots::{clamp_degree, clamped_knot_vector};
pub use mesh::{MeshError, SurfaceMesh, flatten_points, mesh_surface, mesh_surface_with_metrics};
pub use metrics::{GeomMetrics, GeomTimingReport, TimingBucket};
pub use surface::{
    SurfaceKind, SurfaceSampling, evaluate_bezier_surface, evaluate_bspline_surface,
    evaluate_nurbs_surface, evaluate_surface,
};
pub use triangulation::{generate_surface_indices, polyline_segment_indices};

#[cfg(test)]
mod tests;
