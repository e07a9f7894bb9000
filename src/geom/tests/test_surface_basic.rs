use crate::geom::{
    ControlGrid, Point3, SurfaceKind, SurfaceSampling, Tolerance, evaluate_bezier_surface,
    evaluate_bspline_surface, evaluate_nurbs_surface, evaluate_surface,
};

/// 4x4 grid over the unit square with a raised centre.
fn dome() -> ControlGrid<Point3> {
    ControlGrid::from_fn(4, 4, |r, c| {
        let z = if (1..=2).contains(&r) && (1..=2).contains(&c) {
            1.0
        } else {
            0.0
        };
        Point3::new(r as f64 / 3.0, c as f64 / 3.0, z)
    })
}

fn corners(samples: &[Point3], u_samples: usize, v_samples: usize) -> [Point3; 4] {
    let stride = v_samples + 1;
    [
        samples[0],
        samples[v_samples],
        samples[u_samples * stride],
        samples[u_samples * stride + v_samples],
    ]
}

#[test]
fn surface_sample_counts() {
    let grid = dome();
    let weights = ControlGrid::filled(4, 4, 1.0);
    for kind in SurfaceKind::ALL {
        let sampling = SurfaceSampling::new(3, 2, 6, 9);
        let samples = evaluate_surface(kind, &grid, &weights, sampling);
        assert_eq!(samples.len(), 7 * 10, "{}", kind.name());
        assert_eq!(samples.len(), sampling.point_count());
    }
}

#[test]
fn bezier_surface_hits_corner_control_points() {
    let grid = dome();
    let samples = evaluate_bezier_surface(&grid, 5, 7);
    let tol = Tolerance::new(1e-12);
    let expected = [grid[(0, 0)], grid[(0, 3)], grid[(3, 0)], grid[(3, 3)]];
    for (got, want) in corners(&samples, 5, 7).into_iter().zip(expected) {
        assert!(tol.approx_eq_point3(got, want), "{got:?} != {want:?}");
    }
}

#[test]
fn bspline_surface_hits_corner_control_points() {
    let grid = ControlGrid::from_fn(6, 5, |r, c| Point3::new(r as f64, c as f64, (r * c) as f64));
    let samples = evaluate_bspline_surface(&grid, 3, 2, 8, 8);
    let tol = Tolerance::new(1e-9);
    let expected = [grid[(0, 0)], grid[(0, 4)], grid[(5, 0)], grid[(5, 4)]];
    for (got, want) in corners(&samples, 8, 8).into_iter().zip(expected) {
        assert!(tol.approx_eq_point3(got, want), "{got:?} != {want:?}");
    }
}

#[test]
fn bilinear_patch_centre() {
    let grid = ControlGrid::from_rows(vec![
        vec![Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
        vec![Point3::new(1.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0)],
    ])
    .unwrap();
    let samples = evaluate_bezier_surface(&grid, 2, 2);
    assert_eq!(samples.len(), 9);
    assert!(Tolerance::new(1e-12).approx_eq_point3(samples[4], Point3::new(0.5, 0.5, 0.25)));

    // Degree clamps to 1 on a 2x2 grid, so the B-spline form is the same patch.
    let bspline = evaluate_bspline_surface(&grid, 3, 3, 2, 2);
    assert!(Tolerance::new(1e-12).approx_eq_points(&bspline, &samples));
}

#[test]
fn samples_are_row_major_over_u() {
    let grid = ControlGrid::from_rows(vec![
        vec![Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
        vec![Point3::new(1.0, 0.0, 0.0), Point3::new(1.0, 1.0, 0.0)],
    ])
    .unwrap();
    let samples = evaluate_bezier_surface(&grid, 2, 4);
    let tol = Tolerance::new(1e-12);
    // Second sample advances v (the column axis), the sixth starts the next u row.
    assert!(tol.approx_eq_point3(samples[1], Point3::new(0.0, 0.25, 0.0)));
    assert!(tol.approx_eq_point3(samples[5], Point3::new(0.5, 0.0, 0.0)));
}

#[test]
fn nurbs_with_uniform_weights_matches_bspline() {
    let grid = dome();
    let weights = ControlGrid::filled(4, 4, 1.0);
    let nurbs = evaluate_nurbs_surface(&grid, &weights, 2, 3, 10, 10);
    let bspline = evaluate_bspline_surface(&grid, 2, 3, 10, 10);
    assert!(Tolerance::new(1e-9).approx_eq_points(&nurbs, &bspline));
}

#[test]
fn nurbs_weight_raises_surface() {
    let grid = dome();
    let plain = evaluate_nurbs_surface(&grid, &ControlGrid::filled(4, 4, 1.0), 3, 3, 4, 4);
    let mut weights = ControlGrid::filled(4, 4, 1.0);
    weights[(1, 1)] = 4.0;
    let heavy = evaluate_nurbs_surface(&grid, &weights, 3, 3, 4, 4);
    // Sample (1, 1) sits at u = v = 0.25, closest to control point (1, 1).
    let idx = 5 + 1;
    assert!(heavy[idx].z > plain[idx].z);
}

#[test]
fn nurbs_mismatched_weights_give_no_samples() {
    let grid = dome();
    let weights = ControlGrid::filled(3, 4, 1.0);
    assert!(evaluate_nurbs_surface(&grid, &weights, 3, 3, 10, 10).is_empty());
}

#[test]
fn empty_grid_gives_no_samples() {
    let grid: ControlGrid<Point3> = ControlGrid::empty();
    let weights = ControlGrid::empty();
    for kind in SurfaceKind::ALL {
        assert!(evaluate_surface(kind, &grid, &weights, SurfaceSampling::default()).is_empty());
    }
}

#[test]
fn high_degree_bezier_surface_stays_finite() {
    let grid = ControlGrid::from_fn(70, 2, |r, c| Point3::new(r as f64 / 69.0, c as f64, 0.0));
    let samples = evaluate_bezier_surface(&grid, 4, 2);
    assert_eq!(samples.len(), 5 * 3);
    assert!(samples.iter().all(|p| p.is_finite()));

    let tol = Tolerance::new(1e-9);
    let expected = [grid[(0, 0)], grid[(0, 1)], grid[(69, 0)], grid[(69, 1)]];
    for (got, want) in corners(&samples, 4, 2).into_iter().zip(expected) {
        assert!(tol.approx_eq_point3(got, want), "{got:?} != {want:?}");
    }
    // Evenly spaced rows make x linear in u.
    assert!(tol.approx_eq_f64(samples[2 * 3].x, 0.5));
}

#[test]
fn nurbs_surface_falls_back_when_weighted_basis_vanishes() {
    // One row: the u axis gets degree 1 on knots [0, 1, 1], whose only basis
    // function is zero at u = 0, so the whole first sample row is degenerate.
    let grid = ControlGrid::from_rows(vec![vec![
        Point3::new(1.0, 0.0, 2.0),
        Point3::new(2.0, 1.0, 2.0),
        Point3::new(3.0, 0.0, 2.0),
    ]])
    .unwrap();
    let weights = ControlGrid::from_rows(vec![vec![2.0, 5.0, 0.5]]).unwrap();

    let nurbs = evaluate_nurbs_surface(&grid, &weights, 3, 2, 4, 4);
    let bspline = evaluate_bspline_surface(&grid, 3, 2, 4, 4);
    assert_eq!(nurbs.len(), 25);
    assert!(nurbs.iter().all(|p| p.is_finite()));
    assert!(Tolerance::new(1e-12).approx_eq_points(&nurbs[..5], &bspline[..5]));
}
