use crate::geom::{
    CurveKind, CurveSampling, Point3, Tolerance, bezier_point_at, bspline_point_at,
    clamped_knot_vector, evaluate_bezier_curve, evaluate_bspline_curve, evaluate_curve,
    evaluate_nurbs_curve, nurbs_point_at,
};

fn arch() -> Vec<Point3> {
    vec![
        Point3::from_xy(0.0, 0.0),
        Point3::from_xy(1.0, 2.0),
        Point3::from_xy(2.0, 2.0),
        Point3::from_xy(3.0, 0.0),
    ]
}

#[test]
fn bezier_sample_count_and_endpoints() {
    let points = arch();
    let curve = evaluate_bezier_curve(&points, 100);
    assert_eq!(curve.len(), 101);
    assert_eq!(curve.first().copied(), Some(points[0]));
    assert!(Tolerance::DEFAULT.approx_eq_point3(curve[100], points[3]));
}

#[test]
fn bezier_arch_is_concave_down() {
    let tol = Tolerance::new(1e-12);
    let curve = evaluate_bezier_curve(&arch(), 4);
    assert_eq!(curve.len(), 5);

    let expected = [
        Point3::from_xy(0.0, 0.0),
        Point3::from_xy(0.75, 1.125),
        Point3::from_xy(1.5, 1.5),
        Point3::from_xy(2.25, 1.125),
        Point3::from_xy(3.0, 0.0),
    ];
    assert!(tol.approx_eq_points(&curve, &expected), "{curve:?}");
}

#[test]
fn bezier_linear_midpoint() {
    let a = Point3::new(0.0, 0.0, 0.0);
    let b = Point3::new(2.0, 4.0, -2.0);
    let mid = bezier_point_at(&[a, b], 0.5);
    assert_eq!(mid, Some(Point3::new(1.0, 2.0, -1.0)));
}

#[test]
fn bezier_degenerate_inputs() {
    assert!(evaluate_bezier_curve(&[], 10).is_empty());
    assert_eq!(bezier_point_at(&[], 0.5), None);

    let single = Point3::new(1.0, 2.0, 3.0);
    assert_eq!(evaluate_bezier_curve(&[single], 10), vec![single]);

    let curve = evaluate_bezier_curve(&arch(), 0);
    assert_eq!(curve, vec![Point3::from_xy(0.0, 0.0)]);
}

#[test]
fn bspline_full_degree_matches_bezier() {
    let points = arch();
    let bspline = evaluate_bspline_curve(&points, 3, 8);
    let bezier = evaluate_bezier_curve(&points, 8);
    assert_eq!(bspline.len(), 9);
    assert!(Tolerance::new(1e-9).approx_eq_points(&bspline, &bezier));
}

#[test]
fn bspline_ends_on_last_control_point() {
    let points: Vec<Point3> = (0..7)
        .map(|i| Point3::from_xy(f64::from(i), if i % 2 == 0 { 0.0 } else { 1.0 }))
        .collect();
    let curve = evaluate_bspline_curve(&points, 3, 50);
    assert_eq!(curve.len(), 51);
    assert!(Tolerance::DEFAULT.approx_eq_point3(curve[0], points[0]));
    assert_eq!(curve.last().copied(), Some(points[6]));
    assert!(curve.iter().all(|p| p.y >= -1e-9 && p.y <= 1.0 + 1e-9));
}

#[test]
fn bspline_degree_is_clamped() {
    let a = Point3::from_xy(0.0, 0.0);
    let b = Point3::from_xy(4.0, 2.0);

    for degree in [0, 1, 3, 9] {
        let curve = evaluate_bspline_curve(&[a, b], degree, 4);
        assert_eq!(curve.len(), 5);
        assert!(Tolerance::new(1e-12).approx_eq_point3(curve[2], Point3::from_xy(2.0, 1.0)));
        assert_eq!(curve[4], b);
    }
}

#[test]
fn bspline_degenerate_inputs() {
    assert!(evaluate_bspline_curve(&[], 3, 10).is_empty());
    let single = Point3::from_xy(1.0, 1.0);
    assert_eq!(evaluate_bspline_curve(&[single], 3, 10), vec![single]);
    assert_eq!(
        evaluate_nurbs_curve(&[single], &[2.0], 3, 10),
        vec![single]
    );
}

#[test]
fn nurbs_with_uniform_weights_matches_bspline() {
    let points = arch();
    let weights = vec![1.0; points.len()];
    let nurbs = evaluate_nurbs_curve(&points, &weights, 2, 40);
    let bspline = evaluate_bspline_curve(&points, 2, 40);
    assert_eq!(nurbs.len(), bspline.len());
    assert!(Tolerance::new(1e-9).approx_eq_points(&nurbs, &bspline));
}

#[test]
fn nurbs_weight_pulls_curve_toward_point() {
    let points = vec![
        Point3::from_xy(0.0, 0.0),
        Point3::from_xy(1.0, 2.0),
        Point3::from_xy(2.0, 0.0),
    ];
    let plain = evaluate_nurbs_curve(&points, &[1.0, 1.0, 1.0], 2, 2);
    let heavy = evaluate_nurbs_curve(&points, &[1.0, 5.0, 1.0], 2, 2);

    let tol = Tolerance::new(1e-9);
    assert!(tol.approx_eq_f64(plain[1].y, 1.0));
    assert!(tol.approx_eq_f64(heavy[1].y, 5.0 / 3.0));
    assert!(tol.approx_eq_f64(heavy[1].x, 1.0));
}

#[test]
fn nurbs_on_collinear_points_stays_on_line() {
    let points: Vec<Point3> = (0..5).map(|i| Point3::from_xy(f64::from(i), 0.0)).collect();
    let weights = [1.0, 5.0, 1.0, 5.0, 1.0];
    let curve = evaluate_nurbs_curve(&points, &weights, 3, 30);
    assert_eq!(curve.len(), 31);
    assert!(curve.iter().all(|p| p.y.abs() < 1e-12));
    assert!(curve.windows(2).all(|w| w[1].x >= w[0].x - 1e-12));
}

#[test]
fn evaluate_curve_dispatches_on_kind() {
    let points = arch();
    let weights = vec![1.0; points.len()];
    let sampling = CurveSampling::new(2, 20);

    assert_eq!(
        evaluate_curve(CurveKind::Bezier, &points, &weights, sampling),
        evaluate_bezier_curve(&points, 20)
    );
    assert_eq!(
        evaluate_curve(CurveKind::BSpline, &points, &weights, sampling),
        evaluate_bspline_curve(&points, 2, 20)
    );
    assert_eq!(
        evaluate_curve(CurveKind::Nurbs, &points, &weights, sampling),
        evaluate_nurbs_curve(&points, &weights, 2, 20)
    );
}

#[test]
fn curve_kind_from_u8() {
    assert_eq!(CurveKind::try_from(0), Ok(CurveKind::Bezier));
    assert_eq!(CurveKind::try_from(2), Ok(CurveKind::Nurbs));
    assert_eq!(CurveKind::try_from(7), Err(7));
    assert!(CurveKind::Nurbs.is_rational());
    assert_eq!(CurveKind::default(), CurveKind::Bezier);
}

#[test]
fn nurbs_with_equal_weights_on_collinear_points_matches_bspline() {
    let points: Vec<Point3> = (0..4).map(|i| Point3::from_xy(f64::from(i), f64::from(i))).collect();
    let nurbs = evaluate_nurbs_curve(&points, &[5.0; 4], 3, 25);
    let bspline = evaluate_bspline_curve(&points, 3, 25);
    assert!(Tolerance::new(1e-9).approx_eq_points(&nurbs, &bspline));
}

#[test]
fn nurbs_point_falls_back_to_unweighted_blend() {
    let points = [Point3::from_xy(1.0, 1.0), Point3::from_xy(3.0, 2.0)];
    let knots = clamped_knot_vector(2, 1);
    // Outside the knot range every basis function is zero.
    let p = nurbs_point_at(&points, &[2.0, 7.0], 1, &knots, -0.5);
    assert!(p.is_finite());
    assert_eq!(p, bspline_point_at(&points, 1, &knots, -0.5));
    assert_eq!(p, Point3::ORIGIN);
}
