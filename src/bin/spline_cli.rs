#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(err) = native::run(std::env::args().skip(1)) {
        eprintln!("spline_cli error: {err}");
        std::process::exit(1);
    }
}

/// Prints fixed editing scenarios as plain-text reports on stdout.
#[cfg(not(target_arch = "wasm32"))]
mod native {
    use spline_engine::editor::{CurveEditor, SurfaceEditor};
    use spline_engine::geom::{
        ControlGrid, CurveKind, CurveSampling, GeomMetrics, Point3, SurfaceKind, SurfaceSampling,
    };
    use std::fmt::Write as _;

    const USAGE: &str = "usage: spline_cli list | spline_cli run <scenario|all>";

    type Build = fn(&mut GeomMetrics) -> Result<String, String>;

    struct Scenario {
        name: &'static str,
        build: Build,
    }

    const SCENARIOS: &[Scenario] = &[
        Scenario { name: "bezier_arch", build: bezier_arch },
        Scenario { name: "bspline_wave", build: bspline_wave },
        Scenario { name: "nurbs_weighted", build: nurbs_weighted },
        Scenario { name: "bezier_patch", build: bezier_patch },
        Scenario { name: "bspline_patch", build: bspline_patch },
        Scenario { name: "nurbs_patch", build: nurbs_patch },
    ];

    pub fn run(mut args: impl Iterator<Item = String>) -> Result<(), String> {
        match args.next().as_deref() {
            Some("list") => {
                for scenario in SCENARIOS {
                    println!("{}", scenario.name);
                }
                Ok(())
            }
            Some("run") => {
                let target = args
                    .next()
                    .ok_or_else(|| format!("missing scenario name\n{USAGE}"))?;
                if let Some(extra) = args.next() {
                    return Err(format!("unexpected argument `{extra}`\n{USAGE}"));
                }
                let selected: Vec<&Scenario> = if target == "all" {
                    SCENARIOS.iter().collect()
                } else {
                    let found = SCENARIOS.iter().find(|s| s.name == target);
                    vec![found.ok_or_else(|| unknown_scenario(&target))?]
                };
                for scenario in selected {
                    print!("{}", report(scenario)?);
                }
                Ok(())
            }
            None | Some("-h" | "--help" | "help") => {
                println!("{USAGE}");
                Ok(())
            }
            Some(other) => Err(format!("unknown command `{other}`\n{USAGE}")),
        }
    }

    fn unknown_scenario(name: &str) -> String {
        let names: Vec<&str> = SCENARIOS.iter().map(|s| s.name).collect();
        format!("unknown scenario `{name}` (expected one of: {}, all)", names.join(", "))
    }

    fn report(scenario: &Scenario) -> Result<String, String> {
        let mut metrics = GeomMetrics::default();
        metrics.begin();
        let body = (scenario.build)(&mut metrics)?;
        if let Some(timing) = metrics.end() {
            eprintln!("{}: {:.3} ms", scenario.name, timing.total_ms());
        }
        Ok(format!("== {}\n{body}", scenario.name))
    }

    /// Six decimals, with negative zero printed as zero so reports diff cleanly.
    fn coord(value: f64) -> String {
        let text = format!("{value:.6}");
        match text.strip_prefix('-') {
            Some(rest) if rest.bytes().all(|b| b == b'0' || b == b'.') => rest.to_string(),
            _ => text,
        }
    }

    fn push_point(out: &mut String, tag: char, p: Point3) {
        let _ = writeln!(out, "{tag} {} {} {}", coord(p.x), coord(p.y), coord(p.z));
    }

    fn push_controls(out: &mut String, points: &[Point3], weights: &[f64]) {
        let _ = writeln!(out, "controls {}", points.len());
        for (p, w) in points.iter().zip(weights) {
            push_point(out, 'c', *p);
            let _ = writeln!(out, "w {}", coord(*w));
        }
    }

    fn curve(
        kind: CurveKind,
        controls: &[(f64, f64)],
        weights: &[(usize, f64)],
        metrics: &mut GeomMetrics,
    ) -> Result<String, String> {
        let sampling = CurveSampling::new(3, 32);
        let mut editor = CurveEditor::with_sampling(sampling);
        editor.set_kind(kind);
        for &(x, y) in controls {
            editor
                .add_point(Point3::from_xy(x, y))
                .map_err(|e| e.to_string())?;
        }
        for &(index, weight) in weights {
            editor.set_weight(index, weight).map_err(|e| e.to_string())?;
        }

        let samples = editor.evaluate_with_metrics(metrics);
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} degree {} samples {}",
            kind.name(),
            sampling.degree,
            sampling.samples
        );
        push_controls(&mut out, editor.points(), editor.weights());
        let _ = writeln!(out, "polyline {}", samples.len());
        for p in samples {
            push_point(&mut out, 'p', p);
        }
        Ok(out)
    }

    fn bezier_arch(metrics: &mut GeomMetrics) -> Result<String, String> {
        curve(
            CurveKind::Bezier,
            &[(0.0, 0.0), (1.0, 2.0), (2.0, 2.0), (3.0, 0.0)],
            &[],
            metrics,
        )
    }

    fn bspline_wave(metrics: &mut GeomMetrics) -> Result<String, String> {
        curve(
            CurveKind::BSpline,
            &[(0.0, 0.0), (1.0, 1.0), (2.0, -1.0), (3.0, 1.0), (4.0, -1.0), (5.0, 0.0)],
            &[],
            metrics,
        )
    }

    fn nurbs_weighted(metrics: &mut GeomMetrics) -> Result<String, String> {
        curve(
            CurveKind::Nurbs,
            &[(0.0, 0.0), (1.0, 2.0), (3.0, 2.0), (4.0, 0.0)],
            &[(1, 4.0), (2, 0.5)],
            metrics,
        )
    }

    /// 4x4 saddle over `[0, 3] x [0, 3]`.
    fn saddle() -> ControlGrid<Point3> {
        ControlGrid::from_fn(4, 4, |r, c| {
            let (x, y) = (r as f64, c as f64);
            Point3::new(x, y, (x - 1.5) * (y - 1.5) * 0.5)
        })
    }

    fn patch(
        kind: SurfaceKind,
        weights: &[(usize, usize, f64)],
        metrics: &mut GeomMetrics,
    ) -> Result<String, String> {
        let sampling = SurfaceSampling::new(3, 3, 8, 8);
        let mut editor = SurfaceEditor::with_sampling(sampling);
        editor.set_kind(kind);
        editor.set_grid(saddle()).map_err(|e| e.to_string())?;
        for &(row, col, weight) in weights {
            editor.set_weight(row, col, weight).map_err(|e| e.to_string())?;
        }

        let mesh = editor.evaluate_with_metrics(metrics);
        mesh.validate().map_err(|e| e.to_string())?;

        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} grid {}x{} samples {}x{}",
            kind.name(),
            editor.grid().rows(),
            editor.grid().cols(),
            sampling.u_samples,
            sampling.v_samples
        );
        push_controls(&mut out, editor.grid().as_slice(), editor.weights().as_slice());
        let _ = writeln!(
            out,
            "mesh {} vertices {} triangles",
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        for p in &mesh.positions {
            push_point(&mut out, 'v', Point3::from(*p));
        }
        for tri in mesh.indices.chunks_exact(3) {
            let _ = writeln!(out, "t {} {} {}", tri[0], tri[1], tri[2]);
        }
        Ok(out)
    }

    fn bezier_patch(metrics: &mut GeomMetrics) -> Result<String, String> {
        patch(SurfaceKind::Bezier, &[], metrics)
    }

    fn bspline_patch(metrics: &mut GeomMetrics) -> Result<String, String> {
        patch(SurfaceKind::BSpline, &[], metrics)
    }

    fn nurbs_patch(metrics: &mut GeomMetrics) -> Result<String, String> {
        patch(SurfaceKind::Nurbs, &[(1, 1, 3.0), (2, 2, 3.0)], metrics)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn args(list: &[&str]) -> std::vec::IntoIter<String> {
            list.iter()
                .map(|s| (*s).to_string())
                .collect::<Vec<_>>()
                .into_iter()
        }

        #[test]
        fn coord_prints_negative_zero_as_zero() {
            assert_eq!(coord(-0.0), "0.000000");
            assert_eq!(coord(-1e-9), "0.000000");
            assert_eq!(coord(-0.25), "-0.250000");
        }

        #[test]
        fn every_scenario_reports() {
            for scenario in SCENARIOS {
                let text = report(scenario).unwrap();
                assert!(text.starts_with(&format!("== {}\n", scenario.name)));
                assert!(!text.contains("NaN"), "{}", scenario.name);
            }
        }

        #[test]
        fn run_rejects_unknown_input() {
            assert!(run(args(&["run", "nope"])).is_err());
            assert!(run(args(&["run"])).is_err());
            assert!(run(args(&["run", "bezier_arch", "--obj"])).is_err());
            assert!(run(args(&["frobnicate"])).is_err());
            assert!(run(args(&["list"])).is_ok());
        }
    }
}
