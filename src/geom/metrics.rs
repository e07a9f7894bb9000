//! Opt-in timing hooks for the evaluators.
//!
//! Timing is only collected when the `spline_metrics` feature is enabled and
//! the target is not WASM (`std::time::Instant` is unavailable there). In every
//! other build the calls compile down to running the closure.
//!
//! # Usage
//!
//! ```ignore
//! use spline_engine::geom::{GeomMetrics, TimingBucket, evaluate_bezier_curve};
//!
//! let mut metrics = GeomMetrics::default();
//! metrics.begin();
//! let curve = metrics.time(TimingBucket::CurveEvaluation, || {
//!     evaluate_bezier_curve(&points, 100)
//! });
//! if let Some(report) = metrics.end() {
//!     println!("curve: {} ns", report.curve_evaluation_ns);
//! }
//! ```

/// Categories for timing different evaluation phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimingBucket {
    /// Bezier / B-spline / NURBS polyline sampling.
    CurveEvaluation,
    /// Tensor-product grid sampling.
    SurfaceEvaluation,
    /// Index generation for sampled grids.
    Triangulation,
}

/// Cumulative timings in nanoseconds.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GeomTimingReport {
    pub curve_evaluation_ns: u64,
    pub surface_evaluation_ns: u64,
    pub triangulation_ns: u64,
}

impl GeomTimingReport {
    /// Returns the total time across all buckets in nanoseconds.
    #[must_use]
    pub fn total_ns(&self) -> u64 {
        self.curve_evaluation_ns
            .saturating_add(self.surface_evaluation_ns)
            .saturating_add(self.triangulation_ns)
    }

    /// Returns the total time in milliseconds (for display purposes).
    #[must_use]
    pub fn total_ms(&self) -> f64 {
        self.total_ns() as f64 / 1_000_000.0
    }
}

/// Accumulator for timing evaluation work.
///
/// Call [`begin`](Self::begin) to reset, wrap work in [`time`](Self::time) and
/// read the result with [`end`](Self::end), which is `None` when metrics are
/// compiled out.
#[derive(Debug, Default)]
pub struct GeomMetrics {
    #[cfg(all(feature = "spline_metrics", not(target_arch = "wasm32")))]
    report: GeomTimingReport,
}

impl GeomMetrics {
    /// Resets all timing counters to zero.
    pub fn begin(&mut self) {
        #[cfg(all(feature = "spline_metrics", not(target_arch = "wasm32")))]
        {
            self.report = GeomTimingReport::default();
        }
    }

    /// Returns the accumulated timing report, or `None` if metrics are disabled.
    #[must_use]
    pub fn end(&self) -> Option<GeomTimingReport> {
        #[cfg(all(feature = "spline_metrics", not(target_arch = "wasm32")))]
        {
            Some(self.report.clone())
        }
        #[cfg(not(all(feature = "spline_metrics", not(target_arch = "wasm32"))))]
        {
            None
        }
    }

    /// Times `f` and accumulates the elapsed time in `bucket`.
    pub fn time<R>(&mut self, bucket: TimingBucket, f: impl FnOnce() -> R) -> R {
        #[cfg(all(feature = "spline_metrics", not(target_arch = "wasm32")))]
        {
            let start = std::time::Instant::now();
            let result = f();
            let elapsed = start.elapsed();
            // Cap at u64::MAX to prevent overflow
            let nanos_u64 = elapsed.as_nanos().min(u128::from(u64::MAX)) as u64;
            self.add_to_bucket(bucket, nanos_u64);
            result
        }

        #[cfg(not(all(feature = "spline_metrics", not(target_arch = "wasm32"))))]
        {
            let _ = bucket;
            f()
        }
    }

    #[cfg(all(feature = "spline_metrics", not(target_arch = "wasm32")))]
    fn add_to_bucket(&mut self, bucket: TimingBucket, nanos: u64) {
        let slot = match bucket {
            TimingBucket::CurveEvaluation => &mut self.report.curve_evaluation_ns,
            TimingBucket::SurfaceEvaluation => &mut self.report.surface_evaluation_ns,
            TimingBucket::Triangulation => &mut self.report.triangulation_ns,
        };
        *slot = slot.saturating_add(nanos);
    }
}
