#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod editor;
pub mod geom;

use std::fmt;

use editor::{CurveEditor, SurfaceEditor};
use geom::{CurveKind, Point3, SurfaceKind, flatten_points};
use serde::Serialize;
use wasm_bindgen::JsError;
use wasm_bindgen::prelude::*;

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            // no-op fallback when panic hook is disabled
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    if log::set_logger(&DEFAULT_LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {
    // no-op fallback when debug logs are disabled
}

#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
#[wasm_bindgen]
pub async fn initialize_parallel(worker_count: Option<u32>) -> Result<(), JsError> {
    let threads = worker_count
        .map(|count| count.max(1) as usize)
        .or_else(|| {
            std::thread::available_parallelism()
                .map(|value| value.get())
                .ok()
        })
        .unwrap_or(1);

    wasm_bindgen_rayon::init_thread_pool(threads)
        .await
        .map_err(|err| JsError::new(&format!("could not start the rayon thread pool: {err}")))
}

#[macro_export]
macro_rules! debug_log {
    ($($t:tt)*) => {{
        #[cfg(feature = "debug_logs")]
        {
            #[cfg(target_arch = "wasm32")]
            {
                ::web_sys::console::log_1(&::wasm_bindgen::JsValue::from_str(&format!($($t)*)));
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                println!("{}", format!($($t)*));
            }
        }
    }};
}

#[derive(Debug, Serialize)]
struct CurveState<'a> {
    kind: CurveKind,
    degree: usize,
    samples: usize,
    points: &'a [Point3],
    weights: &'a [f64],
}

#[derive(Debug, Serialize)]
struct SurfaceState<'a> {
    kind: SurfaceKind,
    rows: usize,
    cols: usize,
    points: &'a [Point3],
    weights: &'a [f64],
}

#[derive(Debug, Serialize)]
struct EngineState<'a> {
    curve: CurveState<'a>,
    surface: SurfaceState<'a>,
}

/// Public entry point for consumers: one editable curve and one editable
/// surface, evaluated into flat buffers for rendering.
#[wasm_bindgen]
pub struct SplineEngine {
    curve: CurveEditor,
    surface: SurfaceEditor,
}

#[wasm_bindgen]
impl SplineEngine {
    #[wasm_bindgen(constructor)]
    pub fn new() -> SplineEngine {
        SplineEngine {
            curve: CurveEditor::new(),
            surface: SurfaceEditor::new(),
        }
    }

    /// Selects the curve form: 0 = Bezier, 1 = B-spline, 2 = NURBS.
    #[wasm_bindgen]
    pub fn set_curve_kind(&mut self, kind: u8) -> Result<(), JsValue> {
        self.curve.set_kind_index(kind).map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub fn curve_kind(&self) -> u8 {
        self.curve.kind() as u8
    }

    /// Appends a control point and returns its index.
    #[wasm_bindgen]
    pub fn add_control_point(&mut self, x: f64, y: f64, z: f64) -> Result<u32, JsValue> {
        let index = self
            .curve
            .add_point(Point3::new(x, y, z))
            .map_err(to_js_error)?;
        debug_log!("added control point {index} at ({x}, {y}, {z})");
        Ok(index as u32)
    }

    /// Index of the control point under `(x, y)`, if any.
    #[wasm_bindgen]
    pub fn pick_control_point(&self, x: f64, y: f64) -> Option<u32> {
        self.curve
            .pick_point(Point3::from_xy(x, y), editor::PICK_RADIUS)
            .map(|index| index as u32)
    }

    /// Picks the control point under `(x, y)` or adds one there.
    #[wasm_bindgen]
    pub fn press(&mut self, x: f64, y: f64) -> Result<u32, JsValue> {
        self.curve
            .press(Point3::from_xy(x, y))
            .map(|index| index as u32)
            .map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub fn move_control_point(&mut self, index: u32, x: f64, y: f64, z: f64) -> Result<(), JsValue> {
        self.curve
            .move_point(index as usize, Point3::new(x, y, z))
            .map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub fn remove_control_point(&mut self, index: u32) -> Result<(), JsValue> {
        self.curve
            .remove_point(index as usize)
            .map(|_| ())
            .map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub fn set_weight(&mut self, index: u32, weight: f64) -> Result<(), JsValue> {
        self.curve
            .set_weight(index as usize, weight)
            .map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub fn clear_control_points(&mut self) {
        self.curve.clear();
    }

    #[wasm_bindgen]
    pub fn control_point_count(&self) -> u32 {
        self.curve.len() as u32
    }

    /// Control points as `[x0, y0, z0, ...]`, for drawing the control polygon.
    #[wasm_bindgen]
    pub fn control_point_positions(&self) -> Vec<f64> {
        flatten_points(self.curve.points())
    }

    /// Sampled curve as `[x0, y0, z0, ...]`.
    #[wasm_bindgen]
    pub fn curve_positions(&mut self) -> Vec<f64> {
        flatten_points(&self.curve.evaluate())
    }

    /// Replaces the surface control grid with `rows * cols` packed points.
    #[wasm_bindgen]
    pub fn set_surface_grid(&mut self, rows: u32, cols: u32, coords: Vec<f64>) -> Result<(), JsValue> {
        self.surface
            .set_grid_flat(rows as usize, cols as usize, &coords)
            .map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub fn set_surface_kind(&mut self, kind: u8) -> Result<(), JsValue> {
        self.surface.set_kind_index(kind).map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub fn move_surface_point(
        &mut self,
        row: u32,
        col: u32,
        x: f64,
        y: f64,
        z: f64,
    ) -> Result<(), JsValue> {
        self.surface
            .move_point(row as usize, col as usize, Point3::new(x, y, z))
            .map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub fn set_surface_weight(&mut self, row: u32, col: u32, weight: f64) -> Result<(), JsValue> {
        self.surface
            .set_weight(row as usize, col as usize, weight)
            .map_err(to_js_error)
    }

    /// Sampled surface vertices as `[x0, y0, z0, ...]`, row-major over `u`.
    #[wasm_bindgen]
    pub fn surface_positions(&self) -> Vec<f64> {
        self.surface.evaluate().positions_flat().to_vec()
    }

    /// Triangle list matching [`surface_positions`](Self::surface_positions).
    #[wasm_bindgen]
    pub fn surface_indices(&self) -> Vec<u32> {
        self.surface.indices()
    }

    /// Snapshot of both editors for UI state.
    #[wasm_bindgen]
    pub fn get_state(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.state()).map_err(to_js_error)
    }
}

impl SplineEngine {
    fn state(&self) -> EngineState<'_> {
        let sampling = self.curve.sampling();
        let grid = self.surface.grid();
        EngineState {
            curve: CurveState {
                kind: self.curve.kind(),
                degree: sampling.degree,
                samples: sampling.samples,
                points: self.curve.points(),
                weights: self.curve.weights(),
            },
            surface: SurfaceState {
                kind: self.surface.kind(),
                rows: grid.rows(),
                cols: grid.cols(),
                points: grid.as_slice(),
                weights: self.surface.weights().as_slice(),
            },
        }
    }

    #[must_use]
    pub fn curve_editor(&self) -> &CurveEditor {
        &self.curve
    }

    #[must_use]
    pub fn surface_editor(&self) -> &SurfaceEditor {
        &self.surface
    }
}

impl Default for SplineEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn to_js_error<E: fmt::Display>(error: E) -> JsValue {
    js_error(&error.to_string())
}

fn js_error(message: &str) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    {
        JsError::new(message).into()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        JsValue::NULL
    }
}
