#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod geom;

use std::fmt;

use geom::{GeomMesh, MobiusParams, MobiusReport, MobiusStrip, RenderOptions, mesh_strip};
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
        .map_err(|err| JsError::new(&format!("could not start rayon thread pool: {err}")))
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

/// One drawable item in the payload consumed by the web viewer.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "type")]
enum GeometryItem<'a> {
    Polyline {
        points: Vec<[f64; 3]>,
    },
    Mesh {
        vertices: &'a [[f64; 3]],
        faces: Vec<Vec<u32>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        normals: Option<&'a [[f64; 3]]>,
    },
}

#[derive(Debug, Serialize)]
struct ParameterExport {
    #[serde(flatten)]
    params: MobiusParams,
    #[serde(flatten)]
    report: MobiusReport,
}

/// Public entry point for the web viewer: one strip, its measurements and its
/// display geometry.
#[wasm_bindgen]
pub struct Engine {
    strip: MobiusStrip,
    report: MobiusReport,
    display_mesh: GeomMesh,
    boundaries: [Vec<[f64; 3]>; 2],
}

#[wasm_bindgen]
impl Engine {
    /// Build a strip from centre radius, width and resolution.
    #[wasm_bindgen(constructor)]
    pub fn new(radius: f64, width: f64, resolution: usize) -> Result<Engine, JsValue> {
        Self::from_params(MobiusParams::new(radius, width, resolution)).map_err(to_js_error)
    }

    /// Build the strip with the reference defaults (R=1.0, w=0.2, n=200).
    #[wasm_bindgen]
    pub fn default_strip() -> Result<Engine, JsValue> {
        Self::from_params(MobiusParams::default()).map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub fn surface_area(&self) -> f64 {
        self.report.surface_area
    }

    #[wasm_bindgen]
    pub fn edge_length(&self) -> f64 {
        self.report.edge_length
    }

    /// Both measurements formatted to five decimals, one per line.
    #[wasm_bindgen]
    pub fn report(&self) -> String {
        self.report.to_string()
    }

    /// Parameters and measurements as a plain JS object.
    #[wasm_bindgen]
    pub fn get_parameters(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.parameter_export())
            .map_err(|err| JsError::new(&err.to_string()).into())
    }

    /// The strip surface as a mesh item followed by its two boundary polylines.
    #[wasm_bindgen]
    pub fn get_geometry(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.geometry_items())
            .map_err(|err| JsError::new(&err.to_string()).into())
    }
}

impl Engine {
    pub fn from_params(params: MobiusParams) -> Result<Self, geom::MobiusError> {
        let strip = MobiusStrip::new(params)?;
        let report = strip.report();
        let (display_mesh, diagnostics) = mesh_strip(&strip, RenderOptions::default())?;
        debug_log!("mesh diagnostics: {diagnostics}");
        if diagnostics.has_warnings() {
            log::warn!("display mesh: {}", diagnostics.warnings.join("; "));
        }
        let boundaries: [Vec<[f64; 3]>; 2] = strip
            .boundary_polylines()
            .map(|polyline| polyline.into_iter().map(<[f64; 3]>::from).collect());

        Ok(Self {
            strip,
            report,
            display_mesh,
            boundaries,
        })
    }

    #[must_use]
    pub fn strip(&self) -> &MobiusStrip {
        &self.strip
    }

    #[must_use]
    pub fn measurements(&self) -> MobiusReport {
        self.report
    }

    fn parameter_export(&self) -> ParameterExport {
        ParameterExport {
            params: self.strip.params(),
            report: self.report,
        }
    }

    fn geometry_items(&self) -> Vec<GeometryItem<'_>> {
        let mut items = Vec::with_capacity(3);
        items.push(GeometryItem::Mesh {
            vertices: &self.display_mesh.positions,
            faces: self.display_mesh.faces(),
            normals: self.display_mesh.normals.as_deref(),
        });
        for boundary in &self.boundaries {
            items.push(GeometryItem::Polyline {
                points: boundary.clone(),
            });
        }
        items
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("params", &self.strip.params())
            .field("report", &self.report)
            .field("display_vertices", &self.display_mesh.positions.len())
            .finish_non_exhaustive()
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

#[cfg(test)]
mod tests {
    use super::{Engine, GeometryItem};
    use crate::geom::MobiusParams;

    #[test]
    fn geometry_items_list_mesh_then_both_boundaries() {
        let engine = Engine::from_params(MobiusParams::new(1.0, 0.2, 41)).unwrap();
        let items = engine.geometry_items();

        assert_eq!(items.len(), 3);
        match &items[0] {
            GeometryItem::Mesh {
                vertices,
                faces,
                normals,
            } => {
                // Stride 4 over 41 samples keeps 0, 4, ..., 40.
                assert_eq!(vertices.len(), 11 * 11);
                assert_eq!(faces.len(), 2 * 10 * 10);
                assert!(faces.iter().all(|f| f.len() == 3));
                assert_eq!(normals.map(<[[f64; 3]]>::len), Some(11 * 11));
            }
            other => panic!("expected Mesh, got {other:?}"),
        }
        for item in &items[1..] {
            match item {
                GeometryItem::Polyline { points } => assert_eq!(points.len(), 41),
                other => panic!("expected Polyline, got {other:?}"),
            }
        }
    }

    #[test]
    fn measurements_match_strip() {
        let engine = Engine::from_params(MobiusParams::new(1.0, 0.2, 60)).unwrap();
        assert_eq!(engine.surface_area(), engine.strip().surface_area());
        assert_eq!(engine.edge_length(), engine.strip().edge_length());
        assert_eq!(engine.report(), engine.measurements().to_string());
    }

    #[test]
    fn parameter_export_carries_inputs_and_outputs() {
        let engine = Engine::from_params(MobiusParams::new(2.0, 0.5, 30)).unwrap();
        let export = engine.parameter_export();
        assert_eq!(export.params, MobiusParams::new(2.0, 0.5, 30));
        assert_eq!(export.report.surface_area, engine.surface_area());
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        assert!(Engine::from_params(MobiusParams::new(1.0, 0.2, 1)).is_err());
        assert!(Engine::new(-1.0, 0.2, 10).is_err());
    }
}
