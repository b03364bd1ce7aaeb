use jilattice_core::cache::LatticeCache;
use jilattice_core::canvas::{CanvasExtent, DEFAULT_MAX_TEXTURE_SIZE};
use jilattice_core::{GenerationSettings, Lattice, LatticeLine, LatticeNode};
use log::debug;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Padding around the outermost nodes, in canvas pixels.
const CANVAS_PADDING: f64 = 50.0;

#[wasm_bindgen(start)]
pub fn run() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Generate the lattice for a settings document and return it as JSON.
#[wasm_bindgen]
pub fn generate_lattice(settings_json: &str) -> Result<String, JsValue> {
    lattice_document(settings_json, DEFAULT_MAX_TEXTURE_SIZE).map_err(|err| JsValue::from_str(&err))
}

/// Keeps the last lattice around while the settings panel is open.
#[wasm_bindgen]
pub struct LatticeSession {
    cache: LatticeCache,
    max_texture_size: u32,
}

#[wasm_bindgen]
impl LatticeSession {
    #[wasm_bindgen(constructor)]
    pub fn new(max_texture_size: u32) -> LatticeSession {
        LatticeSession {
            cache: LatticeCache::new(),
            max_texture_size,
        }
    }

    /// The lattice for the given settings, regenerated only when they changed.
    pub fn update(&mut self, settings_json: &str) -> Result<String, JsValue> {
        self.update_document(settings_json)
            .map_err(|err| JsValue::from_str(&err))
    }

    pub fn generations(&self) -> usize {
        self.cache.generations()
    }
}

impl LatticeSession {
    fn update_document(&mut self, settings_json: &str) -> Result<String, String> {
        let settings = GenerationSettings::from_json(settings_json).map_err(|err| err.to_string())?;
        let max_texture_size = self.max_texture_size;
        let lattice = self.cache.get_or_generate(&settings);
        render(lattice, max_texture_size)
    }
}

#[derive(Serialize)]
struct Document<'a> {
    nodes: &'a [LatticeNode],
    lines: &'a [LatticeLine],
    canvas: CanvasExtent,
}

fn lattice_document(settings_json: &str, max_texture_size: u32) -> Result<String, String> {
    let settings = GenerationSettings::from_json(settings_json).map_err(|err| err.to_string())?;
    render(&jilattice_core::generate(&settings), max_texture_size)
}

fn render(lattice: &Lattice, max_texture_size: u32) -> Result<String, String> {
    let canvas = CanvasExtent::fit(lattice, CANVAS_PADDING, max_texture_size);
    debug!(
        "rendering {} nodes on {}x{}",
        lattice.nodes.len(),
        canvas.width,
        canvas.height
    );
    let document = Document {
        nodes: &lattice.nodes,
        lines: &lattice.lines,
        canvas,
    };
    serde_json::to_string(&document).map_err(|err| err.to_string())
}
