use wasm_bindgen::prelude::*;

/// Timings and counts for the last step. All zero unless perf metrics are on.
#[wasm_bindgen]
#[derive(Clone, Default)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) interaction_ms: f64,
    pub(super) spigot_ms: f64,
    pub(super) automaton_ms: f64,
    pub(super) particle_ms: f64,
    pub(super) composite_ms: f64,
    pub(super) cells_painted: u32,
    pub(super) active_particles: u32,
    pub(super) non_empty_cells: u32,
    pub(super) grid_size: u32,
    pub(super) memory_bytes: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn interaction_ms(&self) -> f64 { self.interaction_ms }
    #[wasm_bindgen(getter)]
    pub fn spigot_ms(&self) -> f64 { self.spigot_ms }
    #[wasm_bindgen(getter)]
    pub fn automaton_ms(&self) -> f64 { self.automaton_ms }
    #[wasm_bindgen(getter)]
    pub fn particle_ms(&self) -> f64 { self.particle_ms }
    #[wasm_bindgen(getter)]
    pub fn composite_ms(&self) -> f64 { self.composite_ms }
    #[wasm_bindgen(getter)]
    pub fn cells_painted(&self) -> u32 { self.cells_painted }
    #[wasm_bindgen(getter)]
    pub fn active_particles(&self) -> u32 { self.active_particles }
    #[wasm_bindgen(getter)]
    pub fn non_empty_cells(&self) -> u32 { self.non_empty_cells }
    #[wasm_bindgen(getter)]
    pub fn grid_size(&self) -> u32 { self.grid_size }
    #[wasm_bindgen(getter)]
    pub fn memory_bytes(&self) -> u32 { self.memory_bytes }
}
