use wasm_bindgen::prelude::*;

use crate::core::EngineError;
use crate::elements::ElementType;
use crate::grid::GridSnapshot;

use super::perf_stats::PerfStats;
use super::WorldCore;

fn js_err(e: EngineError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
pub struct World {
    core: WorldCore,
}

#[wasm_bindgen]
impl World {
    /// Create a new world with given dimensions and default settings
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            core: WorldCore::new(width, height),
        }
    }

    /// Create a world from an `EngineConfig` JSON document.
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(json: &str) -> Result<World, JsValue> {
        let core = WorldCore::from_config_json(json).map_err(js_err)?;
        Ok(Self { core })
    }

    #[wasm_bindgen(js_name = configJson)]
    pub fn config_json(&self) -> String {
        self.core.config().to_json()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 { self.core.width() }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 { self.core.height() }

    #[wasm_bindgen(getter)]
    pub fn tick(&self) -> u64 { self.core.tick() }

    #[wasm_bindgen(js_name = setTick)]
    pub fn set_tick(&mut self, tick: u64) {
        self.core.set_tick(tick);
    }

    #[wasm_bindgen(getter)]
    pub fn active_particles(&self) -> u32 {
        self.core.particles().active_count() as u32
    }

    /// Advance exactly one tick
    pub fn step(&mut self) {
        self.core.step();
    }

    /// Run as many ticks as `elapsed_ms` of wall-clock time pays for, capped
    /// at the configured maximum debt. Returns the tick count.
    pub fn advance(&mut self, elapsed_ms: f64) -> u32 {
        self.core.advance(elapsed_ms)
    }

    // === COMMANDS ===

    pub fn paint(&mut self, x: i32, y: i32, radius: u32, element: u8) -> Result<(), JsValue> {
        let element = ElementType::try_from(element).map_err(js_err)?;
        self.core.paint(x, y, radius, element);
        Ok(())
    }

    pub fn erase(&mut self, x: i32, y: i32, radius: u32) {
        self.core.erase(x, y, radius);
    }

    pub fn none(&mut self) {
        self.core.none();
    }

    #[wasm_bindgen(js_name = spawnParticle)]
    pub fn spawn_particle(&mut self, kind: u8, x: f32, y: f32) -> Result<bool, JsValue> {
        self.core.spawn_particle_id(kind, x, y).map_err(js_err)
    }

    // === SETTINGS ===

    #[wasm_bindgen(js_name = setGravityProbability)]
    pub fn set_gravity_probability(&mut self, p: f64) {
        self.core.set_gravity_probability(p);
    }

    #[wasm_bindgen(js_name = setFallIntoVoid)]
    pub fn set_fall_into_void(&mut self, enabled: bool) {
        self.core.set_fall_into_void(enabled);
    }

    #[wasm_bindgen(js_name = setOverwrite)]
    pub fn set_overwrite(&mut self, enabled: bool) {
        self.core.set_overwrite(enabled);
    }

    #[wasm_bindgen(js_name = setTicksPerSecond)]
    pub fn set_ticks_per_second(&mut self, tps: f64) {
        self.core.set_ticks_per_second(tps);
    }

    #[wasm_bindgen(js_name = setMaxTickDebt)]
    pub fn set_max_tick_debt(&mut self, ticks: u32) {
        self.core.set_max_tick_debt(ticks);
    }

    #[wasm_bindgen(js_name = setSpigot)]
    pub fn set_spigot(&mut self, slot: usize, width: u32, element: u8) -> Result<(), JsValue> {
        let element = ElementType::try_from(element).map_err(js_err)?;
        self.core.set_spigot(slot, width, element).map_err(js_err)
    }

    /// Zone width of `slot`, 0 when disabled or out of range
    #[wasm_bindgen(js_name = spigotWidth)]
    pub fn spigot_width(&self, slot: usize) -> u32 {
        self.core.spigots().get(slot).map_or(0, |s| s.width)
    }

    #[wasm_bindgen(js_name = spigotElement)]
    pub fn spigot_element(&self, slot: usize) -> u8 {
        self.core
            .spigots()
            .get(slot)
            .map_or(ElementType::Background.id(), |s| s.element.id())
    }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }

    // === PERSISTENCE ===

    #[wasm_bindgen(js_name = saveTypes)]
    pub fn save_types(&self) -> Vec<u8> {
        self.core.save().types
    }

    #[wasm_bindgen(js_name = saveColors)]
    pub fn save_colors(&self) -> Vec<u32> {
        self.core.save().colors
    }

    /// Restore a snapshot taken with `saveTypes`/`saveColors` on a world of
    /// the same size. A bad snapshot is rejected and the grid left as is.
    pub fn load(&mut self, types: Vec<u8>, colors: Vec<u32>) -> Result<(), JsValue> {
        let snapshot = GridSnapshot {
            width: self.core.width(),
            height: self.core.height(),
            types,
            colors,
        };
        self.core.load(&snapshot).map_err(js_err)
    }

    /// Clear the grid and particles, rewinding the tick counter
    pub fn clear(&mut self) {
        self.core.clear();
    }

    // === RENDER ACCESS ===

    /// Get pointer to types array (for JS rendering)
    pub fn types_ptr(&self) -> *const u8 {
        self.core.types_ptr()
    }

    /// Get pointer to colors array (for JS rendering)
    pub fn colors_ptr(&self) -> *const u32 {
        self.core.colors_ptr()
    }

    /// Number of cells in each raster
    pub fn cell_count(&self) -> usize {
        self.core.cell_count()
    }
}
