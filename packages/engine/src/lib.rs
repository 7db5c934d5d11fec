//! Sandfall Engine - falling-sand automaton and effect particles in WASM
//!
//! Architecture:
//! - core/       - safety macro, hashing, colors, errors
//! - spatial/    - grid storage
//! - domain/     - element table and engine configuration
//! - systems/    - automaton models, brush, spigots, particles
//! - simulation/ - WorldCore orchestration and the JS facade

// Safety macros (must be first for macro export!)
#[macro_use]
pub mod core;
pub mod spatial;
pub mod domain;
pub mod systems;
pub mod simulation;

pub mod world {
    pub use crate::simulation::*;
}

pub use spatial::grid;
pub use domain::{config, elements};
pub use systems::behaviors;
pub use systems::particles;

use wasm_bindgen::prelude::*;

// Re-export wasm-bindgen-rayon for thread pool initialization
#[cfg(feature = "wasm-threads")]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine: panic hook, `log` -> browser console, banner.
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    #[cfg(target_arch = "wasm32")]
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"sandfall: logger already installed".into());
    }

    web_sys::console::log_1(&format!("Sandfall engine {} initialized", version()).into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Element table as JSON, for building palettes on the JS side.
#[wasm_bindgen]
pub fn element_manifest() -> String {
    domain::elements::ElementType::manifest_json()
}

// Re-export main types
pub use crate::core::EngineError;
pub use crate::domain::config::{EngineConfig, ExecutionModel};
pub use crate::domain::elements::ElementType;
pub use crate::simulation::{PerfStats, World, WorldCore};
pub use crate::systems::interaction::{InteractionAction, InteractionCommand};
pub use crate::systems::particles::ParticleKind;
