//! Core helpers shared by every layer.

#[macro_use]
#[path = "utils/safety.rs"]
pub mod safety;
#[path = "utils/hash.rs"]
pub mod hash;
#[path = "utils/color.rs"]
pub mod color;
pub mod error;

pub use error::EngineError;
