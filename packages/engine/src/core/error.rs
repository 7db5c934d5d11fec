//! Engine error type.
//!
//! Only inputs crossing the public API can fail: configuration, raw element or
//! particle tags, snapshots and spigot slots. Out-of-bounds coordinates are
//! ignored and pool exhaustion is silent, so neither shows up here.

use std::fmt;

#[derive(Debug)]
pub enum EngineError {
    /// Configuration JSON did not parse.
    ConfigParse(serde_json::Error),
    /// Configuration parsed but holds an unusable value.
    InvalidConfig(String),
    /// Raw element tag with no matching element.
    UnknownElement(u8),
    /// Raw particle tag with no matching particle kind.
    UnknownParticle(u8),
    /// Spigot slot outside `0..NUM_SPIGOTS`.
    SpigotIndex(usize),
    /// Snapshot was taken from a grid of another size.
    SnapshotDimensions {
        expected: (u32, u32),
        found: (u32, u32),
    },
    /// Snapshot raster length disagrees with its declared dimensions.
    SnapshotLength {
        raster: &'static str,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::ConfigParse(e) => write!(f, "Failed to parse engine config: {}", e),
            EngineError::InvalidConfig(msg) => write!(f, "Invalid engine config: {}", msg),
            EngineError::UnknownElement(id) => write!(f, "Unknown element id {}", id),
            EngineError::UnknownParticle(id) => write!(f, "Unknown particle kind {}", id),
            EngineError::SpigotIndex(i) => write!(f, "Spigot index {} out of range", i),
            EngineError::SnapshotDimensions { expected, found } => write!(
                f,
                "Snapshot is {}x{} but the grid is {}x{}",
                found.0, found.1, expected.0, expected.1
            ),
            EngineError::SnapshotLength {
                raster,
                expected,
                found,
            } => write!(
                f,
                "Snapshot {} raster has {} cells, expected {}",
                raster, found, expected
            ),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::ConfigParse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        EngineError::ConfigParse(e)
    }
}
