//! Raw dual-raster snapshot: one tag byte and one ABGR color per cell, row-major.

use serde::{Deserialize, Serialize};

use super::*;
use crate::core::EngineError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSnapshot {
    pub width: u32,
    pub height: u32,
    pub types: Vec<u8>,
    pub colors: Vec<u32>,
}

impl Grid {
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            width: self.width,
            height: self.height,
            types: self.types.iter().map(|t| t.id()).collect(),
            colors: self.colors.clone(),
        }
    }

    /// Copy both rasters back in. Nothing is written unless the whole snapshot
    /// validates.
    pub fn restore(&mut self, snapshot: &GridSnapshot) -> Result<(), EngineError> {
        if snapshot.width != self.width || snapshot.height != self.height {
            return Err(EngineError::SnapshotDimensions {
                expected: (self.width, self.height),
                found: (snapshot.width, snapshot.height),
            });
        }
        if snapshot.types.len() != self.size {
            return Err(EngineError::SnapshotLength {
                raster: "type",
                expected: self.size,
                found: snapshot.types.len(),
            });
        }
        if snapshot.colors.len() != self.size {
            return Err(EngineError::SnapshotLength {
                raster: "color",
                expected: self.size,
                found: snapshot.colors.len(),
            });
        }

        let types = snapshot
            .types
            .iter()
            .map(|&id| ElementType::try_from(id))
            .collect::<Result<Vec<_>, _>>()?;

        self.types.copy_from_slice(&types);
        self.colors.copy_from_slice(&snapshot.colors);
        self.updated.fill(0);
        Ok(())
    }
}
