use serde::{Deserialize, Serialize};

use crate::core::EngineError;
use crate::elements::ElementType;

pub const NUM_SPIGOTS: usize = 4;
pub const SPIGOT_HEIGHT: u32 = 10;
pub const DEFAULT_SPIGOT_WIDTH: u32 = 5;
pub const DEFAULT_PARTICLE_CAPACITY: usize = 2048;
pub const DEFAULT_GRAVITY_PROBABILITY: f64 = 0.95;

/// How the automaton evaluates a tick. Fixed for the lifetime of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExecutionModel {
    /// Per-cell kernel over a frozen front buffer, written to a back buffer.
    #[default]
    Gather,
    /// Bottom-up zigzag scan mutating a single buffer in place.
    Scanline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpigotConfig {
    /// Zone width in cells, 0 disables the zone.
    pub width: u32,
    pub element: ElementType,
}

pub fn default_spigots() -> [SpigotConfig; NUM_SPIGOTS] {
    [
        ElementType::RainbowSand,
        ElementType::Water,
        ElementType::Salt,
        ElementType::Oil,
    ]
    .map(|element| SpigotConfig {
        width: DEFAULT_SPIGOT_WIDTH,
        element,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    pub width: u32,
    pub height: u32,
    pub seed: u32,
    pub gravity_probability: f64,
    pub fall_into_void: bool,
    pub overwrite: bool,
    pub model: ExecutionModel,
    pub particle_capacity: usize,
    pub spigots: [SpigotConfig; NUM_SPIGOTS],
    pub ticks_per_second: f64,
    pub max_tick_debt: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            seed: 12345,
            gravity_probability: DEFAULT_GRAVITY_PROBABILITY,
            fall_into_void: false,
            overwrite: false,
            model: ExecutionModel::Gather,
            particle_capacity: DEFAULT_PARTICLE_CAPACITY,
            spigots: default_spigots(),
            ticks_per_second: 60.0,
            max_tick_debt: 8,
        }
    }
}

impl EngineConfig {
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.width == 0 || self.height == 0 {
            return Err(EngineError::InvalidConfig(format!(
                "grid must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if (self.width as u64) * (self.height as u64) > u32::MAX as u64 {
            return Err(EngineError::InvalidConfig(format!(
                "grid {}x{} is too large",
                self.width, self.height
            )));
        }
        if !(0.0..=1.0).contains(&self.gravity_probability) {
            return Err(EngineError::InvalidConfig(format!(
                "gravityProbability must be within [0, 1], got {}",
                self.gravity_probability
            )));
        }
        if self.particle_capacity == 0 {
            return Err(EngineError::InvalidConfig(
                "particleCapacity must be positive".to_string(),
            ));
        }
        if !(self.ticks_per_second > 0.0) {
            return Err(EngineError::InvalidConfig(format!(
                "ticksPerSecond must be positive, got {}",
                self.ticks_per_second
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let cfg = EngineConfig::from_json("{}").unwrap();
        assert_eq!(cfg, EngineConfig::default());
        assert_eq!(cfg.spigots[0].element, ElementType::RainbowSand);
        assert_eq!(cfg.spigots[3].element, ElementType::Oil);
    }

    #[test]
    fn partial_json_overrides_fields() {
        let cfg = EngineConfig::from_json(
            r#"{"width": 64, "height": 32, "model": "scanline", "fallIntoVoid": true,
                "spigots": [{"width": 0, "element": "sand"}, {"width": 3, "element": "lava"},
                            {"width": 5, "element": "salt"}, {"width": 5, "element": "oil"}]}"#,
        )
        .unwrap();
        assert_eq!((cfg.width, cfg.height), (64, 32));
        assert_eq!(cfg.model, ExecutionModel::Scanline);
        assert!(cfg.fall_into_void);
        assert_eq!(cfg.spigots[0].width, 0);
        assert_eq!(cfg.spigots[1].element, ElementType::Lava);
        assert_eq!(cfg.gravity_probability, DEFAULT_GRAVITY_PROBABILITY);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            EngineConfig::from_json(r#"{"width": 0}"#),
            Err(EngineError::InvalidConfig(_))
        ));
        assert!(matches!(
            EngineConfig::from_json(r#"{"gravityProbability": 1.5}"#),
            Err(EngineError::InvalidConfig(_))
        ));
        assert!(matches!(
            EngineConfig::from_json(r#"{"particleCapacity": 0}"#),
            Err(EngineError::InvalidConfig(_))
        ));
        assert!(matches!(
            EngineConfig::from_json(r#"{"spigots": [{"width": 1, "element": "kryptonite"}]}"#),
            Err(EngineError::ConfigParse(_))
        ));
        assert!(matches!(
            EngineConfig::from_json("not json"),
            Err(EngineError::ConfigParse(_))
        ));
    }

    #[test]
    fn json_round_trips() {
        let mut cfg = EngineConfig::with_size(40, 30);
        cfg.overwrite = true;
        cfg.seed = 9;
        let back = EngineConfig::from_json(&cfg.to_json()).unwrap();
        assert_eq!(back, cfg);
    }
}
