use serde::{Deserialize, Serialize};

use crate::core::EngineError;

pub const PARTICLE_KIND_COUNT: usize = 11;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParticleKind {
    Nitro = 0,
    Napalm = 1,
    C4 = 2,
    Lava = 3,
    /// Star burst; becomes spokes on its first action.
    Magic1 = 4,
    Magic1Spoke = 5,
    /// Spiral around the grid centre.
    Magic2 = 6,
    Methane = 7,
    Tree = 8,
    ChargedNitro = 9,
    Nuke = 10,
}

impl ParticleKind {
    pub const ALL: [ParticleKind; PARTICLE_KIND_COUNT] = [
        ParticleKind::Nitro,
        ParticleKind::Napalm,
        ParticleKind::C4,
        ParticleKind::Lava,
        ParticleKind::Magic1,
        ParticleKind::Magic1Spoke,
        ParticleKind::Magic2,
        ParticleKind::Methane,
        ParticleKind::Tree,
        ParticleKind::ChargedNitro,
        ParticleKind::Nuke,
    ];

    #[inline]
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Drawn as a stroke rather than a disc.
    pub fn draws_line(self) -> bool {
        matches!(
            self,
            ParticleKind::Magic1Spoke | ParticleKind::Tree | ParticleKind::ChargedNitro
        )
    }
}

impl TryFrom<u8> for ParticleKind {
    type Error = EngineError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        ParticleKind::ALL
            .get(id as usize)
            .copied()
            .ok_or(EngineError::UnknownParticle(id))
    }
}
