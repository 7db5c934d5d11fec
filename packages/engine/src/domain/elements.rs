//! Element table.
//!
//! One row per element: display name, behavioral class, canonical color and how
//! gravity treats it. The grid stores `ElementType` directly, so a cell can never
//! hold a tag that has no row here; raw bytes are only converted at the API edge.

use serde::{Deserialize, Serialize};

use crate::core::color::{rainbow_color, rgb};
use crate::core::EngineError;

pub type ElementId = u8;

pub const ELEMENT_COUNT: usize = 38;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementType {
    #[default]
    Background = 0,
    Wall = 1,
    Sand = 2,
    RainbowSand = 3,
    Water = 4,
    Fire = 5,
    Salt = 6,
    Oil = 7,
    Rock = 8,
    Ice = 9,
    Lava = 10,
    Steam = 11,
    SaltWater = 12,
    Plant = 13,
    Gunpowder = 14,
    Wax = 15,
    FallingWax = 16,
    Nitro = 17,
    Napalm = 18,
    C4 = 19,
    Methane = 20,
    Branch = 21,
    Leaf = 22,
    Pollen = 23,
    Mystery = 24,
    ChargedNitro = 25,
    Concrete = 26,
    Fuse = 27,
    Acid = 28,
    Cryo = 29,
    Soil = 30,
    WetSoil = 31,
    Thermite = 32,
    BurningThermite = 33,
    Spout = 34,
    Well = 35,
    Torch = 36,
    ChilledIce = 37,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BehaviorClass {
    Empty,
    StaticSolid,
    Granular,
    Liquid,
    Gas,
    Reactive,
    Decorative,
}

#[derive(Debug, Clone, Copy)]
pub struct ElementProps {
    pub name: &'static str,
    pub class: BehaviorClass,
    pub color: u32,
    /// Pulled straight down by gravity.
    pub falls: bool,
    /// May slide to a lower diagonal when blocked below.
    pub diagonal: bool,
}

const fn row(
    name: &'static str,
    class: BehaviorClass,
    color: u32,
    falls: bool,
    diagonal: bool,
) -> ElementProps {
    ElementProps {
        name,
        class,
        color,
        falls,
        diagonal,
    }
}

use BehaviorClass::*;

pub static ELEMENT_DATA: [ElementProps; ELEMENT_COUNT] = [
    row("background", Empty, rgb(0, 0, 0), false, false),
    row("wall", StaticSolid, rgb(127, 127, 127), false, false),
    row("sand", Granular, rgb(223, 193, 99), true, true),
    // Hue 0 at the rainbow saturation/value; live cells get their hue at spawn.
    row("rainbowSand", Granular, rgb(230, 46, 46), true, true),
    row("water", Liquid, rgb(0, 10, 255), true, true),
    row("fire", Reactive, rgb(255, 0, 10), false, false),
    row("salt", Granular, rgb(253, 253, 253), true, true),
    row("oil", Liquid, rgb(150, 60, 0), true, true),
    row("rock", Granular, rgb(68, 40, 8), true, false),
    row("ice", StaticSolid, rgb(161, 232, 255), false, false),
    row("lava", Liquid, rgb(245, 110, 40), true, true),
    row("steam", Gas, rgb(195, 214, 235), false, false),
    row("saltWater", Liquid, rgb(127, 175, 255), true, true),
    row("plant", Decorative, rgb(0, 220, 0), false, false),
    row("gunpowder", Granular, rgb(170, 170, 140), true, true),
    row("wax", StaticSolid, rgb(239, 225, 211), false, false),
    row("fallingWax", Granular, rgb(239, 225, 211), true, false),
    row("nitro", Reactive, rgb(0, 150, 26), true, true),
    row("napalm", Reactive, rgb(220, 128, 70), true, true),
    row("c4", Reactive, rgb(240, 230, 150), false, false),
    row("methane", Gas, rgb(140, 140, 140), false, false),
    row("branch", Decorative, rgb(166, 128, 100), false, false),
    row("leaf", Decorative, rgb(82, 107, 45), false, false),
    row("pollen", Granular, rgb(230, 235, 110), true, true),
    row("mystery", Reactive, rgb(162, 232, 196), true, true),
    row("chargedNitro", Reactive, rgb(245, 98, 78), true, true),
    row("concrete", Granular, rgb(180, 180, 180), true, true),
    row("fuse", StaticSolid, rgb(219, 175, 199), false, false),
    row("acid", Liquid, rgb(157, 240, 40), true, true),
    row("cryo", Reactive, rgb(0, 213, 255), true, true),
    row("soil", Granular, rgb(120, 75, 33), true, false),
    row("wetSoil", Granular, rgb(70, 35, 10), true, false),
    row("thermite", Granular, rgb(195, 140, 70), true, false),
    row("burningThermite", Reactive, rgb(255, 130, 130), true, false),
    // Emitters: spout makes water, well makes oil, torch makes fire.
    row("spout", StaticSolid, rgb(117, 189, 252), false, false),
    row("well", StaticSolid, rgb(131, 11, 28), false, false),
    row("torch", StaticSolid, rgb(200, 5, 0), false, false),
    row("chilledIce", StaticSolid, rgb(20, 153, 220), false, false),
];

/// Elements whose particle pixels may be written into the grid.
pub const PAINTABLE: [ElementType; 11] = [
    ElementType::Fire,
    ElementType::Wall,
    ElementType::Rock,
    ElementType::Lava,
    ElementType::Plant,
    ElementType::Spout,
    ElementType::Well,
    ElementType::Wax,
    ElementType::Ice,
    ElementType::Branch,
    ElementType::Leaf,
];

/// Colors the magic particles pick from.
pub const MAGIC_COLORS: [ElementType; 8] = [
    ElementType::Wall,
    ElementType::Plant,
    ElementType::Spout,
    ElementType::Well,
    ElementType::Wax,
    ElementType::Ice,
    ElementType::Branch,
    ElementType::Leaf,
];

impl ElementType {
    pub const ALL: [ElementType; ELEMENT_COUNT] = [
        ElementType::Background,
        ElementType::Wall,
        ElementType::Sand,
        ElementType::RainbowSand,
        ElementType::Water,
        ElementType::Fire,
        ElementType::Salt,
        ElementType::Oil,
        ElementType::Rock,
        ElementType::Ice,
        ElementType::Lava,
        ElementType::Steam,
        ElementType::SaltWater,
        ElementType::Plant,
        ElementType::Gunpowder,
        ElementType::Wax,
        ElementType::FallingWax,
        ElementType::Nitro,
        ElementType::Napalm,
        ElementType::C4,
        ElementType::Methane,
        ElementType::Branch,
        ElementType::Leaf,
        ElementType::Pollen,
        ElementType::Mystery,
        ElementType::ChargedNitro,
        ElementType::Concrete,
        ElementType::Fuse,
        ElementType::Acid,
        ElementType::Cryo,
        ElementType::Soil,
        ElementType::WetSoil,
        ElementType::Thermite,
        ElementType::BurningThermite,
        ElementType::Spout,
        ElementType::Well,
        ElementType::Torch,
        ElementType::ChilledIce,
    ];

    #[inline]
    pub fn id(self) -> ElementId {
        self as u8
    }

    #[inline]
    pub fn props(self) -> &'static ElementProps {
        &ELEMENT_DATA[self as usize]
    }

    #[inline]
    pub fn class(self) -> BehaviorClass {
        self.props().class
    }

    #[inline]
    pub fn color(self) -> u32 {
        self.props().color
    }

    #[inline]
    pub fn name(self) -> &'static str {
        self.props().name
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self == ElementType::Background
    }

    #[inline]
    pub fn falls(self) -> bool {
        self.props().falls
    }

    #[inline]
    pub fn is_rainbow(self) -> bool {
        self == ElementType::RainbowSand
    }

    /// Color for a cell of this element created on `tick`.
    ///
    /// Rainbow elements take their hue from the tick plus `jitter`; everything else
    /// uses the canonical color.
    pub fn spawn_color(self, tick: u64, jitter: u32) -> u32 {
        if self.is_rainbow() {
            rainbow_color(tick, jitter)
        } else {
            self.color()
        }
    }

    pub fn from_name(name: &str) -> Option<ElementType> {
        ElementType::ALL.iter().copied().find(|e| e.name() == name)
    }

    /// Paintable element whose canonical color is exactly `color`, if any.
    pub fn paintable_for_color(color: u32) -> Option<ElementType> {
        PAINTABLE.iter().copied().find(|e| e.color() == color)
    }

    /// JSON list of `{ id, name, class, color }` for UI palettes.
    pub fn manifest_json() -> String {
        #[derive(Serialize)]
        struct Entry {
            id: ElementId,
            name: &'static str,
            class: BehaviorClass,
            color: u32,
        }
        let entries: Vec<Entry> = ElementType::ALL
            .iter()
            .map(|e| Entry {
                id: e.id(),
                name: e.name(),
                class: e.class(),
                color: e.color(),
            })
            .collect();
        serde_json::to_string(&entries).unwrap_or_else(|_| "[]".to_string())
    }
}

impl TryFrom<u8> for ElementType {
    type Error = EngineError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        ElementType::ALL
            .get(id as usize)
            .copied()
            .ok_or(EngineError::UnknownElement(id))
    }
}

impl From<ElementType> for u8 {
    fn from(e: ElementType) -> u8 {
        e as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_indexed_by_discriminant() {
        for (i, e) in ElementType::ALL.iter().enumerate() {
            assert_eq!(e.id() as usize, i);
            assert_eq!(ElementType::try_from(i as u8).ok(), Some(*e));
        }
    }

    #[test]
    fn unknown_tag_is_rejected() {
        assert!(matches!(
            ElementType::try_from(ELEMENT_COUNT as u8),
            Err(EngineError::UnknownElement(38))
        ));
        assert!(ElementType::try_from(255).is_err());
    }

    #[test]
    fn names_round_trip() {
        for e in ElementType::ALL {
            assert_eq!(ElementType::from_name(e.name()), Some(e));
        }
        assert_eq!(ElementType::from_name("unobtainium"), None);
    }

    #[test]
    fn paintable_colors_are_unique() {
        for a in PAINTABLE {
            assert_eq!(ElementType::paintable_for_color(a.color()), Some(a));
        }
        assert_eq!(ElementType::paintable_for_color(ElementType::Sand.color()), None);
    }

    #[test]
    fn only_background_is_empty_class() {
        for e in ElementType::ALL {
            assert_eq!(e.class() == BehaviorClass::Empty, e.is_empty());
        }
    }

    #[test]
    fn static_solids_never_fall() {
        for e in ElementType::ALL {
            if e.class() == BehaviorClass::StaticSolid {
                assert!(!e.falls(), "{:?}", e);
            }
        }
    }

    #[test]
    fn rainbow_spawn_color_depends_on_tick() {
        assert_ne!(
            ElementType::RainbowSand.spawn_color(0, 0),
            ElementType::RainbowSand.spawn_color(90, 0)
        );
        assert_eq!(ElementType::Sand.spawn_color(90, 7), ElementType::Sand.color());
    }

    #[test]
    fn serde_uses_camel_case_names() {
        let json = serde_json::to_string(&ElementType::SaltWater).unwrap();
        assert_eq!(json, "\"saltWater\"");
        let back: ElementType = serde_json::from_str("\"rainbowSand\"").unwrap();
        assert_eq!(back, ElementType::RainbowSand);
    }
}
