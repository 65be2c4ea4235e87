//! Concrete region variants.
//!
//! Each variant is described by data: its locations, the items that belong in it before the main
//! pool is placed, and, per ruleset, its entry/completion requirements and the requirement and
//! fill rule of each location. Rulesets without special-casing delegate explicitly to another
//! ruleset's definition.

pub mod castle_tower;
pub mod death_mountain;
pub mod desert_palace;
pub mod eastern_palace;
pub mod light_world;
pub mod prizes;
pub mod tower_of_hera;

use alttprando_game::{Address, FillRule, Item, LocationKind, RandoError, Requirement};
use serde::{Deserialize, Serialize};
use strum_macros::{EnumString, VariantNames};

use crate::settings::{RegionSettings, Ruleset};
use crate::world::{Location, LocationCollection, Region};

#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, EnumString, VariantNames, Serialize, Deserialize,
)]
pub enum RegionKind {
    LightWorld,
    DeathMountain,
    HyruleCastleTower,
    EasternPalace,
    DesertPalace,
    TowerOfHera,
    Prizes,
}

pub struct LocationSpec {
    pub name: &'static str,
    pub kind: LocationKind,
    pub address: &'static [Address],
}

pub struct LocationLogic {
    pub name: &'static str,
    pub requirement: Requirement,
    pub fill_rule: FillRule,
}

impl LocationLogic {
    pub fn new(name: &'static str, requirement: Requirement) -> Self {
        LocationLogic {
            name,
            requirement,
            fill_rule: FillRule::Any,
        }
    }

    pub fn with_fill_rules(mut self, fill_rule: FillRule) -> Self {
        self.fill_rule = fill_rule;
        self
    }
}

pub struct RegionLogic {
    pub can_enter: Requirement,
    pub can_complete: Option<Requirement>,
    pub locations: Vec<LocationLogic>,
}

impl Default for RegionLogic {
    fn default() -> Self {
        RegionLogic {
            can_enter: Requirement::Free,
            can_complete: None,
            locations: vec![],
        }
    }
}

/// Items placed within a region before the main item pool, in placement order.
pub struct BaseItems {
    pub items: Vec<Item>,
    // Fixed base items are assigned to the region's locations in order, bypassing fill rules.
    pub fixed: bool,
}

impl RegionKind {
    pub fn name(self) -> &'static str {
        match self {
            RegionKind::LightWorld => light_world::NAME,
            RegionKind::DeathMountain => death_mountain::NAME,
            RegionKind::HyruleCastleTower => castle_tower::NAME,
            RegionKind::EasternPalace => eastern_palace::NAME,
            RegionKind::DesertPalace => desert_palace::NAME,
            RegionKind::TowerOfHera => tower_of_hera::NAME,
            RegionKind::Prizes => prizes::NAME,
        }
    }

    pub fn location_specs(self) -> &'static [LocationSpec] {
        match self {
            RegionKind::LightWorld => light_world::LOCATIONS,
            RegionKind::DeathMountain => death_mountain::LOCATIONS,
            RegionKind::HyruleCastleTower => castle_tower::LOCATIONS,
            RegionKind::EasternPalace => eastern_palace::LOCATIONS,
            RegionKind::DesertPalace => desert_palace::LOCATIONS,
            RegionKind::TowerOfHera => tower_of_hera::LOCATIONS,
            RegionKind::Prizes => prizes::LOCATIONS,
        }
    }

    pub fn logic(self, ruleset: Ruleset) -> RegionLogic {
        match (self, ruleset) {
            // Speedrunner logic is No Major Glitches logic for every region so far.
            (_, Ruleset::SpeedRunner) => self.logic(Ruleset::NoMajorGlitches),

            (RegionKind::LightWorld, Ruleset::NoMajorGlitches) => light_world::no_major_glitches(),
            (RegionKind::LightWorld, Ruleset::Glitched) => light_world::glitched(),
            (RegionKind::DeathMountain, Ruleset::NoMajorGlitches) => {
                death_mountain::no_major_glitches()
            }
            (RegionKind::DeathMountain, Ruleset::Glitched) => death_mountain::glitched(),
            (RegionKind::HyruleCastleTower, Ruleset::NoMajorGlitches) => {
                castle_tower::no_major_glitches()
            }
            (RegionKind::HyruleCastleTower, Ruleset::Glitched) => castle_tower::glitched(),
            (RegionKind::EasternPalace, Ruleset::NoMajorGlitches | Ruleset::Glitched) => {
                eastern_palace::no_major_glitches()
            }
            (RegionKind::DesertPalace, Ruleset::NoMajorGlitches) => {
                desert_palace::no_major_glitches()
            }
            (RegionKind::DesertPalace, Ruleset::Glitched) => desert_palace::glitched(),
            (RegionKind::TowerOfHera, Ruleset::NoMajorGlitches) => {
                tower_of_hera::no_major_glitches()
            }
            (RegionKind::TowerOfHera, Ruleset::Glitched) => tower_of_hera::glitched(),
            (RegionKind::Prizes, Ruleset::NoMajorGlitches | Ruleset::Glitched) => prizes::logic(),
        }
    }

    pub fn base_items(self, settings: &RegionSettings) -> BaseItems {
        match self {
            RegionKind::HyruleCastleTower => castle_tower::base_items(),
            RegionKind::EasternPalace => eastern_palace::base_items(settings),
            RegionKind::DesertPalace => desert_palace::base_items(settings),
            RegionKind::TowerOfHera => tower_of_hera::base_items(settings),
            RegionKind::LightWorld | RegionKind::DeathMountain | RegionKind::Prizes => BaseItems {
                items: vec![],
                fixed: false,
            },
        }
    }

    /// The boss drop, which is left out of base-item placement unless `bossNormalLocation` is set.
    pub fn boss_location(self) -> Option<&'static str> {
        match self {
            RegionKind::EasternPalace => Some(eastern_palace::BOSS_LOCATION),
            RegionKind::DesertPalace => Some(desert_palace::BOSS_LOCATION),
            RegionKind::TowerOfHera => Some(tower_of_hera::BOSS_LOCATION),
            _ => None,
        }
    }

    pub fn prize_location(self) -> Option<&'static str> {
        match self {
            RegionKind::EasternPalace => Some(prizes::EASTERN_PALACE_PENDANT),
            RegionKind::DesertPalace => Some(prizes::DESERT_PALACE_PENDANT),
            RegionKind::TowerOfHera => Some(prizes::TOWER_OF_HERA_PENDANT),
            _ => None,
        }
    }

    /// Construct the region with its locations, and wire its logic for the given ruleset.
    pub fn build(self, ruleset: Ruleset, settings: &RegionSettings) -> Result<Region, RandoError> {
        let name = self.name();
        let locations = LocationCollection::new(
            self.location_specs()
                .iter()
                .map(|spec| Location::new(spec.name, spec.kind, spec.address.to_vec(), name))
                .collect(),
        )?;
        let mut region = Region::new(name, locations);
        region.kind = Some(self);
        region.boss_location_in_base = settings.boss_normal_location;

        let logic = self.logic(ruleset);
        region.set_can_enter(logic.can_enter);
        region.set_can_complete(logic.can_complete);
        for loc_logic in logic.locations {
            region
                .location_mut(loc_logic.name)?
                .set_requirement(loc_logic.requirement)
                .set_fill_rules(loc_logic.fill_rule);
        }
        Ok(region)
    }
}
