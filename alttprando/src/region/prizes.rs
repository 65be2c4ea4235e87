use alttprando_game::{FillRule, LocationKind, Requirement, PENDANTS};

use super::{LocationLogic, LocationSpec, RegionLogic};

pub const NAME: &str = "Prize";

pub const EASTERN_PALACE_PENDANT: &str = "Eastern Palace Pendant";
pub const DESERT_PALACE_PENDANT: &str = "Desert Palace Pendant";
pub const TOWER_OF_HERA_PENDANT: &str = "Tower of Hera Pendant";

pub const LOCATIONS: &[LocationSpec] = &[
    LocationSpec {
        name: EASTERN_PALACE_PENDANT,
        kind: LocationKind::Prize,
        address: &[0x1209D, 0x53EF8, 0x53EF9, 0x180052, 0x18007C, 0xC6FE],
    },
    LocationSpec {
        name: DESERT_PALACE_PENDANT,
        kind: LocationKind::Prize,
        address: &[0x1209E, 0x53F1C, 0x53F1D, 0x180053, 0x180078, 0xC6FF],
    },
    LocationSpec {
        name: TOWER_OF_HERA_PENDANT,
        kind: LocationKind::Prize,
        address: &[0x120A5, 0x53F0A, 0x53F0B, 0x18005A, 0x18007A, 0xC706],
    },
];

// Access to each pendant comes from the dungeon it is the prize of (see
// `World::set_prize_location`); here we only restrict what the slots may hold.
pub fn logic() -> RegionLogic {
    RegionLogic {
        can_enter: Requirement::Free,
        can_complete: None,
        locations: LOCATIONS
            .iter()
            .map(|spec| {
                LocationLogic::new(spec.name, Requirement::Free)
                    .with_fill_rules(FillRule::Only(PENDANTS.to_vec()))
            })
            .collect(),
    }
}
