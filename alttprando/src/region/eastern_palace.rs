use alttprando_game::{Capability, FillRule, Item, LocationKind, Requirement};

use super::{BaseItems, LocationLogic, LocationSpec, RegionLogic};
use crate::settings::RegionSettings;

pub const NAME: &str = "Eastern Palace";
pub const BOSS_LOCATION: &str = "Heart Container - Armos Knights";

const COMPASS_ROOM: &str = "[dungeon-L1-1F] Eastern Palace - compass room";
const BIG_CHEST: &str = "[dungeon-L1-1F] Eastern Palace - big chest";
const BIG_BALL_ROOM: &str = "[dungeon-L1-1F] Eastern Palace - big ball room";
const BIG_KEY_ROOM: &str = "[dungeon-L1-1F] Eastern Palace - Big key";
const MAP_ROOM: &str = "[dungeon-L1-1F] Eastern Palace - map room";

pub const LOCATIONS: &[LocationSpec] = &[
    LocationSpec {
        name: COMPASS_ROOM,
        kind: LocationKind::Chest,
        address: &[0xE977],
    },
    LocationSpec {
        name: BIG_CHEST,
        kind: LocationKind::BigChest,
        address: &[0xE97D],
    },
    LocationSpec {
        name: BIG_BALL_ROOM,
        kind: LocationKind::Chest,
        address: &[0xE9B3],
    },
    LocationSpec {
        name: BIG_KEY_ROOM,
        kind: LocationKind::Chest,
        address: &[0xE9B9],
    },
    LocationSpec {
        name: MAP_ROOM,
        kind: LocationKind::Chest,
        address: &[0xE9F5],
    },
    LocationSpec {
        name: BOSS_LOCATION,
        kind: LocationKind::Drop,
        address: &[0x180150],
    },
];

pub fn base_items(settings: &RegionSettings) -> BaseItems {
    let mut items = vec![Item::BigKey];
    if settings.compasses_maps {
        items.extend([Item::Map, Item::Compass]);
    }
    BaseItems {
        items,
        fixed: false,
    }
}

pub fn no_major_glitches() -> RegionLogic {
    let arrows = Requirement::cap(Capability::CanShootArrows);
    RegionLogic {
        can_enter: Requirement::Free,
        can_complete: Some(Requirement::make_and(vec![
            Requirement::RegionEnter(NAME.to_string()),
            arrows.clone(),
        ])),
        locations: vec![
            LocationLogic::new(BIG_CHEST, Requirement::Free)
                .with_fill_rules(FillRule::forbid(Item::BigKey)),
            LocationLogic::new(BOSS_LOCATION, arrows)
                .with_fill_rules(FillRule::forbid(Item::BigKey)),
        ],
    }
}
