use alttprando_game::{Capability, Item, LocationKind, Requirement};

use super::{BaseItems, LocationSpec, RegionLogic};

pub const NAME: &str = "Castle Tower";

pub const LOCATIONS: &[LocationSpec] = &[
    LocationSpec {
        name: "[dungeon-A1-2F] Hyrule Castle Tower - 2 knife guys room",
        kind: LocationKind::Chest,
        address: &[0xEAB5],
    },
    LocationSpec {
        name: "[dungeon-A1-3F] Hyrule Castle Tower - maze room",
        kind: LocationKind::Chest,
        address: &[0xEAB2],
    },
];

// Both chests always hold a small key.
pub fn base_items() -> BaseItems {
    BaseItems {
        items: vec![Item::Key; LOCATIONS.len()],
        fixed: true,
    }
}

pub fn no_major_glitches() -> RegionLogic {
    RegionLogic {
        can_enter: Requirement::make_or(vec![
            Requirement::Item(Item::Cape),
            Requirement::cap(Capability::HasUpgradedSword),
        ]),
        can_complete: Some(Requirement::make_and(vec![
            Requirement::RegionEnter(NAME.to_string()),
            Requirement::cap(Capability::HasSword),
        ])),
        locations: vec![],
    }
}

pub fn glitched() -> RegionLogic {
    RegionLogic {
        can_enter: Requirement::Free,
        can_complete: Some(Requirement::cap(Capability::HasSword)),
        locations: vec![],
    }
}
