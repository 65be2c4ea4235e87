use alttprando_game::{Capability, FillRule, Item, LocationKind, Requirement};

use super::{death_mountain, BaseItems, LocationLogic, LocationSpec, RegionLogic};
use crate::settings::RegionSettings;

pub const NAME: &str = "Tower of Hera";
pub const BOSS_LOCATION: &str = "Heart Container - Moldorm";

const FIRST_FLOOR: &str = "[dungeon-L3-1F] Tower of Hera - first floor";
const BIG_CHEST: &str = "[dungeon-L3-4F] Tower of Hera - big chest";

pub const LOCATIONS: &[LocationSpec] = &[
    LocationSpec {
        name: FIRST_FLOOR,
        kind: LocationKind::Chest,
        address: &[0xE9E6],
    },
    LocationSpec {
        name: "[dungeon-L3-1F] Tower of Hera - freestanding key",
        kind: LocationKind::Standing,
        address: &[0x180162],
    },
    LocationSpec {
        name: "[dungeon-L3-2F] Tower of Hera - Entrance",
        kind: LocationKind::Chest,
        address: &[0xE9AD],
    },
    LocationSpec {
        name: "[dungeon-L3-4F] Tower of Hera - 4F [small chest]",
        kind: LocationKind::Chest,
        address: &[0xE9FB],
    },
    LocationSpec {
        name: BIG_CHEST,
        kind: LocationKind::BigChest,
        address: &[0xE9F8],
    },
    LocationSpec {
        name: BOSS_LOCATION,
        kind: LocationKind::Drop,
        address: &[0x180152],
    },
];

pub fn base_items(settings: &RegionSettings) -> BaseItems {
    let mut items = vec![Item::Key, Item::BigKey];
    if settings.compasses_maps {
        items.extend([Item::Map, Item::Compass]);
    }
    BaseItems {
        items,
        fixed: false,
    }
}

fn logic(climb: Requirement) -> RegionLogic {
    let moldorm = Requirement::make_or(vec![
        Requirement::cap(Capability::HasSword),
        Requirement::Item(Item::Hammer),
    ]);
    RegionLogic {
        can_enter: Requirement::make_and(vec![
            Requirement::RegionEnter(death_mountain::NAME.to_string()),
            climb,
        ]),
        can_complete: Some(Requirement::make_and(vec![
            Requirement::RegionEnter(NAME.to_string()),
            moldorm.clone(),
        ])),
        locations: vec![
            LocationLogic::new(FIRST_FLOOR, Requirement::cap(Capability::CanLightTorches)),
            LocationLogic::new(BIG_CHEST, Requirement::Free)
                .with_fill_rules(FillRule::forbid(Item::BigKey)),
            LocationLogic::new(BOSS_LOCATION, moldorm)
                .with_fill_rules(FillRule::forbid(Item::BigKey)),
        ],
    }
}

pub fn no_major_glitches() -> RegionLogic {
    logic(Requirement::make_or(vec![
        Requirement::Item(Item::MagicMirror),
        Requirement::make_and(vec![
            Requirement::Item(Item::Hookshot),
            Requirement::Item(Item::Hammer),
        ]),
    ]))
}

pub fn glitched() -> RegionLogic {
    // Boots clip onto the tower's ledge.
    logic(Requirement::make_or(vec![
        Requirement::Item(Item::MagicMirror),
        Requirement::Item(Item::PegasusBoots),
        Requirement::make_and(vec![
            Requirement::Item(Item::Hookshot),
            Requirement::Item(Item::Hammer),
        ]),
    ]))
}
