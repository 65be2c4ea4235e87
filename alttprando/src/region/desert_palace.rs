use alttprando_game::{Capability, FillRule, Item, LocationKind, Requirement};

use super::{BaseItems, LocationLogic, LocationSpec, RegionLogic};
use crate::settings::RegionSettings;

pub const NAME: &str = "Desert Palace";
pub const BOSS_LOCATION: &str = "Heart Container - Lanmolas";

const BIG_CHEST: &str = "[dungeon-L2-B1] Desert Palace - big chest";
const TORCH: &str = "[dungeon-L2-B1] Desert Palace - torch";

pub const LOCATIONS: &[LocationSpec] = &[
    LocationSpec {
        name: BIG_CHEST,
        kind: LocationKind::BigChest,
        address: &[0xE98F],
    },
    LocationSpec {
        name: "[dungeon-L2-B1] Desert Palace - Map room",
        kind: LocationKind::Chest,
        address: &[0xE9B6],
    },
    LocationSpec {
        name: "[dungeon-L2-B1] Desert Palace - Big key room",
        kind: LocationKind::Chest,
        address: &[0xE9C2],
    },
    LocationSpec {
        name: "[dungeon-L2-B1] Desert Palace - compass room",
        kind: LocationKind::Chest,
        address: &[0xE9CB],
    },
    LocationSpec {
        name: TORCH,
        kind: LocationKind::Standing,
        address: &[0x180160],
    },
    LocationSpec {
        name: BOSS_LOCATION,
        kind: LocationKind::Drop,
        address: &[0x180151],
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

fn logic(can_enter: Requirement) -> RegionLogic {
    // Lanmolas sits behind a rock and a pair of torches.
    let boss = Requirement::make_and(vec![
        Requirement::cap(Capability::CanLiftRocks),
        Requirement::cap(Capability::CanLightTorches),
    ]);
    RegionLogic {
        can_enter,
        can_complete: Some(Requirement::make_and(vec![
            Requirement::RegionEnter(NAME.to_string()),
            boss.clone(),
        ])),
        locations: vec![
            LocationLogic::new(BIG_CHEST, Requirement::Free)
                .with_fill_rules(FillRule::forbid(Item::BigKey)),
            LocationLogic::new(TORCH, Requirement::Item(Item::PegasusBoots)),
            LocationLogic::new(BOSS_LOCATION, boss)
                .with_fill_rules(FillRule::forbid(Item::BigKey)),
        ],
    }
}

pub fn no_major_glitches() -> RegionLogic {
    logic(Requirement::make_or(vec![
        Requirement::Item(Item::BookOfMudora),
        Requirement::make_and(vec![
            Requirement::Item(Item::MagicMirror),
            Requirement::cap(Capability::CanLiftDarkRocks),
            Requirement::cap(Capability::CanFly),
        ]),
    ]))
}

pub fn glitched() -> RegionLogic {
    logic(Requirement::make_or(vec![
        Requirement::Item(Item::BookOfMudora),
        Requirement::make_and(vec![
            Requirement::Item(Item::MagicMirror),
            Requirement::cap(Capability::CanFly),
        ]),
    ]))
}
