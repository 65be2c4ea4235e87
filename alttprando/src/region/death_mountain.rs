use alttprando_game::{Capability, Item, LocationKind, Requirement};

use super::{LocationLogic, LocationSpec, RegionLogic};

pub const NAME: &str = "Death Mountain";

const OLD_MAN: &str = "Old Man";
const SPECTACLE_ROCK: &str = "Spectacle Rock";
const ETHER_TABLET: &str = "Ether Tablet";

pub const LOCATIONS: &[LocationSpec] = &[
    LocationSpec {
        name: OLD_MAN,
        kind: LocationKind::Npc,
        address: &[0xF69FA],
    },
    LocationSpec {
        name: "Spectacle Rock Cave",
        kind: LocationKind::Standing,
        address: &[0x180002],
    },
    LocationSpec {
        name: SPECTACLE_ROCK,
        kind: LocationKind::Standing,
        address: &[0x180140],
    },
    LocationSpec {
        name: ETHER_TABLET,
        kind: LocationKind::Standing,
        address: &[0x180016],
    },
];

fn ether_tablet() -> Requirement {
    Requirement::make_and(vec![
        Requirement::Item(Item::BookOfMudora),
        Requirement::cap(Capability::HasUpgradedSword),
        Requirement::make_or(vec![
            Requirement::Item(Item::MagicMirror),
            Requirement::make_and(vec![
                Requirement::Item(Item::Hookshot),
                Requirement::Item(Item::Hammer),
            ]),
        ]),
    ])
}

pub fn no_major_glitches() -> RegionLogic {
    RegionLogic {
        // The climb past the Old Man is a dark cave.
        can_enter: Requirement::make_or(vec![
            Requirement::cap(Capability::CanFly),
            Requirement::make_and(vec![
                Requirement::cap(Capability::CanLiftRocks),
                Requirement::Item(Item::Lamp),
            ]),
        ]),
        can_complete: None,
        locations: vec![
            LocationLogic::new(OLD_MAN, Requirement::Item(Item::Lamp)),
            LocationLogic::new(SPECTACLE_ROCK, Requirement::Item(Item::MagicMirror)),
            LocationLogic::new(ETHER_TABLET, ether_tablet()),
        ],
    }
}

pub fn glitched() -> RegionLogic {
    RegionLogic {
        can_enter: Requirement::make_or(vec![
            Requirement::cap(Capability::CanFly),
            Requirement::cap(Capability::CanLiftRocks),
        ]),
        can_complete: None,
        locations: vec![
            LocationLogic::new(SPECTACLE_ROCK, Requirement::Item(Item::MagicMirror)),
            LocationLogic::new(ETHER_TABLET, ether_tablet()),
        ],
    }
}
