use alttprando_game::{Capability, Item, LocationKind, Requirement};

use super::{LocationLogic, LocationSpec, RegionLogic};

pub const NAME: &str = "Light World";

const SAHASRAHLA: &str = "Sahasrahla";
const KING_ZORA: &str = "King Zora";
const ZORAS_LEDGE: &str = "Zora's Ledge";
const LIBRARY: &str = "Library";
const PEDESTAL: &str = "Master Sword Pedestal";

pub const LOCATIONS: &[LocationSpec] = &[
    LocationSpec {
        name: "Link's Uncle",
        kind: LocationKind::Npc,
        address: &[0x2DF45],
    },
    LocationSpec {
        name: "Link's House",
        kind: LocationKind::Chest,
        address: &[0xE9BC],
    },
    LocationSpec {
        name: "Sahasrahla's Hut - Left",
        kind: LocationKind::Chest,
        address: &[0xEA82],
    },
    LocationSpec {
        name: "Kakariko Well - Top",
        kind: LocationKind::Chest,
        address: &[0xEA8E],
    },
    LocationSpec {
        name: "Blind's Hideout - Top",
        kind: LocationKind::Chest,
        address: &[0xEB0F],
    },
    LocationSpec {
        name: "Bottle Merchant",
        kind: LocationKind::Npc,
        address: &[0x2EB18],
    },
    LocationSpec {
        name: SAHASRAHLA,
        kind: LocationKind::Npc,
        address: &[0x2F1FC],
    },
    LocationSpec {
        name: KING_ZORA,
        kind: LocationKind::Npc,
        address: &[0xEE1C3],
    },
    LocationSpec {
        name: ZORAS_LEDGE,
        kind: LocationKind::Standing,
        address: &[0x180149],
    },
    LocationSpec {
        name: LIBRARY,
        kind: LocationKind::Standing,
        address: &[0x180012],
    },
    LocationSpec {
        name: PEDESTAL,
        kind: LocationKind::Standing,
        address: &[0x289B0],
    },
];

fn logic(king_zora: Requirement) -> RegionLogic {
    RegionLogic {
        can_enter: Requirement::Free,
        can_complete: None,
        locations: vec![
            LocationLogic::new(SAHASRAHLA, Requirement::Item(Item::PendantOfCourage)),
            LocationLogic::new(KING_ZORA, king_zora),
            LocationLogic::new(ZORAS_LEDGE, Requirement::Item(Item::Flippers)),
            LocationLogic::new(LIBRARY, Requirement::Item(Item::PegasusBoots)),
            LocationLogic::new(PEDESTAL, Requirement::cap(Capability::HasAllPendants)),
        ],
    }
}

pub fn no_major_glitches() -> RegionLogic {
    logic(Requirement::cap(Capability::CanLiftRocks))
}

pub fn glitched() -> RegionLogic {
    // Fake flippers past the waterfall.
    logic(Requirement::Free)
}
