pub mod error;

pub use crate::error::RandoError;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use std::borrow::ToOwned;
use std::hash::Hash;
use std::str::FromStr;
use strum::VariantNames;
use strum_macros::{Display, EnumString, VariantNames};

pub type RegionIdx = usize; // Index into World.regions
pub type LocationIdx = usize; // Index into a Region's LocationCollection
pub type Tier = u8; // Upgrade level of a tiered item (sword, glove)
pub type Address = usize; // ROM address of a location; only meaningful to the patch writer

#[derive(Default, Clone, Debug)]
pub struct IndexedVec<T: Hash + Eq> {
    pub keys: Vec<T>,
    pub index_by_key: HashMap<T, usize>,
}

impl<T: Hash + Eq> IndexedVec<T> {
    pub fn add<U: ToOwned<Owned = T> + ?Sized>(&mut self, name: &U) -> usize {
        if !self.index_by_key.contains_key(&name.to_owned()) {
            let idx = self.keys.len();
            self.index_by_key.insert(name.to_owned(), self.keys.len());
            self.keys.push(name.to_owned());
            idx
        } else {
            self.index_by_key[&name.to_owned()]
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemClass {
    // Items that can unlock access to further locations:
    Progression,
    // Keys, maps and compasses, placed within their own dungeon before the main pool:
    Dungeon,
    // Region completion rewards (pendants), placed only in prize locations:
    Prize,
    Filler,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ItemDef {
    pub item: Item,
    pub class: ItemClass,
    pub tier: Option<Tier>,
    pub stackable: bool,
}

#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    VariantNames,
    Serialize,
    Deserialize,
    PartialOrd,
    Ord,
)]
pub enum Item {
    L1Sword,
    MasterSword,
    L3Sword,
    L4Sword,
    ProgressiveSword,
    Bow,
    SilverArrowUpgrade,
    Boomerang,
    Hookshot,
    Lamp,
    FireRod,
    IceRod,
    Bombos,
    Hammer,
    PegasusBoots,
    PowerGlove,
    TitansMitt,
    ProgressiveGlove,
    Flippers,
    MoonPearl,
    Cape,
    MagicMirror,
    BookOfMudora,
    OcarinaActive,
    HalfMagic,
    Bottle,
    Key,
    BigKey,
    Map,
    Compass,
    PendantOfCourage,
    PendantOfWisdom,
    PendantOfPower,
    BossHeartContainer,
    PieceOfHeart,
    TenArrows,
    ThreeBombs,
    TwentyRupees,
    Nothing,
}

pub const PENDANTS: [Item; 3] = [
    Item::PendantOfCourage,
    Item::PendantOfWisdom,
    Item::PendantOfPower,
];

impl Item {
    /// Resolve an item kind name to its canonical item.
    pub fn get(name: &str) -> Result<Item, RandoError> {
        Item::from_str(name).map_err(|_| RandoError::UnknownItem(name.to_string()))
    }

    pub fn all() -> impl Iterator<Item = Item> {
        Item::VARIANTS
            .iter()
            .filter_map(|name| Item::from_str(name).ok())
    }

    pub fn def(self) -> ItemDef {
        use Item::*;
        let (class, tier, stackable) = match self {
            L1Sword => (ItemClass::Progression, Some(1), false),
            MasterSword => (ItemClass::Progression, Some(2), false),
            L3Sword => (ItemClass::Progression, Some(3), false),
            L4Sword => (ItemClass::Progression, Some(4), false),
            PowerGlove => (ItemClass::Progression, Some(1), false),
            TitansMitt => (ItemClass::Progression, Some(2), false),
            // Progressive kinds stack: the number held is the tier reached.
            ProgressiveSword | ProgressiveGlove => (ItemClass::Progression, None, true),
            Bow | SilverArrowUpgrade | Boomerang | Hookshot | Lamp | FireRod | IceRod | Bombos
            | Hammer | PegasusBoots | Flippers | MoonPearl | Cape | MagicMirror | BookOfMudora
            | OcarinaActive | HalfMagic => (ItemClass::Progression, None, false),
            Bottle => (ItemClass::Progression, None, true),
            Key => (ItemClass::Dungeon, None, true),
            BigKey | Map | Compass => (ItemClass::Dungeon, None, true),
            PendantOfCourage | PendantOfWisdom | PendantOfPower => (ItemClass::Prize, None, false),
            BossHeartContainer | PieceOfHeart | TenArrows | ThreeBombs | TwentyRupees | Nothing => {
                (ItemClass::Filler, None, true)
            }
        };
        ItemDef {
            item: self,
            class,
            tier,
            stackable,
        }
    }

    pub fn class(self) -> ItemClass {
        self.def().class
    }

    pub fn is_progression(self) -> bool {
        self.class() == ItemClass::Progression
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCount {
    pub item: Item,
    pub count: usize,
}

/// Named capability queries over a collection of items.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    HasSword,
    HasUpgradedSword,
    CanShootArrows,
    CanLiftRocks,
    CanLiftDarkRocks,
    CanLightTorches,
    CanMeltThings,
    CanFly,
    CanExtendMagic,
    HasAllPendants,
}

// Access requirement of a region or location. Evaluation lives in `alttprando::traverse`, since
// some variants refer to other regions or locations of the world.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Requirement {
    Free,
    Never,
    Item(Item),
    ItemCount(Item, usize),
    Capability(Capability),
    RegionEnter(String),
    RegionComplete(String),
    LocationHasItem(String, Item),
    And(Vec<Requirement>),
    Or(Vec<Requirement>),
}

impl Requirement {
    pub fn make_and(reqs: Vec<Requirement>) -> Requirement {
        let mut out_reqs: Vec<Requirement> = vec![];
        for req in reqs {
            match req {
                Requirement::Never => return Requirement::Never,
                Requirement::Free => continue,
                Requirement::And(inner) => out_reqs.extend(inner),
                _ => out_reqs.push(req),
            }
        }
        match out_reqs.len() {
            0 => Requirement::Free,
            1 => out_reqs.pop().unwrap(),
            _ => Requirement::And(out_reqs),
        }
    }

    pub fn make_or(reqs: Vec<Requirement>) -> Requirement {
        let mut out_reqs: Vec<Requirement> = vec![];
        for req in reqs {
            match req {
                Requirement::Never => continue,
                Requirement::Free => return Requirement::Free,
                Requirement::Or(inner) => out_reqs.extend(inner),
                _ => out_reqs.push(req),
            }
        }
        match out_reqs.len() {
            0 => Requirement::Never,
            1 => out_reqs.pop().unwrap(),
            _ => Requirement::Or(out_reqs),
        }
    }

    pub fn cap(capability: Capability) -> Requirement {
        Requirement::Capability(capability)
    }
}

// Restricts which items a location may hold, independent of whether the location is reachable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FillRule {
    #[default]
    Any,
    Forbid(Vec<Item>),
    Only(Vec<Item>),
    ForbidClass(ItemClass),
    // The item may only be placed while the requirement holds for the current items.
    Requires(Requirement),
    All(Vec<FillRule>),
}

impl FillRule {
    pub fn forbid(item: Item) -> FillRule {
        FillRule::Forbid(vec![item])
    }

    pub fn and(self, other: FillRule) -> FillRule {
        match (self, other) {
            (FillRule::Any, r) | (r, FillRule::Any) => r,
            (FillRule::All(mut a), FillRule::All(b)) => {
                a.extend(b);
                FillRule::All(a)
            }
            (FillRule::All(mut a), r) => {
                a.push(r);
                FillRule::All(a)
            }
            (l, r) => FillRule::All(vec![l, r]),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationKind {
    Chest,
    BigChest,
    Drop,
    Npc,
    Standing,
    Prize,
}
