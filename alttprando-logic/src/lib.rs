pub mod helpers;

use alttprando_game::{Capability, Item, PENDANTS};
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::helpers::{glove_level, sword_level};

/// Multiset of items held at some point of a playthrough simulation.
///
/// All queries are recomputed from the current contents on every call, since the
/// collection keeps growing while reachability is being evaluated.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCollection {
    counts: HashMap<Item, usize>,
}

impl ItemCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: Item) {
        let count = self.counts.entry(item).or_insert(0);
        if item.def().stackable || *count == 0 {
            *count += 1;
        }
    }

    pub fn merge(&mut self, other: &ItemCollection) {
        for (&item, &count) in &other.counts {
            for _ in 0..count {
                self.add(item);
            }
        }
    }

    pub fn has(&self, item: Item) -> bool {
        self.count(item) > 0
    }

    pub fn count(&self, item: Item) -> usize {
        self.counts.get(&item).copied().unwrap_or(0)
    }

    /// Total number of items held, counting stacked copies.
    pub fn len(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Item, usize)> + '_ {
        self.counts
            .iter()
            .filter(|(_, &count)| count > 0)
            .map(|(&item, &count)| (item, count))
    }

    pub fn is_subset_of(&self, other: &ItemCollection) -> bool {
        self.iter().all(|(item, count)| other.count(item) >= count)
    }

    pub fn has_sword(&self) -> bool {
        sword_level(self) >= 1
    }

    pub fn has_upgraded_sword(&self) -> bool {
        sword_level(self) >= 2
    }

    pub fn can_shoot_arrows(&self) -> bool {
        self.has(Item::Bow)
    }

    pub fn can_lift_rocks(&self) -> bool {
        glove_level(self) >= 1
    }

    pub fn can_lift_dark_rocks(&self) -> bool {
        glove_level(self) >= 2
    }

    pub fn can_light_torches(&self) -> bool {
        self.has(Item::FireRod) || self.has(Item::Lamp)
    }

    pub fn can_melt_things(&self) -> bool {
        self.has(Item::FireRod) || (self.has(Item::Bombos) && self.has_sword())
    }

    pub fn can_fly(&self) -> bool {
        self.has(Item::OcarinaActive)
    }

    pub fn can_extend_magic(&self) -> bool {
        self.has(Item::HalfMagic) || self.has(Item::Bottle)
    }

    pub fn has_all_pendants(&self) -> bool {
        PENDANTS.iter().all(|&p| self.has(p))
    }

    pub fn has_capability(&self, capability: Capability) -> bool {
        match capability {
            Capability::HasSword => self.has_sword(),
            Capability::HasUpgradedSword => self.has_upgraded_sword(),
            Capability::CanShootArrows => self.can_shoot_arrows(),
            Capability::CanLiftRocks => self.can_lift_rocks(),
            Capability::CanLiftDarkRocks => self.can_lift_dark_rocks(),
            Capability::CanLightTorches => self.can_light_torches(),
            Capability::CanMeltThings => self.can_melt_things(),
            Capability::CanFly => self.can_fly(),
            Capability::CanExtendMagic => self.can_extend_magic(),
            Capability::HasAllPendants => self.has_all_pendants(),
        }
    }
}

impl FromIterator<Item> for ItemCollection {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        let mut items = ItemCollection::new();
        items.extend(iter);
        items
    }
}

impl Extend<Item> for ItemCollection {
    fn extend<I: IntoIterator<Item = Item>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}
