use alttprando_game::{Item, ItemCount};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::region::RegionKind;

/// The regions making up a world, in placement order, and the items to distribute over them.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Catalog {
    pub regions: Vec<RegionKind>,
    pub item_pool: Vec<ItemCount>,
    // Pads the pool up to the number of empty locations left after the pool is placed.
    #[serde(default = "default_filler_item")]
    pub filler_item: Item,
    // Locations the completion check may leave unvisited.
    #[serde(default)]
    pub optional_locations: Vec<String>,
}

fn default_filler_item() -> Item {
    Item::TwentyRupees
}

impl Catalog {
    pub fn standard() -> Catalog {
        let item_pool = [
            (Item::ProgressiveSword, 2),
            (Item::Bow, 1),
            (Item::Cape, 1),
            (Item::Lamp, 1),
            (Item::FireRod, 1),
            (Item::ProgressiveGlove, 2),
            (Item::Hammer, 1),
            (Item::Hookshot, 1),
            (Item::MagicMirror, 1),
            (Item::BookOfMudora, 1),
            (Item::PegasusBoots, 1),
            (Item::Flippers, 1),
            (Item::OcarinaActive, 1),
            (Item::MoonPearl, 1),
            (Item::PendantOfCourage, 1),
            (Item::PendantOfWisdom, 1),
            (Item::PendantOfPower, 1),
            (Item::BossHeartContainer, 3),
        ]
        .into_iter()
        .map(|(item, count)| ItemCount { item, count })
        .collect();
        Catalog {
            regions: vec![
                RegionKind::LightWorld,
                RegionKind::DeathMountain,
                RegionKind::HyruleCastleTower,
                RegionKind::EasternPalace,
                RegionKind::DesertPalace,
                RegionKind::TowerOfHera,
                RegionKind::Prizes,
            ],
            item_pool,
            filler_item: default_filler_item(),
            optional_locations: vec![],
        }
    }

    pub fn load(path: &Path) -> Result<Catalog> {
        let catalog_str = std::fs::read_to_string(path)
            .with_context(|| format!("Unable to read catalog at {}", path.display()))?;
        let mut des = serde_json::Deserializer::from_str(&catalog_str);
        let catalog: Catalog = serde_path_to_error::deserialize(&mut des)
            .with_context(|| format!("Unable to parse catalog at {}", path.display()))?;
        Ok(catalog)
    }

    /// The pool expanded to one entry per item, in catalog order.
    pub fn items(&self) -> Vec<Item> {
        self.item_pool
            .iter()
            .flat_map(|x| std::iter::repeat(x.item).take(x.count))
            .collect()
    }

    pub fn num_locations(&self) -> usize {
        self.regions
            .iter()
            .map(|kind| kind.location_specs().len())
            .sum()
    }
}
