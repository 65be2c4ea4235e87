use alttprando_game::{Item, ItemClass};
use serde::{Deserialize, Serialize};

use crate::traverse::TraverseResult;
use crate::world::World;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SpoilerItemLoc {
    pub item: Item,
    pub location: String,
    pub region: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SpoilerSphere {
    pub step: usize,
    pub items: Vec<SpoilerItemLoc>,
}

/// Playthrough of a finished world: for each step of the forward simulation, the key items
/// (progression items and prizes) picked up on that step.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct SpoilerLog {
    pub spheres: Vec<SpoilerSphere>,
}

fn is_key_item(item: Item) -> bool {
    matches!(item.class(), ItemClass::Progression | ItemClass::Prize)
}

impl SpoilerLog {
    pub fn new(world: &World, result: &TraverseResult) -> SpoilerLog {
        let mut spheres = vec![];
        for (i, names) in result.spheres.iter().enumerate() {
            let items: Vec<SpoilerItemLoc> = names
                .iter()
                .filter_map(|name| world.location(name).ok())
                .filter_map(|loc| {
                    let item = loc.item()?;
                    is_key_item(item).then(|| SpoilerItemLoc {
                        item,
                        location: loc.name.clone(),
                        region: loc.region.clone(),
                    })
                })
                .collect();
            if items.is_empty() {
                continue;
            }
            spheres.push(SpoilerSphere { step: i + 1, items });
        }
        SpoilerLog { spheres }
    }

    pub fn num_items(&self) -> usize {
        self.spheres.iter().map(|s| s.items.len()).sum()
    }
}
