use alttprando_game::{Item, ItemClass, LocationKind, RandoError};
use alttprando_logic::ItemCollection;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::settings::{RandomizerSettings, Ruleset};
use crate::spoiler_log::SpoilerLog;
use crate::traverse::{check_solvable, simulate};
use crate::world::{Placement, World};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Randomization {
    // Seed of the attempt that produced this placement; `Randomizer::randomize` with the same
    // seed reproduces it.
    pub seed: u64,
    pub ruleset: Ruleset,
    pub placements: Vec<Placement>,
    pub spoiler_log: SpoilerLog,
}

pub fn make_rng(seed: u64) -> StdRng {
    let mut rng_seed = [0u8; 32];
    rng_seed[..8].copy_from_slice(&seed.to_le_bytes());
    StdRng::from_seed(rng_seed)
}

/// Place `item` in one of the empty locations among `candidates`, drawing uniformly and redrawing
/// whenever the drawn location's fill rule rejects the item.
///
/// `items` is the collection that fill rules are evaluated against. Returns the name of the
/// location used.
pub fn place_item<R: Rng>(
    world: &mut World,
    item: Item,
    candidates: &[String],
    items: &ItemCollection,
    rng: &mut R,
    max_retries: usize,
) -> Result<String, RandoError> {
    let mut empty: Vec<&String> = vec![];
    for name in candidates {
        if !world.location(name)?.has_item(None) {
            empty.push(name);
        }
    }
    if empty.is_empty() {
        return Err(RandoError::PlacementExhausted { item, attempts: 0 });
    }
    for _ in 0..max_retries {
        let Some(&name) = empty.choose(rng) else {
            break;
        };
        if world.fill(name, item, items)? {
            return Ok(name.clone());
        }
    }
    Err(RandoError::PlacementExhausted {
        item,
        attempts: max_retries,
    })
}

pub struct Randomizer<'a> {
    pub catalog: &'a Catalog,
    pub settings: &'a RandomizerSettings,
    starting_items: ItemCollection,
}

impl<'a> Randomizer<'a> {
    pub fn new(
        catalog: &'a Catalog,
        settings: &'a RandomizerSettings,
    ) -> Result<Randomizer<'a>, RandoError> {
        settings.validate()?;
        Ok(Randomizer {
            catalog,
            settings,
            starting_items: settings.starting_items(),
        })
    }

    pub fn starting_items(&self) -> &ItemCollection {
        &self.starting_items
    }

    pub fn build_world(&self) -> Result<World, RandoError> {
        World::new(self.catalog, self.settings)
    }

    /// Rebuild the world described by a finished randomization, with every item in place.
    pub fn apply(&self, randomization: &Randomization) -> Result<World, RandoError> {
        let mut world = self.build_world()?;
        for placement in &randomization.placements {
            world.set_item(&placement.location, Some(placement.item))?;
        }
        Ok(world)
    }

    fn prize_locations(&self, world: &World) -> Vec<String> {
        world
            .locations()
            .filter(|loc| loc.kind == LocationKind::Prize)
            .names()
    }

    fn pool_locations(&self, world: &World) -> Vec<String> {
        world
            .locations()
            .filter(|loc| loc.kind != LocationKind::Prize)
            .names()
    }

    fn fill_prizes<R: Rng>(
        &self,
        world: &mut World,
        prizes: &[Item],
        rng: &mut R,
    ) -> Result<(), RandoError> {
        let scope = self.prize_locations(world);
        if prizes.len() != scope.len() {
            return Err(RandoError::PoolMismatch {
                items: prizes.len(),
                slots: scope.len(),
            });
        }
        for &item in prizes {
            place_item(
                world,
                item,
                &scope,
                &self.starting_items,
                rng,
                self.settings.max_placement_retries,
            )?;
        }
        Ok(())
    }

    fn fill_base_items<R: Rng>(&self, world: &mut World, rng: &mut R) -> Result<(), RandoError> {
        for kind in &self.catalog.regions {
            let base = kind.base_items(&world.region_settings);
            if base.items.is_empty() {
                continue;
            }
            let region = world.region(kind.name())?;
            let boss = kind.boss_location();
            let scope: Vec<String> = region
                .locations()
                .filter(|loc| region.boss_location_in_base || Some(loc.name.as_str()) != boss)
                .names();
            if base.items.len() > scope.len() {
                return Err(RandoError::PoolMismatch {
                    items: base.items.len(),
                    slots: scope.len(),
                });
            }
            if base.fixed {
                for (item, name) in base.items.iter().zip(&scope) {
                    world.set_item(name, Some(*item))?;
                }
                continue;
            }
            for &item in &base.items {
                place_item(
                    world,
                    item,
                    &scope,
                    &self.starting_items,
                    rng,
                    self.settings.max_placement_retries,
                )?;
            }
        }
        Ok(())
    }

    /// Split the catalog pool into prizes, progression items and everything else.
    fn split_pool(&self) -> (Vec<Item>, Vec<Item>, Vec<Item>) {
        let mut prizes = vec![];
        let mut progression = vec![];
        let mut other = vec![];
        for item in self.catalog.items() {
            match item.class() {
                ItemClass::Prize => prizes.push(item),
                ItemClass::Progression => progression.push(item),
                ItemClass::Dungeon | ItemClass::Filler => other.push(item),
            }
        }
        (prizes, progression, other)
    }

    // Pad `other` with filler so that the pool exactly covers the empty non-prize locations.
    fn pad_pool(
        &self,
        world: &World,
        num_progression: usize,
        other: &mut Vec<Item>,
    ) -> Result<(), RandoError> {
        let slots = world
            .empty_locations()
            .filter(|loc| loc.kind != LocationKind::Prize)
            .len();
        let num_items = num_progression + other.len();
        if num_items > slots {
            return Err(RandoError::PoolMismatch {
                items: num_items,
                slots,
            });
        }
        other.extend(std::iter::repeat(self.catalog.filler_item).take(slots - num_items));
        Ok(())
    }

    // Assumed fill: each progression item goes to a location that is reachable assuming every
    // item not yet placed has been collected.
    fn fill_progression<R: Rng>(
        &self,
        attempt_num: usize,
        world: &mut World,
        mut items: Vec<Item>,
        rng: &mut R,
    ) -> Result<(), RandoError> {
        let scope = self.pool_locations(world);
        items.shuffle(rng);
        while let Some(item) = items.pop() {
            let mut assumed = self.starting_items.clone();
            assumed.extend(items.iter().copied());
            let sweep = simulate(world, &assumed);
            let reachable: Vec<String> = scope
                .iter()
                .filter(|name| sweep.is_visited(name))
                .cloned()
                .collect();
            let location = place_item(
                world,
                item,
                &reachable,
                &sweep.items,
                rng,
                self.settings.max_placement_retries,
            )?;
            debug!("[attempt {attempt_num}] Placed {item} at {location}");
        }
        Ok(())
    }

    fn fill_remaining<R: Rng>(
        &self,
        world: &mut World,
        mut items: Vec<Item>,
        rng: &mut R,
    ) -> Result<(), RandoError> {
        let scope = self.pool_locations(world);
        items.shuffle(rng);
        for item in items {
            place_item(
                world,
                item,
                &scope,
                &self.starting_items,
                rng,
                self.settings.max_placement_retries,
            )?;
        }
        Ok(())
    }

    /// One complete fill of a fresh world. Failures here are generally recoverable by trying
    /// again with a different seed (see `RandoError::is_recoverable`).
    pub fn randomize(&self, attempt_num: usize, seed: u64) -> Result<Randomization, RandoError> {
        let mut rng = make_rng(seed);
        let mut world = self.build_world()?;
        info!(
            "[attempt {attempt_num}] Ruleset {0}, {1} regions, {2} locations",
            world.ruleset,
            world.regions().len(),
            world.num_locations()
        );

        let (prizes, progression, mut other) = self.split_pool();
        self.fill_prizes(&mut world, &prizes, &mut rng)?;
        self.fill_base_items(&mut world, &mut rng)?;
        self.pad_pool(&world, progression.len(), &mut other)?;
        info!(
            "[attempt {attempt_num}] Placing {0} progression items and {1} other items",
            progression.len(),
            other.len()
        );
        self.fill_progression(attempt_num, &mut world, progression, &mut rng)?;
        self.fill_remaining(&mut world, other, &mut rng)?;

        let result = check_solvable(&world, &self.starting_items)?;
        let spoiler_log = SpoilerLog::new(&world, &result);
        info!(
            "[attempt {attempt_num}] Success: {0} steps, {1} key items",
            result.spheres.len(),
            spoiler_log.num_items()
        );
        Ok(Randomization {
            seed,
            ruleset: world.ruleset,
            placements: world.placements(),
            spoiler_log,
        })
    }

    /// Run up to `max_attempts` fills, each with its own seed derived from `seed`, returning the
    /// first that succeeds. Configuration errors end the run immediately.
    pub fn generate(&self, seed: u64) -> Result<Randomization, RandoError> {
        let mut rng = make_rng(seed);
        let max_attempts = self.settings.max_attempts;
        for attempt_num in 0..max_attempts {
            let item_seed = rng.next_u64() & 0xFFFFFFFF;
            info!("Attempt {attempt_num}/{max_attempts}: item placement seed={item_seed}");
            match self.randomize(attempt_num, item_seed) {
                Ok(randomization) => return Ok(randomization),
                Err(e) if e.is_recoverable() => {
                    info!("Attempt {attempt_num}/{max_attempts}: Randomization failed: {e}");
                }
                Err(e) => return Err(e),
            }
        }
        Err(RandoError::AttemptsExhausted {
            seed,
            attempts: max_attempts,
        })
    }
}
