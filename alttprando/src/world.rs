use alttprando_game::{
    Address, FillRule, IndexedVec, Item, LocationIdx, LocationKind, RandoError, RegionIdx,
    Requirement,
};
use alttprando_logic::ItemCollection;
use hashbrown::HashMap;
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::region::RegionKind;
use crate::settings::{RandomizerSettings, RegionSettings, Ruleset};
use crate::traverse::{apply_requirement, may_hold};

#[derive(Clone, Debug)]
pub struct Location {
    pub name: String,
    pub kind: LocationKind,
    pub address: Vec<Address>,
    pub region: String, // Name of the owning Region, resolved through the World
    pub required: bool, // Whether the completion check must be able to visit this location
    item: Option<Item>,
    requirement: Requirement,
    fill_rule: FillRule,
}

impl Location {
    pub fn new(name: &str, kind: LocationKind, address: Vec<Address>, region: &str) -> Self {
        Location {
            name: name.to_string(),
            kind,
            address,
            region: region.to_string(),
            required: true,
            item: None,
            requirement: Requirement::Free,
            fill_rule: FillRule::Any,
        }
    }

    pub fn item(&self) -> Option<Item> {
        self.item
    }

    /// With `None`, whether any item is assigned; otherwise whether that item is.
    pub fn has_item(&self, item: Option<Item>) -> bool {
        match (self.item, item) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(a), Some(b)) => a == b,
        }
    }

    pub fn set_item(&mut self, item: Option<Item>) -> &mut Self {
        self.item = item;
        self
    }

    pub fn requirement(&self) -> &Requirement {
        &self.requirement
    }

    pub fn set_requirement(&mut self, requirement: Requirement) -> &mut Self {
        self.requirement = requirement;
        self
    }

    pub fn fill_rule(&self) -> &FillRule {
        &self.fill_rule
    }

    pub fn set_fill_rules(&mut self, fill_rule: FillRule) -> &mut Self {
        self.fill_rule = fill_rule;
        self
    }

    /// Only the location's own requirement; the owning region's entry is checked by the World.
    pub fn can_access(&self, world: &World, items: &ItemCollection) -> bool {
        apply_requirement(&self.requirement, world, items)
    }

    pub fn may_hold(&self, item: Item, world: &World, items: &ItemCollection) -> bool {
        may_hold(&self.fill_rule, item, world, items)
    }
}

/// Name-keyed set of locations. Insertion order is preserved, so that random selection is
/// reproducible from a given seed.
#[derive(Clone, Debug, Default)]
pub struct LocationCollection {
    names: IndexedVec<String>,
    locations: Vec<Location>,
}

impl LocationCollection {
    pub fn new(locations: Vec<Location>) -> Result<Self, RandoError> {
        let mut out = LocationCollection::default();
        for location in locations {
            out.insert(location)?;
        }
        Ok(out)
    }

    pub fn insert(&mut self, location: Location) -> Result<LocationIdx, RandoError> {
        if self.contains(&location.name) {
            return Err(RandoError::DuplicateLocation(location.name));
        }
        let idx = self.names.add(&location.name);
        self.locations.push(location);
        Ok(idx)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.index_by_key.contains_key(name)
    }

    pub fn index_of(&self, name: &str) -> Option<LocationIdx> {
        self.names.index_by_key.get(name).copied()
    }

    pub fn get(&self, name: &str) -> Result<&Location, RandoError> {
        match self.index_of(name) {
            Some(idx) => Ok(&self.locations[idx]),
            None => Err(RandoError::UnknownLocation(name.to_string())),
        }
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut Location, RandoError> {
        match self.index_of(name) {
            Some(idx) => Ok(&mut self.locations[idx]),
            None => Err(RandoError::UnknownLocation(name.to_string())),
        }
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Location> {
        self.locations.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Location> {
        self.locations.iter_mut()
    }

    pub fn view(&self) -> LocationView<'_> {
        LocationView {
            locations: self.locations.iter().collect(),
        }
    }

    pub fn filter<F: Fn(&Location) -> bool>(&self, f: F) -> LocationView<'_> {
        self.view().filter(f)
    }

    pub fn empty_locations(&self) -> LocationView<'_> {
        self.view().empty_locations()
    }

    pub fn locations_with_item(&self, item: Option<Item>) -> LocationView<'_> {
        self.view().locations_with_item(item)
    }

    pub fn names(&self) -> Vec<String> {
        self.names.keys.clone()
    }

    pub fn random<R: Rng>(&self, rng: &mut R) -> Option<&Location> {
        self.locations.choose(rng)
    }
}

/// Derived, read-only subset of one or more location collections.
#[derive(Clone, Debug, Default)]
pub struct LocationView<'a> {
    locations: Vec<&'a Location>,
}

impl<'a> LocationView<'a> {
    pub fn filter<F: Fn(&Location) -> bool>(&self, f: F) -> LocationView<'a> {
        LocationView {
            locations: self.locations.iter().copied().filter(|&l| f(l)).collect(),
        }
    }

    pub fn empty_locations(&self) -> LocationView<'a> {
        self.filter(|l| !l.has_item(None))
    }

    pub fn locations_with_item(&self, item: Option<Item>) -> LocationView<'a> {
        self.filter(|l| l.has_item(item))
    }

    pub fn random<R: Rng>(&self, rng: &mut R) -> Option<&'a Location> {
        self.locations.choose(rng).copied()
    }

    pub fn names(&self) -> Vec<String> {
        self.locations.iter().map(|l| l.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Location> + '_ {
        self.locations.iter().copied()
    }
}

impl<'a> FromIterator<&'a Location> for LocationView<'a> {
    fn from_iter<I: IntoIterator<Item = &'a Location>>(iter: I) -> Self {
        LocationView {
            locations: iter.into_iter().collect(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Region {
    pub name: String,
    pub kind: Option<RegionKind>, // None for regions assembled by hand rather than from the catalog
    pub boss_location_in_base: bool,
    locations: LocationCollection,
    prize_location: Option<String>,
    can_enter: Requirement,
    can_complete: Option<Requirement>,
}

impl Region {
    pub fn new(name: &str, locations: LocationCollection) -> Self {
        Region {
            name: name.to_string(),
            kind: None,
            boss_location_in_base: true,
            locations,
            prize_location: None,
            can_enter: Requirement::Free,
            can_complete: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn locations(&self) -> &LocationCollection {
        &self.locations
    }

    pub fn locations_mut(&mut self) -> &mut LocationCollection {
        &mut self.locations
    }

    pub fn location(&self, name: &str) -> Result<&Location, RandoError> {
        self.locations.get(name)
    }

    pub fn location_mut(&mut self, name: &str) -> Result<&mut Location, RandoError> {
        self.locations.get_mut(name)
    }

    pub fn empty_locations(&self) -> LocationView<'_> {
        self.locations.empty_locations()
    }

    pub fn locations_with_item(&self, item: Option<Item>) -> LocationView<'_> {
        self.locations.locations_with_item(item)
    }

    pub fn prize_location(&self) -> Option<&str> {
        self.prize_location.as_deref()
    }

    pub fn set_can_enter(&mut self, requirement: Requirement) -> &mut Self {
        self.can_enter = requirement;
        self
    }

    pub fn set_can_complete(&mut self, requirement: Option<Requirement>) -> &mut Self {
        self.can_complete = requirement;
        self
    }

    pub fn entry_requirement(&self) -> &Requirement {
        &self.can_enter
    }

    pub fn completion_requirement(&self) -> &Requirement {
        self.can_complete.as_ref().unwrap_or(&self.can_enter)
    }

    pub fn can_enter(&self, world: &World, items: &ItemCollection) -> bool {
        apply_requirement(&self.can_enter, world, items)
    }

    pub fn can_complete(&self, world: &World, items: &ItemCollection) -> bool {
        apply_requirement(self.completion_requirement(), world, items)
    }
}

// One entry of the final location -> item mapping handed to the patch writer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub location: String,
    pub region: String,
    pub address: Vec<Address>,
    pub item: Item,
}

#[derive(Clone, Debug)]
pub struct World {
    pub ruleset: Ruleset,
    pub region_settings: RegionSettings,
    regions: Vec<Region>,
    region_index: HashMap<String, RegionIdx>,
    location_index: HashMap<String, (RegionIdx, LocationIdx)>,
}

impl World {
    /// Build every region of the catalog under the configured ruleset and wire each dungeon to
    /// its prize slot.
    pub fn new(catalog: &Catalog, settings: &RandomizerSettings) -> Result<World, RandoError> {
        let ruleset = settings.ruleset()?;
        let regions = catalog
            .regions
            .iter()
            .map(|kind| kind.build(ruleset, &settings.region))
            .collect::<Result<Vec<Region>, RandoError>>()?;
        let mut world = World::from_regions(ruleset, settings.region, regions)?;
        for kind in &catalog.regions {
            let Some(prize) = kind.prize_location() else {
                continue;
            };
            // A catalog without the prize region leaves its dungeons without prizes.
            if world.location_index.contains_key(prize) {
                world.set_prize_location(kind.name(), prize)?;
            }
        }
        for name in &catalog.optional_locations {
            world.location_mut(name)?.required = false;
        }
        Ok(world)
    }

    /// Assemble a world from already-initialized regions, checking that every region and
    /// location name is unique and that every name referenced by a requirement exists.
    pub fn from_regions(
        ruleset: Ruleset,
        region_settings: RegionSettings,
        regions: Vec<Region>,
    ) -> Result<World, RandoError> {
        let mut region_index: HashMap<String, RegionIdx> = HashMap::new();
        let mut location_index: HashMap<String, (RegionIdx, LocationIdx)> = HashMap::new();
        for (region_idx, region) in regions.iter().enumerate() {
            if region_index.insert(region.name.clone(), region_idx).is_some() {
                return Err(RandoError::InvalidSettings(format!(
                    "duplicate region name: {}",
                    region.name
                )));
            }
            for (loc_idx, loc) in region.locations.iter().enumerate() {
                if location_index
                    .insert(loc.name.clone(), (region_idx, loc_idx))
                    .is_some()
                {
                    return Err(RandoError::DuplicateLocation(loc.name.clone()));
                }
            }
        }
        let world = World {
            ruleset,
            region_settings,
            regions,
            region_index,
            location_index,
        };
        world.validate_references()?;
        Ok(world)
    }

    fn validate_references(&self) -> Result<(), RandoError> {
        for region in &self.regions {
            self.validate_requirement(region.entry_requirement())?;
            self.validate_requirement(region.completion_requirement())?;
            if let Some(name) = region.prize_location() {
                self.location(name)?;
            }
            for loc in region.locations.iter() {
                self.validate_requirement(loc.requirement())?;
            }
        }
        Ok(())
    }

    fn validate_requirement(&self, req: &Requirement) -> Result<(), RandoError> {
        match req {
            Requirement::RegionEnter(name) | Requirement::RegionComplete(name) => {
                self.region(name)?;
            }
            Requirement::LocationHasItem(name, _) => {
                self.location(name)?;
            }
            Requirement::And(reqs) | Requirement::Or(reqs) => {
                for r in reqs {
                    self.validate_requirement(r)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn region(&self, name: &str) -> Result<&Region, RandoError> {
        match self.region_index.get(name) {
            Some(&idx) => Ok(&self.regions[idx]),
            None => Err(RandoError::UnknownRegion(name.to_string())),
        }
    }

    pub fn region_mut(&mut self, name: &str) -> Result<&mut Region, RandoError> {
        match self.region_index.get(name) {
            Some(&idx) => Ok(&mut self.regions[idx]),
            None => Err(RandoError::UnknownRegion(name.to_string())),
        }
    }

    pub fn location(&self, name: &str) -> Result<&Location, RandoError> {
        match self.location_index.get(name) {
            Some(&(region_idx, _)) => self.regions[region_idx].locations.get(name),
            None => Err(RandoError::UnknownLocation(name.to_string())),
        }
    }

    pub fn location_mut(&mut self, name: &str) -> Result<&mut Location, RandoError> {
        match self.location_index.get(name) {
            Some(&(region_idx, _)) => self.regions[region_idx].locations.get_mut(name),
            None => Err(RandoError::UnknownLocation(name.to_string())),
        }
    }

    /// All locations of the world, region by region in catalog order.
    pub fn locations(&self) -> LocationView<'_> {
        self.regions.iter().flat_map(|r| r.locations.iter()).collect()
    }

    pub fn num_locations(&self) -> usize {
        self.location_index.len()
    }

    pub fn empty_locations(&self) -> LocationView<'_> {
        self.locations().empty_locations()
    }

    pub fn locations_with_item(&self, item: Option<Item>) -> LocationView<'_> {
        self.locations().locations_with_item(item)
    }

    /// Designate a location (possibly owned by another region) as the region's prize. The
    /// prize's access then requires the region to be completable.
    pub fn set_prize_location(&mut self, region: &str, location: &str) -> Result<(), RandoError> {
        if let Some(current) = self.region(region)?.prize_location() {
            return Err(RandoError::InvalidSettings(format!(
                "{region} already has a prize location: {current}"
            )));
        }
        if let Some(owner) = self
            .regions
            .iter()
            .find(|r| r.prize_location() == Some(location))
        {
            return Err(RandoError::InvalidSettings(format!(
                "{location} is already the prize of {}",
                owner.name
            )));
        }
        let loc = self.location_mut(location)?;
        let req = Requirement::make_and(vec![
            Requirement::RegionComplete(region.to_string()),
            loc.requirement().clone(),
        ]);
        loc.set_requirement(req);
        self.region_mut(region)?.prize_location = Some(location.to_string());
        debug!("{location} is the prize of {region}");
        Ok(())
    }

    pub fn prize(&self, region: &str) -> Result<Option<Item>, RandoError> {
        match self.region(region)?.prize_location() {
            Some(name) => Ok(self.location(name)?.item()),
            None => Ok(None),
        }
    }

    /// Fill state only: whether the region's prize slot holds (a particular) item.
    pub fn region_has_prize(&self, region: &str, item: Option<Item>) -> Result<bool, RandoError> {
        match self.region(region)?.prize_location() {
            Some(name) => Ok(self.location(name)?.has_item(item)),
            None => Ok(false),
        }
    }

    /// Whether the prize is assigned (matching `item` if given) and can be obtained with `items`.
    pub fn has_prize(
        &self,
        region: &str,
        item: Option<Item>,
        items: &ItemCollection,
    ) -> Result<bool, RandoError> {
        match self.region(region)?.prize_location() {
            Some(name) => Ok(self.location(name)?.has_item(item) && self.is_reachable(name, items)?),
            None => Ok(false),
        }
    }

    pub fn is_reachable(&self, location: &str, items: &ItemCollection) -> Result<bool, RandoError> {
        let loc = self.location(location)?;
        let region = self.region(&loc.region)?;
        Ok(region.can_enter(self, items) && loc.can_access(self, items))
    }

    pub fn is_region_completable(
        &self,
        region: &str,
        items: &ItemCollection,
    ) -> Result<bool, RandoError> {
        Ok(self.region(region)?.can_complete(self, items))
    }

    /// Place `item` only if the location's fill rule accepts it. Returns whether it was placed.
    pub fn fill(
        &mut self,
        location: &str,
        item: Item,
        items: &ItemCollection,
    ) -> Result<bool, RandoError> {
        let loc = self.location(location)?;
        if loc.has_item(None) || !loc.may_hold(item, self, items) {
            return Ok(false);
        }
        self.location_mut(location)?.set_item(Some(item));
        Ok(true)
    }

    pub fn set_item(&mut self, location: &str, item: Option<Item>) -> Result<(), RandoError> {
        self.location_mut(location)?.set_item(item);
        Ok(())
    }

    pub fn clear_items(&mut self) {
        for region in &mut self.regions {
            for loc in region.locations.iter_mut() {
                loc.set_item(None);
            }
        }
    }

    /// The final location -> item mapping, sorted by location name.
    pub fn placements(&self) -> Vec<Placement> {
        let mut out: Vec<Placement> = self
            .locations()
            .iter()
            .filter_map(|loc| {
                loc.item().map(|item| Placement {
                    location: loc.name.clone(),
                    region: loc.region.clone(),
                    address: loc.address.clone(),
                    item,
                })
            })
            .collect();
        out.sort_by(|a, b| a.location.cmp(&b.location));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alttprando_game::Capability;
    use rand::SeedableRng;

    fn two_chest_region() -> Region {
        let locations = LocationCollection::new(vec![
            Location::new("Chest A", LocationKind::Chest, vec![0x10], "Test"),
            Location::new("Chest B", LocationKind::Chest, vec![0x20], "Test"),
        ])
        .unwrap();
        Region::new("Test", locations)
    }

    #[test]
    fn test_duplicate_location_rejected() {
        let result = LocationCollection::new(vec![
            Location::new("Chest", LocationKind::Chest, vec![], "Test"),
            Location::new("Chest", LocationKind::Chest, vec![], "Test"),
        ]);
        assert_eq!(
            result.unwrap_err(),
            RandoError::DuplicateLocation("Chest".to_string())
        );

        // Location names must be unique across regions, not just within one.
        let mut other = two_chest_region();
        other.name = "Other".to_string();
        let result = World::from_regions(
            Ruleset::NoMajorGlitches,
            RegionSettings::default(),
            vec![two_chest_region(), other],
        );
        assert_eq!(
            result.unwrap_err(),
            RandoError::DuplicateLocation("Chest A".to_string())
        );

        let result = World::from_regions(
            Ruleset::NoMajorGlitches,
            RegionSettings::default(),
            vec![two_chest_region(), two_chest_region()],
        );
        assert!(matches!(result, Err(RandoError::InvalidSettings(_))));
    }

    #[test]
    fn test_lookup_errors() {
        let world = World::from_regions(
            Ruleset::NoMajorGlitches,
            RegionSettings::default(),
            vec![two_chest_region()],
        )
        .unwrap();
        assert!(matches!(
            world.location("Nowhere"),
            Err(RandoError::UnknownLocation(_))
        ));
        assert!(matches!(
            world.region("Nowhere"),
            Err(RandoError::UnknownRegion(_))
        ));
        assert!(world
            .is_reachable("Nowhere", &ItemCollection::new())
            .is_err());
    }

    #[test]
    fn test_unknown_reference_rejected() {
        let mut region = two_chest_region();
        region.set_can_enter(Requirement::RegionComplete("Missing".to_string()));
        let result = World::from_regions(
            Ruleset::NoMajorGlitches,
            RegionSettings::default(),
            vec![region],
        );
        assert_eq!(
            result.unwrap_err(),
            RandoError::UnknownRegion("Missing".to_string())
        );
    }

    #[test]
    fn test_views_do_not_mutate() {
        let mut region = two_chest_region();
        region
            .location_mut("Chest A")
            .unwrap()
            .set_item(Some(Item::Key));
        assert_eq!(region.empty_locations().names(), vec!["Chest B".to_string()]);
        assert_eq!(
            region.locations_with_item(Some(Item::Key)).names(),
            vec!["Chest A".to_string()]
        );
        assert_eq!(region.locations_with_item(None).len(), 1);
        assert!(region.locations_with_item(Some(Item::BigKey)).is_empty());
        assert_eq!(region.locations().len(), 2);

        let mut rng = rand::rngs::StdRng::seed_from_u64(0);
        let picked = region.empty_locations().random(&mut rng).unwrap();
        assert_eq!(picked.name, "Chest B");
    }

    #[test]
    fn test_fill_respects_rules() {
        let mut region = two_chest_region();
        region
            .location_mut("Chest A")
            .unwrap()
            .set_fill_rules(FillRule::forbid(Item::BigKey));
        let mut world = World::from_regions(
            Ruleset::NoMajorGlitches,
            RegionSettings::default(),
            vec![region],
        )
        .unwrap();
        let items = ItemCollection::new();
        assert!(!world.fill("Chest A", Item::BigKey, &items).unwrap());
        assert!(world.location("Chest A").unwrap().item().is_none());
        assert!(world.fill("Chest A", Item::Key, &items).unwrap());
        // An occupied location is never overwritten by a fill.
        assert!(!world.fill("Chest A", Item::Map, &items).unwrap());
        assert_eq!(world.location("Chest A").unwrap().item(), Some(Item::Key));
        assert_eq!(world.placements().len(), 1);
        world.clear_items();
        assert!(world.placements().is_empty());
    }

    #[test]
    fn test_prize_requires_completion() {
        let mut dungeon = two_chest_region();
        dungeon.set_can_complete(Some(Requirement::cap(Capability::CanShootArrows)));
        let prizes = Region::new(
            "Prize",
            LocationCollection::new(vec![Location::new(
                "Pendant",
                LocationKind::Prize,
                vec![],
                "Prize",
            )])
            .unwrap(),
        );
        let mut world = World::from_regions(
            Ruleset::NoMajorGlitches,
            RegionSettings::default(),
            vec![dungeon, prizes],
        )
        .unwrap();
        world.set_prize_location("Test", "Pendant").unwrap();
        world
            .set_item("Pendant", Some(Item::PendantOfCourage))
            .unwrap();

        let empty = ItemCollection::new();
        let bow: ItemCollection = [Item::Bow].into_iter().collect();
        assert!(world.region_has_prize("Test", Some(Item::PendantOfCourage)).unwrap());
        assert_eq!(world.prize("Test").unwrap(), Some(Item::PendantOfCourage));
        assert!(!world.is_reachable("Pendant", &empty).unwrap());
        assert!(!world
            .has_prize("Test", Some(Item::PendantOfCourage), &empty)
            .unwrap());
        assert!(world
            .has_prize("Test", Some(Item::PendantOfCourage), &bow)
            .unwrap());
        assert!(!world
            .has_prize("Test", Some(Item::PendantOfPower), &bow)
            .unwrap());
    }

    #[test]
    fn test_prize_location_set_once() {
        let chests = Region::new(
            "Other",
            LocationCollection::new(vec![Location::new("Chest C", LocationKind::Chest, vec![], "Other")])
                .unwrap(),
        );
        let mut world = World::from_regions(
            Ruleset::NoMajorGlitches,
            RegionSettings::default(),
            vec![two_chest_region(), chests],
        )
        .unwrap();
        world.set_prize_location("Test", "Chest A").unwrap();
        let first = world.location("Chest A").unwrap().requirement().clone();
        let second = world.location("Chest B").unwrap().requirement().clone();

        assert!(matches!(
            world.set_prize_location("Test", "Chest B"),
            Err(RandoError::InvalidSettings(_))
        ));
        assert!(matches!(
            world.set_prize_location("Other", "Chest A"),
            Err(RandoError::InvalidSettings(_))
        ));
        assert_eq!(world.region("Test").unwrap().prize_location(), Some("Chest A"));
        assert_eq!(world.region("Other").unwrap().prize_location(), None);
        assert_eq!(world.location("Chest A").unwrap().requirement(), &first);
        assert_eq!(world.location("Chest B").unwrap().requirement(), &second);
    }
}
