use alttprando_game::{FillRule, Item, RandoError, Requirement};
use alttprando_logic::ItemCollection;
use hashbrown::HashSet;

use crate::world::{Location, World};

/// Evaluate an access requirement against the world and the items collected so far.
///
/// Names referenced by the requirement are checked when the world is built, so a name that
/// fails to resolve here simply evaluates to false.
pub fn apply_requirement(req: &Requirement, world: &World, items: &ItemCollection) -> bool {
    match req {
        Requirement::Free => true,
        Requirement::Never => false,
        Requirement::Item(item) => items.has(*item),
        Requirement::ItemCount(item, count) => items.count(*item) >= *count,
        Requirement::Capability(cap) => items.has_capability(*cap),
        Requirement::RegionEnter(name) => world
            .region(name)
            .map(|region| region.can_enter(world, items))
            .unwrap_or(false),
        Requirement::RegionComplete(name) => world
            .region(name)
            .map(|region| region.can_complete(world, items))
            .unwrap_or(false),
        Requirement::LocationHasItem(name, item) => world
            .location(name)
            .map(|loc| loc.has_item(Some(*item)))
            .unwrap_or(false),
        Requirement::And(reqs) => reqs.iter().all(|r| apply_requirement(r, world, items)),
        Requirement::Or(reqs) => reqs.iter().any(|r| apply_requirement(r, world, items)),
    }
}

pub fn may_hold(rule: &FillRule, item: Item, world: &World, items: &ItemCollection) -> bool {
    match rule {
        FillRule::Any => true,
        FillRule::Forbid(forbidden) => !forbidden.contains(&item),
        FillRule::Only(allowed) => allowed.contains(&item),
        FillRule::ForbidClass(class) => item.class() != *class,
        FillRule::Requires(req) => apply_requirement(req, world, items),
        FillRule::All(rules) => rules.iter().all(|r| may_hold(r, item, world, items)),
    }
}

// Same as `World::is_reachable`, for a location already in hand.
pub fn is_location_reachable(world: &World, loc: &Location, items: &ItemCollection) -> bool {
    let region_ok = world
        .region(&loc.region)
        .map(|region| region.can_enter(world, items))
        .unwrap_or(false);
    region_ok && loc.can_access(world, items)
}

/// Names of the locations reachable with exactly the given items, without collecting anything.
pub fn reachable_locations(world: &World, items: &ItemCollection) -> Vec<String> {
    world
        .locations()
        .filter(|loc| is_location_reachable(world, loc, items))
        .names()
}

#[derive(Clone, Debug, Default)]
pub struct TraverseResult {
    // Everything collected at the fixed point, starting items included.
    pub items: ItemCollection,
    pub visited: HashSet<String>,
    // Locations newly reached on each pass, in world order.
    pub spheres: Vec<Vec<String>>,
}

impl TraverseResult {
    pub fn is_visited(&self, location: &str) -> bool {
        self.visited.contains(location)
    }
}

/// Forward playthrough: repeatedly visit every location reachable with the items held so far,
/// collecting whatever they hold, until a pass reaches nothing new.
///
/// Each pass evaluates reachability against the items held at the start of the pass, so the
/// spheres are independent of the order in which locations are listed.
pub fn simulate(world: &World, starting_items: &ItemCollection) -> TraverseResult {
    let mut items = starting_items.clone();
    let mut visited: HashSet<String> = HashSet::new();
    let mut spheres: Vec<Vec<String>> = vec![];
    loop {
        let sphere: Vec<&Location> = world
            .locations()
            .iter()
            .filter(|loc| !visited.contains(&loc.name))
            .filter(|loc| is_location_reachable(world, loc, &items))
            .collect();
        if sphere.is_empty() {
            break;
        }
        for loc in &sphere {
            visited.insert(loc.name.clone());
            if let Some(item) = loc.item() {
                items.add(item);
            }
        }
        spheres.push(sphere.iter().map(|loc| loc.name.clone()).collect());
    }
    TraverseResult {
        items,
        visited,
        spheres,
    }
}

/// Run the playthrough and require that it visits every required location and that every
/// region can be completed with what was collected.
pub fn check_solvable(
    world: &World,
    starting_items: &ItemCollection,
) -> Result<TraverseResult, RandoError> {
    let result = simulate(world, starting_items);
    let unvisited = world
        .locations()
        .iter()
        .filter(|loc| loc.required && !result.is_visited(&loc.name))
        .count();
    let incomplete: Vec<String> = world
        .regions()
        .iter()
        .filter(|region| !region.can_complete(world, &result.items))
        .map(|region| region.name.clone())
        .collect();
    if unvisited > 0 || !incomplete.is_empty() {
        return Err(RandoError::Unsolvable {
            unvisited,
            incomplete,
        });
    }
    Ok(result)
}
