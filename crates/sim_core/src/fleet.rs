//! Fleet construction, orders, and movement.

use crate::content::GameContent;
use crate::graph;
use crate::types::{
    BuildingKind, Denied, Event, EventEnvelope, Faction, Fleet, FleetId, FleetOrders, GameState,
    NoteKind, Owner, Ship, ShipClass, ShipId, StationKind, SystemId,
};

const FLEET_NAMES: &[&str] = &[
    "First Fleet",
    "Second Fleet",
    "Third Fleet",
    "Home Fleet",
    "Expeditionary Force",
    "Strike Force",
    "Defense Squadron",
    "Scout Wing",
    "Patrol Group",
    "Task Force Alpha",
    "Task Force Beta",
    "Task Force Gamma",
    "Vanguard",
    "Rearguard",
    "Flanking Force",
    "Frontier Fleet",
    "Core Fleet",
    "Reserve Fleet",
];

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

/// Creates a fleet at `system` with freshly built ships at full hull.
/// No cost is charged here; callers pay per ship or seed starting forces.
pub fn create_fleet(
    state: &mut GameState,
    content: &GameContent,
    owner: Owner,
    system: &SystemId,
    classes: &[ShipClass],
    name: Option<String>,
) -> FleetId {
    let id = state.counters.alloc_fleet();
    let name = name.unwrap_or_else(|| {
        let used: Vec<&str> = state
            .faction(owner)
            .fleets
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        FLEET_NAMES
            .iter()
            .find(|n| !used.contains(*n))
            .map_or_else(
                || format!("Fleet {}", state.counters.next_fleet_id),
                |n| (*n).to_string(),
            )
    });
    let ships = classes
        .iter()
        .map(|class| Ship {
            id: state.counters.alloc_ship(),
            class: *class,
            hull: content.ship_classes.get(*class).max_hull,
        })
        .collect();

    let faction = state.faction_mut(owner);
    faction.fleets.push(Fleet {
        id: id.clone(),
        name,
        location: system.clone(),
        destination: None,
        orders: None,
        patrol_route: Vec::new(),
        ships,
    });
    faction.known_systems.insert(system.clone());
    id
}

/// Builds one ship into an existing fleet. Requires a shipyard in the
/// fleet's system: a colony with a starport, or a finished shipyard station.
pub fn build_ship(
    state: &mut GameState,
    content: &GameContent,
    owner: Owner,
    fleet_id: &FleetId,
    class: ShipClass,
) -> Result<ShipId, Denied> {
    let def = content.ship_classes.get(class);
    {
        let resources = &state.faction(owner).resources;
        if resources.minerals < def.cost.minerals || resources.energy < def.cost.energy {
            return Err(Denied::InsufficientResources);
        }
    }
    let location = state
        .fleet(owner, fleet_id)
        .ok_or(Denied::FleetNotFound)?
        .location
        .clone();
    if !system_has_shipyard(state, owner, &location) {
        return Err(Denied::NoShipyard);
    }

    let id = state.counters.alloc_ship();
    let ship = Ship {
        id: id.clone(),
        class,
        hull: def.max_hull,
    };
    let faction = state.faction_mut(owner);
    faction.resources.minerals -= def.cost.minerals;
    faction.resources.energy -= def.cost.energy;
    if let Some(fleet) = faction.fleets.iter_mut().find(|f| f.id == *fleet_id) {
        fleet.ships.push(ship);
    }
    Ok(id)
}

pub fn system_has_shipyard(state: &GameState, owner: Owner, system_id: &SystemId) -> bool {
    let colony_yard = state
        .faction(owner)
        .colonies
        .iter()
        .any(|c| c.system == *system_id && c.has_building(BuildingKind::Starport));
    if colony_yard {
        return true;
    }
    state.system(system_id).is_some_and(|system| {
        system
            .stations
            .iter()
            .any(|s| s.owner == owner && s.kind == StationKind::Shipyard && !s.is_building)
    })
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

/// Sets a move order and returns the path that will be followed.
pub fn set_destination(
    state: &mut GameState,
    owner: Owner,
    fleet_id: &FleetId,
    destination: &SystemId,
) -> Result<Vec<SystemId>, Denied> {
    let location = state
        .fleet(owner, fleet_id)
        .ok_or(Denied::FleetNotFound)?
        .location
        .clone();
    let path =
        graph::shortest_path(&location, destination, &state.galaxy).ok_or(Denied::NoPath)?;
    if let Some(fleet) = state.fleet_mut(owner, fleet_id) {
        fleet.destination = Some(destination.clone());
        fleet.orders = Some(FleetOrders::Move);
    }
    Ok(path)
}

/// Stores a patrol route after checking every consecutive leg is reachable.
pub fn set_patrol(
    state: &mut GameState,
    owner: Owner,
    fleet_id: &FleetId,
    route: &[SystemId],
) -> Result<(), Denied> {
    let location = state
        .fleet(owner, fleet_id)
        .ok_or(Denied::FleetNotFound)?
        .location
        .clone();
    if route.is_empty() {
        return Err(Denied::InvalidPatrolRoute);
    }
    let mut prev = &location;
    for stop in route {
        if graph::shortest_path(prev, stop, &state.galaxy).is_none() {
            return Err(Denied::InvalidPatrolRoute);
        }
        prev = stop;
    }
    if let Some(fleet) = state.fleet_mut(owner, fleet_id) {
        fleet.patrol_route = route.to_vec();
        fleet.orders = Some(FleetOrders::Patrol);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Scanning
// ---------------------------------------------------------------------------

/// Surveys the fleet's current system, revealing all hyperlane neighbors.
pub fn scan_system(
    state: &mut GameState,
    owner: Owner,
    fleet_id: &FleetId,
    events: &mut Vec<EventEnvelope>,
) -> Result<(), Denied> {
    let fleet = state.fleet(owner, fleet_id).ok_or(Denied::FleetNotFound)?;
    if !fleet.has_science_ship() {
        return Err(Denied::RequiresScienceVessel);
    }
    let location = fleet.location.clone();
    let neighbors: Vec<SystemId> = graph::neighbors(&location, &state.galaxy)
        .into_iter()
        .cloned()
        .collect();
    let revealed = neighbors.len();
    let system_name = state
        .system(&location)
        .map_or_else(|| location.0.clone(), |s| s.name.clone());

    let faction = state.faction_mut(owner);
    faction.scanned_systems.insert(location.clone());
    faction.known_systems.insert(location.clone());
    for neighbor in neighbors {
        faction.known_systems.insert(neighbor);
    }

    if owner == Owner::Player {
        state.notify(
            format!("System {system_name} scanned - {revealed} connected systems revealed"),
            NoteKind::Info,
        );
    }
    events.push(crate::emit(
        &mut state.counters,
        state.turn,
        Event::SystemScanned {
            owner,
            system: location,
        },
    ));
    Ok(())
}

/// In-depth survey of an already scanned system. Costs research for the
/// player (the opponent surveys for free) and can uncover archaeology
/// sites on the system's planets. Re-surveying is a no-op.
pub fn deep_scan_system(
    state: &mut GameState,
    content: &GameContent,
    owner: Owner,
    fleet_id: &FleetId,
    events: &mut Vec<EventEnvelope>,
) -> Result<(), Denied> {
    let fleet = state.fleet(owner, fleet_id).ok_or(Denied::FleetNotFound)?;
    if !fleet.has_science_ship() {
        return Err(Denied::RequiresScienceVessel);
    }
    let location = fleet.location.clone();
    if !state.faction(owner).scanned_systems.contains(&location) {
        return Err(Denied::NotScanned);
    }
    if state.faction(owner).deep_scanned_systems.contains(&location) {
        return Ok(());
    }
    let cost = content.constants.deep_scan_research_cost;
    if owner == Owner::Player && state.faction(owner).resources.research < cost {
        return Err(Denied::CannotAffordDeepScan);
    }

    let faction = state.faction_mut(owner);
    if owner == Owner::Player {
        faction.resources.research -= cost;
    }
    faction.deep_scanned_systems.insert(location.clone());

    let mut discovered = Vec::new();
    if let Some(system) = state.system_mut(&location) {
        for planet in &mut system.planets {
            if let Some(site) = planet.site.as_mut() {
                if !site.discovered {
                    site.discovered = true;
                    discovered.push((planet.id.clone(), planet.name.clone(), site.id.clone()));
                }
            }
        }
    }
    for (planet_id, planet_name, site_id) in discovered {
        if owner == Owner::Player {
            state.notify(
                format!("Archaeological site discovered on {planet_name}"),
                NoteKind::Success,
            );
        }
        events.push(crate::emit(
            &mut state.counters,
            state.turn,
            Event::SiteDiscovered {
                owner,
                system: location.clone(),
                planet: planet_id,
                site: site_id,
            },
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Reorganization
// ---------------------------------------------------------------------------

/// Folds `from` into `into`; the emptied fleet is removed.
pub fn merge_fleets(
    state: &mut GameState,
    owner: Owner,
    into: &FleetId,
    from: &FleetId,
) -> Result<(), Denied> {
    let (loc_a, loc_b) = {
        let a = state.fleet(owner, into).ok_or(Denied::FleetNotFound)?;
        let b = state.fleet(owner, from).ok_or(Denied::FleetNotFound)?;
        (a.location.clone(), b.location.clone())
    };
    if loc_a != loc_b {
        return Err(Denied::FleetsNotCoLocated);
    }
    let faction = state.faction_mut(owner);
    let idx = faction
        .fleets
        .iter()
        .position(|f| f.id == *from)
        .ok_or(Denied::FleetNotFound)?;
    let absorbed = faction.fleets.remove(idx);
    if let Some(target) = faction.fleets.iter_mut().find(|f| f.id == *into) {
        target.ships.extend(absorbed.ships);
    }
    Ok(())
}

/// Moves the ships at `indices` into a new fleet at the same location,
/// preserving ship order. At least one ship must stay behind.
pub fn split_fleet(
    state: &mut GameState,
    owner: Owner,
    fleet_id: &FleetId,
    indices: &[usize],
    name: Option<String>,
) -> Result<FleetId, Denied> {
    let (location, source_name, split_ships) = {
        let fleet = state.fleet(owner, fleet_id).ok_or(Denied::FleetNotFound)?;
        let picked: Vec<usize> = indices
            .iter()
            .copied()
            .filter(|i| *i < fleet.ships.len())
            .collect();
        if picked.len() >= fleet.ships.len() {
            return Err(Denied::CannotSplitAllShips);
        }
        let split: Vec<Ship> = fleet
            .ships
            .iter()
            .enumerate()
            .filter(|(i, _)| picked.contains(i))
            .map(|(_, s)| s.clone())
            .collect();
        (fleet.location.clone(), fleet.name.clone(), split)
    };

    let new_id = state.counters.alloc_fleet();
    let new_name = name.unwrap_or_else(|| format!("{source_name} Detachment"));
    let faction = state.faction_mut(owner);
    if let Some(fleet) = faction.fleets.iter_mut().find(|f| f.id == *fleet_id) {
        let keep: Vec<usize> = indices
            .iter()
            .copied()
            .filter(|i| *i < fleet.ships.len())
            .collect();
        let mut i = 0;
        fleet.ships.retain(|_| {
            let taken = keep.contains(&i);
            i += 1;
            !taken
        });
    }
    faction.fleets.push(Fleet {
        id: new_id.clone(),
        name: new_name,
        location,
        destination: None,
        orders: None,
        patrol_route: Vec::new(),
        ships: split_ships.into_iter().collect(),
    });
    Ok(new_id)
}

/// Scraps the fleet, refunding a fraction of each ship's mineral cost.
pub fn disband_fleet(
    state: &mut GameState,
    content: &GameContent,
    owner: Owner,
    fleet_id: &FleetId,
) -> Result<f64, Denied> {
    let ratio = content.constants.disband_refund_ratio;
    let faction = state.faction_mut(owner);
    let idx = faction
        .fleets
        .iter()
        .position(|f| f.id == *fleet_id)
        .ok_or(Denied::FleetNotFound)?;
    let fleet = faction.fleets.remove(idx);
    let refund: f64 = fleet
        .ships
        .iter()
        .map(|s| (content.ship_classes.get(s.class).cost.minerals * ratio).floor())
        .sum();
    faction.resources.minerals += refund;
    Ok(refund)
}

/// Restores every ship to full hull. All-or-nothing: the whole bill must
/// be affordable.
pub fn repair_fleet(
    state: &mut GameState,
    content: &GameContent,
    owner: Owner,
    fleet_id: &FleetId,
) -> Result<f64, Denied> {
    let cost_per_hull = content.constants.repair_cost_per_hull;
    let cost: f64 = {
        let fleet = state.fleet(owner, fleet_id).ok_or(Denied::FleetNotFound)?;
        fleet
            .ships
            .iter()
            .map(|s| {
                let missing = content.ship_classes.get(s.class).max_hull - s.hull;
                (missing * cost_per_hull).floor()
            })
            .sum()
    };
    let faction = state.faction_mut(owner);
    if faction.resources.minerals < cost {
        return Err(Denied::InsufficientMinerals);
    }
    faction.resources.minerals -= cost;
    if let Some(fleet) = faction.fleets.iter_mut().find(|f| f.id == *fleet_id) {
        for ship in &mut fleet.ships {
            ship.hull = content.ship_classes.get(ship.class).max_hull;
        }
    }
    Ok(cost)
}

// ---------------------------------------------------------------------------
// Strength
// ---------------------------------------------------------------------------

/// Hull-weighted combat strength with the military tech bonus, floored.
pub fn fleet_strength(
    fleet: &Fleet,
    content: &GameContent,
    military_level: u32,
) -> f64 {
    let base: f64 = fleet
        .ships
        .iter()
        .map(|s| {
            let def = content.ship_classes.get(s.class);
            def.strength * (s.hull / def.max_hull)
        })
        .sum();
    let bonus = 1.0 + f64::from(military_level) * content.constants.military_strength_bonus;
    (base * bonus).floor()
}

pub fn faction_strength(faction: &Faction, content: &GameContent) -> f64 {
    faction
        .fleets
        .iter()
        .map(|f| fleet_strength(f, content, faction.technology.military.level))
        .sum()
}

// ---------------------------------------------------------------------------
// Movement
// ---------------------------------------------------------------------------

/// Advances every fleet with a destination by one hop along its shortest
/// path. Newly entered systems become known.
pub fn advance_fleets(state: &mut GameState, owner: Owner, events: &mut Vec<EventEnvelope>) {
    let moves: Vec<(FleetId, SystemId, SystemId)> = state
        .faction(owner)
        .fleets
        .iter()
        .filter_map(|fleet| {
            let destination = fleet.destination.clone()?;
            if destination == fleet.location {
                return None;
            }
            let path = graph::shortest_path(&fleet.location, &destination, &state.galaxy)?;
            path.get(1)
                .map(|step| (fleet.id.clone(), step.clone(), destination))
        })
        .collect();

    for (fleet_id, step, destination) in moves {
        let arrived = step == destination;
        let faction = state.faction_mut(owner);
        faction.known_systems.insert(step.clone());
        let mut fleet_name = None;
        if let Some(fleet) = faction.fleets.iter_mut().find(|f| f.id == fleet_id) {
            fleet.location = step.clone();
            if arrived {
                fleet.destination = None;
                fleet.orders = None;
                fleet_name = Some(fleet.name.clone());
            }
        }
        if arrived {
            let system_name = state
                .system(&step)
                .map_or_else(|| step.0.clone(), |s| s.name.clone());
            if owner == Owner::Player {
                let name = fleet_name.unwrap_or_default();
                state.notify(
                    format!("Fleet \"{name}\" arrived at {system_name}"),
                    NoteKind::Info,
                );
            }
            events.push(crate::emit(
                &mut state.counters,
                state.turn,
                Event::FleetArrived {
                    owner,
                    fleet: fleet_id,
                    system: step,
                },
            ));
        }
    }
}
