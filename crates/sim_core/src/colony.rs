//! Colony founding, ground development, and orbital stations.

use crate::content::GameContent;
use crate::economy::max_population;
use crate::types::{
    BuildItem, BuildTask, BuildingKind, Colony, ColonyId, Denied, DistrictKind, Event,
    EventEnvelope, GameState, NoteKind, Owner, PlanetId, Station, StationId, StationKind,
    SystemId,
};

// ---------------------------------------------------------------------------
// Founding
// ---------------------------------------------------------------------------

/// Founds a colony on a habitable, unclaimed planet and takes control of its
/// system. Outside the home system a shipyard must already be on site.
/// Costs are fixed regardless of planet quality.
pub fn colonize(
    state: &mut GameState,
    content: &GameContent,
    owner: Owner,
    system_id: &SystemId,
    planet_id: &PlanetId,
    events: &mut Vec<EventEnvelope>,
) -> Result<ColonyId, Denied> {
    let planet = state
        .planet(system_id, planet_id)
        .ok_or(Denied::PlanetNotFound)?;
    if !planet.habitable {
        return Err(Denied::NotHabitable);
    }
    if planet.colonized_by.is_some() {
        return Err(Denied::AlreadyColonized);
    }
    let home_system = state
        .faction(owner)
        .homeworld
        .as_ref()
        .is_some_and(|(home, _)| home == system_id);
    if !home_system && !crate::fleet::system_has_shipyard(state, owner, system_id) {
        return Err(Denied::NoShipyard);
    }
    let cost = content.constants.colonize_cost;
    {
        let resources = &state.faction(owner).resources;
        if resources.minerals < cost.minerals || resources.energy < cost.energy {
            return Err(Denied::CannotAffordColony);
        }
    }

    let name = planet.name.clone();
    let size = planet.size;
    let slots = GameContent::building_slots(planet.kind);
    let id = state.counters.alloc_colony();

    let faction = state.faction_mut(owner);
    faction.resources.minerals -= cost.minerals;
    faction.resources.energy -= cost.energy;
    faction.colonies.push(Colony {
        id: id.clone(),
        system: system_id.clone(),
        planet: planet_id.clone(),
        name: name.clone(),
        homeworld: false,
        population: 1.0,
        happiness: 0.7,
        districts: vec![DistrictKind::City],
        buildings: vec![None; slots],
        max_districts: size / 4,
        build_queue: Vec::new(),
    });
    faction.controlled_systems.insert(system_id.clone());
    faction.known_systems.insert(system_id.clone());

    if let Some(planet) = state.planet_mut(system_id, planet_id) {
        planet.colonized_by = Some(owner);
    }
    if owner == Owner::Player {
        state.notify(format!("Colony established on {name}"), NoteKind::Success);
    }
    events.push(crate::emit(
        &mut state.counters,
        state.turn,
        Event::ColonyFounded {
            owner,
            system: system_id.clone(),
            planet: planet_id.clone(),
        },
    ));
    Ok(id)
}

/// Dismantles the colony. System control is released only when no other
/// colony or fleet of the faction remains in the system.
pub fn abandon_colony(
    state: &mut GameState,
    owner: Owner,
    colony_id: &ColonyId,
) -> Result<(), Denied> {
    let (system_id, planet_id) = {
        let colony = state.colony(owner, colony_id).ok_or(Denied::ColonyNotFound)?;
        (colony.system.clone(), colony.planet.clone())
    };

    let faction = state.faction_mut(owner);
    faction.colonies.retain(|c| c.id != *colony_id);
    let keeps_presence = faction.colonies.iter().any(|c| c.system == system_id)
        || faction.fleets.iter().any(|f| f.location == system_id);
    if !keeps_presence {
        faction.controlled_systems.remove(&system_id);
    }

    if let Some(planet) = state.planet_mut(&system_id, &planet_id) {
        planet.colonized_by = None;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Construction queue
// ---------------------------------------------------------------------------

/// Queues a district. The full cost is paid up front.
pub fn queue_district(
    state: &mut GameState,
    content: &GameContent,
    owner: Owner,
    colony_id: &ColonyId,
    kind: DistrictKind,
) -> Result<(), Denied> {
    let def = content.districts.get(kind);
    let cost = def.cost;
    let build_time = def.build_time;

    {
        let colony = state.colony(owner, colony_id).ok_or(Denied::ColonyNotFound)?;
        if colony.districts.len() as u32 >= colony.max_districts {
            return Err(Denied::MaxDistrictsReached);
        }
    }

    pay(state, owner, cost.minerals, cost.energy)?;
    if let Some(colony) = state.colony_mut(owner, colony_id) {
        colony.build_queue.push(BuildTask {
            item: BuildItem::District { kind },
            turns_remaining: build_time,
        });
    }
    Ok(())
}

/// Queues a building into an empty slot. The full cost is paid up front.
pub fn queue_building(
    state: &mut GameState,
    content: &GameContent,
    owner: Owner,
    colony_id: &ColonyId,
    kind: BuildingKind,
    slot: usize,
) -> Result<(), Denied> {
    let def = content.buildings.get(kind);
    let cost = def.cost;
    let build_time = def.build_time;

    {
        let colony = state.colony(owner, colony_id).ok_or(Denied::ColonyNotFound)?;
        if slot >= colony.buildings.len() {
            return Err(Denied::InvalidSlot);
        }
        if colony.buildings[slot].is_some() {
            return Err(Denied::SlotOccupied);
        }
        let queued = colony.build_queue.iter().any(|task| {
            matches!(&task.item, BuildItem::Building { slot: s, .. } if *s == slot)
        });
        if queued {
            return Err(Denied::SlotUnderConstruction);
        }
    }

    pay(state, owner, cost.minerals, cost.energy)?;
    if let Some(colony) = state.colony_mut(owner, colony_id) {
        colony.build_queue.push(BuildTask {
            item: BuildItem::Building { kind, slot },
            turns_remaining: build_time,
        });
    }
    Ok(())
}

/// Advances every build queue of the faction by one turn and materializes
/// finished work in queue order. A finished building whose slot got filled
/// in the meantime is dropped.
pub fn process_build_queues(
    state: &mut GameState,
    content: &GameContent,
    owner: Owner,
    events: &mut Vec<EventEnvelope>,
) {
    let _ = content;
    let mut finished: Vec<(ColonyId, String, BuildItem)> = Vec::new();

    for colony in &mut state.faction_mut(owner).colonies {
        for task in &mut colony.build_queue {
            task.turns_remaining = task.turns_remaining.saturating_sub(1);
        }
        let mut remaining = Vec::with_capacity(colony.build_queue.len());
        for task in colony.build_queue.drain(..) {
            if task.turns_remaining > 0 {
                remaining.push(task);
                continue;
            }
            match task.item {
                BuildItem::District { kind } => {
                    colony.districts.push(kind);
                    finished.push((colony.id.clone(), colony.name.clone(), task.item));
                }
                BuildItem::Building { kind, slot } => {
                    if colony.buildings.get(slot).is_some_and(Option::is_none) {
                        colony.buildings[slot] = Some(kind);
                        finished.push((colony.id.clone(), colony.name.clone(), task.item));
                    }
                }
            }
        }
        colony.build_queue = remaining;
    }

    for (colony_id, colony_name, item) in finished {
        if owner == Owner::Player {
            state.notify(
                format!("Construction complete on {colony_name}"),
                NoteKind::Success,
            );
        }
        events.push(crate::emit(
            &mut state.counters,
            state.turn,
            Event::ConstructionCompleted {
                owner,
                colony: colony_id,
                item,
            },
        ));
    }
}

// ---------------------------------------------------------------------------
// Demolition
// ---------------------------------------------------------------------------

/// Tears down the district at `index`, refunding a quarter of a typical
/// cost in minerals. City demolition is refused while it would leave the
/// population without housing.
pub fn demolish_district(
    state: &mut GameState,
    content: &GameContent,
    owner: Owner,
    colony_id: &ColonyId,
    index: usize,
) -> Result<(), Denied> {
    let refund = content.constants.district_demolish_refund;
    let colony = state
        .colony_mut(owner, colony_id)
        .ok_or(Denied::ColonyNotFound)?;
    let kind = *colony.districts.get(index).ok_or(Denied::DistrictNotFound)?;

    if kind == DistrictKind::City {
        let remaining_cities = f64::from(colony.city_districts() - 1);
        let housing = remaining_cities * content.constants.population_per_city_district
            + content.constants.base_max_population;
        if colony.population > housing {
            return Err(Denied::HousingShortage);
        }
    }
    colony.districts.remove(index);
    state.faction_mut(owner).resources.minerals += refund;
    Ok(())
}

pub fn demolish_building(
    state: &mut GameState,
    content: &GameContent,
    owner: Owner,
    colony_id: &ColonyId,
    slot: usize,
) -> Result<(), Denied> {
    let refund = content.constants.building_demolish_refund;
    let colony = state
        .colony_mut(owner, colony_id)
        .ok_or(Denied::ColonyNotFound)?;
    if slot >= colony.buildings.len() {
        return Err(Denied::InvalidSlot);
    }
    if colony.buildings[slot].is_none() {
        return Err(Denied::EmptySlot);
    }
    colony.buildings[slot] = None;
    state.faction_mut(owner).resources.minerals += refund;
    Ok(())
}

// ---------------------------------------------------------------------------
// Growth
// ---------------------------------------------------------------------------

/// Population drifts toward the housing cap; happier colonies grow faster.
pub fn grow_colonies(state: &mut GameState, content: &GameContent, owner: Owner) {
    let growth_base = content.constants.growth_base;
    let happiness_bonus = content.constants.growth_happiness_bonus;
    for colony in &mut state.faction_mut(owner).colonies {
        let cap = max_population(colony, content);
        if colony.population < cap {
            let growth = growth_base + colony.happiness * happiness_bonus;
            colony.population = (colony.population + growth).min(cap);
        }
    }
}

// ---------------------------------------------------------------------------
// Stations
// ---------------------------------------------------------------------------

/// Starts station construction in a system where the faction has presence.
/// One station of each kind per owner per system; mining stations need an
/// asteroid belt to work.
pub fn build_station(
    state: &mut GameState,
    content: &GameContent,
    owner: Owner,
    system_id: &SystemId,
    kind: StationKind,
) -> Result<StationId, Denied> {
    let def = content.stations.get(kind);
    let cost = def.cost;

    {
        let system = state.system(system_id).ok_or(Denied::SystemNotFound)?;
        if kind == StationKind::Mining && system.asteroid_belt.is_none() {
            return Err(Denied::RequiresAsteroidBelt);
        }
        let duplicate = system
            .stations
            .iter()
            .any(|s| s.owner == owner && s.kind == kind);
        if duplicate {
            return Err(Denied::StationAlreadyPresent);
        }
        let faction = state.faction(owner);
        let present = faction.colonies.iter().any(|c| c.system == *system_id)
            || faction.fleets.iter().any(|f| f.location == *system_id);
        if !present {
            return Err(Denied::NoPresence);
        }
    }

    pay(state, owner, cost.minerals, cost.energy)?;
    let id = state.counters.alloc_station();
    if let Some(system) = state.system_mut(system_id) {
        system.stations.push(Station {
            id: id.clone(),
            kind,
            owner,
            is_building: true,
            build_progress: 0,
        });
    }
    Ok(id)
}

/// Advances every station under construction by one turn, for both owners.
pub fn tick_stations(state: &mut GameState, content: &GameContent, events: &mut Vec<EventEnvelope>) {
    let mut completed: Vec<(Owner, SystemId, StationKind, String)> = Vec::new();
    for system in &mut state.galaxy.systems {
        for station in &mut system.stations {
            if !station.is_building {
                continue;
            }
            station.build_progress += 1;
            if station.build_progress >= content.stations.get(station.kind).build_time {
                station.is_building = false;
                completed.push((
                    station.owner,
                    system.id.clone(),
                    station.kind,
                    system.name.clone(),
                ));
            }
        }
    }
    for (owner, system_id, kind, system_name) in completed {
        if owner == Owner::Player {
            state.notify(
                format!("Station operational in {system_name}"),
                NoteKind::Success,
            );
        }
        events.push(crate::emit(
            &mut state.counters,
            state.turn,
            Event::StationCompleted {
                owner,
                system: system_id,
                kind,
            },
        ));
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Checks minerals before energy so the denial reason is stable.
fn pay(state: &mut GameState, owner: Owner, minerals: f64, energy: f64) -> Result<(), Denied> {
    let resources = &mut state.faction_mut(owner).resources;
    if resources.minerals < minerals {
        return Err(Denied::InsufficientMinerals);
    }
    if resources.energy < energy {
        return Err(Denied::InsufficientEnergy);
    }
    resources.minerals -= minerals;
    resources.energy -= energy;
    Ok(())
}
