use super::*;
use crate::test_fixtures::{base_content, base_state, make_rng};

mod colonies;
mod combat_resolution;
mod diplomacy_actions;
mod economy_math;
mod excavations;
mod fleets;
mod random_events;

// --- Shared test helpers ------------------------------------------------

fn test_content() -> GameContent {
    base_content()
}

fn test_state(content: &GameContent) -> GameState {
    base_state(content)
}

fn sid(s: &str) -> SystemId {
    SystemId(s.to_string())
}

fn pid(s: &str) -> PlanetId {
    PlanetId(s.to_string())
}

fn fid(s: &str) -> FleetId {
    FleetId(s.to_string())
}

fn cid(s: &str) -> ColonyId {
    ColonyId(s.to_string())
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// Drops a finished orbital shipyard into `system` for `owner`.
fn place_shipyard(state: &mut GameState, owner: Owner, system: &str) {
    let id = state.counters.alloc_station();
    if let Some(system) = state.system_mut(&sid(system)) {
        system.stations.push(Station {
            id,
            kind: StationKind::Shipyard,
            owner,
            is_building: false,
            build_progress: 0,
        });
    }
}

/// Marks the site on `planet` of `system` as discovered.
fn discover_site(state: &mut GameState, system: &str, planet: &str) {
    let planet = state
        .planet_mut(&sid(system), &pid(planet))
        .expect("fixture planet");
    planet.site.as_mut().expect("fixture site").discovered = true;
}
