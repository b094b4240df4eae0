use super::*;
use crate::colony::{
    abandon_colony, build_station, colonize, demolish_building, demolish_district,
    grow_colonies, process_build_queues, queue_building, queue_district, tick_stations,
};

#[test]
fn test_colonize_deducts_and_claims_system() {
    let content = test_content();
    let mut state = test_state(&content);
    let mut events = Vec::new();
    place_shipyard(&mut state, Owner::Player, "sys_gamma");

    let id = colonize(
        &mut state,
        &content,
        Owner::Player,
        &sid("sys_gamma"),
        &pid("pl_gamma_1"),
        &mut events,
    )
    .expect("habitable unclaimed planet");

    assert!(approx(state.player.resources.minerals, 100.0));
    assert!(approx(state.player.resources.energy, 200.0));
    let colony = state.colony(Owner::Player, &id).expect("new colony");
    assert!(approx(colony.population, 1.0));
    assert_eq!(colony.districts, vec![DistrictKind::City]);
    assert_eq!(colony.buildings.len(), 3, "ocean worlds have 3 slots");
    assert_eq!(colony.max_districts, 4, "size 18 / 4");
    assert!(state.player.controlled_systems.contains(&sid("sys_gamma")));
    assert_eq!(
        state
            .planet(&sid("sys_gamma"), &pid("pl_gamma_1"))
            .and_then(|p| p.colonized_by),
        Some(Owner::Player)
    );
    assert!(events
        .iter()
        .any(|e| matches!(e.event, Event::ColonyFounded { .. })));
}

#[test]
fn test_colonize_rejections() {
    let content = test_content();
    let mut state = test_state(&content);
    let mut events = Vec::new();

    let occupied = colonize(
        &mut state,
        &content,
        Owner::Player,
        &sid("sys_delta"),
        &pid("pl_delta_1"),
        &mut events,
    );
    assert_eq!(occupied, Err(Denied::AlreadyColonized));

    let barren = colonize(
        &mut state,
        &content,
        Owner::Player,
        &sid("sys_beta"),
        &pid("pl_beta_1"),
        &mut events,
    );
    assert_eq!(barren, Err(Denied::NotHabitable));

    let no_yard = colonize(
        &mut state,
        &content,
        Owner::Player,
        &sid("sys_gamma"),
        &pid("pl_gamma_1"),
        &mut events,
    );
    assert_eq!(no_yard, Err(Denied::NoShipyard));

    place_shipyard(&mut state, Owner::Player, "sys_gamma");
    state.player.resources.minerals = 100.0;
    let broke = colonize(
        &mut state,
        &content,
        Owner::Player,
        &sid("sys_gamma"),
        &pid("pl_gamma_1"),
        &mut events,
    );
    assert_eq!(broke, Err(Denied::CannotAffordColony));
    assert_eq!(
        broke.unwrap_err().to_string(),
        "Insufficient resources (200 minerals, 100 energy)"
    );
}

#[test]
fn test_colonize_needs_a_shipyard_outside_the_home_system() {
    let content = test_content();
    let mut state = test_state(&content);
    let mut events = Vec::new();

    // Fully funded, but no yard anywhere near Altair.
    assert_eq!(
        colonize(
            &mut state,
            &content,
            Owner::Player,
            &sid("sys_gamma"),
            &pid("pl_gamma_1"),
            &mut events,
        ),
        Err(Denied::NoShipyard)
    );

    place_shipyard(&mut state, Owner::Player, "sys_gamma");
    colonize(
        &mut state,
        &content,
        Owner::Player,
        &sid("sys_gamma"),
        &pid("pl_gamma_1"),
        &mut events,
    )
    .expect("orbital shipyard unlocks the system");

    // The home system itself is exempt, even with every yard gone.
    let mut state = test_state(&content);
    state.player.colonies[0].buildings = vec![None; 4];
    state.galaxy.systems[0].planets.push(Planet {
        id: pid("pl_alpha_2"),
        name: "Terra Minor".to_string(),
        kind: PlanetKind::Ocean,
        size: 12,
        habitable: true,
        deposits: Resources::new(1.0, 2.0, 0.0),
        colonized_by: None,
        homeworld: false,
        has_moon: false,
        site: None,
    });
    colonize(
        &mut state,
        &content,
        Owner::Player,
        &sid("sys_alpha"),
        &pid("pl_alpha_2"),
        &mut events,
    )
    .expect("no yard needed at home");
}

#[test]
fn test_district_queue_pays_upfront_and_completes() {
    let content = test_content();
    let mut state = test_state(&content);
    let mut events = Vec::new();
    let colony = cid("colony_001");

    queue_district(&mut state, &content, Owner::Player, &colony, DistrictKind::Mining)
        .expect("room and resources");
    assert!(approx(state.player.resources.minerals, 225.0), "cost paid up front");

    process_build_queues(&mut state, &content, Owner::Player, &mut events);
    assert_eq!(
        state.colony(Owner::Player, &colony).expect("colony").districts.len(),
        7,
        "mining district takes 2 turns"
    );
    process_build_queues(&mut state, &content, Owner::Player, &mut events);
    let built = state.colony(Owner::Player, &colony).expect("colony");
    assert_eq!(built.districts.len(), 8);
    assert_eq!(built.districts[7], DistrictKind::Mining);
    assert!(built.build_queue.is_empty());
    assert!(events
        .iter()
        .any(|e| matches!(e.event, Event::ConstructionCompleted { .. })));
}

#[test]
fn test_district_cap_enforced() {
    let content = test_content();
    let mut state = test_state(&content);
    state.player.colonies[0].max_districts = 7;

    let denied = queue_district(
        &mut state,
        &content,
        Owner::Player,
        &cid("colony_001"),
        DistrictKind::Mining,
    );
    assert_eq!(denied, Err(Denied::MaxDistrictsReached));
}

#[test]
fn test_building_slot_rules() {
    let content = test_content();
    let mut state = test_state(&content);
    let colony = cid("colony_001");

    queue_building(
        &mut state,
        &content,
        Owner::Player,
        &colony,
        BuildingKind::MineralProcessor,
        3,
    )
    .expect("empty slot");
    assert_eq!(
        queue_building(
            &mut state,
            &content,
            Owner::Player,
            &colony,
            BuildingKind::ResearchLab,
            3
        ),
        Err(Denied::SlotUnderConstruction)
    );
    assert_eq!(
        queue_building(
            &mut state,
            &content,
            Owner::Player,
            &colony,
            BuildingKind::ResearchLab,
            0
        ),
        Err(Denied::SlotOccupied)
    );
    assert_eq!(
        queue_building(
            &mut state,
            &content,
            Owner::Player,
            &colony,
            BuildingKind::ResearchLab,
            9
        ),
        Err(Denied::InvalidSlot)
    );
}

#[test]
fn test_city_demolition_housing_guard() {
    let content = test_content();
    let mut state = test_state(&content);
    let colony = cid("colony_001");

    // Pop 5.5 against 1 remaining city (housing 5) must be refused.
    state.player.colonies[0].population = 5.5;
    assert_eq!(
        demolish_district(&mut state, &content, Owner::Player, &colony, 0),
        Err(Denied::HousingShortage)
    );

    state.player.colonies[0].population = 3.0;
    demolish_district(&mut state, &content, Owner::Player, &colony, 0).expect("housing fits");
    assert_eq!(state.player.colonies[0].districts.len(), 6);
    assert!(approx(state.player.resources.minerals, 325.0), "demolition refund");
}

#[test]
fn test_building_demolition() {
    let content = test_content();
    let mut state = test_state(&content);
    let colony = cid("colony_001");

    demolish_building(&mut state, &content, Owner::Player, &colony, 1).expect("occupied slot");
    assert!(state.player.colonies[0].buildings[1].is_none());
    assert!(approx(state.player.resources.minerals, 350.0));
    assert_eq!(
        demolish_building(&mut state, &content, Owner::Player, &colony, 1),
        Err(Denied::EmptySlot)
    );
}

#[test]
fn test_abandon_colony_releases_control_without_presence() {
    let content = test_content();
    let mut state = test_state(&content);

    // With the fleet still home, control of the system persists.
    abandon_colony(&mut state, Owner::Player, &cid("colony_001")).expect("own colony");
    assert!(state.player.colonies.is_empty());
    assert!(state.player.controlled_systems.contains(&sid("sys_alpha")));
    assert_eq!(
        state
            .planet(&sid("sys_alpha"), &pid("pl_alpha_1"))
            .and_then(|p| p.colonized_by),
        None
    );

    // Without any presence the claim lapses too.
    let mut state = test_state(&content);
    state.player.fleets.clear();
    abandon_colony(&mut state, Owner::Player, &cid("colony_001")).expect("own colony");
    assert!(!state.player.controlled_systems.contains(&sid("sys_alpha")));
}

#[test]
fn test_station_placement_rules() {
    let content = test_content();
    let mut state = test_state(&content);

    assert_eq!(
        build_station(&mut state, &content, Owner::Player, &sid("sys_beta"), StationKind::Mining),
        Err(Denied::NoPresence)
    );
    assert_eq!(
        build_station(&mut state, &content, Owner::Player, &sid("sys_alpha"), StationKind::Mining),
        Err(Denied::RequiresAsteroidBelt),
        "no asteroid belt at the homeworld"
    );

    state.player.fleets[0].location = sid("sys_beta");
    build_station(&mut state, &content, Owner::Player, &sid("sys_beta"), StationKind::Mining)
        .expect("presence and belt");
    assert_eq!(
        build_station(&mut state, &content, Owner::Player, &sid("sys_beta"), StationKind::Mining),
        Err(Denied::StationAlreadyPresent)
    );
}

#[test]
fn test_station_construction_completes() {
    let content = test_content();
    let mut state = test_state(&content);
    let mut events = Vec::new();
    state.player.fleets[0].location = sid("sys_beta");
    build_station(&mut state, &content, Owner::Player, &sid("sys_beta"), StationKind::Mining)
        .expect("presence and belt");

    for _ in 0..3 {
        tick_stations(&mut state, &content, &mut events);
    }
    let system = state.system(&sid("sys_beta")).expect("fixture system");
    assert!(system.stations[0].is_building, "4 turns to build");

    tick_stations(&mut state, &content, &mut events);
    let system = state.system(&sid("sys_beta")).expect("fixture system");
    assert!(!system.stations[0].is_building);
    assert!(events
        .iter()
        .any(|e| matches!(e.event, Event::StationCompleted { .. })));
}

#[test]
fn test_population_growth_caps_at_housing() {
    let content = test_content();
    let mut state = test_state(&content);

    grow_colonies(&mut state, &content, Owner::Player);
    assert!(
        approx(state.player.colonies[0].population, 5.0925),
        "base growth plus happiness bonus"
    );

    state.player.colonies[0].population = 8.0;
    grow_colonies(&mut state, &content, Owner::Player);
    assert!(approx(state.player.colonies[0].population, 8.0), "capped at housing");
}
