use super::*;
use crate::fleet::{
    advance_fleets, build_ship, deep_scan_system, disband_fleet, fleet_strength, merge_fleets,
    repair_fleet, scan_system, set_destination, set_patrol, split_fleet,
};

#[test]
fn test_set_destination_returns_full_path() {
    let content = test_content();
    let mut state = test_state(&content);

    let path = set_destination(&mut state, Owner::Player, &fid("fleet_001"), &sid("sys_delta"))
        .expect("lane exists");
    assert_eq!(
        path,
        vec![sid("sys_alpha"), sid("sys_beta"), sid("sys_gamma"), sid("sys_delta")]
    );
    assert_eq!(
        state.player.fleets[0].destination,
        Some(sid("sys_delta"))
    );
}

#[test]
fn test_no_path_to_disconnected_system() {
    let content = test_content();
    let mut state = test_state(&content);
    state.galaxy.systems.push(StarSystem {
        id: sid("sys_omega"),
        name: "Omega".to_string(),
        x: 0.0,
        y: 0.0,
        star: StarClass::Blue,
        planets: Vec::new(),
        stations: Vec::new(),
        asteroid_belt: None,
    });

    assert_eq!(
        set_destination(&mut state, Owner::Player, &fid("fleet_001"), &sid("sys_omega")),
        Err(Denied::NoPath)
    );
}

#[test]
fn test_fleet_moves_one_hop_per_turn() {
    let content = test_content();
    let mut state = test_state(&content);
    let mut events = Vec::new();
    set_destination(&mut state, Owner::Player, &fid("fleet_001"), &sid("sys_gamma"))
        .expect("lane exists");

    advance_fleets(&mut state, Owner::Player, &mut events);
    assert_eq!(state.player.fleets[0].location, sid("sys_beta"));
    assert!(state.player.known_systems.contains(&sid("sys_beta")));
    assert!(state.player.fleets[0].destination.is_some(), "still in transit");

    advance_fleets(&mut state, Owner::Player, &mut events);
    assert_eq!(state.player.fleets[0].location, sid("sys_gamma"));
    assert!(state.player.fleets[0].destination.is_none());
    assert!(events
        .iter()
        .any(|e| matches!(e.event, Event::FleetArrived { .. })));
    assert!(state
        .player
        .notifications
        .iter()
        .any(|n| n.message.contains("arrived at Altair")));
}

#[test]
fn test_scan_reveals_neighbors() {
    let content = test_content();
    let mut state = test_state(&content);
    let mut events = Vec::new();

    scan_system(&mut state, Owner::Player, &fid("fleet_001"), &mut events)
        .expect("science vessel present");
    assert!(state.player.scanned_systems.contains(&sid("sys_alpha")));
    assert!(state.player.known_systems.contains(&sid("sys_beta")));
    assert!(state
        .player
        .notifications
        .iter()
        .any(|n| n.message.contains("1 connected systems revealed")));
}

#[test]
fn test_scan_requires_science_vessel() {
    let content = test_content();
    let mut state = test_state(&content);
    let mut events = Vec::new();
    state.player.fleets[0]
        .ships
        .retain(|s| s.class != ShipClass::Science);

    assert_eq!(
        scan_system(&mut state, Owner::Player, &fid("fleet_001"), &mut events),
        Err(Denied::RequiresScienceVessel)
    );
}

#[test]
fn test_deep_scan_discovers_sites() {
    let content = test_content();
    let mut state = test_state(&content);
    let mut events = Vec::new();
    state.player.fleets[0].location = sid("sys_beta");

    assert_eq!(
        deep_scan_system(&mut state, &content, Owner::Player, &fid("fleet_001"), &mut events),
        Err(Denied::NotScanned)
    );

    scan_system(&mut state, Owner::Player, &fid("fleet_001"), &mut events).expect("science");
    deep_scan_system(&mut state, &content, Owner::Player, &fid("fleet_001"), &mut events)
        .expect("scanned and funded");
    assert!(approx(state.player.resources.research, 90.0), "deep scan costs research");
    assert!(state.player.deep_scanned_systems.contains(&sid("sys_beta")));
    let planet = state.planet(&sid("sys_beta"), &pid("pl_beta_1")).expect("fixture");
    assert!(planet.site.as_ref().expect("site").discovered);
    assert!(events
        .iter()
        .any(|e| matches!(e.event, Event::SiteDiscovered { .. })));
}

#[test]
fn test_deep_scan_requires_research() {
    let content = test_content();
    let mut state = test_state(&content);
    let mut events = Vec::new();
    state.player.resources.research = 5.0;
    scan_system(&mut state, Owner::Player, &fid("fleet_001"), &mut events).expect("science");

    assert_eq!(
        deep_scan_system(&mut state, &content, Owner::Player, &fid("fleet_001"), &mut events),
        Err(Denied::CannotAffordDeepScan)
    );
}

#[test]
fn test_deep_scan_is_free_for_the_opponent() {
    let content = test_content();
    let mut state = test_state(&content);
    let mut events = Vec::new();
    state.ai.fleets[0].location = sid("sys_gamma");
    state.ai.scanned_systems.insert(sid("sys_gamma"));
    state.ai.resources.research = 0.0;

    deep_scan_system(&mut state, &content, Owner::Ai, &fid("fleet_002"), &mut events)
        .expect("no research fee for the opponent");
    assert!(approx(state.ai.resources.research, 0.0));
    assert!(state.ai.deep_scanned_systems.contains(&sid("sys_gamma")));
    assert!(events
        .iter()
        .any(|e| matches!(e.event, Event::SiteDiscovered { owner: Owner::Ai, .. })));
}

#[test]
fn test_repeat_scans_are_no_ops() {
    let content = test_content();
    let mut state = test_state(&content);
    let mut events = Vec::new();
    state.player.fleets[0].location = sid("sys_beta");
    scan_system(&mut state, Owner::Player, &fid("fleet_001"), &mut events).expect("science");
    deep_scan_system(&mut state, &content, Owner::Player, &fid("fleet_001"), &mut events)
        .expect("scanned and funded");

    let known = state.player.known_systems.clone();
    let scanned = state.player.scanned_systems.clone();
    let deep = state.player.deep_scanned_systems.clone();

    scan_system(&mut state, Owner::Player, &fid("fleet_001"), &mut events).expect("re-scan");
    deep_scan_system(&mut state, &content, Owner::Player, &fid("fleet_001"), &mut events)
        .expect("re-survey");

    assert_eq!(state.player.known_systems, known);
    assert_eq!(state.player.scanned_systems, scanned);
    assert_eq!(state.player.deep_scanned_systems, deep);
    assert!(
        approx(state.player.resources.research, 90.0),
        "only the first survey charges"
    );
}

#[test]
fn test_build_ship_requires_shipyard() {
    let content = test_content();
    let mut state = test_state(&content);

    build_ship(&mut state, &content, Owner::Player, &fid("fleet_001"), ShipClass::Corvette)
        .expect("homeworld starport");
    assert_eq!(state.player.fleets[0].ships.len(), 7);
    assert!(approx(state.player.resources.minerals, 250.0));

    state.player.fleets[0].location = sid("sys_beta");
    assert_eq!(
        build_ship(&mut state, &content, Owner::Player, &fid("fleet_001"), ShipClass::Corvette),
        Err(Denied::NoShipyard)
    );
}

#[test]
fn test_split_and_merge() {
    let content = test_content();
    let mut state = test_state(&content);

    let detachment = split_fleet(&mut state, Owner::Player, &fid("fleet_001"), &[0, 1], None)
        .expect("leaves ships behind");
    assert_eq!(state.player.fleets[0].ships.len(), 4);
    let new_fleet = state.fleet(Owner::Player, &detachment).expect("detachment");
    assert_eq!(new_fleet.ships.len(), 2);
    assert_eq!(new_fleet.name, "Home Fleet Detachment");

    assert_eq!(
        split_fleet(&mut state, Owner::Player, &detachment, &[0, 1], None),
        Err(Denied::CannotSplitAllShips)
    );

    merge_fleets(&mut state, Owner::Player, &fid("fleet_001"), &detachment)
        .expect("same system");
    assert_eq!(state.player.fleets.len(), 1);
    assert_eq!(state.player.fleets[0].ships.len(), 6);
}

#[test]
fn test_merge_requires_same_system() {
    let content = test_content();
    let mut state = test_state(&content);
    let detachment = split_fleet(&mut state, Owner::Player, &fid("fleet_001"), &[0], None)
        .expect("leaves ships behind");
    state
        .fleet_mut(Owner::Player, &detachment)
        .expect("detachment")
        .location = sid("sys_beta");

    assert_eq!(
        merge_fleets(&mut state, Owner::Player, &fid("fleet_001"), &detachment),
        Err(Denied::FleetsNotCoLocated)
    );
}

#[test]
fn test_disband_refunds_quarter_of_minerals() {
    let content = test_content();
    let mut state = test_state(&content);

    // 3 corvettes at 12 + 2 frigates at 25 + 1 science at 20.
    let refund = disband_fleet(&mut state, &content, Owner::Player, &fid("fleet_001"))
        .expect("own fleet");
    assert!(approx(refund, 106.0), "refund {refund}");
    assert!(approx(state.player.resources.minerals, 406.0));
    assert!(state.player.fleets.is_empty());
}

#[test]
fn test_repair_is_all_or_nothing() {
    let content = test_content();
    let mut state = test_state(&content);
    for ship in &mut state.player.fleets[0].ships {
        if ship.class == ShipClass::Corvette {
            ship.hull = 10.0;
        }
    }

    state.player.resources.minerals = 20.0;
    assert_eq!(
        repair_fleet(&mut state, &content, Owner::Player, &fid("fleet_001")),
        Err(Denied::InsufficientMinerals)
    );

    state.player.resources.minerals = 300.0;
    let cost = repair_fleet(&mut state, &content, Owner::Player, &fid("fleet_001"))
        .expect("affordable");
    assert!(approx(cost, 30.0), "3 corvettes missing 20 hull each");
    assert!(state.player.fleets[0]
        .ships
        .iter()
        .all(|s| approx(s.hull, content.ship_classes.get(s.class).max_hull)));
}

#[test]
fn test_fleet_strength_applies_military_tech() {
    let content = test_content();
    let mut state = test_state(&content);

    // 3*10 + 2*25 + 5 at full hull.
    assert!(approx(fleet_strength(&state.player.fleets[0], &content, 0), 85.0));
    state.player.technology.military.level = 2;
    assert!(
        approx(fleet_strength(&state.player.fleets[0], &content, 2), 110.0),
        "85 * 1.3 floored"
    );
}

#[test]
fn test_patrol_route_must_be_connected() {
    let content = test_content();
    let mut state = test_state(&content);
    state.galaxy.systems.push(StarSystem {
        id: sid("sys_omega"),
        name: "Omega".to_string(),
        x: 0.0,
        y: 0.0,
        star: StarClass::Blue,
        planets: Vec::new(),
        stations: Vec::new(),
        asteroid_belt: None,
    });

    set_patrol(
        &mut state,
        Owner::Player,
        &fid("fleet_001"),
        &[sid("sys_beta"), sid("sys_delta")],
    )
    .expect("lanes exist");
    assert_eq!(state.player.fleets[0].orders, Some(FleetOrders::Patrol));

    assert_eq!(
        set_patrol(
            &mut state,
            Owner::Player,
            &fid("fleet_001"),
            &[sid("sys_beta"), sid("sys_omega")],
        ),
        Err(Denied::InvalidPatrolRoute)
    );
    assert_eq!(
        set_patrol(&mut state, Owner::Player, &fid("fleet_001"), &[]),
        Err(Denied::InvalidPatrolRoute)
    );
}
