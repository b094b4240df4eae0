use super::*;
use crate::economy::{
    ai_stipend, check_win_condition, colony_defense, colony_output, faction_economy,
    max_population,
};

#[test]
fn test_homeworld_output_math() {
    let content = test_content();
    let state = test_state(&content);
    let colony = &state.player.colonies[0];

    // 2 generator districts + power plant: 8 + 6 energy; 2 mining: 8 minerals;
    // research district + lab: 4 + 6 research. Pop 5 gives x1.5, happiness
    // 0.85 gives x0.925, each multiplier floored.
    let output = colony_output(colony, &content);
    assert!(approx(output.gross.energy, 19.0), "gross energy {}", output.gross.energy);
    assert!(approx(output.gross.minerals, 11.0));
    assert!(approx(output.gross.research, 13.0));
    assert!(approx(output.upkeep.energy, 16.0));
    assert!(approx(output.upkeep.minerals, 4.0));
    assert!(approx(output.net.energy, 3.0));
    assert!(approx(output.net.minerals, 7.0));
    assert!(approx(output.net.research, 13.0), "research is not reduced by upkeep");
}

#[test]
fn test_faction_economy_includes_fleet_upkeep() {
    let content = test_content();
    let state = test_state(&content);

    // 3 corvettes + 2 frigates + 1 science vessel: 3*1 + 2*2 + 2 = 9 energy.
    let eco = faction_economy(&state, &content, Owner::Player);
    assert!(approx(eco.upkeep.energy, 9.0), "fleet upkeep {}", eco.upkeep.energy);
    assert!(approx(eco.income.energy, 3.0));
    assert!(approx(eco.income.minerals, 7.0));
    assert!(approx(eco.income.research, 13.0));
}

#[test]
fn test_station_income_requires_control_and_completion() {
    let content = test_content();
    let mut state = test_state(&content);
    state.galaxy.systems[0].stations.push(Station {
        id: StationId("station_001".to_string()),
        kind: StationKind::Research,
        owner: Owner::Player,
        is_building: true,
        build_progress: 0,
    });

    let building = faction_economy(&state, &content, Owner::Player);
    assert!(
        approx(building.income.research, 13.0),
        "station under construction must not produce"
    );

    state.galaxy.systems[0].stations[0].is_building = false;
    let finished = faction_economy(&state, &content, Owner::Player);
    assert!(approx(finished.income.research, 17.0));
    assert!(approx(finished.upkeep.energy, 10.0), "station adds energy upkeep");
}

#[test]
fn test_max_population_follows_city_districts() {
    let content = test_content();
    let state = test_state(&content);
    // 2 city districts: 2 + 2*3 = 8.
    assert!(approx(max_population(&state.player.colonies[0], &content), 8.0));
}

#[test]
fn test_colony_defense_scales_with_population() {
    let content = test_content();
    let mut state = test_state(&content);
    // 10 base + 5 pop * 5.
    assert!(approx(colony_defense(&state.player.colonies[0], &content), 35.0));

    state.player.colonies[0].buildings[3] = Some(BuildingKind::PlanetaryDefense);
    assert!(approx(colony_defense(&state.player.colonies[0], &content), 85.0));
}

#[test]
fn test_majority_control_wins() {
    let content = test_content();
    let mut state = test_state(&content);
    assert!(check_win_condition(&state).is_none());

    // 2 of 4 systems is a majority.
    state.player.controlled_systems.insert(sid("sys_beta"));
    let victory = check_win_condition(&state).expect("majority should win");
    assert_eq!(victory.winner, Owner::Player);
    assert_eq!(victory.reason, VictoryReason::MajorityControl);
}

#[test]
fn test_elimination_win() {
    let content = test_content();
    let mut state = test_state(&content);
    state.ai.colonies.clear();
    state.ai.fleets.clear();

    let victory = check_win_condition(&state).expect("eliminated AI loses");
    assert_eq!(victory.winner, Owner::Player);
    assert_eq!(victory.reason, VictoryReason::Elimination);
}

#[test]
fn test_ai_stipend_scales_with_colonies() {
    let content = test_content();
    let state = test_state(&content);
    let stipend = ai_stipend(&state.ai);
    assert!(approx(stipend.energy, 15.0));
    assert!(approx(stipend.minerals, 15.0));
    assert!(approx(stipend.research, 8.0));
}
