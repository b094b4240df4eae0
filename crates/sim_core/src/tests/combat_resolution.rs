use super::*;
use crate::combat::resolve_combat;

fn go_to_war(state: &mut GameState) {
    state.diplomacy.stance = Stance::War;
}

#[test]
fn test_no_combat_without_both_sides() {
    let content = test_content();
    let mut state = test_state(&content);
    let mut rng = make_rng();
    let mut events = Vec::new();
    go_to_war(&mut state);

    // Only the player holds sys_alpha.
    let report = resolve_combat(
        &mut state,
        &content,
        &sid("sys_alpha"),
        &mut rng,
        EventLevel::Normal,
        &mut events,
    );
    assert!(report.is_none());
    assert!(state.combat_log.is_empty());
}

#[test]
fn test_empty_fleets_do_not_fight() {
    let content = test_content();
    let mut state = test_state(&content);
    let mut rng = make_rng();
    let mut events = Vec::new();
    go_to_war(&mut state);

    state.ai.fleets[0].location = sid("sys_alpha");
    state.ai.fleets[0].ships.clear();
    let report = resolve_combat(
        &mut state,
        &content,
        &sid("sys_alpha"),
        &mut rng,
        EventLevel::Normal,
        &mut events,
    );
    assert!(report.is_none());
}

#[test]
fn test_engagement_conserves_ships() {
    let content = test_content();
    let mut state = test_state(&content);
    let mut rng = make_rng();
    let mut events = Vec::new();
    go_to_war(&mut state);
    state.ai.fleets[0].location = sid("sys_alpha");

    let report = resolve_combat(
        &mut state,
        &content,
        &sid("sys_alpha"),
        &mut rng,
        EventLevel::Normal,
        &mut events,
    )
    .expect("both sides present");

    assert_eq!(report.player_losses.total() + report.player_remaining, 6);
    assert_eq!(report.ai_losses.total() + report.ai_remaining, 6);
    assert!(approx(
        state.player.war_exhaustion,
        f64::from(report.player_losses.total()) * 2.0
    ));
    assert!(approx(
        state.ai.war_exhaustion,
        f64::from(report.ai_losses.total()) * 2.0
    ));
    assert_eq!(state.combat_log.len(), 1);
    for fleet in state.player.fleets.iter().chain(state.ai.fleets.iter()) {
        for ship in &fleet.ships {
            assert!(ship.hull >= 1.0, "survivors keep at least 1 hull");
            assert!(ship.hull <= content.ship_classes.get(ship.class).max_hull);
        }
    }
    assert!(events
        .iter()
        .any(|e| matches!(e.event, Event::CombatResolved { .. })));
    assert!(
        !events
            .iter()
            .any(|e| matches!(e.event, Event::CombatRoll { .. })),
        "roll events are debug-only"
    );
    let victory_note = state
        .player
        .notifications
        .iter()
        .any(|n| n.message.contains("at Sol!"));
    assert!(victory_note, "combat outcome is reported to the player");
}

#[test]
fn test_strength_modifiers_in_report() {
    let content = test_content();
    let mut state = test_state(&content);
    let mut rng = make_rng();
    let mut events = Vec::new();
    go_to_war(&mut state);

    // Three corvettes defending the homeworld against a lone cruiser.
    state.player.fleets[0].ships = (0..3)
        .map(|i| Ship {
            id: ShipId(format!("ship_9{i:03}")),
            class: ShipClass::Corvette,
            hull: 30.0,
        })
        .collect();
    state.ai.fleets[0].location = sid("sys_alpha");
    state.ai.fleets[0].ships = smallvec::smallvec![Ship {
        id: ShipId("ship_9100".to_string()),
        class: ShipClass::Cruiser,
        hull: 120.0,
    }];

    let report = resolve_combat(
        &mut state,
        &content,
        &sid("sys_alpha"),
        &mut rng,
        EventLevel::Debug,
        &mut events,
    )
    .expect("both sides present");

    // Defender bonus on 30 base; cruiser line bonus on 60 base.
    assert!(approx(report.player_strength, 34.0));
    assert!(approx(report.ai_strength, 69.0));
    assert!(events
        .iter()
        .any(|e| matches!(e.event, Event::CombatRoll { .. })));
}
