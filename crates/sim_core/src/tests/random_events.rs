use super::*;
use crate::content::EventCondition;
use crate::events::{maybe_trigger_event, resolve_event, trigger_specific_event};

#[test]
fn test_minimum_gap_blocks_triggering() {
    let content = test_content();
    let mut state = test_state(&content);
    let mut rng = make_rng();
    let mut events = Vec::new();

    // Turn 1 with last_event_turn 0 is well inside the 10-turn gap.
    for _ in 0..200 {
        maybe_trigger_event(&mut state, &content, &mut rng, &mut events);
    }
    assert!(state.pending_event.is_none());
    assert!(events.is_empty());
}

#[test]
fn test_events_fire_once_gap_has_passed() {
    let content = test_content();
    let mut state = test_state(&content);
    let mut rng = make_rng();
    let mut events = Vec::new();
    state.turn = 20;

    let mut fired = false;
    for _ in 0..500 {
        maybe_trigger_event(&mut state, &content, &mut rng, &mut events);
        if state.pending_event.is_some() {
            fired = true;
            break;
        }
    }
    assert!(fired, "15% per roll over 500 attempts");
    assert_eq!(state.last_event_turn, 20);
    assert!(events
        .iter()
        .any(|e| matches!(e.event, Event::EventTriggered { .. })));
}

#[test]
fn test_resolve_applies_effects_and_clears_pending() {
    let content = test_content();
    let mut state = test_state(&content);
    let mut rng = make_rng();
    let mut events = Vec::new();

    assert!(trigger_specific_event(&mut state, &content, "solar_flare", &mut events));
    assert_eq!(
        state.pending_event.as_ref().map(|p| p.event.as_str()),
        Some("solar_flare")
    );

    let outcome =
        resolve_event(&mut state, &content, 0, &mut rng, &mut events).expect("no requirement");
    assert!(!outcome.is_empty());
    assert!(approx(state.player.resources.minerals, 280.0));
    assert!(state.pending_event.is_none());
    assert!(events
        .iter()
        .any(|e| matches!(e.event, Event::EventResolved { .. })));
}

#[test]
fn test_choice_requirements_gate_without_consuming() {
    let content = test_content();
    let mut state = test_state(&content);
    let mut rng = make_rng();
    let mut events = Vec::new();
    state.player.resources.energy = 10.0;

    trigger_specific_event(&mut state, &content, "solar_flare", &mut events);
    assert_eq!(
        resolve_event(&mut state, &content, 1, &mut rng, &mut events),
        Err(Denied::InsufficientEnergy)
    );
    assert!(state.pending_event.is_some(), "failed choice keeps the event open");

    state.player.resources.energy = 40.0;
    resolve_event(&mut state, &content, 1, &mut rng, &mut events).expect("requirement met");
    assert!(approx(state.player.resources.energy, 10.0), "shielding costs 30 energy");
}

#[test]
fn test_resolve_without_pending_event() {
    let content = test_content();
    let mut state = test_state(&content);
    let mut rng = make_rng();
    let mut events = Vec::new();

    assert_eq!(
        resolve_event(&mut state, &content, 0, &mut rng, &mut events),
        Err(Denied::NoPendingEvent)
    );

    trigger_specific_event(&mut state, &content, "solar_flare", &mut events);
    assert_eq!(
        resolve_event(&mut state, &content, 9, &mut rng, &mut events),
        Err(Denied::InvalidChoice)
    );
}

#[test]
fn test_stance_condition() {
    assert!(EventCondition::AiStanceNotFriendly.holds(Stance::Neutral));
    assert!(EventCondition::AiStanceNotFriendly.holds(Stance::War));
    assert!(!EventCondition::AiStanceNotFriendly.holds(Stance::Friendly));
}

#[test]
fn test_spy_event_effects() {
    let content = test_content();
    let mut state = test_state(&content);
    let mut rng = make_rng();
    let mut events = Vec::new();

    trigger_specific_event(&mut state, &content, "spy_detected", &mut events);
    resolve_event(&mut state, &content, 0, &mut rng, &mut events).expect("valid choice");
    assert!(approx(state.player.technology.subterfuge.progress, 20.0));

    trigger_specific_event(&mut state, &content, "spy_detected", &mut events);
    resolve_event(&mut state, &content, 1, &mut rng, &mut events).expect("valid choice");
    assert!(approx(state.diplomacy.trust, 40.0));
}

#[test]
fn test_signal_event_reveals_a_hidden_site() {
    let content = test_content();
    let mut state = test_state(&content);
    let mut rng = make_rng();
    let mut events = Vec::new();

    trigger_specific_event(&mut state, &content, "precursor_signal", &mut events);
    resolve_event(&mut state, &content, 0, &mut rng, &mut events).expect("valid choice");

    assert!(approx(state.player.resources.research, 200.0));
    // sys_beta holds the first undiscovered site in galaxy order.
    assert!(state.player.deep_scanned_systems.contains(&sid("sys_beta")));
    let planet = state.planet(&sid("sys_beta"), &pid("pl_beta_1")).expect("fixture");
    assert!(planet.site.as_ref().expect("site").discovered);
    assert!(events
        .iter()
        .any(|e| matches!(e.event, Event::SiteDiscovered { .. })));
}
