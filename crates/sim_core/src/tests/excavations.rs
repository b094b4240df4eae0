use super::*;
use crate::excavation::{
    advance_excavations, make_choice, narrative_for_layer, pause_excavation, resume_excavation,
    start_excavation,
};

fn start_beta_dig(state: &mut GameState, content: &GameContent) {
    discover_site(state, "sys_beta", "pl_beta_1");
    let mut events = Vec::new();
    start_excavation(
        state,
        content,
        Owner::Player,
        &sid("sys_beta"),
        &pid("pl_beta_1"),
        &mut events,
    )
    .expect("discovered site");
}

fn force_ready(state: &mut GameState) {
    let dig = state
        .excavation_mut(&sid("sys_beta"), &pid("pl_beta_1"))
        .expect("active dig");
    dig.phase = ExcavationPhase::ReadyForChoice;
}

#[test]
fn test_start_requires_discovered_site() {
    let content = test_content();
    let mut state = test_state(&content);
    let mut events = Vec::new();

    assert_eq!(
        start_excavation(
            &mut state,
            &content,
            Owner::Player,
            &sid("sys_beta"),
            &pid("pl_beta_1"),
            &mut events,
        ),
        Err(Denied::SiteNotDiscovered)
    );
    assert_eq!(
        start_excavation(
            &mut state,
            &content,
            Owner::Player,
            &sid("sys_alpha"),
            &pid("pl_alpha_1"),
            &mut events,
        ),
        Err(Denied::NoSiteOnPlanet)
    );

    discover_site(&mut state, "sys_beta", "pl_beta_1");
    start_excavation(
        &mut state,
        &content,
        Owner::Player,
        &sid("sys_beta"),
        &pid("pl_beta_1"),
        &mut events,
    )
    .expect("discovered site");
    assert_eq!(
        start_excavation(
            &mut state,
            &content,
            Owner::Player,
            &sid("sys_beta"),
            &pid("pl_beta_1"),
            &mut events,
        ),
        Err(Denied::ExcavationInProgress)
    );
    assert!(events
        .iter()
        .any(|e| matches!(e.event, Event::ExcavationStarted { .. })));
}

#[test]
fn test_progress_accrues_from_research_income() {
    let content = test_content();
    let mut state = test_state(&content);
    let mut events = Vec::new();
    start_beta_dig(&mut state, &content);
    state.player.income.research = 20.0;

    advance_excavations(&mut state, &content, Owner::Player, &mut events);
    {
        let dig = state
            .excavation(&sid("sys_beta"), &pid("pl_beta_1"))
            .expect("active dig");
        assert!(approx(dig.progress, 10.0), "half of research income");
        assert_eq!(dig.phase, ExcavationPhase::Accumulating);
    }

    advance_excavations(&mut state, &content, Owner::Player, &mut events);
    let dig = state
        .excavation(&sid("sys_beta"), &pid("pl_beta_1"))
        .expect("active dig");
    assert_eq!(dig.phase, ExcavationPhase::ReadyForChoice, "layer 1 fills at 20");
    assert!(events
        .iter()
        .any(|e| matches!(e.event, Event::ExcavationPhaseChanged { .. })));
    assert!(state
        .player
        .notifications
        .iter()
        .any(|n| n.message.contains("reached layer 1")));
}

#[test]
fn test_paused_digs_do_not_advance() {
    let content = test_content();
    let mut state = test_state(&content);
    let mut events = Vec::new();
    start_beta_dig(&mut state, &content);
    state.player.income.research = 20.0;

    pause_excavation(&mut state, &sid("sys_beta"), &pid("pl_beta_1")).expect("active dig");
    advance_excavations(&mut state, &content, Owner::Player, &mut events);
    assert!(approx(
        state
            .excavation(&sid("sys_beta"), &pid("pl_beta_1"))
            .expect("active dig")
            .progress,
        0.0
    ));

    resume_excavation(&mut state, &sid("sys_beta"), &pid("pl_beta_1")).expect("active dig");
    advance_excavations(&mut state, &content, Owner::Player, &mut events);
    assert!(approx(
        state
            .excavation(&sid("sys_beta"), &pid("pl_beta_1"))
            .expect("active dig")
            .progress,
        10.0
    ));
}

#[test]
fn test_choice_applies_rewards_and_opens_next_layer() {
    let content = test_content();
    let mut state = test_state(&content);
    let mut events = Vec::new();
    start_beta_dig(&mut state, &content);

    assert_eq!(
        make_choice(&mut state, &content, &sid("sys_beta"), &pid("pl_beta_1"), 0, &mut events),
        Err(Denied::LayerNotReady)
    );

    force_ready(&mut state);
    let outcome =
        make_choice(&mut state, &content, &sid("sys_beta"), &pid("pl_beta_1"), 0, &mut events)
            .expect("layer ready");
    assert!(!outcome.site_completed);
    assert!(approx(state.player.resources.minerals, 325.0));
    assert!(approx(state.player.resources.research, 110.0));

    let dig = state
        .excavation(&sid("sys_beta"), &pid("pl_beta_1"))
        .expect("active dig");
    assert_eq!(dig.current_layer, 2);
    assert_eq!(dig.phase, ExcavationPhase::Accumulating);
    assert!(approx(dig.progress, 0.0));
    assert_eq!(dig.narrative_log.len(), 1);
    assert!(
        dig.narrative_log[0].narrative.contains("Vega I"),
        "placeholders are substituted"
    );
    assert!(events
        .iter()
        .any(|e| matches!(e.event, Event::ExcavationChoiceMade { .. })));
}

#[test]
fn test_final_layer_completes_the_site() {
    let content = test_content();
    let mut state = test_state(&content);
    let mut events = Vec::new();
    start_beta_dig(&mut state, &content);
    force_ready(&mut state);
    make_choice(&mut state, &content, &sid("sys_beta"), &pid("pl_beta_1"), 1, &mut events)
        .expect("layer 1");
    force_ready(&mut state);

    let outcome =
        make_choice(&mut state, &content, &sid("sys_beta"), &pid("pl_beta_1"), 0, &mut events)
            .expect("layer 2");
    assert!(outcome.site_completed);
    // Layer rewards 20e/30r, completion bonus 50e/75r, layer 1 gave 25r.
    assert!(approx(state.player.resources.energy, 370.0));
    assert!(approx(state.player.resources.research, 230.0));
    assert!(approx(state.player.technology.subterfuge.progress, 30.0));
    assert_eq!(state.meta_chain.discovered, vec!["echo_alpha".to_string()]);
    assert!(!state.meta_chain.completed);

    let dig = state
        .excavation(&sid("sys_beta"), &pid("pl_beta_1"))
        .expect("finished dig");
    assert_eq!(dig.phase, ExcavationPhase::Completed);
    assert_eq!(dig.completed_turn, Some(1));
    let planet = state.planet(&sid("sys_beta"), &pid("pl_beta_1")).expect("fixture");
    assert!(planet.site.as_ref().expect("site").completed);

    // A completed site cannot be dug again.
    state.excavations.clear();
    assert_eq!(
        start_excavation(
            &mut state,
            &content,
            Owner::Player,
            &sid("sys_beta"),
            &pid("pl_beta_1"),
            &mut events,
        ),
        Err(Denied::SiteCompleted)
    );
}

#[test]
fn test_silencing_the_transmitter_has_fallout() {
    let content = test_content();
    let mut state = test_state(&content);
    let mut events = Vec::new();
    start_beta_dig(&mut state, &content);
    force_ready(&mut state);
    make_choice(&mut state, &content, &sid("sys_beta"), &pid("pl_beta_1"), 1, &mut events)
        .expect("layer 1");
    force_ready(&mut state);

    let outcome =
        make_choice(&mut state, &content, &sid("sys_beta"), &pid("pl_beta_1"), 1, &mut events)
            .expect("layer 2");
    assert_eq!(outcome.triggered_event.as_deref(), Some("precursor_signal"));
    assert_eq!(
        state.pending_event.as_ref().map(|p| p.event.as_str()),
        Some("precursor_signal"),
        "fallout event is presented immediately"
    );
    // Layer 1 gave 25 research; silencing costs 10 of it.
    assert!(approx(state.player.resources.research, 115.0));
}

#[test]
fn test_meta_chain_completion_pays_once() {
    let content = test_content();
    let mut state = test_state(&content);
    let mut events = Vec::new();

    start_beta_dig(&mut state, &content);
    force_ready(&mut state);
    make_choice(&mut state, &content, &sid("sys_beta"), &pid("pl_beta_1"), 1, &mut events)
        .expect("layer 1");
    force_ready(&mut state);
    make_choice(&mut state, &content, &sid("sys_beta"), &pid("pl_beta_1"), 0, &mut events)
        .expect("echo_alpha");

    discover_site(&mut state, "sys_gamma", "pl_gamma_2");
    start_excavation(
        &mut state,
        &content,
        Owner::Player,
        &sid("sys_gamma"),
        &pid("pl_gamma_2"),
        &mut events,
    )
    .expect("discovered site");
    {
        let dig = state
            .excavation_mut(&sid("sys_gamma"), &pid("pl_gamma_2"))
            .expect("active dig");
        dig.phase = ExcavationPhase::ReadyForChoice;
    }
    let energy_before = state.player.resources.energy;
    make_choice(&mut state, &content, &sid("sys_gamma"), &pid("pl_gamma_2"), 0, &mut events)
        .expect("echo_beta");

    assert!(state.meta_chain.completed);
    assert!(
        approx(state.player.resources.energy, energy_before + 500.0),
        "chain reward on top of site payouts"
    );
    assert!(approx(state.player.technology.military.progress, 100.0));
    assert!(approx(state.player.technology.economy.progress, 100.0));
    assert!(approx(state.player.technology.subterfuge.progress, 130.0));
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e.event, Event::MetaChainCompleted { .. }))
            .count(),
        1
    );
}

#[test]
fn test_cross_reference_substitution() {
    let content = test_content();
    let state = test_state(&content);
    let site = content.site(&SiteId("site_echo_station".to_string())).expect("fixture");

    let text = narrative_for_layer(
        &state,
        &content,
        &sid("sys_beta"),
        &pid("pl_beta_1"),
        &site.layers[1],
    );
    assert!(text.contains("The Buried Archive"));
    assert!(!text.contains("{CROSS_REF"));
}
