//! Long self-play run: the pipeline holds its invariants over many turns.

use std::cell::Cell;
use std::rc::Rc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sim_core::test_fixtures::{base_content, base_state};
use sim_core::{EventLevel, Owner, TurnPhase, TurnPipeline};

#[test]
fn sixty_turn_self_play() {
    let content = base_content();
    let mut state = base_state(&content);
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    let cleanup_runs = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&cleanup_runs);
    let mut pipeline = TurnPipeline::new();
    pipeline.on_phase(TurnPhase::Cleanup, move |_, _| {
        counter.set(counter.get() + 1);
    });

    for turn in 1..=60 {
        let before = state.turn;
        let visibility_before: Vec<_> = [Owner::Player, Owner::Ai]
            .iter()
            .map(|&owner| {
                let faction = state.faction(owner);
                (
                    faction.known_systems.clone(),
                    faction.scanned_systems.clone(),
                    faction.deep_scanned_systems.clone(),
                )
            })
            .collect();
        let events = pipeline.end_turn(&mut state, &content, &mut rng, EventLevel::Normal);
        assert_eq!(state.turn, before + 1);
        assert_eq!(state.turn, turn + 1);

        for (owner, (known, scanned, deep)) in
            [Owner::Player, Owner::Ai].into_iter().zip(&visibility_before)
        {
            let faction = state.faction(owner);
            assert!(
                faction.known_systems.is_superset(known),
                "turn {turn}: {owner} known systems shrank"
            );
            assert!(
                faction.scanned_systems.is_superset(scanned),
                "turn {turn}: {owner} scanned systems shrank"
            );
            assert!(
                faction.deep_scanned_systems.is_superset(deep),
                "turn {turn}: {owner} deep-scanned systems shrank"
            );
        }

        for owner in [Owner::Player, Owner::Ai] {
            let faction = state.faction(owner);
            assert!(
                faction.resources.energy >= 0.0,
                "turn {turn}: {owner} energy went negative"
            );
            assert!(faction.resources.minerals >= 0.0);
            assert!(faction.resources.research >= 0.0);
            assert!(faction.war_exhaustion >= 0.0);
            for fleet in &faction.fleets {
                assert!(!fleet.ships.is_empty(), "empty fleets must be purged");
                for ship in &fleet.ships {
                    assert!(ship.hull >= 1.0);
                }
            }
        }
        assert!(
            state
                .player
                .controlled_systems
                .intersection(&state.ai.controlled_systems)
                .next()
                .is_none(),
            "turn {turn}: a system has two controllers"
        );
        assert!(state.player.notifications.len() <= 20);

        for pair in events.windows(2) {
            assert!(pair[0].id < pair[1].id, "event ids must be monotonic");
        }
    }

    assert_eq!(cleanup_runs.get(), 60, "the hook runs once per turn");
}

#[test]
fn identical_runs_stay_identical() {
    let content = base_content();

    let run = || {
        let mut state = base_state(&content);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut pipeline = TurnPipeline::new();
        for _ in 0..60 {
            pipeline.end_turn(&mut state, &content, &mut rng, EventLevel::Normal);
        }
        serde_json::to_string(&state).expect("state serializes")
    };

    assert_eq!(run(), run());
}
