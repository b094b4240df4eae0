//! Self-playing command-line runner.
//!
//! Generates a galaxy from a seed and plays both factions forward: the
//! built-in opponent runs its own planner inside the turn pipeline, and a
//! small autopilot here stands in for the player so a whole game can be
//! watched from the terminal.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sim_core::{
    colony, economy, events as random_events, excavation, fleet, graph, Event, EventEnvelope,
    EventLevel, ExcavationPhase, FleetId, GameContent, GameState, Owner, PlanetId, StationKind,
    SystemId, TurnPipeline, Victory,
};
use sim_world::{builtin_content, new_game, validate_content};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "sim_cli", about = "Two-faction space strategy self-play runner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the game forward for a fixed number of turns.
    Run {
        #[arg(long, default_value_t = 60)]
        turns: u32,
        /// Seed for galaxy generation and every in-game roll.
        #[arg(long)]
        seed: Option<u64>,
        /// Resume from a saved GameState JSON instead of generating.
        #[arg(long = "state")]
        state_file: Option<String>,
        /// Write the final GameState to this JSON file.
        #[arg(long)]
        save: Option<String>,
        #[arg(long, default_value_t = sim_world::DEFAULT_SYSTEM_COUNT)]
        systems: usize,
        #[arg(long, default_value_t = 10)]
        print_every: u32,
        #[arg(long, default_value = "normal", value_parser = ["normal", "debug"])]
        event_level: String,
    },
}

// ---------------------------------------------------------------------------
// Run loop
// ---------------------------------------------------------------------------

#[allow(clippy::too_many_arguments)]
fn run(
    turns: u32,
    seed: Option<u64>,
    state_file: Option<String>,
    save: Option<String>,
    systems: usize,
    print_every: u32,
    event_level: EventLevel,
) -> Result<()> {
    let content = builtin_content();
    validate_content(&content);

    let resolved_seed = seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(resolved_seed);

    let mut state: GameState = if let Some(path) = state_file {
        let json = std::fs::read_to_string(&path)
            .with_context(|| format!("reading state file: {path}"))?;
        serde_json::from_str(&json).with_context(|| format!("parsing state file: {path}"))?
    } else {
        new_game(&content, systems, &mut rng)
    };

    println!(
        "Starting run: turns={turns} seed={resolved_seed} systems={} opponent={} content_version={}",
        state.galaxy.systems.len(),
        state.ai.name,
        content.content_version,
    );
    println!("{}", "-".repeat(80));

    let mut pipeline = TurnPipeline::new();
    let mut verdict: Option<Victory> = None;

    for _ in 0..turns {
        play_player_turn(&mut state, &content, &mut rng);
        let events = pipeline.end_turn(&mut state, &content, &mut rng, event_level);

        for envelope in &events {
            tracing::debug!(turn = envelope.turn, event = ?envelope.event, "turn event");
            match &envelope.event {
                Event::WarDeclared { by } => println!("*** WAR DECLARED by {by} ***"),
                Event::PeaceConcluded => println!("*** PEACE CONCLUDED ***"),
                Event::TechLevelGained {
                    owner,
                    category,
                    level,
                } => println!("*** {owner} reaches {category} level {level} ***"),
                Event::MetaChainCompleted { owner } => {
                    println!("*** META CHAIN COMPLETED by {owner} ***");
                }
                _ => {}
            }
        }

        if state.turn % print_every == 0 {
            print_status(&state);
        }

        verdict = economy::check_win_condition(&state);
        if verdict.is_some() {
            break;
        }
    }

    println!("{}", "-".repeat(80));
    println!("Done. Final state at turn {}:", state.turn);
    print_status(&state);
    match verdict {
        Some(victory) => println!("Winner: {} ({:?})", victory.winner, victory.reason),
        None => println!("No victory within {turns} turns."),
    }

    if let Some(path) = save {
        let json = serde_json::to_string_pretty(&state).context("serializing final state")?;
        std::fs::write(&path, json).with_context(|| format!("writing {path}"))?;
        println!("Final state saved to {path}");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Player autopilot
// ---------------------------------------------------------------------------

/// Stands in for a human: answers pending events and dig choices, keeps
/// the fleets exploring, and colonizes when the treasury allows. Every
/// refusal is simply skipped; the autopilot retries next turn.
fn play_player_turn(state: &mut GameState, content: &GameContent, rng: &mut ChaCha8Rng) {
    let mut events: Vec<EventEnvelope> = Vec::new();

    // Answer the pending narrative event, preferring a random choice but
    // falling back past options we cannot afford.
    if let Some(pending) = state.pending_event.clone() {
        if let Some(def) = content.event(&pending.event) {
            for choice in pick_order(rng, def.choices.len()) {
                match random_events::resolve_event(state, content, choice, rng, &mut events) {
                    Ok(outcome) => {
                        tracing::info!(event = %pending.event, choice, %outcome, "event resolved");
                        break;
                    }
                    Err(_) => continue,
                }
            }
        }
    }

    // Digs that have filled their layer threshold wait on a choice.
    let ready: Vec<(SystemId, PlanetId)> = state
        .excavations
        .iter()
        .filter(|d| d.owner == Owner::Player && d.phase == ExcavationPhase::ReadyForChoice)
        .map(|d| (d.system.clone(), d.planet.clone()))
        .collect();
    for (system, planet) in ready {
        let choice_count = state
            .excavation(&system, &planet)
            .and_then(|dig| {
                let def = content.site(&dig.site)?;
                let layer = def.layers.get(dig.current_layer as usize - 1)?;
                Some(layer.choices.len())
            })
            .unwrap_or(0);
        if choice_count == 0 {
            continue;
        }
        for choice in pick_order(rng, choice_count) {
            if let Ok(outcome) =
                excavation::make_choice(state, content, &system, &planet, choice, &mut events)
            {
                tracing::info!(%system, %planet, choice, outcome = %outcome.outcome, "layer resolved");
                break;
            }
        }
    }

    // Exploration: scan wherever a science-carrying fleet sits, then push
    // idle fleets down a random hyperlane.
    let fleet_ids: Vec<FleetId> = state.player.fleets.iter().map(|f| f.id.clone()).collect();
    for fleet_id in fleet_ids {
        let _ = fleet::scan_system(state, Owner::Player, &fleet_id, &mut events);
        let _ = fleet::deep_scan_system(state, content, Owner::Player, &fleet_id, &mut events);
        let Some(current) = state.fleet(Owner::Player, &fleet_id) else {
            continue;
        };
        if current.destination.is_none() {
            let neighbors: Vec<SystemId> = graph::neighbors(&current.location, &state.galaxy)
                .into_iter()
                .cloned()
                .collect();
            if !neighbors.is_empty() {
                let target = neighbors[rng.gen_range(0..neighbors.len())].clone();
                let _ = fleet::set_destination(state, Owner::Player, &fleet_id, &target);
            }
        }
    }

    // Break ground on every discovered site we have deep-scanned.
    let discovered: Vec<(SystemId, PlanetId)> = state
        .galaxy
        .systems
        .iter()
        .filter(|s| state.player.deep_scanned_systems.contains(&s.id))
        .flat_map(|s| s.planets.iter().map(move |p| (s, p)))
        .filter(|(_, p)| {
            p.site
                .as_ref()
                .is_some_and(|site| site.discovered && !site.completed)
        })
        .map(|(s, p)| (s.id.clone(), p.id.clone()))
        .collect();
    for (system, planet) in discovered {
        let _ =
            excavation::start_excavation(state, content, Owner::Player, &system, &planet, &mut events);
    }

    // Expand when the treasury allows.
    let cost = content.constants.colonize_cost;
    if state.player.resources.minerals >= cost.minerals
        && state.player.resources.energy >= cost.energy
    {
        let candidate = state
            .galaxy
            .systems
            .iter()
            .filter(|s| state.player.deep_scanned_systems.contains(&s.id))
            .flat_map(|s| s.planets.iter().map(move |p| (s, p)))
            .find(|(_, p)| p.habitable && p.colonized_by.is_none())
            .map(|(s, p)| (s.id.clone(), p.id.clone()));
        if let Some((system, planet)) = candidate {
            if fleet::system_has_shipyard(state, Owner::Player, &system) {
                let _ =
                    colony::colonize(state, content, Owner::Player, &system, &planet, &mut events);
            } else {
                // Settling a system needs a yard on site first.
                let _ = colony::build_station(
                    state,
                    content,
                    Owner::Player,
                    &system,
                    StationKind::Shipyard,
                );
            }
        }
    }
}

/// Visits all indices once, starting from a random one.
fn pick_order(rng: &mut impl Rng, count: usize) -> impl Iterator<Item = usize> {
    let start = if count == 0 { 0 } else { rng.gen_range(0..count) };
    (0..count).map(move |i| (start + i) % count)
}

// ---------------------------------------------------------------------------
// Status output
// ---------------------------------------------------------------------------

fn print_status(state: &GameState) {
    let digs_active = state.excavations.iter().filter(|d| d.active()).count();
    println!(
        "[turn={turn:03} phase={phase:?}]  stance={stance:?} trust={trust:.0}  \
         digs={digs_active}  chain={chain}/{chain_total}",
        turn = state.turn,
        phase = state.game_phase,
        stance = state.diplomacy.stance,
        trust = state.diplomacy.trust,
        chain = state.meta_chain.discovered.len(),
        chain_total = 3,
    );
    for (label, faction) in [("player", &state.player), ("ai", &state.ai)] {
        println!(
            "  {label:6} {name:24} e={energy:7.1} m={minerals:7.1} r={research:7.1}  \
             colonies={colonies} fleets={fleets} systems={systems}",
            name = faction.name,
            energy = faction.resources.energy,
            minerals = faction.resources.minerals,
            research = faction.resources.research,
            colonies = faction.colonies.len(),
            fleets = faction.fleets.len(),
            systems = faction.controlled_systems.len(),
        );
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            turns,
            seed,
            state_file,
            save,
            systems,
            print_every,
            event_level,
        } => {
            let level = match event_level.as_str() {
                "debug" => EventLevel::Debug,
                _ => EventLevel::Normal,
            };
            run(turns, seed, state_file, save, systems, print_every, level)?;
        }
    }
    Ok(())
}
