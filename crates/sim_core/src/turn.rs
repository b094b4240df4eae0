//! The turn pipeline.
//!
//! `end_turn` runs the six phases in a fixed order: production, movement,
//! combat, events, AI, cleanup. After each phase's built-in work, any hooks
//! registered for that phase run. Only then does the turn counter advance.

use rand::Rng;

use crate::content::GameContent;
use crate::types::{
    Event, EventEnvelope, EventLevel, GamePhase, GameState, NoteKind, Owner, Stance,
    SystemId,
};
use crate::{ai, colony, diplomacy, economy, events, excavation, fleet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnPhase {
    Production,
    Movement,
    Combat,
    Events,
    Ai,
    Cleanup,
}

pub const PHASE_ORDER: [TurnPhase; 6] = [
    TurnPhase::Production,
    TurnPhase::Movement,
    TurnPhase::Combat,
    TurnPhase::Events,
    TurnPhase::Ai,
    TurnPhase::Cleanup,
];

type PhaseHook = Box<dyn FnMut(&mut GameState, &GameContent)>;

/// Owns the per-phase hook registry. The pipeline itself is stateless
/// beyond that; all simulation state lives in `GameState`.
#[derive(Default)]
pub struct TurnPipeline {
    hooks: Vec<(TurnPhase, PhaseHook)>,
}

impl TurnPipeline {
    pub fn new() -> TurnPipeline {
        TurnPipeline::default()
    }

    /// Registers a hook to run after the built-in work of `phase`.
    /// Hooks run in registration order.
    pub fn on_phase(
        &mut self,
        phase: TurnPhase,
        hook: impl FnMut(&mut GameState, &GameContent) + 'static,
    ) {
        self.hooks.push((phase, Box::new(hook)));
    }

    /// Runs one full turn and returns the events it produced.
    pub fn end_turn(
        &mut self,
        state: &mut GameState,
        content: &GameContent,
        rng: &mut impl Rng,
        event_level: EventLevel,
    ) -> Vec<EventEnvelope> {
        let mut out = Vec::new();
        for phase in PHASE_ORDER {
            match phase {
                TurnPhase::Production => production_phase(state, content, &mut out),
                TurnPhase::Movement => movement_phase(state, &mut out),
                TurnPhase::Combat => combat_phase(state, content, rng, event_level, &mut out),
                TurnPhase::Events => events::maybe_trigger_event(state, content, rng, &mut out),
                TurnPhase::Ai => ai_phase(state, content, rng, event_level, &mut out),
                TurnPhase::Cleanup => cleanup_phase(state, content, &mut out),
            }
            for (hook_phase, hook) in &mut self.hooks {
                if *hook_phase == phase {
                    hook(state, content);
                }
            }
        }
        state.turn += 1;
        update_game_phase(state, &mut out);
        out
    }
}

// ---------------------------------------------------------------------------
// Production
// ---------------------------------------------------------------------------

fn production_phase(state: &mut GameState, content: &GameContent, out: &mut Vec<EventEnvelope>) {
    // Player construction finishes first so new structures earn this turn.
    colony::process_build_queues(state, content, Owner::Player, out);

    let eco = economy::faction_economy(state, content, Owner::Player);
    state.player.income = eco.income;
    state.player.upkeep = eco.upkeep;
    state.player.resources.energy += eco.income.energy - eco.upkeep.energy;
    state.player.resources.minerals += eco.income.minerals - eco.upkeep.minerals;
    state.player.resources.research += eco.income.research;
    if state.player.resources.energy < 0.0 {
        state.player.resources.energy = 0.0;
        state.notify(
            "Energy deficit! Fleet effectiveness reduced.",
            NoteKind::Warning,
        );
        out.push(crate::emit(
            &mut state.counters,
            state.turn,
            Event::EnergyDeficit {
                owner: Owner::Player,
            },
        ));
    }
    if state.player.resources.minerals < 0.0 {
        state.player.resources.minerals = 0.0;
    }

    process_research(state, content, Owner::Player, out);
    colony::grow_colonies(state, content, Owner::Player);
    excavation::advance_excavations(state, content, Owner::Player, out);
    colony::tick_stations(state, content, out);

    // AI production is a flat stipend per colony.
    let stipend = economy::ai_stipend(&state.ai);
    state.ai.income = stipend;
    state.ai.upkeep = crate::types::Upkeep::default();
    state.ai.resources.add(&stipend);
    process_research(state, content, Owner::Ai, out);
    colony::grow_colonies(state, content, Owner::Ai);
    excavation::advance_excavations(state, content, Owner::Ai, out);
}

/// Splits the research stockpile across tracks and handles tier-ups. The
/// stockpile is read, not spent; a deep reserve accelerates every track.
/// The player only progresses tracks flagged as researching; the AI
/// spreads across all three.
fn process_research(
    state: &mut GameState,
    content: &GameContent,
    owner: Owner,
    out: &mut Vec<EventEnvelope>,
) {
    let share = (state.faction(owner).resources.research / content.constants.research_split)
        .floor();
    if share <= 0.0 {
        return;
    }
    let base = content.constants.research_tier_base;
    let mut leveled = Vec::new();
    {
        let technology = &mut state.faction_mut(owner).technology;
        for category in crate::types::TechCategory::ALL {
            let track = technology.track_mut(category);
            if owner == Owner::Player && !track.researching {
                continue;
            }
            track.progress += share;
            let threshold = base * f64::from((track.level + 1).pow(2));
            if track.progress >= threshold {
                track.level += 1;
                track.progress = 0.0;
                track.researching = false;
                leveled.push((category, track.level));
            }
        }
    }
    for (category, level) in leveled {
        if owner == Owner::Player {
            state.notify(
                format!("Breakthrough: {category} technology reaches level {level}"),
                NoteKind::Success,
            );
        }
        out.push(crate::emit(
            &mut state.counters,
            state.turn,
            Event::TechLevelGained {
                owner,
                category,
                level,
            },
        ));
    }
}

// ---------------------------------------------------------------------------
// Movement
// ---------------------------------------------------------------------------

/// Only player fleets move here; the opponent's move in the AI phase, so
/// an inbound enemy fleet cannot arrive and fight in the same turn.
fn movement_phase(state: &mut GameState, out: &mut Vec<EventEnvelope>) {
    fleet::advance_fleets(state, Owner::Player, out);
}

// ---------------------------------------------------------------------------
// AI
// ---------------------------------------------------------------------------

fn ai_phase(
    state: &mut GameState,
    content: &GameContent,
    rng: &mut impl Rng,
    event_level: EventLevel,
    out: &mut Vec<EventEnvelope>,
) {
    ai::take_turn(state, content, rng, event_level, out);
    fleet::advance_fleets(state, Owner::Ai, out);
}

// ---------------------------------------------------------------------------
// Combat
// ---------------------------------------------------------------------------

/// Engagements only happen in open war. Contested systems resolve in
/// galaxy order, one battle each.
fn combat_phase(
    state: &mut GameState,
    content: &GameContent,
    rng: &mut impl Rng,
    event_level: EventLevel,
    out: &mut Vec<EventEnvelope>,
) {
    if state.diplomacy.stance != Stance::War {
        return;
    }
    let contested: Vec<SystemId> = state
        .galaxy
        .systems
        .iter()
        .map(|s| s.id.clone())
        .filter(|id| has_ships(state, Owner::Player, id) && has_ships(state, Owner::Ai, id))
        .collect();
    for system_id in contested {
        crate::combat::resolve_combat(state, content, &system_id, rng, event_level, out);
    }
}

fn has_ships(state: &GameState, owner: Owner, system_id: &SystemId) -> bool {
    state
        .faction(owner)
        .fleets
        .iter()
        .any(|f| f.location == *system_id && !f.ships.is_empty())
}

// ---------------------------------------------------------------------------
// Cleanup
// ---------------------------------------------------------------------------

fn cleanup_phase(state: &mut GameState, content: &GameContent, out: &mut Vec<EventEnvelope>) {
    state.player.fleets.retain(|f| !f.ships.is_empty());
    state.ai.fleets.retain(|f| !f.ships.is_empty());

    update_system_control(state);
    diplomacy::update_treaties(state, out);

    if !state.diplomacy.at_war() {
        let decay = content.constants.war_exhaustion_decay;
        state.player.war_exhaustion = (state.player.war_exhaustion - decay).max(0.0);
        state.ai.war_exhaustion = (state.ai.war_exhaustion - decay).max(0.0);
    }

    let cap = content.constants.notification_cap;
    let len = state.player.notifications.len();
    if len > cap {
        state.player.notifications.drain(..len - cap);
    }
}

/// Sole presence in a system claims it; a contested or emptied system
/// keeps its last controller.
fn update_system_control(state: &mut GameState) {
    let ids: Vec<SystemId> = state.galaxy.systems.iter().map(|s| s.id.clone()).collect();
    for system_id in ids {
        let player_presence = has_presence(state, Owner::Player, &system_id);
        let ai_presence = has_presence(state, Owner::Ai, &system_id);
        if player_presence && !ai_presence {
            state.player.controlled_systems.insert(system_id.clone());
            state.ai.controlled_systems.remove(&system_id);
        } else if ai_presence && !player_presence {
            state.ai.controlled_systems.insert(system_id.clone());
            state.player.controlled_systems.remove(&system_id);
        }
    }
}

fn has_presence(state: &GameState, owner: Owner, system_id: &SystemId) -> bool {
    let faction = state.faction(owner);
    faction.fleets.iter().any(|f| f.location == *system_id)
        || faction.colonies.iter().any(|c| c.system == *system_id)
}

// ---------------------------------------------------------------------------
// Game phase
// ---------------------------------------------------------------------------

fn update_game_phase(state: &mut GameState, out: &mut Vec<EventEnvelope>) {
    let total = state.galaxy.systems.len().max(1) as f64;
    let known_ratio = state.player.known_systems.len() as f64 / total;
    let phase = if known_ratio < 0.5 || state.turn < 20 {
        GamePhase::Exploration
    } else if state.turn < 50 && !state.diplomacy.at_war() {
        GamePhase::Midgame
    } else {
        GamePhase::Lategame
    };
    if phase != state.game_phase {
        state.game_phase = phase;
        out.push(crate::emit(
            &mut state.counters,
            state.turn,
            Event::GamePhaseChanged { phase },
        ));
    }
}
