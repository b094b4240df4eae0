//! The opposing faction's decision logic.
//!
//! Runs once per turn in the AI phase: re-derive goals, then act on the
//! economy, expansion, military, archaeology, and diplomacy in that order.
//! Decisions only read the AI's own visibility sets.

use std::collections::BTreeSet;

use rand::Rng;

use crate::colony::{build_station, colonize, process_build_queues, queue_district};
use crate::content::GameContent;
use crate::economy::colony_defense;
use crate::excavation::{make_choice, start_excavation};
use crate::fleet::{
    build_ship, create_fleet, deep_scan_system, faction_strength, fleet_strength, scan_system,
    set_destination,
};
use crate::graph;
use crate::types::{
    DistrictKind, Event, EventEnvelope, EventLevel, ExcavationPhase, GameState, Goal, GoalKind,
    NoteKind, Owner, Planet, ShipClass, Stance, StationKind, SystemId, TradeEvaluation,
    TradeOffer,
};

// ---------------------------------------------------------------------------
// Turn entry point
// ---------------------------------------------------------------------------

pub fn take_turn(
    state: &mut GameState,
    content: &GameContent,
    rng: &mut impl Rng,
    event_level: EventLevel,
    events: &mut Vec<EventEnvelope>,
) {
    update_goals(state, content, event_level, events);
    economic_actions(state, content, events);
    expansion_actions(state, content, events);
    military_actions(state, content);
    archaeology_actions(state, content, rng, events);
    diplomatic_actions(state, content, rng, events);
    update_beliefs(state, content);
}

// ---------------------------------------------------------------------------
// Goals
// ---------------------------------------------------------------------------

fn update_goals(
    state: &mut GameState,
    content: &GameContent,
    event_level: EventLevel,
    events: &mut Vec<EventEnvelope>,
) {
    let ai_strength = faction_strength(&state.ai, content);
    let player_strength = faction_strength(&state.player, content);
    let total_systems = state.galaxy.systems.len() as f64;

    let mut goals = Vec::new();
    if state.ai.resources.energy + state.ai.resources.minerals < 200.0 {
        goals.push(Goal {
            kind: GoalKind::Economy,
            priority: 3,
        });
    }
    if (state.ai.controlled_systems.len() as f64) < total_systems * 0.4 {
        goals.push(Goal {
            kind: GoalKind::Expansion,
            priority: 2,
        });
    }
    if player_strength > ai_strength * 0.8 {
        goals.push(Goal {
            kind: GoalKind::Military,
            priority: 3,
        });
    }
    let digging = state
        .excavations
        .iter()
        .any(|e| e.owner == Owner::Ai && e.active());
    if !digging {
        goals.push(Goal {
            kind: GoalKind::Archaeology,
            priority: 1,
        });
    }
    if ai_strength > player_strength * 1.5
        && matches!(state.diplomacy.stance, Stance::Suspicious | Stance::Hostile)
    {
        goals.push(Goal {
            kind: GoalKind::Aggression,
            priority: 2,
        });
    }
    state.ai_mind.goals = goals;

    if event_level == EventLevel::Debug {
        let kinds = state.ai_mind.goals.iter().map(|g| g.kind).collect();
        events.push(crate::emit(
            &mut state.counters,
            state.turn,
            Event::GoalsEvaluated { goals: kinds },
        ));
    }
}

// ---------------------------------------------------------------------------
// Economy
// ---------------------------------------------------------------------------

/// Each colony with spare district room queues one district, steered by
/// which stockpile is shortest, then the AI's build queues advance.
fn economic_actions(state: &mut GameState, content: &GameContent, events: &mut Vec<EventEnvelope>) {
    let colony_ids: Vec<_> = state
        .ai
        .colonies
        .iter()
        .filter(|c| (c.districts.len() as u32) < c.max_districts)
        .map(|c| c.id.clone())
        .collect();
    for colony_id in colony_ids {
        let resources = state.ai.resources;
        let kind = if resources.energy < resources.minerals {
            DistrictKind::Generator
        } else if resources.research < 50.0 {
            DistrictKind::Research
        } else {
            DistrictKind::Mining
        };
        let _ = queue_district(state, content, Owner::Ai, &colony_id, kind);
    }
    process_build_queues(state, content, Owner::Ai, events);
}

// ---------------------------------------------------------------------------
// Expansion and exploration
// ---------------------------------------------------------------------------

fn expansion_actions(state: &mut GameState, content: &GameContent, events: &mut Vec<EventEnvelope>) {
    // Colonize the most valuable habitable planet in known space.
    let mut best: Option<(f64, SystemId, crate::types::PlanetId)> = None;
    for system_id in &state.ai.known_systems {
        let Some(system) = state.system(system_id) else {
            continue;
        };
        for planet in &system.planets {
            if !planet.habitable || planet.colonized_by.is_some() {
                continue;
            }
            let value = evaluate_planet_value(planet);
            let better = best.as_ref().is_none_or(|(v, _, _)| value > *v);
            if better {
                best = Some((value, system_id.clone(), planet.id.clone()));
            }
        }
    }
    if let Some((_, system_id, planet_id)) = best {
        let cost = content.constants.colonize_cost;
        if state.ai.resources.minerals >= cost.minerals && state.ai.resources.energy >= cost.energy
            && colonize(state, content, Owner::Ai, &system_id, &planet_id, events).is_err()
        {
            // Usually missing a shipyard; start one for a later attempt.
            let _ = build_station(state, content, Owner::Ai, &system_id, StationKind::Shipyard);
        }
    }

    // Push idle fleets at the frontier.
    let mut unexplored: BTreeSet<SystemId> = BTreeSet::new();
    for known in &state.ai.known_systems {
        for neighbor in graph::neighbors(known, &state.galaxy) {
            if !state.ai.known_systems.contains(neighbor) {
                unexplored.insert(neighbor.clone());
            }
        }
    }
    let idle: Vec<_> = state
        .ai
        .fleets
        .iter()
        .filter(|f| f.destination.is_none())
        .map(|f| f.id.clone())
        .collect();
    for fleet_id in &idle {
        let Some(target) = unexplored.iter().next().cloned() else {
            break;
        };
        unexplored.remove(&target);
        let _ = set_destination(state, Owner::Ai, fleet_id, &target);
    }

    // Survey with whatever science fleets are still idle.
    let science_idle: Vec<_> = state
        .ai
        .fleets
        .iter()
        .filter(|f| f.destination.is_none() && f.has_science_ship())
        .map(|f| (f.id.clone(), f.location.clone()))
        .collect();
    for (fleet_id, location) in science_idle {
        if !state.ai.scanned_systems.contains(&location) {
            let _ = scan_system(state, Owner::Ai, &fleet_id, events);
        } else if !state.ai.deep_scanned_systems.contains(&location) {
            let _ = deep_scan_system(state, content, Owner::Ai, &fleet_id, events);
        }
    }
}

// ---------------------------------------------------------------------------
// Military
// ---------------------------------------------------------------------------

fn military_actions(state: &mut GameState, content: &GameContent) {
    let invests = state
        .ai_mind
        .goals
        .iter()
        .any(|g| g.kind == GoalKind::Military && g.priority >= 2);
    if invests {
        reinforce_garrisons(state, content);
    }
    match state.diplomacy.stance {
        Stance::War => execute_war_actions(state, content),
        Stance::Hostile => defensive_positioning(state),
        _ => {}
    }
}

/// Builds warships at every starport colony that can afford them, heaviest
/// hull first.
fn reinforce_garrisons(state: &mut GameState, content: &GameContent) {
    let yards: Vec<SystemId> = state
        .ai
        .colonies
        .iter()
        .filter(|c| c.has_building(crate::types::BuildingKind::Starport))
        .map(|c| c.system.clone())
        .collect();
    for system_id in yards {
        if state.ai.resources.minerals < 100.0 {
            break;
        }
        let fleet_id = state
            .ai
            .fleets
            .iter()
            .find(|f| f.location == system_id)
            .map(|f| f.id.clone())
            .unwrap_or_else(|| {
                create_fleet(
                    state,
                    content,
                    Owner::Ai,
                    &system_id,
                    &[],
                    Some("Defense Force".to_string()),
                )
            });
        let class = if state.ai.resources.minerals >= 200.0 {
            ShipClass::Cruiser
        } else if state.ai.resources.minerals >= 100.0 {
            ShipClass::Frigate
        } else {
            ShipClass::Corvette
        };
        let _ = build_ship(state, content, Owner::Ai, &fleet_id, class);
    }
}

/// Picks the softest player system within striking range and commits every
/// idle battle fleet to it.
fn execute_war_actions(state: &mut GameState, content: &GameContent) {
    let mut best: Option<(f64, SystemId)> = None;
    let targets: Vec<SystemId> = state.player.controlled_systems.iter().cloned().collect();
    for target in targets {
        let defense = estimate_system_defense(state, content, &target);
        let nearby: f64 = state
            .ai
            .fleets
            .iter()
            .filter(|f| {
                graph::shortest_hop_count(&f.location, &target, &state.galaxy)
                    .is_some_and(|hops| hops <= 3)
            })
            .map(|f| fleet_strength(f, content, state.ai.technology.military.level))
            .sum();
        if nearby > defense {
            let margin = nearby - defense;
            if best.as_ref().is_none_or(|(m, _)| margin > *m) {
                best = Some((margin, target));
            }
        }
    }
    if let Some((_, target)) = best {
        let attackers: Vec<_> = state
            .ai
            .fleets
            .iter()
            .filter(|f| f.destination.is_none() && f.ships.len() > 2)
            .map(|f| f.id.clone())
            .collect();
        for fleet_id in attackers {
            let _ = set_destination(state, Owner::Ai, &fleet_id, &target);
        }
    }
    state.ai.war_exhaustion += 2.0;
}

/// Player fleet strength plus colony ground defenses in the system.
fn estimate_system_defense(state: &GameState, content: &GameContent, system_id: &SystemId) -> f64 {
    let fleets: f64 = state
        .player
        .fleets
        .iter()
        .filter(|f| f.location == *system_id)
        .map(|f| fleet_strength(f, content, state.player.technology.military.level))
        .sum();
    let colonies: f64 = state
        .player
        .colonies
        .iter()
        .filter(|c| c.system == *system_id)
        .map(|c| colony_defense(c, content))
        .sum();
    fleets + colonies
}

/// Posts an idle fleet at every unguarded border system.
fn defensive_positioning(state: &mut GameState) {
    let borders: Vec<SystemId> = state
        .ai
        .controlled_systems
        .iter()
        .filter(|system_id| {
            graph::neighbors(system_id, &state.galaxy)
                .iter()
                .any(|n| !state.ai.controlled_systems.contains(*n))
        })
        .cloned()
        .collect();
    for border in borders {
        let guarded = state
            .ai
            .fleets
            .iter()
            .any(|f| f.location == border || f.destination.as_ref() == Some(&border));
        if guarded {
            continue;
        }
        let idle = state
            .ai
            .fleets
            .iter()
            .find(|f| f.destination.is_none() && !f.ships.is_empty())
            .map(|f| f.id.clone());
        if let Some(fleet_id) = idle {
            let _ = set_destination(state, Owner::Ai, &fleet_id, &border);
        }
    }
}

// ---------------------------------------------------------------------------
// Archaeology
// ---------------------------------------------------------------------------

fn archaeology_actions(
    state: &mut GameState,
    content: &GameContent,
    rng: &mut impl Rng,
    events: &mut Vec<EventEnvelope>,
) {
    // Open digs on every discovered, unfinished site in deep-scanned space.
    let deep_scanned: Vec<SystemId> = state.ai.deep_scanned_systems.iter().cloned().collect();
    for system_id in deep_scanned {
        let candidates: Vec<crate::types::PlanetId> = state
            .system(&system_id)
            .map(|system| {
                system
                    .planets
                    .iter()
                    .filter(|p| {
                        p.site
                            .as_ref()
                            .is_some_and(|s| s.discovered && !s.completed)
                    })
                    .map(|p| p.id.clone())
                    .collect()
            })
            .unwrap_or_default();
        for planet_id in candidates {
            if state.excavation(&system_id, &planet_id).is_none() {
                let _ = start_excavation(state, content, Owner::Ai, &system_id, &planet_id, events);
            }
        }
    }

    // Resolve any layer waiting on a decision with a uniform pick.
    let waiting: Vec<_> = state
        .excavations
        .iter()
        .filter(|e| e.owner == Owner::Ai && e.phase == ExcavationPhase::ReadyForChoice)
        .map(|e| (e.system.clone(), e.planet.clone(), e.site.clone(), e.current_layer))
        .collect();
    for (system_id, planet_id, site_id, layer) in waiting {
        let choices = content
            .site(&site_id)
            .and_then(|def| def.layers.get(layer as usize - 1))
            .map_or(0, |l| l.choices.len());
        if choices == 0 {
            continue;
        }
        let pick = rng.gen_range(0..choices);
        let _ = make_choice(state, content, &system_id, &planet_id, pick, events);
    }
}

// ---------------------------------------------------------------------------
// Diplomacy
// ---------------------------------------------------------------------------

fn diplomatic_actions(
    state: &mut GameState,
    content: &GameContent,
    rng: &mut impl Rng,
    events: &mut Vec<EventEnvelope>,
) {
    let ai_strength = faction_strength(&state.ai, content);
    let player_strength = faction_strength(&state.player, content);

    if state.diplomacy.stance == Stance::Hostile
        && state.diplomacy.trust < 20.0
        && ai_strength > player_strength * 1.3
    {
        state.diplomacy.stance = Stance::War;
        let name = state.ai.name.clone();
        state.notify(format!("The {name} has declared war!"), NoteKind::Danger);
        events.push(crate::emit(
            &mut state.counters,
            state.turn,
            Event::WarDeclared { by: Owner::Ai },
        ));
    }

    if state.diplomacy.at_war()
        && state.ai.war_exhaustion > 50.0
        && rng.gen::<f64>() < state.ai.war_exhaustion / 100.0
    {
        let name = state.ai.name.clone();
        state.notify(
            format!("The {name} appears to be seeking peace."),
            NoteKind::Info,
        );
        events.push(crate::emit(
            &mut state.counters,
            state.turn,
            Event::PeaceSought { by: Owner::Ai },
        ));
    }

    adjust_stance(state, events);
}

/// Trust regresses toward the middle, and outside of war the stance simply
/// follows the trust bands.
fn adjust_stance(state: &mut GameState, events: &mut Vec<EventEnvelope>) {
    if state.diplomacy.trust < 50.0 {
        state.diplomacy.trust = (state.diplomacy.trust + 1.0).min(100.0);
    } else if state.diplomacy.trust > 50.0 {
        state.diplomacy.trust = (state.diplomacy.trust - 0.5).max(0.0);
    }
    if state.diplomacy.at_war() {
        return;
    }
    let trust = state.diplomacy.trust;
    let stance = if trust >= 70.0 {
        Stance::Friendly
    } else if trust >= 50.0 {
        Stance::Neutral
    } else if trust >= 30.0 {
        Stance::Suspicious
    } else {
        Stance::Hostile
    };
    if stance != state.diplomacy.stance {
        state.diplomacy.stance = stance;
        events.push(crate::emit(
            &mut state.counters,
            state.turn,
            Event::StanceChanged { stance },
        ));
    }
}

fn update_beliefs(state: &mut GameState, content: &GameContent) {
    state.ai_mind.beliefs.player_strength = faction_strength(&state.player, content);
    state.ai_mind.beliefs.player_systems = state.player.controlled_systems.len() as u32;
    state.ai_mind.beliefs.player_excavations = state
        .excavations
        .iter()
        .filter(|e| e.owner == Owner::Player && state.ai.known_systems.contains(&e.system))
        .count() as u32;
}

// ---------------------------------------------------------------------------
// Valuation
// ---------------------------------------------------------------------------

pub fn evaluate_planet_value(planet: &Planet) -> f64 {
    let mut value = 0.0;
    if planet.habitable {
        value += 50.0;
    }
    value += planet.deposits.energy * 5.0
        + planet.deposits.minerals * 5.0
        + planet.deposits.research * 8.0;
    value += f64::from(planet.size) * 2.0;
    if planet.site.is_some() {
        value += 30.0;
    }
    value
}

/// Worth of a whole system from one faction's point of view. Chokepoints
/// and hubs rate higher, and a known dig site adds a premium.
pub fn evaluate_system_value(state: &GameState, system_id: &SystemId, perspective: Owner) -> f64 {
    let Some(system) = state.system(system_id) else {
        return 0.0;
    };
    let mut value = 100.0;
    for planet in &system.planets {
        if planet.habitable {
            value += 50.0;
        }
        value += planet.deposits.energy * 3.0
            + planet.deposits.minerals * 3.0
            + planet.deposits.research * 5.0;
    }
    let connections = graph::neighbors(system_id, &state.galaxy).len();
    if connections <= 2 {
        value *= 1.3;
    } else if connections >= 4 {
        value *= 1.2;
    }
    let has_site = system.planets.iter().any(|p| p.site.is_some());
    if has_site
        && state
            .faction(perspective)
            .deep_scanned_systems
            .contains(system_id)
    {
        value += 150.0;
    }
    value
}

/// The AI's appraisal of a trade. It discounts raw resources, prizes
/// research, and overvalues anything it would give away.
pub fn evaluate_offer(
    state: &GameState,
    content: &GameContent,
    offer: &TradeOffer,
) -> TradeEvaluation {
    let _ = content;
    let ai_gives = &offer.ai_gives;
    let player_gives = &offer.player_gives;

    let mut ai_value =
        ai_gives.energy * 0.8 + ai_gives.minerals * 0.8 + ai_gives.research * 1.2;
    if let Some(system) = &ai_gives.system {
        ai_value += evaluate_system_value(state, system, Owner::Ai) * 1.5;
    }
    let mut player_value =
        player_gives.energy * 0.8 + player_gives.minerals * 0.8 + player_gives.research * 1.2;
    if let Some(system) = &player_gives.system {
        player_value += evaluate_system_value(state, system, Owner::Ai) * 1.2;
    }

    let goodwill = 0.5 + state.diplomacy.trust / 100.0;
    TradeEvaluation {
        acceptable: player_value * goodwill >= ai_value,
        ai_value,
        player_value,
    }
}
