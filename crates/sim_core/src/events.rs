//! Random galactic events.
//!
//! Events are drawn in the events phase, held as a single pending event,
//! and resolved by a choice. Choices may carry requirements and a bundle
//! of effects.

use rand::Rng;

use crate::content::{EventDef, EventTier, GameContent};
use crate::types::{
    Denied, Event, EventEnvelope, GameState, NoteKind, Owner, PendingEvent,
};

// ---------------------------------------------------------------------------
// Triggering
// ---------------------------------------------------------------------------

/// Rolls for a random event. The minimum-gap check comes first so the
/// chance roll is only drawn on turns where an event could actually fire.
pub fn maybe_trigger_event(
    state: &mut GameState,
    content: &GameContent,
    rng: &mut impl Rng,
    events: &mut Vec<EventEnvelope>,
) {
    let gap = state.turn.saturating_sub(state.last_event_turn);
    if gap < content.constants.event_min_gap_turns {
        return;
    }
    if rng.gen::<f64>() >= content.constants.event_chance {
        return;
    }
    if trigger_random_event(state, content, rng, events) {
        state.last_event_turn = state.turn;
    }
}

/// Picks a tier, filters by condition, then takes a weighted draw.
fn trigger_random_event(
    state: &mut GameState,
    content: &GameContent,
    rng: &mut impl Rng,
    events: &mut Vec<EventEnvelope>,
) -> bool {
    let tier_roll = rng.gen::<f64>();
    let tier = if tier_roll < 0.6 {
        EventTier::Minor
    } else if tier_roll < 0.9 {
        EventTier::Medium
    } else {
        EventTier::Rare
    };

    let stance = state.diplomacy.stance;
    let candidates: Vec<&EventDef> = content
        .events
        .iter()
        .filter(|e| e.tier == tier)
        .filter(|e| e.condition.as_ref().is_none_or(|c| c.holds(stance)))
        .collect();
    if candidates.is_empty() {
        return false;
    }

    let total: u32 = candidates.iter().map(|e| e.weight).sum();
    let mut roll = rng.gen::<f64>() * f64::from(total);
    let mut picked = candidates[candidates.len() - 1];
    for candidate in &candidates {
        roll -= f64::from(candidate.weight);
        if roll <= 0.0 {
            picked = candidate;
            break;
        }
    }

    present_event(state, picked, events);
    true
}

/// Forces a specific event, used for excavation fallout.
pub fn trigger_specific_event(
    state: &mut GameState,
    content: &GameContent,
    event_id: &str,
    events: &mut Vec<EventEnvelope>,
) -> bool {
    let Some(def) = content.event(event_id) else {
        return false;
    };
    present_event(state, def, events);
    true
}

fn present_event(state: &mut GameState, def: &EventDef, events: &mut Vec<EventEnvelope>) {
    state.pending_event = Some(PendingEvent {
        event: def.id.clone(),
        turn: state.turn,
    });
    let kind = if def.tier == EventTier::Rare {
        NoteKind::Warning
    } else {
        NoteKind::Info
    };
    state.notify(def.title.clone(), kind);
    let id = def.id.clone();
    events.push(crate::emit(
        &mut state.counters,
        state.turn,
        Event::EventTriggered { event: id },
    ));
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Resolves the pending event with the chosen option and returns its
/// outcome text. Requirements gate the choice; they are not costs, any
/// price is carried in the effects.
pub fn resolve_event(
    state: &mut GameState,
    content: &GameContent,
    choice: usize,
    rng: &mut impl Rng,
    events: &mut Vec<EventEnvelope>,
) -> Result<String, Denied> {
    let pending = state.pending_event.clone().ok_or(Denied::NoPendingEvent)?;
    let def = content
        .event(&pending.event)
        .ok_or(Denied::NoPendingEvent)?;
    let option = def.choices.get(choice).ok_or(Denied::InvalidChoice)?;

    if let Some(requires) = &option.requires {
        if state.player.resources.energy < requires.energy {
            return Err(Denied::InsufficientEnergy);
        }
        if state.player.resources.minerals < requires.minerals {
            return Err(Denied::InsufficientMinerals);
        }
        if state.player.technology.military.level < requires.military_level {
            return Err(Denied::RequiresMilitaryTech(requires.military_level));
        }
    }

    let effects = option.effects.clone();
    state.player.resources.energy += effects.energy;
    state.player.resources.minerals += effects.minerals;
    state.player.resources.research += effects.research;

    if effects.population > 0.0 && !state.player.colonies.is_empty() {
        let idx = rng.gen_range(0..state.player.colonies.len());
        state.player.colonies[idx].population += effects.population;
    }
    if effects.fleet_damage > 0.0 {
        for fleet in &mut state.player.fleets {
            for ship in &mut fleet.ships {
                let max_hull = content.ship_classes.get(ship.class).max_hull;
                ship.hull = (ship.hull - max_hull * effects.fleet_damage).max(1.0);
            }
        }
    }
    if effects.subterfuge_progress != 0.0 {
        state.player.technology.subterfuge.progress += effects.subterfuge_progress;
    }
    if effects.ai_trust != 0.0 {
        state.diplomacy.trust = (state.diplomacy.trust + effects.ai_trust).clamp(0.0, 100.0);
    }
    if effects.reveal_site {
        reveal_hidden_site(state, events);
    }

    state.pending_event = None;
    state.notify(option.outcome.clone(), NoteKind::Info);
    events.push(crate::emit(
        &mut state.counters,
        state.turn,
        Event::EventResolved {
            event: pending.event,
            choice,
        },
    ));
    Ok(option.outcome.clone())
}

/// Reveals the first undiscovered site in galaxy order that the player has
/// not already deep-scanned, granting full knowledge of its system.
fn reveal_hidden_site(state: &mut GameState, events: &mut Vec<EventEnvelope>) {
    let mut found = None;
    for system in &mut state.galaxy.systems {
        if state.player.deep_scanned_systems.contains(&system.id) {
            continue;
        }
        for planet in &mut system.planets {
            if let Some(site) = planet.site.as_mut() {
                if !site.discovered {
                    site.discovered = true;
                    found = Some((
                        system.id.clone(),
                        planet.id.clone(),
                        planet.name.clone(),
                        site.id.clone(),
                    ));
                    break;
                }
            }
        }
        if found.is_some() {
            break;
        }
    }
    if let Some((system_id, planet_id, planet_name, site_id)) = found {
        state.player.known_systems.insert(system_id.clone());
        state.player.scanned_systems.insert(system_id.clone());
        state.player.deep_scanned_systems.insert(system_id.clone());
        state.notify(
            format!("Coordinates decoded: ruins located on {planet_name}"),
            NoteKind::Success,
        );
        events.push(crate::emit(
            &mut state.counters,
            state.turn,
            Event::SiteDiscovered {
                owner: Owner::Player,
                system: system_id,
                planet: planet_id,
                site: site_id,
            },
        ));
    }
}
