//! Auto-resolved fleet combat.
//!
//! One engagement per contested system per combat phase. Strength totals
//! are shaped by defender advantage, tech, fleet composition, and ground
//! defenses, then each side gets a single randomized roll. Casualties are
//! decided per ship.

use rand::Rng;

use crate::content::GameContent;
use crate::fleet::fleet_strength;
use crate::types::{
    BuildingKind, CombatReport, Composition, Event, EventEnvelope, EventLevel, GameState,
    NoteKind, Owner, SystemId,
};

// Composition advantage multipliers: counters beat their prey class by the
// ratio difference times these weights.
const CORVETTE_SWARM_WEIGHT: f64 = 0.2;
const FRIGATE_SCREEN_WEIGHT: f64 = 0.15;
const CRUISER_LINE_WEIGHT: f64 = 0.15;

#[derive(Debug, Clone, Copy, Default)]
struct SideTally {
    strength: f64,
    composition: Composition,
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Resolves the engagement at `system_id`, if both sides have ships there.
pub fn resolve_combat(
    state: &mut GameState,
    content: &GameContent,
    system_id: &SystemId,
    rng: &mut impl Rng,
    event_level: EventLevel,
    events: &mut Vec<EventEnvelope>,
) -> Option<CombatReport> {
    let player = tally_side(state, content, Owner::Player, system_id);
    let ai = tally_side(state, content, Owner::Ai, system_id);
    if player.composition.total() == 0 || ai.composition.total() == 0 {
        return None;
    }

    let mut player_mod = 1.0;
    let mut ai_mod = 1.0;

    match state.system_controller(system_id) {
        Some(Owner::Player) => player_mod *= content.constants.defender_bonus,
        Some(Owner::Ai) => ai_mod *= content.constants.defender_bonus,
        None => {}
    }

    player_mod *= 1.0
        + content.constants.tech_combat_bonus
            * f64::from(state.player.technology.military.level);
    ai_mod *=
        1.0 + content.constants.tech_combat_bonus * f64::from(state.ai.technology.military.level);

    apply_composition_bonuses(
        &player.composition,
        &ai.composition,
        &mut player_mod,
        &mut ai_mod,
    );

    for owner in [Owner::Player, Owner::Ai] {
        let fortified = state
            .faction(owner)
            .colonies
            .iter()
            .any(|c| c.system == *system_id && c.has_building(BuildingKind::PlanetaryDefense));
        if fortified {
            match owner {
                Owner::Player => player_mod *= content.constants.planetary_defense_modifier,
                Owner::Ai => ai_mod *= content.constants.planetary_defense_modifier,
            }
        }
    }

    let roll_span = content.constants.combat_roll_max - content.constants.combat_roll_min;
    let player_roll = content.constants.combat_roll_min + rng.gen::<f64>() * roll_span;
    let ai_roll = content.constants.combat_roll_min + rng.gen::<f64>() * roll_span;

    let player_final = player.strength * player_mod * player_roll;
    let ai_final = ai.strength * ai_mod * ai_roll;
    let total = player_final + ai_final;
    if total <= 0.0 {
        return None;
    }

    let player_rate = ai_final / total * content.constants.max_casualty_rate;
    let ai_rate = player_final / total * content.constants.max_casualty_rate;

    let player_losses = apply_casualties(state, content, Owner::Player, system_id, player_rate, rng);
    let ai_losses = apply_casualties(state, content, Owner::Ai, system_id, ai_rate, rng);

    let player_remaining = count_ships(state, Owner::Player, system_id);
    let ai_remaining = count_ships(state, Owner::Ai, system_id);

    let winner = if player_remaining == 0 && ai_remaining > 0 {
        Owner::Ai
    } else if ai_remaining == 0 && player_remaining > 0 {
        Owner::Player
    } else if player_final > ai_final {
        Owner::Player
    } else {
        Owner::Ai
    };

    let report = CombatReport {
        system: system_id.clone(),
        turn: state.turn,
        winner,
        player_strength: (player.strength * player_mod).floor(),
        ai_strength: (ai.strength * ai_mod).floor(),
        player_losses,
        ai_losses,
        player_remaining,
        ai_remaining,
    };

    state.player.war_exhaustion +=
        f64::from(player_losses.total()) * content.constants.war_exhaustion_per_casualty;
    state.ai.war_exhaustion +=
        f64::from(ai_losses.total()) * content.constants.war_exhaustion_per_casualty;

    let system_name = state
        .system(system_id)
        .map_or_else(|| system_id.0.clone(), |s| s.name.clone());
    match winner {
        Owner::Player => state.notify(format!("Victory at {system_name}!"), NoteKind::Success),
        Owner::Ai => state.notify(format!("Defeat at {system_name}!"), NoteKind::Danger),
    }

    if event_level == EventLevel::Debug {
        events.push(crate::emit(
            &mut state.counters,
            state.turn,
            Event::CombatRoll {
                system: system_id.clone(),
                player_roll,
                ai_roll,
            },
        ));
    }
    events.push(crate::emit(
        &mut state.counters,
        state.turn,
        Event::CombatResolved {
            system: system_id.clone(),
            winner,
            player_losses: player_losses.total(),
            ai_losses: ai_losses.total(),
        },
    ));

    state.combat_log.push(report.clone());
    Some(report)
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

fn tally_side(
    state: &GameState,
    content: &GameContent,
    owner: Owner,
    system_id: &SystemId,
) -> SideTally {
    let faction = state.faction(owner);
    let mut tally = SideTally::default();
    for fleet in faction.fleets.iter().filter(|f| f.location == *system_id) {
        tally.strength += fleet_strength(fleet, content, faction.technology.military.level);
        for ship in &fleet.ships {
            tally.composition.add(ship.class);
        }
    }
    tally
}

/// Ratio-vs-counter bonuses over combatant ships only. Corvette swarms
/// counter cruisers, frigate screens counter corvettes, cruiser lines
/// counter frigates.
fn apply_composition_bonuses(
    player: &Composition,
    ai: &Composition,
    player_mod: &mut f64,
    ai_mod: &mut f64,
) {
    let p_total = f64::from(player.combatants().max(1));
    let a_total = f64::from(ai.combatants().max(1));

    let p_corvette = f64::from(player.corvette) / p_total;
    let p_frigate = f64::from(player.frigate) / p_total;
    let p_cruiser = f64::from(player.cruiser) / p_total;
    let a_corvette = f64::from(ai.corvette) / a_total;
    let a_frigate = f64::from(ai.frigate) / a_total;
    let a_cruiser = f64::from(ai.cruiser) / a_total;

    if p_corvette > a_cruiser {
        *player_mod *= 1.0 + (p_corvette - a_cruiser) * CORVETTE_SWARM_WEIGHT;
    }
    if p_frigate > a_corvette {
        *player_mod *= 1.0 + (p_frigate - a_corvette) * FRIGATE_SCREEN_WEIGHT;
    }
    if p_cruiser > a_frigate {
        *player_mod *= 1.0 + (p_cruiser - a_frigate) * CRUISER_LINE_WEIGHT;
    }
    if a_corvette > p_cruiser {
        *ai_mod *= 1.0 + (a_corvette - p_cruiser) * CORVETTE_SWARM_WEIGHT;
    }
    if a_frigate > p_corvette {
        *ai_mod *= 1.0 + (a_frigate - p_corvette) * FRIGATE_SCREEN_WEIGHT;
    }
    if a_cruiser > p_frigate {
        *ai_mod *= 1.0 + (a_cruiser - p_frigate) * CRUISER_LINE_WEIGHT;
    }
}

/// One destruction roll per ship, weighted by class vulnerability;
/// survivors take hull damage proportional to the casualty rate.
fn apply_casualties(
    state: &mut GameState,
    content: &GameContent,
    owner: Owner,
    system_id: &SystemId,
    rate: f64,
    rng: &mut impl Rng,
) -> Composition {
    let mut losses = Composition::default();
    for fleet in &mut state.faction_mut(owner).fleets {
        if fleet.location != *system_id {
            continue;
        }
        let mut survivors = smallvec::SmallVec::new();
        for mut ship in fleet.ships.drain(..) {
            let def = content.ship_classes.get(ship.class);
            if rng.gen::<f64>() < rate * def.vulnerability {
                losses.add(ship.class);
                continue;
            }
            let damage = def.max_hull * rate * rng.gen::<f64>();
            ship.hull = (ship.hull - damage).max(1.0);
            survivors.push(ship);
        }
        fleet.ships = survivors;
    }
    losses
}

fn count_ships(state: &GameState, owner: Owner, system_id: &SystemId) -> u32 {
    state
        .faction(owner)
        .fleets
        .iter()
        .filter(|f| f.location == *system_id)
        .map(|f| f.ships.len() as u32)
        .sum()
}
