//! Diplomacy between the player and the AI faction.
//!
//! Trust and stance are tracked from the AI's perspective. All offers are
//! player-initiated; the AI's acceptance logic lives in `ai`.

use rand::Rng;

use crate::ai;
use crate::content::GameContent;
use crate::types::{
    Denied, Event, EventEnvelope, GameState, NoteKind, Owner, PeaceDemands, PeaceTerms, Stance,
    SystemId, TradeOffer, Treaty, TreatyKind,
};

// ---------------------------------------------------------------------------
// Trade
// ---------------------------------------------------------------------------

/// Puts a trade offer to the AI. Returns whether it was accepted; an
/// accepted trade executes immediately.
pub fn propose_trade(
    state: &mut GameState,
    content: &GameContent,
    offer: &TradeOffer,
    events: &mut Vec<EventEnvelope>,
) -> Result<bool, Denied> {
    if state.diplomacy.at_war() {
        return Err(Denied::TradeBlockedByWar);
    }
    validate_side(state, Owner::Player, offer)?;
    validate_side(state, Owner::Ai, offer)?;

    let evaluation = ai::evaluate_offer(state, content, offer);
    if evaluation.acceptable {
        execute_trade(state, offer);
        state.diplomacy.trust = (state.diplomacy.trust + 5.0).min(100.0);
        state.notify("Trade accepted", NoteKind::Success);
    } else {
        state.notify("Trade offer rejected", NoteKind::Warning);
    }
    events.push(crate::emit(
        &mut state.counters,
        state.turn,
        Event::TradeResolved {
            accepted: evaluation.acceptable,
        },
    ));
    Ok(evaluation.acceptable)
}

fn validate_side(state: &GameState, giver: Owner, offer: &TradeOffer) -> Result<(), Denied> {
    let side = match giver {
        Owner::Player => &offer.player_gives,
        Owner::Ai => &offer.ai_gives,
    };
    let faction = state.faction(giver);
    if faction.resources.energy < side.energy {
        return Err(Denied::InsufficientEnergy);
    }
    if faction.resources.minerals < side.minerals {
        return Err(Denied::InsufficientMinerals);
    }
    if faction.resources.research < side.research {
        return Err(Denied::InsufficientResources);
    }
    if let Some(system) = &side.system {
        if !faction.controlled_systems.contains(system) {
            return Err(Denied::SystemNotFound);
        }
    }
    Ok(())
}

fn execute_trade(state: &mut GameState, offer: &TradeOffer) {
    for (giver, side) in [
        (Owner::Player, &offer.player_gives),
        (Owner::Ai, &offer.ai_gives),
    ] {
        let receiver = giver.opponent();
        {
            let from = &mut state.faction_mut(giver).resources;
            from.energy -= side.energy;
            from.minerals -= side.minerals;
            from.research -= side.research;
        }
        {
            let to = &mut state.faction_mut(receiver).resources;
            to.energy += side.energy;
            to.minerals += side.minerals;
            to.research += side.research;
        }
        if let Some(system) = &side.system {
            transfer_system(state, giver, receiver, system);
        }
    }
}

/// Moves control of a system and every colony in it from one faction to
/// the other. Fleets stationed there keep their allegiance.
pub fn transfer_system(state: &mut GameState, from: Owner, to: Owner, system_id: &SystemId) {
    state
        .faction_mut(from)
        .controlled_systems
        .remove(system_id);
    state
        .faction_mut(to)
        .controlled_systems
        .insert(system_id.clone());
    state
        .faction_mut(to)
        .known_systems
        .insert(system_id.clone());

    let moved: Vec<_> = {
        let colonies = &mut state.faction_mut(from).colonies;
        let mut kept = Vec::with_capacity(colonies.len());
        let mut moved = Vec::new();
        for colony in colonies.drain(..) {
            if colony.system == *system_id {
                moved.push(colony);
            } else {
                kept.push(colony);
            }
        }
        *colonies = kept;
        moved
    };
    for colony in &moved {
        let planet_id = colony.planet.clone();
        if let Some(planet) = state.planet_mut(system_id, &planet_id) {
            planet.colonized_by = Some(to);
        }
    }
    state.faction_mut(to).colonies.extend(moved);
}

// ---------------------------------------------------------------------------
// Non-aggression pact
// ---------------------------------------------------------------------------

/// Proposes a fixed-duration non-aggression pact. Acceptance scales with
/// trust and warms further with a friendly stance.
pub fn propose_non_aggression(
    state: &mut GameState,
    duration: u32,
    rng: &mut impl Rng,
    events: &mut Vec<EventEnvelope>,
) -> Result<bool, Denied> {
    if state.diplomacy.at_war() {
        return Err(Denied::PactBlockedByWar);
    }
    let stance_factor = match state.diplomacy.stance {
        Stance::Friendly => 1.5,
        Stance::Neutral => 1.0,
        _ => 0.5,
    };
    let chance = (state.diplomacy.trust / 100.0) * stance_factor;
    let accepted = rng.gen::<f64>() < chance;
    if accepted {
        let end_turn = state.turn + duration;
        state.diplomacy.treaties.push(Treaty {
            kind: TreatyKind::NonAggression,
            start_turn: state.turn,
            end_turn,
            active: true,
        });
        state.diplomacy.trust = (state.diplomacy.trust + 10.0).min(100.0);
        state.notify("Non-aggression pact signed", NoteKind::Success);
        events.push(crate::emit(
            &mut state.counters,
            state.turn,
            Event::TreatySigned {
                kind: TreatyKind::NonAggression,
                end_turn,
            },
        ));
    } else {
        state.notify("Non-aggression pact rejected", NoteKind::Warning);
    }
    Ok(accepted)
}

// ---------------------------------------------------------------------------
// War and peace
// ---------------------------------------------------------------------------

/// Declares war on the AI. Breaking an active pact costs extra trust and
/// legitimacy on top of the base penalty for an unjustified war.
pub fn declare_war(
    state: &mut GameState,
    justified: bool,
    events: &mut Vec<EventEnvelope>,
) -> Result<(), Denied> {
    if state.diplomacy.at_war() {
        return Err(Denied::AlreadyAtWar);
    }
    if state
        .diplomacy
        .active_treaty(TreatyKind::NonAggression)
        .is_some()
    {
        state.diplomacy.trust = (state.diplomacy.trust - 40.0).max(0.0);
        state.player.legitimacy -= 30.0;
        state.notify(
            "You broke a non-aggression pact. Your reputation suffers.",
            NoteKind::Danger,
        );
    }
    state.player.legitimacy -= if justified { 5.0 } else { 20.0 };

    state.diplomacy.stance = Stance::War;
    state.diplomacy.trust = (state.diplomacy.trust - 25.0).max(0.0);
    state.player.war_exhaustion = 0.0;
    state.ai.war_exhaustion = 0.0;
    for treaty in &mut state.diplomacy.treaties {
        treaty.active = false;
    }
    let enemy = state.ai.name.clone();
    state.notify(format!("War declared on the {enemy}!"), NoteKind::Danger);
    events.push(crate::emit(
        &mut state.counters,
        state.turn,
        Event::WarDeclared { by: Owner::Player },
    ));
    Ok(())
}

/// Relative war performance. Positive margins over the opponent's score
/// make peace offers more palatable.
pub fn war_score(state: &GameState, owner: Owner) -> f64 {
    let own = state.faction(owner);
    let enemy = state.faction(owner.opponent());
    let ships: usize = own.fleets.iter().map(|f| f.ships.len()).sum();
    own.controlled_systems.len() as f64 * 10.0 + ships as f64 * 2.0 + enemy.war_exhaustion / 2.0
        - own.war_exhaustion / 3.0
}

/// Sues the AI for peace. A worn-down AI accepts readily; concessions only
/// pass when the player is clearly ahead. An accepted peace drops the
/// stance to hostile rather than resetting the relationship.
pub fn sue_for_peace(
    state: &mut GameState,
    terms: &PeaceTerms,
    rng: &mut impl Rng,
    events: &mut Vec<EventEnvelope>,
) -> Result<bool, Denied> {
    if !state.diplomacy.at_war() {
        return Err(Denied::NotAtWar);
    }
    let player_score = war_score(state, Owner::Player);
    let ai_score = war_score(state, Owner::Ai);

    let mut chance = 0.0;
    if state.ai.war_exhaustion > 50.0 {
        chance += 0.3;
    }
    if state.ai.war_exhaustion > 75.0 {
        chance += 0.3;
    }
    if player_score > ai_score {
        chance += 0.2;
    }
    chance += match terms.demands {
        None => 0.3,
        Some(PeaceDemands::StatusQuo) => 0.2,
        Some(PeaceDemands::Concessions) => {
            if player_score > ai_score {
                0.1
            } else {
                0.0
            }
        }
    };

    let accepted = rng.gen::<f64>() < chance;
    if accepted {
        state.diplomacy.stance = Stance::Hostile;
        state.player.war_exhaustion = 0.0;
        state.ai.war_exhaustion = 0.0;
        if terms.demands == Some(PeaceDemands::Concessions) {
            for system in &terms.systems {
                if state.ai.controlled_systems.contains(system) {
                    transfer_system(state, Owner::Ai, Owner::Player, system);
                }
            }
            let paid = terms.resources;
            let ai = &mut state.ai.resources;
            ai.energy -= paid.energy;
            ai.minerals -= paid.minerals;
            ai.research -= paid.research;
            state.player.resources.add(&paid);
        }
        state.notify("Peace concluded", NoteKind::Success);
        events.push(crate::emit(
            &mut state.counters,
            state.turn,
            Event::PeaceConcluded,
        ));
    } else {
        state.notify("Peace offer rejected", NoteKind::Warning);
    }
    Ok(accepted)
}

// ---------------------------------------------------------------------------
// Gestures
// ---------------------------------------------------------------------------

/// Transfers resources to the AI as a goodwill gesture. Trust gain is
/// capped so gifts cannot buy friendship in one move.
pub fn send_gift(state: &mut GameState, energy: f64, minerals: f64) -> Result<f64, Denied> {
    if state.diplomacy.at_war() {
        return Err(Denied::GiftBlockedByWar);
    }
    if state.player.resources.energy < energy {
        return Err(Denied::InsufficientEnergy);
    }
    if state.player.resources.minerals < minerals {
        return Err(Denied::InsufficientMinerals);
    }
    state.player.resources.energy -= energy;
    state.player.resources.minerals -= minerals;
    state.ai.resources.energy += energy;
    state.ai.resources.minerals += minerals;

    let gain = (((energy + minerals) / 20.0).floor()).min(15.0);
    state.diplomacy.trust = (state.diplomacy.trust + gain).min(100.0);
    Ok(gain)
}

pub fn send_insult(state: &mut GameState) -> Result<(), Denied> {
    if state.diplomacy.at_war() {
        return Err(Denied::AlreadyAtWar);
    }
    state.diplomacy.trust = (state.diplomacy.trust - 15.0).max(0.0);
    Ok(())
}

// ---------------------------------------------------------------------------
// Upkeep
// ---------------------------------------------------------------------------

/// Expires treaties whose term has run out. Called once per cleanup phase.
pub fn update_treaties(state: &mut GameState, events: &mut Vec<EventEnvelope>) {
    let turn = state.turn;
    let mut expired = Vec::new();
    for treaty in &mut state.diplomacy.treaties {
        if treaty.active && turn >= treaty.end_turn {
            treaty.active = false;
            expired.push(treaty.kind);
        }
    }
    for kind in expired {
        state.notify(format!("Treaty expired: {kind}"), NoteKind::Info);
        events.push(crate::emit(
            &mut state.counters,
            state.turn,
            Event::TreatyExpired { kind },
        ));
    }
}
