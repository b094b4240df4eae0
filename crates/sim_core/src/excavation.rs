//! Archaeology site excavation.
//!
//! A dig works through a site's layers. Research income accrues toward
//! each layer's threshold; a layer that fills up stops and waits for a
//! narrative choice before the next one opens. Certain choices feed a
//! galaxy-spanning meta chain.

use crate::content::{GameContent, LayerDef};
use crate::types::{
    ChoiceRecord, Denied, Event, EventEnvelope, Excavation, ExcavationPhase, GameState,
    NarrativeEntry, NoteKind, Owner, PlanetId, SiteId, SystemId,
};

/// What a resolved layer choice produced, for the caller to surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceOutcome {
    pub outcome: String,
    pub lore: Option<String>,
    pub cross_reference: Option<SiteId>,
    /// Event definition id to trigger as fallout.
    pub triggered_event: Option<String>,
    pub site_completed: bool,
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// Begins a dig on a discovered, unfinished site. One dig per site.
pub fn start_excavation(
    state: &mut GameState,
    content: &GameContent,
    owner: Owner,
    system_id: &SystemId,
    planet_id: &PlanetId,
    events: &mut Vec<EventEnvelope>,
) -> Result<(), Denied> {
    let (site_id, planet_name) = {
        let planet = state
            .planet(system_id, planet_id)
            .ok_or(Denied::PlanetNotFound)?;
        let site = planet.site.as_ref().ok_or(Denied::NoSiteOnPlanet)?;
        if !site.discovered {
            return Err(Denied::SiteNotDiscovered);
        }
        if site.completed {
            return Err(Denied::SiteCompleted);
        }
        (site.id.clone(), planet.name.clone())
    };
    if state.excavation(system_id, planet_id).is_some() {
        return Err(Denied::ExcavationInProgress);
    }
    let def = content.site(&site_id).ok_or(Denied::UnknownSite)?;

    state.excavations.push(Excavation {
        site: site_id.clone(),
        system: system_id.clone(),
        planet: planet_id.clone(),
        owner,
        phase: ExcavationPhase::Accumulating,
        paused: false,
        current_layer: 1,
        total_layers: def.layers.len() as u32,
        progress: 0.0,
        choices_made: Vec::new(),
        narrative_log: Vec::new(),
        completed_turn: None,
    });
    if owner == Owner::Player {
        state.notify(
            format!("Excavation begun on {planet_name}"),
            NoteKind::Info,
        );
    }
    events.push(crate::emit(
        &mut state.counters,
        state.turn,
        Event::ExcavationStarted {
            owner,
            system: system_id.clone(),
            planet: planet_id.clone(),
            site: site_id,
        },
    ));
    Ok(())
}

pub fn pause_excavation(
    state: &mut GameState,
    system_id: &SystemId,
    planet_id: &PlanetId,
) -> Result<(), Denied> {
    let dig = state
        .excavation_mut(system_id, planet_id)
        .ok_or(Denied::NoActiveExcavation)?;
    dig.paused = true;
    Ok(())
}

pub fn resume_excavation(
    state: &mut GameState,
    system_id: &SystemId,
    planet_id: &PlanetId,
) -> Result<(), Denied> {
    let dig = state
        .excavation_mut(system_id, planet_id)
        .ok_or(Denied::NoActiveExcavation)?;
    if dig.completed_turn.is_none() {
        dig.paused = false;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// Feeds a share of the faction's research income into its active digs.
/// Uses the income snapshot taken earlier in the production phase.
pub fn advance_excavations(
    state: &mut GameState,
    content: &GameContent,
    owner: Owner,
    events: &mut Vec<EventEnvelope>,
) {
    let contribution =
        (state.faction(owner).income.research * content.constants.excavation_research_share)
            .floor();
    if contribution <= 0.0 {
        return;
    }
    let threshold_per_layer = content.constants.excavation_layer_threshold;
    let mut ready: Vec<(SystemId, PlanetId, u32)> = Vec::new();

    for dig in &mut state.excavations {
        if dig.owner != owner || !dig.active() || dig.phase != ExcavationPhase::Accumulating {
            continue;
        }
        dig.progress += contribution;
        let threshold = f64::from(dig.current_layer) * threshold_per_layer;
        if dig.progress >= threshold {
            dig.phase = ExcavationPhase::ReadyForChoice;
            ready.push((dig.system.clone(), dig.planet.clone(), dig.current_layer));
        }
    }

    for (system_id, planet_id, layer) in ready {
        if owner == Owner::Player {
            let planet_name = state
                .planet(&system_id, &planet_id)
                .map_or_else(|| planet_id.0.clone(), |p| p.name.clone());
            state.notify(
                format!("Excavation on {planet_name} has reached layer {layer}"),
                NoteKind::Info,
            );
        }
        events.push(crate::emit(
            &mut state.counters,
            state.turn,
            Event::ExcavationPhaseChanged {
                system: system_id,
                planet: planet_id,
                phase: ExcavationPhase::ReadyForChoice,
            },
        ));
    }
}

// ---------------------------------------------------------------------------
// Choices
// ---------------------------------------------------------------------------

/// Resolves the waiting layer with the chosen option, applies its effects,
/// and opens the next layer or completes the site.
pub fn make_choice(
    state: &mut GameState,
    content: &GameContent,
    system_id: &SystemId,
    planet_id: &PlanetId,
    choice: usize,
    events: &mut Vec<EventEnvelope>,
) -> Result<ChoiceOutcome, Denied> {
    let (owner, site_id, layer_index) = {
        let dig = state
            .excavation(system_id, planet_id)
            .ok_or(Denied::NoActiveExcavation)?;
        if dig.phase != ExcavationPhase::ReadyForChoice {
            return Err(Denied::LayerNotReady);
        }
        (dig.owner, dig.site.clone(), dig.current_layer)
    };
    let def = content.site(&site_id).ok_or(Denied::UnknownSite)?;
    let layer = def
        .layers
        .get(layer_index as usize - 1)
        .ok_or(Denied::UnknownSite)?;
    let option = layer.choices.get(choice).ok_or(Denied::InvalidChoice)?;

    // Rewards and penalties.
    {
        let faction = state.faction_mut(owner);
        faction.resources.add(&option.rewards);
        if let Some(consequences) = &option.consequences {
            faction.resources.research =
                (faction.resources.research - consequences.research_loss).max(0.0);
        }
    }
    if owner == Owner::Player {
        if let Some(bonus) = &option.tech_bonus {
            state
                .player
                .technology
                .track_mut(bonus.category)
                .progress += bonus.amount;
        }
    }
    if let Some(key) = &option.meta_chain_key {
        advance_meta_chain(state, content, owner, key, events);
    }

    // Record the layer in the dig's log.
    let narrative = narrative_for_layer(state, content, system_id, planet_id, layer);
    let outcome = ChoiceOutcome {
        outcome: option.outcome.clone(),
        lore: option.lore.clone(),
        cross_reference: option.cross_reference.clone(),
        triggered_event: option
            .consequences
            .as_ref()
            .and_then(|c| c.triggered_event.clone()),
        site_completed: false,
    };
    let last_layer;
    {
        let turn = state.turn;
        let dig = state
            .excavation_mut(system_id, planet_id)
            .ok_or(Denied::NoActiveExcavation)?;
        dig.choices_made.push(ChoiceRecord {
            layer: layer_index,
            choice,
            text: option.text.clone(),
        });
        dig.narrative_log.push(NarrativeEntry {
            layer: layer_index,
            title: layer.title.clone(),
            narrative,
            choice: option.text.clone(),
            outcome: option.outcome.clone(),
        });
        dig.progress = 0.0;
        last_layer = layer_index >= dig.total_layers;
        if last_layer {
            dig.phase = ExcavationPhase::Completed;
            dig.completed_turn = Some(turn);
        } else {
            dig.phase = ExcavationPhase::Accumulating;
            dig.current_layer += 1;
        }
    }

    events.push(crate::emit(
        &mut state.counters,
        state.turn,
        Event::ExcavationChoiceMade {
            owner,
            system: system_id.clone(),
            planet: planet_id.clone(),
            layer: layer_index,
            choice,
        },
    ));

    if let Some(event_id) = &outcome.triggered_event {
        crate::events::trigger_specific_event(state, content, event_id, events);
    }

    if last_layer {
        complete_site(state, content, owner, system_id, planet_id, &site_id, events);
        return Ok(ChoiceOutcome {
            site_completed: true,
            ..outcome
        });
    }
    Ok(outcome)
}

fn complete_site(
    state: &mut GameState,
    content: &GameContent,
    owner: Owner,
    system_id: &SystemId,
    planet_id: &PlanetId,
    site_id: &SiteId,
    events: &mut Vec<EventEnvelope>,
) {
    let bonus = content
        .site(site_id)
        .map(|def| def.completion_bonus)
        .unwrap_or_default();
    state.faction_mut(owner).resources.add(&bonus);

    let mut planet_name = planet_id.0.clone();
    if let Some(planet) = state.planet_mut(system_id, planet_id) {
        planet_name.clone_from(&planet.name);
        if let Some(site) = planet.site.as_mut() {
            site.completed = true;
        }
    }
    if owner == Owner::Player {
        state.notify(
            format!("Excavation of {planet_name} complete"),
            NoteKind::Success,
        );
    }
    events.push(crate::emit(
        &mut state.counters,
        state.turn,
        Event::ExcavationPhaseChanged {
            system: system_id.clone(),
            planet: planet_id.clone(),
            phase: ExcavationPhase::Completed,
        },
    ));
}

// ---------------------------------------------------------------------------
// Meta chain
// ---------------------------------------------------------------------------

/// Collecting every chain key across the galaxy's sites pays out once, to
/// whichever faction closes the chain.
fn advance_meta_chain(
    state: &mut GameState,
    content: &GameContent,
    owner: Owner,
    key: &str,
    events: &mut Vec<EventEnvelope>,
) {
    if state.meta_chain.discovered.iter().any(|k| k == key) {
        return;
    }
    state.meta_chain.discovered.push(key.to_string());
    events.push(crate::emit(
        &mut state.counters,
        state.turn,
        Event::MetaChainAdvanced {
            owner,
            key: key.to_string(),
        },
    ));

    let all_found = content
        .constants
        .meta_chain_keys
        .iter()
        .all(|k| state.meta_chain.discovered.contains(k));
    if !all_found || state.meta_chain.completed {
        return;
    }
    state.meta_chain.completed = true;
    let reward = content.constants.meta_chain_reward;
    let tech_progress = content.constants.meta_chain_tech_progress;
    {
        let faction = state.faction_mut(owner);
        faction.resources.add(&reward);
        faction.technology.military.progress += tech_progress;
        faction.technology.economy.progress += tech_progress;
        faction.technology.subterfuge.progress += tech_progress;
    }
    if owner == Owner::Player {
        state.notify(
            "The pattern is complete. The precursors' final secret is yours.",
            NoteKind::Success,
        );
    }
    events.push(crate::emit(
        &mut state.counters,
        state.turn,
        Event::MetaChainCompleted { owner },
    ));
}

// ---------------------------------------------------------------------------
// Narrative
// ---------------------------------------------------------------------------

/// Substitutes `{SYSTEM_NAME}`, `{PLANET_NAME}`, and `{CROSS_REF:site_id}`
/// placeholders in a layer narrative.
pub fn narrative_for_layer(
    state: &GameState,
    content: &GameContent,
    system_id: &SystemId,
    planet_id: &PlanetId,
    layer: &LayerDef,
) -> String {
    let system_name = state
        .system(system_id)
        .map_or_else(|| system_id.0.clone(), |s| s.name.clone());
    let planet_name = state
        .planet(system_id, planet_id)
        .map_or_else(|| planet_id.0.clone(), |p| p.name.clone());

    let mut text = layer
        .narrative
        .replace("{SYSTEM_NAME}", &system_name)
        .replace("{PLANET_NAME}", &planet_name);
    while let Some(start) = text.find("{CROSS_REF:") {
        let Some(end) = text[start..].find('}') else {
            break;
        };
        let site_id = text[start + "{CROSS_REF:".len()..start + end].to_string();
        let name = content
            .site(&SiteId(site_id.clone()))
            .map_or(site_id, |def| def.name.clone());
        text.replace_range(start..=start + end, &name);
    }
    text
}
