//! Income, upkeep, and victory checks.

use crate::content::GameContent;
use crate::types::{Colony, Faction, GameState, Owner, Resources, Upkeep, Victory, VictoryReason};

/// Per-colony production after population and happiness modifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColonyOutput {
    pub gross: Resources,
    pub upkeep: Upkeep,
    pub net: Resources,
}

/// Faction-wide production for one turn.
#[derive(Debug, Clone, Copy, Default)]
pub struct FactionEconomy {
    pub income: Resources,
    pub upkeep: Upkeep,
}

// ---------------------------------------------------------------------------
// Colony output
// ---------------------------------------------------------------------------

/// Sums district and building production, then applies the population bonus
/// and the happiness modifier. Each modifier floors the running totals, so
/// small colonies see hard breakpoints rather than smooth scaling.
pub fn colony_output(colony: &Colony, content: &GameContent) -> ColonyOutput {
    let mut gross = Resources::default();
    let mut upkeep = Upkeep::default();

    for district in &colony.districts {
        let def = content.districts.get(*district);
        gross.add(&def.output);
        upkeep.energy += def.upkeep.energy;
        upkeep.minerals += def.upkeep.minerals;
    }
    for building in colony.buildings.iter().flatten() {
        let def = content.buildings.get(*building);
        gross.add(&def.output);
        upkeep.energy += def.upkeep.energy;
        upkeep.minerals += def.upkeep.minerals;
    }

    let pop_bonus = 1.0 + colony.population * content.constants.population_output_bonus;
    gross.energy = (gross.energy * pop_bonus).floor();
    gross.minerals = (gross.minerals * pop_bonus).floor();
    gross.research = (gross.research * pop_bonus).floor();

    let happiness_mod = 0.5 + colony.happiness * 0.5;
    gross.energy = (gross.energy * happiness_mod).floor();
    gross.minerals = (gross.minerals * happiness_mod).floor();
    gross.research = (gross.research * happiness_mod).floor();

    let net = Resources {
        energy: gross.energy - upkeep.energy,
        minerals: gross.minerals - upkeep.minerals,
        research: gross.research,
    };
    ColonyOutput { gross, upkeep, net }
}

pub fn max_population(colony: &Colony, content: &GameContent) -> f64 {
    content.constants.base_max_population
        + content.constants.population_per_city_district * f64::from(colony.city_districts())
}

/// Ground defense contributed when a combat is fought over the colony's
/// system.
pub fn colony_defense(colony: &Colony, content: &GameContent) -> f64 {
    let buildings: f64 = colony
        .buildings
        .iter()
        .flatten()
        .map(|b| content.buildings.get(*b).defense_strength)
        .sum();
    content.constants.colony_base_defense
        + buildings
        + colony.population * content.constants.colony_defense_per_population
}

// ---------------------------------------------------------------------------
// Faction economy
// ---------------------------------------------------------------------------

/// Colony nets plus station outputs in controlled systems, minus fleet and
/// station energy upkeep. Colony upkeep is already netted per colony; only
/// the fleet and station drain shows up in the faction-level `upkeep`.
pub fn faction_economy(state: &GameState, content: &GameContent, owner: Owner) -> FactionEconomy {
    let faction = state.faction(owner);
    let mut income = Resources::default();
    let mut upkeep = Upkeep::default();

    for colony in &faction.colonies {
        income.add(&colony_output(colony, content).net);
    }

    for system_id in &faction.controlled_systems {
        let Some(system) = state.system(system_id) else {
            continue;
        };
        for station in &system.stations {
            if station.owner != owner || station.is_building {
                continue;
            }
            let def = content.stations.get(station.kind);
            income.add(&def.output);
            upkeep.energy += def.upkeep_energy;
        }
    }

    for fleet in &faction.fleets {
        for ship in &fleet.ships {
            upkeep.energy += content.ship_classes.get(ship.class).upkeep_energy;
        }
    }

    FactionEconomy { income, upkeep }
}

/// The AI economy is abstracted to a flat stipend per colony so it never
/// starves from the same deficit spiral a player can steer out of.
pub fn ai_stipend(ai: &Faction) -> Resources {
    let colonies = ai.colonies.len() as f64;
    Resources {
        energy: 5.0 * colonies + 10.0,
        minerals: 5.0 * colonies + 10.0,
        research: 3.0 * colonies + 5.0,
    }
}

// ---------------------------------------------------------------------------
// Victory
// ---------------------------------------------------------------------------

/// Majority control of systems or elimination of the opponent. The player
/// is checked first on both conditions, so a simultaneous finish goes to
/// the player.
pub fn check_win_condition(state: &GameState) -> Option<Victory> {
    let total = state.galaxy.systems.len();
    let majority = total.div_ceil(2);

    if state.player.controlled_systems.len() >= majority {
        return Some(Victory {
            winner: Owner::Player,
            reason: VictoryReason::MajorityControl,
        });
    }
    if state.ai.controlled_systems.len() >= majority {
        return Some(Victory {
            winner: Owner::Ai,
            reason: VictoryReason::MajorityControl,
        });
    }

    if state.ai.colonies.is_empty() && state.ai.fleets.is_empty() {
        return Some(Victory {
            winner: Owner::Player,
            reason: VictoryReason::Elimination,
        });
    }
    if state.player.colonies.is_empty() && state.player.fleets.is_empty() {
        return Some(Victory {
            winner: Owner::Ai,
            reason: VictoryReason::Elimination,
        });
    }

    None
}
