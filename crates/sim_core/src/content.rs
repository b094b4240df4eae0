//! Static content definitions.
//!
//! `GameContent` is loaded once at startup and never mutated by the
//! simulation. All per-class lookups go through total table structs so the
//! sim never has to handle a missing definition.

use serde::{Deserialize, Serialize};

use crate::types::{
    BuildingKind, Cost, DistrictKind, Resources, ShipClass, SiteId, Stance, StationKind,
    TechCategory, Upkeep,
};

// ---------------------------------------------------------------------------
// Ships
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipClassDef {
    pub cost: Cost,
    pub max_hull: f64,
    /// Base combat strength at full hull.
    pub strength: f64,
    /// Per-ship energy drain charged in the production phase.
    pub upkeep_energy: f64,
    /// Chance weight of being destroyed when the fleet takes casualties.
    pub vulnerability: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipClassTable {
    pub corvette: ShipClassDef,
    pub frigate: ShipClassDef,
    pub cruiser: ShipClassDef,
    pub science: ShipClassDef,
}

impl ShipClassTable {
    pub fn get(&self, class: ShipClass) -> &ShipClassDef {
        match class {
            ShipClass::Corvette => &self.corvette,
            ShipClass::Frigate => &self.frigate,
            ShipClass::Cruiser => &self.cruiser,
            ShipClass::Science => &self.science,
        }
    }
}

// ---------------------------------------------------------------------------
// Districts and buildings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistrictDef {
    pub cost: Cost,
    pub upkeep: Upkeep,
    pub output: Resources,
    /// Extra housing per district; only city districts provide it.
    pub housing: u32,
    pub build_time: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistrictTable {
    pub city: DistrictDef,
    pub mining: DistrictDef,
    pub generator: DistrictDef,
    pub research: DistrictDef,
}

impl DistrictTable {
    pub fn get(&self, kind: DistrictKind) -> &DistrictDef {
        match kind {
            DistrictKind::City => &self.city,
            DistrictKind::Mining => &self.mining,
            DistrictKind::Generator => &self.generator,
            DistrictKind::Research => &self.research,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildingDef {
    pub cost: Cost,
    pub upkeep: Upkeep,
    pub output: Resources,
    /// Flat contribution to the colony's ground defense.
    pub defense_strength: f64,
    /// Whether the building lets the colony's system construct ships.
    pub shipyard: bool,
    pub build_time: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildingTable {
    pub research_lab: BuildingDef,
    pub power_plant: BuildingDef,
    pub mineral_processor: BuildingDef,
    pub starport: BuildingDef,
    pub planetary_defense: BuildingDef,
    pub archaeology_center: BuildingDef,
}

impl BuildingTable {
    pub fn get(&self, kind: BuildingKind) -> &BuildingDef {
        match kind {
            BuildingKind::ResearchLab => &self.research_lab,
            BuildingKind::PowerPlant => &self.power_plant,
            BuildingKind::MineralProcessor => &self.mineral_processor,
            BuildingKind::Starport => &self.starport,
            BuildingKind::PlanetaryDefense => &self.planetary_defense,
            BuildingKind::ArchaeologyCenter => &self.archaeology_center,
        }
    }
}

// ---------------------------------------------------------------------------
// Stations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationDef {
    pub cost: Cost,
    pub upkeep_energy: f64,
    pub output: Resources,
    pub build_time: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationTable {
    pub mining: StationDef,
    pub research: StationDef,
    pub shipyard: StationDef,
}

impl StationTable {
    pub fn get(&self, kind: StationKind) -> &StationDef {
        match kind {
            StationKind::Mining => &self.mining,
            StationKind::Research => &self.research,
            StationKind::Shipyard => &self.shipyard,
        }
    }
}

// ---------------------------------------------------------------------------
// Random events
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventTier {
    Minor,
    Medium,
    Rare,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDef {
    pub id: String,
    pub title: String,
    pub description: String,
    pub tier: EventTier,
    pub weight: u32,
    #[serde(default)]
    pub condition: Option<EventCondition>,
    pub choices: Vec<EventChoiceDef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventCondition {
    /// The event only fires while the AI is not friendly.
    AiStanceNotFriendly,
}

impl EventCondition {
    pub fn holds(&self, stance: Stance) -> bool {
        match self {
            EventCondition::AiStanceNotFriendly => stance != Stance::Friendly,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventChoiceDef {
    pub text: String,
    #[serde(default)]
    pub requires: Option<EventRequirement>,
    #[serde(default)]
    pub effects: EventEffects,
    pub outcome: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventRequirement {
    #[serde(default)]
    pub energy: f64,
    #[serde(default)]
    pub minerals: f64,
    #[serde(default)]
    pub military_level: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventEffects {
    #[serde(default)]
    pub energy: f64,
    #[serde(default)]
    pub minerals: f64,
    #[serde(default)]
    pub research: f64,
    /// Added to the population of a random player colony.
    #[serde(default)]
    pub population: f64,
    /// Fraction of max hull knocked off every player ship.
    #[serde(default)]
    pub fleet_damage: f64,
    #[serde(default)]
    pub subterfuge_progress: f64,
    #[serde(default)]
    pub ai_trust: f64,
    /// Reveal the first undiscovered archaeology site in the galaxy.
    #[serde(default)]
    pub reveal_site: bool,
}

// ---------------------------------------------------------------------------
// Archaeology sites
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteDef {
    pub id: SiteId,
    pub name: String,
    pub description: String,
    pub layers: Vec<LayerDef>,
    pub completion_bonus: Resources,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerDef {
    pub title: String,
    /// May contain `{SYSTEM_NAME}`, `{PLANET_NAME}` and `{CROSS_REF:site_id}`
    /// placeholders, substituted when the layer is presented.
    pub narrative: String,
    pub choices: Vec<SiteChoiceDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteChoiceDef {
    pub text: String,
    #[serde(default)]
    pub hint: Option<String>,
    pub outcome: String,
    #[serde(default)]
    pub rewards: Resources,
    #[serde(default)]
    pub tech_bonus: Option<TechBonus>,
    #[serde(default)]
    pub consequences: Option<ChoiceConsequences>,
    #[serde(default)]
    pub lore: Option<String>,
    #[serde(default)]
    pub cross_reference: Option<SiteId>,
    #[serde(default)]
    pub meta_chain_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechBonus {
    pub category: TechCategory,
    pub amount: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChoiceConsequences {
    /// Research points lost when the choice backfires.
    #[serde(default)]
    pub research_loss: f64,
    /// Event definition id triggered as a follow-up.
    #[serde(default)]
    pub triggered_event: Option<String>,
}

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Tuning knobs. Everything a scenario might want to rebalance without
/// touching sim code lives here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Constants {
    // Expansion
    pub colonize_cost: Cost,
    pub deep_scan_research_cost: f64,

    // Research
    /// Tier cost is `base * (level + 1)^2`.
    pub research_tier_base: f64,
    /// Denominator of the per-track research split.
    pub research_split: f64,

    // Excavation
    /// Layer threshold is `layer * excavation_layer_threshold`.
    pub excavation_layer_threshold: f64,
    /// Fraction of research income that feeds active excavations.
    pub excavation_research_share: f64,
    pub meta_chain_keys: Vec<String>,
    pub meta_chain_reward: Resources,
    pub meta_chain_tech_progress: f64,

    // Random events
    pub event_min_gap_turns: u32,
    pub event_chance: f64,

    // Combat
    pub defender_bonus: f64,
    pub tech_combat_bonus: f64,
    pub planetary_defense_modifier: f64,
    pub max_casualty_rate: f64,
    pub combat_roll_min: f64,
    pub combat_roll_max: f64,
    pub war_exhaustion_per_casualty: f64,
    pub war_exhaustion_decay: f64,

    // Fleets
    pub military_strength_bonus: f64,
    pub repair_cost_per_hull: f64,
    pub disband_refund_ratio: f64,

    // Colonies
    pub growth_base: f64,
    pub growth_happiness_bonus: f64,
    pub base_max_population: f64,
    pub population_per_city_district: f64,
    pub population_output_bonus: f64,
    pub colony_base_defense: f64,
    pub colony_defense_per_population: f64,
    pub district_demolish_refund: f64,
    pub building_demolish_refund: f64,

    // Misc
    pub notification_cap: usize,
}

// ---------------------------------------------------------------------------
// GameContent
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameContent {
    pub content_version: String,
    pub ship_classes: ShipClassTable,
    pub districts: DistrictTable,
    pub buildings: BuildingTable,
    pub stations: StationTable,
    pub events: Vec<EventDef>,
    pub sites: Vec<SiteDef>,
    pub constants: Constants,
}

impl GameContent {
    pub fn event(&self, id: &str) -> Option<&EventDef> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn site(&self, id: &SiteId) -> Option<&SiteDef> {
        self.sites.iter().find(|s| s.id == *id)
    }

    /// Number of building slots a planet kind supports.
    pub fn building_slots(kind: crate::types::PlanetKind) -> usize {
        use crate::types::PlanetKind;
        match kind {
            PlanetKind::Continental => 4,
            PlanetKind::Ocean | PlanetKind::Desert | PlanetKind::Arctic => 3,
            PlanetKind::Barren => 2,
            PlanetKind::GasGiant => 0,
        }
    }
}
