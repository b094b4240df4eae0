//! Type definitions for `sim_core`.
//!
//! All public state types, enums, and ID newtypes used by the simulation.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

// ---------------------------------------------------------------------------
// ID newtypes
// ---------------------------------------------------------------------------

macro_rules! string_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(pub String);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(SystemId);
string_id!(PlanetId);
string_id!(FleetId);
string_id!(ShipId);
string_id!(ColonyId);
string_id!(StationId);
string_id!(SiteId);
string_id!(EventId);

// ---------------------------------------------------------------------------
// Core enums
// ---------------------------------------------------------------------------

/// The two factions. Every owned object in the state belongs to one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Owner {
    Player,
    Ai,
}

impl Owner {
    pub fn opponent(self) -> Owner {
        match self {
            Owner::Player => Owner::Ai,
            Owner::Ai => Owner::Player,
        }
    }
}

impl std::fmt::Display for Owner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Owner::Player => f.write_str("player"),
            Owner::Ai => f.write_str("ai"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipClass {
    Corvette,
    Frigate,
    Cruiser,
    Science,
}

impl ShipClass {
    pub const ALL: [ShipClass; 4] = [
        ShipClass::Corvette,
        ShipClass::Frigate,
        ShipClass::Cruiser,
        ShipClass::Science,
    ];
}

impl std::fmt::Display for ShipClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShipClass::Corvette => f.write_str("corvette"),
            ShipClass::Frigate => f.write_str("frigate"),
            ShipClass::Cruiser => f.write_str("cruiser"),
            ShipClass::Science => f.write_str("science"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistrictKind {
    City,
    Mining,
    Generator,
    Research,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingKind {
    ResearchLab,
    PowerPlant,
    MineralProcessor,
    Starport,
    PlanetaryDefense,
    ArchaeologyCenter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StationKind {
    Mining,
    Research,
    Shipyard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanetKind {
    Continental,
    Ocean,
    Desert,
    Arctic,
    Barren,
    GasGiant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StarClass {
    Yellow,
    Red,
    Orange,
    Blue,
    White,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechCategory {
    Military,
    Economy,
    Subterfuge,
}

impl TechCategory {
    pub const ALL: [TechCategory; 3] = [
        TechCategory::Military,
        TechCategory::Economy,
        TechCategory::Subterfuge,
    ];
}

impl std::fmt::Display for TechCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TechCategory::Military => f.write_str("military"),
            TechCategory::Economy => f.write_str("economy"),
            TechCategory::Subterfuge => f.write_str("subterfuge"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stance {
    Friendly,
    Neutral,
    Suspicious,
    Hostile,
    War,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    Exploration,
    Midgame,
    Lategame,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventLevel {
    Normal,
    Debug,
}

/// Visibility ladder for a system, from a faction's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Unknown,
    Known,
    Scanned,
    DeepScanned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteKind {
    Info,
    Success,
    Warning,
    Danger,
}

// ---------------------------------------------------------------------------
// Resource types
// ---------------------------------------------------------------------------

/// A triple of the three stockpiled resources. Also used for per-planet
/// deposits and per-structure outputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Resources {
    pub energy: f64,
    pub minerals: f64,
    pub research: f64,
}

impl Resources {
    pub fn new(energy: f64, minerals: f64, research: f64) -> Resources {
        Resources {
            energy,
            minerals,
            research,
        }
    }

    pub fn add(&mut self, other: &Resources) {
        self.energy += other.energy;
        self.minerals += other.minerals;
        self.research += other.research;
    }
}

/// Purchase price. Research is never spent on construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Cost {
    pub minerals: f64,
    pub energy: f64,
}

/// Recurring maintenance drain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Upkeep {
    pub energy: f64,
    pub minerals: f64,
}

// ---------------------------------------------------------------------------
// Galaxy state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Galaxy {
    pub systems: Vec<StarSystem>,
    /// Undirected hyperlane edges between systems.
    pub hyperlanes: Vec<(SystemId, SystemId)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarSystem {
    pub id: SystemId,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub star: StarClass,
    pub planets: Vec<Planet>,
    pub stations: Vec<Station>,
    pub asteroid_belt: Option<AsteroidBelt>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AsteroidBelt {
    pub richness: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Planet {
    pub id: PlanetId,
    pub name: String,
    pub kind: PlanetKind,
    pub size: u32,
    pub habitable: bool,
    /// Raw deposits; feed planet valuation, not colony output.
    pub deposits: Resources,
    pub colonized_by: Option<Owner>,
    pub homeworld: bool,
    pub has_moon: bool,
    pub site: Option<SitePresence>,
}

/// An archaeology site placed on a planet. The narrative content lives in
/// `GameContent`; this is only the mutable discovery state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SitePresence {
    pub id: SiteId,
    pub discovered: bool,
    pub completed: bool,
}

/// An orbital station under construction or in service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,
    pub kind: StationKind,
    pub owner: Owner,
    pub is_building: bool,
    /// Turns of construction completed so far.
    pub build_progress: u32,
}

// ---------------------------------------------------------------------------
// Faction state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faction {
    pub name: String,
    pub resources: Resources,
    /// Last computed gross income, refreshed in the production phase.
    pub income: Resources,
    /// Last computed upkeep, refreshed in the production phase.
    pub upkeep: Upkeep,
    pub technology: TechState,
    pub fleets: Vec<Fleet>,
    pub colonies: Vec<Colony>,
    pub controlled_systems: BTreeSet<SystemId>,
    pub known_systems: BTreeSet<SystemId>,
    pub scanned_systems: BTreeSet<SystemId>,
    pub deep_scanned_systems: BTreeSet<SystemId>,
    pub homeworld: Option<(SystemId, PlanetId)>,
    pub notifications: Vec<Notification>,
    pub war_exhaustion: f64,
    pub legitimacy: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TechState {
    pub military: TechTrack,
    pub economy: TechTrack,
    pub subterfuge: TechTrack,
}

impl TechState {
    pub fn track(&self, category: TechCategory) -> &TechTrack {
        match category {
            TechCategory::Military => &self.military,
            TechCategory::Economy => &self.economy,
            TechCategory::Subterfuge => &self.subterfuge,
        }
    }

    pub fn track_mut(&mut self, category: TechCategory) -> &mut TechTrack {
        match category {
            TechCategory::Military => &mut self.military,
            TechCategory::Economy => &mut self.economy,
            TechCategory::Subterfuge => &mut self.subterfuge,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TechTrack {
    pub level: u32,
    pub progress: f64,
    /// Whether the track is actively receiving the research split.
    pub researching: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub turn: u32,
    pub message: String,
    pub kind: NoteKind,
}

// ---------------------------------------------------------------------------
// Fleet state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FleetOrders {
    Move,
    Patrol,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fleet {
    pub id: FleetId,
    pub name: String,
    pub location: SystemId,
    pub destination: Option<SystemId>,
    pub orders: Option<FleetOrders>,
    pub patrol_route: Vec<SystemId>,
    pub ships: SmallVec<[Ship; 8]>,
}

impl Fleet {
    pub fn has_science_ship(&self) -> bool {
        self.ships.iter().any(|s| s.class == ShipClass::Science)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub id: ShipId,
    pub class: ShipClass,
    pub hull: f64,
}

/// Per-class ship counts, used by the combat composition bonuses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Composition {
    pub corvette: u32,
    pub frigate: u32,
    pub cruiser: u32,
    pub science: u32,
}

impl Composition {
    pub fn count(&self, class: ShipClass) -> u32 {
        match class {
            ShipClass::Corvette => self.corvette,
            ShipClass::Frigate => self.frigate,
            ShipClass::Cruiser => self.cruiser,
            ShipClass::Science => self.science,
        }
    }

    pub fn add(&mut self, class: ShipClass) {
        match class {
            ShipClass::Corvette => self.corvette += 1,
            ShipClass::Frigate => self.frigate += 1,
            ShipClass::Cruiser => self.cruiser += 1,
            ShipClass::Science => self.science += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.corvette + self.frigate + self.cruiser + self.science
    }

    /// Combatant count; science ships don't factor into composition ratios.
    pub fn combatants(&self) -> u32 {
        self.corvette + self.frigate + self.cruiser
    }
}

// ---------------------------------------------------------------------------
// Colony state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Colony {
    pub id: ColonyId,
    pub system: SystemId,
    pub planet: PlanetId,
    pub name: String,
    pub homeworld: bool,
    pub population: f64,
    pub happiness: f64,
    pub districts: Vec<DistrictKind>,
    /// Fixed-length slot array; `None` is an empty slot.
    pub buildings: Vec<Option<BuildingKind>>,
    pub max_districts: u32,
    pub build_queue: Vec<BuildTask>,
}

impl Colony {
    pub fn city_districts(&self) -> u32 {
        self.districts
            .iter()
            .filter(|d| **d == DistrictKind::City)
            .count() as u32
    }

    pub fn has_building(&self, kind: BuildingKind) -> bool {
        self.buildings.iter().any(|b| *b == Some(kind))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildTask {
    pub item: BuildItem,
    pub turns_remaining: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BuildItem {
    District { kind: DistrictKind },
    Building { kind: BuildingKind, slot: usize },
}

// ---------------------------------------------------------------------------
// Diplomacy state
// ---------------------------------------------------------------------------

/// Relations between the two factions, tracked from the AI's perspective
/// (trust and stance describe how the AI regards the player).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiplomacyState {
    pub stance: Stance,
    /// 0-100.
    pub trust: f64,
    pub treaties: Vec<Treaty>,
}

impl DiplomacyState {
    pub fn at_war(&self) -> bool {
        self.stance == Stance::War
    }

    pub fn active_treaty(&self, kind: TreatyKind) -> Option<&Treaty> {
        self.treaties.iter().find(|t| t.kind == kind && t.active)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreatyKind {
    NonAggression,
}

impl std::fmt::Display for TreatyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TreatyKind::NonAggression => f.write_str("non aggression"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Treaty {
    pub kind: TreatyKind,
    pub start_turn: u32,
    pub end_turn: u32,
    pub active: bool,
}

/// One side of a trade offer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TradeSide {
    pub energy: f64,
    pub minerals: f64,
    pub research: f64,
    pub system: Option<SystemId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TradeOffer {
    pub player_gives: TradeSide,
    pub ai_gives: TradeSide,
}

/// The AI's appraisal of a trade offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeEvaluation {
    pub acceptable: bool,
    /// Value of what the AI would give away.
    pub ai_value: f64,
    /// Value of what the AI would receive.
    pub player_value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeaceDemands {
    StatusQuo,
    Concessions,
}

/// Terms attached to a peace offer. `demands: None` sues for peace
/// unconditionally, which the opponent accepts most readily.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PeaceTerms {
    pub demands: Option<PeaceDemands>,
    /// Systems ceded by the loser when concessions are demanded.
    pub systems: Vec<SystemId>,
    /// Resources paid by the loser when concessions are demanded.
    pub resources: Resources,
}

// ---------------------------------------------------------------------------
// AI state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiMind {
    /// Re-derived every AI phase; kept in state for introspection.
    pub goals: Vec<Goal>,
    /// Snapshot of what the AI believes about the player. Recorded but
    /// never read back by the decision logic.
    pub beliefs: Beliefs,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub kind: GoalKind,
    pub priority: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalKind {
    Economy,
    Expansion,
    Military,
    Archaeology,
    Aggression,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Beliefs {
    pub player_strength: f64,
    pub player_systems: u32,
    pub player_excavations: u32,
}

// ---------------------------------------------------------------------------
// Excavation state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExcavationPhase {
    /// Research points are accruing toward the current layer threshold.
    Accumulating,
    /// The layer threshold is met; a choice is required to continue.
    ReadyForChoice,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Excavation {
    pub site: SiteId,
    pub system: SystemId,
    pub planet: PlanetId,
    pub owner: Owner,
    pub phase: ExcavationPhase,
    pub paused: bool,
    /// 1-based layer index.
    pub current_layer: u32,
    pub total_layers: u32,
    pub progress: f64,
    pub choices_made: Vec<ChoiceRecord>,
    pub narrative_log: Vec<NarrativeEntry>,
    pub completed_turn: Option<u32>,
}

impl Excavation {
    pub fn active(&self) -> bool {
        !self.paused && self.phase != ExcavationPhase::Completed
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceRecord {
    pub layer: u32,
    pub choice: usize,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrativeEntry {
    pub layer: u32,
    pub title: String,
    pub narrative: String,
    pub choice: String,
    pub outcome: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetaChainProgress {
    pub discovered: Vec<String>,
    pub completed: bool,
}

// ---------------------------------------------------------------------------
// Event state
// ---------------------------------------------------------------------------

/// A triggered random event awaiting the player's choice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingEvent {
    pub event: String,
    pub turn: u32,
}

// ---------------------------------------------------------------------------
// Combat reports
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatReport {
    pub system: SystemId,
    pub turn: u32,
    pub winner: Owner,
    /// Modified pre-roll strengths, floored.
    pub player_strength: f64,
    pub ai_strength: f64,
    pub player_losses: Composition,
    pub ai_losses: Composition,
    pub player_remaining: u32,
    pub ai_remaining: u32,
}

// ---------------------------------------------------------------------------
// Victory
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Victory {
    pub winner: Owner,
    pub reason: VictoryReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VictoryReason {
    MajorityControl,
    Elimination,
}

// ---------------------------------------------------------------------------
// Top-level state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Counters {
    pub next_fleet_id: u64,
    pub next_ship_id: u64,
    pub next_colony_id: u64,
    pub next_station_id: u64,
    pub next_event_id: u64,
}

impl Counters {
    pub fn alloc_fleet(&mut self) -> FleetId {
        self.next_fleet_id += 1;
        FleetId(format!("fleet_{:03}", self.next_fleet_id))
    }

    pub fn alloc_ship(&mut self) -> ShipId {
        self.next_ship_id += 1;
        ShipId(format!("ship_{:04}", self.next_ship_id))
    }

    pub fn alloc_colony(&mut self) -> ColonyId {
        self.next_colony_id += 1;
        ColonyId(format!("colony_{:03}", self.next_colony_id))
    }

    pub fn alloc_station(&mut self) -> StationId {
        self.next_station_id += 1;
        StationId(format!("station_{:03}", self.next_station_id))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub turn: u32,
    pub game_phase: GamePhase,
    pub galaxy: Galaxy,
    pub player: Faction,
    pub ai: Faction,
    pub diplomacy: DiplomacyState,
    pub ai_mind: AiMind,
    pub excavations: Vec<Excavation>,
    pub meta_chain: MetaChainProgress,
    pub pending_event: Option<PendingEvent>,
    pub last_event_turn: u32,
    pub combat_log: Vec<CombatReport>,
    pub counters: Counters,
}

impl GameState {
    pub fn faction(&self, owner: Owner) -> &Faction {
        match owner {
            Owner::Player => &self.player,
            Owner::Ai => &self.ai,
        }
    }

    pub fn faction_mut(&mut self, owner: Owner) -> &mut Faction {
        match owner {
            Owner::Player => &mut self.player,
            Owner::Ai => &mut self.ai,
        }
    }

    pub fn system(&self, id: &SystemId) -> Option<&StarSystem> {
        self.galaxy.systems.iter().find(|s| s.id == *id)
    }

    pub fn system_mut(&mut self, id: &SystemId) -> Option<&mut StarSystem> {
        self.galaxy.systems.iter_mut().find(|s| s.id == *id)
    }

    pub fn planet(&self, system: &SystemId, planet: &PlanetId) -> Option<&Planet> {
        self.system(system)?.planets.iter().find(|p| p.id == *planet)
    }

    pub fn planet_mut(&mut self, system: &SystemId, planet: &PlanetId) -> Option<&mut Planet> {
        self.system_mut(system)?
            .planets
            .iter_mut()
            .find(|p| p.id == *planet)
    }

    pub fn fleet(&self, owner: Owner, id: &FleetId) -> Option<&Fleet> {
        self.faction(owner).fleets.iter().find(|f| f.id == *id)
    }

    pub fn fleet_mut(&mut self, owner: Owner, id: &FleetId) -> Option<&mut Fleet> {
        self.faction_mut(owner).fleets.iter_mut().find(|f| f.id == *id)
    }

    pub fn colony(&self, owner: Owner, id: &ColonyId) -> Option<&Colony> {
        self.faction(owner).colonies.iter().find(|c| c.id == *id)
    }

    pub fn colony_mut(&mut self, owner: Owner, id: &ColonyId) -> Option<&mut Colony> {
        self.faction_mut(owner)
            .colonies
            .iter_mut()
            .find(|c| c.id == *id)
    }

    pub fn colony_on_planet(&self, owner: Owner, planet: &PlanetId) -> Option<&Colony> {
        self.faction(owner)
            .colonies
            .iter()
            .find(|c| c.planet == *planet)
    }

    pub fn excavation(&self, system: &SystemId, planet: &PlanetId) -> Option<&Excavation> {
        self.excavations
            .iter()
            .find(|e| e.system == *system && e.planet == *planet)
    }

    pub fn excavation_mut(
        &mut self,
        system: &SystemId,
        planet: &PlanetId,
    ) -> Option<&mut Excavation> {
        self.excavations
            .iter_mut()
            .find(|e| e.system == *system && e.planet == *planet)
    }

    /// Player checked first; the sets are kept disjoint by the cleanup phase.
    pub fn system_controller(&self, system: &SystemId) -> Option<Owner> {
        if self.player.controlled_systems.contains(system) {
            Some(Owner::Player)
        } else if self.ai.controlled_systems.contains(system) {
            Some(Owner::Ai)
        } else {
            None
        }
    }

    pub fn visibility(&self, owner: Owner, system: &SystemId) -> Visibility {
        let faction = self.faction(owner);
        if faction.deep_scanned_systems.contains(system) {
            Visibility::DeepScanned
        } else if faction.scanned_systems.contains(system) {
            Visibility::Scanned
        } else if faction.known_systems.contains(system) {
            Visibility::Known
        } else {
            Visibility::Unknown
        }
    }

    /// Notifications only surface to the player; AI turns are silent.
    pub fn notify(&mut self, message: impl Into<String>, kind: NoteKind) {
        let turn = self.turn;
        self.player.notifications.push(Notification {
            turn,
            message: message.into(),
            kind,
        });
    }
}

// ---------------------------------------------------------------------------
// Event types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub id: EventId,
    pub turn: u32,
    pub event: Event,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    FleetArrived {
        owner: Owner,
        fleet: FleetId,
        system: SystemId,
    },
    SystemScanned {
        owner: Owner,
        system: SystemId,
    },
    SiteDiscovered {
        owner: Owner,
        system: SystemId,
        planet: PlanetId,
        site: SiteId,
    },
    ColonyFounded {
        owner: Owner,
        system: SystemId,
        planet: PlanetId,
    },
    ConstructionCompleted {
        owner: Owner,
        colony: ColonyId,
        item: BuildItem,
    },
    StationCompleted {
        owner: Owner,
        system: SystemId,
        kind: StationKind,
    },
    TechLevelGained {
        owner: Owner,
        category: TechCategory,
        level: u32,
    },
    EnergyDeficit {
        owner: Owner,
    },
    CombatResolved {
        system: SystemId,
        winner: Owner,
        player_losses: u32,
        ai_losses: u32,
    },
    EventTriggered {
        event: String,
    },
    EventResolved {
        event: String,
        choice: usize,
    },
    ExcavationStarted {
        owner: Owner,
        system: SystemId,
        planet: PlanetId,
        site: SiteId,
    },
    ExcavationPhaseChanged {
        system: SystemId,
        planet: PlanetId,
        phase: ExcavationPhase,
    },
    ExcavationChoiceMade {
        owner: Owner,
        system: SystemId,
        planet: PlanetId,
        layer: u32,
        choice: usize,
    },
    MetaChainAdvanced {
        owner: Owner,
        key: String,
    },
    MetaChainCompleted {
        owner: Owner,
    },
    WarDeclared {
        by: Owner,
    },
    PeaceConcluded,
    PeaceSought {
        by: Owner,
    },
    TreatySigned {
        kind: TreatyKind,
        end_turn: u32,
    },
    TreatyExpired {
        kind: TreatyKind,
    },
    TradeResolved {
        accepted: bool,
    },
    StanceChanged {
        stance: Stance,
    },
    GamePhaseChanged {
        phase: GamePhase,
    },
    /// Only emitted at `EventLevel::Debug`.
    CombatRoll {
        system: SystemId,
        player_roll: f64,
        ai_roll: f64,
    },
    /// Only emitted at `EventLevel::Debug`.
    GoalsEvaluated {
        goals: Vec<GoalKind>,
    },
}

// ---------------------------------------------------------------------------
// Denied operations
// ---------------------------------------------------------------------------

/// Why a player or AI operation was refused. Turn phases never return these;
/// they drop inconsistent work items instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum Denied {
    #[error("Fleet not found")]
    FleetNotFound,
    #[error("Colony not found")]
    ColonyNotFound,
    #[error("System not found")]
    SystemNotFound,
    #[error("Planet not found")]
    PlanetNotFound,
    #[error("Insufficient minerals")]
    InsufficientMinerals,
    #[error("Insufficient energy")]
    InsufficientEnergy,
    #[error("Insufficient resources")]
    InsufficientResources,
    #[error("Insufficient resources (200 minerals, 100 energy)")]
    CannotAffordColony,
    #[error("Requires 10 research")]
    CannotAffordDeepScan,
    #[error("No path to destination")]
    NoPath,
    #[error("Invalid patrol route")]
    InvalidPatrolRoute,
    #[error("No shipyard in system")]
    NoShipyard,
    #[error("Requires science vessel")]
    RequiresScienceVessel,
    #[error("System must be scanned first")]
    NotScanned,
    #[error("Fleets must be in same system")]
    FleetsNotCoLocated,
    #[error("Cannot split all ships")]
    CannotSplitAllShips,
    #[error("Planet is not habitable")]
    NotHabitable,
    #[error("Planet already colonized")]
    AlreadyColonized,
    #[error("Maximum districts reached")]
    MaxDistrictsReached,
    #[error("Invalid building slot")]
    InvalidSlot,
    #[error("Slot already occupied")]
    SlotOccupied,
    #[error("Slot already under construction")]
    SlotUnderConstruction,
    #[error("No building in slot")]
    EmptySlot,
    #[error("Would cause housing shortage")]
    HousingShortage,
    #[error("District not found")]
    DistrictNotFound,
    #[error("No faction presence in system")]
    NoPresence,
    #[error("Station of that type already present")]
    StationAlreadyPresent,
    #[error("Requires an asteroid belt")]
    RequiresAsteroidBelt,
    #[error("No archaeology site found")]
    NoSiteOnPlanet,
    #[error("Site not yet discovered (requires deep scan)")]
    SiteNotDiscovered,
    #[error("Site already fully excavated")]
    SiteCompleted,
    #[error("Excavation already in progress")]
    ExcavationInProgress,
    #[error("No active excavation")]
    NoActiveExcavation,
    #[error("Layer not ready for choice")]
    LayerNotReady,
    #[error("Invalid choice")]
    InvalidChoice,
    #[error("Unknown site data")]
    UnknownSite,
    #[error("No pending event")]
    NoPendingEvent,
    #[error("Requires military tech level {0}")]
    RequiresMilitaryTech(u32),
    #[error("Cannot trade during war")]
    TradeBlockedByWar,
    #[error("Cannot send gifts during war")]
    GiftBlockedByWar,
    #[error("Must negotiate peace first")]
    PactBlockedByWar,
    #[error("Already at war")]
    AlreadyAtWar,
    #[error("Not at war")]
    NotAtWar,
}
