//! Shared test fixtures for sim_core and downstream crates.
//!
//! `base_content()` provides a full-featured `GameContent` (all ship
//! classes, districts, buildings, stations, a small event pool, and two
//! linked dig sites). `base_state()` builds a four-system lane with the
//! player seated at one end and the AI at the other.

use std::collections::BTreeSet;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::{
    AiMind, AsteroidBelt, BuildingDef, BuildingKind, BuildingTable, ChoiceConsequences, Colony,
    ColonyId, Constants, Cost, Counters, DiplomacyState, DistrictDef, DistrictKind, DistrictTable,
    EventChoiceDef, EventCondition, EventDef, EventEffects, EventRequirement, EventTier, Faction,
    Fleet, FleetId, Galaxy, GameContent, GamePhase, GameState, LayerDef, MetaChainProgress, Owner,
    Planet, PlanetId, PlanetKind, Resources, Ship, ShipClass, ShipClassDef, ShipClassTable,
    ShipId, SiteChoiceDef, SiteDef, SiteId, SitePresence, Stance, StarClass, StarSystem,
    StationDef, StationTable, SystemId, TechBonus, TechCategory, TechState, TechTrack, Upkeep,
};

/// Full-featured content with the production balance numbers.
pub fn base_content() -> GameContent {
    GameContent {
        content_version: "test".to_string(),
        ship_classes: ShipClassTable {
            corvette: ShipClassDef {
                cost: Cost {
                    minerals: 50.0,
                    energy: 10.0,
                },
                max_hull: 30.0,
                strength: 10.0,
                upkeep_energy: 1.0,
                vulnerability: 0.6,
            },
            frigate: ShipClassDef {
                cost: Cost {
                    minerals: 100.0,
                    energy: 20.0,
                },
                max_hull: 60.0,
                strength: 25.0,
                upkeep_energy: 2.0,
                vulnerability: 0.4,
            },
            cruiser: ShipClassDef {
                cost: Cost {
                    minerals: 200.0,
                    energy: 40.0,
                },
                max_hull: 120.0,
                strength: 60.0,
                upkeep_energy: 4.0,
                vulnerability: 0.25,
            },
            science: ShipClassDef {
                cost: Cost {
                    minerals: 80.0,
                    energy: 30.0,
                },
                max_hull: 20.0,
                strength: 5.0,
                upkeep_energy: 2.0,
                vulnerability: 0.8,
            },
        },
        districts: DistrictTable {
            city: DistrictDef {
                cost: Cost {
                    minerals: 100.0,
                    energy: 0.0,
                },
                upkeep: Upkeep {
                    energy: 2.0,
                    minerals: 0.0,
                },
                output: Resources::default(),
                housing: 3,
                build_time: 3,
            },
            mining: DistrictDef {
                cost: Cost {
                    minerals: 75.0,
                    energy: 0.0,
                },
                upkeep: Upkeep {
                    energy: 1.0,
                    minerals: 0.0,
                },
                output: Resources::new(0.0, 4.0, 0.0),
                housing: 0,
                build_time: 2,
            },
            generator: DistrictDef {
                cost: Cost {
                    minerals: 75.0,
                    energy: 0.0,
                },
                upkeep: Upkeep {
                    energy: 0.0,
                    minerals: 1.0,
                },
                output: Resources::new(4.0, 0.0, 0.0),
                housing: 0,
                build_time: 2,
            },
            research: DistrictDef {
                cost: Cost {
                    minerals: 100.0,
                    energy: 25.0,
                },
                upkeep: Upkeep {
                    energy: 2.0,
                    minerals: 0.0,
                },
                output: Resources::new(0.0, 0.0, 4.0),
                housing: 0,
                build_time: 3,
            },
        },
        buildings: BuildingTable {
            research_lab: BuildingDef {
                cost: Cost {
                    minerals: 150.0,
                    energy: 50.0,
                },
                upkeep: Upkeep {
                    energy: 3.0,
                    minerals: 0.0,
                },
                output: Resources::new(0.0, 0.0, 6.0),
                defense_strength: 0.0,
                shipyard: false,
                build_time: 4,
            },
            power_plant: BuildingDef {
                cost: Cost {
                    minerals: 150.0,
                    energy: 0.0,
                },
                upkeep: Upkeep {
                    energy: 0.0,
                    minerals: 2.0,
                },
                output: Resources::new(6.0, 0.0, 0.0),
                defense_strength: 0.0,
                shipyard: false,
                build_time: 4,
            },
            mineral_processor: BuildingDef {
                cost: Cost {
                    minerals: 100.0,
                    energy: 30.0,
                },
                upkeep: Upkeep {
                    energy: 2.0,
                    minerals: 0.0,
                },
                output: Resources::new(0.0, 3.0, 0.0),
                defense_strength: 0.0,
                shipyard: false,
                build_time: 3,
            },
            starport: BuildingDef {
                cost: Cost {
                    minerals: 200.0,
                    energy: 100.0,
                },
                upkeep: Upkeep {
                    energy: 5.0,
                    minerals: 0.0,
                },
                output: Resources::default(),
                defense_strength: 0.0,
                shipyard: true,
                build_time: 5,
            },
            planetary_defense: BuildingDef {
                cost: Cost {
                    minerals: 300.0,
                    energy: 100.0,
                },
                upkeep: Upkeep {
                    energy: 4.0,
                    minerals: 0.0,
                },
                output: Resources::default(),
                defense_strength: 50.0,
                shipyard: false,
                build_time: 6,
            },
            archaeology_center: BuildingDef {
                cost: Cost {
                    minerals: 150.0,
                    energy: 75.0,
                },
                upkeep: Upkeep {
                    energy: 3.0,
                    minerals: 0.0,
                },
                output: Resources::new(0.0, 0.0, 2.0),
                defense_strength: 0.0,
                shipyard: false,
                build_time: 4,
            },
        },
        stations: StationTable {
            mining: StationDef {
                cost: Cost {
                    minerals: 150.0,
                    energy: 50.0,
                },
                upkeep_energy: 1.0,
                output: Resources::new(0.0, 5.0, 0.0),
                build_time: 4,
            },
            research: StationDef {
                cost: Cost {
                    minerals: 100.0,
                    energy: 100.0,
                },
                upkeep_energy: 1.0,
                output: Resources::new(0.0, 0.0, 4.0),
                build_time: 4,
            },
            shipyard: StationDef {
                cost: Cost {
                    minerals: 250.0,
                    energy: 100.0,
                },
                upkeep_energy: 2.0,
                output: Resources::default(),
                build_time: 5,
            },
        },
        events: vec![
            EventDef {
                id: "solar_flare".to_string(),
                title: "Solar Flare".to_string(),
                description: "A stellar flare threatens orbital industry.".to_string(),
                tier: EventTier::Minor,
                weight: 2,
                condition: None,
                choices: vec![
                    EventChoiceDef {
                        text: "Ride it out".to_string(),
                        requires: None,
                        effects: EventEffects {
                            minerals: -20.0,
                            ..EventEffects::default()
                        },
                        outcome: "Some mineral stockpiles are lost.".to_string(),
                    },
                    EventChoiceDef {
                        text: "Raise shielding".to_string(),
                        requires: Some(EventRequirement {
                            energy: 30.0,
                            ..EventRequirement::default()
                        }),
                        effects: EventEffects {
                            energy: -30.0,
                            ..EventEffects::default()
                        },
                        outcome: "The grid holds.".to_string(),
                    },
                ],
            },
            EventDef {
                id: "spy_detected".to_string(),
                title: "Spy Detected".to_string(),
                description: "A foreign agent is caught in a shipyard.".to_string(),
                tier: EventTier::Medium,
                weight: 2,
                condition: Some(EventCondition::AiStanceNotFriendly),
                choices: vec![
                    EventChoiceDef {
                        text: "Interrogate".to_string(),
                        requires: None,
                        effects: EventEffects {
                            subterfuge_progress: 20.0,
                            ..EventEffects::default()
                        },
                        outcome: "The agent talks.".to_string(),
                    },
                    EventChoiceDef {
                        text: "Feed false plans".to_string(),
                        requires: None,
                        effects: EventEffects {
                            ai_trust: -10.0,
                            ..EventEffects::default()
                        },
                        outcome: "The deception will sting when discovered.".to_string(),
                    },
                ],
            },
            EventDef {
                id: "precursor_signal".to_string(),
                title: "Precursor Signal".to_string(),
                description: "A repeating signal with no known source.".to_string(),
                tier: EventTier::Rare,
                weight: 1,
                condition: None,
                choices: vec![EventChoiceDef {
                    text: "Trace it".to_string(),
                    requires: None,
                    effects: EventEffects {
                        research: 100.0,
                        reveal_site: true,
                        ..EventEffects::default()
                    },
                    outcome: "The signal leads somewhere.".to_string(),
                }],
            },
        ],
        sites: vec![
            SiteDef {
                id: SiteId("site_echo_station".to_string()),
                name: "The Echo Station".to_string(),
                description: "A dead relay that still whispers.".to_string(),
                layers: vec![
                    LayerDef {
                        title: "Outer Shell".to_string(),
                        narrative: "The hull above {PLANET_NAME} is older than {SYSTEM_NAME} \
                                    itself."
                            .to_string(),
                        choices: vec![
                            SiteChoiceDef {
                                text: "Cut through".to_string(),
                                hint: None,
                                outcome: "The plating yields salvage.".to_string(),
                                rewards: Resources::new(0.0, 25.0, 10.0),
                                tech_bonus: None,
                                consequences: None,
                                lore: None,
                                cross_reference: None,
                                meta_chain_key: None,
                            },
                            SiteChoiceDef {
                                text: "Map it first".to_string(),
                                hint: Some("Slower, safer".to_string()),
                                outcome: "A full schematic emerges.".to_string(),
                                rewards: Resources::new(0.0, 0.0, 25.0),
                                tech_bonus: None,
                                consequences: None,
                                lore: None,
                                cross_reference: None,
                                meta_chain_key: None,
                            },
                        ],
                    },
                    LayerDef {
                        title: "The Transmitter".to_string(),
                        narrative: "The signal source still cycles, pointed at \
                                    {CROSS_REF:site_buried_archive}."
                            .to_string(),
                        choices: vec![
                            SiteChoiceDef {
                                text: "Record the message".to_string(),
                                hint: None,
                                outcome: "The recording is a map fragment.".to_string(),
                                rewards: Resources::new(20.0, 0.0, 30.0),
                                tech_bonus: Some(TechBonus {
                                    category: TechCategory::Subterfuge,
                                    amount: 30.0,
                                }),
                                consequences: None,
                                lore: Some("The senders called themselves the Chorus.".to_string()),
                                cross_reference: Some(SiteId("site_buried_archive".to_string())),
                                meta_chain_key: Some("echo_alpha".to_string()),
                            },
                            SiteChoiceDef {
                                text: "Silence it".to_string(),
                                hint: None,
                                outcome: "The whisper stops. Something noticed.".to_string(),
                                rewards: Resources::default(),
                                tech_bonus: None,
                                consequences: Some(ChoiceConsequences {
                                    research_loss: 10.0,
                                    triggered_event: Some("precursor_signal".to_string()),
                                }),
                                lore: None,
                                cross_reference: None,
                                meta_chain_key: None,
                            },
                        ],
                    },
                ],
                completion_bonus: Resources::new(50.0, 0.0, 75.0),
            },
            SiteDef {
                id: SiteId("site_buried_archive".to_string()),
                name: "The Buried Archive".to_string(),
                description: "Racks of crystal storage under regolith.".to_string(),
                layers: vec![LayerDef {
                    title: "Reading Room".to_string(),
                    narrative: "Indexes in a dead script cover every wall.".to_string(),
                    choices: vec![SiteChoiceDef {
                        text: "Decode the index".to_string(),
                        hint: None,
                        outcome: "The archive opens.".to_string(),
                        rewards: Resources::new(0.0, 0.0, 40.0),
                        tech_bonus: None,
                        consequences: None,
                        lore: None,
                        cross_reference: None,
                        meta_chain_key: Some("echo_beta".to_string()),
                    }],
                }],
                completion_bonus: Resources::new(0.0, 25.0, 60.0),
            },
        ],
        constants: Constants {
            colonize_cost: Cost {
                minerals: 200.0,
                energy: 100.0,
            },
            deep_scan_research_cost: 10.0,
            research_tier_base: 50.0,
            research_split: 3.0,
            excavation_layer_threshold: 20.0,
            excavation_research_share: 0.5,
            meta_chain_keys: vec!["echo_alpha".to_string(), "echo_beta".to_string()],
            meta_chain_reward: Resources::new(500.0, 500.0, 300.0),
            meta_chain_tech_progress: 100.0,
            event_min_gap_turns: 10,
            event_chance: 0.15,
            defender_bonus: 1.15,
            tech_combat_bonus: 0.1,
            planetary_defense_modifier: 1.2,
            max_casualty_rate: 0.6,
            combat_roll_min: 0.8,
            combat_roll_max: 1.2,
            war_exhaustion_per_casualty: 2.0,
            war_exhaustion_decay: 2.0,
            military_strength_bonus: 0.15,
            repair_cost_per_hull: 0.5,
            disband_refund_ratio: 0.25,
            growth_base: 0.05,
            growth_happiness_bonus: 0.05,
            base_max_population: 2.0,
            population_per_city_district: 3.0,
            population_output_bonus: 0.1,
            colony_base_defense: 10.0,
            colony_defense_per_population: 5.0,
            district_demolish_refund: 25.0,
            building_demolish_refund: 50.0,
            notification_cap: 20,
        },
    }
}

/// Four systems on a single lane: alpha (player home) - beta - gamma -
/// delta (AI home). Beta and gamma carry the two dig sites.
pub fn base_state(content: &GameContent) -> GameState {
    let alpha = SystemId("sys_alpha".to_string());
    let beta = SystemId("sys_beta".to_string());
    let gamma = SystemId("sys_gamma".to_string());
    let delta = SystemId("sys_delta".to_string());

    let galaxy = Galaxy {
        systems: vec![
            StarSystem {
                id: alpha.clone(),
                name: "Sol".to_string(),
                x: 100.0,
                y: 300.0,
                star: StarClass::Yellow,
                planets: vec![Planet {
                    id: PlanetId("pl_alpha_1".to_string()),
                    name: "Terra Nova".to_string(),
                    kind: PlanetKind::Continental,
                    size: 16,
                    habitable: true,
                    deposits: Resources::new(3.0, 3.0, 1.0),
                    colonized_by: Some(Owner::Player),
                    homeworld: true,
                    has_moon: true,
                    site: None,
                }],
                stations: Vec::new(),
                asteroid_belt: None,
            },
            StarSystem {
                id: beta.clone(),
                name: "Vega".to_string(),
                x: 300.0,
                y: 300.0,
                star: StarClass::Red,
                planets: vec![Planet {
                    id: PlanetId("pl_beta_1".to_string()),
                    name: "Vega I".to_string(),
                    kind: PlanetKind::Barren,
                    size: 10,
                    habitable: false,
                    deposits: Resources::new(0.0, 4.0, 0.0),
                    colonized_by: None,
                    homeworld: false,
                    has_moon: false,
                    site: Some(SitePresence {
                        id: SiteId("site_echo_station".to_string()),
                        discovered: false,
                        completed: false,
                    }),
                }],
                stations: Vec::new(),
                asteroid_belt: Some(AsteroidBelt { richness: 3 }),
            },
            StarSystem {
                id: gamma.clone(),
                name: "Altair".to_string(),
                x: 500.0,
                y: 300.0,
                star: StarClass::Orange,
                planets: vec![
                    Planet {
                        id: PlanetId("pl_gamma_1".to_string()),
                        name: "Altair I".to_string(),
                        kind: PlanetKind::Ocean,
                        size: 18,
                        habitable: true,
                        deposits: Resources::new(1.0, 1.0, 4.0),
                        colonized_by: None,
                        homeworld: false,
                        has_moon: false,
                        site: None,
                    },
                    Planet {
                        id: PlanetId("pl_gamma_2".to_string()),
                        name: "Altair II".to_string(),
                        kind: PlanetKind::Barren,
                        size: 8,
                        habitable: false,
                        deposits: Resources::new(0.0, 5.0, 0.0),
                        colonized_by: None,
                        homeworld: false,
                        has_moon: false,
                        site: Some(SitePresence {
                            id: SiteId("site_buried_archive".to_string()),
                            discovered: false,
                            completed: false,
                        }),
                    },
                ],
                stations: Vec::new(),
                asteroid_belt: None,
            },
            StarSystem {
                id: delta.clone(),
                name: "Deneb".to_string(),
                x: 700.0,
                y: 300.0,
                star: StarClass::White,
                planets: vec![Planet {
                    id: PlanetId("pl_delta_1".to_string()),
                    name: "Deneb I".to_string(),
                    kind: PlanetKind::Desert,
                    size: 14,
                    habitable: true,
                    deposits: Resources::new(4.0, 2.0, 0.0),
                    colonized_by: Some(Owner::Ai),
                    homeworld: false,
                    has_moon: false,
                    site: None,
                }],
                stations: Vec::new(),
                asteroid_belt: None,
            },
        ],
        hyperlanes: vec![
            (alpha.clone(), beta.clone()),
            (beta.clone(), gamma.clone()),
            (gamma.clone(), delta.clone()),
        ],
    };

    let player_fleet = Fleet {
        id: FleetId("fleet_001".to_string()),
        name: "Home Fleet".to_string(),
        location: alpha.clone(),
        destination: None,
        orders: None,
        patrol_route: Vec::new(),
        ships: starting_ships(content, 0),
    };
    let ai_fleet = Fleet {
        id: FleetId("fleet_002".to_string()),
        name: "Vanguard Fleet".to_string(),
        location: delta.clone(),
        destination: None,
        orders: None,
        patrol_route: Vec::new(),
        ships: starting_ships(content, 6),
    };

    let player = Faction {
        name: "Terran Accord".to_string(),
        resources: Resources::new(300.0, 300.0, 100.0),
        income: Resources::default(),
        upkeep: Upkeep::default(),
        technology: TechState {
            military: TechTrack {
                researching: true,
                ..TechTrack::default()
            },
            ..TechState::default()
        },
        fleets: vec![player_fleet],
        colonies: vec![Colony {
            id: ColonyId("colony_001".to_string()),
            system: alpha.clone(),
            planet: PlanetId("pl_alpha_1".to_string()),
            name: "Terra Nova".to_string(),
            homeworld: true,
            population: 5.0,
            happiness: 0.85,
            districts: vec![
                DistrictKind::City,
                DistrictKind::City,
                DistrictKind::Mining,
                DistrictKind::Mining,
                DistrictKind::Generator,
                DistrictKind::Generator,
                DistrictKind::Research,
            ],
            buildings: vec![
                Some(BuildingKind::Starport),
                Some(BuildingKind::PowerPlant),
                Some(BuildingKind::ResearchLab),
                None,
            ],
            max_districts: 10,
            build_queue: Vec::new(),
        }],
        controlled_systems: BTreeSet::from([alpha.clone()]),
        known_systems: BTreeSet::from([alpha.clone()]),
        scanned_systems: BTreeSet::from([alpha.clone()]),
        deep_scanned_systems: BTreeSet::from([alpha.clone()]),
        homeworld: Some((alpha, PlanetId("pl_alpha_1".to_string()))),
        notifications: Vec::new(),
        war_exhaustion: 0.0,
        legitimacy: 100.0,
    };

    let ai = Faction {
        name: "Vel'kari Collective".to_string(),
        resources: Resources::new(200.0, 200.0, 50.0),
        income: Resources::default(),
        upkeep: Upkeep::default(),
        technology: TechState::default(),
        fleets: vec![ai_fleet],
        colonies: vec![Colony {
            id: ColonyId("colony_002".to_string()),
            system: delta.clone(),
            planet: PlanetId("pl_delta_1".to_string()),
            name: "Deneb I".to_string(),
            homeworld: false,
            population: 2.0,
            happiness: 0.8,
            districts: vec![
                DistrictKind::City,
                DistrictKind::Mining,
                DistrictKind::Generator,
            ],
            buildings: vec![Some(BuildingKind::Starport), None, None],
            max_districts: 3,
            build_queue: Vec::new(),
        }],
        controlled_systems: BTreeSet::from([delta.clone()]),
        known_systems: BTreeSet::from([delta.clone()]),
        scanned_systems: BTreeSet::from([delta.clone()]),
        deep_scanned_systems: BTreeSet::new(),
        homeworld: Some((delta, PlanetId("pl_delta_1".to_string()))),
        notifications: Vec::new(),
        war_exhaustion: 0.0,
        legitimacy: 100.0,
    };

    GameState {
        turn: 1,
        game_phase: GamePhase::Exploration,
        galaxy,
        player,
        ai,
        diplomacy: DiplomacyState {
            stance: Stance::Neutral,
            trust: 50.0,
            treaties: Vec::new(),
        },
        ai_mind: AiMind::default(),
        excavations: Vec::new(),
        meta_chain: MetaChainProgress::default(),
        pending_event: None,
        last_event_turn: 0,
        combat_log: Vec::new(),
        counters: Counters {
            next_fleet_id: 2,
            next_ship_id: 12,
            next_colony_id: 2,
            next_station_id: 0,
            next_event_id: 0,
        },
    }
}

/// Three corvettes, two frigates, one science vessel, all at full hull.
fn starting_ships(content: &GameContent, id_offset: u64) -> smallvec::SmallVec<[Ship; 8]> {
    let classes = [
        ShipClass::Corvette,
        ShipClass::Corvette,
        ShipClass::Corvette,
        ShipClass::Frigate,
        ShipClass::Frigate,
        ShipClass::Science,
    ];
    classes
        .iter()
        .enumerate()
        .map(|(i, class)| Ship {
            id: ShipId(format!("ship_{:04}", id_offset + i as u64 + 1)),
            class: *class,
            hull: content.ship_classes.get(*class).max_hull,
        })
        .collect()
}

/// Deterministic RNG seeded with 42.
pub fn make_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(42)
}
