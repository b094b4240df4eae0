//! Built-in game content.
//!
//! The full production balance: ship classes, districts, buildings,
//! stations, the three-tier random event pool, the six archaeology sites
//! with their narrative layers, and the tuning constants. Everything the
//! simulation reads but never mutates.

use sim_core::{
    BuildingDef, BuildingTable, ChoiceConsequences, Constants, Cost, DistrictDef, DistrictTable,
    EventChoiceDef, EventCondition, EventDef, EventEffects, EventRequirement, EventTier,
    GameContent, LayerDef, Resources, ShipClassDef, ShipClassTable, SiteChoiceDef, SiteDef,
    SiteId, StationDef, StationTable, TechBonus, TechCategory, Upkeep,
};

pub const CONTENT_VERSION: &str = "1.0.0";

pub fn builtin_content() -> GameContent {
    GameContent {
        content_version: CONTENT_VERSION.to_string(),
        ship_classes: ship_classes(),
        districts: districts(),
        buildings: buildings(),
        stations: stations(),
        events: events(),
        sites: sites(),
        constants: constants(),
    }
}

// ---------------------------------------------------------------------------
// Structures
// ---------------------------------------------------------------------------

fn ship_classes() -> ShipClassTable {
    ShipClassTable {
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
    }
}

fn districts() -> DistrictTable {
    DistrictTable {
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
    }
}

fn buildings() -> BuildingTable {
    BuildingTable {
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
    }
}

fn stations() -> StationTable {
    StationTable {
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
    }
}

// ---------------------------------------------------------------------------
// Random events
// ---------------------------------------------------------------------------

fn ev(text: &str, effects: EventEffects, outcome: &str) -> EventChoiceDef {
    EventChoiceDef {
        text: text.to_string(),
        requires: None,
        effects,
        outcome: outcome.to_string(),
    }
}

#[allow(clippy::too_many_lines)]
fn events() -> Vec<EventDef> {
    vec![
        EventDef {
            id: "solar_flare".to_string(),
            title: "Solar Flare Activity".to_string(),
            description: "Unusual solar activity in one of your systems has temporarily \
                          disrupted mining operations."
                .to_string(),
            tier: EventTier::Minor,
            weight: 2,
            condition: None,
            choices: vec![
                ev(
                    "Wait it out",
                    EventEffects {
                        minerals: -20.0,
                        ..EventEffects::default()
                    },
                    "Mining operations resume after the flare subsides.",
                ),
                EventChoiceDef {
                    requires: Some(EventRequirement {
                        energy: 30.0,
                        ..EventRequirement::default()
                    }),
                    ..ev(
                        "Invest in shielding",
                        EventEffects {
                            energy: -30.0,
                            ..EventEffects::default()
                        },
                        "Protective measures minimize the disruption.",
                    )
                },
            ],
        },
        EventDef {
            id: "trade_opportunity".to_string(),
            title: "Trading Vessel".to_string(),
            description: "An independent merchant vessel offers rare materials at favorable \
                          rates."
                .to_string(),
            tier: EventTier::Minor,
            weight: 2,
            condition: None,
            choices: vec![
                EventChoiceDef {
                    requires: Some(EventRequirement {
                        energy: 50.0,
                        ..EventRequirement::default()
                    }),
                    ..ev(
                        "Purchase materials (50 energy)",
                        EventEffects {
                            energy: -50.0,
                            minerals: 80.0,
                            ..EventEffects::default()
                        },
                        "A profitable exchange.",
                    )
                },
                ev(
                    "Decline the offer",
                    EventEffects::default(),
                    "The merchant moves on.",
                ),
            ],
        },
        EventDef {
            id: "research_breakthrough".to_string(),
            title: "Research Breakthrough".to_string(),
            description: "Your scientists report an unexpected discovery during routine \
                          research."
                .to_string(),
            tier: EventTier::Minor,
            weight: 1,
            condition: None,
            choices: vec![
                ev(
                    "Pursue the discovery",
                    EventEffects {
                        research: 30.0,
                        ..EventEffects::default()
                    },
                    "The breakthrough accelerates your research programs.",
                ),
                ev(
                    "Focus on practical applications",
                    EventEffects {
                        energy: 25.0,
                        minerals: 25.0,
                        ..EventEffects::default()
                    },
                    "Immediate benefits flow from the discovery.",
                ),
            ],
        },
        EventDef {
            id: "refugee_ship".to_string(),
            title: "Refugee Ship".to_string(),
            description: "A damaged vessel carrying refugees from a distant conflict requests \
                          sanctuary."
                .to_string(),
            tier: EventTier::Minor,
            weight: 2,
            condition: None,
            choices: vec![
                ev(
                    "Welcome them",
                    EventEffects {
                        energy: -20.0,
                        population: 0.5,
                        ..EventEffects::default()
                    },
                    "The refugees integrate into your colonies, grateful for sanctuary.",
                ),
                ev(
                    "Provide supplies and directions",
                    EventEffects {
                        minerals: -15.0,
                        energy: -10.0,
                        ..EventEffects::default()
                    },
                    "The refugees thank you and continue their journey.",
                ),
                ev(
                    "Turn them away",
                    EventEffects::default(),
                    "The ship departs. You wonder what became of them.",
                ),
            ],
        },
        EventDef {
            id: "pirate_activity".to_string(),
            title: "Pirate Activity".to_string(),
            description: "Pirates have been spotted operating near your trade lanes. They \
                          demand tribute or face raids."
                .to_string(),
            tier: EventTier::Medium,
            weight: 2,
            condition: None,
            choices: vec![
                EventChoiceDef {
                    requires: Some(EventRequirement {
                        minerals: 100.0,
                        ..EventRequirement::default()
                    }),
                    ..ev(
                        "Pay tribute (100 minerals)",
                        EventEffects {
                            minerals: -100.0,
                            ..EventEffects::default()
                        },
                        "The pirates accept payment and move on... for now.",
                    )
                },
                ev(
                    "Refuse and reinforce",
                    EventEffects {
                        fleet_damage: 0.1,
                        ..EventEffects::default()
                    },
                    "Your patrols engage the pirates. Some ships take damage before they're \
                     driven off.",
                ),
                EventChoiceDef {
                    requires: Some(EventRequirement {
                        military_level: 2,
                        ..EventRequirement::default()
                    }),
                    ..ev(
                        "Set a trap",
                        EventEffects {
                            minerals: 50.0,
                            ..EventEffects::default()
                        },
                        "Your superior tactics catch the pirates off guard. You capture their \
                         supplies.",
                    )
                },
            ],
        },
        EventDef {
            id: "asteroid_rich".to_string(),
            title: "Mineral-Rich Asteroid".to_string(),
            description: "Surveys detect a mineral-rich asteroid passing through one of your \
                          systems."
                .to_string(),
            tier: EventTier::Medium,
            weight: 1,
            condition: None,
            choices: vec![
                EventChoiceDef {
                    requires: Some(EventRequirement {
                        energy: 50.0,
                        ..EventRequirement::default()
                    }),
                    ..ev(
                        "Mining operation (costs 50 energy)",
                        EventEffects {
                            energy: -50.0,
                            minerals: 150.0,
                            ..EventEffects::default()
                        },
                        "Intensive mining extracts valuable minerals before the asteroid moves \
                         on.",
                    )
                },
                ev(
                    "Let it pass",
                    EventEffects::default(),
                    "The asteroid continues its journey through the void.",
                ),
            ],
        },
        EventDef {
            id: "spy_detected".to_string(),
            title: "Spy Detected".to_string(),
            description: "Your security forces have detected what appears to be an enemy \
                          intelligence operative in your territory."
                .to_string(),
            tier: EventTier::Medium,
            weight: 2,
            condition: Some(EventCondition::AiStanceNotFriendly),
            choices: vec![
                ev(
                    "Capture and interrogate",
                    EventEffects {
                        subterfuge_progress: 20.0,
                        ..EventEffects::default()
                    },
                    "The spy reveals useful information about enemy operations.",
                ),
                ev(
                    "Feed false information",
                    EventEffects {
                        ai_trust: -10.0,
                        ..EventEffects::default()
                    },
                    "The spy returns with misleading intelligence.",
                ),
                ev(
                    "Quietly eliminate",
                    EventEffects::default(),
                    "The spy disappears. A message is sent.",
                ),
            ],
        },
        EventDef {
            id: "ancient_probe".to_string(),
            title: "Ancient Probe".to_string(),
            description: "An automated probe of ancient origin has entered your space, \
                          scanning everything it passes."
                .to_string(),
            tier: EventTier::Medium,
            weight: 1,
            condition: None,
            choices: vec![
                ev(
                    "Capture it for study",
                    EventEffects {
                        research: 75.0,
                        ..EventEffects::default()
                    },
                    "The probe's technology yields valuable insights.",
                ),
                ev(
                    "Attempt communication",
                    EventEffects {
                        research: 40.0,
                        ..EventEffects::default()
                    },
                    "The probe transmits coordinates before shutting down. Perhaps someone is \
                     waiting.",
                ),
                ev(
                    "Destroy it",
                    EventEffects::default(),
                    "Whatever secrets it held are lost. But so is whatever was monitoring it.",
                ),
            ],
        },
        EventDef {
            id: "precursor_signal".to_string(),
            title: "Precursor Signal".to_string(),
            description: "Deep space arrays have detected an artificial signal matching \
                          patterns from excavated Architect technology."
                .to_string(),
            tier: EventTier::Rare,
            weight: 1,
            condition: None,
            choices: vec![
                ev(
                    "Trace the signal",
                    EventEffects {
                        research: 100.0,
                        reveal_site: true,
                        ..EventEffects::default()
                    },
                    "Following the signal reveals something extraordinary...",
                ),
                ev(
                    "Broadcast a response",
                    EventEffects {
                        research: 50.0,
                        ..EventEffects::default()
                    },
                    "Your response echoes into the void. If anything hears, it doesn't answer.",
                ),
                ev(
                    "Jam the signal",
                    EventEffects {
                        subterfuge_progress: 30.0,
                        ..EventEffects::default()
                    },
                    "The signal falls silent. Whatever sent it now knows you're here - and \
                     capable.",
                ),
            ],
        },
        EventDef {
            id: "dimensional_anomaly".to_string(),
            title: "Dimensional Anomaly".to_string(),
            description: "Space itself seems to fold around an object that defies conventional \
                          physics. Energy readings are off the scale."
                .to_string(),
            tier: EventTier::Rare,
            weight: 1,
            condition: None,
            choices: vec![
                ev(
                    "Investigate cautiously",
                    EventEffects {
                        research: 150.0,
                        ..EventEffects::default()
                    },
                    "Your scientists make discoveries that will take years to fully understand.",
                ),
                ev(
                    "Harvest the energy",
                    EventEffects {
                        energy: 300.0,
                        ..EventEffects::default()
                    },
                    "Vast amounts of energy are siphoned before the anomaly collapses.",
                ),
                ev(
                    "Seal the area",
                    EventEffects::default(),
                    "Some mysteries are better left alone.",
                ),
            ],
        },
    ]
}

// ---------------------------------------------------------------------------
// Archaeology sites
// ---------------------------------------------------------------------------

fn dig(text: &str, outcome: &str, rewards: Resources) -> SiteChoiceDef {
    SiteChoiceDef {
        text: text.to_string(),
        hint: None,
        outcome: outcome.to_string(),
        rewards,
        tech_bonus: None,
        consequences: None,
        lore: None,
        cross_reference: None,
        meta_chain_key: None,
    }
}

fn sites() -> Vec<SiteDef> {
    vec![
        crystal_caves(),
        void_signal(),
        stellar_monument(),
        ancient_station(),
        silent_tomb(),
        abandoned_colony(),
    ]
}

fn crystal_caves() -> SiteDef {
    SiteDef {
        id: SiteId("site_crystal_caves".to_string()),
        name: "The Resonance Caverns".to_string(),
        description: "A network of caves lined with crystals that vibrate at frequencies \
                      matching stellar harmonics."
            .to_string(),
        layers: vec![
            LayerDef {
                title: "The Singing Stones".to_string(),
                narrative: "The cave entrance on {PLANET_NAME} pulses with sound at the edge \
                            of hearing. Inside, massive crystal formations resonate with each \
                            other, creating complex harmonies that your equipment struggles to \
                            analyze.\n\nThese aren't natural formations. Someone grew these \
                            crystals with purpose."
                    .to_string(),
                choices: vec![
                    SiteChoiceDef {
                        lore: Some("The crystals sing star positions. They're a map written \
                                    in music.".to_string()),
                        ..dig(
                            "Record the harmonic patterns",
                            "The patterns are information - complex data encoded in sound \
                             waves.",
                            Resources::new(0.0, 0.0, 30.0),
                        )
                    },
                    SiteChoiceDef {
                        lore: Some("These crystals weren't mined - they were sung into \
                                    existence by the Stellar Architects.".to_string()),
                        meta_chain_key: Some("crystal_origin".to_string()),
                        ..dig(
                            "Analyze crystal composition",
                            "The crystals contain elements not found in normal space. They \
                             were manufactured elsewhere.",
                            Resources::new(0.0, 40.0, 0.0),
                        )
                    },
                ],
            },
            LayerDef {
                title: "The Heart Chamber".to_string(),
                narrative: "At the cavern's center, a single crystal formation rises like a \
                            monument. It's different from the others - darker, denser, and \
                            when your team approaches, it begins to glow.\n\nIt responds to \
                            consciousness. It wants to show you something."
                    .to_string(),
                choices: vec![
                    SiteChoiceDef {
                        lore: Some("The Architects built the hyperlanes. They connected the \
                                    stars like neurons in a vast mind.".to_string()),
                        meta_chain_key: Some("crystal_origin".to_string()),
                        ..dig(
                            "Allow the connection",
                            "Your mind expands. You see the galaxy from above, hyperlanes \
                             glowing like a neural network.",
                            Resources::new(0.0, 0.0, 50.0),
                        )
                    },
                    SiteChoiceDef {
                        hint: Some("Slower, safer".to_string()),
                        lore: Some("Surface scans reveal the crystal is billions of years \
                                    old. It predates the formation of most nearby stars.".to_string()),
                        ..dig(
                            "Resist and analyze from distance",
                            "The crystal dims but yields data. Safe, but incomplete.",
                            Resources::new(0.0, 30.0, 30.0),
                        )
                    },
                ],
            },
            LayerDef {
                title: "The Star Map".to_string(),
                narrative: "The heart crystal projects a holographic display: a map of the \
                            local cluster, with certain stars marked in gold. These aren't \
                            random - they're the stars where other ruins wait. The Architects \
                            left a trail.\n\nOne location pulses urgently, marked as \"THE \
                            VOICE.\" The glyphs beside it match {CROSS_REF:site_void_signal}."
                    .to_string(),
                choices: vec![
                    SiteChoiceDef {
                        lore: Some("The Architects marked their greatest works. The Voice was \
                                    their final message to those who would follow.".to_string()),
                        cross_reference: Some(SiteId("site_void_signal".to_string())),
                        ..dig(
                            "Memorize the marked locations",
                            "The coordinates sear into memory. You know where to look next.",
                            Resources::new(0.0, 0.0, 60.0),
                        )
                    },
                    SiteChoiceDef {
                        tech_bonus: Some(TechBonus {
                            category: TechCategory::Military,
                            amount: 35.0,
                        }),
                        lore: Some("You've sacrificed knowledge for power. The map fades, but \
                                    its secrets are gone.".to_string()),
                        ..dig(
                            "Extract the projection technology",
                            "The holographic system can be adapted for tactical use.",
                            Resources::new(0.0, 50.0, 0.0),
                        )
                    },
                ],
            },
            LayerDef {
                title: "The Architect's Gift".to_string(),
                narrative: "As you prepare to leave, the heart crystal splits open. Inside, a \
                            smaller crystal floats, perfectly preserved. It hums with \
                            contained energy - a gift left for whoever would find this place \
                            and understand its purpose."
                    .to_string(),
                choices: vec![
                    SiteChoiceDef {
                        lore: Some("The Architect's key. Three exist. Together, they reveal \
                                    the truth the Architects died to preserve.".to_string()),
                        meta_chain_key: Some("crystal_origin".to_string()),
                        ..dig(
                            "Take the crystal intact",
                            "The crystal resonates with something far away. You feel \
                             connected to a larger purpose.",
                            Resources::new(0.0, 0.0, 75.0),
                        )
                    },
                    SiteChoiceDef {
                        tech_bonus: Some(TechBonus {
                            category: TechCategory::Economy,
                            amount: 40.0,
                        }),
                        lore: Some("Raw power, extracted. Whatever the crystal was meant to \
                                    unlock remains sealed.".to_string()),
                        ..dig(
                            "Fragment it for analysis",
                            "The crystal yields materials and data, but its greater purpose \
                             is lost.",
                            Resources::new(100.0, 100.0, 0.0),
                        )
                    },
                ],
            },
        ],
        completion_bonus: Resources::new(50.0, 0.0, 100.0),
    }
}

fn void_signal() -> SiteDef {
    SiteDef {
        id: SiteId("site_void_signal".to_string()),
        name: "The Echo Station".to_string(),
        description: "A relay station broadcasting an ancient signal into a region of space \
                      that should be empty."
            .to_string(),
        layers: vec![
            LayerDef {
                title: "The Endless Broadcast".to_string(),
                narrative: "The station above {PLANET_NAME} has been transmitting the same \
                            signal for eons. Your analysts work to decode it, and when they \
                            succeed, the message is simple: coordinates and a single word in \
                            a dead language.\n\nThe word translates as \"REMEMBER.\""
                    .to_string(),
                choices: vec![
                    SiteChoiceDef {
                        lore: Some("The Architects hid something in the void. The signal \
                                    exists to remind someone - or something - where to look.".to_string()),
                        ..dig(
                            "Trace the signal's destination",
                            "The signal points to empty space - but the emptiness is \
                             artificial. Something is hidden there.",
                            Resources::new(0.0, 0.0, 40.0),
                        )
                    },
                    SiteChoiceDef {
                        lore: Some("This is one of many stations. They formed a network, \
                                    singing the same song to the void.".to_string()),
                        cross_reference: Some(SiteId("site_crystal_caves".to_string())),
                        ..dig(
                            "Analyze the signal's origin",
                            "The signal originated from multiple sources simultaneously, \
                             coordinated across vast distances.",
                            Resources::new(0.0, 0.0, 35.0),
                        )
                    },
                ],
            },
            LayerDef {
                title: "The Listener's Log".to_string(),
                narrative: "The station wasn't just transmitting - it was receiving. Logs \
                            show responses to the signal, getting progressively more distant \
                            over millions of years. Someone out there was answering.\n\nThe \
                            last response came ten thousand years ago. Then silence."
                    .to_string(),
                choices: vec![
                    SiteChoiceDef {
                        lore: Some("The Architects maintained their network until something \
                                    ended them. The stations continue without their builders.".to_string()),
                        meta_chain_key: Some("void_message".to_string()),
                        ..dig(
                            "Study the response patterns",
                            "The responses were acknowledgments. Something was maintaining \
                             the network, until it stopped.",
                            Resources::new(0.0, 0.0, 50.0),
                        )
                    },
                    SiteChoiceDef {
                        consequences: Some(ChoiceConsequences {
                            research_loss: 0.0,
                            triggered_event: Some("ancient_probe".to_string()),
                        }),
                        lore: Some("You've announced your presence to the void. Whether that \
                                    was wise remains to be seen.".to_string()),
                        ..dig(
                            "Broadcast a new message",
                            "Your signal joins the chorus. If anything remains to hear it, \
                             it knows you're here now.",
                            Resources::new(0.0, 0.0, 30.0),
                        )
                    },
                ],
            },
            LayerDef {
                title: "The Hidden Archive".to_string(),
                narrative: "Behind the transmitter array, a sealed chamber contains data \
                            storage of staggering capacity. Most is corrupted beyond \
                            recovery, but fragments remain: images of beings of light \
                            constructing stars, shaping hyperlanes, building a galaxy.\n\nThe \
                            Architects weren't just advanced. They were architects in truth."
                    .to_string(),
                choices: vec![
                    SiteChoiceDef {
                        lore: Some("The Architects built the hyperlane network. They seeded \
                                    life throughout the galaxy. And then they faced something \
                                    that could destroy even them.".to_string()),
                        meta_chain_key: Some("void_message".to_string()),
                        ..dig(
                            "Download everything recoverable",
                            "Terabytes of data transfer, most incomprehensible. But \
                             fragments reveal profound truths.",
                            Resources::new(0.0, 0.0, 75.0),
                        )
                    },
                    SiteChoiceDef {
                        tech_bonus: Some(TechBonus {
                            category: TechCategory::Subterfuge,
                            amount: 50.0,
                        }),
                        lore: Some("Stealth technology of impossible sophistication. The \
                                    Architects knew how to hide from things that hunted \
                                    between stars.".to_string()),
                        ..dig(
                            "Focus on practical technology",
                            "You extract what can be immediately applied, leaving mysteries \
                             for others.",
                            Resources::new(80.0, 80.0, 0.0),
                        )
                    },
                ],
            },
            LayerDef {
                title: "The Architect's Plea".to_string(),
                narrative: "The final uncorrupted file is a message, preserved for whoever \
                            would find it:\n\n\"We built this galaxy to be a fortress against \
                            the dark. We failed. But we left keys for those who would come \
                            after. Find the three voices. Sing them together. The Monument \
                            will answer, and you will learn how to finish what we began.\""
                    .to_string(),
                choices: vec![
                    SiteChoiceDef {
                        lore: Some("The three voices are scattered across the stars. \
                                    Together, they unlock the Architects' greatest secret.".to_string()),
                        meta_chain_key: Some("void_message".to_string()),
                        ..dig(
                            "Preserve the message",
                            "The Architects' final words are recorded. Three voices, three \
                             keys, one answer.",
                            Resources::new(0.0, 0.0, 60.0),
                        )
                    },
                    SiteChoiceDef {
                        lore: Some("The Monument exists. It waits at the coordinates the \
                                    Architects marked as sacred.".to_string()),
                        cross_reference: Some(SiteId("site_stellar_monument".to_string())),
                        ..dig(
                            "Search for the Monument's location",
                            "The station's data yields coordinates - a specific location \
                             that matches no charted world.",
                            Resources::new(0.0, 0.0, 70.0),
                        )
                    },
                ],
            },
        ],
        completion_bonus: Resources::new(75.0, 0.0, 100.0),
    }
}

fn stellar_monument() -> SiteDef {
    SiteDef {
        id: SiteId("site_stellar_monument".to_string()),
        name: "The Stellar Monument".to_string(),
        description: "An artificial structure the size of a small moon, orbiting where no \
                      planet should exist."
            .to_string(),
        layers: vec![
            LayerDef {
                title: "The Impossible Object".to_string(),
                narrative: "It shouldn't exist. An artificial construct of perfect geometry \
                            hangs over {PLANET_NAME}, orbiting a gravitational point that has \
                            no mass. The Monument floats in space like a memorial to physics \
                            itself.\n\nYour ship approaches what appear to be docking clamps, \
                            ancient but functional."
                    .to_string(),
                choices: vec![
                    SiteChoiceDef {
                        lore: Some("The Monument welcomes visitors. It was built to be \
                                    found, by those worthy of finding it.".to_string()),
                        ..dig(
                            "Dock with the structure",
                            "The clamps engage automatically. Something inside the Monument \
                             noticed your approach.",
                            Resources::new(0.0, 0.0, 35.0),
                        )
                    },
                    SiteChoiceDef {
                        lore: Some("The symbols match those found at other Architect ruins. \
                                    This is where all paths were meant to lead.".to_string()),
                        cross_reference: Some(SiteId("site_crystal_caves".to_string())),
                        ..dig(
                            "Scan the exterior thoroughly first",
                            "The surface is covered in symbols you have seen before. This is \
                             the culmination.",
                            Resources::new(0.0, 0.0, 40.0),
                        )
                    },
                ],
            },
            LayerDef {
                title: "The Hall of Voices".to_string(),
                narrative: "Inside, an enormous chamber awaits. Three alcoves line the walls, \
                            each containing a crystalline pedestal. Two pedestals glow \
                            faintly - responding to something in your possession? In your \
                            memory?\n\nIf you've walked the other ruins, their gifts resonate \
                            here."
                    .to_string(),
                choices: vec![
                    SiteChoiceDef {
                        lore: Some("The voices harmonize. You understand now: the hyperlanes \
                                    are a weapon, a shield, a key. They can be awakened.".to_string()),
                        meta_chain_key: Some("stellar_architects".to_string()),
                        ..dig(
                            "Approach the resonating pedestals",
                            "The crystals sing together. Knowledge floods your mind - the \
                             Architects' gift to their inheritors.",
                            Resources::new(0.0, 0.0, 100.0),
                        )
                    },
                    SiteChoiceDef {
                        lore: Some("The third voice is missing. Without all three, the \
                                    Monument's secret remains sealed.".to_string()),
                        ..dig(
                            "Examine the dormant pedestal",
                            "It awaits a key you don't possess. Somewhere, another ruin \
                             remains undiscovered.",
                            Resources::new(0.0, 0.0, 50.0),
                        )
                    },
                ],
            },
            LayerDef {
                title: "The Architects' Legacy".to_string(),
                narrative: "The Monument's central chamber opens. Within, a holographic \
                            display shows the galaxy - but the hyperlanes pulse with light. A \
                            control interface rises from the floor.\n\nThe Architects didn't \
                            just build travel lanes. They built a defensive grid, dormant for \
                            eons, waiting to be activated."
                    .to_string(),
                choices: vec![
                    SiteChoiceDef {
                        tech_bonus: Some(TechBonus {
                            category: TechCategory::Military,
                            amount: 50.0,
                        }),
                        lore: Some("The Architects prepared this galaxy for war. A war \
                                    against something that consumes stars.".to_string()),
                        meta_chain_key: Some("stellar_architects".to_string()),
                        ..dig(
                            "Study the grid's capabilities",
                            "The hyperlanes can be weaponized, disrupted, or strengthened. \
                             The galaxy itself is a fortress.",
                            Resources::new(0.0, 0.0, 75.0),
                        )
                    },
                    SiteChoiceDef {
                        lore: Some("The Monument's power is vast but finite. The Architects \
                                    saved it for the final battle.".to_string()),
                        ..dig(
                            "Access the power systems",
                            "Energy beyond measure flows through the Monument. You tap a \
                             fraction for your empire.",
                            Resources::new(200.0, 100.0, 0.0),
                        )
                    },
                ],
            },
            LayerDef {
                title: "The Final Truth".to_string(),
                narrative: "At the chamber's heart, a final message awaits:\n\n\"We are gone, \
                            but our work remains. The Devourers will return - they always \
                            return. When they do, use what we left behind. The hyperlanes are \
                            your sword. The Monument is your shield. But the will to fight \
                            must be your own.\n\nInherit our legacy. Save what we could \
                            not.\""
                    .to_string(),
                choices: vec![
                    SiteChoiceDef {
                        lore: Some("You are the Architects' heir. The galaxy's defense is now \
                                    your responsibility.".to_string()),
                        meta_chain_key: Some("stellar_architects".to_string()),
                        ..dig(
                            "Accept the inheritance",
                            "The Monument acknowledges you as heir to the Architects. \
                             Systems begin transferring to your control.",
                            Resources::new(100.0, 100.0, 150.0),
                        )
                    },
                    SiteChoiceDef {
                        tech_bonus: Some(TechBonus {
                            category: TechCategory::Economy,
                            amount: 75.0,
                        }),
                        lore: Some("The inheritance remains unclaimed. Perhaps another will \
                                    be braver.".to_string()),
                        ..dig(
                            "Take only what you need",
                            "You claim resources but refuse the burden. The Monument falls \
                             silent, waiting for another.",
                            Resources::new(200.0, 200.0, 0.0),
                        )
                    },
                ],
            },
        ],
        completion_bonus: Resources::new(100.0, 100.0, 150.0),
    }
}

fn ancient_station() -> SiteDef {
    SiteDef {
        id: SiteId("site_ancient_station".to_string()),
        name: "The Drifting Observatory".to_string(),
        description: "A derelict orbital station of unknown origin, its hull scarred by \
                      millennia of micrometeorite impacts."
            .to_string(),
        layers: vec![
            LayerDef {
                title: "Initial Survey".to_string(),
                narrative: "The station hangs in orbit around {PLANET_NAME}, its running \
                            lights long dead. Preliminary scans detect residual power \
                            signatures deep within the structure. The exterior shows \
                            deliberate damage patterns - this wasn't abandonment, it was \
                            sabotage.\n\nThree entry points present themselves: a damaged \
                            cargo bay, a sealed crew airlock, and a breach in what appears to \
                            be the observation deck."
                    .to_string(),
                choices: vec![
                    SiteChoiceDef {
                        hint: Some("Safer but may miss important areas".to_string()),
                        ..dig(
                            "Enter through the cargo bay",
                            "You navigate through floating debris and damaged containers.",
                            Resources::new(0.0, 25.0, 0.0),
                        )
                    },
                    SiteChoiceDef {
                        hint: Some("May require bypassing security".to_string()),
                        ..dig(
                            "Attempt the sealed airlock",
                            "The airlock responds to universal protocols - whoever built \
                             this wanted visitors someday.",
                            Resources::new(0.0, 0.0, 15.0),
                        )
                    },
                    SiteChoiceDef {
                        hint: Some("Direct but potentially dangerous".to_string()),
                        consequences: Some(ChoiceConsequences {
                            research_loss: 5.0,
                            triggered_event: None,
                        }),
                        ..dig(
                            "Enter through the observation breach",
                            "The view from here is staggering - someone built this to watch \
                             something specific.",
                            Resources::new(0.0, 0.0, 20.0),
                        )
                    },
                ],
            },
            LayerDef {
                title: "The Main Computer".to_string(),
                narrative: "The station's central computer core still functions, though \
                            corrupted data streams flicker across ancient displays. A \
                            translation matrix slowly parses the alien text: this was a \
                            monitoring station, watching for something in deep space.\n\nThe \
                            logs reference \"the signal\" repeatedly. Most entries are \
                            corrupted, but three data clusters remain intact."
                    .to_string(),
                choices: vec![
                    SiteChoiceDef {
                        lore: Some("The station tracked objects across multiple systems. \
                                    Several coordinates match known space.".to_string()),
                        cross_reference: Some(SiteId("site_void_signal".to_string())),
                        ..dig(
                            "Access the astronomical records",
                            "Star charts unfold, marking locations across the galaxy. Some \
                             systems bear warning glyphs.",
                            Resources::new(0.0, 0.0, 30.0),
                        )
                    },
                    SiteChoiceDef {
                        lore: Some("The inhabitants were watchers, bred for vigil. They \
                                    called themselves the Selurian.".to_string()),
                        ..dig(
                            "Recover the personnel files",
                            "Images of the crew emerge - humanoid but wrong. Their eyes are \
                             too large, adapted for darkness.",
                            Resources::new(0.0, 0.0, 20.0),
                        )
                    },
                    SiteChoiceDef {
                        tech_bonus: Some(TechBonus {
                            category: TechCategory::Subterfuge,
                            amount: 25.0,
                        }),
                        lore: Some("Something drove the Selurian to eternal vigilance. These \
                                    protocols suggest they feared it might come back.".to_string()),
                        ..dig(
                            "Download the warning protocols",
                            "Emergency procedures scroll past. They weren't watching for \
                             discovery - they were watching for return.",
                            Resources::new(40.0, 0.0, 0.0),
                        )
                    },
                ],
            },
            LayerDef {
                title: "The Observatory Chamber".to_string(),
                narrative: "At the station's heart, an enormous lens array points into the \
                            void. The targeting computer indicates it was focused on a \
                            specific region of space - empty now, but marked with the \
                            designation \"ORIGIN POINT.\"\n\nBeside the controls, a preserved \
                            log crystal contains the final entry of the station commander."
                    .to_string(),
                choices: vec![
                    SiteChoiceDef {
                        lore: Some("Whatever they watched for, it came from beyond known \
                                    space. The Selurian tracked its approach for centuries.".to_string()),
                        ..dig(
                            "Analyze the lens targeting data",
                            "The coordinates point to a region of apparently empty space, \
                             lightyears distant.",
                            Resources::new(0.0, 0.0, 35.0),
                        )
                    },
                    SiteChoiceDef {
                        lore: Some("\"We cannot stop it. We can only ensure others have time \
                                    to prepare. The signal must reach the Architects.\"".to_string()),
                        ..dig(
                            "Play the commander's final log",
                            "A weary voice speaks of duty and sacrifice. They knew what was \
                             coming. They chose to stay.",
                            Resources::new(0.0, 0.0, 25.0),
                        )
                    },
                ],
            },
            LayerDef {
                title: "The Final Chamber".to_string(),
                narrative: "Behind a sealed door marked with warning glyphs, you discover \
                            the station's true purpose: a transmitter array, still powered, \
                            still broadcasting a single repeating message into deep \
                            space.\n\nThe message is simple, barely more than a pulse. But \
                            it's been broadcasting for ten thousand years."
                    .to_string(),
                choices: vec![
                    SiteChoiceDef {
                        lore: Some("The Selurian message warns of \"those who dream between \
                                    stars.\" It begs recipients not to answer if called.".to_string()),
                        ..dig(
                            "Decipher the message content",
                            "A warning, encoded in mathematics. Something is sleeping. \
                             Something should not be woken.",
                            Resources::new(0.0, 0.0, 50.0),
                        )
                    },
                    SiteChoiceDef {
                        consequences: Some(ChoiceConsequences {
                            research_loss: 0.0,
                            triggered_event: Some("precursor_signal".to_string()),
                        }),
                        lore: Some("The warning is silenced. If anything was listening, it \
                                    now knows the watchers are gone.".to_string()),
                        ..dig(
                            "Shut down the transmitter",
                            "Silence falls for the first time in millennia. Whatever they \
                             feared - you've stopped warning the galaxy.",
                            Resources::new(100.0, 0.0, 0.0),
                        )
                    },
                    SiteChoiceDef {
                        tech_bonus: Some(TechBonus {
                            category: TechCategory::Subterfuge,
                            amount: 30.0,
                        }),
                        lore: Some("You've amplified an ancient warning. Whether anyone is \
                                    left to heed it remains unknown.".to_string()),
                        ..dig(
                            "Boost the signal strength",
                            "The message screams into the void with renewed urgency. \
                             Somewhere, perhaps, someone will hear.",
                            Resources::new(0.0, 0.0, 40.0),
                        )
                    },
                ],
            },
        ],
        completion_bonus: Resources::new(50.0, 0.0, 50.0),
    }
}

fn silent_tomb() -> SiteDef {
    SiteDef {
        id: SiteId("site_silent_tomb".to_string()),
        name: "The Silent Tomb".to_string(),
        description: "A massive artificial structure buried deep beneath the surface. It \
                      radiates cold."
            .to_string(),
        layers: vec![
            LayerDef {
                title: "Descent".to_string(),
                narrative: "The entrance shaft on {PLANET_NAME} descends three kilometers \
                            through solid rock, carved with impossible precision. \
                            Temperature drops steadily as you descend. At the bottom, a vast \
                            chamber opens - and within it, row upon row of crystal \
                            sarcophagi, each containing a preserved alien form.\n\nThey are \
                            not the Selurian. These are something older."
                    .to_string(),
                choices: vec![
                    SiteChoiceDef {
                        lore: Some("The preserved beings have six-fold symmetry. Their \
                                    bodies seem designed rather than evolved.".to_string()),
                        ..dig(
                            "Examine the nearest sarcophagus",
                            "The occupant appears humanoid but symmetrical in ways biology \
                             shouldn't allow. It's beautiful and deeply wrong.",
                            Resources::new(0.0, 0.0, 25.0),
                        )
                    },
                    SiteChoiceDef {
                        lore: Some("The tomb's construction predates known civilization by \
                                    millions of years. It was built to last.".to_string()),
                        ..dig(
                            "Study the chamber architecture",
                            "The geometry hurts to look at. This place was built to contain \
                             something - or someone.",
                            Resources::new(0.0, 30.0, 0.0),
                        )
                    },
                    SiteChoiceDef {
                        lore: Some("The control systems respond to proximity. Something here \
                                    wants to communicate.".to_string()),
                        ..dig(
                            "Search for control systems",
                            "Near the far wall, a console pulses with faint light. It's \
                             waiting.",
                            Resources::new(0.0, 0.0, 20.0),
                        )
                    },
                ],
            },
            LayerDef {
                title: "The Preserved".to_string(),
                narrative: "Deeper analysis reveals the truth: these aren't corpses. The \
                            beings in the sarcophagi are alive - in a state of suspension so \
                            profound it barely registers as life. Millions of them, sleeping \
                            through epochs.\n\nOne sarcophagus differs from the rest. It's \
                            larger, more ornate, and its occupant's eyes are open."
                    .to_string(),
                choices: vec![
                    SiteChoiceDef {
                        consequences: Some(ChoiceConsequences {
                            research_loss: 10.0,
                            triggered_event: None,
                        }),
                        lore: Some("The elder being communicates through directed thought. \
                                    It shows you images of fire consuming stars.".to_string()),
                        ..dig(
                            "Approach the awakened one",
                            "Its eyes track your movement. It cannot move, cannot speak. \
                             But it sees you.",
                            Resources::new(0.0, 0.0, 40.0),
                        )
                    },
                    SiteChoiceDef {
                        tech_bonus: Some(TechBonus {
                            category: TechCategory::Economy,
                            amount: 30.0,
                        }),
                        lore: Some("Their suspension technology could preserve life \
                                    indefinitely. They chose eternity over extinction.".to_string()),
                        ..dig(
                            "Analyze the suspension technology",
                            "The technology is beyond your understanding, but fragments of \
                             data yield insights.",
                            Resources::new(0.0, 0.0, 35.0),
                        )
                    },
                ],
            },
            LayerDef {
                title: "The Dreaming Mind".to_string(),
                narrative: "The elder being's psychic emanations grow stronger. Images flood \
                            your mind: a galaxy in flames, stars dying before their time, \
                            entire civilizations consumed by something that moved between \
                            worlds like a plague.\n\nThese beings didn't retreat here to \
                            sleep. They're hiding."
                    .to_string(),
                choices: vec![
                    SiteChoiceDef {
                        lore: Some("The Devourers consumed the elder race's civilization. \
                                    The sleepers chose eternal fugue over feeding that \
                                    hunger.".to_string()),
                        cross_reference: Some(SiteId("site_void_signal".to_string())),
                        ..dig(
                            "Ask what they're hiding from",
                            "The image sears itself into memory: hunger given form, \
                             emptiness that consumes. The Devourers.",
                            Resources::new(0.0, 0.0, 50.0),
                        )
                    },
                    SiteChoiceDef {
                        lore: Some("The sleepers serve as living memory. When the Devourers \
                                    return, they will wake and bear witness to the end.".to_string()),
                        ..dig(
                            "Ask why they remained",
                            "Purpose. Duty. Someone had to remember. Someone had to warn \
                             those who came after.",
                            Resources::new(0.0, 0.0, 45.0),
                        )
                    },
                ],
            },
            LayerDef {
                title: "The Choice".to_string(),
                narrative: "The elder being makes a request: release them. A control exists \
                            that would end their suspension, letting them finally rest. But \
                            they've slept so long, absorbing the dreams of the galaxy. What \
                            knowledge would die with them?\n\nAlternatively, their suspension \
                            technology could be adapted for your own purposes."
                    .to_string(),
                choices: vec![
                    SiteChoiceDef {
                        lore: Some("The last of the sleepers are gone. Their final gift was \
                                    knowledge: the Devourers can be stopped. The answer lies \
                                    among the stars the Architects built.".to_string()),
                        ..dig(
                            "Grant them peace",
                            "One by one, the lights fade. Something ancient and sad passes \
                             from the universe, grateful at last.",
                            Resources::new(0.0, 0.0, 100.0),
                        )
                    },
                    SiteChoiceDef {
                        tech_bonus: Some(TechBonus {
                            category: TechCategory::Economy,
                            amount: 50.0,
                        }),
                        lore: Some("You've taken what you could use. The sleepers remain, \
                                    dreaming of fire.".to_string()),
                        ..dig(
                            "Harvest their technology",
                            "The suspension systems yield incredible insights. The sleepers \
                             continue their vigil, unacknowledged.",
                            Resources::new(150.0, 150.0, 0.0),
                        )
                    },
                    SiteChoiceDef {
                        consequences: Some(ChoiceConsequences {
                            research_loss: 20.0,
                            triggered_event: None,
                        }),
                        lore: Some("The survivors share fragmented memories of their \
                                    civilization's end. They speak of Architects who might \
                                    yet save this galaxy.".to_string()),
                        ..dig(
                            "Attempt to wake them all",
                            "The awakening fails. Most do not survive the trauma of \
                             returning. A handful wake, confused and ancient.",
                            Resources::new(0.0, 0.0, 75.0),
                        )
                    },
                ],
            },
        ],
        completion_bonus: Resources::new(0.0, 25.0, 75.0),
    }
}

fn abandoned_colony() -> SiteDef {
    SiteDef {
        id: SiteId("site_abandoned_colony".to_string()),
        name: "The Forsaken Settlement".to_string(),
        description: "Ruins of a colony that shouldn't exist - built by a species that \
                      vanished before faster-than-light travel was possible."
            .to_string(),
        layers: vec![
            LayerDef {
                title: "Impossible Ruins".to_string(),
                narrative: "The colony predates spaceflight by two thousand years, yet here \
                            it sits on {PLANET_NAME}, lightyears from its builders' \
                            homeworld. The structures are intact but empty, as if the \
                            inhabitants simply vanished mid-day.\n\nFood remains on tables, \
                            turned to dust. Personal effects lie undisturbed. Something took \
                            them all at once."
                    .to_string(),
                choices: vec![
                    SiteChoiceDef {
                        lore: Some("The colonists went willingly. Something called them, and \
                                    they answered.".to_string()),
                        ..dig(
                            "Investigate the residential areas",
                            "Personal journals describe normal life until the last entry: \
                             \"The light came. Everyone is going outside.\"",
                            Resources::new(0.0, 0.0, 25.0),
                        )
                    },
                    SiteChoiceDef {
                        lore: Some("Memory modification on a massive scale. Someone wanted \
                                    this colony isolated, innocent, waiting.".to_string()),
                        ..dig(
                            "Examine the colonial center",
                            "Records show the colony thrived for generations. They forgot \
                             they'd traveled across stars - or were made to forget.",
                            Resources::new(0.0, 30.0, 0.0),
                        )
                    },
                ],
            },
            LayerDef {
                title: "The Temple".to_string(),
                narrative: "At the colony's heart stands a building unlike the others - \
                            alien architecture among human designs. Inside, symbols cover \
                            the walls, and a crystal altar dominates the chamber.\n\nThe \
                            colonists worshipped here. They worshipped something that \
                            answered."
                    .to_string(),
                choices: vec![
                    SiteChoiceDef {
                        lore: Some("The colonists were cattle. Fed, protected, and taken \
                                    when ripe. The question is: by whom?".to_string()),
                        ..dig(
                            "Study the religious symbols",
                            "The faith was imposed, artificial. Designed to create \
                             dependency and prepare the colonists for... harvest.",
                            Resources::new(0.0, 0.0, 40.0),
                        )
                    },
                    SiteChoiceDef {
                        consequences: Some(ChoiceConsequences {
                            research_loss: 15.0,
                            triggered_event: None,
                        }),
                        lore: Some("The crystal holds fragments of their final moments. Joy. \
                                    Anticipation. They believed they were ascending.".to_string()),
                        ..dig(
                            "Examine the crystal altar",
                            "The crystal stores psychic residue. Thousands of minds, \
                             touching it over generations, leaving impressions.",
                            Resources::new(0.0, 0.0, 45.0),
                        )
                    },
                ],
            },
            LayerDef {
                title: "The Truth Below".to_string(),
                narrative: "Beneath the temple, a vast chamber reveals the colony's true \
                            foundation. Massive biological structures web the ceiling - \
                            dormant now, but once they pulsed with stolen life.\n\nThis \
                            wasn't a colony. It was a farm."
                    .to_string(),
                choices: vec![
                    SiteChoiceDef {
                        lore: Some("Something cultivates sentient life across the galaxy. It \
                                    plants seeds of civilization and returns to harvest.".to_string()),
                        ..dig(
                            "Document everything for the codex",
                            "The horror is recorded. Others must know what stalks the \
                             spaces between stars.",
                            Resources::new(0.0, 0.0, 50.0),
                        )
                    },
                    SiteChoiceDef {
                        lore: Some("You've destroyed the harvesting mechanism. But the \
                                    harvesters themselves remain somewhere, hungry.".to_string()),
                        ..dig(
                            "Destroy the biological structures",
                            "The structures burn. Whatever they were, they won't function \
                             again.",
                            Resources::new(60.0, 0.0, 0.0),
                        )
                    },
                ],
            },
            LayerDef {
                title: "The Warning".to_string(),
                narrative: "One final discovery: a hidden message, scratched into a wall by \
                            someone who remembered the truth.\n\n\"We were taken from Earth. \
                            Generations ago. They changed our memories, made us worship \
                            them. When they return, they will take everyone. They are not \
                            gods. They are hungry. WARN THE OTHERS.\""
                    .to_string(),
                choices: vec![
                    SiteChoiceDef {
                        lore: Some("Humanity - or something like it - has been harvested \
                                    before. It could happen again.".to_string()),
                        ..dig(
                            "Preserve the warning",
                            "The survivor's message is saved. Their sacrifice matters.",
                            Resources::new(0.0, 0.0, 40.0),
                        )
                    },
                    SiteChoiceDef {
                        tech_bonus: Some(TechBonus {
                            category: TechCategory::Subterfuge,
                            amount: 40.0,
                        }),
                        lore: Some("You have biological data on the harvesters. When they \
                                    come, you'll recognize them.".to_string()),
                        ..dig(
                            "Search for traces of the harvesters",
                            "DNA samples remain. Not from the colonists - from their \
                             captors.",
                            Resources::new(0.0, 0.0, 60.0),
                        )
                    },
                ],
            },
        ],
        completion_bonus: Resources::new(0.0, 40.0, 60.0),
    }
}

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

fn constants() -> Constants {
    Constants {
        colonize_cost: Cost {
            minerals: 200.0,
            energy: 100.0,
        },
        deep_scan_research_cost: 10.0,
        research_tier_base: 50.0,
        research_split: 3.0,
        excavation_layer_threshold: 20.0,
        excavation_research_share: 0.5,
        meta_chain_keys: vec![
            "crystal_origin".to_string(),
            "void_message".to_string(),
            "stellar_architects".to_string(),
        ],
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
    }
}
