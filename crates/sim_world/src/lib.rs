//! World generation and built-in content for the turn engine.
//!
//! Produces the starting [`GameState`]: a procedurally generated galaxy,
//! two seeded factions, and the built-in content pack. Everything here is
//! driven by the caller's Rng, so a seed fully determines the opening
//! position.

pub mod content;
pub mod galaxy;

use std::collections::BTreeSet;

use rand::Rng;
use sim_core::{
    BuildingKind, Colony, Counters, DiplomacyState, DistrictKind, Faction, Fleet, GameContent,
    GamePhase, GameState, MetaChainProgress, Owner, PlanetKind, Resources, Ship, ShipClass, Stance,
    SystemId, TechState, TechTrack, Upkeep,
};

pub use content::builtin_content;
pub use galaxy::{generate_galaxy, GeneratedGalaxy, DEFAULT_SYSTEM_COUNT};

/// Names the opposing empire is drawn from at game start.
const AI_EMPIRE_NAMES: [&str; 8] = [
    "Vel'kari Collective",
    "Zynthari Dominion",
    "Kreth Ascendancy",
    "Malachar Unity",
    "Nexion Imperium",
    "Orath Federation",
    "Syllian Hegemony",
    "Tyranix Horde",
];

// ---------------------------------------------------------------------------
// Content validation
// ---------------------------------------------------------------------------

/// Sanity-checks a content pack before play. Panics on the first defect;
/// content is compiled in or hand-edited, so a broken pack is a bug, not
/// a runtime condition.
pub fn validate_content(content: &GameContent) {
    let mut event_ids = BTreeSet::new();
    for event in &content.events {
        assert!(
            event_ids.insert(event.id.as_str()),
            "duplicate event id {:?}",
            event.id
        );
        assert!(!event.choices.is_empty(), "event {:?} has no choices", event.id);
        assert!(event.weight > 0, "event {:?} has zero weight", event.id);
    }

    let mut site_ids = BTreeSet::new();
    for site in &content.sites {
        assert!(
            site_ids.insert(site.id.0.as_str()),
            "duplicate site id {:?}",
            site.id.0
        );
        assert!(!site.layers.is_empty(), "site {:?} has no layers", site.id.0);
        for layer in &site.layers {
            assert!(
                !layer.choices.is_empty(),
                "site {:?} layer {:?} has no choices",
                site.id.0,
                layer.title
            );
        }
    }

    let mut seen_keys = BTreeSet::new();
    for site in &content.sites {
        for layer in &site.layers {
            for choice in &layer.choices {
                if let Some(target) = &choice.cross_reference {
                    assert!(
                        site_ids.contains(target.0.as_str()),
                        "{:?} is not a known site id (cross-referenced from {:?})",
                        target.0,
                        site.id.0
                    );
                }
                if let Some(consequences) = &choice.consequences {
                    if let Some(event_id) = &consequences.triggered_event {
                        assert!(
                            event_ids.contains(event_id.as_str()),
                            "{event_id:?} is not a known event id (triggered from {:?})",
                            site.id.0
                        );
                    }
                }
                if let Some(key) = &choice.meta_chain_key {
                    assert!(
                        content.constants.meta_chain_keys.contains(key),
                        "{key:?} is not a declared meta-chain key (site {:?})",
                        site.id.0
                    );
                    seen_keys.insert(key.as_str());
                }
            }
        }
    }
    for key in &content.constants.meta_chain_keys {
        assert!(
            seen_keys.contains(key.as_str()),
            "meta-chain key {key:?} is granted by no site choice"
        );
    }
}

// ---------------------------------------------------------------------------
// New game
// ---------------------------------------------------------------------------

/// Generates a galaxy and seeds both factions into their starting
/// systems. The player's start becomes Sol with a developed homeworld;
/// the opponent gets a smaller outpost and a matching fleet.
pub fn new_game(content: &GameContent, system_count: usize, rng: &mut impl Rng) -> GameState {
    let GeneratedGalaxy {
        mut galaxy,
        player_start,
        ai_start,
    } = generate_galaxy(system_count, rng);
    let ai_name = AI_EMPIRE_NAMES[rng.gen_range(0..AI_EMPIRE_NAMES.len())];

    let mut counters = Counters::default();

    // Player homeworld: the start system is renamed and its best habitable
    // world becomes a developed capital.
    let Some(system) = galaxy.systems.iter_mut().find(|s| s.id == player_start) else {
        unreachable!("start system comes from the generated galaxy");
    };
    system.name = "Sol".to_string();
    let planet = match system
        .planets
        .iter_mut()
        .filter(|p| p.habitable)
        .max_by_key(|p| p.size)
    {
        Some(p) => p,
        None => &mut system.planets[0],
    };
    planet.name = "Terra Nova".to_string();
    planet.homeworld = true;
    planet.colonized_by = Some(Owner::Player);
    let player_planet = planet.id.clone();
    let player_capital = Colony {
        id: counters.alloc_colony(),
        system: player_start.clone(),
        planet: player_planet.clone(),
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
        buildings: starting_buildings(
            planet.kind,
            &[
                BuildingKind::Starport,
                BuildingKind::PowerPlant,
                BuildingKind::ResearchLab,
            ],
        ),
        max_districts: 10.max(planet.size / 3),
        build_queue: Vec::new(),
    };

    // Opponent outpost: first habitable planet in its start system, or the
    // innermost one if the fallback start has none.
    let Some(system) = galaxy.systems.iter_mut().find(|s| s.id == ai_start) else {
        unreachable!("start system comes from the generated galaxy");
    };
    let planet = match system.planets.iter_mut().find(|p| p.habitable) {
        Some(p) => p,
        None => &mut system.planets[0],
    };
    planet.colonized_by = Some(Owner::Ai);
    let ai_planet = planet.id.clone();
    let ai_outpost = Colony {
        id: counters.alloc_colony(),
        system: ai_start.clone(),
        planet: ai_planet.clone(),
        name: planet.name.clone(),
        homeworld: false,
        population: 2.0,
        happiness: 0.8,
        districts: vec![
            DistrictKind::City,
            DistrictKind::Mining,
            DistrictKind::Generator,
        ],
        buildings: starting_buildings(planet.kind, &[BuildingKind::Starport]),
        max_districts: (planet.size / 4).max(3),
        build_queue: Vec::new(),
    };

    let player_fleet = starting_fleet(content, &mut counters, "Home Fleet", &player_start);
    let ai_fleet = starting_fleet(content, &mut counters, "Vanguard Fleet", &ai_start);

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
        colonies: vec![player_capital],
        controlled_systems: BTreeSet::from([player_start.clone()]),
        known_systems: BTreeSet::from([player_start.clone()]),
        scanned_systems: BTreeSet::from([player_start.clone()]),
        deep_scanned_systems: BTreeSet::from([player_start.clone()]),
        homeworld: Some((player_start, player_planet)),
        notifications: Vec::new(),
        war_exhaustion: 0.0,
        legitimacy: 100.0,
    };

    // The opponent starts without a deep scan of its own system; its
    // planner pays for one like any other faction.
    let ai = Faction {
        name: ai_name.to_string(),
        resources: Resources::new(200.0, 200.0, 50.0),
        income: Resources::default(),
        upkeep: Upkeep::default(),
        technology: TechState::default(),
        fleets: vec![ai_fleet],
        colonies: vec![ai_outpost],
        controlled_systems: BTreeSet::from([ai_start.clone()]),
        known_systems: BTreeSet::from([ai_start.clone()]),
        scanned_systems: BTreeSet::from([ai_start.clone()]),
        deep_scanned_systems: BTreeSet::new(),
        homeworld: Some((ai_start, ai_planet)),
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
        ai_mind: sim_core::AiMind::default(),
        excavations: Vec::new(),
        meta_chain: MetaChainProgress::default(),
        pending_event: None,
        last_event_turn: 0,
        combat_log: Vec::new(),
        counters,
    }
}

/// Fills the planet's building slots with the given seed buildings, in
/// order, leaving the rest empty.
fn starting_buildings(kind: PlanetKind, seeded: &[BuildingKind]) -> Vec<Option<BuildingKind>> {
    let slots = GameContent::building_slots(kind);
    (0..slots).map(|i| seeded.get(i).copied()).collect()
}

/// Three corvettes, two frigates, one science vessel, all at full hull.
fn starting_fleet(
    content: &GameContent,
    counters: &mut Counters,
    name: &str,
    location: &SystemId,
) -> Fleet {
    let classes = [
        ShipClass::Corvette,
        ShipClass::Corvette,
        ShipClass::Corvette,
        ShipClass::Frigate,
        ShipClass::Frigate,
        ShipClass::Science,
    ];
    Fleet {
        id: counters.alloc_fleet(),
        name: name.to_string(),
        location: location.clone(),
        destination: None,
        orders: None,
        patrol_route: Vec::new(),
        ships: classes
            .iter()
            .map(|class| Ship {
                id: counters.alloc_ship(),
                class: *class,
                hull: content.ship_classes.get(*class).max_hull,
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use sim_core::graph::connected_components;

    fn make_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[test]
    fn test_builtin_content_is_valid() {
        validate_content(&builtin_content());
    }

    #[test]
    #[should_panic(expected = "duplicate event id")]
    fn test_duplicate_event_id_rejected() {
        let mut content = builtin_content();
        let copy = content.events[0].clone();
        content.events.push(copy);
        validate_content(&content);
    }

    #[test]
    #[should_panic(expected = "is not a known site id")]
    fn test_dangling_cross_reference_rejected() {
        let mut content = builtin_content();
        content.sites[0].layers[0].choices[0].cross_reference =
            Some(sim_core::SiteId("site_nowhere".to_string()));
        validate_content(&content);
    }

    #[test]
    #[should_panic(expected = "granted by no site choice")]
    fn test_unreachable_meta_key_rejected() {
        let mut content = builtin_content();
        content
            .constants
            .meta_chain_keys
            .push("lost_chord".to_string());
        validate_content(&content);
    }

    #[test]
    fn test_same_seed_same_galaxy() {
        let a = generate_galaxy(DEFAULT_SYSTEM_COUNT, &mut make_rng());
        let b = generate_galaxy(DEFAULT_SYSTEM_COUNT, &mut make_rng());
        assert_eq!(
            serde_json::to_string(&a.galaxy).unwrap(),
            serde_json::to_string(&b.galaxy).unwrap()
        );
        assert_eq!(a.player_start, b.player_start);
        assert_eq!(a.ai_start, b.ai_start);
    }

    #[test]
    fn test_generated_galaxy_invariants() {
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let generated = generate_galaxy(DEFAULT_SYSTEM_COUNT, &mut rng);
            let galaxy = &generated.galaxy;

            assert_eq!(galaxy.systems.len(), DEFAULT_SYSTEM_COUNT);
            assert_eq!(
                connected_components(galaxy).len(),
                1,
                "seed {seed}: every system must be reachable"
            );
            assert_ne!(generated.player_start, generated.ai_start);

            let sites: Vec<&str> = galaxy
                .systems
                .iter()
                .flat_map(|s| &s.planets)
                .filter_map(|p| p.site.as_ref())
                .map(|s| s.id.0.as_str())
                .collect();
            assert!(
                (5..=6).contains(&sites.len()),
                "seed {seed}: got {} sites",
                sites.len()
            );
            for meta_site in [
                "site_crystal_caves",
                "site_void_signal",
                "site_stellar_monument",
            ] {
                assert!(
                    sites.contains(&meta_site),
                    "seed {seed}: {meta_site} missing, chain cannot complete"
                );
            }
            for system in &galaxy.systems {
                assert!(!system.planets.is_empty());
                assert!(system.planets.len() <= 5);
            }
        }
    }

    #[test]
    fn test_new_game_seeding() {
        let content = builtin_content();
        let state = new_game(&content, DEFAULT_SYSTEM_COUNT, &mut make_rng());

        assert_eq!(state.turn, 1);
        assert_eq!(state.game_phase, GamePhase::Exploration);
        assert_eq!(state.player.resources, Resources::new(300.0, 300.0, 100.0));
        assert_eq!(state.ai.resources, Resources::new(200.0, 200.0, 50.0));

        let capital = &state.player.colonies[0];
        assert_eq!(capital.name, "Terra Nova");
        assert!(capital.homeworld);
        assert_eq!(capital.districts.len(), 7);
        assert!(capital.max_districts >= 10);

        let sol = state
            .galaxy
            .systems
            .iter()
            .find(|s| s.id == capital.system)
            .unwrap();
        assert_eq!(sol.name, "Sol");

        for faction in [&state.player, &state.ai] {
            assert_eq!(faction.fleets.len(), 1);
            assert_eq!(faction.fleets[0].ships.len(), 6);
            assert_eq!(faction.controlled_systems.len(), 1);
        }
        assert!(state.player.deep_scanned_systems.contains(&capital.system));
        assert!(state.ai.deep_scanned_systems.is_empty());
        assert!(AI_EMPIRE_NAMES.contains(&state.ai.name.as_str()));

        assert_eq!(state.counters.next_fleet_id, 2);
        assert_eq!(state.counters.next_ship_id, 12);
        assert_eq!(state.counters.next_colony_id, 2);

        assert_eq!(state.diplomacy.stance, Stance::Neutral);
        assert!(state.player.technology.military.researching);
    }

    #[test]
    fn test_new_game_feeds_the_turn_pipeline() {
        use sim_core::{EventLevel, TurnPipeline};

        let content = builtin_content();
        let mut state = new_game(&content, DEFAULT_SYSTEM_COUNT, &mut make_rng());
        let mut rng = make_rng();
        let mut pipeline = TurnPipeline::new();

        for _ in 0..10 {
            pipeline.end_turn(&mut state, &content, &mut rng, EventLevel::Normal);
        }
        assert_eq!(state.turn, 11);
        assert!(state.player.resources.energy >= 0.0);
        assert!(state.player.resources.minerals >= 0.0);
    }
}
