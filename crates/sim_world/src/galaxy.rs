//! Procedural galaxy generation.
//!
//! Produces the map a game runs on: scattered star systems with planets
//! and asteroid belts, a hyperlane graph repaired to full connectivity,
//! archaeology sites seeded onto rocky planets, and a far-apart pair of
//! habitable starting systems.

use rand::Rng;
use sim_core::graph::connected_components;
use sim_core::{
    AsteroidBelt, Galaxy, Planet, PlanetId, PlanetKind, Resources, SiteId, SitePresence,
    StarClass, StarSystem, SystemId,
};

pub const DEFAULT_SYSTEM_COUNT: usize = 18;

const MIN_SYSTEM_DISTANCE: f64 = 100.0;
const MAX_LANE_DISTANCE: f64 = 200.0;

const STAR_NAMES: [&str; 90] = [
    "Arcturus",
    "Vega",
    "Altair",
    "Deneb",
    "Rigel",
    "Sirius",
    "Procyon",
    "Betelgeuse",
    "Aldebaran",
    "Antares",
    "Spica",
    "Pollux",
    "Capella",
    "Fomalhaut",
    "Regulus",
    "Kepler",
    "Trappist",
    "Gliese",
    "Proxima",
    "Tau Ceti",
    "Epsilon Eridani",
    "Lacaille",
    "Ross",
    "Wolf",
    "Lalande",
    "Groombridge",
    "Struve",
    "Kruger",
    "Teegarden",
    "Barnard",
    "Velorum",
    "Carina",
    "Puppis",
    "Pyxis",
    "Columba",
    "Corvus",
    "Hydra",
    "Centauri",
    "Crux",
    "Musca",
    "Volans",
    "Pictor",
    "Dorado",
    "Reticulum",
    "Horologium",
    "Caelum",
    "Phoenix",
    "Sculptor",
    "Fornax",
    "Eridanus",
    "Orion",
    "Taurus",
    "Gemini",
    "Andromeda",
    "Perseus",
    "Cassiopeia",
    "Cepheus",
    "Draco",
    "Lyra",
    "Cygnus",
    "Aquila",
    "Sagittarius",
    "Scorpius",
    "Libra",
    "Virgo",
    "Leo",
    "Cancer",
    "Aries",
    "Pisces",
    "Aquarius",
    "Capricornus",
    "Serpens",
    "Ophiuchus",
    "Hercules",
    "Bootes",
    "Corona",
    "Vulpecula",
    "Sagitta",
    "Delphinus",
    "Equuleus",
    "Pegasus",
    "Lacerta",
    "Triangulum",
    "Monoceros",
    "Lepus",
    "Auriga",
    "Lynx",
    "Camelopardalis",
    "Ursa",
    "Canes",
];

/// The three sites carrying meta-chain keys come first, so even a
/// five-site galaxy holds the complete chain.
const SITE_IDS: [&str; 6] = [
    "site_crystal_caves",
    "site_void_signal",
    "site_stellar_monument",
    "site_ancient_station",
    "site_silent_tomb",
    "site_abandoned_colony",
];

/// A freshly generated map plus the two chosen starting systems.
#[derive(Debug, Clone)]
pub struct GeneratedGalaxy {
    pub galaxy: Galaxy,
    pub player_start: SystemId,
    pub ai_start: SystemId,
}

pub fn generate_galaxy(system_count: usize, rng: &mut impl Rng) -> GeneratedGalaxy {
    assert!(
        system_count >= 2 && system_count <= STAR_NAMES.len(),
        "system count {system_count} outside the supported range"
    );
    let systems = generate_systems(system_count, rng);
    let hyperlanes = generate_hyperlanes(&systems, rng);
    let mut galaxy = Galaxy { systems, hyperlanes };
    ensure_connectivity(&mut galaxy);
    place_sites(&mut galaxy, rng);
    let (player_start, ai_start) = starting_positions(&galaxy);
    GeneratedGalaxy {
        galaxy,
        player_start,
        ai_start,
    }
}

// ---------------------------------------------------------------------------
// Systems and planets
// ---------------------------------------------------------------------------

fn generate_systems(count: usize, rng: &mut impl Rng) -> Vec<StarSystem> {
    let mut systems: Vec<StarSystem> = Vec::with_capacity(count);
    let mut used_names: Vec<usize> = Vec::with_capacity(count);
    for index in 0..count {
        let (x, y) = place_system(&systems, rng);
        let name = loop {
            let pick = rng.gen_range(0..STAR_NAMES.len());
            if !used_names.contains(&pick) {
                used_names.push(pick);
                break STAR_NAMES[pick].to_string();
            }
        };
        systems.push(generate_system(index, name, x, y, rng));
    }
    systems
}

/// Rejection-samples a position at least `MIN_SYSTEM_DISTANCE` from every
/// placed system, giving up after 100 attempts on crowded maps.
fn place_system(systems: &[StarSystem], rng: &mut impl Rng) -> (f64, f64) {
    let mut x = 0.0;
    let mut y = 0.0;
    for _ in 0..100 {
        x = (rng.gen::<f64>() - 0.5) * 800.0;
        y = (rng.gen::<f64>() - 0.5) * 600.0;
        let crowded = systems
            .iter()
            .any(|s| (s.x - x).hypot(s.y - y) < MIN_SYSTEM_DISTANCE);
        if !crowded {
            break;
        }
    }
    (x, y)
}

fn generate_system(
    index: usize,
    name: String,
    x: f64,
    y: f64,
    rng: &mut impl Rng,
) -> StarSystem {
    let id = SystemId(format!("sys_{index}"));
    let star = random_star_class(rng);
    let planet_count = rng.gen_range(1..=5);
    let planets = (0..planet_count)
        .map(|orbit| generate_planet(&id, &name, orbit, star, rng))
        .collect();
    let asteroid_belt = if rng.gen_bool(0.3) {
        Some(AsteroidBelt {
            richness: rng.gen_range(1..=3),
        })
    } else {
        None
    };
    StarSystem {
        id,
        name,
        x,
        y,
        star,
        planets,
        stations: Vec::new(),
        asteroid_belt,
    }
}

fn generate_planet(
    system_id: &SystemId,
    system_name: &str,
    orbit: usize,
    star: StarClass,
    rng: &mut impl Rng,
) -> Planet {
    let kind = random_planet_kind(star, orbit, rng);
    let habitable = matches!(
        kind,
        PlanetKind::Continental | PlanetKind::Ocean | PlanetKind::Desert | PlanetKind::Arctic
    );
    let has_moon = kind != PlanetKind::GasGiant && rng.gen_bool(0.25);
    Planet {
        id: PlanetId(format!("{}_p{orbit}", system_id.0)),
        name: planet_name(system_name, orbit),
        kind,
        size: planet_size(kind, rng),
        habitable,
        deposits: planet_deposits(kind, rng),
        colonized_by: None,
        homeworld: false,
        has_moon,
        site: None,
    }
}

fn planet_name(system_name: &str, orbit: usize) -> String {
    const NUMERALS: [&str; 7] = ["I", "II", "III", "IV", "V", "VI", "VII"];
    match NUMERALS.get(orbit) {
        Some(numeral) => format!("{system_name} {numeral}"),
        None => format!("{system_name} {}", orbit + 1),
    }
}

fn random_star_class(rng: &mut impl Rng) -> StarClass {
    let weighted = [
        (StarClass::Yellow, 30u32),
        (StarClass::Red, 25),
        (StarClass::Orange, 20),
        (StarClass::Blue, 15),
        (StarClass::White, 10),
    ];
    let mut roll = rng.gen_range(0..100u32);
    for (class, weight) in weighted {
        if roll < weight {
            return class;
        }
        roll -= weight;
    }
    StarClass::Yellow
}

/// Inner orbits run hot and rocky, outer orbits cold; blue stars are
/// hostile to life half the time regardless of orbit.
fn random_planet_kind(star: StarClass, orbit: usize, rng: &mut impl Rng) -> PlanetKind {
    if star == StarClass::Blue && rng.gen_bool(0.5) {
        return if rng.gen_bool(0.5) {
            PlanetKind::Barren
        } else {
            PlanetKind::GasGiant
        };
    }
    let pool: &[PlanetKind] = match orbit {
        0 => &[PlanetKind::Barren, PlanetKind::Desert, PlanetKind::Continental],
        1 | 2 => &[
            PlanetKind::Continental,
            PlanetKind::Ocean,
            PlanetKind::Desert,
            PlanetKind::Barren,
        ],
        _ => &[PlanetKind::Arctic, PlanetKind::Barren, PlanetKind::GasGiant],
    };
    pool[rng.gen_range(0..pool.len())]
}

fn planet_size(kind: PlanetKind, rng: &mut impl Rng) -> u32 {
    let (min, max) = match kind {
        PlanetKind::Continental => (12, 20),
        PlanetKind::Ocean => (14, 22),
        PlanetKind::Desert => (10, 18),
        PlanetKind::Arctic => (10, 16),
        PlanetKind::Barren => (6, 14),
        PlanetKind::GasGiant => (25, 40),
    };
    rng.gen_range(min..=max)
}

fn planet_deposits(kind: PlanetKind, rng: &mut impl Rng) -> Resources {
    let mut roll = |min: u32, max: u32| f64::from(rng.gen_range(min..=max));
    match kind {
        PlanetKind::Continental => Resources::new(roll(2, 4), roll(2, 4), roll(1, 2)),
        PlanetKind::Ocean => Resources::new(roll(1, 2), roll(1, 2), roll(3, 5)),
        PlanetKind::Desert => Resources::new(roll(3, 5), roll(2, 3), 0.0),
        PlanetKind::Arctic => Resources::new(roll(1, 2), roll(2, 4), roll(1, 2)),
        PlanetKind::Barren => Resources::new(0.0, roll(3, 6), 0.0),
        PlanetKind::GasGiant => Resources::new(roll(4, 7), 0.0, 0.0),
    }
}

// ---------------------------------------------------------------------------
// Hyperlanes
// ---------------------------------------------------------------------------

/// Connects every system to 2-4 of its nearest neighbors within lane
/// range, deduplicating the undirected edges.
fn generate_hyperlanes(systems: &[StarSystem], rng: &mut impl Rng) -> Vec<(SystemId, SystemId)> {
    let mut lanes: Vec<(SystemId, SystemId)> = Vec::new();
    for (i, system) in systems.iter().enumerate() {
        let mut neighbors: Vec<(usize, f64)> = systems
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(j, other)| (j, (system.x - other.x).hypot(system.y - other.y)))
            .collect();
        neighbors.sort_by(|a, b| a.1.total_cmp(&b.1));

        let connections = rng.gen_range(2..=4usize);
        for &(j, dist) in neighbors.iter().take(connections) {
            if dist > MAX_LANE_DISTANCE {
                continue;
            }
            let target = &systems[j].id;
            let exists = lanes.iter().any(|(a, b)| {
                (a == &system.id && b == target) || (a == target && b == &system.id)
            });
            if !exists {
                lanes.push((system.id.clone(), target.clone()));
            }
        }
    }
    lanes
}

/// Joins disconnected components through their closest system pair until
/// the whole map is reachable.
fn ensure_connectivity(galaxy: &mut Galaxy) {
    loop {
        let mut components = connected_components(galaxy);
        if components.len() <= 1 {
            return;
        }
        let Some(orphan) = components.pop() else {
            return;
        };
        let Some(anchor) = components.pop() else {
            return;
        };
        if let Some(lane) = closest_pair(galaxy, &orphan, &anchor) {
            galaxy.hyperlanes.push(lane);
        } else {
            return;
        }
    }
}

fn closest_pair(
    galaxy: &Galaxy,
    left: &[SystemId],
    right: &[SystemId],
) -> Option<(SystemId, SystemId)> {
    let position = |id: &SystemId| {
        galaxy
            .systems
            .iter()
            .find(|s| s.id == *id)
            .map(|s| (s.x, s.y))
    };
    let mut best: Option<(SystemId, SystemId)> = None;
    let mut best_dist = f64::INFINITY;
    for a in left {
        let Some((ax, ay)) = position(a) else {
            continue;
        };
        for b in right {
            let Some((bx, by)) = position(b) else {
                continue;
            };
            let dist = (ax - bx).hypot(ay - by);
            if dist < best_dist {
                best_dist = dist;
                best = Some((a.clone(), b.clone()));
            }
        }
    }
    best
}

// ---------------------------------------------------------------------------
// Archaeology sites and starting positions
// ---------------------------------------------------------------------------

/// Seeds 5-6 archaeology sites on shuffled rocky planets. Gas giants
/// never host a site.
fn place_sites(galaxy: &mut Galaxy, rng: &mut impl Rng) {
    let mut eligible: Vec<(SystemId, PlanetId)> = Vec::new();
    for system in &galaxy.systems {
        for planet in &system.planets {
            if planet.kind != PlanetKind::GasGiant {
                eligible.push((system.id.clone(), planet.id.clone()));
            }
        }
    }
    // Fisher-Yates.
    for i in (1..eligible.len()).rev() {
        let j = rng.gen_range(0..=i);
        eligible.swap(i, j);
    }

    let site_count = rng.gen_range(5..=6usize).min(eligible.len()).min(SITE_IDS.len());
    for (slot, (system_id, planet_id)) in eligible.into_iter().take(site_count).enumerate() {
        let Some(system) = galaxy.systems.iter_mut().find(|s| s.id == system_id) else {
            continue;
        };
        let Some(planet) = system.planets.iter_mut().find(|p| p.id == planet_id) else {
            continue;
        };
        planet.site = Some(SitePresence {
            id: SiteId(SITE_IDS[slot].to_string()),
            discovered: false,
            completed: false,
        });
    }
}

/// Picks the farthest-apart pair of systems that both offer a habitable
/// planet. Falls back to the map's first and last systems.
fn starting_positions(galaxy: &Galaxy) -> (SystemId, SystemId) {
    let mut best: Option<(SystemId, SystemId)> = None;
    let mut best_dist = 0.0;
    for (i, a) in galaxy.systems.iter().enumerate() {
        if !a.planets.iter().any(|p| p.habitable) {
            continue;
        }
        for b in galaxy.systems.iter().skip(i + 1) {
            if !b.planets.iter().any(|p| p.habitable) {
                continue;
            }
            let dist = (a.x - b.x).hypot(a.y - b.y);
            if dist > best_dist {
                best_dist = dist;
                best = Some((a.id.clone(), b.id.clone()));
            }
        }
    }
    best.unwrap_or_else(|| {
        let first = galaxy.systems[0].id.clone();
        let last = galaxy.systems[galaxy.systems.len() - 1].id.clone();
        (first, last)
    })
}
