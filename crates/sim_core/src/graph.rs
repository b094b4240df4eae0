//! Hyperlane graph queries.

use std::collections::{HashSet, VecDeque};

use crate::types::{Galaxy, SystemId};

/// Neighbors of `node` across the undirected hyperlane edges, in edge order.
pub fn neighbors<'a>(node: &SystemId, galaxy: &'a Galaxy) -> Vec<&'a SystemId> {
    let mut out = Vec::new();
    for (a, b) in &galaxy.hyperlanes {
        if a == node {
            out.push(b);
        } else if b == node {
            out.push(a);
        }
    }
    out
}

/// Shortest path between two systems as a full node list including both
/// endpoints, or `None` if they are disconnected. Returns `Some([from])`
/// when `from == to`.
pub fn shortest_path(from: &SystemId, to: &SystemId, galaxy: &Galaxy) -> Option<Vec<SystemId>> {
    if from == to {
        return Some(vec![from.clone()]);
    }
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    queue.push_back(vec![from.clone()]);
    visited.insert(from.clone());
    while let Some(path) = queue.pop_front() {
        let node = path.last()?.clone();
        for neighbor in neighbors(&node, galaxy) {
            if neighbor == to {
                let mut done = path;
                done.push(neighbor.clone());
                return Some(done);
            }
            if visited.insert(neighbor.clone()) {
                let mut next = path.clone();
                next.push(neighbor.clone());
                queue.push_back(next);
            }
        }
    }
    None
}

/// Number of hops on the shortest path, or `None` if no path exists.
/// Returns `Some(0)` when `from == to`.
pub fn shortest_hop_count(from: &SystemId, to: &SystemId, galaxy: &Galaxy) -> Option<u64> {
    if from == to {
        return Some(0);
    }
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    queue.push_back((from.clone(), 0u64));
    visited.insert(from.clone());
    while let Some((node, dist)) = queue.pop_front() {
        for neighbor in neighbors(&node, galaxy) {
            if neighbor == to {
                return Some(dist + 1);
            }
            if visited.insert(neighbor.clone()) {
                queue.push_back((neighbor.clone(), dist + 1));
            }
        }
    }
    None
}

/// Connected components of the galaxy, in system order.
pub fn connected_components(galaxy: &Galaxy) -> Vec<Vec<SystemId>> {
    let mut seen: HashSet<SystemId> = HashSet::new();
    let mut components = Vec::new();
    for system in &galaxy.systems {
        if seen.contains(&system.id) {
            continue;
        }
        let mut component = Vec::new();
        let mut queue = VecDeque::new();
        queue.push_back(system.id.clone());
        seen.insert(system.id.clone());
        while let Some(node) = queue.pop_front() {
            component.push(node.clone());
            for neighbor in neighbors(&node, galaxy) {
                if seen.insert(neighbor.clone()) {
                    queue.push_back(neighbor.clone());
                }
            }
        }
        components.push(component);
    }
    components
}
