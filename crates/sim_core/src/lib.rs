//! Deterministic turn engine for a two-faction space strategy game.
//!
//! No IO, no network. All randomness via the passed-in Rng: the same seed
//! against the same content replays the same game.

pub mod ai;
pub mod colony;
pub mod combat;
pub mod content;
pub mod diplomacy;
pub mod economy;
pub mod events;
pub mod excavation;
pub mod fleet;
pub mod graph;
pub mod turn;
pub mod types;

#[cfg(any(test, feature = "test-support"))]
pub mod test_fixtures;

pub use content::*;
pub use turn::{TurnPhase, TurnPipeline};
pub use types::*;

pub(crate) fn emit(counters: &mut Counters, turn: u32, event: Event) -> EventEnvelope {
    let id = EventId(format!("evt_{:06}", counters.next_event_id));
    counters.next_event_id += 1;
    EventEnvelope { id, turn, event }
}

#[cfg(test)]
mod tests;
