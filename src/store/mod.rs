//! Composed domain store
//!
//! Nine independent sub-stores, each a pure reducer over a closed
//! command enum. A reducer never touches another store's state; any
//! command that fans out across stores is sequenced by the session
//! layer one level up.

pub mod ai_log;
pub mod combat;
pub mod event;
pub mod game;
pub mod history;
pub mod knowledge;
pub mod leader;
pub mod map;
pub mod score;

pub use ai_log::{AiAction, AiCommand, AiState};
pub use combat::{CombatCommand, CombatState};
pub use event::{EventCard, EventCommand, EventState};
pub use game::{GameCommand, GameFlowState};
pub use history::{HistoryCommand, HistoryState, JournalEntry};
pub use knowledge::{AnswerRecord, KnowledgeCard, KnowledgeCommand, KnowledgeState};
pub use leader::{LeaderCommand, LeaderState};
pub use map::{MapCommand, MapState};
pub use score::{ScoreCommand, ScoreState};

/// The full engine state tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameState {
    pub game: GameFlowState,
    pub map: MapState,
    pub combat: CombatState,
    pub event: EventState,
    pub knowledge: KnowledgeState,
    pub score: ScoreState,
    pub ai: AiState,
    pub leader: LeaderState,
    pub history: HistoryState,
}

impl GameState {
    /// Pristine state for a fresh session; also the `Reset` target of
    /// every sub-store.
    pub fn initial() -> Self {
        Self::default()
    }
}

/// Guard for counter payloads arriving from the UI/JSON boundary.
///
/// Non-finite values fall back to the previous count, negatives clamp
/// to zero, fractions truncate. NaN never reaches store state.
pub(crate) fn sanitize_count(payload: f64, previous: u32) -> u32 {
    if !payload.is_finite() {
        tracing::debug!(payload, previous, "rejecting non-finite counter payload");
        return previous;
    }
    if payload < 0.0 {
        return 0;
    }
    payload as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_count_guards_the_json_boundary() {
        assert_eq!(sanitize_count(5.0, 0), 5);
        assert_eq!(sanitize_count(f64::NAN, 3), 3);
        assert_eq!(sanitize_count(f64::INFINITY, 3), 3);
        assert_eq!(sanitize_count(-2.0, 3), 0);
        assert_eq!(sanitize_count(4.9, 0), 4);
    }

    #[test]
    fn initial_state_is_default() {
        assert_eq!(GameState::initial(), GameState::default());
    }
}
