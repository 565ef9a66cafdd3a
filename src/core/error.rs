use thiserror::Error;

use crate::core::types::{Faction, Phase, TerritoryId};

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Game is not in progress")]
    GameNotInProgress,

    #[error("Command not valid during the {0:?} phase")]
    WrongPhase(Phase),

    #[error("{0:?} does not belong to {1:?}")]
    NotOwned(TerritoryId, Faction),

    #[error("{0:?} and {1:?} are not adjacent")]
    NotAdjacent(TerritoryId, TerritoryId),

    #[error("{0:?} cannot be attacked this round")]
    Invulnerable(TerritoryId),

    #[error("Not enough troops in {0:?} (need {1}, have {2})")]
    InsufficientTroops(TerritoryId, u32, u32),

    #[error("No {0} remaining this turn")]
    BudgetExhausted(&'static str),

    #[error("{0:?} already belongs to {1:?}")]
    AlreadyOwned(TerritoryId, Faction),

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Phase advance is awaiting confirmation")]
    AdvancePending,

    #[error("No phase advance is awaiting confirmation")]
    NoPendingAdvance,

    #[error("Unknown difficulty profile: {0}")]
    UnknownProfile(String),

    #[error("Profile parse error: {0}")]
    ProfileParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
