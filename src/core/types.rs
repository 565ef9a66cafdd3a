//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// A playable side, or `Neutral` for unclaimed territories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    Us,
    British,
    Native,
    Neutral,
}

impl Faction {
    /// The three sides that can own troops and fight.
    pub const PLAYABLE: [Faction; 3] = [Faction::Us, Faction::British, Faction::Native];

    pub fn is_playable(&self) -> bool {
        *self != Faction::Neutral
    }

    /// Display name used in status messages and the AI log.
    pub fn display_name(&self) -> &'static str {
        match self {
            Faction::Us => "United States",
            Faction::British => "British/Canada",
            Faction::Native => "Native Coalition",
            Faction::Neutral => "Neutral",
        }
    }

    /// Long-form name used when taking command at game start.
    pub fn full_name(&self) -> &'static str {
        match self {
            Faction::Us => "United States of America",
            Faction::British => "British Empire and Canadian forces",
            Faction::Native => "Native American Confederacy",
            Faction::Neutral => "Neutral",
        }
    }
}

/// Map theater a territory belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Theater {
    GreatLakes,
    Chesapeake,
    Southern,
    Maritime,
}

/// One of the five sequential stages within a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Event,
    Allocate,
    Battle,
    Maneuver,
    Score,
}

impl Phase {
    pub const CYCLE: [Phase; 5] = [
        Phase::Event,
        Phase::Allocate,
        Phase::Battle,
        Phase::Maneuver,
        Phase::Score,
    ];

    /// Next phase in the fixed cycle, wrapping `Score -> Event`.
    pub fn next(&self) -> Phase {
        match self {
            Phase::Event => Phase::Allocate,
            Phase::Allocate => Phase::Battle,
            Phase::Battle => Phase::Maneuver,
            Phase::Maneuver => Phase::Score,
            Phase::Score => Phase::Event,
        }
    }

    /// Default status message shown when this phase begins.
    pub fn default_message(&self) -> &'static str {
        match self {
            Phase::Event => "A new event unfolds...",
            Phase::Allocate => "Place your reinforcements",
            Phase::Battle => "Time for battle!",
            Phase::Maneuver => "Reposition your forces",
            Phase::Score => "Calculating scores...",
        }
    }
}

/// Overall game status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    NotStarted,
    InProgress,
    GameOver,
}

/// The war lasts twelve rounds (four seasons across 1812-1814).
pub const TOTAL_ROUNDS: u32 = 12;

/// Season label for a round, e.g. "Summer 1812" for round 2.
pub fn season_label(round: u32) -> String {
    const SEASONS: [&str; 4] = ["Spring", "Summer", "Autumn", "Winter"];
    let year = 1812 + (round.saturating_sub(1)) / 4;
    let season = SEASONS[(round.saturating_sub(1) % 4) as usize];
    format!("{season} {year}")
}

/// Identifier for one of the twenty-three territories on the fixed map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerritoryId {
    Detroit,
    FortDearborn,
    Niagara,
    LakeErie,
    LakeOntario,
    UpperCanada,
    WashingtonDc,
    Baltimore,
    Bladensburg,
    ChesapeakeBay,
    Virginia,
    NewOrleans,
    Mobile,
    CreekNation,
    MississippiTerritory,
    GulfOfMexico,
    AtlanticSeaLanes,
    Halifax,
    NewYork,
    Montreal,
    OhioValley,
    IndianaTerritory,
    Carolina,
}

/// Identifier for a leader card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaderId {
    Jackson,
    Perry,
    Harrison,
    WinfieldScott,
    Brock,
    Drummond,
    Ross,
    Prevost,
    Tecumseh,
    Tenskwatawa,
    RedEagle,
}

/// Named AI difficulty profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl std::str::FromStr for Difficulty {
    type Err = crate::core::error::EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(crate::core::error::EngineError::UnknownProfile(
                other.to_string(),
            )),
        }
    }
}
