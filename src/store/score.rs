//! Score store: faction scores and the US nationalism meter

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::types::Faction;
use crate::store::sanitize_count;

const METER_MAX: u32 = 100;

/// Persistent slice of the score state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreSave {
    #[serde(default)]
    pub scores: BTreeMap<Faction, i64>,
    #[serde(default)]
    pub nationalism_meter: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreState {
    pub scores: BTreeMap<Faction, i64>,
    /// US-specific morale meter, saturating in `[0, 100]`.
    pub nationalism_meter: u32,
}

impl Default for ScoreState {
    fn default() -> Self {
        let mut scores = BTreeMap::new();
        for faction in Faction::PLAYABLE {
            scores.insert(faction, 0);
        }
        Self { scores, nationalism_meter: 0 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScoreCommand {
    /// Merge the supplied per-faction scores; absent factions keep
    /// their current value.
    UpdateScores(BTreeMap<Faction, i64>),
    /// Signed meter delta; clamped after addition.
    DeltaNationalism(f64),
    /// Absolute meter value from the UI/JSON boundary.
    SetNationalism(f64),
    Reset,
    Load(ScoreSave),
}

impl ScoreState {
    pub fn reduce(mut self, command: &ScoreCommand) -> Self {
        match command {
            ScoreCommand::UpdateScores(updates) => {
                for (faction, value) in updates {
                    self.scores.insert(*faction, *value);
                }
                self
            }

            ScoreCommand::DeltaNationalism(delta) => {
                if delta.is_finite() {
                    let next = self.nationalism_meter as f64 + delta;
                    self.nationalism_meter = next.clamp(0.0, METER_MAX as f64) as u32;
                } else {
                    tracing::debug!(delta, "rejecting non-finite nationalism delta");
                }
                self
            }

            ScoreCommand::SetNationalism(value) => {
                self.nationalism_meter =
                    sanitize_count(*value, self.nationalism_meter).min(METER_MAX);
                self
            }

            ScoreCommand::Reset => Self::default(),

            ScoreCommand::Load(save) => {
                let mut state = Self::default();
                for (faction, value) in &save.scores {
                    state.scores.insert(*faction, *value);
                }
                state.nationalism_meter = save.nationalism_meter.min(METER_MAX);
                state
            }
        }
    }

    pub fn save(&self) -> ScoreSave {
        ScoreSave {
            scores: self.scores.clone(),
            nationalism_meter: self.nationalism_meter,
        }
    }

    pub fn score(&self, faction: Faction) -> i64 {
        *self.scores.get(&faction).unwrap_or(&0)
    }
}
