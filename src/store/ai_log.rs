//! AI store: action log and replay list for the opponent turns
//!
//! Everything here is transient: the log is for the replay UI only and
//! is never part of a save. Loading always resets this store.

use serde::{Deserialize, Serialize};

use crate::core::types::TerritoryId;

/// A structured AI action for the replay UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AiAction {
    Reinforce {
        territory: TerritoryId,
        troops: u32,
    },
    Attack {
        from: TerritoryId,
        to: TerritoryId,
        captured: bool,
        attacker_losses: u32,
        defender_losses: u32,
    },
    Maneuver {
        from: TerritoryId,
        to: TerritoryId,
        troops: u32,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AiState {
    /// Append-only narration of AI turns.
    pub log: Vec<String>,
    /// Structured actions backing the replay UI.
    pub actions: Vec<AiAction>,
    pub show_replay: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AiCommand {
    AddLog(String),
    ClearLog,
    SetActions(Vec<AiAction>),
    ShowReplay,
    HideReplay,
    Reset,
    /// Saves carry no AI state; load is a full reset.
    Load,
}

impl AiState {
    pub fn reduce(mut self, command: &AiCommand) -> Self {
        match command {
            AiCommand::AddLog(line) => {
                self.log.push(line.clone());
                self
            }

            AiCommand::ClearLog => {
                self.log.clear();
                self
            }

            AiCommand::SetActions(actions) => {
                self.actions = actions.clone();
                self
            }

            AiCommand::ShowReplay => {
                self.show_replay = true;
                self
            }

            AiCommand::HideReplay => {
                self.show_replay = false;
                self
            }

            AiCommand::Reset | AiCommand::Load => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_is_append_only() {
        let state = AiState::default()
            .reduce(&AiCommand::AddLog("British receive 5 reinforcements.".to_string()))
            .reduce(&AiCommand::AddLog("British capture Detroit!".to_string()));
        assert_eq!(state.log.len(), 2);
    }

    #[test]
    fn load_discards_everything() {
        let dirty = AiState::default()
            .reduce(&AiCommand::AddLog("line".to_string()))
            .reduce(&AiCommand::SetActions(vec![AiAction::Reinforce {
                territory: TerritoryId::Halifax,
                troops: 2,
            }]))
            .reduce(&AiCommand::ShowReplay);
        assert_eq!(dirty.reduce(&AiCommand::Load), AiState::default());
    }
}
