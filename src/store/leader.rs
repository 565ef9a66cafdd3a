//! Leader store: alive/dead flags for the fixed leader roster

use serde::{Deserialize, Serialize};

use crate::core::types::LeaderId;
use crate::data::leaders::{self, LeaderStates};

/// Persistent slice of the leader state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeaderSave {
    #[serde(default)]
    pub leader_states: LeaderStates,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeaderState {
    pub leader_states: LeaderStates,
}

impl Default for LeaderState {
    fn default() -> Self {
        Self {
            leader_states: leaders::initial_states(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LeaderCommand {
    Kill(LeaderId),
    /// Undo support only; death is otherwise permanent.
    Revive(LeaderId),
    Reset,
    Load(LeaderSave),
}

impl LeaderState {
    pub fn reduce(mut self, command: &LeaderCommand) -> Self {
        match command {
            LeaderCommand::Kill(id) => {
                self.leader_states.insert(*id, false);
                self
            }

            LeaderCommand::Revive(id) => {
                self.leader_states.insert(*id, true);
                self
            }

            LeaderCommand::Reset => Self::default(),

            LeaderCommand::Load(save) => {
                let mut state = Self::default();
                for (id, alive) in &save.leader_states {
                    state.leader_states.insert(*id, *alive);
                }
                state
            }
        }
    }

    pub fn save(&self) -> LeaderSave {
        LeaderSave {
            leader_states: self.leader_states.clone(),
        }
    }

    pub fn is_alive(&self, id: LeaderId) -> bool {
        *self.leader_states.get(&id).unwrap_or(&true)
    }
}
