//! History store: journal timeline and pending-confirmation gates
//!
//! Full-state undo snapshots live in the session's history manager,
//! not here; this store tracks only the journal and the confirmation
//! flags that gate consequential phase advances.

use serde::{Deserialize, Serialize};

/// One entry on the narrative timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Season label such as "Summer 1812".
    pub season: String,
    pub items: Vec<String>,
}

/// Persistent slice of the history state: the journal only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistorySave {
    #[serde(default)]
    pub journal_entries: Vec<JournalEntry>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryState {
    pub journal_entries: Vec<JournalEntry>,
    /// A phase advance is awaiting confirmation.
    pub pending_advance: bool,
    pub pending_advance_message: String,
    /// Labels of undoable actions taken this phase.
    pub action_history: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HistoryCommand {
    AddJournalEntry(JournalEntry),
    SetPendingAdvance(String),
    ClearPendingAdvance,
    RecordAction(String),
    RemoveLastAction,
    ClearActions,
    Reset,
    Load(HistorySave),
}

impl HistoryState {
    pub fn reduce(mut self, command: &HistoryCommand) -> Self {
        match command {
            HistoryCommand::AddJournalEntry(entry) => {
                self.journal_entries.push(entry.clone());
                self
            }

            HistoryCommand::SetPendingAdvance(message) => {
                self.pending_advance = true;
                self.pending_advance_message = message.clone();
                self
            }

            HistoryCommand::ClearPendingAdvance => {
                self.pending_advance = false;
                self.pending_advance_message.clear();
                self
            }

            HistoryCommand::RecordAction(label) => {
                self.action_history.push(label.clone());
                self
            }

            HistoryCommand::RemoveLastAction => {
                self.action_history.pop();
                self
            }

            HistoryCommand::ClearActions => {
                self.action_history.clear();
                self
            }

            HistoryCommand::Reset => Self::default(),

            HistoryCommand::Load(save) => Self {
                journal_entries: save.journal_entries.clone(),
                ..Self::default()
            },
        }
    }

    pub fn save(&self) -> HistorySave {
        HistorySave {
            journal_entries: self.journal_entries.clone(),
        }
    }
}
