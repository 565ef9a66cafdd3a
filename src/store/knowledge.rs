//! Knowledge store: quiz checks, running results, answer history

use serde::{Deserialize, Serialize};

/// A quiz question as supplied by the content collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeCard {
    pub id: String,
    pub prompt: String,
}

/// One answered check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub card: KnowledgeCard,
    pub correct: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResults {
    pub total: u32,
    pub correct: u32,
}

/// Persistent slice of the knowledge state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeSave {
    #[serde(default)]
    pub used_check_ids: Vec<String>,
    #[serde(default)]
    pub required_checks_seen: Vec<String>,
    #[serde(default)]
    pub results: CheckResults,
    #[serde(default)]
    pub history: Vec<AnswerRecord>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct KnowledgeState {
    /// Question currently displayed; transient.
    pub current_check: Option<KnowledgeCard>,
    pub show_check: bool,
    pub used_check_ids: Vec<String>,
    pub required_checks_seen: Vec<String>,
    pub results: CheckResults,
    pub history: Vec<AnswerRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum KnowledgeCommand {
    Draw(KnowledgeCard),
    Show,
    Hide,
    Answer { card: KnowledgeCard, correct: bool },
    MarkUsed(String),
    MarkRequiredSeen(String),
    Reset,
    Load(KnowledgeSave),
}

impl KnowledgeState {
    pub fn reduce(mut self, command: &KnowledgeCommand) -> Self {
        match command {
            KnowledgeCommand::Draw(card) => {
                self.current_check = Some(card.clone());
                self
            }

            KnowledgeCommand::Show => {
                self.show_check = true;
                self
            }

            KnowledgeCommand::Hide => {
                self.show_check = false;
                self
            }

            KnowledgeCommand::Answer { card, correct } => {
                self.results.total += 1;
                if *correct {
                    self.results.correct += 1;
                }
                self.history.push(AnswerRecord {
                    card: card.clone(),
                    correct: *correct,
                });
                self
            }

            KnowledgeCommand::MarkUsed(id) => {
                self.used_check_ids.push(id.clone());
                self
            }

            KnowledgeCommand::MarkRequiredSeen(id) => {
                self.required_checks_seen.push(id.clone());
                self
            }

            KnowledgeCommand::Reset => Self::default(),

            KnowledgeCommand::Load(save) => Self {
                current_check: None,
                show_check: false,
                used_check_ids: save.used_check_ids.clone(),
                required_checks_seen: save.required_checks_seen.clone(),
                results: save.results,
                history: save.history.clone(),
            },
        }
    }

    pub fn save(&self) -> KnowledgeSave {
        KnowledgeSave {
            used_check_ids: self.used_check_ids.clone(),
            required_checks_seen: self.required_checks_seen.clone(),
            results: self.results,
            history: self.history.clone(),
        }
    }
}
