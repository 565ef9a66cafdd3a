//! Game flow store: status, player identity, round/phase cursor, messages

use serde::{Deserialize, Serialize};

use crate::core::types::{Faction, GameStatus, Phase, TOTAL_ROUNDS};

/// Fixed end-of-war message shown when round 12 completes.
pub const TREATY_MESSAGE: &str = "The Treaty of Ghent has been signed. The war is over!";

/// Persistent slice of the game flow state, used by save/load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameFlowSave {
    #[serde(default = "default_status")]
    pub status: GameStatus,
    #[serde(default)]
    pub player_faction: Option<Faction>,
    #[serde(default)]
    pub player_name: String,
    #[serde(default)]
    pub class_period: String,
    #[serde(default = "default_round")]
    pub round: u32,
    #[serde(default = "default_phase")]
    pub phase: Phase,
}

fn default_status() -> GameStatus {
    GameStatus::InProgress
}
fn default_round() -> u32 {
    1
}
fn default_phase() -> Phase {
    Phase::Event
}

impl Default for GameFlowSave {
    fn default() -> Self {
        Self {
            status: default_status(),
            player_faction: None,
            player_name: String::new(),
            class_period: String::new(),
            round: default_round(),
            phase: default_phase(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameFlowState {
    pub status: GameStatus,
    pub player_faction: Option<Faction>,
    pub player_name: String,
    pub class_period: String,
    /// 1..=12.
    pub round: u32,
    pub phase: Phase,
    /// Human-readable status line for the UI.
    pub message: String,
    pub show_intro: bool,
}

impl Default for GameFlowState {
    fn default() -> Self {
        Self {
            status: GameStatus::NotStarted,
            player_faction: None,
            player_name: String::new(),
            class_period: String::new(),
            round: 1,
            phase: Phase::Event,
            message: "Welcome to the War of 1812".to_string(),
            show_intro: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GameCommand {
    Start {
        faction: Faction,
        name: String,
        period: String,
    },
    Over {
        message: Option<String>,
    },
    SetPlayerInfo {
        name: Option<String>,
        period: Option<String>,
        faction: Option<Faction>,
    },
    /// Advance to the next phase in the fixed cycle, or jump straight
    /// to `override_phase` (undo support).
    AdvancePhase {
        message: Option<String>,
        override_phase: Option<Phase>,
    },
    SetMessage(String),
    HideIntro,
    Reset,
    Load(GameFlowSave),
}

impl GameFlowState {
    pub fn reduce(mut self, command: &GameCommand) -> Self {
        match command {
            GameCommand::Start { faction, name, period } => Self {
                status: GameStatus::InProgress,
                player_faction: Some(*faction),
                player_name: name.clone(),
                class_period: period.clone(),
                round: 1,
                phase: Phase::Event,
                message: format!("{}, you command the {}!", name, faction.full_name()),
                show_intro: self.show_intro,
            },

            GameCommand::Over { message } => {
                self.status = GameStatus::GameOver;
                self.message = message
                    .clone()
                    .unwrap_or_else(|| "The War of 1812 has ended.".to_string());
                self
            }

            GameCommand::SetPlayerInfo { name, period, faction } => {
                if let Some(name) = name {
                    self.player_name = name.clone();
                }
                if let Some(period) = period {
                    self.class_period = period.clone();
                }
                if let Some(faction) = faction {
                    self.player_faction = Some(*faction);
                }
                self
            }

            GameCommand::AdvancePhase { message, override_phase } => {
                if let Some(target) = override_phase {
                    self.phase = *target;
                    self.message = message
                        .clone()
                        .unwrap_or_else(|| target.default_message().to_string());
                    return self;
                }

                let next = self.phase.next();
                if next == Phase::Event {
                    // Wrapped around: either a new round begins or the
                    // war ends after round 12.
                    if self.round >= TOTAL_ROUNDS {
                        self.status = GameStatus::GameOver;
                        self.message = TREATY_MESSAGE.to_string();
                        return self;
                    }
                    self.round += 1;
                    self.phase = next;
                    self.message = message
                        .clone()
                        .unwrap_or_else(|| format!("Round {} begins", self.round));
                    return self;
                }

                self.phase = next;
                self.message = message
                    .clone()
                    .unwrap_or_else(|| next.default_message().to_string());
                self
            }

            GameCommand::SetMessage(message) => {
                self.message = message.clone();
                self
            }

            GameCommand::HideIntro => {
                self.show_intro = false;
                self
            }

            GameCommand::Reset => Self::default(),

            GameCommand::Load(save) => Self {
                status: save.status,
                player_faction: save.player_faction,
                player_name: save.player_name.clone(),
                class_period: save.class_period.clone(),
                round: save.round.clamp(1, TOTAL_ROUNDS),
                phase: save.phase,
                message: "Campaign restored.".to_string(),
                show_intro: false,
            },
        }
    }

    pub fn save(&self) -> GameFlowSave {
        GameFlowSave {
            status: self.status,
            player_faction: self.player_faction,
            player_name: self.player_name.clone(),
            class_period: self.class_period.clone(),
            round: self.round,
            phase: self.phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_progress(round: u32, phase: Phase) -> GameFlowState {
        GameFlowState {
            status: GameStatus::InProgress,
            player_faction: Some(Faction::Us),
            round,
            phase,
            ..GameFlowState::default()
        }
    }

    #[test]
    fn start_sets_round_one_event_phase() {
        let state = GameFlowState::default().reduce(&GameCommand::Start {
            faction: Faction::British,
            name: "Liz".to_string(),
            period: "3rd".to_string(),
        });
        assert_eq!(state.status, GameStatus::InProgress);
        assert_eq!(state.round, 1);
        assert_eq!(state.phase, Phase::Event);
        assert!(state.message.contains("Liz"));
    }

    #[test]
    fn phases_advance_in_fixed_order() {
        let mut state = in_progress(1, Phase::Event);
        let expected = [Phase::Allocate, Phase::Battle, Phase::Maneuver, Phase::Score];
        for phase in expected {
            state = state.reduce(&GameCommand::AdvancePhase { message: None, override_phase: None });
            assert_eq!(state.phase, phase);
            assert_eq!(state.round, 1);
        }
    }

    #[test]
    fn score_wrap_increments_round_with_message() {
        let state = in_progress(1, Phase::Score)
            .reduce(&GameCommand::AdvancePhase { message: None, override_phase: None });
        assert_eq!(state.round, 2);
        assert_eq!(state.phase, Phase::Event);
        assert!(state.message.contains('2'));
    }

    #[test]
    fn round_twelve_score_ends_the_war() {
        let state = in_progress(12, Phase::Score)
            .reduce(&GameCommand::AdvancePhase { message: None, override_phase: None });
        assert_eq!(state.status, GameStatus::GameOver);
        assert_eq!(state.message, TREATY_MESSAGE);
        assert_eq!(state.round, 12, "no round 13");
    }

    #[test]
    fn override_phase_jumps_without_round_change() {
        let state = in_progress(4, Phase::Battle).reduce(&GameCommand::AdvancePhase {
            message: Some("Returning to allocation".to_string()),
            override_phase: Some(Phase::Allocate),
        });
        assert_eq!(state.phase, Phase::Allocate);
        assert_eq!(state.round, 4);
        assert_eq!(state.message, "Returning to allocation");
    }

    #[test]
    fn reset_restores_initial_state() {
        let dirty = in_progress(8, Phase::Maneuver);
        assert_eq!(dirty.reduce(&GameCommand::Reset), GameFlowState::default());
    }

    #[test]
    fn load_clamps_round_and_hides_intro() {
        let state = GameFlowState::default().reduce(&GameCommand::Load(GameFlowSave {
            status: GameStatus::InProgress,
            player_faction: Some(Faction::Native),
            player_name: "Kai".to_string(),
            class_period: String::new(),
            round: 40,
            phase: Phase::Battle,
        }));
        assert_eq!(state.round, 12);
        assert!(!state.show_intro);
        assert_eq!(state.player_faction, Some(Faction::Native));
    }
}
