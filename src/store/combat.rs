//! Combat store: battle results, reinforcement and maneuver budgets

use serde::{Deserialize, Serialize};

use crate::battle::{BattleResult, BattleStats};
use crate::core::types::TerritoryId;
use crate::store::sanitize_count;

/// Persistent slice of the combat state. The battle result, modal flag,
/// and maneuver cursor are transient and never saved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatSave {
    #[serde(default)]
    pub reinforcements_remaining: u32,
    #[serde(default)]
    pub battle_stats: BattleStats,
    #[serde(default)]
    pub maneuvers_remaining: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombatState {
    pub reinforcements_remaining: u32,
    /// Outcome awaiting consumption; cleared on dismiss.
    pub battle_result: Option<BattleResult>,
    pub show_battle_modal: bool,
    pub battle_stats: BattleStats,
    /// Source territory of a maneuver in progress.
    pub maneuver_from: Option<TerritoryId>,
    pub maneuvers_remaining: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CombatCommand {
    /// Payload crosses the UI/JSON boundary; NaN and negatives clamp.
    SetReinforcements(f64),
    UseReinforcement,
    StartBattle(BattleResult),
    DismissBattle,
    UpdateBattleStats { fought: u32, won: u32, lost: u32 },
    StartManeuver(TerritoryId),
    ExecuteManeuver,
    CancelManeuver,
    UseManeuver,
    SetManeuvers(f64),
    Reset,
    Load(CombatSave),
}

impl CombatState {
    pub fn reduce(mut self, command: &CombatCommand) -> Self {
        match command {
            CombatCommand::SetReinforcements(payload) => {
                self.reinforcements_remaining =
                    sanitize_count(*payload, self.reinforcements_remaining);
                self
            }

            CombatCommand::UseReinforcement => {
                self.reinforcements_remaining = self.reinforcements_remaining.saturating_sub(1);
                self
            }

            CombatCommand::StartBattle(result) => {
                self.battle_result = Some(result.clone());
                self.show_battle_modal = true;
                self
            }

            CombatCommand::DismissBattle => {
                self.battle_result = None;
                self.show_battle_modal = false;
                self
            }

            CombatCommand::UpdateBattleStats { fought, won, lost } => {
                self.battle_stats.fought += fought;
                self.battle_stats.won += won;
                self.battle_stats.lost += lost;
                self
            }

            CombatCommand::StartManeuver(territory) => {
                self.maneuver_from = Some(*territory);
                self
            }

            CombatCommand::ExecuteManeuver => {
                self.maneuver_from = None;
                self.maneuvers_remaining = self.maneuvers_remaining.saturating_sub(1);
                self
            }

            CombatCommand::CancelManeuver => {
                self.maneuver_from = None;
                self
            }

            CombatCommand::UseManeuver => {
                self.maneuvers_remaining = self.maneuvers_remaining.saturating_sub(1);
                self
            }

            CombatCommand::SetManeuvers(payload) => {
                self.maneuvers_remaining = sanitize_count(*payload, self.maneuvers_remaining);
                self
            }

            CombatCommand::Reset => Self::default(),

            CombatCommand::Load(save) => Self {
                reinforcements_remaining: save.reinforcements_remaining,
                battle_result: None,
                show_battle_modal: false,
                battle_stats: save.battle_stats,
                maneuver_from: None,
                maneuvers_remaining: save.maneuvers_remaining,
            },
        }
    }

    pub fn save(&self) -> CombatSave {
        CombatSave {
            reinforcements_remaining: self.reinforcements_remaining,
            battle_stats: self.battle_stats,
            maneuvers_remaining: self.maneuvers_remaining,
        }
    }
}
