//! Save-game serialization
//!
//! One JSON schema, one version. Each sub-store contributes its
//! persistent slice; transient fields (open modals, the current battle
//! result, the AI log, pending confirmations) are omitted on export
//! and forced back to defaults on import. Missing sections fall back
//! to their starting values, so a truncated save still loads.

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::store::combat::CombatSave;
use crate::store::event::EventSave;
use crate::store::game::GameFlowSave;
use crate::store::history::HistorySave;
use crate::store::knowledge::KnowledgeSave;
use crate::store::leader::LeaderSave;
use crate::store::map::MapSave;
use crate::store::score::ScoreSave;
use crate::store::{
    AiCommand, CombatCommand, EventCommand, GameCommand, HistoryCommand, KnowledgeCommand,
    LeaderCommand, MapCommand, ScoreCommand,
};

use super::GameSession;

/// The complete persistent payload of a campaign.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveGame {
    #[serde(default)]
    pub game: GameFlowSave,
    #[serde(default)]
    pub map: MapSave,
    #[serde(default)]
    pub combat: CombatSave,
    #[serde(default)]
    pub event: EventSave,
    #[serde(default)]
    pub knowledge: KnowledgeSave,
    #[serde(default)]
    pub score: ScoreSave,
    #[serde(default)]
    pub leader: LeaderSave,
    #[serde(default)]
    pub history: HistorySave,
}

impl GameSession {
    /// Snapshot the persistent state for export.
    pub fn export(&self) -> SaveGame {
        SaveGame {
            game: self.state.game.save(),
            map: self.state.map.save(),
            combat: self.state.combat.save(),
            event: self.state.event.save(),
            knowledge: self.state.knowledge.save(),
            score: self.state.score.save(),
            leader: self.state.leader.save(),
            history: self.state.history.save(),
        }
    }

    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.export())?)
    }

    /// Restore a campaign from a save. Every transient field resets
    /// and the undo stack is discarded.
    pub fn import(&mut self, save: SaveGame) {
        tracing::info!(round = save.game.round, "restoring campaign from save");
        self.state.game = self.state.game.clone().reduce(&GameCommand::Load(save.game));
        self.state.map = self.state.map.clone().reduce(&MapCommand::Load(save.map));
        self.state.combat = self.state.combat.clone().reduce(&CombatCommand::Load(save.combat));
        self.state.event = self.state.event.clone().reduce(&EventCommand::Load(save.event));
        self.state.knowledge = self
            .state
            .knowledge
            .clone()
            .reduce(&KnowledgeCommand::Load(save.knowledge));
        self.state.score = self.state.score.clone().reduce(&ScoreCommand::Load(save.score));
        self.state.leader = self.state.leader.clone().reduce(&LeaderCommand::Load(save.leader));
        self.state.history = self.state.history.clone().reduce(&HistoryCommand::Load(save.history));
        self.state.ai = self.state.ai.clone().reduce(&AiCommand::Load);
        self.snapshots.clear();
    }

    pub fn import_json(&mut self, payload: &str) -> Result<()> {
        let save: SaveGame = serde_json::from_str(payload)?;
        self.import(save);
        Ok(())
    }
}
