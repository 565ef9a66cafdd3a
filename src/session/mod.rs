//! Game session orchestration
//!
//! `GameSession` owns the composed state, the seeded RNG, the
//! difficulty profile, and the undo snapshot stack. Every external
//! operation enters here: the session validates preconditions, then
//! sequences the fan-out across sub-stores that a single reducer is
//! not allowed to do. Reducers stay pure; all side effects (dice,
//! logging, serialization) live at this level.

pub mod save;

pub use save::SaveGame;

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::ai::AiOpponent;
use crate::battle::{self, BattleResult, Combatant};
use crate::core::error::{EngineError, Result};
use crate::core::types::{season_label, Difficulty, Faction, GameStatus, Phase, TerritoryId};
use crate::data::territories;
use crate::economy::{self, AiProfile};
use crate::store::{
    AiAction, AiCommand, CombatCommand, EventCard, EventCommand, GameCommand, GameState,
    HistoryCommand, JournalEntry, KnowledgeCard, KnowledgeCommand, MapCommand, ScoreCommand,
};

/// Nationalism meter swing when the United States takes or loses a
/// territory.
const NATIONALISM_SWING: f64 = 5.0;

/// One entry on the undo stack: a full pre-advance copy of the state.
#[derive(Debug, Clone)]
pub struct HistorySnapshot {
    pub label: String,
    state: GameState,
}

/// A running game: composed state plus the session-scoped resources
/// the reducers must not own.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub state: GameState,
    /// Profile driving the AI factions.
    profile: AiProfile,
    /// Baseline profile used for the human player's budgets.
    player_profile: AiProfile,
    rng: ChaCha8Rng,
    snapshots: Vec<HistorySnapshot>,
}

impl GameSession {
    pub fn new(seed: u64, difficulty: Difficulty) -> Self {
        Self::with_profile(seed, AiProfile::for_difficulty(difficulty))
    }

    /// Session with a custom (e.g. TOML-loaded) AI profile.
    pub fn with_profile(seed: u64, profile: AiProfile) -> Self {
        Self {
            state: GameState::initial(),
            profile,
            player_profile: AiProfile::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            snapshots: Vec::new(),
        }
    }

    pub fn profile(&self) -> &AiProfile {
        &self.profile
    }

    pub fn snapshot_depth(&self) -> usize {
        self.snapshots.len()
    }

    /// Discard the campaign entirely: every sub-store returns to its
    /// initial state and the undo stack empties.
    pub fn reset(&mut self) {
        tracing::info!("resetting the game");
        self.state = GameState::initial();
        self.snapshots.clear();
    }

    /// Begin a fresh campaign as `faction`.
    pub fn start_game(&mut self, faction: Faction, name: &str, period: &str) {
        tracing::info!(?faction, name, "starting a new campaign");
        self.state = GameState::initial().reduce_game(&GameCommand::Start {
            faction,
            name: name.to_string(),
            period: period.to_string(),
        });
        self.snapshots.clear();
    }

    // ---- phase control -------------------------------------------------

    /// Advance to the next phase, gating on unused budgets: if the
    /// player still has reinforcements or maneuvers to spend, the
    /// advance is parked behind a confirmation instead of executing.
    /// Returns `true` when the advance ran, `false` when it is pending.
    pub fn request_advance(&mut self) -> Result<bool> {
        self.ensure_in_progress()?;
        if self.state.history.pending_advance {
            return Err(EngineError::AdvancePending);
        }
        if let Some(warning) = self.unspent_budget_warning() {
            self.state.history = self
                .state
                .history
                .clone()
                .reduce(&HistoryCommand::SetPendingAdvance(warning));
            return Ok(false);
        }
        self.advance(None)?;
        Ok(true)
    }

    /// Confirm a parked phase advance.
    pub fn confirm_advance(&mut self) -> Result<()> {
        if !self.state.history.pending_advance {
            return Err(EngineError::NoPendingAdvance);
        }
        self.state.history = self.state.history.clone().reduce(&HistoryCommand::ClearPendingAdvance);
        self.advance(None)
    }

    /// Cancel a parked phase advance and stay in the current phase.
    pub fn cancel_advance(&mut self) -> Result<()> {
        if !self.state.history.pending_advance {
            return Err(EngineError::NoPendingAdvance);
        }
        self.state.history = self.state.history.clone().reduce(&HistoryCommand::ClearPendingAdvance);
        Ok(())
    }

    /// Restore the snapshot taken before the last phase advance. Not
    /// available from the event phase: undo never crosses a round
    /// boundary.
    pub fn undo_phase(&mut self) -> Result<()> {
        self.ensure_in_progress()?;
        if self.state.game.phase == Phase::Event {
            return Err(EngineError::WrongPhase(Phase::Event));
        }
        let snapshot = self.snapshots.pop().ok_or(EngineError::NothingToUndo)?;
        let target = snapshot.state.game.phase;
        tracing::info!(?target, "rewinding one phase");
        self.state = snapshot.state;
        self.state.game = self
            .state
            .game
            .clone()
            .reduce(&GameCommand::SetMessage(target.default_message().to_string()));
        Ok(())
    }

    /// Unconditional phase advance with on-entry effects.
    fn advance(&mut self, message: Option<String>) -> Result<()> {
        self.ensure_in_progress()?;
        let prev_round = self.state.game.round;
        self.snapshots.push(HistorySnapshot {
            label: format!("round {} {:?}", prev_round, self.state.game.phase),
            state: self.state.clone(),
        });

        self.state.game = self
            .state
            .game
            .clone()
            .reduce(&GameCommand::AdvancePhase { message, override_phase: None });
        self.state.history = self.state.history.clone().reduce(&HistoryCommand::ClearActions);

        if self.state.game.status == GameStatus::GameOver {
            tracing::info!("the war is over");
            self.write_journal(prev_round);
            return Ok(());
        }

        match self.state.game.phase {
            Phase::Event => {
                // New round: immunity expires and the last round's AI
                // narration moves into the journal.
                self.write_journal(prev_round);
                self.state.event = self
                    .state
                    .event
                    .clone()
                    .reduce(&EventCommand::ClearInvulnerableTerritories);
                self.state.ai = self
                    .state
                    .ai
                    .clone()
                    .reduce(&AiCommand::ClearLog)
                    .reduce(&AiCommand::SetActions(Vec::new()));
            }
            Phase::Allocate => {
                let player = self.player()?;
                let budget = economy::reinforcements(
                    player,
                    &self.state.map,
                    &self.state.leader.leader_states,
                    self.state.game.round,
                    &self.player_profile,
                );
                tracing::info!(?player, budget, "allocation phase begins");
                self.state.combat = self
                    .state
                    .combat
                    .clone()
                    .reduce(&CombatCommand::SetReinforcements(budget as f64));
            }
            Phase::Maneuver => {
                let allotment = economy::maneuver_allotment(&self.player_profile);
                self.state.combat = self
                    .state
                    .combat
                    .clone()
                    .reduce(&CombatCommand::SetManeuvers(allotment as f64));
            }
            Phase::Score => {
                self.run_ai_turns();
                self.apply_scores();
            }
            Phase::Battle => {}
        }
        Ok(())
    }

    // ---- player operations ---------------------------------------------

    /// Place one reinforcement troop on an owned territory.
    pub fn place_reinforcement(&mut self, territory: TerritoryId) -> Result<()> {
        self.ensure_phase(Phase::Allocate)?;
        let player = self.player()?;
        if self.state.map.owner(territory) != player {
            return Err(EngineError::NotOwned(territory, player));
        }
        if self.state.combat.reinforcements_remaining == 0 {
            return Err(EngineError::BudgetExhausted("reinforcements"));
        }
        self.state.map = self
            .state
            .map
            .clone()
            .reduce(&MapCommand::AddTroops { territory, count: 1 });
        self.state.combat = self.state.combat.clone().reduce(&CombatCommand::UseReinforcement);
        self.state.history = self.state.history.clone().reduce(&HistoryCommand::RecordAction(
            format!("Reinforced {}", territories::get(territory).name),
        ));
        Ok(())
    }

    /// Resolve a player attack and apply its outcome.
    pub fn attack(&mut self, from: TerritoryId, to: TerritoryId) -> Result<BattleResult> {
        self.ensure_phase(Phase::Battle)?;
        let player = self.player()?;
        if self.state.map.owner(from) != player {
            return Err(EngineError::NotOwned(from, player));
        }
        if self.state.map.owner(to) == player {
            return Err(EngineError::AlreadyOwned(to, player));
        }
        if !territories::are_adjacent(from, to) {
            return Err(EngineError::NotAdjacent(from, to));
        }
        if self.state.event.invulnerable_territories.contains(&to) {
            return Err(EngineError::Invulnerable(to));
        }
        let troops = self.state.map.troops_in(from);
        if troops < 2 {
            return Err(EngineError::InsufficientTroops(from, 2, troops));
        }

        let result = battle::resolve_battle(
            Combatant { territory: from, faction: player, troops },
            Combatant {
                territory: to,
                faction: self.state.map.owner(to),
                troops: self.state.map.troops_in(to),
            },
            &self.state.leader.leader_states,
            &mut self.rng,
        );
        self.apply_battle(&result);

        self.state.combat = self
            .state
            .combat
            .clone()
            .reduce(&CombatCommand::UpdateBattleStats {
                fought: 1,
                won: result.victory as u32,
                lost: !result.victory as u32,
            })
            .reduce(&CombatCommand::StartBattle(result.clone()));
        self.state.game = self
            .state
            .game
            .clone()
            .reduce(&GameCommand::SetMessage(result.message.clone()));
        Ok(result)
    }

    /// Close the battle modal and drop the ephemeral result.
    pub fn dismiss_battle(&mut self) {
        self.state.combat = self.state.combat.clone().reduce(&CombatCommand::DismissBattle);
    }

    /// Move troops between two adjacent owned territories.
    pub fn execute_maneuver(&mut self, from: TerritoryId, to: TerritoryId, troops: u32) -> Result<()> {
        self.ensure_phase(Phase::Maneuver)?;
        let player = self.player()?;
        if self.state.map.owner(from) != player {
            return Err(EngineError::NotOwned(from, player));
        }
        if self.state.map.owner(to) != player {
            return Err(EngineError::NotOwned(to, player));
        }
        if !territories::are_adjacent(from, to) {
            return Err(EngineError::NotAdjacent(from, to));
        }
        if self.state.combat.maneuvers_remaining == 0 {
            return Err(EngineError::BudgetExhausted("maneuvers"));
        }
        let present = self.state.map.troops_in(from);
        // The source keeps its garrison of 1.
        if present < troops + 1 {
            return Err(EngineError::InsufficientTroops(from, troops + 1, present));
        }
        self.state.map = self
            .state
            .map
            .clone()
            .reduce(&MapCommand::RemoveTroops { territory: from, count: troops })
            .reduce(&MapCommand::AddTroops { territory: to, count: troops });
        self.state.combat = self
            .state
            .combat
            .clone()
            .reduce(&CombatCommand::StartManeuver(from))
            .reduce(&CombatCommand::ExecuteManeuver);
        self.state.history = self.state.history.clone().reduce(&HistoryCommand::RecordAction(
            format!(
                "Moved {} troops from {} to {}",
                troops,
                territories::get(from).name,
                territories::get(to).name
            ),
        ));
        Ok(())
    }

    // ---- event and knowledge passthroughs ------------------------------

    /// Put an event card in play and mark it used.
    pub fn draw_event(&mut self, card: EventCard) {
        let id = card.id.clone();
        self.state.event = self
            .state
            .event
            .clone()
            .reduce(&EventCommand::Draw(card))
            .reduce(&EventCommand::ShowCard)
            .reduce(&EventCommand::MarkUsed(id));
    }

    pub fn dismiss_event(&mut self) {
        self.state.event = self.state.event.clone().reduce(&EventCommand::HideCard);
    }

    /// Shield a territory from capture until the round ends.
    pub fn add_invulnerable(&mut self, territory: TerritoryId) {
        self.state.event = self
            .state
            .event
            .clone()
            .reduce(&EventCommand::AddInvulnerableTerritory(territory));
    }

    /// Record the answer to a knowledge check.
    pub fn answer_check(&mut self, card: KnowledgeCard, correct: bool) {
        let id = card.id.clone();
        self.state.knowledge = self
            .state
            .knowledge
            .clone()
            .reduce(&KnowledgeCommand::Answer { card, correct })
            .reduce(&KnowledgeCommand::MarkUsed(id))
            .reduce(&KnowledgeCommand::Hide);
    }

    // ---- AI turns ------------------------------------------------------

    /// Run a full turn for every AI-controlled faction, in fixed order.
    pub fn run_ai_turns(&mut self) {
        let player = self.state.game.player_faction;
        for faction in Faction::PLAYABLE {
            if Some(faction) != player {
                self.ai_turn(faction);
            }
        }
    }

    /// One faction's complete AI turn: reinforce, attack up to the
    /// profile cap with re-enumeration after each battle, then shift
    /// rear troops forward.
    pub fn ai_turn(&mut self, faction: Faction) {
        let opponent = AiOpponent::new(faction, self.profile.clone());
        let mut actions: Vec<AiAction> = self.state.ai.actions.clone();

        let budget = economy::reinforcements(
            faction,
            &self.state.map,
            &self.state.leader.leader_states,
            self.state.game.round,
            &self.profile,
        );
        for (territory, troops) in opponent.plan_reinforcements(&self.state.map, budget) {
            self.state.map = self
                .state
                .map
                .clone()
                .reduce(&MapCommand::AddTroops { territory, count: troops });
            self.log_ai(format!(
                "{} reinforces {} with {} troops",
                faction.display_name(),
                territories::get(territory).name,
                troops
            ));
            actions.push(AiAction::Reinforce { territory, troops });
        }

        for _ in 0..self.profile.max_attacks_per_turn {
            let Some(candidate) = opponent.select_attack(
                &self.state.map,
                &self.state.leader.leader_states,
                &self.state.event.invulnerable_territories,
                &mut self.rng,
            ) else {
                break;
            };
            tracing::debug!(
                from = ?candidate.from,
                to = ?candidate.to,
                score = candidate.score,
                p = candidate.win_probability,
                "ai attack selected"
            );
            let result = battle::resolve_battle(
                Combatant {
                    territory: candidate.from,
                    faction,
                    troops: self.state.map.troops_in(candidate.from),
                },
                Combatant {
                    territory: candidate.to,
                    faction: self.state.map.owner(candidate.to),
                    troops: self.state.map.troops_in(candidate.to),
                },
                &self.state.leader.leader_states,
                &mut self.rng,
            );
            self.apply_battle(&result);
            self.log_ai(result.message.clone());
            actions.push(AiAction::Attack {
                from: result.from_id,
                to: result.to_id,
                captured: result.victory,
                attacker_losses: result.attacker_losses,
                defender_losses: result.defender_losses,
            });
        }

        let allotment = economy::maneuver_allotment(&self.profile);
        for plan in opponent.plan_maneuvers(&self.state.map, allotment) {
            self.state.map = self
                .state
                .map
                .clone()
                .reduce(&MapCommand::RemoveTroops { territory: plan.from, count: plan.troops })
                .reduce(&MapCommand::AddTroops { territory: plan.to, count: plan.troops });
            self.log_ai(format!(
                "{} repositions {} troops from {} to {}",
                faction.display_name(),
                plan.troops,
                territories::get(plan.from).name,
                territories::get(plan.to).name
            ));
            actions.push(AiAction::Maneuver {
                from: plan.from,
                to: plan.to,
                troops: plan.troops,
            });
        }

        self.state.ai = self.state.ai.clone().reduce(&AiCommand::SetActions(actions));
    }

    // ---- internals -----------------------------------------------------

    /// Fan an adjudicated battle out across the map and score stores.
    fn apply_battle(&mut self, result: &BattleResult) {
        tracing::info!(
            attacker = ?result.attacker,
            from = ?result.from_id,
            to = ?result.to_id,
            victory = result.victory,
            "battle resolved"
        );
        let mut map = self
            .state
            .map
            .clone()
            .reduce(&MapCommand::RemoveTroops {
                territory: result.from_id,
                count: result.attacker_losses,
            })
            .reduce(&MapCommand::RemoveTroops {
                territory: result.to_id,
                count: result.defender_losses,
            });
        if result.victory {
            map = map
                .reduce(&MapCommand::Capture {
                    territory: result.to_id,
                    new_owner: result.attacker,
                })
                .reduce(&MapCommand::RemoveTroops {
                    territory: result.from_id,
                    count: result.troops_moved,
                })
                .reduce(&MapCommand::AddTroops {
                    territory: result.to_id,
                    count: result.troops_moved,
                });
            if result.attacker == Faction::Us {
                self.state.score = self
                    .state
                    .score
                    .clone()
                    .reduce(&ScoreCommand::DeltaNationalism(NATIONALISM_SWING));
            } else if result.defender == Faction::Us {
                self.state.score = self
                    .state
                    .score
                    .clone()
                    .reduce(&ScoreCommand::DeltaNationalism(-NATIONALISM_SWING));
            }
        }
        self.state.map = map;
    }

    /// Add each faction's held victory points to its running score.
    fn apply_scores(&mut self) {
        let mut updates = BTreeMap::new();
        for faction in Faction::PLAYABLE {
            let gained: u32 = self
                .state
                .map
                .owned_territories(faction)
                .iter()
                .map(|&id| territories::get(id).points)
                .sum();
            updates.insert(faction, self.state.score.score(faction) + gained as i64);
        }
        tracing::info!(round = self.state.game.round, ?updates, "scores updated");
        self.state.score = self.state.score.clone().reduce(&ScoreCommand::UpdateScores(updates));
    }

    fn write_journal(&mut self, round: u32) {
        let items = if self.state.ai.log.is_empty() {
            vec![format!("Round {round} passes without incident.")]
        } else {
            self.state.ai.log.clone()
        };
        self.state.history = self
            .state
            .history
            .clone()
            .reduce(&HistoryCommand::AddJournalEntry(JournalEntry {
                season: season_label(round),
                items,
            }));
    }

    fn unspent_budget_warning(&self) -> Option<String> {
        match self.state.game.phase {
            Phase::Allocate if self.state.combat.reinforcements_remaining > 0 => Some(format!(
                "{} reinforcements are still unplaced. Advance anyway?",
                self.state.combat.reinforcements_remaining
            )),
            Phase::Maneuver if self.state.combat.maneuvers_remaining > 0 => Some(format!(
                "{} maneuvers remain unused. Advance anyway?",
                self.state.combat.maneuvers_remaining
            )),
            _ => None,
        }
    }

    fn player(&self) -> Result<Faction> {
        self.state.game.player_faction.ok_or(EngineError::GameNotInProgress)
    }

    fn ensure_in_progress(&self) -> Result<()> {
        if self.state.game.status != GameStatus::InProgress {
            return Err(EngineError::GameNotInProgress);
        }
        Ok(())
    }

    fn ensure_phase(&self, phase: Phase) -> Result<()> {
        self.ensure_in_progress()?;
        if self.state.game.phase != phase {
            return Err(EngineError::WrongPhase(self.state.game.phase));
        }
        Ok(())
    }

    // ---- headless play -------------------------------------------------

    /// Play one full round with every faction, the player's included,
    /// under AI control. Used by the skirmish runner.
    pub fn play_round(&mut self) -> Result<()> {
        self.ensure_in_progress()?;
        self.advance(None)?; // event -> allocate
        self.state.combat = self.state.combat.clone().reduce(&CombatCommand::SetReinforcements(0.0));
        self.advance(None)?; // allocate -> battle
        let player = self.player()?;
        self.ai_turn(player);
        self.advance(None)?; // battle -> maneuver
        self.state.combat = self.state.combat.clone().reduce(&CombatCommand::SetManeuvers(0.0));
        self.advance(None)?; // maneuver -> score (AI turns + scoring)
        self.advance(None)?; // score -> next event, or game over
        Ok(())
    }

    fn log_ai(&mut self, line: String) {
        self.state.ai = self.state.ai.clone().reduce(&AiCommand::AddLog(line));
    }
}

impl GameState {
    fn reduce_game(mut self, command: &GameCommand) -> Self {
        self.game = self.game.reduce(command);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        let mut s = GameSession::new(1812, Difficulty::Medium);
        s.start_game(Faction::Us, "Player", "1st");
        s
    }

    fn advance_to(s: &mut GameSession, phase: Phase) {
        while s.state.game.phase != phase {
            s.advance(None).unwrap();
            // Drain budgets so gates never fire in helpers.
            s.state.combat = s
                .state
                .combat
                .clone()
                .reduce(&CombatCommand::SetReinforcements(0.0))
                .reduce(&CombatCommand::SetManeuvers(0.0));
        }
    }

    #[test]
    fn allocate_entry_sets_player_budget() {
        let mut s = session();
        s.advance(None).unwrap();
        assert_eq!(s.state.game.phase, Phase::Allocate);
        // US: base 3 + 12 territories / 2.
        assert_eq!(s.state.combat.reinforcements_remaining, 9);
    }

    #[test]
    fn place_reinforcement_validates_ownership_and_budget() {
        let mut s = session();
        s.advance(None).unwrap();
        assert!(matches!(
            s.place_reinforcement(TerritoryId::Halifax),
            Err(EngineError::NotOwned(TerritoryId::Halifax, Faction::Us))
        ));
        let before = s.state.map.troops_in(TerritoryId::Detroit);
        s.place_reinforcement(TerritoryId::Detroit).unwrap();
        assert_eq!(s.state.map.troops_in(TerritoryId::Detroit), before + 1);
        assert_eq!(s.state.combat.reinforcements_remaining, 8);
        assert_eq!(s.state.history.action_history.len(), 1);
    }

    #[test]
    fn reinforcement_outside_allocate_is_rejected() {
        let mut s = session();
        assert!(matches!(
            s.place_reinforcement(TerritoryId::Detroit),
            Err(EngineError::WrongPhase(Phase::Event))
        ));
    }

    #[test]
    fn unspent_budget_gates_the_advance() {
        let mut s = session();
        s.advance(None).unwrap();
        assert!(!s.request_advance().unwrap());
        assert!(s.state.history.pending_advance);
        assert!(matches!(s.request_advance(), Err(EngineError::AdvancePending)));

        s.cancel_advance().unwrap();
        assert_eq!(s.state.game.phase, Phase::Allocate);

        assert!(!s.request_advance().unwrap());
        s.confirm_advance().unwrap();
        assert_eq!(s.state.game.phase, Phase::Battle);
        assert!(!s.state.history.pending_advance);
    }

    #[test]
    fn confirm_without_pending_is_an_error() {
        let mut s = session();
        assert!(matches!(s.confirm_advance(), Err(EngineError::NoPendingAdvance)));
        assert!(matches!(s.cancel_advance(), Err(EngineError::NoPendingAdvance)));
    }

    #[test]
    fn attack_validations_cover_the_preconditions() {
        let mut s = session();
        advance_to(&mut s, Phase::Battle);
        assert!(matches!(
            s.attack(TerritoryId::Halifax, TerritoryId::Montreal),
            Err(EngineError::NotOwned(..))
        ));
        assert!(matches!(
            s.attack(TerritoryId::Detroit, TerritoryId::FortDearborn),
            Err(EngineError::AlreadyOwned(..))
        ));
        assert!(matches!(
            s.attack(TerritoryId::Detroit, TerritoryId::Halifax),
            Err(EngineError::NotAdjacent(..))
        ));
        s.add_invulnerable(TerritoryId::UpperCanada);
        assert!(matches!(
            s.attack(TerritoryId::Detroit, TerritoryId::UpperCanada),
            Err(EngineError::Invulnerable(TerritoryId::UpperCanada))
        ));
        s.state.map = s
            .state
            .map
            .clone()
            .reduce(&MapCommand::SetTroops { territory: TerritoryId::Detroit, count: 1 });
        assert!(matches!(
            s.attack(TerritoryId::Detroit, TerritoryId::LakeErie),
            Err(EngineError::InsufficientTroops(TerritoryId::Detroit, 2, 1))
        ));
    }

    #[test]
    fn attack_conserves_troops_and_updates_stats() {
        let mut s = session();
        advance_to(&mut s, Phase::Battle);
        let before =
            s.state.map.troops_in(TerritoryId::Detroit) + s.state.map.troops_in(TerritoryId::UpperCanada);
        let result = s.attack(TerritoryId::Detroit, TerritoryId::UpperCanada).unwrap();
        let after =
            s.state.map.troops_in(TerritoryId::Detroit) + s.state.map.troops_in(TerritoryId::UpperCanada);
        assert_eq!(after, before - result.attacker_losses - result.defender_losses);
        assert_eq!(s.state.combat.battle_stats.fought, 1);
        assert!(s.state.combat.show_battle_modal);
        s.dismiss_battle();
        assert!(s.state.combat.battle_result.is_none());
    }

    #[test]
    fn captured_undefended_territory_changes_hands() {
        let mut s = session();
        advance_to(&mut s, Phase::Battle);
        let result = s.attack(TerritoryId::Detroit, TerritoryId::LakeErie).unwrap();
        assert!(result.victory);
        assert_eq!(s.state.map.owner(TerritoryId::LakeErie), Faction::Us);
        assert!(s.state.map.troops_in(TerritoryId::LakeErie) >= 1);
        assert!(s.state.map.troops_in(TerritoryId::Detroit) >= 1, "garrison stays");
        assert_eq!(s.state.score.nationalism_meter, 5);
    }

    #[test]
    fn maneuver_moves_troops_between_owned_territories() {
        let mut s = session();
        advance_to(&mut s, Phase::Maneuver);
        s.state.combat = s.state.combat.clone().reduce(&CombatCommand::SetManeuvers(2.0));
        s.execute_maneuver(TerritoryId::Detroit, TerritoryId::OhioValley, 2).unwrap();
        assert_eq!(s.state.map.troops_in(TerritoryId::Detroit), 2);
        assert_eq!(s.state.map.troops_in(TerritoryId::OhioValley), 4);
        assert_eq!(s.state.combat.maneuvers_remaining, 1);

        assert!(matches!(
            s.execute_maneuver(TerritoryId::Detroit, TerritoryId::OhioValley, 5),
            Err(EngineError::InsufficientTroops(..))
        ));
        assert!(matches!(
            s.execute_maneuver(TerritoryId::Detroit, TerritoryId::Halifax, 1),
            Err(EngineError::NotOwned(TerritoryId::Halifax, Faction::Us))
        ));
    }

    #[test]
    fn undo_restores_the_previous_phase() {
        let mut s = session();
        s.advance(None).unwrap();
        let budget = s.state.combat.reinforcements_remaining;
        s.place_reinforcement(TerritoryId::Detroit).unwrap();
        s.undo_phase().unwrap();
        assert_eq!(s.state.game.phase, Phase::Event);
        // The snapshot predates the allocation entirely.
        assert_eq!(s.state.map.troops_in(TerritoryId::Detroit), 4);
        assert_ne!(s.state.combat.reinforcements_remaining, budget);
    }

    #[test]
    fn undo_never_crosses_a_round_boundary() {
        let mut s = session();
        assert!(matches!(s.undo_phase(), Err(EngineError::WrongPhase(Phase::Event))));
        s.advance(None).unwrap();
        s.snapshots.clear();
        assert!(matches!(s.undo_phase(), Err(EngineError::NothingToUndo)));
    }

    #[test]
    fn score_entry_runs_ai_and_scores() {
        let mut s = session();
        advance_to(&mut s, Phase::Score);
        assert!(s.state.score.score(Faction::Us) > 0);
        assert!(s.state.score.score(Faction::British) > 0);
        assert!(!s.state.ai.log.is_empty(), "ai factions acted");
        assert!(!s.state.ai.actions.is_empty());
    }

    #[test]
    fn round_wrap_journals_the_season() {
        let mut s = session();
        advance_to(&mut s, Phase::Score);
        s.advance(None).unwrap();
        assert_eq!(s.state.game.round, 2);
        assert_eq!(s.state.game.phase, Phase::Event);
        let entry = s.state.history.journal_entries.last().unwrap();
        assert_eq!(entry.season, "Spring 1812");
        assert!(s.state.ai.log.is_empty(), "log rolls into the journal");
        assert!(s.state.event.invulnerable_territories.is_empty());
    }

    #[test]
    fn twelve_rounds_end_in_the_treaty() {
        let mut s = session();
        for _ in 0..12 {
            s.play_round().unwrap();
        }
        assert_eq!(s.state.game.status, GameStatus::GameOver);
        assert!(s.state.game.message.contains("Treaty of Ghent"));
        assert!(matches!(s.play_round(), Err(EngineError::GameNotInProgress)));
    }

    #[test]
    fn reset_returns_every_store_to_its_initial_state() {
        let mut s = session();
        s.play_round().unwrap();
        s.play_round().unwrap();
        s.reset();
        assert_eq!(s.state, GameState::initial());
        assert_eq!(s.snapshot_depth(), 0);
        // Idempotent.
        s.reset();
        assert_eq!(s.state, GameState::initial());
    }

    #[test]
    fn same_seed_same_campaign() {
        let run = |seed| {
            let mut s = GameSession::new(seed, Difficulty::Hard);
            s.start_game(Faction::British, "Player", "");
            for _ in 0..12 {
                s.play_round().unwrap();
            }
            s.state
        };
        assert_eq!(run(7), run(7));
    }

    #[test]
    fn event_and_knowledge_passthroughs_update_their_stores() {
        let mut s = session();
        s.draw_event(EventCard {
            id: "blockade".to_string(),
            title: "British Blockade".to_string(),
            body: "The coast is sealed.".to_string(),
        });
        assert!(s.state.event.show_event_card);
        assert_eq!(s.state.event.used_event_ids, vec!["blockade"]);
        s.dismiss_event();
        assert!(!s.state.event.show_event_card);

        s.answer_check(
            KnowledgeCard { id: "q1".to_string(), prompt: "Who won Lake Erie?".to_string() },
            true,
        );
        assert_eq!(s.state.knowledge.results.total, 1);
        assert_eq!(s.state.knowledge.results.correct, 1);
    }
}
