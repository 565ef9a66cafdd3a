//! Dice-based battle resolution
//!
//! The resolver is pure: it reads two territory views plus the leader
//! roster, rolls dice from an injected RNG, and returns a
//! `BattleResult`. It never touches ownership or troop maps; applying
//! the outcome is the session's job.
//!
//! Mechanics: the attacker rolls up to 3 d6 (troops minus the garrison
//! of 1), the defender up to 2 d6. Rolls sort descending and pair off;
//! each lost comparison costs one troop, ties favor the defender.
//! Leader, fort, and naval bonuses raise the highest die, capped at 9.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::{Faction, TerritoryId};
use crate::data::leaders::{self, LeaderStates};
use crate::data::territories;

/// Highest value a boosted die can reach.
const DIE_CAP: u32 = 9;
/// Most dice the attacker may roll.
const MAX_ATTACK_DICE: u32 = 3;
/// Most dice the defender may roll.
const MAX_DEFENSE_DICE: u32 = 2;
/// Most troops that advance into a captured territory.
const MAX_ADVANCING_TROOPS: u32 = 3;

/// One side of a battle: a territory, its owner, and its troops.
#[derive(Debug, Clone, Copy)]
pub struct Combatant {
    pub territory: TerritoryId,
    pub faction: Faction,
    pub troops: u32,
}

/// Running battle statistics for the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleStats {
    pub fought: u32,
    pub won: u32,
    pub lost: u32,
}

/// Ephemeral outcome of a single resolved attack. Consumed once by the
/// command that applies it, then cleared; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleResult {
    pub from_id: TerritoryId,
    pub to_id: TerritoryId,
    pub attacker: Faction,
    pub defender: Faction,
    pub attacker_rolls: Vec<u32>,
    pub defender_rolls: Vec<u32>,
    pub attacker_troops: u32,
    pub defender_troops: u32,
    pub attacker_losses: u32,
    pub defender_losses: u32,
    pub victory: bool,
    /// Troops that advance into the captured territory on victory.
    pub troops_moved: u32,
    pub message: String,
}

fn roll_dice<R: Rng>(rng: &mut R, count: u32) -> Vec<u32> {
    let mut rolls: Vec<u32> = (0..count).map(|_| rng.gen_range(1..=6)).collect();
    rolls.sort_unstable_by(|a, b| b.cmp(a));
    rolls
}

fn boost_highest(rolls: &mut [u32], bonus: u32) {
    if bonus > 0 {
        if let Some(highest) = rolls.first_mut() {
            *highest = (*highest + bonus).min(DIE_CAP);
        }
    }
}

/// Resolve an attack from `attacker` against `defender`.
///
/// Preconditions (validated by the caller, not here): the territories
/// are adjacent, the attacker owns `from` with at least 2 troops, the
/// target is enemy-owned or neutral and not invulnerable this round.
pub fn resolve_battle<R: Rng>(
    attacker: Combatant,
    defender: Combatant,
    leader_states: &LeaderStates,
    rng: &mut R,
) -> BattleResult {
    let from = territories::get(attacker.territory);
    let to = territories::get(defender.territory);

    // Undefended territories fall without dice.
    if defender.troops == 0 {
        let movers = (attacker.troops.saturating_sub(1)).min(MAX_ADVANCING_TROOPS);
        return BattleResult {
            from_id: attacker.territory,
            to_id: defender.territory,
            attacker: attacker.faction,
            defender: defender.faction,
            attacker_rolls: Vec::new(),
            defender_rolls: Vec::new(),
            attacker_troops: attacker.troops,
            defender_troops: 0,
            attacker_losses: 0,
            defender_losses: 0,
            victory: true,
            troops_moved: movers.max(1),
            message: format!("{} occupies undefended {}", attacker.faction.display_name(), to.name),
        };
    }

    // First strike removes defenders before any dice are thrown.
    let first_strike = leaders::first_strike_bonus(attacker.faction, to, leader_states)
        .min(defender.troops);
    let defenders_left = defender.troops - first_strike;

    if defenders_left == 0 {
        let movers = (attacker.troops.saturating_sub(1)).min(MAX_ADVANCING_TROOPS);
        return BattleResult {
            from_id: attacker.territory,
            to_id: defender.territory,
            attacker: attacker.faction,
            defender: defender.faction,
            attacker_rolls: Vec::new(),
            defender_rolls: Vec::new(),
            attacker_troops: attacker.troops,
            defender_troops: defender.troops,
            attacker_losses: 0,
            defender_losses: first_strike,
            victory: true,
            troops_moved: movers.max(1),
            message: format!("A lightning strike clears {}", to.name),
        };
    }

    let attack_dice = (attacker.troops.saturating_sub(1)).min(MAX_ATTACK_DICE);
    let defense_dice = defenders_left.min(MAX_DEFENSE_DICE);

    let mut attack_rolls = roll_dice(rng, attack_dice);
    let mut defend_rolls = roll_dice(rng, defense_dice);

    let mut attack_bonus = leaders::combat_bonus(attacker.faction, from, true, leader_states);
    if attacker.faction == Faction::British && to.is_naval {
        attack_bonus += 1;
    }
    boost_highest(&mut attack_rolls, attack_bonus);

    let mut defend_bonus = leaders::combat_bonus(defender.faction, to, false, leader_states);
    if defender.faction == Faction::British && to.is_naval {
        defend_bonus += 1;
    }
    if to.has_fort {
        defend_bonus += 1;
    }
    boost_highest(&mut defend_rolls, defend_bonus);

    let mut attacker_losses = 0;
    let mut defender_losses = first_strike;
    for (a, d) in attack_rolls.iter().zip(defend_rolls.iter()) {
        if a > d {
            defender_losses += 1;
        } else {
            attacker_losses += 1;
        }
    }

    // Loss bounds: neither side loses more troops than it has, and the
    // attacking territory keeps its garrison.
    attacker_losses = attacker_losses.min(attacker.troops.saturating_sub(1));
    defender_losses = defender_losses.min(defender.troops);

    let victory = defender_losses >= defender.troops;
    let troops_moved = if victory {
        (attack_dice.saturating_sub(attacker_losses))
            .min(attacker.troops.saturating_sub(attacker_losses).saturating_sub(1))
            .max(1)
    } else {
        0
    };

    let message = if victory {
        format!("{} captures {}!", attacker.faction.display_name(), to.name)
    } else {
        format!(
            "{} attacks {} but is repelled",
            attacker.faction.display_name(),
            to.name
        )
    };

    BattleResult {
        from_id: attacker.territory,
        to_id: defender.territory,
        attacker: attacker.faction,
        defender: defender.faction,
        attacker_rolls: attack_rolls,
        defender_rolls: defend_rolls,
        attacker_troops: attacker.troops,
        defender_troops: defender.troops,
        attacker_losses,
        defender_losses,
        victory,
        troops_moved,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::LeaderId;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn no_leaders() -> LeaderStates {
        crate::data::leaders::all().iter().map(|l| (l.id, false)).collect()
    }

    fn combatant(territory: TerritoryId, faction: Faction, troops: u32) -> Combatant {
        Combatant { territory, faction, troops }
    }

    #[test]
    fn undefended_territory_falls_without_dice() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let result = resolve_battle(
            combatant(TerritoryId::Detroit, Faction::Us, 5),
            combatant(TerritoryId::LakeErie, Faction::Neutral, 0),
            &no_leaders(),
            &mut rng,
        );
        assert!(result.victory);
        assert!(result.attacker_rolls.is_empty());
        assert_eq!(result.troops_moved, 3);
        assert_eq!(result.attacker_losses, 0);
    }

    #[test]
    fn losses_never_exceed_present_troops() {
        for seed in 0..200 {
            let mut rng2 = ChaCha8Rng::seed_from_u64(seed);
            let result = resolve_battle(
                combatant(TerritoryId::Detroit, Faction::Us, 2),
                combatant(TerritoryId::UpperCanada, Faction::British, 1),
                &no_leaders(),
                &mut rng2,
            );
            assert!(result.attacker_losses <= 1, "attacker keeps a garrison");
            assert!(result.defender_losses <= 1);
        }
    }

    #[test]
    fn dice_counts_follow_troop_caps() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let result = resolve_battle(
            combatant(TerritoryId::Detroit, Faction::Us, 10),
            combatant(TerritoryId::UpperCanada, Faction::British, 10),
            &no_leaders(),
            &mut rng,
        );
        assert_eq!(result.attacker_rolls.len(), 3);
        assert_eq!(result.defender_rolls.len(), 2);
        assert!(!result.victory, "two losses cannot clear ten defenders");
    }

    #[test]
    fn rolls_are_sorted_and_capped() {
        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let states = crate::data::leaders::initial_states();
            let result = resolve_battle(
                combatant(TerritoryId::NewOrleans, Faction::Us, 8),
                combatant(TerritoryId::Mobile, Faction::British, 4),
                &states,
                &mut rng,
            );
            let mut sorted = result.attacker_rolls.clone();
            sorted.sort_unstable_by(|a, b| b.cmp(a));
            assert_eq!(sorted, result.attacker_rolls);
            assert!(result.attacker_rolls.iter().all(|&r| r <= 9));
        }
    }

    #[test]
    fn same_seed_same_outcome() {
        let states = crate::data::leaders::initial_states();
        let run = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            resolve_battle(
                combatant(TerritoryId::Niagara, Faction::British, 6),
                combatant(TerritoryId::NewYork, Faction::Us, 3),
                &states,
                &mut rng,
            )
        };
        assert_eq!(run(42), run(42));
    }

    #[test]
    fn dead_first_strike_leader_changes_nothing() {
        // No leader in the roster has first strike; the hook still has
        // to behave when every leader is dead.
        let mut states = crate::data::leaders::initial_states();
        states.insert(LeaderId::Tecumseh, false);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let result = resolve_battle(
            combatant(TerritoryId::IndianaTerritory, Faction::Native, 4),
            combatant(TerritoryId::FortDearborn, Faction::Us, 2),
            &states,
            &mut rng,
        );
        assert_eq!(result.defender_losses + result.attacker_losses,
                   result.attacker_rolls.len().min(result.defender_rolls.len()) as u32);
    }
}
