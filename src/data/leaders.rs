//! Leader cards and their combat bonuses
//!
//! Each leader grants a passive ability while alive: a bonus to the
//! highest attack or defense die (optionally restricted to a theater),
//! a naval bonus, extra rally reinforcements, or a first strike that
//! removes defenders before the dice are thrown.

use std::collections::BTreeMap;

use crate::core::types::{Faction, LeaderId, Theater};
use crate::data::territories::Territory;

/// What a leader's passive ability does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderAbility {
    /// Bonus to the highest attack die.
    AttackBonus,
    /// Bonus to the highest defense die.
    DefenseBonus,
    /// Extra reinforcement troops each turn.
    Rally,
    /// Troops removed from the defender before dice are compared.
    FirstStrike,
    /// Bonus on attack or defense in naval territories.
    Naval,
}

/// Static definition of a leader card.
#[derive(Debug, Clone, Copy)]
pub struct Leader {
    pub id: LeaderId,
    pub name: &'static str,
    pub faction: Faction,
    pub title: &'static str,
    pub ability: LeaderAbility,
    pub modifier: u32,
    /// Ability only applies in this theater; `None` means anywhere.
    pub theater: Option<Theater>,
}

use Faction::{British, Native, Us};
use LeaderAbility::*;
use LeaderId::*;

static LEADERS: [Leader; 11] = [
    // United States
    Leader {
        id: Jackson,
        name: "Andrew Jackson",
        faction: Us,
        title: "Major General",
        ability: AttackBonus,
        modifier: 2,
        theater: Some(Theater::Southern),
    },
    Leader {
        id: Perry,
        name: "Oliver Hazard Perry",
        faction: Us,
        title: "Commodore",
        ability: Naval,
        modifier: 2,
        theater: None,
    },
    Leader {
        id: Harrison,
        name: "William Henry Harrison",
        faction: Us,
        title: "Major General",
        ability: AttackBonus,
        modifier: 1,
        theater: Some(Theater::GreatLakes),
    },
    Leader {
        id: WinfieldScott,
        name: "Winfield Scott",
        faction: Us,
        title: "Brigadier General",
        ability: DefenseBonus,
        modifier: 1,
        theater: None,
    },
    // British / Canada
    Leader {
        id: Brock,
        name: "Isaac Brock",
        faction: British,
        title: "Major General",
        ability: DefenseBonus,
        modifier: 2,
        theater: Some(Theater::GreatLakes),
    },
    Leader {
        id: Drummond,
        name: "Gordon Drummond",
        faction: British,
        title: "Lieutenant General",
        ability: AttackBonus,
        modifier: 1,
        theater: None,
    },
    Leader {
        id: Ross,
        name: "Robert Ross",
        faction: British,
        title: "Major General",
        ability: AttackBonus,
        modifier: 2,
        theater: Some(Theater::Chesapeake),
    },
    Leader {
        id: Prevost,
        name: "George Prevost",
        faction: British,
        title: "Governor General",
        ability: Rally,
        modifier: 1,
        theater: None,
    },
    // Native Coalition
    Leader {
        id: Tecumseh,
        name: "Tecumseh",
        faction: Native,
        title: "War Chief",
        ability: AttackBonus,
        modifier: 2,
        theater: None,
    },
    Leader {
        id: Tenskwatawa,
        name: "Tenskwatawa",
        faction: Native,
        title: "The Prophet",
        ability: Rally,
        modifier: 2,
        theater: None,
    },
    Leader {
        id: RedEagle,
        name: "Red Eagle (William Weatherford)",
        faction: Native,
        title: "Red Stick War Chief",
        ability: AttackBonus,
        modifier: 2,
        theater: Some(Theater::Southern),
    },
];

/// Alive/dead flags per leader, as tracked by the leader store.
pub type LeaderStates = BTreeMap<LeaderId, bool>;

pub fn all() -> &'static [Leader] {
    &LEADERS
}

pub fn get(id: LeaderId) -> &'static Leader {
    LEADERS
        .iter()
        .find(|l| l.id == id)
        .unwrap_or_else(|| unreachable!("leader table covers every id"))
}

/// Leaders of `faction` currently alive according to `states`.
/// Missing entries fall back to alive (the roster default).
pub fn alive_leaders(faction: Faction, states: &LeaderStates) -> impl Iterator<Item = &'static Leader> + '_ {
    LEADERS
        .iter()
        .filter(move |l| l.faction == faction && *states.get(&l.id).unwrap_or(&true))
}

fn theater_matches(leader: &Leader, territory: &Territory) -> bool {
    leader.theater.is_none() || leader.theater == Some(territory.theater)
}

/// Total modifier added to the highest die for an attack or defense
/// involving `territory`.
pub fn combat_bonus(
    faction: Faction,
    territory: &Territory,
    attacking: bool,
    states: &LeaderStates,
) -> u32 {
    alive_leaders(faction, states)
        .map(|leader| match leader.ability {
            AttackBonus if attacking && theater_matches(leader, territory) => leader.modifier,
            DefenseBonus if !attacking && theater_matches(leader, territory) => leader.modifier,
            Naval if territory.is_naval => leader.modifier,
            _ => 0,
        })
        .sum()
}

/// Defender troops removed before dice, or 0 without a first-strike leader.
pub fn first_strike_bonus(faction: Faction, territory: &Territory, states: &LeaderStates) -> u32 {
    alive_leaders(faction, states)
        .find(|l| l.ability == FirstStrike && theater_matches(l, territory))
        .map(|l| l.modifier)
        .unwrap_or(0)
}

/// Extra reinforcements per turn from rally leaders.
pub fn rally_bonus(faction: Faction, states: &LeaderStates) -> u32 {
    alive_leaders(faction, states)
        .filter(|l| l.ability == Rally)
        .map(|l| l.modifier)
        .sum()
}

/// Initial alive/dead flags for a fresh game.
pub fn initial_states() -> LeaderStates {
    LEADERS.iter().map(|l| (l.id, true)).collect()
}
