//! Reinforcement and maneuver economy

pub mod profile;

pub use profile::AiProfile;

use crate::core::types::Faction;
use crate::data::leaders::{self, LeaderStates};
use crate::store::MapState;

/// Last round of the Native early-war reinforcement bonus.
const NATIVE_BONUS_ROUNDS: u32 = 4;

/// Reinforcements granted to `faction` at the start of its allocate
/// phase: `base + floor(owned / 2)` plus leader rally bonuses and the
/// Native confederacy bonus in the early war.
pub fn reinforcements(
    faction: Faction,
    map: &MapState,
    leader_states: &LeaderStates,
    round: u32,
    profile: &AiProfile,
) -> u32 {
    let base = profile.base_reinforcements;
    let owned = map.owned_count(faction) as u32;
    let rally = leaders::rally_bonus(faction, leader_states);
    let native_bonus = if faction == Faction::Native && round <= NATIVE_BONUS_ROUNDS {
        1
    } else {
        0
    };
    base + owned / 2 + rally + native_bonus
}

/// Maneuver allotment for one round.
pub fn maneuver_allotment(profile: &AiProfile) -> u32 {
    profile.max_maneuvers
}
