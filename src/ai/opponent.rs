//! AI opponent decision logic
//!
//! For each non-player faction the opponent plans reinforcement
//! placement, an ordered attack sequence, and rear-to-front maneuvers,
//! all tuned by the difficulty profile. Decisions are deterministic
//! given the same state and a seeded RNG, and every candidate is
//! validated against ownership/adjacency/troop counts before it is
//! proposed; the AI never issues an invalid command.
//!
//! The opponent only *selects* moves. Applying them (and resolving the
//! battles they trigger) is the session's job, which re-invokes
//! selection after each executed attack so later choices see the
//! updated map.

use std::collections::{BTreeSet, VecDeque};

use rand::Rng;

use crate::core::types::{Faction, TerritoryId, Theater};
use crate::data::leaders::{self, LeaderStates};
use crate::data::territories;
use crate::economy::AiProfile;
use crate::store::MapState;

/// Effective troop ratios above this see no further gain.
const RATIO_CAP: f64 = 3.0;
/// Even overwhelming odds never promise certainty.
const WIN_PROBABILITY_CAP: f64 = 0.95;

/// A scored attack option.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackCandidate {
    pub from: TerritoryId,
    pub to: TerritoryId,
    pub score: f64,
    pub win_probability: f64,
}

/// A planned troop transfer from a rear territory toward the front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManeuverPlan {
    pub from: TerritoryId,
    pub to: TerritoryId,
    pub troops: u32,
}

/// Decision engine for one AI-controlled faction.
#[derive(Debug, Clone)]
pub struct AiOpponent {
    pub faction: Faction,
    pub profile: AiProfile,
}

impl AiOpponent {
    pub fn new(faction: Faction, profile: AiProfile) -> Self {
        Self { faction, profile }
    }

    /// Distribute `budget` reinforcements across border territories,
    /// weighted toward those with the worst troops-to-threat ratio.
    /// The concentration ratio narrows the set of recipients: 0.0
    /// spreads across every border territory, 1.0 funnels everything
    /// into the single most threatened one.
    pub fn plan_reinforcements(&self, map: &MapState, budget: u32) -> Vec<(TerritoryId, u32)> {
        if budget == 0 {
            return Vec::new();
        }

        let owned = map.owned_territories(self.faction);
        if owned.is_empty() {
            return Vec::new();
        }

        let mut prioritized: Vec<(TerritoryId, f64)> = owned
            .iter()
            .map(|&id| (id, self.reinforce_priority(id, map)))
            .collect();
        prioritized.sort_by(|a, b| b.1.total_cmp(&a.1));

        // Border territories first; fall back to everything if the
        // faction has no contested border at all.
        let border_count = prioritized
            .iter()
            .filter(|(id, _)| self.is_border(*id, map))
            .count();
        let pool = if border_count > 0 { border_count } else { prioritized.len() };

        let spread = (pool as f64 * (1.0 - self.profile.concentration_ratio)).ceil() as usize;
        let recipients = spread.clamp(1, pool);

        let mut placements: Vec<(TerritoryId, u32)> = Vec::new();
        for i in 0..budget {
            let (id, _) = prioritized[(i as usize) % recipients];
            match placements.iter_mut().find(|(t, _)| *t == id) {
                Some((_, count)) => *count += 1,
                None => placements.push((id, 1)),
            }
        }
        placements
    }

    /// Enumerate, score, and filter attack options, then pick one of
    /// the top N at random. Returns `None` when no candidate survives
    /// the win-probability threshold; an AI turn with no viable attack
    /// simply ends its battle phase.
    pub fn select_attack<R: Rng>(
        &self,
        map: &MapState,
        leader_states: &LeaderStates,
        invulnerable: &[TerritoryId],
        rng: &mut R,
    ) -> Option<AttackCandidate> {
        let mut candidates = self.enumerate_attacks(map, leader_states, invulnerable);
        if candidates.is_empty() {
            return None;
        }
        candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
        candidates.truncate(self.profile.top_n_attack_choices.max(1));
        let pick = rng.gen_range(0..candidates.len());
        Some(candidates[pick])
    }

    /// All valid attacks that clear the profile's probability floor.
    pub fn enumerate_attacks(
        &self,
        map: &MapState,
        leader_states: &LeaderStates,
        invulnerable: &[TerritoryId],
    ) -> Vec<AttackCandidate> {
        let mut candidates = Vec::new();
        for from in map.owned_territories(self.faction) {
            let troops = map.troops_in(from);
            if troops < 2 {
                continue;
            }
            for &to in territories::get(from).adjacency {
                let owner = map.owner(to);
                if owner == self.faction || invulnerable.contains(&to) {
                    continue;
                }
                let win_probability = self.win_probability(from, to, map);
                if win_probability < self.profile.min_attack_probability {
                    continue;
                }
                let score = self.attack_score(from, to, map, leader_states, win_probability);
                candidates.push(AttackCandidate { from, to, score, win_probability });
            }
        }
        candidates
    }

    /// After battles, shift troops from rear territories (no enemy
    /// neighbor) toward the nearest border, one plan per allotted
    /// maneuver.
    pub fn plan_maneuvers(&self, map: &MapState, allotment: u32) -> Vec<ManeuverPlan> {
        let mut plans = Vec::new();
        let mut working = map.clone();

        for _ in 0..allotment {
            let Some(plan) = self.best_rear_shift(&working) else {
                break;
            };
            // Track the move so later plans see updated counts.
            working = working
                .reduce(&crate::store::MapCommand::RemoveTroops {
                    territory: plan.from,
                    count: plan.troops,
                })
                .reduce(&crate::store::MapCommand::AddTroops {
                    territory: plan.to,
                    count: plan.troops,
                });
            plans.push(plan);
        }
        plans
    }

    /// Estimated probability that an attack from `from` to `to`
    /// succeeds. Monotonic in the troop ratio, with diminishing
    /// returns past 3:1 and a penalty against fortifications.
    pub fn win_probability(&self, from: TerritoryId, to: TerritoryId, map: &MapState) -> f64 {
        let attackers = map.troops_in(from).saturating_sub(1);
        if attackers == 0 {
            return 0.0;
        }
        let defenders = map.troops_in(to).max(1);
        let ratio = (attackers as f64 / defenders as f64).min(RATIO_CAP);
        let mut p = (ratio * ratio) / (ratio * ratio + 1.0);
        if territories::get(to).has_fort {
            p *= 1.0 - self.profile.attack_fort_penalty / 10.0;
        }
        p.min(WIN_PROBABILITY_CAP)
    }

    fn attack_score(
        &self,
        from: TerritoryId,
        to: TerritoryId,
        map: &MapState,
        leader_states: &LeaderStates,
        win_probability: f64,
    ) -> f64 {
        let target = territories::get(to);
        let attackers = map.troops_in(from).saturating_sub(1) as f64;
        let defenders = map.troops_in(to) as f64;

        let mut score = (attackers - defenders) * 3.0;
        score += target.points as f64 * 2.0;
        score += win_probability * self.profile.attack_probability_weight;
        if target.has_fort {
            score -= self.profile.attack_fort_penalty;
        }
        let leader = leaders::combat_bonus(
            self.faction,
            territories::get(from),
            true,
            leader_states,
        );
        score += leader as f64 * 2.0;
        score += self.theater_preference(target.theater);
        score
    }

    /// Faction doctrine: each side leans toward its historical theater.
    fn theater_preference(&self, theater: Theater) -> f64 {
        match (self.faction, theater) {
            (Faction::British, Theater::Chesapeake | Theater::Maritime) => 2.0,
            (Faction::Native, Theater::GreatLakes) => 2.0,
            (Faction::Us, Theater::GreatLakes) => 3.0,
            _ => 0.0,
        }
    }

    fn reinforce_priority(&self, id: TerritoryId, map: &MapState) -> f64 {
        let terr = territories::get(id);
        let troops = map.troops_in(id);

        let threat: u32 = terr
            .adjacency
            .iter()
            .filter(|&&n| self.is_enemy(map.owner(n)))
            .map(|&n| map.troops_in(n))
            .sum();
        let enemy_neighbors = terr
            .adjacency
            .iter()
            .filter(|&&n| self.is_enemy(map.owner(n)))
            .count();

        let mut score = terr.points as f64 * 2.0;
        score += enemy_neighbors as f64 * 3.0;
        // Worst troops-to-threat ratio rises to the top.
        score += threat as f64 / (troops as f64 + 1.0);
        if troops <= 2 {
            score += 4.0;
        }
        if terr.has_fort {
            score += 2.0;
        }
        score
    }

    fn is_enemy(&self, owner: Faction) -> bool {
        owner != self.faction && owner != Faction::Neutral
    }

    fn is_border(&self, id: TerritoryId, map: &MapState) -> bool {
        territories::get(id)
            .adjacency
            .iter()
            .any(|&n| self.is_enemy(map.owner(n)))
    }

    /// Largest rear stack and its nearest border territory, reached by
    /// BFS across this faction's own holdings.
    fn best_rear_shift(&self, map: &MapState) -> Option<ManeuverPlan> {
        let owned = map.owned_territories(self.faction);
        let rear: Vec<TerritoryId> = owned
            .iter()
            .copied()
            .filter(|&id| !self.is_border(id, map) && map.troops_in(id) >= 2)
            .collect();

        rear.iter()
            .copied()
            .max_by_key(|&id| map.troops_in(id))
            .and_then(|from| {
                self.nearest_border(from, map).map(|to| ManeuverPlan {
                    from,
                    to,
                    troops: map
                        .troops_in(from)
                        .saturating_sub(1)
                        .min(self.profile.max_troops_to_move),
                })
            })
            .filter(|plan| plan.troops > 0)
    }

    fn nearest_border(&self, start: TerritoryId, map: &MapState) -> Option<TerritoryId> {
        let mut visited: BTreeSet<TerritoryId> = BTreeSet::new();
        let mut queue: VecDeque<TerritoryId> = VecDeque::new();
        visited.insert(start);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            for &next in territories::get(current).adjacency {
                if map.owner(next) != self.faction || !visited.insert(next) {
                    continue;
                }
                if self.is_border(next, map) {
                    // First hop of the BFS path: maneuvers only move
                    // between adjacent owned territories, so the plan
                    // targets the neighbor of `start` on this path.
                    return Some(self.first_step_toward(start, next, map));
                }
                queue.push_back(next);
            }
        }
        None
    }

    /// Adjacent owned territory of `start` that lies on a shortest
    /// path toward `goal`.
    fn first_step_toward(&self, start: TerritoryId, goal: TerritoryId, map: &MapState) -> TerritoryId {
        if territories::are_adjacent(start, goal) {
            return goal;
        }
        // BFS from the goal backwards; the neighbor of `start` with
        // the smallest distance to the goal is the first step.
        let mut dist: std::collections::BTreeMap<TerritoryId, u32> = std::collections::BTreeMap::new();
        dist.insert(goal, 0);
        let mut queue = VecDeque::from([goal]);
        while let Some(current) = queue.pop_front() {
            let d = dist[&current];
            for &next in territories::get(current).adjacency {
                if map.owner(next) == self.faction && !dist.contains_key(&next) {
                    dist.insert(next, d + 1);
                    queue.push_back(next);
                }
            }
        }
        territories::get(start)
            .adjacency
            .iter()
            .copied()
            .filter(|n| map.owner(*n) == self.faction)
            .min_by_key(|n| dist.get(n).copied().unwrap_or(u32::MAX))
            .unwrap_or(goal)
    }
}
