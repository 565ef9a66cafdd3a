//! AI difficulty profiles
//!
//! A profile tunes reinforcement generosity and AI aggressiveness.
//! `medium` is the baseline; `easy` and `hard` override it. Custom
//! profiles can be loaded from TOML files; any omitted field keeps its
//! baseline value.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::Difficulty;

/// Complete AI tuning profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiProfile {
    /// Name of this profile (set from the difficulty or file stem).
    pub name: String,
    /// Flat reinforcements before the per-territory bonus.
    pub base_reinforcements: u32,
    /// Attacks an AI faction may execute per battle phase.
    pub max_attacks_per_turn: u32,
    /// Candidates below this estimated win probability are discarded.
    pub min_attack_probability: f64,
    /// 0.0 spreads reinforcements evenly; 1.0 funnels them into the
    /// single most threatened territory.
    pub concentration_ratio: f64,
    /// Only the N best-scoring attack candidates are considered.
    pub top_n_attack_choices: usize,
    /// Weight of the win-probability term in candidate scoring.
    pub attack_probability_weight: f64,
    /// Score penalty for attacking a fortified territory.
    pub attack_fort_penalty: f64,
    /// Troops moved by a single maneuver, at most.
    pub max_troops_to_move: u32,
    /// Maneuvers allowed per maneuver phase.
    pub max_maneuvers: u32,
}

impl Default for AiProfile {
    fn default() -> Self {
        Self {
            name: "medium".to_string(),
            base_reinforcements: 3,
            max_attacks_per_turn: 3,
            min_attack_probability: 0.35,
            concentration_ratio: 0.4,
            top_n_attack_choices: 3,
            attack_probability_weight: 4.0,
            attack_fort_penalty: 3.0,
            max_troops_to_move: 3,
            max_maneuvers: 2,
        }
    }
}

impl AiProfile {
    /// Built-in profile for a named difficulty.
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                name: "easy".to_string(),
                base_reinforcements: 2,
                max_attacks_per_turn: 2,
                min_attack_probability: 0.55,
                concentration_ratio: 0.2,
                top_n_attack_choices: 5,
                attack_probability_weight: 8.0,
                attack_fort_penalty: 5.0,
                max_troops_to_move: 1,
                max_maneuvers: 1,
            },
            Difficulty::Medium => Self::default(),
            Difficulty::Hard => Self {
                name: "hard".to_string(),
                base_reinforcements: 6,
                max_attacks_per_turn: 7,
                min_attack_probability: 0.15,
                concentration_ratio: 0.6,
                top_n_attack_choices: 1,
                attack_probability_weight: 2.0,
                attack_fort_penalty: 1.0,
                max_troops_to_move: 5,
                max_maneuvers: 5,
            },
        }
    }

    /// Load a profile from a TOML file. Omitted fields keep the
    /// baseline values; the profile name comes from the file stem.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let mut profile: AiProfile = toml::from_str(&contents)?;
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            profile.name = stem.to_string();
        }
        Ok(profile)
    }
}
