pub mod opponent;

pub use opponent::{AiOpponent, AttackCandidate, ManeuverPlan};
