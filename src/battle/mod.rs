pub mod resolver;

pub use resolver::{resolve_battle, BattleResult, BattleStats, Combatant};
