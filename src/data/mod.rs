pub mod leaders;
pub mod territories;

pub use leaders::{Leader, LeaderAbility};
pub use territories::Territory;
