//! Rise of the Nation - War of 1812 territorial conquest engine
//!
//! The engine is the authoritative state machine for a three-faction,
//! twelve-round conquest game: composed domain stores (pure reducers),
//! a fixed turn/phase cycle, dice-based combat resolution, the
//! reinforcement/maneuver economy, and a heuristic AI opponent.
//! Rendering, audio, and quiz/event content live outside this crate and
//! talk to the engine through typed commands.

pub mod ai;
pub mod battle;
pub mod core;
pub mod data;
pub mod economy;
pub mod session;
pub mod store;
