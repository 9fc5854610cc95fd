//! Match-flow module - the lifecycle coordinator: spawns, deaths, kill
//! credit, and respawns.

mod lifecycle;
mod plugin;
mod roster;

pub use lifecycle::{RespawnTimer, SpawnPoint};
pub use plugin::MatchFlowPlugin;
pub use roster::{MatchRoster, PlayerRecord};
