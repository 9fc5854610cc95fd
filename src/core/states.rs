//! Game state definitions that control the overall flow of a match.
//!
//! States determine which systems run at any given time. Movement, combat,
//! and replication only run while `InMatch`.

use bevy::prelude::*;

/// Top-level flow for one process.
///
/// - Start in `Connecting` while session membership is established
/// - Move to `InMatch` once a session exists and entities are spawned
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Waiting for the session layer to report membership.
    #[default]
    Connecting,
    /// Active play: simulation, input, and replication all running.
    InMatch,
}
