//! Match-flow plugin - lifecycle coordination systems.

use bevy::prelude::*;

use super::lifecycle;
use super::roster::MatchRoster;
use crate::core::GameState;
use crate::items::Loadout;
use crate::net::Session;
use crate::player::PlayerSet;

/// Match-flow plugin - spawn, death bookkeeping, kill credit, respawn.
pub struct MatchFlowPlugin;

impl Plugin for MatchFlowPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MatchRoster>()
            .add_systems(
                OnEnter(GameState::InMatch),
                lifecycle::spawn_match_players
                    .run_if(resource_exists::<Session>.and(resource_exists::<Loadout>)),
            )
            .add_systems(
                Update,
                (
                    lifecycle::handle_deaths,
                    lifecycle::apply_kill_credits,
                    lifecycle::respawn_players,
                )
                    .chain()
                    .after(PlayerSet::Hazard)
                    .run_if(in_state(GameState::InMatch))
                    .run_if(resource_exists::<Session>),
            );
    }
}
