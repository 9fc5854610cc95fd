//! Player plugin - controller systems and their ordering.

use bevy::prelude::*;

use super::config::{load_player_config, PlayerConfig};
use super::{damage, equip, ground_sensor, movement};
use crate::core::GameState;
use crate::net::Session;

/// System set ordering for the controller.
///
/// Sensing feeds input handling, damage resolves before the hazard check,
/// and the hazard check must run before movement integration so an entity
/// that fell below the world floor dies before it moves again that frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum PlayerSet {
    Sense,
    Input,
    Damage,
    Hazard,
    Move,
}

/// Player plugin - movement, look, ground sensing, equip, and damage.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerConfig>()
            .add_systems(Startup, load_player_config)
            .configure_sets(
                Update,
                (
                    PlayerSet::Sense,
                    PlayerSet::Input,
                    PlayerSet::Damage,
                    PlayerSet::Hazard,
                    PlayerSet::Move,
                )
                    .chain()
                    .run_if(in_state(GameState::InMatch)),
            )
            .add_systems(OnEnter(GameState::InMatch), movement::grab_cursor)
            .add_systems(OnExit(GameState::InMatch), movement::release_cursor)
            .add_systems(
                Update,
                ground_sensor::update_ground_contacts.in_set(PlayerSet::Sense),
            )
            .add_systems(
                Update,
                (
                    movement::mouse_look,
                    (
                        equip::equip_first_slot,
                        equip::equip_input,
                        equip::apply_equip_updates,
                    )
                        .chain()
                        .run_if(resource_exists::<Session>),
                )
                    .in_set(PlayerSet::Input),
            )
            .add_systems(
                Update,
                damage::apply_damage_directives
                    .in_set(PlayerSet::Damage)
                    .run_if(resource_exists::<Session>),
            )
            .add_systems(
                Update,
                movement::check_world_floor.in_set(PlayerSet::Hazard),
            )
            .add_systems(Update, movement::player_movement.in_set(PlayerSet::Move));
    }
}
