//! Items plugin - item use and impact effects.

use bevy::prelude::*;

use super::components::ImpactAssets;
use super::data::{load_loadout_config, Loadout};
use super::gun;
use crate::core::GameState;
use crate::net::Session;
use crate::player::PlayerSet;

/// System set ordering for item handling: use the equipped item, then
/// materialize whatever impact broadcasts arrived.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ItemSet {
    Use,
    Effects,
}

/// Items plugin - loadout data, firing, and impact decals.
pub struct ItemsPlugin;

impl Plugin for ItemsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Loadout>()
            .add_systems(Startup, load_loadout_config)
            .add_systems(
                Startup,
                gun::init_impact_assets.run_if(resource_exists::<Assets<Mesh>>),
            )
            .configure_sets(
                Update,
                (ItemSet::Use, ItemSet::Effects)
                    .chain()
                    .after(PlayerSet::Input)
                    .run_if(in_state(GameState::InMatch)),
            )
            .add_systems(
                Update,
                gun::use_equipped_item
                    .in_set(ItemSet::Use)
                    .run_if(resource_exists::<Session>),
            )
            .add_systems(
                Update,
                (
                    gun::spawn_impact_effects.run_if(resource_exists::<ImpactAssets>),
                    gun::despawn_impact_effects,
                )
                    .in_set(ItemSet::Effects),
            );
    }
}
