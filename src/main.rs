//! Arena FPS - Entry Point
//!
//! Launches the demo arena with a single-participant loopback session.
//!
//! Controls:
//! - WASD: Move
//! - Mouse: Look around
//! - Shift: Sprint
//! - Space: Jump
//! - Left click: Fire
//! - 1-9 / scroll wheel: Switch items

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Arena FPS".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))

        // Physics
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())

        // Game plugin
        .add_plugins(arena_fps::ArenaFpsPlugin)

        // Demo scene and loopback session
        .add_plugins(arena_fps::arena::ArenaPlugin)

        .run();
}
