//! Demo arena and session bootstrap for the binary.
//!
//! Library consumers (and the tests) wire their own sessions; this plugin
//! exists so `cargo run` lands in a playable single-participant match over
//! the loopback transport.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::core::GameState;
use crate::match_flow::SpawnPoint;
use crate::net::{LoopbackTransport, NetLink, Participant, ParticipantId, Session};

/// Arena plugin - scene geometry plus a local loopback session.
pub struct ArenaPlugin;

impl Plugin for ArenaPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (setup_arena, open_session));
    }
}

/// Build the arena: floor, a few cover blocks, light, spawn points.
fn setup_arena(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let floor_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.35, 0.35, 0.38),
        ..default()
    });
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(40.0, 0.5, 40.0))),
        MeshMaterial3d(floor_material),
        Transform::from_xyz(0.0, -0.25, 0.0),
        RigidBody::Fixed,
        Collider::cuboid(20.0, 0.25, 20.0),
    ));

    let block_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.5, 0.42, 0.3),
        ..default()
    });
    let block_mesh = meshes.add(Cuboid::new(2.0, 2.0, 2.0));
    for position in [
        Vec3::new(6.0, 1.0, 4.0),
        Vec3::new(-5.0, 1.0, -6.0),
        Vec3::new(2.0, 1.0, -8.0),
    ] {
        commands.spawn((
            Mesh3d(block_mesh.clone()),
            MeshMaterial3d(block_material.clone()),
            Transform::from_translation(position),
            RigidBody::Fixed,
            Collider::cuboid(1.0, 1.0, 1.0),
        ));
    }

    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(10.0, 20.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    for position in [
        Vec3::new(-8.0, 1.0, -8.0),
        Vec3::new(8.0, 1.0, -8.0),
        Vec3::new(-8.0, 1.0, 8.0),
        Vec3::new(8.0, 1.0, 8.0),
    ] {
        commands.spawn((SpawnPoint, Transform::from_translation(position)));
    }
}

/// Open a single-participant loopback session and enter the match.
fn open_session(mut commands: Commands, mut next_state: ResMut<NextState<GameState>>) {
    let id = ParticipantId(rand::random());
    let nickname = format!("player-{:04}", id.0 % 10_000);
    info!("opening loopback session as {nickname}");

    commands.insert_resource(Session::new(
        id,
        vec![Participant { id, nickname }],
    ));
    commands.insert_resource(NetLink::new(LoopbackTransport::detached()));
    next_state.set(GameState::InMatch);
}
