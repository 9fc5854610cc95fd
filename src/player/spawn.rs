//! Player entity construction.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::*;
use super::equip::ItemSlots;
use super::ground_sensor::{sensor_collider, GroundSensor};
use super::movement::PlayerCamera;
use crate::items::{Item, ItemDef};
use crate::net::{Authority, ParticipantId, Replicated};

/// Spawn one player entity with its sensor, item slots, and (for the
/// authoritative entity) camera and character controller.
///
/// Replicas get the same body and colliders so they can be hit and walked
/// into, but no input surface: no camera and no character controller, since
/// their transform is overwritten by replication rather than simulated.
pub fn spawn_player(
    commands: &mut Commands,
    owner: ParticipantId,
    authority: Authority,
    position: Vec3,
    loadout: &[ItemDef],
) -> Entity {
    let mut body = commands.spawn((
        Player,
        Damageable,
        Replicated { owner },
        authority,
        Health::new(MAX_HEALTH),
        MovementState::default(),
        Transform::from_translation(position),
        Visibility::default(),
        RigidBody::KinematicPositionBased,
        Collider::capsule_y(0.5, 0.3),
    ));
    if authority == Authority::Authoritative {
        body.insert(KinematicCharacterController {
            offset: CharacterLength::Absolute(0.01),
            snap_to_ground: Some(CharacterLength::Absolute(0.3)),
            ..default()
        });
    }
    let body = body.id();

    // Ground sensor hangs just below the capsule bottom.
    let sensor = commands
        .spawn((
            GroundSensor::new(body),
            sensor_collider(),
            Transform::from_xyz(0.0, -0.85, 0.0),
        ))
        .id();
    commands.entity(body).add_child(sensor);

    // Item slots start hidden; the equip systems activate exactly one.
    let mut slots = Vec::with_capacity(loadout.len());
    for def in loadout {
        let slot = commands
            .spawn((
                Item::from_def(def),
                Transform::from_xyz(0.35, 0.45, -0.6),
                Visibility::Hidden,
            ))
            .id();
        commands.entity(body).add_child(slot);
        slots.push(slot);
    }
    commands.entity(body).insert(ItemSlots::new(slots));

    if authority == Authority::Authoritative {
        let camera = commands
            .spawn((
                PlayerCamera::default(),
                Camera3d::default(),
                Transform::from_xyz(0.0, 0.6, 0.0),
            ))
            .id();
        commands.entity(body).add_child(camera);
    }

    body
}
