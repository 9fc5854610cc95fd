//! First-person movement and camera control.
//!
//! The movement rule itself is a pure function over velocity, intent, and
//! tuning; the systems around it only gather input and feed the resulting
//! displacement to the kinematic character controller.

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};
use bevy_rapier3d::prelude::*;

use super::components::*;
use super::config::PlayerConfig;
use crate::core::DeathEvent;
use crate::net::Authority;

/// Marker component for the local player's camera pivot.
#[derive(Component, Default)]
pub struct PlayerCamera {
    /// Current pitch angle in radians (looking up/down).
    pub pitch: f32,
}

/// One frame of movement input.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveIntent {
    /// Two-axis intent: x = strafe right, y = forward.
    pub axis: Vec2,
    /// Discrete jump trigger, honored only while grounded.
    pub jump: bool,
    pub sprint: bool,
}

/// Advance velocity by one frame of input and gravity.
///
/// While grounded, horizontal velocity is recomputed from the intent
/// (magnitude clamped to 1, rotated into the facing direction) and a jump
/// sets the closed-form initial velocity for the configured jump height.
/// While airborne the horizontal component carries over unchanged and the
/// jump trigger is ignored. Gravity integrates every frame, grounded or not.
pub fn movement_step(
    velocity: Vec3,
    intent: &MoveIntent,
    yaw: f32,
    grounded: bool,
    config: &PlayerConfig,
    dt: f32,
) -> Vec3 {
    let mut velocity = velocity;

    if grounded {
        let axis = intent.axis.clamp_length_max(1.0);
        let speed = if intent.sprint {
            config.sprint_speed
        } else {
            config.walk_speed
        };
        let horizontal = Quat::from_rotation_y(yaw) * Vec3::new(axis.x, 0.0, -axis.y) * speed;
        velocity.x = horizontal.x;
        velocity.z = horizontal.z;
        velocity.y = if intent.jump {
            (config.jump_height * -2.0 * config.gravity).sqrt()
        } else {
            0.0
        };
    }

    velocity.y += config.gravity * dt;
    velocity
}

/// Grab and hide the cursor when entering the match.
pub fn grab_cursor(mut window_query: Query<&mut Window, With<PrimaryWindow>>) {
    if let Ok(mut window) = window_query.get_single_mut() {
        window.cursor_options.grab_mode = CursorGrabMode::Locked;
        window.cursor_options.visible = false;
    }
}

/// Release the cursor when leaving the match.
pub fn release_cursor(mut window_query: Query<&mut Window, With<PrimaryWindow>>) {
    if let Ok(mut window) = window_query.get_single_mut() {
        window.cursor_options.grab_mode = CursorGrabMode::None;
        window.cursor_options.visible = true;
    }
}

/// Handle mouse movement for looking around.
///
/// Yaw rotates the player entity itself; pitch only tilts the child camera
/// pivot, clamped to the configured range, so the entity's orientation never
/// carries a vertical component.
pub fn mouse_look(
    mut mouse_motion: EventReader<MouseMotion>,
    config: Res<PlayerConfig>,
    mut player_query: Query<(&mut Transform, &Authority), (With<Player>, Without<PlayerCamera>)>,
    mut camera_query: Query<(&mut Transform, &mut PlayerCamera), Without<Player>>,
) {
    let mut delta = Vec2::ZERO;
    for event in mouse_motion.read() {
        delta += event.delta;
    }
    if delta == Vec2::ZERO {
        return;
    }

    let sensitivity = config.mouse_sensitivity * 0.001;

    for (mut transform, authority) in player_query.iter_mut() {
        if *authority != Authority::Authoritative {
            continue;
        }
        transform.rotate_y(-delta.x * sensitivity);
    }

    if let Ok((mut camera_transform, mut camera)) = camera_query.get_single_mut() {
        camera.pitch -= delta.y * sensitivity;
        camera.pitch = camera.pitch.clamp(-config.pitch_limit, config.pitch_limit);
        camera_transform.rotation = Quat::from_rotation_x(camera.pitch);
    }
}

/// Poll movement input and advance the authoritative entity.
///
/// Replicas take a no-op pass: their transforms come from replication, not
/// local integration. A missing character controller is logged and movement
/// skipped; the entity stays alive and targetable.
pub fn player_movement(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    config: Res<PlayerConfig>,
    mut player_query: Query<
        (
            &Transform,
            &Authority,
            &mut MovementState,
            Option<&mut KinematicCharacterController>,
        ),
        (With<Player>, Without<Dead>),
    >,
) {
    let dt = time.delta_secs();

    for (transform, authority, mut state, controller) in player_query.iter_mut() {
        if *authority != Authority::Authoritative {
            continue;
        }

        let mut axis = Vec2::ZERO;
        if keyboard.pressed(KeyCode::KeyW) {
            axis.y += 1.0;
        }
        if keyboard.pressed(KeyCode::KeyS) {
            axis.y -= 1.0;
        }
        if keyboard.pressed(KeyCode::KeyD) {
            axis.x += 1.0;
        }
        if keyboard.pressed(KeyCode::KeyA) {
            axis.x -= 1.0;
        }

        let intent = MoveIntent {
            axis,
            jump: keyboard.just_pressed(KeyCode::Space),
            sprint: keyboard.pressed(KeyCode::ShiftLeft),
        };

        let yaw = transform.rotation.to_euler(EulerRot::YXZ).0;
        let grounded = state.grounded;
        state.velocity = movement_step(state.velocity, &intent, yaw, grounded, &config, dt);

        let Some(mut controller) = controller else {
            warn_once!("character controller missing, movement disabled for this entity");
            continue;
        };
        controller.translation = Some(state.velocity * dt);
    }
}

/// Fall-through-world safeguard: the local viewer's own entity dies
/// unconditionally below the world floor.
///
/// Ordered before movement integration so a frame that starts below the
/// floor never advances the entity further.
pub fn check_world_floor(
    mut commands: Commands,
    config: Res<PlayerConfig>,
    player_query: Query<
        (Entity, &Transform, &Authority),
        (With<Player>, With<Health>, Without<Dead>),
    >,
    mut deaths: EventWriter<DeathEvent>,
) {
    for (entity, transform, authority) in player_query.iter() {
        if *authority != Authority::Authoritative {
            continue;
        }
        if transform.translation.y < config.world_floor_y {
            commands.entity(entity).insert(Dead);
            deaths.send(DeathEvent {
                entity,
                killed_by: None,
            });
        }
    }
}
