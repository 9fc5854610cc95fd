//! Nameplates over remote players.
//!
//! Purely passive: each plate reads the owning participant's replicated
//! nickname once and then follows its entity on screen. The local entity
//! never gets one, matching the first-person view.

use bevy::prelude::*;

use crate::core::GameState;
use crate::net::{Authority, Replicated, Session};
use crate::player::{Player, PlayerCamera};

/// Height above the entity origin the plate hovers at.
const NAMEPLATE_OFFSET: Vec3 = Vec3::new(0.0, 1.1, 0.0);

/// Screen-space label tracking one replica entity.
#[derive(Component)]
pub struct Nameplate {
    pub target: Entity,
}

/// Setup nameplate systems.
pub fn setup_nameplate_systems(app: &mut App) {
    app.add_systems(
        Update,
        (spawn_nameplates, position_nameplates, despawn_stale_nameplates)
            .run_if(in_state(GameState::InMatch))
            .run_if(resource_exists::<Session>),
    );
}

/// Give every newly spawned replica a plate with its owner's nickname.
fn spawn_nameplates(
    mut commands: Commands,
    session: Res<Session>,
    new_players: Query<(Entity, &Replicated, &Authority), (With<Player>, Added<Replicated>)>,
) {
    for (entity, replicated, authority) in new_players.iter() {
        if *authority != Authority::Replica {
            continue;
        }
        let Some(nickname) = session.nickname(replicated.owner) else {
            debug!("no nickname for {:?}, skipping plate", replicated.owner);
            continue;
        };
        commands.spawn((
            Nameplate { target: entity },
            Text::new(nickname),
            TextFont {
                font_size: 14.0,
                ..default()
            },
            TextColor(Color::srgb(0.9, 0.9, 0.9)),
            Node {
                position_type: PositionType::Absolute,
                ..default()
            },
        ));
    }
}

/// Project each tracked entity's head position to the viewport.
fn position_nameplates(
    camera_query: Query<(&Camera, &GlobalTransform), With<PlayerCamera>>,
    targets: Query<&GlobalTransform, (With<Player>, Without<PlayerCamera>)>,
    mut plates: Query<(&Nameplate, &mut Node, &mut Visibility)>,
) {
    let Ok((camera, camera_transform)) = camera_query.get_single() else {
        return;
    };

    for (plate, mut node, mut visibility) in plates.iter_mut() {
        let Ok(target) = targets.get(plate.target) else {
            continue;
        };
        let world_pos = target.translation() + NAMEPLATE_OFFSET;
        match camera.world_to_viewport(camera_transform, world_pos) {
            Ok(screen) => {
                node.left = Val::Px(screen.x);
                node.top = Val::Px(screen.y);
                *visibility = Visibility::Inherited;
            }
            // Behind the camera or otherwise unprojectable.
            Err(_) => *visibility = Visibility::Hidden,
        }
    }
}

/// Drop plates whose entity is gone.
fn despawn_stale_nameplates(
    mut commands: Commands,
    plates: Query<(Entity, &Nameplate)>,
    targets: Query<(), With<Player>>,
) {
    for (entity, plate) in plates.iter() {
        if targets.get(plate.target).is_err() {
            commands.entity(entity).despawn_recursive();
        }
    }
}
