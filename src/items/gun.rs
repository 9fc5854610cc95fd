//! Hit-scan weapon: firing, damage forwarding, and cosmetic impacts.
//!
//! A shot is two independent messages: a unicast damage directive to the
//! victim's owner, and a broadcast impact notification for everyone's
//! renderer. They share no ordering - an impact may arrive before, after,
//! or without its damage directive, and nothing here cares.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::{ImpactAssets, ImpactEffect, Item, ItemSpec};
use crate::net::{Authority, Directive, DirectiveReceived, ParticipantId, Replicated, Session};
use crate::player::{Damageable, Dead, ItemSlots, Player, PlayerCamera};

/// How long an impact decal stays around.
const IMPACT_LIFETIME_SECS: f32 = 3.0;
/// Radius probed for a surviving collider before spawning a decal.
const IMPACT_PROBE_RADIUS: f32 = 0.3;

/// Resolve a connected ray into its two independent messages: the damage
/// directive for the victim's owner (absent when the struck surface is not
/// damageable) and the unconditional cosmetic broadcast.
fn resolve_shot(
    target_owner: Option<ParticipantId>,
    damage: f32,
    point: Vec3,
    normal: Vec3,
) -> (Option<(ParticipantId, Directive)>, Directive) {
    (
        target_owner.map(|owner| (owner, Directive::TakeDamage { amount: damage })),
        Directive::Impact {
            point: point.to_array(),
            normal: normal.to_array(),
        },
    )
}

/// Anchor and world pose for a decal, or `None` when no surface survived
/// near the reported point and the effect is skipped.
fn plan_impact_effect(
    anchor: Option<Entity>,
    point: Vec3,
    normal: Vec3,
) -> Option<(Entity, Transform)> {
    let anchor = anchor?;
    // Offset a hair along the normal to avoid z-fighting with the surface.
    let pose = Transform::from_translation(point + normal * 0.001)
        .with_rotation(Quat::from_rotation_arc(Vec3::Z, normal.normalize_or_zero()));
    Some((anchor, pose))
}

/// Fire the equipped item on a primary-trigger press.
///
/// Only the authoritative entity reads input. The ray starts at the center
/// of the viewer's camera and travels its forward direction; the shooter's
/// own body is excluded from the query.
pub fn use_equipped_item(
    mouse: Res<ButtonInput<MouseButton>>,
    mut session: ResMut<Session>,
    rapier_context: Query<&RapierContext>,
    shooters: Query<(Entity, &Authority, &ItemSlots), (With<Player>, Without<Dead>)>,
    camera_query: Query<&GlobalTransform, With<PlayerCamera>>,
    items: Query<&Item>,
    targets: Query<&Replicated, With<Damageable>>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    let Ok(context) = rapier_context.get_single() else {
        return;
    };
    let Ok(camera_transform) = camera_query.get_single() else {
        return;
    };

    for (shooter, authority, slots) in shooters.iter() {
        if *authority != Authority::Authoritative {
            continue;
        }
        let Some(item) = slots.equipped_entity().and_then(|e| items.get(e).ok()) else {
            continue;
        };
        match item.spec {
            ItemSpec::HitscanGun { damage } => fire_hitscan(
                &mut session,
                context,
                camera_transform,
                shooter,
                damage,
                &targets,
            ),
        }
    }
}

/// Cast a single ray and resolve its consequences.
fn fire_hitscan(
    session: &mut Session,
    context: &RapierContext,
    camera_transform: &GlobalTransform,
    shooter: Entity,
    damage: f32,
    targets: &Query<&Replicated, With<Damageable>>,
) {
    let camera = camera_transform.compute_transform();
    let origin = camera.translation;
    let direction = *camera.forward();

    let filter = QueryFilter::default()
        .exclude_sensors()
        .exclude_rigid_body(shooter);
    let Some((hit_entity, intersection)) =
        context.cast_ray_and_get_normal(origin, direction, f32::MAX, true, filter)
    else {
        return;
    };

    // Capability check: a miss on the query is the typed "not damageable"
    // outcome, and the shot still produces its cosmetic impact.
    let target_owner = targets.get(hit_entity).ok().map(|r| r.owner);
    let (damage_directive, impact) =
        resolve_shot(target_owner, damage, intersection.point, intersection.normal);
    if let Some((owner, directive)) = damage_directive {
        session.send_to(owner, directive);
    }
    session.send_all(impact);
}

/// Materialize impact broadcasts as short-lived decals.
///
/// Each process independently probes for a collider near the reported
/// point; if the surface vanished between the shot and this arriving, the
/// effect is skipped silently - it is purely cosmetic.
pub fn spawn_impact_effects(
    mut commands: Commands,
    mut received: EventReader<DirectiveReceived>,
    assets: Res<ImpactAssets>,
    rapier_context: Query<&RapierContext>,
    transforms: Query<&GlobalTransform>,
) {
    let Ok(context) = rapier_context.get_single() else {
        return;
    };

    for event in received.read() {
        let Directive::Impact { point, normal } = &event.directive else {
            continue;
        };
        let point = Vec3::from_array(*point);
        let normal = Vec3::from_array(*normal);

        let mut anchor = None;
        context.intersections_with_shape(
            point,
            Quat::IDENTITY,
            &Collider::ball(IMPACT_PROBE_RADIUS),
            QueryFilter::default().exclude_sensors(),
            |entity| {
                anchor = Some(entity);
                false
            },
        );
        let Some((anchor, world)) = plan_impact_effect(anchor, point, normal) else {
            debug!("impact surface gone, skipping effect");
            continue;
        };

        let effect = commands
            .spawn((
                ImpactEffect::new(IMPACT_LIFETIME_SECS),
                Mesh3d(assets.mesh.clone()),
                MeshMaterial3d(assets.material.clone()),
                world,
            ))
            .id();

        // Ride along with whatever was hit, keeping the world pose.
        if let Ok(anchor_transform) = transforms.get(anchor) {
            let local = Transform::from_matrix(
                anchor_transform.compute_matrix().inverse() * world.compute_matrix(),
            );
            commands.entity(effect).insert(local).set_parent(anchor);
        }
    }
}

/// Tick decal lifetimes and clean them up.
pub fn despawn_impact_effects(
    mut commands: Commands,
    time: Res<Time>,
    mut effects: Query<(Entity, &mut ImpactEffect)>,
) {
    for (entity, mut effect) in effects.iter_mut() {
        if effect.timer.tick(time.delta()).just_finished() {
            commands.entity(entity).despawn_recursive();
        }
    }
}

/// Create the shared decal handles once the asset stores exist.
pub fn init_impact_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(ImpactAssets {
        mesh: meshes.add(Circle::new(0.06)),
        material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.15, 0.12, 0.1),
            unlit: true,
            ..default()
        }),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damageable_hit_bills_the_owner_and_broadcasts() {
        let owner = ParticipantId(4);
        let (damage, impact) = resolve_shot(Some(owner), 30.0, Vec3::X, Vec3::Y);
        assert_eq!(
            damage,
            Some((owner, Directive::TakeDamage { amount: 30.0 }))
        );
        assert_eq!(
            impact,
            Directive::Impact {
                point: [1.0, 0.0, 0.0],
                normal: [0.0, 1.0, 0.0],
            }
        );
    }

    #[test]
    fn non_damageable_hit_still_broadcasts_the_impact() {
        let (damage, impact) = resolve_shot(None, 30.0, Vec3::new(2.0, 0.5, -1.0), Vec3::Y);
        assert_eq!(damage, None);
        assert_eq!(
            impact,
            Directive::Impact {
                point: [2.0, 0.5, -1.0],
                normal: [0.0, 1.0, 0.0],
            }
        );
    }

    #[test]
    fn effect_is_skipped_when_no_surface_survives() {
        assert_eq!(plan_impact_effect(None, Vec3::ZERO, Vec3::Y), None);
    }

    #[test]
    fn effect_pose_sits_on_the_surface_facing_out() {
        let anchor = Entity::from_raw(9);
        let (entity, pose) =
            plan_impact_effect(Some(anchor), Vec3::new(1.0, 2.0, 3.0), Vec3::Y).unwrap();
        assert_eq!(entity, anchor);
        assert!((pose.translation - Vec3::new(1.0, 2.001, 3.0)).length() < 1e-6);
        // Local +Z points along the surface normal.
        let facing = pose.rotation * Vec3::Z;
        assert!((facing - Vec3::Y).length() < 1e-5);
    }
}
