//! Damage protocol: forwarding requests to the owner and applying them
//! there.
//!
//! Only the owning process mutates health, so "take damage" from anywhere
//! else is a fire-and-forget directive addressed to that process. Health
//! itself never replicates; remote processes only observe the death and
//! kill-credit effects.

use std::collections::HashSet;

use bevy::prelude::*;

use super::components::{Dead, Health, Player};
use crate::core::DeathEvent;
use crate::net::{Authority, Directive, DirectiveReceived, ParticipantId, Replicated, Session};

/// Request damage on an entity owned by `owner`.
///
/// Safe to call on any process: it forwards and mutates nothing locally.
/// The caller's identity travels in the envelope, not the payload, which is
/// what the kill-credit path later trusts.
pub fn request_damage(session: &mut Session, owner: ParticipantId, amount: f32) {
    session.send_to(owner, Directive::TakeDamage { amount });
}

/// Apply damage directives to the entity this process owns.
///
/// Health is decremented without a floor, so overkill leaves a negative
/// value that persists until respawn. Death fires exactly once: the `Dead`
/// marker covers later frames and the local set covers multiple lethal
/// directives arriving in the same tick. The kill is credited to the
/// envelope sender of the directive that crossed the threshold.
pub fn apply_damage_directives(
    mut commands: Commands,
    mut received: EventReader<DirectiveReceived>,
    mut session: ResMut<Session>,
    mut players: Query<
        (Entity, &Replicated, &Authority, &mut Health, Option<&Dead>),
        With<Player>,
    >,
    mut deaths: EventWriter<DeathEvent>,
) {
    let mut died_this_tick: HashSet<Entity> = HashSet::new();

    for event in received.read() {
        let Directive::TakeDamage { amount } = &event.directive else {
            continue;
        };
        let amount = *amount;

        for (entity, replicated, authority, mut health, dead) in players.iter_mut() {
            if *authority != Authority::Authoritative || !session.is_local(replicated.owner) {
                continue;
            }

            health.apply_damage(amount);

            let already_dead = dead.is_some() || died_this_tick.contains(&entity);
            if health.is_dead() && !already_dead {
                died_this_tick.insert(entity);
                commands.entity(entity).insert(Dead);
                deaths.send(DeathEvent {
                    entity,
                    killed_by: Some(event.from),
                });
                session.send_to(event.from, Directive::KillCredit);
            }
        }
    }
}
