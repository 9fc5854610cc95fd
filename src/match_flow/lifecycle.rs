//! Spawn, death, kill credit, and respawn handling.
//!
//! The controller announces deaths; everything that follows - tallies,
//! replicated score properties, the respawn cycle - lives here.

use bevy::prelude::*;
use rand::seq::SliceRandom;

use super::roster::MatchRoster;
use crate::core::{DeathEvent, RespawnEvent};
use crate::items::Loadout;
use crate::net::{
    publish_property, Authority, Directive, DirectiveReceived, PropertyKey, PropertyValue,
    Replicated, Session,
};
use crate::player::{spawn_player, Dead, Health, MovementState, Player};

/// Seconds between death and return to play.
const RESPAWN_DELAY_SECS: f32 = 3.0;

/// Marks a world position players may (re)spawn at.
#[derive(Component)]
pub struct SpawnPoint;

/// Countdown attached to a dead entity.
#[derive(Component)]
pub struct RespawnTimer(pub Timer);

impl RespawnTimer {
    fn new() -> Self {
        Self(Timer::from_seconds(RESPAWN_DELAY_SECS, TimerMode::Once))
    }
}

/// Spawn one player entity per session participant when the match starts.
///
/// The local participant gets the authoritative entity; everyone else is
/// spawned as a replica.
pub fn spawn_match_players(
    mut commands: Commands,
    session: Res<Session>,
    loadout: Res<Loadout>,
    mut roster: ResMut<MatchRoster>,
    spawn_points: Query<&Transform, With<SpawnPoint>>,
) {
    let points: Vec<Vec3> = spawn_points.iter().map(|t| t.translation).collect();
    let mut rng = rand::thread_rng();

    for participant in session.participants().to_vec() {
        let authority = if session.is_local(participant.id) {
            Authority::Authoritative
        } else {
            Authority::Replica
        };
        let position = points
            .choose(&mut rng)
            .copied()
            .unwrap_or(Vec3::new(0.0, 1.0, 0.0));
        let entity = spawn_player(&mut commands, participant.id, authority, position, &loadout.0);
        roster.register(participant.id, entity);
        info!(
            "spawned {:?} for {} ({:?})",
            entity, participant.nickname, authority
        );
    }
}

/// Fold death events into the roster and start the respawn countdown.
///
/// The local participant publishes its death tally through the property
/// store; tallies for remote participants arrive the same way from their
/// own processes.
pub fn handle_deaths(
    mut commands: Commands,
    mut deaths: EventReader<DeathEvent>,
    mut session: ResMut<Session>,
    mut roster: ResMut<MatchRoster>,
    owners: Query<&Replicated, With<Player>>,
) {
    for event in deaths.read() {
        let Ok(replicated) = owners.get(event.entity) else {
            continue;
        };
        let Some(tally) = roster.record_death(replicated.owner) else {
            continue;
        };
        info!(
            "{:?} died (by {:?}), deaths now {tally}",
            replicated.owner, event.killed_by
        );
        commands.entity(event.entity).insert(RespawnTimer::new());
        if session.is_local(replicated.owner) {
            publish_property(
                &mut session,
                PropertyKey::Deaths,
                PropertyValue::Int(i64::from(tally)),
            );
        }
    }
}

/// Count kill-credit directives addressed to this process.
///
/// The victim's owner sends these to the participant that dealt the lethal
/// damage, so receiving one always credits the local participant.
pub fn apply_kill_credits(
    mut received: EventReader<DirectiveReceived>,
    mut session: ResMut<Session>,
    mut roster: ResMut<MatchRoster>,
) {
    for event in received.read() {
        if event.directive != Directive::KillCredit {
            continue;
        }
        let local = session.local_id();
        let tally = roster.record_kill(local);
        info!("kill confirmed, tally now {tally}");
        publish_property(
            &mut session,
            PropertyKey::Kills,
            PropertyValue::Int(i64::from(tally)),
        );
    }
}

/// Return dead entities to play once their countdown ends: full health,
/// zeroed velocity, and a fresh spawn point.
pub fn respawn_players(
    mut commands: Commands,
    time: Res<Time>,
    mut roster: ResMut<MatchRoster>,
    mut respawns: EventWriter<RespawnEvent>,
    spawn_points: Query<&Transform, With<SpawnPoint>>,
    mut dead_players: Query<
        (
            Entity,
            &Replicated,
            &mut RespawnTimer,
            &mut Health,
            &mut MovementState,
            &mut Transform,
        ),
        (With<Dead>, Without<SpawnPoint>),
    >,
) {
    let points: Vec<Vec3> = spawn_points.iter().map(|t| t.translation).collect();
    let mut rng = rand::thread_rng();

    for (entity, replicated, mut timer, mut health, mut state, mut transform) in
        dead_players.iter_mut()
    {
        if !timer.0.tick(time.delta()).just_finished() {
            continue;
        }
        health.reset();
        state.velocity = Vec3::ZERO;
        if let Some(point) = points.choose(&mut rng) {
            transform.translation = *point;
        }
        commands.entity(entity).remove::<(Dead, RespawnTimer)>();
        roster.record_respawn(replicated.owner);
        respawns.send(RespawnEvent { entity });
    }
}
