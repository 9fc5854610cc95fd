//! Shared two-process harness: each participant runs its own headless
//! `App`, wired to the other through an in-memory loopback transport, so
//! every assertion crosses the real encode/decode and delivery path.

#![allow(dead_code)]

use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;
use bevy_rapier3d::prelude::CollisionEvent;

use arena_fps::core::{CorePlugin, GameState};
use arena_fps::items::Loadout;
use arena_fps::match_flow::{MatchFlowPlugin, MatchRoster};
use arena_fps::net::{
    LoopbackTransport, NetLink, NetPlugin, Participant, ParticipantId, Session,
};
use arena_fps::player::PlayerPlugin;

pub const ANNA: ParticipantId = ParticipantId(1);
pub const BO: ParticipantId = ParticipantId(2);

fn participants() -> Vec<Participant> {
    vec![
        Participant {
            id: ANNA,
            nickname: "anna".to_string(),
        },
        Participant {
            id: BO,
            nickname: "bo".to_string(),
        },
    ]
}

/// Build one headless participant process.
///
/// Window, render, and physics plugins are absent, so the input event
/// streams and resources they normally register are supplied by hand.
pub fn session_app(local: ParticipantId, transport: LoopbackTransport) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(bevy::state::app::StatesPlugin)
        .add_plugins((CorePlugin, NetPlugin, PlayerPlugin, MatchFlowPlugin))
        .add_event::<CollisionEvent>()
        .add_event::<MouseMotion>()
        .add_event::<MouseWheel>()
        .init_resource::<ButtonInput<KeyCode>>()
        .init_resource::<ButtonInput<MouseButton>>()
        .init_resource::<Loadout>()
        .insert_resource(Session::new(local, participants()))
        .insert_resource(NetLink::new(transport))
        .insert_state(GameState::InMatch);
    app
}

/// Two participant processes joined by a loopback pair.
pub fn paired_apps() -> (App, App) {
    let (to_bo, to_anna) = LoopbackTransport::pair(64);
    (session_app(ANNA, to_bo), session_app(BO, to_anna))
}

/// Alternate updates until in-flight traffic has settled.
pub fn settle(anna: &mut App, bo: &mut App, rounds: usize) {
    for _ in 0..rounds {
        anna.update();
        bo.update();
    }
}

/// The player entity a process spawned for `owner`.
pub fn player_entity(app: &App, owner: ParticipantId) -> Entity {
    app.world()
        .resource::<MatchRoster>()
        .lookup_by_owner(owner)
        .expect("player entity should be spawned for every participant")
}
