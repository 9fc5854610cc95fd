//! Global events used for cross-system communication.
//!
//! Events keep systems decoupled: the damage applier announces a death, and
//! the lifecycle coordinator reacts to it without either knowing about the
//! other's internals.

use bevy::prelude::*;

use crate::net::ParticipantId;

/// Sent when an entity dies (health reached zero, or it fell out of the
/// world). Fired exactly once per death; the `Dead` marker makes repeats
/// no-ops at the source.
#[derive(Event, Debug, Clone)]
pub struct DeathEvent {
    /// Entity that died.
    pub entity: Entity,
    /// Participant whose directive caused the death, if any. Resolved from
    /// the damage envelope's sender, never from payload data.
    pub killed_by: Option<ParticipantId>,
}

/// Sent when a previously dead entity returns to play.
#[derive(Event, Debug, Clone)]
pub struct RespawnEvent {
    pub entity: Entity,
}
