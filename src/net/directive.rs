//! The directive vocabulary: every fire-and-forget message kind that
//! crosses a process boundary.
//!
//! Directives carry plain arrays instead of engine math types so the wire
//! format stays independent of the renderer's type choices.

use serde::{Deserialize, Serialize};

use super::properties::{PropertyKey, PropertyValue};

/// An asynchronous cross-process message.
///
/// Unicast directives (`TakeDamage`, `KillCredit`) are addressed to the one
/// process allowed to act on them; broadcasts (`Impact`, `SetProperty`) go
/// to everyone. No acknowledgment, retry, or cancellation exists at this
/// layer - delivery reliability is the transport's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Directive {
    /// Subtract `amount` from the target entity's health. Sent to the
    /// entity's owning participant only; nobody else may mutate health.
    TakeDamage { amount: f32 },
    /// Award one kill to the receiving participant. Sent by a victim's
    /// owner to the shooter identified by the damage envelope's sender.
    KillCredit,
    /// Cosmetic hit notification: world-space point and surface normal.
    /// Broadcast to all, deliberately decoupled from `TakeDamage` so the
    /// two tolerate independent delivery and ordering.
    Impact { point: [f32; 3], normal: [f32; 3] },
    /// Replicated property write. Broadcast by the owning participant;
    /// the sender of the envelope is the owner of the key.
    SetProperty { key: PropertyKey, value: PropertyValue },
}
