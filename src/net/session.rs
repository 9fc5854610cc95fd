//! Session state: participants, entity authority, and the directive outbox.
//!
//! The session layer is the boundary to the room/membership collaborator.
//! It knows who is in the match, which participant this process is, and
//! queues outgoing directives. It never waits for delivery - every send is
//! fire-and-forget, and the transport drains the outbox on its own schedule.

use std::collections::VecDeque;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::directive::Directive;

/// Stable identity of a participant in the match.
///
/// Used to target directives and to key the replicated property store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticipantId(pub u64);

/// A participant known to the session (local or remote).
#[derive(Debug, Clone)]
pub struct Participant {
    pub id: ParticipantId,
    pub nickname: String,
}

/// Which process simulates an entity.
///
/// Set once at spawn and never transferred. Exactly one process holds
/// `Authoritative` for a given entity; everyone else holds `Replica` and
/// derives state purely from received messages and property updates.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authority {
    Authoritative,
    Replica,
}

/// The participant that owns an entity's replicated state.
#[derive(Component, Debug, Clone, Copy)]
pub struct Replicated {
    pub owner: ParticipantId,
}

/// How an envelope is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Delivery {
    /// Unicast to a single participant's process.
    To(ParticipantId),
    /// Broadcast to every process, including the sender's.
    All,
}

/// A directive stamped with its sender and delivery target.
///
/// `from` is written by the session, never by callers - receiver-side logic
/// that resolves identity (kill credit in particular) trusts this field and
/// nothing in the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub from: ParticipantId,
    pub delivery: Delivery,
    pub directive: Directive,
}

/// Fired when a directive addressed to this process arrives.
#[derive(Event, Debug, Clone)]
pub struct DirectiveReceived {
    pub from: ParticipantId,
    pub directive: Directive,
}

/// Per-process session state.
#[derive(Resource, Debug)]
pub struct Session {
    local: ParticipantId,
    participants: Vec<Participant>,
    outbox: VecDeque<Envelope>,
}

impl Session {
    /// Open a session for `local`, which must appear in `participants`.
    pub fn new(local: ParticipantId, participants: Vec<Participant>) -> Self {
        debug_assert!(participants.iter().any(|p| p.id == local));
        Self {
            local,
            participants,
            outbox: VecDeque::new(),
        }
    }

    pub fn local_id(&self) -> ParticipantId {
        self.local
    }

    pub fn is_local(&self, id: ParticipantId) -> bool {
        self.local == id
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn nickname(&self, id: ParticipantId) -> Option<&str> {
        self.participants
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.nickname.as_str())
    }

    /// Queue a directive for one participant's process.
    pub fn send_to(&mut self, target: ParticipantId, directive: Directive) {
        self.outbox.push_back(Envelope {
            from: self.local,
            delivery: Delivery::To(target),
            directive,
        });
    }

    /// Queue a directive for every process, including this one.
    pub fn send_all(&mut self, directive: Directive) {
        self.outbox.push_back(Envelope {
            from: self.local,
            delivery: Delivery::All,
            directive,
        });
    }

    /// Take everything queued since the last drain. Called by the transport
    /// pump; entity logic never touches it.
    pub fn drain_outbox(&mut self) -> VecDeque<Envelope> {
        std::mem::take(&mut self.outbox)
    }

    pub fn outbox_depth(&self) -> usize {
        self.outbox.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_party_session() -> Session {
        Session::new(
            ParticipantId(1),
            vec![
                Participant {
                    id: ParticipantId(1),
                    nickname: "anna".into(),
                },
                Participant {
                    id: ParticipantId(2),
                    nickname: "bo".into(),
                },
            ],
        )
    }

    #[test]
    fn envelopes_are_stamped_with_the_local_sender() {
        let mut session = two_party_session();
        session.send_to(ParticipantId(2), Directive::KillCredit);
        session.send_all(Directive::KillCredit);

        let sent: Vec<_> = session.drain_outbox().into_iter().collect();
        assert_eq!(sent.len(), 2);
        assert!(sent.iter().all(|e| e.from == ParticipantId(1)));
        assert_eq!(sent[0].delivery, Delivery::To(ParticipantId(2)));
        assert_eq!(sent[1].delivery, Delivery::All);
    }

    #[test]
    fn drain_empties_the_outbox() {
        let mut session = two_party_session();
        session.send_all(Directive::KillCredit);
        assert_eq!(session.outbox_depth(), 1);
        session.drain_outbox();
        assert_eq!(session.outbox_depth(), 0);
    }

    #[test]
    fn nickname_lookup_by_id() {
        let session = two_party_session();
        assert_eq!(session.nickname(ParticipantId(2)), Some("bo"));
        assert_eq!(session.nickname(ParticipantId(9)), None);
    }
}
