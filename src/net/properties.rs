//! Replicated per-participant property store.
//!
//! A key-value register visible to every process. Each key has exactly one
//! writer - the participant it belongs to - so convergence is last-write-wins
//! with no sequence numbers or merge logic. Late joiners read the current
//! value from the store instead of replaying message history.

use std::collections::HashMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::session::ParticipantId;

/// Keys a participant may publish about itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyKey {
    /// Index of the currently equipped item slot.
    EquippedItem,
    /// Lifetime kill tally for the match.
    Kills,
    /// Lifetime death tally for the match.
    Deaths,
}

/// Property values are deliberately narrow; widen only when a new key
/// needs it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Int(i64),
    Text(String),
}

impl PropertyValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            PropertyValue::Int(v) => Some(*v),
            PropertyValue::Text(_) => None,
        }
    }
}

/// Errors from property writes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PropertyError {
    /// A process tried to write a key it does not own.
    #[error("participant {writer:?} may not write properties of {owner:?}")]
    NotOwner {
        writer: ParticipantId,
        owner: ParticipantId,
    },
}

/// Fired whenever a participant's properties change, on every process
/// including the writer's own.
#[derive(Event, Debug, Clone)]
pub struct PropertiesChanged {
    pub participant: ParticipantId,
    pub changed: Vec<PropertyKey>,
}

/// The local view of the replicated register.
#[derive(Resource, Debug, Default)]
pub struct PropertyStore {
    entries: HashMap<(ParticipantId, PropertyKey), PropertyValue>,
}

impl PropertyStore {
    /// Write `owner`'s `key`, enforcing the single-writer rule: `writer`
    /// must be `owner`. Remote applications pass the envelope sender as the
    /// writer, which is the owner by construction.
    pub fn set(
        &mut self,
        writer: ParticipantId,
        owner: ParticipantId,
        key: PropertyKey,
        value: PropertyValue,
    ) -> Result<(), PropertyError> {
        if writer != owner {
            return Err(PropertyError::NotOwner { writer, owner });
        }
        self.entries.insert((owner, key), value);
        Ok(())
    }

    pub fn get(&self, owner: ParticipantId, key: PropertyKey) -> Option<&PropertyValue> {
        self.entries.get(&(owner, key))
    }

    pub fn get_int(&self, owner: ParticipantId, key: PropertyKey) -> Option<i64> {
        self.get(owner, key).and_then(PropertyValue::as_int)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANNA: ParticipantId = ParticipantId(1);
    const BO: ParticipantId = ParticipantId(2);

    #[test]
    fn last_write_wins_for_the_single_writer() {
        let mut store = PropertyStore::default();
        store
            .set(ANNA, ANNA, PropertyKey::EquippedItem, PropertyValue::Int(1))
            .unwrap();
        store
            .set(ANNA, ANNA, PropertyKey::EquippedItem, PropertyValue::Int(2))
            .unwrap();
        assert_eq!(store.get_int(ANNA, PropertyKey::EquippedItem), Some(2));
    }

    #[test]
    fn non_owner_writes_are_rejected() {
        let mut store = PropertyStore::default();
        let err = store
            .set(BO, ANNA, PropertyKey::Kills, PropertyValue::Int(99))
            .unwrap_err();
        assert_eq!(
            err,
            PropertyError::NotOwner {
                writer: BO,
                owner: ANNA
            }
        );
        assert_eq!(store.get(ANNA, PropertyKey::Kills), None);
    }

    #[test]
    fn keys_are_scoped_per_participant() {
        let mut store = PropertyStore::default();
        store
            .set(ANNA, ANNA, PropertyKey::Kills, PropertyValue::Int(3))
            .unwrap();
        store
            .set(BO, BO, PropertyKey::Kills, PropertyValue::Int(7))
            .unwrap();
        assert_eq!(store.get_int(ANNA, PropertyKey::Kills), Some(3));
        assert_eq!(store.get_int(BO, PropertyKey::Kills), Some(7));
    }
}
