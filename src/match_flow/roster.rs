//! Match roster: per-participant entity handles and score bookkeeping.

use std::collections::HashMap;

use bevy::prelude::*;

use crate::net::ParticipantId;

/// Bookkeeping for one participant.
#[derive(Debug, Default, Clone)]
pub struct PlayerRecord {
    pub entity: Option<Entity>,
    pub kills: u32,
    pub deaths: u32,
    pub alive: bool,
}

/// Who is in the match and how they are doing.
#[derive(Resource, Debug, Default)]
pub struct MatchRoster {
    records: HashMap<ParticipantId, PlayerRecord>,
}

impl MatchRoster {
    /// Associate a participant with its spawned entity.
    pub fn register(&mut self, id: ParticipantId, entity: Entity) {
        let record = self.records.entry(id).or_default();
        record.entity = Some(entity);
        record.alive = true;
    }

    /// Entity handle for a participant's player, if spawned.
    pub fn lookup_by_owner(&self, id: ParticipantId) -> Option<Entity> {
        self.records.get(&id).and_then(|r| r.entity)
    }

    /// Count a death. Returns the new tally, or `None` if the participant
    /// was already dead - a repeated death signal must not double-count.
    pub fn record_death(&mut self, id: ParticipantId) -> Option<u32> {
        let record = self.records.entry(id).or_default();
        if !record.alive {
            return None;
        }
        record.alive = false;
        record.deaths += 1;
        Some(record.deaths)
    }

    /// Mark a participant as back in play.
    pub fn record_respawn(&mut self, id: ParticipantId) {
        self.records.entry(id).or_default().alive = true;
    }

    /// Count a kill and return the new tally.
    pub fn record_kill(&mut self, id: ParticipantId) -> u32 {
        let record = self.records.entry(id).or_default();
        record.kills += 1;
        record.kills
    }

    pub fn record(&self, id: ParticipantId) -> Option<&PlayerRecord> {
        self.records.get(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANNA: ParticipantId = ParticipantId(1);

    #[test]
    fn death_is_counted_once_until_respawn() {
        let mut roster = MatchRoster::default();
        roster.register(ANNA, Entity::from_raw(7));

        assert_eq!(roster.record_death(ANNA), Some(1));
        assert_eq!(roster.record_death(ANNA), None);

        roster.record_respawn(ANNA);
        assert_eq!(roster.record_death(ANNA), Some(2));
    }

    #[test]
    fn kills_accumulate() {
        let mut roster = MatchRoster::default();
        assert_eq!(roster.record_kill(ANNA), 1);
        assert_eq!(roster.record_kill(ANNA), 2);
    }

    #[test]
    fn lookup_by_owner_returns_the_registered_entity() {
        let mut roster = MatchRoster::default();
        let entity = Entity::from_raw(42);
        roster.register(ANNA, entity);
        assert_eq!(roster.lookup_by_owner(ANNA), Some(entity));
        assert_eq!(roster.lookup_by_owner(ParticipantId(9)), None);
    }
}
