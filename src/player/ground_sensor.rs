//! Ground-contact sensor.
//!
//! A small sensor collider hangs below each player body and reports whether
//! any supporting surface is currently touching it. The physics engine only
//! emits contact begin/end edges, so the sensor keeps the set of live
//! contacts and derives the level-triggered answer from it: any contact in
//! the set means grounded, and only losing the last one clears it.

use std::collections::HashSet;

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::MovementState;

/// Child sensor volume reporting contact state to its parent body.
#[derive(Component, Debug)]
pub struct GroundSensor {
    /// The player body this sensor belongs to. Contacts with it are
    /// filtered out unconditionally.
    pub body: Entity,
    contacts: HashSet<Entity>,
}

impl GroundSensor {
    pub fn new(body: Entity) -> Self {
        Self {
            body,
            contacts: HashSet::new(),
        }
    }

    /// Record a contact beginning; returns the new grounded state.
    pub fn contact_started(&mut self, other: Entity) -> bool {
        if other != self.body {
            self.contacts.insert(other);
        }
        self.grounded()
    }

    /// Record a contact ending; returns the new grounded state.
    pub fn contact_stopped(&mut self, other: Entity) -> bool {
        self.contacts.remove(&other);
        self.grounded()
    }

    pub fn grounded(&self) -> bool {
        !self.contacts.is_empty()
    }
}

/// Bundle pieces for the sensor child entity.
pub fn sensor_collider() -> (Collider, Sensor, ActiveEvents, ActiveCollisionTypes) {
    (
        Collider::ball(0.25),
        Sensor,
        ActiveEvents::COLLISION_EVENTS,
        ActiveCollisionTypes::default() | ActiveCollisionTypes::KINEMATIC_STATIC,
    )
}

/// Fold collision edges into each sensor's contact set and push the
/// resulting grounded state to the parent body's movement state.
pub fn update_ground_contacts(
    mut collisions: EventReader<CollisionEvent>,
    mut sensors: Query<&mut GroundSensor>,
    mut bodies: Query<&mut MovementState>,
) {
    for event in collisions.read() {
        let (a, b, started) = match event {
            CollisionEvent::Started(a, b, _) => (*a, *b, true),
            CollisionEvent::Stopped(a, b, _) => (*a, *b, false),
        };

        // Either side of the pair may be the sensor.
        for (candidate, other) in [(a, b), (b, a)] {
            let Ok(mut sensor) = sensors.get_mut(candidate) else {
                continue;
            };
            let grounded = if started {
                sensor.contact_started(other)
            } else {
                sensor.contact_stopped(other)
            };
            let body = sensor.body;
            if let Ok(mut state) = bodies.get_mut(body) {
                state.grounded = grounded;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entities() -> (Entity, Entity, Entity) {
        (
            Entity::from_raw(1),
            Entity::from_raw(2),
            Entity::from_raw(3),
        )
    }

    #[test]
    fn enter_then_exit_toggles_grounded() {
        let (body, floor, _) = entities();
        let mut sensor = GroundSensor::new(body);
        assert!(!sensor.grounded());
        assert!(sensor.contact_started(floor));
        assert!(!sensor.contact_stopped(floor));
    }

    #[test]
    fn own_body_contacts_are_ignored() {
        let (body, _, _) = entities();
        let mut sensor = GroundSensor::new(body);
        assert!(!sensor.contact_started(body));
        assert!(!sensor.grounded());
    }

    #[test]
    fn overlapping_supports_keep_grounded_until_last_exit() {
        let (body, floor, ramp) = entities();
        let mut sensor = GroundSensor::new(body);
        sensor.contact_started(floor);
        sensor.contact_started(ramp);
        assert!(sensor.contact_stopped(floor));
        assert!(!sensor.contact_stopped(ramp));
    }

    #[test]
    fn repeated_enters_from_one_support_do_not_double_count() {
        let (body, floor, _) = entities();
        let mut sensor = GroundSensor::new(body);
        sensor.contact_started(floor);
        sensor.contact_started(floor);
        assert!(!sensor.contact_stopped(floor));
    }
}
