//! Player-related components.

use bevy::prelude::*;

/// Marker component for player entities, local and remote alike.
#[derive(Component)]
pub struct Player;

/// Capability marker: this entity can receive damage directives.
///
/// The hit-scan query checks for this component before forwarding damage;
/// its absence is the typed "not damageable" outcome.
#[derive(Component)]
pub struct Damageable;

/// Starting and respawn health for every player entity.
pub const MAX_HEALTH: f32 = 100.0;

/// Health pool, mutated only by the damage applier on the owning process.
///
/// `current` is intentionally not clamped at zero: lethal overkill leaves a
/// negative value until the respawn reset, and the death check reads `<= 0`.
#[derive(Component, Debug)]
pub struct Health {
    pub current: f32,
    pub maximum: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self {
            current: max,
            maximum: max,
        }
    }

    /// Subtract damage without flooring at zero.
    pub fn apply_damage(&mut self, amount: f32) {
        self.current -= amount;
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    /// Fill fraction for the health-bar proxies.
    pub fn fraction(&self) -> f32 {
        self.current / self.maximum
    }

    pub fn reset(&mut self) {
        self.current = self.maximum;
    }
}

/// Marker for entities that have died and not yet respawned.
///
/// Inserting this is what makes death idempotent: a second lethal signal on
/// an entity that already carries it is a no-op.
#[derive(Component)]
pub struct Dead;

/// Tracks velocity and ground contact for the movement step.
///
/// `grounded` is written only by this entity's ground sensor and read only
/// by this entity's movement integration. It is never replicated; every
/// process recomputes it from its local collision events.
#[derive(Component, Debug)]
pub struct MovementState {
    pub velocity: Vec3,
    pub grounded: bool,
}

impl Default for MovementState {
    fn default() -> Self {
        Self {
            velocity: Vec3::ZERO,
            grounded: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_is_not_clamped_at_zero() {
        let mut health = Health::new(100.0);
        health.apply_damage(30.0);
        assert_eq!(health.current, 70.0);
        assert!(!health.is_dead());

        health.apply_damage(80.0);
        assert_eq!(health.current, -10.0);
        assert!(health.is_dead());
    }

    #[test]
    fn reset_restores_maximum() {
        let mut health = Health::new(100.0);
        health.apply_damage(130.0);
        health.reset();
        assert_eq!(health.current, 100.0);
        assert!(!health.is_dead());
    }

    #[test]
    fn fraction_tracks_current_over_maximum() {
        let mut health = Health::new(100.0);
        health.apply_damage(25.0);
        assert_eq!(health.fraction(), 0.75);
    }
}
