//! Item components.

use bevy::prelude::*;

use super::data::{ItemDef, ItemKindDef};

/// An equippable, usable item living in one of a player's slots.
///
/// Variants dispatch polymorphically at the use site; new weapon kinds are
/// new variants of [`ItemSpec`], not new protocols.
#[derive(Component, Debug, Clone)]
pub struct Item {
    pub name: String,
    pub spec: ItemSpec,
}

impl Item {
    pub fn from_def(def: &ItemDef) -> Self {
        let spec = match def.kind {
            ItemKindDef::HitscanGun { damage } => ItemSpec::HitscanGun { damage },
        };
        Self {
            name: def.name.clone(),
            spec,
        }
    }
}

/// Behavior of an item when used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ItemSpec {
    /// Single-ray hit-scan weapon dealing a fixed damage per shot.
    HitscanGun { damage: f32 },
}

/// Transient cosmetic impact decal, despawned when the timer runs out.
#[derive(Component)]
pub struct ImpactEffect {
    pub timer: Timer,
}

impl ImpactEffect {
    pub fn new(lifetime_secs: f32) -> Self {
        Self {
            timer: Timer::from_seconds(lifetime_secs, TimerMode::Once),
        }
    }
}

/// Shared handles for impact decals, created once at startup.
#[derive(Resource)]
pub struct ImpactAssets {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
}
