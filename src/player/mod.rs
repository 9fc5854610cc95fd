//! Player module - the entity controller: movement, sensing, equip state,
//! and the damage protocol.

mod components;
mod config;
mod damage;
mod equip;
mod ground_sensor;
mod movement;
mod plugin;
mod spawn;

pub use components::*;
pub use config::{ConfigError, PlayerConfig};
pub use damage::{apply_damage_directives, request_damage};
pub use equip::{equip_transition, EquipTransition, EquipTrigger, ItemSlots};
pub use ground_sensor::GroundSensor;
pub use movement::{movement_step, MoveIntent, PlayerCamera};
pub use plugin::{PlayerPlugin, PlayerSet};
pub use spawn::spawn_player;
