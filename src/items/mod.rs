//! Items module - equippable items, the hit-scan gun, and loadout data.

mod components;
mod data;
mod gun;
mod plugin;

pub use components::{ImpactAssets, ImpactEffect, Item, ItemSpec};
pub use data::{load_loadout, ItemDef, ItemKindDef, Loadout, LoadoutError};
pub use plugin::{ItemSet, ItemsPlugin};
