//! UI module - HUD and nameplate displays.

mod hud;
mod nameplate;
mod plugin;

pub use hud::{HealthBar, HealthBarSecondary};
pub use nameplate::Nameplate;
pub use plugin::UiPlugin;
