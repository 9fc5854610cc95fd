//! UI plugin - HUD and nameplates.

use bevy::prelude::*;

use super::{hud, nameplate};

/// UI plugin - passive displays only; nothing here feeds back into the
/// controller.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        hud::setup_hud_systems(app);
        nameplate::setup_nameplate_systems(app);
    }
}
