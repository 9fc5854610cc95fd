//! Arena FPS - an owner-authoritative multiplayer first-person shooter core.
//!
//! Each participant simulates only the entities it owns; everything else is
//! a replica kept in sync through directives and a replicated property
//! store. Damage is resolved on the victim's session, kill credit flows
//! back to the shooter from the envelope sender.
//!
//! # Architecture
//!
//! The crate is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states and global events
//! - **Net**: Session, directives, property store, transport and codec
//! - **Player**: Movement, ground sensing, equip state, health and damage
//! - **Items**: Loadout data and hitscan weapons
//! - **MatchFlow**: Roster, death bookkeeping, kill credit, respawns
//! - **UI**: Health bars, crosshair, nameplates
//! - **Arena**: Demo scene and loopback session for the binary

pub mod arena;
pub mod core;
pub mod items;
pub mod match_flow;
pub mod net;
pub mod player;
pub mod ui;

use bevy::prelude::*;

/// Main plugin that adds all sub-plugins.
pub struct ArenaFpsPlugin;

impl Plugin for ArenaFpsPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)
            // Networking
            .add_plugins(net::NetPlugin)
            // Player systems
            .add_plugins(player::PlayerPlugin)
            // Item systems
            .add_plugins(items::ItemsPlugin)
            // Match flow
            .add_plugins(match_flow::MatchFlowPlugin)
            // UI systems
            .add_plugins(ui::UiPlugin);
    }
}
