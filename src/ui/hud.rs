//! In-match HUD - health display and crosshair.
//!
//! The local entity's health drives two bar fills: the main bar and a
//! slimmer secondary strip. Both read the same fraction every frame; the
//! second exists purely as a redundant display.

use bevy::prelude::*;

use crate::core::GameState;
use crate::net::Authority;
use crate::player::{Health, Player};

/// Marker for HUD root entities.
#[derive(Component)]
pub struct HudRoot;

/// Marker for the main health bar fill.
#[derive(Component)]
pub struct HealthBar;

/// Marker for the secondary health bar fill.
#[derive(Component)]
pub struct HealthBarSecondary;

/// Setup HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(OnEnter(GameState::InMatch), spawn_hud)
        .add_systems(OnExit(GameState::InMatch), cleanup_hud)
        .add_systems(
            Update,
            update_health_bars.run_if(in_state(GameState::InMatch)),
        );
}

/// Spawn the HUD UI.
fn spawn_hud(mut commands: Commands) {
    // Health readout (bottom-left corner)
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::End,
                align_items: AlignItems::Start,
                padding: UiRect::all(Val::Px(20.0)),
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            spawn_fill_bar(parent, 150.0, 12.0, HealthBar);
            spawn_fill_bar(parent, 150.0, 4.0, HealthBarSecondary);
        });

    // Crosshair (center of screen)
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            parent.spawn((
                Node {
                    width: Val::Px(4.0),
                    height: Val::Px(4.0),
                    ..default()
                },
                BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.5)),
            ));
        });
}

/// Helper to spawn one bar background with a marked fill.
fn spawn_fill_bar<M: Component>(parent: &mut ChildBuilder, width: f32, height: f32, marker: M) {
    parent
        .spawn((
            Node {
                width: Val::Px(width),
                height: Val::Px(height),
                margin: UiRect::bottom(Val::Px(4.0)),
                ..default()
            },
            BackgroundColor(Color::srgb(0.1, 0.1, 0.1)),
        ))
        .with_children(|bg| {
            bg.spawn((
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    ..default()
                },
                BackgroundColor(Color::srgb(0.8, 0.2, 0.2)),
                marker,
            ));
        });
}

/// Drive both health bar fills from the local entity's health fraction.
fn update_health_bars(
    player_query: Query<(&Health, &Authority), With<Player>>,
    mut bar_query: Query<&mut Node, Or<(With<HealthBar>, With<HealthBarSecondary>)>>,
) {
    let Some((health, _)) = player_query
        .iter()
        .find(|(_, authority)| **authority == Authority::Authoritative)
    else {
        return;
    };

    let fill = (health.fraction() * 100.0).max(0.0);
    for mut bar in bar_query.iter_mut() {
        bar.width = Val::Percent(fill);
    }
}

/// Clean up HUD entities.
fn cleanup_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
