//! Movement and camera tuning, loadable from RON.

use std::fs;
use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading tuning data.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read.
    #[error("Failed to read config '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },
}

/// Static per-entity movement configuration, supplied at construction.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Mouse sensitivity multiplier.
    pub mouse_sensitivity: f32,
    /// Base movement speed in units per second.
    pub walk_speed: f32,
    /// Movement speed while sprinting.
    pub sprint_speed: f32,
    /// Target jump height in units; converted to an initial velocity with
    /// `sqrt(jump_height * -2 * gravity)`.
    pub jump_height: f32,
    /// Gravity acceleration, negative pointing down.
    pub gravity: f32,
    /// Symmetric camera pitch clamp in radians.
    pub pitch_limit: f32,
    /// Falling below this Y kills the entity outright.
    pub world_floor_y: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 1.5,
            walk_speed: 5.0,
            sprint_speed: 8.0,
            jump_height: 1.9,
            gravity: -20.0,
            pitch_limit: std::f32::consts::FRAC_PI_2,
            world_floor_y: -10.0,
        }
    }
}

impl PlayerConfig {
    /// Load tuning from a RON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let contents = fs::read_to_string(path).map_err(|err| ConfigError::ReadError {
            path: display.clone(),
            details: err.to_string(),
        })?;
        Self::parse(&display, &contents)
    }

    fn parse(path: &str, contents: &str) -> Result<Self, ConfigError> {
        ron::from_str(contents).map_err(|err| ConfigError::ParseError {
            path: path.to_string(),
            details: err.to_string(),
        })
    }
}

/// Replace the default tuning with the data file if it exists; a missing
/// or broken file degrades to defaults.
pub fn load_player_config(mut config: ResMut<PlayerConfig>) {
    let path = Path::new("assets/config/movement.ron");
    if !path.exists() {
        info!("no movement tuning file, using defaults");
        return;
    }
    match PlayerConfig::load(path) {
        Ok(loaded) => *config = loaded,
        Err(err) => warn!("movement tuning ignored: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_tuning_over_defaults() {
        let config =
            PlayerConfig::parse("inline", "(walk_speed: 7.5, gravity: -30.0)").unwrap();
        assert_eq!(config.walk_speed, 7.5);
        assert_eq!(config.gravity, -30.0);
        // Unspecified fields keep their defaults.
        assert_eq!(config.jump_height, 1.9);
    }

    #[test]
    fn malformed_tuning_is_a_parse_error() {
        let err = PlayerConfig::parse("inline", "(walk_speed: \"fast\")").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }
}
