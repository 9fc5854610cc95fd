//! Loadout definitions and RON loading.
//!
//! The item list is static per-entity configuration supplied at spawn, read
//! from a data file so tuning does not require a rebuild. A missing or
//! broken file degrades to the built-in loadout.

use std::fs;
use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading loadout data.
#[derive(Debug, Error)]
pub enum LoadoutError {
    /// File could not be read.
    #[error("Failed to read loadout '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// A loadout must carry at least one item.
    #[error("Loadout '{path}' contains no items")]
    Empty { path: String },
}

/// One item definition in a loadout file.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemDef {
    pub name: String,
    pub kind: ItemKindDef,
}

/// Data-file form of [`crate::items::ItemSpec`].
#[derive(Debug, Clone, Copy, Deserialize)]
pub enum ItemKindDef {
    HitscanGun { damage: f32 },
}

/// External loadout file structure.
#[derive(Debug, Deserialize)]
struct LoadoutFile {
    items: Vec<ItemDef>,
}

/// The loadout every player entity spawns with.
#[derive(Resource, Debug, Clone)]
pub struct Loadout(pub Vec<ItemDef>);

impl Default for Loadout {
    fn default() -> Self {
        Self(vec![
            ItemDef {
                name: "Service Rifle".to_string(),
                kind: ItemKindDef::HitscanGun { damage: 30.0 },
            },
            ItemDef {
                name: "Sidearm".to_string(),
                kind: ItemKindDef::HitscanGun { damage: 15.0 },
            },
        ])
    }
}

/// Load a loadout from a RON file.
pub fn load_loadout(path: &Path) -> Result<Vec<ItemDef>, LoadoutError> {
    let display = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|err| LoadoutError::ReadError {
        path: display.clone(),
        details: err.to_string(),
    })?;
    parse_loadout(&display, &contents)
}

fn parse_loadout(path: &str, contents: &str) -> Result<Vec<ItemDef>, LoadoutError> {
    let file: LoadoutFile = ron::from_str(contents).map_err(|err| LoadoutError::ParseError {
        path: path.to_string(),
        details: err.to_string(),
    })?;
    if file.items.is_empty() {
        return Err(LoadoutError::Empty {
            path: path.to_string(),
        });
    }
    Ok(file.items)
}

/// Replace the built-in loadout with the data file if it exists.
pub fn load_loadout_config(mut loadout: ResMut<Loadout>) {
    let path = Path::new("assets/config/loadout.ron");
    if !path.exists() {
        info!("no loadout file, using built-in loadout");
        return;
    }
    match load_loadout(path) {
        Ok(items) => loadout.0 = items,
        Err(err) => warn!("loadout file ignored: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_loadout_file() {
        let items = parse_loadout(
            "inline",
            r#"(
                items: [
                    (name: "Rifle", kind: HitscanGun(damage: 30.0)),
                    (name: "Pistol", kind: HitscanGun(damage: 15.0)),
                ],
            )"#,
        )
        .unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Rifle");
        assert!(matches!(
            items[1].kind,
            ItemKindDef::HitscanGun { damage } if damage == 15.0
        ));
    }

    #[test]
    fn empty_loadout_is_an_error() {
        let err = parse_loadout("inline", "(items: [])").unwrap_err();
        assert!(matches!(err, LoadoutError::Empty { .. }));
    }

    #[test]
    fn malformed_loadout_is_a_parse_error() {
        let err = parse_loadout("inline", "(items: [(name: 3)])").unwrap_err();
        assert!(matches!(err, LoadoutError::ParseError { .. }));
    }
}
