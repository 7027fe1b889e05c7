// Copyright © 2025
// Author: Nocthir <nocthir@proton.me>
// SPDX-License-Identifier: MIT or Apache-2.0

use std::{fs, io, path::Path};

use anyhow::Result;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

const SETTINGS_PATH: &str = "assets/settings.json";

/// Startup settings read from `assets/settings.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Hitbox set file shown by the viewer. Empty uses the built-in demo sets.
    #[serde(default)]
    pub hitbox_path: String,
    /// Set selected when the viewer starts.
    #[serde(default)]
    pub default_set: Option<String>,
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::load_from(SETTINGS_PATH)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let file = fs::read(path)?;
        let reader = io::Cursor::new(file);
        let settings: Settings = serde_json::from_reader(reader)?;
        Ok(settings)
    }
}

/// Runtime hitbox options, editable from the UI and the inspector.
#[derive(Reflect, Resource, Debug, Clone, Default, PartialEq)]
#[reflect(Resource)]
pub struct HitboxSettings {
    /// Hitbox set shown on every model that has it.
    pub selected_set: Option<String>,
}

impl From<&Settings> for HitboxSettings {
    fn from(settings: &Settings) -> Self {
        Self {
            selected_set: settings.default_set.clone(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() -> Result<()> {
        let settings: Settings = serde_json::from_str(r#"{ "default_set": "default" }"#)?;
        assert!(settings.hitbox_path.is_empty());
        assert_eq!(
            HitboxSettings::from(&settings).selected_set.as_deref(),
            Some("default")
        );
        Ok(())
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Settings::load_from("assets/does-not-exist.json").is_err());
    }
}
