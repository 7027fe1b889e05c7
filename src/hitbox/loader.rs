// Copyright © 2025
// Author: Nocthir <nocthir@proton.me>
// SPDX-License-Identifier: MIT or Apache-2.0

//! Hitbox set files.
//!
//! A file maps set names to lists of hitboxes:
//!
//! ```json
//! {
//!     "default": [
//!         { "name": "head", "shape": "sphere", "bone": "Head", "min_bounds": [0, 0, 0], "radius": 0.3 }
//!     ]
//! }
//! ```

use std::{collections::HashMap, fs, io, path::Path};

use bevy::prelude::*;
use serde::Deserialize;

use crate::hitbox::{
    definition::{HitboxDefinition, HitboxShape},
    error::Result,
};

pub type HitboxSets = HashMap<String, Vec<HitboxDefinition>>;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ShapeType {
    Sphere,
    Capsule,
    Box,
}

#[derive(Debug, Deserialize)]
struct HitboxRecord {
    #[serde(default)]
    name: String,
    shape: ShapeType,
    #[serde(default)]
    bone: Option<String>,
    min_bounds: [f32; 3],
    #[serde(default)]
    max_bounds: [f32; 3],
    #[serde(default)]
    radius: f32,
    #[serde(default)]
    translation_only: bool,
    #[serde(default)]
    surface_property: String,
    #[serde(default)]
    group_id: i32,
    #[serde(default = "default_tint")]
    tint: [u8; 4],
}

fn default_tint() -> [u8; 4] {
    HitboxDefinition::DEFAULT_TINT
}

impl From<HitboxRecord> for HitboxDefinition {
    fn from(record: HitboxRecord) -> Self {
        let min = Vec3::from_array(record.min_bounds);
        let max = Vec3::from_array(record.max_bounds);
        // Spheres sit on the min bound, capsules run from min to max.
        let shape = match record.shape {
            ShapeType::Sphere => HitboxShape::Sphere {
                center: min,
                radius: record.radius,
            },
            ShapeType::Capsule => HitboxShape::Capsule {
                start: min,
                end: max,
                radius: record.radius,
            },
            ShapeType::Box => HitboxShape::Box { min, max },
        };
        Self {
            name: record.name,
            shape,
            bone_name: record.bone,
            translation_only: record.translation_only,
            surface_property: record.surface_property,
            group_id: record.group_id,
            tint: record.tint,
        }
    }
}

pub fn parse_hitbox_sets(bytes: &[u8]) -> Result<HitboxSets> {
    let reader = io::Cursor::new(bytes);
    let records: HashMap<String, Vec<HitboxRecord>> = serde_json::from_reader(reader)?;
    Ok(records
        .into_iter()
        .map(|(name, hitboxes)| (name, hitboxes.into_iter().map(Into::into).collect()))
        .collect())
}

pub fn load_hitbox_sets(path: impl AsRef<Path>) -> anyhow::Result<HitboxSets> {
    let path = path.as_ref();
    let file = fs::read(path)?;
    let sets = parse_hitbox_sets(&file)?;
    info!("Loaded {} hitbox sets from {}", sets.len(), path.display());
    Ok(sets)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::hitbox::error::HitboxError;

    const SETS: &str = r#"{
        "default": [
            { "name": "head", "shape": "sphere", "bone": "Head", "min_bounds": [0, 1, 0], "radius": 0.3, "translation_only": true },
            { "name": "spine", "shape": "capsule", "bone": "Spine", "min_bounds": [0, 0, 0], "max_bounds": [0, 1, 0], "radius": 0.2, "tint": [0, 255, 0, 64] },
            { "name": "feet", "shape": "box", "min_bounds": [-1, -1, 0], "max_bounds": [1, 1, 0.1], "surface_property": "flesh", "group_id": 3 }
        ],
        "empty": []
    }"#;

    #[test]
    fn parse_sets() -> Result<()> {
        let sets = parse_hitbox_sets(SETS.as_bytes())?;
        assert_eq!(sets.len(), 2);
        assert!(sets["empty"].is_empty());

        let default = &sets["default"];
        assert_eq!(default.len(), 3);

        assert_eq!(default[0].bone(), Some("Head"));
        assert!(default[0].translation_only);
        assert_eq!(
            default[0].shape,
            HitboxShape::Sphere {
                center: Vec3::Y,
                radius: 0.3
            }
        );
        assert_eq!(default[0].tint, HitboxDefinition::DEFAULT_TINT);

        assert_eq!(
            default[1].shape,
            HitboxShape::Capsule {
                start: Vec3::ZERO,
                end: Vec3::Y,
                radius: 0.2
            }
        );
        assert_eq!(default[1].tint, [0, 255, 0, 64]);

        assert_eq!(default[2].bone(), None);
        assert_eq!(default[2].surface_property, "flesh");
        assert_eq!(default[2].group_id, 3);
        assert!(matches!(default[2].shape, HitboxShape::Box { .. }));
        Ok(())
    }

    #[test]
    fn invalid_file_is_a_load_error() {
        let err = parse_hitbox_sets(br#"{ "default": [ { "shape": "cone" } ] }"#).unwrap_err();
        assert!(matches!(err, HitboxError::Load(_)));

        let source = std::error::Error::source(&err).expect("load error keeps its cause");
        assert!(source.is::<serde_json::Error>());
    }
}
