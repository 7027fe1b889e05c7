// Copyright © 2025
// Author: Nocthir <nocthir@proton.me>
// SPDX-License-Identifier: MIT or Apache-2.0

use std::fmt;

use bevy::prelude::*;

/// Geometric shape of a hitbox, expressed in the space of the bone it is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum HitboxShape {
    /// Sphere centered on `center`.
    Sphere { center: Vec3, radius: f32 },
    /// Capsule whose segment goes from `start` to `end`.
    Capsule { start: Vec3, end: Vec3, radius: f32 },
    /// Axis aligned box in bone space.
    Box { min: Vec3, max: Vec3 },
}

impl HitboxShape {
    pub fn kind(&self) -> &'static str {
        match self {
            HitboxShape::Sphere { .. } => "sphere",
            HitboxShape::Capsule { .. } => "capsule",
            HitboxShape::Box { .. } => "box",
        }
    }
}

/// A hitbox as it comes out of the resource layer. Read-only to the overlay.
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct HitboxDefinition {
    pub name: String,
    pub shape: HitboxShape,
    /// Name of the bone this hitbox follows. `None` or empty means the model origin.
    pub bone_name: Option<String>,
    /// Follow only the bone position, ignoring its rotation and scale.
    pub translation_only: bool,
    pub surface_property: String,
    pub group_id: i32,
    /// RGBA tint, sRGB.
    pub tint: [u8; 4],
}

impl HitboxDefinition {
    pub const DEFAULT_TINT: [u8; 4] = [255, 255, 255, 255];

    pub fn new(name: impl Into<String>, shape: HitboxShape) -> Self {
        Self {
            name: name.into(),
            shape,
            bone_name: None,
            translation_only: false,
            surface_property: String::new(),
            group_id: 0,
            tint: Self::DEFAULT_TINT,
        }
    }

    pub fn with_bone(mut self, bone_name: impl Into<String>) -> Self {
        self.bone_name = Some(bone_name.into());
        self
    }

    pub fn with_translation_only(mut self, translation_only: bool) -> Self {
        self.translation_only = translation_only;
        self
    }

    pub fn with_tint(mut self, tint: [u8; 4]) -> Self {
        self.tint = tint;
        self
    }

    /// The bone name, if any and not empty.
    pub fn bone(&self) -> Option<&str> {
        self.bone_name.as_deref().filter(|name| !name.is_empty())
    }
}

impl fmt::Display for HitboxDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) on {}",
            self.name,
            self.shape.kind(),
            self.bone().unwrap_or("<origin>")
        )?;
        if self.translation_only {
            write!(f, ", translation only")?;
        }
        Ok(())
    }
}
