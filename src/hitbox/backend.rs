// Copyright © 2025
// Author: Nocthir <nocthir@proton.me>
// SPDX-License-Identifier: MIT or Apache-2.0

//! Seams between the hitbox overlay and the systems around it: animation,
//! primitive creation and rendering.

use bevy::prelude::*;

use crate::hitbox::definition::HitboxDefinition;

/// Source of the current frame's bone matrices.
pub trait BoneMatrixSource {
    fn bone_count(&self) -> usize;

    /// Fill `out` with one model-space matrix per bone. `out` holds `bone_count()` matrices.
    fn bone_matrices(&self, out: &mut [Mat4]) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum RenderPass {
    #[default]
    Opaque,
    Translucent,
    Outline,
}

/// Render state the overlay needs to touch while drawing.
pub trait RenderContext {
    fn pass(&self) -> RenderPass;
    fn depth_test_enabled(&self) -> bool;
    fn set_depth_test(&mut self, enabled: bool);
}

/// Something that can be drawn for a hitbox.
pub trait HitboxPrimitive {
    type Context: RenderContext;

    fn transform(&self) -> Mat4;
    fn set_transform(&mut self, transform: Mat4);
    fn render(&self, context: &mut Self::Context) -> anyhow::Result<()>;
}

/// Creates one primitive per hitbox definition, once, at bind time.
pub trait PrimitiveFactory {
    type Primitive: HitboxPrimitive;

    fn create_primitive(&mut self, definition: &HitboxDefinition) -> Self::Primitive;
}

impl<F, P> PrimitiveFactory for F
where
    F: FnMut(&HitboxDefinition) -> P,
    P: HitboxPrimitive,
{
    type Primitive = P;

    fn create_primitive(&mut self, definition: &HitboxDefinition) -> P {
        self(definition)
    }
}
