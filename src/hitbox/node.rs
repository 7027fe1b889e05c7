// Copyright © 2025
// Author: Nocthir <nocthir@proton.me>
// SPDX-License-Identifier: MIT or Apache-2.0

use std::{
    collections::HashMap,
    ops::{Deref, DerefMut},
};

use bevy::{
    math::{Vec3A, bounding::Aabb3d},
    prelude::*,
};

use crate::hitbox::{
    backend::{BoneMatrixSource, HitboxPrimitive, PrimitiveFactory, RenderContext, RenderPass},
    binding::{BoneLookup, HitboxSetBinding, bind_hitbox_sets},
    definition::HitboxDefinition,
    error::{HitboxError, Result},
    pool::BoneMatrixPool,
    transform::resolve_transform,
};

/// What an update needs from the frame loop.
pub struct FrameContext<'f> {
    /// Current animation. `None` means no animation is playing: every bone is treated as identity.
    pub animation: Option<&'f dyn BoneMatrixSource>,
    pub pool: &'f mut BoneMatrixPool,
}

/// Named hitbox sets bound to one skeleton, at most one of them shown at a time.
pub struct HitboxSetNode<P> {
    sets: HashMap<String, HitboxSetBinding<P>>,
    active: Option<String>,
    bone_count: usize,
    local_bounds: Aabb3d,
}

impl<P: HitboxPrimitive> HitboxSetNode<P> {
    pub fn new<I, S, F>(
        bone_names: I,
        sets: HashMap<String, Vec<HitboxDefinition>>,
        factory: &mut F,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: PrimitiveFactory<Primitive = P>,
    {
        let (lookup, sets) = bind_hitbox_sets(bone_names, sets, factory);
        Self::from_bindings(&lookup, sets)
    }

    pub fn from_bindings(lookup: &BoneLookup, sets: HashMap<String, HitboxSetBinding<P>>) -> Self {
        Self {
            sets,
            active: None,
            bone_count: lookup.bone_count(),
            local_bounds: Aabb3d::new(Vec3::ZERO, Vec3::ZERO),
        }
    }

    /// Show the named set, or nothing with `None`.
    /// An unknown name is an error and keeps the current selection.
    pub fn select_set(&mut self, name: Option<&str>) -> Result<()> {
        let Some(name) = name else {
            self.active = None;
            return Ok(());
        };
        if !self.sets.contains_key(name) {
            return Err(HitboxError::UnknownSet(name.to_string()));
        }
        if self.active.as_deref() != Some(name) {
            self.active = Some(name.to_string());
        }
        Ok(())
    }

    pub fn active_set(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn active_binding(&self) -> Option<&HitboxSetBinding<P>> {
        self.active.as_ref().and_then(|name| self.sets.get(name))
    }

    pub fn binding(&self, name: &str) -> Option<&HitboxSetBinding<P>> {
        self.sets.get(name)
    }

    /// Set names in alphabetical order.
    pub fn set_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.sets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Bones in the skeleton the sets were bound against.
    pub fn bone_count(&self) -> usize {
        self.bone_count
    }

    pub fn local_bounds(&self) -> Aabb3d {
        self.local_bounds
    }

    /// Move every hitbox of the active set to its bone for this frame.
    pub fn update(&mut self, frame: &mut FrameContext<'_>) -> Result<()> {
        let Some(binding) = self.active.as_ref().and_then(|name| self.sets.get_mut(name)) else {
            return Ok(());
        };

        // Hitboxes follow arbitrary bones, there is no cheap tight bound.
        self.local_bounds = Aabb3d {
            min: Vec3A::splat(f32::MIN),
            max: Vec3A::splat(f32::MAX),
        };

        let bone_count = frame
            .animation
            .map_or(self.bone_count, |animation| animation.bone_count());
        if bone_count != self.bone_count {
            return Err(HitboxError::SkeletonChanged {
                bound: self.bone_count,
                current: bone_count,
            });
        }

        if bone_count == 0 {
            update_hitbox_set(binding, &[]);
            return Ok(());
        }

        let mut bones = frame.pool.acquire(bone_count)?;
        match frame.animation {
            Some(animation) => animation
                .bone_matrices(&mut bones)
                .map_err(HitboxError::Animation)?,
            None => bones.fill(Mat4::IDENTITY),
        }
        update_hitbox_set(binding, &bones);
        Ok(())
    }

    /// Draw the active set on top of the scene. Only acts during the translucent pass.
    pub fn render(&self, context: &mut P::Context) -> Result<()> {
        let Some(binding) = self.active_binding() else {
            return Ok(());
        };
        if context.pass() != RenderPass::Translucent {
            return Ok(());
        }

        let mut context = DepthTestDisabled::new(context);
        for (index, hitbox) in binding.hitboxes().iter().enumerate() {
            hitbox
                .primitive
                .render(&mut context)
                .map_err(|source| HitboxError::Draw { index, source })?;
        }
        Ok(())
    }
}

fn update_hitbox_set<P: HitboxPrimitive>(binding: &mut HitboxSetBinding<P>, bones: &[Mat4]) {
    for (definition, hitbox) in binding.iter_mut() {
        let transform = resolve_transform(hitbox.bone, definition.translation_only, bones);
        hitbox.primitive.set_transform(transform);
    }
}

/// Turns depth testing off until dropped, then puts back whatever was there before.
struct DepthTestDisabled<'c, C: RenderContext> {
    context: &'c mut C,
    previous: bool,
}

impl<'c, C: RenderContext> DepthTestDisabled<'c, C> {
    fn new(context: &'c mut C) -> Self {
        let previous = context.depth_test_enabled();
        context.set_depth_test(false);
        Self { context, previous }
    }
}

impl<C: RenderContext> Deref for DepthTestDisabled<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.context
    }
}

impl<C: RenderContext> DerefMut for DepthTestDisabled<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.context
    }
}

impl<C: RenderContext> Drop for DepthTestDisabled<'_, C> {
    fn drop(&mut self) {
        self.context.set_depth_test(self.previous);
    }
}
