// Copyright © 2025
// Author: Nocthir <nocthir@proton.me>
// SPDX-License-Identifier: MIT or Apache-2.0

use anyhow::anyhow;
use bevy::prelude::*;

use crate::hitbox::backend::BoneMatrixSource;

/// Joint entities of a model, in bone order. Joint names come from their [`Name`].
#[derive(Component, Debug, Clone, Default)]
pub struct HitboxSkeleton {
    pub joints: Vec<Entity>,
}

/// Bone matrices read from the joints' global transforms, relative to the model root.
pub struct JointMatrixSource<'j, F> {
    joints: &'j [Entity],
    model_from_world: Mat4,
    global_transform: F,
}

impl<'j, F> JointMatrixSource<'j, F>
where
    F: Fn(Entity) -> Option<GlobalTransform>,
{
    pub fn new(joints: &'j [Entity], root: &GlobalTransform, global_transform: F) -> Self {
        Self {
            joints,
            model_from_world: Mat4::from(root.affine()).inverse(),
            global_transform,
        }
    }
}

impl<F> BoneMatrixSource for JointMatrixSource<'_, F>
where
    F: Fn(Entity) -> Option<GlobalTransform>,
{
    fn bone_count(&self) -> usize {
        self.joints.len()
    }

    fn bone_matrices(&self, out: &mut [Mat4]) -> anyhow::Result<()> {
        for (matrix, &joint) in out.iter_mut().zip(self.joints) {
            let global = (self.global_transform)(joint)
                .ok_or_else(|| anyhow!("Joint {joint} has no global transform"))?;
            *matrix = self.model_from_world * Mat4::from(global.affine());
        }
        Ok(())
    }
}
