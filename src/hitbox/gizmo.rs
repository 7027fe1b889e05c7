// Copyright © 2025
// Author: Nocthir <nocthir@proton.me>
// SPDX-License-Identifier: MIT or Apache-2.0

//! Wireframe hitbox primitives drawn with Bevy gizmos.
//!
//! Primitives record world space lines into [`LineRenderContext`]. Lines drawn while depth
//! testing is off end up in the [`HitboxGizmos`] group, which is configured to always
//! draw on top of the scene.

use std::f32::consts::{PI, TAU};

use anyhow::bail;
use bevy::prelude::*;

use crate::hitbox::{
    backend::{HitboxPrimitive, RenderContext, RenderPass},
    definition::{HitboxDefinition, HitboxShape},
};

const CIRCLE_SEGMENTS: usize = 24;

#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct HitboxGizmos;

pub fn configure_hitbox_gizmos(mut config_store: ResMut<GizmoConfigStore>) {
    let (config, _) = config_store.config_mut::<HitboxGizmos>();
    // Draw over everything, like a disabled depth test.
    config.depth_bias = -1.0;
}

/// Hand the lines recorded this frame to the gizmo groups.
pub fn flush_hitbox_lines(
    mut context: ResMut<LineRenderContext>,
    mut depth_tested: Gizmos,
    mut overlay: Gizmos<HitboxGizmos>,
) {
    for line in context.lines.drain(..) {
        match line.group() {
            LineGroup::Default => depth_tested.line(line.start, line.end, line.color),
            LineGroup::Hitbox => overlay.line(line.start, line.end, line.color),
        }
    }
}

/// Gizmo group a line is handed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineGroup {
    /// [`DefaultGizmoConfigGroup`], depth tested like the rest of the scene.
    Default,
    /// [`HitboxGizmos`], drawn on top.
    Hitbox,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitboxLine {
    pub start: Vec3,
    pub end: Vec3,
    pub color: Color,
    pub depth_test: bool,
}

impl HitboxLine {
    pub fn group(&self) -> LineGroup {
        if self.depth_test {
            LineGroup::Default
        } else {
            LineGroup::Hitbox
        }
    }
}

/// Collects hitbox lines for one frame. The line buffer keeps its capacity between frames.
#[derive(Resource, Debug)]
pub struct LineRenderContext {
    pass: RenderPass,
    depth_test: bool,
    world_from_model: Mat4,
    lines: Vec<HitboxLine>,
}

impl Default for LineRenderContext {
    fn default() -> Self {
        Self {
            pass: RenderPass::Translucent,
            depth_test: true,
            world_from_model: Mat4::IDENTITY,
            lines: Vec::new(),
        }
    }
}

impl LineRenderContext {
    /// Start drawing a model placed at `world_from_model`.
    pub fn begin(&mut self, pass: RenderPass, world_from_model: Mat4) {
        self.pass = pass;
        self.world_from_model = world_from_model;
    }

    pub fn world_from_model(&self) -> Mat4 {
        self.world_from_model
    }

    pub fn line(&mut self, start: Vec3, end: Vec3, color: Color) {
        self.lines.push(HitboxLine {
            start,
            end,
            color,
            depth_test: self.depth_test,
        });
    }

    pub fn lines(&self) -> &[HitboxLine] {
        &self.lines
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl RenderContext for LineRenderContext {
    fn pass(&self) -> RenderPass {
        self.pass
    }

    fn depth_test_enabled(&self) -> bool {
        self.depth_test
    }

    fn set_depth_test(&mut self, enabled: bool) {
        self.depth_test = enabled;
    }
}

#[derive(Debug, Clone)]
pub struct GizmoHitbox {
    shape: HitboxShape,
    color: Color,
    transform: Mat4,
}

impl GizmoHitbox {
    pub fn from_definition(definition: &HitboxDefinition) -> Self {
        let [r, g, b, a] = definition.tint;
        Self {
            shape: definition.shape,
            color: Color::srgba_u8(r, g, b, a),
            transform: Mat4::IDENTITY,
        }
    }

    pub fn shape(&self) -> &HitboxShape {
        &self.shape
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

impl HitboxPrimitive for GizmoHitbox {
    type Context = LineRenderContext;

    fn transform(&self) -> Mat4 {
        self.transform
    }

    fn set_transform(&mut self, transform: Mat4) {
        self.transform = transform;
    }

    fn render(&self, context: &mut LineRenderContext) -> anyhow::Result<()> {
        let world_from_hitbox = context.world_from_model() * self.transform;
        if !world_from_hitbox.is_finite() {
            bail!("Hitbox transform is not finite: {world_from_hitbox}");
        }
        let mut pen = Pen {
            context,
            matrix: world_from_hitbox,
            color: self.color,
        };
        match self.shape {
            HitboxShape::Sphere { center, radius } => {
                pen.arc(center, Vec3::X, Vec3::Y, radius, 0.0, TAU);
                pen.arc(center, Vec3::Y, Vec3::Z, radius, 0.0, TAU);
                pen.arc(center, Vec3::Z, Vec3::X, radius, 0.0, TAU);
            }
            HitboxShape::Capsule { start, end, radius } => {
                let axis = (end - start).try_normalize().unwrap_or(Vec3::Y);
                let (u, v) = axis.any_orthonormal_pair();
                pen.arc(start, u, v, radius, 0.0, TAU);
                pen.arc(end, u, v, radius, 0.0, TAU);
                for side in [u, v, -u, -v] {
                    pen.line(start + side * radius, end + side * radius);
                }
                // Half circles capping both ends, in two perpendicular planes.
                for side in [u, v] {
                    pen.arc(end, side, axis, radius, 0.0, PI);
                    pen.arc(start, side, -axis, radius, 0.0, PI);
                }
            }
            HitboxShape::Box { min, max } => {
                let corner = |i: usize| {
                    Vec3::new(
                        if i & 1 == 0 { min.x } else { max.x },
                        if i & 2 == 0 { min.y } else { max.y },
                        if i & 4 == 0 { min.z } else { max.z },
                    )
                };
                for i in 0..8 {
                    for bit in [1, 2, 4] {
                        if i & bit == 0 {
                            pen.line(corner(i), corner(i | bit));
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

/// Draws hitbox space lines into the context.
struct Pen<'c> {
    context: &'c mut LineRenderContext,
    matrix: Mat4,
    color: Color,
}

impl Pen<'_> {
    fn line(&mut self, start: Vec3, end: Vec3) {
        let start = self.matrix.transform_point3(start);
        let end = self.matrix.transform_point3(end);
        self.context.line(start, end, self.color);
    }

    /// Arc around `center` in the plane spanned by `u` and `v`, from `u` towards `v`.
    fn arc(&mut self, center: Vec3, u: Vec3, v: Vec3, radius: f32, from: f32, to: f32) {
        let segments = ((to - from).abs() / TAU * CIRCLE_SEGMENTS as f32).ceil() as usize;
        let segments = segments.max(1);
        let point = |angle: f32| center + (u * angle.cos() + v * angle.sin()) * radius;
        let mut previous = point(from);
        for i in 1..=segments {
            let next = point(from + (to - from) * i as f32 / segments as f32);
            self.line(previous, next);
            previous = next;
        }
    }
}
