// Copyright © 2025
// Author: Nocthir <nocthir@proton.me>
// SPDX-License-Identifier: MIT or Apache-2.0

//! Debug hitboxes attached to skeleton bones.
//!
//! Hitbox sets are bound to a skeleton once: every hitbox resolves its bone name to a
//! bone index (or to nothing, in which case it stays at the model origin). Each frame
//! the active set is moved to the current bone matrices and drawn as an overlay.

pub mod backend;
pub mod binding;
pub mod definition;
pub mod error;
pub mod gizmo;
pub mod loader;
pub mod node;
pub mod pool;
pub mod skeleton;
pub mod transform;

pub use backend::*;
pub use binding::*;
pub use definition::*;
pub use error::HitboxError;
pub use gizmo::*;
pub use node::*;
pub use pool::*;
pub use skeleton::*;

use std::collections::HashMap;

use bevy::prelude::*;

use crate::settings::HitboxSettings;

pub struct HitboxPlugin;

impl Plugin for HitboxPlugin {
    fn build(&self, app: &mut App) {
        app.init_gizmo_group::<HitboxGizmos>()
            .register_type::<HitboxSettings>()
            .init_resource::<HitboxSettings>()
            .init_resource::<BoneMatrixPool>()
            .init_resource::<LineRenderContext>()
            .add_systems(Startup, configure_hitbox_gizmos)
            .add_systems(PostUpdate, flush_hitbox_lines.after(HitboxSystems));
        add_overlay_systems(app);
    }
}

/// Binds, updates and renders hitbox overlays once joint transforms are propagated.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct HitboxSystems;

fn add_overlay_systems(app: &mut App) -> &mut App {
    app.configure_sets(PostUpdate, HitboxSystems.after(TransformSystems::Propagate))
        .add_systems(
            PostUpdate,
            (
                bind_hitbox_overlays,
                apply_hitbox_selection,
                update_hitbox_overlays,
                render_hitbox_overlays,
            )
                .chain()
                .in_set(HitboxSystems),
        )
}

/// Hitbox sets waiting to be bound to the [`HitboxSkeleton`] of the same entity.
#[derive(Component, Debug, Clone, Default)]
pub struct HitboxSetSource {
    pub sets: HashMap<String, Vec<HitboxDefinition>>,
}

/// Bound hitbox sets of a model, drawn with gizmos.
#[derive(Component)]
pub struct HitboxOverlay {
    pub node: HitboxSetNode<GizmoHitbox>,
}

fn bind_hitbox_overlays(
    mut commands: Commands,
    sources: Query<(Entity, &HitboxSkeleton, &HitboxSetSource), Without<HitboxOverlay>>,
    names: Query<&Name>,
    settings: Res<HitboxSettings>,
) {
    for (entity, skeleton, source) in &sources {
        let bone_names: Vec<&str> = skeleton
            .joints
            .iter()
            .map(|joint| names.get(*joint).map(Name::as_str).unwrap_or_default())
            .collect();
        let mut node = HitboxSetNode::new(
            bone_names,
            source.sets.clone(),
            &mut GizmoHitbox::from_definition,
        );

        if let Some(set) = settings.selected_set.as_deref()
            && node.binding(set).is_some()
            && let Err(err) = node.select_set(Some(set))
        {
            error!("Failed to select hitbox set {set}: {err}");
        }

        info!(
            "Bound {} hitbox sets to {} bones of {entity}",
            source.sets.len(),
            node.bone_count()
        );
        commands
            .entity(entity)
            .remove::<HitboxSetSource>()
            .insert(HitboxOverlay { node });
    }
}

fn apply_hitbox_selection(
    settings: Res<HitboxSettings>,
    mut overlays: Query<(Entity, &mut HitboxOverlay)>,
) {
    if !settings.is_changed() {
        return;
    }

    for (entity, mut overlay) in &mut overlays {
        // Models that do not have the selected set show nothing.
        let set = settings
            .selected_set
            .as_deref()
            .filter(|set| overlay.node.binding(set).is_some());
        match overlay.node.select_set(set) {
            Ok(()) => debug!("Hitbox set of {entity}: {}", set.unwrap_or("none")),
            Err(err) => error!("Failed to select hitbox set for {entity}: {err}"),
        }
    }
}

fn update_hitbox_overlays(
    mut overlays: Query<(Entity, &mut HitboxOverlay, &HitboxSkeleton, &GlobalTransform)>,
    joints: Query<&GlobalTransform>,
    mut pool: ResMut<BoneMatrixPool>,
) {
    for (entity, mut overlay, skeleton, root) in &mut overlays {
        let animation = JointMatrixSource::new(&skeleton.joints, root, |joint| {
            joints.get(joint).ok().copied()
        });
        let mut frame = FrameContext {
            animation: Some(&animation),
            pool: &mut pool,
        };
        if let Err(err) = overlay.node.update(&mut frame) {
            error!("Failed to update hitboxes of {entity}: {err}");
        }
    }
}

fn render_hitbox_overlays(
    overlays: Query<(Entity, &HitboxOverlay, &GlobalTransform)>,
    mut context: ResMut<LineRenderContext>,
) {
    for (entity, overlay, root) in &overlays {
        context.begin(RenderPass::Translucent, root.affine().into());
        if let Err(err) = overlay.node.render(&mut context) {
            error!("Failed to draw hitboxes of {entity}: {err}");
        }
    }
}
