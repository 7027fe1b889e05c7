// Copyright © 2025
// Author: Nocthir <nocthir@proton.me>
// SPDX-License-Identifier: MIT or Apache-2.0

use bevy::prelude::*;
use bevy_egui::*;

use crate::{hitbox::HitboxOverlay, settings::HitboxSettings};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(EguiPrimaryContextPass, hitbox_set_ui);
    }
}

fn hitbox_set_ui(
    mut contexts: EguiContexts,
    mut settings: ResMut<HitboxSettings>,
    overlays: Query<(Entity, Option<&Name>, &HitboxOverlay)>,
) -> Result {
    let mut selected = settings.selected_set.clone();

    egui::Window::new("Hitboxes")
        .resizable(false)
        .anchor(egui::Align2::RIGHT_TOP, [-8.0, 8.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.radio_value(&mut selected, None, "None");
            for (entity, name, overlay) in &overlays {
                ui.separator();
                match name {
                    Some(name) => ui.label(name.as_str()),
                    None => ui.label(entity.to_string()),
                };
                for set in overlay.node.set_names() {
                    let count = overlay.node.binding(set).map_or(0, |binding| binding.len());
                    ui.radio_value(&mut selected, Some(set.to_string()), format!("{set} ({count})"));
                }
                if let Some(binding) = overlay.node.active_binding() {
                    egui::CollapsingHeader::new(binding.name())
                        .id_salt(entity)
                        .default_open(false)
                        .show(ui, |ui| {
                            for (definition, hitbox) in binding.iter() {
                                ui.label(format!("{definition}: {:?}", hitbox.bone));
                            }
                        });
                }
            }
        });

    // Only write when the selection changed, so the overlays are not reselected every frame.
    if selected != settings.selected_set {
        info!("Hitbox set selected: {}", selected.as_deref().unwrap_or("none"));
        settings.selected_set = selected;
    }
    Ok(())
}
