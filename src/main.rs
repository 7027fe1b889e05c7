// Copyright © 2025
// Author: Nocthir <nocthir@proton.me>
// SPDX-License-Identifier: MIT or Apache-2.0

use bevy::{diagnostic, prelude::*};

use hitbox_rs::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(diagnostic::FrameTimeDiagnosticsPlugin::default())
        .add_plugins(bevy_egui::EguiPlugin::default())
        .add_plugins(bevy_inspector_egui::quick::WorldInspectorPlugin::default())
        .add_plugins(hitbox::HitboxPlugin)
        .add_plugins(ui::UiPlugin)
        .add_plugins(demo::DemoPlugin)
        .run();
}
