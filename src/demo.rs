// Copyright © 2025
// Author: Nocthir <nocthir@proton.me>
// SPDX-License-Identifier: MIT or Apache-2.0

//! A small animated skeleton to look at hitboxes without any asset.

use bevy::prelude::*;

use crate::{
    camera,
    hitbox::{
        HitboxDefinition, HitboxSetSource, HitboxShape, HitboxSkeleton,
        loader::{self, HitboxSets},
    },
    settings::{HitboxSettings, Settings},
};

pub struct DemoPlugin;

impl Plugin for DemoPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (camera::setup_camera, spawn_demo_model))
            .add_systems(Update, (animate_demo_skeleton, draw_demo_bones));
    }
}

#[derive(Component)]
struct DemoJoint;

fn spawn_demo_model(mut commands: Commands, mut hitbox_settings: ResMut<HitboxSettings>) {
    let settings = Settings::load().unwrap_or_else(|err| {
        warn!("Using default settings: {err}");
        Settings::default()
    });
    *hitbox_settings = HitboxSettings::from(&settings);

    let sets = if settings.hitbox_path.is_empty() {
        demo_hitbox_sets()
    } else {
        loader::load_hitbox_sets(&settings.hitbox_path).unwrap_or_else(|err| {
            error!("Failed to load hitboxes from {}: {err}", settings.hitbox_path);
            demo_hitbox_sets()
        })
    };

    let model = commands
        .spawn((Name::new("Demo model"), Transform::default(), Visibility::default()))
        .id();
    let mut parent = model;
    let mut joints = Vec::new();
    for (name, offset) in [
        ("Root", Vec3::ZERO),
        ("Spine", Vec3::new(0.0, 1.0, 0.0)),
        ("Head", Vec3::new(0.0, 0.8, 0.0)),
    ] {
        parent = commands
            .spawn((
                DemoJoint,
                Name::new(name),
                Transform::from_translation(offset),
                ChildOf(parent),
            ))
            .id();
        joints.push(parent);
    }

    commands
        .entity(model)
        .insert((HitboxSkeleton { joints }, HitboxSetSource { sets }));
}

fn demo_hitbox_sets() -> HitboxSets {
    let body = vec![
        HitboxDefinition::new(
            "pelvis",
            HitboxShape::Box {
                min: Vec3::new(-0.3, -0.1, -0.2),
                max: Vec3::new(0.3, 0.3, 0.2),
            },
        )
        .with_bone("Root")
        .with_tint([255, 200, 0, 255]),
        HitboxDefinition::new(
            "chest",
            HitboxShape::Capsule {
                start: Vec3::ZERO,
                end: Vec3::new(0.0, 0.7, 0.0),
                radius: 0.3,
            },
        )
        .with_bone("spine")
        .with_tint([0, 200, 255, 255]),
        HitboxDefinition::new(
            "head",
            HitboxShape::Sphere {
                center: Vec3::new(0.0, 0.2, 0.0),
                radius: 0.25,
            },
        )
        .with_bone("HEAD")
        .with_translation_only(true)
        .with_tint([255, 60, 60, 255]),
    ];
    let unbound = vec![
        HitboxDefinition::new(
            "origin",
            HitboxShape::Sphere {
                center: Vec3::ZERO,
                radius: 0.1,
            },
        ),
        HitboxDefinition::new(
            "tail",
            HitboxShape::Capsule {
                start: Vec3::ZERO,
                end: Vec3::new(0.0, 0.0, -0.6),
                radius: 0.08,
            },
        )
        .with_bone("Tail"),
    ];
    HitboxSets::from([
        ("default".to_string(), body),
        ("unbound".to_string(), unbound),
    ])
}

fn animate_demo_skeleton(time: Res<Time>, mut joints: Query<(&Name, &mut Transform), With<DemoJoint>>) {
    let t = time.elapsed_secs();
    for (name, mut transform) in &mut joints {
        match name.as_str() {
            "Spine" => transform.rotation = Quat::from_rotation_z(t.sin() * 0.5),
            "Head" => transform.rotation = Quat::from_rotation_y(t * 1.5),
            _ => {}
        }
    }
}

fn draw_demo_bones(
    mut gizmos: Gizmos,
    joints: Query<(&GlobalTransform, &ChildOf), With<DemoJoint>>,
    parents: Query<&GlobalTransform, With<DemoJoint>>,
) {
    for (global, child_of) in &joints {
        if let Ok(parent) = parents.get(child_of.parent()) {
            gizmos.line(
                parent.translation(),
                global.translation(),
                Color::srgb(0.6, 0.6, 0.6),
            );
        }
    }
}
