// Copyright © 2025
// Author: Nocthir <nocthir@proton.me>
// SPDX-License-Identifier: MIT or Apache-2.0

use std::{collections::HashMap, hint::black_box};

use bevy::prelude::*;
use criterion::{Criterion, criterion_group, criterion_main};
use hitbox_rs::hitbox::*;

const BONE_COUNT: usize = 96;
const HITBOX_COUNT: usize = 32;

struct WavingBones;

impl BoneMatrixSource for WavingBones {
    fn bone_count(&self) -> usize {
        BONE_COUNT
    }

    fn bone_matrices(&self, out: &mut [Mat4]) -> anyhow::Result<()> {
        for (i, matrix) in out.iter_mut().enumerate() {
            *matrix = Mat4::from_rotation_translation(
                Quat::from_rotation_z(i as f32 * 0.1),
                Vec3::new(0.0, i as f32, 0.0),
            );
        }
        Ok(())
    }
}

fn bone_names() -> Vec<String> {
    (0..BONE_COUNT).map(|i| format!("Bone_{i:02}")).collect()
}

fn hitbox_sets() -> HashMap<String, Vec<HitboxDefinition>> {
    let hitboxes = (0..HITBOX_COUNT)
        .map(|i| {
            HitboxDefinition::new(
                format!("hitbox_{i}"),
                HitboxShape::Capsule {
                    start: Vec3::ZERO,
                    end: Vec3::Y,
                    radius: 0.2,
                },
            )
            .with_bone(format!("bone_{:02}", i * 3))
            .with_translation_only(i % 2 == 0)
        })
        .collect();
    HashMap::from([("default".to_string(), hitboxes)])
}

fn bench_bind(c: &mut Criterion) {
    let names = bone_names();
    c.bench_function("bind_hitbox_sets", |b| {
        b.iter(|| {
            let node = HitboxSetNode::new(
                black_box(&names),
                hitbox_sets(),
                &mut GizmoHitbox::from_definition,
            );
            black_box(node.bone_count())
        })
    });
}

fn bench_update(c: &mut Criterion) {
    let mut node = HitboxSetNode::new(bone_names(), hitbox_sets(), &mut GizmoHitbox::from_definition);
    if let Err(e) = node.select_set(Some("default")) {
        println!("[BENCH] select_set error: {e}");
        return;
    }
    let mut pool = BoneMatrixPool::new();
    c.bench_function("update_hitbox_set", |b| {
        b.iter(|| {
            let result = node.update(&mut FrameContext {
                animation: Some(black_box(&WavingBones)),
                pool: &mut pool,
            });
            if let Err(ref e) = result {
                println!("[BENCH] update error: {e}");
            }
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let mut node = HitboxSetNode::new(bone_names(), hitbox_sets(), &mut GizmoHitbox::from_definition);
    if let Err(e) = node.select_set(Some("default")) {
        println!("[BENCH] select_set error: {e}");
        return;
    }
    let mut context = LineRenderContext::default();
    c.bench_function("render_hitbox_set", |b| {
        b.iter(|| {
            context.clear();
            let result = node.render(black_box(&mut context));
            if let Err(ref e) = result {
                println!("[BENCH] render error: {e}");
            }
        })
    });
}

criterion_group!(benches, bench_bind, bench_update, bench_render);
criterion_main!(benches);
