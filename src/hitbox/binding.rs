// Copyright © 2025
// Author: Nocthir <nocthir@proton.me>
// SPDX-License-Identifier: MIT or Apache-2.0

use std::collections::HashMap;

use bevy::prelude::*;

use crate::hitbox::{
    backend::{HitboxPrimitive, PrimitiveFactory},
    definition::HitboxDefinition,
};

/// Bone a hitbox follows, resolved once at bind time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum BoneRef {
    Resolved(usize),
    /// No bone, or a bone the skeleton does not have: the hitbox stays at the model origin.
    Unbound,
}

/// Case-insensitive bone name to index lookup.
#[derive(Debug, Default, Clone)]
pub struct BoneLookup {
    indices: HashMap<String, usize>,
    bone_count: usize,
}

impl BoneLookup {
    pub fn new<I, S>(bone_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lookup = Self::default();
        for (index, name) in bone_names.into_iter().enumerate() {
            let key = name.as_ref().to_lowercase();
            // Last bone wins when two names only differ by case.
            if let Some(previous) = lookup.indices.insert(key, index) {
                debug!(
                    "Bone name {} collides with bone {previous}, using bone {index}",
                    name.as_ref()
                );
            }
            lookup.bone_count = index + 1;
        }
        lookup
    }

    pub fn bone_count(&self) -> usize {
        self.bone_count
    }

    pub fn resolve(&self, bone_name: Option<&str>) -> BoneRef {
        let Some(bone_name) = bone_name.filter(|name| !name.is_empty()) else {
            return BoneRef::Unbound;
        };
        match self.indices.get(&bone_name.to_lowercase()) {
            Some(&index) => BoneRef::Resolved(index),
            None => {
                debug!("Bone {bone_name} not found in skeleton, using identity");
                BoneRef::Unbound
            }
        }
    }
}

pub struct BoundHitbox<P> {
    pub bone: BoneRef,
    pub primitive: P,
}

/// Hitboxes of a named set with their resolved bones. The bone table never changes
/// once built; only the primitives' transforms are rewritten every frame.
pub struct HitboxSetBinding<P> {
    name: String,
    definitions: Vec<HitboxDefinition>,
    hitboxes: Vec<BoundHitbox<P>>,
}

impl<P: HitboxPrimitive> HitboxSetBinding<P> {
    pub fn new<F>(
        name: impl Into<String>,
        definitions: Vec<HitboxDefinition>,
        lookup: &BoneLookup,
        factory: &mut F,
    ) -> Self
    where
        F: PrimitiveFactory<Primitive = P>,
    {
        let hitboxes = definitions
            .iter()
            .map(|definition| BoundHitbox {
                bone: lookup.resolve(definition.bone()),
                primitive: factory.create_primitive(definition),
            })
            .collect();
        Self {
            name: name.into(),
            definitions,
            hitboxes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn definitions(&self) -> &[HitboxDefinition] {
        &self.definitions
    }

    pub fn hitboxes(&self) -> &[BoundHitbox<P>] {
        &self.hitboxes
    }

    pub fn len(&self) -> usize {
        self.hitboxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hitboxes.is_empty()
    }

    /// Highest bone index referenced by this set.
    pub fn max_bone_index(&self) -> Option<usize> {
        self.hitboxes
            .iter()
            .filter_map(|hitbox| match hitbox.bone {
                BoneRef::Resolved(index) => Some(index),
                BoneRef::Unbound => None,
            })
            .max()
    }

    /// Definitions paired with their bound hitboxes, in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&HitboxDefinition, &BoundHitbox<P>)> {
        self.definitions.iter().zip(self.hitboxes.iter())
    }

    pub(crate) fn iter_mut(
        &mut self,
    ) -> impl Iterator<Item = (&HitboxDefinition, &mut BoundHitbox<P>)> {
        self.definitions.iter().zip(self.hitboxes.iter_mut())
    }
}

/// Bind every named set against the skeleton.
pub fn bind_hitbox_sets<I, S, F>(
    bone_names: I,
    sets: HashMap<String, Vec<HitboxDefinition>>,
    factory: &mut F,
) -> (BoneLookup, HashMap<String, HitboxSetBinding<F::Primitive>>)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    F: PrimitiveFactory,
{
    let lookup = BoneLookup::new(bone_names);
    let bindings = sets
        .into_iter()
        .map(|(name, definitions)| {
            let binding = HitboxSetBinding::new(name.clone(), definitions, &lookup, factory);
            let unbound = binding
                .hitboxes()
                .iter()
                .filter(|hitbox| hitbox.bone == BoneRef::Unbound)
                .count();
            debug!(
                "Bound hitbox set {name}: {} hitboxes, {unbound} at origin",
                binding.len()
            );
            (name, binding)
        })
        .collect();
    (lookup, bindings)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::hitbox::{definition::HitboxShape, test::TestPrimitive};

    fn sphere(bone: Option<&str>) -> HitboxDefinition {
        let definition = HitboxDefinition::new(
            "hitbox",
            HitboxShape::Sphere {
                center: Vec3::ZERO,
                radius: 1.0,
            },
        );
        match bone {
            Some(bone) => definition.with_bone(bone),
            None => definition,
        }
    }

    #[test]
    fn bone_names_are_case_insensitive() {
        let lookup = BoneLookup::new(["Root", "Bone_Head"]);
        assert_eq!(lookup.resolve(Some("Bone_Head")), BoneRef::Resolved(1));
        assert_eq!(lookup.resolve(Some("bone_head")), BoneRef::Resolved(1));
        assert_eq!(lookup.resolve(Some("BONE_HEAD")), BoneRef::Resolved(1));
        assert_eq!(lookup.bone_count(), 2);
    }

    #[test]
    fn missing_bones_are_unbound() {
        let lookup = BoneLookup::new(["Root"]);
        assert_eq!(lookup.resolve(None), BoneRef::Unbound);
        assert_eq!(lookup.resolve(Some("")), BoneRef::Unbound);
        assert_eq!(lookup.resolve(Some("Tail")), BoneRef::Unbound);
    }

    #[test]
    fn last_duplicate_wins() {
        let lookup = BoneLookup::new(["hand", "Hand"]);
        assert_eq!(lookup.resolve(Some("HAND")), BoneRef::Resolved(1));
    }

    #[test]
    fn one_primitive_per_definition() {
        let mut created = 0;
        let mut factory = |_: &HitboxDefinition| {
            created += 1;
            TestPrimitive::default()
        };
        let sets = HashMap::from([
            (
                "default".to_string(),
                vec![sphere(Some("root")), sphere(None), sphere(Some("nope"))],
            ),
            ("empty".to_string(), Vec::new()),
        ]);
        let (lookup, bindings) = bind_hitbox_sets(["Root"], sets, &mut factory);
        assert_eq!(created, 3);
        assert_eq!(lookup.bone_count(), 1);

        let default = &bindings["default"];
        let bones: Vec<_> = default.hitboxes().iter().map(|h| h.bone).collect();
        assert_eq!(
            bones,
            [BoneRef::Resolved(0), BoneRef::Unbound, BoneRef::Unbound]
        );
        assert_eq!(default.max_bone_index(), Some(0));
        assert!(bindings["empty"].is_empty());
        assert_eq!(bindings["empty"].max_bone_index(), None);
    }
}
