// Copyright © 2025
// Author: Nocthir <nocthir@proton.me>
// SPDX-License-Identifier: MIT or Apache-2.0

use bevy::prelude::*;

use crate::hitbox::binding::BoneRef;

/// Keep only the translation of an affine transform.
pub fn reduce_to_translation(matrix: &Mat4) -> Mat4 {
    let (_scale, _rotation, translation) = matrix.to_scale_rotation_translation();
    Mat4::from_translation(translation)
}

/// Transform a hitbox should take for the current frame. `bones` must cover every resolved index.
pub(crate) fn resolve_transform(bone: BoneRef, translation_only: bool, bones: &[Mat4]) -> Mat4 {
    let target = match bone {
        BoneRef::Resolved(index) => bones[index],
        BoneRef::Unbound => Mat4::IDENTITY,
    };
    if translation_only {
        reduce_to_translation(&target)
    } else {
        target
    }
}

#[cfg(test)]
mod test {
    use std::f32::consts::FRAC_PI_4;

    use super::*;

    #[test]
    fn translation_only_discards_rotation_and_scale() {
        let input = Mat4::from_scale_rotation_translation(
            Vec3::new(2.0, 0.5, 3.0),
            Quat::from_rotation_y(FRAC_PI_4) * Quat::from_rotation_x(0.3),
            Vec3::new(1.0, -2.0, 4.0),
        );
        let result = reduce_to_translation(&input);

        let (_, _, input_translation) = input.to_scale_rotation_translation();
        let (scale, rotation, translation) = result.to_scale_rotation_translation();
        assert!(scale.abs_diff_eq(Vec3::ONE, 1e-6));
        assert!(rotation.abs_diff_eq(Quat::IDENTITY, 1e-6));
        assert!(translation.abs_diff_eq(input_translation, 1e-5));
        assert!(translation.abs_diff_eq(Vec3::new(1.0, -2.0, 4.0), 1e-5));
    }

    #[test]
    fn unbound_resolves_to_identity() {
        let bones = [Mat4::from_translation(Vec3::splat(5.0))];
        assert_eq!(resolve_transform(BoneRef::Unbound, false, &bones), Mat4::IDENTITY);
        assert_eq!(resolve_transform(BoneRef::Unbound, true, &bones), Mat4::IDENTITY);
        assert_eq!(resolve_transform(BoneRef::Unbound, false, &[]), Mat4::IDENTITY);
    }

    #[test]
    fn resolved_bone_is_used_verbatim() {
        let bone = Mat4::from_rotation_z(1.0) * Mat4::from_translation(Vec3::Y);
        let bones = [Mat4::IDENTITY, bone];
        assert_eq!(resolve_transform(BoneRef::Resolved(1), false, &bones), bone);
    }
}
