//! Decomposition of affine transforms into translation, rotation and scale.
//!
//! Transforms are column-major `DMat4`s as used by `glam` and by 3D Tiles
//! `transform` arrays. Decomposition assumes the upper 3x3 block is a rotation
//! times a non-negative per-axis scale. Shear, mirroring (negative
//! determinant) and zero-length axes are not detected; decomposing such a
//! matrix yields an arbitrary rotation or NaN, and recomposition will not
//! reproduce it.

use glam::{DMat3, DMat4, DQuat, DVec3};

/// The components of an affine transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decomposition {
    /// Translation (the fourth column).
    pub translation: DVec3,
    /// Unit rotation.
    pub rotation: DQuat,
    /// Per-axis scale (lengths of the first three columns).
    pub scale: DVec3,
}

impl Decomposition {
    /// Recompose into a matrix, applying scale, then rotation, then translation.
    #[must_use]
    pub fn to_matrix(&self) -> DMat4 {
        compose(self.translation, self.rotation, self.scale)
    }
}

/// Translation component of `transform`.
#[must_use]
pub fn translation_of(transform: &DMat4) -> DVec3 {
    transform.w_axis.truncate()
}

/// World-space position of the local origin under `transform`.
///
/// For affine matrices this equals [`translation_of`].
#[must_use]
pub fn origin_of(transform: &DMat4) -> DVec3 {
    transform.transform_point3(DVec3::ZERO)
}

/// Per-axis scale of `transform`.
#[must_use]
pub fn scale_of(transform: &DMat4) -> DVec3 {
    DVec3::new(
        transform.x_axis.truncate().length(),
        transform.y_axis.truncate().length(),
        transform.z_axis.truncate().length(),
    )
}

/// Rotation part of `transform` with the scale divided out.
#[must_use]
pub fn rotation_matrix_of(transform: &DMat4) -> DMat3 {
    let scale = scale_of(transform);
    DMat3::from_cols(
        transform.x_axis.truncate() / scale.x,
        transform.y_axis.truncate() / scale.y,
        transform.z_axis.truncate() / scale.z,
    )
}

/// Split `transform` into translation, rotation and scale.
#[must_use]
pub fn decompose(transform: &DMat4) -> Decomposition {
    Decomposition {
        translation: translation_of(transform),
        rotation: DQuat::from_mat3(&rotation_matrix_of(transform)),
        scale: scale_of(transform),
    }
}

/// Build a transform that scales, then rotates, then translates.
#[must_use]
pub fn compose(translation: DVec3, rotation: DQuat, scale: DVec3) -> DMat4 {
    DMat4::from_scale_rotation_translation(scale, rotation, translation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample_transform() -> DMat4 {
        compose(
            DVec3::new(4_100_000.0, 650_000.0, 4_800_000.0),
            DQuat::from_euler(glam::EulerRot::ZYX, 0.3, -1.1, 2.0),
            DVec3::new(2.0, 0.5, 3.0),
        )
    }

    #[test]
    fn test_identity() {
        let d = decompose(&DMat4::IDENTITY);
        assert_eq!(d.translation, DVec3::ZERO);
        assert_eq!(d.scale, DVec3::ONE);
        assert!(d.rotation.abs_diff_eq(DQuat::IDENTITY, 1e-15));
    }

    #[test]
    fn test_components() {
        let rotation = DQuat::from_euler(glam::EulerRot::ZYX, 0.3, -1.1, 2.0);
        let d = decompose(&sample_transform());
        assert_eq!(d.translation, DVec3::new(4_100_000.0, 650_000.0, 4_800_000.0));
        assert!(d.scale.abs_diff_eq(DVec3::new(2.0, 0.5, 3.0), 1e-12));
        // q and -q describe the same rotation.
        assert!((d.rotation.dot(rotation).abs() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_compose_decompose_reconstructs() {
        let t = sample_transform();
        let rebuilt = decompose(&t).to_matrix();
        assert!(rebuilt.abs_diff_eq(t, 1e-8));
    }

    #[test]
    fn test_origin_matches_translation() {
        let t = sample_transform();
        assert_eq!(origin_of(&t), translation_of(&t));
    }

    #[test]
    fn test_rotation_matrix_is_orthonormal() {
        let r = rotation_matrix_of(&sample_transform());
        assert!((r * r.transpose()).abs_diff_eq(DMat3::IDENTITY, 1e-12));
        assert!((r.determinant() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_scale_is_nan() {
        let flat = DMat4::from_scale(DVec3::new(1.0, 0.0, 1.0));
        assert!(rotation_matrix_of(&flat).is_nan());
    }

    proptest! {
        #[test]
        fn prop_decomposition_is_stable(
            x in -1e7f64..1e7,
            y in -1e7f64..1e7,
            z in -1e7f64..1e7,
            yaw in -3.1f64..3.1,
            pitch in -1.5f64..1.5,
            roll in -3.1f64..3.1,
            scale in 0.01f64..100.0,
        ) {
            let t = compose(
                DVec3::new(x, y, z),
                DQuat::from_euler(glam::EulerRot::ZYX, yaw, pitch, roll),
                DVec3::splat(scale),
            );
            let rebuilt = decompose(&t).to_matrix();
            prop_assert!(rebuilt.abs_diff_eq(t, 1e-6));
        }
    }
}
