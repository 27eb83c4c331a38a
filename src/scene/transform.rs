use glam::{Affine3A, EulerRot, Mat4, Quat, Vec3};

/// Converts Euler angles in degrees to a quaternion.
///
/// Rotation order is X first, then Y, then Z (the matrix is `Rz * Ry * Rx`),
/// which is the default order of DCC pivot chains.
#[inline]
#[must_use]
pub fn euler_degrees_to_quat(degrees: Vec3) -> Quat {
    Quat::from_euler(
        EulerRot::ZYX,
        degrees.z.to_radians(),
        degrees.y.to_radians(),
        degrees.x.to_radians(),
    )
}

/// Inverse of [`euler_degrees_to_quat`].
#[inline]
#[must_use]
pub fn quat_to_euler_degrees(rotation: Quat) -> Vec3 {
    let (z, y, x) = rotation.to_euler(EulerRot::ZYX);
    Vec3::new(x.to_degrees(), y.to_degrees(), z.to_degrees())
}

/// Resolved local transform of a node.
///
/// Rotation is kept as Euler angles in degrees, the representation the
/// pivot chain is authored in. Use [`Transform::rotation_quat`] for the
/// quaternion form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    /// Euler angles, in degrees
    pub rotation: Vec3,
    pub scaling: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scaling: Vec3::ONE,
    };

    #[must_use]
    pub fn new() -> Self {
        Self::IDENTITY
    }

    #[inline]
    #[must_use]
    pub fn rotation_quat(&self) -> Quat {
        euler_degrees_to_quat(self.rotation)
    }

    /// Sets the rotation from a quaternion, storing it as Euler degrees.
    pub fn set_rotation_quat(&mut self, rotation: Quat) {
        self.rotation = quat_to_euler_degrees(rotation);
    }

    /// Local matrix `T * R * S`.
    #[must_use]
    pub fn local_matrix(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(
            self.scaling,
            self.rotation_quat(),
            self.translation,
        )
    }

    #[inline]
    #[must_use]
    pub fn local_matrix_as_mat4(&self) -> Mat4 {
        Mat4::from(self.local_matrix())
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
