//! Transform Resolver
//!
//! Collapses a node's composite pivot chain into a flat
//! translation / rotation / scaling triple, and computes the bind-pose
//! offset matrix of a skin cluster.
//!
//! A source node exposes its local transform as a chain of primitives:
//!
//! ```text
//! T * Roff * Rp * R' * Rp^-1 * Soff * Sp * S * Sp^-1
//! ```
//!
//! where `R'` is the summed rotation `pre + rotation + post`. The flat
//! form keeps translation, `R'` and scaling, each clamped by the node's
//! per-axis limits. [`PivotChain::local_matrix`] evaluates the full chain
//! with the same clamped values for callers that need offsets and pivots
//! honoured.

use glam::{BVec3, Mat4, Vec3};

use crate::scene::transform::{Transform, euler_degrees_to_quat};

// ============================================================================
// Axis Limits
// ============================================================================

/// Per-axis min/max limits with independent activation flags.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisLimits {
    pub min: Vec3,
    pub max: Vec3,
    pub min_active: BVec3,
    pub max_active: BVec3,
}

impl AxisLimits {
    /// Limits with every axis inactive.
    pub const NONE: Self = Self {
        min: Vec3::ZERO,
        max: Vec3::ZERO,
        min_active: BVec3::FALSE,
        max_active: BVec3::FALSE,
    };

    /// Limits active on every axis, on both ends.
    #[must_use]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min,
            max,
            min_active: BVec3::TRUE,
            max_active: BVec3::TRUE,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.min_active.any() || self.max_active.any()
    }

    /// Clamps each axis independently. Inactive ends leave the axis free.
    #[must_use]
    pub fn clamp(&self, value: Vec3) -> Vec3 {
        let mut out = value.to_array();
        let min = self.min.to_array();
        let max = self.max.to_array();
        let min_active = [self.min_active.x, self.min_active.y, self.min_active.z];
        let max_active = [self.max_active.x, self.max_active.y, self.max_active.z];

        for axis in 0..3 {
            if min_active[axis] && out[axis] < min[axis] {
                out[axis] = min[axis];
            }
            if max_active[axis] && out[axis] > max[axis] {
                out[axis] = max[axis];
            }
        }
        Vec3::from_array(out)
    }
}

impl Default for AxisLimits {
    fn default() -> Self {
        Self::NONE
    }
}

// ============================================================================
// Pivot Chain
// ============================================================================

/// Raw transform primitives of a source node. Rotations are Euler degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotChain {
    pub translation: Vec3,
    pub rotation_offset: Vec3,
    pub rotation_pivot: Vec3,
    pub pre_rotation: Vec3,
    pub rotation: Vec3,
    /// Missing post-rotation is the zero rotation
    pub post_rotation: Option<Vec3>,
    pub scaling_offset: Vec3,
    pub scaling_pivot: Vec3,
    pub scaling: Vec3,

    // === Geometric (non-animated, not inherited) transform ===
    pub geometric_translation: Vec3,
    pub geometric_rotation: Vec3,
    pub geometric_scaling: Vec3,

    // === Limits ===
    pub translation_limits: AxisLimits,
    pub rotation_limits: AxisLimits,
    pub scaling_limits: AxisLimits,
}

impl Default for PivotChain {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation_offset: Vec3::ZERO,
            rotation_pivot: Vec3::ZERO,
            pre_rotation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            post_rotation: None,
            scaling_offset: Vec3::ZERO,
            scaling_pivot: Vec3::ZERO,
            scaling: Vec3::ONE,
            geometric_translation: Vec3::ZERO,
            geometric_rotation: Vec3::ZERO,
            geometric_scaling: Vec3::ONE,
            translation_limits: AxisLimits::NONE,
            rotation_limits: AxisLimits::NONE,
            scaling_limits: AxisLimits::NONE,
        }
    }
}

impl PivotChain {
    /// Chain holding only a plain TRS.
    #[must_use]
    pub fn from_trs(translation: Vec3, rotation: Vec3, scaling: Vec3) -> Self {
        Self {
            translation,
            rotation,
            scaling,
            ..Self::default()
        }
    }

    /// Resolves the flat local transform.
    ///
    /// `unit_scale` converts source lengths into output units and applies to
    /// the translation only.
    #[must_use]
    pub fn resolve(&self, unit_scale: f32) -> Transform {
        Transform {
            translation: self.resolve_translation(self.translation, unit_scale),
            rotation: self.resolve_rotation(self.rotation),
            scaling: self.resolve_scaling(self.scaling),
        }
    }

    /// `clamp(pre + rotation + post)`, per axis.
    ///
    /// Used for the static rotation as well as for every animated frame.
    #[must_use]
    pub fn resolve_rotation(&self, rotation: Vec3) -> Vec3 {
        let post = self.post_rotation.unwrap_or(Vec3::ZERO);
        self.rotation_limits
            .clamp(self.pre_rotation + rotation + post)
    }

    #[must_use]
    pub fn resolve_translation(&self, translation: Vec3, unit_scale: f32) -> Vec3 {
        self.translation_limits.clamp(translation) * unit_scale
    }

    #[must_use]
    pub fn resolve_scaling(&self, scaling: Vec3) -> Vec3 {
        self.scaling_limits.clamp(scaling)
    }

    /// Evaluates the full pivot chain, offsets and pivots included, in
    /// source units.
    ///
    /// The rotation term is [`resolve_rotation`](Self::resolve_rotation), so
    /// with zero offsets and pivots this equals `resolve(1.0)` as a matrix.
    #[must_use]
    pub fn local_matrix(&self) -> Mat4 {
        let translation = self.resolve_translation(self.translation, 1.0);
        let rotation = self.resolve_rotation(self.rotation);
        let scaling = self.resolve_scaling(self.scaling);

        Mat4::from_translation(translation)
            * Mat4::from_translation(self.rotation_offset)
            * Mat4::from_translation(self.rotation_pivot)
            * Mat4::from_quat(euler_degrees_to_quat(rotation))
            * Mat4::from_translation(-self.rotation_pivot)
            * Mat4::from_translation(self.scaling_offset)
            * Mat4::from_translation(self.scaling_pivot)
            * Mat4::from_scale(scaling)
            * Mat4::from_translation(-self.scaling_pivot)
    }

    /// Geometric transform of the node, applied to its attached geometry
    /// only.
    #[must_use]
    pub fn geometric_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.geometric_scaling,
            euler_degrees_to_quat(self.geometric_rotation),
            self.geometric_translation,
        )
    }
}

// ============================================================================
// Bind Pose
// ============================================================================

/// Bind-pose offset of a skin cluster:
/// `inverse(cluster_bind) * mesh_bind * geometric`.
///
/// `cluster_bind` is the bone's global transform at bind time,
/// `mesh_bind` the mesh's global transform at bind time and `geometric`
/// the bone's geometric transform. The result maps mesh space into bone
/// space and is stored as is on the
/// [`WeightCollection`](crate::scene::skin::WeightCollection).
#[must_use]
pub fn bind_offset(cluster_bind: Mat4, mesh_bind: Mat4, geometric: Mat4) -> Mat4 {
    cluster_bind.inverse() * mesh_bind * geometric
}
