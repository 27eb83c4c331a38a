use glam::Mat4;

use crate::scene::NodeHandle;

/// One bone influence on one vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightData {
    pub vertex_index: u32,
    pub weight: f32,
}

impl WeightData {
    #[inline]
    #[must_use]
    pub fn new(vertex_index: u32, weight: f32) -> Self {
        Self {
            vertex_index,
            weight,
        }
    }
}

/// All influences of a single bone on a mesh.
///
/// The bone is a non-owning handle into the model's node arena.
#[derive(Debug, Clone)]
pub struct WeightCollection {
    pub bone: NodeHandle,

    /// Bind-pose offset, `inverse(cluster_bind) * mesh_bind * geometric`.
    /// Maps mesh space into the bone's bind space; see
    /// [`bind_offset`](crate::scene::pivot::bind_offset).
    pub bone_offset: Mat4,

    pub weights: Vec<WeightData>,
}

impl WeightCollection {
    #[must_use]
    pub fn new(bone: NodeHandle, bone_offset: Mat4, weights: Vec<WeightData>) -> Self {
        Self {
            bone,
            bone_offset,
            weights,
        }
    }

    /// Inverse of [`bone_offset`](Self::bone_offset), for consumers that
    /// skin with bind matrices rather than offsets.
    #[inline]
    #[must_use]
    pub fn bind_matrix(&self) -> Mat4 {
        self.bone_offset.inverse()
    }

    /// Weight this bone assigns to `vertex_index`, summed over duplicate
    /// records.
    #[must_use]
    pub fn weight_of(&self, vertex_index: u32) -> f32 {
        self.weights
            .iter()
            .filter(|w| w.vertex_index == vertex_index)
            .map(|w| w.weight)
            .sum()
    }
}
