use glam::{Vec2, Vec3};

use crate::scene::skin::WeightCollection;

/// Number of UV channels a vertex carries.
pub const MAX_UV_CHANNELS: usize = 4;

/// A triangle as three vertex indices.
pub type Triangle = [u32; 3];

/// Shared vertex: one value per attribute.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: [Vec2; MAX_UV_CHANNELS],
}

impl Vertex {
    #[must_use]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}

/// Shared-vertex mesh.
///
/// Owned by exactly one node. Triangles index into `vertices`; after
/// reconciliation every index is in range and every vertex carries a single
/// consistent value per attribute.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub name: String,

    // === Geometry ===
    pub vertices: Vec<Vertex>,
    pub triangles: Vec<Triangle>,

    // === References ===
    /// Indices into the model's material list
    pub materials: Vec<usize>,

    // === Skinning ===
    pub weight_collections: Vec<WeightCollection>,
}

impl Mesh {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    #[inline]
    #[must_use]
    pub fn is_skinned(&self) -> bool {
        !self.weight_collections.is_empty()
    }

    /// Index of the first triangle referencing a missing vertex, with the
    /// offending index.
    #[must_use]
    pub fn find_dangling_index(&self) -> Option<(usize, u32)> {
        let count = self.vertices.len();
        self.triangles.iter().enumerate().find_map(|(i, tri)| {
            tri.iter()
                .copied()
                .find(|&index| index as usize >= count)
                .map(|index| (i, index))
        })
    }

    /// Total number of weight records across all collections.
    #[must_use]
    pub fn weight_record_count(&self) -> usize {
        self.weight_collections.iter().map(|c| c.weights.len()).sum()
    }
}
