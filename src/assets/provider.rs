//! Source Scene Provider
//!
//! The importer reads source scenes only through [`SceneProvider`]. A file
//! format backend implements it over its own decoded data; [`RawScene`]
//! implements it over plain vectors.
//!
//! [`RawScene`]: crate::assets::raw::RawScene

use std::fmt::Debug;
use std::hash::Hash;

use glam::{Mat4, Vec3};

use crate::animation::curve::ChannelKind;
use crate::animation::merge::AxisCurves;
use crate::reconcile::corner::AttributeStream;
use crate::reconcile::faces::Polygon;
use crate::resources::material::Material;
use crate::scene::pivot::PivotChain;
use crate::scene::skin::WeightData;

/// Geometry of one source mesh, before triangulation and reconciliation.
#[derive(Debug, Clone, Default)]
pub struct SourceMesh {
    /// Empty names are replaced by the owning node's name
    pub name: String,
    /// One position per original (shared) vertex
    pub positions: Vec<Vec3>,
    /// Polygons as original vertex indices
    pub polygons: Vec<Polygon>,
    /// Per-polygon-corner streams, in polygon order
    pub streams: Vec<AttributeStream>,
}

impl SourceMesh {
    #[must_use]
    pub fn new(name: &str, positions: Vec<Vec3>, polygons: Vec<Polygon>) -> Self {
        Self {
            name: name.to_string(),
            positions,
            polygons,
            streams: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_stream(mut self, stream: AttributeStream) -> Self {
        self.streams.push(stream);
        self
    }

    /// Total number of polygon corners.
    #[must_use]
    pub fn corner_count(&self) -> usize {
        self.polygons.iter().map(|p| p.len()).sum()
    }
}

/// Skin cluster: the weights one bone has on one mesh.
#[derive(Debug, Clone)]
pub struct SkinCluster<Id> {
    /// Linked bone node; None for a broken link
    pub bone: Option<Id>,
    /// Global transform of the bone at bind time
    pub link_transform: Mat4,
    /// Global transform of the mesh at bind time
    pub mesh_transform: Mat4,
    pub weights: Vec<WeightData>,
}

impl<Id> SkinCluster<Id> {
    #[must_use]
    pub fn new(bone: Id, weights: Vec<WeightData>) -> Self {
        Self {
            bone: Some(bone),
            link_transform: Mat4::IDENTITY,
            mesh_transform: Mat4::IDENTITY,
            weights,
        }
    }

    #[must_use]
    pub fn with_bind(mut self, link_transform: Mat4, mesh_transform: Mat4) -> Self {
        self.link_transform = link_transform;
        self.mesh_transform = mesh_transform;
        self
    }
}

/// A source animation layer (take / stack).
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationLayer {
    pub name: String,
    /// Frame rate of the layer; the configured default applies when None
    pub fps: Option<f32>,
}

impl AnimationLayer {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            fps: None,
        }
    }
}

/// Read access to a decoded source scene.
///
/// Node identities are opaque to the importer; it only compares and hashes
/// them. Optional scene parts default to "absent".
pub trait SceneProvider {
    type NodeId: Copy + Eq + Hash + Debug;

    /// Root node, or None for an empty scene.
    fn root(&self) -> Option<Self::NodeId>;

    /// Children of `node`, in source order.
    fn children(&self, node: Self::NodeId) -> Vec<Self::NodeId>;

    fn name(&self, node: Self::NodeId) -> &str;

    fn visible(&self, node: Self::NodeId) -> bool {
        let _ = node;
        true
    }

    /// Raw transform primitives of `node`.
    fn pivots(&self, node: Self::NodeId) -> PivotChain;

    /// Mesh attached to `node`, if any.
    fn mesh(&self, node: Self::NodeId) -> Option<SourceMesh>;

    /// Materials of the mesh attached to `node`.
    fn materials(&self, node: Self::NodeId) -> Vec<Material> {
        let _ = node;
        Vec::new()
    }

    /// Skin clusters deforming the mesh attached to `node`.
    fn skin_clusters(&self, node: Self::NodeId) -> Vec<SkinCluster<Self::NodeId>> {
        let _ = node;
        Vec::new()
    }

    fn animation_layers(&self) -> Vec<AnimationLayer> {
        Vec::new()
    }

    /// Per-axis keys of one channel of `node` on layer `layer`.
    ///
    /// Times are milliseconds. Rotation keys are Euler degrees.
    fn channel_curves(
        &self,
        layer: usize,
        node: Self::NodeId,
        kind: ChannelKind,
    ) -> Option<AxisCurves> {
        let _ = (layer, node, kind);
        None
    }
}
