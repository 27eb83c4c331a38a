use rustc_hash::FxHashMap;

use crate::animation::curve::ChannelKind;
use crate::animation::merge::AxisCurves;
use crate::assets::provider::{AnimationLayer, SceneProvider, SkinCluster, SourceMesh};
use crate::resources::material::Material;
use crate::scene::pivot::PivotChain;

/// Source node: plain data, children referenced by index.
#[derive(Debug, Clone)]
pub struct RawNode {
    pub name: String,
    pub visible: bool,
    pub pivots: PivotChain,
    /// Indices into `RawScene::nodes`
    pub children: Vec<usize>,
    pub mesh: Option<SourceMesh>,
    pub materials: Vec<Material>,
    /// Clusters of the mesh; bones are indices into `RawScene::nodes`
    pub clusters: Vec<SkinCluster<usize>>,
}

impl RawNode {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            visible: true,
            pivots: PivotChain::default(),
            children: Vec::new(),
            mesh: None,
            materials: Vec::new(),
            clusters: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_pivots(mut self, pivots: PivotChain) -> Self {
        self.pivots = pivots;
        self
    }

    #[must_use]
    pub fn with_mesh(mut self, mesh: SourceMesh) -> Self {
        self.mesh = Some(mesh);
        self
    }
}

/// In-memory source scene.
///
/// Nodes are stored flat; the first node added is the root unless
/// `root` is set otherwise. Useful for tests and for callers that already
/// hold decoded scene data.
#[derive(Debug, Clone, Default)]
pub struct RawScene {
    pub nodes: Vec<RawNode>,
    pub root: Option<usize>,
    pub layers: Vec<AnimationLayer>,
    /// (layer, node, channel) -> per-axis keys
    pub curves: FxHashMap<(usize, usize, ChannelKind), AxisCurves>,
}

impl RawScene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node and returns its index. The first node becomes the root.
    pub fn add_node(&mut self, node: RawNode) -> usize {
        let index = self.nodes.len();
        self.nodes.push(node);
        if self.root.is_none() {
            self.root = Some(index);
        }
        index
    }

    /// Adds a node as the last child of `parent`.
    pub fn add_child(&mut self, parent: usize, node: RawNode) -> usize {
        let index = self.add_node(node);
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(index);
        } else {
            log::warn!("RawScene: parent {parent} does not exist, node {index} left detached");
        }
        index
    }

    /// Adds an animation layer and returns its index.
    pub fn add_layer(&mut self, layer: AnimationLayer) -> usize {
        self.layers.push(layer);
        self.layers.len() - 1
    }

    pub fn set_curves(&mut self, layer: usize, node: usize, kind: ChannelKind, curves: AxisCurves) {
        self.curves.insert((layer, node, kind), curves);
    }
}

impl SceneProvider for RawScene {
    type NodeId = usize;

    fn root(&self) -> Option<usize> {
        self.root.filter(|&r| r < self.nodes.len())
    }

    fn children(&self, node: usize) -> Vec<usize> {
        let Some(n) = self.nodes.get(node) else {
            return Vec::new();
        };
        n.children
            .iter()
            .copied()
            .filter(|&index| {
                let exists = index < self.nodes.len();
                if !exists {
                    log::warn!("RawScene: node {node} lists missing child {index}, skipped");
                }
                exists
            })
            .collect()
    }

    fn name(&self, node: usize) -> &str {
        self.nodes.get(node).map_or("", |n| n.name.as_str())
    }

    fn visible(&self, node: usize) -> bool {
        self.nodes.get(node).is_none_or(|n| n.visible)
    }

    fn pivots(&self, node: usize) -> PivotChain {
        self.nodes
            .get(node)
            .map(|n| n.pivots.clone())
            .unwrap_or_default()
    }

    fn mesh(&self, node: usize) -> Option<SourceMesh> {
        self.nodes.get(node)?.mesh.clone()
    }

    fn materials(&self, node: usize) -> Vec<Material> {
        self.nodes
            .get(node)
            .map(|n| n.materials.clone())
            .unwrap_or_default()
    }

    fn skin_clusters(&self, node: usize) -> Vec<SkinCluster<usize>> {
        self.nodes
            .get(node)
            .map(|n| n.clusters.clone())
            .unwrap_or_default()
    }

    fn animation_layers(&self) -> Vec<AnimationLayer> {
        self.layers.clone()
    }

    fn channel_curves(&self, layer: usize, node: usize, kind: ChannelKind) -> Option<AxisCurves> {
        self.curves.get(&(layer, node, kind)).cloned()
    }
}
