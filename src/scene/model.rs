use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use crate::animation::curve::Animation;
use crate::resources::material::Material;
use crate::resources::mesh::Mesh;
use crate::scene::NodeHandle;
use crate::scene::node::Node;
use crate::utils::stats::{HierarchyDump, ModelStats};

/// The reconciled scene handed to the model sink.
///
/// Owns the node arena (a tree with exactly one root), the flat mesh,
/// material and animation lists. Cross references (node -> mesh, bone ->
/// node, curve -> node) are handles or indices into these containers.
#[derive(Debug, Clone)]
pub struct Model {
    pub nodes: SlotMap<NodeHandle, Node>,
    pub root: NodeHandle,

    // ==== Resource lists ====
    pub meshes: Vec<Mesh>,
    pub materials: Vec<Material>,
    pub animations: Vec<Animation>,

    /// Name registry for lookups by node name
    names: FxHashMap<String, NodeHandle>,
}

impl Model {
    /// Creates a model around its root node.
    #[must_use]
    pub fn new(root: Node) -> Self {
        let mut nodes = SlotMap::with_key();
        let root_name = root.name.clone();
        let root = nodes.insert(root);

        let mut names = FxHashMap::default();
        names.insert(root_name, root);

        Self {
            nodes,
            root,
            meshes: Vec::new(),
            materials: Vec::new(),
            animations: Vec::new(),
            names,
        }
    }

    // ========================================================================
    // Hierarchy
    // ========================================================================

    /// Inserts `child` under `parent` and registers its name.
    ///
    /// Returns None if `parent` does not exist.
    pub fn add_child(&mut self, parent: NodeHandle, mut child: Node) -> Option<NodeHandle> {
        if !self.nodes.contains_key(parent) {
            log::error!("Parent node not found while adding '{}'", child.name);
            return None;
        }

        child.parent = Some(parent);
        let name = child.name.clone();
        let handle = self.nodes.insert(child);
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(handle);
        }
        self.register_name(name, handle);
        Some(handle)
    }

    /// Registers a name lookup. A duplicate name is reported and the newest
    /// node wins.
    fn register_name(&mut self, name: String, handle: NodeHandle) {
        if let Some(previous) = self.names.insert(name, handle)
            && previous != handle
        {
            let name = &self.nodes[handle].name;
            log::warn!("Duplicate node registration for name '{name}'");
        }
    }

    #[inline]
    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    #[inline]
    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    /// Looks a node up by name.
    #[must_use]
    pub fn find_node(&self, name: &str) -> Option<NodeHandle> {
        self.names.get(name).copied()
    }

    #[inline]
    #[must_use]
    pub fn root_node(&self) -> &Node {
        &self.nodes[self.root]
    }

    /// All node handles, depth-first, parents before children, children in
    /// insertion order.
    #[must_use]
    pub fn depth_first(&self) -> Vec<NodeHandle> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(handle) = stack.pop() {
            let Some(node) = self.nodes.get(handle) else {
                continue;
            };
            order.push(handle);
            stack.extend(node.children.iter().rev().copied());
        }
        order
    }

    // ========================================================================
    // Resources
    // ========================================================================

    /// Appends a mesh and attaches it to `owner`. Returns the mesh index.
    pub fn add_mesh(&mut self, owner: NodeHandle, mesh: Mesh) -> usize {
        let index = self.meshes.len();
        self.meshes.push(mesh);
        if let Some(node) = self.nodes.get_mut(owner) {
            if node.mesh.is_some() {
                log::warn!("Node '{}' already owns a mesh, replacing it", node.name);
            }
            node.mesh = Some(index);
        }
        index
    }

    /// Adds a material unless one with the same name exists. Returns its
    /// index either way.
    pub fn add_material(&mut self, material: Material) -> usize {
        if let Some(index) = self.find_material(&material.name) {
            return index;
        }
        self.materials.push(material);
        self.materials.len() - 1
    }

    #[must_use]
    pub fn find_material(&self, name: &str) -> Option<usize> {
        self.materials.iter().position(|m| m.name == name)
    }

    /// Mesh owned by `handle`, if any.
    #[must_use]
    pub fn mesh_of(&self, handle: NodeHandle) -> Option<&Mesh> {
        let index = self.nodes.get(handle)?.mesh?;
        self.meshes.get(index)
    }

    pub fn add_animation(&mut self, animation: Animation) {
        self.animations.push(animation);
    }

    // ========================================================================
    // Reporting
    // ========================================================================

    #[must_use]
    pub fn stats(&self) -> ModelStats {
        ModelStats::collect(self)
    }

    /// Indented, printable view of the node hierarchy.
    #[must_use]
    pub fn hierarchy(&self) -> HierarchyDump<'_> {
        HierarchyDump::new(self)
    }
}
