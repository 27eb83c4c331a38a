use crate::scene::NodeHandle;
use crate::scene::transform::Transform;

/// A node of the reconciled scene hierarchy.
///
/// # Hierarchy
///
/// Nodes live in the [`Model`](crate::scene::Model) arena and form a tree
/// through handles:
/// - `parent`: Non-owning handle to the parent (None for the root)
/// - `children`: Handles of the nodes this node owns
///
/// # Components
///
/// A node owns at most one mesh, referenced by its index in
/// [`Model::meshes`](crate::scene::Model::meshes).
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,

    // === Core Hierarchy ===
    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,

    // === Core Spatial Data ===
    /// Local transform resolved from the source pivot chain
    pub transform: Transform,

    // === Core State ===
    pub visible: bool,

    /// Index into the model's mesh list
    pub mesh: Option<usize>,
}

impl Node {
    /// Creates a visible node with an identity transform.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parent: None,
            children: Vec::new(),
            transform: Transform::new(),
            visible: true,
            mesh: None,
        }
    }

    /// Builder-style helper for setting the local transform.
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }
}
