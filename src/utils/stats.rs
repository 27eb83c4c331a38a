//! Model statistics and hierarchy dump.

use std::fmt;

use crate::scene::NodeHandle;
use crate::scene::model::Model;

/// Element counts of a reconciled model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModelStats {
    pub nodes: usize,
    pub meshes: usize,
    pub vertices: usize,
    pub triangles: usize,
    pub indices: usize,
    pub materials: usize,
    pub weight_collections: usize,
    pub weight_records: usize,
    pub animations: usize,
    pub curve_nodes: usize,
    pub frames: usize,
}

impl ModelStats {
    #[must_use]
    pub fn collect(model: &Model) -> Self {
        let mut stats = Self {
            nodes: model.nodes.len(),
            meshes: model.meshes.len(),
            materials: model.materials.len(),
            animations: model.animations.len(),
            ..Self::default()
        };

        for mesh in &model.meshes {
            stats.vertices += mesh.vertex_count();
            stats.triangles += mesh.triangle_count();
            stats.weight_collections += mesh.weight_collections.len();
            stats.weight_records += mesh.weight_record_count();
        }
        stats.indices = stats.triangles * 3;

        for animation in &model.animations {
            stats.curve_nodes += animation.curve.nodes.len();
            stats.frames += animation.curve.frame_count();
        }

        stats
    }
}

impl fmt::Display for ModelStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Nodes:              {}", self.nodes)?;
        writeln!(f, "Meshes:             {}", self.meshes)?;
        writeln!(f, "Vertices:           {}", self.vertices)?;
        writeln!(f, "Triangles:          {}", self.triangles)?;
        writeln!(f, "Indices:            {}", self.indices)?;
        writeln!(f, "Materials:          {}", self.materials)?;
        writeln!(f, "Weight collections: {}", self.weight_collections)?;
        writeln!(f, "Weight records:     {}", self.weight_records)?;
        writeln!(f, "Animations:         {}", self.animations)?;
        writeln!(f, "Curve nodes:        {}", self.curve_nodes)?;
        write!(f, "Frames:             {}", self.frames)
    }
}

/// Printable node tree: one line per node, indented with `-` per depth
/// level, followed by the local transform.
pub struct HierarchyDump<'a> {
    model: &'a Model,
}

impl<'a> HierarchyDump<'a> {
    #[must_use]
    pub fn new(model: &'a Model) -> Self {
        Self { model }
    }
}

impl fmt::Display for HierarchyDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nodes = &self.model.nodes;
        let mut stack: Vec<(NodeHandle, usize)> = vec![(self.model.root, 0)];

        while let Some((handle, depth)) = stack.pop() {
            let Some(node) = nodes.get(handle) else {
                continue;
            };
            let t = &node.transform;
            write!(f, "{}{}", "-".repeat(depth), node.name)?;
            write!(
                f,
                " T({}, {}, {}) R({}, {}, {}) S({}, {}, {})",
                t.translation.x,
                t.translation.y,
                t.translation.z,
                t.rotation.x,
                t.rotation.y,
                t.rotation.z,
                t.scaling.x,
                t.scaling.y,
                t.scaling.z
            )?;
            if node.mesh.is_some() {
                write!(f, " [mesh]")?;
            }
            writeln!(f)?;

            for &child in node.children.iter().rev() {
                stack.push((child, depth + 1));
            }
        }
        Ok(())
    }
}
