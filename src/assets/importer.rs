//! Import pipeline
//!
//! Drives a [`SceneProvider`] into a [`Model`]:
//!
//! 1. Hierarchy: depth-first from the root, parents before children. Pivot
//!    chains are resolved into flat transforms and every node is registered
//!    under its source identity.
//! 2. Meshes: once all nodes exist, so skin clusters can resolve their
//!    bones. Polygons are triangulated, streams remapped onto triangle
//!    corners, clusters turned into weight collections and the mesh
//!    reconciled.
//! 3. Weight validation across all meshes.
//! 4. Animation: one [`Animation`] per source layer, curves merged per node
//!    and channel.
//!
//! A failing mesh or skin cluster is logged, recorded in the diagnostics
//! and skipped. Only settings, a missing root and non-triangular faces with
//! triangulation disabled abort the import.

use glam::Vec3;
use rustc_hash::FxHashMap;

use crate::animation::continuity::correct_rotation_track;
use crate::animation::curve::{Animation, AnimationCurveNode, ChannelKind};
use crate::animation::merge::{AxisCurves, merge_axes};
use crate::assets::diagnostics::{ImportDiagnostics, MeshWeightWarning, SkippedUnit};
use crate::assets::provider::{SceneProvider, SkinCluster, SourceMesh};
use crate::errors::{ImportError, Result};
use crate::reconcile::corner::AttributeStream;
use crate::reconcile::faces::triangulate;
use crate::reconcile::reconciler::reconcile;
use crate::reconcile::weights::validate_weights;
use crate::resources::mesh::{Mesh, Vertex};
use crate::scene::model::Model;
use crate::scene::node::Node;
use crate::scene::NodeHandle;
use crate::scene::pivot::{PivotChain, bind_offset};
use crate::scene::skin::WeightCollection;
use crate::settings::ImportSettings;

/// Result of a successful import.
#[derive(Debug, Clone)]
pub struct ImportedModel {
    pub model: Model,
    pub diagnostics: ImportDiagnostics,
}

/// Imports the scene behind `provider`.
pub fn import<P: SceneProvider>(provider: &P, settings: &ImportSettings) -> Result<ImportedModel> {
    settings.validate()?;
    let root = provider.root().ok_or(ImportError::MissingRoot)?;

    let mut importer = Importer::new(provider, settings, root);
    importer.load_hierarchy();
    importer.load_meshes()?;
    importer.validate_weights();
    importer.load_animations();

    let Importer {
        model, diagnostics, ..
    } = importer;

    log::info!(
        "Imported '{}': {} nodes, {} meshes, {} animations",
        model.root_node().name,
        model.nodes.len(),
        model.meshes.len(),
        model.animations.len()
    );
    if !diagnostics.is_clean() {
        log::warn!("{diagnostics}");
    }

    Ok(ImportedModel { model, diagnostics })
}

/// A visited source node.
struct VisitedNode<Id> {
    source: Id,
    handle: NodeHandle,
    pivots: PivotChain,
}

struct Importer<'a, P: SceneProvider> {
    provider: &'a P,
    settings: &'a ImportSettings,
    unit_scale: f32,

    model: Model,
    diagnostics: ImportDiagnostics,

    // Source Node Id -> Model NodeHandle
    node_mapping: FxHashMap<P::NodeId, NodeHandle>,
    // Depth-first visit order
    visited: Vec<VisitedNode<P::NodeId>>,
}

impl<'a, P: SceneProvider> Importer<'a, P> {
    fn new(provider: &'a P, settings: &'a ImportSettings, root: P::NodeId) -> Self {
        let unit_scale = settings.unit_scale();
        let pivots = provider.pivots(root);

        let mut root_node = Node::new(provider.name(root)).with_transform(pivots.resolve(unit_scale));
        root_node.visible = provider.visible(root);
        let model = Model::new(root_node);

        let mut node_mapping = FxHashMap::default();
        node_mapping.insert(root, model.root);
        let visited = vec![VisitedNode {
            source: root,
            handle: model.root,
            pivots,
        }];

        Self {
            provider,
            settings,
            unit_scale,
            model,
            diagnostics: ImportDiagnostics::default(),
            node_mapping,
            visited,
        }
    }

    // ========================================================================
    // Hierarchy
    // ========================================================================

    fn load_hierarchy(&mut self) {
        let provider = self.provider;
        let root = self.visited[0].source;
        let root_handle = self.visited[0].handle;

        // Work stack: (source id, parent handle)
        let mut stack: Vec<(P::NodeId, NodeHandle)> = provider
            .children(root)
            .into_iter()
            .rev()
            .map(|child| (child, root_handle))
            .collect();

        while let Some((source, parent)) = stack.pop() {
            if self.node_mapping.contains_key(&source) {
                log::warn!("Source node {source:?} reached twice, ignoring the second link");
                continue;
            }

            let name = provider.name(source);
            if self.model.find_node(name).is_some() {
                self.diagnostics.duplicate_names.push(name.to_string());
            }

            let pivots = provider.pivots(source);
            let mut node = Node::new(name).with_transform(pivots.resolve(self.unit_scale));
            node.visible = provider.visible(source);

            let Some(handle) = self.model.add_child(parent, node) else {
                continue;
            };
            self.node_mapping.insert(source, handle);
            self.visited.push(VisitedNode {
                source,
                handle,
                pivots,
            });

            // Reverse push keeps children in source order
            for child in provider.children(source).into_iter().rev() {
                stack.push((child, handle));
            }
        }
    }

    // ========================================================================
    // Meshes
    // ========================================================================

    fn load_meshes(&mut self) -> Result<()> {
        for i in 0..self.visited.len() {
            let (source, handle) = (self.visited[i].source, self.visited[i].handle);
            let Some(source_mesh) = self.provider.mesh(source) else {
                continue;
            };

            let name = if source_mesh.name.is_empty() {
                self.provider.name(source).to_string()
            } else {
                source_mesh.name.clone()
            };

            match self.build_mesh(source, &name, &source_mesh) {
                Ok(mut mesh) => {
                    for material in self.provider.materials(source) {
                        let index = self.model.add_material(material);
                        mesh.materials.push(index);
                    }
                    self.model.add_mesh(handle, mesh);
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    log::error!("Skipping mesh '{name}': {e}");
                    self.diagnostics.skipped_meshes.push(SkippedUnit::new(&name, e));
                }
            }
        }
        Ok(())
    }

    fn build_mesh(&mut self, source: P::NodeId, name: &str, source_mesh: &SourceMesh) -> Result<Mesh> {
        let triangulation = triangulate(name, &source_mesh.polygons, self.settings.triangulate)?;
        self.diagnostics.skipped_polygons += triangulation.skipped_polygons;

        let streams = self.remap_streams(
            name,
            source_mesh,
            &triangulation.corner_sources,
            triangulation.source_corner_count,
        );

        let mut mesh = Mesh::new(name);
        mesh.vertices = source_mesh
            .positions
            .iter()
            .map(|&p| Vertex::from_position(p))
            .collect();
        mesh.triangles = triangulation.triangles;

        for (index, cluster) in self.provider.skin_clusters(source).into_iter().enumerate() {
            match self.weight_collection(name, index, cluster) {
                Ok(collection) => mesh.weight_collections.push(collection),
                Err(e) => {
                    log::error!("Skipping skin cluster: {e}");
                    self.diagnostics
                        .skipped_bones
                        .push(SkippedUnit::new(&format!("{name}#{index}"), e));
                }
            }
        }

        let stats = reconcile(&mut mesh, &streams)?;
        self.diagnostics.duplicated_vertices += stats.duplicated;
        self.diagnostics.mismatched_corners += stats.mismatched_corners;
        self.diagnostics
            .dropped_streams
            .extend(stats.dropped_streams.iter().map(|label| format!("{name}: {label}")));

        Ok(mesh)
    }

    /// Moves per-polygon-corner streams onto triangle corners.
    fn remap_streams(
        &mut self,
        name: &str,
        source_mesh: &SourceMesh,
        corner_sources: &[usize],
        source_corner_count: usize,
    ) -> Vec<AttributeStream> {
        let mut streams = Vec::with_capacity(source_mesh.streams.len());
        for stream in &source_mesh.streams {
            let remapped = if stream.len() == source_corner_count {
                stream.remap(corner_sources)
            } else {
                None
            };
            match remapped {
                Some(s) => streams.push(s),
                None => {
                    log::warn!(
                        "Mesh '{name}': dropping {} with {} corners, the polygons have {source_corner_count}",
                        stream.label(),
                        stream.len()
                    );
                    self.diagnostics
                        .dropped_streams
                        .push(format!("{name}: {}", stream.label()));
                }
            }
        }
        streams
    }

    fn weight_collection(
        &self,
        mesh: &str,
        cluster_index: usize,
        cluster: SkinCluster<P::NodeId>,
    ) -> Result<WeightCollection> {
        let bone = cluster.bone.ok_or_else(|| ImportError::UnlinkedCluster {
            mesh: mesh.to_string(),
            cluster: cluster_index,
        })?;
        let handle = *self
            .node_mapping
            .get(&bone)
            .ok_or_else(|| ImportError::UnregisteredBone {
                mesh: mesh.to_string(),
                cluster: cluster_index,
            })?;

        let geometric = self.provider.pivots(bone).geometric_matrix();
        let offset = bind_offset(cluster.link_transform, cluster.mesh_transform, geometric);

        Ok(WeightCollection::new(handle, offset, cluster.weights))
    }

    // ========================================================================
    // Weights
    // ========================================================================

    fn validate_weights(&mut self) {
        let tolerance = self.settings.weight_tolerance;
        for mesh in &self.model.meshes {
            let report = validate_weights(mesh, tolerance);
            self.diagnostics.out_of_range_weights += report.out_of_range;
            self.diagnostics
                .weight_warnings
                .extend(report.unbalanced.into_iter().map(|w| MeshWeightWarning {
                    mesh: mesh.name.clone(),
                    vertex: w.vertex,
                    total: w.total,
                }));
        }
    }

    // ========================================================================
    // Animation
    // ========================================================================

    fn load_animations(&mut self) {
        for (layer_index, layer) in self.provider.animation_layers().into_iter().enumerate() {
            let fps = layer.fps.unwrap_or(self.settings.default_fps);
            let mut animation = Animation::new(&layer.name, fps);

            for visited in &self.visited {
                for kind in ChannelKind::ALL {
                    let Some(curves) = self.provider.channel_curves(layer_index, visited.source, kind) else {
                        continue;
                    };
                    if let Some(node) = self.merge_channel(visited, kind, &curves) {
                        animation.curve.add_node(node);
                    }
                }
            }

            log::debug!(
                "Animation '{}': {} curve nodes, {} ms",
                animation.name,
                animation.curve.nodes.len(),
                animation.duration_ms()
            );
            self.model.add_animation(animation);
        }
    }

    fn merge_channel(
        &self,
        visited: &VisitedNode<P::NodeId>,
        kind: ChannelKind,
        curves: &AxisCurves,
    ) -> Option<AnimationCurveNode> {
        let pivots = &visited.pivots;
        match kind {
            ChannelKind::Translation => {
                let samples = merge_axes(curves, Vec3::splat(self.unit_scale), pivots.translation)?;
                Some(AnimationCurveNode::from_vectors(visited.handle, kind, &samples))
            }
            ChannelKind::Rotation => {
                let samples = merge_axes(curves, Vec3::ONE, pivots.rotation)?;
                let frames = correct_rotation_track(&samples, pivots);
                Some(AnimationCurveNode::new(visited.handle, kind, frames))
            }
            ChannelKind::Scaling => {
                let samples = merge_axes(curves, Vec3::ONE, pivots.scaling)?;
                Some(AnimationCurveNode::from_vectors(visited.handle, kind, &samples))
            }
        }
    }
}
