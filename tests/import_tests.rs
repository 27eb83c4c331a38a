//! Import pipeline tests
//!
//! Tests for:
//! - End-to-end import of an in-memory scene
//! - Unit scaling of static and animated translation
//! - Skin cluster resolution and bind offsets
//! - Per-unit failure isolation and diagnostics
//! - Fatal preconditions
//! - Settings serialization

use glam::{Mat4, Vec2, Vec3};
use scene_reconcile::animation::{AxisCurves, AxisKey, ChannelKind};
use scene_reconcile::assets::{AnimationLayer, RawNode, RawScene, SkinCluster, SourceMesh, import};
use scene_reconcile::errors::ImportError;
use scene_reconcile::reconcile::{AttributeStream, CornerAttribute, Polygon};
use scene_reconcile::resources::Material;
use scene_reconcile::scene::{PivotChain, WeightData};
use scene_reconcile::settings::{ImportSettings, UnitLevel};

// ============================================================================
// Helpers
// ============================================================================

const EPSILON: f32 = 1e-5;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    (a - b).abs().max_element() < EPSILON
}

fn polygon(indices: &[u32]) -> Polygon {
    Polygon::from_slice(indices)
}

/// A square split into two triangles, with a UV seam on vertex 0.
fn seamed_square(name: &str) -> SourceMesh {
    let positions = vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
    ];
    let polygons = vec![polygon(&[0, 1, 2]), polygon(&[0, 2, 3])];
    let uvs = [
        (0, Vec2::ZERO),
        (1, Vec2::X),
        (2, Vec2::ONE),
        (0, Vec2::splat(0.5)),
        (2, Vec2::ONE),
        (3, Vec2::Y),
    ];
    let stream = AttributeStream::uv(
        0,
        uvs.iter().map(|&(v, uv)| CornerAttribute::new(v, uv)).collect(),
    );
    SourceMesh::new(name, positions, polygons).with_stream(stream)
}

fn full_weights() -> Vec<WeightData> {
    (0..4).map(|v| WeightData::new(v, 1.0)).collect()
}

/// Scene -> Hips -> Body (mesh skinned to Hips)
struct Rig {
    scene: RawScene,
    hips: usize,
    body: usize,
}

fn rig() -> Rig {
    let mut scene = RawScene::new();
    let root = scene.add_node(RawNode::new("Scene"));
    let hips = scene.add_child(
        root,
        RawNode::new("Hips").with_pivots(PivotChain::from_trs(
            Vec3::new(100.0, 0.0, 0.0),
            Vec3::ZERO,
            Vec3::ONE,
        )),
    );
    let body = scene.add_child(hips, RawNode::new("Body").with_mesh(seamed_square("BodyMesh")));
    scene.nodes[body].clusters.push(SkinCluster::new(hips, full_weights()));
    scene.nodes[body].materials.push(Material::new("Skin"));

    Rig { scene, hips, body }
}

// ============================================================================
// End to End
// ============================================================================

#[test]
fn imports_hierarchy_meshes_and_skin() {
    init_logger();
    let rig = rig();

    let imported = import(&rig.scene, &ImportSettings::default()).unwrap();
    let model = &imported.model;

    assert_eq!(model.nodes.len(), 3);
    assert_eq!(model.root_node().name, "Scene");
    let hips = model.find_node("Hips").unwrap();
    let body = model.find_node("Body").unwrap();
    assert_eq!(model.get_node(body).and_then(|n| n.parent()), Some(hips));

    // Centimeters to meters
    let hips_node = model.get_node(hips).unwrap();
    assert!(vec3_approx(hips_node.transform.translation, Vec3::new(1.0, 0.0, 0.0)));

    let mesh = model.mesh_of(body).unwrap();
    assert_eq!(mesh.name, "BodyMesh");
    assert_eq!(mesh.vertex_count(), 5);
    assert_eq!(mesh.triangles, vec![[0, 1, 2], [4, 2, 3]]);
    assert_eq!(mesh.vertices[4].uv[0], Vec2::splat(0.5));
    assert_eq!(mesh.materials, vec![0]);

    assert_eq!(mesh.weight_collections.len(), 1);
    let collection = &mesh.weight_collections[0];
    assert_eq!(collection.bone, hips);
    assert_eq!(collection.weight_of(4), 1.0);

    assert_eq!(imported.diagnostics.duplicated_vertices, 1);
    assert!(imported.diagnostics.is_clean());
}

#[test]
fn bind_offset_uses_cluster_transforms() {
    let mut rig = rig();
    let cluster = &mut rig.scene.nodes[rig.body].clusters[0];
    cluster.link_transform = Mat4::from_translation(Vec3::new(0.0, 1.0, 0.0));
    cluster.mesh_transform = Mat4::IDENTITY;
    rig.scene.nodes[rig.hips].pivots.geometric_translation = Vec3::new(0.0, 0.0, 2.0);

    let imported = import(&rig.scene, &ImportSettings::default()).unwrap();
    let body = imported.model.find_node("Body").unwrap();
    let offset = imported.model.mesh_of(body).unwrap().weight_collections[0].bone_offset;

    let p = offset.transform_point3(Vec3::ZERO);
    assert!(vec3_approx(p, Vec3::new(0.0, -1.0, 2.0)));
}

#[test]
fn unnamed_mesh_takes_node_name() {
    let mut rig = rig();
    if let Some(mesh) = rig.scene.nodes[rig.body].mesh.as_mut() {
        mesh.name.clear();
    }

    let imported = import(&rig.scene, &ImportSettings::default()).unwrap();
    assert_eq!(imported.model.meshes[0].name, "Body");
}

#[test]
fn quads_are_triangulated_when_enabled() {
    let mut scene = RawScene::new();
    let root = scene.add_node(RawNode::new("Root"));
    let quad = SourceMesh::new(
        "Quad",
        vec![Vec3::ZERO, Vec3::X, Vec3::ONE, Vec3::Y],
        vec![polygon(&[0, 1, 2, 3])],
    );
    scene.add_child(root, RawNode::new("Plane").with_mesh(quad));

    let imported = import(&scene, &ImportSettings::default()).unwrap();
    assert_eq!(imported.model.meshes[0].triangles, vec![[0, 1, 2], [0, 2, 3]]);

    let settings = ImportSettings {
        triangulate: false,
        ..ImportSettings::default()
    };
    let err = import(&scene, &settings).unwrap_err();
    assert!(matches!(err, ImportError::NonTriangularFace { face: 0, corners: 4, .. }));
}

#[test]
fn shared_materials_are_stored_once() {
    let mut rig = rig();
    let mut other = RawNode::new("Head").with_mesh(seamed_square("HeadMesh"));
    other.materials.push(Material::new("Skin"));
    other.materials.push(Material::new("Eyes"));
    rig.scene.add_child(rig.hips, other);

    let imported = import(&rig.scene, &ImportSettings::default()).unwrap();
    let model = &imported.model;

    assert_eq!(model.materials.len(), 2);
    let head = model.find_node("Head").unwrap();
    assert_eq!(model.mesh_of(head).unwrap().materials, vec![0, 1]);
}

// ============================================================================
// Animation
// ============================================================================

#[test]
fn layers_become_animations_with_merged_curves() {
    let mut rig = rig();
    let layer = rig.scene.add_layer(AnimationLayer::new("Take 001"));
    rig.scene.set_curves(
        layer,
        rig.hips,
        ChannelKind::Translation,
        AxisCurves::new(
            vec![AxisKey::new(0, 100.0), AxisKey::new(10, 200.0)],
            Vec::new(),
            vec![AxisKey::new(5, 50.0)],
        ),
    );
    rig.scene.set_curves(
        layer,
        rig.hips,
        ChannelKind::Rotation,
        AxisCurves::new(
            Vec::new(),
            Vec::new(),
            vec![AxisKey::new(0, 0.0), AxisKey::new(10, 190.0), AxisKey::new(20, 370.0)],
        ),
    );
    // Empty channel: no curve node
    rig.scene
        .set_curves(layer, rig.body, ChannelKind::Scaling, AxisCurves::default());

    let imported = import(&rig.scene, &ImportSettings::default()).unwrap();
    let model = &imported.model;

    assert_eq!(model.animations.len(), 1);
    let animation = &model.animations[0];
    assert_eq!(animation.name, "Take 001");
    assert_eq!(animation.fps, 30.0);
    assert_eq!(animation.curve.nodes.len(), 2);
    assert_eq!(animation.duration_ms(), 20);

    let hips = model.find_node("Hips").unwrap();
    let translation = animation.curve.find(hips, ChannelKind::Translation).unwrap();
    let values: Vec<Vec3> = translation
        .frames
        .iter()
        .filter_map(|f| f.sample.as_vec3())
        .collect();
    assert_eq!(values.len(), 3);
    assert!(vec3_approx(values[0], Vec3::new(1.0, 0.0, 0.5)));
    assert!(vec3_approx(values[1], Vec3::new(1.5, 0.0, 0.5)));
    assert!(vec3_approx(values[2], Vec3::new(2.0, 0.0, 0.5)));

    let rotation = animation.curve.find(hips, ChannelKind::Rotation).unwrap();
    let quats: Vec<_> = rotation.frames.iter().filter_map(|f| f.sample.as_quat()).collect();
    assert_eq!(quats.len(), 3);
    for pair in quats.windows(2) {
        assert!(pair[0].dot(pair[1]) >= 0.0);
    }

    let body = model.find_node("Body").unwrap();
    assert!(animation.curve.find(body, ChannelKind::Scaling).is_none());
}

#[test]
fn layer_fps_overrides_default() {
    let mut rig = rig();
    let mut layer = AnimationLayer::new("Run");
    layer.fps = Some(60.0);
    rig.scene.add_layer(layer);

    let imported = import(&rig.scene, &ImportSettings::default()).unwrap();
    assert_eq!(imported.model.animations[0].fps, 60.0);
    assert!(imported.model.animations[0].curve.nodes.is_empty());
}

// ============================================================================
// Recoverable Failures
// ============================================================================

#[test]
fn mesh_with_dangling_index_is_skipped() {
    init_logger();
    let mut rig = rig();
    let broken = SourceMesh::new("Broken", vec![Vec3::ZERO; 3], vec![polygon(&[0, 1, 9])]);
    rig.scene.add_child(rig.hips, RawNode::new("Prop").with_mesh(broken));

    let imported = import(&rig.scene, &ImportSettings::default()).unwrap();

    assert_eq!(imported.model.meshes.len(), 1);
    assert_eq!(imported.diagnostics.skipped_meshes.len(), 1);
    assert_eq!(imported.diagnostics.skipped_meshes[0].name, "Broken");
    // The node itself survives without a mesh
    let prop = imported.model.find_node("Prop").unwrap();
    assert!(imported.model.mesh_of(prop).is_none());
}

#[test]
fn broken_clusters_are_skipped() {
    let mut rig = rig();
    let clusters = &mut rig.scene.nodes[rig.body].clusters;
    clusters.push(SkinCluster {
        bone: None,
        link_transform: Mat4::IDENTITY,
        mesh_transform: Mat4::IDENTITY,
        weights: Vec::new(),
    });
    // Node 42 never appears in the hierarchy
    clusters.push(SkinCluster::new(42, Vec::new()));

    let imported = import(&rig.scene, &ImportSettings::default()).unwrap();

    let body = imported.model.find_node("Body").unwrap();
    assert_eq!(imported.model.mesh_of(body).unwrap().weight_collections.len(), 1);
    assert_eq!(imported.diagnostics.skipped_bones.len(), 2);
    assert!(imported.diagnostics.skipped_bones[0].reason.contains("no linked bone"));
    assert!(imported.diagnostics.skipped_bones[1].reason.contains("unregistered"));
}

#[test]
fn unbalanced_weights_are_reported() {
    let mut rig = rig();
    rig.scene.nodes[rig.body].clusters[0].weights[1].weight = 0.5;

    let imported = import(&rig.scene, &ImportSettings::default()).unwrap();

    let warnings = &imported.diagnostics.weight_warnings;
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].mesh, "BodyMesh");
    assert_eq!(warnings[0].vertex, 1);
    assert!(!imported.diagnostics.is_clean());
}

#[test]
fn mismatched_stream_is_dropped_but_mesh_kept() {
    let mut rig = rig();
    if let Some(mesh) = rig.scene.nodes[rig.body].mesh.as_mut() {
        mesh.streams.push(AttributeStream::normal(vec![CornerAttribute::new(0, Vec3::Z)]));
    }

    let imported = import(&rig.scene, &ImportSettings::default()).unwrap();

    assert_eq!(imported.diagnostics.dropped_streams, vec!["BodyMesh: normal".to_string()]);
    assert_eq!(imported.model.meshes[0].vertex_count(), 5);
}

#[test]
fn degenerate_polygons_are_counted() {
    let mut rig = rig();
    if let Some(mesh) = rig.scene.nodes[rig.body].mesh.as_mut() {
        mesh.streams.clear();
        mesh.polygons.push(polygon(&[1, 2]));
    }

    let imported = import(&rig.scene, &ImportSettings::default()).unwrap();

    assert_eq!(imported.diagnostics.skipped_polygons, 1);
    assert_eq!(imported.model.meshes[0].triangle_count(), 2);
}

#[test]
fn duplicate_node_names_are_recorded() {
    let mut rig = rig();
    rig.scene.add_child(rig.body, RawNode::new("Hips"));

    let imported = import(&rig.scene, &ImportSettings::default()).unwrap();

    assert_eq!(imported.diagnostics.duplicate_names, vec!["Hips".to_string()]);
    assert_eq!(imported.model.nodes.len(), 4);
}

#[test]
fn cyclic_and_repeated_links_are_ignored() {
    init_logger();
    let mut scene = RawScene::new();
    let root = scene.add_node(RawNode::new("Root"));
    let a = scene.add_child(root, RawNode::new("A"));
    let mut hidden = RawNode::new("Hidden");
    hidden.visible = false;
    scene.add_child(a, hidden);

    // A links back to the root and to itself, the root lists A twice
    scene.nodes[a].children.extend([root, a]);
    scene.nodes[root].children.push(a);

    let imported = import(&scene, &ImportSettings::default()).unwrap();
    let model = &imported.model;

    assert_eq!(model.nodes.len(), 3);
    let names: Vec<&str> = model
        .depth_first()
        .into_iter()
        .filter_map(|h| model.get_node(h).map(|n| n.name.as_str()))
        .collect();
    assert_eq!(names, vec!["Root", "A", "Hidden"]);

    let hidden = model.find_node("Hidden").and_then(|h| model.get_node(h)).unwrap();
    assert!(!hidden.visible);
    assert!(model.root_node().visible);
}

#[test]
fn missing_child_indices_are_dropped() {
    init_logger();
    let mut rig = rig();
    let root = rig.scene.root.unwrap();
    rig.scene.nodes[root].children.push(99);
    rig.scene.nodes[rig.hips].children.insert(0, 42);

    let imported = import(&rig.scene, &ImportSettings::default()).unwrap();

    assert_eq!(imported.model.nodes.len(), 3);
    assert!(imported.model.find_node("").is_none());
    assert!(imported.diagnostics.duplicate_names.is_empty());
}

// ============================================================================
// Fatal Errors
// ============================================================================

#[test]
fn empty_scene_has_no_root() {
    let err = import(&RawScene::new(), &ImportSettings::default()).unwrap_err();
    assert_eq!(err, ImportError::MissingRoot);
    assert!(err.is_fatal());
}

#[test]
fn invalid_settings_are_rejected() {
    let settings = ImportSettings {
        weight_tolerance: -1.0,
        ..ImportSettings::default()
    };
    let err = import(&rig().scene, &settings).unwrap_err();
    assert!(matches!(err, ImportError::InvalidSettings(_)));
}

// ============================================================================
// Settings
// ============================================================================

#[test]
fn settings_default_to_centimeters_into_meters() {
    let settings = ImportSettings::default();
    assert_eq!(settings.source_unit, UnitLevel::Centimeter);
    assert_eq!(settings.unit_level, UnitLevel::Meter);
    assert!((settings.unit_scale() - 0.01).abs() < 1e-7);
    assert!(settings.validate().is_ok());
}

#[test]
fn settings_deserialize_with_defaults() {
    let settings: ImportSettings =
        serde_json::from_str(r#"{ "unit_level": "centimeter", "triangulate": false }"#).unwrap();

    assert_eq!(settings.unit_level, UnitLevel::Centimeter);
    assert!(!settings.triangulate);
    assert_eq!(settings.default_fps, 30.0);
    assert_eq!(settings.unit_scale(), 1.0);
}

#[test]
fn unit_scale_between_levels() {
    let settings = ImportSettings {
        source_unit: UnitLevel::Meter,
        unit_level: UnitLevel::Millimeter,
        ..ImportSettings::default()
    };
    assert!((settings.unit_scale() - 1000.0).abs() < 1e-3);

    let json = serde_json::to_string(&settings).unwrap();
    assert!(json.contains(r#""unit_level":"millimeter""#));
}
