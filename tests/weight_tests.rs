//! Skin weight tests
//!
//! Tests for:
//! - Weight propagation onto duplicated vertices
//! - Per-vertex weight sum validation
//! - Bind-pose offsets on weight collections

use glam::{Mat4, Vec2, Vec3};
use scene_reconcile::reconcile::{
    AttributeStream, CornerAttribute, WeightPropagator, reconcile, validate_weights,
};
use scene_reconcile::resources::{Mesh, Vertex};
use scene_reconcile::scene::{NodeHandle, WeightCollection, WeightData, bind_offset};
use slotmap::SlotMap;

// ============================================================================
// Helpers
// ============================================================================

fn bones(count: usize) -> Vec<NodeHandle> {
    let mut arena: SlotMap<NodeHandle, ()> = SlotMap::with_key();
    (0..count).map(|_| arena.insert(())).collect()
}

/// Two triangles sharing vertex 0, whose UV differs between them.
fn seamed_mesh() -> (Mesh, AttributeStream) {
    let mut mesh = Mesh::new("Skinned");
    mesh.vertices = (0..4)
        .map(|i| Vertex::from_position(Vec3::splat(i as f32)))
        .collect();
    mesh.triangles = vec![[0, 1, 2], [0, 2, 3]];

    let half = Vec2::splat(0.5);
    let values = [
        (0, Vec2::ZERO),
        (1, half),
        (2, half),
        (0, Vec2::ONE),
        (2, half),
        (3, half),
    ];
    let stream = AttributeStream::uv(
        0,
        values
            .iter()
            .map(|&(v, uv)| CornerAttribute::new(v, uv))
            .collect(),
    );
    (mesh, stream)
}

// ============================================================================
// Propagation
// ============================================================================

#[test]
fn duplicate_inherits_weights_from_every_collection() {
    let handles = bones(2);
    let (mut mesh, stream) = seamed_mesh();
    mesh.weight_collections = vec![
        WeightCollection::new(
            handles[0],
            Mat4::IDENTITY,
            vec![WeightData::new(0, 0.25), WeightData::new(1, 1.0)],
        ),
        WeightCollection::new(
            handles[1],
            Mat4::IDENTITY,
            vec![
                WeightData::new(0, 0.75),
                WeightData::new(2, 1.0),
                WeightData::new(3, 1.0),
            ],
        ),
    ];

    let stats = reconcile(&mut mesh, &[stream]).unwrap();

    assert_eq!(stats.duplicated, 1);
    assert_eq!(stats.weights_copied, 2);
    assert_eq!(mesh.vertex_count(), 5);

    let first = &mesh.weight_collections[0];
    let second = &mesh.weight_collections[1];
    assert_eq!(first.bone, handles[0]);
    assert_eq!(first.weight_of(4), 0.25);
    assert_eq!(second.weight_of(4), 0.75);
    // Original weights untouched
    assert_eq!(first.weight_of(0), 0.25);
    assert_eq!(mesh.weight_record_count(), 7);

    assert!(validate_weights(&mesh, 1e-4).is_clean());
}

#[test]
fn unweighted_vertex_duplicates_without_records() {
    let handles = bones(1);
    let (mut mesh, stream) = seamed_mesh();
    mesh.weight_collections = vec![WeightCollection::new(
        handles[0],
        Mat4::IDENTITY,
        vec![WeightData::new(1, 1.0)],
    )];

    let stats = reconcile(&mut mesh, &[stream]).unwrap();

    assert_eq!(stats.duplicated, 1);
    assert_eq!(stats.weights_copied, 0);
    assert_eq!(mesh.weight_record_count(), 1);
}

#[test]
fn propagator_copies_from_original_index() {
    let handles = bones(1);
    let mut collections = vec![WeightCollection::new(
        handles[0],
        Mat4::IDENTITY,
        vec![WeightData::new(2, 0.5)],
    )];

    let mut propagator = WeightPropagator::new(&mut collections);
    propagator.on_duplicate(2, 10);
    propagator.on_duplicate(2, 11);
    propagator.on_duplicate(5, 12);
    assert_eq!(propagator.copied(), 2);

    let indices: Vec<u32> = collections[0].weights.iter().map(|w| w.vertex_index).collect();
    assert_eq!(indices, vec![2, 10, 11]);
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn unbalanced_vertices_are_reported() {
    let handles = bones(2);
    let mut mesh = Mesh::new("Arm");
    mesh.vertices = vec![Vertex::default(); 4];
    mesh.weight_collections = vec![
        WeightCollection::new(
            handles[0],
            Mat4::IDENTITY,
            vec![WeightData::new(0, 0.6), WeightData::new(1, 0.5)],
        ),
        WeightCollection::new(
            handles[1],
            Mat4::IDENTITY,
            vec![WeightData::new(0, 0.4), WeightData::new(2, 1.00005)],
        ),
    ];

    let report = validate_weights(&mesh, 1e-4);

    // Vertex 2 is within tolerance, vertex 3 has no weights at all
    assert_eq!(report.unbalanced.len(), 1);
    assert_eq!(report.unbalanced[0].vertex, 1);
    assert!((report.unbalanced[0].total - 0.5).abs() < 1e-6);
    assert_eq!(report.out_of_range, 0);
}

#[test]
fn weights_past_vertex_array_are_counted() {
    let handles = bones(1);
    let mut mesh = Mesh::new("Broken");
    mesh.vertices = vec![Vertex::default(); 2];
    mesh.weight_collections = vec![WeightCollection::new(
        handles[0],
        Mat4::IDENTITY,
        vec![WeightData::new(0, 1.0), WeightData::new(9, 1.0)],
    )];

    let report = validate_weights(&mesh, 1e-4);

    assert_eq!(report.out_of_range, 1);
    assert!(report.unbalanced.is_empty());
    assert!(!report.is_clean());
}

#[test]
fn unskinned_mesh_validates_clean() {
    let mut mesh = Mesh::new("Static");
    mesh.vertices = vec![Vertex::default(); 3];
    assert!(!mesh.is_skinned());
    assert!(validate_weights(&mesh, 1e-4).is_clean());

    let handles = bones(1);
    mesh.weight_collections
        .push(WeightCollection::new(handles[0], Mat4::IDENTITY, Vec::new()));
    assert!(mesh.is_skinned());
}

// ============================================================================
// Bind Pose
// ============================================================================

#[test]
fn bind_offset_maps_mesh_space_into_bone_space() {
    let cluster_bind = Mat4::from_translation(Vec3::new(0.0, 2.0, 0.0));
    let mesh_bind = Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0));
    let offset = bind_offset(cluster_bind, mesh_bind, Mat4::IDENTITY);

    let p = offset.transform_point3(Vec3::ZERO);
    assert!(p.abs_diff_eq(Vec3::new(1.0, -2.0, 0.0), 1e-5));

    let handles = bones(1);
    let collection = WeightCollection::new(handles[0], offset, Vec::new());
    assert!(collection.bind_matrix().abs_diff_eq(offset.inverse(), 1e-5));
}

#[test]
fn geometric_transform_applies_first() {
    let geometric = Mat4::from_scale(Vec3::splat(2.0));
    let offset = bind_offset(Mat4::IDENTITY, Mat4::IDENTITY, geometric);
    let p = offset.transform_point3(Vec3::ONE);
    assert!(p.abs_diff_eq(Vec3::splat(2.0), 1e-5));
}
