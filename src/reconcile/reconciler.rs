//! Attribute Reconciler
//!
//! Turns per-corner UV and normal data into a shared-vertex mesh.
//!
//! Triangles are walked in order. For every corner the reconciler looks at
//! the chain of the corner's original vertex:
//!
//! - head not yet claimed: the corner's values are written onto the original
//!   vertex and the head is claimed
//! - some vertex in the chain already carries the corner's values: it is
//!   reused
//! - otherwise the original vertex is copied, the corner's values written on
//!   the copy, and the copy appended to the chain and to the mesh
//!
//! All streams of a mesh are applied in one joint pass, so a vertex is only
//! reused when it matches the corner in every stream. New vertices inherit
//! the original's skin weights through [`WeightPropagator`].

use crate::errors::{ImportError, Result};
use crate::reconcile::chain::{ChainLookup, VertexChains};
use crate::reconcile::corner::AttributeStream;
use crate::reconcile::weights::WeightPropagator;
use crate::resources::mesh::{MAX_UV_CHANNELS, Mesh};

/// Outcome of reconciling one mesh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub original_vertices: usize,
    pub final_vertices: usize,
    /// Vertices created by splitting
    pub duplicated: usize,
    /// Longest chain (original plus duplicates) built for one vertex
    pub longest_chain: usize,
    /// Weight records copied onto duplicates
    pub weights_copied: usize,
    /// Labels of streams rejected before the pass
    pub dropped_streams: Vec<String>,
    /// Corners whose stream vertex index disagreed with the triangle
    pub mismatched_corners: usize,
}

/// Reconciles `streams` into `mesh`.
///
/// Streams whose length is not three entries per triangle, or UV streams on
/// a channel the vertex format lacks, are dropped with a warning. A triangle
/// index past the vertex array fails with
/// [`ImportError::IndexOutOfRange`] and leaves the mesh untouched.
pub fn reconcile(mesh: &mut Mesh, streams: &[AttributeStream]) -> Result<ReconcileStats> {
    let original_vertices = mesh.vertices.len();

    if let Some((triangle, index)) = mesh.find_dangling_index() {
        return Err(ImportError::IndexOutOfRange {
            mesh: mesh.name.clone(),
            triangle,
            index,
            vertex_count: original_vertices,
        });
    }

    let mut stats = ReconcileStats {
        original_vertices,
        final_vertices: original_vertices,
        longest_chain: usize::from(original_vertices > 0),
        ..Default::default()
    };

    let active = accepted_streams(mesh, streams, &mut stats);
    if active.is_empty() {
        return Ok(stats);
    }

    let Mesh {
        name,
        vertices,
        triangles,
        weight_collections,
        ..
    } = mesh;

    let mut chains = VertexChains::new(original_vertices);
    let mut propagator = WeightPropagator::new(weight_collections);

    for (t, triangle) in triangles.iter_mut().enumerate() {
        for (c, slot) in triangle.iter_mut().enumerate() {
            let corner = 3 * t + c;
            let original = *slot;

            for stream in &active {
                if stream.vertex_index(corner) != original {
                    stats.mismatched_corners += 1;
                }
            }

            let lookup = chains.find(original, |v| {
                let vertex = &vertices[v as usize];
                active.iter().all(|s| s.matches(vertex, corner))
            });

            *slot = match lookup {
                ChainLookup::Found(vertex) => vertex,
                ChainLookup::Unassigned => {
                    let vertex = &mut vertices[original as usize];
                    for stream in &active {
                        stream.write(vertex, corner);
                    }
                    chains.assign(original);
                    original
                }
                ChainLookup::Missing { tail } => {
                    let mut duplicate = vertices[original as usize];
                    for stream in &active {
                        stream.write(&mut duplicate, corner);
                    }
                    let new_index = vertices.len() as u32;
                    vertices.push(duplicate);
                    chains.append(tail, new_index);
                    chains.note_growth(original);
                    propagator.on_duplicate(original, new_index);
                    stats.duplicated += 1;
                    new_index
                }
            };
        }
    }

    if stats.mismatched_corners > 0 {
        log::warn!(
            "Mesh '{name}': {} corner attributes name a different vertex than their triangle; using the triangle's index",
            stats.mismatched_corners
        );
    }

    stats.final_vertices = vertices.len();
    stats.longest_chain = chains.longest();
    stats.weights_copied = propagator.copied();

    log::debug!(
        "Mesh '{name}': reconciled {} -> {} vertices ({} duplicated)",
        stats.original_vertices,
        stats.final_vertices,
        stats.duplicated
    );

    Ok(stats)
}

/// Filters out streams the pass cannot apply, recording each one dropped.
fn accepted_streams<'s>(
    mesh: &Mesh,
    streams: &'s [AttributeStream],
    stats: &mut ReconcileStats,
) -> Vec<&'s AttributeStream> {
    let expected = mesh.triangles.len() * 3;

    streams
        .iter()
        .filter(|stream| {
            if let AttributeStream::Uv { channel, .. } = stream
                && *channel >= MAX_UV_CHANNELS
            {
                log::warn!(
                    "Mesh '{}': dropping {}, only {MAX_UV_CHANNELS} UV channels are supported",
                    mesh.name,
                    stream.label()
                );
                stats.dropped_streams.push(stream.label());
                return false;
            }
            if stream.len() != expected {
                log::warn!(
                    "Mesh '{}': dropping {} with {} corners, expected {expected}",
                    mesh.name,
                    stream.label(),
                    stream.len()
                );
                stats.dropped_streams.push(stream.label());
                return false;
            }
            true
        })
        .collect()
}
