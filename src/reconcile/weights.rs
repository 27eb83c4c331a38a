//! Weight Propagator
//!
//! Keeps skin weights attached to every vertex the reconciler creates, and
//! checks per-vertex weight sums once reconciliation is done.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::resources::mesh::Mesh;
use crate::scene::skin::{WeightCollection, WeightData};

/// Copies weight records onto duplicated vertices.
///
/// Built once per mesh from the weights of the original vertices. Duplicates
/// are always copies of an original vertex, so the index never needs
/// updating during the pass.
pub struct WeightPropagator<'a> {
    collections: &'a mut [WeightCollection],
    /// original vertex -> (collection index, weight)
    influences: FxHashMap<u32, SmallVec<[(usize, f32); 4]>>,
    copied: usize,
}

impl<'a> WeightPropagator<'a> {
    #[must_use]
    pub fn new(collections: &'a mut [WeightCollection]) -> Self {
        let mut influences: FxHashMap<u32, SmallVec<[(usize, f32); 4]>> = FxHashMap::default();
        for (collection_index, collection) in collections.iter().enumerate() {
            for w in &collection.weights {
                influences
                    .entry(w.vertex_index)
                    .or_default()
                    .push((collection_index, w.weight));
            }
        }

        Self {
            collections,
            influences,
            copied: 0,
        }
    }

    /// Gives `new_index` every weight `source` has, in every collection.
    pub fn on_duplicate(&mut self, source: u32, new_index: u32) {
        let Some(entries) = self.influences.get(&source) else {
            return;
        };
        for &(collection_index, weight) in entries {
            self.collections[collection_index]
                .weights
                .push(WeightData::new(new_index, weight));
            self.copied += 1;
        }
    }

    /// Number of weight records created so far.
    #[must_use]
    pub fn copied(&self) -> usize {
        self.copied
    }
}

// ============================================================================
// Validation
// ============================================================================

/// A vertex whose weights do not add up to 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightWarning {
    pub vertex: u32,
    pub total: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightReport {
    pub unbalanced: Vec<WeightWarning>,
    /// Weight records pointing past the vertex array
    pub out_of_range: usize,
}

impl WeightReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.unbalanced.is_empty() && self.out_of_range == 0
    }
}

/// Sums weights per vertex across all collections of `mesh` and reports
/// every vertex whose non-zero total is further than `tolerance` from 1.0.
///
/// Vertices without any weight are not reported.
#[must_use]
pub fn validate_weights(mesh: &Mesh, tolerance: f32) -> WeightReport {
    let mut report = WeightReport::default();
    if mesh.weight_collections.is_empty() {
        return report;
    }

    let mut totals = vec![0.0_f32; mesh.vertices.len()];
    for w in mesh.weight_collections.iter().flat_map(|c| &c.weights) {
        match totals.get_mut(w.vertex_index as usize) {
            Some(total) => *total += w.weight,
            None => report.out_of_range += 1,
        }
    }

    for (vertex, &total) in totals.iter().enumerate() {
        if total != 0.0 && (total - 1.0).abs() > tolerance {
            log::debug!("Mesh '{}': vertex {vertex} weights sum to {total}", mesh.name);
            report.unbalanced.push(WeightWarning {
                vertex: vertex as u32,
                total,
            });
        }
    }

    if !report.unbalanced.is_empty() {
        log::warn!(
            "Mesh '{}': {} vertices have weights that do not sum to 1.0",
            mesh.name,
            report.unbalanced.len()
        );
    }
    if report.out_of_range > 0 {
        log::warn!(
            "Mesh '{}': {} weight records reference missing vertices",
            mesh.name,
            report.out_of_range
        );
    }

    report
}
