//! Face triangulation
//!
//! Source polygons arrive with any number of corners. The reconciler only
//! accepts triangles, so polygons are checked here first:
//! - fewer than 3 corners: skipped and counted
//! - exactly 3: passed through
//! - more than 3: fan-triangulated around corner 0, or rejected when fan
//!   triangulation is disabled

use smallvec::SmallVec;

use crate::errors::{ImportError, Result};
use crate::resources::mesh::Triangle;

/// Corner indices of one source polygon.
pub type Polygon = SmallVec<[u32; 4]>;

/// Triangles built from source polygons.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Triangulation {
    pub triangles: Vec<Triangle>,
    /// For each triangle corner, the flat polygon-corner index it came from
    pub corner_sources: Vec<usize>,
    /// Number of polygon corners in the source, skipped polygons included
    pub source_corner_count: usize,
    /// Polygons dropped for having fewer than three corners
    pub skipped_polygons: usize,
}

/// Converts source polygons to triangles.
///
/// Fails with [`ImportError::NonTriangularFace`] when `fan` is false and a
/// polygon has more than three corners.
pub fn triangulate(mesh_name: &str, polygons: &[Polygon], fan: bool) -> Result<Triangulation> {
    let mut out = Triangulation {
        triangles: Vec::with_capacity(polygons.len()),
        corner_sources: Vec::with_capacity(polygons.len() * 3),
        ..Default::default()
    };

    for (face, polygon) in polygons.iter().enumerate() {
        let first = out.source_corner_count;
        out.source_corner_count += polygon.len();

        match polygon.len() {
            0..=2 => {
                log::warn!(
                    "Mesh '{mesh_name}': skipping degenerate polygon {face} with {} corners",
                    polygon.len()
                );
                out.skipped_polygons += 1;
            }
            3 => {
                out.triangles.push([polygon[0], polygon[1], polygon[2]]);
                out.corner_sources.extend([first, first + 1, first + 2]);
            }
            corners if fan => {
                for i in 2..corners {
                    out.triangles.push([polygon[0], polygon[i - 1], polygon[i]]);
                    out.corner_sources.extend([first, first + i - 1, first + i]);
                }
            }
            corners => {
                return Err(ImportError::NonTriangularFace {
                    mesh: mesh_name.to_string(),
                    face,
                    corners,
                });
            }
        }
    }

    Ok(out)
}
