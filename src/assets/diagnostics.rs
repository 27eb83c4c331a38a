use std::fmt;

/// A vertex of a named mesh whose skin weights do not sum to 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshWeightWarning {
    pub mesh: String,
    pub vertex: u32,
    pub total: f32,
}

/// A unit (mesh or skin cluster) left out of the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedUnit {
    pub name: String,
    pub reason: String,
}

impl SkippedUnit {
    #[must_use]
    pub fn new(name: &str, reason: impl fmt::Display) -> Self {
        Self {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Everything the import recovered from instead of failing.
///
/// Structural problems skip a unit and land in `skipped_*`. Data quality
/// problems are repaired best effort and only counted or listed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportDiagnostics {
    // === Structural ===
    pub skipped_meshes: Vec<SkippedUnit>,
    pub skipped_bones: Vec<SkippedUnit>,

    // === Data quality ===
    pub weight_warnings: Vec<MeshWeightWarning>,
    /// Weight records referencing vertices the mesh does not have
    pub out_of_range_weights: usize,
    /// "mesh: stream" labels of attribute streams that were not applied
    pub dropped_streams: Vec<String>,
    pub skipped_polygons: usize,
    pub mismatched_corners: usize,
    pub duplicate_names: Vec<String>,

    // === Reconciliation ===
    pub duplicated_vertices: usize,
}

impl ImportDiagnostics {
    /// True when nothing was skipped, dropped or reported.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.skipped_meshes.is_empty()
            && self.skipped_bones.is_empty()
            && self.weight_warnings.is_empty()
            && self.out_of_range_weights == 0
            && self.dropped_streams.is_empty()
            && self.skipped_polygons == 0
            && self.mismatched_corners == 0
            && self.duplicate_names.is_empty()
    }
}

impl fmt::Display for ImportDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Import diagnostics:")?;
        writeln!(f, "  Skipped meshes:      {}", self.skipped_meshes.len())?;
        writeln!(f, "  Skipped bones:       {}", self.skipped_bones.len())?;
        writeln!(f, "  Weight warnings:     {}", self.weight_warnings.len())?;
        writeln!(f, "  Dropped streams:     {}", self.dropped_streams.len())?;
        writeln!(f, "  Skipped polygons:    {}", self.skipped_polygons)?;
        writeln!(f, "  Duplicated vertices: {}", self.duplicated_vertices)?;
        for unit in self.skipped_meshes.iter().chain(&self.skipped_bones) {
            writeln!(f, "  - {}: {}", unit.name, unit.reason)?;
        }
        Ok(())
    }
}
