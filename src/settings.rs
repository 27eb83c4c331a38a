//! Import Settings
//!
//! Configuration consumed by the import pipeline. The surrounding importer
//! decides file names and texture paths; the only things the core needs are
//! the unit conversion, the triangulation policy and the weight tolerance.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use scene_reconcile::settings::{ImportSettings, UnitLevel};
//!
//! // Default: centimeter sources converted to meters, fan triangulation on
//! let settings = ImportSettings::default();
//!
//! // Keep source units, refuse quads
//! let settings = ImportSettings {
//!     unit_level: UnitLevel::Centimeter,
//!     triangulate: false,
//!     ..Default::default()
//! };
//! ```
//!
//! Settings can also be read from JSON (unit names are lowercase, missing
//! fields fall back to defaults):
//!
//! ```json
//! { "unit_level": "millimeter", "weight_tolerance": 0.001 }
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{ImportError, Result};

// ---------------------------------------------------------------------------
// UnitLevel
// ---------------------------------------------------------------------------

/// Length unit of a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitLevel {
    Millimeter,
    Centimeter,
    Decimeter,
    #[default]
    Meter,
}

impl UnitLevel {
    /// Length of one unit expressed in meters.
    #[inline]
    #[must_use]
    pub fn meters(self) -> f32 {
        match self {
            UnitLevel::Millimeter => 0.001,
            UnitLevel::Centimeter => 0.01,
            UnitLevel::Decimeter => 0.1,
            UnitLevel::Meter => 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// ImportSettings
// ---------------------------------------------------------------------------

/// Settings for one import operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    /// Unit the output model is expressed in.
    pub unit_level: UnitLevel,

    /// Unit the source scene is authored in.
    pub source_unit: UnitLevel,

    /// Fan-triangulate polygons with more than three corners.
    ///
    /// When disabled, such a polygon aborts the import.
    pub triangulate: bool,

    /// Allowed distance of a vertex's total skin weight from 1.0 before it
    /// is reported.
    pub weight_tolerance: f32,

    /// Frame rate recorded on animations whose layer does not declare one.
    pub default_fps: f32,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            unit_level: UnitLevel::Meter,
            source_unit: UnitLevel::Centimeter,
            triangulate: true,
            weight_tolerance: 1e-4,
            default_fps: 30.0,
        }
    }
}

impl ImportSettings {
    /// Factor applied to source translations to express them in
    /// [`unit_level`](Self::unit_level).
    #[inline]
    #[must_use]
    pub fn unit_scale(&self) -> f32 {
        self.source_unit.meters() / self.unit_level.meters()
    }

    /// Checks that the numeric settings are usable.
    pub fn validate(&self) -> Result<()> {
        if !self.weight_tolerance.is_finite() || self.weight_tolerance < 0.0 {
            return Err(ImportError::InvalidSettings(format!(
                "weight_tolerance must be a finite non-negative number, got {}",
                self.weight_tolerance
            )));
        }
        if !self.default_fps.is_finite() || self.default_fps <= 0.0 {
            return Err(ImportError::InvalidSettings(format!(
                "default_fps must be positive, got {}",
                self.default_fps
            )));
        }
        Ok(())
    }
}
