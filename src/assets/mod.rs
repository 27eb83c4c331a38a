//! Source scene access and the import pipeline.
//!
//! - [`provider`]: the [`SceneProvider`] seam and its source data types
//! - [`raw`]: an in-memory provider
//! - [`importer`]: provider to [`Model`](crate::scene::Model)
//! - [`diagnostics`]: what the import recovered from

pub mod diagnostics;
pub mod importer;
pub mod provider;
pub mod raw;

pub use diagnostics::{ImportDiagnostics, MeshWeightWarning, SkippedUnit};
pub use importer::{ImportedModel, import};
pub use provider::{AnimationLayer, SceneProvider, SkinCluster, SourceMesh};
pub use raw::{RawNode, RawScene};
