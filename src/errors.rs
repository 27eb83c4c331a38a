//! Error Types
//!
//! This module defines the error types used throughout the import core.
//!
//! # Overview
//!
//! [`ImportError`] covers the failure modes of a single import:
//! - Precondition violations that abort the whole import (missing root,
//!   non-triangular faces with triangulation disabled, invalid settings)
//! - Structural problems local to one mesh or one skin cluster
//!
//! Structural errors are produced as values by the per-unit stages and are
//! caught by the importer, which logs them and skips the unit. Only
//! precondition violations reach the caller.
//!
//! # Usage
//!
//! ```rust,ignore
//! use scene_reconcile::errors::{ImportError, Result};
//!
//! fn import_something() -> Result<()> {
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for scene reconciliation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImportError {
    // ========================================================================
    // Whole-Scene Errors (fatal for the import)
    // ========================================================================
    /// The provider exposes no root node.
    #[error("Scene has no root node")]
    MissingRoot,

    /// Import settings failed validation.
    #[error("Invalid import settings: {0}")]
    InvalidSettings(String),

    /// A face with more than three corners reached the reconciler.
    #[error("Mesh '{mesh}': face {face} has {corners} corners, expected a triangle")]
    NonTriangularFace {
        /// Name of the mesh being imported
        mesh: String,
        /// Index of the offending source polygon
        face: usize,
        /// Number of corners on that polygon
        corners: usize,
    },

    // ========================================================================
    // Per-Mesh Structural Errors (the mesh is skipped)
    // ========================================================================
    /// A triangle references a vertex that does not exist.
    #[error(
        "Mesh '{mesh}': triangle {triangle} references vertex {index}, but the mesh has {vertex_count} vertices"
    )]
    IndexOutOfRange {
        /// Name of the mesh being reconciled
        mesh: String,
        /// Index of the triangle holding the bad index
        triangle: usize,
        /// The invalid vertex index
        index: u32,
        /// Number of vertices in the mesh
        vertex_count: usize,
    },

    // ========================================================================
    // Per-Bone Structural Errors (the cluster is skipped)
    // ========================================================================
    /// A skin cluster carries no bone link.
    #[error("Mesh '{mesh}': skin cluster {cluster} has no linked bone node")]
    UnlinkedCluster {
        /// Name of the skinned mesh
        mesh: String,
        /// Index of the cluster on that mesh
        cluster: usize,
    },

    /// A skin cluster links a node that was never registered during the
    /// hierarchy pass.
    #[error("Mesh '{mesh}': skin cluster {cluster} points at an unregistered node")]
    UnregisteredBone {
        /// Name of the skinned mesh
        mesh: String,
        /// Index of the cluster on that mesh
        cluster: usize,
    },
}

impl ImportError {
    /// Whether the error aborts the whole import rather than one unit.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ImportError::MissingRoot
                | ImportError::InvalidSettings(_)
                | ImportError::NonTriangularFace { .. }
        )
    }
}

/// Alias for `Result<T, ImportError>`.
pub type Result<T> = std::result::Result<T, ImportError>;
