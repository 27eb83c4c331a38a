//! Vertex attribute reconciliation.
//!
//! - [`faces`]: polygon triangulation and corner remapping
//! - [`corner`]: per-corner attribute streams
//! - [`reconciler`]: the shared-vertex splitting pass
//! - [`weights`]: skin weight propagation and validation

mod chain;
pub mod corner;
pub mod faces;
pub mod reconciler;
pub mod weights;

pub use corner::{AttributeStream, CornerAttribute};
pub use faces::{Polygon, Triangulation, triangulate};
pub use reconciler::{ReconcileStats, reconcile};
pub use weights::{WeightPropagator, WeightReport, WeightWarning, validate_weights};
