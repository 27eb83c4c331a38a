//! Reconciled resource definitions
//!
//! Plain data handed to the scene model sink:
//! - Mesh: shared-vertex geometry with its skin weights
//! - Material: named material with resolved texture slots

pub mod material;
pub mod mesh;

pub use material::{Material, MaterialTexture};
pub use mesh::{MAX_UV_CHANNELS, Mesh, Triangle, Vertex};
