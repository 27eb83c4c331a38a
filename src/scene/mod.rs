//! Scene model
//!
//! Hierarchy and skinning types of the reconciled model:
//! - Node: scene node (name, visibility, resolved local transform)
//! - Transform: flat translation / Euler rotation / scaling
//! - PivotChain: raw source transform primitives and their resolver
//! - WeightCollection: per-bone skin weights with bind-pose offset
//! - Model: node arena plus flat mesh, material and animation lists
//! - TransformSystem: world matrix propagation

pub mod model;
pub mod node;
pub mod pivot;
pub mod skin;
pub mod transform;
pub mod transform_system;

pub use model::Model;
pub use node::Node;
pub use pivot::{AxisLimits, PivotChain, bind_offset};
pub use skin::{WeightCollection, WeightData};
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
}
