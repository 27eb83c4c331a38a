//! Utility Module
//!
//! - [`stats`]: element counts of a model and a printable hierarchy dump

pub mod stats;

pub use stats::{HierarchyDump, ModelStats};
