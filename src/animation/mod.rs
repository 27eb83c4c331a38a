//! Animation channel merging
//!
//! - [`curve`]: dense-frame output types (`Animation`, `AnimationCurveNode`)
//! - [`merge`]: per-axis sparse curves to dense `Vec3` records
//! - [`continuity`]: shortest-path quaternion correction for rotations

pub mod continuity;
pub mod curve;
pub mod merge;

pub use continuity::{RotationContinuity, correct_rotation_track, enforce_shortest_path};
pub use curve::{
    Animation, AnimationCurve, AnimationCurveFrame, AnimationCurveNode, ChannelKind, FrameSample,
};
pub use merge::{AxisCurves, AxisKey, merge_axes, time_union};
