//! Rotation Continuity Corrector
//!
//! `q` and `-q` describe the same orientation, but interpolating between
//! adjacent frames of opposite sign sweeps the long way around. The
//! corrector keeps every frame in the hemisphere of its predecessor.

use glam::{Quat, Vec3};

use crate::animation::curve::{AnimationCurveFrame, FrameSample};
use crate::scene::pivot::PivotChain;
use crate::scene::transform::euler_degrees_to_quat;

/// Running shortest-path state over a quaternion sequence.
///
/// The reference starts as the zero quaternion, so the first frame is
/// always kept as given.
#[derive(Debug, Clone, Copy)]
pub struct RotationContinuity {
    last: Quat,
}

impl RotationContinuity {
    #[must_use]
    pub fn new() -> Self {
        Self {
            last: Quat::from_xyzw(0.0, 0.0, 0.0, 0.0),
        }
    }

    /// Flips `q` when it points away from the previous frame, records it
    /// and returns it.
    pub fn push(&mut self, q: Quat) -> Quat {
        let q = if q.dot(self.last) < 0.0 { -q } else { q };
        self.last = q;
        q
    }
}

impl Default for RotationContinuity {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies [`RotationContinuity`] to a sequence in place.
pub fn enforce_shortest_path(rotations: &mut [Quat]) {
    let mut continuity = RotationContinuity::new();
    for q in rotations {
        *q = continuity.push(*q);
    }
}

/// Converts merged Euler samples into quaternion frames.
///
/// Each sample goes through the node's pivot rules first (pre- and
/// post-rotation, rotation limits), then becomes a quaternion, then is
/// made continuous with the previous frame.
#[must_use]
pub fn correct_rotation_track(
    samples: &[(u64, Vec3)],
    pivots: &PivotChain,
) -> Vec<AnimationCurveFrame> {
    let mut continuity = RotationContinuity::new();
    samples
        .iter()
        .map(|&(time, euler)| {
            let resolved = pivots.resolve_rotation(euler);
            let q = continuity.push(euler_degrees_to_quat(resolved));
            AnimationCurveFrame {
                time,
                sample: FrameSample::Quaternion(q),
            }
        })
        .collect()
}
