use glam::{Quat, Vec3};

use crate::scene::NodeHandle;

/// Channel an animation curve node drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    Translation, // Maps to transform.translation
    Rotation,    // Maps to transform.rotation, stored as quaternions
    Scaling,     // Maps to transform.scaling
}

impl ChannelKind {
    pub const ALL: [ChannelKind; 3] = [
        ChannelKind::Translation,
        ChannelKind::Rotation,
        ChannelKind::Scaling,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ChannelKind::Translation => "Translation",
            ChannelKind::Rotation => "Rotation",
            ChannelKind::Scaling => "Scaling",
        }
    }
}

/// Value of one frame, selected by the channel kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameSample {
    /// Translation and scaling
    Vector3(Vec3),
    /// Rotation
    Quaternion(Quat),
}

impl FrameSample {
    #[inline]
    #[must_use]
    pub fn as_vec3(&self) -> Option<Vec3> {
        match self {
            FrameSample::Vector3(v) => Some(*v),
            FrameSample::Quaternion(_) => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_quat(&self) -> Option<Quat> {
        match self {
            FrameSample::Quaternion(q) => Some(*q),
            FrameSample::Vector3(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationCurveFrame {
    /// Milliseconds
    pub time: u64,
    pub sample: FrameSample,
}

/// Dense, time-ordered frames of one channel of one node.
#[derive(Debug, Clone)]
pub struct AnimationCurveNode {
    pub target: NodeHandle,
    pub kind: ChannelKind,
    pub frames: Vec<AnimationCurveFrame>,
}

impl AnimationCurveNode {
    #[must_use]
    pub fn new(target: NodeHandle, kind: ChannelKind, frames: Vec<AnimationCurveFrame>) -> Self {
        debug_assert!(
            frames.iter().all(|f| match kind {
                ChannelKind::Rotation => f.sample.as_quat().is_some(),
                _ => f.sample.as_vec3().is_some(),
            }),
            "frame samples do not match the {} channel",
            kind.name()
        );
        Self {
            target,
            kind,
            frames,
        }
    }

    /// Builds a translation or scaling node from merged vector samples.
    #[must_use]
    pub fn from_vectors(target: NodeHandle, kind: ChannelKind, samples: &[(u64, Vec3)]) -> Self {
        let frames = samples
            .iter()
            .map(|&(time, value)| AnimationCurveFrame {
                time,
                sample: FrameSample::Vector3(value),
            })
            .collect();
        Self::new(target, kind, frames)
    }

    #[inline]
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Time of the last frame, in milliseconds.
    #[inline]
    #[must_use]
    pub fn end_time(&self) -> u64 {
        self.frames.last().map_or(0, |f| f.time)
    }
}

/// All curve nodes of one animation layer.
#[derive(Debug, Clone, Default)]
pub struct AnimationCurve {
    pub nodes: Vec<AnimationCurveNode>,
}

impl AnimationCurve {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: AnimationCurveNode) {
        self.nodes.push(node);
    }

    /// Curve node driving `kind` on `target`, if any.
    #[must_use]
    pub fn find(&self, target: NodeHandle, kind: ChannelKind) -> Option<&AnimationCurveNode> {
        self.nodes
            .iter()
            .find(|n| n.target == target && n.kind == kind)
    }

    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.nodes.iter().map(AnimationCurveNode::frame_count).sum()
    }
}

/// One animation layer of the source scene.
#[derive(Debug, Clone)]
pub struct Animation {
    pub name: String,
    pub fps: f32,
    pub curve: AnimationCurve,
}

impl Animation {
    #[must_use]
    pub fn new(name: &str, fps: f32) -> Self {
        Self {
            name: name.to_string(),
            fps,
            curve: AnimationCurve::new(),
        }
    }

    /// Length of the animation, taken from the latest frame of any node.
    #[must_use]
    pub fn duration_ms(&self) -> u64 {
        self.curve
            .nodes
            .iter()
            .map(AnimationCurveNode::end_time)
            .max()
            .unwrap_or(0)
    }
}
