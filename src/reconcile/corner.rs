use glam::{Vec2, Vec3};

use crate::resources::mesh::Vertex;

/// Attribute value attached to one triangle corner, tied back to the
/// original shared vertex of that corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerAttribute<T> {
    pub vertex_index: u32,
    pub value: T,
}

impl<T> CornerAttribute<T> {
    #[inline]
    #[must_use]
    pub fn new(vertex_index: u32, value: T) -> Self {
        Self {
            vertex_index,
            value,
        }
    }
}

/// A per-corner stream: entry `3 * triangle + corner` belongs to that
/// triangle corner.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeStream {
    Uv {
        channel: usize,
        corners: Vec<CornerAttribute<Vec2>>,
    },
    Normal {
        corners: Vec<CornerAttribute<Vec3>>,
    },
}

/// Exact component equality. Zero is an ordinary value; NaN equals NaN so a
/// broken source value does not split on every corner.
fn same_components(a: &[f32], b: &[f32]) -> bool {
    a.iter()
        .zip(b)
        .all(|(x, y)| x == y || (x.is_nan() && y.is_nan()))
}

impl AttributeStream {
    #[must_use]
    pub fn uv(channel: usize, corners: Vec<CornerAttribute<Vec2>>) -> Self {
        AttributeStream::Uv { channel, corners }
    }

    #[must_use]
    pub fn normal(corners: Vec<CornerAttribute<Vec3>>) -> Self {
        AttributeStream::Normal { corners }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            AttributeStream::Uv { corners, .. } => corners.len(),
            AttributeStream::Normal { corners } => corners.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Short name for log messages.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            AttributeStream::Uv { channel, .. } => format!("uv{channel}"),
            AttributeStream::Normal { .. } => "normal".to_string(),
        }
    }

    /// Original vertex the source associates with `corner`.
    #[must_use]
    pub fn vertex_index(&self, corner: usize) -> u32 {
        match self {
            AttributeStream::Uv { corners, .. } => corners[corner].vertex_index,
            AttributeStream::Normal { corners } => corners[corner].vertex_index,
        }
    }

    /// Whether `vertex` already carries this stream's value for `corner`.
    #[must_use]
    pub fn matches(&self, vertex: &Vertex, corner: usize) -> bool {
        match self {
            AttributeStream::Uv { channel, corners } => same_components(
                &vertex.uv[*channel].to_array(),
                &corners[corner].value.to_array(),
            ),
            AttributeStream::Normal { corners } => {
                same_components(&vertex.normal.to_array(), &corners[corner].value.to_array())
            }
        }
    }

    /// Writes this stream's value for `corner` onto `vertex`.
    pub fn write(&self, vertex: &mut Vertex, corner: usize) {
        match self {
            AttributeStream::Uv { channel, corners } => {
                vertex.uv[*channel] = corners[corner].value;
            }
            AttributeStream::Normal { corners } => vertex.normal = corners[corner].value,
        }
    }

    /// Reorders the stream so that entry `i` is the old entry `sources[i]`.
    ///
    /// Used to move a per-polygon-corner stream onto triangle corners after
    /// triangulation. Returns None when a source index is out of range.
    #[must_use]
    pub fn remap(&self, sources: &[usize]) -> Option<Self> {
        fn pick<T: Copy>(corners: &[CornerAttribute<T>], sources: &[usize]) -> Option<Vec<CornerAttribute<T>>> {
            sources.iter().map(|&i| corners.get(i).copied()).collect()
        }

        Some(match self {
            AttributeStream::Uv { channel, corners } => AttributeStream::Uv {
                channel: *channel,
                corners: pick(corners, sources)?,
            },
            AttributeStream::Normal { corners } => AttributeStream::Normal {
                corners: pick(corners, sources)?,
            },
        })
    }
}
