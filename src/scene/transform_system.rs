//! Transform System
//!
//! World matrix propagation over the model hierarchy, decoupled from
//! [`Model`](crate::scene::Model): it only borrows the node arena.
//!
//! Nodes are visited with an explicit stack, parents before children, so
//! deep hierarchies cannot overflow the call stack.

use glam::Affine3A;
use slotmap::{SecondaryMap, SlotMap};

use crate::scene::NodeHandle;
use crate::scene::node::Node;

/// Computes the world matrix of every node reachable from `root`.
#[must_use]
pub fn world_matrices(
    nodes: &SlotMap<NodeHandle, Node>,
    root: NodeHandle,
) -> SecondaryMap<NodeHandle, Affine3A> {
    let mut worlds = SecondaryMap::with_capacity(nodes.len());

    // Work stack: (node handle, parent world matrix)
    let mut stack: Vec<(NodeHandle, Affine3A)> = Vec::with_capacity(64);
    stack.push((root, Affine3A::IDENTITY));

    while let Some((handle, parent_world)) = stack.pop() {
        let Some(node) = nodes.get(handle) else {
            continue;
        };

        let world = parent_world * node.transform.local_matrix();
        worlds.insert(handle, world);

        // Reverse push keeps children in declaration order
        for &child in node.children.iter().rev() {
            stack.push((child, world));
        }
    }

    worlds
}

/// World matrix of a single node, walking up its parent chain.
#[must_use]
pub fn world_matrix_of(nodes: &SlotMap<NodeHandle, Node>, handle: NodeHandle) -> Option<Affine3A> {
    let mut node = nodes.get(handle)?;
    let mut world = node.transform.local_matrix();
    while let Some(parent) = node.parent {
        node = nodes.get(parent)?;
        world = node.transform.local_matrix() * world;
    }
    Some(world)
}
