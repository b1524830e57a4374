//! The flat node record making up a [`Bvh`].
//!
//! [`Bvh`]: struct.Bvh.html

use std::ops::Range;

use crate::aabb::Aabb;

/// Sentinel child index marking a leaf. A node with both children equal to
/// [`LEAF`] holds its triangle range directly.
pub const LEAF: i32 = -1;

/// A node of the flat [`Bvh`]. Nodes are appended in construction order
/// (pre-order), so a child's index is always greater than its parent's and
/// the root sits at index 0.
///
/// The stored box is the box the node was *given* during construction, not
/// the union of its children's boxes. A child that had to stretch on the
/// split axis to enclose a straddling triangle may therefore poke outside its
/// parent's stored box. Every node's box still encloses every triangle in its
/// own range, so traversal may cull a subtree whenever the ray misses the
/// node's box, but it must not assume parent boxes contain child boxes.
///
/// [`Bvh`]: struct.Bvh.html
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BvhNode {
    /// The bounds of this node's triangle range.
    pub aabb: Aabb,

    /// Index of the left child, or [`LEAF`].
    pub left: i32,

    /// Index of the right child, or [`LEAF`].
    pub right: i32,

    /// Start of this node's contiguous range into the reordered triangle
    /// sequence.
    pub first_tri: usize,

    /// Length of this node's triangle range. For an internal node the two
    /// children's ranges tile this range exactly.
    pub tri_count: usize,
}

impl BvhNode {
    /// Creates a leaf node over `triangles[first_tri..first_tri + tri_count]`.
    pub fn leaf(aabb: Aabb, first_tri: usize, tri_count: usize) -> BvhNode {
        BvhNode {
            aabb,
            left: LEAF,
            right: LEAF,
            first_tri,
            tri_count,
        }
    }

    /// Returns true if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left == LEAF && self.right == LEAF
    }

    /// Returns the child indices of an internal node, or `None` for a leaf.
    pub fn children(&self) -> Option<(usize, usize)> {
        if self.is_leaf() {
            None
        } else {
            Some((self.left as usize, self.right as usize))
        }
    }

    /// The index range this node covers in the reordered triangle sequence.
    pub fn tri_range(&self) -> Range<usize> {
        self.first_tri..self.first_tri + self.tri_count
    }
}
