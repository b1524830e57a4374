//! Plain-old-data mirrors of the triangle and node records, laid out for
//! shader storage buffer upload.
//!
//! Every vector field occupies a full 16-byte (vec4) slot so the records
//! match std430 layout without any reflection gymnastics: a renderer can
//! `bytemuck::cast_slice` the packed arrays straight into its buffer upload.

use bytemuck::{Pod, Zeroable};

use crate::bvh::{Bvh, BvhNode};
use crate::triangle::Triangle;
use crate::Point3;

/// A triangle as the GPU sees it: three vertex positions and the face
/// normal, each padded out to a vec4 slot. 64 bytes.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct GpuTriangle {
    /// First vertex, xyz + padding.
    pub v0: [f32; 4],

    /// Second vertex, xyz + padding.
    pub v1: [f32; 4],

    /// Third vertex, xyz + padding.
    pub v2: [f32; 4],

    /// Unit face normal, xyz + padding.
    pub normal: [f32; 4],
}

/// A node as the GPU sees it: the two box corners in vec4 slots followed by
/// the child indices and the triangle range. 48 bytes. Leaves keep the `-1`
/// sentinel in both child fields.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct GpuBvhNode {
    /// Minimum box corner, xyz + padding.
    pub bounds_min: [f32; 4],

    /// Maximum box corner, xyz + padding.
    pub bounds_max: [f32; 4],

    /// Index of the left child, or -1 for a leaf.
    pub left: i32,

    /// Index of the right child, or -1 for a leaf.
    pub right: i32,

    /// Start of the node's range in the reordered triangle buffer.
    pub first_tri: i32,

    /// Length of the node's triangle range.
    pub tri_count: i32,
}

fn vec4(p: &Point3) -> [f32; 4] {
    [p.x, p.y, p.z, 0.0]
}

impl From<&Triangle> for GpuTriangle {
    fn from(triangle: &Triangle) -> GpuTriangle {
        GpuTriangle {
            v0: vec4(&triangle.a),
            v1: vec4(&triangle.b),
            v2: vec4(&triangle.c),
            normal: [
                triangle.normal.x,
                triangle.normal.y,
                triangle.normal.z,
                0.0,
            ],
        }
    }
}

impl From<&BvhNode> for GpuBvhNode {
    fn from(node: &BvhNode) -> GpuBvhNode {
        // The buffer layout narrows the range to i32; a mesh large enough to
        // overflow it would corrupt every index past the cast.
        debug_assert!(
            node.first_tri <= i32::MAX as usize && node.tri_count <= i32::MAX as usize,
            "triangle range does not fit the i32 buffer layout"
        );
        GpuBvhNode {
            bounds_min: vec4(&node.aabb.min),
            bounds_max: vec4(&node.aabb.max),
            left: node.left,
            right: node.right,
            first_tri: node.first_tri as i32,
            tri_count: node.tri_count as i32,
        }
    }
}

impl Bvh {
    /// Packs the node array into its GPU layout. Order is preserved, so the
    /// root stays at index 0 and all child indices remain valid.
    pub fn pack_nodes(&self) -> Vec<GpuBvhNode> {
        self.nodes.iter().map(GpuBvhNode::from).collect()
    }
}

/// Packs a (reordered) triangle sequence into its GPU layout, preserving
/// order so the node ranges remain valid.
pub fn pack_triangles(triangles: &[Triangle]) -> Vec<GpuTriangle> {
    triangles.iter().map(GpuTriangle::from).collect()
}
