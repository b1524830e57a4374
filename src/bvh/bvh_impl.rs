//! This module defines [`Bvh`] and the recursive procedure that builds it
//! from a triangle sequence.
//!
//! [`Bvh`]: struct.Bvh.html

use log::debug;

use crate::aabb::Aabb;
use crate::axis::Axis;
use crate::bvh::BvhNode;
use crate::ray::Ray;
use crate::triangle::Triangle;
use crate::EPSILON;

/// Termination parameters for [`Bvh::build_with`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuildOptions {
    /// How many consecutive all-or-nothing splits a branch tolerates before
    /// it is forced into a leaf. A split that separates at least one triangle
    /// to either side resets the count for its children.
    pub max_failed_splits: u32,

    /// Depth at which a branch is forced into a leaf regardless of how many
    /// triangles remain, bounding recursion for geometry the midpoint
    /// heuristic keeps splitting lopsidedly without ever failing outright.
    pub max_depth: u32,
}

impl Default for BuildOptions {
    fn default() -> BuildOptions {
        BuildOptions {
            max_failed_splits: 2,
            max_depth: 64,
        }
    }
}

/// The [`Bvh`] data structure: a flat sequence of [`BvhNode`]s in pre-order,
/// with the root at index 0. Together with the triangle sequence it was built
/// over (reordered by the build), it forms the complete structure a GPU
/// traversal consumes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bvh {
    /// The list of nodes of the [`Bvh`].
    pub nodes: Vec<BvhNode>,
}

impl Bvh {
    /// Builds a [`Bvh`] over `triangles` with default [`BuildOptions`],
    /// reordering the slice in place. See [`Bvh::build_with`].
    pub fn build(triangles: &mut [Triangle], bounds: Aabb) -> Bvh {
        Bvh::build_with(triangles, bounds, &BuildOptions::default())
    }

    /// Builds a [`Bvh`] over `triangles`, permuting the slice in place so
    /// that every node's subtree occupies one contiguous index range. No
    /// triangle is duplicated or dropped.
    ///
    /// `bounds` must enclose every vertex of every triangle (see
    /// [`joint_bounds`]). This is a precondition, checked only by a
    /// `debug_assert!`: violating it does not panic in release builds but
    /// silently produces boxes that fail to enclose their geometry.
    ///
    /// [`joint_bounds`]: crate::triangle::joint_bounds
    pub fn build_with(triangles: &mut [Triangle], bounds: Aabb, options: &BuildOptions) -> Bvh {
        debug_assert!(
            triangles.iter().all(|triangle| {
                triangle
                    .vertices()
                    .into_iter()
                    .all(|vertex| bounds.approx_contains_eps(vertex, EPSILON))
            }),
            "build bounds do not enclose every triangle vertex"
        );

        let mut nodes = Vec::with_capacity(2 * triangles.len().max(1));
        let count = triangles.len();
        BvhNode::build(triangles, 0, count, bounds, Axis::X, 0, 0, options, &mut nodes);

        debug!(
            "built BVH over {} triangles: {} nodes, {} leaves",
            count,
            nodes.len(),
            nodes.iter().filter(|node| node.is_leaf()).count(),
        );

        Bvh { nodes }
    }

    /// Walks the flat node array with an explicit stack and returns the
    /// indices (into the reordered triangle sequence) of all triangles whose
    /// leaf boxes are hit by `ray`.
    ///
    /// This is the host-side counterpart of the shader traversal, returning
    /// candidates for an exact intersection test. Child boxes may poke
    /// outside their parent's stored box, but every box encloses all
    /// triangles of its own range, so culling on a missed box never loses a
    /// true intersection.
    pub fn traverse(&self, ray: &Ray) -> Vec<usize> {
        let mut indices = Vec::new();
        if self.nodes.is_empty() {
            return indices;
        }

        let mut stack = vec![0];
        while let Some(index) = stack.pop() {
            let node = &self.nodes[index];
            if !ray.intersects_aabb(&node.aabb) {
                continue;
            }
            match node.children() {
                Some((left, right)) => {
                    stack.push(right);
                    stack.push(left);
                }
                None => indices.extend(node.tri_range()),
            }
        }
        indices
    }
}

impl BvhNode {
    /// The build procedure sometimes needs to allocate a node's index before
    /// its children are resolved. A dummy created by this function serves the
    /// purpose of being overwritten later on.
    fn create_dummy() -> BvhNode {
        BvhNode::leaf(Aabb::empty(), 0, 0)
    }

    /// Builds a subtree over `triangles[first_tri..first_tri + count]`
    /// recursively and returns the index of its root in `nodes`.
    ///
    /// `aabb` is the box handed down by the parent; it is stored on the node
    /// unmodified. `axis` is the split axis for *this* node; children split
    /// on the next axis in the X→Y→Z→X rotation, independent of the box's
    /// shape.
    #[allow(clippy::too_many_arguments)]
    fn build(
        triangles: &mut [Triangle],
        first_tri: usize,
        count: usize,
        aabb: Aabb,
        axis: Axis,
        failed_splits: u32,
        depth: u32,
        options: &BuildOptions,
        nodes: &mut Vec<BvhNode>,
    ) -> usize {
        let node_index = nodes.len();
        nodes.push(BvhNode::create_dummy());

        // Nothing left to partition, or the depth cap is reached.
        if count <= 1 || depth >= options.max_depth {
            nodes[node_index] = BvhNode::leaf(aabb, first_tri, count);
            return node_index;
        }

        let pivot = (aabb.min[axis] + aabb.max[axis]) / 2.0;

        // Partition in place: triangles whose vertex mean lies below the
        // pivot move to the front of the range. While scanning, track how far
        // either side pokes past the pivot on the split axis.
        let mut mid = first_tri;
        let mut left_max = pivot;
        let mut right_min = pivot;
        for i in first_tri..first_tri + count {
            if triangles[i].centroid_on(axis) < pivot {
                left_max = left_max.max(triangles[i].max_on(axis));
                triangles.swap(i, mid);
                mid += 1;
            } else {
                right_min = right_min.min(triangles[i].min_on(axis));
            }
        }
        let left_count = mid - first_tri;
        let right_count = count - left_count;

        // A failed split left everything in one partition. Recursing once or
        // twice more can still succeed on another axis, but after
        // `max_failed_splits` consecutive failures the branch terminates as a
        // leaf to guarantee the build finishes.
        let failed = left_count == 0 || right_count == 0;
        let next_failed_splits = if failed { failed_splits + 1 } else { 0 };
        if failed && next_failed_splits >= options.max_failed_splits {
            nodes[node_index] = BvhNode::leaf(aabb, first_tri, count);
            return node_index;
        }

        // Each child gets the parent box halved at the pivot, stretched on
        // the split axis where a straddling triangle would otherwise stick
        // out of it.
        let mut left_aabb = aabb;
        left_aabb.max[axis] = left_max;
        let mut right_aabb = aabb;
        right_aabb.min[axis] = right_min;

        let left = BvhNode::build(
            triangles,
            first_tri,
            left_count,
            left_aabb,
            axis.next(),
            next_failed_splits,
            depth + 1,
            options,
            nodes,
        );
        let right = BvhNode::build(
            triangles,
            mid,
            right_count,
            right_aabb,
            axis.next(),
            next_failed_splits,
            depth + 1,
            options,
            nodes,
        );

        nodes[node_index] = BvhNode {
            aabb,
            left: left as i32,
            right: right as i32,
            first_tri,
            tri_count: count,
        };
        node_index
    }
}
