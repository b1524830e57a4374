//! Common utilities shared by unit tests.
#![cfg(test)]

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::aabb::Aabb;
use crate::bvh::{Bvh, LEAF};
use crate::ray::Ray;
use crate::triangle::Triangle;
use crate::{Point3, Vector3, EPSILON};

/// A vector represented as a tuple.
pub type TupleVec = (f32, f32, f32);

/// Generate a `TupleVec` for [`proptest::strategy::Strategy`] from -10e10 to 10e10.
/// A small enough range to prevent most fp32 errors from breaking certain tests.
pub fn tuplevec_small_strategy() -> impl Strategy<Value = TupleVec> {
    (
        -10e10_f32..10e10_f32,
        -10e10_f32..10e10_f32,
        -10e10_f32..10e10_f32,
    )
}

/// Convert a `TupleVec` to a [`Point3`].
pub fn tuple_to_point(tpl: &TupleVec) -> Point3 {
    Point3::new(tpl.0, tpl.1, tpl.2)
}

/// Convert a `TupleVec` to a [`Vector3`].
pub fn tuple_to_vector(tpl: &TupleVec) -> Vector3 {
    Vector3::new(tpl.0, tpl.1, tpl.2)
}

/// The [-1,1] cube most scene generators scatter triangles into.
pub fn unit_cube_bounds() -> Aabb {
    Aabb::with_bounds(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0))
}

/// Deterministically scatters `n` smallish triangles inside `bounds`.
pub fn random_triangles(n: usize, bounds: &Aabb, seed: u64) -> Vec<Triangle> {
    let mut rng = StdRng::seed_from_u64(seed);
    let size = bounds.size();

    let mut random_point = |rng: &mut StdRng| {
        Point3::new(
            bounds.min.x + rng.random::<f32>() * size.x,
            bounds.min.y + rng.random::<f32>() * size.y,
            bounds.min.z + rng.random::<f32>() * size.z,
        )
    };
    // Other vertices jitter around the anchor, clamped back into bounds so
    // the build precondition holds.
    let mut jittered = |rng: &mut StdRng, anchor: &Point3| {
        Point3::new(
            (anchor.x + (rng.random::<f32>() - 0.5) * 0.2 * size.x).clamp(bounds.min.x, bounds.max.x),
            (anchor.y + (rng.random::<f32>() - 0.5) * 0.2 * size.y).clamp(bounds.min.y, bounds.max.y),
            (anchor.z + (rng.random::<f32>() - 0.5) * 0.2 * size.z).clamp(bounds.min.z, bounds.max.z),
        )
    };

    (0..n)
        .map(|_| {
            let a = random_point(&mut rng);
            let b = jittered(&mut rng, &a);
            let c = jittered(&mut rng, &a);
            Triangle::new(a, b, c)
        })
        .collect()
}

/// Generates a deterministic ray aimed from a scattered origin at a point
/// near the unit cube. `seed` is advanced on every call.
pub fn create_ray(seed: &mut u64) -> Ray {
    let mut rng = StdRng::seed_from_u64(0xB4D5_EED0 ^ *seed);
    *seed += 1;

    let origin = Point3::new(
        (rng.random::<f32>() - 0.5) * 10.0,
        (rng.random::<f32>() - 0.5) * 10.0,
        (rng.random::<f32>() - 0.5) * 10.0,
    );
    let target = Point3::new(
        rng.random::<f32>() * 2.0 - 1.0,
        rng.random::<f32>() * 2.0 - 1.0,
        rng.random::<f32>() * 2.0 - 1.0,
    );

    let mut direction = target - origin;
    if direction.norm() < 1e-6 {
        direction = Vector3::new(1.0, 0.0, 0.0);
    }
    Ray::new(origin, direction)
}

/// Asserts the structural invariants of a built tree against the reordered
/// triangle sequence it was built over:
///
/// - the root sits at index 0 and covers the whole input range,
/// - children are stored after their parent (pre-order), the left one first,
/// - an internal node's child ranges tile its own range exactly,
/// - leaves carry the sentinel in both child fields,
/// - every leaf's box encloses all vertices of its range,
/// - the leaf ranges together partition the input range.
pub fn assert_tree_invariants(bvh: &Bvh, triangles: &[Triangle]) {
    assert!(!bvh.nodes.is_empty());
    let root = &bvh.nodes[0];
    assert_eq!(root.first_tri, 0);
    assert_eq!(root.tri_count, triangles.len());

    let mut leaf_ranges = Vec::new();
    for (index, node) in bvh.nodes.iter().enumerate() {
        assert!(node.first_tri + node.tri_count <= triangles.len());
        assert_eq!(node.left == LEAF, node.right == LEAF);

        match node.children() {
            Some((left, right)) => {
                assert_eq!(left, index + 1);
                assert!(right > index);

                let l = &bvh.nodes[left];
                let r = &bvh.nodes[right];
                assert_eq!(l.first_tri, node.first_tri);
                assert_eq!(l.first_tri + l.tri_count, r.first_tri);
                assert_eq!(
                    r.first_tri + r.tri_count,
                    node.first_tri + node.tri_count
                );
            }
            None => {
                for triangle in &triangles[node.tri_range()] {
                    for vertex in triangle.vertices() {
                        assert!(
                            node.aabb.approx_contains_eps(vertex, EPSILON),
                            "leaf {} does not enclose one of its triangles",
                            index
                        );
                    }
                }
                leaf_ranges.push(node.tri_range());
            }
        }
    }

    // Zero-width ranges (forced empty leaves) sort before their sibling.
    leaf_ranges.sort_by_key(|range| (range.start, range.end));
    let mut next = 0;
    for range in leaf_ranges {
        assert_eq!(range.start, next);
        next = range.end;
    }
    assert_eq!(next, triangles.len());
}

/// Asserts that `reordered` is a permutation of `original`, comparing
/// triangles bit-exactly.
pub fn assert_is_permutation(original: &[Triangle], reordered: &[Triangle]) {
    assert_eq!(original.len(), reordered.len());

    fn key(triangle: &Triangle) -> [u32; 9] {
        [
            triangle.a.x.to_bits(),
            triangle.a.y.to_bits(),
            triangle.a.z.to_bits(),
            triangle.b.x.to_bits(),
            triangle.b.y.to_bits(),
            triangle.b.z.to_bits(),
            triangle.c.x.to_bits(),
            triangle.c.y.to_bits(),
            triangle.c.z.to_bits(),
        ]
    }

    let mut a: Vec<_> = original.iter().map(key).collect();
    let mut b: Vec<_> = reordered.iter().map(key).collect();
    a.sort_unstable();
    b.sort_unstable();
    assert_eq!(a, b);
}
