//! Triangle primitives with precomputed face normals.

use crate::aabb::{Aabb, Bounded};
use crate::axis::Axis;
use crate::{Point3, Real, Vector3, EPSILON};

/// A triangle of a mesh: three vertex positions plus the precomputed unit
/// face normal. Immutable once constructed; the build procedure only ever
/// permutes whole triangles within their sequence.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Triangle {
    /// First vertex.
    pub a: Point3,

    /// Second vertex.
    pub b: Point3,

    /// Third vertex.
    pub c: Point3,

    /// Unit face normal, oriented by the winding `a`, `b`, `c`.
    /// Zero for degenerate (zero-area) triangles.
    pub normal: Vector3,
}

impl Triangle {
    /// Creates a new [`Triangle`] from three vertices, computing its face
    /// normal from the edge cross product.
    ///
    /// # Examples
    /// ```
    /// use mesh_bvh::triangle::Triangle;
    /// use mesh_bvh::Point3;
    ///
    /// let triangle = Triangle::new(
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(1.0, 0.0, 0.0),
    ///     Point3::new(0.0, 1.0, 0.0),
    /// );
    /// assert_eq!(triangle.normal.z, 1.0);
    /// ```
    pub fn new(a: Point3, b: Point3, c: Point3) -> Triangle {
        let normal = (b - a)
            .cross(&(c - a))
            .try_normalize(EPSILON)
            .unwrap_or_else(Vector3::zeros);
        Triangle { a, b, c, normal }
    }

    /// The mean of the three vertex coordinates on `axis`. This is the key by
    /// which the build procedure classifies a triangle as left or right of a
    /// pivot.
    pub fn centroid_on(&self, axis: Axis) -> Real {
        (self.a[axis] + self.b[axis] + self.c[axis]) / 3.0
    }

    /// The smallest vertex coordinate on `axis`.
    pub fn min_on(&self, axis: Axis) -> Real {
        self.a[axis].min(self.b[axis]).min(self.c[axis])
    }

    /// The largest vertex coordinate on `axis`.
    pub fn max_on(&self, axis: Axis) -> Real {
        self.a[axis].max(self.b[axis]).max(self.c[axis])
    }

    /// The three vertices of the triangle.
    pub fn vertices(&self) -> [&Point3; 3] {
        [&self.a, &self.b, &self.c]
    }
}

impl Bounded for Triangle {
    fn aabb(&self) -> Aabb {
        Aabb::empty().grow(&self.a).grow(&self.b).grow(&self.c)
    }
}

/// Accumulates the joint bounds of a whole triangle sequence. This is the box
/// a caller passes to the build procedure when the mesh loader does not
/// provide one itself.
pub fn joint_bounds(triangles: &[Triangle]) -> Aabb {
    let mut aabb = Aabb::empty();
    for triangle in triangles {
        aabb.join_mut(&triangle.aabb());
    }
    aabb
}
