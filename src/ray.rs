//! Rays used to validate the structure host-side. The production traversal
//! runs in a shader; this module mirrors the same box and triangle tests so
//! the tree can be exercised without a GPU.

use crate::aabb::Aabb;
use crate::{Point3, Real, Vector3, EPSILON};

/// A struct which defines a ray and some of its cached values.
#[derive(Debug)]
pub struct Ray {
    /// The ray origin.
    pub origin: Point3,

    /// The ray direction.
    pub direction: Vector3,

    /// Inverse (1/x) ray direction. Cached for use in [`Aabb`] intersections.
    inv_direction: Vector3,

    /// Sign of the direction. 0 means positive, 1 means negative.
    /// Cached for use in [`Aabb`] intersections.
    sign: nalgebra::Vector3<usize>,
}

impl Ray {
    /// Creates a new [`Ray`] from an `origin` and a `direction`.
    /// `direction` will be normalized.
    ///
    /// # Examples
    /// ```
    /// use mesh_bvh::ray::Ray;
    /// use mesh_bvh::{Point3, Vector3};
    ///
    /// let origin = Point3::new(0.0, 0.0, 0.0);
    /// let direction = Vector3::new(1.0, 0.0, 0.0);
    /// let ray = Ray::new(origin, direction);
    ///
    /// assert_eq!(ray.origin, origin);
    /// assert_eq!(ray.direction, direction);
    /// ```
    pub fn new(origin: Point3, direction: Vector3) -> Ray {
        let direction = direction.normalize();
        Ray {
            origin,
            direction,
            inv_direction: Vector3::new(1.0 / direction.x, 1.0 / direction.y, 1.0 / direction.z),
            sign: nalgebra::Vector3::new(
                (direction.x < 0.0) as usize,
                (direction.y < 0.0) as usize,
                (direction.z < 0.0) as usize,
            ),
        }
    }

    /// Tests the intersection of a [`Ray`] with an [`Aabb`] using the
    /// optimized slab algorithm with cached direction signs.
    ///
    /// # Examples
    /// ```
    /// use mesh_bvh::aabb::Aabb;
    /// use mesh_bvh::ray::Ray;
    /// use mesh_bvh::{Point3, Vector3};
    ///
    /// let ray = Ray::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
    ///
    /// let point1 = Point3::new(99.9, -1.0, -1.0);
    /// let point2 = Point3::new(100.1, 1.0, 1.0);
    /// let aabb = Aabb::with_bounds(point1, point2);
    ///
    /// assert!(ray.intersects_aabb(&aabb));
    /// ```
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        let mut ray_min = (aabb[self.sign.x].x - self.origin.x) * self.inv_direction.x;
        let mut ray_max = (aabb[1 - self.sign.x].x - self.origin.x) * self.inv_direction.x;

        let y_min = (aabb[self.sign.y].y - self.origin.y) * self.inv_direction.y;
        let y_max = (aabb[1 - self.sign.y].y - self.origin.y) * self.inv_direction.y;

        if (ray_min > y_max) || (y_min > ray_max) {
            return false;
        }

        if y_min > ray_min {
            ray_min = y_min;
        }

        if y_max < ray_max {
            ray_max = y_max;
        }

        let z_min = (aabb[self.sign.z].z - self.origin.z) * self.inv_direction.z;
        let z_max = (aabb[1 - self.sign.z].z - self.origin.z) * self.inv_direction.z;

        if (ray_min > z_max) || (z_min > ray_max) {
            return false;
        }

        if z_max < ray_max {
            ray_max = z_max;
        }

        ray_max > 0.0
    }

    /// Implementation of the
    /// [Möller–Trumbore triangle/ray intersection algorithm](https://en.wikipedia.org/wiki/M%C3%B6ller%E2%80%93Trumbore_intersection_algorithm).
    /// Does not cull backfaces, so the vertex winding does not matter.
    pub fn intersects_triangle(&self, a: &Point3, b: &Point3, c: &Point3) -> bool {
        let a_to_b = b - a;
        let a_to_c = c - a;

        // Begin calculating determinant - also used to calculate the u parameter.
        // u_vec lies in the view plane.
        let u_vec = self.direction.cross(&a_to_c);

        // If the determinant is near zero, the ray lies in the plane of the triangle.
        let det = a_to_b.dot(&u_vec);
        if det.abs() < EPSILON {
            return false;
        }

        let inv_det = 1.0 / det;

        // Vector from point a to the ray origin.
        let a_to_origin = self.origin - a;

        // Calculate the u parameter and test bounds.
        let u = a_to_origin.dot(&u_vec) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return false;
        }

        // Prepare to test the v parameter.
        let v_vec = a_to_origin.cross(&a_to_b);

        // Calculate the v parameter and test bounds.
        let v = self.direction.dot(&v_vec) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return false;
        }

        let dist: Real = a_to_c.dot(&v_vec) * inv_det;
        dist > EPSILON
    }
}
