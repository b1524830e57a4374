//! Axis Aligned Bounding Boxes.

use std::ops::Index;

use crate::{Point3, Real, Vector3};

/// An axis-aligned bounding box described by its two extreme corners.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb {
    /// Minimum coordinates.
    pub min: Point3,

    /// Maximum coordinates.
    pub max: Point3,
}

/// A trait implemented by things which can be bounded by an [`Aabb`].
pub trait Bounded {
    /// Returns the [`Aabb`] bounding `self`.
    fn aabb(&self) -> Aabb;
}

impl Aabb {
    /// Creates a new [`Aabb`] with the given bounds.
    ///
    /// # Examples
    /// ```
    /// use mesh_bvh::aabb::Aabb;
    /// use mesh_bvh::Point3;
    ///
    /// let aabb = Aabb::with_bounds(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
    /// assert_eq!(aabb.min.x, -1.0);
    /// assert_eq!(aabb.max.x, 1.0);
    /// ```
    pub fn with_bounds(min: Point3, max: Point3) -> Aabb {
        Aabb { min, max }
    }

    /// Creates a new empty [`Aabb`]. Grown by any point, it becomes the
    /// [`Aabb`] of that point; joined with any box, it becomes that box.
    pub fn empty() -> Aabb {
        Aabb {
            min: Point3::new(Real::INFINITY, Real::INFINITY, Real::INFINITY),
            max: Point3::new(Real::NEG_INFINITY, Real::NEG_INFINITY, Real::NEG_INFINITY),
        }
    }

    /// Returns true if the [`Point3`] is inside the [`Aabb`].
    pub fn contains(&self, p: &Point3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    /// Returns true if the [`Point3`] is approximately inside the [`Aabb`]
    /// with respect to some `epsilon`.
    pub fn approx_contains_eps(&self, p: &Point3, epsilon: Real) -> bool {
        (p.x - self.min.x) > -epsilon
            && (p.x - self.max.x) < epsilon
            && (p.y - self.min.y) > -epsilon
            && (p.y - self.max.y) < epsilon
            && (p.z - self.min.z) > -epsilon
            && (p.z - self.max.z) < epsilon
    }

    /// Returns a new minimal [`Aabb`] which contains both this [`Aabb`] and `other`.
    pub fn join(&self, other: &Aabb) -> Aabb {
        Aabb::with_bounds(
            Point3::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            Point3::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        )
    }

    /// Joins this [`Aabb`] with `other` in place.
    pub fn join_mut(&mut self, other: &Aabb) {
        *self = self.join(other);
    }

    /// Returns a new minimal [`Aabb`] which contains both this [`Aabb`] and
    /// the [`Point3`] `other`.
    pub fn grow(&self, other: &Point3) -> Aabb {
        Aabb::with_bounds(
            Point3::new(
                self.min.x.min(other.x),
                self.min.y.min(other.y),
                self.min.z.min(other.z),
            ),
            Point3::new(
                self.max.x.max(other.x),
                self.max.y.max(other.y),
                self.max.z.max(other.z),
            ),
        )
    }

    /// Returns the size of this [`Aabb`] in all three dimensions.
    pub fn size(&self) -> Vector3 {
        self.max - self.min
    }

    /// Returns the center point of the [`Aabb`].
    pub fn center(&self) -> Point3 {
        self.min + (self.size() / 2.0)
    }
}

/// Make [`Aabb`]s indexable. `aabb[0]` gives a reference to the minimum bound.
/// All other indices return a reference to the maximum bound.
impl Index<usize> for Aabb {
    type Output = Point3;

    fn index(&self, index: usize) -> &Point3 {
        if index == 0 {
            &self.min
        } else {
            &self.max
        }
    }
}

/// Implementation of [`Bounded`] for single points.
impl Bounded for Point3 {
    fn aabb(&self) -> Aabb {
        Aabb::with_bounds(*self, *self)
    }
}
