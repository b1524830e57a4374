//! Axis enum for indexing three-dimensional structures.

use std::ops::{Index, IndexMut};

use crate::{Point3, Real};

/// An `Axis` in a three-dimensional coordinate system.
/// Used to access [`Point3`] structs via index.
///
/// # Examples
/// ```
/// use mesh_bvh::axis::Axis;
///
/// let mut position = [1.0, 0.5, 42.0];
/// position[Axis::Y] *= 4.0;
///
/// assert_eq!(position[Axis::Y], 2.0);
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// Index of the X axis.
    X = 0,

    /// Index of the Y axis.
    Y = 1,

    /// Index of the Z axis.
    Z = 2,
}

impl Axis {
    /// Returns the next `Axis` in the X→Y→Z→X rotation. The split axis of a
    /// node's children is the successor of the node's own split axis.
    ///
    /// # Examples
    /// ```
    /// use mesh_bvh::axis::Axis;
    ///
    /// assert_eq!(Axis::X.next(), Axis::Y);
    /// assert_eq!(Axis::Z.next(), Axis::X);
    /// ```
    pub fn next(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::Z,
            Axis::Z => Axis::X,
        }
    }
}

/// Make slices indexable by [`Axis`].
impl Index<Axis> for [Real] {
    type Output = Real;

    fn index(&self, axis: Axis) -> &Real {
        &self[axis as usize]
    }
}

/// Make [`Point3`] indexable by [`Axis`].
impl Index<Axis> for Point3 {
    type Output = Real;

    fn index(&self, axis: Axis) -> &Real {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }
}

/// Make slices mutably accessible by [`Axis`].
impl IndexMut<Axis> for [Real] {
    fn index_mut(&mut self, axis: Axis) -> &mut Real {
        &mut self[axis as usize]
    }
}

/// Make [`Point3`] mutably accessible by [`Axis`].
impl IndexMut<Axis> for Point3 {
    fn index_mut(&mut self, axis: Axis) -> &mut Real {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
        }
    }
}
