//! A crate which builds flat, GPU-uploadable bounding volume hierarchies
//! over triangle meshes.
//!
//! ## About
//!
//! A BVH (Bounding Volume Hierarchy) reduces ray/primitive intersection
//! search from O(n) to O(log2(n)) at the cost of building the tree once in
//! advance. This crate produces the *host-side* structure for a GPU ray
//! tracer: a flat node array (root at index 0, children referenced by index,
//! leaves marked by a sentinel) together with the triangle array reordered so
//! that every node owns one contiguous index range. Both arrays convert into
//! tightly packed plain-old-data records via the [`gpu`] module, ready to be
//! uploaded as shader storage buffers and walked iteratively in a shader.
//!
//! The build partitions by rotating through the X, Y and Z axes and splitting
//! at the spatial midpoint of the current box, which keeps construction cheap
//! and predictable; no surface-area heuristic is evaluated.
//!
//! ## Example
//!
//! ```
//! use mesh_bvh::bvh::Bvh;
//! use mesh_bvh::triangle::{joint_bounds, Triangle};
//! use mesh_bvh::Point3;
//!
//! let mut triangles = vec![
//!     Triangle::new(
//!         Point3::new(-1.0, 0.0, 0.0),
//!         Point3::new(-0.5, 1.0, 0.0),
//!         Point3::new(-0.25, 0.0, 0.5),
//!     ),
//!     Triangle::new(
//!         Point3::new(0.25, 0.0, 0.0),
//!         Point3::new(0.5, 1.0, 0.0),
//!         Point3::new(1.0, 0.0, 0.5),
//!     ),
//! ];
//!
//! let bounds = joint_bounds(&triangles);
//! let bvh = Bvh::build(&mut triangles, bounds);
//!
//! assert_eq!(bvh.nodes[0].first_tri, 0);
//! assert_eq!(bvh.nodes[0].tri_count, 2);
//! ```
//!
//! ## Features
//!
//! - `serde` (default **disabled**) - adds `Serialize` and `Deserialize`
//!   implementations for the geometry and node types

/// Point math type used by this crate. Type alias for [`nalgebra::Point3`].
pub type Point3 = nalgebra::Point3<f32>;

/// Vector math type used by this crate. Type alias for [`nalgebra::Vector3`].
pub type Vector3 = nalgebra::Vector3<f32>;

/// Float type used by this crate.
pub type Real = f32;

/// A minimal floating value used as a lower bound.
/// TODO: replace by/add ULPS/relative float comparison methods.
pub const EPSILON: Real = 0.00001;

pub mod aabb;
pub mod axis;
pub mod bvh;
pub mod gpu;
pub mod ray;
pub mod triangle;

#[cfg(test)]
mod testbase;
