//! This module defines a [`Bvh`] and its build procedure.
//!
//! [`Bvh`]: struct.Bvh.html

mod bvh_impl;
mod bvh_node;

pub use self::bvh_impl::*;
pub use self::bvh_node::*;
