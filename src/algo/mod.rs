//! Mesh processing algorithms.
//!
//! This module contains the structural operations on [`Mesh`](crate::mesh::Mesh),
//! each one a [`Modifier`]:
//!
//! - **Subdivision**: Catmull-Clark
//! - **Conway operators**: dual, kis, ambo and the composites built from them
//! - **Bevel**: chamfer every edge and vertex of a closed surface
//! - **Repair**: vertex welding, normal recomputation, triangulation, flipping
//! - **Transforms**: translate, scale, rotate, recenter
//!
//! plus read-only [`analysis`] helpers for checking the results.

pub mod analysis;
pub mod bevel;
pub mod conway;
pub mod modifier;
pub mod repair;
pub mod subdivide;
pub mod transform;

pub use modifier::{MeshApply, Modifier, Pipeline, Repeat};
