//! Core mesh data structures.
//!
//! This module provides the indexed polygon mesh representation and the
//! derived connectivity used by the algorithms in [`crate::algo`].
//!
//! # Overview
//!
//! The primary type is [`Mesh`], which stores vertex positions, faces of any
//! arity and an optional UV layer in flat vectors. Faces refer to vertices by
//! `usize` index and to the UV layer by a separate per-corner index list, so
//! several faces can share one UV or split a vertex across a seam.
//!
//! # Identity
//!
//! - Vertices are identified solely by their index.
//! - Faces carry a stable [`FaceId`] for removal by identity.
//! - Edges are never stored; [`EdgeKey`] and [`DirectedEdge`] name them and
//!   [`EdgeTable`] enumerates them.
//!
//! # Construction
//!
//! ```
//! use tessera::mesh::{build_from_polygons, Mesh};
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//! ];
//! let mesh: Mesh = build_from_polygons(&vertices, &[vec![0, 1, 2]]).unwrap();
//! assert_eq!(mesh.num_faces(), 1);
//! ```

mod builder;
mod face;
mod index;
mod polymesh;
mod topology;

pub use builder::{build_from_polygons, render_buffers, to_face_vertex, RenderBuffers};
pub use face::Face;
pub use index::{DirectedEdge, EdgeKey, FaceId};
pub use polymesh::Mesh;
pub use topology::{vertex_rings, Corner, EdgeEntry, EdgeTable};
