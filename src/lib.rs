//! # Tessera
//!
//! Polygon mesh modeling: a face-vertex mesh that holds polygons of any
//! arity, and a library of topological modifiers that rewrite it.
//!
//! Tessera is built around one small contract, [`Modifier`](algo::Modifier):
//! a value that rewrites a mesh in place and hands it back. Subdivision,
//! the Conway polyhedron operators, bevel and the repair passes all
//! implement it, so they chain fluently and compose into pipelines.
//!
//! ## Features
//!
//! - **Face-vertex mesh**: positions plus ordered polygons with stable face ids
//! - **Catmull-Clark subdivision**: deterministic, optionally parallel (`parallel` feature)
//! - **Conway operators**: dual, kis, ambo and their composites, with a notation parser
//! - **Seed solids**: the five platonic solids and a UV-mapped plane
//! - **Wavefront OBJ** reading and writing
//!
//! ## Quick Start
//!
//! ```no_run
//! use tessera::prelude::*;
//! use tessera::algo::subdivide::CatmullClark;
//!
//! // Load a mesh
//! let mut mesh = tessera::io::load("model.obj").unwrap();
//!
//! // Subdivide twice
//! mesh.apply(&CatmullClark::new(2)).unwrap();
//! println!("Faces: {}", mesh.num_faces());
//!
//! // Save the mesh
//! tessera::io::save(&mesh, "smooth.obj").unwrap();
//! ```
//!
//! ## Building Meshes Programmatically
//!
//! ```
//! use tessera::prelude::*;
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(0.5, 0.5, 1.0),
//! ];
//!
//! // A square pyramid: one quad and four triangles
//! let faces = vec![
//!     vec![0, 3, 2, 1],
//!     vec![0, 1, 4],
//!     vec![1, 2, 4],
//!     vec![2, 3, 4],
//!     vec![3, 0, 4],
//! ];
//!
//! let mesh = build_from_polygons(&vertices, &faces).unwrap();
//! assert_eq!(mesh.num_vertices(), 5);
//! assert_eq!(mesh.num_faces(), 5);
//! ```
//!
//! ## Conway Notation
//!
//! ```
//! use tessera::algo::conway::ConwayNotation;
//!
//! // Truncated icosahedron
//! let ball = ConwayNotation::parse("tI").unwrap().build().unwrap();
//! assert_eq!(ball.num_faces(), 32);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod geometry;
pub mod io;
pub mod mesh;
pub mod primitives;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use tessera::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::{MeshApply, Modifier, Pipeline, Repeat};
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{build_from_polygons, to_face_vertex, DirectedEdge, EdgeKey, Face, FaceId, Mesh};
}

// Re-export nalgebra types for convenience
pub use nalgebra;

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use crate::algo::analysis;
    use crate::algo::conway::{Dual, Kis};
    use crate::algo::subdivide::CatmullClark;
    use nalgebra::Point3;

    #[test]
    fn test_pyramid_round_trip() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.5, 0.5, 1.0),
        ];
        let faces = vec![vec![0, 3, 2, 1], vec![0, 1, 4], vec![1, 2, 4], vec![2, 3, 4], vec![3, 0, 4]];

        let mesh = build_from_polygons(&vertices, &faces).unwrap();
        assert!(analysis::is_manifold(&mesh));
        assert!(analysis::is_consistently_oriented(&mesh));
        assert_eq!(analysis::edge_count(&mesh), 8);

        let (v, f) = to_face_vertex(&mesh);
        assert_eq!(v, vertices);
        assert_eq!(f, faces);
    }

    #[test]
    fn test_fluent_chain() {
        let mut mesh = crate::primitives::tetrahedron(1.0);
        mesh.apply(&Kis).unwrap().apply(&Dual).unwrap().apply(&CatmullClark::new(1)).unwrap();

        // kT has 12 faces, its dual 12 vertices, 18 edges and 8 faces
        assert_eq!(mesh.num_faces(), 2 * 18);
        assert!(analysis::fulfills_euler_characteristic(&mesh));
    }
}
