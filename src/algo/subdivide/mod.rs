//! Mesh subdivision algorithms.
//!
//! This module provides algorithms for subdividing meshes to create
//! smoother surfaces.
//!
//! # Catmull-Clark Subdivision (Polygon Meshes)
//!
//! Catmull-Clark subdivision (Catmull & Clark, 1978) is an approximating
//! subdivision scheme for polygon meshes of any arity. Each iteration:
//!
//! 1. Creates a face point at each face centroid
//! 2. Creates an edge point on each edge from its endpoints and adjacent face points
//! 3. Moves original vertices to a weighted average of their neighborhood
//! 4. Splits every n-gon into n quads
//!
//! After the first iteration the mesh is all quads. The limit surface is C²
//! continuous (C¹ at extraordinary vertices).
//!
//! # Example
//!
//! ```
//! use tessera::prelude::*;
//! use tessera::algo::subdivide::{catmull_clark_subdivide, SubdivideOptions};
//!
//! let mut mesh = tessera::primitives::cube(2.0);
//!
//! let options = SubdivideOptions::new(2); // 2 iterations
//! catmull_clark_subdivide(&mut mesh, &options);
//!
//! assert_eq!(mesh.num_faces(), 96);
//! ```
//!
//! # References
//!
//! - Catmull, E. & Clark, J. (1978). "Recursively generated B-spline surfaces
//!   on arbitrary topological meshes." Computer-Aided Design, 10(6), 350-355.

mod catmull_clark;

pub use catmull_clark::{catmull_clark_subdivide, CatmullClark};

/// Options for subdivision algorithms.
#[derive(Debug, Clone)]
pub struct SubdivideOptions {
    /// Number of subdivision iterations.
    pub iterations: usize,

    /// Whether to use parallel execution (default: true).
    ///
    /// Only takes effect when the crate is built with the `parallel`
    /// feature. The result is bit-identical either way.
    pub parallel: bool,
}

impl SubdivideOptions {
    /// Create options with the specified number of iterations.
    pub fn new(iterations: usize) -> Self {
        Self {
            iterations,
            parallel: true,
        }
    }

    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Create options for single-threaded execution.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for SubdivideOptions {
    fn default() -> Self {
        Self::new(1)
    }
}
