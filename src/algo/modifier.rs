//! The modifier contract and its combinators.
//!
//! Every structural operation in [`crate::algo`] is a [`Modifier`]: a value
//! that rewrites a mesh in place and hands the same mesh back so calls can be
//! chained. Modifiers hold only their parameters, so one instance can be
//! applied to any number of meshes.
//!
//! # Fluent API
//!
//! ```
//! use tessera::prelude::*;
//! use tessera::algo::conway::{Ambo, Dual};
//!
//! let mut mesh = tessera::primitives::cube(1.0);
//! mesh.apply(&Ambo)?.apply(&Dual)?;
//! assert_eq!(mesh.num_faces(), 12);
//! # Ok::<(), MeshError>(())
//! ```
//!
//! # Composition
//!
//! [`Pipeline`] owns an ordered list of boxed modifiers and is itself a
//! modifier; [`Repeat`] applies one modifier a fixed number of times. Neither
//! is transactional: if a stage fails, the stages before it have already
//! rewritten the mesh.

use crate::error::{MeshError, Result};
use crate::mesh::Mesh;

/// A structural mesh transformation.
pub trait Modifier {
    /// Rewrite `mesh` in place and return it.
    ///
    /// # Errors
    /// Implementations document their preconditions; a failed precondition
    /// is reported before the mesh is touched.
    fn modify<'m>(&self, mesh: &'m mut Mesh) -> Result<&'m mut Mesh>;
}

impl<M: Modifier + ?Sized> Modifier for &M {
    fn modify<'m>(&self, mesh: &'m mut Mesh) -> Result<&'m mut Mesh> {
        (**self).modify(mesh)
    }
}

impl<M: Modifier + ?Sized> Modifier for Box<M> {
    fn modify<'m>(&self, mesh: &'m mut Mesh) -> Result<&'m mut Mesh> {
        (**self).modify(mesh)
    }
}

/// Extension trait for fluent modifier application.
pub trait MeshApply {
    /// Apply a modifier and return `&mut Self` for chaining.
    fn apply<M: Modifier + ?Sized>(&mut self, modifier: &M) -> Result<&mut Self>;
}

impl MeshApply for Mesh {
    fn apply<M: Modifier + ?Sized>(&mut self, modifier: &M) -> Result<&mut Self> {
        modifier.modify(self)
    }
}

/// Applies a modifier a fixed number of times.
#[derive(Debug, Clone)]
pub struct Repeat<M> {
    times: usize,
    modifier: M,
}

impl<M: Modifier> Repeat<M> {
    /// Repeat `modifier` `times` times.
    ///
    /// # Errors
    /// Returns [`MeshError::InvalidParameter`] if `times` is zero.
    pub fn new(times: usize, modifier: M) -> Result<Self> {
        if times == 0 {
            return Err(MeshError::invalid_param("times", times, "must be at least 1"));
        }
        Ok(Self { times, modifier })
    }

    /// Number of applications.
    pub fn times(&self) -> usize {
        self.times
    }

    /// The repeated modifier.
    pub fn inner(&self) -> &M {
        &self.modifier
    }
}

impl<M: Modifier> Modifier for Repeat<M> {
    fn modify<'m>(&self, mesh: &'m mut Mesh) -> Result<&'m mut Mesh> {
        for i in 0..self.times {
            log::trace!("repeat: pass {}/{}", i + 1, self.times);
            self.modifier.modify(mesh)?;
        }
        Ok(mesh)
    }
}

/// An ordered sequence of modifiers applied one after another.
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn Modifier>>,
}

impl Pipeline {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage, builder style.
    pub fn then<M: Modifier + 'static>(mut self, modifier: M) -> Self {
        self.stages.push(Box::new(modifier));
        self
    }

    /// Append an already boxed stage.
    pub fn push(&mut self, modifier: Box<dyn Modifier>) {
        self.stages.push(modifier);
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the pipeline has no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline").field("stages", &self.stages.len()).finish()
    }
}

impl Modifier for Pipeline {
    fn modify<'m>(&self, mesh: &'m mut Mesh) -> Result<&'m mut Mesh> {
        for stage in &self.stages {
            stage.modify(mesh)?;
        }
        Ok(mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    /// Appends one vertex at x = current vertex count.
    #[derive(Debug)]
    struct AppendVertex;

    impl Modifier for AppendVertex {
        fn modify<'m>(&self, mesh: &'m mut Mesh) -> Result<&'m mut Mesh> {
            let x = mesh.num_vertices() as f64;
            mesh.add_vertex(Point3::new(x, 0.0, 0.0));
            Ok(mesh)
        }
    }

    /// Always fails.
    struct Reject;

    impl Modifier for Reject {
        fn modify<'m>(&self, _mesh: &'m mut Mesh) -> Result<&'m mut Mesh> {
            Err(MeshError::non_manifold("rejected"))
        }
    }

    #[test]
    fn test_repeat_matches_manual_invocations() {
        let mut repeated = Mesh::new();
        Repeat::new(3, AppendVertex).unwrap().modify(&mut repeated).unwrap();

        let mut manual = Mesh::new();
        for _ in 0..3 {
            AppendVertex.modify(&mut manual).unwrap();
        }

        assert_eq!(repeated.vertices(), manual.vertices());
    }

    #[test]
    fn test_repeat_zero_is_rejected() {
        let err = Repeat::new(0, AppendVertex).unwrap_err();
        assert!(matches!(err, MeshError::InvalidParameter { name: "times", .. }));
    }

    #[test]
    fn test_repeat_stops_at_first_error() {
        let mut mesh = Mesh::new();
        let stages = Pipeline::new().then(AppendVertex).then(Reject);
        let result = Repeat::new(4, stages).unwrap().modify(&mut mesh).map(|_| ());
        assert!(result.is_err());
        assert_eq!(mesh.num_vertices(), 1);
    }

    #[test]
    fn test_pipeline_runs_in_order() {
        let pipeline = Pipeline::new().then(AppendVertex).then(AppendVertex);
        assert_eq!(pipeline.len(), 2);

        let mut mesh = Mesh::new();
        pipeline.modify(&mut mesh).unwrap();
        assert_eq!(mesh.vertex(1), &Point3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_empty_pipeline_is_identity() {
        let pipeline = Pipeline::new();
        assert!(pipeline.is_empty());
        let mut mesh = Mesh::new();
        pipeline.modify(&mut mesh).unwrap();
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_fluent_chaining_returns_same_mesh() {
        let mut mesh = Mesh::new();
        let boxed: Box<dyn Modifier> = Box::new(AppendVertex);
        mesh.apply(&AppendVertex)
            .unwrap()
            .apply(&boxed)
            .unwrap()
            .apply(&&AppendVertex)
            .unwrap();
        assert_eq!(mesh.num_vertices(), 3);
    }
}
