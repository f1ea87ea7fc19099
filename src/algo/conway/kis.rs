//! Kis and poke: raise a pyramid on every face.

use crate::algo::Modifier;
use crate::error::{MeshError, Result};
use crate::geometry::{face_center, face_normal};
use crate::mesh::Mesh;

/// Replace every n-gon with n triangles meeting at its centroid.
///
/// Equivalent to [`Poke`] with zero height.
#[derive(Debug, Clone, Copy, Default)]
pub struct Kis;

impl Modifier for Kis {
    fn modify<'m>(&self, mesh: &'m mut Mesh) -> Result<&'m mut Mesh> {
        poke(mesh, 0.0);
        Ok(mesh)
    }
}

/// Kis with the apex lifted along the face normal.
///
/// Negative heights push the apex inward. Faces with a zero normal get their
/// apex at the centroid.
#[derive(Debug, Clone, Copy)]
pub struct Poke {
    /// Offset of the apex along the unit face normal.
    pub height: f64,
}

impl Poke {
    /// Create a poke with the given apex height.
    ///
    /// # Errors
    /// Returns [`MeshError::InvalidParameter`] if `height` is not finite.
    pub fn new(height: f64) -> Result<Self> {
        if !height.is_finite() {
            return Err(MeshError::invalid_param("height", height, "must be finite"));
        }
        Ok(Self { height })
    }
}

impl Modifier for Poke {
    fn modify<'m>(&self, mesh: &'m mut Mesh) -> Result<&'m mut Mesh> {
        poke(mesh, self.height);
        Ok(mesh)
    }
}

/// Original vertices are kept in place; one apex per face is appended in
/// face order, and each face edge `(a, b)` becomes the triangle
/// `[a, b, apex]`. Faces with fewer than three corners are dropped.
fn poke(mesh: &mut Mesh, height: f64) {
    let before = mesh.num_faces();

    let mut vertices = mesh.vertices().to_vec();
    let mut polygons = Vec::with_capacity(mesh.faces().iter().map(|f| f.len()).sum());

    for face in mesh.faces().iter().filter(|f| !f.is_degenerate()) {
        let apex = face_center(mesh, face) + face_normal(mesh, face) * height;
        let apex_index = vertices.len();
        vertices.push(apex);
        polygons.extend(face.edges().map(|(a, b)| vec![a, b, apex_index]));
    }

    mesh.replace_geometry(vertices, polygons);
    log::debug!("kis: {} faces -> {} triangles (height {})", before, mesh.num_faces(), height);
}
