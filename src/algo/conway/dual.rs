//! The dual polyhedron.

use crate::algo::Modifier;
use crate::error::Result;
use crate::geometry::face_centers;
use crate::mesh::Mesh;

use super::ClosedTopology;

/// Swap the roles of faces and vertices.
///
/// Each face becomes a vertex at its centroid (in face order) and each vertex
/// becomes a face through the centroids of the faces around it, wound
/// counter-clockwise seen from outside. Vertices with no incident face
/// disappear.
///
/// # Errors
/// Returns [`MeshError::NonManifold`](crate::error::MeshError::NonManifold)
/// unless the mesh is a closed, consistently oriented manifold. The mesh is
/// untouched in that case.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dual;

impl Modifier for Dual {
    fn modify<'m>(&self, mesh: &'m mut Mesh) -> Result<&'m mut Mesh> {
        let topology = ClosedTopology::of(mesh)?;
        let (before_v, before_f) = (mesh.num_vertices(), mesh.num_faces());

        let vertices = face_centers(mesh);
        let polygons = topology
            .rings
            .iter()
            .filter(|ring| !ring.is_empty())
            .map(|ring| ring.iter().map(|c| c.face).collect())
            .collect();

        mesh.replace_geometry(vertices, polygons);
        log::debug!(
            "dual: {}v/{}f -> {}v/{}f",
            before_v,
            before_f,
            mesh.num_vertices(),
            mesh.num_faces()
        );
        Ok(mesh)
    }
}
