//! Ambo (rectification): truncate every vertex down to its edge midpoints.

use nalgebra::Point3;

use crate::algo::Modifier;
use crate::error::Result;
use crate::mesh::Mesh;

use super::ClosedTopology;

/// Replace the mesh with the polyhedron spanned by its edge midpoints.
///
/// New vertices are the edge midpoints in first-seen edge order. Each
/// original face is followed by one face per original vertex, so the result
/// has `F + V` faces and `E` vertices.
///
/// # Errors
/// Returns [`MeshError::NonManifold`](crate::error::MeshError::NonManifold)
/// unless the mesh is a closed, consistently oriented manifold. The mesh is
/// untouched in that case.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ambo;

impl Modifier for Ambo {
    fn modify<'m>(&self, mesh: &'m mut Mesh) -> Result<&'m mut Mesh> {
        let topology = ClosedTopology::of(mesh)?;
        let edges = &topology.edges;
        let (before_v, before_f) = (mesh.num_vertices(), mesh.num_faces());

        let vertices: Vec<Point3<f64>> = edges
            .iter()
            .map(|e| Point3::from((mesh.vertex(e.key.lo()).coords + mesh.vertex(e.key.hi()).coords) * 0.5))
            .collect();

        let mut polygons: Vec<Vec<usize>> = Vec::with_capacity(mesh.num_faces() + mesh.num_vertices());

        // Shrunken original faces
        for fi in 0..mesh.num_faces() {
            polygons.push(edges.face_edges(fi).to_vec());
        }

        // Vertex figures: the edge entering each ring corner is shared with
        // the next face around the vertex
        for ring in topology.rings.iter().filter(|r| !r.is_empty()) {
            let figure = ring
                .iter()
                .map(|c| {
                    let corner_edges = edges.face_edges(c.face);
                    let n = corner_edges.len();
                    corner_edges[(c.corner + n - 1) % n]
                })
                .collect();
            polygons.push(figure);
        }

        mesh.replace_geometry(vertices, polygons);
        log::debug!(
            "ambo: {}v/{}f -> {}v/{}f",
            before_v,
            before_f,
            mesh.num_vertices(),
            mesh.num_faces()
        );
        Ok(mesh)
    }
}
