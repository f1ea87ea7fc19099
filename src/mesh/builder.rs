//! Mesh construction and export utilities.
//!
//! This module provides functions for building meshes from face-vertex
//! lists, as found in mesh file formats and generators, and for flattening a
//! finished mesh into the buffers a renderer consumes.

use nalgebra::Point3;

use super::polymesh::Mesh;
use crate::error::{MeshError, Result};

/// Build a mesh from vertices and polygon faces of any arity.
///
/// # Arguments
/// * `vertices` - List of vertex positions
/// * `faces` - List of faces, each a list of 0-based vertex indices in winding order
///
/// # Returns
/// A mesh, or [`MeshError::InvalidVertexIndex`] if any face references a
/// vertex outside `vertices`.
///
/// # Example
/// ```
/// use tessera::mesh::build_from_polygons;
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ];
/// let mesh = build_from_polygons(&vertices, &[vec![0, 1, 2, 3]]).unwrap();
/// assert_eq!(mesh.num_vertices(), 4);
/// assert_eq!(mesh.num_faces(), 1);
/// ```
pub fn build_from_polygons(vertices: &[Point3<f64>], faces: &[Vec<usize>]) -> Result<Mesh> {
    // Validate everything before allocating the mesh
    for (fi, face) in faces.iter().enumerate() {
        if let Some(&vi) = face.iter().find(|&&vi| vi >= vertices.len()) {
            return Err(MeshError::InvalidVertexIndex { face: fi, vertex: vi });
        }
    }

    let mut mesh = Mesh::with_capacity(vertices.len(), faces.len());
    mesh.add_vertices(vertices.iter().copied());
    for face in faces {
        mesh.push_face(face.clone());
    }

    Ok(mesh)
}

/// Convert a mesh back to a face-vertex representation.
///
/// Returns (vertices, faces) tuple.
pub fn to_face_vertex(mesh: &Mesh) -> (Vec<Point3<f64>>, Vec<Vec<usize>>) {
    let vertices = mesh.vertices().to_vec();
    let faces = mesh.faces().iter().map(|f| f.indices().to_vec()).collect();
    (vertices, faces)
}

/// Flat buffers for a rendering backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderBuffers {
    /// `x, y, z` per vertex.
    pub positions: Vec<f32>,
    /// Three vertex indices per triangle.
    pub indices: Vec<u32>,
    /// `u, v` per entry of the mesh UV layer; empty without UVs.
    pub uvs: Vec<f32>,
    /// Three UV layer indices per triangle, parallel to `indices`; empty
    /// unless every face carries UVs.
    pub uv_indices: Vec<u32>,
}

impl RenderBuffers {
    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Flatten a mesh for rendering.
///
/// Each face is fan-triangulated from its first corner; faces with fewer
/// than three corners produce no triangles.
pub fn render_buffers(mesh: &Mesh) -> RenderBuffers {
    let positions = mesh
        .vertices()
        .iter()
        .flat_map(|p| [p.x as f32, p.y as f32, p.z as f32])
        .collect();

    let with_uvs = mesh.num_uvs() > 0 && mesh.faces().iter().all(|f| f.has_uvs());

    let mut indices = Vec::new();
    let mut uv_indices = Vec::new();
    for face in mesh.faces() {
        for i in 1..face.len().saturating_sub(1) {
            indices.extend([face.index(0), face.index(i), face.index(i + 1)].map(|v| v as u32));
            if with_uvs {
                let uv = face.uv_indices();
                uv_indices.extend([uv[0], uv[i], uv[i + 1]].map(|t| t as u32));
            }
        }
    }

    let uvs = if with_uvs {
        mesh.uvs().iter().flat_map(|t| [t.x as f32, t.y as f32]).collect()
    } else {
        Vec::new()
    };

    RenderBuffers {
        positions,
        indices,
        uvs,
        uv_indices,
    }
}
