//! Mesh repair and clean-up modifiers.
//!
//! # Welding
//!
//! [`RemoveDoubleVertices`] merges vertices that share a position, optionally
//! after rounding every coordinate to a number of decimal places. The first
//! vertex seen at a position survives; later duplicates are folded into it
//! and every face is re-pointed. Faces keep their identity, winding, cached
//! normal and UV corners, so welding a mesh twice changes nothing the second
//! time.
//!
//! # Normals
//!
//! Cached face normals are never refreshed implicitly. Run
//! [`UpdateFaceNormals`] after the geometry settles.

use std::collections::HashMap;

use nalgebra::Point3;

use crate::algo::Modifier;
use crate::error::{MeshError, Result};
use crate::geometry::face_normal;
use crate::mesh::Mesh;

/// Largest accepted rounding precision; `10^15` is still exact in `f64`.
const MAX_DECIMAL_PLACES: u32 = 15;

/// `2^52`: every `f64` at or above this magnitude is an integer.
const INTEGRAL_MAGNITUDE: f64 = 4_503_599_627_370_496.0;

/// Merge vertices with identical (optionally rounded) positions.
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveDoubleVertices {
    decimal_places: Option<u32>,
}

impl RemoveDoubleVertices {
    /// Merge only bit-identical positions (`-0.0` and `0.0` count as equal).
    pub fn new() -> Self {
        Self::default()
    }

    /// Round each coordinate to `places` decimal places before merging.
    ///
    /// # Errors
    /// Returns [`MeshError::InvalidParameter`] if `places` exceeds 15.
    pub fn rounded(places: u32) -> Result<Self> {
        if places > MAX_DECIMAL_PLACES {
            return Err(MeshError::invalid_param("decimal_places", places, "must be at most 15"));
        }
        Ok(Self {
            decimal_places: Some(places),
        })
    }

    /// The rounding precision, if any.
    pub fn decimal_places(&self) -> Option<u32> {
        self.decimal_places
    }

    fn round(&self, p: Point3<f64>) -> Point3<f64> {
        match self.decimal_places {
            Some(places) => {
                let scale = 10f64.powi(places as i32);
                p.map(|c| {
                    let scaled = c * scale;
                    // Already integral at this precision, or too large to scale
                    if !scaled.is_finite() || c.abs() >= INTEGRAL_MAGNITUDE / scale {
                        c
                    } else {
                        scaled.round() / scale
                    }
                })
            }
            None => p,
        }
    }
}

/// Hashable identity of a position. Adding `0.0` folds `-0.0` into `0.0`.
fn position_key(p: &Point3<f64>) -> [u64; 3] {
    [(p.x + 0.0).to_bits(), (p.y + 0.0).to_bits(), (p.z + 0.0).to_bits()]
}

impl Modifier for RemoveDoubleVertices {
    fn modify<'m>(&self, mesh: &'m mut Mesh) -> Result<&'m mut Mesh> {
        let before = mesh.num_vertices();

        let mut unique: Vec<Point3<f64>> = Vec::with_capacity(before);
        let mut seen: HashMap<[u64; 3], usize> = HashMap::with_capacity(before);
        let remap: Vec<usize> = mesh
            .vertices()
            .iter()
            .map(|&p| {
                let p = self.round(p);
                *seen.entry(position_key(&p)).or_insert_with(|| {
                    unique.push(p);
                    unique.len() - 1
                })
            })
            .collect();

        for face in mesh.faces_mut() {
            for i in face.indices_mut().iter_mut() {
                *i = remap[*i];
            }
        }
        mesh.vertices = unique;

        log::debug!(
            "remove-double-vertices: {} -> {} vertices ({} merged)",
            before,
            mesh.num_vertices(),
            before - mesh.num_vertices()
        );
        Ok(mesh)
    }
}

/// Recompute every face's cached normal with Newell's method.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateFaceNormals;

impl Modifier for UpdateFaceNormals {
    fn modify<'m>(&self, mesh: &'m mut Mesh) -> Result<&'m mut Mesh> {
        let normals: Vec<_> = mesh.faces().iter().map(|f| face_normal(mesh, f)).collect();
        for (face, normal) in mesh.faces_mut().iter_mut().zip(normals) {
            face.set_normal(Some(normal));
        }
        log::debug!("update-face-normals: {} faces", mesh.num_faces());
        Ok(mesh)
    }
}

/// Reverse the winding of every face.
///
/// UV corners are reversed with their vertices and cached normals negated.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlipFaces;

impl Modifier for FlipFaces {
    fn modify<'m>(&self, mesh: &'m mut Mesh) -> Result<&'m mut Mesh> {
        for face in mesh.faces_mut() {
            face.indices_mut().reverse();
            face.uv_indices_mut().reverse();
            let flipped = face.normal().map(|n| -n);
            face.set_normal(flipped);
        }
        log::debug!("flip-faces: {} faces", mesh.num_faces());
        Ok(mesh)
    }
}

/// Split every polygon into a fan of triangles around its first corner.
///
/// Triangles pass through untouched. Larger faces are replaced by new
/// faces carrying the matching UV corners but no cached normal. Faces with
/// fewer than three corners are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct Triangulate;

impl Modifier for Triangulate {
    fn modify<'m>(&self, mesh: &'m mut Mesh) -> Result<&'m mut Mesh> {
        let before = mesh.num_faces();
        let faces = std::mem::take(&mut mesh.faces);

        for face in faces {
            match face.len() {
                0..=2 => {}
                3 => mesh.faces.push(face),
                n => {
                    let idx = face.indices();
                    let uv = face.uv_indices();
                    for i in 1..n - 1 {
                        let tri = vec![idx[0], idx[i], idx[i + 1]];
                        if face.has_uvs() {
                            mesh.push_face_with_uvs(tri, vec![uv[0], uv[i], uv[i + 1]]);
                        } else {
                            mesh.push_face(tri);
                        }
                    }
                }
            }
        }

        log::debug!("triangulate: {} faces -> {} triangles", before, mesh.num_faces());
        Ok(mesh)
    }
}
