//! Indexed polygon mesh container.
//!
//! [`Mesh`] stores flat, insertion-ordered sequences of vertex positions,
//! faces and UV coordinates. Connectivity is expressed entirely through
//! indices into those sequences; nothing holds a reference to anything else.
//!
//! # Index Stability
//!
//! Appending vertices, faces or UVs never invalidates existing indices.
//! Removing faces shifts the positions of later faces, which is why removal
//! goes through [`FaceId`] rather than positions. Modifiers that rebuild the
//! topology assign fresh identities to every face they emit.

use nalgebra::{Point2, Point3};

use super::face::Face;
use super::index::FaceId;
use crate::error::{MeshError, Result};

/// An indexed polygon mesh with an optional UV layer.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Vertex positions.
    pub(crate) vertices: Vec<Point3<f64>>,

    /// Faces in insertion order.
    pub(crate) faces: Vec<Face>,

    /// UV coordinates, referenced per face corner.
    pub(crate) uvs: Vec<Point2<f64>>,

    /// Next face identity to hand out.
    next_face_id: u64,
}

impl Mesh {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh with pre-allocated capacity.
    pub fn with_capacity(num_vertices: usize, num_faces: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(num_vertices),
            faces: Vec::with_capacity(num_faces),
            uvs: Vec::new(),
            next_face_id: 0,
        }
    }

    // ==================== Accessors ====================

    /// Get the number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Get the number of UV coordinates.
    #[inline]
    pub fn num_uvs(&self) -> usize {
        self.uvs.len()
    }

    /// Whether the mesh has no vertices and no faces.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.faces.is_empty()
    }

    /// Get the position of vertex `i`.
    ///
    /// # Panics
    /// Panics if `i` is out of range.
    #[inline]
    pub fn vertex(&self, i: usize) -> &Point3<f64> {
        &self.vertices[i]
    }

    /// Get the position of vertex `i`, if it exists.
    #[inline]
    pub fn get_vertex(&self, i: usize) -> Option<&Point3<f64>> {
        self.vertices.get(i)
    }

    /// Set the position of vertex `i`.
    #[inline]
    pub fn set_vertex(&mut self, i: usize, position: Point3<f64>) {
        self.vertices[i] = position;
    }

    /// Get the face at position `i`.
    ///
    /// # Panics
    /// Panics if `i` is out of range.
    #[inline]
    pub fn face(&self, i: usize) -> &Face {
        &self.faces[i]
    }

    /// Get the face at position `i`, if it exists.
    #[inline]
    pub fn get_face(&self, i: usize) -> Option<&Face> {
        self.faces.get(i)
    }

    /// Find a face by identity.
    pub fn face_by_id(&self, id: FaceId) -> Option<&Face> {
        self.faces.iter().find(|f| f.id() == id)
    }

    /// Current position of the face with identity `id`.
    pub fn face_position(&self, id: FaceId) -> Option<usize> {
        self.faces.iter().position(|f| f.id() == id)
    }

    /// Get UV coordinate `i`.
    #[inline]
    pub fn uv(&self, i: usize) -> &Point2<f64> {
        &self.uvs[i]
    }

    /// All vertex positions.
    #[inline]
    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    /// All faces.
    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// All UV coordinates.
    #[inline]
    pub fn uvs(&self) -> &[Point2<f64>] {
        &self.uvs
    }

    /// Positions of a face's corners in winding order.
    pub fn face_positions(&self, face: &Face) -> Vec<Point3<f64>> {
        face.indices().iter().map(|&i| self.vertices[i]).collect()
    }

    /// Whether every face is a triangle.
    pub fn is_triangle_mesh(&self) -> bool {
        !self.faces.is_empty() && self.faces.iter().all(|f| f.len() == 3)
    }

    /// Whether every face is a quad.
    pub fn is_quad_mesh(&self) -> bool {
        !self.faces.is_empty() && self.faces.iter().all(|f| f.len() == 4)
    }

    /// Compute the axis-aligned bounding box of the mesh.
    pub fn bounding_box(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let first = self.vertices.first()?;

        let mut min = *first;
        let mut max = *first;

        for v in &self.vertices {
            for i in 0..3 {
                min[i] = min[i].min(v[i]);
                max[i] = max[i].max(v[i]);
            }
        }

        Some((min, max))
    }

    // ==================== Construction ====================

    /// Add a new vertex and return its index.
    pub fn add_vertex(&mut self, position: Point3<f64>) -> usize {
        self.vertices.push(position);
        self.vertices.len() - 1
    }

    /// Add several vertices, returning the index of the first one.
    pub fn add_vertices<I: IntoIterator<Item = Point3<f64>>>(&mut self, positions: I) -> usize {
        let first = self.vertices.len();
        self.vertices.extend(positions);
        first
    }

    /// Add a UV coordinate and return its index.
    pub fn add_uv(&mut self, uv: Point2<f64>) -> usize {
        self.uvs.push(uv);
        self.uvs.len() - 1
    }

    /// Add a face over existing vertices.
    ///
    /// Faces with fewer than three corners are accepted as degenerate.
    ///
    /// # Errors
    /// Returns [`MeshError::InvalidVertexIndex`] if any index is out of range;
    /// the mesh is left unchanged.
    pub fn add_face(&mut self, indices: impl Into<Vec<usize>>) -> Result<FaceId> {
        let indices = indices.into();
        self.check_indices(self.faces.len(), &indices)?;
        Ok(self.push_face(indices))
    }

    /// Add a face with one UV index per corner.
    ///
    /// # Errors
    /// Returns [`MeshError::InvalidVertexIndex`] or
    /// [`MeshError::InvalidUvIndex`]; the mesh is left unchanged.
    pub fn add_face_with_uvs(
        &mut self,
        indices: impl Into<Vec<usize>>,
        uv_indices: impl Into<Vec<usize>>,
    ) -> Result<FaceId> {
        let indices = indices.into();
        let uv_indices = uv_indices.into();
        let position = self.faces.len();
        self.check_indices(position, &indices)?;
        self.check_uv_indices(position, indices.len(), &uv_indices)?;
        Ok(self.push_face_with_uvs(indices, uv_indices))
    }

    /// Remove faces by identity.
    ///
    /// Vertices are kept even if they become unreferenced.
    ///
    /// # Errors
    /// Returns [`MeshError::UnknownFace`] if any identity is not present; no
    /// face is removed in that case.
    pub fn remove_faces(&mut self, ids: &[FaceId]) -> Result<()> {
        for &id in ids {
            if self.face_position(id).is_none() {
                return Err(MeshError::UnknownFace(id));
            }
        }
        self.faces.retain(|f| !ids.contains(&f.id()));
        Ok(())
    }

    /// Remove every face, keeping vertices and UVs.
    pub fn clear_faces(&mut self) {
        self.faces.clear();
    }

    // ==================== Internal ====================

    fn allocate_face_id(&mut self) -> FaceId {
        let id = FaceId::new(self.next_face_id);
        self.next_face_id += 1;
        id
    }

    /// Push a face whose indices are already known to be valid.
    pub(crate) fn push_face(&mut self, indices: Vec<usize>) -> FaceId {
        debug_assert!(indices.iter().all(|&i| i < self.vertices.len()));
        let id = self.allocate_face_id();
        self.faces.push(Face::new(id, indices));
        id
    }

    /// Push a face with UV corners, all indices already known to be valid.
    pub(crate) fn push_face_with_uvs(&mut self, indices: Vec<usize>, uv_indices: Vec<usize>) -> FaceId {
        debug_assert_eq!(indices.len(), uv_indices.len());
        let id = self.allocate_face_id();
        self.faces.push(Face::with_uvs(id, indices, uv_indices));
        id
    }

    /// Replace all geometry with freshly built vertices and polygons.
    ///
    /// The UV layer is dropped, since the new faces have no UV corners.
    pub(crate) fn replace_geometry(&mut self, vertices: Vec<Point3<f64>>, polygons: Vec<Vec<usize>>) {
        self.vertices = vertices;
        self.uvs.clear();
        self.faces = Vec::with_capacity(polygons.len());
        for indices in polygons {
            self.push_face(indices);
        }
    }

    pub(crate) fn faces_mut(&mut self) -> &mut [Face] {
        &mut self.faces
    }

    pub(crate) fn vertices_mut(&mut self) -> &mut [Point3<f64>] {
        &mut self.vertices
    }

    fn check_indices(&self, face: usize, indices: &[usize]) -> Result<()> {
        match indices.iter().find(|&&i| i >= self.vertices.len()) {
            Some(&vertex) => Err(MeshError::InvalidVertexIndex { face, vertex }),
            None => Ok(()),
        }
    }

    fn check_uv_indices(&self, face: usize, corners: usize, uv_indices: &[usize]) -> Result<()> {
        if uv_indices.len() != corners {
            return Err(MeshError::InvalidUvIndex {
                face,
                details: format!("{} UV indices for {} corners", uv_indices.len(), corners),
            });
        }
        if let Some(&uv) = uv_indices.iter().find(|&&i| i >= self.uvs.len()) {
            return Err(MeshError::InvalidUvIndex {
                face,
                details: format!("UV index {} out of range ({} UVs)", uv, self.uvs.len()),
            });
        }
        Ok(())
    }
}
