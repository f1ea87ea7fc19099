//! Polygon faces.

use nalgebra::Vector3;

use super::index::FaceId;

/// A polygon face: an ordered loop of vertex indices.
///
/// The winding order defines the outward normal. The optional cached normal
/// is only ever written by an explicit normal update; the optional UV list
/// holds one index into the mesh UV layer per corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    id: FaceId,
    indices: Vec<usize>,
    uv_indices: Vec<usize>,
    normal: Option<Vector3<f64>>,
}

impl Face {
    pub(crate) fn new(id: FaceId, indices: Vec<usize>) -> Self {
        Self {
            id,
            indices,
            uv_indices: Vec::new(),
            normal: None,
        }
    }

    pub(crate) fn with_uvs(id: FaceId, indices: Vec<usize>, uv_indices: Vec<usize>) -> Self {
        Self {
            id,
            indices,
            uv_indices,
            normal: None,
        }
    }

    /// The stable identity of this face.
    #[inline]
    pub fn id(&self) -> FaceId {
        self.id
    }

    /// Vertex indices in winding order.
    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Number of corners.
    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether the face has no corners at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Whether the face has fewer than three corners.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.indices.len() < 3
    }

    /// Vertex index at corner `i`, wrapping around the loop.
    ///
    /// # Panics
    /// Panics if the face has no corners.
    #[inline]
    pub fn index(&self, i: usize) -> usize {
        self.indices[i % self.indices.len()]
    }

    /// Vertex index before corner `i` in winding order.
    #[inline]
    pub fn prev_index(&self, i: usize) -> usize {
        let n = self.indices.len();
        self.indices[(i + n - 1) % n]
    }

    /// Vertex index after corner `i` in winding order.
    #[inline]
    pub fn next_index(&self, i: usize) -> usize {
        self.indices[(i + 1) % self.indices.len()]
    }

    /// Corner position of vertex `v`, if the face uses it.
    pub fn corner_of(&self, v: usize) -> Option<usize> {
        self.indices.iter().position(|&i| i == v)
    }

    /// Whether the face uses vertex `v`.
    pub fn contains(&self, v: usize) -> bool {
        self.indices.contains(&v)
    }

    /// Iterate over consecutive `(current, next)` index pairs, wrapping.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.indices.len();
        (0..n).map(move |i| (self.indices[i], self.indices[(i + 1) % n]))
    }

    /// UV layer indices, one per corner, or empty.
    #[inline]
    pub fn uv_indices(&self) -> &[usize] {
        &self.uv_indices
    }

    /// Whether this face carries UV indices.
    #[inline]
    pub fn has_uvs(&self) -> bool {
        !self.uv_indices.is_empty()
    }

    /// The cached normal, if one has been computed.
    #[inline]
    pub fn normal(&self) -> Option<Vector3<f64>> {
        self.normal
    }

    pub(crate) fn set_normal(&mut self, normal: Option<Vector3<f64>>) {
        self.normal = normal;
    }

    pub(crate) fn indices_mut(&mut self) -> &mut Vec<usize> {
        &mut self.indices
    }

    pub(crate) fn uv_indices_mut(&mut self) -> &mut Vec<usize> {
        &mut self.uv_indices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_wrap() {
        let face = Face::new(FaceId::new(0), vec![4, 7, 9]);
        let edges: Vec<_> = face.edges().collect();
        assert_eq!(edges, vec![(4, 7), (7, 9), (9, 4)]);
    }

    #[test]
    fn test_neighbors_in_winding_order() {
        let face = Face::new(FaceId::new(0), vec![0, 1, 2, 3]);
        assert_eq!(face.prev_index(0), 3);
        assert_eq!(face.next_index(3), 0);
        assert_eq!(face.index(5), 1);
        assert_eq!(face.corner_of(2), Some(2));
        assert_eq!(face.corner_of(8), None);
    }

    #[test]
    fn test_degenerate() {
        let face = Face::new(FaceId::new(1), vec![0, 1]);
        assert!(face.is_degenerate());
        assert_eq!(face.edges().count(), 2);
        assert!(face.normal().is_none());
        assert!(!face.has_uvs());
    }
}
