//! Derived connectivity: edges and vertex rings.
//!
//! Nothing here is cached on the mesh. Both structures are rebuilt from the
//! face list on demand and list their contents in a deterministic order:
//! edges in the order they are first met walking faces front to back, rings
//! starting from the lowest-positioned face around each vertex.

use std::collections::HashMap;

use super::index::EdgeKey;
use super::polymesh::Mesh;
use crate::error::{MeshError, Result};

/// A derived edge with the faces that use it.
#[derive(Debug, Clone)]
pub struct EdgeEntry {
    /// The unordered vertex pair.
    pub key: EdgeKey,
    /// Positions of the faces using this edge, one entry per use.
    pub faces: Vec<usize>,
}

impl EdgeEntry {
    /// Number of distinct faces using this edge.
    ///
    /// A face that walks the edge more than once counts once.
    pub fn face_count(&self) -> usize {
        // Uses by one face are pushed back to back
        match self.faces.first() {
            Some(_) => 1 + self.faces.windows(2).filter(|w| w[0] != w[1]).count(),
            None => 0,
        }
    }

    /// Whether exactly one face uses this edge.
    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.face_count() == 1
    }

    /// Whether exactly two distinct faces use this edge, once each.
    #[inline]
    pub fn is_manifold(&self) -> bool {
        self.faces.len() == 2 && self.faces[0] != self.faces[1]
    }

    /// Whether this edge is shared by two or more faces without being manifold.
    #[inline]
    pub fn is_non_manifold(&self) -> bool {
        self.face_count() >= 2 && !self.is_manifold()
    }
}

/// All derived edges of a mesh, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct EdgeTable {
    entries: Vec<EdgeEntry>,
    lookup: HashMap<EdgeKey, usize>,
    face_edges: Vec<Vec<usize>>,
}

impl EdgeTable {
    /// Enumerate the edges of every face, wrapping from last to first corner.
    pub fn build(mesh: &Mesh) -> Self {
        let mut table = Self {
            entries: Vec::new(),
            lookup: HashMap::with_capacity(mesh.num_faces() * 2),
            face_edges: Vec::with_capacity(mesh.num_faces()),
        };

        for (fi, face) in mesh.faces().iter().enumerate() {
            let mut corners = Vec::with_capacity(face.len());
            for (a, b) in face.edges() {
                let key = EdgeKey::new(a, b);
                let ei = match table.lookup.get(&key) {
                    Some(&ei) => {
                        table.entries[ei].faces.push(fi);
                        ei
                    }
                    None => {
                        let ei = table.entries.len();
                        table.lookup.insert(key, ei);
                        table.entries.push(EdgeEntry { key, faces: vec![fi] });
                        ei
                    }
                };
                corners.push(ei);
            }
            table.face_edges.push(corners);
        }

        table
    }

    /// Number of distinct edges.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no edges.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All edges in first-seen order.
    #[inline]
    pub fn entries(&self) -> &[EdgeEntry] {
        &self.entries
    }

    /// Position of the edge between `a` and `b` in [`entries`](Self::entries).
    #[inline]
    pub fn index_of(&self, a: usize, b: usize) -> Option<usize> {
        self.lookup.get(&EdgeKey::new(a, b)).copied()
    }

    /// The edge between `a` and `b`.
    pub fn get(&self, a: usize, b: usize) -> Option<&EdgeEntry> {
        self.index_of(a, b).map(|i| &self.entries[i])
    }

    /// Edge indices of face `face`, one per corner: entry `i` is the edge
    /// from corner `i` to corner `i + 1`.
    ///
    /// # Panics
    /// Panics if `face` is not a face position of the mesh the table was
    /// built from.
    #[inline]
    pub fn face_edges(&self, face: usize) -> &[usize] {
        &self.face_edges[face]
    }

    /// Iterate over all edges.
    pub fn iter(&self) -> impl Iterator<Item = &EdgeEntry> + '_ {
        self.entries.iter()
    }
}

/// A corner of a face: a face position and the corner within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Corner {
    /// Face position in the mesh.
    pub face: usize,
    /// Corner index within the face.
    pub corner: usize,
}

/// Walk the faces around every vertex in cyclic order.
///
/// For each vertex the result lists the corners it occupies, starting at its
/// lowest-positioned face and proceeding so that successive face centers turn
/// counter-clockwise when seen from outside. Vertices without faces get an
/// empty ring. Faces with fewer than three corners are ignored.
///
/// # Errors
/// Returns [`MeshError::NonManifold`] if a directed edge is used twice
/// (inconsistent winding or a fin), if a vertex sits on an open boundary, or
/// if the faces around a vertex form more than one fan.
pub fn vertex_rings(mesh: &Mesh) -> Result<Vec<Vec<Corner>>> {
    let faces = mesh.faces();

    let mut outgoing: HashMap<(usize, usize), Corner> = HashMap::new();
    let mut first_corner: Vec<Option<Corner>> = vec![None; mesh.num_vertices()];
    let mut corner_count = vec![0usize; mesh.num_vertices()];

    for (fi, face) in faces.iter().enumerate() {
        if face.is_degenerate() {
            continue;
        }
        for ci in 0..face.len() {
            let v = face.index(ci);
            let corner = Corner { face: fi, corner: ci };
            if outgoing.insert((v, face.next_index(ci)), corner).is_some() {
                return Err(MeshError::non_manifold(format!(
                    "directed edge ({}, {}) is used by more than one face",
                    v,
                    face.next_index(ci)
                )));
            }
            first_corner[v].get_or_insert(corner);
            corner_count[v] += 1;
        }
    }

    let mut rings = Vec::with_capacity(mesh.num_vertices());
    for (v, start) in first_corner.into_iter().enumerate() {
        let Some(start) = start else {
            rings.push(Vec::new());
            continue;
        };

        let mut ring = Vec::with_capacity(corner_count[v]);
        let mut current = start;
        loop {
            ring.push(current);
            if ring.len() > corner_count[v] {
                return Err(MeshError::non_manifold(format!(
                    "faces around vertex {} do not close into a single fan",
                    v
                )));
            }
            let prev = faces[current.face].prev_index(current.corner);
            current = match outgoing.get(&(v, prev)) {
                Some(&next) => next,
                None => {
                    return Err(MeshError::non_manifold(format!(
                        "vertex {} lies on an open boundary (edge {} - {})",
                        v, v, prev
                    )))
                }
            };
            if current == start {
                break;
            }
        }

        if ring.len() != corner_count[v] {
            return Err(MeshError::non_manifold(format!(
                "vertex {} joins {} faces but its fan only reaches {}",
                v,
                corner_count[v],
                ring.len()
            )));
        }
        rings.push(ring);
    }

    Ok(rings)
}
