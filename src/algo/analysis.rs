//! Topological and geometric analysis.
//!
//! These functions answer questions about a mesh without changing it. They
//! are what the tests, the CLI and callers about to hand a mesh to a
//! renderer use to check that a modifier chain produced what it should.
//!
//! # Example
//!
//! ```
//! use tessera::algo::analysis::{edge_count, euler_characteristic, is_manifold};
//!
//! let cube = tessera::primitives::cube(1.0);
//! assert_eq!(edge_count(&cube), 12);
//! assert_eq!(euler_characteristic(&cube), 2);
//! assert!(is_manifold(&cube));
//! ```

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use nalgebra::Point3;

use crate::error::{MeshError, Result};
use crate::geometry::surface_area;
use crate::mesh::{EdgeKey, EdgeTable, Mesh};

/// All distinct edges, in first-seen order.
pub fn edges(mesh: &Mesh) -> Vec<EdgeKey> {
    EdgeTable::build(mesh).iter().map(|e| e.key).collect()
}

/// Number of distinct unordered vertex pairs joined by a face edge.
pub fn edge_count(mesh: &Mesh) -> usize {
    EdgeTable::build(mesh).len()
}

/// Whether every edge belongs to exactly two distinct faces.
///
/// A mesh without faces has no edges and is vacuously manifold.
pub fn is_manifold(mesh: &Mesh) -> bool {
    EdgeTable::build(mesh).iter().all(|e| e.is_manifold())
}

/// `V - E + F`.
pub fn euler_characteristic(mesh: &Mesh) -> i64 {
    mesh.num_vertices() as i64 - edge_count(mesh) as i64 + mesh.num_faces() as i64
}

/// Whether `V - E + F == 2`, as for any closed genus-0 surface.
pub fn fulfills_euler_characteristic(mesh: &Mesh) -> bool {
    euler_characteristic(mesh) == 2
}

/// Edges used by exactly one face (possibly more than once).
pub fn boundary_edges(mesh: &Mesh) -> Vec<EdgeKey> {
    EdgeTable::build(mesh)
        .iter()
        .filter(|e| e.is_boundary())
        .map(|e| e.key)
        .collect()
}

/// Edges shared by several faces without being manifold: more than two
/// faces, or one of them walking the edge twice.
pub fn non_manifold_edges(mesh: &Mesh) -> Vec<EdgeKey> {
    EdgeTable::build(mesh)
        .iter()
        .filter(|e| e.is_non_manifold())
        .map(|e| e.key)
        .collect()
}

/// Whether no directed edge is traversed by two faces, so that neighboring
/// faces agree on orientation.
pub fn is_consistently_oriented(mesh: &Mesh) -> bool {
    let mut seen = HashSet::new();
    mesh.faces()
        .iter()
        .flat_map(|f| f.edges())
        .all(|directed| seen.insert(directed))
}

/// Check every face's vertex and UV indices against the mesh.
///
/// # Errors
/// Returns the first [`MeshError::InvalidVertexIndex`] or
/// [`MeshError::InvalidUvIndex`] found, in face order.
pub fn validate_indices(mesh: &Mesh) -> Result<()> {
    for (fi, face) in mesh.faces().iter().enumerate() {
        if let Some(&vertex) = face.indices().iter().find(|&&v| v >= mesh.num_vertices()) {
            return Err(MeshError::InvalidVertexIndex { face: fi, vertex });
        }
        if face.has_uvs() {
            if face.uv_indices().len() != face.len() {
                return Err(MeshError::InvalidUvIndex {
                    face: fi,
                    details: format!("{} UV indices for {} corners", face.uv_indices().len(), face.len()),
                });
            }
            if let Some(&uv) = face.uv_indices().iter().find(|&&t| t >= mesh.num_uvs()) {
                return Err(MeshError::InvalidUvIndex {
                    face: fi,
                    details: format!("UV index {} out of range ({} UVs)", uv, mesh.num_uvs()),
                });
            }
        }
    }
    Ok(())
}

/// Summary statistics for a mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshReport {
    /// Number of vertices.
    pub vertices: usize,
    /// Number of distinct edges.
    pub edges: usize,
    /// Number of faces.
    pub faces: usize,
    /// Number of UV coordinates.
    pub uvs: usize,
    /// Face count per arity, ascending.
    pub arity_histogram: BTreeMap<usize, usize>,
    /// Faces with fewer than three corners.
    pub degenerate_faces: usize,
    /// Edges with exactly one face.
    pub boundary_edges: usize,
    /// Edges shared by several faces without being manifold.
    pub non_manifold_edges: usize,
    /// `V - E + F`.
    pub euler_characteristic: i64,
    /// Every edge has exactly two faces.
    pub is_manifold: bool,
    /// Neighboring faces agree on winding.
    pub is_consistently_oriented: bool,
    /// Axis-aligned bounds, if there are vertices.
    pub bounding_box: Option<(Point3<f64>, Point3<f64>)>,
    /// Sum of face areas.
    pub surface_area: f64,
}

impl MeshReport {
    /// Analyze a mesh.
    pub fn analyze(mesh: &Mesh) -> Self {
        let table = EdgeTable::build(mesh);

        let mut arity_histogram = BTreeMap::new();
        for face in mesh.faces() {
            *arity_histogram.entry(face.len()).or_insert(0) += 1;
        }

        let boundary_edges = table.iter().filter(|e| e.is_boundary()).count();
        let non_manifold_edges = table.iter().filter(|e| e.is_non_manifold()).count();
        let is_manifold = table.iter().all(|e| e.is_manifold());

        Self {
            vertices: mesh.num_vertices(),
            edges: table.len(),
            faces: mesh.num_faces(),
            uvs: mesh.num_uvs(),
            arity_histogram,
            degenerate_faces: mesh.faces().iter().filter(|f| f.is_degenerate()).count(),
            boundary_edges,
            non_manifold_edges,
            euler_characteristic: mesh.num_vertices() as i64 - table.len() as i64 + mesh.num_faces() as i64,
            is_manifold,
            is_consistently_oriented: is_consistently_oriented(mesh),
            bounding_box: mesh.bounding_box(),
            surface_area: surface_area(mesh),
        }
    }

    /// Closed manifold with consistent winding.
    pub fn is_closed(&self) -> bool {
        self.is_manifold && self.is_consistently_oriented
    }
}

impl fmt::Display for MeshReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "vertices:            {}", self.vertices)?;
        writeln!(f, "edges:               {}", self.edges)?;
        writeln!(f, "faces:               {}", self.faces)?;
        let arities: Vec<String> = self
            .arity_histogram
            .iter()
            .map(|(arity, count)| format!("{}x{}", count, arity))
            .collect();
        writeln!(f, "face arities:        {}", arities.join(", "))?;
        writeln!(f, "uvs:                 {}", self.uvs)?;
        writeln!(f, "degenerate faces:    {}", self.degenerate_faces)?;
        writeln!(f, "boundary edges:      {}", self.boundary_edges)?;
        writeln!(f, "non-manifold edges:  {}", self.non_manifold_edges)?;
        writeln!(f, "euler:               {}", self.euler_characteristic)?;
        writeln!(f, "manifold:            {}", self.is_manifold)?;
        writeln!(f, "oriented:            {}", self.is_consistently_oriented)?;
        if let Some((min, max)) = &self.bounding_box {
            writeln!(
                f,
                "bounds:              [{}, {}, {}] .. [{}, {}, {}]",
                min.x, min.y, min.z, max.x, max.y, max.z
            )?;
        }
        write!(f, "surface area:        {}", self.surface_area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::build_from_polygons;
    use crate::primitives;

    fn square_vertices() -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_edge_counts() {
        let v = square_vertices();
        let triangle = build_from_polygons(&v, &[vec![0, 1, 2]]).unwrap();
        let quad = build_from_polygons(&v, &[vec![0, 1, 2, 3]]).unwrap();
        let pair = build_from_polygons(&v, &[vec![0, 1, 2], vec![0, 2, 3]]).unwrap();

        assert_eq!(edge_count(&triangle), 3);
        assert_eq!(edge_count(&quad), 4);
        assert_eq!(edge_count(&pair), 5);
        assert_eq!(edge_count(&primitives::cube(1.0)), 12);
    }

    #[test]
    fn test_manifold_checks() {
        assert!(is_manifold(&Mesh::new()));
        assert!(is_manifold(&primitives::icosahedron(1.0)));

        let v = square_vertices();
        let open = build_from_polygons(&v, &[vec![0, 1, 2, 3]]).unwrap();
        assert!(!is_manifold(&open));
        assert_eq!(boundary_edges(&open).len(), 4);
    }

    #[test]
    fn test_non_manifold_fin() {
        let mut v = square_vertices();
        v.push(Point3::new(0.5, 0.5, 1.0));
        // Three triangles hinged on edge (0, 1)
        let faces = vec![vec![0, 1, 2], vec![1, 0, 3], vec![0, 1, 4]];
        let mesh = build_from_polygons(&v, &faces).unwrap();

        assert_eq!(non_manifold_edges(&mesh), vec![EdgeKey::new(0, 1)]);
        assert!(!is_consistently_oriented(&mesh));
    }

    #[test]
    fn test_euler() {
        assert_eq!(euler_characteristic(&primitives::dodecahedron(1.0)), 2);
        assert!(fulfills_euler_characteristic(&primitives::tetrahedron(1.0)));

        let v = square_vertices();
        let open = build_from_polygons(&v, &[vec![0, 1, 2, 3]]).unwrap();
        assert_eq!(euler_characteristic(&open), 1);
        assert!(!fulfills_euler_characteristic(&open));
    }

    #[test]
    fn test_edges_first_seen_order() {
        let v = square_vertices();
        let mesh = build_from_polygons(&v, &[vec![2, 1, 0]]).unwrap();
        assert_eq!(edges(&mesh), vec![EdgeKey::new(1, 2), EdgeKey::new(0, 1), EdgeKey::new(0, 2)]);
    }

    #[test]
    fn test_validate_indices() {
        let mesh = primitives::plane(1.0, 1.0, 2, 2).unwrap();
        assert!(validate_indices(&mesh).is_ok());
    }

    #[test]
    fn test_validate_vertex_index_out_of_range() {
        let mut mesh = primitives::plane(1.0, 1.0, 2, 2).unwrap();
        mesh.faces_mut()[2].indices_mut()[1] = 9;

        let err = validate_indices(&mesh).unwrap_err();
        assert!(matches!(err, MeshError::InvalidVertexIndex { face: 2, vertex: 9 }));
    }

    #[test]
    fn test_validate_uv_length_mismatch() {
        let mut mesh = primitives::plane(1.0, 1.0, 2, 2).unwrap();
        mesh.faces_mut()[1].uv_indices_mut().pop();

        let err = validate_indices(&mesh).unwrap_err();
        assert!(matches!(err, MeshError::InvalidUvIndex { face: 1, .. }));
    }

    #[test]
    fn test_validate_uv_index_out_of_range() {
        let mut mesh = primitives::plane(1.0, 1.0, 2, 2).unwrap();
        mesh.faces_mut()[0].uv_indices_mut()[3] = mesh.num_uvs();

        match validate_indices(&mesh) {
            Err(MeshError::InvalidUvIndex { face: 0, details }) => assert!(details.contains("out of range")),
            other => panic!("expected a UV index error, got {:?}", other),
        }
    }

    #[test]
    fn test_single_two_corner_face_is_not_manifold() {
        let v = square_vertices();
        let mesh = build_from_polygons(&v, &[vec![0, 1]]).unwrap();

        // One face walks (0, 1) out and back; that is still one face
        assert!(!is_manifold(&mesh));
        assert_eq!(boundary_edges(&mesh), vec![EdgeKey::new(0, 1)]);
        assert!(non_manifold_edges(&mesh).is_empty());
        assert!(!MeshReport::analyze(&mesh).is_manifold);
    }

    #[test]
    fn test_report() {
        let mut mesh = primitives::cube(2.0);
        mesh.add_face(vec![0, 1]).unwrap();
        let report = MeshReport::analyze(&mesh);

        assert_eq!(report.vertices, 8);
        assert_eq!(report.edges, 12);
        assert_eq!(report.faces, 7);
        assert_eq!(report.degenerate_faces, 1);
        assert_eq!(report.arity_histogram.get(&4), Some(&6));
        assert!((report.surface_area - 24.0).abs() < 1e-10);
        // Edge (0, 1) now belongs to two cube faces and the two-corner face
        assert!(!report.is_manifold);
        assert_eq!(report.non_manifold_edges, 1);

        let text = report.to_string();
        assert!(text.contains("faces:               7"));
        assert!(text.contains("1x2, 6x4"));
    }

    #[test]
    fn test_report_closed_solid() {
        let report = MeshReport::analyze(&primitives::octahedron(1.0));
        assert!(report.is_closed());
        assert_eq!(report.euler_characteristic, 2);
        assert_eq!(report.boundary_edges, 0);
    }
}
