//! Catmull-Clark subdivision for polygon meshes.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::algo::Modifier;
use crate::error::Result;
use crate::geometry::face_center;
use crate::mesh::{EdgeTable, Mesh};

use super::SubdivideOptions;

/// Catmull-Clark subdivision as a [`Modifier`].
#[derive(Debug, Clone, Default)]
pub struct CatmullClark {
    /// Subdivision parameters.
    pub options: SubdivideOptions,
}

impl CatmullClark {
    /// Subdivide `iterations` times.
    pub fn new(iterations: usize) -> Self {
        Self {
            options: SubdivideOptions::new(iterations),
        }
    }

    /// Subdivide with explicit options.
    pub fn with_options(options: SubdivideOptions) -> Self {
        Self { options }
    }
}

impl Modifier for CatmullClark {
    fn modify<'m>(&self, mesh: &'m mut Mesh) -> Result<&'m mut Mesh> {
        catmull_clark_subdivide(mesh, &self.options);
        Ok(mesh)
    }
}

/// Performs Catmull-Clark subdivision on a polygon mesh.
///
/// Each iteration replaces every n-gon with n quads, so a mesh of quads
/// quadruples its face count per iteration.
///
/// # Arguments
///
/// * `mesh` - The mesh to subdivide (modified in place)
/// * `options` - Subdivision parameters
///
/// # Vertex Layout
///
/// After one iteration the vertex list holds, in order: the original
/// vertices at their smoothed positions, one face point per face (face
/// order), then one edge point per edge (first-seen edge order).
///
/// # Vertex Rules
///
/// - **Face point**: centroid of face vertices
/// - **Edge point**: mean of both endpoints and every adjacent face point
/// - **Vertex point**: (Q + 2R + (n-3)S) / n where:
///   - Q = average of adjacent face points
///   - R = average of adjacent edge midpoints
///   - S = original position
///   - n = number of incident faces
/// - **Boundary vertex** with exactly two boundary edges:
///   3/4 S + 1/8 (left + right); other boundary vertices stay put.
///
/// Faces with fewer than three corners are dropped, the UV layer is cleared
/// and the new faces carry no cached normal.
pub fn catmull_clark_subdivide(mesh: &mut Mesh, options: &SubdivideOptions) {
    if options.iterations == 0 {
        return;
    }

    for iter in 0..options.iterations {
        let before = mesh.num_faces();
        catmull_clark_subdivide_once(mesh, options.parallel);
        log::debug!(
            "catmull-clark: iteration {}/{}: {} faces -> {} faces, {} vertices",
            iter + 1,
            options.iterations,
            before,
            mesh.num_faces(),
            mesh.num_vertices()
        );
    }
}

/// Perform one iteration of Catmull-Clark subdivision.
fn catmull_clark_subdivide_once(mesh: &mut Mesh, parallel: bool) {
    let dropped = mesh.faces.len();
    mesh.faces.retain(|f| !f.is_degenerate());
    let dropped = dropped - mesh.faces.len();
    if dropped > 0 {
        log::debug!("catmull-clark: dropped {} degenerate faces", dropped);
    }

    // Step 1: Face points (centroids)
    let face_points: Vec<Point3<f64>> = mesh.faces().iter().map(|f| face_center(mesh, f)).collect();

    // Step 2: Edge points
    let edges = EdgeTable::build(mesh);
    let edge_points: Vec<Point3<f64>> = edges
        .iter()
        .map(|edge| {
            let ends = mesh.vertex(edge.key.lo()).coords + mesh.vertex(edge.key.hi()).coords;
            let faces: Vector3<f64> = edge.faces.iter().map(|&fi| face_points[fi].coords).sum();
            Point3::from((ends + faces) / (2 + edge.faces.len()) as f64)
        })
        .collect();

    // Step 3: Vertex points
    let neighborhood = Neighborhood::build(mesh, &edges);
    let smoothed = smooth_vertices(mesh, &face_points, &neighborhood, parallel);

    // Step 4: Connectivity, face by face and corner by corner
    let num_original = mesh.num_vertices();
    let face_base = num_original;
    let edge_base = face_base + face_points.len();

    let mut polygons = Vec::with_capacity(mesh.faces().iter().map(|f| f.len()).sum());
    for (fi, face) in mesh.faces().iter().enumerate() {
        let corner_edges = edges.face_edges(fi);
        let n = face.len();
        for i in 0..n {
            let outgoing = edge_base + corner_edges[i];
            let incoming = edge_base + corner_edges[(i + n - 1) % n];
            polygons.push(vec![face.index(i), outgoing, face_base + fi, incoming]);
        }
    }

    let mut vertices = smoothed;
    vertices.reserve(face_points.len() + edge_points.len());
    vertices.extend(face_points);
    vertices.extend(edge_points);

    mesh.replace_geometry(vertices, polygons);
}

/// Per-vertex adjacency needed by the vertex rule.
struct Neighborhood {
    /// Incident face positions, deduplicated, in face order.
    faces: Vec<Vec<usize>>,
    /// Other endpoints of incident edges, in edge table order.
    neighbors: Vec<Vec<usize>>,
    /// Other endpoints of incident boundary edges.
    boundary: Vec<Vec<usize>>,
}

impl Neighborhood {
    fn build(mesh: &Mesh, table: &EdgeTable) -> Self {
        let n = mesh.num_vertices();
        let mut faces: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut neighbors: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut boundary: Vec<Vec<usize>> = vec![Vec::new(); n];

        for (fi, face) in mesh.faces().iter().enumerate() {
            for &vi in face.indices() {
                if !faces[vi].contains(&fi) {
                    faces[vi].push(fi);
                }
            }
        }

        for edge in table.iter() {
            let (a, b) = (edge.key.lo(), edge.key.hi());
            neighbors[a].push(b);
            neighbors[b].push(a);
            if edge.is_boundary() {
                boundary[a].push(b);
                boundary[b].push(a);
            }
        }

        Self {
            faces,
            neighbors,
            boundary,
        }
    }
}

fn smooth_vertices(
    mesh: &Mesh,
    face_points: &[Point3<f64>],
    neighborhood: &Neighborhood,
    parallel: bool,
) -> Vec<Point3<f64>> {
    let point = |i: usize| vertex_point(mesh, i, face_points, neighborhood);

    #[cfg(feature = "parallel")]
    {
        if parallel {
            return (0..mesh.num_vertices()).into_par_iter().map(point).collect();
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    (0..mesh.num_vertices()).map(point).collect()
}

fn vertex_point(
    mesh: &Mesh,
    i: usize,
    face_points: &[Point3<f64>],
    neighborhood: &Neighborhood,
) -> Point3<f64> {
    let pos = *mesh.vertex(i);
    let incident = &neighborhood.faces[i];
    let boundary = &neighborhood.boundary[i];

    if incident.is_empty() {
        return pos;
    }

    if !boundary.is_empty() {
        if boundary.len() == 2 {
            // Regular boundary vertex: 1/8 * (left + right) + 3/4 * v
            let left = mesh.vertex(boundary[0]);
            let right = mesh.vertex(boundary[1]);
            return Point3::from((left.coords + right.coords) * (1.0 / 8.0) + pos.coords * (3.0 / 4.0));
        }
        // Corner: keep position
        return pos;
    }

    let valence = incident.len() as f64;

    // Q = average of adjacent face points
    let q: Vector3<f64> = incident.iter().map(|&fi| face_points[fi].coords).sum::<Vector3<f64>>() / valence;

    // R = average of adjacent edge midpoints
    let neighbors = &neighborhood.neighbors[i];
    let r: Vector3<f64> = neighbors
        .iter()
        .map(|&nb| (pos.coords + mesh.vertex(nb).coords) * 0.5)
        .sum::<Vector3<f64>>()
        / neighbors.len() as f64;

    // S = original position
    let s = pos.coords;

    // New position: (Q + 2R + (n-3)S) / n
    Point3::from((q + r * 2.0 + s * (valence - 3.0)) / valence)
}
