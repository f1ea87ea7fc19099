//! Per-face geometric quantities.
//!
//! All functions here are pure: they read vertex positions through the mesh
//! and never touch cached state. Degenerate input is not an error. A face
//! with fewer than three corners, or whose corners are collinear, has a zero
//! normal and zero area.
//!
//! # Newell's Method
//!
//! Normals are accumulated over consecutive corner pairs `(c, n)`:
//!
//! ```text
//! x += (c.y - n.y) * (c.z + n.z)
//! y += (c.z - n.z) * (c.x + n.x)
//! z += (c.x - n.x) * (c.y + n.y)
//! ```
//!
//! The result is robust for non-planar and concave polygons of any arity,
//! and its length is twice the area of the (projected) polygon.

use nalgebra::{Point3, Vector3};

use crate::mesh::{Face, Mesh};

/// Unnormalized Newell vector of a face.
pub fn newell_vector(mesh: &Mesh, face: &Face) -> Vector3<f64> {
    let mut acc = Vector3::zeros();
    if face.is_degenerate() {
        return acc;
    }
    for (a, b) in face.edges() {
        let c = mesh.vertex(a);
        let n = mesh.vertex(b);
        acc.x += (c.y - n.y) * (c.z + n.z);
        acc.y += (c.z - n.z) * (c.x + n.x);
        acc.z += (c.x - n.x) * (c.y + n.y);
    }
    acc
}

/// Unit normal of a face, or the zero vector for degenerate faces.
pub fn face_normal(mesh: &Mesh, face: &Face) -> Vector3<f64> {
    let mut out = Vector3::zeros();
    face_normal_into(mesh, face, &mut out);
    out
}

/// Write the unit normal of a face into `out`.
pub fn face_normal_into(mesh: &Mesh, face: &Face, out: &mut Vector3<f64>) {
    let newell = newell_vector(mesh, face);
    let len = newell.norm();
    *out = if len > 0.0 { newell / len } else { Vector3::zeros() };
}

/// Arithmetic mean of a face's corners, or the origin for an empty face.
pub fn face_center(mesh: &Mesh, face: &Face) -> Point3<f64> {
    let mut out = Point3::origin();
    face_center_into(mesh, face, &mut out);
    out
}

/// Write the arithmetic mean of a face's corners into `out`.
pub fn face_center_into(mesh: &Mesh, face: &Face, out: &mut Point3<f64>) {
    if face.is_empty() {
        *out = Point3::origin();
        return;
    }
    let sum: Vector3<f64> = face.indices().iter().map(|&i| mesh.vertex(i).coords).sum();
    *out = Point3::from(sum / face.len() as f64);
}

/// Area of a face.
pub fn face_area(mesh: &Mesh, face: &Face) -> f64 {
    newell_vector(mesh, face).norm() * 0.5
}

/// Sum of all face areas.
pub fn surface_area(mesh: &Mesh) -> f64 {
    mesh.faces().iter().map(|f| face_area(mesh, f)).sum()
}

/// Centers of every face, in face order.
pub fn face_centers(mesh: &Mesh) -> Vec<Point3<f64>> {
    mesh.faces().iter().map(|f| face_center(mesh, f)).collect()
}

/// Mean of all vertex positions, or `None` for a mesh without vertices.
pub fn vertex_centroid(mesh: &Mesh) -> Option<Point3<f64>> {
    if mesh.num_vertices() == 0 {
        return None;
    }
    let sum: Vector3<f64> = mesh.vertices().iter().map(|p| p.coords).sum();
    Some(Point3::from(sum / mesh.num_vertices() as f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::build_from_polygons;

    fn unit_square() -> Mesh {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        build_from_polygons(&vertices, &[vec![0, 1, 2, 3]]).unwrap()
    }

    #[test]
    fn test_square_normal_and_area() {
        let mesh = unit_square();
        let face = mesh.face(0);

        let n = face_normal(&mesh, face);
        assert!((n - Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-10);
        assert!((face_area(&mesh, face) - 1.0).abs() < 1e-10);
        assert!((face_center(&mesh, face) - Point3::new(0.5, 0.5, 0.0)).norm() < 1e-10);
    }

    #[test]
    fn test_reversed_winding_flips_normal() {
        let vertices = unit_square().vertices().to_vec();
        let mesh = build_from_polygons(&vertices, &[vec![3, 2, 1, 0]]).unwrap();
        let n = face_normal(&mesh, mesh.face(0));
        assert!((n - Vector3::new(0.0, 0.0, -1.0)).norm() < 1e-10);
    }

    #[test]
    fn test_concave_polygon_normal() {
        // An L shape in the XZ plane, wound so the normal points to -y
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 2.0),
            Point3::new(0.0, 0.0, 2.0),
        ];
        let mesh = build_from_polygons(&vertices, &[vec![0, 1, 2, 3, 4, 5]]).unwrap();
        let face = mesh.face(0);

        let n = face_normal(&mesh, face);
        assert!((n.norm() - 1.0).abs() < 1e-10);
        assert!((n - Vector3::new(0.0, -1.0, 0.0)).norm() < 1e-10);
        assert!((face_area(&mesh, face) - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_degenerate_faces() {
        let mut mesh = unit_square();
        mesh.add_face(vec![0, 1]).unwrap();
        // Collinear corners
        mesh.add_vertex(Point3::new(2.0, 0.0, 0.0));
        mesh.add_face(vec![0, 1, 4]).unwrap();
        mesh.add_face(Vec::new()).unwrap();

        assert_eq!(face_normal(&mesh, mesh.face(1)), Vector3::zeros());
        assert_eq!(face_normal(&mesh, mesh.face(2)), Vector3::zeros());
        assert_eq!(face_area(&mesh, mesh.face(2)), 0.0);
        assert_eq!(face_center(&mesh, mesh.face(3)), Point3::origin());
    }

    #[test]
    fn test_into_variants_overwrite() {
        let mesh = unit_square();
        let mut n = Vector3::new(9.0, 9.0, 9.0);
        let mut c = Point3::new(9.0, 9.0, 9.0);
        face_normal_into(&mesh, mesh.face(0), &mut n);
        face_center_into(&mesh, mesh.face(0), &mut c);
        assert_eq!(n, face_normal(&mesh, mesh.face(0)));
        assert_eq!(c, face_center(&mesh, mesh.face(0)));
    }

    #[test]
    fn test_vertex_centroid() {
        assert!(vertex_centroid(&Mesh::new()).is_none());
        let c = vertex_centroid(&unit_square()).unwrap();
        assert!((c - Point3::new(0.5, 0.5, 0.0)).norm() < 1e-10);
        assert!((surface_area(&unit_square()) - 1.0).abs() < 1e-10);
    }
}
