//! Seed solids and simple parametric surfaces.
//!
//! The platonic solids are centered on the origin, wound so every face
//! normal points outward, and closed: each one is a valid seed for the
//! operators in [`crate::algo::conway`]. All of them except [`cube`] are
//! sized by circumradius.

use nalgebra::{Point2, Point3, Vector3};

use crate::error::{MeshError, Result};
use crate::mesh::Mesh;

const CUBE_FACES: [[usize; 4]; 6] = [
    [0, 3, 2, 1], // bottom (-z)
    [4, 5, 6, 7], // top (+z)
    [0, 1, 5, 4], // front (-y)
    [2, 3, 7, 6], // back (+y)
    [0, 4, 7, 3], // left (-x)
    [1, 2, 6, 5], // right (+x)
];

const TETRAHEDRON_FACES: [[usize; 3]; 4] = [[0, 1, 2], [0, 3, 1], [0, 2, 3], [1, 3, 2]];

const OCTAHEDRON_FACES: [[usize; 3]; 8] = [
    [4, 0, 2],
    [4, 2, 1],
    [4, 1, 3],
    [4, 3, 0],
    [5, 2, 0],
    [5, 1, 2],
    [5, 3, 1],
    [5, 0, 3],
];

const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// Icosahedron faces around each icosahedron vertex, counter-clockwise.
const DODECAHEDRON_FACES: [[usize; 5]; 12] = [
    [0, 1, 2, 3, 4],
    [1, 5, 19, 9, 2],
    [7, 17, 12, 11, 16],
    [10, 11, 12, 13, 14],
    [6, 16, 11, 10, 15],
    [0, 6, 15, 5, 1],
    [8, 18, 13, 12, 17],
    [2, 9, 18, 8, 3],
    [9, 19, 14, 13, 18],
    [5, 15, 10, 14, 19],
    [3, 8, 17, 7, 4],
    [0, 4, 7, 16, 6],
];

fn from_table<const N: usize>(vertices: Vec<Point3<f64>>, faces: &[[usize; N]]) -> Mesh {
    let mut mesh = Mesh::with_capacity(vertices.len(), faces.len());
    mesh.add_vertices(vertices);
    for face in faces {
        mesh.push_face(face.to_vec());
    }
    mesh
}

/// Scale raw coordinates so every vertex lies at distance `radius`.
fn on_sphere(raw: &[[f64; 3]], radius: f64) -> Vec<Point3<f64>> {
    raw.iter()
        .map(|&[x, y, z]| {
            let p = Point3::new(x, y, z);
            Point3::from(p.coords.normalize() * radius)
        })
        .collect()
}

/// An axis-aligned cube with edge length `size`.
pub fn cube(size: f64) -> Mesh {
    let h = size * 0.5;
    let vertices = vec![
        Point3::new(-h, -h, -h), // 0
        Point3::new(h, -h, -h),  // 1
        Point3::new(h, h, -h),   // 2
        Point3::new(-h, h, -h),  // 3
        Point3::new(-h, -h, h),  // 4
        Point3::new(h, -h, h),   // 5
        Point3::new(h, h, h),    // 6
        Point3::new(-h, h, h),   // 7
    ];
    from_table(vertices, &CUBE_FACES)
}

/// A regular tetrahedron inscribed in the cube `[-1, 1]^3`, scaled.
pub fn tetrahedron(radius: f64) -> Mesh {
    let raw = [[1.0, 1.0, 1.0], [1.0, -1.0, -1.0], [-1.0, 1.0, -1.0], [-1.0, -1.0, 1.0]];
    from_table(on_sphere(&raw, radius), &TETRAHEDRON_FACES)
}

/// A regular octahedron with vertices on the coordinate axes.
pub fn octahedron(radius: f64) -> Mesh {
    let r = radius;
    let vertices = vec![
        Point3::new(r, 0.0, 0.0),
        Point3::new(-r, 0.0, 0.0),
        Point3::new(0.0, r, 0.0),
        Point3::new(0.0, -r, 0.0),
        Point3::new(0.0, 0.0, r),
        Point3::new(0.0, 0.0, -r),
    ];
    from_table(vertices, &OCTAHEDRON_FACES)
}

/// A regular icosahedron built from three orthogonal golden rectangles.
pub fn icosahedron(radius: f64) -> Mesh {
    let phi = (1.0 + 5f64.sqrt()) * 0.5;
    let raw = [
        [-1.0, phi, 0.0],
        [1.0, phi, 0.0],
        [-1.0, -phi, 0.0],
        [1.0, -phi, 0.0],
        [0.0, -1.0, phi],
        [0.0, 1.0, phi],
        [0.0, -1.0, -phi],
        [0.0, 1.0, -phi],
        [phi, 0.0, -1.0],
        [phi, 0.0, 1.0],
        [-phi, 0.0, -1.0],
        [-phi, 0.0, 1.0],
    ];
    from_table(on_sphere(&raw, radius), &ICOSAHEDRON_FACES)
}

/// A regular dodecahedron: the dual of [`icosahedron`], one vertex per
/// icosahedron face.
pub fn dodecahedron(radius: f64) -> Mesh {
    let ico = icosahedron(1.0);
    let vertices = ico
        .faces()
        .iter()
        .map(|f| {
            let sum: Vector3<f64> = f.indices().iter().map(|&i| ico.vertex(i).coords).sum();
            Point3::from(sum.normalize() * radius)
        })
        .collect();
    from_table(vertices, &DODECAHEDRON_FACES)
}

/// A flat grid in the XY plane, centered on the origin, facing +z.
///
/// The grid has `(segments_x + 1) * (segments_y + 1)` vertices and one UV
/// per vertex spanning `[0, 1]^2`. Unlike the solids it is open: its outer
/// edges are boundary edges.
///
/// # Errors
/// Returns [`MeshError::InvalidParameter`] if either segment count is zero
/// or a dimension is not a positive finite number.
pub fn plane(width: f64, depth: f64, segments_x: usize, segments_y: usize) -> Result<Mesh> {
    if segments_x == 0 {
        return Err(MeshError::invalid_param("segments_x", segments_x, "must be at least 1"));
    }
    if segments_y == 0 {
        return Err(MeshError::invalid_param("segments_y", segments_y, "must be at least 1"));
    }
    if !(width.is_finite() && width > 0.0) {
        return Err(MeshError::invalid_param("width", width, "must be positive"));
    }
    if !(depth.is_finite() && depth > 0.0) {
        return Err(MeshError::invalid_param("depth", depth, "must be positive"));
    }

    let cols = segments_x + 1;
    let rows = segments_y + 1;
    let mut mesh = Mesh::with_capacity(cols * rows, segments_x * segments_y);

    for j in 0..rows {
        for i in 0..cols {
            let u = i as f64 / segments_x as f64;
            let v = j as f64 / segments_y as f64;
            mesh.add_vertex(Point3::new((u - 0.5) * width, (v - 0.5) * depth, 0.0));
            mesh.add_uv(Point2::new(u, v));
        }
    }

    for j in 0..segments_y {
        for i in 0..segments_x {
            let a = j * cols + i;
            let quad = [a, a + 1, a + 1 + cols, a + cols];
            mesh.add_face_with_uvs(quad, quad)?;
        }
    }

    Ok(mesh)
}
