//! Edge beveling.
//!
//! Every face is shrunk toward its center. The gaps this opens are filled
//! with one quad per original edge and one polygon per original vertex, so a
//! closed mesh with `V` vertices, `E` edges and `F` faces becomes one with
//! `F + E + V` faces. The new vertices are exactly the inset corners; the
//! original vertices do not survive.
//!
//! # Example
//!
//! ```
//! use tessera::prelude::*;
//! use tessera::algo::bevel::Bevel;
//!
//! let mut mesh = tessera::primitives::cube(1.0);
//! mesh.apply(&Bevel::new(0.2)?)?;
//! assert_eq!(mesh.num_faces(), 6 + 12 + 8);
//! # Ok::<(), MeshError>(())
//! ```

use nalgebra::Point3;

use crate::algo::conway::ClosedTopology;
use crate::algo::Modifier;
use crate::error::{MeshError, Result};
use crate::geometry::face_center;
use crate::mesh::Mesh;

/// Bevel every edge and vertex of a closed mesh.
#[derive(Debug, Clone, Copy)]
pub struct Bevel {
    amount: f64,
}

impl Bevel {
    /// Create a bevel that moves each corner `amount` of the way toward its
    /// face center.
    ///
    /// # Errors
    /// Returns [`MeshError::InvalidParameter`] unless `0 < amount < 1`.
    pub fn new(amount: f64) -> Result<Self> {
        if !(amount > 0.0 && amount < 1.0) {
            return Err(MeshError::invalid_param("amount", amount, "must be in (0, 1)"));
        }
        Ok(Self { amount })
    }

    /// The inset fraction.
    pub fn amount(&self) -> f64 {
        self.amount
    }
}

impl Modifier for Bevel {
    /// # Errors
    /// Returns [`MeshError::NonManifold`] unless the mesh is a closed,
    /// consistently oriented manifold; the mesh is untouched in that case.
    fn modify<'m>(&self, mesh: &'m mut Mesh) -> Result<&'m mut Mesh> {
        let topology = ClosedTopology::of(mesh)?;
        let edges = &topology.edges;
        let (before_v, before_f) = (mesh.num_vertices(), mesh.num_faces());

        // Inset corners, face by face; `base[f] + i` is corner i of face f
        let mut base = Vec::with_capacity(mesh.num_faces());
        let mut vertices: Vec<Point3<f64>> = Vec::new();
        for face in mesh.faces() {
            base.push(vertices.len());
            let center = face_center(mesh, face);
            vertices.extend(face.indices().iter().map(|&v| {
                let p = mesh.vertex(v);
                p + (center - p) * self.amount
            }));
        }
        let inset = |face: usize, corner: usize| base[face] + corner % mesh.face(face).len();

        // Each manifold edge is met twice, first from its lower face
        let mut edge_corners: Vec<Vec<(usize, usize)>> = vec![Vec::with_capacity(2); edges.len()];
        for fi in 0..mesh.num_faces() {
            for (corner, &ei) in edges.face_edges(fi).iter().enumerate() {
                edge_corners[ei].push((fi, corner));
            }
        }

        let mut polygons: Vec<Vec<usize>> =
            Vec::with_capacity(mesh.num_faces() + edges.len() + mesh.num_vertices());

        // Caps
        for (fi, face) in mesh.faces().iter().enumerate() {
            polygons.push((0..face.len()).map(|i| inset(fi, i)).collect());
        }

        // Edge quads: f runs a -> b at corner i, g runs b -> a at corner j
        for corners in &edge_corners {
            if let [(f, i), (g, j)] = corners.as_slice() {
                let (fa, fb) = (inset(*f, *i), inset(*f, i + 1));
                let (gb, ga) = (inset(*g, *j), inset(*g, j + 1));
                polygons.push(vec![fb, fa, ga, gb]);
            }
        }

        // Vertex polygons
        for ring in topology.rings.iter().filter(|r| !r.is_empty()) {
            polygons.push(ring.iter().map(|c| inset(c.face, c.corner)).collect());
        }

        mesh.replace_geometry(vertices, polygons);
        log::debug!(
            "bevel({}): {}v/{}f -> {}v/{}f",
            self.amount,
            before_v,
            before_f,
            mesh.num_vertices(),
            mesh.num_faces()
        );
        Ok(mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::analysis::{edge_count, fulfills_euler_characteristic, is_manifold};
    use crate::geometry::face_normal;
    use crate::mesh::build_from_polygons;
    use crate::primitives;

    #[test]
    fn test_bevel_cube() {
        let mut mesh = primitives::cube(2.0);
        Bevel::new(0.25).unwrap().modify(&mut mesh).unwrap();

        assert_eq!(mesh.num_faces(), 26);
        assert_eq!(mesh.num_vertices(), 24);
        assert_eq!(edge_count(&mesh), 48);
        assert!(is_manifold(&mesh));
        assert!(fulfills_euler_characteristic(&mesh));

        let quads = mesh.faces().iter().filter(|f| f.len() == 4).count();
        let triangles = mesh.faces().iter().filter(|f| f.len() == 3).count();
        assert_eq!((quads, triangles), (18, 8));
    }

    #[test]
    fn test_bevel_inset_positions() {
        let mut mesh = primitives::cube(2.0);
        Bevel::new(0.5).unwrap().modify(&mut mesh).unwrap();

        // Corner 0 of the bottom face, halfway to (0, 0, -1)
        assert!((mesh.vertex(0) - Point3::new(-0.5, -0.5, -1.0)).norm() < 1e-10);
    }

    #[test]
    fn test_bevel_faces_point_outward() {
        for seed in [primitives::tetrahedron(1.0), primitives::cube(1.0), primitives::icosahedron(1.0)] {
            let mut mesh = seed;
            Bevel::new(0.3).unwrap().modify(&mut mesh).unwrap();
            for face in mesh.faces() {
                let center = face_center(&mesh, face);
                assert!(face_normal(&mesh, face).dot(&center.coords) > 0.0);
            }
        }
    }

    #[test]
    fn test_bevel_face_count_is_f_plus_e_plus_v() {
        let mut mesh = primitives::dodecahedron(1.0);
        let expected = mesh.num_faces() + edge_count(&mesh) + mesh.num_vertices();
        Bevel::new(0.1).unwrap().modify(&mut mesh).unwrap();
        assert_eq!(mesh.num_faces(), expected);
        assert!(is_manifold(&mesh));
    }

    #[test]
    fn test_bevel_amount_bounds() {
        assert!(Bevel::new(0.0).is_err());
        assert!(Bevel::new(1.0).is_err());
        assert!(Bevel::new(-0.5).is_err());
        assert!(Bevel::new(f64::NAN).is_err());
        assert_eq!(Bevel::new(0.5).unwrap().amount(), 0.5);
    }

    #[test]
    fn test_bevel_rejects_open_mesh() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let mut mesh = build_from_polygons(&vertices, &[vec![0, 1, 2, 3]]).unwrap();
        let result = Bevel::new(0.2).unwrap().modify(&mut mesh).map(|_| ());
        assert!(matches!(result, Err(MeshError::NonManifold { .. })));
        assert_eq!(mesh.num_vertices(), 4);
    }
}
