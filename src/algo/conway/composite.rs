//! Composite operators built from dual, kis and ambo.

use crate::algo::Modifier;
use crate::error::Result;
use crate::mesh::Mesh;

use super::{Ambo, ClosedTopology, Dual, Kis};

/// Check the closed-manifold precondition once, then run `stages` in order.
///
/// Every primitive maps a closed manifold to a closed manifold, so no later
/// stage can fail once the check passes.
fn compose<'m>(name: &str, mesh: &'m mut Mesh, stages: &[&dyn Modifier]) -> Result<&'m mut Mesh> {
    ClosedTopology::of(mesh)?;
    log::debug!("{}: {} stages", name, stages.len());
    for stage in stages {
        stage.modify(mesh)?;
    }
    Ok(mesh)
}

macro_rules! composite {
    ($(#[$doc:meta])* $name:ident, $label:literal, [$($stage:expr),+ $(,)?]) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name;

        impl Modifier for $name {
            fn modify<'m>(&self, mesh: &'m mut Mesh) -> Result<&'m mut Mesh> {
                compose($label, mesh, &[$(&$stage),+])
            }
        }
    };
}

composite!(
    /// Cut every vertex down to a new face: dual, kis, dual.
    Truncate, "truncate", [Dual, Kis, Dual]
);

composite!(
    /// Dual of kis: kis, dual.
    Zip, "zip", [Kis, Dual]
);

composite!(
    /// Ambo, then dual. Every original edge becomes a rhombus.
    Join, "join", [Ambo, Dual]
);

composite!(
    /// Dual, then kis.
    Needle, "needle", [Dual, Kis]
);

composite!(
    /// Push faces apart so every edge becomes a quad: ambo, ambo.
    Expand, "expand", [Ambo, Ambo]
);

composite!(
    /// Join applied twice.
    Ortho, "ortho", [Join, Join]
);

composite!(
    /// Ambo, dual, kis.
    AmboKisDual, "ambo-kis-dual", [Ambo, Dual, Kis]
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::analysis::{fulfills_euler_characteristic, is_manifold};
    use crate::error::MeshError;
    use crate::mesh::build_from_polygons;
    use crate::primitives;
    use nalgebra::Point3;

    fn counts(m: &dyn Modifier) -> (usize, usize) {
        let mut mesh = primitives::cube(1.0);
        m.modify(&mut mesh).unwrap();
        assert!(is_manifold(&mesh));
        assert!(fulfills_euler_characteristic(&mesh));
        (mesh.num_vertices(), mesh.num_faces())
    }

    #[test]
    fn test_composite_counts_on_cube() {
        assert_eq!(counts(&Truncate), (24, 14));
        assert_eq!(counts(&Zip), (24, 14));
        assert_eq!(counts(&Join), (14, 12));
        assert_eq!(counts(&Needle), (14, 24));
        assert_eq!(counts(&Expand), (24, 26));
        assert_eq!(counts(&Ortho), (26, 24));
        assert_eq!(counts(&AmboKisDual), (26, 48));
    }

    #[test]
    fn test_truncated_cube_face_shapes() {
        let mut mesh = primitives::cube(1.0);
        Truncate.modify(&mut mesh).unwrap();

        let triangles = mesh.faces().iter().filter(|f| f.len() == 3).count();
        let octagons = mesh.faces().iter().filter(|f| f.len() == 8).count();
        assert_eq!((triangles, octagons), (8, 6));
    }

    #[test]
    fn test_composite_matches_manual_sequence() {
        let mut composite = primitives::octahedron(1.0);
        let mut manual = composite.clone();

        Zip.modify(&mut composite).unwrap();
        Kis.modify(&mut manual).unwrap();
        Dual.modify(&mut manual).unwrap();

        assert_eq!(composite.vertices(), manual.vertices());
    }

    #[test]
    fn test_zip_rejects_open_mesh_before_kis() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let mut mesh = build_from_polygons(&vertices, &[vec![0, 1, 2]]).unwrap();

        let err = Zip.modify(&mut mesh).map(|_| ()).unwrap_err();
        assert!(matches!(err, MeshError::NonManifold { .. }));
        assert_eq!(mesh.num_faces(), 1);
        assert_eq!(mesh.num_vertices(), 3);
    }
}
