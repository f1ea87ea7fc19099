//! Conway polyhedron operators.
//!
//! Conway notation describes polyhedra as a chain of operators applied to a
//! seed solid. This module implements the primitive operators as
//! [`Modifier`](crate::algo::Modifier)s, the common composites built from
//! them, and a parser for notation strings.
//!
//! # Primitives
//!
//! | Operator | Letter | V' | F' |
//! |----------|--------|----|----|
//! | [`Dual`] | `d` | F | V |
//! | [`Kis`] / [`Poke`] | `k` | V + F | 2E |
//! | [`Ambo`] | `a` | E | F + V |
//!
//! # Composites
//!
//! Composites are nothing more than their primitives applied in order:
//!
//! - [`Truncate`] (`t`) = dual, kis, dual
//! - [`Zip`] (`z`) = kis, dual
//! - [`Join`] (`j`) = ambo, dual
//! - [`Needle`] (`n`) = dual, kis
//! - [`Expand`] (`e`) = ambo, ambo
//! - [`Ortho`] (`o`) = join, join
//! - [`AmboKisDual`] (`x`) = ambo, dual, kis
//!
//! # Preconditions
//!
//! [`Dual`], [`Ambo`] and every composite require a closed, consistently
//! oriented manifold without degenerate faces, and report
//! [`MeshError::NonManifold`] before touching the mesh otherwise. All
//! operators map such input to such output.
//!
//! # Example
//!
//! ```
//! use tessera::algo::conway::ConwayNotation;
//!
//! // Truncated cube
//! let mesh = ConwayNotation::parse("tC")?.build()?;
//! assert_eq!(mesh.num_vertices(), 24);
//! assert_eq!(mesh.num_faces(), 14);
//! # Ok::<(), tessera::error::MeshError>(())
//! ```

mod ambo;
mod composite;
mod dual;
mod kis;
mod notation;

pub use ambo::Ambo;
pub use composite::{AmboKisDual, Expand, Join, Needle, Ortho, Truncate, Zip};
pub use dual::Dual;
pub use kis::{Kis, Poke};
pub use notation::{ConwayNotation, ConwayOp, Seed};

use crate::error::{MeshError, Result};
use crate::mesh::{vertex_rings, Corner, EdgeTable, Mesh};

/// Connectivity of a mesh already checked to be a closed manifold.
pub(crate) struct ClosedTopology {
    pub(crate) edges: EdgeTable,
    pub(crate) rings: Vec<Vec<Corner>>,
}

impl ClosedTopology {
    /// Build the edge table and vertex rings, rejecting anything that is not
    /// a closed, consistently oriented manifold.
    pub(crate) fn of(mesh: &Mesh) -> Result<Self> {
        if let Some(fi) = mesh.faces().iter().position(|f| f.is_degenerate()) {
            return Err(MeshError::non_manifold(format!(
                "face {} has fewer than three corners",
                fi
            )));
        }

        let edges = EdgeTable::build(mesh);
        if let Some(edge) = edges.iter().find(|e| !e.is_manifold()) {
            return Err(MeshError::non_manifold(format!(
                "edge {:?} is shared by {} faces",
                edge.key,
                edge.face_count()
            )));
        }

        let rings = vertex_rings(mesh)?;
        Ok(Self { edges, rings })
    }
}
