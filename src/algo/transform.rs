//! Rigid and affine vertex transforms.
//!
//! These modifiers move vertices without touching connectivity or UVs. Any
//! cached face normal is cleared, since it no longer describes the geometry;
//! run [`UpdateFaceNormals`](crate::algo::repair::UpdateFaceNormals) to
//! recompute them.

use nalgebra::{Point3, Unit, UnitQuaternion, Vector3};

use crate::algo::Modifier;
use crate::error::{MeshError, Result};
use crate::mesh::Mesh;

fn map_vertices(mesh: &mut Mesh, f: impl Fn(&Point3<f64>) -> Point3<f64>) {
    for p in mesh.vertices_mut() {
        *p = f(p);
    }
    for face in mesh.faces_mut() {
        face.set_normal(None);
    }
}

/// Move every vertex by a fixed offset.
#[derive(Debug, Clone, Copy)]
pub struct Translate {
    /// The offset.
    pub offset: Vector3<f64>,
}

impl Translate {
    /// Translate by `(x, y, z)`.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            offset: Vector3::new(x, y, z),
        }
    }
}

impl Modifier for Translate {
    fn modify<'m>(&self, mesh: &'m mut Mesh) -> Result<&'m mut Mesh> {
        map_vertices(mesh, |p| p + self.offset);
        Ok(mesh)
    }
}

/// Scale every vertex about the origin, per axis.
#[derive(Debug, Clone, Copy)]
pub struct Scale {
    factors: Vector3<f64>,
}

impl Scale {
    /// Scale by per-axis factors.
    ///
    /// # Errors
    /// Returns [`MeshError::InvalidParameter`] if any factor is not finite.
    pub fn new(x: f64, y: f64, z: f64) -> Result<Self> {
        let factors = Vector3::new(x, y, z);
        if factors.iter().any(|f| !f.is_finite()) {
            return Err(MeshError::invalid_param("factors", format!("{:?}", [x, y, z]), "must be finite"));
        }
        Ok(Self { factors })
    }

    /// Scale uniformly.
    ///
    /// # Errors
    /// Returns [`MeshError::InvalidParameter`] if `factor` is not finite.
    pub fn uniform(factor: f64) -> Result<Self> {
        Self::new(factor, factor, factor)
    }

    /// The per-axis factors.
    pub fn factors(&self) -> Vector3<f64> {
        self.factors
    }
}

impl Modifier for Scale {
    fn modify<'m>(&self, mesh: &'m mut Mesh) -> Result<&'m mut Mesh> {
        map_vertices(mesh, |p| Point3::from(p.coords.component_mul(&self.factors)));
        Ok(mesh)
    }
}

/// Rotate every vertex about the origin.
#[derive(Debug, Clone, Copy)]
pub struct Rotate {
    /// The rotation.
    pub rotation: UnitQuaternion<f64>,
}

impl Rotate {
    /// Rotate by `angle` radians about `axis` (right-handed).
    ///
    /// # Errors
    /// Returns [`MeshError::InvalidParameter`] if `axis` has (near) zero length.
    pub fn about_axis(axis: Vector3<f64>, angle: f64) -> Result<Self> {
        let axis = Unit::try_new(axis, 1e-12)
            .ok_or_else(|| MeshError::invalid_param("axis", format!("{:?}", axis), "must be non-zero"))?;
        Ok(Self {
            rotation: UnitQuaternion::from_axis_angle(&axis, angle),
        })
    }

    /// Rotate by a quaternion.
    pub fn from_quaternion(rotation: UnitQuaternion<f64>) -> Self {
        Self { rotation }
    }
}

impl Modifier for Rotate {
    fn modify<'m>(&self, mesh: &'m mut Mesh) -> Result<&'m mut Mesh> {
        map_vertices(mesh, |p| self.rotation * p);
        Ok(mesh)
    }
}

/// Translate the mesh so its bounding box is centered on a point.
///
/// A mesh without vertices is left alone.
#[derive(Debug, Clone, Copy)]
pub struct CenterAt {
    /// Where the bounding box center ends up.
    pub target: Point3<f64>,
}

impl CenterAt {
    /// Center on `target`.
    pub fn new(target: Point3<f64>) -> Self {
        Self { target }
    }

    /// Center on the origin.
    pub fn origin() -> Self {
        Self::new(Point3::origin())
    }
}

impl Modifier for CenterAt {
    fn modify<'m>(&self, mesh: &'m mut Mesh) -> Result<&'m mut Mesh> {
        if let Some((min, max)) = mesh.bounding_box() {
            let center = nalgebra::center(&min, &max);
            let offset = self.target - center;
            map_vertices(mesh, |p| p + offset);
        }
        Ok(mesh)
    }
}
