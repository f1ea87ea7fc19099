//! Identity and edge key types.
//!
//! Vertices are identified purely by their `usize` position. Faces carry a
//! [`FaceId`] that stays attached to the face for its whole life, so removal
//! by identity never hits a face that merely moved into a stale position.
//! Edges are never stored; [`EdgeKey`] and [`DirectedEdge`] name them.

use std::fmt::{self, Debug};

use crate::error::{MeshError, Result};

/// A stable face identity, assigned by the owning mesh on insertion.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct FaceId(u64);

impl FaceId {
    /// Create an identity from a raw value.
    #[inline]
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw value.
    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl Debug for FaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F#{}", self.0)
    }
}

/// An unordered pair of vertex indices.
///
/// `EdgeKey::new(a, b) == EdgeKey::new(b, a)`; the smaller index is always
/// stored first.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct EdgeKey {
    lo: usize,
    hi: usize,
}

impl EdgeKey {
    /// Create the canonical key for the edge between `a` and `b`.
    #[inline]
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }

    /// The smaller vertex index.
    #[inline]
    pub fn lo(self) -> usize {
        self.lo
    }

    /// The larger vertex index.
    #[inline]
    pub fn hi(self) -> usize {
        self.hi
    }

    /// Whether `v` is one of the endpoints.
    #[inline]
    pub fn contains(self, v: usize) -> bool {
        self.lo == v || self.hi == v
    }

    /// The endpoint opposite `v`, if `v` is an endpoint.
    pub fn other(self, v: usize) -> Option<usize> {
        if v == self.lo {
            Some(self.hi)
        } else if v == self.hi {
            Some(self.lo)
        } else {
            None
        }
    }
}

impl Debug for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E({}, {})", self.lo, self.hi)
    }
}

/// An ordered pair of distinct vertex indices.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct DirectedEdge {
    from: usize,
    to: usize,
}

impl DirectedEdge {
    /// Create a directed edge.
    ///
    /// # Errors
    /// Returns [`MeshError::InvalidEdge`] if `from == to`.
    pub fn new(from: usize, to: usize) -> Result<Self> {
        if from == to {
            return Err(MeshError::InvalidEdge {
                from: from as i64,
                to: to as i64,
            });
        }
        Ok(Self { from, to })
    }

    /// Create a directed edge from signed indices, as found at file boundaries.
    ///
    /// # Errors
    /// Returns [`MeshError::InvalidEdge`] if either index is negative or both
    /// are equal.
    pub fn from_signed(from: i64, to: i64) -> Result<Self> {
        match (usize::try_from(from), usize::try_from(to)) {
            (Ok(f), Ok(t)) if f != t => Ok(Self { from: f, to: t }),
            _ => Err(MeshError::InvalidEdge { from, to }),
        }
    }

    /// Start vertex.
    #[inline]
    pub fn from(self) -> usize {
        self.from
    }

    /// End vertex.
    #[inline]
    pub fn to(self) -> usize {
        self.to
    }

    /// Replace the start vertex, keeping the edge unchanged on failure.
    pub fn set_from(&mut self, from: usize) -> Result<()> {
        *self = Self::new(from, self.to)?;
        Ok(())
    }

    /// Replace the end vertex, keeping the edge unchanged on failure.
    pub fn set_to(&mut self, to: usize) -> Result<()> {
        *self = Self::new(self.from, to)?;
        Ok(())
    }

    /// The reverse edge (`to -> from`).
    #[inline]
    pub fn create_pair(self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }

    /// The unordered key of this edge.
    #[inline]
    pub fn key(self) -> EdgeKey {
        EdgeKey::new(self.from, self.to)
    }
}

impl Debug for DirectedEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}
