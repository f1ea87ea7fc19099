//! Error types for tessera.
//!
//! Every fallible operation in the crate returns [`Result`], whose error type
//! is the single [`MeshError`] enum defined here.

use std::path::PathBuf;
use thiserror::Error;

use crate::mesh::FaceId;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur during mesh operations.
#[derive(Error, Debug)]
pub enum MeshError {
    /// A face references an invalid vertex index.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index.
        face: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// A face references an invalid UV index, or its UV list does not match
    /// its vertex list.
    #[error("face {face} has invalid UV indices: {details}")]
    InvalidUvIndex {
        /// The face index.
        face: usize,
        /// What is wrong with the UV indices.
        details: String,
    },

    /// A directed edge with equal or negative endpoints.
    #[error("invalid directed edge ({from} -> {to}): endpoints must be distinct and non-negative")]
    InvalidEdge {
        /// Start vertex of the rejected edge.
        from: i64,
        /// End vertex of the rejected edge.
        to: i64,
    },

    /// A face identity that does not belong to the mesh.
    #[error("face {0:?} is not part of this mesh")]
    UnknownFace(FaceId),

    /// The mesh has non-manifold topology.
    #[error("mesh has non-manifold topology: {details}")]
    NonManifold {
        /// Description of the non-manifold condition.
        details: String,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A malformed line in a text mesh file.
    #[error("parse error on line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// Error message.
        message: String,
    },

    /// Error loading mesh from file.
    #[error("failed to load mesh from {path}: {source}")]
    LoadError {
        /// The file path.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: Box<MeshError>,
    },

    /// Unsupported file format.
    #[error("unsupported file format: {extension}")]
    UnsupportedFormat {
        /// The file extension.
        extension: String,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl MeshError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MeshError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    /// Create a non-manifold error from a description.
    pub fn non_manifold(details: impl Into<String>) -> Self {
        MeshError::NonManifold {
            details: details.into(),
        }
    }
}
