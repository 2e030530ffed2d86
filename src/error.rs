//! Error types for seamline.
//!
//! Mesh construction, file I/O and the straightening pipeline all report
//! failures through [`MeshError`].

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur while building meshes or straightening UVs.
#[derive(Error, Debug)]
pub enum MeshError {
    /// The mesh has no faces.
    #[error("mesh has no faces")]
    EmptyMesh,

    /// A face references an invalid vertex index.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index.
        face: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// A face has fewer than three corners or repeats a vertex.
    #[error("face {face} is degenerate (fewer than 3 corners or repeated vertices)")]
    DegenerateFace {
        /// The face index.
        face: usize,
    },

    /// The mesh has non-manifold topology.
    #[error("mesh has non-manifold topology: {details}")]
    NonManifold {
        /// Description of the non-manifold condition.
        details: String,
    },

    /// A directed edge is used by more than one face.
    #[error("edge ({v0}, {v1}) is used by more than one face in the same direction")]
    NonManifoldEdge {
        /// First vertex of the edge.
        v0: usize,
        /// Second vertex of the edge.
        v1: usize,
    },

    /// No edge connects the two vertices.
    #[error("no edge between vertices {v0} and {v1}")]
    MissingEdge {
        /// First vertex.
        v0: usize,
        /// Second vertex.
        v1: usize,
    },

    /// A UV layer does not match the mesh it is used with.
    #[error("UV layer has {actual} corners but the mesh needs {expected}")]
    UvCountMismatch {
        /// Number of corner slots the mesh requires.
        expected: usize,
        /// Number of corner slots provided.
        actual: usize,
    },

    /// No faces were selected for straightening.
    #[error("no faces selected")]
    EmptySelection,

    /// A face without any seam edge reached the alignment classifier.
    #[error("face {face} has no seam edge")]
    NoSeamEdge {
        /// The face index.
        face: usize,
    },

    /// A staged UV coordinate is NaN or infinite.
    #[error("corner {corner} received a non-finite UV coordinate")]
    NonFiniteUv {
        /// The half-edge index of the corner.
        corner: usize,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed input text.
    #[error("line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// Error loading mesh from file.
    #[error("failed to load mesh from {path}: {message}")]
    LoadError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
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

    /// Create a parse error for a 1-based line number.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        MeshError::Parse {
            line,
            message: message.into(),
        }
    }
}
