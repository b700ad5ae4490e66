//! Error types for uvmask-mesh

use thiserror::Error;

/// Which index array a face reference points into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    Vertex,
    Uv,
}

impl std::fmt::Display for IndexKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vertex => write!(f, "vertex"),
            Self::Uv => write!(f, "uv"),
        }
    }
}

/// uvmask-mesh error type
#[derive(Error, Debug)]
pub enum MeshError {
    /// Malformed mesh text that cannot be skipped line by line
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A face references an index past the end of its array
    #[error("face {face} references {kind} index {index}, but only {len} exist")]
    IndexOutOfRange {
        face: usize,
        kind: IndexKind,
        index: u32,
        len: usize,
    },

    /// Geometry handed to a mesh builder is inconsistent
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A progress callback requested cancellation
    #[error("{stage} cancelled after {processed} items")]
    Cancelled {
        stage: &'static str,
        processed: usize,
    },

    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] uvmask_core::Error),
}

/// Result type alias for mesh operations
pub type MeshResult<T> = Result<T, MeshError>;
