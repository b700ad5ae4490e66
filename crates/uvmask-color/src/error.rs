//! Error types for uvmask-color

use thiserror::Error;

/// Errors that can occur during mask classification and painting
#[derive(Debug, Error)]
pub enum ColorError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] uvmask_core::Error),

    /// Region growing error
    #[error("region error: {0}")]
    Region(#[from] uvmask_region::RegionError),

    /// No source mask registered under this name
    #[error("unknown mask: {0}")]
    UnknownMask(String),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for color operations
pub type ColorResult<T> = Result<T, ColorError>;
