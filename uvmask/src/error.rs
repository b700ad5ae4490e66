//! Error type for the uvmask facade

use thiserror::Error;

/// Errors from any stage of the engine
#[derive(Debug, Error)]
pub enum UvError {
    #[error(transparent)]
    Core(#[from] uvmask_core::Error),

    #[error(transparent)]
    Io(#[from] uvmask_io::IoError),

    #[error(transparent)]
    Mesh(#[from] uvmask_mesh::MeshError),

    #[error(transparent)]
    Morph(#[from] uvmask_morph::MorphError),

    #[error(transparent)]
    Region(#[from] uvmask_region::RegionError),

    #[error(transparent)]
    Color(#[from] uvmask_color::ColorError),
}

/// Result type for facade operations
pub type UvResult<T> = Result<T, UvError>;
