//! Error types for uvmask-core
//!
//! Provides a unified error type for raster construction and access.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use thiserror::Error;

/// uvmask-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid raster dimensions
    #[error("invalid raster dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Pixel buffer length does not match the declared dimensions
    #[error("pixel buffer length {actual} does not match {width}x{height} RGBA ({expected} bytes)")]
    BufferLength {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// Pixel coordinate out of bounds
    #[error("pixel ({x}, {y}) out of bounds for {width}x{height} raster")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Raster dimension mismatch
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
