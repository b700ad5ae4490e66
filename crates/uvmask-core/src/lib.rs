//! uvmask core - Shared data structures for the UV mask engine
//!
//! This crate provides the types every other uvmask crate exchanges:
//!
//! - [`RasterBuffer`] - The RGBA pixel container (top-down rows)
//! - [`Color`] / [`Coverage`] - Drawing colors and union-of-shapes fill maps
//! - [`ProcessLimits`] / [`ProgressGate`] / [`Truncation`] - Work caps and
//!   cooperative cancellation
//! - [`OperationTimer`] - Timed tracing spans for pipeline stages

pub mod error;
pub mod limits;
pub mod raster;
pub mod timing;

pub use error::{Error, Result};
pub use limits::{
    DEFAULT_CHECK_INTERVAL, ProcessLimits, Progress, ProgressCallback, ProgressGate, Truncation,
};
pub use raster::{BINARY_THRESHOLD, Color, Coverage, OFF, ON, OPAQUE_THRESHOLD, RasterBuffer};
pub use timing::OperationTimer;
