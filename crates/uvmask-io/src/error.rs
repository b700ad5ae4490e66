//! I/O error types
//!
//! Every decoder and encoder in this crate reports failures through
//! [`IoError`], so callers only need to handle one error type.

use thiserror::Error;

/// Error type for image I/O operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// Standard I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The image format or variant is not supported or not enabled
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The source ran out of bytes before the image was complete
    ///
    /// Counts are bytes for a short header and pixels for short pixel data.
    #[error("truncated image data: got {decoded} of {expected}")]
    Truncated { expected: usize, decoded: usize },

    /// The image data is structurally invalid
    #[error("invalid image data: {0}")]
    InvalidData(String),

    /// A format-specific decoder returned an error
    #[error("decode error: {0}")]
    DecodeError(String),

    /// A format-specific encoder returned an error
    #[error("encode error: {0}")]
    EncodeError(String),

    /// An error from the core library
    #[error("core error: {0}")]
    Core(#[from] uvmask_core::Error),
}

/// Convenience alias for I/O results.
pub type IoResult<T> = Result<T, IoError>;
