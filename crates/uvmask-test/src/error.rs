//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur while preparing regression fixtures
#[derive(Debug, Error)]
pub enum TestError {
    /// Fixture description is inconsistent
    #[error("invalid fixture: {0}")]
    InvalidFixture(String),

    /// Raster construction failed
    #[error("raster error: {0}")]
    Core(#[from] uvmask_core::Error),
}

/// Result type for test helpers
pub type TestResult<T> = Result<T, TestError>;
