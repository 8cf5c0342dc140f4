//! Harness error types.
//!
//! These cover the harness itself (writing the report, misuse of the
//! driver). Failures of individual tests are never errors at this level:
//! they are collected into the [`RunReport`](crate::RunReport).

use thiserror::Error;

use crate::driver::DriverState;

/// Errors raised by the harness machinery.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Writing the console report failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The driver was asked to run from a state other than `Idle`
    #[error("driver cannot run from state {0:?}")]
    InvalidState(DriverState),

    /// Report serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for harness operations
pub type HarnessResult<T> = Result<T, HarnessError>;
