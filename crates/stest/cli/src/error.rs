//! CLI error types

use thiserror::Error;

/// CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Harness error: {0}")]
    Harness(#[from] stest::HarnessError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
