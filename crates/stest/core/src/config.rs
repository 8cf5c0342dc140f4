//! Driver configuration.

use serde::{Deserialize, Serialize};

/// Command-line token that turns on verbose reporting.
pub const VERBOSE_FLAG: &str = "-v";

/// Configuration for a [`Driver`](crate::Driver).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverConfig {
    /// Print per-failure detail after the summary
    pub verbose: bool,
}

impl DriverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Build a configuration from raw process arguments.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::default().with_verbose(verbose_requested(args))
    }
}

/// Whether a `-v` token appears among `args`.
pub fn verbose_requested<I, S>(args: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    args.into_iter().any(|arg| arg.as_ref() == VERBOSE_FLAG)
}
