//! stest CLI - host program for the stest harness
//!
//! Bootstraps the bundled self-check suite into a [`Registry`], runs it once
//! and prints the report to stdout. Diagnostics go to stderr through
//! `tracing`, so the report stays byte-exact.

use clap::Parser;
use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use stest::{Driver, DriverConfig, Registry, RunReport};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod error;
pub mod suite;

pub use error::{CliError, CliResult};

/// stest command line
#[derive(Parser, Debug)]
#[command(name = "stest")]
#[command(about = "Run the bundled stest self-check suite", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Print a detail block for every failed test
    #[arg(short, long, env = "STEST_VERBOSE")]
    pub verbose: bool,

    /// Also write the run report as JSON to this path
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
}

/// Run using the current process arguments.
pub fn run() -> CliResult<RunReport> {
    run_with_args(std::env::args_os())
}

/// Run using the provided argument iterator.
pub fn run_with_args<I, T>(args: I) -> CliResult<RunReport>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    let filter = if cli.verbose { "debug" } else { "warn" };
    // A second init (tests driving several runs) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(io::stderr),
        )
        .try_init();

    // The driver reports panics itself; route the hook's message to tracing.
    std::panic::set_hook(Box::new(|info| {
        tracing::debug!(panic = %info, "test panicked");
    }));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(&cli, &mut out)
}

/// Bootstrap the bundled suite and run it, reporting to `out`.
pub fn execute<W: Write>(cli: &Cli, out: &mut W) -> CliResult<RunReport> {
    let mut registry = Registry::new();
    suite::register_self_checks(&mut registry);
    tracing::debug!(tests = registry.len(), "bootstrap complete");

    let mut driver = Driver::new(DriverConfig::new().with_verbose(cli.verbose));
    let report = driver.run_with_output(&registry, out)?;

    if let Some(path) = &cli.report {
        fs::write(path, report.to_json()?)?;
        tracing::info!(path = %path.display(), "report written");
    }

    Ok(report)
}
